use rayon::prelude::*;
use tracing::{info, warn};
use crate::core::calculator::EmissionCalculator;
use crate::core::error::CalculatorError;
use crate::data::scenarios_loader::Scenario;
use crate::models::emission_result::EmissionResult;
use crate::utils::logging::{self, OperationCategory};

#[derive(Debug, Clone, PartialEq)]
pub struct BatchOutcome {
    pub scenario: Scenario,
    pub result: Result<EmissionResult, CalculatorError>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub failed: usize,
    pub combined_total: f64, // tonnes CO2 per year across successful scenarios
}

impl BatchSummary {
    pub fn from_outcomes(outcomes: &[BatchOutcome]) -> Self {
        outcomes.iter().fold(BatchSummary::default(), |mut summary, outcome| {
            match &outcome.result {
                Ok(result) => {
                    summary.succeeded += 1;
                    summary.combined_total += result.total;
                }
                Err(_) => summary.failed += 1,
            }
            summary
        })
    }
}

fn evaluate(calculator: &EmissionCalculator, scenario: &Scenario) -> BatchOutcome {
    let result = calculator.compute_annual_emissions(&scenario.region, &scenario.inputs);
    if let Err(e) = &result {
        warn!(scenario = %scenario.name, error = %e, "scenario failed");
    }
    BatchOutcome {
        scenario: scenario.clone(),
        result,
    }
}

/// Evaluate every scenario independently. Outcomes keep the input order and a
/// failing scenario does not stop the rest.
pub fn run_batch(calculator: &EmissionCalculator, scenarios: &[Scenario], parallel: bool) -> Vec<BatchOutcome> {
    let _timing = logging::start_timing("run_batch", OperationCategory::Batch);

    let outcomes: Vec<BatchOutcome> = if parallel {
        scenarios.par_iter().map(|s| evaluate(calculator, s)).collect()
    } else {
        scenarios.iter().map(|s| evaluate(calculator, s)).collect()
    };

    let summary = BatchSummary::from_outcomes(&outcomes);
    info!(succeeded = summary.succeeded, failed = summary.failed, "batch complete");
    outcomes
}
