use std::fmt::Write;
use crate::analysis::batch::{BatchOutcome, BatchSummary};
use crate::analysis::breakdown::EmissionBreakdown;
use crate::models::category::EmissionCategory;
use crate::models::emission_factors::EmissionFactorTable;
use crate::models::emission_result::EmissionResult;

pub const UNIT_SUFFIX: &str = "tonnes CO2 per year";

// Order the categories are listed in on the results page
const REPORT_ORDER: [EmissionCategory; EmissionCategory::COUNT] = [
    EmissionCategory::Mining,
    EmissionCategory::Transportation,
    EmissionCategory::Electricity,
    EmissionCategory::Waste,
    EmissionCategory::Fuel,
    EmissionCategory::Explosives,
    EmissionCategory::Methane,
];

pub fn format_result_report(region: &str, result: &EmissionResult) -> String {
    let breakdown = EmissionBreakdown::from_result(result);
    let mut out = String::new();

    let _ = writeln!(out, "\nResults ({})", region);
    let _ = writeln!(out, "----------------------------------------");
    let _ = writeln!(out, "Carbon Emissions by Category:");
    for category in REPORT_ORDER {
        let percent = breakdown.share(category).map_or(0.0, |share| share.percent);
        let _ = writeln!(
            out,
            "  {}: {:.2} {} ({:.1}%)",
            category.label(),
            result.get(category),
            UNIT_SUFFIX,
            percent
        );
    }
    let _ = writeln!(out, "Total Carbon Footprint:");
    let _ = writeln!(out, "  Your total carbon footprint is: {:.2} {}", result.total, UNIT_SUFFIX);
    if let Some(category) = breakdown.dominant {
        let _ = writeln!(out, "  Largest source: {}", category.label());
    }
    let _ = writeln!(out, "----------------------------------------");
    out
}

pub fn print_result_report(region: &str, result: &EmissionResult) {
    print!("{}", format_result_report(region, result));
}

pub fn format_batch_report(outcomes: &[BatchOutcome]) -> String {
    let summary = BatchSummary::from_outcomes(outcomes);
    let mut out = String::new();

    let _ = writeln!(out, "\nBatch Results");
    let _ = writeln!(out, "----------------------------------------");
    for outcome in outcomes {
        match &outcome.result {
            Ok(result) => {
                let _ = writeln!(
                    out,
                    "{} [{}]: {:.2} {}",
                    outcome.scenario.name, outcome.scenario.region, result.total, UNIT_SUFFIX
                );
            }
            Err(e) => {
                let _ = writeln!(out, "{} [{}]: FAILED - {}", outcome.scenario.name, outcome.scenario.region, e);
            }
        }
    }
    let _ = writeln!(out, "----------------------------------------");
    let _ = writeln!(out, "Succeeded: {}, Failed: {}", summary.succeeded, summary.failed);
    let _ = writeln!(out, "Combined footprint: {:.2} {}", summary.combined_total, UNIT_SUFFIX);
    out
}

pub fn print_batch_report(outcomes: &[BatchOutcome]) {
    print!("{}", format_batch_report(outcomes));
}

/// Every region in `table` with its emission factors and their units.
pub fn format_factor_table(table: &EmissionFactorTable) -> String {
    let mut out = String::from("Supported regions:\n");
    for region in table.regions() {
        let _ = writeln!(out, "  {}", region);
        let Some(factors) = table.region(&region) else {
            continue;
        };
        for (category, factor) in factors.iter() {
            let _ = writeln!(out, "    {}: {} {}", category.label(), factor, category.factor_unit());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::CalculatorError;
    use crate::data::scenarios_loader::Scenario;
    use crate::models::activity::ActivityInputs;

    #[test]
    fn result_report_lists_every_category_with_unit() {
        let result = EmissionResult {
            mining: 0.85,
            transportation: 0.51,
            electricity: 1.97,
            waste: 0.12,
            fuel: 1.34,
            methane: 25.0,
            explosives: 0.0,
            total: 29.79,
        };
        let report = format_result_report("India", &result);

        assert!(report.contains("Mining: 0.85 tonnes CO2 per year"));
        assert!(report.contains("Fuel Consumption: 1.34 tonnes CO2 per year"));
        assert!(report.contains("Explosives: 0.00 tonnes CO2 per year"));
        assert!(report.contains("Your total carbon footprint is: 29.79 tonnes CO2 per year"));
        assert!(report.contains("Largest source: Methane"));
    }

    #[test]
    fn batch_report_shows_failures_inline() {
        let outcomes = vec![BatchOutcome {
            scenario: Scenario {
                name: "offworld".to_string(),
                region: "Mars".to_string(),
                inputs: ActivityInputs::default(),
            },
            result: Err(CalculatorError::UnknownRegion("Mars".to_string())),
        }];
        let report = format_batch_report(&outcomes);

        assert!(report.contains("offworld [Mars]: FAILED - Unknown region: Mars"));
        assert!(report.contains("Succeeded: 0, Failed: 1"));
    }

    #[test]
    fn factor_table_lists_each_region_with_units() {
        let report = format_factor_table(&EmissionFactorTable::builtin());

        assert!(report.starts_with("Supported regions:\n  India\n"));
        assert!(report.contains("    Mining: 0.85 kgCO2/tonne of coal mined"));
        assert!(report.contains("    Fuel Consumption: 2.68 kgCO2/litre of diesel"));
        assert!(report.contains("    Methane: 25 kgCO2e/tonne of coal mined"));
        assert_eq!(report.lines().count(), 2 + EmissionCategory::COUNT);
    }
}
