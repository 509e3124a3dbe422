use std::collections::BTreeSet;
use tracing::debug;
use crate::config::calculator_config::{CalculatorConfig, DistanceBasis};
use crate::config::const_funcs::{annualize_daily, annualize_monthly, kg_to_tonnes, round_to_places};
use crate::core::error::CalculatorError;
use crate::models::activity::ActivityInputs;
use crate::models::category::EmissionCategory;
use crate::models::emission_factors::EmissionFactorTable;
use crate::models::emission_result::EmissionResult;
use crate::utils::logging::{self, OperationCategory};

/// Activity inputs converted to annual quantities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnualActivity {
    pub coal_mined: f64,        // tonnes per year
    pub distance: f64,          // km per year
    pub fuel_consumption: f64,  // litres per year
    pub electricity: f64,       // kWh per year
    pub waste: f64,             // kg per year
    pub explosives: f64,        // kg per year
}

impl AnnualActivity {
    pub fn from_inputs(inputs: &ActivityInputs, distance_basis: DistanceBasis) -> Self {
        let distance = match distance_basis {
            DistanceBasis::Daily => annualize_daily(inputs.distance),
            DistanceBasis::Annual => inputs.distance,
        };

        Self {
            coal_mined: inputs.coal_mined,
            distance,
            fuel_consumption: inputs.fuel_consumption,
            electricity: annualize_monthly(inputs.electricity),
            waste: annualize_monthly(inputs.waste),
            explosives: inputs.explosives,
        }
    }

    /// Activity quantity that drives a category. Methane follows coal mined.
    pub fn driver(&self, category: EmissionCategory) -> f64 {
        match category {
            EmissionCategory::Mining => self.coal_mined,
            EmissionCategory::Transportation => self.distance,
            EmissionCategory::Electricity => self.electricity,
            EmissionCategory::Waste => self.waste,
            EmissionCategory::Fuel => self.fuel_consumption,
            EmissionCategory::Methane => self.coal_mined,
            EmissionCategory::Explosives => self.explosives,
        }
    }
}

/// Computes annual emissions from activity inputs against a fixed factor table.
///
/// The table is never mutated after construction, so a shared reference can be
/// used from any number of threads.
#[derive(Debug, Clone)]
pub struct EmissionCalculator {
    factors: EmissionFactorTable,
    config: CalculatorConfig,
}

impl EmissionCalculator {
    pub fn new(factors: EmissionFactorTable) -> Self {
        Self::with_config(factors, CalculatorConfig::default())
    }

    pub fn with_config(factors: EmissionFactorTable, config: CalculatorConfig) -> Self {
        Self { factors, config }
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    pub fn factors(&self) -> &EmissionFactorTable {
        &self.factors
    }

    pub fn supported_regions(&self) -> BTreeSet<String> {
        self.factors.regions()
    }

    /// Annual emissions for `region`, in tonnes CO2 per year.
    ///
    /// Each category is converted to tonnes and rounded before the total is
    /// summed, and the total is rounded again. Fails before any arithmetic if
    /// the region is unknown or an input is negative or non-finite.
    pub fn compute_annual_emissions(
        &self,
        region: &str,
        inputs: &ActivityInputs,
    ) -> Result<EmissionResult, CalculatorError> {
        let _timing = logging::start_timing("compute_annual_emissions", OperationCategory::Calculation);

        let factors = self.factors
            .region(region)
            .ok_or_else(|| CalculatorError::UnknownRegion(region.to_string()))?;
        inputs.validate()?;

        let annual = AnnualActivity::from_inputs(inputs, self.config.distance_basis);
        let places = self.config.decimal_places;
        let mode = self.config.rounding;

        let mut result = EmissionResult::default();
        for category in EmissionCategory::ALL {
            let kg = factors.get(category) * annual.driver(category);
            result.set(category, round_to_places(kg_to_tonnes(kg), places, mode));
        }
        result.total = round_to_places(result.category_sum(), places, mode);

        debug!(region, total = result.total, "computed annual emissions");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::calculator_config::RoundingMode;
    use crate::models::activity::ActivityField;
    use crate::models::emission_factors::RegionFactors;

    fn reference_inputs() -> ActivityInputs {
        ActivityInputs::new(1000.0, 10.0, 500.0, 200.0, 100.0, 50.0)
    }

    #[test]
    fn reference_scenario_matches_expected_values() {
        let calculator = EmissionCalculator::new(EmissionFactorTable::builtin());
        let result = calculator.compute_annual_emissions("India", &reference_inputs()).unwrap();

        assert_eq!(result.mining, 0.85);
        assert_eq!(result.transportation, 0.51);
        assert_eq!(result.electricity, 1.97);
        assert_eq!(result.waste, 0.12);
        assert_eq!(result.fuel, 1.34);
        assert_eq!(result.methane, 25.0);
        assert_eq!(result.explosives, 0.0);
        assert_eq!(result.total, 29.79);
    }

    #[test]
    fn distance_is_annualized_from_a_daily_average() {
        let activity = AnnualActivity::from_inputs(&reference_inputs(), DistanceBasis::Daily);
        assert_eq!(activity.distance, 3650.0);
        assert_eq!(activity.electricity, 2400.0);
        assert_eq!(activity.waste, 1200.0);
        assert_eq!(activity.coal_mined, 1000.0);
    }

    #[test]
    fn annual_distance_basis_skips_scaling() {
        let config = CalculatorConfig { distance_basis: DistanceBasis::Annual, ..Default::default() };
        let calculator = EmissionCalculator::with_config(EmissionFactorTable::builtin(), config);
        let inputs = ActivityInputs { distance: 3650.0, ..Default::default() };

        let result = calculator.compute_annual_emissions("India", &inputs).unwrap();
        assert_eq!(result.transportation, 0.51);
    }

    #[test]
    fn methane_is_driven_by_coal_mined() {
        let activity = AnnualActivity::from_inputs(&reference_inputs(), DistanceBasis::Daily);
        assert_eq!(activity.driver(EmissionCategory::Methane), activity.coal_mined);
    }

    #[test]
    fn rounding_mode_applies_to_categories() {
        let mut factors = [1.0; EmissionCategory::COUNT];
        factors[EmissionCategory::Explosives.index()] = 2.5;
        let mut table = EmissionFactorTable::new();
        table.insert("Test", RegionFactors::from_array("Test", factors).unwrap());

        // 2.5 kg/kg * 50 kg = 125 kg -> 0.125 t, an exact tie
        let inputs = ActivityInputs { explosives: 50.0, ..Default::default() };

        let half_up = CalculatorConfig { rounding: RoundingMode::HalfUp, ..Default::default() };
        let up = EmissionCalculator::with_config(table.clone(), half_up)
            .compute_annual_emissions("Test", &inputs)
            .unwrap();
        let even = EmissionCalculator::new(table)
            .compute_annual_emissions("Test", &inputs)
            .unwrap();

        assert_eq!(up.explosives, 0.13);
        assert_eq!(even.explosives, 0.12);
        assert_eq!(even.total, 0.12);
    }

    #[test]
    fn region_is_checked_before_inputs() {
        let calculator = EmissionCalculator::new(EmissionFactorTable::builtin());
        let inputs = ActivityInputs { coal_mined: -1.0, ..Default::default() };

        assert_eq!(
            calculator.compute_annual_emissions("Mars", &inputs),
            Err(CalculatorError::UnknownRegion("Mars".to_string()))
        );
        assert_eq!(
            calculator.compute_annual_emissions("India", &inputs),
            Err(CalculatorError::InvalidInput { field: ActivityField::CoalMined, value: -1.0 })
        );
    }

    #[test]
    fn keeps_the_injected_table_and_config() {
        let config = CalculatorConfig {
            distance_basis: DistanceBasis::Annual,
            rounding: RoundingMode::HalfUp,
            decimal_places: 3,
        };
        let calculator = EmissionCalculator::with_config(EmissionFactorTable::builtin(), config.clone());

        assert_eq!(calculator.config(), &config);
        assert_eq!(calculator.factors(), &EmissionFactorTable::builtin());
        assert_eq!(calculator.supported_regions(), calculator.factors().regions());
    }
}
