use clap::Parser;
use crate::config::calculator_config::{CalculatorConfig, DistanceBasis, RoundingMode};
use crate::config::constants::DEFAULT_REGION;
use crate::models::activity::ActivityInputs;

#[derive(Parser, Debug)]
#[command(author, version, about = "Annual carbon footprint calculator for coal mines", long_about = None)]
pub struct Args {
    #[arg(short, long, default_value = DEFAULT_REGION)]
    region: String,

    #[arg(long, help = "Total coal mined (tonnes)", default_value_t = 0.0, allow_negative_numbers = true)]
    coal_mined: f64,

    #[arg(long, help = "Average transportation distance (km per day)", default_value_t = 0.0, allow_negative_numbers = true)]
    distance: f64,

    #[arg(long, help = "Fuel consumption (litres)", default_value_t = 0.0, allow_negative_numbers = true)]
    fuel_consumption: f64,

    #[arg(long, help = "Monthly electricity consumption (kWh)", default_value_t = 0.0, allow_negative_numbers = true)]
    electricity: f64,

    #[arg(long, help = "Waste generated per month (kg)", default_value_t = 0.0, allow_negative_numbers = true)]
    waste: f64,

    #[arg(long, help = "Explosives used (kg)", default_value_t = 0.0, allow_negative_numbers = true)]
    explosives: f64,

    #[arg(short, long, help = "Extra emission factor table (.json or .csv)")]
    factors: Option<String>,

    #[arg(long, help = "Calculator config (.json)")]
    config: Option<String>,

    #[arg(long, help = "Distance input period, overrides the config (daily or annual)")]
    distance_basis: Option<DistanceBasis>,

    #[arg(long, help = "Tie-breaking rule, overrides the config (half-even or half-up)")]
    rounding: Option<RoundingMode>,

    #[arg(long, help = "Decimal places for results, overrides the config")]
    decimal_places: Option<u32>,

    #[arg(long, help = "List supported regions and their emission factors", default_value_t = false)]
    list_regions: bool,

    #[arg(long, help = "Print results as JSON", default_value_t = false)]
    json: bool,

    #[arg(long, help = "Write results to a timestamped CSV under this directory")]
    csv_export: Option<String>,

    #[arg(short, long, help = "Evaluate every scenario in this CSV instead of a single input set")]
    scenarios: Option<String>,

    #[arg(short, long, default_value_t = false)]
    parallel: bool,

    #[arg(long, help = "Reject inputs outside the calculator form ranges", default_value_t = false)]
    strict_ranges: bool,

    #[arg(long, default_value_t = false)]
    debug_logging: bool,

    #[arg(long, default_value_t = false)]
    enable_timing: bool,
}

impl Args {
    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn inputs(&self) -> ActivityInputs {
        ActivityInputs::new(
            self.coal_mined,
            self.distance,
            self.fuel_consumption,
            self.electricity,
            self.waste,
            self.explosives,
        )
    }

    pub fn factors(&self) -> Option<&str> {
        self.factors.as_deref()
    }

    pub fn config(&self) -> Option<&str> {
        self.config.as_deref()
    }

    /// Apply the command-line overrides on top of `config`.
    pub fn apply_overrides(&self, config: &mut CalculatorConfig) {
        if let Some(basis) = self.distance_basis {
            config.distance_basis = basis;
        }
        if let Some(rounding) = self.rounding {
            config.rounding = rounding;
        }
        if let Some(places) = self.decimal_places {
            config.decimal_places = places;
        }
    }

    pub fn list_regions(&self) -> bool {
        self.list_regions
    }

    pub fn json(&self) -> bool {
        self.json
    }

    pub fn csv_export(&self) -> Option<&str> {
        self.csv_export.as_deref()
    }

    pub fn scenarios(&self) -> Option<&str> {
        self.scenarios.as_deref()
    }

    pub fn parallel(&self) -> bool {
        self.parallel
    }

    pub fn strict_ranges(&self) -> bool {
        self.strict_ranges
    }

    pub fn debug_logging(&self) -> bool {
        self.debug_logging
    }

    pub fn enable_timing(&self) -> bool {
        self.enable_timing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_india_with_zero_inputs() {
        let args = Args::try_parse_from(["coalprint"]).unwrap();
        assert_eq!(args.region(), "India");
        assert_eq!(args.inputs(), ActivityInputs::default());
        assert!(!args.json());
        assert!(args.scenarios().is_none());
    }

    #[test]
    fn parses_activity_flags() {
        let args = Args::try_parse_from([
            "coalprint",
            "--coal-mined", "1000",
            "--distance", "10",
            "--fuel-consumption", "500",
            "--electricity", "200",
            "--waste", "100",
            "--explosives", "50",
            "--json",
        ])
        .unwrap();

        assert_eq!(args.inputs(), ActivityInputs::new(1000.0, 10.0, 500.0, 200.0, 100.0, 50.0));
        assert!(args.json());
    }

    #[test]
    fn overrides_replace_config_values() {
        let args = Args::try_parse_from([
            "coalprint",
            "--distance-basis", "annual",
            "--rounding", "half-up",
        ])
        .unwrap();

        let mut config = CalculatorConfig::default();
        args.apply_overrides(&mut config);
        assert_eq!(config.distance_basis, DistanceBasis::Annual);
        assert_eq!(config.rounding, RoundingMode::HalfUp);
        assert_eq!(config.decimal_places, 2);
    }

    #[test]
    fn unknown_rounding_mode_is_rejected() {
        assert!(Args::try_parse_from(["coalprint", "--rounding", "bankers"]).is_err());
    }

    #[test]
    fn negative_values_reach_the_calculator() {
        let args = Args::try_parse_from(["coalprint", "--coal-mined", "-1"]).unwrap();
        assert_eq!(args.inputs().coal_mined, -1.0);
    }
}
