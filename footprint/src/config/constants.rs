// Region Constants
pub const DEFAULT_REGION: &str = "India";

// Emission factors for Indian coal mines (kg CO2e per unit of activity)
pub const INDIA_MINING_FACTOR: f64 = 0.85;          // per tonne of coal mined
pub const INDIA_TRANSPORTATION_FACTOR: f64 = 0.14;  // per km of coal transport
pub const INDIA_ELECTRICITY_FACTOR: f64 = 0.82;     // per kWh used in mining
pub const INDIA_WASTE_FACTOR: f64 = 0.1;            // per kg of mining waste
pub const INDIA_FUEL_FACTOR: f64 = 2.68;            // per litre of diesel
pub const INDIA_METHANE_FACTOR: f64 = 25.0;         // CO2e per tonne of coal mined
pub const INDIA_EXPLOSIVES_FACTOR: f64 = 0.02;      // per kg of explosives

// Time Constants
pub const DAYS_PER_YEAR: f64 = 365.0;
pub const MONTHS_PER_YEAR: f64 = 12.0;

// Unit Conversion
pub const KG_PER_TONNE: f64 = 1000.0;

// Result Precision
pub const DEFAULT_DECIMAL_PLACES: u32 = 2;
pub const MAX_DECIMAL_PLACES: u32 = 15;
pub const F64_MAX_FRACTION_DIGITS: usize = 1074;  // longest exact f64 fraction

/// Inclusive bounds the presentation layer offers for one input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputRange {
    pub min: f64,
    pub max: f64,
}

impl InputRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

// Input ranges offered by the form front-end. The calculator itself only
// requires finite, non-negative values.
pub const COAL_MINED_RANGE: InputRange = InputRange::new(0.0, 10_000.0);     // tonnes
pub const DISTANCE_RANGE: InputRange = InputRange::new(0.0, 100.0);          // km per day
pub const FUEL_CONSUMPTION_RANGE: InputRange = InputRange::new(0.0, 5_000.0); // litres
pub const ELECTRICITY_RANGE: InputRange = InputRange::new(0.0, 1_000.0);     // kWh per month
pub const WASTE_RANGE: InputRange = InputRange::new(0.0, 1_000.0);           // kg per month
pub const EXPLOSIVES_RANGE: InputRange = InputRange::new(0.0, 500.0);        // kg
