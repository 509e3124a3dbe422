// Main module declarations for the coal mine footprint calculator

// Core calculation
pub mod core {
    pub mod calculator;
    pub mod error;
}

// Configuration modules
pub mod config {
    pub mod constants;
    pub mod const_funcs;
    pub mod calculator_config;
}

// Model definitions
pub mod models {
    pub mod category;
    pub mod activity;
    pub mod emission_factors;
    pub mod emission_result;
}

// Data loaders
pub mod data {
    pub mod factors_loader;
    pub mod scenarios_loader;
}

// Analysis and reporting
pub mod analysis {
    pub mod breakdown;
    pub mod batch;
    pub mod reporting;
}

// Utility functions
pub mod utils {
    pub mod logging;
    pub mod csv_export;
}

// CLI interface
pub mod cli {
    pub mod cli;
}

// Re-export commonly used types
pub use crate::core::calculator::EmissionCalculator;
pub use crate::core::error::CalculatorError;
pub use crate::models::activity::ActivityInputs;
pub use crate::models::category::EmissionCategory;
pub use crate::models::emission_factors::EmissionFactorTable;
pub use crate::models::emission_result::EmissionResult;
