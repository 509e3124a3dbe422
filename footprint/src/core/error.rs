use std::fmt;
use crate::models::activity::ActivityField;

#[derive(Debug, Clone, PartialEq)]
pub enum CalculatorError {
    UnknownRegion(String),
    InvalidInput { field: ActivityField, value: f64 },
}

impl fmt::Display for CalculatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalculatorError::UnknownRegion(region) => write!(f, "Unknown region: {}", region),
            CalculatorError::InvalidInput { field, value } => {
                write!(f, "Invalid input for {}: {} (must be finite and non-negative)", field, value)
            }
        }
    }
}

impl std::error::Error for CalculatorError {}
