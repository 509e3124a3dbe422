use std::fmt;
use serde::{Deserialize, Serialize};
use crate::config::constants::*;
use crate::core::error::CalculatorError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityField {
    CoalMined,
    Distance,
    FuelConsumption,
    Electricity,
    Waste,
    Explosives,
}

impl ActivityField {
    pub const ALL: [ActivityField; 6] = [
        ActivityField::CoalMined,
        ActivityField::Distance,
        ActivityField::FuelConsumption,
        ActivityField::Electricity,
        ActivityField::Waste,
        ActivityField::Explosives,
    ];

    /// Range the input form allows for this field.
    pub fn input_range(&self) -> InputRange {
        match self {
            ActivityField::CoalMined => COAL_MINED_RANGE,
            ActivityField::Distance => DISTANCE_RANGE,
            ActivityField::FuelConsumption => FUEL_CONSUMPTION_RANGE,
            ActivityField::Electricity => ELECTRICITY_RANGE,
            ActivityField::Waste => WASTE_RANGE,
            ActivityField::Explosives => EXPLOSIVES_RANGE,
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            ActivityField::CoalMined => "tonnes",
            ActivityField::Distance => "km/day",
            ActivityField::FuelConsumption => "litres",
            ActivityField::Electricity => "kWh/month",
            ActivityField::Waste => "kg/month",
            ActivityField::Explosives => "kg",
        }
    }
}

impl fmt::Display for ActivityField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActivityField::CoalMined => write!(f, "coal_mined"),
            ActivityField::Distance => write!(f, "distance"),
            ActivityField::FuelConsumption => write!(f, "fuel_consumption"),
            ActivityField::Electricity => write!(f, "electricity"),
            ActivityField::Waste => write!(f, "waste"),
            ActivityField::Explosives => write!(f, "explosives"),
        }
    }
}

/// Raw activity metrics for one mine, as entered by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ActivityInputs {
    pub coal_mined: f64,        // tonnes
    pub distance: f64,          // km per day
    pub fuel_consumption: f64,  // litres
    pub electricity: f64,       // kWh per month
    pub waste: f64,             // kg per month
    pub explosives: f64,        // kg
}

impl ActivityInputs {
    pub fn new(
        coal_mined: f64,
        distance: f64,
        fuel_consumption: f64,
        electricity: f64,
        waste: f64,
        explosives: f64,
    ) -> Self {
        Self {
            coal_mined,
            distance,
            fuel_consumption,
            electricity,
            waste,
            explosives,
        }
    }

    pub fn get(&self, field: ActivityField) -> f64 {
        match field {
            ActivityField::CoalMined => self.coal_mined,
            ActivityField::Distance => self.distance,
            ActivityField::FuelConsumption => self.fuel_consumption,
            ActivityField::Electricity => self.electricity,
            ActivityField::Waste => self.waste,
            ActivityField::Explosives => self.explosives,
        }
    }

    /// Every field must be finite and non-negative. Reports the first offending field.
    pub fn validate(&self) -> Result<(), CalculatorError> {
        for field in ActivityField::ALL {
            let value = self.get(field);
            if !value.is_finite() || value < 0.0 {
                return Err(CalculatorError::InvalidInput { field, value });
            }
        }
        Ok(())
    }

    /// Fields whose values fall outside the form's input ranges.
    pub fn out_of_range_fields(&self) -> Vec<ActivityField> {
        ActivityField::ALL
            .iter()
            .copied()
            .filter(|field| !field.input_range().contains(self.get(*field)))
            .collect()
    }
}
