use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EmissionCategory {
    Mining,          // Direct emissions from extraction
    Transportation,  // Hauling coal away from the mine
    Electricity,     // Grid power used on site
    Waste,           // Mining waste handling
    Fuel,            // Diesel burned by site machinery
    Methane,         // Coal-bed methane, as CO2 equivalent
    Explosives,      // Blasting
}

impl EmissionCategory {
    pub const COUNT: usize = 7;

    pub const ALL: [EmissionCategory; Self::COUNT] = [
        EmissionCategory::Mining,
        EmissionCategory::Transportation,
        EmissionCategory::Electricity,
        EmissionCategory::Waste,
        EmissionCategory::Fuel,
        EmissionCategory::Methane,
        EmissionCategory::Explosives,
    ];

    /// Position of the category in `ALL`.
    pub fn index(&self) -> usize {
        match self {
            EmissionCategory::Mining => 0,
            EmissionCategory::Transportation => 1,
            EmissionCategory::Electricity => 2,
            EmissionCategory::Waste => 3,
            EmissionCategory::Fuel => 4,
            EmissionCategory::Methane => 5,
            EmissionCategory::Explosives => 6,
        }
    }

    /// Label used in result reports.
    pub fn label(&self) -> &'static str {
        match self {
            EmissionCategory::Mining => "Mining",
            EmissionCategory::Transportation => "Transportation",
            EmissionCategory::Electricity => "Electricity",
            EmissionCategory::Waste => "Waste",
            EmissionCategory::Fuel => "Fuel Consumption",
            EmissionCategory::Methane => "Methane",
            EmissionCategory::Explosives => "Explosives",
        }
    }

    /// Unit of activity a factor for this category applies to.
    pub fn factor_unit(&self) -> &'static str {
        match self {
            EmissionCategory::Mining => "kgCO2/tonne of coal mined",
            EmissionCategory::Transportation => "kgCO2/km transported",
            EmissionCategory::Electricity => "kgCO2/kWh",
            EmissionCategory::Waste => "kgCO2/kg of waste",
            EmissionCategory::Fuel => "kgCO2/litre of diesel",
            EmissionCategory::Methane => "kgCO2e/tonne of coal mined",
            EmissionCategory::Explosives => "kgCO2/kg of explosives",
        }
    }
}

impl FromStr for EmissionCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Mining" => Ok(EmissionCategory::Mining),
            "Transportation" => Ok(EmissionCategory::Transportation),
            "Electricity" => Ok(EmissionCategory::Electricity),
            "Waste" => Ok(EmissionCategory::Waste),
            "Fuel" => Ok(EmissionCategory::Fuel),
            "Methane" => Ok(EmissionCategory::Methane),
            "Explosives" => Ok(EmissionCategory::Explosives),
            _ => Err(format!("Unknown emission category: {}", s)),
        }
    }
}

impl fmt::Display for EmissionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmissionCategory::Mining => write!(f, "Mining"),
            EmissionCategory::Transportation => write!(f, "Transportation"),
            EmissionCategory::Electricity => write!(f, "Electricity"),
            EmissionCategory::Waste => write!(f, "Waste"),
            EmissionCategory::Fuel => write!(f, "Fuel"),
            EmissionCategory::Methane => write!(f, "Methane"),
            EmissionCategory::Explosives => write!(f, "Explosives"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_matches_position_in_all() {
        for (i, category) in EmissionCategory::ALL.iter().enumerate() {
            assert_eq!(category.index(), i);
        }
    }

    #[test]
    fn display_and_from_str_agree() {
        for category in EmissionCategory::ALL {
            assert_eq!(category.to_string().parse::<EmissionCategory>(), Ok(category));
        }
        assert!("Coal".parse::<EmissionCategory>().is_err());
    }

    #[test]
    fn fuel_is_reported_as_fuel_consumption() {
        assert_eq!(EmissionCategory::Fuel.label(), "Fuel Consumption");
    }
}
