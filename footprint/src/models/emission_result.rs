use serde::{Deserialize, Serialize};
use super::category::EmissionCategory;

/// Annual emissions per category and in total, in tonnes CO2 per year.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EmissionResult {
    pub mining: f64,
    pub transportation: f64,
    pub electricity: f64,
    pub waste: f64,
    pub fuel: f64,
    pub methane: f64,
    pub explosives: f64,
    pub total: f64,
}

impl EmissionResult {
    pub fn get(&self, category: EmissionCategory) -> f64 {
        match category {
            EmissionCategory::Mining => self.mining,
            EmissionCategory::Transportation => self.transportation,
            EmissionCategory::Electricity => self.electricity,
            EmissionCategory::Waste => self.waste,
            EmissionCategory::Fuel => self.fuel,
            EmissionCategory::Methane => self.methane,
            EmissionCategory::Explosives => self.explosives,
        }
    }

    pub fn set(&mut self, category: EmissionCategory, value: f64) {
        match category {
            EmissionCategory::Mining => self.mining = value,
            EmissionCategory::Transportation => self.transportation = value,
            EmissionCategory::Electricity => self.electricity = value,
            EmissionCategory::Waste => self.waste = value,
            EmissionCategory::Fuel => self.fuel = value,
            EmissionCategory::Methane => self.methane = value,
            EmissionCategory::Explosives => self.explosives = value,
        }
    }

    pub fn categories(&self) -> impl Iterator<Item = (EmissionCategory, f64)> + '_ {
        EmissionCategory::ALL.iter().map(move |c| (*c, self.get(*c)))
    }

    /// Plain sum of the category values, before the total is rounded.
    pub fn category_sum(&self) -> f64 {
        self.categories().map(|(_, value)| value).sum()
    }
}
