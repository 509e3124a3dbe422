use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use serde::Serialize;
use lazy_static::lazy_static;
use super::category::EmissionCategory;
use crate::config::constants::*;

lazy_static! {
    /// Factor table shipped with the calculator.
    pub static ref BUILTIN_FACTOR_TABLE: EmissionFactorTable = EmissionFactorTable::builtin();
}

#[derive(Debug, Clone, PartialEq)]
pub enum FactorTableError {
    MissingFactor { region: String, category: EmissionCategory },
    InvalidFactor { region: String, category: EmissionCategory, value: f64 },
}

impl fmt::Display for FactorTableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FactorTableError::MissingFactor { region, category } => {
                write!(f, "Region {} has no {} factor", region, category)
            }
            FactorTableError::InvalidFactor { region, category, value } => {
                write!(f, "Region {} has invalid {} factor: {}", region, category, value)
            }
        }
    }
}

impl std::error::Error for FactorTableError {}

/// Emission factors for one region, one per category (kg CO2e per unit of activity).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionFactors {
    factors: [f64; EmissionCategory::COUNT],
}

impl RegionFactors {
    /// Build from factors given in `EmissionCategory::ALL` order.
    pub fn from_array(region: &str, factors: [f64; EmissionCategory::COUNT]) -> Result<Self, FactorTableError> {
        for category in EmissionCategory::ALL {
            let value = factors[category.index()];
            if !value.is_finite() || value <= 0.0 {
                return Err(FactorTableError::InvalidFactor {
                    region: region.to_string(),
                    category,
                    value,
                });
            }
        }
        Ok(Self { factors })
    }

    /// Build from a category map. Every category must be present.
    pub fn from_map(region: &str, map: &BTreeMap<EmissionCategory, f64>) -> Result<Self, FactorTableError> {
        let mut factors = [0.0; EmissionCategory::COUNT];
        for category in EmissionCategory::ALL {
            factors[category.index()] = *map.get(&category)
                .ok_or_else(|| FactorTableError::MissingFactor {
                    region: region.to_string(),
                    category,
                })?;
        }
        Self::from_array(region, factors)
    }

    pub fn get(&self, category: EmissionCategory) -> f64 {
        self.factors[category.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (EmissionCategory, f64)> + '_ {
        EmissionCategory::ALL.iter().map(move |c| (*c, self.get(*c)))
    }
}

/// Region name to per-category factors. Never mutated once handed to a calculator.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EmissionFactorTable {
    regions: BTreeMap<String, RegionFactors>,
}

impl EmissionFactorTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builtin() -> Self {
        let mut table = Self::new();
        table.insert(DEFAULT_REGION, RegionFactors {
            factors: [
                INDIA_MINING_FACTOR,
                INDIA_TRANSPORTATION_FACTOR,
                INDIA_ELECTRICITY_FACTOR,
                INDIA_WASTE_FACTOR,
                INDIA_FUEL_FACTOR,
                INDIA_METHANE_FACTOR,
                INDIA_EXPLOSIVES_FACTOR,
            ],
        });
        table
    }

    pub fn insert(&mut self, region: impl Into<String>, factors: RegionFactors) {
        self.regions.insert(region.into(), factors);
    }

    /// Add every region of `other`, replacing regions that already exist.
    pub fn merge(&mut self, other: EmissionFactorTable) {
        self.regions.extend(other.regions);
    }

    pub fn region(&self, region: &str) -> Option<&RegionFactors> {
        self.regions.get(region)
    }

    pub fn regions(&self) -> BTreeSet<String> {
        self.regions.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_holds_india_only() {
        let table = EmissionFactorTable::builtin();
        assert_eq!(table.regions(), BTreeSet::from(["India".to_string()]));

        let india = table.region("India").unwrap();
        assert_eq!(india.get(EmissionCategory::Methane), 25.0);
        assert_eq!(india.get(EmissionCategory::Fuel), 2.68);
        assert_eq!(*BUILTIN_FACTOR_TABLE, table);
    }

    #[test]
    fn from_map_requires_every_category() {
        let mut map: BTreeMap<EmissionCategory, f64> = EmissionCategory::ALL.iter().map(|c| (*c, 1.0)).collect();
        map.remove(&EmissionCategory::Waste);

        assert_eq!(
            RegionFactors::from_map("Poland", &map),
            Err(FactorTableError::MissingFactor {
                region: "Poland".to_string(),
                category: EmissionCategory::Waste,
            })
        );
    }

    #[test]
    fn rejects_non_positive_factors() {
        let mut factors = [1.0; EmissionCategory::COUNT];
        factors[EmissionCategory::Explosives.index()] = 0.0;
        assert!(matches!(
            RegionFactors::from_array("Poland", factors),
            Err(FactorTableError::InvalidFactor { category: EmissionCategory::Explosives, .. })
        ));

        factors[EmissionCategory::Explosives.index()] = f64::NAN;
        assert!(RegionFactors::from_array("Poland", factors).is_err());
    }

    #[test]
    fn merge_adds_and_replaces_regions() {
        let mut table = EmissionFactorTable::builtin();
        let mut other = EmissionFactorTable::new();
        other.insert("India", RegionFactors::from_array("India", [2.0; 7]).unwrap());
        other.insert("Australia", RegionFactors::from_array("Australia", [1.0; 7]).unwrap());

        table.merge(other);
        assert_eq!(table.len(), 2);
        assert_eq!(table.region("India").unwrap().get(EmissionCategory::Mining), 2.0);
    }
}
