use serde::Serialize;
use crate::config::const_funcs::percentage_of;
use crate::models::category::EmissionCategory;
use crate::models::emission_result::EmissionResult;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: EmissionCategory,
    pub tonnes: f64,
    pub percent: f64,
}

/// How the total footprint splits across categories.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmissionBreakdown {
    pub shares: Vec<CategoryShare>,
    pub dominant: Option<EmissionCategory>,
}

impl EmissionBreakdown {
    pub fn from_result(result: &EmissionResult) -> Self {
        let shares: Vec<CategoryShare> = result
            .categories()
            .map(|(category, tonnes)| CategoryShare {
                category,
                tonnes,
                percent: percentage_of(tonnes, result.total),
            })
            .collect();

        // Earliest category wins a tie
        let mut dominant: Option<CategoryShare> = None;
        for share in &shares {
            if share.tonnes > 0.0 && dominant.map_or(true, |d| share.tonnes > d.tonnes) {
                dominant = Some(*share);
            }
        }

        Self {
            shares,
            dominant: dominant.map(|share| share.category),
        }
    }

    pub fn share(&self, category: EmissionCategory) -> Option<&CategoryShare> {
        self.shares.iter().find(|share| share.category == category)
    }
}
