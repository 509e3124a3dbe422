use std::path::Path;
use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use tracing::info;
use crate::models::activity::ActivityInputs;
use crate::utils::logging::{self, FileIOType, OperationCategory};

#[derive(Debug)]
pub enum ScenarioLoadError {
    CsvError(csv::Error),
    EmptyName(usize),
}

impl From<csv::Error> for ScenarioLoadError {
    fn from(err: csv::Error) -> Self {
        ScenarioLoadError::CsvError(err)
    }
}

impl std::fmt::Display for ScenarioLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScenarioLoadError::CsvError(e) => write!(f, "CSV error: {}", e),
            ScenarioLoadError::EmptyName(row) => write!(f, "Scenario on row {} has no name", row),
        }
    }
}

impl std::error::Error for ScenarioLoadError {}

/// A named set of activity inputs evaluated against one region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub region: String,
    pub inputs: ActivityInputs,
}

#[derive(Debug, Deserialize)]
struct ScenarioRow {
    name: String,
    region: String,
    coal_mined: f64,
    distance: f64,
    fuel_consumption: f64,
    electricity: f64,
    waste: f64,
    explosives: f64,
}

impl From<ScenarioRow> for Scenario {
    fn from(row: ScenarioRow) -> Self {
        Scenario {
            name: row.name,
            region: row.region,
            inputs: ActivityInputs::new(
                row.coal_mined,
                row.distance,
                row.fuel_consumption,
                row.electricity,
                row.waste,
                row.explosives,
            ),
        }
    }
}

/// Read scenarios from a CSV file with header
/// `name,region,coal_mined,distance,fuel_consumption,electricity,waste,explosives`.
///
/// Input values are not validated here; a bad row fails on its own when computed.
pub fn load_scenarios(path: impl AsRef<Path>) -> Result<Vec<Scenario>, ScenarioLoadError> {
    let _timing = logging::start_timing("load_scenarios",
        OperationCategory::FileIO { subcategory: FileIOType::ScenarioLoad });

    let path = path.as_ref();
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut scenarios = Vec::new();
    for (index, result) in reader.deserialize().enumerate() {
        let row: ScenarioRow = result?;
        if row.name.is_empty() {
            // +2: one for the header, one for 1-based rows
            return Err(ScenarioLoadError::EmptyName(index + 2));
        }
        scenarios.push(Scenario::from(row));
    }

    info!(path = %path.display(), count = scenarios.len(), "loaded scenarios");
    Ok(scenarios)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "name,region,coal_mined,distance,fuel_consumption,electricity,waste,explosives\n";

    fn write_csv(body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(HEADER.as_bytes()).unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_rows_in_order() {
        let file = write_csv("Jharia, India, 1000, 10, 500, 200, 100, 50\nIdle,India,0,0,0,0,0,0\n");
        let scenarios = load_scenarios(file.path()).unwrap();

        assert_eq!(scenarios.len(), 2);
        assert_eq!(scenarios[0].name, "Jharia");
        assert_eq!(scenarios[0].region, "India");
        assert_eq!(scenarios[0].inputs, ActivityInputs::new(1000.0, 10.0, 500.0, 200.0, 100.0, 50.0));
        assert_eq!(scenarios[1].inputs, ActivityInputs::default());
    }

    #[test]
    fn negative_values_load_unvalidated() {
        let file = write_csv("Broken,India,-5,0,0,0,0,0\n");
        let scenarios = load_scenarios(file.path()).unwrap();
        assert_eq!(scenarios[0].inputs.coal_mined, -5.0);
    }

    #[test]
    fn non_numeric_field_is_a_csv_error() {
        let file = write_csv("Broken,India,lots,0,0,0,0,0\n");
        assert!(matches!(load_scenarios(file.path()), Err(ScenarioLoadError::CsvError(_))));
    }

    #[test]
    fn empty_name_reports_row_number() {
        let file = write_csv("Ok,India,1,1,1,1,1,1\n,India,1,1,1,1,1,1\n");
        assert!(matches!(load_scenarios(file.path()), Err(ScenarioLoadError::EmptyName(3))));
    }
}
