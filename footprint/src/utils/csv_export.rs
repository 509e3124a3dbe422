use std::fmt;
use std::path::{Path, PathBuf};
use chrono::Local;
use serde::Serialize;
use tracing::info;

use crate::analysis::batch::BatchOutcome;
use crate::data::scenarios_loader::Scenario;
use crate::models::emission_result::EmissionResult;
use crate::utils::logging::{self, FileIOType, OperationCategory};

pub const EMISSIONS_FILE_NAME: &str = "emissions.csv";

#[derive(Debug)]
pub enum ExportError {
    IoError(std::io::Error),
    CsvError(csv::Error),
}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        ExportError::IoError(err)
    }
}

impl From<csv::Error> for ExportError {
    fn from(err: csv::Error) -> Self {
        ExportError::CsvError(err)
    }
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::IoError(e) => write!(f, "IO error: {}", e),
            ExportError::CsvError(e) => write!(f, "CSV error: {}", e),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExportError::IoError(e) => Some(e),
            ExportError::CsvError(e) => Some(e),
        }
    }
}

/// One line of `emissions.csv`. Result columns are empty for failed scenarios.
#[derive(Debug, Serialize)]
struct EmissionRow<'a> {
    name: &'a str,
    region: &'a str,
    coal_mined: f64,
    distance: f64,
    fuel_consumption: f64,
    electricity: f64,
    waste: f64,
    explosives: f64,
    mining_t: Option<f64>,
    transportation_t: Option<f64>,
    electricity_t: Option<f64>,
    waste_t: Option<f64>,
    fuel_t: Option<f64>,
    methane_t: Option<f64>,
    explosives_t: Option<f64>,
    total_t: Option<f64>,
    error: String,
}

impl<'a> EmissionRow<'a> {
    fn new(scenario: &'a Scenario, result: Option<&EmissionResult>, error: String) -> Self {
        Self {
            name: &scenario.name,
            region: &scenario.region,
            coal_mined: scenario.inputs.coal_mined,
            distance: scenario.inputs.distance,
            fuel_consumption: scenario.inputs.fuel_consumption,
            electricity: scenario.inputs.electricity,
            waste: scenario.inputs.waste,
            explosives: scenario.inputs.explosives,
            mining_t: result.map(|r| r.mining),
            transportation_t: result.map(|r| r.transportation),
            electricity_t: result.map(|r| r.electricity),
            waste_t: result.map(|r| r.waste),
            fuel_t: result.map(|r| r.fuel),
            methane_t: result.map(|r| r.methane),
            explosives_t: result.map(|r| r.explosives),
            total_t: result.map(|r| r.total),
            error,
        }
    }
}

pub struct CsvExporter {
    output_dir: PathBuf,
    timestamp: String,
}

impl CsvExporter {
    /// Create an exporter writing into a fresh timestamped directory under `output_dir`.
    pub fn new(output_dir: impl AsRef<Path>) -> Result<Self, ExportError> {
        let now = Local::now();
        let timestamp = now.format("%Y%m%d_%H%M%S").to_string();

        let full_path = output_dir.as_ref().join(&timestamp);
        std::fs::create_dir_all(&full_path)?;

        Ok(Self {
            output_dir: full_path,
            timestamp,
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Export a single calculation.
    pub fn export_result(&self, scenario: &Scenario, result: &EmissionResult) -> Result<PathBuf, ExportError> {
        let rows = vec![EmissionRow::new(scenario, Some(result), String::new())];
        self.write_rows(&rows)
    }

    /// Export every outcome of a batch run, failures included.
    pub fn export_batch(&self, outcomes: &[BatchOutcome]) -> Result<PathBuf, ExportError> {
        let rows: Vec<EmissionRow> = outcomes
            .iter()
            .map(|outcome| match &outcome.result {
                Ok(result) => EmissionRow::new(&outcome.scenario, Some(result), String::new()),
                Err(e) => EmissionRow::new(&outcome.scenario, None, e.to_string()),
            })
            .collect();
        self.write_rows(&rows)
    }

    fn write_rows(&self, rows: &[EmissionRow]) -> Result<PathBuf, ExportError> {
        let _timing = logging::start_timing("export_emissions",
            OperationCategory::FileIO { subcategory: FileIOType::ResultsExport });

        let path = self.output_dir.join(EMISSIONS_FILE_NAME);
        let mut writer = csv::Writer::from_path(&path)?;
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;

        info!(path = %path.display(), rows = rows.len(), "exported emissions");
        Ok(path)
    }
}
