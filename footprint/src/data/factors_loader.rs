use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use csv::ReaderBuilder;
use serde::Deserialize;
use tracing::info;
use crate::models::category::EmissionCategory;
use crate::models::emission_factors::{EmissionFactorTable, FactorTableError, RegionFactors};
use crate::utils::logging::{self, FileIOType, OperationCategory};

#[derive(Debug)]
pub enum FactorLoadError {
    IoError(std::io::Error),
    CsvError(csv::Error),
    JsonError(serde_json::Error),
    UnsupportedFormat(String),
    InvalidCategory(String),
    DuplicateFactor { region: String, category: EmissionCategory },
    InvalidTable(FactorTableError),
}

impl From<std::io::Error> for FactorLoadError {
    fn from(err: std::io::Error) -> Self {
        FactorLoadError::IoError(err)
    }
}

impl From<csv::Error> for FactorLoadError {
    fn from(err: csv::Error) -> Self {
        FactorLoadError::CsvError(err)
    }
}

impl From<serde_json::Error> for FactorLoadError {
    fn from(err: serde_json::Error) -> Self {
        FactorLoadError::JsonError(err)
    }
}

impl From<FactorTableError> for FactorLoadError {
    fn from(err: FactorTableError) -> Self {
        FactorLoadError::InvalidTable(err)
    }
}

impl std::fmt::Display for FactorLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FactorLoadError::IoError(e) => write!(f, "IO error: {}", e),
            FactorLoadError::CsvError(e) => write!(f, "CSV error: {}", e),
            FactorLoadError::JsonError(e) => write!(f, "JSON error: {}", e),
            FactorLoadError::UnsupportedFormat(s) => write!(f, "Unsupported factor file format: {}", s),
            FactorLoadError::InvalidCategory(s) => write!(f, "Invalid category: {}", s),
            FactorLoadError::DuplicateFactor { region, category } => {
                write!(f, "Duplicate {} factor for region {}", category, region)
            }
            FactorLoadError::InvalidTable(e) => write!(f, "Invalid factor table: {}", e),
        }
    }
}

impl std::error::Error for FactorLoadError {}

#[derive(Debug, Deserialize)]
struct FactorFile {
    regions: BTreeMap<String, BTreeMap<String, f64>>,
}

#[derive(Debug, Deserialize)]
struct FactorRow {
    region: String,
    category: String,
    factor: f64,
}

type RawTable = BTreeMap<String, BTreeMap<EmissionCategory, f64>>;

fn parse_category(name: &str) -> Result<EmissionCategory, FactorLoadError> {
    name.trim()
        .parse()
        .map_err(|_| FactorLoadError::InvalidCategory(name.to_string()))
}

fn insert_factor(raw: &mut RawTable, region: &str, category: EmissionCategory, factor: f64) -> Result<(), FactorLoadError> {
    let region_factors = raw.entry(region.to_string()).or_default();
    if region_factors.insert(category, factor).is_some() {
        return Err(FactorLoadError::DuplicateFactor {
            region: region.to_string(),
            category,
        });
    }
    Ok(())
}

fn build_table(raw: RawTable) -> Result<EmissionFactorTable, FactorLoadError> {
    let mut table = EmissionFactorTable::new();
    for (region, factors) in raw {
        let region_factors = RegionFactors::from_map(&region, &factors)?;
        table.insert(region, region_factors);
    }
    Ok(table)
}

/// Parse `{"regions": {"<region>": {"<Category>": factor, ...}}}`.
pub fn load_factor_table_json(path: impl AsRef<Path>) -> Result<EmissionFactorTable, FactorLoadError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let factor_file: FactorFile = serde_json::from_reader(reader)?;

    let mut raw = RawTable::new();
    for (region, factors) in factor_file.regions {
        // Keeps regions without any factors so they fail the completeness check
        raw.entry(region.clone()).or_default();
        for (name, factor) in factors {
            let category = parse_category(&name)?;
            insert_factor(&mut raw, &region, category, factor)?;
        }
    }
    build_table(raw)
}

/// Parse `region,category,factor` rows (with header).
pub fn load_factor_table_csv(path: impl AsRef<Path>) -> Result<EmissionFactorTable, FactorLoadError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut raw = RawTable::new();
    for result in reader.deserialize() {
        let row: FactorRow = result?;
        let category = parse_category(&row.category)?;
        insert_factor(&mut raw, &row.region, category, row.factor)?;
    }
    build_table(raw)
}

/// Load a factor table, choosing the parser from the file extension.
pub fn load_factor_table(path: impl AsRef<Path>) -> Result<EmissionFactorTable, FactorLoadError> {
    let _timing = logging::start_timing("load_factor_table",
        OperationCategory::FileIO { subcategory: FileIOType::FactorLoad });

    let path = path.as_ref();
    let extension = path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .unwrap_or_default();

    let table = match extension.as_str() {
        "json" => load_factor_table_json(path)?,
        "csv" => load_factor_table_csv(path)?,
        _ => return Err(FactorLoadError::UnsupportedFormat(path.display().to_string())),
    };

    info!(path = %path.display(), regions = table.len(), "loaded emission factor table");
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    const POLAND_CSV: &str = "region,category,factor
Poland,Mining,0.9
Poland,Transportation,0.15
Poland,Electricity,0.95
Poland,Waste,0.12
Poland,Fuel,2.68
Poland,Methane,18
Poland,Explosives,0.03
";

    #[test]
    fn loads_csv_rows_into_regions() {
        let file = write_temp(".csv", POLAND_CSV);
        let table = load_factor_table(file.path()).unwrap();

        let poland = table.region("Poland").unwrap();
        assert_eq!(poland.get(EmissionCategory::Methane), 18.0);
        assert_eq!(poland.get(EmissionCategory::Electricity), 0.95);
    }

    #[test]
    fn loads_json_regions() {
        let file = write_temp(".json", r#"{
            "regions": {
                "Australia": {
                    "Mining": 0.8, "Transportation": 0.12, "Electricity": 0.7,
                    "Waste": 0.1, "Fuel": 2.7, "Methane": 20, "Explosives": 0.02
                }
            }
        }"#);
        let table = load_factor_table(file.path()).unwrap();
        assert_eq!(table.region("Australia").unwrap().get(EmissionCategory::Fuel), 2.7);
    }

    #[test]
    fn incomplete_region_is_rejected() {
        let file = write_temp(".csv", "region,category,factor\nPoland,Mining,0.9\n");
        assert!(matches!(
            load_factor_table(file.path()),
            Err(FactorLoadError::InvalidTable(FactorTableError::MissingFactor { .. }))
        ));
    }

    #[test]
    fn unknown_category_is_rejected() {
        let file = write_temp(".json", r#"{ "regions": { "Poland": { "Coal": 1.0 } } }"#);
        assert!(matches!(
            load_factor_table(file.path()),
            Err(FactorLoadError::InvalidCategory(name)) if name == "Coal"
        ));
    }

    #[test]
    fn duplicate_rows_are_rejected() {
        let contents = format!("{}Poland,Mining,1.0\n", POLAND_CSV);
        let file = write_temp(".csv", &contents);
        assert!(matches!(
            load_factor_table(file.path()),
            Err(FactorLoadError::DuplicateFactor { category: EmissionCategory::Mining, .. })
        ));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let file = write_temp(".yaml", "regions: {}");
        assert!(matches!(
            load_factor_table(file.path()),
            Err(FactorLoadError::UnsupportedFormat(_))
        ));
    }
}
