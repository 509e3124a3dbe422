use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::config::constants::{DEFAULT_DECIMAL_PLACES, MAX_DECIMAL_PLACES};

/// How the transport distance input is interpreted.
///
/// The form labels the distance as an "average transportation distance"
/// without a period, while the reference calculation scales it by 365.
/// `Daily` keeps that behaviour; `Annual` takes the value as a yearly total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DistanceBasis {
    #[default]
    Daily,
    Annual,
}

impl FromStr for DistanceBasis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" => Ok(DistanceBasis::Daily),
            "annual" => Ok(DistanceBasis::Annual),
            _ => Err(format!("Unknown distance basis: {}", s)),
        }
    }
}

impl fmt::Display for DistanceBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DistanceBasis::Daily => write!(f, "Daily"),
            DistanceBasis::Annual => write!(f, "Annual"),
        }
    }
}

/// Tie-breaking rule applied when rounding results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RoundingMode {
    #[default]
    HalfEven, // ties go to the even digit
    HalfUp,   // ties go away from zero
}

impl FromStr for RoundingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "halfeven" | "half-even" => Ok(RoundingMode::HalfEven),
            "halfup" | "half-up" => Ok(RoundingMode::HalfUp),
            _ => Err(format!("Unknown rounding mode: {}", s)),
        }
    }
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundingMode::HalfEven => write!(f, "HalfEven"),
            RoundingMode::HalfUp => write!(f, "HalfUp"),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    JsonError(serde_json::Error),
    InvalidDecimalPlaces(u32),
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::IoError(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::JsonError(err)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::JsonError(e) => write!(f, "JSON error: {}", e),
            ConfigError::InvalidDecimalPlaces(places) => {
                write!(f, "decimal_places must be at most {}, got {}", MAX_DECIMAL_PLACES, places)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::IoError(e) => Some(e),
            ConfigError::JsonError(e) => Some(e),
            ConfigError::InvalidDecimalPlaces(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    pub distance_basis: DistanceBasis,
    pub rounding: RoundingMode,
    pub decimal_places: u32,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            distance_basis: DistanceBasis::Daily,
            rounding: RoundingMode::HalfEven,
            decimal_places: DEFAULT_DECIMAL_PLACES,
        }
    }
}

impl CalculatorConfig {
    /// Load a config from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let config: CalculatorConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.decimal_places > MAX_DECIMAL_PLACES {
            return Err(ConfigError::InvalidDecimalPlaces(self.decimal_places));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_keeps_daily_distance_and_two_places() {
        let config = CalculatorConfig::default();
        assert_eq!(config.distance_basis, DistanceBasis::Daily);
        assert_eq!(config.rounding, RoundingMode::HalfEven);
        assert_eq!(config.decimal_places, 2);
    }

    #[test]
    fn partial_json_fills_in_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "distance_basis": "Annual" }}"#).unwrap();

        let config = CalculatorConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.distance_basis, DistanceBasis::Annual);
        assert_eq!(config.rounding, RoundingMode::HalfEven);
        assert_eq!(config.decimal_places, 2);
    }

    #[test]
    fn rejects_excessive_decimal_places() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "decimal_places": 400 }}"#).unwrap();

        assert!(matches!(
            CalculatorConfig::from_json_file(file.path()),
            Err(ConfigError::InvalidDecimalPlaces(400))
        ));
    }

    #[test]
    fn accepts_the_largest_supported_precision() {
        let config = CalculatorConfig { decimal_places: MAX_DECIMAL_PLACES, ..Default::default() };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("annual".parse::<DistanceBasis>(), Ok(DistanceBasis::Annual));
        assert_eq!("Half-Up".parse::<RoundingMode>(), Ok(RoundingMode::HalfUp));
        assert!("weekly".parse::<DistanceBasis>().is_err());
        assert_eq!(RoundingMode::HalfUp.to_string().parse::<RoundingMode>(), Ok(RoundingMode::HalfUp));
    }
}
