use std::path::Path;

use serde::{Serialize, Deserialize};

use super::error::OpsError;
use super::types::OperatorName;

/// Site configuration: where the operation log lives, the operator roster,
/// the idle-reason vocabulary and the generator list. A missing config file
/// falls back to the built-in defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub log_file: String,
    pub operators: Vec<OperatorName>,
    pub idle_reasons: Vec<String>,
    pub generators: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_file: "operations.yaml".to_string(),
            operators: [
                "John Doe",
                "Jane Smith",
                "Mike Johnson",
                "Sarah Williams",
                "Alex Brown",
                "Emily Davis",
            ]
            .map(String::from)
            .to_vec(),
            idle_reasons: [
                "Maintenance",
                "Operator Break",
                "Equipment Issue",
                "Material Shortage",
                "Mechanical Failure",
                "Weather Conditions",
                "Waiting for Cargo",
                "Shift Change",
                "Other",
            ]
            .map(String::from)
            .to_vec(),
            generators: ["Generator 1", "Generator 2", "Generator 3"]
                .map(String::from)
                .to_vec(),
        }
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, OpsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Config::default());
        }
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&contents)?)
    }
}
