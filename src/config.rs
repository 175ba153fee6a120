use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use log::warn;
use rust_embed::RustEmbed;
use serde::{Deserialize, Serialize};

use crate::error::{GenError, Result};

#[derive(RustEmbed)]
#[folder = "data/sweep_configs/"]
pub struct SweepConfigStorage;

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
pub struct AlgorithmSpec {
    /// fully qualified solver class
    pub class: String,

    /// time budget in milliseconds
    pub time: u64,
}

impl AlgorithmSpec {
    pub fn new(class: &str, time: u64) -> AlgorithmSpec {
        AlgorithmSpec {
            class: class.to_string(),
            time,
        }
    }

    /// last path segment of the class name, used in file names
    pub fn short_name(&self) -> &str {
        self.class.rsplit('.').next().unwrap_or(&self.class)
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "snake_case")]
pub enum ValueTransform {
    #[default]
    Verbatim,

    /// "a500" -> "500"
    StripLeadingLetter,

    /// "true" -> "false"
    InvertFlag,
}

impl ValueTransform {
    pub fn apply(&self, value: &str) -> Option<String> {
        match self {
            ValueTransform::Verbatim => Some(value.to_string()),
            ValueTransform::StripLeadingLetter => {
                let mut chars = value.chars();
                let digits = match chars.next() {
                    Some(c) if c.is_ascii_alphabetic() => chars.as_str(),
                    _ => value,
                };
                digits.parse::<i64>().ok().map(|v| v.to_string())
            }
            ValueTransform::InvertFlag => value.parse::<bool>().ok().map(|v| (!v).to_string()),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
pub struct SweepAxis {
    /// identifies the axis in exclusions
    pub name: String,

    /// key written into the generated config
    pub key: String,

    /// prefix for the value in file names
    #[serde(default)]
    pub tag: String,

    /// written as a `#` line above the key
    #[serde(default)]
    pub comment: Option<String>,

    pub values: Vec<String>,

    #[serde(default)]
    pub transform: ValueTransform,
}

impl SweepAxis {
    pub fn transformed(&self, value: &str) -> Result<String> {
        self.transform
            .apply(value)
            .ok_or_else(|| GenError::InvalidAxisValue {
                axis: self.name.clone(),
                value: value.to_string(),
            })
    }
}

/// drops `algorithm` from a combination that selects `value` on `axis`
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
pub struct Exclusion {
    pub axis: String,
    pub value: String,
    pub algorithm: String,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
pub struct SweepConfig {
    /// name of the preset
    pub name: String,

    /// this can contain any description of the sweep
    #[serde(default)]
    pub description: Option<String>,

    /// map name, selects `{map}-base.cfg` and prefixes every output file
    pub map: String,

    /// run tag placed between map and algorithm in file names
    pub label: String,

    /// every algorithm becomes the primary solver once per combination
    pub algorithms: Vec<AlgorithmSpec>,

    #[serde(default)]
    pub axes: Vec<SweepAxis>,

    #[serde(default)]
    pub exclusions: Vec<Exclusion>,

    /// low budget solvers appended after the competitors at reserved indices
    #[serde(default)]
    pub trailing_fallbacks: Vec<AlgorithmSpec>,
}

impl SweepConfig {
    /// returns an error if the sweep would fail or produce ambiguous files
    pub fn validate(&self) -> Result<()> {
        if self.algorithms.is_empty() {
            return Err(GenError::InvalidConfig("no algorithms configured".into()));
        }

        let mut classes = HashSet::new();
        for algorithm in self.algorithms.iter() {
            if !classes.insert(algorithm.class.as_str()) {
                return Err(GenError::InvalidConfig(format!(
                    "duplicate algorithm {}",
                    algorithm.class
                )));
            }
        }

        let mut axis_names = HashSet::new();
        for axis in self.axes.iter() {
            if !axis_names.insert(axis.name.as_str()) {
                return Err(GenError::InvalidConfig(format!(
                    "duplicate axis {}",
                    axis.name
                )));
            }
            if axis.values.is_empty() {
                return Err(GenError::InvalidConfig(format!(
                    "axis {} has no values",
                    axis.name
                )));
            }
            let mut values = HashSet::new();
            for value in axis.values.iter() {
                if !values.insert(value.as_str()) {
                    return Err(GenError::InvalidConfig(format!(
                        "axis {} repeats value {}",
                        axis.name, value
                    )));
                }
                axis.transformed(value)?;
            }
        }

        for exclusion in self.exclusions.iter() {
            if !axis_names.contains(exclusion.axis.as_str()) {
                return Err(GenError::InvalidConfig(format!(
                    "exclusion names unknown axis {}",
                    exclusion.axis
                )));
            }
            if !classes.contains(exclusion.algorithm.as_str()) {
                return Err(GenError::InvalidConfig(format!(
                    "exclusion names unknown algorithm {}",
                    exclusion.algorithm
                )));
            }
        }

        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<SweepConfig> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).map_err(|source| GenError::MissingInputFile {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(serde_json::from_str(&data)?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let serialized = serde_json::to_string_pretty(self)?;
        fs::write(path, serialized).map_err(|source| GenError::WriteFailure {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn get_all_configs() -> HashMap<String, SweepConfig> {
        let mut configs = HashMap::new();

        for file_name in SweepConfigStorage::iter() {
            let Some(file) = SweepConfigStorage::get(&file_name) else {
                continue;
            };
            match serde_json::from_slice::<SweepConfig>(&file.data) {
                Ok(config) => {
                    configs.insert(config.name.clone(), config);
                }
                Err(e) => {
                    warn!("couldn't parse sweep config {}: {}", file_name, e);
                }
            }
        }

        configs
    }
}
