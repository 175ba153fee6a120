use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use log::{debug, info, warn};
use regex::Regex;
use rust_embed::RustEmbed;
use serde::{Deserialize, Serialize};

use crate::error::{GenError, Result};

pub type LocationId = u32;

/// marks building elements in a roborescue gml map
pub const DEFAULT_MARKER: &str = "<rcr:building ";

#[derive(RustEmbed)]
#[folder = "data/locations/"]
pub struct LocationTableStorage;

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
pub struct LocationSet {
    /// map the identifiers belong to
    pub name: String,

    /// candidate pool, order is kept
    pub locations: Vec<LocationId>,
}

impl LocationSet {
    /// static tables shipped with the binary
    pub fn get_all_tables() -> HashMap<String, LocationSet> {
        let mut tables = HashMap::new();

        for file_name in LocationTableStorage::iter() {
            let Some(file) = LocationTableStorage::get(&file_name) else {
                continue;
            };
            match serde_json::from_slice::<LocationSet>(&file.data) {
                Ok(table) => {
                    tables.insert(table.name.clone(), table);
                }
                Err(e) => {
                    warn!("couldn't parse location table {}: {}", file_name, e);
                }
            }
        }

        tables
    }
}

lazy_static! {
    static ref QUOTED_VALUE: Regex = Regex::new(r#""([^"]*)""#).unwrap();
}

/// Collects the first double quoted value of every line containing `marker`.
/// Lines that are not utf8, or where that value is missing or not numeric, are skipped.
pub fn scan_lines<R: BufRead>(reader: R, marker: &str) -> std::io::Result<Vec<LocationId>> {
    let mut seen = HashSet::new();
    let mut ids = Vec::new();

    for (line_no, raw) in reader.split(b'\n').enumerate() {
        let raw = raw?;
        let Ok(line) = std::str::from_utf8(&raw) else {
            debug!("line {}: skipping non utf8 line", line_no + 1);
            continue;
        };
        if !line.contains(marker) {
            continue;
        }

        let Some(value) = QUOTED_VALUE.captures(line).and_then(|c| c.get(1)) else {
            debug!("line {}: marker without quoted value", line_no + 1);
            continue;
        };

        match value.as_str().trim().parse::<LocationId>() {
            Ok(id) => {
                if seen.insert(id) {
                    ids.push(id);
                }
            }
            Err(_) => debug!(
                "line {}: skipping non numeric id '{}'",
                line_no + 1,
                value.as_str()
            ),
        }
    }

    Ok(ids)
}

pub fn scan_map_file(path: &Path, marker: &str) -> Result<LocationSet> {
    let file = File::open(path).map_err(|source| GenError::MissingInputFile {
        path: path.to_path_buf(),
        source,
    })?;

    let locations =
        scan_lines(BufReader::new(file), marker).map_err(|source| GenError::ReadFailure {
            path: path.to_path_buf(),
            source,
        })?;
    if locations.is_empty() {
        return Err(GenError::NoLocations(path.to_path_buf()));
    }

    info!(
        "found {} building ids in {}",
        locations.len(),
        path.display()
    );

    Ok(LocationSet {
        name: path.display().to_string(),
        locations,
    })
}

#[derive(Debug, Clone)]
pub struct LocationQuery {
    pub map: String,

    /// explicit map file, otherwise `{maps_dir}/{map}/map/map.gml`
    pub map_file: Option<PathBuf>,

    pub maps_dir: PathBuf,

    /// skip the static tables even if the map has one
    pub prefer_file: bool,

    pub marker: String,
}

impl LocationQuery {
    pub fn new(map: &str) -> LocationQuery {
        LocationQuery {
            map: map.to_string(),
            map_file: None,
            maps_dir: PathBuf::from("maps"),
            prefer_file: false,
            marker: DEFAULT_MARKER.to_string(),
        }
    }

    pub fn map_path(&self) -> PathBuf {
        match &self.map_file {
            Some(path) => path.clone(),
            None => self.maps_dir.join(&self.map).join("map").join("map.gml"),
        }
    }

    pub fn resolve(&self) -> Result<LocationSet> {
        self.resolve_with(&LocationSet::get_all_tables())
    }

    pub fn resolve_with(&self, tables: &HashMap<String, LocationSet>) -> Result<LocationSet> {
        let path = self.map_path();

        if self.prefer_file {
            return scan_map_file(&path, &self.marker);
        }

        if let Some(table) = tables.get(&self.map) {
            debug!("using static location table for {}", self.map);
            return Ok(table.clone());
        }

        if path.is_file() {
            scan_map_file(&path, &self.marker)
        } else {
            Err(GenError::UnknownMap(self.map.clone()))
        }
    }
}
