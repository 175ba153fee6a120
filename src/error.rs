use std::{io, path::PathBuf};

use thiserror::Error;

use crate::locations::LocationId;

#[derive(Debug, Error)]
pub enum GenError {
    #[error("missing input file {}: {source}", .path.display())]
    MissingInputFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read {}: {source}", .path.display())]
    ReadFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unknown map '{0}': no static location table and no map file")]
    UnknownMap(String),

    #[error("candidate pool is empty")]
    EmptyPool,

    #[error("requested {requested} {group} but the candidate pool only holds {available}")]
    SampleSizeExceeded {
        group: &'static str,
        requested: usize,
        available: usize,
    },

    #[error("no building identifiers found in {}", .0.display())]
    NoLocations(PathBuf),

    #[error("failed to write {}: {source}", .path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid sweep config: {0}")]
    InvalidConfig(String),

    #[error("invalid value '{value}' for axis '{axis}'")]
    InvalidAxisValue { axis: String, value: String },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to emit output: {0}")]
    Output(#[from] io::Error),
}

impl GenError {
    pub(crate) fn sample_exceeded(group: &'static str, requested: usize, pool: &[LocationId]) -> Self {
        GenError::SampleSizeExceeded {
            group,
            requested,
            available: pool.len(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GenError>;
