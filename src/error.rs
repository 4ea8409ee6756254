use polars::prelude::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EdaError {
    #[error("input file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("missing required column: {0}")]
    MissingColumn(String),

    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("table operation failed: {0}")]
    Table(#[from] PolarsError),
}

pub type Result<T> = std::result::Result<T, EdaError>;
