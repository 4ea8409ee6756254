use crate::error::Result;
use crate::schema::GENRE_DELIMITER;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const CONFIG_FILE: &str = "tmdb-eda.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    /// Rows kept after sorting by adjusted revenue for the correlation view.
    pub top_revenue_rows: usize,
    pub min_popularity: f64,
    pub genre_delimiter: char,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            input: PathBuf::from("tmdb-movies.csv"),
            output_dir: PathBuf::from("charts"),
            top_revenue_rows: 100,
            min_popularity: 15.0,
            genre_delimiter: GENRE_DELIMITER,
        }
    }
}

impl AnalysisConfig {
    /// Reads `path` as TOML, falling back to defaults when the file is absent.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)?;
        let config: AnalysisConfig = toml::from_str(&text)?;
        info!("loaded config from {}", path.display());
        Ok(config)
    }
}
