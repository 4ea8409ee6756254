use crate::error::Result;
use crate::pipeline::Analysis;
use polars::prelude::*;
use std::fs::{self, File};
use std::path::PathBuf;
use tracing::info;

/// Sink for finished analyses. Charting lives behind this seam.
pub trait Renderer {
    fn render(&mut self, analysis: &Analysis) -> Result<()>;
}

fn frames(analysis: &Analysis) -> PolarsResult<Vec<(&'static str, DataFrame)>> {
    Ok(vec![
        ("top_genre_by_year", analysis.top_genre_frame()?),
        ("budget_by_decade", analysis.budget_frame()?),
        ("revenue_correlation", analysis.correlation_frame()?),
        ("genre_frequencies", analysis.genre_frequency_frame()?),
    ])
}

/// Writes one chart-ready CSV per view into `out_dir`.
pub struct CsvRenderer {
    pub out_dir: PathBuf,
}

impl CsvRenderer {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        CsvRenderer {
            out_dir: out_dir.into(),
        }
    }
}

impl Renderer for CsvRenderer {
    fn render(&mut self, analysis: &Analysis) -> Result<()> {
        fs::create_dir_all(&self.out_dir)?;
        for (name, mut frame) in frames(analysis)? {
            let path = self.out_dir.join(format!("{name}.csv"));
            CsvWriter::new(File::create(&path)?)
                .include_header(true)
                .finish(&mut frame)?;
            info!("wrote {}", path.display());
        }
        Ok(())
    }
}

/// Prints every view to stdout.
pub struct ConsoleRenderer;

impl Renderer for ConsoleRenderer {
    fn render(&mut self, analysis: &Analysis) -> Result<()> {
        let profile = &analysis.profile;
        println!(
            "{} rows x {} columns, {} duplicated",
            profile.rows, profile.columns, profile.duplicate_rows
        );
        for (name, frame) in frames(analysis)? {
            println!("{name}\n{frame}");
        }
        for (genre, years) in &analysis.genre_tally {
            println!("{genre} led {years} years");
        }
        for movie in analysis.popular_movies.iter().take(5) {
            println!("{:>10.2}  {}", movie.popularity, movie.title);
        }
        Ok(())
    }
}
