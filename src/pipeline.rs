use crate::aggregate::{
    DecadeBudget, YearGenreCount, genre_tally, mean_budget_by_decade, top_genre_by_year,
};
use crate::cleaner::clean_movies;
use crate::config::AnalysisConfig;
use crate::correlation::{CorrelationMatrix, revenue_correlation};
use crate::decade::with_decade;
use crate::error::Result;
use crate::expander::expand_genres;
use crate::loader::load_movies;
use crate::profile::{DatasetProfile, PopularMovie, genre_frequencies, popular_movies, profile};
use crate::schema::{DECADE, GENRE, GENRES, RELEASE_YEAR, REVENUE_ADJ};
use polars::prelude::*;
use std::time::Instant;
use tracing::{info, warn};

/// Everything one run produces. Each `*_frame` method turns a view into a
/// table any chart library can consume.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub profile: DatasetProfile,
    pub genre_frequencies: Vec<(String, usize)>,
    pub top_genre_by_year: Vec<YearGenreCount>,
    pub genre_tally: Vec<(String, usize)>,
    pub budget_by_decade: Vec<DecadeBudget>,
    pub popular_movies: Vec<PopularMovie>,
    pub revenue_correlation: CorrelationMatrix,
}

pub fn analyze(raw: &DataFrame, config: &AnalysisConfig) -> PolarsResult<Analysis> {
    let start = Instant::now();

    let profile = profile(raw)?;
    info!(
        "raw table: {} rows, {} columns, {} duplicates",
        profile.rows, profile.columns, profile.duplicate_rows
    );

    let cleaned = clean_movies(raw)?;
    let binned = with_decade(&cleaned, RELEASE_YEAR, DECADE)?;
    let expanded = expand_genres(&binned, GENRES, GENRE, config.genre_delimiter)?;
    info!(
        "{} cleaned movies expanded into {} (movie, genre) rows",
        binned.height(),
        expanded.height()
    );

    let unbinned = binned.column(DECADE)?.null_count();
    if unbinned > 0 {
        warn!("{unbinned} movies fall outside every decade bucket");
    }

    let genre_frequencies = genre_frequencies(&expanded)?;
    let top_genre_by_year = top_genre_by_year(&expanded)?;
    let genre_tally = genre_tally(&top_genre_by_year);
    let budget_by_decade = mean_budget_by_decade(&binned)?;
    let popular_movies = popular_movies(raw, config.min_popularity)?;
    let revenue_correlation = revenue_correlation(raw, config.top_revenue_rows)?;

    for (field, r) in revenue_correlation.strongest_with(REVENUE_ADJ, 3) {
        info!("{field} correlates with {REVENUE_ADJ} at {r:.2}");
    }
    info!("analysis finished in {:.2?}", start.elapsed());

    Ok(Analysis {
        profile,
        genre_frequencies,
        top_genre_by_year,
        genre_tally,
        budget_by_decade,
        popular_movies,
        revenue_correlation,
    })
}

/// Loads `config.input` and analyzes it.
pub fn run(config: &AnalysisConfig) -> Result<Analysis> {
    let raw = load_movies(&config.input)?;
    Ok(analyze(&raw, config)?)
}

impl Analysis {
    pub fn top_genre_frame(&self) -> PolarsResult<DataFrame> {
        df!(
            "release_year" => self.top_genre_by_year.iter().map(|t| t.year).collect::<Vec<_>>(),
            "genre" => self.top_genre_by_year.iter().map(|t| t.genre.as_str()).collect::<Vec<_>>(),
            "count" => self.top_genre_by_year.iter().map(|t| t.count as u32).collect::<Vec<_>>()
        )
    }

    pub fn budget_frame(&self) -> PolarsResult<DataFrame> {
        df!(
            "decade" => self.budget_by_decade.iter().map(|b| b.decade.label()).collect::<Vec<_>>(),
            "budget" => self.budget_by_decade.iter().map(|b| b.mean_budget).collect::<Vec<_>>(),
            "movies" => self.budget_by_decade.iter().map(|b| b.movies as u32).collect::<Vec<_>>()
        )
    }

    pub fn genre_frequency_frame(&self) -> PolarsResult<DataFrame> {
        df!(
            "genre" => self.genre_frequencies.iter().map(|(g, _)| g.as_str()).collect::<Vec<_>>(),
            "count" => self.genre_frequencies.iter().map(|(_, n)| *n as u32).collect::<Vec<_>>()
        )
    }

    /// Heatmap layout: a `field` column followed by one column per field.
    pub fn correlation_frame(&self) -> PolarsResult<DataFrame> {
        let matrix = &self.revenue_correlation;
        let mut columns = vec![Column::new("field".into(), matrix.fields.clone())];
        for (j, name) in matrix.fields.iter().enumerate() {
            let values: Vec<f64> = matrix.values.iter().map(|row| row[j]).collect();
            columns.push(Column::new(name.as_str().into(), values));
        }
        DataFrame::new(columns)
    }
}
