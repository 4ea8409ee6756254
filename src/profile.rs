use crate::cleaner::duplicate_rows;
use crate::schema::{GENRE, ORIGINAL_TITLE, POPULARITY};
use polars::prelude::*;
use rustc_hash::FxHashMap as HashMap;
use std::cmp::Reverse;

/// Shape and quality figures of the raw export.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetProfile {
    pub rows: usize,
    pub columns: usize,
    pub duplicate_rows: usize,
    pub null_counts: Vec<(String, usize)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PopularMovie {
    pub title: String,
    pub popularity: f64,
}

pub fn profile(raw: &DataFrame) -> PolarsResult<DatasetProfile> {
    let null_counts = raw
        .get_columns()
        .iter()
        .map(|column| (column.name().to_string(), column.null_count()))
        .collect();

    Ok(DatasetProfile {
        rows: raw.height(),
        columns: raw.width(),
        duplicate_rows: duplicate_rows(raw)?,
        null_counts,
    })
}

/// Row count per genre of an expanded table, most common first.
pub fn genre_frequencies(expanded: &DataFrame) -> PolarsResult<Vec<(String, usize)>> {
    let counts = expanded
        .column(GENRE)?
        .str()?
        .into_iter()
        .flatten()
        .fold(HashMap::<&str, usize>::default(), |mut acc, genre| {
            *acc.entry(genre).or_default() += 1;
            acc
        });

    let mut counts: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(genre, n)| (genre.to_string(), n))
        .collect();
    counts.sort_by(|a, b| (Reverse(a.1), &a.0).cmp(&(Reverse(b.1), &b.0)));
    Ok(counts)
}

/// Movies scoring at least `min_popularity`, most popular first.
pub fn popular_movies(raw: &DataFrame, min_popularity: f64) -> PolarsResult<Vec<PopularMovie>> {
    let popular = raw
        .clone()
        .lazy()
        .filter(col(POPULARITY).gt_eq(lit(min_popularity)))
        .sort(
            [POPULARITY],
            SortMultipleOptions::default()
                .with_order_descending(true)
                .with_maintain_order(true),
        )
        .select([col(ORIGINAL_TITLE), col(POPULARITY)])
        .collect()?;

    Ok(popular
        .column(ORIGINAL_TITLE)?
        .str()?
        .into_iter()
        .zip(popular.column(POPULARITY)?.f64()?.into_iter())
        .filter_map(|(title, popularity)| {
            Some(PopularMovie {
                title: title?.to_string(),
                popularity: popularity?,
            })
        })
        .collect())
}
