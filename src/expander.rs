use polars::prelude::*;
use tracing::debug;

/// Tokens of a delimited multi-value cell, left to right. Blank tokens are
/// skipped; the rest are returned verbatim.
pub fn split_genres(value: &str, delimiter: char) -> impl Iterator<Item = &str> {
    value
        .split(delimiter)
        .filter(|token| !token.trim().is_empty())
}

/// Replaces the multi-value `source` column with a single-value `target`
/// column, emitting one row per token. Other columns are copied as-is and
/// rows keep their input order.
pub fn expand_genres(
    df: &DataFrame,
    source: &str,
    target: &str,
    delimiter: char,
) -> PolarsResult<DataFrame> {
    let mut rows: Vec<IdxSize> = Vec::with_capacity(df.height());
    let mut genres: Vec<&str> = Vec::with_capacity(df.height());

    for (idx, value) in df.column(source)?.str()?.into_iter().enumerate() {
        if let Some(value) = value {
            for genre in split_genres(value, delimiter) {
                rows.push(idx as IdxSize);
                genres.push(genre);
            }
        }
    }

    let mut expanded = df
        .drop(source)?
        .take(&IdxCa::from_vec("row".into(), rows))?;
    expanded.with_column(Column::new(target.into(), genres))?;

    debug!("expanded {} rows into {}", df.height(), expanded.height());
    Ok(expanded)
}
