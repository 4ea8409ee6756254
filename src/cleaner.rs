use crate::schema::{DROPPED_COLUMNS, KEY_COLUMNS};
use polars::prelude::*;
use tracing::debug;

/// Removes exact duplicate rows (first occurrence wins), the `drop_columns`
/// that are present, and rows missing any of `key_columns`.
///
/// A string key cell counts as missing when it is null or blank.
pub fn clean(
    raw: &DataFrame,
    drop_columns: &[&str],
    key_columns: &[&str],
) -> PolarsResult<DataFrame> {
    let deduped = raw.unique_stable(None, UniqueKeepStrategy::First, None)?;

    let kept: Vec<PlSmallStr> = deduped
        .get_columns()
        .iter()
        .map(|column| column.name().clone())
        .filter(|name| !drop_columns.contains(&name.as_str()))
        .collect();
    let pruned = deduped.select(kept)?;

    let mut keep = vec![true; pruned.height()];
    for key in key_columns {
        let column = pruned.column(key)?;
        if column.dtype() == &DataType::String {
            for (slot, value) in keep.iter_mut().zip(column.str()?.into_iter()) {
                *slot &= value.is_some_and(|v| !v.trim().is_empty());
            }
        } else {
            for (slot, valid) in keep.iter_mut().zip(column.is_not_null().into_iter()) {
                *slot &= valid.unwrap_or(false);
            }
        }
    }
    let mask = BooleanChunked::from_slice("keep".into(), &keep);
    let cleaned = pruned.filter(&mask)?;

    debug!(
        "cleaned {} -> {} rows ({} duplicates), {} columns kept",
        raw.height(),
        cleaned.height(),
        raw.height() - deduped.height(),
        cleaned.width()
    );
    Ok(cleaned)
}

/// [`clean`] with the fixed column lists of the movies export.
pub fn clean_movies(raw: &DataFrame) -> PolarsResult<DataFrame> {
    clean(raw, &DROPPED_COLUMNS, &KEY_COLUMNS)
}

pub fn duplicate_rows(df: &DataFrame) -> PolarsResult<usize> {
    let unique = df.unique_stable(None, UniqueKeepStrategy::First, None)?;
    Ok(df.height() - unique.height())
}

#[cfg(test)]
mod test_cleaner {
    use super::*;

    fn movies() -> PolarsResult<DataFrame> {
        df!(
            "id" => [1i64, 2, 2, 3, 4],
            "homepage" => [Some("a.com"), None, None, Some("c.com"), None],
            "genres" => [Some("Drama|Comedy"), Some("Action"), Some("Action"), None, Some("  ")],
            "release_year" => [1999i64, 2001, 2001, 2010, 1985]
        )
    }

    #[test]
    fn test_one_duplicate_pair() -> Result<(), PolarsError> {
        let raw = df!(
            "id" => [1i64, 2, 2, 3],
            "genres" => ["Drama", "Action", "Action", "Comedy"]
        )?;
        let cleaned = clean(&raw, &[], &["genres"])?;
        assert_eq!(cleaned.height(), raw.height() - 1);
        assert_eq!(duplicate_rows(&raw)?, 1);
        Ok(())
    }

    #[test]
    fn test_clean_drops_columns_and_missing_keys() -> Result<(), PolarsError> {
        let raw = movies()?;
        let cleaned = clean(&raw, &["homepage", "tagline"], &["genres"])?;

        let names: Vec<&str> = cleaned
            .get_column_names()
            .into_iter()
            .map(|name| name.as_str())
            .collect();
        assert_eq!(names, vec!["id", "genres", "release_year"]);
        let ids: Vec<i64> = cleaned.column("id")?.i64()?.into_no_null_iter().collect();
        assert_eq!(ids, vec![1, 2]);
        // input is untouched
        assert_eq!(raw.height(), 5);
        assert_eq!(raw.width(), 4);
        Ok(())
    }

    #[test]
    fn test_numeric_key_column() -> Result<(), PolarsError> {
        let raw = df!(
            "id" => [1i64, 2, 3],
            "release_year" => [Some(1999i64), None, Some(2004)]
        )?;
        let cleaned = clean(&raw, &[], &["release_year"])?;
        let ids: Vec<i64> = cleaned.column("id")?.i64()?.into_no_null_iter().collect();
        assert_eq!(ids, vec![1, 3]);
        Ok(())
    }

    #[test]
    fn test_keeps_first_occurrence_order() -> Result<(), PolarsError> {
        let raw = df!(
            "id" => [3i64, 1, 3, 2, 1],
            "genres" => ["War", "Drama", "War", "Crime", "Drama"]
        )?;
        let cleaned = clean(&raw, &[], &[])?;
        let ids: Vec<i64> = cleaned.column("id")?.i64()?.into_no_null_iter().collect();
        assert_eq!(ids, vec![3, 1, 2]);
        Ok(())
    }
}
