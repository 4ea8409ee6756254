use crate::decade::Decade;
use crate::schema::{BUDGET_ADJ, DECADE, GENRE, RELEASE_YEAR};
use polars::prelude::*;
use rustc_hash::FxHashMap as HashMap;
use std::cmp::Reverse;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearGenreCount {
    pub year: i64,
    pub genre: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecadeBudget {
    pub decade: Decade,
    /// `None` when no movie of the decade carries a budget.
    pub mean_budget: Option<f64>,
    pub movies: usize,
}

fn year_genre_counts(expanded: &DataFrame) -> PolarsResult<HashMap<(i64, &str), usize>> {
    let years = expanded.column(RELEASE_YEAR)?.i64()?;
    let genres = expanded.column(GENRE)?.str()?;

    Ok(years
        .into_iter()
        .zip(genres.into_iter())
        .filter_map(|(year, genre)| Some((year?, genre?)))
        .fold(HashMap::default(), |mut acc, key| {
            *acc.entry(key).or_default() += 1;
            acc
        }))
}

/// Production count of every (year, genre) pair, ordered by year then genre.
pub fn genre_counts_by_year(expanded: &DataFrame) -> PolarsResult<Vec<YearGenreCount>> {
    let mut counts: Vec<YearGenreCount> = year_genre_counts(expanded)?
        .into_iter()
        .map(|((year, genre), count)| YearGenreCount {
            year,
            genre: genre.to_string(),
            count,
        })
        .collect();
    counts.sort_by(|a, b| (a.year, &a.genre).cmp(&(b.year, &b.genre)));
    Ok(counts)
}

/// Most produced genre of each year present in `expanded`, ordered by year.
///
/// Equal counts resolve to the lexicographically smallest genre name.
pub fn top_genre_by_year(expanded: &DataFrame) -> PolarsResult<Vec<YearGenreCount>> {
    let mut best: HashMap<i64, (&str, usize)> = HashMap::default();

    for ((year, genre), count) in year_genre_counts(expanded)? {
        best.entry(year)
            .and_modify(|(top_genre, top_count)| {
                if count > *top_count || (count == *top_count && genre < *top_genre) {
                    *top_genre = genre;
                    *top_count = count;
                }
            })
            .or_insert((genre, count));
    }

    let mut tops: Vec<YearGenreCount> = best
        .into_iter()
        .map(|(year, (genre, count))| YearGenreCount {
            year,
            genre: genre.to_string(),
            count,
        })
        .collect();
    tops.sort_by_key(|top| top.year);
    Ok(tops)
}

/// Number of years each genre came out on top, most frequent first.
pub fn genre_tally(tops: &[YearGenreCount]) -> Vec<(String, usize)> {
    let tally = tops
        .iter()
        .fold(HashMap::<&str, usize>::default(), |mut acc, top| {
            *acc.entry(top.genre.as_str()).or_default() += 1;
            acc
        });

    let mut tally: Vec<(String, usize)> = tally
        .into_iter()
        .map(|(genre, years)| (genre.to_string(), years))
        .collect();
    tally.sort_by(|a, b| (Reverse(a.1), &a.0).cmp(&(Reverse(b.1), &b.0)));
    tally
}

/// Mean `budget_adj` per decade over un-expanded rows, one entry per decade.
///
/// Null budgets are skipped. Zero budgets are kept as data points, which
/// drags the mean down for decades with many unreported budgets.
pub fn mean_budget_by_decade(binned: &DataFrame) -> PolarsResult<Vec<DecadeBudget>> {
    let decades = binned.column(DECADE)?.str()?;
    let budgets = binned.column(BUDGET_ADJ)?.cast(&DataType::Float64)?;

    let mut sums: HashMap<Decade, (f64, usize, usize)> = HashMap::default();
    for (label, budget) in decades.into_iter().zip(budgets.f64()?.into_iter()) {
        let Some(decade) = label.and_then(Decade::from_label) else {
            continue;
        };
        let (sum, n, movies) = sums.entry(decade).or_default();
        *movies += 1;
        if let Some(budget) = budget {
            *sum += budget;
            *n += 1;
        }
    }

    Ok(Decade::ALL
        .into_iter()
        .map(|decade| {
            let (sum, n, movies) = sums.get(&decade).copied().unwrap_or_default();
            DecadeBudget {
                decade,
                mean_budget: (n > 0).then(|| sum / n as f64),
                movies,
            }
        })
        .collect())
}

#[cfg(test)]
mod test_aggregate {
    use super::*;

    #[test]
    fn test_top_genre_for_2000() -> Result<(), PolarsError> {
        let expanded = df!(
            "release_year" => [2000i64, 2000, 2000, 2000, 2000, 2001],
            "genre" => ["Drama", "Comedy", "Drama", "Comedy", "Drama", "Horror"]
        )?;
        let tops = top_genre_by_year(&expanded)?;
        assert_eq!(
            tops,
            vec![
                YearGenreCount {
                    year: 2000,
                    genre: "Drama".to_string(),
                    count: 3
                },
                YearGenreCount {
                    year: 2001,
                    genre: "Horror".to_string(),
                    count: 1
                },
            ]
        );
        Ok(())
    }

    #[test]
    fn test_tie_goes_to_smallest_name() -> Result<(), PolarsError> {
        let expanded = df!(
            "release_year" => [1999i64, 1999, 1999, 1999],
            "genre" => ["Drama", "Comedy", "Drama", "Comedy"]
        )?;
        let tops = top_genre_by_year(&expanded)?;
        assert_eq!(tops.len(), 1);
        assert_eq!(tops[0].genre, "Comedy");
        assert_eq!(tops[0].count, 2);
        Ok(())
    }

    #[test]
    fn test_counts_by_year_are_sorted() -> Result<(), PolarsError> {
        let expanded = df!(
            "release_year" => [Some(2001i64), Some(2000), Some(2000), None],
            "genre" => [Some("War"), Some("Drama"), Some("Action"), Some("Drama")]
        )?;
        let counts: Vec<(i64, String, usize)> = genre_counts_by_year(&expanded)?
            .into_iter()
            .map(|c| (c.year, c.genre, c.count))
            .collect();
        assert_eq!(
            counts,
            vec![
                (2000, "Action".to_string(), 1),
                (2000, "Drama".to_string(), 1),
                (2001, "War".to_string(), 1),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_genre_tally() {
        let top = |year, genre: &str| YearGenreCount {
            year,
            genre: genre.to_string(),
            count: 1,
        };
        let tally = genre_tally(&[
            top(1960, "Drama"),
            top(1961, "Comedy"),
            top(1962, "Drama"),
            top(1963, "Action"),
        ]);
        assert_eq!(
            tally,
            vec![
                ("Drama".to_string(), 2),
                ("Action".to_string(), 1),
                ("Comedy".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_mean_budget_for_1990s() -> Result<(), PolarsError> {
        let binned = df!(
            "decade" => [Some("1990"), Some("1990"), Some("2000"), None],
            "budget_adj" => [Some(100.0f64), Some(300.0), None, Some(5.0)]
        )?;
        let budgets = mean_budget_by_decade(&binned)?;

        assert_eq!(budgets.len(), 6);
        let nineties = &budgets[3];
        assert_eq!(nineties.decade, Decade::Nineties);
        assert_eq!(nineties.mean_budget, Some(200.0));
        assert_eq!(nineties.movies, 2);

        let two_thousands = &budgets[4];
        assert_eq!(two_thousands.mean_budget, None);
        assert_eq!(two_thousands.movies, 1);
        assert_eq!(budgets[0].mean_budget, None);
        assert_eq!(budgets[0].movies, 0);
        Ok(())
    }

    #[test]
    fn test_zero_budgets_count() -> Result<(), PolarsError> {
        let binned = df!(
            "decade" => ["1970", "1970", "1970"],
            "budget_adj" => [0.0f64, 0.0, 300.0]
        )?;
        let budgets = mean_budget_by_decade(&binned)?;
        assert_eq!(budgets[1].mean_budget, Some(100.0));
        Ok(())
    }
}
