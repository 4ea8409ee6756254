use polars::prelude::*;
use std::fmt;

/// Bucket boundaries. Decade `i` covers the half-open range
/// `(DECADE_EDGES[i], DECADE_EDGES[i + 1]]`.
pub const DECADE_EDGES: [i64; 7] = [1959, 1970, 1980, 1990, 2000, 2010, 2016];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Decade {
    Sixties,
    Seventies,
    Eighties,
    Nineties,
    TwoThousands,
    TwentyTens,
}

impl Decade {
    /// Ascending, aligned with the intervals of [`DECADE_EDGES`].
    pub const ALL: [Decade; 6] = [
        Decade::Sixties,
        Decade::Seventies,
        Decade::Eighties,
        Decade::Nineties,
        Decade::TwoThousands,
        Decade::TwentyTens,
    ];

    pub fn for_year(year: i64) -> Option<Decade> {
        DECADE_EDGES
            .windows(2)
            .position(|edge| edge[0] < year && year <= edge[1])
            .map(|i| Decade::ALL[i])
    }

    pub fn label(self) -> &'static str {
        match self {
            Decade::Sixties => "1960",
            Decade::Seventies => "1970",
            Decade::Eighties => "1980",
            Decade::Nineties => "1990",
            Decade::TwoThousands => "2000",
            Decade::TwentyTens => "2010",
        }
    }

    pub fn from_label(label: &str) -> Option<Decade> {
        Decade::ALL.into_iter().find(|d| d.label() == label)
    }
}

impl fmt::Display for Decade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Appends a nullable `target` column with the decade label of `year_column`.
pub fn with_decade(df: &DataFrame, year_column: &str, target: &str) -> PolarsResult<DataFrame> {
    let years = df.column(year_column)?.cast(&DataType::Int64)?;
    let labels: Vec<Option<&str>> = years
        .i64()?
        .into_iter()
        .map(|year| year.and_then(Decade::for_year).map(Decade::label))
        .collect();

    let mut binned = df.clone();
    binned.with_column(Column::new(target.into(), labels))?;
    Ok(binned)
}

#[cfg(test)]
mod test_decade {
    use super::*;

    #[test]
    fn test_interval_boundaries() {
        assert_eq!(Decade::for_year(1959), None);
        assert_eq!(Decade::for_year(1960), Some(Decade::Sixties));
        assert_eq!(Decade::for_year(1970), Some(Decade::Sixties));
        assert_eq!(Decade::for_year(1971), Some(Decade::Seventies));
        assert_eq!(Decade::for_year(1980), Some(Decade::Seventies));
        assert_eq!(Decade::for_year(1990), Some(Decade::Eighties));
        assert_eq!(Decade::for_year(2000), Some(Decade::Nineties));
        assert_eq!(Decade::for_year(2001), Some(Decade::TwoThousands));
        assert_eq!(Decade::for_year(2010), Some(Decade::TwoThousands));
        assert_eq!(Decade::for_year(2011), Some(Decade::TwentyTens));
        assert_eq!(Decade::for_year(2016), Some(Decade::TwentyTens));
        assert_eq!(Decade::for_year(2017), None);
        assert_eq!(Decade::for_year(1900), None);
    }

    #[test]
    fn test_every_valid_year_has_one_bucket() {
        for year in 1960..=2016 {
            let hits = DECADE_EDGES
                .windows(2)
                .filter(|edge| edge[0] < year && year <= edge[1])
                .count();
            assert_eq!(hits, 1, "year {year}");
            assert!(Decade::for_year(year).is_some());
        }
    }

    #[test]
    fn test_labels_round_trip() {
        for decade in Decade::ALL {
            assert_eq!(Decade::from_label(decade.label()), Some(decade));
        }
        assert_eq!(Decade::from_label("1950"), None);
        assert_eq!(Decade::Nineties.to_string(), "1990");
    }

    #[test]
    fn test_with_decade_column() -> Result<(), PolarsError> {
        let df = df!(
            "id" => [1i64, 2, 3, 4],
            "release_year" => [Some(1965i64), Some(2015), Some(1950), None]
        )?;
        let binned = with_decade(&df, "release_year", "decade")?;
        let labels: Vec<Option<&str>> = binned.column("decade")?.str()?.into_iter().collect();
        assert_eq!(labels, vec![Some("1960"), Some("2010"), None, None]);
        assert!(df.column("decade").is_err());
        Ok(())
    }
}
