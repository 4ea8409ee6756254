//! Column layout of the TMDb movies export.

pub const POPULARITY: &str = "popularity";
pub const ORIGINAL_TITLE: &str = "original_title";
pub const GENRES: &str = "genres";
pub const RELEASE_YEAR: &str = "release_year";
pub const BUDGET_ADJ: &str = "budget_adj";
pub const REVENUE_ADJ: &str = "revenue_adj";

/// Column holding a single genre after expansion.
pub const GENRE: &str = "genre";
/// Column holding the decade label after binning.
pub const DECADE: &str = "decade";

pub const GENRE_DELIMITER: char = '|';

/// Header of the raw export, in file order.
pub const COLUMNS: [&str; 21] = [
    "id",
    "imdb_id",
    "popularity",
    "budget",
    "revenue",
    "original_title",
    "cast",
    "homepage",
    "director",
    "tagline",
    "keywords",
    "overview",
    "runtime",
    "genres",
    "production_companies",
    "release_date",
    "vote_count",
    "vote_average",
    "release_year",
    "budget_adj",
    "revenue_adj",
];

pub const INTEGER_COLUMNS: [&str; 3] = ["id", "vote_count", "release_year"];

pub const FLOAT_COLUMNS: [&str; 7] = [
    "popularity",
    "budget",
    "revenue",
    "runtime",
    "vote_average",
    "budget_adj",
    "revenue_adj",
];

/// Numeric fields entering the revenue correlation, in matrix order.
pub const NUMERIC_COLUMNS: [&str; 10] = [
    "id",
    "popularity",
    "budget",
    "revenue",
    "runtime",
    "vote_count",
    "vote_average",
    "release_year",
    "budget_adj",
    "revenue_adj",
];

// imdb_id stays: every row already has an id
pub const DROPPED_COLUMNS: [&str; 11] = [
    "homepage",
    "tagline",
    "overview",
    "budget",
    "revenue",
    "original_title",
    "cast",
    "director",
    "keywords",
    "production_companies",
    "release_date",
];

pub const KEY_COLUMNS: [&str; 1] = [GENRES];
