use crate::error::{EdaError, Result};
use crate::schema::{COLUMNS, FLOAT_COLUMNS, INTEGER_COLUMNS};
use csv::ReaderBuilder;
use polars::prelude::*;
use rustc_hash::FxHashSet as HashSet;
use std::fs::File;
use std::io::{Cursor, Read};
use std::path::Path;
use tracing::{debug, info};

fn read_options() -> CsvReadOptions {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .with_parse_options(CsvParseOptions::default().with_quote_char(Some(b'"')))
}

fn parse_error(
    path: &Path,
    source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
) -> EdaError {
    EdaError::Parse {
        path: path.to_path_buf(),
        source: source.into(),
    }
}

/// Reads the raw movies export. The file handle is released before returning.
pub fn load_movies(path: &Path) -> Result<DataFrame> {
    if !path.exists() {
        return Err(EdaError::NotFound(path.to_path_buf()));
    }

    let movies = read_movies(File::open(path)?, path)?;
    info!(
        "loaded {} rows x {} columns from {}",
        movies.height(),
        movies.width(),
        path.display()
    );
    Ok(movies)
}

/// Same as [`load_movies`] for an export coming from any reader.
pub fn load_movies_from_reader<R: Read>(reader: R) -> Result<DataFrame> {
    read_movies(reader, Path::new("<reader>"))
}

fn read_movies<R: Read>(mut reader: R, origin: &Path) -> Result<DataFrame> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;

    check_record_lengths(&bytes, origin)?;

    let raw = read_options()
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()
        .map_err(|source| parse_error(origin, source))?;
    conform(raw, origin)
}

// every record must carry exactly as many fields as the header
fn check_record_lengths(bytes: &[u8], origin: &Path) -> Result<()> {
    let mut records = ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(bytes);

    let mut record = csv::ByteRecord::new();
    loop {
        match records.read_byte_record(&mut record) {
            Ok(true) => {}
            Ok(false) => return Ok(()),
            Err(source) => return Err(parse_error(origin, source)),
        }
    }
}

// checks the documented header and pins numeric dtypes
fn conform(raw: DataFrame, origin: &Path) -> Result<DataFrame> {
    {
        let present: HashSet<&str> = raw
            .get_column_names()
            .into_iter()
            .map(|name| name.as_str())
            .collect();
        if let Some(missing) = COLUMNS.iter().find(|name| !present.contains(*name)) {
            return Err(EdaError::MissingColumn(missing.to_string()));
        }
    }

    // a cell that does not parse as its documented type fails the load
    let casts: Vec<Expr> = INTEGER_COLUMNS
        .iter()
        .map(|name| col(*name).strict_cast(DataType::Int64))
        .chain(
            FLOAT_COLUMNS
                .iter()
                .map(|name| col(*name).strict_cast(DataType::Float64)),
        )
        .collect();

    let movies = raw
        .lazy()
        .with_columns(casts)
        .collect()
        .map_err(|source| parse_error(origin, source))?;
    debug!("schema: {:?}", movies.schema());
    Ok(movies)
}
