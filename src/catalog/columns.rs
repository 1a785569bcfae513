//! # Column resolution for heterogeneous catalog files
//!
//! Star and DSO catalogs name the same logical field differently (`ra` / `RA` /
//! `ra_hours`, `mag` / `V-Mag` / `magnitude`, …). Each logical field is described here by a
//! small declarative table of [`FieldRule`]s: a candidate column name and the transform that
//! turns the raw cell into a typed value. Rules are evaluated in priority order and the first
//! present, non-empty cell whose transform succeeds wins.
//!
//! Headers are matched case-insensitively; cells are trimmed before use.
use std::collections::HashMap;

use ahash::RandomState;
use csv::StringRecord;
use thiserror::Error;

use crate::constants::{Degree, Hour, Magnitude};
use crate::conversion::{parse_dec_degrees, parse_ra_hours, RaUnit};

/// Row-level ingestion failures. A failing row is skipped, it never aborts the file.
///
/// Variants
/// -----------------
/// * `MissingName` – No usable designation (and, for stars, too faint to synthesize one).
/// * `InvalidRA` – No right ascension column could be parsed; payload carries the raw cell.
/// * `InvalidDec` – No declination column could be parsed; payload carries the raw cell.
/// * `DecOutOfRange` – The parsed declination lies outside `[-90, 90]`.
/// * `Excluded` – The row is deliberately left out (duplicate or non-existent object, the Sun
///   in a star catalog).
#[derive(Error, Debug, PartialEq)]
pub enum ParseRowError {
    #[error("Row has no usable name")]
    MissingName,
    #[error("Error parsing RA: {0}")]
    InvalidRA(String),
    #[error("Invalid Dec value: {0}")]
    InvalidDec(String),
    #[error("Declination out of range: {0}")]
    DecOutOfRange(Degree),
    #[error("Row excluded from the catalog: {0}")]
    Excluded(String),
}

/// Pick the field delimiter for a whole file: semicolon when the content has semicolons
/// and no commas, comma otherwise.
pub fn detect_delimiter(content: impl AsRef<[u8]>) -> u8 {
    let content = content.as_ref();
    if content.contains(&b';') && !content.contains(&b',') {
        b';'
    } else {
        b','
    }
}

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Build a CSV reader over in-memory content.
///
/// The content is raw bytes: a row that is not valid UTF-8 fails on its own when read as a
/// [`StringRecord`], the other rows are unaffected.
pub(crate) fn csv_reader(content: &[u8], delimiter: u8) -> csv::Reader<&[u8]> {
    let content = content.strip_prefix(UTF8_BOM).unwrap_or(content);
    csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content)
}

/// Lowercased header name → column position.
#[derive(Debug, Clone, Default)]
pub(crate) struct HeaderIndex {
    columns: HashMap<String, usize, RandomState>,
}

impl HeaderIndex {
    pub(crate) fn new(headers: &StringRecord) -> Self {
        let mut columns = HashMap::default();
        for (idx, name) in headers.iter().enumerate() {
            columns
                .entry(name.trim().to_lowercase())
                .or_insert(idx);
        }
        HeaderIndex { columns }
    }

    pub(crate) fn contains(&self, column: &str) -> bool {
        self.columns.contains_key(column)
    }

    /// Trimmed, non-empty cell of `column` in `record`.
    pub(crate) fn get<'r>(&self, record: &'r StringRecord, column: &str) -> Option<&'r str> {
        let idx = *self.columns.get(column)?;
        record.get(idx).map(str::trim).filter(|cell| !cell.is_empty())
    }
}

/// One candidate source for a logical field.
pub(crate) struct FieldRule<T> {
    pub(crate) column: &'static str,
    pub(crate) transform: fn(&str) -> Option<T>,
}

/// Evaluate `rules` in order; the first present cell with a successful transform wins.
pub(crate) fn resolve_field<T>(
    rules: &[FieldRule<T>],
    header: &HeaderIndex,
    record: &StringRecord,
) -> Option<T> {
    rules.iter().find_map(|rule| {
        header
            .get(record, rule.column)
            .and_then(|cell| (rule.transform)(cell))
    })
}

/// First present raw cell among the rule columns, for diagnostics.
pub(crate) fn first_raw<'r, T>(
    rules: &[FieldRule<T>],
    header: &HeaderIndex,
    record: &'r StringRecord,
) -> &'r str {
    rules
        .iter()
        .find_map(|rule| header.get(record, rule.column))
        .unwrap_or("")
}

// -------------------------------------------------------------------------------------------------
// Transforms
// -------------------------------------------------------------------------------------------------

fn text(cell: &str) -> Option<String> {
    Some(cell.to_string())
}

fn number(cell: &str) -> Option<f64> {
    cell.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn catalog_number(cell: &str) -> Option<u64> {
    number(cell)
        .filter(|n| *n > 0.0 && n.fract() == 0.0)
        .map(|n| n as u64)
}

fn hip_designation(cell: &str) -> Option<String> {
    catalog_number(cell).map(|n| format!("HIP {n}"))
}

fn hd_designation(cell: &str) -> Option<String> {
    catalog_number(cell).map(|n| format!("HD {n}"))
}

fn messier_number(cell: &str) -> Option<u32> {
    let digits = cell.trim_start_matches(['M', 'm']).trim_start_matches('0');
    digits.parse::<u32>().ok().filter(|n| *n > 0)
}

fn ra_from_hours(cell: &str) -> Option<Hour> {
    parse_ra_hours(cell, RaUnit::Hours)
}

fn ra_from_degrees(cell: &str) -> Option<Hour> {
    parse_ra_hours(cell, RaUnit::Degrees)
}

// -------------------------------------------------------------------------------------------------
// Field tables
// -------------------------------------------------------------------------------------------------

/// Star designation precedence: proper name, generic name, Bayer/Flamsteed, HIP, HD.
pub(crate) const STAR_NAME: &[FieldRule<String>] = &[
    FieldRule { column: "proper", transform: text },
    FieldRule { column: "name", transform: text },
    FieldRule { column: "bf", transform: text },
    FieldRule { column: "hip", transform: hip_designation },
    FieldRule { column: "hd", transform: hd_designation },
];

pub(crate) const STAR_MAGNITUDE: &[FieldRule<Magnitude>] = &[
    FieldRule { column: "mag", transform: number },
    FieldRule { column: "vmag", transform: number },
    FieldRule { column: "magnitude", transform: number },
];

pub(crate) const DSO_NAME: &[FieldRule<String>] = &[
    FieldRule { column: "name", transform: text },
    FieldRule { column: "object", transform: text },
];

/// DSO magnitude precedence: visual, blue, generic.
pub(crate) const DSO_MAGNITUDE: &[FieldRule<Magnitude>] = &[
    FieldRule { column: "v-mag", transform: number },
    FieldRule { column: "b-mag", transform: number },
    FieldRule { column: "magnitude", transform: number },
    FieldRule { column: "mag", transform: number },
];

pub(crate) const OBJECT_TYPE: &[FieldRule<String>] = &[
    FieldRule { column: "type", transform: text },
    FieldRule { column: "object_type", transform: text },
];

pub(crate) const CONSTELLATION: &[FieldRule<String>] = &[
    FieldRule { column: "con", transform: text },
    FieldRule { column: "constellation", transform: text },
    FieldRule { column: "const", transform: text },
];

pub(crate) const COMMON_NAMES: &[FieldRule<String>] = &[
    FieldRule { column: "common names", transform: text },
    FieldRule { column: "common_names", transform: text },
    FieldRule { column: "common_name", transform: text },
];

pub(crate) const MESSIER: &[FieldRule<u32>] = &[
    FieldRule { column: "m", transform: messier_number },
    FieldRule { column: "messier", transform: messier_number },
];

const RA_DECIMAL_HOURS: &[FieldRule<Hour>] = &[
    FieldRule { column: "ra", transform: ra_from_hours },
    FieldRule { column: "ra_hours", transform: ra_from_hours },
    FieldRule { column: "ra_deg", transform: ra_from_degrees },
    FieldRule { column: "ra_degrees", transform: ra_from_degrees },
];

const RA_DECIMAL_DEGREES: &[FieldRule<Hour>] = &[
    FieldRule { column: "ra", transform: ra_from_degrees },
    FieldRule { column: "ra_hours", transform: ra_from_hours },
    FieldRule { column: "ra_deg", transform: ra_from_degrees },
    FieldRule { column: "ra_degrees", transform: ra_from_degrees },
];

const DEC: &[FieldRule<Degree>] = &[
    FieldRule { column: "dec", transform: parse_dec_degrees },
    FieldRule { column: "dec_degrees", transform: parse_dec_degrees },
    FieldRule { column: "dec_deg", transform: parse_dec_degrees },
];

/// Right ascension rules for a file whose bare `ra` column is decimal in `unit`.
pub(crate) fn ra_rules(unit: RaUnit) -> &'static [FieldRule<Hour>] {
    match unit {
        RaUnit::Hours => RA_DECIMAL_HOURS,
        RaUnit::Degrees => RA_DECIMAL_DEGREES,
    }
}

/// Read and validate the position of a row.
///
/// Return
/// ----------
/// * `(ra_hours, dec_degrees)`; right ascension is passed through unwrapped, declination must
///   lie in `[-90, 90]`.
pub(crate) fn read_coordinates(
    header: &HeaderIndex,
    record: &StringRecord,
    ra_unit: RaUnit,
) -> Result<(Hour, Degree), ParseRowError> {
    let ra_table = ra_rules(ra_unit);
    let ra = resolve_field(ra_table, header, record)
        .ok_or_else(|| ParseRowError::InvalidRA(first_raw(ra_table, header, record).to_string()))?;
    let dec = resolve_field(DEC, header, record)
        .ok_or_else(|| ParseRowError::InvalidDec(first_raw(DEC, header, record).to_string()))?;
    if !(-90.0..=90.0).contains(&dec) {
        return Err(ParseRowError::DecOutOfRange(dec));
    }
    Ok((ra, dec))
}
