//! # Star catalog reader
//!
//! Turns a star catalog file (HYG database or a generic `name, ra_hours, dec_degrees, mag`
//! table) into [`EquatorialRecord`]s.
//!
//! ## Name resolution
//!
//! The canonical name of a star is the first available of:
//!
//! 1. proper name (`proper`, or `name` in the generic layout),
//! 2. Bayer/Flamsteed designation (`bf`),
//! 3. `"HIP <n>"` from the Hipparcos number,
//! 4. `"HD <n>"` from the Henry Draper number,
//! 5. a synthesized `"Star mag 5.3 in Cyg"` for unnamed stars brighter than magnitude 6.0.
//!
//! Stars with none of these and magnitude ≥ 6.0 (or unknown) are not loaded, which keeps
//! the ~120k rows of the HYG database down to what is useful for star hopping.
//!
//! The HYG row describing the Sun (`proper = Sol`) is skipped: the Sun is resolved through
//! the ephemeris, never through the star catalog.
use csv::StringRecord;

use crate::catalog::columns::{
    csv_reader, read_coordinates, resolve_field, HeaderIndex, ParseRowError, COMMON_NAMES,
    CONSTELLATION, STAR_MAGNITUDE, STAR_NAME,
};
use crate::catalog::{CatalogFormat, EquatorialRecord};
use crate::constants::{Magnitude, UNNAMED_STAR_MAGNITUDE_LIMIT};
use crate::conversion::RaUnit;
use crate::starhop_errors::StarHopError;

/// Parse the content of a star catalog file.
///
/// Arguments
/// -----------------
/// * `content` – Whole file content; the delimiter is detected once for the file. Rows that
///   are not valid UTF-8 are skipped like any other malformed row.
/// * `format` – Layout hint, [`CatalogFormat::Auto`] to detect it from the header.
///
/// Return
/// ----------
/// * The loaded stars in file order. Malformed rows are skipped and only counted in a
///   `tracing` debug event. An error is returned only when the header row cannot be read.
pub fn parse_star_file(
    content: impl AsRef<[u8]>,
    format: CatalogFormat,
) -> Result<Vec<EquatorialRecord>, StarHopError> {
    let content = content.as_ref();
    let mut reader = csv_reader(content, format.delimiter(content));
    let header = HeaderIndex::new(reader.headers()?);
    let format = format.resolve(&header);
    let ra_unit = format.ra_unit();

    let mut stars = Vec::new();
    let mut skipped = 0usize;
    for row in reader.records() {
        let Ok(record) = row else {
            skipped += 1;
            continue;
        };
        match star_from_row(&header, &record, ra_unit) {
            Ok(star) => stars.push(star),
            Err(_) => skipped += 1,
        }
    }

    tracing::debug!(loaded = stars.len(), skipped, ?format, "parsed star catalog");
    Ok(stars)
}

/// Build one star record from a CSV row.
pub(crate) fn star_from_row(
    header: &HeaderIndex,
    record: &StringRecord,
    ra_unit: RaUnit,
) -> Result<EquatorialRecord, ParseRowError> {
    if header
        .get(record, "proper")
        .is_some_and(|proper| proper.eq_ignore_ascii_case("sol"))
    {
        return Err(ParseRowError::Excluded("Sol".into()));
    }

    let (ra_hours, dec_degrees) = read_coordinates(header, record, ra_unit)?;
    let magnitude = resolve_field(STAR_MAGNITUDE, header, record);
    let constellation = resolve_field(CONSTELLATION, header, record);

    let canonical_name = match resolve_field(STAR_NAME, header, record) {
        Some(name) => name,
        None => synthesized_star_name(magnitude, constellation.as_deref())?,
    };

    Ok(EquatorialRecord {
        ra_hours,
        dec_degrees,
        magnitude,
        canonical_name,
        common_name: resolve_field(COMMON_NAMES, header, record),
        object_type: Some("Star".to_string()),
        constellation,
    })
}

/// Placeholder name for a bright star without any designation.
fn synthesized_star_name(
    magnitude: Option<Magnitude>,
    constellation: Option<&str>,
) -> Result<String, ParseRowError> {
    match magnitude {
        Some(mag) if mag < UNNAMED_STAR_MAGNITUDE_LIMIT => Ok(match constellation {
            Some(con) => format!("Star mag {mag:.1} in {con}"),
            None => format!("Star mag {mag:.1}"),
        }),
        _ => Err(ParseRowError::MissingName),
    }
}
