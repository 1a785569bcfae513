//! Angle string parsing and formatting, and catalog identifier normalization.
//!
//! Catalog files quote right ascension either as decimal hours, decimal degrees or
//! sexagesimal `HH:MM:SS.ss`, and declination either as decimal degrees or signed
//! sexagesimal `±DD:MM:SS.s`. The helpers below accept all of them and return `None` on any
//! malformed input so that the row-level readers can skip the row.
use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::{Degree, Hour, HOUR_TO_DEG};

/// Unit of a decimal (non-sexagesimal) right ascension column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RaUnit {
    Hours,
    Degrees,
}

static CATALOG_ID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(NGC|IC|M)\s*0*(\d+)(.*)$").expect("catalog identifier regex is valid")
});

/// Split a sexagesimal field on `:` or whitespace.
///
/// Return
/// ----------
/// * The two or three non-empty components, or `None` when the string is not sexagesimal.
fn split_sexagesimal(raw: &str) -> Option<Vec<&str>> {
    let parts: Vec<&str> = raw
        .split(|c: char| c == ':' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .collect();
    if (2..=3).contains(&parts.len()) {
        Some(parts)
    } else {
        None
    }
}

fn is_sexagesimal(raw: &str) -> bool {
    raw.contains(':') || raw.split_whitespace().count() > 1
}

/// Combine unsigned `(units, minutes, seconds)` components into a decimal value.
fn combine_sexagesimal(units: &str, minutes: &str, seconds: Option<&str>) -> Option<f64> {
    let u: f64 = units.parse().ok()?;
    let m: f64 = minutes.parse().ok()?;
    let s: f64 = match seconds {
        Some(s) => s.parse().ok()?,
        None => 0.0,
    };
    if !(u.is_finite() && (0.0..60.0).contains(&m) && (0.0..60.0).contains(&s)) {
        return None;
    }
    Some(u + m / 60.0 + s / 3600.0)
}

fn parse_decimal(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a right ascension field to decimal hours.
///
/// Arguments
/// ---------
/// * `ra`: the raw field, either sexagesimal (`HH:MM:SS.ss` or `HH MM SS.ss`) or decimal
/// * `decimal_unit`: the unit of the column when the value is decimal
///
/// Returns
/// -------
/// * `Option<Hour>`: `h + m/60 + s/3600` for sexagesimal input, the decimal value for
///   [`RaUnit::Hours`], or the decimal value divided by 15 for [`RaUnit::Degrees`].
///   `None` if the input is malformed.
pub fn parse_ra_hours(ra: &str, decimal_unit: RaUnit) -> Option<Hour> {
    let ra = ra.trim();
    if ra.is_empty() {
        return None;
    }

    if is_sexagesimal(ra) {
        let parts = split_sexagesimal(ra)?;
        return combine_sexagesimal(parts[0], parts[1], parts.get(2).copied());
    }

    let value = parse_decimal(ra)?;
    match decimal_unit {
        RaUnit::Hours => Some(value),
        RaUnit::Degrees => Some(value / HOUR_TO_DEG),
    }
}

/// Parse a declination field to decimal degrees.
///
/// For sexagesimal input the sign is read from the leading character of the raw string and
/// applied to the combined magnitude, so `-00:30:00` gives `-0.5`.
///
/// Arguments
/// ---------
/// * `dec`: the raw field, either `±DD:MM:SS.s`, `±DD MM SS.s` or decimal degrees
///
/// Returns
/// -------
/// * `Option<Degree>`: the declination in degrees, `None` if the input is malformed.
///   The range is not checked here.
pub fn parse_dec_degrees(dec: &str) -> Option<Degree> {
    let dec = dec.trim();
    if dec.is_empty() {
        return None;
    }

    if is_sexagesimal(dec) {
        let sign = if dec.starts_with('-') { -1.0 } else { 1.0 };
        let parts = split_sexagesimal(dec)?;
        let degrees = parts[0].trim_start_matches(&['-', '+'][..]);
        return combine_sexagesimal(degrees, parts[1], parts.get(2).copied()).map(|v| sign * v);
    }

    parse_decimal(dec)
}

/// Strip the zero padding of NGC, IC and Messier identifiers.
///
/// `NGC0031` becomes `NGC31`, `IC0010` becomes `IC10` and `M045` becomes `M45`. The
/// prefix casing and any non-numeric suffix (`NGC0224A`) are kept. Other names are only
/// trimmed.
pub fn normalize_catalog_name(name: &str) -> String {
    let name = name.trim();
    match CATALOG_ID.captures(name) {
        Some(caps) => format!("{}{}{}", &caps[1], &caps[2], &caps[3]),
        None => name.to_string(),
    }
}

/// Format decimal hours as `HHhMMmSS.Ss`.
pub fn format_ra_hms(ra: Hour) -> String {
    let tenths = (ra.rem_euclid(24.0) * 36_000.0).round() as u64 % (24 * 36_000);
    let h = tenths / 36_000;
    let m = (tenths / 600) % 60;
    let s = (tenths % 600) as f64 / 10.0;
    format!("{h:02}h{m:02}m{s:04.1}s")
}

/// Format decimal degrees as `±DD°MM'SS"`.
pub fn format_dec_dms(dec: Degree) -> String {
    let sign = if dec < 0.0 { '-' } else { '+' };
    let total = (dec.abs() * 3600.0).round() as u64;
    let d = total / 3600;
    let m = (total / 60) % 60;
    let s = total % 60;
    format!("{sign}{d:02}°{m:02}'{s:02}\"")
}
