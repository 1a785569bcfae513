use std::fmt;

use serde::Serialize;

use crate::constants::{Degree, Hour, Magnitude};
use crate::conversion::{format_dec_dms, format_ra_hms};
use crate::coordinates::EquatorialCoord;

/// Normalized catalog entry shared by stars, deep-sky objects and solar-system bodies.
///
/// Coordinates are always both present: rows that cannot produce them are dropped during
/// ingestion, never stored half-filled.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EquatorialRecord {
    /// Right ascension in hours, passed through as read (not wrapped)
    pub ra_hours: Hour,
    /// Declination in degrees, within `[-90, 90]`
    pub dec_degrees: Degree,
    /// Visual magnitude; `None` when the catalog does not provide one
    pub magnitude: Option<Magnitude>,
    /// Primary identifier with its original casing (e.g. `"M31"`, `"NGC224"`, `"Vega"`)
    pub canonical_name: String,
    /// Human-friendly name distinct from the canonical one
    pub common_name: Option<String>,
    /// Free-text classification (e.g. `"Star"`, `"Galaxy"`)
    pub object_type: Option<String>,
    /// Constellation abbreviation or name as given by the catalog
    pub constellation: Option<String>,
}

impl EquatorialRecord {
    /// Minimal record with only a name and a position.
    pub fn new(canonical_name: impl Into<String>, ra_hours: Hour, dec_degrees: Degree) -> Self {
        EquatorialRecord {
            ra_hours,
            dec_degrees,
            magnitude: None,
            canonical_name: canonical_name.into(),
            common_name: None,
            object_type: None,
            constellation: None,
        }
    }

    pub fn with_magnitude(mut self, magnitude: Magnitude) -> Self {
        self.magnitude = Some(magnitude);
        self
    }

    pub fn with_common_name(mut self, common_name: impl Into<String>) -> Self {
        self.common_name = Some(common_name.into());
        self
    }

    pub fn with_object_type(mut self, object_type: impl Into<String>) -> Self {
        self.object_type = Some(object_type.into());
        self
    }

    pub fn with_constellation(mut self, constellation: impl Into<String>) -> Self {
        self.constellation = Some(constellation.into());
        self
    }

    /// Lookup key: the lowercased canonical name.
    pub fn key(&self) -> String {
        self.canonical_name.to_lowercase()
    }

    pub fn coord(&self) -> EquatorialCoord {
        EquatorialCoord::new(self.ra_hours, self.dec_degrees)
    }

    /// Common name when known, canonical name otherwise.
    pub fn display_name(&self) -> &str {
        self.common_name.as_deref().unwrap_or(&self.canonical_name)
    }

    /// True when the record's magnitude is known and not fainter than `limit`.
    pub fn is_brighter_than(&self, limit: Magnitude) -> bool {
        self.magnitude.is_some_and(|mag| mag <= limit)
    }

    /// Case-insensitive constellation comparison; records without a constellation never match.
    pub fn in_constellation(&self, constellation: &str) -> bool {
        self.constellation
            .as_deref()
            .is_some_and(|con| con.trim().eq_ignore_ascii_case(constellation.trim()))
    }
}

impl fmt::Display for EquatorialRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical_name)?;
        if let Some(common) = &self.common_name {
            write!(f, " ({common})")?;
        }
        write!(
            f,
            "  RA {}  Dec {}",
            format_ra_hms(self.ra_hours),
            format_dec_dms(self.dec_degrees)
        )?;
        if let Some(mag) = self.magnitude {
            write!(f, "  mag {mag:.1}")?;
        }
        if let Some(kind) = &self.object_type {
            write!(f, "  [{kind}]")?;
        }
        if let Some(con) = &self.constellation {
            write!(f, "  in {con}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod record_test {
    use super::*;

    #[test]
    fn test_record_helpers() {
        let m31 = EquatorialRecord::new("M31", 0.712306, 41.269)
            .with_magnitude(3.44)
            .with_common_name("Andromeda Galaxy")
            .with_object_type("Galaxy")
            .with_constellation("And");

        assert_eq!(m31.key(), "m31");
        assert_eq!(m31.display_name(), "Andromeda Galaxy");
        assert!(m31.is_brighter_than(3.44));
        assert!(!m31.is_brighter_than(3.0));
        assert!(m31.in_constellation("AND"));
        assert!(!m31.in_constellation("Cas"));
        assert_eq!(
            m31.to_string(),
            "M31 (Andromeda Galaxy)  RA 00h42m44.3s  Dec +41°16'08\"  mag 3.4  [Galaxy]  in And"
        );
    }

    #[test]
    fn test_record_without_magnitude() {
        let rec = EquatorialRecord::new("NGC7000", 20.979, 44.33);
        assert!(!rec.is_brighter_than(30.0));
        assert_eq!(rec.display_name(), "NGC7000");
        assert!(!rec.in_constellation("Cyg"));
    }
}
