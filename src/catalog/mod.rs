//! # Catalogs: ingestion, storage, and listing
//!
//! Facilities to **ingest** star and deep-sky-object (DSO) catalogs of heterogeneous
//! formats, **store** them as normalized [`EquatorialRecord`]s, and **list** them by
//! category. The central type is [`CatalogStore`](crate::catalog::store::CatalogStore),
//! populated once at startup and read-only afterwards.
//!
//! Modules
//! -----------------
//! * [`record`](crate::catalog::record) – The normalized [`EquatorialRecord`].
//! * [`columns`](crate::catalog::columns) – Delimiter detection and declarative column tables
//!   (`(candidate column, transform)` pairs evaluated in priority order).
//! * [`star_reader`](crate::catalog::star_reader) – HYG-style and generic star files.
//! * [`dso_reader`](crate::catalog::dso_reader) – OpenNGC-style and generic DSO files, Messier
//!   cross-references and common-name aliases.
//! * [`store`](crate::catalog::store) – Indexed, insertion-ordered record maps and the alias table.
//! * [`listing`](crate::catalog::listing) – Messier / IC / NGC / Other partition with filters
//!   and pagination.
//! * [`catalog_file`](crate::catalog::catalog_file) – Locating catalog files on disk, first
//!   match wins.
//!
//! Ingestion policy
//! -----------------
//! * A malformed row (no name, no parsable position, declination out of range) is silently
//!   skipped; a file never fails because of a single row.
//! * A missing catalog file is reported with a `tracing` warning and leaves that category
//!   empty.
//! * Records are written once; aliases (Messier numbers) are independent value copies.
//!
//! Supported formats
//! -----------------
//! * **HYG** – `id,hip,hd,…,proper,ra,dec,…,mag,…,bf,…,con` with RA in decimal hours.
//! * **OpenNGC** – `Name;Type;RA;Dec;Const;…;B-Mag;V-Mag;…;M;…;Common names` (semicolons,
//!   sexagesimal coordinates, zero-padded identifiers).
//! * **Generic** – `name,ra_hours,dec_degrees,mag[,type,constellation,common_name,messier]`.
pub mod catalog_file;
pub mod columns;
pub mod dso_reader;
pub mod listing;
pub mod record;
pub mod star_reader;
pub mod store;

pub use record::EquatorialRecord;

use crate::conversion::RaUnit;
use columns::{detect_delimiter, HeaderIndex};

/// Known layout of a catalog file, used to interpret ambiguous decimal columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    /// Detect the layout from the header row
    Auto,
    /// HYG database (stars, decimal hours)
    Hyg,
    /// OpenNGC (DSOs, semicolon separated, sexagesimal or decimal degrees)
    OpenNgc,
    /// Minimal `name, ra_hours, dec_degrees, mag` layout
    Generic,
}

impl CatalogFormat {
    /// Guess the format hint from a catalog file name.
    pub fn from_file_name(file_name: &str) -> Self {
        let lower = file_name.to_lowercase();
        if lower.starts_with("hyg") {
            CatalogFormat::Hyg
        } else if lower == "ngc.csv" || lower.contains("openngc") {
            CatalogFormat::OpenNgc
        } else {
            CatalogFormat::Auto
        }
    }

    /// Replace [`CatalogFormat::Auto`] with the layout recognised from the header.
    pub(crate) fn resolve(self, header: &HeaderIndex) -> Self {
        match self {
            CatalogFormat::Auto => {
                if ["proper", "bf", "hip"].iter().any(|c| header.contains(c)) {
                    CatalogFormat::Hyg
                } else if ["v-mag", "b-mag", "common names"]
                    .iter()
                    .any(|c| header.contains(c))
                {
                    CatalogFormat::OpenNgc
                } else {
                    CatalogFormat::Generic
                }
            }
            known => known,
        }
    }

    /// Field delimiter of a file in this format.
    ///
    /// OpenNGC is always semicolon separated, even though its `Common names` column may hold
    /// commas; every other format goes through [`detect_delimiter`].
    pub fn delimiter(self, content: impl AsRef<[u8]>) -> u8 {
        match self {
            CatalogFormat::OpenNgc => b';',
            _ => detect_delimiter(content),
        }
    }

    /// Unit of a bare decimal `ra` column in this format.
    pub(crate) fn ra_unit(self) -> RaUnit {
        match self {
            CatalogFormat::OpenNgc => RaUnit::Degrees,
            _ => RaUnit::Hours,
        }
    }
}

#[cfg(test)]
mod catalog_format_test {
    use super::*;
    use csv::StringRecord;

    #[test]
    fn test_format_from_file_name() {
        assert_eq!(CatalogFormat::from_file_name("hygdata_v41.csv"), CatalogFormat::Hyg);
        assert_eq!(CatalogFormat::from_file_name("NGC.csv"), CatalogFormat::OpenNgc);
        assert_eq!(CatalogFormat::from_file_name("dso_sample.csv"), CatalogFormat::Auto);
    }

    #[test]
    fn test_format_detection() {
        let hyg = HeaderIndex::new(&StringRecord::from(vec!["id", "hip", "proper", "ra", "dec"]));
        assert_eq!(CatalogFormat::Auto.resolve(&hyg), CatalogFormat::Hyg);

        let ngc = HeaderIndex::new(&StringRecord::from(vec!["Name", "Type", "RA", "Dec", "V-Mag"]));
        assert_eq!(CatalogFormat::Auto.resolve(&ngc), CatalogFormat::OpenNgc);

        let generic =
            HeaderIndex::new(&StringRecord::from(vec!["name", "ra_hours", "dec_degrees", "mag"]));
        assert_eq!(CatalogFormat::Auto.resolve(&generic), CatalogFormat::Generic);
        assert_eq!(CatalogFormat::Hyg.resolve(&generic), CatalogFormat::Hyg);
    }

    #[test]
    fn test_format_delimiter() {
        let content = "Name;Common names\nNGC1976;Great Orion Nebula,Orion Nebula";
        assert_eq!(CatalogFormat::OpenNgc.delimiter(content), b';');
        assert_eq!(CatalogFormat::Auto.delimiter(content), b',');
        assert_eq!(CatalogFormat::Auto.delimiter("Name;RA;Dec"), b';');
    }
}
