//! # Deep-sky object catalog reader
//!
//! Reads OpenNGC-style files (`Name;Type;RA;Dec;Const;…;B-Mag;V-Mag;…;M;…;Common names`)
//! and generic comma-separated DSO tables into [`EquatorialRecord`]s.
//!
//! Besides the records themselves the reader produces the alias pairs that the
//! [`CatalogStore`](crate::catalog::store::CatalogStore) registers:
//!
//! * a row carrying a Messier cross-reference (`M` column) is emitted twice, once under its
//!   normalized NGC/IC name and once as an independent copy named `M{n}`;
//! * every comma-separated common name becomes an alias pointing to the canonical key.
//!
//! Rows typed `Dup` (duplicate entry) or `NonEx` (non-existent object) are left out.
use csv::StringRecord;

use crate::catalog::columns::{
    csv_reader, read_coordinates, resolve_field, HeaderIndex, ParseRowError, COMMON_NAMES,
    CONSTELLATION, DSO_MAGNITUDE, DSO_NAME, MESSIER, OBJECT_TYPE,
};
use crate::catalog::{CatalogFormat, EquatorialRecord};
use crate::conversion::{normalize_catalog_name, RaUnit};
use crate::starhop_errors::StarHopError;

/// Records and aliases read from one DSO file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DsoCatalog {
    /// Records in file order, Messier copies right after their source row
    pub records: Vec<EquatorialRecord>,
    /// `(lowercased common name, lowercased canonical key)` pairs
    pub aliases: Vec<(String, String)>,
}

/// One parsed row before it is split into records and aliases.
#[derive(Debug, PartialEq)]
struct DsoRow {
    record: EquatorialRecord,
    messier: Option<u32>,
    common_names: Vec<String>,
}

/// Parse the content of a DSO catalog file.
///
/// Arguments
/// -----------------
/// * `content` – Whole file content; semicolon or comma separated. Rows that are not valid
///   UTF-8 are skipped.
/// * `format` – Layout hint, [`CatalogFormat::Auto`] to detect it from the header.
///
/// Return
/// ----------
/// * A [`DsoCatalog`] with the records and alias pairs. Malformed and excluded rows are
///   skipped; only an unreadable header row is an error.
pub fn parse_dso_file(
    content: impl AsRef<[u8]>,
    format: CatalogFormat,
) -> Result<DsoCatalog, StarHopError> {
    let content = content.as_ref();
    let mut reader = csv_reader(content, format.delimiter(content));
    let header = HeaderIndex::new(reader.headers()?);
    let format = format.resolve(&header);
    let ra_unit = format.ra_unit();

    let mut catalog = DsoCatalog::default();
    let mut skipped = 0usize;
    for row in reader.records() {
        let parsed = row
            .map_err(StarHopError::from)
            .and_then(|record| dso_from_row(&header, &record, ra_unit).map_err(Into::into));
        match parsed {
            Ok(dso) => catalog.push_row(dso),
            Err(_) => skipped += 1,
        }
    }

    tracing::debug!(
        loaded = catalog.records.len(),
        aliases = catalog.aliases.len(),
        skipped,
        ?format,
        "parsed DSO catalog"
    );
    Ok(catalog)
}

impl DsoCatalog {
    fn push_row(&mut self, row: DsoRow) {
        let DsoRow {
            record,
            messier,
            common_names,
        } = row;
        let key = record.key();

        for name in common_names {
            self.aliases.push((name.to_lowercase(), key.clone()));
        }

        let messier_copy = messier
            .map(|n| format!("M{n}"))
            .filter(|m_name| m_name.to_lowercase() != key)
            .map(|m_name| EquatorialRecord {
                canonical_name: m_name,
                ..record.clone()
            });

        self.records.push(record);
        self.records.extend(messier_copy);
    }
}

fn dso_from_row(
    header: &HeaderIndex,
    record: &StringRecord,
    ra_unit: RaUnit,
) -> Result<DsoRow, ParseRowError> {
    let raw_name = resolve_field(DSO_NAME, header, record).ok_or(ParseRowError::MissingName)?;
    let raw_type = resolve_field(OBJECT_TYPE, header, record);
    if let Some(code) = raw_type.as_deref() {
        if is_excluded_type(code) {
            return Err(ParseRowError::Excluded(code.to_string()));
        }
    }

    let (ra_hours, dec_degrees) = read_coordinates(header, record, ra_unit)?;

    let common_names = resolve_field(COMMON_NAMES, header, record)
        .map(|names| split_common_names(&names))
        .unwrap_or_default();

    let dso = EquatorialRecord {
        ra_hours,
        dec_degrees,
        magnitude: resolve_field(DSO_MAGNITUDE, header, record),
        canonical_name: normalize_catalog_name(&raw_name),
        common_name: common_names.first().cloned(),
        object_type: raw_type.map(|code| expand_type_code(&code)),
        constellation: resolve_field(CONSTELLATION, header, record),
    };

    Ok(DsoRow {
        record: dso,
        messier: resolve_field(MESSIER, header, record),
        common_names,
    })
}

fn is_excluded_type(code: &str) -> bool {
    code.eq_ignore_ascii_case("dup") || code.eq_ignore_ascii_case("nonex")
}

fn split_common_names(names: &str) -> Vec<String> {
    names
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Expand an OpenNGC object type code into a readable type.
///
/// Unknown codes, and free-text types from generic catalogs, are returned unchanged.
pub fn expand_type_code(code: &str) -> String {
    let readable = match code {
        "*" => "Star",
        "**" => "Double Star",
        "*Ass" => "Association of Stars",
        "OCl" => "Open Cluster",
        "GCl" => "Globular Cluster",
        "Cl+N" => "Star Cluster + Nebula",
        "G" => "Galaxy",
        "GPair" => "Galaxy Pair",
        "GTrpl" => "Galaxy Triplet",
        "GGroup" => "Group of Galaxies",
        "PN" => "Planetary Nebula",
        "HII" => "HII Ionized Region",
        "DrkN" => "Dark Nebula",
        "EmN" => "Emission Nebula",
        "Neb" => "Nebula",
        "RfN" => "Reflection Nebula",
        "SNR" => "Supernova Remnant",
        "Nova" => "Nova Star",
        "Other" => "Other",
        other => other,
    };
    readable.to_string()
}

#[cfg(test)]
mod dso_reader_test {
    use super::*;

    const OPENNGC_SAMPLE: &str = "\
Name;Type;RA;Dec;Const;MajAx;MinAx;PosAng;B-Mag;V-Mag;J-Mag;H-Mag;K-Mag;SurfBr;Hubble;Pax;Pm-RA;Pm-Dec;RadVel;Redshift;Cstar U-Mag;Cstar B-Mag;Cstar V-Mag;M;NGC;IC;Cstar Names;Identifiers;Common names;NED notes;OpenNGC notes
NGC0224;G;00:42:44.35;+41:16:08.6;And;177.83;69.66;35;4.36;3.44;;;;;Sb;;;;;;;;;031;;;;;Andromeda Galaxy;;
NGC0598;G;01:33:50.89;+30:39:36.8;Tri;;;;6.27;5.72;;;;;Sc;;;;;;;;;033;;;;;Triangulum Galaxy;;
NGC1976;Cl+N;05:35:16.48;-05:23:22.8;Ori;;;;;4.0;;;;;;;;;;;;;;042;;;;;Great Orion Nebula,Orion Nebula;;
IC0434;EmN;05:41:00.88;-02:27:13.6;Ori;;;;;;;;;;;;;;;;;;;;;;;;Horsehead Nebula;;
NGC0001;Dup;00:07:15.84;+27:42:29.1;Peg;;;;13.69;12.93;;;;;;;;;;;;;;;;;;;;;
NGC9999;NonEx;00:00:00.00;+00:00:00.0;Peg;;;;;;;;;;;;;;;;;;;;;;;;;;
NGC7000;HII;20:59:17.14;+44:31:43.6;Cyg;;;;;;;;;;;;;;;;;;;;;;;;North America Nebula;;
;G;01:00:00.00;+10:00:00.0;Psc;;;;;;;;;;;;;;;;;;;;;;;;;;
NGC0002;G;00:07:17.10;;Peg;;;;;14.2;;;;;;;;;;;;;;;;;;;;;
";

    #[test]
    fn test_parse_openngc_sample() {
        let catalog = parse_dso_file(OPENNGC_SAMPLE, CatalogFormat::OpenNgc).unwrap();
        let names: Vec<&str> = catalog
            .records
            .iter()
            .map(|r| r.canonical_name.as_str())
            .collect();
        assert_eq!(
            names,
            vec!["NGC224", "M31", "NGC598", "M33", "NGC1976", "M42", "IC434", "NGC7000"]
        );

        let ngc224 = &catalog.records[0];
        let m31 = &catalog.records[1];
        assert_eq!(ngc224.magnitude, Some(3.44));
        assert_eq!(ngc224.object_type.as_deref(), Some("Galaxy"));
        assert_eq!(ngc224.constellation.as_deref(), Some("And"));
        assert_eq!(ngc224.common_name.as_deref(), Some("Andromeda Galaxy"));
        assert!((ngc224.ra_hours - 0.712319).abs() < 1e-5);
        assert_eq!(m31.ra_hours, ngc224.ra_hours);
        assert_eq!(m31.dec_degrees, ngc224.dec_degrees);
        assert_eq!(m31.magnitude, ngc224.magnitude);

        assert_eq!(
            catalog.records[4].object_type.as_deref(),
            Some("Star Cluster + Nebula")
        );
        assert_eq!(catalog.records[6].object_type.as_deref(), Some("Emission Nebula"));
    }

    #[test]
    fn test_openngc_aliases() {
        let catalog = parse_dso_file(OPENNGC_SAMPLE, CatalogFormat::OpenNgc).unwrap();
        assert_eq!(
            catalog.aliases,
            vec![
                ("andromeda galaxy".to_string(), "ngc224".to_string()),
                ("triangulum galaxy".to_string(), "ngc598".to_string()),
                ("great orion nebula".to_string(), "ngc1976".to_string()),
                ("orion nebula".to_string(), "ngc1976".to_string()),
                ("horsehead nebula".to_string(), "ic434".to_string()),
                ("north america nebula".to_string(), "ngc7000".to_string()),
            ]
        );
    }

    #[test]
    fn test_openngc_detected_from_header() {
        let content = "Name;Type;RA;Dec;Const;V-Mag;M\nNGC6205;GCl;16:41:41.63;+36:27:40.7;Her;5.8;013\n";
        let catalog = parse_dso_file(content, CatalogFormat::Auto).unwrap();
        assert_eq!(catalog.records.len(), 2);
        assert_eq!(catalog.records[1].canonical_name, "M13");
        assert_eq!(catalog.records[1].object_type.as_deref(), Some("Globular Cluster"));
        assert!((catalog.records[0].ra_hours - 16.694898).abs() < 1e-5);
    }

    #[test]
    fn test_generic_dso_file() {
        let content = "\
name,ra_hours,dec_degrees,magnitude,type,constellation,common_name,messier
M13,16.6947,36.4613,5.8,Globular Cluster,Her,Hercules Cluster,13
NGC0869,2.3217,57.1339,3.7,Open Cluster,Per,Double Cluster,
Broken,,,,,,,
";
        let catalog = parse_dso_file(content, CatalogFormat::Auto).unwrap();
        let names: Vec<&str> = catalog
            .records
            .iter()
            .map(|r| r.canonical_name.as_str())
            .collect();
        // no duplicate copy when the row is already named after its Messier number
        assert_eq!(names, vec!["M13", "NGC869"]);
        assert_eq!(catalog.records[0].ra_hours, 16.6947);
        assert_eq!(catalog.records[0].object_type.as_deref(), Some("Globular Cluster"));
        assert_eq!(
            catalog.aliases,
            vec![
                ("hercules cluster".to_string(), "m13".to_string()),
                ("double cluster".to_string(), "ngc869".to_string()),
            ]
        );
    }

    #[test]
    fn test_split_common_names() {
        assert_eq!(
            split_common_names(" Pleiades , Seven Sisters,,"),
            vec!["Pleiades".to_string(), "Seven Sisters".to_string()]
        );
        assert!(split_common_names(" ").is_empty());
    }

    #[test]
    fn test_expand_type_code() {
        assert_eq!(expand_type_code("GCl"), "Globular Cluster");
        assert_eq!(expand_type_code("PN"), "Planetary Nebula");
        assert_eq!(expand_type_code("Galaxy"), "Galaxy");
        assert!(is_excluded_type("Dup"));
        assert!(is_excluded_type("NONEX"));
        assert!(!is_excluded_type("G"));
    }
}
