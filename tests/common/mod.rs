#![allow(dead_code)]

use std::sync::Arc;

use camino::Utf8PathBuf;
use hifitime::Epoch;
use starhop::catalog::catalog_file::CatalogSources;
use starhop::ephemeris::low_precision::LowPrecisionEphemeris;
use starhop::observer::ObserverLocation;
use starhop::StarHop;

pub fn data_dir(name: &str) -> Utf8PathBuf {
    Utf8PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

/// At the geographic north pole the altitude of any fixed position equals its declination,
/// whatever the instant.
pub fn north_pole() -> ObserverLocation {
    ObserverLocation::new(90.0, 0.0, 0.0, Some("North Pole".into())).unwrap()
}

pub fn new_year_2024() -> Epoch {
    Epoch::from_gregorian_utc_at_midnight(2024, 1, 1)
}

/// Facade over the catalogs of `tests/data/<name>`, seen from the north pole.
pub fn starhop_for(name: &str) -> StarHop {
    StarHop::new(
        north_pole(),
        &CatalogSources::with_search_dirs([data_dir(name)]),
    )
}

/// Same as [`starhop_for`] but going through [`StarHop::with_store`].
pub fn starhop_with_store(name: &str) -> StarHop {
    let store = CatalogSources::with_search_dirs([data_dir(name)]).load_store();
    StarHop::with_store(
        north_pole(),
        Arc::new(store),
        Box::new(LowPrecisionEphemeris::new()),
    )
}
