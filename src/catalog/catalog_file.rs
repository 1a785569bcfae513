//! # Catalog file discovery and loading
//!
//! A [`CatalogSources`] lists the directories searched for catalog files and, per category,
//! the candidate file names in priority order (well-known full catalogs first, the bundled
//! sample last). For each category the first existing file wins; remaining candidates are not
//! merged in.
//!
//! Loading never fails the application: a missing or unreadable file is reported with a
//! `tracing` warning and leaves its category empty.
use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use directories::BaseDirs;

use crate::catalog::dso_reader::{parse_dso_file, DsoCatalog};
use crate::catalog::star_reader::parse_star_file;
use crate::catalog::store::CatalogStore;
use crate::catalog::{CatalogFormat, EquatorialRecord};
use crate::starhop_errors::StarHopError;

/// Star catalog file names, most complete first.
pub const STAR_CATALOG_FILES: [&str; 5] = [
    "hygdata_v41.csv",
    "hygdata_v3.csv",
    "hyg_v41.csv",
    "stars.csv",
    "stars_sample.csv",
];

/// DSO catalog file names, most complete first.
pub const DSO_CATALOG_FILES: [&str; 4] = ["NGC.csv", "openngc.csv", "dso.csv", "dso_sample.csv"];

/// Where catalog files are looked for.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogSources {
    /// Directories searched in order
    pub search_dirs: Vec<Utf8PathBuf>,
    pub star_files: Vec<String>,
    pub dso_files: Vec<String>,
}

impl Default for CatalogSources {
    /// User cache directory (`<cache>/starhop/catalogs`) first, then the `data/` directory
    /// bundled with the crate.
    fn default() -> Self {
        let mut search_dirs = Vec::with_capacity(2);
        if let Some(cache) = BaseDirs::new()
            .as_ref()
            .and_then(|dirs| Utf8Path::from_path(dirs.cache_dir()).map(Utf8Path::to_path_buf))
        {
            search_dirs.push(cache.join("starhop").join("catalogs"));
        }
        search_dirs.push(bundled_data_dir());

        CatalogSources {
            search_dirs,
            star_files: STAR_CATALOG_FILES.iter().map(|f| f.to_string()).collect(),
            dso_files: DSO_CATALOG_FILES.iter().map(|f| f.to_string()).collect(),
        }
    }
}

/// The sample catalogs shipped with the crate.
pub fn bundled_data_dir() -> Utf8PathBuf {
    Utf8Path::new(env!("CARGO_MANIFEST_DIR")).join("data")
}

impl CatalogSources {
    /// Default candidate file names searched in the given directories only.
    pub fn with_search_dirs(dirs: impl IntoIterator<Item = impl Into<Utf8PathBuf>>) -> Self {
        CatalogSources {
            search_dirs: dirs.into_iter().map(Into::into).collect(),
            ..CatalogSources::default()
        }
    }

    /// First existing file among `candidates`.
    ///
    /// Candidates are tried in priority order and, for each candidate, every search directory
    /// in order: a full catalog in the bundled directory beats a sample in the cache directory.
    pub fn find_catalog_file(&self, candidates: &[String]) -> Option<Utf8PathBuf> {
        candidates.iter().find_map(|file_name| {
            self.search_dirs
                .iter()
                .map(|dir| dir.join(file_name))
                .find(|path| path.is_file())
        })
    }

    pub fn find_star_file(&self) -> Option<Utf8PathBuf> {
        self.find_catalog_file(&self.star_files)
    }

    pub fn find_dso_file(&self) -> Option<Utf8PathBuf> {
        self.find_catalog_file(&self.dso_files)
    }

    /// Read and parse the star catalog.
    ///
    /// Return
    /// ----------
    /// * The stars, or [`StarHopError::CatalogUnavailable`] when no candidate file exists.
    pub fn load_star_catalog(&self) -> Result<Vec<EquatorialRecord>, StarHopError> {
        let path = self
            .find_star_file()
            .ok_or_else(|| StarHopError::CatalogUnavailable("star catalog".into()))?;
        let stars = parse_star_file(fs::read(&path)?, format_hint(&path))?;
        tracing::info!(path = %path, stars = stars.len(), "loaded star catalog");
        Ok(stars)
    }

    /// Read and parse the DSO catalog.
    ///
    /// Return
    /// ----------
    /// * The records and aliases, or [`StarHopError::CatalogUnavailable`] when no candidate
    ///   file exists.
    pub fn load_dso_catalog(&self) -> Result<DsoCatalog, StarHopError> {
        let path = self
            .find_dso_file()
            .ok_or_else(|| StarHopError::CatalogUnavailable("DSO catalog".into()))?;
        let dsos = parse_dso_file(fs::read(&path)?, format_hint(&path))?;
        tracing::info!(
            path = %path,
            dsos = dsos.records.len(),
            aliases = dsos.aliases.len(),
            "loaded DSO catalog"
        );
        Ok(dsos)
    }

    /// Build the catalog store. A category that cannot be loaded stays empty.
    pub fn load_store(&self) -> CatalogStore {
        let stars = self.load_star_catalog().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "no stars loaded");
            Vec::new()
        });
        let dsos = self.load_dso_catalog().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "no deep-sky objects loaded");
            DsoCatalog::default()
        });
        CatalogStore::from_records(stars, dsos)
    }
}

fn format_hint(path: &Utf8Path) -> CatalogFormat {
    path.file_name()
        .map(CatalogFormat::from_file_name)
        .unwrap_or(CatalogFormat::Auto)
}
