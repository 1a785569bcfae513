//! # Catalog store
//!
//! In-memory, name-indexed collection of the ingested catalogs: one map for stars, one for
//! deep-sky objects, and an alias table from lowercased common names to lowercased canonical
//! DSO keys.
//!
//! The store is filled once during startup and only read afterwards; it is shared between
//! requests behind an `Arc`. Iteration follows insertion order, which makes start-star
//! tie-breaking in the pathfinder follow catalog file order.
use std::collections::HashMap;

use ahash::RandomState;
use serde::Serialize;

use crate::catalog::dso_reader::DsoCatalog;
use crate::catalog::listing::ObjectCategory;
use crate::catalog::EquatorialRecord;

/// Records keyed by lowercased canonical name, iterable in insertion order.
#[derive(Debug, Clone, Default)]
struct OrderedRecords {
    records: Vec<EquatorialRecord>,
    index: HashMap<String, usize, RandomState>,
}

impl OrderedRecords {
    /// Insert a record; a record with the same key is replaced in place, keeping its position.
    fn insert(&mut self, record: EquatorialRecord) {
        let key = record.key();
        match self.index.get(&key) {
            Some(&pos) => self.records[pos] = record,
            None => {
                self.index.insert(key, self.records.len());
                self.records.push(record);
            }
        }
    }

    fn get(&self, key: &str) -> Option<&EquatorialRecord> {
        self.index.get(key).map(|&pos| &self.records[pos])
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}

/// Number of records per category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub stars: usize,
    pub messier: usize,
    pub ngc: usize,
    pub ic: usize,
    pub other: usize,
    pub aliases: usize,
}

/// Indexed star and DSO catalogs plus the alias table.
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    stars: OrderedRecords,
    dsos: OrderedRecords,
    aliases: HashMap<String, String, RandomState>,
}

fn lookup_key(name: &str) -> String {
    name.trim().to_lowercase()
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from already parsed catalogs.
    pub fn from_records(
        stars: impl IntoIterator<Item = EquatorialRecord>,
        dsos: DsoCatalog,
    ) -> Self {
        let mut store = CatalogStore::new();
        for star in stars {
            store.insert_star(star);
        }
        store.add_dso_catalog(dsos);
        store
    }

    pub fn insert_star(&mut self, record: EquatorialRecord) {
        self.stars.insert(record);
    }

    pub fn insert_dso(&mut self, record: EquatorialRecord) {
        self.dsos.insert(record);
    }

    /// Map a common name to a canonical DSO key, both compared lowercased.
    pub fn register_alias(&mut self, common_name: &str, canonical_key: &str) {
        self.aliases
            .insert(lookup_key(common_name), lookup_key(canonical_key));
    }

    /// Insert every record and alias of a parsed DSO file.
    pub fn add_dso_catalog(&mut self, catalog: DsoCatalog) {
        for record in catalog.records {
            self.insert_dso(record);
        }
        for (alias, key) in catalog.aliases {
            self.register_alias(&alias, &key);
        }
    }

    /// Case-insensitive exact lookup in the star catalog.
    pub fn lookup_star(&self, name: &str) -> Option<&EquatorialRecord> {
        self.stars.get(&lookup_key(name))
    }

    /// Case-insensitive exact lookup in the DSO catalog.
    pub fn lookup_dso(&self, name: &str) -> Option<&EquatorialRecord> {
        self.dsos.get(&lookup_key(name))
    }

    /// Canonical DSO key registered for a common name.
    pub fn resolve_alias(&self, common_name: &str) -> Option<&str> {
        self.aliases
            .get(&lookup_key(common_name))
            .map(String::as_str)
    }

    /// Stars in insertion order.
    pub fn stars(&self) -> impl Iterator<Item = &EquatorialRecord> {
        self.stars.records.iter()
    }

    /// Deep-sky objects in insertion order, Messier copies included.
    pub fn dsos(&self) -> impl Iterator<Item = &EquatorialRecord> {
        self.dsos.records.iter()
    }

    pub fn star_count(&self) -> usize {
        self.stars.len()
    }

    pub fn dso_count(&self) -> usize {
        self.dsos.len()
    }

    pub fn alias_count(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.len() == 0 && self.dsos.len() == 0
    }

    /// Count the records of each listing category.
    pub fn stats(&self) -> CatalogStats {
        let mut stats = CatalogStats {
            stars: self.star_count(),
            aliases: self.alias_count(),
            ..CatalogStats::default()
        };
        for key in self.dsos.index.keys() {
            match ObjectCategory::of_dso_key(key) {
                ObjectCategory::Messier => stats.messier += 1,
                ObjectCategory::Ic => stats.ic += 1,
                ObjectCategory::Ngc => stats.ngc += 1,
                ObjectCategory::Other | ObjectCategory::Stars => stats.other += 1,
            }
        }
        stats
    }
}

#[cfg(test)]
mod store_test {
    use super::*;

    fn sample_store() -> CatalogStore {
        let stars = vec![
            EquatorialRecord::new("Vega", 18.615649, 38.783692).with_magnitude(0.03),
            EquatorialRecord::new("Deneb", 20.690532, 45.280339).with_magnitude(1.25),
        ];
        let dsos = DsoCatalog {
            records: vec![
                EquatorialRecord::new("NGC224", 0.712319, 41.269056).with_magnitude(3.44),
                EquatorialRecord::new("M31", 0.712319, 41.269056).with_magnitude(3.44),
                EquatorialRecord::new("IC434", 5.683578, -2.454).with_common_name("Horsehead"),
                EquatorialRecord::new("Barnard 33", 5.683578, -2.454),
            ],
            aliases: vec![("andromeda galaxy".into(), "ngc224".into())],
        };
        CatalogStore::from_records(stars, dsos)
    }

    #[test]
    fn test_case_insensitive_lookup() {
        let store = sample_store();
        assert_eq!(store.lookup_star("VEGA").unwrap().canonical_name, "Vega");
        assert_eq!(store.lookup_star("  deneb ").unwrap().canonical_name, "Deneb");
        assert!(store.lookup_star("Veg").is_none());
        assert_eq!(store.lookup_dso("m31").unwrap().canonical_name, "M31");
        assert!(store.lookup_dso("Vega").is_none());
    }

    #[test]
    fn test_alias_resolution() {
        let store = sample_store();
        assert_eq!(store.resolve_alias("Andromeda Galaxy"), Some("ngc224"));
        assert_eq!(store.resolve_alias("andromeda"), None);
        let target = store.resolve_alias("ANDROMEDA GALAXY").unwrap();
        assert_eq!(store.lookup_dso(target).unwrap().canonical_name, "NGC224");
    }

    #[test]
    fn test_messier_copy_is_independent() {
        let mut store = sample_store();
        let ngc = store.lookup_dso("ngc224").unwrap().clone();
        let m31 = store.lookup_dso("m31").unwrap().clone();
        assert_eq!(ngc.coord(), m31.coord());

        store.insert_dso(EquatorialRecord::new("M31", 1.0, 1.0));
        assert_eq!(store.lookup_dso("ngc224"), Some(&ngc));
        assert_eq!(store.lookup_dso("m31").unwrap().ra_hours, 1.0);
    }

    #[test]
    fn test_insertion_order_and_replace() {
        let mut store = sample_store();
        store.insert_star(EquatorialRecord::new("VEGA", 18.6, 38.8).with_magnitude(0.0));
        let names: Vec<&str> = store.stars().map(|s| s.canonical_name.as_str()).collect();
        assert_eq!(names, vec!["VEGA", "Deneb"]);
        assert_eq!(store.star_count(), 2);
    }

    #[test]
    fn test_stats() {
        let store = sample_store();
        assert_eq!(
            store.stats(),
            CatalogStats {
                stars: 2,
                messier: 1,
                ngc: 1,
                ic: 1,
                other: 1,
                aliases: 1,
            }
        );
        assert!(!store.is_empty());
        assert!(CatalogStore::new().is_empty());
    }
}
