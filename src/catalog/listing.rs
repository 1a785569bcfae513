//! # Category listing
//!
//! Groups the deep-sky objects of a [`CatalogStore`] into Messier, IC, NGC and Other by the
//! pattern of their canonical name, filters them by magnitude and constellation, and pages
//! through each group.
//!
//! Ordering
//! -----------------
//! * Messier / IC / NGC – by catalog number ascending (`M2` before `M13`).
//! * Other – lexicographically by lowercased canonical name.
//! * Stars – brightest first, unknown magnitudes last.
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use itertools::Itertools;
use once_cell::sync::Lazy;
use ordered_float::OrderedFloat;
use regex::Regex;
use serde::Serialize;

use crate::catalog::store::CatalogStore;
use crate::catalog::EquatorialRecord;
use crate::constants::Magnitude;
use crate::starhop_errors::StarHopError;

static MESSIER_KEY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^m(\d+)$").expect("valid regex"));
static IC_KEY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^ic(\d+)$").expect("valid regex"));
static NGC_KEY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^ngc(\d+)$").expect("valid regex"));

fn is_messier_key(key: &str) -> bool {
    MESSIER_KEY.is_match(key)
}

fn is_ic_key(key: &str) -> bool {
    IC_KEY.is_match(key)
}

fn is_ngc_key(key: &str) -> bool {
    NGC_KEY.is_match(key)
}

/// Listing category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ObjectCategory {
    Messier,
    Ic,
    Ngc,
    Other,
    Stars,
}

impl ObjectCategory {
    /// The deep-sky groups listed when no category is requested.
    pub const DEEP_SKY: [ObjectCategory; 4] = [
        ObjectCategory::Messier,
        ObjectCategory::Ic,
        ObjectCategory::Ngc,
        ObjectCategory::Other,
    ];

    fn pattern(&self) -> Option<&'static Regex> {
        match self {
            ObjectCategory::Messier => Some(&*MESSIER_KEY),
            ObjectCategory::Ic => Some(&*IC_KEY),
            ObjectCategory::Ngc => Some(&*NGC_KEY),
            ObjectCategory::Other | ObjectCategory::Stars => None,
        }
    }

    /// Category of a lowercased DSO key.
    pub fn of_dso_key(key: &str) -> Self {
        if is_messier_key(key) {
            ObjectCategory::Messier
        } else if is_ic_key(key) {
            ObjectCategory::Ic
        } else if is_ngc_key(key) {
            ObjectCategory::Ngc
        } else {
            ObjectCategory::Other
        }
    }

    /// Sort key of the catalog number of a key matching this category's pattern.
    ///
    /// Digits are compared by length then lexically, so numbers of any size keep their
    /// numeric order.
    fn number(&self, key: &str) -> Option<(usize, String)> {
        let digits = self.pattern()?.captures(key)?.get(1)?.as_str();
        let digits = digits.trim_start_matches('0');
        Some((digits.len(), digits.to_string()))
    }
}

impl fmt::Display for ObjectCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ObjectCategory::Messier => "messier",
            ObjectCategory::Ic => "ic",
            ObjectCategory::Ngc => "ngc",
            ObjectCategory::Other => "other",
            ObjectCategory::Stars => "stars",
        };
        f.write_str(name)
    }
}

impl FromStr for ObjectCategory {
    type Err = StarHopError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "messier" | "m" => Ok(ObjectCategory::Messier),
            "ic" => Ok(ObjectCategory::Ic),
            "ngc" => Ok(ObjectCategory::Ngc),
            "other" => Ok(ObjectCategory::Other),
            "stars" | "star" => Ok(ObjectCategory::Stars),
            _ => Err(StarHopError::UnknownCategory(s.to_string())),
        }
    }
}

/// Filters and pagination of a listing request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingQuery {
    /// Single category to list, all deep-sky groups when `None`
    pub category: Option<ObjectCategory>,
    /// Maximum number of objects per category, unbounded when `None`
    pub limit: Option<usize>,
    /// Objects skipped at the start of each category
    pub offset: usize,
    /// Keep objects with a known magnitude `<=` this value
    pub min_magnitude: Option<Magnitude>,
    /// Keep objects of this constellation (case-insensitive)
    pub constellation: Option<String>,
}

impl ListingQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: ObjectCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    pub fn min_magnitude(mut self, magnitude: Magnitude) -> Self {
        self.min_magnitude = Some(magnitude);
        self
    }

    pub fn constellation(mut self, constellation: impl Into<String>) -> Self {
        self.constellation = Some(constellation.into());
        self
    }

    fn accepts(&self, record: &EquatorialRecord) -> bool {
        let magnitude_ok = self
            .min_magnitude
            .map_or(true, |limit| record.is_brighter_than(limit));
        let constellation_ok = self
            .constellation
            .as_deref()
            .map_or(true, |con| record.in_constellation(con));
        magnitude_ok && constellation_ok
    }

    fn paginate<'a>(
        &self,
        records: impl Iterator<Item = &'a EquatorialRecord>,
    ) -> Vec<EquatorialRecord> {
        records
            .skip(self.offset)
            .take(self.limit.unwrap_or(usize::MAX))
            .cloned()
            .collect()
    }
}

/// One page of a category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryPage {
    pub category: ObjectCategory,
    /// Number of objects matching the filters, before pagination
    pub total: usize,
    pub offset: usize,
    pub objects: Vec<EquatorialRecord>,
}

/// Result of [`CatalogStore::list_objects`], one page per listed category.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Listing {
    pub pages: Vec<CategoryPage>,
}

impl Listing {
    pub fn page(&self, category: ObjectCategory) -> Option<&CategoryPage> {
        self.pages.iter().find(|page| page.category == category)
    }
}

fn compare_magnitude(a: &EquatorialRecord, b: &EquatorialRecord) -> Ordering {
    match (a.magnitude, b.magnitude) {
        (Some(x), Some(y)) => OrderedFloat(x).cmp(&OrderedFloat(y)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

impl CatalogStore {
    /// List catalog objects grouped by category.
    ///
    /// Arguments
    /// -----------------
    /// * `query` – Category, pagination and filters, see [`ListingQuery`].
    ///
    /// Return
    /// ----------
    /// * A [`Listing`] with one page for the requested category, or one page per deep-sky
    ///   group (Messier, IC, NGC, Other) when no category is given. Filters apply before
    ///   pagination; `offset` and `limit` apply to each page separately.
    pub fn list_objects(&self, query: &ListingQuery) -> Listing {
        let categories = match query.category {
            Some(category) => vec![category],
            None => ObjectCategory::DEEP_SKY.to_vec(),
        };

        let pages = categories
            .into_iter()
            .map(|category| self.category_page(category, query))
            .collect();
        Listing { pages }
    }

    fn category_page(&self, category: ObjectCategory, query: &ListingQuery) -> CategoryPage {
        let matching: Vec<&EquatorialRecord> = match category {
            ObjectCategory::Stars => self
                .stars()
                .filter(|r| query.accepts(r))
                .sorted_by(|a, b| compare_magnitude(a, b).then_with(|| a.key().cmp(&b.key())))
                .collect(),
            ObjectCategory::Other => self
                .dsos()
                .filter(|r| ObjectCategory::of_dso_key(&r.key()) == ObjectCategory::Other)
                .filter(|r| query.accepts(r))
                .sorted_by_cached_key(|r| r.key())
                .collect(),
            numbered => self
                .dsos()
                .filter_map(|r| numbered.number(&r.key()).map(|n| (n, r)))
                .filter(|(_, r)| query.accepts(r))
                .sorted_by(|(a, _), (b, _)| a.cmp(b))
                .map(|(_, r)| r)
                .collect(),
        };

        CategoryPage {
            category,
            total: matching.len(),
            offset: query.offset,
            objects: query.paginate(matching.into_iter()),
        }
    }
}

#[cfg(test)]
mod listing_test {
    use super::*;
    use crate::catalog::dso_reader::DsoCatalog;

    fn dso(name: &str, mag: Option<f64>, con: &str) -> EquatorialRecord {
        let record = EquatorialRecord::new(name, 1.0, 1.0).with_constellation(con);
        match mag {
            Some(m) => record.with_magnitude(m),
            None => record,
        }
    }

    fn sample_store() -> CatalogStore {
        let dsos = DsoCatalog {
            records: vec![
                dso("M31", Some(3.4), "And"),
                dso("M13", Some(5.8), "Her"),
                dso("M2", Some(6.5), "Aqr"),
                dso("NGC7000", Some(4.0), "Cyg"),
                dso("NGC224", Some(3.4), "And"),
                dso("NGC869", None, "Per"),
                dso("IC434", Some(6.8), "Ori"),
                dso("IC10", Some(10.4), "Cas"),
                dso("Mel 111", Some(1.8), "Com"),
                dso("Barnard 33", None, "Ori"),
                dso("NGC224A", Some(12.0), "And"),
            ],
            aliases: vec![],
        };
        let stars = vec![
            EquatorialRecord::new("Deneb", 20.69, 45.28).with_magnitude(1.25),
            EquatorialRecord::new("HIP 1", 0.0, 1.0),
            EquatorialRecord::new("Vega", 18.6, 38.8).with_magnitude(0.03),
        ];
        CatalogStore::from_records(stars, dsos)
    }

    fn names(page: &CategoryPage) -> Vec<&str> {
        page.objects
            .iter()
            .map(|r| r.canonical_name.as_str())
            .collect()
    }

    #[test]
    fn test_partition_and_ordering() {
        let listing = sample_store().list_objects(&ListingQuery::new());
        assert_eq!(listing.pages.len(), 4);
        assert_eq!(
            names(listing.page(ObjectCategory::Messier).unwrap()),
            vec!["M2", "M13", "M31"]
        );
        assert_eq!(
            names(listing.page(ObjectCategory::Ic).unwrap()),
            vec!["IC10", "IC434"]
        );
        assert_eq!(
            names(listing.page(ObjectCategory::Ngc).unwrap()),
            vec!["NGC224", "NGC869", "NGC7000"]
        );
        assert_eq!(
            names(listing.page(ObjectCategory::Other).unwrap()),
            vec!["Barnard 33", "Mel 111", "NGC224A"]
        );
        assert!(listing.page(ObjectCategory::Stars).is_none());
    }

    #[test]
    fn test_oversized_catalog_number() {
        let dsos = DsoCatalog {
            records: vec![
                dso("NGC99999999999999999999", None, "Peg"),
                dso("NGC7000", Some(4.0), "Cyg"),
                dso("NGC10", None, "Scl"),
            ],
            aliases: vec![],
        };
        let store = CatalogStore::from_records(Vec::<EquatorialRecord>::new(), dsos);
        let listing = store.list_objects(&ListingQuery::new().category(ObjectCategory::Ngc));
        let page = listing.page(ObjectCategory::Ngc).unwrap();
        assert_eq!(page.total, 3);
        assert_eq!(names(page), vec!["NGC10", "NGC7000", "NGC99999999999999999999"]);
    }

    #[test]
    fn test_magnitude_filter_is_inclusive() {
        let query = ListingQuery::new()
            .category(ObjectCategory::Messier)
            .min_magnitude(5.8);
        let listing = sample_store().list_objects(&query);
        let page = listing.page(ObjectCategory::Messier).unwrap();
        assert_eq!(names(page), vec!["M13", "M31"]);
        assert_eq!(page.total, 2);

        // unknown magnitudes never pass a magnitude filter
        let query = ListingQuery::new()
            .category(ObjectCategory::Ngc)
            .min_magnitude(20.0);
        let listing = sample_store().list_objects(&query);
        assert_eq!(
            names(listing.page(ObjectCategory::Ngc).unwrap()),
            vec!["NGC224", "NGC7000"]
        );
    }

    #[test]
    fn test_constellation_filter() {
        let query = ListingQuery::new().constellation("and");
        let listing = sample_store().list_objects(&query);
        assert_eq!(names(&listing.pages[0]), vec!["M31"]);
        assert_eq!(names(&listing.pages[2]), vec!["NGC224"]);
        assert_eq!(names(&listing.pages[3]), vec!["NGC224A"]);
        assert!(listing.pages[1].objects.is_empty());
    }

    #[test]
    fn test_pagination() {
        let store = sample_store();
        let query = ListingQuery::new()
            .category(ObjectCategory::Ngc)
            .offset(1)
            .limit(1);
        let listing = store.list_objects(&query);
        let page = &listing.pages[0];
        assert_eq!(names(page), vec!["NGC869"]);
        assert_eq!(page.total, 3);
        assert_eq!(page.offset, 1);

        let query = ListingQuery::new().category(ObjectCategory::Ngc).offset(10);
        assert!(store.list_objects(&query).pages[0].objects.is_empty());
    }

    #[test]
    fn test_star_listing() {
        let query = ListingQuery::new().category(ObjectCategory::Stars);
        let listing = sample_store().list_objects(&query);
        assert_eq!(names(&listing.pages[0]), vec!["Vega", "Deneb", "HIP 1"]);
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!("Messier".parse::<ObjectCategory>(), Ok(ObjectCategory::Messier));
        assert_eq!(" NGC ".parse::<ObjectCategory>(), Ok(ObjectCategory::Ngc));
        assert_eq!("stars".parse::<ObjectCategory>(), Ok(ObjectCategory::Stars));
        assert_eq!(
            "planets".parse::<ObjectCategory>(),
            Err(StarHopError::UnknownCategory("planets".to_string()))
        );
        assert_eq!(ObjectCategory::Ic.to_string(), "ic");
    }
}
