//! # StarHop: observer, catalogs and ephemeris in one place
//!
//! [`StarHop`] is the entry point of the crate. It wires together:
//!
//! 1. the **observer** ([`ObserverLocation`]) every altitude is computed for;
//! 2. the **catalog store** ([`CatalogStore`]), loaded once and shared read-only behind an
//!    [`Arc`];
//! 3. the **ephemeris** ([`Ephemeris`]) positioning solar-system bodies.
//!
//! All operations take the instant explicitly and never mutate the facade, so a single
//! `StarHop` can serve concurrent requests.
//!
//! ## Typical usage
//!
//! ```rust,no_run
//! use hifitime::Epoch;
//! use starhop::catalog::catalog_file::CatalogSources;
//! use starhop::observer::ObserverLocation;
//! use starhop::pathfinder::HopParams;
//! use starhop::starhop::StarHop;
//!
//! let observer = ObserverLocation::new(48.85, 2.35, 35.0, Some("Paris".into())).unwrap();
//! let starhop = StarHop::new(observer, &CatalogSources::default());
//!
//! let now = Epoch::from_gregorian_utc(2024, 10, 1, 21, 0, 0, 0);
//! let path = starhop.find_hopping_path("M31", &HopParams::with_fov(5.0).unwrap(), now);
//! println!("{path}");
//! ```
//!
//! ## See also
//! ------------
//! * [`ObjectResolver`] – Name resolution order.
//! * [`Pathfinder`] – The star-hopping search.
//! * [`CatalogSources`] – Where catalog files are looked for.
use std::fmt;
use std::sync::Arc;

use hifitime::Epoch;

use crate::catalog::catalog_file::CatalogSources;
use crate::catalog::listing::{Listing, ListingQuery};
use crate::catalog::store::CatalogStore;
use crate::catalog::EquatorialRecord;
use crate::coordinates::{CompassPoint, HorizontalCoord};
use crate::ephemeris::low_precision::LowPrecisionEphemeris;
use crate::ephemeris::{rise_set_transit_at, Ephemeris, RiseSetTransit};
use crate::observer::ObserverLocation;
use crate::pathfinder::{HopParams, PathResult, Pathfinder};
use crate::resolver::{ObjectResolver, ObjectSource, ResolvedObject};
use crate::starhop_errors::StarHopError;

/// Where and when an object can be seen.
#[derive(Debug, Clone, PartialEq)]
pub struct Visibility {
    pub object: EquatorialRecord,
    pub horizontal: HorizontalCoord,
    /// Compass direction of the azimuth
    pub direction: CompassPoint,
    pub above_horizon: bool,
    /// Rise, transit and set during the UTC day of the request
    pub rise_set_transit: RiseSetTransit,
    /// Illuminated fraction, solar-system bodies only
    pub illumination: Option<f64>,
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: altitude {:.1}°, azimuth {:.1}° ({})",
            self.object.display_name(),
            self.horizontal.altitude,
            self.horizontal.azimuth,
            self.direction
        )?;
        if !self.above_horizon {
            f.write_str(", below the horizon")?;
        }
        let rst = &self.rise_set_transit;
        if rst.circumpolar {
            f.write_str(", circumpolar")?;
        } else if rst.never_rises {
            f.write_str(", never rises")?;
        } else if let (Some(rise), Some(set)) = (rst.rise, rst.set) {
            write!(f, ", rises {rise}, sets {set}")?;
        }
        if let Some(fraction) = self.illumination {
            write!(f, ", {:.0}% illuminated", fraction * 100.0)?;
        }
        Ok(())
    }
}

pub struct StarHop {
    observer: ObserverLocation,
    store: Arc<CatalogStore>,
    ephemeris: Box<dyn Ephemeris>,
}

impl fmt::Debug for StarHop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StarHop")
            .field("observer", &self.observer)
            .field("stats", &self.store.stats())
            .finish_non_exhaustive()
    }
}

impl StarHop {
    /// Load the catalogs found by `sources` and use the bundled low-precision ephemeris.
    ///
    /// Missing catalog files never fail construction: the category stays empty and a warning
    /// is logged.
    ///
    /// Arguments
    /// -----------------
    /// * `observer` – Observer location used for every altitude.
    /// * `sources` – Catalog search directories and file names.
    pub fn new(observer: ObserverLocation, sources: &CatalogSources) -> Self {
        let store = sources.load_store();
        tracing::info!(stats = ?store.stats(), "catalog store ready");
        Self::with_store(
            observer,
            Arc::new(store),
            Box::new(LowPrecisionEphemeris::new()),
        )
    }

    /// Assemble a facade from an existing store and ephemeris.
    pub fn with_store(
        observer: ObserverLocation,
        store: Arc<CatalogStore>,
        ephemeris: Box<dyn Ephemeris>,
    ) -> Self {
        StarHop {
            observer,
            store,
            ephemeris,
        }
    }

    pub fn observer(&self) -> &ObserverLocation {
        &self.observer
    }

    pub fn store(&self) -> &Arc<CatalogStore> {
        &self.store
    }

    pub fn ephemeris(&self) -> &dyn Ephemeris {
        self.ephemeris.as_ref()
    }

    fn resolver(&self) -> ObjectResolver<'_> {
        ObjectResolver::new(&self.store, self.ephemeris.as_ref())
    }

    /// Resolve a name to its position at `epoch`, see [`ObjectResolver::resolve_object`].
    pub fn resolve_object(&self, name: &str, epoch: Epoch) -> Result<EquatorialRecord, StarHopError> {
        self.resolver().resolve_object(name, epoch)
    }

    /// Star-hopping path to `target` for the facade's observer, see
    /// [`Pathfinder::find_hopping_path`].
    pub fn find_hopping_path(&self, target: &str, params: &HopParams, epoch: Epoch) -> PathResult {
        Pathfinder::new(&self.store, self.ephemeris.as_ref(), &self.observer)
            .find_hopping_path(target, params, epoch)
    }

    /// Grouped, paginated catalog listing, see [`CatalogStore::list_objects`].
    pub fn list_objects(&self, query: &ListingQuery) -> Listing {
        self.store.list_objects(query)
    }

    /// Current position in the sky and rise/set times of an object.
    ///
    /// Arguments
    /// -----------------
    /// * `name` – Anything the resolver understands.
    /// * `epoch` – Instant of the observation; rise and set are searched over its UTC day.
    ///
    /// Return
    /// ----------
    /// * The [`Visibility`], or the resolver error ([`StarHopError::ObjectNotFound`],
    ///   [`StarHopError::UnobservableBody`]).
    ///
    /// Solar-system bodies use their own standard altitude (disk and parallax) for rise and
    /// set, and report their illuminated fraction.
    pub fn visibility(&self, name: &str, epoch: Epoch) -> Result<Visibility, StarHopError> {
        let ResolvedObject { record, source } = self.resolver().resolve(name, epoch)?;
        let position = record.coord();
        let horizontal = self
            .ephemeris
            .horizontal_position(&position, &self.observer, epoch);

        let (rise_set_transit, illumination) = match source {
            ObjectSource::SolarSystem(body) => (
                rise_set_transit_at(&position, &self.observer, epoch, body.standard_altitude()),
                Some(self.ephemeris.illumination(body, epoch)?),
            ),
            _ => (
                self.ephemeris
                    .rise_set_transit(&position, &self.observer, epoch),
                None,
            ),
        };

        Ok(Visibility {
            object: record,
            horizontal,
            direction: CompassPoint::from_bearing(horizontal.azimuth),
            above_horizon: horizontal.is_above_horizon(),
            rise_set_transit,
            illumination,
        })
    }
}
