//! # Object resolution
//!
//! Single entry point mapping a user-supplied identifier to a position at a given instant.
//!
//! Resolution order, first match wins, all comparisons case-insensitive:
//!
//! 1. the solar-system bodies, positioned by the [`Ephemeris`] at the requested instant;
//! 2. the alias table (common names such as `"Andromeda Galaxy"`), then the DSO it points to;
//! 3. the star catalog;
//! 4. the DSO catalog.
//!
//! An unknown name yields [`StarHopError::ObjectNotFound`] carrying the input exactly as
//! given, so that the caller can echo it back.
//!
//! `"Earth"` is the one known name that does not resolve to a position: it is a member of
//! the solar-system set, so the catalogs are never consulted, and the geocentric ephemeris
//! answers [`StarHopError::UnobservableBody`] instead of `ObjectNotFound`. The pathfinder
//! reports it as [`PathStatus::TargetNotFound`](crate::pathfinder::PathStatus) like any
//! other unresolvable target.
use hifitime::Epoch;
use serde::Serialize;

use crate::catalog::store::CatalogStore;
use crate::catalog::EquatorialRecord;
use crate::ephemeris::{Ephemeris, SolarSystemBody};
use crate::starhop_errors::StarHopError;

/// Where a resolved object came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ObjectSource {
    SolarSystem(SolarSystemBody),
    Alias,
    Star,
    DeepSky,
}

/// A resolved object and the table it was found in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedObject {
    pub record: EquatorialRecord,
    pub source: ObjectSource,
}

impl ResolvedObject {
    pub fn is_solar_system(&self) -> bool {
        matches!(self.source, ObjectSource::SolarSystem(_))
    }
}

/// Resolves names against the ephemeris and a catalog store.
pub struct ObjectResolver<'a> {
    store: &'a CatalogStore,
    ephemeris: &'a dyn Ephemeris,
}

impl<'a> ObjectResolver<'a> {
    pub fn new(store: &'a CatalogStore, ephemeris: &'a dyn Ephemeris) -> Self {
        ObjectResolver { store, ephemeris }
    }

    /// Resolve `name` at `epoch`.
    ///
    /// Arguments
    /// -----------------
    /// * `name` – Body name, common name, star name or catalog designation.
    /// * `epoch` – Instant used to position solar-system bodies; catalog objects are fixed.
    ///
    /// Return
    /// ----------
    /// * The resolved record and its source, or [`StarHopError::ObjectNotFound`] with the
    ///   original input. Asking for the Earth gives [`StarHopError::UnobservableBody`].
    pub fn resolve(&self, name: &str, epoch: Epoch) -> Result<ResolvedObject, StarHopError> {
        if let Ok(body) = name.parse::<SolarSystemBody>() {
            return self.resolve_body(body, epoch);
        }

        if let Some(record) = self
            .store
            .resolve_alias(name)
            .and_then(|key| self.store.lookup_dso(key))
        {
            return Ok(ResolvedObject {
                record: record.clone(),
                source: ObjectSource::Alias,
            });
        }

        if let Some(record) = self.store.lookup_star(name) {
            return Ok(ResolvedObject {
                record: record.clone(),
                source: ObjectSource::Star,
            });
        }

        if let Some(record) = self.store.lookup_dso(name) {
            return Ok(ResolvedObject {
                record: record.clone(),
                source: ObjectSource::DeepSky,
            });
        }

        tracing::debug!(name, "object not found");
        Err(StarHopError::ObjectNotFound(name.to_string()))
    }

    /// Resolve `name` at `epoch` to its record only.
    pub fn resolve_object(&self, name: &str, epoch: Epoch) -> Result<EquatorialRecord, StarHopError> {
        self.resolve(name, epoch).map(|resolved| resolved.record)
    }

    fn resolve_body(
        &self,
        body: SolarSystemBody,
        epoch: Epoch,
    ) -> Result<ResolvedObject, StarHopError> {
        let position = self.ephemeris.equatorial_position(body, epoch)?;
        let record = EquatorialRecord::new(body.name(), position.ra_hours, position.dec_degrees)
            .with_object_type(body.object_type());
        Ok(ResolvedObject {
            record,
            source: ObjectSource::SolarSystem(body),
        })
    }
}
