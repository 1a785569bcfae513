//! # Star-hopping pathfinder
//!
//! Builds a sequence of telescope moves ("hops") from a bright, currently visible start star
//! to a target, such that every hop stays within the eyepiece field of view.
//!
//! Algorithm
//! -----------------
//! 1. Resolve the target (solar-system body, alias, star or DSO) and compute its altitude;
//!    a target at or below the horizon ends the search with [`PathStatus::TargetNotVisible`].
//! 2. Pick the start star: the brightest star with a magnitude not fainter than
//!    [`HopParams::start_star_magnitude_threshold`], within
//!    [`HopParams::initial_search_radius_degrees`] of the target and above the horizon.
//!    Equal magnitudes keep the first star in catalog order.
//! 3. When the target already lies within the field of the start star, no hop is needed
//!    ([`PathStatus::TargetInStartFov`]).
//! 4. Otherwise hop greedily: among the unvisited stars within the field of the current star,
//!    not fainter than [`HopParams::max_hop_magnitude`], above the horizon and strictly closer
//!    to the target, move to the one closest to the target. Stop with
//!    [`PathStatus::Success`] once the target is within the field, or with
//!    [`PathStatus::PathNotFound`] when no candidate is left or the hop budget is spent.
//!
//! Start-star selection ranks by brightness while hops rank by progress toward the target.
//!
//! Expected outcomes (unknown target, target below the horizon, no path) are reported through
//! [`PathResult::status`]; [`Pathfinder::find_hopping_path`] never fails.
pub mod display;

use hifitime::Epoch;
use serde::Serialize;

use crate::catalog::store::CatalogStore;
use crate::catalog::EquatorialRecord;
use crate::constants::{
    Degree, Magnitude, DEFAULT_INITIAL_SEARCH_RADIUS, DEFAULT_MAX_HOPS,
    DEFAULT_MAX_HOP_MAGNITUDE, DEFAULT_START_STAR_MAGNITUDE,
};
use crate::coordinates::{
    angular_separation, bearing, CompassPoint, EquatorialCoord, HorizontalCoord,
};
use crate::ephemeris::Ephemeris;
use crate::observer::ObserverLocation;
use crate::resolver::ObjectResolver;
use crate::starhop_errors::StarHopError;

/// Tuning knobs of a star-hopping search.
///
/// Build with [`HopParams::builder`]; the field of view has no sensible default and must be
/// given.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HopParams {
    /// Eyepiece field of view in degrees; bounds every hop.
    pub fov_degrees: Degree,

    /// Faintest star usable as an intermediate hop.
    pub max_hop_magnitude: Magnitude,

    /// Maximum distance between the start star and the target, in degrees.
    pub initial_search_radius_degrees: Degree,

    /// Faintest star usable as the start star.
    pub start_star_magnitude_threshold: Magnitude,

    /// Maximum number of hops before giving up.
    pub max_hops: usize,
}

impl HopParams {
    /// Create a new [`HopParamsBuilder`] initialized with the default search settings.
    ///
    /// # Example
    ///
    /// ```rust
    /// use starhop::pathfinder::HopParams;
    ///
    /// let params = HopParams::builder()
    ///     .fov_degrees(5.0)
    ///     .max_hop_magnitude(6.5)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(params.max_hops, 20);
    /// ```
    pub fn builder() -> HopParamsBuilder {
        HopParamsBuilder::new()
    }

    /// Default search settings for a given field of view.
    pub fn with_fov(fov_degrees: Degree) -> Result<Self, StarHopError> {
        Self::builder().fov_degrees(fov_degrees).build()
    }
}

/// Builder for [`HopParams`], with validation.
#[derive(Debug, Clone)]
pub struct HopParamsBuilder {
    params: HopParams,
}

impl Default for HopParamsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HopParamsBuilder {
    /// Create a new builder; the field of view starts unset (`NaN`).
    pub fn new() -> Self {
        Self {
            params: HopParams {
                fov_degrees: f64::NAN,
                max_hop_magnitude: DEFAULT_MAX_HOP_MAGNITUDE,
                initial_search_radius_degrees: DEFAULT_INITIAL_SEARCH_RADIUS,
                start_star_magnitude_threshold: DEFAULT_START_STAR_MAGNITUDE,
                max_hops: DEFAULT_MAX_HOPS,
            },
        }
    }

    pub fn fov_degrees(mut self, v: Degree) -> Self {
        self.params.fov_degrees = v;
        self
    }
    pub fn max_hop_magnitude(mut self, v: Magnitude) -> Self {
        self.params.max_hop_magnitude = v;
        self
    }
    pub fn initial_search_radius_degrees(mut self, v: Degree) -> Self {
        self.params.initial_search_radius_degrees = v;
        self
    }
    pub fn start_star_magnitude_threshold(mut self, v: Magnitude) -> Self {
        self.params.start_star_magnitude_threshold = v;
        self
    }
    pub fn max_hops(mut self, v: usize) -> Self {
        self.params.max_hops = v;
        self
    }

    /// Validate and return the parameters.
    ///
    /// Return
    /// ----------
    /// * The parameters, or [`StarHopError::InvalidHopParameter`] when the field of view or the
    ///   search radius is not a positive finite number, a magnitude limit is not finite, or
    ///   `max_hops` is zero.
    pub fn build(self) -> Result<HopParams, StarHopError> {
        let p = &self.params;

        if !Self::positive_finite(p.fov_degrees) {
            return Err(StarHopError::InvalidHopParameter(
                "fov_degrees must be > 0".into(),
            ));
        }
        if !Self::positive_finite(p.initial_search_radius_degrees) {
            return Err(StarHopError::InvalidHopParameter(
                "initial_search_radius_degrees must be > 0".into(),
            ));
        }
        if !p.max_hop_magnitude.is_finite() {
            return Err(StarHopError::InvalidHopParameter(
                "max_hop_magnitude must be finite".into(),
            ));
        }
        if !p.start_star_magnitude_threshold.is_finite() {
            return Err(StarHopError::InvalidHopParameter(
                "start_star_magnitude_threshold must be finite".into(),
            ));
        }
        if p.max_hops == 0 {
            return Err(StarHopError::InvalidHopParameter(
                "max_hops must be >= 1".into(),
            ));
        }

        Ok(self.params)
    }

    /// Return true iff x > 0.0 and finite (NaN fails).
    #[inline]
    fn positive_finite(x: f64) -> bool {
        x.is_finite() && x > 0.0
    }
}

/// Terminal state of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PathStatus {
    Success,
    TargetNotFound,
    TargetNotVisible,
    NoStartingStarFound,
    TargetInStartFov,
    PathNotFound,
}

impl PathStatus {
    /// True when the observer can reach the target, with or without hops.
    pub fn is_reachable(&self) -> bool {
        matches!(self, PathStatus::Success | PathStatus::TargetInStartFov)
    }
}

/// One telescope move between two catalog stars.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hop {
    pub from: String,
    pub to: String,
    pub to_magnitude: Option<Magnitude>,
    /// Initial course from `from` to `to`, degrees in `[0, 360)`
    pub bearing: Degree,
    pub direction: CompassPoint,
    /// Angular distance rounded to 0.1°
    pub distance: Degree,
}

/// Last leg, from the final star (or the start star) to the target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FinalApproach {
    pub bearing: Degree,
    pub direction: CompassPoint,
    /// Angular distance rounded to 0.1°
    pub distance: Degree,
}

/// Outcome of [`Pathfinder::find_hopping_path`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathResult {
    pub status: PathStatus,
    /// The name exactly as requested
    pub target_name: String,
    /// Resolved target, `None` only for [`PathStatus::TargetNotFound`]
    pub target: Option<EquatorialRecord>,
    pub target_horizontal: Option<HorizontalCoord>,
    pub start_star: Option<EquatorialRecord>,
    /// Hops in order; partial for [`PathStatus::PathNotFound`]
    pub hops: Vec<Hop>,
    /// Set for [`PathStatus::Success`] and [`PathStatus::TargetInStartFov`]
    pub final_approach: Option<FinalApproach>,
    /// Distance from the last reached star to the target, in degrees
    pub remaining_distance: Option<Degree>,
    pub fov_degrees: Degree,
}

impl PathResult {
    fn terminal(status: PathStatus, target_name: &str, params: &HopParams) -> Self {
        PathResult {
            status,
            target_name: target_name.to_string(),
            target: None,
            target_horizontal: None,
            start_star: None,
            hops: Vec::new(),
            final_approach: None,
            remaining_distance: None,
            fov_degrees: params.fov_degrees,
        }
    }
}

fn round_tenth(angle: Degree) -> Degree {
    (angle * 10.0).round() / 10.0
}

/// Greedy star-hopping search over a catalog store.
pub struct Pathfinder<'a> {
    store: &'a CatalogStore,
    ephemeris: &'a dyn Ephemeris,
    observer: &'a ObserverLocation,
}

impl<'a> Pathfinder<'a> {
    pub fn new(
        store: &'a CatalogStore,
        ephemeris: &'a dyn Ephemeris,
        observer: &'a ObserverLocation,
    ) -> Self {
        Pathfinder {
            store,
            ephemeris,
            observer,
        }
    }

    /// Find a star-hopping path to `target_name` at `epoch`.
    ///
    /// Arguments
    /// -----------------
    /// * `target_name` – Anything the [`ObjectResolver`] understands.
    /// * `params` – Field of view and search limits.
    /// * `epoch` – Observation instant, used for the target position and all altitudes.
    ///
    /// Return
    /// ----------
    /// * A [`PathResult`]; see [`PathStatus`] for the possible outcomes.
    pub fn find_hopping_path(
        &self,
        target_name: &str,
        params: &HopParams,
        epoch: Epoch,
    ) -> PathResult {
        let result = self.search(target_name, params, epoch);
        tracing::debug!(
            object = target_name,
            status = ?result.status,
            hops = result.hops.len(),
            "star-hopping search finished"
        );
        result
    }

    fn search(&self, target_name: &str, params: &HopParams, epoch: Epoch) -> PathResult {
        let resolver = ObjectResolver::new(self.store, self.ephemeris);
        let target = match resolver.resolve_object(target_name, epoch) {
            Ok(target) => target,
            Err(err) => {
                tracing::debug!(object = target_name, error = %err, "target not resolved");
                return PathResult::terminal(PathStatus::TargetNotFound, target_name, params);
            }
        };
        let target_coord = target.coord();
        let target_horizontal =
            self.ephemeris
                .horizontal_position(&target_coord, self.observer, epoch);

        let mut result = PathResult {
            target: Some(target),
            target_horizontal: Some(target_horizontal),
            ..PathResult::terminal(PathStatus::TargetNotVisible, target_name, params)
        };
        if !target_horizontal.is_above_horizon() {
            return result;
        }
        let target_key = target_canonical_name(&result);
        let is_target =
            |star: &EquatorialRecord| star.canonical_name.eq_ignore_ascii_case(&target_key);

        let stars: Vec<&EquatorialRecord> = self.store.stars().collect();
        let mut sky = SkyCache::new(&stars, self.ephemeris, self.observer, epoch);

        let mut start: Option<(usize, Magnitude)> = None;
        for (idx, star) in stars.iter().enumerate() {
            let Some(mag) = star.magnitude else { continue };
            if mag > params.start_star_magnitude_threshold
                || start.is_some_and(|(_, best)| mag >= best)
            {
                continue;
            }
            if angular_separation(&star.coord(), &target_coord)
                > params.initial_search_radius_degrees
            {
                continue;
            }
            if sky.is_visible(idx) {
                start = Some((idx, mag));
            }
        }
        let Some((start_idx, _)) = start else {
            result.status = PathStatus::NoStartingStarFound;
            return result;
        };

        let mut current = start_idx;
        let mut current_distance = angular_separation(&stars[current].coord(), &target_coord);
        let mut visited = vec![false; stars.len()];
        visited[current] = true;

        result.start_star = Some(stars[start_idx].clone());
        result.remaining_distance = Some(current_distance);

        if current_distance <= params.fov_degrees {
            result.status = PathStatus::TargetInStartFov;
            result.final_approach = Some(final_approach(stars[current], &target_coord));
            return result;
        }

        result.status = PathStatus::PathNotFound;
        for _ in 0..params.max_hops {
            let current_coord = stars[current].coord();
            let mut best: Option<(usize, Degree)> = None;

            for (idx, star) in stars.iter().enumerate() {
                if visited[idx]
                    || !star.is_brighter_than(params.max_hop_magnitude)
                    || is_target(star)
                {
                    continue;
                }
                let coord = star.coord();
                if angular_separation(&current_coord, &coord) > params.fov_degrees {
                    continue;
                }
                let distance = angular_separation(&coord, &target_coord);
                if distance >= current_distance || best.is_some_and(|(_, d)| distance >= d) {
                    continue;
                }
                if sky.is_visible(idx) {
                    best = Some((idx, distance));
                }
            }

            let Some((next, next_distance)) = best else {
                break;
            };

            let course = bearing(&current_coord, &stars[next].coord());
            result.hops.push(Hop {
                from: stars[current].canonical_name.clone(),
                to: stars[next].canonical_name.clone(),
                to_magnitude: stars[next].magnitude,
                bearing: course,
                direction: CompassPoint::from_bearing(course),
                distance: round_tenth(angular_separation(&current_coord, &stars[next].coord())),
            });
            visited[next] = true;
            current = next;
            current_distance = next_distance;
            result.remaining_distance = Some(current_distance);

            if current_distance <= params.fov_degrees {
                result.status = PathStatus::Success;
                result.final_approach = Some(final_approach(stars[current], &target_coord));
                break;
            }
        }

        result
    }
}

fn target_canonical_name(result: &PathResult) -> String {
    result
        .target
        .as_ref()
        .map(|t| t.canonical_name.clone())
        .unwrap_or_default()
}

fn final_approach(from: &EquatorialRecord, target: &EquatorialCoord) -> FinalApproach {
    let course = bearing(&from.coord(), target);
    FinalApproach {
        bearing: course,
        direction: CompassPoint::from_bearing(course),
        distance: round_tenth(angular_separation(&from.coord(), target)),
    }
}

/// Per-search memo of star visibility; every star's altitude is computed at most once.
struct SkyCache<'s> {
    stars: &'s [&'s EquatorialRecord],
    ephemeris: &'s dyn Ephemeris,
    observer: &'s ObserverLocation,
    epoch: Epoch,
    visible: Vec<Option<bool>>,
}

impl<'s> SkyCache<'s> {
    fn new(
        stars: &'s [&'s EquatorialRecord],
        ephemeris: &'s dyn Ephemeris,
        observer: &'s ObserverLocation,
        epoch: Epoch,
    ) -> Self {
        SkyCache {
            stars,
            ephemeris,
            observer,
            epoch,
            visible: vec![None; stars.len()],
        }
    }

    fn is_visible(&mut self, idx: usize) -> bool {
        if let Some(visible) = self.visible[idx] {
            return visible;
        }
        let visible = self
            .ephemeris
            .horizontal_position(&self.stars[idx].coord(), self.observer, self.epoch)
            .is_above_horizon();
        self.visible[idx] = Some(visible);
        visible
    }
}
