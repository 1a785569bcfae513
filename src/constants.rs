//! # Constants and type definitions for starhop
//!
//! This module centralizes the **conversion factors**, **default search parameters**, and
//! **common type aliases** used throughout the crate.
//!
//! ## Overview
//!
//! - Unit conversions (hours ↔ degrees, full turn)
//! - Time reference epochs (J2000.0)
//! - Default star-hopping parameters
//! - Catalog ingestion thresholds
//!
//! Angles exposed by the public API are always **degrees**, except right ascension which is
//! carried in **hours** as astronomers usually quote it.

// -------------------------------------------------------------------------------------------------
// Unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Hours of right ascension → degrees
pub const HOUR_TO_DEG: f64 = 15.0;

/// MJD epoch of J2000.0 (2000-01-01 12:00:00 TT)
pub const T2000: f64 = 51544.5;

/// Julian date of J2000.0
pub const J2000_JD: f64 = 2_451_545.0;

/// Days in a Julian century
pub const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Mean obliquity of the ecliptic at J2000.0, in degrees
pub const OBLIQUITY_J2000: f64 = 23.439_291_1;

// -------------------------------------------------------------------------------------------------
// Star-hopping defaults
// -------------------------------------------------------------------------------------------------

/// Faintest magnitude accepted for an intermediate hop star
pub const DEFAULT_MAX_HOP_MAGNITUDE: f64 = 8.0;

/// Radius around the target searched for a starting star (degrees)
pub const DEFAULT_INITIAL_SEARCH_RADIUS: f64 = 20.0;

/// Faintest magnitude accepted for the starting star
pub const DEFAULT_START_STAR_MAGNITUDE: f64 = 3.5;

/// Maximum number of hops attempted before giving up
pub const DEFAULT_MAX_HOPS: usize = 20;

// -------------------------------------------------------------------------------------------------
// Catalog ingestion
// -------------------------------------------------------------------------------------------------

/// Stars without any designation are only loaded when brighter than this magnitude
pub const UNNAMED_STAR_MAGNITUDE_LIMIT: f64 = 6.0;

/// Standard altitude of a point source at rise/set (refraction only), degrees
pub const STAR_STANDARD_ALTITUDE: f64 = -0.5667;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in radians
pub type Radian = f64;
/// Right ascension in hours
pub type Hour = f64;
/// Visual magnitude (lower is brighter)
pub type Magnitude = f64;
/// Elevation in meters
pub type Meter = f64;
/// Modified Julian Date (days)
pub type MJD = f64;
