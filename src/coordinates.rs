//! # Coordinate math on the celestial sphere
//!
//! Pure functions used by the resolver and the star-hopping pathfinder:
//!
//! - [`angular_separation`] – great-circle distance between two equatorial positions
//!   (spherical law of cosines, with the cosine clamped to `[-1, 1]` so identical or
//!   antipodal inputs never yield `NaN`),
//! - [`bearing`] – initial compass course from one position to another, in `[0, 360)`,
//! - [`CompassPoint`] – the 16-point compass rose used to describe each hop.
//!
//! ## Conventions
//!
//! - Right ascension is carried in **hours** and converted with `× 15` before any
//!   trigonometry; declination, altitude and azimuth are **degrees**.
//! - Bearings are measured from celestial north through east (increasing right ascension),
//!   which is what an observer sees when facing the sky with north up.
use std::fmt;

use serde::Serialize;

use crate::constants::{Degree, Hour, HOUR_TO_DEG};

/// Bias added before rounding a bearing to its compass bucket, so that exact half-way
/// bearings (11.25°, 33.75°, …) always round clockwise.
const COMPASS_BUCKET_BIAS: f64 = 1e-9;

/// Fixed position on the celestial sphere.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EquatorialCoord {
    /// Right ascension in hours
    pub ra_hours: Hour,
    /// Declination in degrees
    pub dec_degrees: Degree,
}

impl EquatorialCoord {
    pub fn new(ra_hours: Hour, dec_degrees: Degree) -> Self {
        EquatorialCoord {
            ra_hours,
            dec_degrees,
        }
    }

    /// Right ascension converted to degrees
    pub fn ra_degrees(&self) -> Degree {
        self.ra_hours * HOUR_TO_DEG
    }
}

/// Position relative to an observer's horizon at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HorizontalCoord {
    /// Altitude above the horizon in degrees
    pub altitude: Degree,
    /// Azimuth in degrees, north = 0, east = 90
    pub azimuth: Degree,
}

impl HorizontalCoord {
    pub fn is_above_horizon(&self) -> bool {
        self.altitude > 0.0
    }
}

/// Angular separation between two equatorial positions, in degrees.
///
/// Arguments
/// -----------------
/// * `a`, `b`: the two positions.
///
/// Return
/// ----------
/// * The separation in `[0, 180]`. Identical inputs return exactly `0.0`.
pub fn angular_separation(a: &EquatorialCoord, b: &EquatorialCoord) -> Degree {
    if a == b {
        return 0.0;
    }
    let ra1 = a.ra_degrees().to_radians();
    let ra2 = b.ra_degrees().to_radians();
    let dec1 = a.dec_degrees.to_radians();
    let dec2 = b.dec_degrees.to_radians();

    let cos_sep = dec1.sin() * dec2.sin() + dec1.cos() * dec2.cos() * (ra1 - ra2).cos();
    cos_sep.clamp(-1.0, 1.0).acos().to_degrees()
}

/// Initial compass course from `from` to `to`, in degrees within `[0, 360)`.
///
/// Uses the `atan2` form of the great-circle initial course, with right ascension playing the
/// role of longitude.
pub fn bearing(from: &EquatorialCoord, to: &EquatorialCoord) -> Degree {
    let dec1 = from.dec_degrees.to_radians();
    let dec2 = to.dec_degrees.to_radians();
    let delta_ra = (to.ra_degrees() - from.ra_degrees()).to_radians();

    let y = delta_ra.sin() * dec2.cos();
    let x = dec1.cos() * dec2.sin() - dec1.sin() * dec2.cos() * delta_ra.cos();
    let course = y.atan2(x).to_degrees().rem_euclid(360.0);
    // rem_euclid may return exactly 360.0 for tiny negative inputs
    if course >= 360.0 {
        0.0
    } else {
        course
    }
}

/// The 16 points of the compass rose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompassPoint {
    North,
    NorthNorthEast,
    NorthEast,
    EastNorthEast,
    East,
    EastSouthEast,
    SouthEast,
    SouthSouthEast,
    South,
    SouthSouthWest,
    SouthWest,
    WestSouthWest,
    West,
    WestNorthWest,
    NorthWest,
    NorthNorthWest,
}

impl CompassPoint {
    pub const ALL: [CompassPoint; 16] = [
        CompassPoint::North,
        CompassPoint::NorthNorthEast,
        CompassPoint::NorthEast,
        CompassPoint::EastNorthEast,
        CompassPoint::East,
        CompassPoint::EastSouthEast,
        CompassPoint::SouthEast,
        CompassPoint::SouthSouthEast,
        CompassPoint::South,
        CompassPoint::SouthSouthWest,
        CompassPoint::SouthWest,
        CompassPoint::WestSouthWest,
        CompassPoint::West,
        CompassPoint::WestNorthWest,
        CompassPoint::NorthWest,
        CompassPoint::NorthNorthWest,
    ];

    /// Bucket a bearing (any real value, wrapped to `[0, 360)`) into one of the 16 points.
    pub fn from_bearing(bearing: Degree) -> Self {
        let sector = (bearing.rem_euclid(360.0) / 22.5 + COMPASS_BUCKET_BIAS).round() as usize;
        Self::ALL[sector % 16]
    }

    pub fn abbreviation(&self) -> &'static str {
        match self {
            CompassPoint::North => "N",
            CompassPoint::NorthNorthEast => "NNE",
            CompassPoint::NorthEast => "NE",
            CompassPoint::EastNorthEast => "ENE",
            CompassPoint::East => "E",
            CompassPoint::EastSouthEast => "ESE",
            CompassPoint::SouthEast => "SE",
            CompassPoint::SouthSouthEast => "SSE",
            CompassPoint::South => "S",
            CompassPoint::SouthSouthWest => "SSW",
            CompassPoint::SouthWest => "SW",
            CompassPoint::WestSouthWest => "WSW",
            CompassPoint::West => "W",
            CompassPoint::WestNorthWest => "WNW",
            CompassPoint::NorthWest => "NW",
            CompassPoint::NorthNorthWest => "NNW",
        }
    }
}

impl fmt::Display for CompassPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

impl Serialize for CompassPoint {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.abbreviation())
    }
}

#[cfg(test)]
mod coordinates_test {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_separation_reflexive() {
        let p = EquatorialCoord::new(5.919529, 7.407063);
        assert_eq!(angular_separation(&p, &p), 0.0);
    }

    #[test]
    fn test_separation_known_pairs() {
        // one hour of RA on the equator is 15°
        let a = EquatorialCoord::new(0.0, 0.0);
        let b = EquatorialCoord::new(1.0, 0.0);
        assert_abs_diff_eq!(angular_separation(&a, &b), 15.0, epsilon = 1e-9);

        // pole to equator
        let pole = EquatorialCoord::new(3.0, 90.0);
        assert_abs_diff_eq!(angular_separation(&pole, &a), 90.0, epsilon = 1e-9);

        // antipodal points never produce NaN
        let c = EquatorialCoord::new(12.0, 0.0);
        let sep = angular_separation(&a, &c);
        assert!(!sep.is_nan());
        assert_abs_diff_eq!(sep, 180.0, epsilon = 1e-6);

        // Dubhe -> Merak, the pointer stars (~5.4°)
        let dubhe = EquatorialCoord::new(11.062155, 61.751033);
        let merak = EquatorialCoord::new(11.030677, 56.382427);
        assert_abs_diff_eq!(angular_separation(&dubhe, &merak), 5.37, epsilon = 0.01);
    }

    #[test]
    fn test_separation_wraps_ra() {
        let a = EquatorialCoord::new(23.9, 10.0);
        let b = EquatorialCoord::new(0.1, 10.0);
        let c = EquatorialCoord::new(24.1, 10.0);
        assert_abs_diff_eq!(
            angular_separation(&a, &b),
            angular_separation(&a, &c),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_bearing_cardinals() {
        let origin = EquatorialCoord::new(6.0, 0.0);
        let north = EquatorialCoord::new(6.0, 10.0);
        let south = EquatorialCoord::new(6.0, -10.0);
        let east = EquatorialCoord::new(6.5, 0.0);
        let west = EquatorialCoord::new(5.5, 0.0);

        assert_abs_diff_eq!(bearing(&origin, &north), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(bearing(&origin, &east), 90.0, epsilon = 1e-9);
        assert_abs_diff_eq!(bearing(&origin, &south), 180.0, epsilon = 1e-9);
        assert_abs_diff_eq!(bearing(&origin, &west), 270.0, epsilon = 1e-9);

        let b = bearing(&origin, &EquatorialCoord::new(6.2, 3.0));
        assert!((0.0..90.0).contains(&b));
    }

    #[test]
    fn test_compass_buckets() {
        assert_eq!(CompassPoint::from_bearing(0.0), CompassPoint::North);
        assert_eq!(CompassPoint::from_bearing(90.0), CompassPoint::East);
        assert_eq!(CompassPoint::from_bearing(180.0), CompassPoint::South);
        assert_eq!(CompassPoint::from_bearing(270.0), CompassPoint::West);
        assert_eq!(CompassPoint::from_bearing(359.0), CompassPoint::North);
        assert_eq!(CompassPoint::from_bearing(45.0), CompassPoint::NorthEast);
        assert_eq!(CompassPoint::from_bearing(11.25), CompassPoint::NorthNorthEast);
        assert_eq!(CompassPoint::from_bearing(11.0), CompassPoint::North);
        assert_eq!(CompassPoint::from_bearing(-90.0), CompassPoint::West);
        assert_eq!(CompassPoint::NorthNorthWest.to_string(), "NNW");
    }

    #[test]
    fn test_horizon() {
        let up = HorizontalCoord {
            altitude: 0.1,
            azimuth: 12.0,
        };
        let down = HorizontalCoord {
            altitude: 0.0,
            azimuth: 12.0,
        };
        assert!(up.is_above_horizon());
        assert!(!down.is_above_horizon());
    }
}
