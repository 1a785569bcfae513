//! # Ephemeris collaborator
//!
//! Positions of solar-system bodies and the horizon geometry the resolver and the pathfinder
//! rely on. The [`Ephemeris`] trait is the seam: the crate ships a
//! [`LowPrecisionEphemeris`](crate::ephemeris::low_precision::LowPrecisionEphemeris), and an
//! application may plug in a more precise provider.
//!
//! Provided operations
//! -----------------
//! * [`Ephemeris::equatorial_position`] – geocentric right ascension / declination of a body.
//! * [`Ephemeris::horizontal_position`] – altitude / azimuth of a fixed position for an
//!   observer at an instant (local hour angle; no refraction).
//! * [`Ephemeris::rise_set_transit`] – rise, upper transit and set instants over one UTC day.
//! * [`Ephemeris::illumination`] – illuminated fraction of a body's disk.
//!
//! Precession, nutation and atmospheric refraction are not modelled.
pub mod low_precision;

use std::fmt;
use std::str::FromStr;

use hifitime::{Epoch, Unit};
use serde::Serialize;

use crate::constants::{Degree, HOUR_TO_DEG, STAR_STANDARD_ALTITUDE};
use crate::coordinates::{EquatorialCoord, HorizontalCoord};
use crate::observer::ObserverLocation;
use crate::starhop_errors::StarHopError;
use crate::time::{gmst, local_sidereal_time, start_of_utc_day};

/// Sidereal degrees turned per solar day fraction, as used by the rise/set interpolation.
const SIDEREAL_DEGREES_PER_DAY: f64 = 360.985_647;

/// Refinement passes of the rise/transit/set instants.
const RISE_SET_ITERATIONS: usize = 3;

/// The closed set of solar-system bodies known to the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SolarSystemBody {
    Sun,
    Moon,
    Mercury,
    Venus,
    Earth,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

impl SolarSystemBody {
    pub const ALL: [SolarSystemBody; 11] = [
        SolarSystemBody::Sun,
        SolarSystemBody::Moon,
        SolarSystemBody::Mercury,
        SolarSystemBody::Venus,
        SolarSystemBody::Earth,
        SolarSystemBody::Mars,
        SolarSystemBody::Jupiter,
        SolarSystemBody::Saturn,
        SolarSystemBody::Uranus,
        SolarSystemBody::Neptune,
        SolarSystemBody::Pluto,
    ];

    /// Capitalized display name.
    pub fn name(&self) -> &'static str {
        match self {
            SolarSystemBody::Sun => "Sun",
            SolarSystemBody::Moon => "Moon",
            SolarSystemBody::Mercury => "Mercury",
            SolarSystemBody::Venus => "Venus",
            SolarSystemBody::Earth => "Earth",
            SolarSystemBody::Mars => "Mars",
            SolarSystemBody::Jupiter => "Jupiter",
            SolarSystemBody::Saturn => "Saturn",
            SolarSystemBody::Uranus => "Uranus",
            SolarSystemBody::Neptune => "Neptune",
            SolarSystemBody::Pluto => "Pluto",
        }
    }

    /// Free-text type used for resolved records.
    pub fn object_type(&self) -> &'static str {
        match self {
            SolarSystemBody::Sun => "Star",
            SolarSystemBody::Moon => "Moon",
            SolarSystemBody::Pluto => "Dwarf Planet",
            _ => "Planet",
        }
    }

    /// Altitude of the body's reference point at apparent rise or set, in degrees.
    ///
    /// Includes the mean refraction at the horizon, and the semi-diameter for the Sun and
    /// the Moon (the Moon value also absorbs its mean horizontal parallax).
    pub fn standard_altitude(&self) -> Degree {
        match self {
            SolarSystemBody::Sun => -0.833,
            SolarSystemBody::Moon => 0.125,
            _ => STAR_STANDARD_ALTITUDE,
        }
    }
}

impl fmt::Display for SolarSystemBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SolarSystemBody {
    type Err = StarHopError;

    /// Case-insensitive match on the body name, surrounding whitespace ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        SolarSystemBody::ALL
            .into_iter()
            .find(|body| body.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| StarHopError::ObjectNotFound(s.to_string()))
    }
}

/// Rise, upper transit and set of a fixed position over one UTC day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiseSetTransit {
    /// `None` when the position never crosses the standard altitude that day
    pub rise: Option<Epoch>,
    /// Upper culmination; reported even when it happens below the horizon
    pub transit: Option<Epoch>,
    pub set: Option<Epoch>,
    /// Always above the standard altitude
    pub circumpolar: bool,
    /// Always below the standard altitude
    pub never_rises: bool,
}

/// Source of solar-system positions plus the horizon geometry built on top of it.
///
/// Implementations must be deterministic and free of side effects so that they can be shared
/// between concurrent requests.
pub trait Ephemeris: Send + Sync {
    /// Geocentric equatorial position of `body` at `epoch` (J2000 mean equator).
    ///
    /// Return
    /// ----------
    /// * The position, or [`StarHopError::UnobservableBody`] for the Earth.
    fn equatorial_position(
        &self,
        body: SolarSystemBody,
        epoch: Epoch,
    ) -> Result<EquatorialCoord, StarHopError>;

    /// Illuminated fraction of the disk of `body` at `epoch`, in `[0, 1]`.
    fn illumination(&self, body: SolarSystemBody, epoch: Epoch) -> Result<f64, StarHopError>;

    /// Altitude and azimuth of a fixed position, see [`horizontal_from_equatorial`].
    fn horizontal_position(
        &self,
        position: &EquatorialCoord,
        observer: &ObserverLocation,
        epoch: Epoch,
    ) -> HorizontalCoord {
        horizontal_from_equatorial(position, observer, epoch)
    }

    /// Rise, transit and set of a fixed position during the UTC day containing `day`,
    /// against the standard altitude of a star.
    fn rise_set_transit(
        &self,
        position: &EquatorialCoord,
        observer: &ObserverLocation,
        day: Epoch,
    ) -> RiseSetTransit {
        rise_set_transit_at(position, observer, day, STAR_STANDARD_ALTITUDE)
    }
}

/// Local hour angle of a position in degrees, in `(-180, 180]`.
pub fn hour_angle(position: &EquatorialCoord, observer: &ObserverLocation, epoch: Epoch) -> Degree {
    let lst = local_sidereal_time(epoch, observer.longitude) * HOUR_TO_DEG;
    wrap_signed(lst - position.ra_degrees())
}

fn wrap_signed(angle: Degree) -> Degree {
    let wrapped = angle.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// Convert a fixed equatorial position to horizontal coordinates.
///
/// With `H` the local hour angle, `δ` the declination and `φ` the latitude:
///
/// ```text
/// sin(alt) = sin δ sin φ + cos δ cos φ cos H
/// az       = atan2(−sin H cos δ, sin δ cos φ − cos δ sin φ cos H)
/// ```
///
/// Azimuth is measured from north through east, in `[0, 360)`.
pub fn horizontal_from_equatorial(
    position: &EquatorialCoord,
    observer: &ObserverLocation,
    epoch: Epoch,
) -> HorizontalCoord {
    let h = hour_angle(position, observer, epoch).to_radians();
    let dec = position.dec_degrees.to_radians();
    let lat = observer.latitude.to_radians();

    let sin_alt = dec.sin() * lat.sin() + dec.cos() * lat.cos() * h.cos();
    let altitude = sin_alt.clamp(-1.0, 1.0).asin().to_degrees();

    let y = -h.sin() * dec.cos();
    let x = dec.sin() * lat.cos() - dec.cos() * lat.sin() * h.cos();
    let azimuth = y.atan2(x).to_degrees().rem_euclid(360.0);

    HorizontalCoord {
        altitude,
        azimuth: if azimuth >= 360.0 { 0.0 } else { azimuth },
    }
}

/// Rise, transit and set of a fixed position against a given standard altitude.
///
/// Hour-angle method: the transit fraction of day `m0` comes from the sidereal time at 0h UT,
/// rise and set are `m0 ∓ H0/360` with `cos H0 = (sin h0 − sin φ sin δ) / (cos φ cos δ)`,
/// then each fraction is refined a few times against the exact local hour angle.
///
/// Arguments
/// -----------------
/// * `position` – Position, assumed fixed over the day.
/// * `observer` – Observer location, longitude east positive.
/// * `day` – Any instant of the UTC day of interest.
/// * `standard_altitude` – `h0` in degrees, see [`SolarSystemBody::standard_altitude`].
pub fn rise_set_transit_at(
    position: &EquatorialCoord,
    observer: &ObserverLocation,
    day: Epoch,
    standard_altitude: Degree,
) -> RiseSetTransit {
    let midnight = start_of_utc_day(day);
    let theta0 = gmst(midnight.to_mjd_utc_days()).to_degrees();

    let lat = observer.latitude.to_radians();
    let dec = position.dec_degrees.to_radians();
    let h0 = standard_altitude.to_radians();

    let transit_fraction =
        ((position.ra_degrees() - observer.longitude - theta0) / 360.0).rem_euclid(1.0);
    let refine_transit = |mut m: f64| {
        for _ in 0..RISE_SET_ITERATIONS {
            let h = wrap_signed(theta0 + SIDEREAL_DEGREES_PER_DAY * m + observer.longitude
                - position.ra_degrees());
            m -= h / 360.0;
        }
        m
    };
    let transit = Some(at_fraction(midnight, refine_transit(transit_fraction)));

    let denominator = lat.cos() * dec.cos();
    let cos_h0 = if denominator.abs() < 1e-12 {
        // at a pole, or for a polar position, the altitude is constant over the day
        if observer.latitude.signum() * position.dec_degrees > standard_altitude {
            -2.0
        } else {
            2.0
        }
    } else {
        (h0.sin() - lat.sin() * dec.sin()) / denominator
    };

    if cos_h0 < -1.0 {
        return RiseSetTransit {
            rise: None,
            transit,
            set: None,
            circumpolar: true,
            never_rises: false,
        };
    }
    if cos_h0 > 1.0 {
        return RiseSetTransit {
            rise: None,
            transit,
            set: None,
            circumpolar: false,
            never_rises: true,
        };
    }

    let semi_arc = cos_h0.acos().to_degrees();
    let refine_crossing = |mut m: f64| {
        for _ in 0..RISE_SET_ITERATIONS {
            let h = wrap_signed(theta0 + SIDEREAL_DEGREES_PER_DAY * m + observer.longitude
                - position.ra_degrees());
            let h_rad = h.to_radians();
            let sin_alt = lat.sin() * dec.sin() + lat.cos() * dec.cos() * h_rad.cos();
            let alt = sin_alt.clamp(-1.0, 1.0).asin();
            let slope = 360.0 * denominator * h_rad.sin();
            if slope.abs() < 1e-12 {
                break;
            }
            m += (alt - h0).to_degrees() / slope;
        }
        m
    };

    let rise_fraction = (transit_fraction - semi_arc / 360.0).rem_euclid(1.0);
    let set_fraction = (transit_fraction + semi_arc / 360.0).rem_euclid(1.0);

    RiseSetTransit {
        rise: Some(at_fraction(midnight, refine_crossing(rise_fraction))),
        transit,
        set: Some(at_fraction(midnight, refine_crossing(set_fraction))),
        circumpolar: false,
        never_rises: false,
    }
}

fn at_fraction(midnight: Epoch, fraction: f64) -> Epoch {
    midnight + Unit::Day * fraction
}

#[cfg(test)]
mod ephemeris_test {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn north_pole() -> ObserverLocation {
        ObserverLocation::new(90.0, 0.0, 0.0, None).unwrap()
    }

    fn greenwich() -> ObserverLocation {
        ObserverLocation::new(51.4769, 0.0, 46.0, Some("Greenwich".into())).unwrap()
    }

    #[test]
    fn test_body_from_str() {
        assert_eq!("JUPITER".parse::<SolarSystemBody>(), Ok(SolarSystemBody::Jupiter));
        assert_eq!(" moon ".parse::<SolarSystemBody>(), Ok(SolarSystemBody::Moon));
        assert_eq!("earth".parse::<SolarSystemBody>(), Ok(SolarSystemBody::Earth));
        assert_eq!(
            "Vulcan".parse::<SolarSystemBody>(),
            Err(StarHopError::ObjectNotFound("Vulcan".into()))
        );
    }

    #[test]
    fn test_altitude_equals_declination_at_pole() {
        let epoch = Epoch::from_gregorian_utc_at_midnight(2024, 1, 1);
        for (ra, dec) in [(0.0, 45.0), (6.5, -12.0), (18.6, 38.78)] {
            let hz = horizontal_from_equatorial(&EquatorialCoord::new(ra, dec), &north_pole(), epoch);
            assert_abs_diff_eq!(hz.altitude, dec, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_meridian_transit_geometry() {
        // a position on the local meridian south of the zenith culminates due south
        let epoch = Epoch::from_gregorian_utc(2024, 3, 20, 22, 0, 0, 0);
        let observer = greenwich();
        let lst = local_sidereal_time(epoch, observer.longitude);
        let on_meridian = EquatorialCoord::new(lst, 20.0);
        let hz = horizontal_from_equatorial(&on_meridian, &observer, epoch);
        assert_abs_diff_eq!(hz.altitude, 90.0 - 51.4769 + 20.0, epsilon = 1e-6);
        assert_abs_diff_eq!(hz.azimuth, 180.0, epsilon = 1e-6);

        // six hours past the meridian an equatorial position sets due west
        let western = EquatorialCoord::new((lst - 6.0).rem_euclid(24.0), 0.0);
        let hz = horizontal_from_equatorial(&western, &observer, epoch);
        assert_abs_diff_eq!(hz.altitude, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(hz.azimuth, 270.0, epsilon = 1e-6);
    }

    #[test]
    fn test_rise_set_transit() {
        let observer = greenwich();
        let day = Epoch::from_gregorian_utc_at_midnight(2024, 6, 1);
        let position = EquatorialCoord::new(10.0, 10.0);
        let rst = rise_set_transit_at(&position, &observer, day, STAR_STANDARD_ALTITUDE);
        assert!(!rst.circumpolar && !rst.never_rises);

        let transit = rst.transit.unwrap();
        let transit_hz = horizontal_from_equatorial(&position, &observer, transit);
        assert_abs_diff_eq!(hour_angle(&position, &observer, transit), 0.0, epsilon = 1e-3);
        assert_abs_diff_eq!(transit_hz.altitude, 90.0 - 51.4769 + 10.0, epsilon = 1e-3);

        for crossing in [rst.rise.unwrap(), rst.set.unwrap()] {
            let hz = horizontal_from_equatorial(&position, &observer, crossing);
            assert_abs_diff_eq!(hz.altitude, STAR_STANDARD_ALTITUDE, epsilon = 1e-2);
            assert!(crossing >= day && crossing <= day + Unit::Day * 1.0);
        }
        let rise_az = horizontal_from_equatorial(&position, &observer, rst.rise.unwrap()).azimuth;
        assert!(rise_az < 180.0, "rises in the east, got azimuth {rise_az}");
    }

    #[test]
    fn test_circumpolar_and_never_rising() {
        let observer = greenwich();
        let day = Epoch::from_gregorian_utc_at_midnight(2024, 6, 1);
        let polaris = EquatorialCoord::new(2.5303, 89.2641);
        let rst = rise_set_transit_at(&polaris, &observer, day, STAR_STANDARD_ALTITUDE);
        assert!(rst.circumpolar);
        assert_eq!((rst.rise, rst.set), (None, None));
        assert!(rst.transit.is_some());

        let canopus = EquatorialCoord::new(6.399195, -52.695718);
        let rst = rise_set_transit_at(&canopus, &observer, day, STAR_STANDARD_ALTITUDE);
        assert!(rst.never_rises);

        let rst = rise_set_transit_at(&canopus, &north_pole(), day, STAR_STANDARD_ALTITUDE);
        assert!(rst.never_rises);
        let rst = rise_set_transit_at(&polaris, &north_pole(), day, STAR_STANDARD_ALTITUDE);
        assert!(rst.circumpolar);
    }
}
