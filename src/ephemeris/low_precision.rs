//! Low-precision analytical ephemeris.
//!
//! * Planets and the Earth–Moon barycentre: J2000 mean Keplerian elements with linear secular
//!   rates (Standish, *Keplerian Elements for Approximate Positions of the Major Planets*,
//!   valid 1800–2050). Kepler's equation is solved by Newton–Raphson.
//! * Sun: opposite of the heliocentric Earth position.
//! * Moon: truncated lunar theory of the *Astronomical Almanac* (≈0.3° in longitude).
//!
//! Positions are geometric (no light time, aberration or nutation) and referred to the mean
//! equator and equinox of J2000, which is what catalog coordinates use as well. The result is
//! good to a fraction of a degree, enough to decide visibility and to point a finder.
use hifitime::Epoch;
use nalgebra::{Rotation3, Vector3};
use roots::{find_root_newton_raphson, SimpleConvergency};

use crate::constants::{Radian, DPI, HOUR_TO_DEG, OBLIQUITY_J2000};
use crate::coordinates::EquatorialCoord;
use crate::ephemeris::{Ephemeris, SolarSystemBody};
use crate::starhop_errors::StarHopError;
use crate::time::julian_centuries_tt;

/// Element value at J2000 and its rate per Julian century.
#[derive(Debug, Clone, Copy)]
struct Secular(f64, f64);

impl Secular {
    fn at(&self, t: f64) -> f64 {
        self.0 + self.1 * t
    }
}

/// Mean orbital elements, angles in degrees, semi-major axis in AU.
#[derive(Debug, Clone, Copy)]
struct MeanElements {
    semi_major_axis: Secular,
    eccentricity: Secular,
    inclination: Secular,
    mean_longitude: Secular,
    perihelion_longitude: Secular,
    ascending_node_longitude: Secular,
}

const MERCURY: MeanElements = MeanElements {
    semi_major_axis: Secular(0.387_099_27, 0.000_000_37),
    eccentricity: Secular(0.205_635_93, 0.000_019_06),
    inclination: Secular(7.004_979_02, -0.005_947_49),
    mean_longitude: Secular(252.250_323_50, 149_472.674_111_75),
    perihelion_longitude: Secular(77.457_796_28, 0.160_476_89),
    ascending_node_longitude: Secular(48.330_765_93, -0.125_340_81),
};

const VENUS: MeanElements = MeanElements {
    semi_major_axis: Secular(0.723_335_66, 0.000_003_90),
    eccentricity: Secular(0.006_776_72, -0.000_041_07),
    inclination: Secular(3.394_676_05, -0.000_788_90),
    mean_longitude: Secular(181.979_099_50, 58_517.815_387_29),
    perihelion_longitude: Secular(131.602_467_18, 0.002_683_29),
    ascending_node_longitude: Secular(76.679_842_55, -0.277_694_18),
};

const EARTH_MOON_BARYCENTER: MeanElements = MeanElements {
    semi_major_axis: Secular(1.000_002_61, 0.000_005_62),
    eccentricity: Secular(0.016_711_23, -0.000_043_92),
    inclination: Secular(-0.000_015_31, -0.012_946_68),
    mean_longitude: Secular(100.464_571_66, 35_999.372_449_81),
    perihelion_longitude: Secular(102.937_681_93, 0.323_273_64),
    ascending_node_longitude: Secular(0.0, 0.0),
};

const MARS: MeanElements = MeanElements {
    semi_major_axis: Secular(1.523_710_34, 0.000_018_47),
    eccentricity: Secular(0.093_394_10, 0.000_078_82),
    inclination: Secular(1.849_691_42, -0.008_131_31),
    mean_longitude: Secular(-4.553_432_05, 19_140.302_684_99),
    perihelion_longitude: Secular(-23.943_629_59, 0.444_410_88),
    ascending_node_longitude: Secular(49.559_538_91, -0.292_573_43),
};

const JUPITER: MeanElements = MeanElements {
    semi_major_axis: Secular(5.202_887_00, -0.000_116_07),
    eccentricity: Secular(0.048_386_24, -0.000_132_53),
    inclination: Secular(1.304_396_95, -0.001_837_14),
    mean_longitude: Secular(34.396_440_51, 3_034.746_127_75),
    perihelion_longitude: Secular(14.728_479_83, 0.212_526_68),
    ascending_node_longitude: Secular(100.473_909_09, 0.204_691_06),
};

const SATURN: MeanElements = MeanElements {
    semi_major_axis: Secular(9.536_675_94, -0.001_250_60),
    eccentricity: Secular(0.053_861_79, -0.000_509_91),
    inclination: Secular(2.485_991_87, 0.001_936_09),
    mean_longitude: Secular(49.954_244_23, 1_222.493_622_01),
    perihelion_longitude: Secular(92.598_878_31, -0.418_972_16),
    ascending_node_longitude: Secular(113.662_424_48, -0.288_677_94),
};

const URANUS: MeanElements = MeanElements {
    semi_major_axis: Secular(19.189_164_64, -0.001_961_76),
    eccentricity: Secular(0.047_257_44, -0.000_043_97),
    inclination: Secular(0.772_637_83, -0.002_429_39),
    mean_longitude: Secular(313.238_104_51, 428.482_027_85),
    perihelion_longitude: Secular(170.954_276_30, 0.408_052_81),
    ascending_node_longitude: Secular(74.016_925_03, 0.042_405_89),
};

const NEPTUNE: MeanElements = MeanElements {
    semi_major_axis: Secular(30.069_922_76, 0.000_262_91),
    eccentricity: Secular(0.008_590_48, 0.000_051_05),
    inclination: Secular(1.770_043_47, 0.000_353_72),
    mean_longitude: Secular(-55.120_029_69, 218.459_453_25),
    perihelion_longitude: Secular(44.964_762_27, -0.322_414_64),
    ascending_node_longitude: Secular(131.784_225_74, -0.005_086_64),
};

const PLUTO: MeanElements = MeanElements {
    semi_major_axis: Secular(39.482_116_75, -0.000_315_96),
    eccentricity: Secular(0.248_827_30, 0.000_051_70),
    inclination: Secular(17.140_012_06, 0.000_048_18),
    mean_longitude: Secular(238.929_038_33, 145.207_805_15),
    perihelion_longitude: Secular(224.068_916_29, -0.040_629_42),
    ascending_node_longitude: Secular(110.303_936_84, -0.011_834_82),
};

fn planet_elements(body: SolarSystemBody) -> Option<&'static MeanElements> {
    match body {
        SolarSystemBody::Mercury => Some(&MERCURY),
        SolarSystemBody::Venus => Some(&VENUS),
        SolarSystemBody::Mars => Some(&MARS),
        SolarSystemBody::Jupiter => Some(&JUPITER),
        SolarSystemBody::Saturn => Some(&SATURN),
        SolarSystemBody::Uranus => Some(&URANUS),
        SolarSystemBody::Neptune => Some(&NEPTUNE),
        SolarSystemBody::Pluto => Some(&PLUTO),
        SolarSystemBody::Sun | SolarSystemBody::Moon | SolarSystemBody::Earth => None,
    }
}

/// Solve Kepler's equation `E − e sin E = M` for the eccentric anomaly.
///
/// Arguments
/// ---------
/// * `mean_anomaly`: `M` in radians
/// * `eccentricity`: `e`, elliptic orbits only
///
/// Return
/// ------
/// * `E` in radians, or the root-finding error if Newton–Raphson does not converge.
fn solve_kepler_equation(mean_anomaly: Radian, eccentricity: f64) -> Result<Radian, StarHopError> {
    let f = |ecc_anom: f64| ecc_anom - eccentricity * ecc_anom.sin() - mean_anomaly;
    let df = |ecc_anom: f64| 1.0 - eccentricity * ecc_anom.cos();

    let x0 = mean_anomaly + eccentricity * mean_anomaly.sin();
    let mut convergency = SimpleConvergency {
        eps: 1e-12,
        max_iter: 30,
    };
    Ok(find_root_newton_raphson(x0, &f, &df, &mut convergency)?)
}

/// Heliocentric position in the J2000 ecliptic frame, in AU.
fn heliocentric_ecliptic(elements: &MeanElements, t: f64) -> Result<Vector3<f64>, StarHopError> {
    let a = elements.semi_major_axis.at(t);
    let e = elements.eccentricity.at(t);
    let inclination = elements.inclination.at(t).to_radians();
    let node = elements.ascending_node_longitude.at(t).to_radians();
    let perihelion = elements.perihelion_longitude.at(t).to_radians();
    let mean_longitude = elements.mean_longitude.at(t).to_radians();

    let arg_perihelion = perihelion - node;
    let mean_anomaly = (mean_longitude - perihelion).rem_euclid(DPI);
    let ecc_anom = solve_kepler_equation(mean_anomaly, e)?;

    // position in the orbital plane, x towards perihelion
    let in_plane = Vector3::new(
        a * (ecc_anom.cos() - e),
        a * (1.0 - e * e).sqrt() * ecc_anom.sin(),
        0.0,
    );

    let orientation = Rotation3::from_axis_angle(&Vector3::z_axis(), node)
        * Rotation3::from_axis_angle(&Vector3::x_axis(), inclination)
        * Rotation3::from_axis_angle(&Vector3::z_axis(), arg_perihelion);
    Ok(orientation * in_plane)
}

/// Geocentric ecliptic longitude and latitude of the Moon, in degrees.
fn lunar_ecliptic(t: f64) -> (f64, f64) {
    let sin_deg = |deg: f64| deg.to_radians().sin();

    let longitude = 218.32 + 481_267.881 * t + 6.29 * sin_deg(135.0 + 477_198.87 * t)
        - 1.27 * sin_deg(259.3 - 413_335.36 * t)
        + 0.66 * sin_deg(235.7 + 890_534.22 * t)
        + 0.21 * sin_deg(269.9 + 954_397.74 * t)
        - 0.19 * sin_deg(357.5 + 35_999.05 * t)
        - 0.11 * sin_deg(186.5 + 966_404.03 * t);

    let latitude = 5.13 * sin_deg(93.3 + 483_202.02 * t)
        + 0.28 * sin_deg(228.2 + 960_400.89 * t)
        - 0.28 * sin_deg(318.3 + 6_003.15 * t)
        - 0.17 * sin_deg(217.6 - 407_332.21 * t);

    (longitude.rem_euclid(360.0), latitude)
}

fn unit_vector_from_ecliptic(longitude: f64, latitude: f64) -> Vector3<f64> {
    let (lon, lat) = (longitude.to_radians(), latitude.to_radians());
    Vector3::new(lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin())
}

/// Rotate an ecliptic J2000 vector to the equatorial J2000 frame and read RA/Dec from it.
fn ecliptic_to_equatorial(ecliptic: Vector3<f64>) -> Result<EquatorialCoord, StarHopError> {
    let rotation = Rotation3::from_axis_angle(&Vector3::x_axis(), OBLIQUITY_J2000.to_radians());
    let equatorial = rotation * ecliptic;

    let norm = equatorial.norm();
    if !norm.is_finite() || norm == 0.0 {
        return Err(StarHopError::NaNCoordinate);
    }
    let dec = (equatorial.z / norm).asin();
    let ra = equatorial.y.atan2(equatorial.x).rem_euclid(DPI);

    Ok(EquatorialCoord::new(ra.to_degrees() / HOUR_TO_DEG, dec.to_degrees()))
}

/// Analytical ephemeris good to a fraction of a degree over 1800–2050.
#[derive(Debug, Clone, Copy, Default)]
pub struct LowPrecisionEphemeris;

impl LowPrecisionEphemeris {
    pub fn new() -> Self {
        LowPrecisionEphemeris
    }

    fn earth(&self, t: f64) -> Result<Vector3<f64>, StarHopError> {
        heliocentric_ecliptic(&EARTH_MOON_BARYCENTER, t)
    }

    /// Geocentric ecliptic direction (or position, in AU, for the Sun and the planets).
    fn geocentric_ecliptic(
        &self,
        body: SolarSystemBody,
        t: f64,
    ) -> Result<Vector3<f64>, StarHopError> {
        match body {
            SolarSystemBody::Earth => Err(StarHopError::UnobservableBody(body.name().to_string())),
            SolarSystemBody::Sun => Ok(-self.earth(t)?),
            SolarSystemBody::Moon => {
                let (longitude, latitude) = lunar_ecliptic(t);
                Ok(unit_vector_from_ecliptic(longitude, latitude))
            }
            planet => {
                let elements = planet_elements(planet)
                    .ok_or_else(|| StarHopError::UnobservableBody(planet.name().to_string()))?;
                Ok(heliocentric_ecliptic(elements, t)? - self.earth(t)?)
            }
        }
    }
}

impl Ephemeris for LowPrecisionEphemeris {
    fn equatorial_position(
        &self,
        body: SolarSystemBody,
        epoch: Epoch,
    ) -> Result<EquatorialCoord, StarHopError> {
        let t = julian_centuries_tt(epoch);
        ecliptic_to_equatorial(self.geocentric_ecliptic(body, t)?)
    }

    /// Phase fraction `(1 + cos i) / 2`, with `i` the Sun–body–Earth phase angle.
    ///
    /// For the Moon `i` is approximated by `180° − ψ`, `ψ` being the Sun–Moon elongation.
    fn illumination(&self, body: SolarSystemBody, epoch: Epoch) -> Result<f64, StarHopError> {
        let t = julian_centuries_tt(epoch);
        match body {
            SolarSystemBody::Earth => Err(StarHopError::UnobservableBody(body.name().to_string())),
            SolarSystemBody::Sun => Ok(1.0),
            SolarSystemBody::Moon => {
                let sun = -self.earth(t)?;
                let sun_longitude = sun.y.atan2(sun.x);
                let (longitude, latitude) = lunar_ecliptic(t);
                let cos_elongation =
                    latitude.to_radians().cos() * (longitude.to_radians() - sun_longitude).cos();
                Ok((1.0 - cos_elongation) / 2.0)
            }
            planet => {
                let elements = planet_elements(planet)
                    .ok_or_else(|| StarHopError::UnobservableBody(planet.name().to_string()))?;
                let earth = self.earth(t)?;
                let heliocentric = heliocentric_ecliptic(elements, t)?;
                let geocentric = heliocentric - earth;

                let (r, delta, big_r) = (heliocentric.norm(), geocentric.norm(), earth.norm());
                let cos_phase = ((r * r + delta * delta - big_r * big_r) / (2.0 * r * delta))
                    .clamp(-1.0, 1.0);
                Ok((1.0 + cos_phase) / 2.0)
            }
        }
    }
}
