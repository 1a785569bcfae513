use hifitime::Epoch;

use crate::constants::{Degree, Hour, Radian, DAYS_PER_CENTURY, DPI, J2000_JD, MJD, T2000};

/// Julian centuries elapsed since J2000.0, on the TT scale
///
/// Argument
/// --------
/// * `epoch`: the instant
///
/// Return
/// ------
/// * `(JD_TT - 2451545.0) / 36525`
pub fn julian_centuries_tt(epoch: Epoch) -> f64 {
    (epoch.to_jde_tt_days() - J2000_JD) / DAYS_PER_CENTURY
}

/// Days elapsed since J2000.0, on the TT scale
pub fn days_since_j2000_tt(epoch: Epoch) -> f64 {
    epoch.to_jde_tt_days() - J2000_JD
}

/// Midnight UTC of the civil day containing `epoch`
pub fn start_of_utc_day(epoch: Epoch) -> Epoch {
    let (year, month, day, _, _, _, _) = epoch.to_gregorian_utc();
    Epoch::from_gregorian_utc_at_midnight(year, month, day)
}

/// Greenwich mean sidereal time, in radians, at the MJD `tjm`.
///
/// The IAU 1982 cubic gives the sidereal time at the preceding 0h; the elapsed
/// fraction of the day is then scaled by the sidereal rate.
///
/// Arguments
/// -----------------
/// * `tjm` – Modified Julian Date, UTC standing in for UT1
///
/// Return
/// ----------
/// * An angle in [0, 2π).
pub fn gmst(tjm: MJD) -> Radian {
    // seconds of sidereal time at 0h
    const S0: f64 = 24110.54841;
    const S1: f64 = 8640184.812866;
    const S2: f64 = 9.3104e-2;
    const S3: f64 = -6.2e-6;

    const SIDEREAL_PER_SOLAR: f64 = 1.00273790934;

    let centuries = (tjm.floor() - T2000) / DAYS_PER_CENTURY;
    let at_midnight = (((S3 * centuries + S2) * centuries + S1) * centuries + S0) * DPI / 86400.0;
    let day_fraction = tjm.fract() * DPI;

    (at_midnight + day_fraction * SIDEREAL_PER_SOLAR).rem_euclid(DPI)
}

/// Local mean sidereal time in hours, in `[0, 24)`.
///
/// UT1 is approximated by UTC; the difference (< 0.9 s) is far below the precision needed to
/// decide whether a star is above the horizon.
///
/// Arguments
/// ---------
/// * `epoch`: the instant
/// * `longitude`: observer longitude in degrees, east positive
pub fn local_sidereal_time(epoch: Epoch, longitude: Degree) -> Hour {
    let gmst_hours = gmst(epoch.to_mjd_utc_days()) * 24.0 / DPI;
    (gmst_hours + longitude / 15.0).rem_euclid(24.0)
}
