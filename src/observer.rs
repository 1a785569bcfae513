use serde::Serialize;

use crate::constants::{Degree, Meter};
use crate::starhop_errors::StarHopError;

/// Geographic location of the observer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObserverLocation {
    /// Geodetic latitude in degrees, north positive
    pub latitude: Degree,
    /// Longitude in degrees, east of Greenwich
    pub longitude: Degree,
    /// Elevation above sea level in meters
    pub elevation: Meter,
    pub name: Option<String>,
}

impl ObserverLocation {
    /// Build a validated observer location.
    ///
    /// Arguments
    /// ---------
    /// * `latitude`: degrees in `[-90, 90]`
    /// * `longitude`: degrees east of Greenwich in `[-180, 360]`
    /// * `elevation`: meters above sea level
    /// * `name`: optional site name
    ///
    /// Return
    /// ------
    /// * The location, or [`StarHopError::InvalidObserver`] for out-of-range or NaN input.
    pub fn new(
        latitude: Degree,
        longitude: Degree,
        elevation: Meter,
        name: Option<String>,
    ) -> Result<Self, StarHopError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(StarHopError::InvalidObserver(format!(
                "latitude {latitude} outside [-90, 90]"
            )));
        }
        if !(-180.0..=360.0).contains(&longitude) {
            return Err(StarHopError::InvalidObserver(format!(
                "longitude {longitude} outside [-180, 360]"
            )));
        }
        if !elevation.is_finite() {
            return Err(StarHopError::InvalidObserver(format!(
                "elevation {elevation} is not finite"
            )));
        }
        Ok(ObserverLocation {
            latitude,
            longitude,
            elevation,
            name,
        })
    }
}
