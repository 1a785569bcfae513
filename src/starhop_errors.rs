use thiserror::Error;

use crate::catalog::columns::ParseRowError;

#[derive(Error, Debug)]
pub enum StarHopError {
    #[error("Object not found: {0}")]
    ObjectNotFound(String),

    #[error("Catalog unavailable: {0}")]
    CatalogUnavailable(String),

    #[error("Malformed catalog row: {0}")]
    MalformedRow(ParseRowError),

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV reader error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Invalid star-hopping parameter: {0}")]
    InvalidHopParameter(String),

    #[error("Invalid observer location: {0}")]
    InvalidObserver(String),

    #[error("Body cannot be observed from the Earth's centre: {0}")]
    UnobservableBody(String),

    #[error("Unknown object category: {0}")]
    UnknownCategory(String),

    #[error("Kepler equation did not converge: {0}")]
    RootFindingError(#[from] roots::SearchError),

    #[error("Coordinate computation produced NaN")]
    NaNCoordinate,
}

impl From<ParseRowError> for StarHopError {
    fn from(err: ParseRowError) -> Self {
        StarHopError::MalformedRow(err)
    }
}

impl PartialEq for StarHopError {
    fn eq(&self, other: &Self) -> bool {
        use StarHopError::*;
        match (self, other) {
            (ObjectNotFound(a), ObjectNotFound(b)) => a == b,
            (CatalogUnavailable(a), CatalogUnavailable(b)) => a == b,
            (MalformedRow(a), MalformedRow(b)) => a == b,

            // wrapped errors are not comparable, same variant is enough
            (IoError(_), IoError(_)) => true,
            (CsvError(_), CsvError(_)) => true,
            (RootFindingError(_), RootFindingError(_)) => true,

            (InvalidHopParameter(a), InvalidHopParameter(b)) => a == b,
            (InvalidObserver(a), InvalidObserver(b)) => a == b,
            (UnobservableBody(a), UnobservableBody(b)) => a == b,
            (UnknownCategory(a), UnknownCategory(b)) => a == b,
            (NaNCoordinate, NaNCoordinate) => true,

            _ => false,
        }
    }
}
