pub mod catalog;
pub mod constants;
pub mod conversion;
pub mod coordinates;
pub mod ephemeris;
pub mod observer;
pub mod pathfinder;
pub mod resolver;
pub mod starhop;
pub mod starhop_errors;
pub mod time;

pub use catalog::catalog_file::CatalogSources;
pub use catalog::store::CatalogStore;
pub use catalog::EquatorialRecord;
pub use pathfinder::{HopParams, PathResult, PathStatus};
pub use starhop::StarHop;
pub use starhop_errors::StarHopError;
