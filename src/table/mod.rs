/// Target table module
///
/// This module handles the tabular half of the dataset:
/// - Row and location data structures, location parsing (model.rs)
/// - Loading the table from disk, lookups and distance bounds (store.rs)

pub mod model;
pub mod store;

pub use model::{Location, LocationCell, LocationParseError, TargetRow};
pub use store::{DistanceBounds, TableError, TargetTable};
