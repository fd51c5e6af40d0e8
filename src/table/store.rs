/// The target table: the load-once catalog of annotated images.
///
/// The table is loaded from a delimited file with columns `ImageID`,
/// `location` and `distance`, and is immutable afterwards. It is an explicit
/// value passed into every operation that needs it, so multiple tables can
/// coexist in one process (the tests rely on this).

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use super::model::{LocationCell, LocationParseError, TargetRow};

/// Spans smaller than this normalize to the midpoint instead of dividing.
const DEGENERATE_SPAN: f64 = 1.0e-12;

/// Errors raised while loading the target table
#[derive(Debug, Error)]
pub enum TableError {
    #[error("failed to open target table {}: {source}", path.display())]
    Open {
        path: PathBuf,
        source: csv::Error,
    },
    #[error("failed to read record {record} of {}: {source}", path.display())]
    Record {
        path: PathBuf,
        record: usize,
        source: csv::Error,
    },
    #[error("record {record} of {}: malformed location {value:?}: {source}", path.display())]
    Location {
        path: PathBuf,
        record: usize,
        value: String,
        source: LocationParseError,
    },
}

/// One record as it appears in the delimited file
#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(rename = "ImageID")]
    image_id: String,
    location: String,
    distance: f64,
}

/// Minimum and maximum distance across the whole table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceBounds {
    pub min: f64,
    pub max: f64,
}

impl DistanceBounds {
    /// Bounds collapsed onto a single value (single-row or constant table).
    pub fn degenerate(value: f64) -> Self {
        DistanceBounds {
            min: value,
            max: value,
        }
    }

    /// Normalize a distance into [0, 1] for color mapping.
    ///
    /// A degenerate span (min == max) maps to the midpoint 0.5 rather than
    /// dividing by zero.
    pub fn normalize(&self, distance: f64) -> f64 {
        let span = self.max - self.min;
        if span.abs() < DEGENERATE_SPAN {
            return 0.5;
        }
        ((distance - self.min) / span).clamp(0.0, 1.0)
    }
}

/// The loaded, read-only target table
#[derive(Debug, Clone, Default)]
pub struct TargetTable {
    rows: Vec<TargetRow>,
}

impl TargetTable {
    /// Load the table from a delimited file.
    ///
    /// Location cells are resolved here, once; a malformed cell fails the
    /// load with the offending record number rather than surfacing later
    /// during plotting.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TableError> {
        let path = path.as_ref();
        let mut reader = csv::Reader::from_path(path).map_err(|source| TableError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        let mut rows = Vec::new();
        for (index, result) in reader.deserialize::<CsvRecord>().enumerate() {
            // Record numbers are 1-based and count data records, not the header
            let record = index + 1;
            let raw = result.map_err(|source| TableError::Record {
                path: path.to_path_buf(),
                record,
                source,
            })?;

            let cell = LocationCell::Text(raw.location.clone());
            let location = cell.resolve().map_err(|source| TableError::Location {
                path: path.to_path_buf(),
                record,
                value: raw.location,
                source,
            })?;

            rows.push(TargetRow {
                image_id: raw.image_id,
                location,
                distance: raw.distance,
            });
        }

        log::info!("loaded target table {} ({} rows)", path.display(), rows.len());

        Ok(TargetTable { rows })
    }

    /// Build a table from rows already in memory.
    pub fn from_rows(rows: Vec<TargetRow>) -> Self {
        TargetTable { rows }
    }

    /// Number of rows in the table
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All rows, in file order
    pub fn rows(&self) -> &[TargetRow] {
        &self.rows
    }

    /// First row whose identifier equals `image_id` exactly.
    ///
    /// Identifiers are not required to be unique; the first match wins.
    pub fn find(&self, image_id: &str) -> Option<&TargetRow> {
        self.rows.iter().find(|row| row.image_id == image_id)
    }

    /// Minimum and maximum distance over the whole table.
    ///
    /// Returns `None` for an empty table.
    pub fn distance_bounds(&self) -> Option<DistanceBounds> {
        let mut rows = self.rows.iter();
        let first = rows.next()?;
        let mut bounds = DistanceBounds::degenerate(first.distance);
        for row in rows {
            bounds.min = bounds.min.min(row.distance);
            bounds.max = bounds.max.max(row.distance);
        }
        Some(bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::model::Location;
    use std::io::Write;

    fn write_table(contents: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("train.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        (dir, path)
    }

    #[test]
    fn test_load_resolves_locations() {
        let (_dir, path) = write_table(
            "ImageID,location,distance\n\
             img1,\"[120, 340]\",12.5\n\
             img2,\"[64, 32]\",3.25\n",
        );

        let table = TargetTable::load(&path).unwrap();
        assert_eq!(table.len(), 2);

        let row = table.find("img1").unwrap();
        assert_eq!(row.location, Location { x: 120, y: 340 });
        assert_eq!(row.distance, 12.5);
    }

    #[test]
    fn test_find_missing_returns_none() {
        let (_dir, path) = write_table(
            "ImageID,location,distance\n\
             img1,\"[1, 2]\",1.0\n\
             img2,\"[3, 4]\",2.0\n",
        );

        let table = TargetTable::load(&path).unwrap();
        assert!(table.find("img999").is_none());
    }

    #[test]
    fn test_find_first_match_wins() {
        let table = TargetTable::from_rows(vec![
            TargetRow {
                image_id: "dup".to_string(),
                location: Location { x: 1, y: 1 },
                distance: 1.0,
            },
            TargetRow {
                image_id: "dup".to_string(),
                location: Location { x: 9, y: 9 },
                distance: 9.0,
            },
        ]);

        let row = table.find("dup").unwrap();
        assert_eq!(row.location, Location { x: 1, y: 1 });
    }

    #[test]
    fn test_malformed_location_names_record() {
        let (_dir, path) = write_table(
            "ImageID,location,distance\n\
             img1,\"[1, 2]\",1.0\n\
             img2,\"[oops]\",2.0\n",
        );

        match TargetTable::load(&path) {
            Err(TableError::Location { record, value, .. }) => {
                assert_eq!(record, 2);
                assert_eq!(value, "[oops]");
            }
            other => panic!("expected Location error, got {:?}", other.map(|t| t.len())),
        }
    }

    #[test]
    fn test_missing_column_is_record_error() {
        let (_dir, path) = write_table("ImageID,location\nimg1,\"[1, 2]\"\n");
        assert!(matches!(
            TargetTable::load(&path),
            Err(TableError::Record { .. })
        ));
    }

    #[test]
    fn test_missing_file_is_open_error() {
        assert!(matches!(
            TargetTable::load("/nonexistent/train.csv"),
            Err(TableError::Open { .. })
        ));
    }

    #[test]
    fn test_distance_bounds() {
        let table = TargetTable::from_rows(vec![
            TargetRow {
                image_id: "a".to_string(),
                location: Location { x: 0, y: 0 },
                distance: 4.0,
            },
            TargetRow {
                image_id: "b".to_string(),
                location: Location { x: 0, y: 0 },
                distance: 10.0,
            },
            TargetRow {
                image_id: "c".to_string(),
                location: Location { x: 0, y: 0 },
                distance: 7.0,
            },
        ]);

        let bounds = table.distance_bounds().unwrap();
        assert_eq!(bounds.min, 4.0);
        assert_eq!(bounds.max, 10.0);
        assert_eq!(bounds.normalize(4.0), 0.0);
        assert_eq!(bounds.normalize(10.0), 1.0);
        assert_eq!(bounds.normalize(7.0), 0.5);
    }

    #[test]
    fn test_degenerate_bounds_normalize_to_midpoint() {
        // Three rows, all distance 5.0: no division by zero, midpoint policy
        let rows = (0..3)
            .map(|i| TargetRow {
                image_id: format!("img{}", i),
                location: Location { x: 0, y: 0 },
                distance: 5.0,
            })
            .collect();
        let table = TargetTable::from_rows(rows);

        let bounds = table.distance_bounds().unwrap();
        assert_eq!(bounds.normalize(5.0), 0.5);
    }

    #[test]
    fn test_normalize_clamps_out_of_range() {
        let bounds = DistanceBounds { min: 0.0, max: 10.0 };
        assert_eq!(bounds.normalize(-5.0), 0.0);
        assert_eq!(bounds.normalize(25.0), 1.0);
    }

    #[test]
    fn test_empty_table_has_no_bounds() {
        let table = TargetTable::default();
        assert!(table.distance_bounds().is_none());
        assert!(table.is_empty());
    }
}
