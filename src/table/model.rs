/// Shared data structures for the target table
///
/// These structs represent one annotated image: its identifier, the pixel
/// location of the target, and the measured distance. Location cells arrive
/// in two shapes depending on how the dataset was produced, so the raw cell
/// is a tagged variant that gets resolved into plain coordinates exactly
/// once, when the table is loaded.

use thiserror::Error;

/// A target point in image pixel coordinates.
///
/// Origin is the top-left corner of the image, x grows right, y grows down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub x: i32,
    pub y: i32,
}

/// A location cell as it appears in the source data.
///
/// Exported tables store the pair as text like `"[512, 384]"`; tables built
/// in memory already carry the two numbers.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationCell {
    /// Bracketed, comma-separated text, e.g. `"[512, 384]"`
    Text(String),
    /// An already-split coordinate pair
    Pair(i32, i32),
}

/// Failure to turn a textual location cell into coordinates
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationParseError {
    #[error("expected two comma-separated values, found {0}")]
    TokenCount(usize),
    #[error("invalid coordinate {0:?}")]
    Coordinate(String),
}

impl LocationCell {
    /// Resolve the cell into plain coordinates.
    ///
    /// Text cells are parsed by stripping a leading `[` and trailing `]`,
    /// splitting on `", "`, and parsing the two tokens as integers. Pair
    /// cells pass through untouched.
    pub fn resolve(&self) -> Result<Location, LocationParseError> {
        match self {
            LocationCell::Pair(x, y) => Ok(Location { x: *x, y: *y }),
            LocationCell::Text(text) => parse_location_text(text),
        }
    }
}

/// Parse a `"[x, y]"` style location string.
fn parse_location_text(text: &str) -> Result<Location, LocationParseError> {
    let trimmed = text
        .trim()
        .trim_start_matches('[')
        .trim_end_matches(']');

    let tokens: Vec<&str> = trimmed.split(", ").collect();
    if tokens.len() != 2 {
        return Err(LocationParseError::TokenCount(tokens.len()));
    }

    let x = tokens[0]
        .trim()
        .parse::<i32>()
        .map_err(|_| LocationParseError::Coordinate(tokens[0].to_string()))?;
    let y = tokens[1]
        .trim()
        .parse::<i32>()
        .map_err(|_| LocationParseError::Coordinate(tokens[1].to_string()))?;

    Ok(Location { x, y })
}

/// One row of the target table, with the location already resolved
#[derive(Debug, Clone, PartialEq)]
pub struct TargetRow {
    /// Identifier referencing `{image_id}.jpg` in the image directory
    pub image_id: String,
    /// Target point on the image
    pub location: Location,
    /// Measured distance for this image
    pub distance: f64,
}

impl TargetRow {
    /// Build a row from a raw location cell, resolving it immediately.
    pub fn new(
        image_id: impl Into<String>,
        location: LocationCell,
        distance: f64,
    ) -> Result<Self, LocationParseError> {
        Ok(TargetRow {
            image_id: image_id.into(),
            location: location.resolve()?,
            distance,
        })
    }
}
