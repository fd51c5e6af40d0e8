/// Figure composition
///
/// A figure is the finished render product for one identifier: the decoded
/// image with the crosshair stamped in, plus the values the display layer
/// needs for the title and the colorbar. Composition is pure pixel work so
/// it can be tested without opening a window.

use image::{Rgba, RgbaImage};
use tokio::task;

use crate::dataset::DatasetPaths;
use crate::table::{DistanceBounds, Location, TargetTable};

use super::colormap::viridis;
use super::loader::{self, LoadImageError};

/// Crosshair arm length in pixels, measured from the center
const MARKER_ARM: i64 = 12;
/// Half-thickness of the white edge stroke
const MARKER_EDGE: i64 = 2;
/// Half-thickness of the colored core stroke
const MARKER_CORE: i64 = 1;

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// The rendered figure for one identifier
#[derive(Debug, Clone)]
pub struct Figure {
    /// Identifier the figure was rendered for
    pub image_id: String,
    /// Base image pixels with the crosshair drawn in
    pub pixels: RgbaImage,
    /// Target point the marker sits on
    pub location: Location,
    /// The matched row's distance
    pub distance: f64,
    /// Distance normalized into [0, 1] over the table-wide bounds
    pub normalized: f64,
    /// Table-wide distance bounds, the colorbar's range
    pub bounds: DistanceBounds,
    /// Window/figure title
    pub title: String,
}

/// Render the annotated figure for an identifier.
///
/// The image is loaded first, so a missing file fails here even when the
/// identifier is absent from the table. An identifier with no table row
/// renders nothing: the call returns `Ok(None)` and logs a warning.
pub fn render_figure(
    table: &TargetTable,
    paths: &DatasetPaths,
    image_id: &str,
) -> Result<Option<Figure>, LoadImageError> {
    let image = loader::load_image(paths, image_id)?;

    let row = match table.find(image_id) {
        Some(row) => row,
        None => {
            log::warn!("no target row for image {:?}; nothing to plot", image_id);
            return Ok(None);
        }
    };

    // Color scale spans the whole table, not just the matched row
    let bounds = table
        .distance_bounds()
        .unwrap_or_else(|| DistanceBounds::degenerate(row.distance));
    let normalized = bounds.normalize(row.distance);

    let mut pixels = image.to_rgba8();
    let [r, g, b] = viridis(normalized);
    draw_crosshair(&mut pixels, row.location, Rgba([r, g, b, 255]));

    let title = format!(
        "Image {} - Target Location: ({}, {}) - Distance: {}",
        row.image_id, row.location.x, row.location.y, row.distance
    );

    Ok(Some(Figure {
        image_id: row.image_id.clone(),
        pixels,
        location: row.location,
        distance: row.distance,
        normalized,
        bounds,
        title,
    }))
}

/// Async wrapper running the render on a worker thread.
pub async fn render_figure_async(
    table: TargetTable,
    paths: DatasetPaths,
    image_id: String,
) -> Result<Option<Figure>, String> {
    task::spawn_blocking(move || {
        render_figure(&table, &paths, &image_id).map_err(|e| e.to_string())
    })
    .await
    .map_err(|e| format!("Task join error: {}", e))?
}

/// Stamp the 'x'-shaped marker at the target location.
///
/// The white edge goes down first, the colored core on top, both clipped
/// silently at the image borders.
fn draw_crosshair(pixels: &mut RgbaImage, location: Location, color: Rgba<u8>) {
    let cx = location.x as i64;
    let cy = location.y as i64;

    for i in -MARKER_ARM..=MARKER_ARM {
        stamp(pixels, cx + i, cy + i, MARKER_EDGE, WHITE);
        stamp(pixels, cx + i, cy - i, MARKER_EDGE, WHITE);
    }
    for i in -MARKER_ARM..=MARKER_ARM {
        stamp(pixels, cx + i, cy + i, MARKER_CORE, color);
        stamp(pixels, cx + i, cy - i, MARKER_CORE, color);
    }
}

/// Fill a square of the given radius around (cx, cy), skipping pixels that
/// fall outside the image.
fn stamp(pixels: &mut RgbaImage, cx: i64, cy: i64, radius: i64, color: Rgba<u8>) {
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            let x = cx + dx;
            let y = cy + dy;
            if x >= 0 && y >= 0 && (x as u32) < pixels.width() && (y as u32) < pixels.height() {
                pixels.put_pixel(x as u32, y as u32, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::TargetRow;
    use image::RgbImage;

    const BASE: Rgba<u8> = Rgba([0, 0, 0, 255]);

    fn fixture_dataset(ids: &[&str]) -> (tempfile::TempDir, DatasetPaths) {
        let dir = tempfile::tempdir().unwrap();
        let paths = DatasetPaths::new(dir.path());
        std::fs::create_dir_all(paths.image_dir()).unwrap();
        for id in ids {
            let img = RgbImage::from_pixel(64, 64, image::Rgb([0, 0, 0]));
            img.save(paths.image_path(id)).unwrap();
        }
        (dir, paths)
    }

    fn row(id: &str, x: i32, y: i32, distance: f64) -> TargetRow {
        TargetRow {
            image_id: id.to_string(),
            location: Location { x, y },
            distance,
        }
    }

    #[test]
    fn test_crosshair_geometry() {
        let mut pixels = RgbaImage::from_pixel(64, 64, BASE);
        let color = Rgba([10, 200, 50, 255]);

        draw_crosshair(&mut pixels, Location { x: 30, y: 30 }, color);

        // Center of the 'x': colored core
        assert_eq!(*pixels.get_pixel(30, 30), color);
        // Just off the diagonals: white edge
        assert_eq!(*pixels.get_pixel(33, 30), WHITE);
        // Well away from the marker: untouched base
        assert_eq!(*pixels.get_pixel(50, 30), BASE);
    }

    #[test]
    fn test_render_places_marker_at_location() {
        let (_dir, paths) = fixture_dataset(&["img1"]);
        let table = TargetTable::from_rows(vec![row("img1", 30, 30, 5.0)]);

        let figure = render_figure(&table, &paths, "img1").unwrap().unwrap();

        assert!(figure.title.contains("img1"));
        assert!(figure.title.contains("(30, 30)"));
        assert!(figure.title.contains("Distance: 5"));
        assert_eq!(figure.location, Location { x: 30, y: 30 });

        // Single-row table: degenerate bounds, midpoint color. The marker is
        // stamped after decoding, so its pixels are exact.
        let [r, g, b] = viridis(0.5);
        assert_eq!(figure.normalized, 0.5);
        assert_eq!(*figure.pixels.get_pixel(30, 30), Rgba([r, g, b, 255]));
        assert_eq!(*figure.pixels.get_pixel(33, 30), WHITE);
        // Away from the marker the black fixture survives, modulo JPEG noise
        let base = figure.pixels.get_pixel(50, 30);
        assert!(base.0[..3].iter().all(|&c| c < 8), "unexpected {:?}", base);
    }

    #[test]
    fn test_render_uses_table_wide_bounds() {
        let (_dir, paths) = fixture_dataset(&["near"]);
        let table = TargetTable::from_rows(vec![
            row("near", 10, 10, 0.0),
            row("far", 10, 10, 10.0),
        ]);

        let figure = render_figure(&table, &paths, "near").unwrap().unwrap();
        assert_eq!(figure.bounds, DistanceBounds { min: 0.0, max: 10.0 });
        assert_eq!(figure.normalized, 0.0);
        let [r, g, b] = viridis(0.0);
        assert_eq!(*figure.pixels.get_pixel(10, 10), Rgba([r, g, b, 255]));
    }

    #[test]
    fn test_absent_identifier_renders_nothing() {
        let (_dir, paths) = fixture_dataset(&["img999"]);
        let table = TargetTable::from_rows(vec![row("img1", 5, 5, 1.0), row("img2", 6, 6, 2.0)]);

        // Image exists on disk but has no table row: explicit empty result
        assert!(render_figure(&table, &paths, "img999").unwrap().is_none());
    }

    #[test]
    fn test_missing_image_fails_before_lookup() {
        let (_dir, paths) = fixture_dataset(&[]);
        let table = TargetTable::from_rows(vec![row("img1", 5, 5, 1.0)]);

        // The row exists, the file does not; the lookup must not mask the
        // missing file
        assert!(matches!(
            render_figure(&table, &paths, "img1"),
            Err(LoadImageError::ImageNotFound { .. })
        ));
    }

    #[test]
    fn test_marker_clips_at_border() {
        let (_dir, paths) = fixture_dataset(&["edge"]);
        let table = TargetTable::from_rows(vec![row("edge", 0, 0, 1.0)]);

        let figure = render_figure(&table, &paths, "edge").unwrap().unwrap();
        // Center still stamped, nothing panicked on the out-of-range arm
        let [r, g, b] = viridis(0.5);
        assert_eq!(*figure.pixels.get_pixel(0, 0), Rgba([r, g, b, 255]));
    }

    #[test]
    fn test_first_match_renders() {
        let (_dir, paths) = fixture_dataset(&["dup"]);
        let table = TargetTable::from_rows(vec![row("dup", 20, 20, 1.0), row("dup", 40, 40, 9.0)]);

        let figure = render_figure(&table, &paths, "dup").unwrap().unwrap();
        assert_eq!(figure.location, Location { x: 20, y: 20 });
        assert_eq!(figure.distance, 1.0);
    }
}
