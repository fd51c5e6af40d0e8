/// Annotation module
///
/// This module handles the per-call pipeline:
/// - Loading input images from the dataset (loader.rs)
/// - The viridis color scale (colormap.rs)
/// - Composing the annotated figure (figure.rs)
/// - The plot operation tying render and display together

pub mod colormap;
pub mod figure;
pub mod loader;

pub use figure::{render_figure, render_figure_async, Figure};
pub use loader::{load_image, LoadImageError};

use thiserror::Error;

use crate::dataset::DatasetPaths;
use crate::table::TargetTable;
use crate::ui;

/// Errors raised by the plot operation
#[derive(Debug, Error)]
pub enum PlotError {
    #[error(transparent)]
    Load(#[from] LoadImageError),
    #[error("failed to open figure window: {0}")]
    Display(#[from] iced::Error),
}

/// Render the annotated figure for an identifier and display it in a native
/// window, blocking until the window closes.
///
/// An identifier with no table row displays nothing and returns `Ok(())`;
/// the skipped plot is visible in the log. A missing or undecodable image
/// file fails before any window opens.
pub fn plot_image_with_distance_crosshair(
    table: &TargetTable,
    paths: &DatasetPaths,
    image_id: &str,
) -> Result<(), PlotError> {
    match render_figure(table, paths, image_id)? {
        Some(figure) => {
            log::info!(
                "displaying figure for {} (distance {})",
                figure.image_id,
                figure.distance
            );
            ui::show(figure)?;
        }
        None => {
            // render_figure already warned; nothing to display
        }
    }
    Ok(())
}
