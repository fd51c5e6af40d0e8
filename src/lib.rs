/// target-explorer: browse an image dataset annotated with target locations
/// and distances.
///
/// The dataset is a folder holding a `train.csv` target table and a `train/`
/// directory of JPEGs named by identifier. The library offers two
/// operations: `load_image` decodes the image for an identifier, and
/// `plot_image_with_distance_crosshair` renders the image with a
/// distance-colored crosshair at the target location and displays it in a
/// native window. The `target-explorer` binary wraps the same pipeline in an
/// interactive browser.

pub mod annotate;
pub mod dataset;
pub mod settings;
pub mod table;
pub mod ui;

pub use annotate::{
    load_image, plot_image_with_distance_crosshair, render_figure, Figure, LoadImageError,
    PlotError,
};
pub use dataset::DatasetPaths;
pub use table::{DistanceBounds, Location, TargetRow, TargetTable};
