/// Input image loader
///
/// Images are loaded fresh per call and never cached; each figure owns its
/// own decoded pixels. The existence check runs before the decoder so a
/// missing file surfaces as `ImageNotFound` rather than a decode failure.

use std::path::PathBuf;

use image::DynamicImage;
use thiserror::Error;

use crate::dataset::DatasetPaths;

/// Errors raised while loading an input image
#[derive(Debug, Error)]
pub enum LoadImageError {
    #[error("image file not found: {}", path.display())]
    ImageNotFound { path: PathBuf },
    #[error("failed to decode image {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
}

/// Load the image for an identifier from the dataset's image directory.
///
/// The path is `{image_dir}/{image_id}.jpg`. Nothing constrains the
/// identifier to exist in the target table here.
pub fn load_image(paths: &DatasetPaths, image_id: &str) -> Result<DynamicImage, LoadImageError> {
    let path = paths.image_path(image_id);

    if !path.exists() {
        return Err(LoadImageError::ImageNotFound { path });
    }

    let decoded = image::open(&path).map_err(|source| LoadImageError::Decode {
        path: path.clone(),
        source,
    })?;

    log::debug!(
        "loaded image {} ({}x{})",
        path.display(),
        decoded.width(),
        decoded.height()
    );

    Ok(decoded)
}
