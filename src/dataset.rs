/// Dataset layout on disk
///
/// A dataset is a folder holding `train.csv` (the target table) and a
/// `train/` directory of `{ImageID}.jpg` files. The default root is the
/// relative `data/` directory.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Where the target table and the image directory live
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetPaths {
    root: PathBuf,
}

impl DatasetPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DatasetPaths { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the target table file
    pub fn target_csv(&self) -> PathBuf {
        self.root.join("train.csv")
    }

    /// Directory holding the input images
    pub fn image_dir(&self) -> PathBuf {
        self.root.join("train")
    }

    /// Path of the image file for an identifier
    pub fn image_path(&self, image_id: &str) -> PathBuf {
        self.image_dir().join(format!("{}.jpg", image_id))
    }

    /// Count the `.jpg` files under the image directory.
    pub fn count_disk_images(&self) -> usize {
        WalkDir::new(self.image_dir())
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|entry| {
                entry.path().is_file()
                    && entry
                        .path()
                        .extension()
                        .map(|ext| ext.to_string_lossy().to_lowercase() == "jpg")
                        .unwrap_or(false)
            })
            .count()
    }
}

impl Default for DatasetPaths {
    fn default() -> Self {
        DatasetPaths::new("data")
    }
}
