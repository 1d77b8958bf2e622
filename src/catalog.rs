use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("image directory {path} is unreadable: {source}")]
    ImageDir { path: PathBuf, source: io::Error },
    #[error("no images in directory: {0}")]
    EmptyImageDir(PathBuf),
    #[error("captions file {path} is unreadable: {source}")]
    CaptionsRead { path: PathBuf, source: io::Error },
    #[error("captions file {path} is not a JSON list of strings: {source}")]
    CaptionsParse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// The image filenames and caption strings the bot serves from, loaded once
/// at startup and immutable for the rest of the process.
#[derive(Debug, Default, Clone)]
pub struct Catalog {
    pub images: Vec<String>,
    pub captions: Vec<String>,
}

impl Catalog {
    /// Loads the catalog, degrading to an empty one on any failure. A
    /// captions failure empties the already-loaded image list as well, so
    /// requests see a single uniform "no data" state.
    pub fn load(image_dir: &Path, captions_file: &Path) -> Self {
        match Self::try_load(image_dir, captions_file) {
            Ok(catalog) => catalog,
            Err(e) => {
                error!("Catalog unavailable: {}", e);
                Self::default()
            }
        }
    }

    fn try_load(image_dir: &Path, captions_file: &Path) -> Result<Self, CatalogError> {
        let read_dir = fs::read_dir(image_dir).map_err(|source| CatalogError::ImageDir {
            path: image_dir.to_path_buf(),
            source,
        })?;

        let mut images = Vec::new();
        for entry in read_dir {
            let entry = entry.map_err(|source| CatalogError::ImageDir {
                path: image_dir.to_path_buf(),
                source,
            })?;
            if entry.path().is_file() {
                images.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        if images.is_empty() {
            return Err(CatalogError::EmptyImageDir(image_dir.to_path_buf()));
        }
        // Directory iteration order is platform-defined; sort for a stable
        // order within a run.
        images.sort();

        let raw =
            fs::read_to_string(captions_file).map_err(|source| CatalogError::CaptionsRead {
                path: captions_file.to_path_buf(),
                source,
            })?;
        let captions: Vec<String> =
            serde_json::from_str(&raw).map_err(|source| CatalogError::CaptionsParse {
                path: captions_file.to_path_buf(),
                source,
            })?;

        Ok(Self { images, captions })
    }
}
