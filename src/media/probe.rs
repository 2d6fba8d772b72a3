// SPDX-License-Identifier: MPL-2.0
//! Natural image size lookup for hosts that load images from disk.
//!
//! Only the image header is read, so probing stays cheap even for large files.
//! The async variant moves the blocking read off the caller's task, keeping
//! input handling responsive while sizing is pending.

use crate::error::{Error, Result};
use iced_core::Size;
use std::path::{Path, PathBuf};

/// Reads the natural width and height of the image at `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or its format is not recognized.
pub fn natural_size(path: &Path) -> Result<Size> {
    let (width, height) = image_rs::image_dimensions(path)?;
    if width == 0 || height == 0 {
        return Err(Error::Image(format!(
            "{} reports an empty size",
            path.display()
        )));
    }
    #[allow(clippy::cast_precision_loss)]
    Ok(Size::new(width as f32, height as f32))
}

/// Async wrapper around [`natural_size`] running on tokio's blocking pool.
///
/// # Errors
///
/// Same as [`natural_size`]; a panicked or cancelled worker is reported as [`Error::Io`].
pub async fn natural_size_async(path: PathBuf) -> Result<Size> {
    tokio::task::spawn_blocking(move || natural_size(&path))
        .await
        .map_err(|err| Error::Io(err.to_string()))?
}
