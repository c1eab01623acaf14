//! Reading picture files from disk

use std::path::Path;

use veridia_domain::{DomainError, MediaFile};

use crate::error::{Error, Result};

/// Reads a picture file into a [`MediaFile`], guessing the MIME type from
/// the file extension.
///
/// # Errors
///
/// Returns [`Error::Validation`] when the file cannot be read.
pub async fn read_media(path: impl AsRef<Path>) -> Result<MediaFile> {
    let path = path.as_ref();
    let content = tokio::fs::read(path).await.map_err(|e| {
        Error::Validation(DomainError::MissingFile(format!(
            "{}: {e}",
            path.display()
        )))
    })?;

    let mime_type = mime_guess::from_path(path)
        .first_or_octet_stream()
        .to_string();

    Ok(MediaFile { content, mime_type })
}
