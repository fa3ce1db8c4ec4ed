use std::path::Path;

use legalbrain_core::models::pack::PackFile;

use crate::error::ClientError;

/// Read a legal pack from disk. Only `.pdf` and `.zip` files are accepted.
pub async fn read_pack_file(path: &Path) -> Result<PackFile, ClientError> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| ClientError::InvalidPath(path.display().to_string()))?;

    // Check the extension before reading what may be a large file.
    PackFile::new(file_name.clone(), Vec::new())?;

    let bytes = tokio::fs::read(path).await.map_err(|source| ClientError::Io {
        path: path.display().to_string(),
        source,
    })?;

    tracing::debug!(file_name = %file_name, bytes = bytes.len(), "read pack file");
    Ok(PackFile::new(file_name, bytes)?)
}
