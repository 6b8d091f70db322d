// src/storage/file_export.rs
//! Writes a certificate's attachments to a local directory.
//!
//! Attachments arrive base64-encoded inside the certificate. Only the final
//! path component of each file name is used, so a crafted name cannot write
//! outside the target directory.

use crate::error::ExportError;
use crate::models::certificate::FileRecord;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// Decodes and writes each file into `dir`, creating it if needed.
///
/// # Arguments
/// * `files` - Attachments in display order
/// * `dir` - Target directory
///
/// # Returns
/// Paths of the written files, in input order.
///
/// # Errors
/// - [`ExportError::Decode`] for malformed payloads
/// - [`ExportError::InvalidName`] for names without a usable file component
/// - [`ExportError::Io`] if the directory or a file cannot be written
pub fn export_files(files: &[FileRecord], dir: &Path) -> Result<Vec<PathBuf>, ExportError> {
    fs::create_dir_all(dir)?;

    let mut written = Vec::with_capacity(files.len());
    for file in files {
        let name = Path::new(&file.file_name)
            .file_name()
            .ok_or_else(|| ExportError::InvalidName(file.file_name.clone()))?;
        let bytes = file.decode_data().map_err(|source| ExportError::Decode {
            file: file.file_name.clone(),
            source,
        })?;

        let path = dir.join(name);
        fs::write(&path, &bytes)?;
        info!("exported {} ({} bytes)", path.display(), bytes.len());
        written.push(path);
    }
    Ok(written)
}
