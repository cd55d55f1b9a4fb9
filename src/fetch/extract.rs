//! Tar archive extraction.
//!
//! Source tarballs come as `.tar.gz` (GNU tools) or `.tar.xz` (node, llvm
//! binary distributions). Extraction preserves the archive's top-level
//! directory; the installers move that directory into place afterwards.

use std::io::Read;
use std::path::{Component, Path};

use flate2::read::GzDecoder;
use tar::Archive;
use xz2::read::XzDecoder;

use crate::error::{Result, ToolupError};

/// Extract an archive into `dest`, picking the decompressor from the file
/// extension (`.tar.gz`/`.tgz` or `.tar.xz`/`.txz`).
pub fn extract_archive(archive_path: &Path, dest: &Path) -> Result<()> {
    let name = archive_path.to_string_lossy();

    let file = std::fs::File::open(archive_path)?;
    if name.ends_with(".tar.gz") || name.ends_with(".tgz") {
        unpack(Archive::new(GzDecoder::new(file)), dest)
    } else if name.ends_with(".tar.xz") || name.ends_with(".txz") {
        unpack(Archive::new(XzDecoder::new(file)), dest)
    } else {
        Err(ToolupError::Download {
            url: name.to_string(),
            reason: "unsupported archive format".to_string(),
        })
    }
}

fn unpack<R: Read>(mut archive: Archive<R>, dest: &Path) -> Result<()> {
    std::fs::create_dir_all(dest)?;

    for entry in archive.entries()? {
        let mut entry = entry?;
        let entry_path = entry.path()?.into_owned();

        // Refuse entries that would land outside the destination.
        if entry_path.is_absolute()
            || entry_path
                .components()
                .any(|c| matches!(c, Component::ParentDir))
        {
            return Err(ToolupError::Other(anyhow::anyhow!(
                "refusing to extract entry with unsafe path: {}",
                entry_path.display()
            )));
        }

        entry.unpack_in(dest)?;
    }

    Ok(())
}
