//! Filesystem helpers shared by the installers.

use std::path::Path;

use crate::error::{Result, ToolupError};

/// Create a directory, including missing parents.
pub fn create_directory(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path)?;
    Ok(())
}

/// Remove a file or directory tree. Missing paths are an error.
pub fn remove_path(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(ToolupError::LocationMissing(path.to_path_buf()));
    }
    if path.is_dir() {
        std::fs::remove_dir_all(path)?;
    } else {
        std::fs::remove_file(path)?;
    }
    Ok(())
}

/// Copy a single file into place, creating the parent directory if needed.
pub fn copy_file(source: &Path, dest: &Path) -> Result<()> {
    if !source.exists() {
        return Err(ToolupError::LocationMissing(source.to_path_buf()));
    }
    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::copy(source, dest)?;
    Ok(())
}

/// Move a path to a new location. Falls back to copy-and-delete when the
/// rename crosses filesystems (the scratch dir is often a different mount).
pub fn move_path(source: &Path, dest: &Path) -> Result<()> {
    if !source.exists() {
        return Err(ToolupError::LocationMissing(source.to_path_buf()));
    }
    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if std::fs::rename(source, dest).is_ok() {
        return Ok(());
    }

    copy_tree(source, dest)?;
    remove_path(source)
}

fn copy_tree(source: &Path, dest: &Path) -> Result<()> {
    if source.is_dir() {
        std::fs::create_dir_all(dest)?;
        for entry in std::fs::read_dir(source)? {
            let entry = entry?;
            copy_tree(&entry.path(), &dest.join(entry.file_name()))?;
        }
    } else {
        std::fs::copy(source, dest)?;
    }
    Ok(())
}

/// Merge-move a directory tree into an existing target, overwriting files
/// that are already there. Used to relocate prebuilt distributions (node,
/// llvm) into the install prefix.
pub fn merge_move(source: &Path, dest: &Path) -> Result<()> {
    if !source.exists() {
        return Err(ToolupError::LocationMissing(source.to_path_buf()));
    }
    if !source.is_dir() {
        return Err(ToolupError::NotADirectory(source.to_path_buf()));
    }

    std::fs::create_dir_all(dest)?;

    for entry in std::fs::read_dir(source)? {
        let entry = entry?;
        let target = dest.join(entry.file_name());

        if entry.path().is_dir() {
            merge_move(&entry.path(), &target)?;
        } else {
            if target.exists() {
                std::fs::remove_file(&target)?;
            }
            move_file(&entry.path(), &target)?;
        }
    }

    std::fs::remove_dir_all(source)?;
    Ok(())
}

fn move_file(source: &Path, dest: &Path) -> Result<()> {
    if std::fs::rename(source, dest).is_ok() {
        return Ok(());
    }

    std::fs::copy(source, dest)?;
    std::fs::remove_file(source)?;
    Ok(())
}
