//! Filesystem writes for new entries.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::domain::errors::DailyError;

/// Write `contents` to `path` unless a file is already there.
///
/// The existence check is advisory: two concurrent runs can both pass it before either writes.
pub fn write_new_entry(path: &Path, contents: &str) -> Result<()> {
    if path.exists() {
        return Err(DailyError::AlreadyExists {
            path: path.to_path_buf(),
        }
        .into());
    }

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create entry directory: {}", parent.display()))?;
    }
    fs::write(path, contents)
        .with_context(|| format!("failed to write daily entry to {}", path.display()))?;
    Ok(())
}
