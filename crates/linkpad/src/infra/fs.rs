//! Buffered file access shared by the text operations and the notebook.

use std::fs;
use std::io;
use std::path::Path;

use anyhow::{Context, Result};

/// Read an entire UTF-8 file into memory.
pub fn read_text(path: &Path) -> io::Result<String> {
    let contents = fs::read_to_string(path)?;
    tracing::debug!(path = %path.display(), bytes = contents.len(), "read file");
    Ok(contents)
}

/// Write `contents` to `path`, creating parent directories as needed.
pub fn write_text(path: &Path, contents: &str) -> Result<()> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create directory {}", dir.display()))?;
    }
    fs::write(path, contents)
        .with_context(|| format!("failed to write {}", path.display()))?;
    tracing::debug!(path = %path.display(), bytes = contents.len(), "wrote file");
    Ok(())
}
