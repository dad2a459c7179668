//! Atomic file I/O with advisory locking

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use fs2::FileExt;

use crate::error::{Error, Result};
use crate::node::File;
use crate::render::RenderStyle;

/// Write content atomically to a file with locking.
///
/// Uses write-to-temp-then-rename so readers never observe a partial file.
/// The temporary file is removed when any step after its creation fails.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let file_name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
    let temp_path = path.with_file_name(format!(".{file_name}.{}.tmp", std::process::id()));

    let temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .map_err(|e| Error::io(&temp_path, e))?;

    let result = write_locked(temp_file, path, &temp_path, content)
        .and_then(|()| fs::rename(&temp_path, path).map_err(|e| Error::io(path, e)));

    if result.is_err() {
        fs::remove_file(&temp_path)
            .inspect_err(|e| {
                tracing::debug!(path = %temp_path.display(), error = %e, "Could not remove temporary file");
            })
            .ok();
    }
    result
}

/// Lock, fill and flush the temporary file; the lock is released on drop.
fn write_locked(mut temp_file: fs::File, path: &Path, temp_path: &Path, content: &[u8]) -> Result<()> {
    temp_file.lock_exclusive().map_err(|_| Error::LockFailed {
        path: path.to_path_buf(),
    })?;
    temp_file.write_all(content).map_err(|e| Error::io(temp_path, e))?;
    temp_file.sync_all().map_err(|e| Error::io(temp_path, e))?;
    FileExt::unlock(&temp_file).map_err(|_| Error::LockFailed {
        path: path.to_path_buf(),
    })
}

impl File {
    /// Read and parse a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "Loading configuration");
        let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::parse(&text)
    }

    /// Render with the default style and write atomically.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        self.save_with(path, &RenderStyle::default())
    }

    /// Render with `style` and write atomically.
    pub fn save_with(&self, path: impl AsRef<Path>, style: &RenderStyle) -> Result<()> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), nodes = self.nodes.len(), "Saving configuration");
        write_atomic(path, self.render_with(style).as_bytes())
    }
}
