//! Locate the downloaded client secret and move it into the config
//! directory.
//!
//! The browser names the file `client_secret_<id>.json`; repeated attempts
//! leave `client_secret (1).json` style siblings behind, so the scan picks
//! the most recently created match.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use anyhow::{Context, Result};

/// Glob matched against the downloads directory.
pub const CREDENTIALS_GLOB: &str = "client_secret*.json";

fn creation_time(path: &Path) -> Option<SystemTime> {
    let meta = std::fs::metadata(path).ok()?;
    // Not every filesystem reports a birth time; fall back to mtime.
    meta.created().or_else(|_| meta.modified()).ok()
}

/// Return the most recently created `client_secret*.json` in `dir`,
/// or `None` when nothing matches.
pub fn newest_download(dir: &Path) -> Result<Option<PathBuf>> {
    let pattern = dir.join(CREDENTIALS_GLOB);
    let entries = glob::glob(&pattern.to_string_lossy())
        .with_context(|| format!("bad glob pattern: {}", pattern.display()))?;

    let mut newest: Option<(SystemTime, PathBuf)> = None;
    for entry in entries.flatten() {
        let Some(ctime) = creation_time(&entry) else {
            continue;
        };
        let newer = match &newest {
            Some((best, _)) => ctime > *best,
            None => true,
        };
        if newer {
            newest = Some((ctime, entry));
        }
    }
    Ok(newest.map(|(_, path)| path))
}

/// Move `src` to `dest`, overwriting `dest` and creating its parent
/// directory. Falls back to copy + remove when rename crosses filesystems.
pub fn move_file(src: &Path, dest: &Path) -> Result<()> {
    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    if std::fs::rename(src, dest).is_err() {
        std::fs::copy(src, dest)
            .with_context(|| format!("copying {} to {}", src.display(), dest.display()))?;
        std::fs::remove_file(src)
            .with_context(|| format!("removing {}", src.display()))?;
    }
    Ok(())
}

/// Scan `downloads` and install the newest client secret at `dest`.
///
/// Returns the moved source path, or `None` when no file matched (in which
/// case nothing is touched).
pub fn install_credentials(downloads: &Path, dest: &Path) -> Result<Option<PathBuf>> {
    match newest_download(downloads)? {
        Some(found) => {
            move_file(&found, dest)?;
            Ok(Some(found))
        }
        None => Ok(None),
    }
}
