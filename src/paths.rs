//! Centralised nettwin path resolution.
//!
//! Priority for the logbook database:
//!   1. `NETTWIN_DB_PATH` env var (if set and non-empty)
//!   2. `dirs::data_local_dir()/nettwin/logbook.db` (platform default)
//!
//! `NETTWIN_CREW_PATH` points the pipeline at an external crew file; when it
//! is unset the built-in crew is used.

use std::path::PathBuf;

/// Returns the logbook database path, or `None` if the platform provides no
/// local data directory and no override is set.
pub fn db_path() -> Option<PathBuf> {
    if let Ok(p) = std::env::var("NETTWIN_DB_PATH")
        && !p.is_empty()
    {
        return Some(PathBuf::from(p));
    }
    dirs::data_local_dir().map(|d| d.join("nettwin").join("logbook.db"))
}

/// Returns the crew file override from `NETTWIN_CREW_PATH`, if set and
/// non-empty.
pub fn crew_path() -> Option<PathBuf> {
    match std::env::var("NETTWIN_CREW_PATH") {
        Ok(p) if !p.is_empty() => Some(PathBuf::from(p)),
        _ => None,
    }
}
