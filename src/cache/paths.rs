// Cache path utilities.
// Resolves where the activity database lives on this platform.

use std::path::PathBuf;

use directories::ProjectDirs;

/// File name of the activity database inside the cache directory.
pub const DB_FILE_NAME: &str = "activity.db";

/// Get the base cache directory (~/.cache/gh-activity on Linux).
pub fn cache_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "gh-activity").map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Path to the activity database.
pub fn db_path() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join(DB_FILE_NAME))
}
