//! Where usertable keeps its database and logs.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use directories::ProjectDirs;

const STORE_DB: &str = "store.db";
const LATEST_LOG: &str = "latest.log";

/// Archived logs kept next to `latest.log`.
const KEPT_LOGS: usize = 25;

/// Resolved locations for the store and the log files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    data: PathBuf,
    logs: PathBuf,
}

impl AppPaths {
    /// Platform data and cache directories, or the working directory when the
    /// home directory is unknown.
    pub fn resolve() -> Self {
        match ProjectDirs::from("dev", "norpie", "usertable") {
            Some(dirs) => Self {
                data: dirs.data_dir().to_path_buf(),
                logs: dirs.cache_dir().to_path_buf(),
            },
            None => Self::in_dir("."),
        }
    }

    /// Keep everything under one directory.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            data: dir.clone(),
            logs: dir,
        }
    }

    pub fn store_db(&self) -> PathBuf {
        self.data.join(STORE_DB)
    }

    pub fn log_file(&self) -> PathBuf {
        self.logs.join(LATEST_LOG)
    }

    /// Create both directories.
    pub fn create_dirs(&self) -> io::Result<()> {
        fs::create_dir_all(&self.data)?;
        fs::create_dir_all(&self.logs)
    }

    /// Archive the previous `latest.log` under `stamp` and prune old archives.
    ///
    /// Failures are ignored; a missing log directory just means nothing to rotate.
    pub fn rotate_logs(&self, stamp: &str) {
        let latest = self.log_file();
        if latest.exists() {
            let _ = fs::rename(&latest, self.logs.join(format!("{stamp}.log")));
        }

        for path in stale_logs(&self.logs, KEPT_LOGS) {
            let _ = fs::remove_file(path);
        }
    }
}

/// Archived logs in `dir` beyond the newest `keep`, oldest first.
fn stale_logs(dir: &Path, keep: usize) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut archived: Vec<(Option<SystemTime>, PathBuf)> = entries
        .filter_map(Result::ok)
        .filter(|entry| {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            name.ends_with(".log") && name != LATEST_LOG
        })
        .map(|entry| {
            let modified = entry.metadata().and_then(|m| m.modified()).ok();
            (modified, entry.path())
        })
        .collect();

    archived.sort();
    let excess = archived.len().saturating_sub(keep);
    archived.into_iter().take(excess).map(|(_, path)| path).collect()
}
