//! The two append-only application log files.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

pub const GENERAL_LOG: &str = "general.log";
pub const ERRORS_LOG: &str = "errors.log";

/// Shown in place of a log file that is missing or unreadable.
pub const NO_ENTRIES_PLACEHOLDER: &str = "No hay registros.";

/// Raw text of both log files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogContents {
    pub general: String,
    pub errors: String,
}

/// Paths of the general and error logs.
#[derive(Debug, Clone)]
pub struct LogFiles {
    general: PathBuf,
    errors: PathBuf,
}

impl LogFiles {
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            general: dir.join(GENERAL_LOG),
            errors: dir.join(ERRORS_LOG),
        }
    }

    pub fn general_path(&self) -> &Path {
        &self.general
    }

    pub fn errors_path(&self) -> &Path {
        &self.errors
    }

    /// File contents, with the placeholder for a missing file.
    pub fn read(&self) -> LogContents {
        LogContents {
            general: read_or_placeholder(&self.general),
            errors: read_or_placeholder(&self.errors),
        }
    }

    /// Non-empty lines of each file; a missing file yields no lines.
    pub fn lines(&self) -> (Vec<String>, Vec<String>) {
        (read_lines(&self.general), read_lines(&self.errors))
    }

    /// Truncate both files. A missing file is created empty.
    pub fn clear(&self) -> io::Result<()> {
        for path in [&self.general, &self.errors] {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(path)?;
        }
        Ok(())
    }
}

fn read_or_placeholder(path: &Path) -> String {
    match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            tracing::debug!(path = %path.display(), error = %err, "log file unavailable");
            NO_ENTRIES_PLACEHOLDER.to_string()
        }
    }
}

fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .map(|text| {
            text.lines()
                .filter(|l| !l.trim().is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
