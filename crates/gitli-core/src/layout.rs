//! On-disk layout of a gitli storage directory
//!
//! All state lives in five flat files under `.gitli/`. Missing files are an
//! error everywhere except [`Layout::init`], which is the only place that
//! creates them.

use crate::{Error, Result};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Storage directory name, relative to the repository root
pub const GITLI_DIR: &str = ".gitli";

pub const ISSUES_FILE: &str = ".issues";
pub const OPEN_FILE: &str = ".issues-open";
pub const LAST_FILE: &str = ".issues-last";
pub const CURRENT_FILE: &str = ".issues-current";
pub const COMMENTS_FILE: &str = ".issues-comments";
pub const CONFIG_FILE: &str = "config.toml";

/// Milestone written to a freshly initialized register
pub const DEFAULT_MILESTONE: &str = "0.1";

/// Paths of every file in a storage directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    dir: PathBuf,
}

impl Layout {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Layout for the storage directory of a repository root
    pub fn for_repository(root: &Path) -> Self {
        Self::new(root.join(GITLI_DIR))
    }

    /// Create the directory and any missing file. Existing files are left alone.
    pub fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.dir)?;

        let seeds = [
            (ISSUES_FILE, ""),
            (OPEN_FILE, ""),
            (COMMENTS_FILE, ""),
            (LAST_FILE, "0"),
            (CURRENT_FILE, DEFAULT_MILESTONE),
        ];
        for (name, content) in seeds {
            let path = self.dir.join(name);
            if !path.exists() {
                fs::write(&path, content)?;
                tracing::debug!(path = %path.display(), "created store file");
            }
        }

        Ok(())
    }

    /// Check that the directory and all five files exist
    pub fn verify(&self) -> Result<()> {
        if !self.dir.is_dir() {
            return Err(Error::MissingStore(self.dir.clone()));
        }
        for path in self.store_files() {
            if !path.is_file() {
                return Err(Error::MissingStore(path));
            }
        }
        Ok(())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn issues_path(&self) -> PathBuf {
        self.dir.join(ISSUES_FILE)
    }

    pub fn open_path(&self) -> PathBuf {
        self.dir.join(OPEN_FILE)
    }

    pub fn last_path(&self) -> PathBuf {
        self.dir.join(LAST_FILE)
    }

    pub fn current_path(&self) -> PathBuf {
        self.dir.join(CURRENT_FILE)
    }

    pub fn comments_path(&self) -> PathBuf {
        self.dir.join(COMMENTS_FILE)
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.join(CONFIG_FILE)
    }

    fn store_files(&self) -> [PathBuf; 5] {
        [
            self.issues_path(),
            self.open_path(),
            self.last_path(),
            self.current_path(),
            self.comments_path(),
        ]
    }
}

/// Map a not-found IO error on a store file to `MissingStore`
pub(crate) fn missing_as_store_error(path: &Path, err: io::Error) -> Error {
    if err.kind() == io::ErrorKind::NotFound {
        Error::MissingStore(path.to_path_buf())
    } else {
        Error::Io(err)
    }
}

/// Read a whole store file
pub(crate) fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| missing_as_store_error(path, e))
}

/// Append to an existing store file
pub(crate) fn append_file(path: &Path, content: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .append(true)
        .open(path)
        .map_err(|e| missing_as_store_error(path, e))?;
    file.write_all(content.as_bytes())?;
    file.flush()?;
    Ok(())
}

/// Replace the content of an existing store file
pub(crate) fn overwrite_file(path: &Path, content: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .truncate(true)
        .open(path)
        .map_err(|e| missing_as_store_error(path, e))?;
    file.write_all(content.as_bytes())?;
    file.flush()?;
    Ok(())
}
