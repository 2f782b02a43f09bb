//! Current-milestone register
//!
//! A single value, used as the default milestone for new issues and as the
//! suggestion when editing.

use crate::layout::{overwrite_file, read_file};
use crate::Result;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct MilestoneRegister {
    path: PathBuf,
}

impl MilestoneRegister {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read(&self) -> Result<String> {
        Ok(read_file(&self.path)?.trim().to_string())
    }

    /// Overwrite the register. A blank value is ignored.
    ///
    /// Returns whether anything was written.
    pub fn write(&self, value: &str) -> Result<bool> {
        let value = value.trim();
        if value.is_empty() {
            tracing::debug!("ignoring empty milestone");
            return Ok(false);
        }
        overwrite_file(&self.path, value)?;
        tracing::debug!(milestone = value, "set current milestone");
        Ok(true)
    }
}
