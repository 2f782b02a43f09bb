//! Persisted last-id counter
//!
//! Holds the last assigned id as a bare integer. Ids are never reused, so the
//! counter only moves forward.

use crate::layout::{overwrite_file, read_file};
use crate::{Error, IssueId, Result};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct IdCounter {
    path: PathBuf,
}

impl IdCounter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Last assigned id, `0` before the first issue
    pub fn read(&self) -> Result<IssueId> {
        let content = read_file(&self.path)?;
        let value = content.trim();
        value
            .parse()
            .map_err(|_| Error::malformed(&self.path, 1, format!("invalid last id '{}'", value)))
    }

    /// Id the next issue will get. Nothing is persisted.
    pub fn next(&self) -> Result<IssueId> {
        let last = self.read()?;
        last.checked_add(1)
            .ok_or_else(|| Error::malformed(&self.path, 1, format!("last id {} has no successor", last)))
    }

    pub fn write(&self, id: IssueId) -> Result<()> {
        overwrite_file(&self.path, &id.to_string())?;
        tracing::debug!(id, "stored last id");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_read_next_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".issues-last");
        fs::write(&path, "0").unwrap();
        let counter = IdCounter::new(&path);

        assert_eq!(counter.read().unwrap(), 0);
        assert_eq!(counter.next().unwrap(), 1);
        assert_eq!(counter.read().unwrap(), 0);

        counter.write(17).unwrap();
        assert_eq!(counter.next().unwrap(), 18);
        assert_eq!(fs::read_to_string(&path).unwrap(), "17");
    }

    #[test]
    fn test_tolerates_trailing_newline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".issues-last");
        fs::write(&path, "5\n").unwrap();

        assert_eq!(IdCounter::new(&path).read().unwrap(), 5);
    }

    #[test]
    fn test_garbage_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".issues-last");
        fs::write(&path, "five").unwrap();

        assert!(matches!(
            IdCounter::new(&path).read(),
            Err(Error::MalformedRecord { .. })
        ));
    }

    #[test]
    fn test_exhausted_counter_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".issues-last");
        fs::write(&path, u64::MAX.to_string()).unwrap();

        assert!(matches!(
            IdCounter::new(&path).next(),
            Err(Error::MalformedRecord { .. })
        ));
        assert_eq!(fs::read_to_string(&path).unwrap(), u64::MAX.to_string());
    }
}
