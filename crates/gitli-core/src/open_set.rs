//! Open-set index
//!
//! A line-oriented file of issue ids. Presence means open, absence means
//! closed. `add` always appends; `remove` strips every occurrence. Repeated
//! closes are therefore harmless, while repeated adds without a remove leave
//! duplicates behind. `reopen` is the only path that guarantees a single entry.

use crate::layout::{append_file, overwrite_file, read_file};
use crate::{IssueId, Result};
use std::path::{Path, PathBuf};

/// Entry separator
pub const SEPARATOR: &str = "\n";

/// Raw snapshot of the open-set file, in file order.
///
/// May contain an empty trailing token left by the final separator; it never
/// matches a real id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpenSet {
    entries: Vec<String>,
}

impl OpenSet {
    pub fn from_content(content: &str) -> Self {
        Self {
            entries: content.split(SEPARATOR).map(str::to_string).collect(),
        }
    }

    pub fn contains(&self, id: IssueId) -> bool {
        self.occurrences(id) > 0
    }

    /// How many times the id appears
    pub fn occurrences(&self, id: IssueId) -> usize {
        let id = id.to_string();
        self.entries.iter().filter(|e| e.trim() == id).count()
    }

    /// Raw tokens, including any empty trailing token
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Ids that parse as integers, duplicates kept
    pub fn ids(&self) -> impl Iterator<Item = IssueId> + '_ {
        self.entries.iter().filter_map(|e| e.trim().parse().ok())
    }
}

impl FromIterator<IssueId> for OpenSet {
    fn from_iter<I: IntoIterator<Item = IssueId>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|id| id.to_string()).collect(),
        }
    }
}

/// File-backed open-set index
#[derive(Debug, Clone)]
pub struct OpenSetIndex {
    path: PathBuf,
}

impl OpenSetIndex {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append the id. Does not deduplicate.
    pub fn add(&self, id: IssueId) -> Result<()> {
        append_file(&self.path, &format!("{}{}", id, SEPARATOR))?;
        tracing::debug!(id, "added to open set");
        Ok(())
    }

    /// Drop every occurrence of the id and rewrite the rest
    pub fn remove(&self, id: IssueId) -> Result<()> {
        let content = read_file(&self.path)?;
        let target = id.to_string();
        let (kept, dropped): (Vec<&str>, Vec<&str>) =
            content.split(SEPARATOR).partition(|e| e.trim() != target);

        let joined = kept.join(SEPARATOR);
        overwrite_file(&self.path, &joined)?;
        tracing::debug!(id, removed = dropped.len(), "removed from open set");
        Ok(())
    }

    pub fn read(&self) -> Result<OpenSet> {
        let set = OpenSet::from_content(&read_file(&self.path)?);
        tracing::debug!(entries = set.entries().len(), "read open set");
        Ok(set)
    }

    /// Remove then add, leaving exactly one entry for the id
    pub fn reopen(&self, id: IssueId) -> Result<()> {
        self.remove(id)?;
        self.add(id)
    }
}
