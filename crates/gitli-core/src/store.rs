//! Flat-file issue store
//!
//! Records are appended in creation order, so file order is insertion
//! order. Only edits rewrite the whole file.

use crate::codec::{self, LINES_PER_RECORD};
use crate::layout::{append_file, missing_as_store_error, read_file};
use crate::{Error, Issue, IssueId, Result};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Issue store backed by a single file of four-line blocks
#[derive(Debug, Clone)]
pub struct IssueStore {
    path: PathBuf,
}

impl IssueStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record to the end of the file.
    ///
    /// Ids are not checked for duplicates; callers get them from the counter.
    pub fn append(&self, issue: &Issue) -> Result<()> {
        append_file(&self.path, &codec::encode(issue))?;
        tracing::debug!(id = issue.id, path = %self.path.display(), "appended issue");
        Ok(())
    }

    /// Decode every record in file order
    pub fn scan(&self) -> Result<Vec<Issue>> {
        let content = read_file(&self.path)?;
        let lines: Vec<&str> = content.lines().collect();

        if lines.len() % LINES_PER_RECORD != 0 {
            return Err(Error::malformed(
                &self.path,
                lines.len(),
                format!(
                    "{} lines is not a whole number of {}-line records",
                    lines.len(),
                    LINES_PER_RECORD
                ),
            ));
        }

        let issues = lines
            .chunks(LINES_PER_RECORD)
            .enumerate()
            .map(|(n, block)| self.decode_block(n, block))
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(count = issues.len(), path = %self.path.display(), "scanned issues");
        Ok(issues)
    }

    /// First record with the given id, stopping as soon as it is found
    pub fn find(&self, id: IssueId) -> Result<Issue> {
        let file = File::open(&self.path).map_err(|e| missing_as_store_error(&self.path, e))?;
        let mut lines = BufReader::new(file).lines();
        let mut block = Vec::with_capacity(LINES_PER_RECORD);
        let mut record = 0;

        loop {
            block.clear();
            for _ in 0..LINES_PER_RECORD {
                match lines.next() {
                    Some(line) => block.push(line?),
                    None => break,
                }
            }

            if block.is_empty() {
                return Err(Error::NotFound(id));
            }
            if block.len() < LINES_PER_RECORD {
                let read = record * LINES_PER_RECORD + block.len();
                return Err(Error::malformed(
                    &self.path,
                    read,
                    format!("truncated record after line {}", read),
                ));
            }

            let refs: Vec<&str> = block.iter().map(String::as_str).collect();
            let issue = self.decode_block(record, &refs)?;
            if issue.id == id {
                return Ok(issue);
            }
            record += 1;
        }
    }

    /// Replace the file with the given records, in the given order
    pub fn rewrite(&self, issues: &[Issue]) -> Result<()> {
        let file = OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(&self.path)
            .map_err(|e| missing_as_store_error(&self.path, e))?;
        let mut writer = BufWriter::new(file);

        for issue in issues {
            writer.write_all(codec::encode(issue).as_bytes())?;
        }

        writer.flush()?;
        tracing::debug!(count = issues.len(), path = %self.path.display(), "rewrote issues");
        Ok(())
    }

    fn decode_block(&self, record: usize, block: &[&str]) -> Result<Issue> {
        codec::decode(block).map_err(|e| {
            Error::malformed(&self.path, record * LINES_PER_RECORD + e.field + 1, e.reason)
        })
    }
}
