//! Record block codec
//!
//! One issue is four lines: id, title, type code, milestone. The store file
//! is a plain concatenation of blocks with no separators and no escaping,
//! so a title or milestone containing a newline breaks the framing.

use crate::{Issue, IssueType};
use thiserror::Error;

/// Number of lines in one record block
pub const LINES_PER_RECORD: usize = 4;

/// Failure to decode a single block
///
/// `field` is the zero-based line within the block that could not be read.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{reason}")]
pub struct DecodeError {
    pub field: usize,
    pub reason: String,
}

impl DecodeError {
    fn new(field: usize, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Encode an issue as a four-line block, trailing newline included
pub fn encode(issue: &Issue) -> String {
    format!(
        "{}\n{}\n{}\n{}\n",
        issue.id,
        issue.title,
        issue.issue_type.code(),
        issue.milestone
    )
}

/// Decode one block. Trailing whitespace is trimmed from every field.
pub fn decode(block: &[&str]) -> Result<Issue, DecodeError> {
    if block.len() != LINES_PER_RECORD {
        return Err(DecodeError::new(
            block.len(),
            format!("expected {} lines, got {}", LINES_PER_RECORD, block.len()),
        ));
    }

    let id_field = block[0].trim_end();
    let id = id_field
        .trim_start()
        .parse()
        .map_err(|_| DecodeError::new(0, format!("invalid id '{}'", id_field)))?;

    let type_field = block[2].trim_end();
    let issue_type = type_field
        .trim_start()
        .parse::<u8>()
        .ok()
        .and_then(IssueType::from_code)
        .ok_or_else(|| DecodeError::new(2, format!("invalid type '{}'", type_field)))?;

    Ok(Issue {
        id,
        title: block[1].trim_end().to_string(),
        issue_type,
        milestone: block[3].trim_end().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_layout() {
        let issue = Issue::new(7, "Fix the parser", IssueType::Bug, "0.2");
        assert_eq!(encode(&issue), "7\nFix the parser\n2\n0.2\n");
    }

    #[test]
    fn test_roundtrip() {
        let issue = Issue::new(12, "  leading spaces survive", IssueType::Enhancement, "v1.0-beta");
        let encoded = encode(&issue);
        let lines: Vec<&str> = encoded.lines().collect();
        assert_eq!(decode(&lines).unwrap(), issue);
    }

    #[test]
    fn test_decode_trims_trailing_whitespace() {
        let issue = decode(&["3 ", "Title\t", "1\r", "0.1  "]).unwrap();
        assert_eq!(issue, Issue::new(3, "Title", IssueType::Task, "0.1"));
    }

    #[test]
    fn test_decode_rejects_bad_type() {
        let err = decode(&["1", "Title", "bug", "0.1"]).unwrap_err();
        assert_eq!(err.field, 2);

        let err = decode(&["1", "Title", "9", "0.1"]).unwrap_err();
        assert_eq!(err.field, 2);
    }

    #[test]
    fn test_decode_rejects_bad_id() {
        let err = decode(&["abc", "Title", "1", "0.1"]).unwrap_err();
        assert_eq!(err.field, 0);
    }

    #[test]
    fn test_decode_rejects_short_block() {
        assert!(decode(&["1", "Title", "1"]).is_err());
    }
}
