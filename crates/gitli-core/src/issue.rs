//! Issue data model for gitli
//!
//! Four fields per issue, nothing else. Open/closed state is not part of
//! the record; it lives in the open-set index.

use serde::{Deserialize, Serialize};

/// Issue identifier, assigned from the persisted last-id counter
pub type IssueId = u64;

/// Issue type
///
/// Persisted as its integer code (1, 2, 3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, Hash)]
#[serde(rename_all = "snake_case")]
pub enum IssueType {
    #[default]
    Task,
    Bug,
    Enhancement,
}

impl IssueType {
    pub const ALL: [IssueType; 3] = [IssueType::Task, IssueType::Bug, IssueType::Enhancement];

    /// Integer code written to the record block
    pub fn code(self) -> u8 {
        match self {
            IssueType::Task => 1,
            IssueType::Bug => 2,
            IssueType::Enhancement => 3,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(IssueType::Task),
            2 => Some(IssueType::Bug),
            3 => Some(IssueType::Enhancement),
            _ => None,
        }
    }

    /// Lowercase keyword used by list filters
    pub fn keyword(self) -> &'static str {
        match self {
            IssueType::Task => "task",
            IssueType::Bug => "bug",
            IssueType::Enhancement => "enhancement",
        }
    }

    /// Lenient parse used for prompt answers.
    ///
    /// Accepts `1`/`2`/`3` or a type name in any case. Anything else falls
    /// back to `Task`.
    pub fn parse_lenient(input: &str) -> Self {
        input.parse().unwrap_or_default()
    }
}

impl std::str::FromStr for IssueType {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" | "task" => Ok(IssueType::Task),
            "2" | "bug" => Ok(IssueType::Bug),
            "3" | "enhancement" => Ok(IssueType::Enhancement),
            _ => Err(crate::Error::InvalidField(format!("unknown issue type '{}'", s))),
        }
    }
}

impl std::fmt::Display for IssueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IssueType::Task => write!(f, "Task"),
            IssueType::Bug => write!(f, "Bug"),
            IssueType::Enhancement => write!(f, "Enhancement"),
        }
    }
}

/// A single tracked issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Unique, never reused
    pub id: IssueId,

    /// Single-line title
    pub title: String,

    /// Issue type
    #[serde(rename = "type")]
    pub issue_type: IssueType,

    /// Free-form milestone label
    pub milestone: String,
}

impl Issue {
    pub fn new(id: IssueId, title: impl Into<String>, issue_type: IssueType, milestone: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            issue_type,
            milestone: milestone.into(),
        }
    }
}

/// An issue paired with its open/closed state, as handed to renderers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueView {
    #[serde(flatten)]
    pub issue: Issue,
    pub is_open: bool,
}

impl IssueView {
    pub fn state(&self) -> &'static str {
        if self.is_open { "open" } else { "closed" }
    }
}

impl std::fmt::Display for Issue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "#{} [{}] [{}] {}",
            self.id, self.issue_type, self.milestone, self.title
        )
    }
}
