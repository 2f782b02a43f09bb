//! List filters
//!
//! Filter tokens fall into three buckets: state (`open`, `close`), type
//! (`task`, `bug`, `enhancement`) and milestone (anything else). Keywords
//! are matched case-insensitively. An issue is listed only if it passes
//! every non-empty bucket.

use crate::{Issue, IssueType, OpenSet};

const OPEN: &str = "open";
const CLOSE: &str = "close";

/// Parsed set of list filters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    pub open: bool,
    pub closed: bool,
    pub types: Vec<IssueType>,
    pub milestones: Vec<String>,
}

impl Filter {
    /// Partition raw tokens into buckets. Blank tokens are ignored.
    ///
    /// Keywords are case-insensitive; milestone tokens are kept as typed and
    /// match case-sensitively.
    pub fn parse<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut filter = Filter::default();

        for token in tokens {
            let token = token.as_ref().trim();
            if token.is_empty() {
                continue;
            }
            let keyword = token.to_lowercase();

            if keyword == OPEN {
                filter.open = true;
            } else if keyword == CLOSE {
                filter.closed = true;
            } else if let Some(t) = IssueType::ALL.into_iter().find(|t| t.keyword() == keyword) {
                if !filter.types.contains(&t) {
                    filter.types.push(t);
                }
            } else {
                filter.milestones.push(token.to_string());
            }
        }

        filter
    }

    pub fn is_empty(&self) -> bool {
        !self.open && !self.closed && self.types.is_empty() && self.milestones.is_empty()
    }

    /// Whether the issue passes every bucket.
    ///
    /// With both `open` and `close` set nothing can pass.
    pub fn matches(&self, issue: &Issue, open_set: &OpenSet) -> bool {
        let is_open = open_set.contains(issue.id);

        if self.open && !is_open {
            return false;
        }
        if self.closed && is_open {
            return false;
        }
        if !self.types.is_empty() && !self.types.contains(&issue.issue_type) {
            return false;
        }
        if !self.milestones.is_empty() && !self.milestones.iter().any(|m| *m == issue.milestone) {
            return false;
        }

        true
    }

    /// Matching issues, in input order
    pub fn select<'a>(&self, issues: &'a [Issue], open_set: &OpenSet) -> Vec<&'a Issue> {
        issues
            .iter()
            .filter(|issue| self.matches(issue, open_set))
            .collect()
    }
}
