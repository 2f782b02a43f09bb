//! gitli-core: Core library for the gitli issue tracker
//!
//! Issues live in a handful of flat files under `.gitli/` at the repository
//! root. No database, no daemon, no in-memory cache between calls: every
//! operation opens its file, does one pass and closes it again.

pub mod codec;
pub mod config;
pub mod counter;
pub mod error;
pub mod filter;
pub mod issue;
pub mod layout;
pub mod milestone;
pub mod open_set;
pub mod repo;
pub mod store;
pub mod tracker;

pub use config::{ColorMode, Config};
pub use error::Error;
pub use filter::Filter;
pub use issue::{Issue, IssueId, IssueType, IssueView};
pub use layout::Layout;
pub use open_set::OpenSet;
pub use repo::find_repository_root;
pub use store::IssueStore;
pub use tracker::{IssueEdit, NewIssue, Tracker};

/// Result type for gitli operations
pub type Result<T> = std::result::Result<T, Error>;
