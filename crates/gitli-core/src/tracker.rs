//! Issue tracker operations
//!
//! Ties the store, open-set, counter and milestone register together. The
//! tracker holds only paths; every call goes back to the files.

use crate::counter::IdCounter;
use crate::milestone::MilestoneRegister;
use crate::open_set::{OpenSet, OpenSetIndex};
use crate::{Error, Filter, Issue, IssueId, IssueStore, IssueType, IssueView, Layout, Result};
use std::path::PathBuf;

/// Fields for a new issue
#[derive(Debug, Clone, Default)]
pub struct NewIssue {
    pub title: String,
    pub issue_type: IssueType,
    /// Falls back to the current milestone
    pub milestone: Option<String>,
}

impl NewIssue {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }
}

/// Changes to apply to an existing issue. `None` or blank keeps the old value.
#[derive(Debug, Clone, Default)]
pub struct IssueEdit {
    pub title: Option<String>,
    pub issue_type: Option<IssueType>,
    pub milestone: Option<String>,
}

/// File-backed issue tracker for one storage directory
#[derive(Debug, Clone)]
pub struct Tracker {
    layout: Layout,
    store: IssueStore,
    open_set: OpenSetIndex,
    counter: IdCounter,
    milestone: MilestoneRegister,
}

impl Tracker {
    fn with_layout(layout: Layout) -> Self {
        Self {
            store: IssueStore::new(layout.issues_path()),
            open_set: OpenSetIndex::new(layout.open_path()),
            counter: IdCounter::new(layout.last_path()),
            milestone: MilestoneRegister::new(layout.current_path()),
            layout,
        }
    }

    /// Create any missing files under `dir` and open the tracker
    pub fn init(dir: impl Into<PathBuf>) -> Result<Self> {
        let layout = Layout::new(dir);
        layout.init()?;
        tracing::info!(dir = %layout.dir().display(), "initialized gitli store");
        Ok(Self::with_layout(layout))
    }

    /// Open an initialized storage directory
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let layout = Layout::new(dir);
        layout.verify()?;
        Ok(Self::with_layout(layout))
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn open_set(&self) -> &OpenSetIndex {
        &self.open_set
    }

    /// Create a new open issue with the next id
    pub fn create(&self, new: NewIssue) -> Result<Issue> {
        let title = new.title.trim();
        if title.is_empty() {
            return Err(Error::InvalidField("title must not be empty".to_string()));
        }
        single_line("title", title)?;

        let milestone = match new.milestone.as_deref().map(str::trim) {
            Some(m) if !m.is_empty() => m.to_string(),
            _ => self.milestone.read()?,
        };
        single_line("milestone", &milestone)?;

        let id = self.counter.next()?;
        let issue = Issue::new(id, title, new.issue_type, milestone);

        self.store.append(&issue)?;
        self.open_set.add(id)?;
        self.counter.write(id)?;

        tracing::info!(id, "created issue");
        Ok(issue)
    }

    /// Look up an issue without its state
    pub fn get(&self, id: IssueId) -> Result<Issue> {
        self.store.find(id)
    }

    /// Mark an issue closed. Closing a closed issue changes nothing.
    pub fn close(&self, id: IssueId) -> Result<Issue> {
        let issue = self.store.find(id)?;
        self.open_set.remove(id)?;
        tracing::info!(id, "closed issue");
        Ok(issue)
    }

    /// Mark an issue open, leaving exactly one open-set entry for it
    pub fn reopen(&self, id: IssueId) -> Result<Issue> {
        let issue = self.store.find(id)?;
        self.open_set.reopen(id)?;
        tracing::info!(id, "reopened issue");
        Ok(issue)
    }

    /// Apply changes to one issue and rewrite the store, keeping file order
    pub fn edit(&self, id: IssueId, changes: IssueEdit) -> Result<Issue> {
        let mut issues = self.store.scan()?;
        let index = issues
            .iter()
            .position(|issue| issue.id == id)
            .ok_or(Error::NotFound(id))?;

        let issue = &mut issues[index];
        if let Some(title) = changes.title.as_deref().map(str::trim)
            && !title.is_empty()
        {
            single_line("title", title)?;
            issue.title = title.to_string();
        }
        if let Some(issue_type) = changes.issue_type {
            issue.issue_type = issue_type;
        }
        if let Some(milestone) = changes.milestone.as_deref().map(str::trim)
            && !milestone.is_empty()
        {
            single_line("milestone", milestone)?;
            issue.milestone = milestone.to_string();
        }
        let edited = issue.clone();

        self.store.rewrite(&issues)?;
        tracing::info!(id, "edited issue");
        Ok(edited)
    }

    /// One issue with its open/closed state
    pub fn show(&self, id: IssueId) -> Result<IssueView> {
        let issue = self.store.find(id)?;
        let is_open = self.open_set.read()?.contains(id);
        Ok(IssueView { issue, is_open })
    }

    /// Issues passing the filter tokens, in file order
    pub fn list<I, S>(&self, tokens: I) -> Result<Vec<IssueView>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.list_filtered(&Filter::parse(tokens))
    }

    pub fn list_filtered(&self, filter: &Filter) -> Result<Vec<IssueView>> {
        let open_set = self.open_set.read()?;
        let issues = self.store.scan()?;
        warn_on_duplicates(&open_set);

        Ok(filter
            .select(&issues, &open_set)
            .into_iter()
            .map(|issue| IssueView {
                issue: issue.clone(),
                is_open: open_set.contains(issue.id),
            })
            .collect())
    }

    /// Current default milestone
    pub fn milestone(&self) -> Result<String> {
        self.milestone.read()
    }

    /// Set the default milestone. Blank values are ignored.
    pub fn set_milestone(&self, value: &str) -> Result<bool> {
        single_line("milestone", value.trim())?;
        self.milestone.write(value)
    }

    /// Last assigned id
    pub fn last_id(&self) -> Result<IssueId> {
        self.counter.read()
    }
}

fn single_line(field: &str, value: &str) -> Result<()> {
    if value.contains(['\n', '\r']) {
        return Err(Error::InvalidField(format!("{} must be a single line", field)));
    }
    Ok(())
}

fn warn_on_duplicates(open_set: &OpenSet) {
    let mut seen = std::collections::HashSet::new();
    for id in open_set.ids() {
        if !seen.insert(id) {
            tracing::warn!(id, "issue listed more than once in open set");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn tracker() -> (tempfile::TempDir, Tracker) {
        let dir = tempfile::tempdir().unwrap();
        let tracker = Tracker::init(dir.path().join(".gitli")).unwrap();
        (dir, tracker)
    }

    fn typed(title: &str, issue_type: IssueType) -> NewIssue {
        NewIssue {
            title: title.to_string(),
            issue_type,
            milestone: None,
        }
    }

    #[test]
    fn test_open_requires_init() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Tracker::open(dir.path().join(".gitli")),
            Err(Error::MissingStore(_))
        ));

        Tracker::init(dir.path().join(".gitli")).unwrap();
        Tracker::open(dir.path().join(".gitli")).unwrap();
    }

    #[test]
    fn test_ids_are_monotonic_from_last() {
        let (_dir, tracker) = tracker();
        fs::write(tracker.layout().last_path(), "41").unwrap();

        let ids: Vec<IssueId> = (0..3)
            .map(|n| tracker.create(NewIssue::new(format!("issue {}", n))).unwrap().id)
            .collect();
        assert_eq!(ids, vec![42, 43, 44]);
        assert_eq!(tracker.last_id().unwrap(), 44);
    }

    #[test]
    fn test_create_is_open_with_current_milestone() {
        let (_dir, tracker) = tracker();
        let issue = tracker.create(typed("Crash on start", IssueType::Bug)).unwrap();

        assert_eq!(issue.milestone, "0.1");
        let view = tracker.show(issue.id).unwrap();
        assert!(view.is_open);
        assert_eq!(view.issue, issue);
    }

    #[test]
    fn test_milestone_default_is_captured_at_creation() {
        let (_dir, tracker) = tracker();
        tracker.set_milestone("1.0").unwrap();
        let first = tracker.create(NewIssue::new("first")).unwrap();
        tracker.set_milestone("2.0").unwrap();
        let second = tracker.create(NewIssue::new("second")).unwrap();

        assert_eq!(tracker.get(first.id).unwrap().milestone, "1.0");
        assert_eq!(tracker.get(second.id).unwrap().milestone, "2.0");
    }

    #[test]
    fn test_explicit_milestone() {
        let (_dir, tracker) = tracker();
        let issue = tracker
            .create(NewIssue {
                milestone: Some("backlog".to_string()),
                ..NewIssue::new("later")
            })
            .unwrap();
        assert_eq!(issue.milestone, "backlog");
        assert_eq!(tracker.milestone().unwrap(), "0.1");
    }

    #[test]
    fn test_create_fails_when_ids_run_out() {
        let (_dir, tracker) = tracker();
        fs::write(tracker.layout().last_path(), u64::MAX.to_string()).unwrap();

        assert!(matches!(
            tracker.create(NewIssue::new("one too many")),
            Err(Error::MalformedRecord { .. })
        ));
        assert!(tracker.store.scan().unwrap().is_empty());
        assert!(!tracker.open_set().read().unwrap().contains(0));
        assert_eq!(tracker.last_id().unwrap(), u64::MAX);
    }

    #[test]
    fn test_create_rejects_multiline_title() {
        let (_dir, tracker) = tracker();
        assert!(matches!(
            tracker.create(NewIssue::new("one\ntwo")),
            Err(Error::InvalidField(_))
        ));
        assert!(matches!(
            tracker.create(NewIssue::new("   ")),
            Err(Error::InvalidField(_))
        ));
        assert_eq!(tracker.last_id().unwrap(), 0);
    }

    #[test]
    fn test_close_and_reopen() {
        let (_dir, tracker) = tracker();
        let issue = tracker.create(NewIssue::new("toggle")).unwrap();

        tracker.close(issue.id).unwrap();
        tracker.close(issue.id).unwrap();
        assert!(!tracker.show(issue.id).unwrap().is_open);

        tracker.reopen(issue.id).unwrap();
        tracker.reopen(issue.id).unwrap();
        assert_eq!(tracker.open_set().read().unwrap().occurrences(issue.id), 1);
        assert_eq!(tracker.get(issue.id).unwrap(), issue);
    }

    #[test]
    fn test_unknown_ids_are_not_found() {
        let (_dir, tracker) = tracker();
        assert!(tracker.show(5).unwrap_err().is_not_found());
        assert!(tracker.close(5).unwrap_err().is_not_found());
        assert!(tracker.reopen(5).unwrap_err().is_not_found());
        assert!(tracker.edit(5, IssueEdit::default()).unwrap_err().is_not_found());
        assert!(!tracker.open_set().read().unwrap().contains(5));
    }

    #[test]
    fn test_edit_preserves_other_records() {
        let (_dir, tracker) = tracker();
        tracker.create(typed("one", IssueType::Task)).unwrap();
        tracker.create(typed("two", IssueType::Bug)).unwrap();
        tracker.create(typed("three", IssueType::Enhancement)).unwrap();
        let before = fs::read_to_string(tracker.layout().issues_path()).unwrap();

        let edited = tracker
            .edit(
                2,
                IssueEdit {
                    title: Some("two, renamed".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(edited, Issue::new(2, "two, renamed", IssueType::Bug, "0.1"));

        let after = fs::read_to_string(tracker.layout().issues_path()).unwrap();
        assert_eq!(after, before.replace("\ntwo\n", "\ntwo, renamed\n"));
        assert_eq!(tracker.last_id().unwrap(), 3);
    }

    #[test]
    fn test_edit_blank_fields_keep_values() {
        let (_dir, tracker) = tracker();
        let issue = tracker.create(typed("keep me", IssueType::Bug)).unwrap();

        let edited = tracker
            .edit(
                issue.id,
                IssueEdit {
                    title: Some("  ".to_string()),
                    issue_type: None,
                    milestone: Some(String::new()),
                },
            )
            .unwrap();
        assert_eq!(edited, issue);
    }

    #[test]
    fn test_edit_does_not_touch_open_state() {
        let (_dir, tracker) = tracker();
        let issue = tracker.create(NewIssue::new("closed one")).unwrap();
        tracker.close(issue.id).unwrap();

        tracker
            .edit(
                issue.id,
                IssueEdit {
                    issue_type: Some(IssueType::Enhancement),
                    milestone: Some("0.3".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        let view = tracker.show(issue.id).unwrap();
        assert!(!view.is_open);
        assert_eq!(view.issue.issue_type, IssueType::Enhancement);
        assert_eq!(view.issue.milestone, "0.3");
    }

    #[test]
    fn test_list_filters_and_state() {
        let (_dir, tracker) = tracker();
        tracker.create(typed("a", IssueType::Task)).unwrap();
        tracker.set_milestone("m2").unwrap();
        tracker.create(typed("b", IssueType::Bug)).unwrap();
        tracker.close(2).unwrap();

        let all = tracker.list(Vec::<String>::new()).unwrap();
        assert_eq!(
            all.iter().map(|v| (v.issue.id, v.is_open)).collect::<Vec<_>>(),
            vec![(1, true), (2, false)]
        );

        assert!(tracker.list(["open", "bug"]).unwrap().is_empty());
        assert_eq!(tracker.list(["close"]).unwrap()[0].issue.id, 2);
        assert_eq!(tracker.list(["m2"]).unwrap()[0].issue.title, "b");
        assert!(tracker.list(["open", "close"]).unwrap().is_empty());
    }

    #[test]
    fn test_set_milestone_ignores_blank() {
        let (_dir, tracker) = tracker();
        assert!(!tracker.set_milestone("").unwrap());
        assert_eq!(tracker.milestone().unwrap(), "0.1");
    }
}
