//! CLI command implementations

use crate::prompt::Prompter;
use crate::render::{self, Palette};
use anyhow::{Context, Result};
use gitli_core::{
    ColorMode, Config, Error, IssueEdit, IssueId, IssueType, IssueView, Layout, NewIssue, Tracker,
    find_repository_root, repo::git_config,
};
use std::path::PathBuf;

/// Options shared by every subcommand
pub struct Global {
    pub json: bool,
    pub color: Option<ColorMode>,
    pub dir: Option<PathBuf>,
}

impl Global {
    fn storage_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.dir {
            return Ok(dir.clone());
        }
        let cwd = std::env::current_dir()?;
        let root = find_repository_root(&cwd)?;
        Ok(Layout::for_repository(&root).dir().to_path_buf())
    }
}

/// Everything an opened command needs, resolved once
struct Session {
    tracker: Tracker,
    config: Config,
    palette: Palette,
    json: bool,
}

impl Session {
    fn open(global: &Global) -> Result<Self> {
        let tracker = Tracker::open(global.storage_dir()?)?;
        let config = Config::load(&tracker.layout().config_path())?;

        let palette = if global.json {
            Palette::plain()
        } else {
            let mode = global.color.unwrap_or(config.display.color);
            let git_setting = match mode {
                ColorMode::Auto => git_config("gitli.color"),
                _ => None,
            };
            Palette::new(mode.resolve(git_setting.as_deref()))
        };

        Ok(Self {
            tracker,
            config,
            palette,
            json: global.json,
        })
    }

    fn print_views(&self, views: &[IssueView]) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string(views)?);
        } else {
            for line in render::rows(views, &self.palette, self.config.display.title_width) {
                println!("{}", line);
            }
        }
        Ok(())
    }

    fn done(&self, message: &str) {
        println!("{} {}", self.palette.success("✓"), message);
    }
}

/// Print a not-found message and succeed; pass every other error through
fn report_not_found<T>(result: gitli_core::Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(Error::NotFound(id)) => {
            println!("Issue #{} not found", id);
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

pub fn init(global: &Global) -> Result<()> {
    let dir = global.storage_dir()?;
    let tracker = Tracker::init(&dir)
        .with_context(|| format!("failed to initialize {}", dir.display()))?;
    println!("Initialized gitli in {}", tracker.layout().dir().display());
    Ok(())
}

pub fn new(
    global: &Global,
    title: &str,
    issue_type: Option<IssueType>,
    milestone: Option<String>,
    edit: bool,
) -> Result<()> {
    let session = Session::open(global)?;
    let mut draft = NewIssue {
        title: title.trim().to_string(),
        issue_type: issue_type.unwrap_or_default(),
        milestone,
    };

    if edit {
        let mut prompter = Prompter::stdio();
        draft.issue_type = prompter.issue_type(draft.issue_type)?;
        let current = match draft.milestone {
            Some(ref m) => m.clone(),
            None => session.tracker.milestone()?,
        };
        draft.milestone = Some(prompter.milestone(&current)?);
    }

    let issue = session.tracker.create(draft)?;

    if session.json {
        println!("{}", serde_json::to_string(&issue)?);
    } else {
        session.done(&format!("Created issue #{}", issue.id));
    }
    Ok(())
}

pub fn close(global: &Global, id: IssueId) -> Result<()> {
    let session = Session::open(global)?;
    if let Some(issue) = report_not_found(session.tracker.close(id))? {
        if session.json {
            println!("{}", serde_json::to_string(&issue)?);
        } else {
            session.done(&format!("Closed #{}", id));
        }
    }
    Ok(())
}

pub fn reopen(global: &Global, id: IssueId) -> Result<()> {
    let session = Session::open(global)?;
    if let Some(issue) = report_not_found(session.tracker.reopen(id))? {
        if session.json {
            println!("{}", serde_json::to_string(&issue)?);
        } else {
            session.done(&format!("Reopened #{}", id));
        }
    }
    Ok(())
}

pub fn list(global: &Global, filters: &[String]) -> Result<()> {
    let session = Session::open(global)?;
    let views = session.tracker.list(filters)?;

    if views.is_empty() && !session.json {
        println!("No issues found");
        return Ok(());
    }
    session.print_views(&views)
}

pub fn show(global: &Global, id: IssueId) -> Result<()> {
    let session = Session::open(global)?;
    if let Some(view) = report_not_found(session.tracker.show(id))? {
        session.print_views(&[view])?;
    }
    Ok(())
}

pub fn edit(
    global: &Global,
    id: IssueId,
    title: Option<String>,
    issue_type: Option<IssueType>,
    milestone: Option<String>,
) -> Result<()> {
    let session = Session::open(global)?;

    let changes = if title.is_none() && issue_type.is_none() && milestone.is_none() {
        let Some(current) = report_not_found(session.tracker.get(id))? else {
            return Ok(());
        };
        let mut prompter = Prompter::stdio();
        IssueEdit {
            title: prompter.title()?,
            issue_type: Some(prompter.issue_type(current.issue_type)?),
            milestone: Some(prompter.milestone(&current.milestone)?),
        }
    } else {
        IssueEdit {
            title,
            issue_type,
            milestone,
        }
    };

    if let Some(issue) = report_not_found(session.tracker.edit(id, changes))? {
        if session.json {
            println!("{}", serde_json::to_string(&issue)?);
        } else {
            session.done(&format!("Updated #{}", issue.id));
        }
    }
    Ok(())
}

pub fn milestone(global: &Global, value: Option<String>) -> Result<()> {
    let session = Session::open(global)?;

    match value {
        Some(value) => {
            if session.tracker.set_milestone(&value)? {
                session.done(&format!("Current milestone set to {}", value.trim()));
            } else {
                println!("Milestone unchanged");
            }
        }
        None => {
            let current = session.tracker.milestone()?;
            if session.json {
                println!("{}", serde_json::json!({ "milestone": current }));
            } else {
                println!("The current milestone is {}", current);
            }
        }
    }
    Ok(())
}

/// Show current configuration
pub fn config_show(global: &Global) -> Result<()> {
    let session = Session::open(global)?;

    if session.json {
        println!("{}", serde_json::to_string_pretty(&session.config)?);
    } else {
        println!("[display]");
        println!("color = \"{}\"", session.config.display.color);
        println!("title_width = {}", session.config.display.title_width);
    }
    Ok(())
}

/// Reset configuration to defaults
pub fn config_reset(global: &Global) -> Result<()> {
    let session = Session::open(global)?;
    let path = session.tracker.layout().config_path();
    std::fs::write(&path, Config::default_with_comments())?;
    session.done(&format!("Wrote default configuration to {}", path.display()));
    Ok(())
}
