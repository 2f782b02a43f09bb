//! Terminal rendering of issue rows

use colored::Colorize;
use gitli_core::IssueView;

/// Color choice resolved once per invocation and passed to every renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn plain() -> Self {
        Self::new(false)
    }

    pub fn id(&self, text: &str) -> String {
        self.paint(text, |s| s.cyan().bold().to_string())
    }

    pub fn title(&self, text: &str) -> String {
        self.paint(text, |s| s.white().bold().to_string())
    }

    pub fn label(&self, text: &str) -> String {
        self.paint(text, |s| s.blue().bold().to_string())
    }

    pub fn state(&self, text: &str, is_open: bool) -> String {
        if is_open {
            self.paint(text, |s| s.yellow().bold().to_string())
        } else {
            self.paint(text, |s| s.green().bold().to_string())
        }
    }

    pub fn success(&self, text: &str) -> String {
        self.paint(text, |s| s.green().to_string())
    }

    fn paint(&self, text: &str, style: impl Fn(&str) -> String) -> String {
        if self.enabled {
            style(text)
        } else {
            text.to_string()
        }
    }
}

/// One listing row: `#id title [Type] [milestone] - state`
///
/// Padding is applied before coloring so escape codes do not skew columns.
pub fn row(view: &IssueView, palette: &Palette, title_width: usize) -> String {
    let issue = &view.issue;
    let id = format!("#{:<4}", issue.id);
    let title = format!("{:<width$}", issue.title, width = title_width);
    let labels = format!(
        "{:<6} {:<7}",
        format!("[{}]", issue.issue_type),
        format!("[{}]", issue.milestone)
    );

    format!(
        "{} {} {} - {}",
        palette.id(&id),
        palette.title(&title),
        palette.label(&labels),
        palette.state(view.state(), view.is_open)
    )
}

pub fn rows(views: &[IssueView], palette: &Palette, title_width: usize) -> Vec<String> {
    views
        .iter()
        .map(|view| row(view, palette, title_width))
        .collect()
}
