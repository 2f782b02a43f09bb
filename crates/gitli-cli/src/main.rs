//! gitli - Minimal issue tracker living inside a git repository
//!
//! Issues are flat files in .gitli/ at the repository root.

use anyhow::Result;
use clap::{Parser, Subcommand};
use gitli_core::{ColorMode, IssueId, IssueType};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod prompt;
mod render;

#[derive(Parser)]
#[command(name = "gitli")]
#[command(about = "Minimal issue tracker stored in your git repository")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// When to color output (overrides config and `git config gitli.color`)
    #[arg(long, global = true, value_name = "WHEN")]
    color: Option<ColorMode>,

    /// Storage directory (defaults to .gitli at the repository root)
    #[arg(long, global = true, env = "GITLI_DIR")]
    dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the issue store
    Init,

    /// Create a new issue
    #[command(visible_alias = "add")]
    New {
        /// Issue title
        title: String,

        /// Issue type (1/task, 2/bug, 3/enhancement)
        #[arg(short = 't', long = "type")]
        issue_type: Option<IssueType>,

        /// Milestone (defaults to the current milestone)
        #[arg(short, long)]
        milestone: Option<String>,

        /// Prompt for type and milestone
        #[arg(short, long)]
        edit: bool,
    },

    /// Close an issue
    Close {
        /// Issue number
        id: IssueId,
    },

    /// Reopen a closed issue
    Reopen {
        /// Issue number
        id: IssueId,
    },

    /// List issues
    ///
    /// Filters: open, close, task, bug, enhancement, or a milestone name.
    List {
        /// Filter tokens, all of which must match
        filters: Vec<String>,
    },

    /// Show one issue
    Show {
        /// Issue number
        id: IssueId,
    },

    /// Edit an issue (prompts when no field is given)
    Edit {
        /// Issue number
        id: IssueId,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New type
        #[arg(short = 't', long = "type")]
        issue_type: Option<IssueType>,

        /// New milestone
        #[arg(short, long)]
        milestone: Option<String>,
    },

    /// Show or set the current milestone
    Milestone {
        /// New current milestone
        value: Option<String>,
    },

    /// Show or reset display configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Write the default configuration file
    Reset,
}

fn init_tracing() {
    let filter = std::env::var("GITLI_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "warn".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let global = commands::Global {
        json: cli.json,
        color: cli.color,
        dir: cli.dir,
    };

    match cli.command {
        Commands::Init => commands::init(&global),
        Commands::New {
            title,
            issue_type,
            milestone,
            edit,
        } => commands::new(&global, &title, issue_type, milestone, edit),
        Commands::Close { id } => commands::close(&global, id),
        Commands::Reopen { id } => commands::reopen(&global, id),
        Commands::List { filters } => commands::list(&global, &filters),
        Commands::Show { id } => commands::show(&global, id),
        Commands::Edit {
            id,
            title,
            issue_type,
            milestone,
        } => commands::edit(&global, id, title, issue_type, milestone),
        Commands::Milestone { value } => commands::milestone(&global, value),
        Commands::Config { command } => match command {
            Some(ConfigCommands::Reset) => commands::config_reset(&global),
            Some(ConfigCommands::Show) | None => commands::config_show(&global),
        },
    }
}
