use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "kanban", about = "Local kanban board")]
pub struct Cli {
    /// SQLite file holding the board
    #[arg(long, global = true, env = "KANBAN_DB_PATH")]
    pub db: Option<PathBuf>,

    /// Project to act on instead of the current one
    #[arg(long, global = true)]
    pub project: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage projects
    #[command(subcommand)]
    Project(ProjectCmd),
    /// Manage the columns of a project
    #[command(subcommand)]
    Column(ColumnCmd),
    /// Manage tasks
    #[command(subcommand)]
    Task(TaskCmd),
    /// Show or change preferences and label catalogs
    #[command(subcommand)]
    Settings(SettingsCmd),
    /// Print the board of the current project
    Board(FilterArgs),
}

#[derive(Debug, Subcommand)]
pub enum ProjectCmd {
    List,
    Create { name: String },
    Rename { id: String, name: String },
    Delete { id: String },
    /// Make a project current
    Select { id: String },
}

#[derive(Debug, Subcommand)]
pub enum ColumnCmd {
    List,
    Add {
        title: String,
        /// Swatch name (see `column colors`) or hex such as #bfdbfe
        #[arg(long)]
        color: Option<String>,
    },
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        /// Swatch name or hex
        #[arg(long)]
        color: Option<String>,
    },
    /// List the named column color swatches
    Colors,
    Delete { id: String },
    /// Reorder columns; pass every column id in the new order
    Reorder {
        #[arg(required = true)]
        ids: Vec<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum TaskCmd {
    List {
        column: String,
        #[command(flatten)]
        filter: FilterArgs,
    },
    Show { id: String },
    Add {
        column: String,
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Defaults to the configured default priority
        #[arg(long, default_value = "")]
        priority: String,
        /// Defaults to the configured default type
        #[arg(long = "type", default_value = "")]
        task_type: String,
    },
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        priority: Option<String>,
        #[arg(long = "type")]
        task_type: Option<String>,
        #[arg(long)]
        comments: Option<u32>,
    },
    /// Move a task to another column of its project
    Move { id: String, column: String },
    Delete { id: String },
    /// Attach a file to a task
    Attach {
        id: String,
        file: PathBuf,
        /// Overrides the type guessed from the extension
        #[arg(long)]
        mime: Option<String>,
    },
    /// Remove an attachment from a task
    Detach { id: String, attachment: String },
    /// Write an attachment back to disk
    Download {
        id: String,
        attachment: String,
        #[arg(long, short)]
        out: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Args)]
pub struct FilterArgs {
    /// Case-insensitive text in title or description
    #[arg(long, default_value = "")]
    pub search: String,
    #[arg(long, default_value = "All")]
    pub priority: String,
    #[arg(long = "type", default_value = "All")]
    pub task_type: String,
}

#[derive(Debug, Subcommand)]
pub enum SettingsCmd {
    Show,
    /// One of light, dark, blue, purple, forest
    Theme { theme: String },
    /// One of small, medium, large
    FontSize { size: String },
    Compact {
        #[arg(action = ArgAction::Set)]
        on: bool,
    },
    Animations {
        #[arg(action = ArgAction::Set)]
        on: bool,
    },
    AutoSave {
        #[arg(action = ArgAction::Set)]
        on: bool,
    },
    /// Edit the priority catalog
    #[command(subcommand)]
    Priority(LabelCmd),
    /// Edit the task type catalog
    #[command(subcommand)]
    Type(LabelCmd),
}

#[derive(Debug, Subcommand)]
pub enum LabelCmd {
    List,
    Add {
        name: String,
        /// Hex color; defaults to the first unused swatch
        color: Option<String>,
    },
    Remove { name: String },
    Recolor { name: String, color: String },
    Default { name: String },
}
