use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "td", about = concat!("[x] tick v", env!("CARGO_PKG_VERSION"), " - your to-do list is a directory"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Run against a different directory
    #[arg(short = 'C', long = "dir", global = true)]
    pub dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new to-do list in the current directory
    Init(InitArgs),
    /// Add a task
    Add(AddArgs),
    /// List tasks, optionally filtered
    List(ListArgs),
    /// Delete a task by its listing position
    Rm(RmArgs),
}

#[derive(Args)]
pub struct InitArgs {
    /// List name (default: inferred from the directory name)
    #[arg(long)]
    pub name: Option<String>,
    /// Reinitialize even if tick/ already exists
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct AddArgs {
    /// Task text
    pub text: String,
    /// Priority: Low, Medium, or High
    #[arg(long, default_value = "Low")]
    pub priority: String,
    /// Due date (YYYY-MM-DD)
    #[arg(long)]
    pub due: Option<String>,
    /// Due time (HH:MM)
    #[arg(long)]
    pub at: Option<String>,
    /// Category
    #[arg(long)]
    pub category: Option<String>,
}

#[derive(Args)]
pub struct ListArgs {
    /// Show only tasks whose text contains this (case-sensitive)
    pub search: Option<String>,
    /// Show only tasks in this category (exact match)
    #[arg(long)]
    pub category: Option<String>,
}

#[derive(Args)]
pub struct RmArgs {
    /// Task position from `td list` (1-based)
    pub position: usize,
}
