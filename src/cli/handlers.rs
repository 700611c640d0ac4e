use std::path::PathBuf;

use chrono::{NaiveDate, NaiveTime};

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::list_io::{self, ListDir};
use crate::io::storage::FileStorage;
use crate::model::task::TaskDraft;
use crate::store::TaskStore;
use crate::store::view::visible_indices;

/// Error type for CLI input validation
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("invalid priority \"{0}\" (expected Low, Medium, or High)")]
    InvalidPriority(String),
    #[error("invalid due date \"{0}\" (expected YYYY-MM-DD)")]
    InvalidDate(String),
    #[error("invalid due time \"{0}\" (expected HH:MM)")]
    InvalidTime(String),
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    match cli.command {
        Some(Commands::Init(args)) => cmd_init(args, &cli.dir),
        Some(Commands::Add(args)) => cmd_add(args, &cli.dir),
        Some(Commands::List(args)) => cmd_list(args, &cli.dir, json),
        Some(Commands::Rm(args)) => cmd_rm(args, &cli.dir),
        // Bare `td` launches the TUI; main handles it before dispatch
        None => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// The directory to operate from: the -C override, or the cwd.
fn start_dir(dir: &Option<String>) -> Result<PathBuf, Box<dyn std::error::Error>> {
    match dir {
        Some(d) => Ok(std::fs::canonicalize(d)
            .map_err(|e| format!("cannot resolve -C path '{}': {}", d, e))?),
        None => Ok(std::env::current_dir()?),
    }
}

/// Discover the list from the start directory and open its task store.
pub fn open_store(
    dir: &Option<String>,
) -> Result<(ListDir, TaskStore<FileStorage>), Box<dyn std::error::Error>> {
    let start = start_dir(dir)?;
    let root = list_io::discover_list(&start)?;
    let list = list_io::load_list(&root)?;
    let store = TaskStore::open(FileStorage::new(&list.tick_dir));
    Ok((list, store))
}

/// Infer a list name from a directory name: replace hyphens with spaces,
/// title-case each word.
fn infer_name(dir_name: &str) -> String {
    dir_name
        .split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

pub fn cmd_init(args: InitArgs, dir: &Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let target = start_dir(dir)?;
    let name = match args.name {
        Some(name) => name,
        None => target
            .file_name()
            .and_then(|n| n.to_str())
            .map(infer_name)
            .unwrap_or_else(|| "To-Do List".to_string()),
    };

    let tick_dir = list_io::init_list(&target, &name, args.force)?;
    println!("Initialized to-do list \"{}\" at {}", name, tick_dir.display());
    Ok(())
}

pub fn cmd_add(args: AddArgs, dir: &Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    // The store maps any unknown label to Low; the CLI is stricter so a
    // typo like --priority Hgih doesn't silently demote the task.
    if !matches!(args.priority.as_str(), "Low" | "Medium" | "High") {
        return Err(CliError::InvalidPriority(args.priority).into());
    }
    if let Some(due) = &args.due {
        NaiveDate::parse_from_str(due, "%Y-%m-%d")
            .map_err(|_| CliError::InvalidDate(due.clone()))?;
    }
    if let Some(at) = &args.at {
        NaiveTime::parse_from_str(at, "%H:%M").map_err(|_| CliError::InvalidTime(at.clone()))?;
    }

    let (_, mut store) = open_store(dir)?;
    let draft = TaskDraft {
        text: args.text,
        priority: args.priority,
        due_date: args.due.unwrap_or_default(),
        due_time: args.at.unwrap_or_default(),
        category: args.category.unwrap_or_default(),
    };

    if store.add(&draft)? {
        let position = store.len();
        println!("Added {}: {}", position, store.tasks()[position - 1].text);
    } else {
        println!("nothing to add: task text is empty");
    }
    Ok(())
}

pub fn cmd_list(
    args: ListArgs,
    dir: &Option<String>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let (list, store) = open_store(dir)?;
    let search = args.search.unwrap_or_default();
    let category = args.category.unwrap_or_default();
    let indices = visible_indices(store.tasks(), &search, &category);

    if json {
        let tasks: Vec<TaskJson> = indices
            .iter()
            .map(|&i| task_to_json(i + 1, &store.tasks()[i]))
            .collect();
        let out = TaskListJson {
            list: list.config.list.name.clone(),
            tasks,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("{}", format_list_header(&list.config.list.name));
    if store.is_empty() {
        println!("(no tasks)");
    } else if indices.is_empty() {
        println!("(no matching tasks)");
    } else {
        for &i in &indices {
            println!("{}", format_task_row(i + 1, &store.tasks()[i]));
        }
    }
    Ok(())
}

pub fn cmd_rm(args: RmArgs, dir: &Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let (_, mut store) = open_store(dir)?;

    // Positions are 1-based in every listing; anything outside the current
    // bounds (including 0) deletes nothing.
    let removed = match args.position.checked_sub(1) {
        Some(index) if index < store.len() => {
            let text = store.tasks()[index].text.clone();
            store.remove(index)?;
            Some(text)
        }
        _ => None,
    };

    match removed {
        Some(text) => println!("Deleted {}: {}", args.position, text),
        None => println!("no task at position {}", args.position),
    }
    Ok(())
}
