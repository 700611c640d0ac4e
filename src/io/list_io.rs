use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::ListConfig;

/// Name of the data directory holding list.toml and the storage slots.
pub const TICK_DIR: &str = "tick";

/// Error type for list discovery and config I/O
#[derive(Debug, thiserror::Error)]
pub enum ListError {
    #[error("not a tick list: no tick/ directory found (run `td init`)")]
    NotAList,
    #[error("a tick list already exists at {0} (use --force to reinitialize)")]
    AlreadyInitialized(PathBuf),
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse list.toml: {0}")]
    ConfigParse(#[from] toml::de::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A discovered list: the root directory, its `tick/` data directory, and
/// the parsed config.
#[derive(Debug, Clone)]
pub struct ListDir {
    pub root: PathBuf,
    pub tick_dir: PathBuf,
    pub config: ListConfig,
}

/// Discover the list by walking up from `start`, looking for a `tick/`
/// directory with a list.toml inside.
pub fn discover_list(start: &Path) -> Result<PathBuf, ListError> {
    let mut current = start.to_path_buf();
    loop {
        let tick_dir = current.join(TICK_DIR);
        if tick_dir.is_dir() && tick_dir.join("list.toml").exists() {
            return Ok(current);
        }
        if !current.pop() {
            return Err(ListError::NotAList);
        }
    }
}

/// Load the list rooted at `root`.
pub fn load_list(root: &Path) -> Result<ListDir, ListError> {
    let tick_dir = root.join(TICK_DIR);
    if !tick_dir.is_dir() {
        return Err(ListError::NotAList);
    }

    let config_path = tick_dir.join("list.toml");
    let config_text = fs::read_to_string(&config_path).map_err(|e| ListError::Read {
        path: config_path.clone(),
        source: e,
    })?;
    let config: ListConfig = toml::from_str(&config_text)?;

    Ok(ListDir {
        root: root.to_path_buf(),
        tick_dir,
        config,
    })
}

const LIST_TOML_TEMPLATE: &str = r##"[list]
name = "{name}"

# --- UI Customization ---
# Uncomment and edit to override defaults.
#
# [ui]
# show_key_hints = false
#
# [ui.colors]
# background = "#0C001B"
# text = "#B0AAFF"
# text_bright = "#FFFFFF"
# highlight = "#FB4196"
# dim = "#7D78BF"
# red = "#FF4444"
# yellow = "#FFD700"
# green = "#44FF88"
"##;

/// Create a new list in `dir`: a `tick/` directory with list.toml and an
/// empty tasks slot. Refuses to clobber an existing list unless `force`.
pub fn init_list(dir: &Path, name: &str, force: bool) -> Result<PathBuf, ListError> {
    let tick_dir = dir.join(TICK_DIR);
    if tick_dir.join("list.toml").exists() && !force {
        return Err(ListError::AlreadyInitialized(tick_dir));
    }

    fs::create_dir_all(&tick_dir)?;
    let config_text = LIST_TOML_TEMPLATE.replace("{name}", name);
    fs::write(tick_dir.join("list.toml"), config_text)?;
    fs::write(tick_dir.join("tasks.json"), "[]")?;

    Ok(tick_dir)
}
