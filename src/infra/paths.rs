// src/infra/paths.rs — XDG-compliant path management
//
// All paths respect the HEROPICK_HOME environment variable for isolation.
// When HEROPICK_HOME is set, config and data live under that directory.
// When unset, config uses ~/.heropick/ and data uses XDG_DATA_HOME/heropick.

use directories::{BaseDirs, ProjectDirs};
use std::path::PathBuf;
use std::sync::OnceLock;

static PROJECT_DIRS: OnceLock<Option<ProjectDirs>> = OnceLock::new();

fn project_dirs() -> Option<&'static ProjectDirs> {
    PROJECT_DIRS
        .get_or_init(|| ProjectDirs::from("", "", "heropick"))
        .as_ref()
}

/// Returns the HEROPICK_HOME override, if set.
fn heropick_home() -> Option<PathBuf> {
    std::env::var_os("HEROPICK_HOME").map(PathBuf::from)
}

/// Home directory, or the working directory when none can be determined.
pub fn dirs_home() -> PathBuf {
    BaseDirs::new()
        .map(|b| b.home_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Configuration directory: $HEROPICK_HOME/ or ~/.heropick/
pub fn config_dir() -> PathBuf {
    if let Some(home) = heropick_home() {
        return home;
    }
    dirs_home().join(".heropick")
}

/// Data directory: $HEROPICK_HOME/data/ or ~/.local/share/heropick/
pub fn data_dir() -> PathBuf {
    if let Some(home) = heropick_home() {
        return home.join("data");
    }
    match project_dirs() {
        Some(dirs) => dirs.data_local_dir().to_path_buf(),
        None => config_dir().join("data"),
    }
}

pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Database path
pub fn db_path() -> PathBuf {
    data_dir().join("heropick.db")
}

/// Create config and data directories if they do not exist.
pub fn ensure_dirs() -> std::io::Result<()> {
    std::fs::create_dir_all(config_dir())?;
    std::fs::create_dir_all(data_dir())?;
    Ok(())
}
