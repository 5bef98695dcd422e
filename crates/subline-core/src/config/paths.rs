//! Standard config locations

use std::path::PathBuf;

/// File name of the timeline config inside [`config_dir`]
pub const CONFIG_FILE_NAME: &str = "timeline.yaml";

/// Per-user config directory: `<platform config dir>/subline`
///
/// Falls back to the working directory when the platform reports none.
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("subline")
}

/// `<platform config dir>/subline/timeline.yaml`
pub fn default_config_path() -> PathBuf {
    config_dir().join(CONFIG_FILE_NAME)
}
