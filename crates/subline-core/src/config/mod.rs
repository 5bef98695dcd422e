//! Timeline configuration
//!
//! - Generic YAML config loading/saving
//! - Default config location
//! - [`TimelineConfig`], the tunables shared by the core and the widgets
//!
//! # Usage
//!
//! ```ignore
//! use subline_core::config::{default_config_path, load_config, TimelineConfig};
//!
//! let mut config: TimelineConfig = load_config(&default_config_path());
//! config.validate();
//! ```

mod io;
mod paths;
mod timeline;

pub use io::{load_config, save_config};
pub use paths::{config_dir, default_config_path, CONFIG_FILE_NAME};
pub use timeline::TimelineConfig;
