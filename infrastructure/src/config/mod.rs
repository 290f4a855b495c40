//! Configuration file loading for subscout
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `SUBSCOUT_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./subscout.toml` or `./.subscout.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/subscout/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileEnumerationConfig, FileSourcesConfig,
};
pub use loader::{ConfigLoader, ENV_PREFIX};
