//! Configuration file loading for yara
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `YARA_`-prefixed environment variables (`YARA_SERVER__BASE_URL`)
//! 2. `--config <path>` specified file
//! 3. Project root: `./yara.toml` or `./.yara.toml`
//! 4. Global: `<config_dir>/yara/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileConfig, FileContextConfig, FileIdentityConfig, FileLogConfig, FileOutputConfig,
    FileServerConfig,
};
pub use loader::ConfigLoader;
