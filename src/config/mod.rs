//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! legacy file (transfertool.conf, optional)
//!     → legacy.rs (tolerant parse)
//! canonical file (config.yml)
//!     → loader.rs (parse & deserialize, merge, persist)
//!     → TransferConfig (validated, immutable)
//!     → consumed by routing to build the lookup tables
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a full reload
//! - All fields have defaults to allow minimal configs
//! - Legacy parse failures are recovered; canonical failures are fatal

pub mod legacy;
pub mod loader;
pub mod schema;

pub use loader::{load_config, ConfigError, CONFIG_FILE, LEGACY_FILE};
pub use schema::{RawConfig, TransferConfig, CONFIG_VERSION};
