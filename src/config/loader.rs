//! Configuration loading, migration and persistence.
//!
//! # Data Flow
//! ```text
//! <data-dir>/transfertool.conf  (legacy, optional)
//!     → legacy.rs (tolerant parse → RawConfig, failures recovered)
//! <data-dir>/config.yml         (canonical, created when absent)
//!     → serde_yaml (RawConfig, failures fatal)
//!     → merge: canonical ▸ legacy ▸ built-in defaults
//!     → TransferConfig
//!     → re-serialized and written back unconditionally
//! legacy file deleted once the canonical file is safely on disk
//! ```
//!
//! # Design Decisions
//! - Legacy-stage failures degrade to "no legacy data"; the canonical
//!   stage has no safe fallback and is fatal
//! - The canonical file is rewritten on every load so formatting and the
//!   header comment stay normalized even without a migration
//! - The legacy file is removed only after the canonical persist, so an
//!   aborted load never destroys the only copy of the old settings

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use crate::config::legacy;
use crate::config::schema::{RawConfig, TransferConfig, CONFIG_HEADER, CONFIG_VERSION};

/// File name of the legacy document, migrated-from exactly once.
pub const LEGACY_FILE: &str = "transfertool.conf";

/// File name of the canonical document.
pub const CONFIG_FILE: &str = "config.yml";

/// Fatal configuration failure. The host is expected to disable the
/// feature rather than run on unknown settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not parse {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Run the full load-migrate-persist pass against `data_dir`.
///
/// Creates the directory when missing. Returns the materialized config;
/// any error out of here means the canonical document is unusable.
pub fn load_config(data_dir: &Path) -> Result<TransferConfig, ConfigError> {
    fs::create_dir_all(data_dir).map_err(|source| ConfigError::Io {
        path: data_dir.to_path_buf(),
        source,
    })?;

    let legacy_path = data_dir.join(LEGACY_FILE);
    let config_path = data_dir.join(CONFIG_FILE);

    let must_migrate = legacy_path.exists();
    let legacy_config = if must_migrate {
        info!("Starting transfer config migration...");
        read_legacy(&legacy_path)
    } else {
        None
    };

    let canonical = read_canonical(&config_path)?;
    let config = canonical.merge_onto(legacy_config);

    persist(&config_path, &config)?;

    if must_migrate {
        // Canonical data is on disk; the old file has served its purpose.
        if let Err(err) = fs::remove_file(&legacy_path) {
            warn!(path = %legacy_path.display(), error = %err, "Could not remove legacy config file");
        }
    }

    Ok(config)
}

/// Serialize `config` back into canonical form at `path`, header included.
pub fn persist(path: &Path, config: &TransferConfig) -> Result<(), ConfigError> {
    let body = serde_yaml::to_string(config).map_err(|source| ConfigError::Yaml {
        path: path.to_path_buf(),
        source,
    })?;
    let document = format!("{CONFIG_HEADER}\n{body}");
    fs::write(path, document).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Best-effort read of the legacy document. Every failure mode collapses
/// to `None` with a warning; migration is attempted, never required.
fn read_legacy(path: &Path) -> Option<RawConfig> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "Unable to read old config!");
            return None;
        }
    };

    match legacy::parse_legacy(&text) {
        Ok(raw) => Some(raw),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "Unable to parse old config!");
            None
        }
    }
}

/// Read the canonical document if present. An unreadable or unparseable
/// file is fatal; an absent file is simply an empty document.
fn read_canonical(path: &Path) -> Result<RawConfig, ConfigError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(RawConfig::default()),
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    // serde_yaml maps a fully-empty document to an error for struct
    // targets; treat it like an absent file instead.
    if text.trim().is_empty() {
        return Ok(RawConfig::default());
    }

    let raw: RawConfig = serde_yaml::from_str(&text).map_err(|source| ConfigError::Yaml {
        path: path.to_path_buf(),
        source,
    })?;

    if raw.version.is_some_and(|v| v != CONFIG_VERSION) {
        // Dispatch point for future schema upgrades; only v1 exists today.
        warn!(
            found = raw.version.unwrap_or(0),
            expected = CONFIG_VERSION,
            "Unknown config version, loading as current schema"
        );
    }

    Ok(raw)
}
