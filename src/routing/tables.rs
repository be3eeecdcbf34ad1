//! Lookup table construction.
//!
//! # Responsibilities
//! - Parse the config's string-pair entries into endpoint tables
//! - Mapping table: source endpoint → destination endpoint
//! - Shortcut table: short name → destination endpoint
//!
//! # Design Decisions
//! - A malformed entry costs that entry, not the table
//! - The shortcut table stays empty while the transfer command is
//!   disabled, so a stale config section cannot leak destinations
//! - Duplicate sources resolve last-write-wins by document order

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::config::TransferConfig;
use crate::endpoint::Endpoint;

/// Fallback port for the source side of a mapping entry.
pub const DEFAULT_SOURCE_PORT: i32 = 25565;

/// Fallback port for destinations (mapping values and shortcuts).
pub const DEFAULT_DESTINATION_PORT: i32 = 19132;

/// The lookup structures consulted at transfer-request time. Built once
/// per configuration load and then immutable.
#[derive(Debug, Default)]
pub struct RouteTables {
    mappings: HashMap<Endpoint, Endpoint>,
    shortcuts: HashMap<String, Endpoint>,
}

impl RouteTables {
    /// Build both tables from `config`. Parse problems are logged and the
    /// affected entry is dropped.
    pub fn build(config: &TransferConfig) -> Self {
        let mut mappings = HashMap::new();
        for (source, destination) in &config.transfer_mappings {
            let parsed = parse_entry(source, DEFAULT_SOURCE_PORT)
                .and_then(|src| parse_entry(destination, DEFAULT_DESTINATION_PORT).map(|dst| (src, dst)));
            if let Some((src, dst)) = parsed {
                mappings.insert(src, dst);
            }
        }
        info!("Registered {} transfer mappings.", mappings.len());

        let mut shortcuts = HashMap::new();
        if config.add_transfer_command {
            for (name, destination) in &config.transfer_shortcuts {
                if let Some(dst) = parse_entry(destination, DEFAULT_DESTINATION_PORT) {
                    shortcuts.insert(name.clone(), dst);
                }
            }
            info!("Registered {} server name mappings.", shortcuts.len());
        }

        Self {
            mappings,
            shortcuts,
        }
    }

    /// Exact-match lookup of a source endpoint. No side effects.
    pub fn resolve(&self, source: &Endpoint) -> Option<&Endpoint> {
        self.mappings.get(source)
    }

    /// Case-sensitive shortcut lookup.
    pub fn shortcut(&self, name: &str) -> Option<&Endpoint> {
        self.shortcuts.get(name)
    }

    /// Names of all configured shortcuts, for menu building by the host.
    pub fn shortcut_names(&self) -> impl Iterator<Item = &str> {
        self.shortcuts.keys().map(String::as_str)
    }

    pub fn mapping_count(&self) -> usize {
        self.mappings.len()
    }
}

fn parse_entry(text: &str, fallback_port: i32) -> Option<Endpoint> {
    match Endpoint::parse_combined(text, fallback_port, |msg| warn!("{msg}")) {
        Ok(endpoint) => Some(endpoint),
        Err(err) => {
            warn!(error = %err, "Skipping unparseable config entry");
            debug!(entry = text, "Offending entry");
            None
        }
    }
}
