//! Transfer-destination decision and state publishing.
//!
//! # Responsibilities
//! - Own the live configuration, route tables and locale store
//! - Decide the destination for an incoming transfer request
//! - Rebuild everything on reload and publish it atomically
//!
//! # Design Decisions
//! - Decision priority: explicit mapping ▸ passthrough ▸ nothing
//! - New state is built completely off to the side, then swapped in via
//!   one `ArcSwap` store; lookups never see a half-built table
//! - A failed reload keeps the last-good state published and reports the
//!   error, instead of taking the whole feature down

use std::path::{Path, PathBuf};
use std::sync::Arc;

use arc_swap::ArcSwap;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::{self, ConfigError, TransferConfig};
use crate::endpoint::Endpoint;
use crate::locale::{LocaleError, LocaleStore};
use crate::routing::tables::RouteTables;

/// Outcome of a transfer-destination decision.
///
/// `NoDestination` is a defined empty result, not an error; the caller
/// decides whether to log, drop or message a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferDecision {
    /// An explicit mapping entry matched.
    Mapped(Endpoint),
    /// No mapping matched and passthrough is enabled.
    Passthrough(Endpoint),
    /// No mapping matched and passthrough is disabled.
    NoDestination,
}

/// Fatal failure while building router state.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Locale(#[from] LocaleError),
}

/// Everything a lookup needs, replaced wholesale on reload.
struct RouterState {
    config: TransferConfig,
    tables: RouteTables,
    locales: LocaleStore,
}

/// The long-lived facade the host talks to.
pub struct TransferRouter {
    data_dir: PathBuf,
    state: ArcSwap<RouterState>,
}

impl TransferRouter {
    /// Run the initial load against `data_dir`. Unlike [`reload`], there
    /// is no previous state to fall back to, so failure here is fatal.
    ///
    /// [`reload`]: TransferRouter::reload
    pub fn load(data_dir: impl Into<PathBuf>) -> Result<Self, LoadError> {
        let data_dir = data_dir.into();
        let state = build_state(&data_dir)?;
        Ok(Self {
            data_dir,
            state: ArcSwap::from_pointee(state),
        })
    }

    /// Rebuild config, tables and locales, then publish them atomically.
    /// On failure the previous state stays live and the error is returned.
    pub fn reload(&self) -> Result<(), LoadError> {
        info!("Reloading config!");
        let state = build_state(&self.data_dir)?;
        self.state.store(Arc::new(state));
        Ok(())
    }

    /// Decide where a transfer aimed at `source` should really go.
    pub fn decide(&self, source: &Endpoint) -> TransferDecision {
        let state = self.state.load();
        evaluate(&state.tables, state.config.forward_original_target, source)
    }

    /// Event entry point: the host hands over the raw host/port pair of
    /// an outbound transfer request.
    pub fn handle_transfer(&self, host: &str, port: i32) -> TransferDecision {
        self.decide(&Endpoint::new(host, port))
    }

    /// Destination bound to a shortcut name, if the transfer command is
    /// enabled and the name is known.
    pub fn shortcut(&self, name: &str) -> Option<Endpoint> {
        self.state.load().tables.shortcut(name).cloned()
    }

    /// All configured shortcut names, for menu building by the host.
    pub fn shortcut_names(&self) -> Vec<String> {
        self.state
            .load()
            .tables
            .shortcut_names()
            .map(str::to_string)
            .collect()
    }

    /// Whether the user-facing transfer command should exist at all.
    pub fn transfer_command_enabled(&self) -> bool {
        self.state.load().config.add_transfer_command
    }

    /// Translated message for the configured default locale.
    pub fn locale_string(&self, key: &str) -> String {
        let state = self.state.load();
        state.locales.get(&state.config.default_locale, key)
    }

    /// Translated message for a caller-specific locale.
    pub fn locale_string_for(&self, locale: &str, key: &str) -> String {
        self.state.load().locales.get(locale, key)
    }

    /// Snapshot of the live configuration.
    pub fn config(&self) -> TransferConfig {
        self.state.load().config.clone()
    }
}

/// The decision policy itself: explicit mapping beats passthrough beats
/// nothing.
fn evaluate(
    tables: &RouteTables,
    forward_original_target: bool,
    source: &Endpoint,
) -> TransferDecision {
    if let Some(destination) = tables.resolve(source) {
        debug!(%source, %destination, "Transferring based on transfer mapping");
        return TransferDecision::Mapped(destination.clone());
    }

    if forward_original_target {
        debug!(%source, "Forwarding original transfer target");
        return TransferDecision::Passthrough(source.clone());
    }

    debug!(%source, "No target found for transfer request");
    TransferDecision::NoDestination
}

fn build_state(data_dir: &Path) -> Result<RouterState, LoadError> {
    let config = config::load_config(data_dir)?;
    let tables = RouteTables::build(&config);
    let locales = LocaleStore::load(&data_dir.join("translations"), &config.default_locale)?;
    Ok(RouterState {
        config,
        tables,
        locales,
    })
}
