//! Transfer request routing with a migratable configuration.
//!
//! Resolves, for an incoming server-transfer request, the destination a
//! client should actually be redirected to: an explicit mapping entry if
//! one matches, the original target if passthrough is enabled, or a
//! defined "no destination" outcome. Destinations can also be reached by
//! name through the transfer command's shortcut table.
//!
//! # Architecture Overview
//!
//! ```text
//! <data-dir>/transfertool.conf ──┐ (legacy, migrated once)
//! <data-dir>/config.yml ─────────┤
//!                                ▼
//!                         config (load → migrate → merge → persist)
//!                                ▼
//!                         TransferConfig
//!                                ▼
//!              routing (endpoint parsing → route tables)
//!                                ▼
//!   host event ──▶ TransferRouter::decide ──▶ TransferDecision
//!   command args ──▶ command::execute ──▶ CommandOutcome
//!                                │
//!   <data-dir>/translations/*.properties ──▶ locale (messages)
//! ```
//!
//! The hosting layer (plugin lifecycle, permissions, interactive menus)
//! stays outside this crate; it calls in with parsed arguments and
//! renders whatever comes back.

pub mod command;
pub mod config;
pub mod endpoint;
pub mod locale;
pub mod routing;

pub use command::{CommandOutcome, TransferRequest};
pub use config::{ConfigError, TransferConfig};
pub use endpoint::{Endpoint, InvalidDestinationError, MalformedEndpointError};
pub use locale::LocaleStore;
pub use routing::router::LoadError;
pub use routing::{TransferDecision, TransferRouter};
