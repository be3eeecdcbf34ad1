//! Argument contract of the user-facing transfer command.
//!
//! # Responsibilities
//! - Classify the raw positional arguments (0, 1, 2, or too many)
//! - Resolve shortcut names and ad-hoc targets into destinations
//! - Gate everything behind the command feature flag
//!
//! # Design Decisions
//! - This module owns the decision, the host owns the presentation:
//!   rejections carry a message *key* that the host renders through the
//!   locale store, and the interactive chooser is only signalled, never
//!   drawn here
//! - Destination validity is checked at use time and surfaced, never
//!   silently ignored

use crate::endpoint::{Endpoint, InvalidDestinationError};
use crate::routing::{TransferRouter, DEFAULT_DESTINATION_PORT};

/// Classified form of the command's positional arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferRequest {
    /// No target given: the host should open its interactive chooser.
    OpenMenu,
    /// One argument: a shortcut name, or a combined `host[:port]` string
    /// for callers allowed to transfer anywhere.
    Named(String),
    /// Two arguments: host and (still unparsed) port text.
    Explicit { host: String, port: String },
    /// More than two arguments.
    UsageError { provided: usize },
}

impl TransferRequest {
    pub fn from_args(args: &[String]) -> Self {
        match args {
            [] => Self::OpenMenu,
            [target] => Self::Named(target.clone()),
            [host, port] => Self::Explicit {
                host: host.clone(),
                port: port.clone(),
            },
            more => Self::UsageError {
                provided: more.len(),
            },
        }
    }
}

/// What the host should do with a transfer command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Send the caller to this (validated) destination.
    Transfer(Endpoint),
    /// Open the interactive destination chooser.
    OpenMenu,
    /// Refuse, showing the message behind this locale key.
    Rejected { message_key: &'static str },
}

/// Execute the command contract against the live router state.
///
/// `may_transfer_any` reflects the host-side permission that allows
/// arbitrary targets instead of configured shortcuts only. Parse warnings
/// for ad-hoc targets go to `warn` so the host can relay them to the
/// caller.
pub fn execute<F>(
    router: &TransferRouter,
    args: &[String],
    may_transfer_any: bool,
    warn: F,
) -> CommandOutcome
where
    F: FnMut(String),
{
    // The config may have disabled the command after it was registered.
    if !router.transfer_command_enabled() {
        return reject("commands.not_enabled");
    }

    match TransferRequest::from_args(args) {
        TransferRequest::OpenMenu => {
            if router.shortcut_names().is_empty() && !may_transfer_any {
                reject("commands.transfer.none_available")
            } else {
                CommandOutcome::OpenMenu
            }
        }
        TransferRequest::Named(target) => resolve_named(router, &target, may_transfer_any, warn),
        TransferRequest::Explicit { host, port } => {
            if !may_transfer_any {
                return reject("commands.transfer.too_many_args");
            }
            resolve_explicit(&host, &port)
        }
        TransferRequest::UsageError { .. } => reject("commands.transfer.unknown_args"),
    }
}

fn resolve_named<F>(
    router: &TransferRouter,
    target: &str,
    may_transfer_any: bool,
    mut warn: F,
) -> CommandOutcome
where
    F: FnMut(String),
{
    if let Some(destination) = router.shortcut(target) {
        return check_destination(destination);
    }

    if !may_transfer_any {
        return reject("commands.transfer.not_found");
    }

    match Endpoint::parse_combined(target, DEFAULT_DESTINATION_PORT, &mut warn) {
        Ok(destination) => check_destination(destination),
        Err(_) => reject("destination.ip.invalid"),
    }
}

fn resolve_explicit(host: &str, port_text: &str) -> CommandOutcome {
    match port_text.parse::<i32>() {
        Ok(port) => check_destination(Endpoint::new(host, port)),
        Err(_) => reject("destination.port.invalid"),
    }
}

fn check_destination(destination: Endpoint) -> CommandOutcome {
    match destination.validate() {
        Ok(()) => CommandOutcome::Transfer(destination),
        Err(InvalidDestinationError::EmptyHost) => reject("destination.ip.invalid"),
        Err(InvalidDestinationError::PortOutOfRange(_)) => reject("destination.port.invalid"),
    }
}

fn reject(message_key: &'static str) -> CommandOutcome {
    CommandOutcome::Rejected { message_key }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn classifies_argument_counts() {
        assert_eq!(TransferRequest::from_args(&[]), TransferRequest::OpenMenu);
        assert_eq!(
            TransferRequest::from_args(&args(&["lobby"])),
            TransferRequest::Named("lobby".to_string())
        );
        assert_eq!(
            TransferRequest::from_args(&args(&["host.example", "19132"])),
            TransferRequest::Explicit {
                host: "host.example".to_string(),
                port: "19132".to_string(),
            }
        );
        assert_eq!(
            TransferRequest::from_args(&args(&["a", "b", "c"])),
            TransferRequest::UsageError { provided: 3 }
        );
    }

    #[test]
    fn explicit_target_rejects_bad_port_text() {
        assert_eq!(
            resolve_explicit("host.example", "not-a-port"),
            CommandOutcome::Rejected {
                message_key: "destination.port.invalid"
            }
        );
        assert_eq!(
            resolve_explicit("host.example", "19132"),
            CommandOutcome::Transfer(Endpoint::new("host.example", 19132))
        );
    }

    #[test]
    fn out_of_range_destinations_are_refused() {
        assert_eq!(
            check_destination(Endpoint::new("host.example", 70000)),
            CommandOutcome::Rejected {
                message_key: "destination.port.invalid"
            }
        );
        assert_eq!(
            check_destination(Endpoint::new("", 19132)),
            CommandOutcome::Rejected {
                message_key: "destination.ip.invalid"
            }
        );
    }
}
