//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! TransferConfig (string → string entries)
//!     → tables.rs (endpoint parsing, table build)
//!     → RouteTables (mapping table + shortcut table, immutable)
//!     → router.rs (decision policy, atomic publish)
//!     → TransferDecision
//! ```
//!
//! # Design Decisions
//! - Tables rebuilt wholesale on every (re)load, never mutated in place
//! - Exact-match lookup only: no wildcards, no prefixes, no default entry
//! - Explicit NoDestination rather than a silent default

pub mod router;
pub mod tables;

pub use router::{TransferDecision, TransferRouter};
pub use tables::{RouteTables, DEFAULT_DESTINATION_PORT, DEFAULT_SOURCE_PORT};
