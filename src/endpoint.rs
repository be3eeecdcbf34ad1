//! Endpoint value type and combined-string parsing.
//!
//! # Responsibilities
//! - Represent a (host, port) pair with value semantics
//! - Parse `"host"`, `"host:port"` and `"[ipv6]:port"` input strings
//! - Expose validity predicates; invalid endpoints are representable
//!
//! # Design Decisions
//! - Validity is checked at use time, not enforced at construction:
//!   config entries with a bad port must survive parsing so the caller
//!   can report them instead of losing the whole table
//! - Port is `i32`, not `u16`, so out-of-range values stay observable
//! - Parse warnings go to a caller-supplied sink, never a global

use thiserror::Error;

/// The input claimed an IPv6 bracket literal but is not one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed endpoint literal: {input:?}")]
pub struct MalformedEndpointError {
    /// The offending input string.
    pub input: String,
}

/// Why an endpoint is unusable as a transfer destination.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidDestinationError {
    #[error("destination host is empty")]
    EmptyHost,
    #[error("destination port {0} is outside 0-65535")]
    PortOutOfRange(i32),
}

/// One side of a transfer: a host string and a port.
///
/// Equality and hashing are value-based; endpoints are used as map keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint {
    host: String,
    port: i32,
}

impl Endpoint {
    /// Create an endpoint from explicit parts. No validation is performed.
    pub fn new(host: impl Into<String>, port: i32) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> i32 {
        self.port
    }

    /// True if the host is empty or whitespace-only.
    pub fn invalid_host(&self) -> bool {
        self.host.trim().is_empty()
    }

    /// True if the port falls outside the valid 0-65535 range.
    pub fn invalid_port(&self) -> bool {
        self.port < 0 || self.port > 65535
    }

    /// Check both predicates, reporting the first failure.
    pub fn validate(&self) -> Result<(), InvalidDestinationError> {
        if self.invalid_host() {
            return Err(InvalidDestinationError::EmptyHost);
        }
        if self.invalid_port() {
            return Err(InvalidDestinationError::PortOutOfRange(self.port));
        }
        Ok(())
    }

    /// Parse a combined `host[:port]` string.
    ///
    /// - No `:` in the input: the whole input is the host, `fallback_port`
    ///   is used.
    /// - Leading `[`: IPv6 bracket literal; the host is the text between the
    ///   brackets and the port follows the `]:` pair. A missing closing
    ///   bracket, or trailing text that is not `:port`, fails with
    ///   [`MalformedEndpointError`].
    /// - Otherwise the input splits at the *last* `:`, which keeps plain
    ///   IPv4 addresses and domain names working.
    ///
    /// A port substring that does not parse as base-10 is reported through
    /// `warn` and replaced by `fallback_port`; the host part is kept. Ports
    /// are *not* range-checked here — call [`Endpoint::validate`] before
    /// transferring anyone.
    pub fn parse_combined<F>(
        input: &str,
        fallback_port: i32,
        mut warn: F,
    ) -> Result<Self, MalformedEndpointError>
    where
        F: FnMut(String),
    {
        if !input.contains(':') {
            return Ok(Self::new(input, fallback_port));
        }

        let (host, port_text) = if let Some(rest) = input.strip_prefix('[') {
            let Some(close) = rest.find(']') else {
                return Err(MalformedEndpointError {
                    input: input.to_string(),
                });
            };
            let host = &rest[..close];
            let after = &rest[close + 1..];
            if after.is_empty() {
                // "[::1]" with no port at all
                return Ok(Self::new(host, fallback_port));
            }
            let Some(port_text) = after.strip_prefix(':') else {
                return Err(MalformedEndpointError {
                    input: input.to_string(),
                });
            };
            (host, port_text)
        } else if let Some(colon) = input.rfind(':') {
            // Last colon wins so "host" may be an IPv4 address or domain name
            (&input[..colon], &input[colon + 1..])
        } else {
            return Ok(Self::new(input, fallback_port));
        };

        let port = match port_text.parse::<i32>() {
            Ok(port) => port,
            Err(_) => {
                warn(format!(
                    "Invalid port found: {port_text} in input: {input}! \
                     Defaulting to default port ({fallback_port})."
                ));
                fallback_port
            }
        };

        Ok(Self::new(host, port))
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}
