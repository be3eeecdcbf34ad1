//! Tolerant parser for the legacy configuration document.
//!
//! # Responsibilities
//! - Parse the old `transfertool.conf` key/value format (HOCON-style:
//!   comments, `key = value` / `key: value` pairs, `key { ... }` blocks,
//!   optionally quoted keys and values)
//! - Surface the recognized keys as a [`RawConfig`] for merging
//!
//! # Design Decisions
//! - Tolerance over strictness: unknown keys are ignored and a known key
//!   with a wrong-typed value is skipped with a warning. The migration
//!   must never take the whole load down; only structural damage
//!   (unbalanced braces, junk lines) fails the parse
//! - Line-based, no lookahead: the legacy files were machine-written and
//!   only ever used this subset

use indexmap::IndexMap;
use thiserror::Error;
use tracing::warn;

use crate::config::schema::RawConfig;

/// Structural failure in the legacy document. Recovered by the loader,
/// which then proceeds as if no legacy data existed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LegacyParseError {
    #[error("line {line}: closing brace without an open block")]
    UnexpectedClosingBrace { line: usize },
    #[error("line {line}: expected `key = value`, `key: value` or `key {{`")]
    MalformedLine { line: usize },
    #[error("unterminated block at end of document")]
    UnterminatedBlock,
}

/// One parsed node of the legacy document.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    Scalar(String),
    Block(IndexMap<String, Node>),
}

/// Parse the legacy document text into the partial config it carries.
pub fn parse_legacy(text: &str) -> Result<RawConfig, LegacyParseError> {
    let root = parse_nodes(text)?;
    Ok(extract_config(&root))
}

fn parse_nodes(text: &str) -> Result<IndexMap<String, Node>, LegacyParseError> {
    let mut root = IndexMap::new();
    // Stack of open blocks; (key, contents) pairs still being filled.
    let mut stack: Vec<(String, IndexMap<String, Node>)> = Vec::new();

    for (idx, raw_line) in text.lines().enumerate() {
        let line = raw_line.trim();
        let line_no = idx + 1;

        if line.is_empty() || line.starts_with('#') || line.starts_with("//") {
            continue;
        }

        if line == "}" {
            let Some((key, block)) = stack.pop() else {
                return Err(LegacyParseError::UnexpectedClosingBrace { line: line_no });
            };
            let target = stack.last_mut().map_or(&mut root, |(_, map)| map);
            target.insert(key, Node::Block(block));
            continue;
        }

        if let Some(before) = line.strip_suffix('{') {
            let key = unquote(before.trim());
            if key.is_empty() {
                return Err(LegacyParseError::MalformedLine { line: line_no });
            }
            stack.push((key, IndexMap::new()));
            continue;
        }

        let (key, value) =
            split_pair(line).ok_or(LegacyParseError::MalformedLine { line: line_no })?;
        let target = stack.last_mut().map_or(&mut root, |(_, map)| map);
        target.insert(key, Node::Scalar(value));
    }

    if !stack.is_empty() {
        return Err(LegacyParseError::UnterminatedBlock);
    }

    Ok(root)
}

/// Split a `key = value` / `key: value` line. Quoted keys may contain the
/// separator characters, so the key is unquoted before the separator is
/// looked for.
fn split_pair(line: &str) -> Option<(String, String)> {
    let (key, rest) = if let Some(rest) = line.strip_prefix('"') {
        let close = rest.find('"')?;
        (rest[..close].to_string(), &rest[close + 1..])
    } else {
        let sep = line.find(['=', ':'])?;
        (line[..sep].trim().to_string(), &line[sep..])
    };

    let rest = rest.trim_start();
    let rest = rest.strip_prefix(['=', ':'])?;
    let value = unquote(rest.trim().trim_end_matches(','));

    if key.is_empty() {
        return None;
    }
    Some((key, value))
}

fn unquote(text: &str) -> String {
    let trimmed = text.trim();
    trimmed
        .strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .unwrap_or(trimmed)
        .to_string()
}

/// Pick the recognized keys out of the parsed tree. Both the kebab-case
/// keys the old writer emitted and camelCase spellings from hand edits
/// are accepted.
fn extract_config(root: &IndexMap<String, Node>) -> RawConfig {
    RawConfig {
        forward_original_target: bool_key(root, "forward-original-target", "forwardOriginalTarget"),
        transfer_mappings: map_key(root, "transfer-mappings", "transferMappings"),
        add_transfer_command: bool_key(root, "add-transfer-command", "addTransferCommand"),
        transfer_shortcuts: map_key(root, "transfer-shortcuts", "transferShortcuts"),
        default_locale: string_key(root, "default-locale", "defaultLocale"),
        version: int_key(root, "version", "version"),
    }
}

fn lookup<'a>(root: &'a IndexMap<String, Node>, kebab: &str, camel: &str) -> Option<&'a Node> {
    root.get(kebab).or_else(|| root.get(camel))
}

fn bool_key(root: &IndexMap<String, Node>, kebab: &str, camel: &str) -> Option<bool> {
    match lookup(root, kebab, camel)? {
        Node::Scalar(text) => match text.to_ascii_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            other => {
                warn!(key = kebab, value = other, "Ignoring non-boolean legacy value");
                None
            }
        },
        Node::Block(_) => {
            warn!(key = kebab, "Ignoring legacy block where a boolean was expected");
            None
        }
    }
}

fn string_key(root: &IndexMap<String, Node>, kebab: &str, camel: &str) -> Option<String> {
    match lookup(root, kebab, camel)? {
        Node::Scalar(text) => Some(text.clone()),
        Node::Block(_) => {
            warn!(key = kebab, "Ignoring legacy block where a string was expected");
            None
        }
    }
}

fn int_key(root: &IndexMap<String, Node>, kebab: &str, camel: &str) -> Option<u32> {
    match lookup(root, kebab, camel)? {
        Node::Scalar(text) => match text.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(key = kebab, value = %text, "Ignoring non-integer legacy value");
                None
            }
        },
        Node::Block(_) => {
            warn!(key = kebab, "Ignoring legacy block where an integer was expected");
            None
        }
    }
}

fn map_key(
    root: &IndexMap<String, Node>,
    kebab: &str,
    camel: &str,
) -> Option<IndexMap<String, String>> {
    match lookup(root, kebab, camel)? {
        Node::Block(block) => {
            let mut entries = IndexMap::new();
            for (key, node) in block {
                match node {
                    Node::Scalar(value) => {
                        entries.insert(key.clone(), value.clone());
                    }
                    Node::Block(_) => {
                        warn!(key = %key, "Ignoring nested block inside legacy map entry");
                    }
                }
            }
            Some(entries)
        }
        Node::Scalar(_) => {
            warn!(key = kebab, "Ignoring legacy scalar where a map was expected");
            None
        }
    }
}
