//! Configuration schema definitions.
//!
//! This module defines the persisted settings structure. All types derive
//! Serde traits; keys are kebab-case in the document. Every field has a
//! default so a minimal (or empty) config file still materializes.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Current schema version. Stored in every written document so future
/// loaders can detect and branch on schema changes; not branched on today.
pub const CONFIG_VERSION: u32 = 1;

/// Fixed header comment written at the top of the canonical config file.
pub const CONFIG_HEADER: &str = "\
# TransferTool Configuration
#
# Maps server transfer targets to the destinations clients should
# actually be redirected to.
";

/// The validated, versioned settings object.
///
/// Immutable once loaded; a reload replaces the whole instance.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct TransferConfig {
    /// Whether to pass the original target through unchanged when no
    /// mapping entry matches.
    pub forward_original_target: bool,

    /// Source `host[:port]` to destination `host[:port]` entries.
    /// Document order is preserved; on duplicate keys the last one wins.
    pub transfer_mappings: IndexMap<String, String>,

    /// Whether the user-facing transfer command (and with it the shortcut
    /// table) is enabled.
    pub add_transfer_command: bool,

    /// Shortcut name to destination `host[:port]` entries. Only consulted
    /// while `add-transfer-command` is true.
    pub transfer_shortcuts: IndexMap<String, String>,

    /// Locale used when a caller does not carry one of its own.
    pub default_locale: String,

    /// The config version. DO NOT CHANGE!
    pub version: u32,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            forward_original_target: false,
            transfer_mappings: default_mappings(),
            add_transfer_command: false,
            transfer_shortcuts: default_shortcuts(),
            default_locale: "en_US".to_string(),
            version: CONFIG_VERSION,
        }
    }
}

fn default_mappings() -> IndexMap<String, String> {
    IndexMap::from([
        ("127.0.0.1:25565".to_string(), "127.0.0.1:19132".to_string()),
        ("javaip.com".to_string(), "bedrockip.com".to_string()),
    ])
}

fn default_shortcuts() -> IndexMap<String, String> {
    IndexMap::from([
        ("vanilla".to_string(), "127.0.0.1:19132".to_string()),
        ("lobby".to_string(), "bedrockip.com".to_string()),
    ])
}

/// Partially-present form of [`TransferConfig`], used while merging the
/// canonical document over migrated legacy values over built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RawConfig {
    pub forward_original_target: Option<bool>,
    pub transfer_mappings: Option<IndexMap<String, String>>,
    pub add_transfer_command: Option<bool>,
    pub transfer_shortcuts: Option<IndexMap<String, String>>,
    pub default_locale: Option<String>,
    pub version: Option<u32>,
}

impl RawConfig {
    /// True when no recognized key was present at all.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Materialize a full config: a key present here wins, a key missing
    /// here inherits from `fallback`, and anything still missing takes the
    /// built-in default.
    pub fn merge_onto(self, fallback: Option<RawConfig>) -> TransferConfig {
        let fallback = fallback.unwrap_or_default();
        let defaults = TransferConfig::default();

        TransferConfig {
            forward_original_target: self
                .forward_original_target
                .or(fallback.forward_original_target)
                .unwrap_or(defaults.forward_original_target),
            transfer_mappings: self
                .transfer_mappings
                .or(fallback.transfer_mappings)
                .unwrap_or(defaults.transfer_mappings),
            add_transfer_command: self
                .add_transfer_command
                .or(fallback.add_transfer_command)
                .unwrap_or(defaults.add_transfer_command),
            transfer_shortcuts: self
                .transfer_shortcuts
                .or(fallback.transfer_shortcuts)
                .unwrap_or(defaults.transfer_shortcuts),
            default_locale: self
                .default_locale
                .or(fallback.default_locale)
                .unwrap_or(defaults.default_locale),
            // The stored version marks the schema revision of *this* loader,
            // not whatever an old file carried.
            version: self.version.unwrap_or(CONFIG_VERSION),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = TransferConfig::default();
        assert!(!config.forward_original_target);
        assert!(!config.add_transfer_command);
        assert_eq!(config.default_locale, "en_US");
        assert_eq!(config.version, CONFIG_VERSION);
        assert_eq!(
            config.transfer_mappings.get("127.0.0.1:25565"),
            Some(&"127.0.0.1:19132".to_string())
        );
        assert_eq!(config.transfer_shortcuts.len(), 2);
    }

    #[test]
    fn canonical_value_beats_legacy_value() {
        let canonical = RawConfig {
            forward_original_target: Some(false),
            ..RawConfig::default()
        };
        let legacy = RawConfig {
            forward_original_target: Some(true),
            default_locale: Some("de_DE".to_string()),
            ..RawConfig::default()
        };

        let merged = canonical.merge_onto(Some(legacy));
        assert!(!merged.forward_original_target);
        // Keys absent from the canonical document inherit the legacy value
        assert_eq!(merged.default_locale, "de_DE");
    }

    #[test]
    fn kebab_case_keys_deserialize() {
        let raw: RawConfig =
            serde_yaml::from_str("forward-original-target: true\nadd-transfer-command: true\n")
                .unwrap();
        assert_eq!(raw.forward_original_target, Some(true));
        assert_eq!(raw.add_transfer_command, Some(true));
        assert!(raw.transfer_mappings.is_none());
    }

    #[test]
    fn document_order_is_preserved() {
        let raw: RawConfig = serde_yaml::from_str(
            "transfer-mappings:\n  b.example: x.example\n  a.example: y.example\n",
        )
        .unwrap();
        let keys: Vec<&String> = raw.transfer_mappings.as_ref().unwrap().keys().collect();
        assert_eq!(keys, ["b.example", "a.example"]);
    }
}
