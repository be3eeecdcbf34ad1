//! Locale resource store.
//!
//! # Responsibilities
//! - Load `<locale>.properties` message files from the translations dir
//! - Extract the bundled `en_US` file when the configured default locale
//!   has no file on disk
//! - Resolve message keys per caller locale with a default-locale fallback
//!
//! # Design Decisions
//! - Locale codes are the first five characters of the file name,
//!   lowercased (`en_US.properties` → `en_us`)
//! - A missing key returns the key itself; a broken translation must
//!   never hide a message entirely
//! - Unreadable individual files are skipped with a warning; only a
//!   missing translations directory that cannot be created is fatal

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::warn;

/// Bundled fallback messages, written to disk on first run.
const BUNDLED_EN_US: &str = include_str!("resources/en_US.properties");

const PROPERTIES_SUFFIX: &str = ".properties";

/// The locale directory could not be set up.
#[derive(Debug, Error)]
#[error("locale store I/O failed for {path}: {source}")]
pub struct LocaleError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Message tables for every known locale.
#[derive(Debug)]
pub struct LocaleStore {
    default_locale: String,
    tables: HashMap<String, HashMap<String, String>>,
}

impl LocaleStore {
    /// Load every `*.properties` file under `dir`, creating the directory
    /// and extracting the bundled `en_US` file when needed.
    ///
    /// `configured_locale` comes from the config; it is normalized to
    /// lowercase with any `.properties` suffix stripped. When no file for
    /// it exists the store falls back to `en_us`.
    pub fn load(dir: &Path, configured_locale: &str) -> Result<Self, LocaleError> {
        fs::create_dir_all(dir).map_err(|source| LocaleError {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut default_locale = configured_locale
            .to_lowercase()
            .trim_end_matches(PROPERTIES_SUFFIX)
            .to_string();

        let mut files = list_property_files(dir)?;

        let default_file = format!("{default_locale}{PROPERTIES_SUFFIX}");
        let has_default = files
            .iter()
            .any(|path| file_name_matches(path, &default_file));

        if !has_default {
            if default_locale != "en_us" {
                warn!(
                    locale = %default_locale,
                    "Default configured locale not found, falling back to en_us"
                );
                default_locale = "en_us".to_string();
            }

            let bundled_path = dir.join("en_US.properties");
            fs::write(&bundled_path, BUNDLED_EN_US).map_err(|source| LocaleError {
                path: bundled_path.clone(),
                source,
            })?;
            if !files.iter().any(|p| file_name_matches(p, "en_us.properties")) {
                files.push(bundled_path);
            }
        }

        let mut tables = HashMap::new();
        for path in files {
            let Some(code) = locale_code(&path) else {
                warn!(path = %path.display(), "Skipping file without a usable locale code");
                continue;
            };

            match fs::read_to_string(&path) {
                Ok(text) => {
                    tables.insert(code, parse_properties(&text));
                }
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "Skipping unreadable locale file");
                }
            }
        }

        Ok(Self {
            default_locale,
            tables,
        })
    }

    /// Message for `key` in `locale`, falling back to the default locale's
    /// table when the locale is unknown. A key missing from the chosen
    /// table yields the key itself.
    pub fn get(&self, locale: &str, key: &str) -> String {
        let table = self
            .tables
            .get(&locale.to_lowercase())
            .or_else(|| self.tables.get(&self.default_locale));

        match table.and_then(|t| t.get(key)) {
            Some(message) => message.clone(),
            None => {
                warn!(key, "No translation fallback found for translation key");
                key.to_string()
            }
        }
    }

    /// The normalized default locale in effect after fallback handling.
    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }
}

fn list_property_files(dir: &Path) -> Result<Vec<PathBuf>, LocaleError> {
    let entries = fs::read_dir(dir).map_err(|source| LocaleError {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        let is_properties = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(PROPERTIES_SUFFIX));
        if path.is_file() && is_properties {
            files.push(path);
        }
    }
    Ok(files)
}

fn file_name_matches(path: &Path, expected: &str) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.eq_ignore_ascii_case(expected))
}

/// `en_US.properties` → `en_us`. Locale codes are exactly five characters.
fn locale_code(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    let stem = name.strip_suffix(PROPERTIES_SUFFIX)?;
    Some(stem.get(..5)?.to_lowercase())
}

/// Minimal `.properties` reader: `key=value` or `key: value` lines,
/// `#`/`!` comments. Escapes and line continuations are not needed by the
/// bundled files and are not handled.
fn parse_properties(text: &str) -> HashMap<String, String> {
    let mut table = HashMap::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }
        if let Some(sep) = line.find(['=', ':']) {
            let key = line[..sep].trim();
            let value = line[sep + 1..].trim();
            if !key.is_empty() {
                table.insert(key.to_string(), value.to_string());
            }
        }
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn extracts_bundled_file_when_directory_is_empty() {
        let dir = tempdir().unwrap();
        let store = LocaleStore::load(dir.path(), "en_US").unwrap();

        assert!(dir.path().join("en_US.properties").exists());
        assert_eq!(store.default_locale(), "en_us");
        assert_eq!(
            store.get("en_US", "menu.transfer.title"),
            "Transfer to a server"
        );
    }

    #[test]
    fn unknown_default_locale_falls_back_to_en_us() {
        let dir = tempdir().unwrap();
        let store = LocaleStore::load(dir.path(), "xx_XX").unwrap();
        assert_eq!(store.default_locale(), "en_us");
    }

    #[test]
    fn caller_locale_overrides_default() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("de_DE.properties"),
            "menu.transfer.title=Server wechseln\n",
        )
        .unwrap();

        let store = LocaleStore::load(dir.path(), "en_US").unwrap();
        assert_eq!(store.get("de_DE", "menu.transfer.title"), "Server wechseln");
        assert_eq!(
            store.get("fr_FR", "menu.transfer.title"),
            "Transfer to a server"
        );
    }

    #[test]
    fn missing_key_returns_the_key() {
        let dir = tempdir().unwrap();
        let store = LocaleStore::load(dir.path(), "en_US").unwrap();
        assert_eq!(store.get("en_US", "no.such.key"), "no.such.key");
    }

    #[test]
    fn configured_locale_with_suffix_is_normalized() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("de_DE.properties"), "k=v\n").unwrap();
        let store = LocaleStore::load(dir.path(), "de_DE.properties").unwrap();
        assert_eq!(store.default_locale(), "de_de");
        assert_eq!(store.get("whatever", "k"), "v");
    }

    #[test]
    fn short_file_names_are_skipped() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("de.properties"), "k=v\n").unwrap();
        let store = LocaleStore::load(dir.path(), "en_US").unwrap();
        // "de" is too short for a locale code; only en_us is loaded
        assert_eq!(store.get("de", "k"), "k");
    }
}
