//! Shared application settings (database path, catalog seed).
//!
//! The settings file is `<config_dir>/insight-apparatus/settings.toml`:
//!
//! ```toml
//! [database]
//! path = "/home/me/cards.db"
//!
//! [catalog]
//! seed = "/home/me/cards.yaml"
//! ```

use std::io;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "insight-apparatus";

/// Canonical path to the settings file.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join(APP_DIR).join("settings.toml")
}

/// Default database location: `<data_dir>/insight-apparatus/cards.db`.
pub fn default_database_path() -> PathBuf {
    let data = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    data.join(APP_DIR).join("cards.db")
}

/// Resolve the database path using a priority chain:
///
/// 1. CLI override (if `Some`)
/// 2. Saved `database.path` in `settings.toml`
/// 3. [`default_database_path`]
pub fn resolve_database_path(cli_override: Option<PathBuf>) -> PathBuf {
    if let Some(p) = cli_override {
        return p;
    }
    if let Some(p) = load_path_setting(&settings_path(), "database", "path") {
        return p;
    }
    default_database_path()
}

/// Saved `catalog.seed`, if set.
pub fn catalog_seed_path() -> Option<PathBuf> {
    load_path_setting(&settings_path(), "catalog", "seed")
}

/// Read a non-empty string setting from `file` as a path.
pub fn load_path_setting(file: &Path, section: &str, key: &str) -> Option<PathBuf> {
    let contents = std::fs::read_to_string(file).ok()?;
    let doc: toml::Value = contents.parse().ok()?;
    let value = doc.get(section)?.get(key)?.as_str()?;
    if value.is_empty() {
        None
    } else {
        Some(PathBuf::from(value))
    }
}

/// Save (or clear) the database path in `settings.toml`.
pub fn save_database_path(path: Option<&Path>) -> io::Result<()> {
    save_path_setting(&settings_path(), "database", "path", path)
}

/// Save (or clear) the catalog seed path in `settings.toml`.
pub fn save_catalog_seed(path: Option<&Path>) -> io::Result<()> {
    save_path_setting(&settings_path(), "catalog", "seed", path)
}

/// Set or remove one key in `file`.
///
/// Uses `toml::Value` for a surgical update so unrelated sections and keys
/// are preserved. The file is replaced atomically.
pub fn save_path_setting(
    file: &Path,
    section: &str,
    key: &str,
    path: Option<&Path>,
) -> io::Result<()> {
    let mut doc: toml::Value = if let Ok(contents) = std::fs::read_to_string(file) {
        contents
            .parse()
            .unwrap_or_else(|_| toml::Value::Table(Default::default()))
    } else {
        toml::Value::Table(Default::default())
    };

    let table = doc
        .as_table_mut()
        .ok_or_else(|| io::Error::other("settings.toml root is not a table"))?;
    let entry = table
        .entry(section)
        .or_insert_with(|| toml::Value::Table(Default::default()));
    let section_table = entry
        .as_table_mut()
        .ok_or_else(|| io::Error::other(format!("[{section}] is not a table")))?;

    match path {
        Some(p) => {
            section_table.insert(
                key.to_string(),
                toml::Value::String(p.to_string_lossy().into_owned()),
            );
        }
        None => {
            section_table.remove(key);
        }
    }

    if let Some(parent) = file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let serialized = toml::to_string_pretty(&doc).map_err(io::Error::other)?;
    let tmp = file.with_extension("toml.tmp");
    std::fs::write(&tmp, &serialized)?;
    std::fs::rename(&tmp, file)?;

    log::debug!("Updated {}.{} in {}", section, key, file.display());
    Ok(())
}

/// Load the full settings file as a pretty-printed TOML string for display.
pub fn load_settings_string() -> Option<String> {
    let contents = std::fs::read_to_string(settings_path()).ok()?;
    let doc: toml::Value = contents.parse().ok()?;
    toml::to_string_pretty(&doc).ok()
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
