//! YAML loading for the card catalog seed.
//!
//! A seed is either a single `.yaml` file holding a sequence of
//! [`CardDefinition`] entries, or a directory of such files loaded in file name
//! order.

use std::collections::HashSet;
use std::path::Path;

use thiserror::Error;

use crate::types::CardDefinition;

#[derive(Debug, Error)]
pub enum YamlError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("YAML parse error in {path}: {source}")]
    Parse {
        path: String,
        source: serde_yml::Error,
    },
    #[error("Path not found: {0}")]
    NotFound(String),
    #[error("Duplicate card name '{name}' in {path}")]
    DuplicateCard { name: String, path: String },
}

/// Load card definitions from a YAML file or a directory of YAML files.
///
/// Card names must be unique across the whole seed, ignoring case.
pub fn load_cards(path: &Path) -> Result<Vec<CardDefinition>, YamlError> {
    if !path.exists() {
        return Err(YamlError::NotFound(path.display().to_string()));
    }

    let files = if path.is_dir() {
        yaml_files_in(path)?
    } else {
        vec![path.to_path_buf()]
    };

    let mut seen = HashSet::new();
    let mut cards = Vec::new();
    for file in files {
        for card in load_card_file(&file)? {
            if !seen.insert(card.name.trim().to_lowercase()) {
                return Err(YamlError::DuplicateCard {
                    name: card.name,
                    path: file.display().to_string(),
                });
            }
            cards.push(card);
        }
    }

    Ok(cards)
}

fn load_card_file(path: &Path) -> Result<Vec<CardDefinition>, YamlError> {
    let contents = std::fs::read_to_string(path).map_err(|e| YamlError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    if contents.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_yml::from_str(&contents).map_err(|e| YamlError::Parse {
        path: path.display().to_string(),
        source: e,
    })
}

fn yaml_files_in(dir: &Path) -> Result<Vec<std::path::PathBuf>, YamlError> {
    let mut entries: Vec<_> = std::fs::read_dir(dir)
        .map_err(|e| YamlError::Io {
            path: dir.display().to_string(),
            source: e,
        })?
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.path()
                .extension()
                .is_some_and(|ext| ext == "yaml" || ext == "yml")
        })
        .collect();
    entries.sort_by_key(|e| e.file_name());
    Ok(entries.into_iter().map(|e| e.path()).collect())
}
