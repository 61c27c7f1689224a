use insight_db::{OperationError, SchemaError};
use insight_import::ImportError;
use thiserror::Error;

/// Errors from a deck editing session.
///
/// Lookup misses (unknown card, card not in deck) are not errors; they come
/// back as notification strings.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("Database error: {0}")]
    Db(#[from] OperationError),
    #[error("Export failed: {0}")]
    Export(#[from] ImportError),
    #[error("'{0}' is not a valid number of copies")]
    InvalidQuantity(String),
}

/// Errors opening the deck database.
#[derive(Debug, Error)]
pub enum OpenError {
    #[error("{0}")]
    Schema(#[from] SchemaError),
    #[error("Failed to seed card catalog from {path}: {source}")]
    Seed {
        path: String,
        source: OperationError,
    },
    #[error("Database error: {0}")]
    Db(#[from] OperationError),
}
