//! Application layer shared by the `insight` command line: settings, the
//! database context, the deck editing session, and text rendering.

pub mod context;
pub mod display;
pub mod editor;
pub mod error;
pub mod settings;

pub use context::AppContext;
pub use editor::{DeckEditor, parse_quantity};
pub use error::{EditorError, OpenError};
