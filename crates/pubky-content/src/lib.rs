//! Pubky content: read-only, multi-root access to the bundled knowledge base.

pub mod layout;
pub mod mime;
pub mod resolver;
pub mod types;

pub use layout::{bundled_roots, BUNDLED_PROJECTS, DATA_DIR};
pub use mime::{is_textual, mime_for};
pub use resolver::ContentResolver;
pub use types::*;
