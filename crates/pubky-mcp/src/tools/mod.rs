//! MCP tool implementations.

pub mod generate_code_example;
pub mod list_projects;
pub mod read_doc_file;
pub mod registry;
pub mod search_docs;
pub mod validate_homeserver_path;
pub mod validate_public_key;

pub use registry::{Tool, ToolContext, ToolHandler, ToolRegistry};
