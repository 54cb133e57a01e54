//! MCP prompt implementations.

pub mod build_app;
pub mod debug_issue;
pub mod design_data_model;
pub mod explain_concept;
pub mod registry;
pub mod template;

pub use registry::PromptRegistry;
pub use template::{ArgumentSpec, PromptTemplate};
