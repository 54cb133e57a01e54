//! MCP resource implementations.

pub mod catalog;
pub mod registry;

pub use catalog::ResourceEntry;
pub use registry::ResourceRegistry;
