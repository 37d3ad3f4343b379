//! Tools domain module.
//!
//! Every tool is a thin wrapper that turns typed parameters into an
//! [`ApiRequest`](crate::core::api::ApiRequest), runs it through the shared
//! [`ApiClient`](crate::core::api::ApiClient) and renders the
//! [`ApiResponse`](crate::core::api::ApiResponse) as tool output.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `router.rs` - Dynamic ToolRouter builder
//! - `registry.rs` - Tool metadata listing
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/<group>/` (e.g., `credit_notes.rs`)
//! 2. Define params, `execute()`, `to_tool()` and `create_route()`
//! 3. Export it from the group's `mod.rs`
//! 4. Add the route in `router.rs` and the metadata in `registry.rs`

pub mod definitions;
mod error;
mod registry;
pub mod router;

pub use error::ToolError;
pub use registry::ToolRegistry;
pub use router::build_tool_router;
