//! Generic API passthrough.

pub mod request;

pub use request::{ApiRequestParams, ApiRequestTool};
