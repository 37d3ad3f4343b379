//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each tool is defined in its own file for better maintainability.

pub mod api;
pub mod auth;
pub mod common;
pub mod invoices;

pub use api::{ApiRequestParams, ApiRequestTool};
pub use auth::{AuthLoginTool, AuthRefreshTool, AuthStatusTool, TenantSelectTool};
pub use invoices::{InvoiceDownloadPdfTool, InvoiceGetTool, InvoiceUploadTool, InvoicesListTool};
