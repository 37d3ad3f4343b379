//! Invoice tools.
//!
//! Thin wrappers over the `/api/v1/invoices` endpoints. Every tool accepts an
//! optional `tenant_id` that overrides the session's default tenant.

pub mod download_pdf;
pub mod get;
pub mod list;
pub mod upload;

pub use download_pdf::{InvoiceDownloadPdfParams, InvoiceDownloadPdfTool};
pub use get::{InvoiceGetParams, InvoiceGetTool};
pub use list::{InvoicesListParams, InvoicesListTool};
pub use upload::{InvoiceUploadParams, InvoiceUploadTool};

/// Collection endpoint for invoices.
pub const INVOICES_PATH: &str = "/api/v1/invoices";

/// Path of a single invoice, with the id encoded as one segment.
pub(crate) fn invoice_path(invoice_id: &str) -> String {
    format!(
        "{}/{}",
        INVOICES_PATH,
        super::common::path_segment(invoice_id.trim())
    )
}
