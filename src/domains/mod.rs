//! Domains module containing business logic organized by bounded contexts.
//!
//! The server currently has a single domain: the MCP tools wrapping the
//! e-invoicing API.

pub mod tools;
