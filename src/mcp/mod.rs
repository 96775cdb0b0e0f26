//! MCP (Model Context Protocol) server module.
//!
//! Provides a JSON-RPC 2.0 over STDIO interface for AI agents
//! to scan repositories and query the API catalog.

pub mod server;
pub mod tools;
pub mod types;
