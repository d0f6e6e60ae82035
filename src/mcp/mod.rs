//! Model Context Protocol (MCP) server implementation.
//!
//! This module exposes the protein queries as MCP tools to AI assistants.
//! The server communicates over stdio using newline-delimited JSON-RPC 2.0.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         MCP Server                          │
//! │                                                             │
//! │   ┌─────────────┐    ┌─────────────┐    ┌──────────────┐   │
//! │   │  Transport  │───▶│   Server    │───▶│ProteinQueries│   │
//! │   │   (stdio)   │    │  (lifecycle)│    │   (tools)    │   │
//! │   └─────────────┘    └─────────────┘    └──────────────┘   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Protocol Version
//!
//! This implementation targets MCP protocol version 2024-11-05.

pub mod protocol;
pub mod server;
pub mod transport;

pub use protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, MCP_PROTOCOL_VERSION};
pub use server::McpServer;
pub use transport::{LineTransport, StdioTransport};
