//! protein-structure-mcp: MCP server for protein metadata and predicted structures
//!
//! This library composes two public registries and renders the combined
//! result as text for AI assistants:
//!
//! - **UniProtKB**: protein names, organism, function, sequence and genes
//! - **AlphaFold DB**: predicted structure entry pages and PDB downloads
//!
//! Name searches are organism-priority: the target organism (Homo sapiens by
//! default) is searched first, and only when it has no match is the search
//! repeated across all organisms.
//!
//! # Modules
//!
//! - [`config`] — Configuration loading and validation
//! - [`error`] — Bootstrap error types
//! - [`mcp`] — MCP protocol implementation
//! - [`protein`] — Registry client, field extraction and report assembly

pub mod config;
pub mod error;
pub mod mcp;
pub mod protein;
