//! Protein metadata and structure retrieval.
//!
//! # Data flow
//!
//! ```text
//! ProteinQueries ──▶ RegistryClient ──▶ UniProt / AlphaFold (HTTP)
//!       │                   │
//!       │                   ▼
//!       │          ProteinRecord / SearchResults / StructurePrediction
//!       ▼
//! extract + sequence ──▶ report text
//! ```
//!
//! # Modules
//!
//! - [`record`] — Optional-field views over registry JSON
//! - [`extract`] — Display name and description selection
//! - [`sequence`] — Sequence wrapping and elision
//! - [`client`] — Registry HTTP calls with organism-priority search
//! - [`query`] — The three caller-facing operations
//! - [`error`] — Registry error types

pub mod client;
pub mod error;
pub mod extract;
pub mod query;
pub mod record;
pub mod sequence;

pub use client::RegistryClient;
pub use error::{RegistryError, RegistryResult};
pub use extract::{extract_description, extract_name, NOT_AVAILABLE};
pub use query::ProteinQueries;
pub use record::{ProteinRecord, SearchResults, StructurePrediction};
pub use sequence::{format_sequence, wrap_sequence};
