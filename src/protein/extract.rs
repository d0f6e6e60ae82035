//! Display fields derived from a [`ProteinRecord`].

use super::record::ProteinRecord;

/// Placeholder shown when a field is missing from a registry response.
pub const NOT_AVAILABLE: &str = "N/A";

/// Returns the best available display name for a record.
///
/// Prefers the curated recommended name, then the first submitted name,
/// then [`NOT_AVAILABLE`].
#[must_use]
pub fn extract_name(record: &ProteinRecord) -> &str {
    record
        .recommended_name()
        .or_else(|| record.submitted_name())
        .unwrap_or(NOT_AVAILABLE)
}

/// Returns the functional description of a record, falling back to its name.
#[must_use]
pub fn extract_description(record: &ProteinRecord) -> &str {
    record
        .function_text()
        .unwrap_or_else(|| extract_name(record))
}
