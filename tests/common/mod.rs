//! Shared fixtures for tests that run against mock registries.

#![allow(dead_code)]

use protein_structure_mcp::config::{DisplayConfig, RegistryConfig};
use protein_structure_mcp::protein::{ProteinQueries, RegistryClient};
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockBuilder, MockServer};

/// Human insulin precursor, 110 residues.
pub const INSULIN_SEQUENCE: &str = "MALWMRLLPLLALLALWGPDPAAAFVNQHLCGSHLVEALYLVCGERGFFYTPKTRREAEDLQVGQVELGGGPGAGSLQPLALEGSLQKRGIVEQCCTSICSLYQLENYCN";

/// Registry settings pointing both registries at `server`.
pub fn registry_config(server: &MockServer) -> RegistryConfig {
    RegistryConfig {
        uniprot_base_url: format!("{}/uniprotkb", server.uri()),
        alphafold_api_url: format!("{}/api", server.uri()),
        ..RegistryConfig::default()
    }
}

pub fn client(server: &MockServer) -> RegistryClient {
    RegistryClient::new(registry_config(server)).unwrap()
}

pub fn queries(server: &MockServer) -> ProteinQueries {
    ProteinQueries::new(client(server), DisplayConfig::default())
}

/// The organism-constrained form of a search for `name`.
pub fn human_query(name: &str) -> String {
    format!("{name} AND organism_name:\"Homo sapiens\"")
}

/// Matches a UniProt search GET with the given `query` parameter.
pub fn search_request(query: &str) -> MockBuilder {
    Mock::given(method("GET"))
        .and(path("/uniprotkb/search"))
        .and(query_param("query", query))
        .and(query_param("format", "json"))
        .and(query_param("size", "5"))
}

/// Matches a UniProt entry GET.
pub fn entry_request(accession: &str) -> MockBuilder {
    Mock::given(method("GET"))
        .and(path(format!("/uniprotkb/{accession}")))
        .and(query_param("format", "json"))
}

/// Matches an AlphaFold prediction GET.
pub fn prediction_request(accession: &str) -> MockBuilder {
    Mock::given(method("GET")).and(path(format!("/api/prediction/{accession}")))
}

pub fn entry(accession: &str, name: &str, organism: &str, gene: &str) -> Value {
    json!({
        "primaryAccession": accession,
        "proteinDescription": {
            "recommendedName": { "fullName": { "value": name } }
        },
        "organism": { "scientificName": organism },
        "genes": [{ "geneName": { "value": gene } }]
    })
}

pub fn insulin_entry() -> Value {
    json!({
        "primaryAccession": "P01308",
        "proteinDescription": {
            "recommendedName": { "fullName": { "value": "Insulin" } }
        },
        "organism": { "scientificName": "Homo sapiens", "taxonId": 9606 },
        "genes": [{ "geneName": { "value": "INS" } }],
        "comments": [],
        "sequence": { "value": INSULIN_SEQUENCE, "length": 110 }
    })
}

pub fn search_body(entries: Vec<Value>) -> Value {
    json!({ "results": entries })
}
