//! The three caller-facing protein queries.
//!
//! Each query is a short linear pipeline: one or two registry calls, field
//! extraction, then text assembly. Queries never fail; registry problems turn
//! into explanatory text naming the subject of the query.

use tracing::debug;

use super::client::RegistryClient;
use super::error::RegistryResult;
use super::extract::{extract_description, extract_name, NOT_AVAILABLE};
use super::record::{ProteinRecord, StructurePrediction};
use super::sequence::format_sequence;
use crate::config::{Config, DisplayConfig};

/// Protein lookups composed from the UniProt and AlphaFold registries.
///
/// Holds no per-request state, so one instance can serve concurrent queries.
#[derive(Debug, Clone)]
pub struct ProteinQueries {
    client: RegistryClient,
    display: DisplayConfig,
}

impl ProteinQueries {
    /// Creates the query layer over an existing registry client.
    #[must_use]
    pub const fn new(client: RegistryClient, display: DisplayConfig) -> Self {
        Self { client, display }
    }

    /// Builds the registry client and query layer from a loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &Config) -> RegistryResult<Self> {
        let client = RegistryClient::new(config.registry.clone())?;
        Ok(Self::new(client, config.display.clone()))
    }

    /// Reports metadata, sequence and AlphaFold links for one accession.
    ///
    /// A missing AlphaFold prediction only removes the download link; a
    /// missing UniProt entry produces a failure message naming the accession.
    pub async fn get_protein_structure(&self, accession: &str) -> String {
        debug!(accession, "Structure lookup");

        let Some(record) = self.client.fetch_by_accession(accession).await else {
            return format!("Unable to fetch UniProt information for accession {accession}.");
        };

        let predictions = self.client.fetch_structure(accession).await;
        let pdb_url = predictions
            .first()
            .and_then(StructurePrediction::pdb_url)
            .unwrap_or(NOT_AVAILABLE);

        let sequence_section =
            format_sequence(record.sequence().unwrap_or(NOT_AVAILABLE), &self.display);

        format!(
            "🧬 **Protein Information and AlphaFold Structure**\n\
             - **UniProt ID**: {}\n\
             - **Protein Name**: {}\n\
             - **Organism**: {}\n\
             - **Description**: {}\n\
             - **AlphaFold Page**: {}\n\
             - **Download PDB**: {pdb_url}{sequence_section}",
            record.accession().unwrap_or(NOT_AVAILABLE),
            extract_name(&record),
            record.organism().unwrap_or(NOT_AVAILABLE),
            extract_description(&record),
            self.entry_page_url(accession),
        )
    }

    /// Lists up to `max_search_results` UniProt matches for a protein name.
    pub async fn search_proteins(&self, name: &str) -> String {
        debug!(query = name, "Name search");

        let Some(results) = self.client.search_by_name(name).await else {
            return format!("Unable to search for proteins matching '{name}'");
        };
        if results.is_empty() {
            return format!("No proteins found matching '{name}'");
        }

        let config = self.client.config();
        let candidates: Vec<String> = results
            .iter()
            .take(config.max_search_results)
            .enumerate()
            .map(|(index, record)| self.search_candidate(index + 1, record))
            .collect();

        format!(
            "🔍 **Search results for '{name}':**\n\n{}\n\n\
             💡 {} proteins are prioritized and shown in bold. \
             Use the accession number with get_protein_structure() for detailed information.",
            candidates.join("\n\n"),
            config.target_organism,
        )
    }

    /// Resolves a protein name to the accession of its best match.
    pub async fn get_uniprot_id(&self, name: &str) -> String {
        debug!(query = name, "Accession resolution");

        let Some(results) = self.client.search_by_name(name).await else {
            return format!("Unable to search for UniProt ID for '{name}'");
        };

        match results.first() {
            Some(record) => format!(
                "UniProt ID for '{name}': {}",
                record.accession().unwrap_or(NOT_AVAILABLE)
            ),
            None => format!("No UniProt ID found for '{name}'"),
        }
    }

    /// Browsable AlphaFold page; derived from the accession without a request.
    fn entry_page_url(&self, accession: &str) -> String {
        format!(
            "{}/{accession}",
            self.client.config().alphafold_entry_url.trim_end_matches('/')
        )
    }

    fn search_candidate(&self, position: usize, record: &ProteinRecord) -> String {
        let organism = record.organism().unwrap_or(NOT_AVAILABLE);
        let organism_display = if organism == self.client.config().target_organism {
            format!("**{organism}**")
        } else {
            organism.to_string()
        };

        format!(
            "{position}. **{}** - {}\n   Gene: {} | Organism: {organism_display}",
            record.accession().unwrap_or(NOT_AVAILABLE),
            extract_name(record),
            record.primary_gene().unwrap_or(NOT_AVAILABLE),
        )
    }
}
