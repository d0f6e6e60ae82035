//! HTTP client for the UniProt and AlphaFold registries.
//!
//! Every public method is infallible from the caller's point of view: any
//! transport failure, timeout, non-success status or unexpected body is
//! logged and reported as absence (`None` or an empty list).

use std::time::Duration;

use reqwest::Url;
use serde::de::DeserializeOwned;
use tracing::{debug, error, info};

use super::error::{RegistryError, RegistryResult};
use super::record::{ProteinRecord, SearchResults, StructurePrediction};
use crate::config::RegistryConfig;

/// Client for the protein annotation (UniProt) and structure (AlphaFold) registries.
#[derive(Debug, Clone)]
pub struct RegistryClient {
    http: reqwest::Client,
    config: RegistryConfig,
}

impl RegistryClient {
    /// Creates a client for the registries described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built
    /// (for example, when no TLS backend is available).
    pub fn new(config: RegistryConfig) -> RegistryResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(|source| RegistryError::Client { source })?;

        Ok(Self { http, config })
    }

    /// Returns the registry configuration this client was built with.
    #[must_use]
    pub const fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Fetches a single UniProt entry by accession.
    ///
    /// Returns `None` if the entry cannot be retrieved for any reason.
    pub async fn fetch_by_accession(&self, accession: &str) -> Option<ProteinRecord> {
        match self.try_fetch_by_accession(accession).await {
            Ok(record) => Some(record),
            Err(e) => {
                error!(accession, error = %e, "UniProt entry lookup failed");
                None
            }
        }
    }

    /// Fetches the AlphaFold predictions for an accession.
    ///
    /// Returns an empty list if the predictions cannot be retrieved.
    pub async fn fetch_structure(&self, accession: &str) -> Vec<StructurePrediction> {
        match self.try_fetch_structure(accession).await {
            Ok(predictions) => predictions,
            Err(e) => {
                error!(accession, error = %e, "AlphaFold prediction lookup failed");
                Vec::new()
            }
        }
    }

    /// Searches UniProt by free-text name, target organism first.
    ///
    /// The organism-constrained query runs first. Only if it matches nothing
    /// is the same query repeated without the organism filter, and that
    /// second result set (possibly empty) is returned. `None` means a request
    /// failed; an empty result set means the registry found nothing.
    pub async fn search_by_name(&self, name: &str) -> Option<SearchResults> {
        match self.try_search_by_name(name).await {
            Ok(results) => Some(results),
            Err(e) => {
                error!(query = name, error = %e, "UniProt search failed");
                None
            }
        }
    }

    async fn try_fetch_by_accession(&self, accession: &str) -> RegistryResult<ProteinRecord> {
        let url = endpoint(&self.config.uniprot_base_url, &[accession])?;
        self.get_json(url, &[("format", "json")], self.config.uniprot_timeout())
            .await
    }

    async fn try_fetch_structure(&self, accession: &str) -> RegistryResult<Vec<StructurePrediction>> {
        let url = endpoint(&self.config.alphafold_api_url, &["prediction", accession])?;
        self.get_json(url, &[], self.config.alphafold_timeout()).await
    }

    async fn try_search_by_name(&self, name: &str) -> RegistryResult<SearchResults> {
        let constrained = self.search(&self.organism_query(name)).await?;
        if !constrained.is_empty() {
            return Ok(constrained);
        }

        info!(
            query = name,
            organism = %self.config.target_organism,
            "No matches in target organism, searching all organisms"
        );
        self.search(name).await
    }

    fn organism_query(&self, name: &str) -> String {
        format!(
            "{name} AND organism_name:\"{}\"",
            self.config.target_organism
        )
    }

    async fn search(&self, query: &str) -> RegistryResult<SearchResults> {
        let url = endpoint(&self.config.uniprot_base_url, &["search"])?;
        let size = self.config.max_search_results.to_string();
        self.get_json(
            url,
            &[("query", query), ("format", "json"), ("size", size.as_str())],
            self.config.uniprot_timeout(),
        )
        .await
    }

    /// Issues a GET and decodes the JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        mut url: Url,
        query: &[(&str, &str)],
        timeout: Duration,
    ) -> RegistryResult<T> {
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        let url_text = url.as_str().to_owned();
        debug!(url = %url_text, timeout_secs = timeout.as_secs(), "GET");

        let response = self
            .http
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| RegistryError::from_reqwest(&url_text, timeout, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RegistryError::Status {
                url: url_text,
                status,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| RegistryError::from_reqwest(&url_text, timeout, e))?;

        serde_json::from_slice(&body).map_err(|source| RegistryError::Decode {
            url: url_text,
            source,
        })
    }
}

/// Appends path segments to a base URL, percent-encoding each segment.
fn endpoint(base: &str, segments: &[&str]) -> RegistryResult<Url> {
    let invalid = || RegistryError::InvalidUrl {
        url: base.to_string(),
    };

    let mut url = Url::parse(base).map_err(|_| invalid())?;
    url.path_segments_mut()
        .map_err(|()| invalid())?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_appends_segments() {
        let url = endpoint("https://rest.uniprot.org/uniprotkb", &["P01308"]).unwrap();
        assert_eq!(url.as_str(), "https://rest.uniprot.org/uniprotkb/P01308");
    }

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        let url = endpoint("https://alphafold.ebi.ac.uk/api/", &["prediction", "P01308"]).unwrap();
        assert_eq!(url.as_str(), "https://alphafold.ebi.ac.uk/api/prediction/P01308");
    }

    #[test]
    fn endpoint_escapes_segments() {
        let url = endpoint("https://rest.uniprot.org/uniprotkb", &["a/b?c"]).unwrap();
        assert_eq!(url.as_str(), "https://rest.uniprot.org/uniprotkb/a%2Fb%3Fc");
    }

    #[test]
    fn endpoint_rejects_invalid_base() {
        assert!(matches!(
            endpoint("not a url", &["x"]),
            Err(RegistryError::InvalidUrl { .. })
        ));
        assert!(matches!(
            endpoint("mailto:someone@example.org", &["x"]),
            Err(RegistryError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn organism_query_embeds_target() {
        let client = RegistryClient::new(RegistryConfig::default()).unwrap();
        assert_eq!(
            client.organism_query("insulin"),
            "insulin AND organism_name:\"Homo sapiens\""
        );
    }
}
