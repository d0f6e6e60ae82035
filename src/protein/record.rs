//! Registry response records.
//!
//! UniProt entries are deeply nested and any level may be missing. The serde
//! structs below mirror the JSON loosely (every field optional, unknown fields
//! ignored) and expose one accessor per field path. Accessors return `Option`;
//! the caller picks the default at the display site.

use serde::Deserialize;

/// Comment type UniProt uses for the functional description.
pub const FUNCTION_COMMENT: &str = "FUNCTION";

/// A UniProtKB entry, as returned by the entry and search endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProteinRecord {
    primary_accession: Option<String>,
    protein_description: Option<ProteinDescription>,
    organism: Option<Organism>,
    #[serde(default)]
    comments: Vec<Comment>,
    sequence: Option<Sequence>,
    #[serde(default)]
    genes: Vec<Gene>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProteinDescription {
    recommended_name: Option<ProteinName>,
    #[serde(default)]
    submission_names: Vec<ProteinName>,
    #[serde(default)]
    submitted_names: Vec<ProteinName>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProteinName {
    full_name: Option<TextValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
struct TextValue {
    value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Organism {
    scientific_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Comment {
    comment_type: Option<String>,
    #[serde(default)]
    texts: Vec<TextValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
struct Sequence {
    value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Gene {
    gene_name: Option<TextValue>,
}

impl ProteinName {
    fn full_name(&self) -> Option<&str> {
        self.full_name.as_ref()?.value.as_deref()
    }
}

impl ProteinRecord {
    /// `primaryAccession`
    #[must_use]
    pub fn accession(&self) -> Option<&str> {
        self.primary_accession.as_deref()
    }

    /// `proteinDescription.recommendedName.fullName.value`
    #[must_use]
    pub fn recommended_name(&self) -> Option<&str> {
        self.protein_description
            .as_ref()?
            .recommended_name
            .as_ref()?
            .full_name()
    }

    /// `proteinDescription.submittedNames[0].fullName.value`
    ///
    /// Older UniProt responses spell the list `submissionNames`; either is
    /// accepted, `submittedNames` first.
    #[must_use]
    pub fn submitted_name(&self) -> Option<&str> {
        let description = self.protein_description.as_ref()?;
        description
            .submitted_names
            .first()
            .or_else(|| description.submission_names.first())?
            .full_name()
    }

    /// `organism.scientificName`
    #[must_use]
    pub fn organism(&self) -> Option<&str> {
        self.organism.as_ref()?.scientific_name.as_deref()
    }

    /// `sequence.value`
    #[must_use]
    pub fn sequence(&self) -> Option<&str> {
        self.sequence.as_ref()?.value.as_deref()
    }

    /// `genes[0].geneName.value`
    #[must_use]
    pub fn primary_gene(&self) -> Option<&str> {
        self.genes.first()?.gene_name.as_ref()?.value.as_deref()
    }

    /// First text of the first `FUNCTION` comment that carries any text.
    #[must_use]
    pub fn function_text(&self) -> Option<&str> {
        self.comments
            .iter()
            .filter(|c| c.comment_type.as_deref() == Some(FUNCTION_COMMENT))
            .find_map(|c| c.texts.first()?.value.as_deref())
            .filter(|text| !text.is_empty())
    }
}

/// The UniProt search response envelope.
///
/// Result order is the registry's relevance order and is never re-sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    results: Vec<ProteinRecord>,
}

impl SearchResults {
    /// Returns `true` if the registry returned no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Number of entries returned by the registry.
    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// The first (best ranked) entry.
    #[must_use]
    pub fn first(&self) -> Option<&ProteinRecord> {
        self.results.first()
    }

    /// Iterates entries in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &ProteinRecord> {
        self.results.iter()
    }
}

/// One AlphaFold prediction for an accession.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructurePrediction {
    uniprot_accession: Option<String>,
    pdb_url: Option<String>,
}

impl StructurePrediction {
    /// `uniprotAccession`
    #[must_use]
    pub fn accession(&self) -> Option<&str> {
        self.uniprot_accession.as_deref()
    }

    /// `pdbUrl`, the direct coordinate file download.
    #[must_use]
    pub fn pdb_url(&self) -> Option<&str> {
        self.pdb_url.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn insulin() -> ProteinRecord {
        serde_json::from_value(json!({
            "primaryAccession": "P01308",
            "entryType": "UniProtKB reviewed (Swiss-Prot)",
            "proteinDescription": {
                "recommendedName": { "fullName": { "value": "Insulin" } }
            },
            "organism": { "scientificName": "Homo sapiens", "taxonId": 9606 },
            "genes": [{ "geneName": { "value": "INS" } }],
            "comments": [
                { "commentType": "SUBCELLULAR LOCATION", "texts": [{ "value": "Secreted" }] },
                { "commentType": "FUNCTION", "texts": [{ "value": "Insulin decreases blood glucose concentration." }] }
            ],
            "sequence": { "value": "MALWMRLLPL", "length": 10 }
        }))
        .unwrap()
    }

    #[test]
    fn accessors_follow_field_paths() {
        let record = insulin();
        assert_eq!(record.accession(), Some("P01308"));
        assert_eq!(record.recommended_name(), Some("Insulin"));
        assert_eq!(record.submitted_name(), None);
        assert_eq!(record.organism(), Some("Homo sapiens"));
        assert_eq!(record.primary_gene(), Some("INS"));
        assert_eq!(record.sequence(), Some("MALWMRLLPL"));
        assert_eq!(
            record.function_text(),
            Some("Insulin decreases blood glucose concentration.")
        );
    }

    #[test]
    fn empty_object_deserialises_with_everything_absent() {
        let record: ProteinRecord = serde_json::from_str("{}").unwrap();
        assert_eq!(record, ProteinRecord::default());
        assert!(record.accession().is_none());
        assert!(record.recommended_name().is_none());
        assert!(record.organism().is_none());
        assert!(record.primary_gene().is_none());
        assert!(record.function_text().is_none());
    }

    #[test]
    fn partially_present_paths_are_absent() {
        let record: ProteinRecord = serde_json::from_value(json!({
            "proteinDescription": { "recommendedName": {} },
            "organism": {},
            "genes": [{}],
            "sequence": {}
        }))
        .unwrap();
        assert!(record.recommended_name().is_none());
        assert!(record.organism().is_none());
        assert!(record.primary_gene().is_none());
        assert!(record.sequence().is_none());
    }

    #[test]
    fn submitted_name_from_either_spelling() {
        let current: ProteinRecord = serde_json::from_value(json!({
            "proteinDescription": { "submittedNames": [{ "fullName": { "value": "Putative kinase" } }] }
        }))
        .unwrap();
        assert_eq!(current.submitted_name(), Some("Putative kinase"));

        let legacy: ProteinRecord = serde_json::from_value(json!({
            "proteinDescription": { "submissionNames": [{ "fullName": { "value": "Uncharacterized protein" } }] }
        }))
        .unwrap();
        assert_eq!(legacy.submitted_name(), Some("Uncharacterized protein"));
    }

    #[test]
    fn function_text_skips_textless_comments() {
        let record: ProteinRecord = serde_json::from_value(json!({
            "comments": [
                { "commentType": "FUNCTION", "texts": [] },
                { "commentType": "FUNCTION", "texts": [{ "value": "Binds heme." }] }
            ]
        }))
        .unwrap();
        assert_eq!(record.function_text(), Some("Binds heme."));
    }

    #[test]
    fn search_results_default_to_empty() {
        let results: SearchResults = serde_json::from_str("{}").unwrap();
        assert!(results.is_empty());
        assert!(results.first().is_none());
    }

    #[test]
    fn search_results_keep_registry_order() {
        let results: SearchResults = serde_json::from_value(json!({
            "results": [
                { "primaryAccession": "P69905" },
                { "primaryAccession": "P01942" },
                { "primaryAccession": "P68871" }
            ]
        }))
        .unwrap();
        let order: Vec<_> = results.iter().filter_map(ProteinRecord::accession).collect();
        assert_eq!(order, ["P69905", "P01942", "P68871"]);
        assert_eq!(results.len(), 3);
    }

    #[test]
    fn structure_prediction_fields() {
        let predictions: Vec<StructurePrediction> = serde_json::from_value(json!([{
            "entryId": "AF-P01308-F1",
            "uniprotAccession": "P01308",
            "pdbUrl": "https://alphafold.ebi.ac.uk/files/AF-P01308-F1-model_v4.pdb",
            "cifUrl": "https://alphafold.ebi.ac.uk/files/AF-P01308-F1-model_v4.cif",
            "latestVersion": 4
        }]))
        .unwrap();
        let first = &predictions[0];
        assert_eq!(first.accession(), Some("P01308"));
        assert!(first.pdb_url().unwrap().ends_with(".pdb"));
    }
}
