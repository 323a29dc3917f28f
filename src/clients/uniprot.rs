//! UniProtKB search client (GET /uniprotkb/search).
//!
//! The UniProt JSON is deep and irregular, so entries are extracted from a
//! raw `Value` with pointer paths rather than a full wire model.

use serde::Deserialize;
use serde_json::Value;

use super::{expect_success, ClientResult};

pub const DEFAULT_BASE_URL: &str = "https://rest.uniprot.org";
const FUNCTION_SNIPPET_MAX: usize = 200;

#[derive(Debug, Clone)]
pub struct ProteinEntry {
    pub accession: String,
    pub protein_name: String,
    pub gene: String,
    pub organism: String,
    pub length: Option<u64>,
    pub function: String,
}

pub trait ProteinClient {
    fn search(&self, query: &str, organism: &str, limit: u32) -> ClientResult<Vec<ProteinEntry>>;
}

pub struct UniProtClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct SearchEnvelope {
    #[serde(default)]
    results: Vec<Value>,
}

/// Maps common organism shorthands to scientific names and renders the
/// search query in UniProt's fielded syntax.
fn construct_search_query(query: &str, organism: &str) -> String {
    let organism_name = match organism.to_ascii_lowercase().as_str() {
        "human" | "homo sapiens" => "Homo sapiens".to_string(),
        "mouse" | "mus musculus" => "Mus musculus".to_string(),
        "rat" | "rattus norvegicus" => "Rattus norvegicus".to_string(),
        _ => organism.to_string(),
    };
    let term = query.trim();
    format!(
        "(protein_name:\"{term}\" OR gene:\"{term}\" OR cc_function:\"{term}\" \
         OR cc_disease:\"{term}\" OR keyword:\"{term}\") \
         AND organism_name:\"{organism_name}\""
    )
}

fn str_at<'a>(value: &'a Value, pointer: &str) -> &'a str {
    value.pointer(pointer).and_then(Value::as_str).unwrap_or("N/A")
}

fn function_snippet(entry: &Value) -> String {
    let comments = entry.get("comments").and_then(Value::as_array);
    let text = comments
        .into_iter()
        .flatten()
        .find(|c| c.pointer("/commentType").and_then(Value::as_str) == Some("FUNCTION"))
        .and_then(|c| c.pointer("/texts/0/value"))
        .and_then(Value::as_str)
        .unwrap_or("N/A");
    if text.chars().count() > FUNCTION_SNIPPET_MAX {
        let truncated: String = text.chars().take(FUNCTION_SNIPPET_MAX).collect();
        format!("{truncated}...")
    } else {
        text.to_string()
    }
}

fn entry_from_value(entry: &Value) -> ProteinEntry {
    ProteinEntry {
        accession: str_at(entry, "/primaryAccession").to_string(),
        protein_name: str_at(
            entry,
            "/proteinDescription/recommendedName/fullName/value",
        )
        .to_string(),
        gene: str_at(entry, "/genes/0/geneName/value").to_string(),
        organism: str_at(entry, "/organism/scientificName").to_string(),
        length: entry.pointer("/sequence/length").and_then(Value::as_u64),
        function: function_snippet(entry),
    }
}

impl UniProtClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::blocking::Client::new(),
            base_url: base_url.into(),
        }
    }
}

impl Default for UniProtClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ProteinClient for UniProtClient {
    fn search(&self, query: &str, organism: &str, limit: u32) -> ClientResult<Vec<ProteinEntry>> {
        let response = self
            .http
            .get(format!("{}/uniprotkb/search", self.base_url))
            .query(&[
                ("query", construct_search_query(query, organism)),
                ("format", "json".to_string()),
                ("size", limit.to_string()),
            ])
            .send()?;
        let envelope: SearchEnvelope = expect_success(response)?.json()?;
        Ok(envelope.results.iter().map(entry_from_value).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::{construct_search_query, entry_from_value};

    #[test]
    fn organism_shorthands_map_to_scientific_names() {
        let q = construct_search_query("BRCA1", "human");
        assert!(q.contains("organism_name:\"Homo sapiens\""));
        let q = construct_search_query("BRCA1", "Danio rerio");
        assert!(q.contains("organism_name:\"Danio rerio\""));
    }

    #[test]
    fn entry_extraction_tolerates_missing_fields() {
        let entry = serde_json::json!({ "primaryAccession": "P38398" });
        let parsed = entry_from_value(&entry);
        assert_eq!(parsed.accession, "P38398");
        assert_eq!(parsed.protein_name, "N/A");
        assert_eq!(parsed.length, None);
    }
}
