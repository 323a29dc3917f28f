//! OpenFDA drug label client (GET /drug/label.json).

use serde::Deserialize;

use super::{expect_success, ClientResult};

pub const DEFAULT_BASE_URL: &str = "https://api.fda.gov";

#[derive(Debug, Clone)]
pub struct DrugLabel {
    pub brand_name: String,
    pub generic_name: String,
    pub manufacturer: String,
    pub indications: String,
}

pub trait DrugInfoClient {
    fn approved_drugs(&self, indication: &str, limit: u32) -> ClientResult<Vec<DrugLabel>>;
}

pub struct OpenFdaClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct LabelEnvelope {
    #[serde(default)]
    results: Vec<LabelRecord>,
}

#[derive(Deserialize, Default)]
struct LabelRecord {
    #[serde(default)]
    openfda: OpenFdaFields,
    #[serde(default)]
    indications_and_usage: Vec<String>,
}

#[derive(Deserialize, Default)]
struct OpenFdaFields {
    #[serde(default)]
    brand_name: Vec<String>,
    #[serde(default)]
    generic_name: Vec<String>,
    #[serde(default)]
    manufacturer_name: Vec<String>,
}

fn first_or_unknown(values: Vec<String>) -> String {
    values.into_iter().next().unwrap_or_else(|| "Unknown".to_string())
}

impl From<LabelRecord> for DrugLabel {
    fn from(record: LabelRecord) -> Self {
        Self {
            brand_name: first_or_unknown(record.openfda.brand_name),
            generic_name: first_or_unknown(record.openfda.generic_name),
            manufacturer: first_or_unknown(record.openfda.manufacturer_name),
            indications: record.indications_and_usage.into_iter().next().unwrap_or_default(),
        }
    }
}

impl OpenFdaClient {
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

impl Default for OpenFdaClient {
    fn default() -> Self {
        Self::new()
    }
}

impl DrugInfoClient for OpenFdaClient {
    fn approved_drugs(&self, indication: &str, limit: u32) -> ClientResult<Vec<DrugLabel>> {
        let search = format!("indications_and_usage:\"{indication}\"");
        let response = self
            .http
            .get(format!("{}/drug/label.json", self.base_url))
            .query(&[("search", search), ("limit", limit.to_string())])
            .send()?;
        let envelope: LabelEnvelope = expect_success(response)?.json()?;
        Ok(envelope.results.into_iter().map(DrugLabel::from).collect())
    }
}
