//! USPTO patent application search client (POST with X-API-KEY header).

use serde::{Deserialize, Serialize};

use super::{expect_success, ClientError, ClientResult};

pub const DEFAULT_BASE_URL: &str = "https://api.uspto.gov";
const RESULT_LIMIT: u32 = 10;

#[derive(Debug, Clone)]
pub struct PatentHit {
    pub application_number: String,
    pub title: String,
    pub status: String,
    pub filing_date: String,
}

pub trait PatentClient {
    fn search(&self, query: &str, days: Option<u32>) -> ClientResult<Vec<PatentHit>>;
}

pub struct UsptoClient {
    http: reqwest::blocking::Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Serialize)]
struct SearchBody<'a> {
    q: &'a str,
    fields: Vec<&'static str>,
    limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    days: Option<u32>,
}

#[derive(Deserialize)]
struct SearchEnvelope {
    #[serde(default, rename = "patentFileWrapperDataBag")]
    results: Vec<PatentRecord>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct PatentRecord {
    #[serde(default)]
    application_number_text: String,
    #[serde(default)]
    application_meta_data: PatentMetaData,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct PatentMetaData {
    #[serde(default)]
    invention_title: String,
    #[serde(default)]
    application_status_description_text: String,
    #[serde(default)]
    filing_date: String,
}

impl From<PatentRecord> for PatentHit {
    fn from(record: PatentRecord) -> Self {
        Self {
            application_number: record.application_number_text,
            title: record.application_meta_data.invention_title,
            status: record.application_meta_data.application_status_description_text,
            filing_date: record.application_meta_data.filing_date,
        }
    }
}

impl UsptoClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: Option<String>, base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::blocking::Client::new(),
            base_url: base_url.into(),
            api_key,
        }
    }
}

impl PatentClient for UsptoClient {
    fn search(&self, query: &str, days: Option<u32>) -> ClientResult<Vec<PatentHit>> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ClientError::MissingApiKey("USPTO_API_KEY"))?;

        let body = SearchBody {
            q: query,
            fields: vec![
                "applicationNumberText",
                "applicationMetaData.inventionTitle",
                "applicationMetaData.applicationStatusDescriptionText",
                "applicationMetaData.filingDate",
            ],
            limit: RESULT_LIMIT,
            days,
        };

        let response = self
            .http
            .post(format!(
                "{}/api/v1/patent/applications/search",
                self.base_url
            ))
            .header("X-API-KEY", api_key)
            .json(&body)
            .send()?;
        let envelope: SearchEnvelope = expect_success(response)?.json()?;
        Ok(envelope.results.into_iter().map(PatentHit::from).collect())
    }
}
