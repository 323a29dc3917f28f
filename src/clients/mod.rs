//! Outbound service clients.
//!
//! One trait per external API so handlers stay testable with mocks; the live
//! implementations share a blocking HTTP client and a common error type.

pub mod clinicaltrials;
pub mod openfda;
pub mod tavily;
pub mod uniprot;
pub mod uspto;

use std::fmt;

use crate::config::AppConfig;

#[derive(Debug)]
pub enum ClientError {
    Http(reqwest::Error),
    Status { code: u16, body: String },
    Decode(serde_json::Error),
    /// The tool's API key is not configured; the tool degrades to an
    /// explanatory response instead of failing the invocation.
    MissingApiKey(&'static str),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(err) => write!(f, "{err}"),
            Self::Status { code, body } => {
                let snippet: String = body.chars().take(200).collect();
                write!(f, "upstream returned status {code}: {snippet}")
            }
            Self::Decode(err) => write!(f, "failed to decode upstream response: {err}"),
            Self::MissingApiKey(name) => write!(f, "API key {name} is not configured"),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err)
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err)
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Checks the status and drains the body, so callers only see typed results.
fn expect_success(response: reqwest::blocking::Response) -> ClientResult<reqwest::blocking::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    Err(ClientError::Status {
        code: status.as_u16(),
        body: response.text().unwrap_or_default(),
    })
}

/// Bundle of boxed clients handed to the dispatcher; tests substitute mocks.
pub struct ServiceClients {
    pub web_search: Box<dyn tavily::WebSearchClient>,
    pub trials: Box<dyn clinicaltrials::TrialsClient>,
    pub drug_info: Box<dyn openfda::DrugInfoClient>,
    pub proteins: Box<dyn uniprot::ProteinClient>,
    pub patents: Box<dyn uspto::PatentClient>,
}

impl ServiceClients {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            web_search: Box::new(tavily::TavilyClient::new(config.tavily_api_key.clone())),
            trials: Box::new(clinicaltrials::ClinicalTrialsClient::new()),
            drug_info: Box::new(openfda::OpenFdaClient::new()),
            proteins: Box::new(uniprot::UniProtClient::new()),
            patents: Box::new(uspto::UsptoClient::new(config.uspto_api_key.clone())),
        }
    }
}
