//! Tavily web search client (POST /search with API key in the body).

use serde::{Deserialize, Serialize};

use super::{expect_success, ClientError, ClientResult};

pub const DEFAULT_BASE_URL: &str = "https://api.tavily.com";
const SEARCH_DEPTH: &str = "advanced";
const MAX_RESULTS: u32 = 3;
const DEFAULT_TOPIC: &str = "general";
const DEFAULT_DAYS: u32 = 30;

#[derive(Debug, Clone, Default)]
pub struct WebSearchRequest {
    pub query: String,
    /// Restricts results to one site when present.
    pub target_website: Option<String>,
    pub topic: Option<String>,
    pub days: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchHit {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub score: f64,
}

pub trait WebSearchClient {
    fn search(&self, request: &WebSearchRequest) -> ClientResult<Vec<SearchHit>>;
}

pub struct TavilyClient {
    http: reqwest::blocking::Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Serialize)]
struct SearchBody<'a> {
    api_key: &'a str,
    query: &'a str,
    search_depth: &'static str,
    include_images: bool,
    include_answer: bool,
    include_raw_content: bool,
    max_results: u32,
    topic: &'a str,
    days: u32,
    include_domains: Vec<&'a str>,
    exclude_domains: Vec<&'a str>,
}

#[derive(Deserialize)]
struct SearchEnvelope {
    #[serde(default)]
    results: Vec<SearchHit>,
}

impl TavilyClient {
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

impl WebSearchClient for TavilyClient {
    fn search(&self, request: &WebSearchRequest) -> ClientResult<Vec<SearchHit>> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ClientError::MissingApiKey("TAVILY_API_KEY"))?;

        let body = SearchBody {
            api_key,
            query: &request.query,
            search_depth: SEARCH_DEPTH,
            include_images: false,
            include_answer: false,
            include_raw_content: false,
            max_results: MAX_RESULTS,
            topic: request.topic.as_deref().unwrap_or(DEFAULT_TOPIC),
            days: request.days.unwrap_or(DEFAULT_DAYS),
            include_domains: request.target_website.iter().map(String::as_str).collect(),
            exclude_domains: Vec::new(),
        };

        let response = self
            .http
            .post(format!("{}/search", self.base_url))
            .json(&body)
            .send()?;
        let envelope: SearchEnvelope = expect_success(response)?.json()?;
        Ok(envelope.results)
    }
}
