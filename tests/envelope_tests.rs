use vivarium::catalog;
use vivarium::clients::clinicaltrials::{TrialQuery, TrialSummary, TrialsClient};
use vivarium::clients::openfda::{DrugInfoClient, DrugLabel};
use vivarium::clients::tavily::{SearchHit, TavilyClient, WebSearchClient, WebSearchRequest};
use vivarium::clients::uniprot::{ProteinClient, ProteinEntry};
use vivarium::clients::uspto::{PatentClient, PatentHit};
use vivarium::clients::{ClientError, ClientResult, ServiceClients};
use vivarium::envelope::ToolEvent;
use vivarium::handlers;

struct MockWebSearch {
    hits: Vec<SearchHit>,
}

impl WebSearchClient for MockWebSearch {
    fn search(&self, _request: &WebSearchRequest) -> ClientResult<Vec<SearchHit>> {
        Ok(self.hits.clone())
    }
}

struct FailingTrials;

impl TrialsClient for FailingTrials {
    fn search_trials(&self, _query: &TrialQuery) -> ClientResult<Vec<TrialSummary>> {
        Err(ClientError::Status {
            code: 503,
            body: "registry unavailable".to_string(),
        })
    }

    fn trial_details(&self, _nct_id: &str) -> ClientResult<TrialSummary> {
        Err(ClientError::Status {
            code: 503,
            body: "registry unavailable".to_string(),
        })
    }
}

struct EmptyDrugInfo;

impl DrugInfoClient for EmptyDrugInfo {
    fn approved_drugs(&self, _indication: &str, _limit: u32) -> ClientResult<Vec<DrugLabel>> {
        Ok(Vec::new())
    }
}

struct EmptyProteins;

impl ProteinClient for EmptyProteins {
    fn search(&self, _query: &str, _organism: &str, _limit: u32) -> ClientResult<Vec<ProteinEntry>> {
        Ok(Vec::new())
    }
}

struct EmptyPatents;

impl PatentClient for EmptyPatents {
    fn search(&self, _query: &str, _days: Option<u32>) -> ClientResult<Vec<PatentHit>> {
        Ok(Vec::new())
    }
}

fn mock_clients(hits: Vec<SearchHit>) -> ServiceClients {
    ServiceClients {
        web_search: Box::new(MockWebSearch { hits }),
        trials: Box::new(FailingTrials),
        drug_info: Box::new(EmptyDrugInfo),
        proteins: Box::new(EmptyProteins),
        patents: Box::new(EmptyPatents),
    }
}

fn hit(title: &str, url: &str, content: &str) -> SearchHit {
    serde_json::from_value(serde_json::json!({
        "title": title,
        "url": url,
        "content": content,
        "score": 0.9,
    }))
    .unwrap()
}

#[test]
fn wrapped_event_gets_wrapped_response() {
    let event = ToolEvent::parse(
        r#"{
            "messageVersion": "1.0",
            "actionGroup": "research",
            "function": "web_search",
            "parameters": [{"name": "search_query", "type": "string", "value": "mrna stability"}]
        }"#,
    )
    .unwrap();
    let clients = mock_clients(vec![hit("Result", "https://example.org", "snippet")]);

    let response = catalog::dispatch(&event, &clients);
    let value = response.to_value();

    assert_eq!(value["messageVersion"], "1.0");
    assert_eq!(value["response"]["actionGroup"], "research");
    assert_eq!(value["response"]["function"], "web_search");
    let body = value["response"]["functionResponse"]["responseBody"]["TEXT"]["body"]
        .as_str()
        .unwrap();
    assert!(body.contains("mrna stability"));
    assert!(body.contains("https://example.org"));
}

#[test]
fn flat_event_gets_bare_response() {
    let event =
        ToolEvent::parse(r#"{"function": "web_search", "search_query": "flat form"}"#).unwrap();
    let clients = mock_clients(vec![hit("A", "https://a.example", "a")]);

    let value = catalog::dispatch(&event, &clients).to_value();
    assert!(value.get("response").is_none());
    assert!(value["TEXT"]["body"].as_str().unwrap().contains("flat form"));
}

#[test]
fn missing_mandatory_parameter_is_reported_as_text() {
    let event = ToolEvent::parse(
        r#"{"messageVersion": "1.0", "function": "web_search", "parameters": []}"#,
    )
    .unwrap();
    let clients = mock_clients(Vec::new());

    let value = catalog::dispatch(&event, &clients).to_value();
    let body = value["response"]["functionResponse"]["responseBody"]["TEXT"]["body"]
        .as_str()
        .unwrap();
    assert_eq!(body, "Missing mandatory parameter: search_query");
}

#[test]
fn unknown_tool_is_reported_as_text() {
    let event = ToolEvent::parse(r#"{"function": "frobnicate"}"#).unwrap();
    let clients = mock_clients(Vec::new());

    let value = catalog::dispatch(&event, &clients).to_value();
    assert_eq!(value["TEXT"]["body"], "Unknown tool: frobnicate");
}

#[test]
fn upstream_failure_becomes_tool_text() {
    let event = ToolEvent::parse(r#"{"function": "search_trials", "condition": "glioma"}"#).unwrap();
    let clients = mock_clients(Vec::new());

    let value = catalog::dispatch(&event, &clients).to_value();
    let body = value["TEXT"]["body"].as_str().unwrap();
    assert!(body.contains("search_trials"));
    assert!(body.contains("503"));
}

#[test]
fn missing_api_key_degrades_to_configuration_notice() {
    let event = ToolEvent::parse(
        r#"{"function": "web_search", "search_query": "anything"}"#,
    )
    .unwrap();
    // A keyless live client fails before any network traffic.
    let response = handlers::web_search::handle(&event, &TavilyClient::new(None));

    let body = response.to_value()["TEXT"]["body"].as_str().unwrap().to_string();
    assert!(body.contains("not configured"));
    assert!(body.contains("TAVILY_API_KEY"));
}

#[test]
fn schedule_optimizer_tool_runs_in_process() {
    let studies = r#"[
        {"study_id": "tox-a", "animals_required": 150, "duration_days": 3, "preferred_start_day": 5, "priority": 4},
        {"study_id": "tox-b", "animals_required": 80, "duration_days": 2}
    ]"#;
    let event_json = serde_json::json!({
        "messageVersion": "1.0",
        "actionGroup": "scheduler",
        "function": "optimize_schedule",
        "parameters": [
            {"name": "studies", "type": "string", "value": studies},
            {"name": "optimization_objective", "type": "string", "value": "balance_animals"}
        ]
    });
    let event = ToolEvent::parse(&event_json.to_string()).unwrap();
    let clients = mock_clients(Vec::new());

    let value = catalog::dispatch(&event, &clients).to_value();
    let body = value["response"]["functionResponse"]["responseBody"]["TEXT"]["body"]
        .as_str()
        .unwrap();
    assert!(body.contains("Successfully optimized schedule for 2 studies"));

    let payload: serde_json::Value = serde_json::from_str(body).unwrap();
    assert_eq!(payload["status"], "success");
    let schedule = payload["optimization_result"]["schedule"].as_array().unwrap();
    assert_eq!(schedule.len(), 2);
    let tox_a = schedule.iter().find(|p| p["study_id"] == "tox-a").unwrap();
    assert_eq!(tox_a["assigned_start_day"], 5);
}

#[test]
fn schedule_optimizer_rejects_malformed_studies() {
    let event = ToolEvent::parse(
        r#"{"function": "optimize_schedule", "studies": "not json at all"}"#,
    )
    .unwrap();
    let clients = mock_clients(Vec::new());

    let value = catalog::dispatch(&event, &clients).to_value();
    let body = value["TEXT"]["body"].as_str().unwrap();
    assert!(body.starts_with("Invalid JSON format for studies parameter"));
}
