use vivarium::clients::ServiceClients;
use vivarium::config::AppConfig;
use vivarium::server::routes::route_request;
use vivarium::server::ServerState;

/// Live clients with no keys; none of these routes reach the network.
fn test_state() -> ServerState {
    let config = AppConfig {
        bind_addr: "127.0.0.1:0".to_string(),
        tavily_api_key: None,
        uspto_api_key: None,
    };
    ServerState {
        clients: ServiceClients::from_config(&config),
    }
}

#[test]
fn health_endpoint_returns_ok_json() {
    let state = test_state();
    let response = route_request(&state, "GET", "/api/health", "");
    assert_eq!(response.status_code, 200);
    assert_eq!(response.content_type, "application/json");
    assert!(response.body.contains("\"status\": \"ok\""));
    assert!(response.body.contains("vivarium-api"));
}

#[test]
fn tools_endpoint_lists_the_catalog() {
    let state = test_state();
    let response = route_request(&state, "GET", "/api/tools", "");
    assert_eq!(response.status_code, 200);

    let payload: serde_json::Value =
        serde_json::from_str(&response.body).expect("response should be valid json");
    let tools = payload["tools"].as_array().expect("tools should be an array");
    assert_eq!(tools.len(), 7);
    assert!(tools.iter().any(|t| t["name"] == "optimize_schedule"));
    assert!(tools.iter().any(|t| t["name"] == "web_search"));
}

#[test]
fn optimize_endpoint_returns_schedule_and_statistics() {
    let state = test_state();
    let body = r#"{
        "studies": [
            {"study_id": "a", "animals_required": 150, "duration_days": 3, "preferred_start_day": 5},
            {"study_id": "b", "animals_required": 300, "duration_days": 2}
        ],
        "max_animals_per_day": 1000,
        "optimization_objective": "balance_animals"
    }"#;
    let response = route_request(&state, "POST", "/api/schedule/optimize", body);
    assert_eq!(response.status_code, 200);

    let payload: serde_json::Value =
        serde_json::from_str(&response.body).expect("response should be valid json");
    assert_eq!(payload["status"], "ok");
    assert_eq!(payload["objective"], "balance_animals");
    assert_eq!(payload["horizon_days"], 30);

    let result = &payload["optimization_result"];
    assert_eq!(result["schedule"].as_array().unwrap().len(), 2);
    assert_eq!(result["daily_usage"].as_array().unwrap().len(), 30);
    assert_eq!(result["total_animals"], 450);
    assert!(result["std_dev_animals"].as_f64().is_some());

    let a = result["schedule"]
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["study_id"] == "a")
        .unwrap();
    assert_eq!(a["assigned_start_day"], 5);
}

#[test]
fn optimize_endpoint_validates_knobs() {
    let state = test_state();
    let body = r#"{"studies": [], "max_animals_per_day": 0, "optimization_objective": "balance_everything"}"#;
    let response = route_request(&state, "POST", "/api/schedule/optimize", body);
    assert_eq!(response.status_code, 400);

    let payload: serde_json::Value = serde_json::from_str(&response.body).unwrap();
    assert_eq!(payload["status"], "error");
    let errors = payload["errors"].as_array().unwrap();
    assert!(errors.iter().any(|e| e["field"] == "max_animals_per_day"));
    assert!(errors.iter().any(|e| e["field"] == "optimization_objective"));
}

#[test]
fn optimize_endpoint_rejects_malformed_body() {
    let state = test_state();
    let response = route_request(&state, "POST", "/api/schedule/optimize", "{not json");
    assert_eq!(response.status_code, 400);
    assert!(response.body.contains("Invalid request body"));
}

#[test]
fn optimize_csv_endpoint_renders_daily_usage() {
    let state = test_state();
    let body = r#"{"studies": [{"study_id": "a", "animals_required": 10, "duration_days": 2, "preferred_start_day": 1}]}"#;
    let response = route_request(&state, "POST", "/api/schedule/optimize/csv", body);
    assert_eq!(response.status_code, 200);
    assert_eq!(response.content_type, "text/csv");

    let lines: Vec<&str> = response.body.trim_end().lines().collect();
    assert_eq!(lines.len(), 31, "header plus one row per horizon day");
    assert_eq!(lines[0], "day,animal_count,study_count,over_capacity,active_studies");
    assert!(lines[1].starts_with("1,10,1,false,"));
}

#[test]
fn invoke_endpoint_dispatches_schedule_tool() {
    let state = test_state();
    let body = r#"{
        "messageVersion": "1.0",
        "actionGroup": "scheduler",
        "function": "optimize_schedule",
        "parameters": [
            {"name": "studies", "type": "string", "value": "[{\"study_id\": \"x\", \"animals_required\": 20}]"}
        ]
    }"#;
    let response = route_request(&state, "POST", "/api/invoke", body);
    assert_eq!(response.status_code, 200);

    let payload: serde_json::Value = serde_json::from_str(&response.body).unwrap();
    assert_eq!(payload["messageVersion"], "1.0");
    let text = payload["response"]["functionResponse"]["responseBody"]["TEXT"]["body"]
        .as_str()
        .unwrap();
    assert!(text.contains("Successfully optimized schedule for 1 studies"));
}

#[test]
fn invoke_endpoint_rejects_malformed_envelope() {
    let state = test_state();
    let response = route_request(&state, "POST", "/api/invoke", "][");
    assert_eq!(response.status_code, 400);
    assert!(response.body.contains("Invalid request body"));
}

#[test]
fn unknown_route_is_404() {
    let state = test_state();
    let response = route_request(&state, "GET", "/api/nope", "");
    assert_eq!(response.status_code, 404);
}

#[test]
fn index_page_lists_tools() {
    let state = test_state();
    let response = route_request(&state, "GET", "/", "");
    assert_eq!(response.status_code, 200);
    assert!(response.content_type.starts_with("text/html"));
    assert!(response.body.contains("optimize_schedule"));
}
