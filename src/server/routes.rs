use std::fmt::Write as _;

use crate::catalog;
use crate::server::api;
use crate::server::ServerState;

pub struct HttpResponse {
    pub status_code: u16,
    pub status_text: &'static str,
    pub content_type: &'static str,
    pub body: String,
}

impl HttpResponse {
    pub fn to_http_string(&self) -> String {
        format!(
            "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            self.status_code,
            self.status_text,
            self.content_type,
            self.body.len(),
            self.body
        )
    }

    fn ok_json(body: String) -> Self {
        Self {
            status_code: 200,
            status_text: "OK",
            content_type: "application/json",
            body,
        }
    }
}

pub fn route_request(state: &ServerState, method: &str, path: &str, body: &str) -> HttpResponse {
    match (method, path) {
        ("GET", "/") => HttpResponse {
            status_code: 200,
            status_text: "OK",
            content_type: "text/html; charset=utf-8",
            body: index_html(),
        },
        ("GET", "/api/health") => match api::health_payload() {
            Ok(payload) => HttpResponse::ok_json(payload),
            Err(err) => error_response(500, "Internal Server Error", &err.to_string()),
        },
        ("GET", "/api/tools") => match api::tools_payload() {
            Ok(payload) => HttpResponse::ok_json(payload),
            Err(err) => error_response(500, "Internal Server Error", &err.to_string()),
        },
        ("POST", "/api/invoke") => match api::invoke_payload(body, &state.clients) {
            Ok(payload) => HttpResponse::ok_json(payload),
            Err(api::InvokeError::Parse(err)) => {
                error_response(400, "Bad Request", &format!("Invalid request body: {err}"))
            }
        },
        ("POST", "/api/schedule/optimize") => match api::optimize_payload(body) {
            Ok(payload) => HttpResponse::ok_json(payload),
            Err(err) => optimize_error_response(err),
        },
        ("POST", "/api/schedule/optimize/csv") => match api::optimize_csv_payload(body) {
            Ok(payload) => HttpResponse {
                status_code: 200,
                status_text: "OK",
                content_type: "text/csv",
                body: payload,
            },
            Err(err) => optimize_error_response(err),
        },
        _ => error_response(404, "Not Found", "Route not found"),
    }
}

fn optimize_error_response(err: api::OptimizePayloadError) -> HttpResponse {
    match err {
        api::OptimizePayloadError::Parse(err) => {
            error_response(400, "Bad Request", &format!("Invalid request body: {err}"))
        }
        api::OptimizePayloadError::Validation(validation) => {
            validation_error_response(400, "Bad Request", validation)
        }
        api::OptimizePayloadError::Csv(err) => {
            error_response(500, "Internal Server Error", &err.to_string())
        }
    }
}

fn validation_error_response(
    status_code: u16,
    status_text: &'static str,
    payload: api::ValidationErrorResponse,
) -> HttpResponse {
    let fallback =
        "{\n  \"status\": \"error\",\n  \"message\": \"Validation failed\"\n}".to_string();

    HttpResponse {
        status_code,
        status_text,
        content_type: "application/json",
        body: serde_json::to_string_pretty(&payload).unwrap_or(fallback),
    }
}

fn error_response(status_code: u16, status_text: &'static str, message: &str) -> HttpResponse {
    HttpResponse {
        status_code,
        status_text,
        content_type: "application/json",
        body: format!(
            "{{\n  \"status\": \"error\",\n  \"message\": {}\n}}",
            serde_json::to_string(message).unwrap_or_else(|_| "\"Unknown error\"".to_string())
        ),
    }
}

fn index_html() -> String {
    let mut rows = String::new();
    for tool in catalog::descriptors() {
        let _ = writeln!(
            rows,
            "    <tr><td><code>{}</code></td><td>{}</td></tr>",
            tool.name, tool.description
        );
    }
    format!(
        r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width,initial-scale=1" />
  <title>Vivarium Tool Server</title>
  <style>
    body {{ font-family: Arial, sans-serif; max-width: 820px; margin: 24px auto; padding: 0 12px; }}
    table {{ border-collapse: collapse; width: 100%; }}
    td, th {{ border: 1px solid #ddd; padding: 8px; text-align: left; }}
    code {{ background: #f4f4f4; padding: 1px 4px; border-radius: 3px; }}
  </style>
</head>
<body>
  <h1>Vivarium Tool Server</h1>
  <p>Tool invocations go to <code>POST /api/invoke</code>; the schedule optimizer
  is also exposed directly at <code>POST /api/schedule/optimize</code>
  (CSV usage table at <code>/api/schedule/optimize/csv</code>).
  Discovery: <code>GET /api/tools</code>, health: <code>GET /api/health</code>.</p>
  <table>
    <tr><th>Tool</th><th>Description</th></tr>
{rows}  </table>
</body>
</html>
"#
    )
}
