use std::fmt::Write as _;

use tracing::info;

use crate::clients::tavily::{SearchHit, WebSearchClient, WebSearchRequest};
use crate::envelope::{ToolEvent, ToolResponse};
use crate::handlers::{client_error_text, missing_parameter};

pub fn handle(event: &ToolEvent, client: &dyn WebSearchClient) -> ToolResponse {
    let Some(query) = event.required_param("search_query") else {
        return missing_parameter(event, "search_query");
    };

    let request = WebSearchRequest {
        query: query.clone(),
        target_website: event.required_param("target_website"),
        topic: event.required_param("topic"),
        days: event.param_u32("days"),
    };
    info!(query = %request.query, site = ?request.target_website, "executing web search");

    match client.search(&request) {
        Ok(hits) => ToolResponse::text(event, format_hits(&query, &hits)),
        Err(err) => ToolResponse::text(event, client_error_text("web_search", &err)),
    }
}

fn format_hits(query: &str, hits: &[SearchHit]) -> String {
    if hits.is_empty() {
        return format!("No search results found for '{query}'.");
    }
    let mut out = format!("Here are the top search results for '{query}':\n");
    for (i, hit) in hits.iter().enumerate() {
        let _ = write!(
            out,
            "\n{}. {}\n   {}\n   {}\n",
            i + 1,
            hit.title,
            hit.url,
            hit.content
        );
    }
    out
}
