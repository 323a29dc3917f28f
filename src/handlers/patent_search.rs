use std::fmt::Write as _;

use crate::clients::uspto::{PatentClient, PatentHit};
use crate::envelope::{ToolEvent, ToolResponse};
use crate::handlers::{client_error_text, missing_parameter};

pub fn handle(event: &ToolEvent, client: &dyn PatentClient) -> ToolResponse {
    let Some(query) = event.required_param("search_query") else {
        return missing_parameter(event, "search_query");
    };
    let days = event.param_u32("days");

    match client.search(&query, days) {
        Ok(hits) => ToolResponse::text(event, format_hits(&query, &hits)),
        Err(err) => ToolResponse::text(event, client_error_text("search_patents", &err)),
    }
}

fn format_hits(query: &str, hits: &[PatentHit]) -> String {
    if hits.is_empty() {
        return format!("No patent applications found for '{query}'.");
    }
    let mut out = format!("Found {} patent application(s) for '{query}':\n", hits.len());
    for (i, hit) in hits.iter().enumerate() {
        let _ = write!(
            out,
            "\n{}. {}\n   Application: {}\n   Status: {}\n   Filed: {}\n",
            i + 1,
            hit.title,
            hit.application_number,
            hit.status,
            hit.filing_date,
        );
    }
    out
}
