use std::fmt::Write as _;

use crate::clients::openfda::{DrugInfoClient, DrugLabel};
use crate::envelope::{ToolEvent, ToolResponse};
use crate::handlers::{client_error_text, missing_parameter};

const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 25;

pub fn handle(event: &ToolEvent, client: &dyn DrugInfoClient) -> ToolResponse {
    let Some(indication) = event.required_param("indication") else {
        return missing_parameter(event, "indication");
    };
    let limit = event.param_u32("limit").unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);

    match client.approved_drugs(&indication, limit) {
        Ok(labels) => ToolResponse::text(event, format_labels(&indication, &labels)),
        Err(err) => ToolResponse::text(event, client_error_text("get_approved_drugs", &err)),
    }
}

fn format_labels(indication: &str, labels: &[DrugLabel]) -> String {
    if labels.is_empty() {
        return format!("No approved drug labels found for indication '{indication}'.");
    }
    let mut out = format!(
        "Found {} approved drug label(s) for indication '{indication}':\n",
        labels.len()
    );
    for (i, label) in labels.iter().enumerate() {
        let snippet: String = label.indications.chars().take(200).collect();
        let _ = write!(
            out,
            "\n{}. {} ({})\n   Manufacturer: {}\n   Indications: {}\n",
            i + 1,
            label.brand_name,
            label.generic_name,
            label.manufacturer,
            snippet,
        );
    }
    out
}
