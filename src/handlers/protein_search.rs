use std::fmt::Write as _;

use crate::clients::uniprot::{ProteinClient, ProteinEntry};
use crate::envelope::{ToolEvent, ToolResponse};
use crate::handlers::{client_error_text, missing_parameter};

const DEFAULT_ORGANISM: &str = "human";
const DEFAULT_LIMIT: u32 = 10;

pub fn handle(event: &ToolEvent, client: &dyn ProteinClient) -> ToolResponse {
    let Some(query) = event.required_param("query") else {
        return missing_parameter(event, "query");
    };
    let organism = event
        .required_param("organism")
        .unwrap_or_else(|| DEFAULT_ORGANISM.to_string());
    let limit = event.param_u32("limit").unwrap_or(DEFAULT_LIMIT).max(1);

    match client.search(&query, &organism, limit) {
        Ok(entries) => ToolResponse::text(event, format_entries(&query, &entries)),
        Err(err) => ToolResponse::text(event, client_error_text("search_proteins", &err)),
    }
}

fn format_entries(query: &str, entries: &[ProteinEntry]) -> String {
    if entries.is_empty() {
        return format!("No proteins found matching query: {query}");
    }
    let mut out = format!("Found {} protein(s) matching your search:\n", entries.len());
    for (i, entry) in entries.iter().enumerate() {
        let length = entry
            .length
            .map(|n| n.to_string())
            .unwrap_or_else(|| "N/A".to_string());
        let _ = write!(
            out,
            "\n{}. {}\n   - Accession ID: {}\n   - Gene: {}\n   - Organism: {}\n   - Length: {} amino acids\n   - Function: {}\n",
            i + 1,
            entry.protein_name,
            entry.accession,
            entry.gene,
            entry.organism,
            length,
            entry.function,
        );
    }
    out
}
