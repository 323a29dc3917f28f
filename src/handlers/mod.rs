//! Tool handlers: parameter extraction, client call, text formatting.
//!
//! Every failure becomes a text body in the normal response shape; handlers
//! never surface transport-level errors to the orchestrator.

pub mod clinical_study_search;
pub mod drug_information;
pub mod patent_search;
pub mod protein_search;
pub mod schedule_optimizer;
pub mod web_search;

use crate::clients::ClientError;
use crate::envelope::{ToolEvent, ToolResponse};

pub(crate) fn missing_parameter(event: &ToolEvent, name: &str) -> ToolResponse {
    ToolResponse::text(event, format!("Missing mandatory parameter: {name}"))
}

/// Renders a client failure as tool output. A missing API key reads as a
/// configuration notice rather than an error: the tool is disabled, not
/// broken.
pub(crate) fn client_error_text(tool: &str, err: &ClientError) -> String {
    match err {
        ClientError::MissingApiKey(name) => {
            format!("The {tool} tool is not configured on this server: set {name} to enable it.")
        }
        other => format!("The {tool} tool failed: {other}"),
    }
}
