//! Tool catalog: descriptors for discovery plus dispatch by function name.

use serde::Serialize;

use crate::clients::ServiceClients;
use crate::envelope::{ToolEvent, ToolResponse};
use crate::handlers;

#[derive(Debug, Clone, Serialize)]
pub struct ParameterSpec {
    pub name: &'static str,
    pub required: bool,
    pub description: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub parameters: &'static [ParameterSpec],
}

pub fn descriptors() -> &'static [ToolDescriptor] {
    &TOOLS
}

static TOOLS: [ToolDescriptor; 7] = [
    ToolDescriptor {
        name: "web_search",
        description: "Search the web via the Tavily API.",
        parameters: &[
            ParameterSpec { name: "search_query", required: true, description: "Query string." },
            ParameterSpec { name: "target_website", required: false, description: "Restrict results to one site." },
            ParameterSpec { name: "topic", required: false, description: "Topic category (default general)." },
            ParameterSpec { name: "days", required: false, description: "Look-back window in days (default 30)." },
        ],
    },
    ToolDescriptor {
        name: "search_trials",
        description: "Search ClinicalTrials.gov registrations.",
        parameters: &[
            ParameterSpec { name: "condition", required: false, description: "Medical condition." },
            ParameterSpec { name: "intervention", required: false, description: "Intervention or drug name." },
            ParameterSpec { name: "sponsor", required: false, description: "Lead sponsor name." },
            ParameterSpec { name: "title", required: false, description: "Words from the study title." },
            ParameterSpec { name: "nct_id", required: false, description: "Registry identifier." },
        ],
    },
    ToolDescriptor {
        name: "get_trial_details",
        description: "Fetch one ClinicalTrials.gov record by NCT id.",
        parameters: &[
            ParameterSpec { name: "nct_id", required: true, description: "Registry identifier." },
        ],
    },
    ToolDescriptor {
        name: "get_approved_drugs",
        description: "List approved drug labels from OpenFDA by indication.",
        parameters: &[
            ParameterSpec { name: "indication", required: true, description: "Indication to search labels for." },
            ParameterSpec { name: "limit", required: false, description: "Maximum labels to return (default 10)." },
        ],
    },
    ToolDescriptor {
        name: "search_proteins",
        description: "Search UniProtKB for proteins.",
        parameters: &[
            ParameterSpec { name: "query", required: true, description: "Protein, gene, or keyword query." },
            ParameterSpec { name: "organism", required: false, description: "Organism (default human)." },
            ParameterSpec { name: "limit", required: false, description: "Maximum entries to return (default 10)." },
        ],
    },
    ToolDescriptor {
        name: "search_patents",
        description: "Search USPTO patent applications.",
        parameters: &[
            ParameterSpec { name: "search_query", required: true, description: "Query string." },
            ParameterSpec { name: "days", required: false, description: "Look-back window in days." },
        ],
    },
    ToolDescriptor {
        name: "optimize_schedule",
        description: "Optimize an in-vivo study schedule over a 30-day period.",
        parameters: &[
            ParameterSpec { name: "studies", required: true, description: "JSON array of studies to schedule." },
            ParameterSpec { name: "max_animals_per_day", required: false, description: "Per-day animal ceiling (default 1000)." },
            ParameterSpec { name: "optimization_objective", required: false, description: "balance_animals or balance_studies." },
        ],
    },
];

/// Routes an event to its handler by function name. Unknown tools produce a
/// text response, not a transport error.
pub fn dispatch(event: &ToolEvent, clients: &ServiceClients) -> ToolResponse {
    match event.function_name() {
        "web_search" => handlers::web_search::handle(event, clients.web_search.as_ref()),
        "search_trials" => {
            handlers::clinical_study_search::handle_search(event, clients.trials.as_ref())
        }
        "get_trial_details" => {
            handlers::clinical_study_search::handle_details(event, clients.trials.as_ref())
        }
        "get_approved_drugs" => {
            handlers::drug_information::handle(event, clients.drug_info.as_ref())
        }
        "search_proteins" => handlers::protein_search::handle(event, clients.proteins.as_ref()),
        "search_patents" => handlers::patent_search::handle(event, clients.patents.as_ref()),
        "optimize_schedule" => handlers::schedule_optimizer::handle(event),
        other => ToolResponse::text(event, format!("Unknown tool: {other}")),
    }
}
