use std::fmt::Write as _;

use crate::clients::clinicaltrials::{TrialQuery, TrialSummary, TrialsClient};
use crate::envelope::{ToolEvent, ToolResponse};
use crate::handlers::{client_error_text, missing_parameter};

pub fn handle_search(event: &ToolEvent, client: &dyn TrialsClient) -> ToolResponse {
    let query = TrialQuery {
        condition: event.required_param("condition"),
        intervention: event.required_param("intervention"),
        sponsor: event.required_param("sponsor"),
        title: event.required_param("title"),
        nct_id: event.required_param("nct_id"),
    };

    if query.is_empty() {
        return ToolResponse::text(
            event,
            "Provide at least one search parameter: condition, intervention, sponsor, title, or nct_id.",
        );
    }

    match client.search_trials(&query) {
        Ok(trials) => ToolResponse::text(event, format_trials(&trials)),
        Err(err) => ToolResponse::text(event, client_error_text("search_trials", &err)),
    }
}

pub fn handle_details(event: &ToolEvent, client: &dyn TrialsClient) -> ToolResponse {
    let Some(nct_id) = event.required_param("nct_id") else {
        return missing_parameter(event, "nct_id");
    };

    match client.trial_details(&nct_id) {
        Ok(trial) => ToolResponse::text(event, format_trial_details(&trial)),
        Err(err) => ToolResponse::text(event, client_error_text("get_trial_details", &err)),
    }
}

fn format_trials(trials: &[TrialSummary]) -> String {
    if trials.is_empty() {
        return "No clinical trials matched the search criteria.".to_string();
    }
    let mut out = format!("Found {} clinical trial(s):\n", trials.len());
    for (i, trial) in trials.iter().enumerate() {
        let _ = write!(
            out,
            "\n{}. {} ({})\n   Status: {}\n   Conditions: {}\n   Phases: {}\n",
            i + 1,
            trial.title,
            trial.nct_id,
            trial.status,
            join_or_na(&trial.conditions),
            join_or_na(&trial.phases),
        );
    }
    out.push_str("\nUse get_trial_details with an NCT id for the full record.");
    out
}

fn format_trial_details(trial: &TrialSummary) -> String {
    format!(
        "{} ({})\nStatus: {}\nConditions: {}\nPhases: {}",
        trial.title,
        trial.nct_id,
        trial.status,
        join_or_na(&trial.conditions),
        join_or_na(&trial.phases),
    )
}

fn join_or_na(values: &[String]) -> String {
    if values.is_empty() {
        "N/A".to_string()
    } else {
        values.join(", ")
    }
}
