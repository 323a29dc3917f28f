use serde_json::json;
use tracing::info;

use crate::envelope::{ToolEvent, ToolResponse};
use crate::handlers::missing_parameter;
use crate::scheduler::{optimize_schedule, Objective, OptimizerConfig, Study};

/// Runs the in-process schedule optimizer. `studies` arrives as a JSON string
/// parameter because the orchestrator passes all arguments as strings.
pub fn handle(event: &ToolEvent) -> ToolResponse {
    let Some(raw_studies) = event.required_param("studies") else {
        return missing_parameter(event, "studies");
    };

    let studies: Vec<Study> = match serde_json::from_str(&raw_studies) {
        Ok(studies) => studies,
        Err(err) => {
            return ToolResponse::text(
                event,
                format!("Invalid JSON format for studies parameter: {err}"),
            );
        }
    };

    let objective = match event.required_param("optimization_objective") {
        Some(raw) => match raw.parse::<Objective>() {
            Ok(objective) => objective,
            Err(err) => return ToolResponse::text(event, err.to_string()),
        },
        None => Objective::default(),
    };

    let config = OptimizerConfig {
        max_animals_per_day: event
            .param_u32("max_animals_per_day")
            .unwrap_or(crate::scheduler::DEFAULT_MAX_ANIMALS_PER_DAY),
        objective,
        ..OptimizerConfig::default()
    };

    info!(studies = studies.len(), objective = %config.objective, "optimizing schedule");
    let result = optimize_schedule(&studies, &config);

    let body = json!({
        "status": "success",
        "optimization_result": result,
        "summary": format!(
            "Successfully optimized schedule for {} studies with {} objective.",
            studies.len(),
            config.objective
        ),
    });
    let rendered = serde_json::to_string_pretty(&body)
        .unwrap_or_else(|_| "{\"status\":\"error\"}".to_string());
    ToolResponse::text(event, rendered)
}
