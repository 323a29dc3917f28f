use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::catalog;
use crate::clients::ServiceClients;
use crate::envelope::ToolEvent;
use crate::scheduler::{
    optimize_schedule, Objective, OptimizerConfig, ScheduleResult, Study,
    DEFAULT_MAX_ANIMALS_PER_DAY,
};

const MAX_CEILING: u32 = 1_000_000;

pub fn health_payload() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&json!({
        "status": "ok",
        "service": "vivarium-api",
        "version": env!("CARGO_PKG_VERSION"),
        "time": Utc::now().to_rfc3339(),
    }))
}

pub fn tools_payload() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&json!({ "tools": catalog::descriptors() }))
}

#[derive(Debug)]
pub enum InvokeError {
    Parse(serde_json::Error),
}

impl fmt::Display for InvokeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for InvokeError {}

/// Parses a tool event and dispatches it through the catalog. Handler
/// failures are already text bodies; only an unparseable envelope is an error.
pub fn invoke_payload(body: &str, clients: &ServiceClients) -> Result<String, InvokeError> {
    let event = ToolEvent::parse(body).map_err(InvokeError::Parse)?;
    let invocation_id = Uuid::new_v4();
    info!(
        %invocation_id,
        function = event.function_name(),
        session = event.session_id.as_deref().unwrap_or("-"),
        "dispatching tool invocation"
    );
    let response = catalog::dispatch(&event, clients);
    Ok(response.to_pretty_json())
}

#[derive(Debug, Clone, Deserialize)]
pub struct OptimizeScheduleRequest {
    pub studies: Vec<Study>,
    pub max_animals_per_day: Option<u32>,
    pub optimization_objective: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationIssue {
    pub field: &'static str,
    pub messages: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationErrorResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub errors: Vec<ValidationIssue>,
}

#[derive(Debug)]
pub enum OptimizePayloadError {
    Parse(serde_json::Error),
    Validation(ValidationErrorResponse),
    Csv(csv::Error),
}

impl fmt::Display for OptimizePayloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "{err}"),
            Self::Validation(_) => write!(f, "invalid optimize request"),
            Self::Csv(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for OptimizePayloadError {}

fn parse_and_run(body: &str) -> Result<(OptimizerConfig, ScheduleResult), OptimizePayloadError> {
    let request: OptimizeScheduleRequest =
        serde_json::from_str(body).map_err(OptimizePayloadError::Parse)?;

    let mut errors: Vec<ValidationIssue> = Vec::new();
    let ceiling = request.max_animals_per_day.unwrap_or(DEFAULT_MAX_ANIMALS_PER_DAY);
    if !(1..=MAX_CEILING).contains(&ceiling) {
        errors.push(ValidationIssue {
            field: "max_animals_per_day",
            messages: vec![format!("must be between 1 and {MAX_CEILING}")],
        });
    }

    let objective = match request.optimization_objective.as_deref() {
        None => Objective::default(),
        Some(raw) => match raw.parse::<Objective>() {
            Ok(objective) => objective,
            Err(err) => {
                errors.push(ValidationIssue {
                    field: "optimization_objective",
                    messages: vec![err.to_string()],
                });
                Objective::default()
            }
        },
    };

    if !errors.is_empty() {
        return Err(OptimizePayloadError::Validation(ValidationErrorResponse {
            status: "error",
            message: "Validation failed",
            errors,
        }));
    }

    let config = OptimizerConfig {
        max_animals_per_day: ceiling,
        objective,
        ..OptimizerConfig::default()
    };
    let result = optimize_schedule(&request.studies, &config);
    Ok((config, result))
}

pub fn optimize_payload(body: &str) -> Result<String, OptimizePayloadError> {
    let (config, result) = parse_and_run(body)?;

    let response = json!({
        "status": "ok",
        "objective": config.objective,
        "max_animals_per_day": config.max_animals_per_day,
        "horizon_days": config.horizon_days,
        "generated_at": Utc::now().to_rfc3339(),
        "optimization_result": result,
    });
    serde_json::to_string_pretty(&response).map_err(OptimizePayloadError::Parse)
}

/// Same input as [optimize_payload], rendered as a per-day usage CSV.
pub fn optimize_csv_payload(body: &str) -> Result<String, OptimizePayloadError> {
    let (_, result) = parse_and_run(body)?;
    usage_csv(&result).map_err(OptimizePayloadError::Csv)
}

fn usage_csv(result: &ScheduleResult) -> Result<String, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["day", "animal_count", "study_count", "over_capacity", "active_studies"])?;
    for day in &result.daily_usage {
        writer.write_record([
            day.day.to_string(),
            day.animal_count.to_string(),
            day.study_count.to_string(),
            day.over_capacity.to_string(),
            day.active_studies.join(";"),
        ])?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|err| csv::Error::from(err.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
