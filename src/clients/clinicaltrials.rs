//! ClinicalTrials.gov v2 API client (GET /studies).

use serde::Deserialize;

use super::{expect_success, ClientResult};

pub const DEFAULT_BASE_URL: &str = "https://clinicaltrials.gov/api/v2";
const PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone, Default)]
pub struct TrialQuery {
    pub condition: Option<String>,
    pub intervention: Option<String>,
    pub sponsor: Option<String>,
    pub title: Option<String>,
    pub nct_id: Option<String>,
}

impl TrialQuery {
    pub fn is_empty(&self) -> bool {
        self.condition.is_none()
            && self.intervention.is_none()
            && self.sponsor.is_none()
            && self.title.is_none()
            && self.nct_id.is_none()
    }

    /// Renders the registry's AREA[...] query term syntax.
    fn to_query_term(&self) -> String {
        let mut terms = Vec::new();
        if let Some(v) = &self.condition {
            terms.push(format!("AREA[Condition]{v}"));
        }
        if let Some(v) = &self.intervention {
            terms.push(format!("AREA[InterventionName]{v}"));
        }
        if let Some(v) = &self.sponsor {
            terms.push(format!("AREA[LeadSponsorName]{v}"));
        }
        if let Some(v) = &self.title {
            terms.push(format!("AREA[BriefTitle]{v}"));
        }
        if let Some(v) = &self.nct_id {
            terms.push(format!("AREA[NCTId]{v}"));
        }
        terms.join(" AND ")
    }
}

#[derive(Debug, Clone)]
pub struct TrialSummary {
    pub nct_id: String,
    pub title: String,
    pub status: String,
    pub conditions: Vec<String>,
    pub phases: Vec<String>,
}

pub trait TrialsClient {
    fn search_trials(&self, query: &TrialQuery) -> ClientResult<Vec<TrialSummary>>;
    fn trial_details(&self, nct_id: &str) -> ClientResult<TrialSummary>;
}

pub struct ClinicalTrialsClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct StudiesEnvelope {
    #[serde(default)]
    studies: Vec<StudyRecord>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct StudyRecord {
    #[serde(default)]
    protocol_section: ProtocolSection,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ProtocolSection {
    #[serde(default)]
    identification_module: IdentificationModule,
    #[serde(default)]
    status_module: StatusModule,
    #[serde(default)]
    conditions_module: ConditionsModule,
    #[serde(default)]
    design_module: DesignModule,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct IdentificationModule {
    #[serde(default)]
    nct_id: String,
    #[serde(default)]
    brief_title: String,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct StatusModule {
    #[serde(default)]
    overall_status: String,
}

#[derive(Deserialize, Default)]
struct ConditionsModule {
    #[serde(default)]
    conditions: Vec<String>,
}

#[derive(Deserialize, Default)]
struct DesignModule {
    #[serde(default)]
    phases: Vec<String>,
}

impl From<StudyRecord> for TrialSummary {
    fn from(record: StudyRecord) -> Self {
        let section = record.protocol_section;
        Self {
            nct_id: section.identification_module.nct_id,
            title: section.identification_module.brief_title,
            status: section.status_module.overall_status,
            conditions: section.conditions_module.conditions,
            phases: section.design_module.phases,
        }
    }
}

impl ClinicalTrialsClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::blocking::Client::new(),
            base_url: base_url.into(),
        }
    }
}

impl Default for ClinicalTrialsClient {
    fn default() -> Self {
        Self::new()
    }
}

impl TrialsClient for ClinicalTrialsClient {
    fn search_trials(&self, query: &TrialQuery) -> ClientResult<Vec<TrialSummary>> {
        let response = self
            .http
            .get(format!("{}/studies", self.base_url))
            .query(&[
                ("format", "json".to_string()),
                ("pageSize", PAGE_SIZE.to_string()),
                ("query.term", query.to_query_term()),
            ])
            .send()?;
        let envelope: StudiesEnvelope = expect_success(response)?.json()?;
        Ok(envelope.studies.into_iter().map(TrialSummary::from).collect())
    }

    fn trial_details(&self, nct_id: &str) -> ClientResult<TrialSummary> {
        let response = self
            .http
            .get(format!("{}/studies/{nct_id}", self.base_url))
            .query(&[("format", "json")])
            .send()?;
        let record: StudyRecord = expect_success(response)?.json()?;
        Ok(record.into())
    }
}
