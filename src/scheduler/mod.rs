//! Greedy in-vivo study schedule optimizer.
//!
//! Distributes studies across a fixed planning horizon (default 30 days),
//! balancing either per-day animal load or per-day study count. Pure function
//! of its inputs: no I/O, no ambient configuration, fresh state per run.

pub mod ledger;
pub mod placement;
pub mod stats;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::scheduler::ledger::DayLedger;

pub const DEFAULT_HORIZON_DAYS: usize = 30;
pub const DEFAULT_MAX_ANIMALS_PER_DAY: u32 = 1000;
const DEFAULT_PRIORITY: i32 = 3;

/// Which per-day dimension the placement heuristic balances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Objective {
    BalanceAnimals,
    BalanceStudies,
}

impl Default for Objective {
    fn default() -> Self {
        Self::BalanceAnimals
    }
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BalanceAnimals => write!(f, "balance_animals"),
            Self::BalanceStudies => write!(f, "balance_studies"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct InvalidObjective(pub String);

impl fmt::Display for InvalidObjective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid optimization objective '{}': expected balance_animals or balance_studies",
            self.0
        )
    }
}

impl std::error::Error for InvalidObjective {}

impl FromStr for Objective {
    type Err = InvalidObjective;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim() {
            "balance_animals" => Ok(Self::BalanceAnimals),
            "balance_studies" => Ok(Self::BalanceStudies),
            other => Err(InvalidObjective(other.to_string())),
        }
    }
}

/// Knobs for one optimizer run, passed explicitly rather than read from the
/// environment.
#[derive(Debug, Clone)]
pub struct OptimizerConfig {
    pub max_animals_per_day: u32,
    pub objective: Objective,
    pub horizon_days: usize,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            max_animals_per_day: DEFAULT_MAX_ANIMALS_PER_DAY,
            objective: Objective::default(),
            horizon_days: DEFAULT_HORIZON_DAYS,
        }
    }
}

/// One study submitted for scheduling. Immutable for the duration of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Study {
    /// Empty ids are replaced with a positional `Study_<n>` fallback.
    #[serde(default)]
    pub study_id: String,
    #[serde(default)]
    pub animals_required: u32,
    #[serde(default = "default_duration")]
    pub duration_days: usize,
    /// 1-indexed within the horizon.
    #[serde(default)]
    pub preferred_start_day: Option<usize>,
    /// Higher priority is scheduled first.
    #[serde(default = "default_priority")]
    pub priority: i32,
}

fn default_duration() -> usize {
    1
}

fn default_priority() -> i32 {
    DEFAULT_PRIORITY
}

/// A study with its resolved start day. Derived, never mutated afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct PlacedStudy {
    pub study_id: String,
    pub animals_required: u32,
    /// 1-indexed.
    pub assigned_start_day: usize,
    pub duration_days: usize,
    pub preferred_start_day: Option<usize>,
    pub priority: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct DailyUsage {
    /// 1-indexed.
    pub day: usize,
    pub animal_count: u32,
    pub study_count: u32,
    pub active_studies: Vec<String>,
    /// True when soft-failure placement pushed this day past the ceiling.
    pub over_capacity: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScheduleResult {
    pub schedule: Vec<PlacedStudy>,
    pub daily_usage: Vec<DailyUsage>,
    pub total_animals: u64,
    /// Observed peak, not the configured ceiling.
    pub max_animals_per_day: u32,
    pub avg_animals_per_day: f64,
    pub median_animals_per_active_day: f64,
    pub std_dev_animals: f64,
    pub max_studies_per_day: u32,
    pub avg_studies_per_day: f64,
    pub median_studies_per_active_day: f64,
    pub std_dev_studies: f64,
}

/// Schedules every study and derives per-day usage plus summary statistics.
///
/// Studies are stable-sorted descending by (priority, animals_required), so
/// equal studies keep their input order and reruns are byte-identical. Every
/// input produces a schedule; infeasible placements are flagged per day via
/// `over_capacity` rather than rejected.
pub fn optimize_schedule(studies: &[Study], config: &OptimizerConfig) -> ScheduleResult {
    let horizon = config.horizon_days.max(1);
    let mut day_ledger = DayLedger::new(horizon);

    let mut order: Vec<(usize, &Study)> = studies.iter().enumerate().collect();
    order.sort_by(|(_, a), (_, b)| {
        b.priority
            .cmp(&a.priority)
            .then(b.animals_required.cmp(&a.animals_required))
    });

    let mut schedule = Vec::with_capacity(studies.len());
    for (position, study) in order {
        let study_id = if study.study_id.is_empty() {
            format!("Study_{}", position + 1)
        } else {
            study.study_id.clone()
        };
        let duration = study.duration_days.max(1);
        let preferred = study.preferred_start_day.and_then(|day| day.checked_sub(1));

        let start = placement::find_best_day(
            &day_ledger,
            study.animals_required,
            duration,
            preferred,
            config.max_animals_per_day,
            config.objective,
        );
        day_ledger.add(start, duration, study.animals_required, &study_id);

        schedule.push(PlacedStudy {
            study_id,
            animals_required: study.animals_required,
            assigned_start_day: start + 1,
            duration_days: duration,
            preferred_start_day: study.preferred_start_day,
            priority: study.priority,
        });
    }

    let daily_usage = (0..horizon)
        .map(|day| DailyUsage {
            day: day + 1,
            animal_count: day_ledger.animals()[day],
            study_count: day_ledger.studies()[day],
            active_studies: day_ledger.active_on(day).to_vec(),
            over_capacity: day_ledger.animals()[day] > config.max_animals_per_day,
        })
        .collect();

    let animals = day_ledger.animals();
    let study_counts = day_ledger.studies();

    ScheduleResult {
        total_animals: studies.iter().map(|s| s.animals_required as u64).sum(),
        max_animals_per_day: animals.iter().copied().max().unwrap_or(0),
        avg_animals_per_day: stats::mean(animals),
        median_animals_per_active_day: stats::median_nonzero(animals),
        std_dev_animals: stats::std_dev(animals),
        max_studies_per_day: study_counts.iter().copied().max().unwrap_or(0),
        avg_studies_per_day: stats::mean(study_counts),
        median_studies_per_active_day: stats::median_nonzero(study_counts),
        std_dev_studies: stats::std_dev(study_counts),
        schedule,
        daily_usage,
    }
}

#[cfg(test)]
mod tests {
    use super::{optimize_schedule, Objective, OptimizerConfig, Study};

    fn study(id: &str, animals: u32, duration: usize, preferred: Option<usize>, priority: i32) -> Study {
        Study {
            study_id: id.to_string(),
            animals_required: animals,
            duration_days: duration,
            preferred_start_day: preferred,
            priority,
        }
    }

    #[test]
    fn higher_priority_is_placed_first() {
        let studies = vec![
            study("low", 100, 1, Some(1), 1),
            study("high", 950, 1, Some(1), 5),
        ];
        let result = optimize_schedule(&studies, &OptimizerConfig::default());
        let high = result.schedule.iter().find(|p| p.study_id == "high").unwrap();
        // The high-priority study wins the contested preferred day.
        assert_eq!(high.assigned_start_day, 1);
        assert_eq!(result.schedule[0].study_id, "high");
    }

    #[test]
    fn empty_study_id_gets_positional_fallback() {
        let studies = vec![study("", 10, 1, None, 3)];
        let result = optimize_schedule(&studies, &OptimizerConfig::default());
        assert_eq!(result.schedule[0].study_id, "Study_1");
    }

    #[test]
    fn over_capacity_days_are_flagged() {
        let config = OptimizerConfig {
            max_animals_per_day: 100,
            objective: Objective::BalanceAnimals,
            horizon_days: 3,
        };
        let studies = vec![study("big", 500, 3, None, 3)];
        let result = optimize_schedule(&studies, &config);
        assert!(result.daily_usage.iter().all(|d| d.over_capacity));
    }

    #[test]
    fn objective_round_trips_through_from_str() {
        assert_eq!("balance_studies".parse::<Objective>().unwrap(), Objective::BalanceStudies);
        assert!("balance_everything".parse::<Objective>().is_err());
    }
}
