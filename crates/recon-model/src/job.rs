//! Scheduled-job entity family
//!
//! [`SystemJobSpec`] is the user-overridable portion of a job, persisted in
//! the config document. [`LiveJob`] is the read-only status reported by the
//! external scheduler; it is never written back.

use chrono::{DateTime, Utc};
use recon_engine::{EditEq, Keyed, LiveState};
use serde::{Deserialize, Serialize};

/// Persisted override for one scheduled system job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemJobSpec {
    /// Backend-assigned job id.
    pub id: i64,

    /// Cron schedule spec, named alias or 6-7 field expression.
    pub schedule: String,

    /// Whether the job is turned off.
    #[serde(default)]
    pub disabled: bool,
}

impl Keyed for SystemJobSpec {
    type Key = i64;

    #[inline]
    fn key(&self) -> i64 {
        self.id
    }
}

impl EditEq for SystemJobSpec {
    /// Only user-editable fields participate; job names and live telemetry
    /// are excluded by construction.
    fn edit_eq(&self, other: &Self) -> bool {
        self.disabled == other.disabled
            && self.schedule == other.schedule
            && self.id == other.id
    }
}

/// Outcome of a job's most recent execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastRun {
    /// When the run started.
    pub started_at: DateTime<Utc>,

    /// Wall-clock duration of the run.
    pub duration_millis: u64,

    /// Error message, if the run failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Live job status as reported by the external scheduler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveJob {
    /// Backend-assigned job id.
    pub id: i64,

    /// Human-readable job name.
    pub name: String,

    /// Schedule the scheduler is currently running the job on.
    pub schedule: String,

    /// Whether the scheduler considers the job enabled.
    pub enabled: bool,

    /// Next scheduled execution, if the job is enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_run_at: Option<DateTime<Utc>>,

    /// Telemetry from the most recent execution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_run: Option<LastRun>,
}

impl LiveState for LiveJob {
    type Spec = SystemJobSpec;

    #[inline]
    fn key(&self) -> i64 {
        self.id
    }

    /// The spec a user would get without an explicit config entry.
    fn to_default_spec(&self) -> SystemJobSpec {
        SystemJobSpec {
            id: self.id,
            schedule: self.schedule.clone(),
            disabled: !self.enabled,
        }
    }
}
