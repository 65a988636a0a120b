//! Testing utilities for the recon workspace
//!
//! Shared fixtures and in-memory fakes for the collaborator traits.

#![allow(missing_docs)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::DateTime;

use recon_model::{ConfigDocument, LastRun, LiveJob, RecordApiConfig, SystemJobSpec};
use recon_session::{ConfigStore, JobRunOutcome, SchedulerClient, SqlPredicateValidator, TransportError};

pub fn job_spec(id: i64, schedule: &str, disabled: bool) -> SystemJobSpec {
    SystemJobSpec {
        id,
        schedule: schedule.to_string(),
        disabled,
    }
}

pub fn live_job(id: i64, name: &str, schedule: &str, enabled: bool) -> LiveJob {
    LiveJob {
        id,
        name: name.to_string(),
        schedule: schedule.to_string(),
        enabled,
        next_run_at: None,
        last_run: None,
    }
}

pub fn live_job_with_telemetry(id: i64, name: &str, schedule: &str) -> LiveJob {
    LiveJob {
        next_run_at: DateTime::from_timestamp(1_700_003_600, 0),
        last_run: Some(LastRun {
            started_at: DateTime::from_timestamp(1_700_000_000, 0).expect("valid timestamp"),
            duration_millis: 250,
            error: None,
        }),
        ..live_job(id, name, schedule, true)
    }
}

pub fn record_api(name: &str, table: &str) -> RecordApiConfig {
    RecordApiConfig {
        name: name.to_string(),
        table_name: table.to_string(),
        ..RecordApiConfig::default()
    }
}

pub fn sample_document() -> ConfigDocument {
    ConfigDocument::new()
        .with_system_jobs(vec![job_spec(1, "@daily", false)])
        .upsert_record_api(record_api("movies", "movies"))
}

/// In-memory [`ConfigStore`] with a write-failure switch for retry tests.
#[derive(Debug, Default)]
pub struct InMemoryConfigStore {
    document: Mutex<ConfigDocument>,
    fail_writes: AtomicBool,
}

impl InMemoryConfigStore {
    pub fn new(document: ConfigDocument) -> Self {
        Self {
            document: Mutex::new(document),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Make subsequent writes fail with a connection error.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Snapshot of the currently persisted document.
    pub fn document(&self) -> ConfigDocument {
        self.document.lock().expect("store lock poisoned").clone()
    }
}

#[async_trait]
impl ConfigStore for InMemoryConfigStore {
    async fn fetch(&self) -> Result<ConfigDocument, TransportError> {
        Ok(self.document())
    }

    async fn store(&self, document: &ConfigDocument) -> Result<(), TransportError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(TransportError::Connection("injected write failure".to_string()));
        }
        *self.document.lock().expect("store lock poisoned") = document.clone();
        Ok(())
    }
}

/// [`SchedulerClient`] serving a fixed job list and recording run requests.
#[derive(Debug, Default)]
pub struct StaticScheduler {
    jobs: Vec<LiveJob>,
    runs: Mutex<Vec<i64>>,
    run_error: Option<String>,
}

impl StaticScheduler {
    pub fn new(jobs: Vec<LiveJob>) -> Self {
        Self {
            jobs,
            runs: Mutex::new(Vec::new()),
            run_error: None,
        }
    }

    /// Make triggered runs report the given execution error.
    pub fn with_run_error(mut self, error: impl Into<String>) -> Self {
        self.run_error = Some(error.into());
        self
    }

    /// Ids of jobs that were triggered, in order.
    pub fn triggered(&self) -> Vec<i64> {
        self.runs.lock().expect("scheduler lock poisoned").clone()
    }
}

#[async_trait]
impl SchedulerClient for StaticScheduler {
    async fn list_jobs(&self) -> Result<Vec<LiveJob>, TransportError> {
        Ok(self.jobs.clone())
    }

    async fn run_job(&self, id: i64) -> Result<JobRunOutcome, TransportError> {
        self.runs.lock().expect("scheduler lock poisoned").push(id);
        Ok(JobRunOutcome {
            error: self.run_error.clone(),
        })
    }
}

/// SQL validator that accepts every expression.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAllSql;

impl SqlPredicateValidator for AcceptAllSql {
    fn validate(&self, _expression: &str) -> Result<(), String> {
        Ok(())
    }
}

/// SQL validator that rejects every expression with a fixed diagnostic.
#[derive(Debug, Clone, Default)]
pub struct RejectAllSql;

impl SqlPredicateValidator for RejectAllSql {
    fn validate(&self, expression: &str) -> Result<(), String> {
        Err(format!("parse error near {expression:?}"))
    }
}
