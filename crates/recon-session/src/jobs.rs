//! Scheduled-job edit sessions
//!
//! A [`JobEditSession`] joins the persisted job overrides with the
//! scheduler's live snapshot into proxies, accepts edits gated by the
//! schedule validator, and writes back a full document in which only the
//! jobs section changed.

use recon_engine::{extract, merge, Proxy};
use recon_model::{is_valid_schedule_spec, ConfigDocument, LiveJob, SystemJobSpec};

use crate::client::{ConfigStore, JobRunOutcome, SchedulerClient};
use crate::error::SessionError;

/// One edit session over the scheduled-job family.
///
/// Owns its proxy list exclusively; there is no merging of two live edit
/// sessions. To pick up fresh live state, open a new session.
#[derive(Debug)]
pub struct JobEditSession {
    base: ConfigDocument,
    proxies: Vec<Proxy<SystemJobSpec, LiveJob>>,
}

impl JobEditSession {
    /// Fetch the persisted document and the live job list, then merge.
    pub async fn open<S, C>(store: &S, scheduler: &C) -> Result<Self, SessionError>
    where
        S: ConfigStore + ?Sized,
        C: SchedulerClient + ?Sized,
    {
        let base = store.fetch().await?;
        let live = scheduler.list_jobs().await?;
        Ok(Self::from_parts(base, live))
    }

    /// Pure constructor over already-fetched inputs.
    #[must_use]
    pub fn from_parts(base: ConfigDocument, live: Vec<LiveJob>) -> Self {
        let persisted: Vec<SystemJobSpec> = base.system_jobs.iter().cloned().collect();
        let proxies = merge(persisted, live);
        tracing::debug!(proxies = proxies.len(), "job edit session opened");
        Self { base, proxies }
    }

    /// All proxies, ordered ascending by job id.
    #[inline]
    #[must_use]
    pub fn proxies(&self) -> &[Proxy<SystemJobSpec, LiveJob>] {
        &self.proxies
    }

    /// Proxy for one job id.
    #[must_use]
    pub fn proxy(&self, id: i64) -> Option<&Proxy<SystemJobSpec, LiveJob>> {
        self.proxies.iter().find(|p| p.current().id == id)
    }

    fn proxy_mut(
        &mut self,
        id: i64,
    ) -> Result<&mut Proxy<SystemJobSpec, LiveJob>, SessionError> {
        self.proxies
            .iter_mut()
            .find(|p| p.current().id == id)
            .ok_or(SessionError::JobNotFound(id))
    }

    /// Set a job's schedule, gated by the lexical schedule validator.
    pub fn set_schedule(&mut self, id: i64, schedule: &str) -> Result<(), SessionError> {
        if !is_valid_schedule_spec(schedule) {
            return Err(SessionError::validation(
                "schedule",
                format!("not a valid cron spec: {schedule:?}"),
            ));
        }
        self.proxy_mut(id)?.current_mut().schedule = schedule.to_string();
        Ok(())
    }

    /// Turn a job off or back on.
    pub fn set_disabled(&mut self, id: i64, disabled: bool) -> Result<(), SessionError> {
        self.proxy_mut(id)?.current_mut().disabled = disabled;
        Ok(())
    }

    /// Whether any proxy diverged from its merge-time snapshot.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.proxies.iter().any(Proxy::is_modified)
    }

    /// The document that should be persisted: the session's base with the
    /// jobs section replaced by the extraction result. Every other section
    /// passes through untouched, so editing jobs never clobbers record APIs.
    #[must_use]
    pub fn extract_document(&self) -> ConfigDocument {
        self.base.with_system_jobs(extract(&self.proxies))
    }

    /// Extract and write the full document.
    ///
    /// On transport failure the session is left intact so the user can
    /// retry without re-entering edits.
    pub async fn commit<S>(&self, store: &S) -> Result<ConfigDocument, SessionError>
    where
        S: ConfigStore + ?Sized,
    {
        let document = self.extract_document();
        store.store(&document).await?;
        tracing::debug!(
            jobs = document.system_jobs.len(),
            "job edit session committed"
        );
        Ok(document)
    }

    /// Trigger an immediate execution of a job the scheduler reported.
    ///
    /// Does not touch session state; callers wanting fresh telemetry open a
    /// new session afterwards.
    pub async fn run_now<C>(
        &self,
        scheduler: &C,
        id: i64,
    ) -> Result<JobRunOutcome, SessionError>
    where
        C: SchedulerClient + ?Sized,
    {
        let proxy = self.proxy(id).ok_or(SessionError::JobNotFound(id))?;
        if proxy.live().is_none() {
            // Stale config entry; the scheduler has nothing to execute.
            return Err(SessionError::JobNotFound(id));
        }
        Ok(scheduler.run_job(id).await?)
    }
}
