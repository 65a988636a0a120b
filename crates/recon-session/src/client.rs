//! Injected collaborator interfaces
//!
//! The session layer never owns a network client; the transport, the
//! scheduler runtime, and the SQL parser are external systems specified
//! only at these seams. Implementations suspend at the network boundary;
//! dropping the returned future cancels the call with no side effects
//! committed locally.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use recon_model::{ConfigDocument, LiveJob};

use crate::error::TransportError;

/// The backend config persistence store.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Fetch the current persisted document.
    async fn fetch(&self) -> Result<ConfigDocument, TransportError>;

    /// Replace the persisted document atomically.
    ///
    /// Always receives a complete document; the session layer never sends
    /// partial patches.
    async fn store(&self, document: &ConfigDocument) -> Result<(), TransportError>;
}

/// Result of asking the scheduler to execute a job immediately.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRunOutcome {
    /// Error reported by the job execution, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// The backend scheduler that actually executes cron jobs.
#[async_trait]
pub trait SchedulerClient: Send + Sync {
    /// Current live job list.
    async fn list_jobs(&self) -> Result<Vec<LiveJob>, TransportError>;

    /// Execute a job immediately. The side effect is external; callers
    /// refresh the live list afterwards by opening a fresh session.
    async fn run_job(&self, id: i64) -> Result<JobRunOutcome, TransportError>;
}

#[async_trait]
impl<T> ConfigStore for &T
where
    T: ConfigStore + ?Sized,
{
    async fn fetch(&self) -> Result<ConfigDocument, TransportError> {
        (**self).fetch().await
    }

    async fn store(&self, document: &ConfigDocument) -> Result<(), TransportError> {
        (**self).store(document).await
    }
}

/// External SQL-expression parser, used to vet access-rule predicates
/// before they enter the document.
pub trait SqlPredicateValidator: Send + Sync {
    /// `Ok` iff `expression` parses as a boolean SQL predicate. The error
    /// carries the parser's diagnostic for inline display.
    fn validate(&self, expression: &str) -> Result<(), String>;
}
