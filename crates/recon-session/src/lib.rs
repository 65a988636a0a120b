//! Recon Session - edit sessions over the reconciliation core
//!
//! Wraps the pure merge/extract/document operations in asynchronous edit
//! sessions that talk to the outside world exclusively through injected
//! collaborators:
//!
//! - [`ConfigStore`]: fetches and atomically replaces the persisted document
//! - [`SchedulerClient`]: reports live job status and triggers executions
//! - [`SqlPredicateValidator`]: stands in for the external SQL parser
//!
//! # Example
//!
//! ```rust,ignore
//! use recon_session::JobEditSession;
//!
//! let mut session = JobEditSession::open(&store, &scheduler).await?;
//! session.set_schedule(4, "0 0 3 * * *")?;
//! session.commit(&store).await?;
//! ```
//!
//! A session owns its proxies exclusively until extraction; re-running the
//! merge means opening a fresh, independent session.

#![warn(unreachable_pub)]

pub mod client;
pub mod error;
pub mod jobs;
pub mod records;

pub use client::{ConfigStore, JobRunOutcome, SchedulerClient, SqlPredicateValidator};
pub use error::{SessionError, TransportError};
pub use jobs::JobEditSession;
pub use records::{RecordApiDraft, RecordApiSession};
