//! Recon Model - persisted config document and live-state types
//!
//! The data model for a declarative backend configuration reconciled against
//! live runtime state:
//!
//! - [`SystemJobSpec`] / [`LiveJob`]: the scheduled-job entity family,
//!   wired into the generic engine via its `Keyed`/`EditEq`/`LiveState` impls
//! - [`RecordApiConfig`] + [`PermissionSet`]: record-API exposure rules
//!   keyed by human-chosen name
//! - [`ConfigDocument`]: the enclosing persisted aggregate with
//!   copy-on-write upsert/remove semantics
//! - [`is_valid_schedule_spec`]: the lexical cron boundary guard
//!
//! Wire format follows the persisted document: camelCase member names,
//! SCREAMING permission flags.

#![warn(unreachable_pub)]

pub mod acl;
pub mod document;
pub mod job;
pub mod record_api;
pub mod schedule;

pub use acl::{EntityKind, PermissionFlag, PermissionSet};
pub use document::ConfigDocument;
pub use job::{LastRun, LiveJob, SystemJobSpec};
pub use record_api::{ConflictResolutionStrategy, RecordAction, RecordApiConfig};
pub use schedule::is_valid_schedule_spec;
