//! Recon Engine - keyed reconciliation core
//!
//! Merges two independently-sourced views of the same entities, a persisted
//! declarative collection and a live-observed snapshot, into one editable
//! proxy list, and computes the minimal collection to write back.
//!
//! # Core Concepts
//!
//! - [`Keyed`]: identity of a persisted spec
//! - [`LiveState`]: a runtime observation that can synthesize a default spec
//! - [`EditEq`]: structural equality over user-editable fields only
//! - [`Proxy`]: one editable entry with provenance (`is_default`)
//! - [`merge`] / [`extract`]: the two directions of the reconciliation
//!
//! # Example
//!
//! ```rust,ignore
//! use recon_engine::{merge, extract};
//!
//! let mut proxies = merge(persisted_specs, live_jobs);
//! proxies[0].current_mut().disabled = true;
//! let write_back = extract(&proxies);
//! ```
//!
//! The engine is pure and domain-agnostic: no I/O, no shared state, no
//! knowledge of what a "job" or a "record API" is.

#![warn(unreachable_pub)]

mod proxy;
mod reconcile;
mod traits;

pub use proxy::Proxy;
pub use reconcile::{extract, merge};
pub use traits::{EditEq, Keyed, LiveState};
