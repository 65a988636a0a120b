//! Lexical schedule-spec validation
//!
//! A boundary guard applied before a schedule string is allowed into the
//! persisted document. Purely lexical: it recognizes the shape of a named
//! alias or a 6-7 field cron expression without interpreting the fields
//! (day-of-month 31 in February passes; the scheduler owns semantics).

use once_cell::sync::Lazy;
use regex::Regex;

/// One cron component: digit list, step, range, single digit, or wildcard.
const COMPONENT: &str = r"(?:\d+(?:,\d+)+|\d+[/\-]\d+|\d+|[*?])";

static SCHEDULE_SPEC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"^(?:@(?:yearly|monthly|weekly|daily|hourly)|{c}(?:\s+{c}){{5,6}})$",
        c = COMPONENT,
    ))
    .expect("schedule spec pattern is well-formed")
});

/// Whether `spec` is a recognized named alias or a 6-7 field cron expression
/// (seconds through optional year).
#[must_use]
pub fn is_valid_schedule_spec(spec: &str) -> bool {
    SCHEDULE_SPEC.is_match(spec)
}
