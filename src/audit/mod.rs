//! Audit logging for Tally
//!
//! Every create, update and delete of an expense, budget, credit card or
//! payment is appended to `audit.log` as one JSON object per line, with the
//! entity's state before and after the change.

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
