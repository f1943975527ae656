//! Audit logging for Bookkeeper
//!
//! Every create, update and delete of an account or transaction, and every
//! posted journal entry, is appended to `audit.log` as one JSON line with
//! before/after values. This log is the application's record of what changed.
//!
//! - `AuditEntry`: one log line (timestamp, operation, entity, states, diff)
//! - `AuditLogger`: appends and reads the JSONL file
//! - `generate_diff`: top-level change summary between two entity states

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
