//! Audit logging system for fintrack
//!
//! Records every change to transactions, budgets and savings goals in an
//! append-only audit log.
//!
//! - `AuditEntry`: one operation with timestamp, entity information, and
//!   optional before/after values.
//! - `AuditLogger`: appends entries to the log file as JSON lines.

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
