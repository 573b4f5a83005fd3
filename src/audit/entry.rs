//! Audit entry data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Update,
    Delete,
    Import,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Update => write!(f, "UPDATE"),
            Operation::Delete => write!(f, "DELETE"),
            Operation::Import => write!(f, "IMPORT"),
        }
    }
}

/// Types of entities that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Transaction,
    Budget,
    SavingsGoal,
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityType::Transaction => write!(f, "Transaction"),
            EntityType::Budget => write!(f, "Budget"),
            EntityType::SavingsGoal => write!(f, "SavingsGoal"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    pub operation: Operation,

    pub entity_type: EntityType,

    /// Natural key of the entity (category, goal name, or transaction summary)
    pub entity_id: String,

    /// JSON representation of the entity before the operation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    /// JSON representation of the entity after the operation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,

    /// Short human-readable note
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl AuditEntry {
    pub fn create<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity: &T,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Create,
            entity_type,
            entity_id: entity_id.into(),
            before: None,
            after: serde_json::to_value(entity).ok(),
            summary: None,
        }
    }

    pub fn update<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        before: &T,
        after: &T,
        summary: Option<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Update,
            entity_type,
            entity_id: entity_id.into(),
            before: serde_json::to_value(before).ok(),
            after: serde_json::to_value(after).ok(),
            summary,
        }
    }

    pub fn delete<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity: &T,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Delete,
            entity_type,
            entity_id: entity_id.into(),
            before: serde_json::to_value(entity).ok(),
            after: None,
            summary: None,
        }
    }

    /// A batch of transactions brought in from a file
    pub fn import(source: impl Into<String>, imported: usize, skipped: usize) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Import,
            entity_type: EntityType::Transaction,
            entity_id: source.into(),
            before: None,
            after: None,
            summary: Some(format!("{} imported, {} skipped", imported, skipped)),
        }
    }

    /// Format for display in a terminal
    pub fn format_human_readable(&self) -> String {
        let mut line = format!(
            "{} {} {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.operation,
            self.entity_type,
            self.entity_id
        );
        if let Some(summary) = &self.summary {
            line.push_str(&format!(" ({})", summary));
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_entry() {
        let entry = AuditEntry::create(EntityType::Budget, "Food", &json!({"amount": 100}));
        assert_eq!(entry.operation, Operation::Create);
        assert!(entry.before.is_none());
        assert_eq!(entry.after, Some(json!({"amount": 100})));
    }

    #[test]
    fn test_import_entry_readable() {
        let entry = AuditEntry::import("bank.csv", 3, 1);
        let line = entry.format_human_readable();
        assert!(line.contains("IMPORT Transaction bank.csv"));
        assert!(line.contains("3 imported, 1 skipped"));
    }

    #[test]
    fn test_serialization_omits_empty_fields() {
        let entry = AuditEntry::delete(EntityType::SavingsGoal, "Car", &json!({"months": 3}));
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["entity_type"], "savings_goal");
        assert!(value.get("after").is_none());
        assert!(value.get("summary").is_none());
    }
}
