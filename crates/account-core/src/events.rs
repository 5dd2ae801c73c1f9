//! Change events - the envelope propagated to external consumers
//!
//! One event is produced per primary mutation and handed to the queue
//! publisher. Delivery is at-least-once; there is no schema versioning on
//! the wire format.

use serde::{Deserialize, Serialize};

/// Operation label carried on the wire
///
/// Re-activation of a soft-deleted account deliberately reuses the `create`
/// label. Consumers treat it as the account coming (back) into existence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeOp {
    Create,
    Update,
    Delete,
}

impl ChangeOp {
    /// Get the wire label
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

impl std::fmt::Display for ChangeOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JSON envelope `{ operation, entity }` sent as the raw queue payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub operation: ChangeOp,
    /// Payload snapshot of the mutated entity
    pub entity: serde_json::Value,
}

impl ChangeEvent {
    /// Create a new event from a pre-built payload
    pub fn new(operation: ChangeOp, entity: serde_json::Value) -> Self {
        Self { operation, entity }
    }

    /// Create a new event by snapshotting a serializable entity
    pub fn for_entity<T: Serialize>(
        operation: ChangeOp,
        entity: &T,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self { operation, entity: serde_json::to_value(entity)? })
    }

    /// Serialize to the wire format
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
