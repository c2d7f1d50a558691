//! Operation domain model.
//!
//! Each operation serializes to `{"type": <kind>, "data": {...}}`, which is
//! the shape the push-and-poll endpoint expects.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Parent id sent for items created at the top level.
pub const NO_PARENT: &str = "None";

/// A single queued mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum Operation {
    /// Creates a new, empty item under a parent.
    Create(CreateData),
    /// Changes any subset of an item's fields.
    Edit(EditData),
    /// Deletes an item and its subtree.
    Delete(TargetData),
    /// Marks an item complete.
    Complete(TargetData),
    /// Clears an item's completion.
    Uncomplete(TargetData),
}

/// Discriminant of an [`Operation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Create,
    Edit,
    Delete,
    Complete,
    Uncomplete,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OperationKind::Create => "create",
            OperationKind::Edit => "edit",
            OperationKind::Delete => "delete",
            OperationKind::Complete => "complete",
            OperationKind::Uncomplete => "uncomplete",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateData {
    #[serde(rename = "projectid")]
    pub project_id: String,
    /// Parent item id, or [`NO_PARENT`].
    #[serde(rename = "parentid")]
    pub parent_id: String,
    pub priority: u32,
}

/// Edit payload; absent fields are left untouched by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditData {
    #[serde(rename = "projectid")]
    pub project_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "parentid", default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetData {
    #[serde(rename = "projectid")]
    pub project_id: String,
}

impl Operation {
    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::Create(_) => OperationKind::Create,
            Operation::Edit(_) => OperationKind::Edit,
            Operation::Delete(_) => OperationKind::Delete,
            Operation::Complete(_) => OperationKind::Complete,
            Operation::Uncomplete(_) => OperationKind::Uncomplete,
        }
    }

    /// Id of the item this operation targets.
    pub fn item_id(&self) -> &str {
        match self {
            Operation::Create(data) => &data.project_id,
            Operation::Edit(data) => &data.project_id,
            Operation::Delete(data) | Operation::Complete(data) | Operation::Uncomplete(data) => {
                &data.project_id
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_wire_shape() {
        let op = Operation::Create(CreateData {
            project_id: "item-1".to_string(),
            parent_id: NO_PARENT.to_string(),
            priority: 2,
        });

        assert_eq!(
            serde_json::to_value(&op).unwrap(),
            json!({
                "type": "create",
                "data": { "projectid": "item-1", "parentid": "None", "priority": 2 }
            })
        );
    }

    #[test]
    fn test_edit_omits_absent_fields() {
        let op = Operation::Edit(EditData {
            project_id: "item-1".to_string(),
            name: Some("Renamed".to_string()),
            ..Default::default()
        });

        assert_eq!(
            serde_json::to_value(&op).unwrap(),
            json!({ "type": "edit", "data": { "projectid": "item-1", "name": "Renamed" } })
        );
    }

    #[test]
    fn test_complete_wire_shape() {
        let op = Operation::Complete(TargetData {
            project_id: "item-1".to_string(),
        });
        assert_eq!(
            serde_json::to_value(&op).unwrap(),
            json!({ "type": "complete", "data": { "projectid": "item-1" } })
        );
        assert_eq!(op.kind().to_string(), "complete");
        assert_eq!(op.item_id(), "item-1");
    }

    #[test]
    fn test_parse_back_reproduces_operation() {
        let ops = vec![
            Operation::Edit(EditData {
                project_id: "e".to_string(),
                name: Some("n".to_string()),
                description: Some("d".to_string()),
                parent_id: Some("p".to_string()),
                priority: Some(7),
            }),
            Operation::Uncomplete(TargetData {
                project_id: "u".to_string(),
            }),
        ];

        let encoded = serde_json::to_string(&ops).unwrap();
        let decoded: Vec<Operation> = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, ops);
    }
}
