//! Initialization data DTOs.
//!
//! Mirrors the JSON returned by `get_initialization_data`. Only the fields
//! the client needs are declared; everything else is ignored.

use serde::{Deserialize, Deserializer, Serialize};

use super::model::{Node, Tree};
use crate::error::{Result, WorkflowyError};

/// Top-level initialization document.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InitializationDataDTO {
    project_tree_data: ProjectTreeDataDTO,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectTreeDataDTO {
    client_id: String,
    main_project_tree_info: MainProjectTreeInfoDTO,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MainProjectTreeInfoDTO {
    owner_id: i64,
    initial_most_recent_operation_transaction_id: String,
    /// Absent on malformed payloads; surfaced later as a lookup error.
    #[serde(default)]
    root_project_children: Option<Vec<NodeDTO>>,
}

/// One node as sent by the service.
#[derive(Debug, Clone, Deserialize)]
struct NodeDTO {
    id: String,
    #[serde(rename = "nm")]
    name: String,
    /// Completion is signalled by the presence of `cp`, whatever its value.
    #[serde(rename = "cp", default, deserialize_with = "field_present")]
    completed: bool,
    #[serde(rename = "no", default)]
    description: Option<String>,
    /// Absent and `null` both mean "no children array".
    #[serde(rename = "ch", default)]
    children: Option<Vec<NodeDTO>>,
}

fn field_present<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    serde::de::IgnoredAny::deserialize(deserializer)?;
    Ok(true)
}

impl From<NodeDTO> for Node {
    fn from(dto: NodeDTO) -> Self {
        Node {
            id: dto.id,
            name: dto.name,
            completed: dto.completed,
            description: dto.description,
            children: dto
                .children
                .map(|children| children.into_iter().map(Node::from).collect()),
        }
    }
}

/// Session metadata and document tree extracted from one fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitializationData {
    /// Client identifier assigned by the server.
    pub client_id: String,
    /// Owner (user) identifier, echoed back as `crosscheck_user_id`.
    pub owner_id: i64,
    /// Last transaction the server knows about.
    pub most_recent_transaction_id: String,
    /// `None` when the payload carried no `rootProjectChildren`.
    pub tree: Option<Tree>,
}

impl InitializationData {
    /// Parses a raw response body.
    pub fn from_json(body: &str) -> Result<Self> {
        let dto: InitializationDataDTO = serde_json::from_str(body)
            .map_err(|e| WorkflowyError::malformed_response(e.to_string()))?;
        Ok(dto.into())
    }

    /// Converts an already-parsed JSON document.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let dto: InitializationDataDTO = serde_json::from_value(value)
            .map_err(|e| WorkflowyError::malformed_response(e.to_string()))?;
        Ok(dto.into())
    }
}

impl From<InitializationDataDTO> for InitializationData {
    fn from(dto: InitializationDataDTO) -> Self {
        let info = dto.project_tree_data.main_project_tree_info;
        Self {
            client_id: dto.project_tree_data.client_id,
            owner_id: info.owner_id,
            most_recent_transaction_id: info.initial_most_recent_operation_transaction_id,
            tree: info
                .root_project_children
                .map(|children| Tree::new(children.into_iter().map(Node::from).collect())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_full_payload() {
        let body = json!({
            "projectTreeData": {
                "clientId": "2024-01-01 10:00:00.000000",
                "mainProjectTreeInfo": {
                    "ownerId": 42,
                    "initialMostRecentOperationTransactionId": "txn-9",
                    "rootProjectChildren": [
                        {
                            "id": "a",
                            "nm": "A",
                            "no": "d",
                            "lm": 1234,
                            "ch": [
                                { "id": "b", "nm": "B", "cp": 5678 }
                            ]
                        }
                    ]
                }
            }
        });

        let data = InitializationData::from_value(body).unwrap();
        assert_eq!(data.client_id, "2024-01-01 10:00:00.000000");
        assert_eq!(data.owner_id, 42);
        assert_eq!(data.most_recent_transaction_id, "txn-9");

        let tree = data.tree.expect("tree should be present");
        let a = &tree.children[0];
        assert_eq!(a.name, "A");
        assert_eq!(a.description.as_deref(), Some("d"));
        assert!(!a.completed);
        let b = &a.child_nodes()[0];
        assert_eq!(b.name, "B");
        assert!(b.completed);
        assert!(b.children.is_none());
    }

    #[test]
    fn test_missing_root_children_yields_no_tree() {
        let body = r#"{
            "projectTreeData": {
                "clientId": "c",
                "mainProjectTreeInfo": {
                    "ownerId": 1,
                    "initialMostRecentOperationTransactionId": "t"
                }
            }
        }"#;

        let data = InitializationData::from_json(body).unwrap();
        assert!(data.tree.is_none());
    }

    #[test]
    fn test_missing_metadata_is_malformed() {
        let body = r#"{ "projectTreeData": { "mainProjectTreeInfo": {} } }"#;
        let err = InitializationData::from_json(body).unwrap_err();
        assert!(matches!(err, WorkflowyError::MalformedResponse(_)));
    }

    #[test]
    fn test_wrong_owner_type_is_malformed() {
        let body = json!({
            "projectTreeData": {
                "clientId": "c",
                "mainProjectTreeInfo": {
                    "ownerId": "not-a-number",
                    "initialMostRecentOperationTransactionId": "t",
                    "rootProjectChildren": []
                }
            }
        });
        let err = InitializationData::from_value(body).unwrap_err();
        assert!(matches!(err, WorkflowyError::MalformedResponse(_)));
    }

    #[test]
    fn test_null_children_read_as_absent() {
        let body = json!({
            "projectTreeData": {
                "clientId": "c",
                "mainProjectTreeInfo": {
                    "ownerId": 1,
                    "initialMostRecentOperationTransactionId": "t",
                    "rootProjectChildren": [
                        { "id": "a", "nm": "A", "ch": null },
                        { "id": "b", "nm": "B", "ch": [] }
                    ]
                }
            }
        });

        let tree = InitializationData::from_value(body).unwrap().tree.unwrap();
        assert!(tree.children[0].children.is_none());
        assert_eq!(tree.children[1].children, Some(Vec::new()));
    }

    #[test]
    fn test_null_completion_marker_counts_as_completed() {
        let body = json!({
            "projectTreeData": {
                "clientId": "c",
                "mainProjectTreeInfo": {
                    "ownerId": 1,
                    "initialMostRecentOperationTransactionId": "t",
                    "rootProjectChildren": [ { "id": "x", "nm": "X", "cp": null } ]
                }
            }
        });
        let data = InitializationData::from_value(body).unwrap();
        assert!(data.tree.unwrap().children[0].completed);
    }
}
