//! Push-and-poll payload.

use serde::{Deserialize, Serialize};

use super::model::Operation;
use crate::error::Result;

/// One batch of operations anchored at the last known transaction.
///
/// The endpoint expects a JSON array of batches; the client always sends
/// exactly one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationBatch {
    pub most_recent_operation_transaction_id: String,
    pub operations: Vec<Operation>,
}

impl OperationBatch {
    pub fn new(most_recent_transaction_id: impl Into<String>, operations: Vec<Operation>) -> Self {
        Self {
            most_recent_operation_transaction_id: most_recent_transaction_id.into(),
            operations,
        }
    }

    /// Encodes the `push_poll_data` form field: `[ <this batch> ]`.
    pub fn to_push_poll_data(&self) -> Result<String> {
        Ok(serde_json::to_string(&[self])?)
    }

    /// Decodes a `push_poll_data` field back into its batches.
    pub fn parse_push_poll_data(data: &str) -> Result<Vec<OperationBatch>> {
        Ok(serde_json::from_str(data)?)
    }
}
