//! Mutation operation domain module.
//!
//! # Module Structure
//!
//! - `model`: Typed operation records (`Operation` and payloads)
//! - `queue`: Pending operation list and the builder calls that fill it
//! - `batch`: Wire payload for a push-and-poll submission
//!
//! # Usage
//!
//! ```ignore
//! use workflowy_core::operation::{Operation, OperationQueue, OperationBatch};
//! ```

mod batch;
mod model;
mod queue;

// Re-export public API
pub use batch::OperationBatch;
pub use model::{CreateData, EditData, NO_PARENT, Operation, OperationKind, TargetData};
pub use queue::{OperationQueue, escape_html};
