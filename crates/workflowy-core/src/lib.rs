//! Core of the Workflowy client: the document tree, path lookup, the
//! pending operation queue and the session that ties them to the service.

pub mod api;
pub mod client;
pub mod error;
pub mod id;
pub mod operation;
pub mod tree;

// Re-export common types
pub use api::{PushPollRequest, WorkflowyApi};
pub use client::WorkflowyClient;
pub use error::{Result, WorkflowyError};
pub use tree::{Item, Node, Tree};
