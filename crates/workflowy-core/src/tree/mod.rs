//! Document tree domain module.
//!
//! # Module Structure
//!
//! - `model`: In-memory tree (`Tree`, `Node`) and lookup results (`Item`)
//! - `dto`: Wire format of the initialization data and its conversion
//! - `lookup`: Path-based lookup over the tree
//!
//! # Usage
//!
//! ```ignore
//! use workflowy_core::tree::{InitializationData, Tree, Item};
//! ```

mod dto;
mod lookup;
mod model;

// Re-export public API
pub use dto::InitializationData;
pub use lookup::{locate, lookup};
pub use model::{Item, Node, Tree};
