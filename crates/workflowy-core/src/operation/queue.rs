//! Pending operation list.
//!
//! The builder calls only append to the list. Nothing is checked against the
//! current tree (an edit may target an id that does not exist), and the
//! list is only emptied by a successful submission or an explicit clear.

use super::model::{CreateData, EditData, NO_PARENT, Operation, TargetData};
use crate::id::new_item_id;

/// Escapes the characters the service treats as markup in names and notes.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '\'' => escaped.push_str("&#39;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&#34;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Ordered list of operations waiting to be submitted.
///
/// Insertion order is submission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationQueue {
    operations: Vec<Operation>,
}

impl OperationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a new item and returns its freshly generated id.
    ///
    /// Two operations are appended: a `create` placing the item under
    /// `parent` (or at the top level) at `priority`, immediately followed by
    /// an `edit` that sets its name and description. The follow-up edit
    /// carries no parent or priority; those are already set by the create.
    pub fn add_create(
        &mut self,
        name: &str,
        priority: u32,
        parent: Option<&str>,
        description: Option<&str>,
    ) -> String {
        let item_id = new_item_id();

        self.operations.push(Operation::Create(CreateData {
            project_id: item_id.clone(),
            parent_id: parent.unwrap_or(NO_PARENT).to_string(),
            priority,
        }));
        self.operations.push(Operation::Edit(EditData {
            project_id: item_id.clone(),
            name: Some(escape_html(name)),
            description: description.map(escape_html),
            parent_id: None,
            priority: None,
        }));

        tracing::debug!(item_id = %item_id, "Queued create");
        item_id
    }

    /// Queues an edit carrying only the supplied fields.
    pub fn add_edit(
        &mut self,
        item_id: &str,
        name: Option<&str>,
        priority: Option<u32>,
        parent: Option<&str>,
        description: Option<&str>,
    ) {
        self.operations.push(Operation::Edit(EditData {
            project_id: item_id.to_string(),
            name: name.map(escape_html),
            description: description.map(escape_html),
            parent_id: parent.map(str::to_string),
            priority,
        }));
    }

    pub fn add_delete(&mut self, item_id: &str) {
        self.operations.push(Operation::Delete(target(item_id)));
    }

    pub fn add_complete(&mut self, item_id: &str) {
        self.operations.push(Operation::Complete(target(item_id)));
    }

    pub fn add_uncomplete(&mut self, item_id: &str) {
        self.operations.push(Operation::Uncomplete(target(item_id)));
    }

    /// Queued operations in submission order.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Drops every queued operation.
    pub fn clear(&mut self) {
        self.operations.clear();
    }
}

fn target(item_id: &str) -> TargetData {
    TargetData {
        project_id: item_id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::OperationKind;

    #[test]
    fn test_create_queues_create_then_edit() {
        let mut queue = OperationQueue::new();
        let id = queue.add_create("Groceries", 0, None, Some("weekly"));

        assert_eq!(queue.len(), 2);
        match &queue.operations()[0] {
            Operation::Create(data) => {
                assert_eq!(data.project_id, id);
                assert_eq!(data.parent_id, NO_PARENT);
                assert_eq!(data.priority, 0);
            }
            other => panic!("expected create, got {other:?}"),
        }
        match &queue.operations()[1] {
            Operation::Edit(data) => {
                assert_eq!(data.project_id, id);
                assert_eq!(data.name.as_deref(), Some("Groceries"));
                assert_eq!(data.description.as_deref(), Some("weekly"));
                assert!(data.parent_id.is_none());
                assert!(data.priority.is_none());
            }
            other => panic!("expected edit, got {other:?}"),
        }
    }

    #[test]
    fn test_create_under_parent() {
        let mut queue = OperationQueue::new();
        queue.add_create("Child", 4, Some("parent-id"), None);

        match &queue.operations()[0] {
            Operation::Create(data) => {
                assert_eq!(data.parent_id, "parent-id");
                assert_eq!(data.priority, 4);
            }
            other => panic!("expected create, got {other:?}"),
        }
        match &queue.operations()[1] {
            Operation::Edit(data) => assert!(data.description.is_none()),
            other => panic!("expected edit, got {other:?}"),
        }
    }

    #[test]
    fn test_edit_includes_only_supplied_fields() {
        let mut queue = OperationQueue::new();
        queue.add_edit("item", None, Some(3), None, None);

        assert_eq!(
            queue.operations()[0],
            Operation::Edit(EditData {
                project_id: "item".to_string(),
                priority: Some(3),
                ..Default::default()
            })
        );
    }

    #[test]
    fn test_single_target_operations_preserve_order() {
        let mut queue = OperationQueue::new();
        queue.add_delete("a");
        queue.add_complete("a");
        queue.add_uncomplete("b");

        let kinds: Vec<_> = queue.operations().iter().map(Operation::kind).collect();
        assert_eq!(
            kinds,
            vec![
                OperationKind::Delete,
                OperationKind::Complete,
                OperationKind::Uncomplete
            ]
        );
        assert_eq!(queue.operations()[2].item_id(), "b");
    }

    #[test]
    fn test_names_are_escaped() {
        assert_eq!(
            escape_html(r#"Tom & Jerry's <b>"show"</b>"#),
            "Tom &amp; Jerry&#39;s &lt;b&gt;&#34;show&#34;&lt;/b&gt;"
        );

        let mut queue = OperationQueue::new();
        queue.add_edit("item", Some("a<b"), None, None, Some("x & y"));
        match &queue.operations()[0] {
            Operation::Edit(data) => {
                assert_eq!(data.name.as_deref(), Some("a&lt;b"));
                assert_eq!(data.description.as_deref(), Some("x &amp; y"));
            }
            other => panic!("expected edit, got {other:?}"),
        }
    }

    #[test]
    fn test_clear() {
        let mut queue = OperationQueue::new();
        queue.add_delete("a");
        queue.clear();
        assert!(queue.is_empty());
    }
}
