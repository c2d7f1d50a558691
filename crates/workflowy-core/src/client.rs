//! Session state and orchestration.
//!
//! `WorkflowyClient` owns everything one user session needs: the session
//! token, the server-issued metadata, the last fetched tree and the list of
//! pending operations. All methods take `&self` or `&mut self`, so a single
//! instance is never driven from two places at once; callers that share one
//! must serialize access themselves (e.g. behind a `tokio::sync::Mutex`).

use tracing::{debug, info, warn};

use crate::api::{PushPollRequest, WorkflowyApi};
use crate::error::{Result, WorkflowyError};
use crate::id::new_poll_id;
use crate::operation::{Operation, OperationBatch, OperationQueue};
use crate::tree::{InitializationData, Item, Node, Tree, locate, lookup};

/// A logged-in Workflowy session.
pub struct WorkflowyClient<A: WorkflowyApi> {
    api: A,
    session: String,
    client_id: String,
    owner_id: i64,
    most_recent_transaction_id: String,
    /// `None` when the last fetch carried no tree.
    tree: Option<Tree>,
    pending: OperationQueue,
    /// Set when operations were applied but the refresh afterwards failed.
    stale: bool,
}

impl<A: WorkflowyApi> WorkflowyClient<A> {
    /// Creates a client for an existing session token and fetches the tree.
    pub async fn connect(api: A, session: impl Into<String>) -> Result<Self> {
        let session = session.into();
        let data = api.fetch_initialization_data(&session).await?;

        let mut client = Self {
            api,
            session,
            client_id: String::new(),
            owner_id: 0,
            most_recent_transaction_id: String::new(),
            tree: None,
            pending: OperationQueue::new(),
            stale: false,
        };
        client.apply(data);
        Ok(client)
    }

    /// Logs in with credentials, then behaves like [`Self::connect`].
    pub async fn login(api: A, username: &str, password: &str) -> Result<Self> {
        let session = api.login(username, password).await?;
        info!("Logged in to Workflowy");
        Self::connect(api, session).await
    }

    /// Re-fetches the tree and metadata, replacing the previous state wholesale.
    pub async fn refresh(&mut self) -> Result<()> {
        let data = self.api.fetch_initialization_data(&self.session).await?;
        self.apply(data);
        Ok(())
    }

    fn apply(&mut self, data: InitializationData) {
        debug!(
            client_id = %data.client_id,
            transaction = %data.most_recent_transaction_id,
            nodes = data.tree.as_ref().map(Tree::len).unwrap_or(0),
            "Applied initialization data"
        );
        self.client_id = data.client_id;
        self.owner_id = data.owner_id;
        self.most_recent_transaction_id = data.most_recent_transaction_id;
        self.tree = data.tree;
        self.stale = false;
    }

    // ============================================================================
    // State accessors
    // ============================================================================

    pub fn session(&self) -> &str {
        &self.session
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn owner_id(&self) -> i64 {
        self.owner_id
    }

    pub fn most_recent_transaction_id(&self) -> &str {
        &self.most_recent_transaction_id
    }

    /// The last fetched tree, if the server sent one.
    pub fn tree(&self) -> Option<&Tree> {
        self.tree.as_ref()
    }

    /// True when the server state moved on without a successful refresh.
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    // ============================================================================
    // Lookup
    // ============================================================================

    fn require_tree(&self) -> Result<&Tree> {
        self.tree
            .as_ref()
            .ok_or_else(|| WorkflowyError::malformed_tree("no rootProjectChildren in workflowy data"))
    }

    /// Finds the item at `path`, matching names exactly from the root.
    pub fn lookup<S: AsRef<str>>(&self, path: &[S]) -> Result<Item> {
        lookup(&self.require_tree()?.children, path)
    }

    /// Finds the node at `path` without materializing it.
    pub fn locate<S: AsRef<str>>(&self, path: &[S]) -> Result<&Node> {
        let (_, node) = locate(&self.require_tree()?.children, path)?;
        Ok(node)
    }

    // ============================================================================
    // Operation builder
    // ============================================================================

    /// Queues a new item and returns its id. See [`OperationQueue::add_create`].
    pub fn add_create(
        &mut self,
        name: &str,
        priority: u32,
        parent: Option<&str>,
        description: Option<&str>,
    ) -> String {
        self.pending.add_create(name, priority, parent, description)
    }

    pub fn add_edit(
        &mut self,
        item_id: &str,
        name: Option<&str>,
        priority: Option<u32>,
        parent: Option<&str>,
        description: Option<&str>,
    ) {
        self.pending
            .add_edit(item_id, name, priority, parent, description);
    }

    pub fn add_delete(&mut self, item_id: &str) {
        self.pending.add_delete(item_id);
    }

    pub fn add_complete(&mut self, item_id: &str) {
        self.pending.add_complete(item_id);
    }

    pub fn add_uncomplete(&mut self, item_id: &str) {
        self.pending.add_uncomplete(item_id);
    }

    /// Operations queued since the last successful submission.
    pub fn pending(&self) -> &[Operation] {
        self.pending.operations()
    }

    /// Drops queued operations without sending them.
    pub fn clear_pending(&mut self) {
        self.pending.clear();
    }

    // ============================================================================
    // Submission
    // ============================================================================

    /// Sends every pending operation in one request, then refreshes.
    ///
    /// On failure the pending list is left exactly as it was, so calling
    /// `submit` again resends the same batch. After the server accepts the
    /// batch the list is cleared; a failed refresh at that point is
    /// reported as [`WorkflowyError::RefreshAfterSubmit`].
    pub async fn submit(&mut self) -> Result<()> {
        if self.pending.is_empty() {
            debug!("No pending operations to submit");
            return Ok(());
        }

        let batch = OperationBatch::new(
            self.most_recent_transaction_id.clone(),
            self.pending.operations().to_vec(),
        );
        let request = PushPollRequest {
            client_id: self.client_id.clone(),
            crosscheck_user_id: self.owner_id.to_string(),
            push_poll_id: new_poll_id(),
            push_poll_data: batch
                .to_push_poll_data()
                .map_err(|e| WorkflowyError::submission_failed(None, e.to_string()))?,
        };

        let count = batch.operations.len();
        if let Err(err) = self.api.push_and_poll(&self.session, &request).await {
            warn!(operations = count, error = %err, "Submission failed");
            return Err(match err {
                WorkflowyError::SubmissionFailed { .. } => err,
                other => WorkflowyError::submission_failed(None, other.to_string()),
            });
        }

        info!(operations = count, push_poll_id = %request.push_poll_id, "Submitted operations");
        self.pending.clear();

        if let Err(err) = self.refresh().await {
            warn!(error = %err, "Refresh after submission failed");
            self.stale = true;
            return Err(WorkflowyError::RefreshAfterSubmit(Box::new(err)));
        }

        Ok(())
    }
}
