//! Service API trait.
//!
//! Defines the three calls the client makes against the remote service.
//! The HTTP implementation lives in `workflowy-client`; tests substitute an
//! in-memory fake.

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::Result;
use crate::tree::InitializationData;

/// Form body of a push-and-poll request, minus the protocol version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushPollRequest {
    pub client_id: String,
    /// Owner id rendered as a decimal string.
    pub crosscheck_user_id: String,
    /// Fresh id per request.
    pub push_poll_id: String,
    /// JSON-encoded operation batches.
    pub push_poll_data: String,
}

impl PushPollRequest {
    /// Form fields in the order they are sent.
    pub fn form_fields(&self, client_version: &str) -> Vec<(&'static str, String)> {
        vec![
            ("client_id", self.client_id.clone()),
            ("crosscheck_user_id", self.crosscheck_user_id.clone()),
            ("push_poll_id", self.push_poll_id.clone()),
            ("client_version", client_version.to_string()),
            ("push_poll_data", self.push_poll_data.clone()),
        ]
    }
}

/// Remote calls made by [`crate::client::WorkflowyClient`].
///
/// Every call is a single blocking request/response from the caller's point
/// of view; implementations must not retry.
#[async_trait]
pub trait WorkflowyApi: Send + Sync {
    /// Logs in with credentials and returns the session token.
    ///
    /// # Returns
    ///
    /// - `Ok(String)`: value of the `sessionid` cookie
    /// - `Err(AuthenticationFailed)`: no redirect or no session cookie
    /// - `Err(Transport)`: the request could not be sent
    async fn login(&self, username: &str, password: &str) -> Result<String>;

    /// Fetches the full document tree and session metadata.
    async fn fetch_initialization_data(&self, session: &str) -> Result<InitializationData>;

    /// Submits one push-and-poll request.
    ///
    /// # Returns
    ///
    /// - `Ok(())`: the server accepted the batch
    /// - `Err(_)`: transport failure or non-success status; nothing applied
    async fn push_and_poll(&self, session: &str, request: &PushPollRequest) -> Result<()>;
}

#[async_trait]
impl<T: WorkflowyApi + ?Sized> WorkflowyApi for Arc<T> {
    async fn login(&self, username: &str, password: &str) -> Result<String> {
        (**self).login(username, password).await
    }

    async fn fetch_initialization_data(&self, session: &str) -> Result<InitializationData> {
        (**self).fetch_initialization_data(session).await
    }

    async fn push_and_poll(&self, session: &str, request: &PushPollRequest) -> Result<()> {
        (**self).push_and_poll(session, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_fields() {
        let request = PushPollRequest {
            client_id: "client".to_string(),
            crosscheck_user_id: "42".to_string(),
            push_poll_id: "ABCDEFG".to_string(),
            push_poll_data: "[]".to_string(),
        };

        let fields = request.form_fields("18");
        let names: Vec<&str> = fields.iter().map(|(name, _)| *name).collect();
        assert_eq!(
            names,
            vec![
                "client_id",
                "crosscheck_user_id",
                "push_poll_id",
                "client_version",
                "push_poll_data"
            ]
        );
        assert_eq!(fields[1].1, "42");
        assert_eq!(fields[3].1, "18");
    }
}
