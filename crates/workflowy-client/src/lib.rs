//! HTTP side of the Workflowy client: the reqwest implementation of
//! [`workflowy_core::WorkflowyApi`] and configuration loading.

pub mod config;
pub mod http_api;

pub use config::{SecretConfig, WorkflowyConfig};
pub use http_api::HttpWorkflowyApi;

use workflowy_core::{Result, WorkflowyApi, WorkflowyClient};

/// Logs in with credentials and returns the session token.
pub async fn get_session(config: &WorkflowyConfig, username: &str, password: &str) -> Result<String> {
    HttpWorkflowyApi::new(config)?.login(username, password).await
}

/// Connects with an existing session token and fetches the tree.
pub async fn connect(
    config: &WorkflowyConfig,
    session: impl Into<String>,
) -> Result<WorkflowyClient<HttpWorkflowyApi>> {
    WorkflowyClient::connect(HttpWorkflowyApi::new(config)?, session).await
}
