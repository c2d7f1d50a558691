use anyhow::{Context, Result, bail};
use tracing::{debug, info};
use workflowy_client::{HttpWorkflowyApi, SecretConfig, WorkflowyConfig};
use workflowy_core::WorkflowyClient;

/// Opens a client session.
///
/// Token priority: `--session` flag > secret.json > WORKFLOWY_SESSION.
/// Without a token, stored credentials are used to log in.
pub async fn open(session_flag: Option<String>) -> Result<WorkflowyClient<HttpWorkflowyApi>> {
    let config = WorkflowyConfig::load().context("Failed to load config.toml")?;
    let secrets = SecretConfig::load().context("Failed to load secret.json")?;
    let api = HttpWorkflowyApi::new(&config)?;
    debug!(base_url = %config.base_url, "Opening Workflowy session");

    if let Some(session) = session_flag.or(secrets.session) {
        debug!("Using stored session token");
        return WorkflowyClient::connect(api, session)
            .await
            .context("Failed to fetch the Workflowy tree");
    }

    match (secrets.username, secrets.password) {
        (Some(username), Some(password)) => {
            info!(username = %username, "No session token, logging in");
            WorkflowyClient::login(api, &username, &password)
                .await
                .context("Failed to log in to Workflowy")
        }
        _ => bail!(
            "No session available. Run `workflowy login --save`, pass --session, \
             or set WORKFLOWY_SESSION"
        ),
    }
}
