use anyhow::{Context, Result};
use colored::Colorize;
use workflowy_client::{SecretConfig, WorkflowyConfig, get_session};

pub async fn run(username: Option<String>, password: Option<String>, save: bool) -> Result<()> {
    let config = WorkflowyConfig::load().context("Failed to load config.toml")?;
    let secrets = SecretConfig::load().context("Failed to load secret.json")?;

    let username = username
        .or_else(|| secrets.username.clone())
        .context("No username given (use --username or WORKFLOWY_USERNAME)")?;
    let password = password
        .or_else(|| secrets.password.clone())
        .context("No password given (use --password or WORKFLOWY_PASSWORD)")?;

    let session = get_session(&config, &username, &password)
        .await
        .context("Login failed")?;

    if save {
        let path = SecretConfig::default_path()?;
        // Keep the file limited to the token; credentials passed on the
        // command line are not persisted.
        let stored = SecretConfig {
            session: Some(session.clone()),
            ..SecretConfig::load_from(&path)?
        };
        stored
            .save_to(&path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        eprintln!("{} session saved to {}", "✓".green(), path.display());
    }

    println!("{}", session);
    Ok(())
}
