use anyhow::{Context, Result, bail};
use colored::Colorize;
use tracing::{debug, warn};
use workflowy_client::HttpWorkflowyApi;
use workflowy_core::WorkflowyClient;

use super::session;

/// Single-target operations.
#[derive(Debug, Clone, Copy)]
pub enum Mark {
    Complete,
    Uncomplete,
    Delete,
}

pub async fn add(
    session_flag: Option<String>,
    parent: &[String],
    name: &str,
    description: Option<&str>,
    priority: u32,
) -> Result<()> {
    let mut client = session::open(session_flag).await?;

    let parent_id = if parent.is_empty() {
        None
    } else {
        Some(resolve(&client, parent)?)
    };
    let item_id = client.add_create(name, priority, parent_id.as_deref(), description);

    submit(&mut client).await?;
    println!("{}", item_id);
    Ok(())
}

pub async fn edit(
    session_flag: Option<String>,
    path: &[String],
    name: Option<&str>,
    description: Option<&str>,
    priority: Option<u32>,
) -> Result<()> {
    if name.is_none() && description.is_none() && priority.is_none() {
        bail!("Nothing to change: pass --name, --description or --priority");
    }

    let mut client = session::open(session_flag).await?;
    let item_id = resolve(&client, path)?;
    client.add_edit(&item_id, name, priority, None, description);

    submit(&mut client).await
}

pub async fn mark(session_flag: Option<String>, path: &[String], mark: Mark) -> Result<()> {
    let mut client = session::open(session_flag).await?;
    let item_id = resolve(&client, path)?;

    match mark {
        Mark::Complete => client.add_complete(&item_id),
        Mark::Uncomplete => client.add_uncomplete(&item_id),
        Mark::Delete => client.add_delete(&item_id),
    }

    submit(&mut client).await
}

fn resolve(client: &WorkflowyClient<HttpWorkflowyApi>, path: &[String]) -> Result<String> {
    let item = client
        .lookup(path)
        .with_context(|| format!("Failed to look up '{}'", path.join(" / ")))?;
    Ok(item.id)
}

async fn submit(client: &mut WorkflowyClient<HttpWorkflowyApi>) -> Result<()> {
    let count = client.pending().len();
    debug!(operations = count, "Submitting queued operations");
    match client.submit().await {
        Ok(()) => {
            eprintln!("{} applied {} operation(s)", "✓".green(), count);
            Ok(())
        }
        Err(err) if err.operations_applied() => {
            warn!(error = %err, "Tree refresh failed after submission");
            eprintln!(
                "{} applied {} operation(s), but the tree could not be refreshed: {}",
                "!".yellow(),
                count,
                err
            );
            Ok(())
        }
        Err(err) => Err(err).context("Failed to submit changes"),
    }
}
