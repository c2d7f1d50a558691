use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "workflowy")]
#[command(about = "Workflowy CLI - browse and edit your outline from the terminal", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v: info, -vv: debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Session token (overrides secret.json and WORKFLOWY_SESSION)
    #[arg(long, global = true)]
    session: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and print the session token
    Login {
        /// Account email (falls back to secret.json / WORKFLOWY_USERNAME)
        #[arg(long)]
        username: Option<String>,
        /// Account password (falls back to secret.json / WORKFLOWY_PASSWORD)
        #[arg(long)]
        password: Option<String>,
        /// Store the token in ~/.config/workflowy/secret.json
        #[arg(long)]
        save: bool,
    },
    /// Show one item, addressed by the names on the way from the root
    Show {
        #[arg(required = true)]
        path: Vec<String>,
    },
    /// Print the outline below the root or below an item
    Tree { path: Vec<String> },
    /// Create an item under the given parent path (top level when empty)
    Add {
        parent: Vec<String>,
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, default_value_t = 0)]
        priority: u32,
    },
    /// Change the name, description or position of an item
    Edit {
        #[arg(required = true)]
        path: Vec<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        priority: Option<u32>,
    },
    /// Mark an item complete
    Complete {
        #[arg(required = true)]
        path: Vec<String>,
    },
    /// Clear an item's completion
    Uncomplete {
        #[arg(required = true)]
        path: Vec<String>,
    },
    /// Delete an item and everything below it
    Delete {
        #[arg(required = true)]
        path: Vec<String>,
    },
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let session = cli.session;
    match cli.command {
        Commands::Login {
            username,
            password,
            save,
        } => commands::login::run(username, password, save).await?,
        Commands::Show { path } => commands::read::show(session, &path).await?,
        Commands::Tree { path } => commands::read::tree(session, &path).await?,
        Commands::Add {
            parent,
            name,
            description,
            priority,
        } => {
            commands::mutate::add(session, &parent, &name, description.as_deref(), priority).await?
        }
        Commands::Edit {
            path,
            name,
            description,
            priority,
        } => {
            commands::mutate::edit(
                session,
                &path,
                name.as_deref(),
                description.as_deref(),
                priority,
            )
            .await?
        }
        Commands::Complete { path } => {
            commands::mutate::mark(session, &path, commands::mutate::Mark::Complete).await?
        }
        Commands::Uncomplete { path } => {
            commands::mutate::mark(session, &path, commands::mutate::Mark::Uncomplete).await?
        }
        Commands::Delete { path } => {
            commands::mutate::mark(session, &path, commands::mutate::Mark::Delete).await?
        }
    }

    Ok(())
}
