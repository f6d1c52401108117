//! Repairdesk CLI - Track repair tickets through the shop's stage lifecycle

use clap::Parser;
use repairdesk::cli::{Cli, Commands};
use repairdesk::errors::to_exit_code;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing; RUST_LOG wins over the flags
    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let result = run(cli).await;

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e);
            if e.is_retryable() {
                eprintln!("The change was not saved; run the same command again to retry.");
            }
            std::process::exit(to_exit_code(&e));
        }
    }
}

async fn run(cli: Cli) -> repairdesk::Result<()> {
    let cwd = cli.shop_dir.as_deref();
    match cli.command {
        Some(Commands::Init { shop_id, force }) => {
            repairdesk::cli::commands::init::run(cwd, shop_id.as_deref(), force).await
        }
        Some(Commands::Open {
            client,
            customer,
            vehicle,
            issue,
        }) => {
            repairdesk::cli::commands::open::run(cwd, &client, &customer, &vehicle, &issue).await
        }
        Some(Commands::List { json }) => repairdesk::cli::commands::list::run(cwd, json).await,
        Some(Commands::Show { id, role, json }) => {
            repairdesk::cli::commands::show::run(cwd, &id, &role, json).await
        }
        Some(Commands::Stage { id, role, to, yes }) => {
            repairdesk::cli::commands::stage::run(cwd, &id, &role, to, yes).await
        }
        Some(Commands::Stages) => repairdesk::cli::commands::stages::run().await,
        None => {
            // Default to showing help - clap handles this
            println!("Use --help for usage information");
            Ok(())
        }
    }
}
