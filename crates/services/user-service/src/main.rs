//! User Service - HTTP server for user management.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use user_service_lib::config::{ApiVariant, UserServiceConfig};

#[derive(Parser)]
#[command(name = "user-service")]
#[command(about = "User CRUD REST service")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database and start the HTTP server
    Serve {
        /// Host to bind to (overrides USER_SERVICE_HOST)
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on (overrides USER_SERVICE_PORT)
        #[arg(short, long)]
        port: Option<u16>,
        /// Endpoint set to expose (overrides API_VARIANT)
        #[arg(long, value_enum)]
        variant: Option<ApiVariant>,
    },
    /// Create the users table, reseed it and exit
    Init,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize tracing
    init_tracing(cli.verbose);

    let mut config = UserServiceConfig::from_env();
    tracing::debug!(?config, "Configuration loaded");

    match cli.command {
        Commands::Serve {
            host,
            port,
            variant,
        } => {
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(variant) = variant {
                config.variant = variant;
            }
            user_service_lib::run_server(config).await?;
        }
        Commands::Init => {
            user_service_lib::run_init(config).await?;
        }
    }

    Ok(())
}

/// Initialize tracing subscriber (verbose mode sets debug level)
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "info,tower_http=debug".into())
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
