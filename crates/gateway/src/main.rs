//! API Gateway - HTTP front door for the identity and incident services.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gateway_lib::config::GatewayConfig;

#[derive(Parser)]
#[command(name = "gateway")]
#[command(about = "REST gateway for authentication and traffic incidents")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Overrides GATEWAY_HOST
        #[arg(long)]
        host: Option<String>,
        /// Overrides GATEWAY_PORT
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Missing upstream endpoints abort startup
    let mut config = match GatewayConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };
    tracing::debug!(?config, "Configuration loaded");

    let result = match cli.command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            gateway_lib::run_server(config).await
        }
    };

    if let Err(e) = result {
        tracing::error!("Gateway failed: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing subscriber
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
