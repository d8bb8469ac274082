use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use rendezvous_core::IceServerConfig;
use rendezvous_server::RelayConfig;
use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rendezvous")]
#[command(about = "Signaling relay for peer-to-peer calls")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the signaling relay.
    Serve {
        #[arg(long, default_value = "0.0.0.0:8000")]
        addr: SocketAddr,

        /// Allowed CORS origin. Repeat for several; pass "*" to allow any.
        #[arg(long = "allow-origin", default_value = "http://localhost:5173")]
        allow_origins: Vec<String>,

        /// STUN/TURN URL announced to participants. Repeatable.
        #[arg(long = "ice-server")]
        ice_servers: Vec<String>,

        #[arg(long, default_value_t = 256)]
        command_buffer: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            addr,
            allow_origins,
            ice_servers,
            command_buffer,
        } => {
            let config = build_config(addr, allow_origins, ice_servers, command_buffer)?;

            println!("{}", "📡 Starting rendezvous relay...".green().bold());
            println!("   🔌 WebSocket: ws://{}/ws", config.bind_addr);
            if config.allowed_origins.is_empty() {
                println!("   🌐 CORS:      any origin");
            } else {
                println!("   🌐 CORS:      {}", config.allowed_origins.join(", "));
            }
            for server in &config.ice_servers {
                println!("   🧊 ICE:       {}", server.urls.join(", "));
            }

            rendezvous_server::serve(config)
                .await
                .context("Relay terminated")?;
        }
    }

    Ok(())
}

fn build_config(
    addr: SocketAddr,
    allow_origins: Vec<String>,
    ice_servers: Vec<String>,
    command_buffer: usize,
) -> Result<RelayConfig> {
    if command_buffer == 0 {
        anyhow::bail!("--command-buffer must be greater than zero");
    }

    let defaults = RelayConfig::default();
    let allowed_origins = if allow_origins.iter().any(|origin| origin == "*") {
        Vec::new()
    } else {
        allow_origins
    };
    let ice_servers = if ice_servers.is_empty() {
        defaults.ice_servers
    } else {
        ice_servers.into_iter().map(IceServerConfig::stun).collect()
    };

    Ok(RelayConfig {
        bind_addr: addr,
        allowed_origins,
        ice_servers,
        command_buffer,
    })
}
