use std::net::SocketAddr;
use std::sync::Arc;

use canteen_mock::{MockState, seed};
use clap::Parser;

#[derive(Parser)]
#[command(name = "canteen-mock")]
#[command(about = "In-memory canteen admin API for local runs")]
struct Cli {
    /// Port to listen on
    #[arg(short, long, env = "MOCK_PORT", default_value_t = 4000)]
    port: u16,

    /// Bind address
    #[arg(long, env = "MOCK_HOST", default_value = "127.0.0.1")]
    host: std::net::IpAddr,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "canteen_mock=info,tower_http=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let server = canteen_mock::serve(Arc::new(MockState::seeded()), SocketAddr::new(cli.host, cli.port)).await?;

    println!("canteen-mock listening on {}", server.base_url());
    println!("  super admin:   {} / {}", seed::SUPER_ADMIN_EMAIL, seed::SUPER_ADMIN_PASSWORD);
    println!("  company admin: {} / {}", seed::COMPANY_ADMIN_EMAIL, seed::COMPANY_ADMIN_PASSWORD);
    println!("  canteen admin: {} / {}", seed::CANTEEN_ADMIN_EMAIL, seed::CANTEEN_ADMIN_PASSWORD);

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down");
    Ok(())
}
