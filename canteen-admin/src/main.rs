use canteen_admin::{Cli, commands, logger};
use canteen_client::{ApiClient, AuthContext, Session, SessionStore};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = cli.config();
    let _guard = logger::init_logging(&config.log_level, config.log_dir.as_deref());

    tracing::debug!(api = %config.client.base_url, home = %config.home.display(), "Starting canteen-admin");

    let session = Session::new();
    let api = ApiClient::network(&config.client, session.clone())?;
    let auth = AuthContext::new(api, session).with_store(SessionStore::new(config.home.clone()));
    auth.restore();

    let mut stdout = std::io::stdout().lock();
    commands::run(cli.command, &auth, &mut stdout).await
}
