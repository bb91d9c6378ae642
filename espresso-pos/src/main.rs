//! Espresso POS terminal entry point

use espresso_client::ClientConfig;
use espresso_pos::config::PosConfig;
use espresso_pos::{logger, shell, PosApp, SessionStore};
use std::path::Path;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let config = PosConfig::from_env();
    logger::init_logger(
        &config.log_level,
        config.is_production(),
        config.log_dir.as_deref(),
    )?;

    tracing::info!(
        api = %config.api_base_url,
        work_dir = %config.work_dir,
        "Starting Espresso POS terminal"
    );

    let api = ClientConfig::new(&config.api_base_url)
        .with_timeout(config.request_timeout_secs)
        .build_client();
    let session_store = SessionStore::new(Path::new(&config.work_dir));

    let mut app = PosApp::new(api, session_store);
    app.restore();

    shell::run(app).await
}
