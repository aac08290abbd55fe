use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use brainquest_backend::{
    config::{get_config, init_config},
    database::pool::create_pool,
    routes,
    services::{store::PgAttemptStore, trivia::OpenTdbClient},
    AppState,
};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let pool = create_pool().await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()?;
    let trivia = Arc::new(OpenTdbClient::new(
        http_client,
        config.trivia_base_url.clone(),
    ));
    let store = Arc::new(PgAttemptStore::new(pool));

    let app_state = AppState::new(trivia, store);
    let app = routes::create_router(app_state, config.public_rps);

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
