mod model;
mod server;

use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

use crate::server::{
    config::Config, error::AppError, router, service::token::TokenService, startup,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pg_stay=debug,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let http_client = startup::setup_reqwest_client()?;
    let gateway = startup::setup_payment_gateway(&config, http_client.clone());
    let tokens = TokenService::new(&config.jwt_secret, config.jwt_expiry_days);

    if config.google_client_id.is_none() {
        tracing::info!("GOOGLE_CLIENT_ID not set, Google login disabled");
    }

    let state = AppState::new(
        db,
        http_client,
        tokens,
        gateway,
        config.payment_currency.clone(),
        config.google_client_id.clone(),
        config.app_url.clone(),
    );

    let app = router::router()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
