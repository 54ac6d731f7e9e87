use std::sync::Arc;

use crate::server::{
    config::{Config, GatewayConfig},
    error::AppError,
    gateway::{razorpay::RazorpayGateway, stripe::StripeGateway, PaymentGateway},
};

/// Connects to the Sqlite database and runs pending migrations.
///
/// Establishes a connection pool to the Sqlite database using the connection string from
/// configuration, then automatically runs all pending SeaORM migrations to ensure the database
/// schema is up-to-date. This function must complete successfully before the application can
/// access the database.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(Error)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<sea_orm::DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Builds the HTTP client used for Google and payment gateway calls.
///
/// Redirects are disabled so a misbehaving upstream cannot bounce requests carrying
/// credentials to another host.
pub fn setup_reqwest_client() -> Result<reqwest::Client, AppError> {
    reqwest::ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .map_err(|e| AppError::InternalError(format!("Failed to build HTTP client: {}", e)))
}

/// Creates the payment gateway adapter selected by configuration.
pub fn setup_payment_gateway(
    config: &Config,
    http_client: reqwest::Client,
) -> Arc<dyn PaymentGateway> {
    match &config.gateway {
        GatewayConfig::Stripe {
            secret_key,
            webhook_secret,
            api_base,
        } => Arc::new(StripeGateway::new(
            http_client,
            secret_key.clone(),
            webhook_secret.clone(),
            api_base.clone(),
        )),
        GatewayConfig::Razorpay {
            key_id,
            key_secret,
            webhook_secret,
            api_base,
        } => Arc::new(RazorpayGateway::new(
            http_client,
            key_id.clone(),
            key_secret.clone(),
            webhook_secret.clone(),
            api_base.clone(),
        )),
    }
}
