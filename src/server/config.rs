use crate::server::error::{config::ConfigError, AppError};

const STRIPE_API_BASE: &str = "https://api.stripe.com";
const RAZORPAY_API_BASE: &str = "https://api.razorpay.com";

/// Credentials for the active payment gateway.
#[derive(Clone)]
pub enum GatewayConfig {
    Stripe {
        secret_key: String,
        webhook_secret: String,
        api_base: String,
    },
    Razorpay {
        key_id: String,
        key_secret: String,
        webhook_secret: String,
        api_base: String,
    },
}

pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,

    pub jwt_secret: String,
    pub jwt_expiry_days: i64,

    pub gateway: GatewayConfig,
    pub payment_currency: String,

    /// Google login is disabled when unset.
    pub google_client_id: Option<String>,

    pub app_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let gateway = match optional("PAYMENT_GATEWAY")
            .unwrap_or_else(|| "stripe".to_string())
            .to_lowercase()
            .as_str()
        {
            "stripe" => GatewayConfig::Stripe {
                secret_key: required("STRIPE_SECRET_KEY")?,
                webhook_secret: required("STRIPE_WEBHOOK_SECRET")?,
                api_base: optional("STRIPE_API_BASE")
                    .unwrap_or_else(|| STRIPE_API_BASE.to_string()),
            },
            "razorpay" => GatewayConfig::Razorpay {
                key_id: required("RAZORPAY_KEY_ID")?,
                key_secret: required("RAZORPAY_KEY_SECRET")?,
                webhook_secret: required("RAZORPAY_WEBHOOK_SECRET")?,
                api_base: optional("RAZORPAY_API_BASE")
                    .unwrap_or_else(|| RAZORPAY_API_BASE.to_string()),
            },
            other => {
                return Err(ConfigError::InvalidEnvVar {
                    name: "PAYMENT_GATEWAY".to_string(),
                    value: other.to_string(),
                }
                .into())
            }
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            host: optional("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parsed("PORT", 8080)?,
            jwt_secret: required("JWT_SECRET")?,
            jwt_expiry_days: parsed("JWT_EXPIRY_DAYS", 7)?,
            gateway,
            payment_currency: optional("PAYMENT_CURRENCY")
                .unwrap_or_else(|| "inr".to_string())
                .to_lowercase(),
            google_client_id: optional("GOOGLE_CLIENT_ID"),
            app_url: optional("APP_URL").unwrap_or_else(|| "http://localhost:3000".to_string()),
        })
    }
}

fn required(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

fn optional(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn parsed<T: std::str::FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    match optional(name) {
        None => Ok(default),
        Some(value) => value.parse().map_err(|_| ConfigError::InvalidEnvVar {
            name: name.to_string(),
            value,
        }),
    }
}
