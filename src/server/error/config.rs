use thiserror::Error;

/// Startup configuration errors. The server refuses to start on either.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required variable such as `DATABASE_URL`, `JWT_SECRET` or a credential of the
    /// selected payment gateway is unset. `.env.example` lists them all.
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// A variable is set but unusable, e.g. a non-numeric `PORT` or an unknown
    /// `PAYMENT_GATEWAY`.
    #[error("Invalid value '{value}' for environment variable {name}")]
    InvalidEnvVar { name: String, value: String },
}
