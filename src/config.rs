use std::env;

use crate::error::AppResult;

const DEFAULT_JWT_EXPIRES_SECS: i64 = 3600;
const DEFAULT_PORT: u16 = 4000;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    /// Token lifetime in seconds. Short-lived by default.
    pub jwt_expires_secs: i64,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> AppResult<Self> {
        let database_url = env::var("DATABASE_URL")?;
        let jwt_secret = env::var("JWT_SECRET")?;

        let jwt_expires_secs = env::var("JWT_EXPIRES_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_JWT_EXPIRES_SECS);

        let port = env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        Ok(Self {
            database_url,
            jwt_secret,
            jwt_expires_secs,
            port,
        })
    }
}
