use std::env;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct KioskConfig {
    pub database_url: String,
    pub database_api_key: String,
    pub database_name: String,
    pub port: u16,
}

impl KioskConfig {
    pub fn from_env() -> Self {
        let config = Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| {
                    warn!("DATABASE_URL not set, using empty value");
                    String::new()
                }),
            database_api_key: env::var("DATABASE_API_KEY")
                .unwrap_or_else(|_| {
                    warn!("DATABASE_API_KEY not set, using empty value");
                    String::new()
                }),
            database_name: env::var("DATABASE_NAME")
                .unwrap_or_else(|_| {
                    warn!("DATABASE_NAME not set, using empty value");
                    String::new()
                }),
            port: env::var("PORT")
                .ok()
                .and_then(|value| value.parse().ok())
                .unwrap_or(8000),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.database_url.is_empty() && !self.database_name.is_empty()
    }
}
