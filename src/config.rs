use std::path::PathBuf;

use serde::Deserialize;

pub const DEV_SESSION_SECRET: &str = "fitlog-local-dev-secret";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub storage_path: PathBuf,
    pub session_secret: String,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let storage_path = std::env::var("STORAGE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("database/personal_fitness_ml.db"));
        // Only meant for local use; the notice cookie is the only thing it signs.
        let session_secret =
            std::env::var("SESSION_SECRET").unwrap_or_else(|_| DEV_SESSION_SECRET.into());
        let host = std::env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".into());
        let port = std::env::var("APP_PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(5001);
        Ok(Self {
            storage_path,
            session_secret,
            host,
            port,
        })
    }

    pub fn uses_dev_secret(&self) -> bool {
        self.session_secret == DEV_SESSION_SECRET
    }
}
