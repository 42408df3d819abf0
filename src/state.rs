use std::sync::Arc;

use anyhow::Context;

use crate::config::AppConfig;
use crate::workouts::repo::{SqliteStore, WorkoutStore};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn WorkoutStore>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        if let Some(dir) = config
            .storage_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
        {
            tokio::fs::create_dir_all(dir)
                .await
                .with_context(|| format!("create storage directory {}", dir.display()))?;
        }

        let store = SqliteStore::new(&config.storage_path);
        store.migrate().await?;

        Ok(Self::from_parts(
            Arc::new(store) as Arc<dyn WorkoutStore>,
            Arc::new(config),
        ))
    }

    pub fn from_parts(store: Arc<dyn WorkoutStore>, config: Arc<AppConfig>) -> Self {
        Self { store, config }
    }

    #[cfg(test)]
    pub fn fake(store: Arc<dyn WorkoutStore>) -> Self {
        let config = Arc::new(AppConfig {
            storage_path: "unused.db".into(),
            session_secret: "test".into(),
            host: "127.0.0.1".into(),
            port: 0,
        });
        Self::from_parts(store, config)
    }
}
