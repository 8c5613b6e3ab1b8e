use std::sync::Arc;

use sqlx::PgPool;

use crate::{
    errors::StoreError,
    repositories::{
        contact::ContactRepository,
        education::EducationRepository,
        memory::MemoryRepo,
        sqlx_repo::{SqlxRepo, TableNames},
    },
    settings::{AppConfig, StorageBackend},
};

pub mod postgres;

use postgres::ConnectPolicy;

/// The persistence service handed to the handlers, with its lifecycle.
pub struct Storage {
    pub contacts: Arc<dyn ContactRepository>,
    pub education: Arc<dyn EducationRepository>,
    pool: Option<PgPool>,
}

impl Storage {
    pub fn in_memory(repo: MemoryRepo) -> Self {
        let repo = Arc::new(repo);
        Storage {
            contacts: repo.clone(),
            education: repo,
            pool: None,
        }
    }

    pub fn postgres(repo: SqlxRepo) -> Self {
        let pool = repo.pool.clone();
        let repo = Arc::new(repo);
        Storage {
            contacts: repo.clone(),
            education: repo,
            pool: Some(pool),
        }
    }

    /// Opens the configured backend and checks that its tables exist.
    pub async fn open(config: &AppConfig) -> Result<Self, StoreError> {
        match config.storage_backend {
            StorageBackend::Memory => {
                tracing::warn!("Using the in-memory store; submissions are lost on restart");
                Ok(Storage::in_memory(MemoryRepo::new()))
            }
            StorageBackend::Postgres => {
                let pool = postgres::create_pool(&config.database_url, &ConnectPolicy::from_config(config))
                    .await
                    .map_err(StoreError::Connection)?;

                let repo = SqlxRepo::new(pool, TableNames {
                    contacts: config.contacts_table.clone(),
                    education: config.education_table.clone(),
                });
                repo.verify_tables().await?;

                Ok(Storage::postgres(repo))
            }
        }
    }

    pub async fn close(self) {
        if let Some(pool) = self.pool {
            pool.close().await;
            tracing::info!("Database connection pool closed");
        }
    }
}
