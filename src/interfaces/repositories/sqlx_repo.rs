use sqlx::PgPool;

use crate::errors::StoreError;

/// Table names resolved once from configuration.
#[derive(Debug, Clone)]
pub struct TableNames {
    pub contacts: String,
    pub education: String,
}

#[derive(Clone)]
pub struct SqlxRepo {
    pub pool: PgPool,
    pub tables: TableNames,
}

impl SqlxRepo {
    pub fn new(pool: PgPool, tables: TableNames) -> Self {
        SqlxRepo { pool, tables }
    }

    /// Fails when a configured table is absent, so a bad name stops startup
    /// instead of surfacing on the first request.
    pub async fn verify_tables(&self) -> Result<(), StoreError> {
        for table in [&self.tables.contacts, &self.tables.education] {
            let found: Option<String> = sqlx::query_scalar("SELECT to_regclass($1)::text")
                .bind(table.as_str())
                .fetch_one(&self.pool)
                .await
                .map_err(StoreError::Connection)?;

            if found.is_none() {
                return Err(StoreError::MissingTable(table.clone()));
            }
        }

        tracing::info!(
            contacts = %self.tables.contacts,
            education = %self.tables.education,
            "Verified configured tables"
        );
        Ok(())
    }
}
