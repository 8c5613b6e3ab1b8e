use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{info, warn};
use std::time::Duration;

use crate::settings::AppConfig;

/// How the pool is sized and how hard startup tries to reach the database.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectPolicy {
    pub max_connections: u32,
    pub max_retries: u32,
    pub initial_backoff: Duration,
}

impl ConnectPolicy {
    pub fn from_config(config: &AppConfig) -> Self {
        ConnectPolicy {
            max_connections: config.max_db_connections,
            max_retries: config.db_connect_retries,
            initial_backoff: Duration::from_secs(config.db_connect_backoff_secs),
        }
    }

    /// Wait before retry number `attempt` (1-based); doubles each time.
    pub fn backoff(&self, attempt: u32) -> Duration {
        self.initial_backoff
            .saturating_mul(2u32.saturating_pow(attempt.saturating_sub(1)))
    }
}

pub async fn create_pool(database_url: &str, policy: &ConnectPolicy) -> Result<PgPool, sqlx::Error> {
    let mut attempt = 0;

    loop {
        let connected = PgPoolOptions::new()
            .max_connections(policy.max_connections)
            .acquire_timeout(Duration::from_secs(5))
            .connect(database_url)
            .await;

        match connected {
            Ok(pool) => {
                info!(max_connections = policy.max_connections, "Database connection established");
                return Ok(pool);
            }
            Err(e) if attempt < policy.max_retries => {
                attempt += 1;
                let wait = policy.backoff(attempt);
                warn!(
                    attempt,
                    max_retries = policy.max_retries,
                    error = %e,
                    "Database unreachable; retrying in {}s",
                    wait.as_secs()
                );
                tokio::time::sleep(wait).await;
            }
            Err(e) => return Err(e),
        }
    }
}
