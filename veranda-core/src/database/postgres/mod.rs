pub(crate) mod attachments;
pub mod repositories;

pub use repositories::{
    PostgresComplaintsRepository, PostgresEventsRepository, PostgresItemsRepository,
    PostgresNoticesRepository, PostgresPaymentsRepository, PostgresPropertiesRepository,
};

use std::{fmt, path::Path, time::Duration};

use sqlx::{
    PgPool,
    postgres::{PgConnectOptions, PgPoolOptions, PgSslMode},
};
use tracing::{debug, info};

use crate::{CoreError, Result};

#[derive(Clone)]
pub struct PostgresDatabase {
    pool: PgPool,
    max_connections: u32,
    min_connections: u32,
}

impl fmt::Debug for PostgresDatabase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostgresDatabase")
            .field("pool_size", &self.pool.size())
            .field("idle_connections", &self.pool.num_idle())
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .finish()
    }
}

impl PostgresDatabase {
    pub async fn new(connection_string: &str) -> Result<Self> {
        let max_connections = std::env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(num_cpus::get() as u32);

        let min_connections = std::env::var("DB_MIN_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(1);

        let connect_options = Self::build_connect_options(connection_string)?;
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(30))
            .max_lifetime(Duration::from_secs(1800))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect_with(connect_options)
            .await
            .map_err(|e| CoreError::External(format!("Database connection failed: {e}")))?;

        info!(
            "Database pool initialized with max_connections={}, min_connections={}",
            max_connections, min_connections
        );

        Ok(PostgresDatabase {
            pool,
            max_connections,
            min_connections,
        })
    }

    fn build_connect_options(connection_string: &str) -> Result<PgConnectOptions> {
        let trimmed = connection_string.trim();

        let mut options = trimmed.parse::<PgConnectOptions>().map_err(|e| {
            CoreError::External(format!("Invalid PostgreSQL connection string: {e}"))
        })?;

        let mut using_socket = false;

        if let Ok(host) = std::env::var("PGHOST")
            && !host.is_empty()
        {
            if host.starts_with('/') {
                options = options.socket(Path::new(&host));
                using_socket = true;
                debug!("Using PostgreSQL socket from PGHOST at {}", host);
            } else {
                options = options.host(&host);
                debug!("Using PostgreSQL host from PGHOST: {}", host);
            }
        }

        if let Ok(port) = std::env::var("PGPORT")
            && let Ok(port) = port.parse::<u16>()
        {
            options = options.port(port);
        }

        if using_socket && std::env::var("PGSSLMODE").is_err() {
            options = options.ssl_mode(PgSslMode::Disable);
        }

        Ok(options)
    }

    /// Get a reference to the connection pool for constructing repositories.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Run only the preflight checks without applying migrations.
    pub async fn preflight_only(&self) -> Result<()> {
        self.preflight_check().await
    }

    /// Connectivity and privilege checks that surface actionable errors
    /// before migrations produce a generic "permission denied".
    async fn preflight_check(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| CoreError::External(format!("Database preflight failed: {e}")))?;

        let can_create: bool = sqlx::query_scalar(
            "SELECT has_schema_privilege(current_user, 'public', 'CREATE')",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| CoreError::External(format!("Privilege preflight failed: {e}")))?;

        if !can_create {
            return Err(CoreError::External(
                "Connected role lacks CREATE on schema public; grant it and restart".to_string(),
            ));
        }

        Ok(())
    }

    /// Run migrations after performing preflight checks.
    pub async fn initialize_schema(&self) -> Result<()> {
        self.preflight_check().await?;

        crate::MIGRATOR
            .run(&self.pool)
            .await
            .map_err(|e| CoreError::External(format!("Migration failed: {e}")))?;

        Ok(())
    }
}
