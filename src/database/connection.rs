//! Conexión a PostgreSQL
//!
//! Pool compartido y migraciones del esquema de reservas.

use sqlx::PgPool;
use tracing::info;

use crate::config::database::{mask_database_url, DatabaseConfig};

pub struct DatabaseConnection {
    pool: PgPool,
}

impl DatabaseConnection {
    /// Crear el pool y aplicar las migraciones pendientes
    pub async fn new(config: &DatabaseConfig) -> anyhow::Result<Self> {
        info!("🗄️ Conectando a {}", mask_database_url(&config.url));
        let pool = config.create_pool().await?;

        let connection = Self { pool };
        connection.run_migrations().await?;
        Ok(connection)
    }

    /// Ejecutar migraciones de la base de datos
    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("✅ Migraciones aplicadas");
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}
