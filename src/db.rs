use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};

use crate::{config::DatabaseConfig, error::AppResult, store::Store};

pub async fn connect(config: &DatabaseConfig) -> AppResult<Store> {
    let mut options = ConnectOptions::new(config.dsn());
    options
        .max_connections(config.max_connections.max(1))
        .connect_timeout(config.connect_timeout())
        .sqlx_logging(false);

    let db = Database::connect(options).await?;
    tune(&db).await?;
    tracing::info!(backend = ?db.get_database_backend(), "database connected");

    Ok(Store::new(db, config.statement_timeout()))
}

/// Single-connection in-memory store, used by the test suites.
pub async fn connect_in_memory() -> AppResult<Store> {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).min_connections(1).sqlx_logging(false);

    let db = Database::connect(options).await?;
    tune(&db).await?;

    Ok(Store::new(db, DatabaseConfig::default().statement_timeout()))
}

async fn tune(db: &DatabaseConnection) -> AppResult<()> {
    if db.get_database_backend() != sea_orm::DatabaseBackend::Sqlite {
        return Ok(());
    }
    for pragma in ["PRAGMA journal_mode=WAL", "PRAGMA synchronous=NORMAL"] {
        db.execute(Statement::from_string(db.get_database_backend(), pragma.to_string())).await?;
    }
    Ok(())
}
