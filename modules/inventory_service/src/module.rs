//! Module wiring: database, migrations, services and router

use crate::config::{Config, DatabaseConfig};
use crate::domain::{AccountService, ActivityLog, PasswordHashing, Service, TokenIssuer};
use crate::infra::storage::{
    Migrator, SeaOrmActivityRepository, SeaOrmItemRepository, SeaOrmLedgerRepository,
    SeaOrmUserRepository,
};
use anyhow::{Context, Result};
use axum::Router;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use std::sync::Arc;

/// Inventory service module
pub struct InventoryModule {
    service: Arc<Service>,
    accounts: Arc<AccountService>,
}

impl InventoryModule {
    /// Connect, migrate and bootstrap from configuration
    pub async fn init(config: &Config) -> Result<Self> {
        let db = Self::connect(&config.database).await?;
        Self::from_connection(db, config).await
    }

    pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut options = ConnectOptions::new(config.url.clone());
        options
            .max_connections(config.max_connections)
            .sqlx_logging(false);

        let db = Database::connect(options)
            .await
            .context("Failed to connect to database")?;
        tracing::info!(backend = ?db.get_database_backend(), "Database connected");
        Ok(db)
    }

    pub async fn migrate(db: &DatabaseConnection) -> Result<()> {
        Migrator::up(db, None)
            .await
            .context("Failed to apply migrations")?;
        tracing::info!("Inventory service migrations completed");
        Ok(())
    }

    /// Migrate an open connection, build the services and ensure the superadmin exists
    pub async fn from_connection(db: DatabaseConnection, config: &Config) -> Result<Self> {
        Self::migrate(&db).await?;

        if config.auth.uses_development_secret() {
            tracing::warn!("Using the built-in development secret key; set SECRET_KEY in production");
        }

        let conn = Arc::new(db);

        // Build repositories
        let ledger_repo = Arc::new(SeaOrmLedgerRepository::new(conn.clone()));
        let item_repo = Arc::new(SeaOrmItemRepository::new(conn.clone()));
        let user_repo = Arc::new(SeaOrmUserRepository::new(conn.clone()));
        let activity_repo = Arc::new(SeaOrmActivityRepository::new(conn));

        let activity = ActivityLog::new(activity_repo);

        // Build domain services
        let service = Arc::new(Service::new(ledger_repo, item_repo, activity.clone()));
        let accounts = Arc::new(AccountService::new(
            user_repo,
            activity,
            PasswordHashing::new(config.auth.password_rounds),
            TokenIssuer::new(&config.auth.secret_key, config.auth.token_ttl_minutes),
            config.activity_log_limit,
        ));

        accounts
            .ensure_superadmin(&config.auth.superadmin_password)
            .await
            .context("Failed to create the default superadmin")?;

        tracing::info!("Inventory service initialized");
        Ok(Self { service, accounts })
    }

    pub fn service(&self) -> Arc<Service> {
        self.service.clone()
    }

    pub fn accounts(&self) -> Arc<AccountService> {
        self.accounts.clone()
    }

    /// REST routes with the services attached
    pub fn router(&self) -> Router {
        crate::api::rest::routes::register_routes(
            Router::new(),
            self.service.clone(),
            self.accounts.clone(),
        )
    }
}
