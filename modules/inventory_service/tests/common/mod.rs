//! Common test utilities: in-memory database and signed-in accounts

#![allow(dead_code)]

use chrono::NaiveDate;
use inventory_service::contract::{AuthContext, NewUser, Role, StockEntry};
use inventory_service::domain::{AccountService, Service};
use inventory_service::{Config, InventoryModule};
use rust_decimal::Decimal;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::str::FromStr;
use std::sync::Arc;

pub const SUPERADMIN_PASSWORD: &str = "admin123";

/// Private in-memory SQLite database, not yet migrated
pub async fn memory_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    // every pooled connection would otherwise open its own empty database
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    Database::connect(options).await.unwrap()
}

pub fn test_config() -> Config {
    let mut config = Config::default();
    config.auth.password_rounds = 1_000;
    config.auth.superadmin_password = SUPERADMIN_PASSWORD.to_string();
    config
}

/// Fresh module over a private in-memory SQLite database
pub async fn test_module() -> InventoryModule {
    InventoryModule::from_connection(memory_db().await, &test_config())
        .await
        .unwrap()
}

pub struct TestEnv {
    pub module: InventoryModule,
    pub service: Arc<Service>,
    pub accounts: Arc<AccountService>,
    pub superadmin: AuthContext,
}

impl TestEnv {
    pub async fn new() -> Self {
        let module = test_module().await;
        let service = module.service();
        let accounts = module.accounts();
        let superadmin = sign_in(&accounts, "superadmin", SUPERADMIN_PASSWORD).await;
        Self {
            module,
            service,
            accounts,
            superadmin,
        }
    }

    /// Register an account as the superadmin and sign it in
    pub async fn user(&self, username: &str, role: Role) -> AuthContext {
        self.accounts
            .register(
                &self.superadmin,
                NewUser {
                    username: username.to_string(),
                    password: format!("{}-pw", username),
                    role,
                },
            )
            .await
            .unwrap();
        sign_in(&self.accounts, username, &format!("{}-pw", username)).await
    }
}

pub async fn sign_in(accounts: &AccountService, username: &str, password: &str) -> AuthContext {
    let session = accounts.login(username, password).await.unwrap();
    accounts.authenticate(&session.access_token).await.unwrap()
}

pub fn dec(value: &str) -> Decimal {
    Decimal::from_str(value).unwrap()
}

pub fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
}

pub fn entry(product: &str, quantity: i64, unit_price: &str, day: &str) -> StockEntry {
    StockEntry {
        product_name: product.to_string(),
        quantity,
        unit_price: dec(unit_price),
        date: date(day),
    }
}

pub fn print_test_header(test_name: &str, purpose: &str) {
    println!("\n🧪 TEST: {}", test_name);
    println!("📋 PURPOSE: {}", purpose);
}
