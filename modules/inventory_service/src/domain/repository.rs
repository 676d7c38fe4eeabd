//! Repository traits for data access
//!
//! These traits define the interface for data access operations.
//! Implementations are in infra/storage/repositories.rs

use crate::contract::{
    ActivityEntry, DateRange, Item, MovementDraft, MovementKind, NewActivity, Order, OrderFilter,
    Product, StockMovement, User,
};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Order row about to be persisted together with its sell movement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDraft {
    pub product_name: String,
    pub quantity_sold: i64,
    pub total_amount: Decimal,
    pub customer_name: Option<String>,
    pub customer_address: Option<String>,
    pub customer_phone: Option<String>,
    pub sale_date: DateTime<Utc>,
    pub created_by: String,
}

/// Repository for products, stock movements and orders
///
/// Methods that touch more than one row run in a single transaction.
#[async_trait]
pub trait LedgerRepository: Send + Sync {
    async fn find_product_by_name(&self, name: &str) -> Result<Option<Product>>;

    async fn find_product(&self, id: i32) -> Result<Option<Product>>;

    /// All products ordered by name
    async fn list_products(&self) -> Result<Vec<Product>>;

    /// Save the updated product totals and insert the movement in one
    /// transaction. A product with id 0 is inserted as new.
    async fn record_movement(
        &self,
        product: &Product,
        movement: &MovementDraft,
    ) -> Result<(Product, StockMovement)>;

    async fn find_movement(&self, id: i32) -> Result<Option<StockMovement>>;

    /// Save the updated product totals and delete the movement
    async fn remove_movement(&self, product: &Product, movement_id: i32) -> Result<Product>;

    /// Movements filtered by kind and inclusive date range, oldest first
    async fn list_movements(
        &self,
        kind: Option<MovementKind>,
        range: Option<DateRange>,
    ) -> Result<Vec<StockMovement>>;

    /// Save the updated product totals, insert the sell movement and the order
    async fn record_order(
        &self,
        product: &Product,
        movement: &MovementDraft,
        order: &OrderDraft,
    ) -> Result<(Product, Order)>;

    /// Orders matching the filter, newest first
    async fn list_orders(&self, filter: &OrderFilter) -> Result<Vec<Order>>;
}

/// Repository for catalogue items
#[async_trait]
pub trait ItemRepository: Send + Sync {
    async fn create(&self, item_name: &str) -> Result<Item>;

    async fn find_by_name(&self, item_name: &str) -> Result<Option<Item>>;

    /// All items ordered by name
    async fn list_all(&self) -> Result<Vec<Item>>;
}

/// Repository for accounts
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> Result<User>;

    async fn find_by_id(&self, id: i32) -> Result<Option<User>>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>>;

    /// All accounts ordered by id
    async fn list_all(&self) -> Result<Vec<User>>;

    async fn update(&self, user: &User) -> Result<User>;

    async fn delete(&self, id: i32) -> Result<()>;
}

/// Repository for the activity log
#[async_trait]
pub trait ActivityRepository: Send + Sync {
    async fn record(&self, activity: &NewActivity) -> Result<ActivityEntry>;

    /// Newest entries first
    async fn list_recent(&self, limit: u64) -> Result<Vec<ActivityEntry>>;
}
