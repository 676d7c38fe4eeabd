//! Contract models for inventory service
//!
//! These models are transport-agnostic and shared by the domain, storage and
//! REST layers. NO serde derives - these are pure domain models.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

// ===== Stock ledger =====

/// Product with running stock and money totals
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: i32,
    /// Unique product name
    pub name: String,
    pub total_added_qty: i64,
    pub total_added_amount: Decimal,
    pub total_sold_qty: i64,
    pub total_sold_amount: Decimal,
    /// Always `total_added_qty - total_sold_qty`
    pub available_stock: i64,
}

/// Direction of a stock movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MovementKind {
    /// Stock purchased into inventory
    Add,
    /// Stock sold out of inventory
    Sell,
}

impl MovementKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Sell => "sell",
        }
    }
}

impl fmt::Display for MovementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MovementKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add" => Ok(Self::Add),
            "sell" => Ok(Self::Sell),
            other => Err(format!("unknown movement kind '{}'", other)),
        }
    }
}

/// A single recorded add or sell entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockMovement {
    pub id: i32,
    pub product_id: i32,
    pub kind: MovementKind,
    pub quantity: i64,
    pub unit_price: Decimal,
    /// `quantity * unit_price`
    pub total_amount: Decimal,
    pub date: NaiveDate,
}

/// Movement about to be persisted (no id yet)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovementDraft {
    pub product_id: i32,
    pub kind: MovementKind,
    pub quantity: i64,
    pub unit_price: Decimal,
    pub total_amount: Decimal,
    pub date: NaiveDate,
}

/// Request to add purchased stock to a product
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockEntry {
    pub product_name: String,
    pub quantity: i64,
    pub unit_price: Decimal,
    pub date: NaiveDate,
}

// ===== Reports =====

/// Product with derived pricing analytics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductAnalytics {
    pub product: Product,
    pub avg_purchase_price: Option<Decimal>,
    pub avg_selling_price: Option<Decimal>,
    pub profit_loss: Option<Decimal>,
}

/// Inclusive date window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Quantity and money totals for both movement directions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeTotals {
    pub added_qty: i64,
    pub added_amount: Decimal,
    pub sold_qty: i64,
    pub sold_amount: Decimal,
}

/// All products plus movement totals inside a date window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRangeSummary {
    pub products: Vec<Product>,
    pub totals: RangeTotals,
}

/// Movement totals for one calendar day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyTotals {
    pub date: NaiveDate,
    pub totals: RangeTotals,
}

/// Journal line: a movement joined with its product name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub id: i32,
    pub date: NaiveDate,
    pub product_id: i32,
    pub product_name: String,
    pub kind: MovementKind,
    pub quantity: i64,
    pub unit_price: Decimal,
    pub total_amount: Decimal,
}

/// Full dump of the ledger tables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseSnapshot {
    pub products: Vec<Product>,
    pub additions: Vec<Transaction>,
    pub sales: Vec<Transaction>,
}

// ===== Orders and items =====

/// Customer order; each order is backed by one sell movement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub id: i32,
    pub product_id: i32,
    pub product_name: String,
    pub quantity_sold: i64,
    pub total_amount: Decimal,
    pub customer_name: Option<String>,
    pub customer_address: Option<String>,
    pub customer_phone: Option<String>,
    pub sale_date: DateTime<Utc>,
    /// Username of the account that recorded the sale
    pub created_by: String,
}

/// Request to sell stock to a customer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub product_id: i32,
    pub quantity_sold: i64,
    pub unit_price: Decimal,
    pub customer_name: Option<String>,
    pub customer_address: Option<String>,
    pub customer_phone: Option<String>,
}

/// Order listing filters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderFilter {
    pub range: Option<DateRange>,
    pub product_id: Option<i32>,
}

/// Catalogue item name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: i32,
    pub item_name: String,
    pub created_at: DateTime<Utc>,
}

// ===== Accounts =====

/// Account role, from most to least privileged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Superadmin,
    Admin,
    Editor,
    Viewer,
}

/// Capability checked before a protected operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    /// Read inventory, reports, items and activity
    ViewInventory,
    /// Add stock, create items, create and list orders
    EditInventory,
    /// Remove add/sell history records
    DeleteHistory,
    /// Register, list and delete accounts
    ManageUsers,
    /// Download the orders workbook
    ExportOrders,
    /// Dump raw ledger tables
    InspectDatabase,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Superadmin, Role::Admin, Role::Editor, Role::Viewer];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Superadmin => "superadmin",
            Self::Admin => "admin",
            Self::Editor => "editor",
            Self::Viewer => "viewer",
        }
    }

    pub fn allows(self, permission: Permission) -> bool {
        match permission {
            Permission::ViewInventory => true,
            Permission::EditInventory => {
                matches!(self, Self::Superadmin | Self::Admin | Self::Editor)
            }
            Permission::DeleteHistory | Permission::ManageUsers | Permission::ExportOrders => {
                matches!(self, Self::Superadmin | Self::Admin)
            }
            Permission::InspectDatabase => self == Self::Superadmin,
        }
    }

    /// Whether an account with this role may create an account with `target`
    pub fn can_assign(self, target: Role) -> bool {
        match self {
            Self::Superadmin => true,
            Self::Admin => matches!(target, Self::Editor | Self::Viewer),
            Self::Editor | Self::Viewer => false,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == normalized)
            .ok_or_else(|| {
                format!(
                    "Invalid role. Must be one of: {}",
                    Self::ALL.map(Role::as_str).join(", ")
                )
            })
    }
}

/// Stored account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub username: String,
    /// Optional display name
    pub name: Option<String>,
    /// PBKDF2 PHC string
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// Registration request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub role: Role,
}

/// Self-service profile changes; `None` leaves a field untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Identity of the caller for privilege-aware operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: i32,
    pub username: String,
    pub role: Role,
}

impl AuthContext {
    pub fn new(user_id: i32, username: impl Into<String>, role: Role) -> Self {
        Self {
            user_id,
            username: username.into(),
            role,
        }
    }
}

impl From<&User> for AuthContext {
    fn from(user: &User) -> Self {
        Self::new(user.id, user.username.clone(), user.role)
    }
}

// ===== Activity =====

/// Audit trail entry; user fields are captured at the time of the action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityEntry {
    pub id: i32,
    pub user_id: i32,
    pub username: String,
    pub user_role: Role,
    /// e.g. "Add Product", "Delete User"
    pub action: String,
    /// e.g. "product Paracetamol"
    pub target: String,
    pub details: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Activity entry about to be persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewActivity {
    pub user_id: i32,
    pub username: String,
    pub user_role: Role,
    pub action: String,
    pub target: String,
    pub details: Option<String>,
}
