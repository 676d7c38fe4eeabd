//! Contract layer - public models and errors
//!
//! NO serde derives on models - these are pure domain types.

pub mod error;
pub mod model;

pub use error::InventoryError;
pub use model::{
    ActivityEntry, AuthContext, DailyTotals, DatabaseSnapshot, DateRange, DateRangeSummary, Item,
    MovementDraft, MovementKind, NewActivity, NewOrder, NewUser, Order, OrderFilter, Permission,
    Product, ProductAnalytics, ProfileUpdate, RangeTotals, Role, StockEntry, StockMovement,
    Transaction, User,
};
