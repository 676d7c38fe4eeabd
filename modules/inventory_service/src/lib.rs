//! Inventory Service Module
//!
//! Stock ledger for a small shop: products with running add/sell totals,
//! history records, reports, customer orders with spreadsheet export, and
//! role-based accounts with an activity trail.

// Public exports
pub mod contract;
pub use contract::{
    error::InventoryError, AuthContext, MovementKind, Order, Product, Role, StockEntry,
};

pub mod config;
pub use config::Config;

pub mod module;
pub use module::InventoryModule;

// Internal modules (hidden from public API)
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
