//! Domain layer - business logic and services

pub mod accounts;
pub mod activity;
pub mod auth;
pub mod ledger;
pub mod repository;
pub mod service;
pub mod validation;

pub use accounts::{AccountService, LoginSession, SUPERADMIN_USERNAME};
pub use activity::ActivityLog;
pub use auth::{PasswordHashing, TokenIssuer};
pub use repository::{ActivityRepository, ItemRepository, LedgerRepository, UserRepository};
pub use service::{authorize, Service};
