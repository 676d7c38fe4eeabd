//! Entity to model mappers
//!
//! Conversions between SeaORM entities and contract models

use crate::contract::{
    ActivityEntry, Item, MovementDraft, NewActivity, Order, Product, Role, StockMovement, User,
};
use anyhow::{anyhow, Result};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use sea_orm::ActiveValue::{NotSet, Set};

use super::entity::{activity_log, item, order, product, stock_movement, user};

// ===== Money =====

/// Whole cents for a two-decimal amount
pub fn to_cents(amount: Decimal) -> Result<i64> {
    amount
        .round_dp(2)
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|cents| cents.to_i64())
        .ok_or_else(|| anyhow!("amount {} does not fit in a cents column", amount))
}

pub fn from_cents(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

// ===== Product Conversions =====

impl From<product::Model> for Product {
    fn from(entity: product::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            total_added_qty: entity.total_added_qty,
            total_added_amount: from_cents(entity.total_added_cents),
            total_sold_qty: entity.total_sold_qty,
            total_sold_amount: from_cents(entity.total_sold_cents),
            available_stock: entity.available_stock,
        }
    }
}

impl TryFrom<&Product> for product::ActiveModel {
    type Error = anyhow::Error;

    fn try_from(model: &Product) -> Result<Self> {
        Ok(Self {
            id: Set(model.id),
            name: Set(model.name.clone()),
            total_added_qty: Set(model.total_added_qty),
            total_added_cents: Set(to_cents(model.total_added_amount)?),
            total_sold_qty: Set(model.total_sold_qty),
            total_sold_cents: Set(to_cents(model.total_sold_amount)?),
            available_stock: Set(model.available_stock),
        })
    }
}

// ===== Stock Movement Conversions =====

impl TryFrom<stock_movement::Model> for StockMovement {
    type Error = anyhow::Error;

    fn try_from(entity: stock_movement::Model) -> Result<Self> {
        Ok(Self {
            id: entity.id,
            product_id: entity.product_id,
            kind: entity.kind.parse().map_err(|e: String| anyhow!(e))?,
            quantity: entity.quantity,
            unit_price: from_cents(entity.unit_price_cents),
            total_amount: from_cents(entity.total_cents),
            date: entity.date,
        })
    }
}

impl TryFrom<&MovementDraft> for stock_movement::ActiveModel {
    type Error = anyhow::Error;

    fn try_from(draft: &MovementDraft) -> Result<Self> {
        Ok(Self {
            id: NotSet,
            product_id: Set(draft.product_id),
            kind: Set(draft.kind.as_str().to_string()),
            quantity: Set(draft.quantity),
            unit_price_cents: Set(to_cents(draft.unit_price)?),
            total_cents: Set(to_cents(draft.total_amount)?),
            date: Set(draft.date),
        })
    }
}

// ===== Order Conversions =====

impl From<order::Model> for Order {
    fn from(entity: order::Model) -> Self {
        Self {
            id: entity.id,
            product_id: entity.product_id,
            product_name: entity.product_name,
            quantity_sold: entity.quantity_sold,
            total_amount: from_cents(entity.total_cents),
            customer_name: entity.customer_name,
            customer_address: entity.customer_address,
            customer_phone: entity.customer_phone,
            sale_date: entity.sale_date,
            created_by: entity.created_by,
        }
    }
}

// ===== Item Conversions =====

impl From<item::Model> for Item {
    fn from(entity: item::Model) -> Self {
        Self {
            id: entity.id,
            item_name: entity.item_name,
            created_at: entity.created_at,
        }
    }
}

// ===== User Conversions =====

fn parse_role(value: &str) -> Result<Role> {
    value
        .parse()
        .map_err(|_| anyhow!("unknown role '{}' in storage", value))
}

impl TryFrom<user::Model> for User {
    type Error = anyhow::Error;

    fn try_from(entity: user::Model) -> Result<Self> {
        Ok(Self {
            id: entity.id,
            role: parse_role(&entity.role)?,
            username: entity.username,
            name: entity.name,
            password_hash: entity.password_hash,
            created_at: entity.created_at,
        })
    }
}

impl From<&User> for user::ActiveModel {
    fn from(model: &User) -> Self {
        Self {
            id: Set(model.id),
            username: Set(model.username.clone()),
            name: Set(model.name.clone()),
            password_hash: Set(model.password_hash.clone()),
            role: Set(model.role.as_str().to_string()),
            created_at: Set(model.created_at),
        }
    }
}

// ===== Activity Conversions =====

impl TryFrom<activity_log::Model> for ActivityEntry {
    type Error = anyhow::Error;

    fn try_from(entity: activity_log::Model) -> Result<Self> {
        Ok(Self {
            id: entity.id,
            user_id: entity.user_id,
            user_role: parse_role(&entity.user_role)?,
            username: entity.username,
            action: entity.action,
            target: entity.target,
            details: entity.details,
            timestamp: entity.timestamp,
        })
    }
}

impl From<&NewActivity> for activity_log::ActiveModel {
    fn from(model: &NewActivity) -> Self {
        Self {
            id: NotSet,
            user_id: Set(model.user_id),
            username: Set(model.username.clone()),
            user_role: Set(model.user_role.as_str().to_string()),
            action: Set(model.action.clone()),
            target: Set(model.target.clone()),
            details: Set(model.details.clone()),
            timestamp: Set(chrono::Utc::now()),
        }
    }
}
