//! SeaORM repository implementations

use crate::contract::{
    ActivityEntry, DateRange, InventoryError, Item, MovementDraft, MovementKind, NewActivity, Order, OrderFilter,
    Product, StockMovement, User,
};
use crate::domain::repository::{
    ActivityRepository, ItemRepository, LedgerRepository, OrderDraft, UserRepository,
};
use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime, Utc};
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, SqlErr, TransactionTrait,
};
use std::sync::Arc;

use super::entity::{activity_log, item, order, product, stock_movement, user};
use super::mapper::to_cents;

fn start_of_day(date: NaiveDate) -> chrono::DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

// ===== Ledger Repository =====

pub struct SeaOrmLedgerRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmLedgerRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LedgerRepository for SeaOrmLedgerRepository {
    async fn find_product_by_name(&self, name: &str) -> Result<Option<Product>> {
        let result = product::Entity::find()
            .filter(product::Column::Name.eq(name))
            .one(&*self.db)
            .await?;

        Ok(result.map(Into::into))
    }

    async fn find_product(&self, id: i32) -> Result<Option<Product>> {
        let result = product::Entity::find_by_id(id).one(&*self.db).await?;
        Ok(result.map(Into::into))
    }

    async fn list_products(&self) -> Result<Vec<Product>> {
        let results = product::Entity::find()
            .order_by_asc(product::Column::Name)
            .all(&*self.db)
            .await?;

        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn record_movement(
        &self,
        product: &Product,
        movement: &MovementDraft,
    ) -> Result<(Product, StockMovement)> {
        let txn = self.db.begin().await?;

        let mut active = product::ActiveModel::try_from(product)?;
        let saved = if product.id == 0 {
            active.id = NotSet;
            active.insert(&txn).await?
        } else {
            active.update(&txn).await?
        };
        let mut draft = stock_movement::ActiveModel::try_from(movement)?;
        draft.product_id = Set(saved.id);
        let inserted = draft.insert(&txn).await?;

        txn.commit().await?;
        Ok((saved.into(), inserted.try_into()?))
    }

    async fn find_movement(&self, id: i32) -> Result<Option<StockMovement>> {
        let result = stock_movement::Entity::find_by_id(id)
            .one(&*self.db)
            .await?;

        result.map(TryInto::try_into).transpose()
    }

    async fn remove_movement(&self, product: &Product, movement_id: i32) -> Result<Product> {
        let txn = self.db.begin().await?;

        let saved = product::ActiveModel::try_from(product)?.update(&txn).await?;
        let deleted = stock_movement::Entity::delete_by_id(movement_id)
            .exec(&txn)
            .await?;
        if deleted.rows_affected == 0 {
            bail!("stock movement {} vanished before delete", movement_id);
        }

        txn.commit().await?;
        Ok(saved.into())
    }

    async fn list_movements(
        &self,
        kind: Option<MovementKind>,
        range: Option<DateRange>,
    ) -> Result<Vec<StockMovement>> {
        let mut query = stock_movement::Entity::find();

        if let Some(kind) = kind {
            query = query.filter(stock_movement::Column::Kind.eq(kind.as_str()));
        }
        if let Some(range) = range {
            query = query.filter(stock_movement::Column::Date.between(range.start, range.end));
        }

        let results = query
            .order_by_asc(stock_movement::Column::Date)
            .order_by_asc(stock_movement::Column::Id)
            .all(&*self.db)
            .await?;

        results.into_iter().map(TryInto::try_into).collect()
    }

    async fn record_order(
        &self,
        product: &Product,
        movement: &MovementDraft,
        order: &OrderDraft,
    ) -> Result<(Product, Order)> {
        let order_active = order::ActiveModel {
            id: NotSet,
            product_id: Set(product.id),
            product_name: Set(order.product_name.clone()),
            quantity_sold: Set(order.quantity_sold),
            total_cents: Set(to_cents(order.total_amount)?),
            customer_name: Set(order.customer_name.clone()),
            customer_address: Set(order.customer_address.clone()),
            customer_phone: Set(order.customer_phone.clone()),
            sale_date: Set(order.sale_date),
            created_by: Set(order.created_by.clone()),
        };

        let txn = self.db.begin().await?;

        let saved = product::ActiveModel::try_from(product)?.update(&txn).await?;
        stock_movement::ActiveModel::try_from(movement)?
            .insert(&txn)
            .await?;
        let inserted = order_active.insert(&txn).await?;

        txn.commit().await?;
        Ok((saved.into(), inserted.into()))
    }

    async fn list_orders(&self, filter: &OrderFilter) -> Result<Vec<Order>> {
        let mut query = order::Entity::find();

        if let Some(range) = filter.range {
            query = query.filter(order::Column::SaleDate.gte(start_of_day(range.start)));
            if let Some(next_day) = range.end.succ_opt() {
                query = query.filter(order::Column::SaleDate.lt(start_of_day(next_day)));
            }
        }
        if let Some(product_id) = filter.product_id {
            query = query.filter(order::Column::ProductId.eq(product_id));
        }

        let results = query
            .order_by_desc(order::Column::SaleDate)
            .order_by_desc(order::Column::Id)
            .all(&*self.db)
            .await?;

        Ok(results.into_iter().map(Into::into).collect())
    }
}

// ===== Item Repository =====

pub struct SeaOrmItemRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmItemRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ItemRepository for SeaOrmItemRepository {
    async fn create(&self, item_name: &str) -> Result<Item> {
        let active = item::ActiveModel {
            id: NotSet,
            item_name: Set(item_name.to_string()),
            created_at: Set(Utc::now()),
        };
        let result = active.insert(&*self.db).await?;
        Ok(result.into())
    }

    async fn find_by_name(&self, item_name: &str) -> Result<Option<Item>> {
        let result = item::Entity::find()
            .filter(item::Column::ItemName.eq(item_name))
            .one(&*self.db)
            .await?;

        Ok(result.map(Into::into))
    }

    async fn list_all(&self) -> Result<Vec<Item>> {
        let results = item::Entity::find()
            .order_by_asc(item::Column::ItemName)
            .all(&*self.db)
            .await?;

        Ok(results.into_iter().map(Into::into).collect())
    }
}

// ===== User Repository =====

pub struct SeaOrmUserRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmUserRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn create(&self, user: &User) -> Result<User> {
        let mut active = user::ActiveModel::from(user);
        active.id = NotSet;

        let result = active.insert(&*self.db).await.map_err(username_conflict)?;
        result.try_into()
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>> {
        let result = user::Entity::find_by_id(id).one(&*self.db).await?;
        result.map(TryInto::try_into).transpose()
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let result = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&*self.db)
            .await?;

        result.map(TryInto::try_into).transpose()
    }

    async fn list_all(&self) -> Result<Vec<User>> {
        let results = user::Entity::find()
            .order_by_asc(user::Column::Id)
            .all(&*self.db)
            .await?;

        results.into_iter().map(TryInto::try_into).collect()
    }

    async fn update(&self, user: &User) -> Result<User> {
        let result = user::ActiveModel::from(user)
            .update(&*self.db)
            .await
            .map_err(username_conflict)?;
        result.try_into()
    }

    async fn delete(&self, id: i32) -> Result<()> {
        let deleted = user::Entity::delete_by_id(id).exec(&*self.db).await?;
        if deleted.rows_affected == 0 {
            bail!("user {} not found", id);
        }
        Ok(())
    }
}

/// A write that lost the race for a username surfaces as a conflict
fn username_conflict(err: DbErr) -> anyhow::Error {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            anyhow::Error::new(InventoryError::conflict("Username already exists"))
        }
        _ => err.into(),
    }
}

// ===== Activity Repository =====

pub struct SeaOrmActivityRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmActivityRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ActivityRepository for SeaOrmActivityRepository {
    async fn record(&self, activity: &NewActivity) -> Result<ActivityEntry> {
        let result = activity_log::ActiveModel::from(activity)
            .insert(&*self.db)
            .await?;
        result.try_into()
    }

    async fn list_recent(&self, limit: u64) -> Result<Vec<ActivityEntry>> {
        let results = activity_log::Entity::find()
            .order_by_desc(activity_log::Column::Timestamp)
            .order_by_desc(activity_log::Column::Id)
            .limit(limit)
            .all(&*self.db)
            .await?;

        results.into_iter().map(TryInto::try_into).collect()
    }
}
