//! Domain service - stock ledger, reports, orders and items

use crate::contract::error::internal;
use crate::contract::{
    AuthContext, DailyTotals, DatabaseSnapshot, DateRange, DateRangeSummary, InventoryError, Item,
    MovementDraft, MovementKind, NewOrder, Order, OrderFilter, Permission, Product,
    ProductAnalytics, StockEntry, Transaction,
};
use super::activity::ActivityLog;
use super::ledger;
use super::repository::{ItemRepository, LedgerRepository, OrderDraft};
use super::validation::{
    line_total, normalize_price, optional_text, validate_name, validate_quantity,
};
use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Fail with `Forbidden` unless the caller's role grants `permission`
pub fn authorize(ctx: &AuthContext, permission: Permission) -> Result<(), InventoryError> {
    if ctx.role.allows(permission) {
        Ok(())
    } else {
        tracing::debug!(user = %ctx.username, role = %ctx.role, ?permission, "permission denied");
        Err(InventoryError::forbidden("Insufficient permissions"))
    }
}

/// `$12.50` style rendering used in messages and exports
pub fn format_money(amount: Decimal) -> String {
    format!("${:.2}", amount)
}

/// Domain service for inventory management
pub struct Service {
    ledger: Arc<dyn LedgerRepository>,
    items: Arc<dyn ItemRepository>,
    activity: ActivityLog,
    /// Serialises read-modify-write cycles on product totals
    write_lock: Mutex<()>,
}

impl Service {
    /// Create a new service instance
    pub fn new(
        ledger: Arc<dyn LedgerRepository>,
        items: Arc<dyn ItemRepository>,
        activity: ActivityLog,
    ) -> Self {
        Self {
            ledger,
            items,
            activity,
            write_lock: Mutex::new(()),
        }
    }

    // ===== Stock Operations =====

    /// Record purchased stock, creating the product on first use
    pub async fn add_stock(
        &self,
        ctx: &AuthContext,
        entry: StockEntry,
    ) -> Result<Product, InventoryError> {
        authorize(ctx, Permission::EditInventory)?;
        self.record_stock(ctx, MovementKind::Add, entry).await
    }

    /// Record a sale without an order; the product must already exist
    pub async fn sell_stock(
        &self,
        ctx: &AuthContext,
        entry: StockEntry,
    ) -> Result<Product, InventoryError> {
        authorize(ctx, Permission::EditInventory)?;
        self.record_stock(ctx, MovementKind::Sell, entry).await
    }

    async fn record_stock(
        &self,
        ctx: &AuthContext,
        kind: MovementKind,
        entry: StockEntry,
    ) -> Result<Product, InventoryError> {
        let name = validate_name("product_name", &entry.product_name)?;
        let quantity = validate_quantity("quantity", entry.quantity)?;
        let unit_price = normalize_price("unit_price", entry.unit_price)?;
        let total_amount = line_total(quantity, unit_price)?;

        let product = {
            let _guard = self.write_lock.lock().await;

            let existing = self
                .ledger
                .find_product_by_name(&name)
                .await
                .map_err(internal)?;

            let mut product = match (existing, kind) {
                (Some(product), _) => product,
                (None, MovementKind::Add) => {
                    tracing::info!(product = %name, "Creating new product");
                    ledger::empty_product(0, name.clone())
                }
                (None, MovementKind::Sell) => {
                    return Err(InventoryError::not_found("Product", &name));
                }
            };

            ledger::apply_movement(&mut product, kind, quantity, total_amount)?;
            let draft = MovementDraft {
                product_id: product.id,
                kind,
                quantity,
                unit_price,
                total_amount,
                date: entry.date,
            };
            let (product, movement) = self
                .ledger
                .record_movement(&product, &draft)
                .await
                .map_err(internal)?;

            tracing::info!(
                product = %product.name,
                movement_id = movement.id,
                kind = %kind,
                quantity,
                available = product.available_stock,
                "Stock movement recorded"
            );
            product
        };

        let (action, verb) = match kind {
            MovementKind::Add => ("Add Product", "Added"),
            MovementKind::Sell => ("Sell Product", "Sold"),
        };
        self.activity
            .record(
                ctx,
                action,
                format!("product {}", product.name),
                Some(format!(
                    "{} {} units at {} each (Total: {})",
                    verb,
                    quantity,
                    format_money(unit_price),
                    format_money(total_amount)
                )),
            )
            .await;

        Ok(product)
    }

    /// Delete an add or sell history record and roll back its totals
    pub async fn delete_movement(
        &self,
        ctx: &AuthContext,
        kind: MovementKind,
        movement_id: i32,
    ) -> Result<Product, InventoryError> {
        authorize(ctx, Permission::DeleteHistory)?;

        let resource = match kind {
            MovementKind::Add => "Add history record",
            MovementKind::Sell => "Sell history record",
        };

        let (product, movement) = {
            let _guard = self.write_lock.lock().await;

            let movement = self
                .ledger
                .find_movement(movement_id)
                .await
                .map_err(internal)?
                .filter(|m| m.kind == kind)
                .ok_or_else(|| InventoryError::not_found(resource, movement_id))?;

            let mut product = self
                .ledger
                .find_product(movement.product_id)
                .await
                .map_err(internal)?
                .ok_or_else(|| InventoryError::not_found("Associated product", movement.product_id))?;

            ledger::revert_movement(&mut product, &movement)?;
            let product = self
                .ledger
                .remove_movement(&product, movement.id)
                .await
                .map_err(internal)?;
            (product, movement)
        };

        tracing::info!(
            product = %product.name,
            movement_id,
            kind = %kind,
            "Stock movement deleted"
        );

        let action = match kind {
            MovementKind::Add => "Delete Add History",
            MovementKind::Sell => "Delete Sell History",
        };
        self.activity
            .record(
                ctx,
                action,
                format!("product {}", product.name),
                Some(format!(
                    "Deleted {} history record (ID: {}) - {} units @ {}",
                    kind,
                    movement_id,
                    movement.quantity,
                    format_money(movement.unit_price)
                )),
            )
            .await;

        Ok(product)
    }

    // ===== Reports =====

    /// All products with their running totals
    pub async fn summary(&self, ctx: &AuthContext) -> Result<Vec<Product>, InventoryError> {
        authorize(ctx, Permission::ViewInventory)?;
        self.ledger.list_products().await.map_err(internal)
    }

    /// All products plus movement totals within `range`
    pub async fn date_range_summary(
        &self,
        ctx: &AuthContext,
        range: DateRange,
    ) -> Result<DateRangeSummary, InventoryError> {
        authorize(ctx, Permission::ViewInventory)?;
        let products = self.ledger.list_products().await.map_err(internal)?;
        let movements = self
            .ledger
            .list_movements(None, Some(range))
            .await
            .map_err(internal)?;

        Ok(DateRangeSummary {
            products,
            totals: ledger::range_totals(&movements),
        })
    }

    /// Products with average prices and profit/loss
    pub async fn enhanced_summary(
        &self,
        ctx: &AuthContext,
    ) -> Result<Vec<ProductAnalytics>, InventoryError> {
        let products = self.summary(ctx).await?;
        Ok(products.iter().map(ledger::analytics).collect())
    }

    pub async fn product_names(&self, ctx: &AuthContext) -> Result<Vec<String>, InventoryError> {
        let products = self.summary(ctx).await?;
        Ok(products.into_iter().map(|p| p.name).collect())
    }

    /// Per-day add/sell totals, oldest day first
    pub async fn daily_totals(
        &self,
        ctx: &AuthContext,
        range: Option<DateRange>,
    ) -> Result<Vec<DailyTotals>, InventoryError> {
        authorize(ctx, Permission::ViewInventory)?;
        let movements = self
            .ledger
            .list_movements(None, range)
            .await
            .map_err(internal)?;
        Ok(ledger::daily_totals(&movements))
    }

    /// Individual add/sell records with product names, newest first
    pub async fn transactions(
        &self,
        ctx: &AuthContext,
        range: Option<DateRange>,
    ) -> Result<Vec<Transaction>, InventoryError> {
        authorize(ctx, Permission::ViewInventory)?;
        let products = self.ledger.list_products().await.map_err(internal)?;
        let movements = self
            .ledger
            .list_movements(None, range)
            .await
            .map_err(internal)?;
        Ok(ledger::journal(movements, &products))
    }

    /// Raw dump of products and both history tables
    pub async fn snapshot(&self, ctx: &AuthContext) -> Result<DatabaseSnapshot, InventoryError> {
        authorize(ctx, Permission::InspectDatabase)?;
        let products = self.ledger.list_products().await.map_err(internal)?;
        let added = self
            .ledger
            .list_movements(Some(MovementKind::Add), None)
            .await
            .map_err(internal)?;
        let sold = self
            .ledger
            .list_movements(Some(MovementKind::Sell), None)
            .await
            .map_err(internal)?;

        let mut additions = ledger::journal(added, &products);
        let mut sales = ledger::journal(sold, &products);
        additions.sort_by_key(|t| t.id);
        sales.sort_by_key(|t| t.id);

        Ok(DatabaseSnapshot {
            products,
            additions,
            sales,
        })
    }

    // ===== Orders =====

    /// Sell stock to a customer and record the order
    pub async fn create_order(
        &self,
        ctx: &AuthContext,
        request: NewOrder,
    ) -> Result<Order, InventoryError> {
        authorize(ctx, Permission::EditInventory)?;
        let quantity = validate_quantity("quantity_sold", request.quantity_sold)?;
        let unit_price = normalize_price("unit_price", request.unit_price)?;
        let total_amount = line_total(quantity, unit_price)?;
        let sale_date = chrono::Utc::now();

        let order = {
            let _guard = self.write_lock.lock().await;

            let mut product = self
                .ledger
                .find_product(request.product_id)
                .await
                .map_err(internal)?
                .ok_or_else(|| InventoryError::not_found("Product", request.product_id))?;

            ledger::apply_movement(&mut product, MovementKind::Sell, quantity, total_amount)?;

            let movement = MovementDraft {
                product_id: product.id,
                kind: MovementKind::Sell,
                quantity,
                unit_price,
                total_amount,
                date: sale_date.date_naive(),
            };
            let draft = OrderDraft {
                product_name: product.name.clone(),
                quantity_sold: quantity,
                total_amount,
                customer_name: optional_text(request.customer_name),
                customer_address: optional_text(request.customer_address),
                customer_phone: optional_text(request.customer_phone),
                sale_date,
                created_by: ctx.username.clone(),
            };

            let (product, order) = self
                .ledger
                .record_order(&product, &movement, &draft)
                .await
                .map_err(internal)?;

            tracing::info!(
                order_id = order.id,
                product = %product.name,
                quantity,
                available = product.available_stock,
                "Order created"
            );
            order
        };

        self.activity
            .record(
                ctx,
                "Create Order",
                format!("product {}", order.product_name),
                Some(format!(
                    "Sold {} units to {} (Total: {})",
                    order.quantity_sold,
                    order.customer_name.as_deref().unwrap_or("Customer"),
                    format_money(order.total_amount)
                )),
            )
            .await;

        Ok(order)
    }

    pub async fn list_orders(
        &self,
        ctx: &AuthContext,
        filter: &OrderFilter,
    ) -> Result<Vec<Order>, InventoryError> {
        authorize(ctx, Permission::EditInventory)?;
        self.ledger.list_orders(filter).await.map_err(internal)
    }

    /// Every order, for the spreadsheet export
    pub async fn export_orders(&self, ctx: &AuthContext) -> Result<Vec<Order>, InventoryError> {
        authorize(ctx, Permission::ExportOrders)?;
        self.ledger
            .list_orders(&OrderFilter::default())
            .await
            .map_err(internal)
    }

    // ===== Items =====

    pub async fn create_item(
        &self,
        ctx: &AuthContext,
        item_name: &str,
    ) -> Result<Item, InventoryError> {
        authorize(ctx, Permission::EditInventory)?;
        let item_name = validate_name("item_name", item_name)?;

        let item = {
            let _guard = self.write_lock.lock().await;
            if self
                .items
                .find_by_name(&item_name)
                .await
                .map_err(internal)?
                .is_some()
            {
                return Err(InventoryError::conflict(format!(
                    "Item '{}' already exists",
                    item_name
                )));
            }
            self.items.create(&item_name).await.map_err(internal)?
        };

        self.activity
            .record(
                ctx,
                "Create Item",
                format!("item {}", item.item_name),
                Some("Created new item".to_string()),
            )
            .await;

        Ok(item)
    }

    pub async fn list_items(&self, ctx: &AuthContext) -> Result<Vec<Item>, InventoryError> {
        authorize(ctx, Permission::ViewInventory)?;
        self.items.list_all().await.map_err(internal)
    }
}
