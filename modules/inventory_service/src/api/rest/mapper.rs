//! Contract model to DTO mappers

use crate::contract::{
    ActivityEntry, DailyTotals, DateRangeSummary, Item, Order, Product, ProductAnalytics,
    Transaction, User,
};
use super::dto::*;

impl From<Product> for ProductDto {
    fn from(model: Product) -> Self {
        Self {
            id: model.id,
            name: model.name,
            total_added_qty: model.total_added_qty,
            total_added_amount: model.total_added_amount,
            total_sold_qty: model.total_sold_qty,
            total_sold_amount: model.total_sold_amount,
            available_stock: model.available_stock,
        }
    }
}

impl From<Product> for ProductDetailDto {
    fn from(model: Product) -> Self {
        Self {
            id: model.id,
            name: model.name,
            available_stock: model.available_stock,
        }
    }
}

impl From<ProductAnalytics> for ProductAnalyticsDto {
    fn from(model: ProductAnalytics) -> Self {
        let product = model.product;
        Self {
            id: product.id,
            name: product.name,
            total_added_qty: product.total_added_qty,
            total_added_amount: product.total_added_amount,
            total_sold_qty: product.total_sold_qty,
            total_sold_amount: product.total_sold_amount,
            available_stock: product.available_stock,
            avg_purchase_price: model.avg_purchase_price,
            avg_selling_price: model.avg_selling_price,
            profit_loss: model.profit_loss,
        }
    }
}

impl From<DateRangeSummary> for DateRangeSummaryResponse {
    fn from(model: DateRangeSummary) -> Self {
        Self {
            products: model.products.into_iter().map(Into::into).collect(),
            total_added_qty_in_range: model.totals.added_qty,
            total_added_amount_in_range: model.totals.added_amount,
            total_sold_qty_in_range: model.totals.sold_qty,
            total_sold_amount_in_range: model.totals.sold_amount,
        }
    }
}

impl From<DailyTotals> for DailyHistoryItem {
    fn from(model: DailyTotals) -> Self {
        Self {
            date: model.date,
            total_added_qty: model.totals.added_qty,
            total_added_amount: model.totals.added_amount,
            total_sold_qty: model.totals.sold_qty,
            total_sold_amount: model.totals.sold_amount,
        }
    }
}

impl From<Transaction> for TransactionDto {
    fn from(model: Transaction) -> Self {
        Self {
            id: model.id,
            date: model.date,
            product_name: model.product_name,
            transaction_type: model.kind.to_string(),
            quantity: model.quantity,
            unit_price: model.unit_price,
            total_amount: model.total_amount,
        }
    }
}

impl From<Transaction> for HistoryRecordDto {
    fn from(model: Transaction) -> Self {
        Self {
            id: model.id,
            product_id: model.product_id,
            product_name: model.product_name,
            quantity: model.quantity,
            unit_price: model.unit_price,
            total_amount: model.total_amount,
            date: model.date,
        }
    }
}

impl From<Order> for OrderDto {
    fn from(model: Order) -> Self {
        Self {
            id: model.id,
            product_id: model.product_id,
            product_name: model.product_name,
            quantity_sold: model.quantity_sold,
            total_amount: model.total_amount,
            customer_name: model.customer_name,
            customer_address: model.customer_address,
            customer_phone: model.customer_phone,
            sale_date: model.sale_date,
            created_by: model.created_by,
        }
    }
}

impl From<Item> for ItemDto {
    fn from(model: Item) -> Self {
        Self {
            id: model.id,
            item_name: model.item_name,
            created_at: model.created_at,
        }
    }
}

impl From<User> for UserDto {
    fn from(model: User) -> Self {
        Self {
            id: model.id,
            username: model.username,
            name: model.name,
            role: model.role.to_string(),
            created_at: model.created_at,
        }
    }
}

impl From<ActivityEntry> for ActivityLogDto {
    fn from(model: ActivityEntry) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            username: model.username,
            user_role: model.user_role.to_string(),
            action: model.action,
            target: model.target,
            details: model.details,
            timestamp: model.timestamp,
        }
    }
}
