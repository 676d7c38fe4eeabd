//! HTTP request handlers - thin layer that delegates to domain services

use crate::contract::{
    InventoryError, MovementKind, NewOrder, NewUser, OrderFilter, Permission, ProfileUpdate, Role,
    StockEntry,
};
use crate::domain::service::format_money;
use crate::domain::validation::{normalize_price, parse_date, parse_date_range};
use crate::domain::{authorize, AccountService, Service};
use super::auth::CurrentUser;
use super::dto::*;
use super::error::{map_domain_error, Problem};
use super::export::{export_filename, orders_workbook, XLSX_CONTENT_TYPE};
use axum::{
    extract::{Path, Query},
    http::header,
    response::{IntoResponse, Response},
    Extension, Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::sync::Arc;

const API_VERSION: &str = "1.0.0";

/// Optional `start`/`end` date filters (YYYY-MM-DD); both must be present to apply
#[derive(Debug, Default, Deserialize)]
pub struct RangeQuery {
    pub start: Option<String>,
    pub end: Option<String>,
}

impl RangeQuery {
    fn range(&self) -> Result<Option<crate::contract::DateRange>, Problem> {
        parse_date_range(self.start.as_deref(), self.end.as_deref()).map_err(map_domain_error)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct OrdersQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub product_id: Option<i32>,
}

// ===== Auth Handlers =====

pub async fn login(
    Extension(accounts): Extension<Arc<AccountService>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, Problem> {
    let session = accounts
        .login(&req.username, &req.password)
        .await
        .map_err(map_domain_error)?;

    let message = format!("Welcome back, {}!", session.user.username);
    Ok(Json(AuthResponse {
        success: true,
        message,
        token: Some(TokenDto {
            access_token: session.access_token,
            token_type: "bearer".to_string(),
            expires_in: session.expires_in,
            user: session.user.into(),
        }),
    }))
}

pub async fn register(
    Extension(accounts): Extension<Arc<AccountService>>,
    CurrentUser(ctx): CurrentUser,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, Problem> {
    authorize(&ctx, Permission::ManageUsers).map_err(map_domain_error)?;
    let role: Role = req
        .role
        .as_deref()
        .unwrap_or("viewer")
        .parse()
        .map_err(|e: String| map_domain_error(InventoryError::validation(e)))?;

    let user = accounts
        .register(
            &ctx,
            NewUser {
                username: req.username,
                password: req.password,
                role,
            },
        )
        .await
        .map_err(map_domain_error)?;

    Ok(Json(AuthResponse {
        success: true,
        message: format!(
            "User {} created successfully with role {}",
            user.username, user.role
        ),
        token: None,
    }))
}

pub async fn list_users(
    Extension(accounts): Extension<Arc<AccountService>>,
    CurrentUser(ctx): CurrentUser,
) -> Result<Json<UsersResponse>, Problem> {
    let users = accounts.list_users(&ctx).await.map_err(map_domain_error)?;
    Ok(Json(UsersResponse {
        users: users.into_iter().map(Into::into).collect(),
    }))
}

pub async fn delete_user(
    Extension(accounts): Extension<Arc<AccountService>>,
    CurrentUser(ctx): CurrentUser,
    Path(user_id): Path<i32>,
) -> Result<Json<DeleteUserResponse>, Problem> {
    let username = accounts
        .delete_user(&ctx, user_id)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(DeleteUserResponse {
        success: true,
        message: format!("User {} deleted successfully", username),
    }))
}

pub async fn activity_logs(
    Extension(accounts): Extension<Arc<AccountService>>,
    CurrentUser(ctx): CurrentUser,
) -> Result<Json<ActivityLogResponse>, Problem> {
    let logs = accounts.activity_logs(&ctx).await.map_err(map_domain_error)?;
    Ok(Json(ActivityLogResponse {
        logs: logs.into_iter().map(Into::into).collect(),
    }))
}

// ===== Profile Handlers =====

pub async fn current_user(
    Extension(accounts): Extension<Arc<AccountService>>,
    CurrentUser(ctx): CurrentUser,
) -> Result<Json<UserDto>, Problem> {
    let user = accounts.profile(&ctx).await.map_err(map_domain_error)?;
    Ok(Json(user.into()))
}

pub async fn update_profile(
    Extension(accounts): Extension<Arc<AccountService>>,
    CurrentUser(ctx): CurrentUser,
    Json(req): Json<ProfileUpdateRequest>,
) -> Result<Json<MessageResponse>, Problem> {
    accounts
        .update_profile(
            &ctx,
            ProfileUpdate {
                name: req.name,
                username: req.username,
                password: req.password,
            },
        )
        .await
        .map_err(map_domain_error)?;

    Ok(Json(MessageResponse {
        message: "Profile updated successfully".to_string(),
    }))
}

// ===== Item Handlers =====

pub async fn create_item(
    Extension(service): Extension<Arc<Service>>,
    CurrentUser(ctx): CurrentUser,
    Json(req): Json<ItemCreateRequest>,
) -> Result<Json<ItemCreateResponse>, Problem> {
    let item = service
        .create_item(&ctx, &req.item_name)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(ItemCreateResponse {
        success: true,
        message: format!("Item '{}' created successfully", item.item_name),
        item: Some(item.into()),
    }))
}

pub async fn list_items(
    Extension(service): Extension<Arc<Service>>,
    CurrentUser(ctx): CurrentUser,
) -> Result<Json<ItemsListResponse>, Problem> {
    let items = service.list_items(&ctx).await.map_err(map_domain_error)?;
    Ok(Json(ItemsListResponse {
        items: items.into_iter().map(Into::into).collect(),
    }))
}

// ===== Stock Handlers =====

pub async fn add_stock(
    Extension(service): Extension<Arc<Service>>,
    CurrentUser(ctx): CurrentUser,
    Json(req): Json<AddProductRequest>,
) -> Result<Json<ProductResponse>, Problem> {
    let date = parse_date("date", &req.date).map_err(map_domain_error)?;
    let quantity = req.quantity;

    let product = service
        .add_stock(
            &ctx,
            StockEntry {
                product_name: req.product_name,
                quantity,
                unit_price: req.unit_price,
                date,
            },
        )
        .await
        .map_err(map_domain_error)?;

    let unit_price = normalize_price("unit_price", req.unit_price).map_err(map_domain_error)?;
    let message = format!(
        "Successfully added {} units to {} at {} each (Total: {})",
        quantity,
        product.name,
        format_money(unit_price),
        format_money(unit_price * Decimal::from(quantity))
    );
    Ok(Json(ProductResponse {
        success: true,
        message,
        product: Some(product.into()),
    }))
}

async fn delete_history(
    service: Arc<Service>,
    ctx: crate::contract::AuthContext,
    kind: MovementKind,
    id: i32,
) -> Result<Json<DeleteResponse>, Problem> {
    let product = service
        .delete_movement(&ctx, kind, id)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(DeleteResponse {
        success: true,
        message: format!(
            "Successfully deleted {} history record (ID: {}). Product totals updated.",
            kind, id
        ),
        updated_product: Some(product.into()),
    }))
}

pub async fn delete_add_history(
    Extension(service): Extension<Arc<Service>>,
    CurrentUser(ctx): CurrentUser,
    Path(id): Path<i32>,
) -> Result<Json<DeleteResponse>, Problem> {
    delete_history(service, ctx, MovementKind::Add, id).await
}

pub async fn delete_sell_history(
    Extension(service): Extension<Arc<Service>>,
    CurrentUser(ctx): CurrentUser,
    Path(id): Path<i32>,
) -> Result<Json<DeleteResponse>, Problem> {
    delete_history(service, ctx, MovementKind::Sell, id).await
}

// ===== Report Handlers =====

/// Plain summary, or range totals when both `start` and `end` are given
pub async fn summary(
    Extension(service): Extension<Arc<Service>>,
    CurrentUser(ctx): CurrentUser,
    Query(query): Query<RangeQuery>,
) -> Result<Response, Problem> {
    match query.range()? {
        Some(range) => {
            let summary = service
                .date_range_summary(&ctx, range)
                .await
                .map_err(map_domain_error)?;
            Ok(Json(DateRangeSummaryResponse::from(summary)).into_response())
        }
        None => {
            let products = service.summary(&ctx).await.map_err(map_domain_error)?;
            Ok(Json(SummaryResponse {
                products: products.into_iter().map(Into::into).collect(),
            })
            .into_response())
        }
    }
}

pub async fn enhanced_summary(
    Extension(service): Extension<Arc<Service>>,
    CurrentUser(ctx): CurrentUser,
) -> Result<Json<EnhancedSummaryResponse>, Problem> {
    let products = service
        .enhanced_summary(&ctx)
        .await
        .map_err(map_domain_error)?;
    Ok(Json(EnhancedSummaryResponse {
        products: products.into_iter().map(Into::into).collect(),
    }))
}

pub async fn product_names(
    Extension(service): Extension<Arc<Service>>,
    CurrentUser(ctx): CurrentUser,
) -> Result<Json<ProductNamesResponse>, Problem> {
    let products = service.product_names(&ctx).await.map_err(map_domain_error)?;
    Ok(Json(ProductNamesResponse { products }))
}

pub async fn product_details(
    Extension(service): Extension<Arc<Service>>,
    CurrentUser(ctx): CurrentUser,
) -> Result<Json<ProductDetailsResponse>, Problem> {
    let products = service.summary(&ctx).await.map_err(map_domain_error)?;
    Ok(Json(ProductDetailsResponse {
        products: products.into_iter().map(Into::into).collect(),
    }))
}

/// Transaction journal
pub async fn daily_history(
    Extension(service): Extension<Arc<Service>>,
    CurrentUser(ctx): CurrentUser,
    Query(query): Query<RangeQuery>,
) -> Result<Json<TransactionHistoryResponse>, Problem> {
    let transactions = service
        .transactions(&ctx, query.range()?)
        .await
        .map_err(map_domain_error)?;
    Ok(Json(TransactionHistoryResponse {
        transactions: transactions.into_iter().map(Into::into).collect(),
    }))
}

pub async fn daily_totals(
    Extension(service): Extension<Arc<Service>>,
    CurrentUser(ctx): CurrentUser,
    Query(query): Query<RangeQuery>,
) -> Result<Json<DailyHistoryResponse>, Problem> {
    let days = service
        .daily_totals(&ctx, query.range()?)
        .await
        .map_err(map_domain_error)?;
    Ok(Json(DailyHistoryResponse {
        daily_history: days.into_iter().map(Into::into).collect(),
    }))
}

pub async fn database_view(
    Extension(service): Extension<Arc<Service>>,
    CurrentUser(ctx): CurrentUser,
) -> Result<Json<DatabaseViewResponse>, Problem> {
    let snapshot = service.snapshot(&ctx).await.map_err(map_domain_error)?;

    let summary = DatabaseSummaryDto {
        total_products: snapshot.products.len(),
        total_transactions: snapshot.additions.len() + snapshot.sales.len(),
        total_add_transactions: snapshot.additions.len(),
        total_sell_transactions: snapshot.sales.len(),
    };
    Ok(Json(DatabaseViewResponse {
        products: snapshot.products.into_iter().map(Into::into).collect(),
        add_history: snapshot.additions.into_iter().map(Into::into).collect(),
        sell_history: snapshot.sales.into_iter().map(Into::into).collect(),
        summary,
    }))
}

// ===== Order Handlers =====

pub async fn create_order(
    Extension(service): Extension<Arc<Service>>,
    CurrentUser(ctx): CurrentUser,
    Json(req): Json<CreateOrderRequest>,
) -> Result<Json<CreateOrderResponse>, Problem> {
    let order = service
        .create_order(
            &ctx,
            NewOrder {
                product_id: req.product_id,
                quantity_sold: req.quantity_sold,
                unit_price: req.unit_price,
                customer_name: req.customer_name,
                customer_address: req.customer_address,
                customer_phone: req.customer_phone,
            },
        )
        .await
        .map_err(map_domain_error)?;

    let message = format!(
        "Order created successfully! Sold {} units of {} to {}",
        order.quantity_sold,
        order.product_name,
        order.customer_name.as_deref().unwrap_or("Customer")
    );
    Ok(Json(CreateOrderResponse {
        success: true,
        message,
        order: Some(order.into()),
    }))
}

pub async fn list_orders(
    Extension(service): Extension<Arc<Service>>,
    CurrentUser(ctx): CurrentUser,
    Query(query): Query<OrdersQuery>,
) -> Result<Json<OrdersResponse>, Problem> {
    let range = parse_date_range(query.start_date.as_deref(), query.end_date.as_deref())
        .map_err(map_domain_error)?;
    let filter = OrderFilter {
        range,
        product_id: query.product_id,
    };

    let orders = service
        .list_orders(&ctx, &filter)
        .await
        .map_err(map_domain_error)?;
    Ok(Json(OrdersResponse {
        orders: orders.into_iter().map(Into::into).collect(),
    }))
}

pub async fn export_orders(
    Extension(service): Extension<Arc<Service>>,
    CurrentUser(ctx): CurrentUser,
) -> Result<Response, Problem> {
    let orders = service.export_orders(&ctx).await.map_err(map_domain_error)?;

    let bytes = orders_workbook(&orders).map_err(|e| {
        tracing::error!(error = %e, "Failed to build orders workbook");
        Problem::internal()
    })?;
    let filename = export_filename(chrono::Utc::now());
    tracing::info!(orders = orders.len(), file = %filename, "Exported orders");

    Ok((
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={}", filename),
            ),
        ],
        bytes,
    )
        .into_response())
}

// ===== Service Handlers =====

pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Inventory Management API is running!".to_string(),
        status: "healthy".to_string(),
        version: API_VERSION.to_string(),
    })
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        message: "API is running".to_string(),
        timestamp: chrono::Utc::now(),
        version: API_VERSION.to_string(),
    })
}
