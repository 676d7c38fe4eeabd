//! Route registration and OpenAPI document

use crate::domain::{AccountService, Service};
use super::{dto::*, error::Problem, handlers};
use axum::{
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use std::sync::Arc;
use utoipa::OpenApi;

/// OpenAPI document listing every request and response schema
#[derive(OpenApi)]
#[openapi(
    info(title = "Inventory Management API", version = "1.0.0"),
    components(schemas(
        Problem,
        LoginRequest,
        UserDto,
        TokenDto,
        AuthResponse,
        RegisterRequest,
        UsersResponse,
        DeleteUserResponse,
        ProfileUpdateRequest,
        MessageResponse,
        ActivityLogDto,
        ActivityLogResponse,
        ItemCreateRequest,
        ItemDto,
        ItemCreateResponse,
        ItemsListResponse,
        AddProductRequest,
        ProductDto,
        ProductResponse,
        SummaryResponse,
        DateRangeSummaryResponse,
        ProductAnalyticsDto,
        EnhancedSummaryResponse,
        ProductNamesResponse,
        ProductDetailDto,
        ProductDetailsResponse,
        TransactionDto,
        TransactionHistoryResponse,
        DailyHistoryItem,
        DailyHistoryResponse,
        DeleteResponse,
        HistoryRecordDto,
        DatabaseSummaryDto,
        DatabaseViewResponse,
        CreateOrderRequest,
        OrderDto,
        CreateOrderResponse,
        OrdersResponse,
        RootResponse,
        HealthResponse,
    ))
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Register all REST routes
pub fn register_routes(
    router: Router,
    service: Arc<Service>,
    accounts: Arc<AccountService>,
) -> Router {
    router
        // Service endpoints
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/openapi.json", get(openapi_json))
        // Authentication and user management
        .route("/login", post(handlers::login))
        .route("/register", post(handlers::register))
        .route("/users", get(handlers::list_users))
        .route("/users/{user_id}", delete(handlers::delete_user))
        .route("/user/me", get(handlers::current_user))
        .route("/user/update_profile", put(handlers::update_profile))
        .route("/activity-logs", get(handlers::activity_logs))
        // Items
        .route("/items", get(handlers::list_items))
        .route("/items/create", post(handlers::create_item))
        // Stock ledger
        .route("/add", post(handlers::add_stock))
        .route("/history/add/{id}", delete(handlers::delete_add_history))
        .route("/history/sell/{id}", delete(handlers::delete_sell_history))
        // Reports
        .route("/summary", get(handlers::summary))
        .route("/summary/enhanced", get(handlers::enhanced_summary))
        .route("/products", get(handlers::product_names))
        .route("/products/details", get(handlers::product_details))
        .route("/daily-history", get(handlers::daily_history))
        .route("/daily-totals", get(handlers::daily_totals))
        .route("/database/view", get(handlers::database_view))
        // Orders
        .route("/orders", get(handlers::list_orders))
        .route("/orders/create", post(handlers::create_order))
        .route("/orders/export", get(handlers::export_orders))
        .layer(Extension(service))
        .layer(Extension(accounts))
}
