//! REST DTOs with serde derives for HTTP API
//!
//! Money fields serialize as decimal strings.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ===== Auth DTOs =====

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "superadmin")]
    pub username: String,
    pub password: String,
}

/// Account as shown to clients
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: i32,
    pub username: String,
    pub name: Option<String>,
    #[schema(example = "editor")]
    pub role: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenDto {
    pub access_token: String,
    /// Always "bearer"
    pub token_type: String,
    /// Seconds until the token expires
    pub expires_in: i64,
    pub user: UserDto,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub success: bool,
    pub message: String,
    pub token: Option<TokenDto>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    /// Defaults to "viewer"
    #[schema(example = "viewer")]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UsersResponse {
    pub users: Vec<UserDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteUserResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ProfileUpdateRequest {
    pub name: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

// ===== Activity DTOs =====

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ActivityLogDto {
    pub id: i32,
    pub user_id: i32,
    pub username: String,
    pub user_role: String,
    #[schema(example = "Add Product")]
    pub action: String,
    #[schema(example = "product Paracetamol")]
    pub target: String,
    pub details: Option<String>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ActivityLogResponse {
    pub logs: Vec<ActivityLogDto>,
}

// ===== Item DTOs =====

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ItemCreateRequest {
    pub item_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ItemDto {
    pub id: i32,
    pub item_name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ItemCreateResponse {
    pub success: bool,
    pub message: String,
    pub item: Option<ItemDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ItemsListResponse {
    pub items: Vec<ItemDto>,
}

// ===== Stock DTOs =====

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AddProductRequest {
    #[schema(example = "Paracetamol")]
    pub product_name: String,
    pub quantity: i64,
    #[schema(value_type = String, example = "2.50")]
    pub unit_price: Decimal,
    /// YYYY-MM-DD
    #[schema(example = "2025-10-18")]
    pub date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductDto {
    pub id: i32,
    pub name: String,
    pub total_added_qty: i64,
    #[schema(value_type = String)]
    pub total_added_amount: Decimal,
    pub total_sold_qty: i64,
    #[schema(value_type = String)]
    pub total_sold_amount: Decimal,
    pub available_stock: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    pub success: bool,
    pub message: String,
    pub product: Option<ProductDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SummaryResponse {
    pub products: Vec<ProductDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DateRangeSummaryResponse {
    pub products: Vec<ProductDto>,
    pub total_added_qty_in_range: i64,
    #[schema(value_type = String)]
    pub total_added_amount_in_range: Decimal,
    pub total_sold_qty_in_range: i64,
    #[schema(value_type = String)]
    pub total_sold_amount_in_range: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductAnalyticsDto {
    pub id: i32,
    pub name: String,
    pub total_added_qty: i64,
    #[schema(value_type = String)]
    pub total_added_amount: Decimal,
    pub total_sold_qty: i64,
    #[schema(value_type = String)]
    pub total_sold_amount: Decimal,
    pub available_stock: i64,
    #[schema(value_type = Option<String>)]
    pub avg_purchase_price: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub avg_selling_price: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub profit_loss: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EnhancedSummaryResponse {
    pub products: Vec<ProductAnalyticsDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductNamesResponse {
    pub products: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductDetailDto {
    pub id: i32,
    pub name: String,
    pub available_stock: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductDetailsResponse {
    pub products: Vec<ProductDetailDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TransactionDto {
    /// Movement id, used for deletion
    pub id: i32,
    pub date: NaiveDate,
    pub product_name: String,
    /// "add" or "sell"
    pub transaction_type: String,
    pub quantity: i64,
    #[schema(value_type = String)]
    pub unit_price: Decimal,
    #[schema(value_type = String)]
    pub total_amount: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TransactionHistoryResponse {
    pub transactions: Vec<TransactionDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DailyHistoryItem {
    pub date: NaiveDate,
    pub total_added_qty: i64,
    #[schema(value_type = String)]
    pub total_added_amount: Decimal,
    pub total_sold_qty: i64,
    #[schema(value_type = String)]
    pub total_sold_amount: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DailyHistoryResponse {
    pub daily_history: Vec<DailyHistoryItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
    pub updated_product: Option<ProductDto>,
}

// ===== Database View DTOs =====

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HistoryRecordDto {
    pub id: i32,
    pub product_id: i32,
    pub product_name: String,
    pub quantity: i64,
    #[schema(value_type = String)]
    pub unit_price: Decimal,
    #[schema(value_type = String)]
    pub total_amount: Decimal,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DatabaseSummaryDto {
    pub total_products: usize,
    pub total_transactions: usize,
    pub total_add_transactions: usize,
    pub total_sell_transactions: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DatabaseViewResponse {
    pub products: Vec<ProductDto>,
    pub add_history: Vec<HistoryRecordDto>,
    pub sell_history: Vec<HistoryRecordDto>,
    pub summary: DatabaseSummaryDto,
}

// ===== Order DTOs =====

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    pub product_id: i32,
    pub quantity_sold: i64,
    #[schema(value_type = String, example = "4.00")]
    pub unit_price: Decimal,
    pub customer_name: Option<String>,
    pub customer_address: Option<String>,
    pub customer_phone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderDto {
    pub id: i32,
    pub product_id: i32,
    pub product_name: String,
    pub quantity_sold: i64,
    #[schema(value_type = String)]
    pub total_amount: Decimal,
    pub customer_name: Option<String>,
    pub customer_address: Option<String>,
    pub customer_phone: Option<String>,
    pub sale_date: DateTime<Utc>,
    pub created_by: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateOrderResponse {
    pub success: bool,
    pub message: String,
    pub order: Option<OrderDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrdersResponse {
    pub orders: Vec<OrderDto>,
}

// ===== Service DTOs =====

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RootResponse {
    pub message: String,
    pub status: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}
