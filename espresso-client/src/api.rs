//! API trait seam
//!
//! The application core talks to the server through this trait so tests can
//! drive the cart/payment flows against an in-memory implementation.

use crate::{ApiClient, ClientResult, LoginResponse};
use async_trait::async_trait;
use shared::models::{
    Bill, BillCreate, BillSummary, DailySummary, HistoryFilter, Ingredient, LowStockEntry,
    Product, ProductCreate, StaffCreate, StaffResponse, StaffUpdate, StockUpdate,
};

/// POS API surface consumed by the application core
#[async_trait]
pub trait PosApi: Send + Sync {
    // Auth
    async fn login(&self, username: &str, password: &str) -> ClientResult<LoginResponse>;

    // Catalog
    async fn products(&self) -> ClientResult<Vec<Product>>;
    async fn low_stock(&self) -> ClientResult<Vec<LowStockEntry>>;

    // Bills
    async fn create_bill(&self, bill: &BillCreate) -> ClientResult<Bill>;
    async fn bill_history(&self, filter: &HistoryFilter) -> ClientResult<Vec<BillSummary>>;
    async fn bill_detail(&self, id: i64) -> ClientResult<Bill>;

    // Staff
    async fn staff(&self) -> ClientResult<Vec<StaffResponse>>;
    async fn create_staff(&self, staff: &StaffCreate) -> ClientResult<StaffResponse>;
    async fn update_staff(&self, id: i64, update: &StaffUpdate) -> ClientResult<StaffResponse>;
    async fn delete_staff(&self, id: i64) -> ClientResult<()>;

    // Product admin
    async fn create_product(&self, product: &ProductCreate) -> ClientResult<Product>;
    async fn delete_product(&self, id: i64) -> ClientResult<()>;

    // Inventory
    async fn ingredients(&self) -> ClientResult<Vec<Ingredient>>;
    async fn update_stock(&self, id: i64, update: &StockUpdate) -> ClientResult<Ingredient>;

    // Reports
    async fn daily_summary(&self) -> ClientResult<DailySummary>;
}

#[async_trait]
impl PosApi for ApiClient {
    async fn login(&self, username: &str, password: &str) -> ClientResult<LoginResponse> {
        ApiClient::login(self, username, password).await
    }

    async fn products(&self) -> ClientResult<Vec<Product>> {
        ApiClient::products(self).await
    }

    async fn low_stock(&self) -> ClientResult<Vec<LowStockEntry>> {
        ApiClient::low_stock(self).await
    }

    async fn create_bill(&self, bill: &BillCreate) -> ClientResult<Bill> {
        ApiClient::create_bill(self, bill).await
    }

    async fn bill_history(&self, filter: &HistoryFilter) -> ClientResult<Vec<BillSummary>> {
        ApiClient::bill_history(self, filter).await
    }

    async fn bill_detail(&self, id: i64) -> ClientResult<Bill> {
        ApiClient::bill_detail(self, id).await
    }

    async fn staff(&self) -> ClientResult<Vec<StaffResponse>> {
        ApiClient::staff(self).await
    }

    async fn create_staff(&self, staff: &StaffCreate) -> ClientResult<StaffResponse> {
        ApiClient::create_staff(self, staff).await
    }

    async fn update_staff(&self, id: i64, update: &StaffUpdate) -> ClientResult<StaffResponse> {
        ApiClient::update_staff(self, id, update).await
    }

    async fn delete_staff(&self, id: i64) -> ClientResult<()> {
        ApiClient::delete_staff(self, id).await
    }

    async fn create_product(&self, product: &ProductCreate) -> ClientResult<Product> {
        ApiClient::create_product(self, product).await
    }

    async fn delete_product(&self, id: i64) -> ClientResult<()> {
        ApiClient::delete_product(self, id).await
    }

    async fn ingredients(&self) -> ClientResult<Vec<Ingredient>> {
        ApiClient::ingredients(self).await
    }

    async fn update_stock(&self, id: i64, update: &StockUpdate) -> ClientResult<Ingredient> {
        ApiClient::update_stock(self, id, update).await
    }

    async fn daily_summary(&self) -> ClientResult<DailySummary> {
        ApiClient::daily_summary(self).await
    }
}
