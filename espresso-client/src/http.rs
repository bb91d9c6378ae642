//! HTTP client for network-based API calls

use crate::{ClientConfig, ClientError, ClientResult, LoginRequest, LoginResponse};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use shared::models::{
    Bill, BillCreate, BillSummary, DailySummary, HistoryFilter, Ingredient, LowStockEntry,
    Product, ProductCreate, StaffCreate, StaffResponse, StaffUpdate, StockUpdate,
};

/// 服务端返回的错误响应格式
#[derive(serde::Deserialize)]
struct ApiErrorBody {
    pub detail: String,
}

/// HTTP client for making network requests to the POS API
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client from configuration
    pub fn new(config: &ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// 获取基础 URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let url = format!("{}/{}", self.base_url, path);
        let response = self.client.get(&url).send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let url = format!("{}/{}", self.base_url, path);
        let response = self.client.post(&url).json(body).send().await?;
        Self::handle_response(response).await
    }

    /// Make a PUT request with JSON body
    pub async fn put<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let url = format!("{}/{}", self.base_url, path);
        let response = self.client.put(&url).json(body).send().await?;
        Self::handle_response(response).await
    }

    /// Make a DELETE request
    pub async fn delete(&self, path: &str) -> ClientResult<()> {
        let url = format!("{}/{}", self.base_url, path);
        let response = self.client.delete(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Self::error_from(status, response.text().await?));
        }
        Ok(())
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await?;
            return Err(Self::error_from(status, text));
        }

        response.json().await.map_err(Into::into)
    }

    /// Map an error status + body to a ClientError, extracting the server's
    /// `detail` message when present
    fn error_from(status: StatusCode, text: String) -> ClientError {
        let message = serde_json::from_str::<ApiErrorBody>(&text)
            .map(|b| b.detail)
            .unwrap_or(text);

        match status {
            StatusCode::UNAUTHORIZED => ClientError::Auth(message),
            StatusCode::FORBIDDEN => ClientError::Forbidden(message),
            StatusCode::NOT_FOUND => ClientError::NotFound(message),
            StatusCode::BAD_REQUEST => ClientError::Validation(message),
            _ => ClientError::Internal(message),
        }
    }

    // ========== Auth API ==========

    /// Login with username and password
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<LoginResponse> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        self.post("login/", &request).await
    }

    // ========== Catalog API ==========

    /// Fetch the product catalog
    pub async fn products(&self) -> ClientResult<Vec<Product>> {
        self.get("products/").await
    }

    /// Fetch the set of products currently unavailable for sale
    pub async fn low_stock(&self) -> ClientResult<Vec<LowStockEntry>> {
        self.get("inventory/low-stock/").await
    }

    // ========== Bill API ==========

    /// Create a bill from the cart (atomic, all-or-nothing)
    pub async fn create_bill(&self, bill: &BillCreate) -> ClientResult<Bill> {
        self.post("bills/", bill).await
    }

    /// Fetch bill history with an optional date filter
    pub async fn bill_history(&self, filter: &HistoryFilter) -> ClientResult<Vec<BillSummary>> {
        let path = format!("bills/history/{}", filter.query());
        self.get(&path).await
    }

    /// Fetch a single bill's full detail
    pub async fn bill_detail(&self, id: i64) -> ClientResult<Bill> {
        self.get(&format!("bills/{}/", id)).await
    }

    // ========== Staff API ==========

    pub async fn staff(&self) -> ClientResult<Vec<StaffResponse>> {
        self.get("staff/").await
    }

    pub async fn create_staff(&self, staff: &StaffCreate) -> ClientResult<StaffResponse> {
        self.post("staff/", staff).await
    }

    pub async fn update_staff(&self, id: i64, update: &StaffUpdate) -> ClientResult<StaffResponse> {
        self.put(&format!("staff/{}/", id), update).await
    }

    pub async fn delete_staff(&self, id: i64) -> ClientResult<()> {
        self.delete(&format!("staff/{}/", id)).await
    }

    // ========== Product admin API ==========

    pub async fn create_product(&self, product: &ProductCreate) -> ClientResult<Product> {
        self.post("products/", product).await
    }

    pub async fn delete_product(&self, id: i64) -> ClientResult<()> {
        self.delete(&format!("products/{}/", id)).await
    }

    // ========== Inventory API ==========

    pub async fn ingredients(&self) -> ClientResult<Vec<Ingredient>> {
        self.get("ingredients/").await
    }

    pub async fn update_stock(&self, id: i64, update: &StockUpdate) -> ClientResult<Ingredient> {
        self.put(&format!("ingredients/{}/", id), update).await
    }

    // ========== Report API ==========

    pub async fn daily_summary(&self) -> ClientResult<DailySummary> {
        self.get("reports/daily/").await
    }
}
