//! In-memory PosApi implementation for driving the core in tests

use async_trait::async_trait;
use chrono::Utc;
use espresso_client::{ClientError, ClientResult, LoginResponse, PosApi, UserInfo};
use rust_decimal::Decimal;
use shared::models::{
    Bill, BillCreate, BillItem, BillSummary, DailySummary, HistoryFilter, Ingredient,
    LowStockEntry, Product, ProductCreate, StaffCreate, StaffResponse, StaffUpdate, StockUpdate,
};
use shared::money::{to_decimal, to_f64};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Default)]
pub struct MockApi {
    pub products: Vec<Product>,
    pub low_stock: Vec<LowStockEntry>,
    pub credentials: Vec<(String, String, UserInfo)>,
    pub staff_rows: Mutex<Vec<StaffResponse>>,
    pub ingredients: Mutex<Vec<Ingredient>>,
    pub history: Vec<BillSummary>,

    pub fail_create_bill: AtomicBool,
    pub fail_update_staff: AtomicBool,
    pub create_bill_calls: AtomicUsize,
    pub submitted: Mutex<Vec<BillCreate>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_product(mut self, id: i64, name: &str, price: f64) -> Self {
        self.products.push(Product {
            id,
            name: name.to_string(),
            price,
            category: "coffee".to_string(),
        });
        self
    }

    pub fn with_low_stock(mut self, id: i64) -> Self {
        self.low_stock.push(LowStockEntry { id, name: None });
        self
    }

    pub fn with_user(mut self, username: &str, password: &str, role: &str) -> Self {
        let id = self.credentials.len() as i64 + 1;
        self.credentials.push((
            username.to_string(),
            password.to_string(),
            UserInfo {
                id,
                username: username.to_string(),
                role: role.to_string(),
            },
        ));
        self
    }

    pub fn with_staff_row(self, id: i64, username: &str, role: &str, is_active: bool) -> Self {
        self.staff_rows.lock().unwrap().push(StaffResponse {
            id,
            username: username.to_string(),
            role: role.to_string(),
            is_active,
        });
        self
    }

    pub fn bill_calls(&self) -> usize {
        self.create_bill_calls.load(Ordering::SeqCst)
    }

    fn price_of(&self, product_id: i64) -> f64 {
        self.products
            .iter()
            .find(|p| p.id == product_id)
            .map(|p| p.price)
            .unwrap_or(0.0)
    }
}

#[async_trait]
impl PosApi for MockApi {
    async fn login(&self, username: &str, password: &str) -> ClientResult<LoginResponse> {
        self.credentials
            .iter()
            .find(|(u, p, _)| u == username && p == password)
            .map(|(_, _, user)| LoginResponse { user: user.clone() })
            .ok_or_else(|| ClientError::Auth("Invalid username or password".to_string()))
    }

    async fn products(&self) -> ClientResult<Vec<Product>> {
        Ok(self.products.clone())
    }

    async fn low_stock(&self) -> ClientResult<Vec<LowStockEntry>> {
        Ok(self.low_stock.clone())
    }

    async fn create_bill(&self, bill: &BillCreate) -> ClientResult<Bill> {
        self.create_bill_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_create_bill.load(Ordering::SeqCst) {
            return Err(ClientError::Internal("Payment failed".to_string()));
        }

        let total: Decimal = bill
            .items
            .iter()
            .map(|i| to_decimal(self.price_of(i.product_id)) * Decimal::from(i.quantity))
            .sum();

        let items = bill
            .items
            .iter()
            .map(|i| BillItem {
                product_name: self
                    .products
                    .iter()
                    .find(|p| p.id == i.product_id)
                    .map(|p| p.name.clone())
                    .unwrap_or_default(),
                quantity: i.quantity,
                price: self.price_of(i.product_id),
            })
            .collect();

        self.submitted.lock().unwrap().push(bill.clone());
        let n = self.bill_calls();

        Ok(Bill {
            id: 100 + n as i64,
            bill_number: format!("B-{:04}", 1000 + n),
            total_amount: to_f64(total),
            payment_method: bill.payment_method,
            created_at: Utc::now(),
            cashier_name: Some("mock".to_string()),
            items,
        })
    }

    async fn bill_history(&self, _filter: &HistoryFilter) -> ClientResult<Vec<BillSummary>> {
        Ok(self.history.clone())
    }

    async fn bill_detail(&self, _id: i64) -> ClientResult<Bill> {
        Err(ClientError::NotFound("Bill not found".to_string()))
    }

    async fn staff(&self) -> ClientResult<Vec<StaffResponse>> {
        Ok(self.staff_rows.lock().unwrap().clone())
    }

    async fn create_staff(&self, staff: &StaffCreate) -> ClientResult<StaffResponse> {
        let mut rows = self.staff_rows.lock().unwrap();
        let row = StaffResponse {
            id: rows.iter().map(|s| s.id).max().unwrap_or(0) + 1,
            username: staff.username.clone(),
            role: staff.role.clone(),
            is_active: true,
        };
        rows.push(row.clone());
        Ok(row)
    }

    async fn update_staff(&self, id: i64, update: &StaffUpdate) -> ClientResult<StaffResponse> {
        if self.fail_update_staff.load(Ordering::SeqCst) {
            return Err(ClientError::Internal("Update failed".to_string()));
        }
        let mut rows = self.staff_rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| ClientError::NotFound("Staff not found".to_string()))?;
        if let Some(active) = update.is_active {
            row.is_active = active;
        }
        Ok(row.clone())
    }

    async fn delete_staff(&self, id: i64) -> ClientResult<()> {
        self.staff_rows.lock().unwrap().retain(|s| s.id != id);
        Ok(())
    }

    async fn create_product(&self, product: &ProductCreate) -> ClientResult<Product> {
        Ok(Product {
            id: 999,
            name: product.name.clone(),
            price: product.price,
            category: product.category.clone(),
        })
    }

    async fn delete_product(&self, _id: i64) -> ClientResult<()> {
        Ok(())
    }

    async fn ingredients(&self) -> ClientResult<Vec<Ingredient>> {
        Ok(self.ingredients.lock().unwrap().clone())
    }

    async fn update_stock(&self, id: i64, update: &StockUpdate) -> ClientResult<Ingredient> {
        let mut rows = self.ingredients.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| ClientError::NotFound("Ingredient not found".to_string()))?;
        row.current_stock = update.current_stock;
        Ok(row.clone())
    }

    async fn daily_summary(&self) -> ClientResult<DailySummary> {
        Ok(DailySummary {
            date: "2026-08-08".to_string(),
            total_orders: self.bill_calls() as i64,
            total_revenue: 0.0,
            cash_revenue: 0.0,
            upi_revenue: 0.0,
            top_products: vec![],
        })
    }
}
