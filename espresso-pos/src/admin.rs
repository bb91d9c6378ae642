//! Admin area state managers
//!
//! Thin holders behind the admin screens. The consistency model is
//! "mutate, then refresh from the source of truth" throughout, with one
//! deliberate exception: staff activate/deactivate flips the local row
//! first and re-syncs afterwards, so the toggle feels instant at the till.

use crate::error::{PosError, PosResult};
use espresso_client::PosApi;
use shared::models::{
    DailySummary, Ingredient, Product, ProductCreate, StaffCreate, StaffResponse, StaffUpdate,
    StockUpdate,
};
use std::collections::HashSet;

// =============================================================================
// Staff roster
// =============================================================================

#[derive(Debug, Default)]
pub struct StaffDirectory {
    staff: Vec<StaffResponse>,
}

impl StaffDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn staff(&self) -> &[StaffResponse] {
        &self.staff
    }

    pub async fn reload<A: PosApi + ?Sized>(&mut self, api: &A) -> PosResult<()> {
        self.staff = api.staff().await.map_err(PosError::load)?;
        Ok(())
    }

    pub async fn add<A: PosApi + ?Sized>(
        &mut self,
        api: &A,
        create: StaffCreate,
    ) -> PosResult<()> {
        api.create_staff(&create).await.map_err(PosError::load)?;
        self.reload(api).await
    }

    pub async fn remove<A: PosApi + ?Sized>(&mut self, api: &A, id: i64) -> PosResult<()> {
        api.delete_staff(id).await.map_err(PosError::load)?;
        self.reload(api).await
    }

    /// Flip a staff member's active flag
    ///
    /// Optimistic: the local row is flipped before the request goes out,
    /// then the roster is re-synced from the server. On failure the flip is
    /// reverted so no stale state survives.
    pub async fn toggle_active<A: PosApi + ?Sized>(&mut self, api: &A, id: i64) -> PosResult<()> {
        let Some(row) = self.staff.iter_mut().find(|s| s.id == id) else {
            return Err(PosError::Validation(format!("Unknown staff member: {}", id)));
        };

        row.is_active = !row.is_active;
        let target = row.is_active;

        let update = StaffUpdate {
            username: None,
            password: None,
            role: None,
            is_active: Some(target),
        };

        match api.update_staff(id, &update).await {
            Ok(_) => self.reload(api).await,
            Err(e) => {
                // revert the optimistic flip
                if let Some(row) = self.staff.iter_mut().find(|s| s.id == id) {
                    row.is_active = !target;
                }
                Err(PosError::load(e))
            }
        }
    }
}

// =============================================================================
// Product administration
// =============================================================================

#[derive(Debug, Default)]
pub struct ProductAdmin {
    products: Vec<Product>,
}

impl ProductAdmin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub async fn reload<A: PosApi + ?Sized>(&mut self, api: &A) -> PosResult<()> {
        self.products = api.products().await.map_err(PosError::load)?;
        Ok(())
    }

    pub async fn add<A: PosApi + ?Sized>(
        &mut self,
        api: &A,
        create: ProductCreate,
    ) -> PosResult<()> {
        api.create_product(&create).await.map_err(PosError::load)?;
        self.reload(api).await
    }

    pub async fn remove<A: PosApi + ?Sized>(&mut self, api: &A, id: i64) -> PosResult<()> {
        api.delete_product(id).await.map_err(PosError::load)?;
        self.reload(api).await
    }
}

// =============================================================================
// Inventory
// =============================================================================

#[derive(Debug, Default)]
pub struct InventoryBoard {
    ingredients: Vec<Ingredient>,
    low_stock_ids: HashSet<i64>,
}

impl InventoryBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    pub fn is_low(&self, id: i64) -> bool {
        self.low_stock_ids.contains(&id)
    }

    pub async fn reload<A: PosApi + ?Sized>(&mut self, api: &A) -> PosResult<()> {
        let ingredients = api.ingredients().await.map_err(PosError::load)?;
        let low_stock = api.low_stock().await.map_err(PosError::load)?;
        self.low_stock_ids = low_stock.iter().map(|e| e.id).collect();
        self.ingredients = ingredients;
        Ok(())
    }

    pub async fn set_stock<A: PosApi + ?Sized>(
        &mut self,
        api: &A,
        id: i64,
        current_stock: f64,
    ) -> PosResult<()> {
        api.update_stock(id, &StockUpdate { current_stock })
            .await
            .map_err(PosError::load)?;
        self.reload(api).await
    }
}

// =============================================================================
// Reports
// =============================================================================

#[derive(Debug, Default)]
pub struct ReportsView {
    daily: Option<DailySummary>,
}

impl ReportsView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn daily(&self) -> Option<&DailySummary> {
        self.daily.as_ref()
    }

    pub async fn reload<A: PosApi + ?Sized>(&mut self, api: &A) -> PosResult<()> {
        self.daily = Some(api.daily_summary().await.map_err(PosError::load)?);
        Ok(())
    }
}
