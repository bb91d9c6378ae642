//! Catalog state
//!
//! Product list plus the unavailable-for-sale id set, fetched together on
//! entry to the billing screen. A failed refresh leaves the previous data
//! in place (degraded state); retry is a manual re-navigation.

use crate::error::{PosError, PosResult};
use espresso_client::PosApi;
use shared::models::Product;
use std::collections::HashSet;

#[derive(Debug, Default)]
pub struct Catalog {
    products: Vec<Product>,
    unavailable: HashSet<i64>,
    loaded: bool,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-fetch products and the low-stock set
    pub async fn refresh<A: PosApi + ?Sized>(&mut self, api: &A) -> PosResult<()> {
        let products = api.products().await.map_err(PosError::load)?;
        let low_stock = api.low_stock().await.map_err(PosError::load)?;

        self.unavailable = low_stock.iter().map(|e| e.id).collect();
        self.products = products;
        self.loaded = true;
        tracing::debug!(
            products = self.products.len(),
            unavailable = self.unavailable.len(),
            "Catalog refreshed"
        );
        Ok(())
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn product(&self, id: i64) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// A product is sellable unless it appears in the low-stock set
    pub fn is_available(&self, id: i64) -> bool {
        !self.unavailable.contains(&id)
    }
}
