//! Cart Engine
//!
//! In-memory line collection for the active billing session. Lines keep
//! insertion order for stable display; at most one line per product; the
//! total is recomputed on demand, never cached.

use rust_decimal::Decimal;
use shared::models::{BillItemInput, Product};
use shared::money::{to_decimal, to_f64};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// Product is flagged unavailable (low stock) and must not enter the cart
    #[error("{name} is currently unavailable")]
    ProductUnavailable { name: String },
}

/// One cart line: product reference plus a name/price snapshot taken at
/// add time
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub product_id: i64,
    pub name: String,
    pub price: f64,
    pub quantity: i32,
}

impl CartLine {
    /// price × quantity, 2-dp rounded
    pub fn line_total(&self) -> f64 {
        shared::money::line_total(self.price, self.quantity)
    }
}

/// Active bill under construction
#[derive(Debug, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of a product
    ///
    /// Unavailable products are never accepted. If the product already has
    /// a line its quantity is incremented, otherwise a new line is appended
    /// at the end.
    pub fn add_product(&mut self, product: &Product, available: bool) -> Result<(), CartError> {
        if !available {
            return Err(CartError::ProductUnavailable {
                name: product.name.clone(),
            });
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product.id) {
            line.quantity += 1;
        } else {
            self.lines.push(CartLine {
                product_id: product.id,
                name: product.name.clone(),
                price: product.price,
                quantity: 1,
            });
        }
        Ok(())
    }

    /// Increment an existing line; no-op on an unknown product
    pub fn increment_line(&mut self, product_id: i64) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product_id) {
            line.quantity += 1;
        }
    }

    /// Decrement a line, removing it entirely when the quantity reaches
    /// zero; no-op on an unknown product
    pub fn decrement_line(&mut self, product_id: i64) {
        if let Some(idx) = self.lines.iter().position(|l| l.product_id == product_id) {
            if self.lines[idx].quantity <= 1 {
                self.lines.remove(idx);
            } else {
                self.lines[idx].quantity -= 1;
            }
        }
    }

    /// Remove a line regardless of quantity
    pub fn remove_line(&mut self, product_id: i64) {
        self.lines.retain(|l| l.product_id != product_id);
    }

    /// Empty the cart (after successful checkout or explicit reset)
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of price × quantity across all lines
    pub fn total(&self) -> f64 {
        let sum: Decimal = self
            .lines
            .iter()
            .map(|l| to_decimal(l.price) * Decimal::from(l.quantity))
            .sum();
        to_f64(sum)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// (product id, quantity) pairs for the bill creation request
    pub fn item_inputs(&self) -> Vec<BillItemInput> {
        self.lines
            .iter()
            .map(|l| BillItemInput {
                product_id: l.product_id,
                quantity: l.quantity,
            })
            .collect()
    }
}
