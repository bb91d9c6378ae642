//! Application state container
//!
//! Owns the session, catalog, cart and payment workflow, and drives every
//! network call. There is no ambient global state: components receive what
//! they need from here, and the container has an explicit `restore` /
//! `logout` lifecycle.

use crate::cart::Cart;
use crate::catalog::Catalog;
use crate::error::{PosError, PosResult};
use crate::navigation::{self, Role, Screen};
use crate::payment::{PaymentError, PaymentWorkflow, Receipt};
use crate::session::{Session, SessionStore};
use espresso_client::PosApi;
use shared::models::{Bill, BillSummary, HistoryFilter, PaymentMethod};

impl From<PaymentError> for PosError {
    fn from(err: PaymentError) -> Self {
        PosError::Validation(err.to_string())
    }
}

/// The running application
pub struct PosApp<A: PosApi> {
    api: A,
    session_store: SessionStore,
    session: Option<Session>,
    catalog: Catalog,
    cart: Cart,
    payment: PaymentWorkflow,
}

impl<A: PosApi> PosApp<A> {
    pub fn new(api: A, session_store: SessionStore) -> Self {
        Self {
            api,
            session_store,
            session: None,
            catalog: Catalog::new(),
            cart: Cart::new(),
            payment: PaymentWorkflow::new(),
        }
    }

    // ========== Session lifecycle ==========

    /// Restore a persisted session on startup
    ///
    /// A record with a role outside the known set is cleared and ignored,
    /// the same as a malformed one.
    pub fn restore(&mut self) -> Option<&Session> {
        let session = self.session_store.restore()?;
        if let Err(e) = Role::parse(&session.role) {
            tracing::warn!(role = %e.0, "Persisted session has unknown role, clearing");
            if let Err(e) = self.session_store.clear() {
                tracing::warn!(error = %e, "Failed to clear session record");
            }
            return None;
        }
        self.session = Some(session);
        self.session.as_ref()
    }

    /// Authenticate against the server and persist the session
    pub async fn login(&mut self, username: &str, password: &str) -> PosResult<&Session> {
        let response = self
            .api
            .login(username, password)
            .await
            .map_err(PosError::auth)?;

        // validate before anything is persisted
        Role::parse(&response.user.role)
            .map_err(|e| PosError::UnknownRole(e.0))?;

        let session = Session::from_user(&response.user);
        if let Err(e) = self.session_store.persist(&session) {
            tracing::warn!(error = %e, "Failed to persist session");
        }
        tracing::info!(username = %session.username, role = %session.role, "Logged in");
        self.session = Some(session);
        Ok(self.session.as_ref().expect("session just set"))
    }

    /// Clear the session and all billing state
    pub fn logout(&mut self) {
        if let Err(e) = self.session_store.clear() {
            tracing::warn!(error = %e, "Failed to clear session record");
        }
        if let Some(session) = self.session.take() {
            tracing::info!(username = %session.username, "Logged out");
        }
        self.cart.clear();
        let _ = self.payment.cancel();
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    // ========== Navigation ==========

    /// Resolve the screen for a requested page token
    pub fn screen(&self, token: Option<&str>) -> Screen {
        navigation::resolve(self.session.as_ref(), token)
    }

    // ========== Catalog ==========

    pub async fn refresh_catalog(&mut self) -> PosResult<()> {
        self.catalog.refresh(&self.api).await
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    // ========== Cart ==========

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Add one unit of a catalog product to the cart
    pub fn add_to_cart(&mut self, product_id: i64) -> PosResult<()> {
        let product = self
            .catalog
            .product(product_id)
            .ok_or_else(|| PosError::Validation(format!("Unknown product: {}", product_id)))?;
        let available = self.catalog.is_available(product_id);
        self.cart
            .add_product(product, available)
            .map_err(|e| PosError::Validation(e.to_string()))
    }

    pub fn increment_line(&mut self, product_id: i64) {
        self.cart.increment_line(product_id);
    }

    pub fn decrement_line(&mut self, product_id: i64) {
        self.cart.decrement_line(product_id);
    }

    pub fn remove_line(&mut self, product_id: i64) {
        self.cart.remove_line(product_id);
    }

    // ========== Payment ==========

    pub fn payment(&self) -> &PaymentWorkflow {
        &self.payment
    }

    pub fn open_payment(&mut self) -> PosResult<()> {
        if self.cart.is_empty() {
            return Err(PosError::Validation("Cart is empty".to_string()));
        }
        Ok(self.payment.open()?)
    }

    pub fn choose_method(&mut self, method: PaymentMethod) -> PosResult<()> {
        Ok(self.payment.choose_method(method)?)
    }

    pub fn enter_cash_amount(&mut self, amount: f64) -> PosResult<()> {
        Ok(self.payment.enter_tendered(amount)?)
    }

    pub fn cancel_payment(&mut self) -> PosResult<()> {
        Ok(self.payment.cancel()?)
    }

    /// Submit the cart as one atomic create-bill call
    ///
    /// All-or-nothing: on success the cart is cleared and a receipt
    /// returned; on failure nothing changes locally and the attempt stays
    /// ready for a manual retry.
    pub async fn confirm_payment(&mut self) -> PosResult<Receipt> {
        let payload = self.payment.begin_submit(&self.cart)?;

        match self.api.create_bill(&payload).await {
            Ok(bill) => {
                let receipt = self.payment.on_success(bill)?;
                self.cart.clear();
                Ok(receipt)
            }
            Err(e) => {
                self.payment.on_failure()?;
                Err(PosError::submission(e))
            }
        }
    }

    // ========== History ==========

    pub async fn bill_history(&self, filter: &HistoryFilter) -> PosResult<Vec<BillSummary>> {
        self.api.bill_history(filter).await.map_err(PosError::load)
    }

    pub async fn bill_detail(&self, id: i64) -> PosResult<Bill> {
        self.api.bill_detail(id).await.map_err(PosError::load)
    }

    pub fn api(&self) -> &A {
        &self.api
    }
}
