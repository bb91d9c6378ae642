//! Payment Workflow
//!
//! State machine layered on top of the cart: method selection → amount
//! validation → submission → receipt. The HTTP call itself lives with the
//! caller; the workflow exposes `begin_submit` / `on_success` / `on_failure`
//! so the single suspension point sits between explicit transitions and a
//! second submit while one is in flight can be rejected.

use crate::cart::Cart;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use shared::models::{Bill, BillCreate, BillItem, PaymentMethod};
use shared::money::{to_decimal, to_f64, MONEY_TOLERANCE};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error, PartialEq)]
pub enum PaymentError {
    #[error("No payment dialog is open")]
    NotOpen,

    #[error("A payment dialog is already open")]
    AlreadyOpen,

    #[error("Select a payment method first")]
    NoMethodSelected,

    #[error("Cash given is required")]
    CashAmountMissing,

    #[error("Tendered amount must be a non-negative number")]
    InvalidAmount,

    #[error("Tendered amount only applies to cash payments")]
    TenderedNotApplicable,

    #[error("Cart is empty")]
    EmptyCart,

    #[error("Cash given ({tendered:.2}) is less than total ({total:.2})")]
    InsufficientCash { tendered: f64, total: f64 },

    #[error("A submission is already in flight")]
    SubmissionInFlight,

    #[error("No submission in flight")]
    NothingInFlight,
}

/// In-progress attempt snapshot, fixed at `begin_submit` time
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentAttempt {
    pub method: PaymentMethod,
    pub tendered: Option<f64>,
    /// tendered − total, CASH only, snapshotted at submission time
    pub change: Option<f64>,
    /// Cart total at submission time
    pub total: f64,
}

/// Workflow state
#[derive(Debug, Clone, PartialEq)]
pub enum PaymentState {
    Idle,
    SelectingMethod,
    AwaitingCashAmount,
    ReadyToSubmit {
        method: PaymentMethod,
        tendered: Option<f64>,
    },
    Submitting {
        attempt: PaymentAttempt,
    },
}

/// Final bill record handed to the UI for display/print
///
/// Owns all of its data; never aliases live cart state.
#[derive(Debug, Clone, Serialize)]
pub struct Receipt {
    pub bill_id: i64,
    pub bill_number: String,
    pub total_amount: f64,
    pub payment_method: PaymentMethod,
    pub created_at: DateTime<Utc>,
    pub items: Vec<BillItem>,
    /// CASH only
    pub tendered: Option<f64>,
    /// CASH only
    pub change: Option<f64>,
}

/// Payment workflow state machine
#[derive(Debug, Default)]
pub struct PaymentWorkflow {
    state: PaymentState,
    /// Correlates log lines across one dialog open/submit/retry cycle
    attempt_id: Option<Uuid>,
}

impl Default for PaymentState {
    fn default() -> Self {
        Self::Idle
    }
}

impl PaymentWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &PaymentState {
        &self.state
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.state, PaymentState::Submitting { .. })
    }

    /// Open the payment dialog
    pub fn open(&mut self) -> Result<(), PaymentError> {
        if !matches!(self.state, PaymentState::Idle) {
            return Err(PaymentError::AlreadyOpen);
        }
        let id = Uuid::new_v4();
        tracing::debug!(attempt = %id, "Payment dialog opened");
        self.attempt_id = Some(id);
        self.state = PaymentState::SelectingMethod;
        Ok(())
    }

    /// Choose (or re-choose) the payment method
    pub fn choose_method(&mut self, method: PaymentMethod) -> Result<(), PaymentError> {
        match self.state {
            PaymentState::Idle => Err(PaymentError::NotOpen),
            PaymentState::Submitting { .. } => Err(PaymentError::SubmissionInFlight),
            PaymentState::SelectingMethod
            | PaymentState::AwaitingCashAmount
            | PaymentState::ReadyToSubmit { .. } => {
                self.state = match method {
                    PaymentMethod::Cash => PaymentState::AwaitingCashAmount,
                    PaymentMethod::Upi => PaymentState::ReadyToSubmit {
                        method: PaymentMethod::Upi,
                        tendered: None,
                    },
                };
                Ok(())
            }
        }
    }

    /// Enter the cash tendered amount
    pub fn enter_tendered(&mut self, amount: f64) -> Result<(), PaymentError> {
        match self.state {
            PaymentState::Idle => Err(PaymentError::NotOpen),
            PaymentState::Submitting { .. } => Err(PaymentError::SubmissionInFlight),
            PaymentState::SelectingMethod => Err(PaymentError::NoMethodSelected),
            PaymentState::ReadyToSubmit {
                method: PaymentMethod::Upi,
                ..
            } => Err(PaymentError::TenderedNotApplicable),
            PaymentState::AwaitingCashAmount
            | PaymentState::ReadyToSubmit {
                method: PaymentMethod::Cash,
                ..
            } => {
                if !amount.is_finite() || amount < 0.0 {
                    return Err(PaymentError::InvalidAmount);
                }
                self.state = PaymentState::ReadyToSubmit {
                    method: PaymentMethod::Cash,
                    tendered: Some(amount),
                };
                Ok(())
            }
        }
    }

    /// Cancel the dialog, discarding the in-progress attempt
    ///
    /// Allowed from any state except `Submitting` (the confirm control is
    /// disabled while a call is in flight; the in-flight request itself is
    /// not cancellable). Idempotent from `Idle`.
    pub fn cancel(&mut self) -> Result<(), PaymentError> {
        if self.is_submitting() {
            return Err(PaymentError::SubmissionInFlight);
        }
        if let Some(id) = self.attempt_id.take() {
            tracing::debug!(attempt = %id, "Payment dialog cancelled");
        }
        self.state = PaymentState::Idle;
        Ok(())
    }

    /// Validate locally and move to `Submitting`
    ///
    /// Returns the request payload for the atomic create-bill call. Nothing
    /// leaves the terminal if validation fails here. A second call while
    /// `Submitting` is rejected, so at most one bill is created per
    /// user-initiated checkout.
    pub fn begin_submit(&mut self, cart: &Cart) -> Result<BillCreate, PaymentError> {
        let (method, tendered) = match self.state {
            PaymentState::Idle => return Err(PaymentError::NotOpen),
            PaymentState::SelectingMethod => return Err(PaymentError::NoMethodSelected),
            PaymentState::AwaitingCashAmount => return Err(PaymentError::CashAmountMissing),
            PaymentState::Submitting { .. } => return Err(PaymentError::SubmissionInFlight),
            PaymentState::ReadyToSubmit { method, tendered } => (method, tendered),
        };

        if cart.is_empty() {
            return Err(PaymentError::EmptyCart);
        }

        let total = cart.total();
        let total_d = to_decimal(total);

        let change = match method {
            PaymentMethod::Cash => {
                let t = tendered.ok_or(PaymentError::CashAmountMissing)?;
                let t_d = to_decimal(t);
                if t_d < total_d - MONEY_TOLERANCE {
                    return Err(PaymentError::InsufficientCash { tendered: t, total });
                }
                Some(to_f64((t_d - total_d).max(Decimal::ZERO)))
            }
            PaymentMethod::Upi => None,
        };

        if let Some(id) = self.attempt_id {
            tracing::info!(attempt = %id, %method, total, "Submitting bill");
        }

        let payload = BillCreate {
            payment_method: method,
            items: cart.item_inputs(),
        };
        self.state = PaymentState::Submitting {
            attempt: PaymentAttempt {
                method,
                tendered,
                change,
                total,
            },
        };
        Ok(payload)
    }

    /// Record a successful submission and produce the receipt
    ///
    /// The receipt carries the tendered/change snapshot taken at
    /// `begin_submit`; the total comes from the server record.
    pub fn on_success(&mut self, bill: Bill) -> Result<Receipt, PaymentError> {
        let attempt = match std::mem::take(&mut self.state) {
            PaymentState::Submitting { attempt } => attempt,
            other => {
                self.state = other;
                return Err(PaymentError::NothingInFlight);
            }
        };

        if let Some(id) = self.attempt_id.take() {
            tracing::info!(attempt = %id, bill_number = %bill.bill_number, "Bill created");
        }

        Ok(Receipt {
            bill_id: bill.id,
            bill_number: bill.bill_number,
            total_amount: bill.total_amount,
            payment_method: attempt.method,
            created_at: bill.created_at,
            items: bill.items,
            tendered: attempt.tendered,
            change: attempt.change,
        })
    }

    /// Record a failed submission; the attempt is preserved for retry
    pub fn on_failure(&mut self) -> Result<(), PaymentError> {
        let attempt = match std::mem::take(&mut self.state) {
            PaymentState::Submitting { attempt } => attempt,
            other => {
                self.state = other;
                return Err(PaymentError::NothingInFlight);
            }
        };

        if let Some(id) = self.attempt_id {
            tracing::warn!(attempt = %id, "Bill submission failed, keeping attempt for retry");
        }

        self.state = PaymentState::ReadyToSubmit {
            method: attempt.method,
            tendered: attempt.tendered,
        };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::Product;

    fn cart_with(prices: &[(i64, f64, i32)]) -> Cart {
        let mut cart = Cart::new();
        for &(id, price, qty) in prices {
            let product = Product {
                id,
                name: format!("product-{}", id),
                price,
                category: "coffee".to_string(),
            };
            cart.add_product(&product, true).unwrap();
            for _ in 1..qty {
                cart.increment_line(id);
            }
        }
        cart
    }

    fn server_bill(total: f64) -> Bill {
        Bill {
            id: 42,
            bill_number: "B-1042".to_string(),
            total_amount: total,
            payment_method: PaymentMethod::Cash,
            created_at: Utc::now(),
            cashier_name: Some("asha".to_string()),
            items: vec![],
        }
    }

    #[test]
    fn test_open_then_cash_flow() {
        let mut wf = PaymentWorkflow::new();
        wf.open().unwrap();
        assert_eq!(*wf.state(), PaymentState::SelectingMethod);

        wf.choose_method(PaymentMethod::Cash).unwrap();
        assert_eq!(*wf.state(), PaymentState::AwaitingCashAmount);

        wf.enter_tendered(100.0).unwrap();
        assert_eq!(
            *wf.state(),
            PaymentState::ReadyToSubmit {
                method: PaymentMethod::Cash,
                tendered: Some(100.0)
            }
        );
    }

    #[test]
    fn test_upi_needs_no_amount() {
        let mut wf = PaymentWorkflow::new();
        wf.open().unwrap();
        wf.choose_method(PaymentMethod::Upi).unwrap();

        let cart = cart_with(&[(1, 50.0, 2)]);
        let payload = wf.begin_submit(&cart).unwrap();
        assert_eq!(payload.payment_method, PaymentMethod::Upi);

        let receipt = wf.on_success(server_bill(100.0)).unwrap();
        assert_eq!(receipt.tendered, None);
        assert_eq!(receipt.change, None);
        assert_eq!(*wf.state(), PaymentState::Idle);
    }

    #[test]
    fn test_tendered_rejected_for_upi() {
        let mut wf = PaymentWorkflow::new();
        wf.open().unwrap();
        wf.choose_method(PaymentMethod::Upi).unwrap();
        assert_eq!(wf.enter_tendered(100.0), Err(PaymentError::TenderedNotApplicable));
    }

    #[test]
    fn test_insufficient_cash_blocks_locally() {
        let mut wf = PaymentWorkflow::new();
        wf.open().unwrap();
        wf.choose_method(PaymentMethod::Cash).unwrap();
        wf.enter_tendered(60.0).unwrap();

        let cart = cart_with(&[(1, 50.0, 2)]);
        let result = wf.begin_submit(&cart);
        assert_eq!(
            result,
            Err(PaymentError::InsufficientCash {
                tendered: 60.0,
                total: 100.0
            })
        );
        // still ready: the operator can correct the amount and resubmit
        assert!(matches!(*wf.state(), PaymentState::ReadyToSubmit { .. }));
    }

    #[test]
    fn test_exact_cash_gives_zero_change() {
        let mut wf = PaymentWorkflow::new();
        wf.open().unwrap();
        wf.choose_method(PaymentMethod::Cash).unwrap();
        wf.enter_tendered(100.0).unwrap();

        let cart = cart_with(&[(1, 50.0, 2)]);
        wf.begin_submit(&cart).unwrap();
        let receipt = wf.on_success(server_bill(100.0)).unwrap();
        assert_eq!(receipt.tendered, Some(100.0));
        assert_eq!(receipt.change, Some(0.0));
    }

    #[test]
    fn test_overpayment_change() {
        let mut wf = PaymentWorkflow::new();
        wf.open().unwrap();
        wf.choose_method(PaymentMethod::Cash).unwrap();
        wf.enter_tendered(150.0).unwrap();

        let cart = cart_with(&[(1, 50.0, 2)]);
        wf.begin_submit(&cart).unwrap();
        let receipt = wf.on_success(server_bill(100.0)).unwrap();
        assert_eq!(receipt.change, Some(50.0));
    }

    #[test]
    fn test_empty_cart_rejected() {
        let mut wf = PaymentWorkflow::new();
        wf.open().unwrap();
        wf.choose_method(PaymentMethod::Upi).unwrap();

        let cart = Cart::new();
        assert_eq!(wf.begin_submit(&cart), Err(PaymentError::EmptyCart));
    }

    #[test]
    fn test_double_submit_rejected_while_in_flight() {
        let mut wf = PaymentWorkflow::new();
        wf.open().unwrap();
        wf.choose_method(PaymentMethod::Upi).unwrap();

        let cart = cart_with(&[(1, 50.0, 1)]);
        wf.begin_submit(&cart).unwrap();
        assert_eq!(wf.begin_submit(&cart), Err(PaymentError::SubmissionInFlight));
        assert_eq!(wf.choose_method(PaymentMethod::Cash), Err(PaymentError::SubmissionInFlight));
        assert_eq!(wf.cancel(), Err(PaymentError::SubmissionInFlight));
    }

    #[test]
    fn test_failure_preserves_attempt_for_retry() {
        let mut wf = PaymentWorkflow::new();
        wf.open().unwrap();
        wf.choose_method(PaymentMethod::Cash).unwrap();
        wf.enter_tendered(100.0).unwrap();

        let cart = cart_with(&[(1, 50.0, 2)]);
        wf.begin_submit(&cart).unwrap();
        wf.on_failure().unwrap();

        assert_eq!(
            *wf.state(),
            PaymentState::ReadyToSubmit {
                method: PaymentMethod::Cash,
                tendered: Some(100.0)
            }
        );

        // retry succeeds without re-entering anything
        wf.begin_submit(&cart).unwrap();
        let receipt = wf.on_success(server_bill(100.0)).unwrap();
        assert_eq!(receipt.change, Some(0.0));
    }

    #[test]
    fn test_cancel_discards_attempt() {
        let mut wf = PaymentWorkflow::new();
        wf.open().unwrap();
        wf.choose_method(PaymentMethod::Cash).unwrap();
        wf.enter_tendered(500.0).unwrap();

        wf.cancel().unwrap();
        assert_eq!(*wf.state(), PaymentState::Idle);

        // reopening starts clean
        wf.open().unwrap();
        assert_eq!(*wf.state(), PaymentState::SelectingMethod);
    }

    #[test]
    fn test_cancel_from_idle_is_noop() {
        let mut wf = PaymentWorkflow::new();
        wf.cancel().unwrap();
        assert_eq!(*wf.state(), PaymentState::Idle);
    }

    #[test]
    fn test_submit_without_method_or_amount() {
        let mut wf = PaymentWorkflow::new();
        let cart = cart_with(&[(1, 50.0, 1)]);

        assert_eq!(wf.begin_submit(&cart), Err(PaymentError::NotOpen));

        wf.open().unwrap();
        assert_eq!(wf.begin_submit(&cart), Err(PaymentError::NoMethodSelected));

        wf.choose_method(PaymentMethod::Cash).unwrap();
        assert_eq!(wf.begin_submit(&cart), Err(PaymentError::CashAmountMissing));
    }

    #[test]
    fn test_invalid_tendered_amounts() {
        let mut wf = PaymentWorkflow::new();
        wf.open().unwrap();
        wf.choose_method(PaymentMethod::Cash).unwrap();

        assert_eq!(wf.enter_tendered(-1.0), Err(PaymentError::InvalidAmount));
        assert_eq!(wf.enter_tendered(f64::NAN), Err(PaymentError::InvalidAmount));
        assert_eq!(*wf.state(), PaymentState::AwaitingCashAmount);
    }

    #[test]
    fn test_resolution_without_submission_keeps_state() {
        let mut wf = PaymentWorkflow::new();
        wf.open().unwrap();
        wf.choose_method(PaymentMethod::Cash).unwrap();
        wf.enter_tendered(100.0).unwrap();

        assert_eq!(wf.on_failure(), Err(PaymentError::NothingInFlight));
        assert!(wf.on_success(server_bill(100.0)).is_err());
        assert_eq!(
            *wf.state(),
            PaymentState::ReadyToSubmit {
                method: PaymentMethod::Cash,
                tendered: Some(100.0)
            }
        );
    }

    #[test]
    fn test_reopen_after_open_rejected() {
        let mut wf = PaymentWorkflow::new();
        wf.open().unwrap();
        assert_eq!(wf.open(), Err(PaymentError::AlreadyOpen));
    }
}
