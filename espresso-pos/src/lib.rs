//! Espresso POS - point-of-sale front-end core
//!
//! The application core behind the billing screen: session management,
//! role-gated navigation, the cart engine and the payment workflow. All
//! server communication goes through [`espresso_client::PosApi`].

pub mod admin;
pub mod app;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod logger;
pub mod navigation;
pub mod payment;
pub mod session;
pub mod shell;

pub use app::PosApp;
pub use cart::{Cart, CartError, CartLine};
pub use error::{PosError, PosResult};
pub use navigation::{AdminPage, Role, Screen, StaffPage};
pub use payment::{PaymentState, PaymentWorkflow, Receipt};
pub use session::{Session, SessionStore};
