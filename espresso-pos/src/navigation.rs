//! Navigation dispatch
//!
//! Pure mapping from (session, requested page token) to the screen to
//! render. Not a URL router: no history stack, no deep-linking; navigation
//! state is re-derived to the role's default on restart.

use crate::session::Session;
use thiserror::Error;

/// Role outside the known set
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

/// Operator role (closed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Staff,
    Admin,
}

impl Role {
    /// Validate a raw role string against the known set
    ///
    /// Anything else is an error; callers must treat it as logged out
    /// rather than falling through to a default branch.
    pub fn parse(raw: &str) -> Result<Self, UnknownRole> {
        match raw {
            "STAFF" => Ok(Self::Staff),
            "ADMIN" => Ok(Self::Admin),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// Admin area pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdminPage {
    #[default]
    Dashboard,
    Bills,
    Reports,
    Inventory,
    Products,
    Staff,
}

impl AdminPage {
    fn from_token(token: Option<&str>) -> Self {
        match token {
            Some("dashboard") => Self::Dashboard,
            Some("bills") => Self::Bills,
            Some("reports") => Self::Reports,
            Some("inventory") => Self::Inventory,
            Some("products") => Self::Products,
            Some("staff") => Self::Staff,
            _ => Self::default(),
        }
    }
}

/// Staff area pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StaffPage {
    #[default]
    Pos,
    History,
}

impl StaffPage {
    fn from_token(token: Option<&str>) -> Self {
        match token {
            Some("pos") => Self::Pos,
            Some("history") => Self::History,
            _ => Self::default(),
        }
    }
}

/// Screen to render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Admin(AdminPage),
    Staff(StaffPage),
}

/// Resolve the screen for a session and requested page token
///
/// No session always yields the login screen. A role outside
/// {STAFF, ADMIN} is treated as logged out, never as a staff fallback.
pub fn resolve(session: Option<&Session>, token: Option<&str>) -> Screen {
    let Some(session) = session else {
        return Screen::Login;
    };

    match Role::parse(&session.role) {
        Ok(Role::Admin) => Screen::Admin(AdminPage::from_token(token)),
        Ok(Role::Staff) => Screen::Staff(StaffPage::from_token(token)),
        Err(e) => {
            tracing::warn!(role = %e.0, username = %session.username, "Session carries unknown role, forcing login screen");
            Screen::Login
        }
    }
}
