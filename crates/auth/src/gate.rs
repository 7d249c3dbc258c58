//! Role gate: which roles may open which views.
//!
//! The policy is a static lookup table. Handlers call `authorize_view` before
//! doing any work, so a denial has no side effects.

use serde::Serialize;
use thiserror::Error;

use crate::{Principal, Role};

/// Views protected by role rather than by authentication alone.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GatedView {
    AdminDashboard,
    EmployeeDashboard,
    Logs,
    CategoryWrite,
}

impl GatedView {
    pub const ALL: [GatedView; 4] = [
        GatedView::AdminDashboard,
        GatedView::EmployeeDashboard,
        GatedView::Logs,
        GatedView::CategoryWrite,
    ];
}

impl core::fmt::Display for GatedView {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            GatedView::AdminDashboard => "admin_dashboard",
            GatedView::EmployeeDashboard => "employee_dashboard",
            GatedView::Logs => "logs",
            GatedView::CategoryWrite => "category_write",
        };
        f.write_str(s)
    }
}

/// Access rule for a gated view.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Access {
    /// Only the listed roles are admitted.
    Only(&'static [Role]),
    /// Every role except the listed ones is admitted.
    AllExcept(&'static [Role]),
}

impl Access {
    pub fn admits(&self, role: Role) -> bool {
        match self {
            Access::Only(roles) => roles.contains(&role),
            Access::AllExcept(roles) => !roles.contains(&role),
        }
    }
}

const GATE: &[(GatedView, Access)] = &[
    (GatedView::AdminDashboard, Access::Only(&[Role::Admin])),
    (GatedView::EmployeeDashboard, Access::AllExcept(&[Role::Secretary])),
    (GatedView::Logs, Access::Only(&[Role::Admin])),
    (GatedView::CategoryWrite, Access::Only(&[Role::Admin])),
];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("forbidden: role '{role}' may not access {view}")]
    Forbidden { view: GatedView, role: Role },
}

/// Access rule for `view`. Views missing from the table admit nobody.
pub fn access_for(view: GatedView) -> Access {
    GATE.iter()
        .find(|(v, _)| *v == view)
        .map(|(_, access)| *access)
        .unwrap_or(Access::Only(&[]))
}

/// Authorize a principal for a gated view.
///
/// - No IO
/// - No panics
pub fn authorize_view(principal: &Principal, view: GatedView) -> Result<(), AuthzError> {
    if access_for(view).admits(principal.role) {
        Ok(())
    } else {
        tracing::debug!(
            username = %principal.username,
            role = %principal.role,
            view = %view,
            "role gate denied access"
        );
        Err(AuthzError::Forbidden {
            view,
            role: principal.role,
        })
    }
}

/// Every gated view the role may open (used by `/whoami`).
pub fn allowed_views(role: Role) -> Vec<GatedView> {
    GatedView::ALL
        .into_iter()
        .filter(|v| access_for(*v).admits(role))
        .collect()
}
