//! API-side role gate guard.
//!
//! Handlers call this before touching the store, so a denied request has no
//! side effects.

use stockroom_auth::{AuthzError, GatedView, authorize_view};

use crate::context::PrincipalContext;

pub fn authorize(principal: &PrincipalContext, view: GatedView) -> Result<(), AuthzError> {
    authorize_view(principal.principal(), view)
}
