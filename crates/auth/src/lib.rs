//! `stockroom-auth`: authentication and role gating.
//!
//! This crate is intentionally decoupled from HTTP and storage: it knows how
//! to hash and check passwords, mint and validate session tokens, and decide
//! whether a role may open a gated view.

pub mod claims;
pub mod gate;
pub mod password;
pub mod principal;
pub mod roles;
pub mod token;
pub mod user;

pub use claims::{SessionClaims, TokenValidationError, validate_claims};
pub use gate::{Access, AuthzError, GatedView, allowed_views, authorize_view};
pub use password::{hash_password, verify_password};
pub use principal::Principal;
pub use roles::Role;
pub use token::{Hs256Jwt, JwtValidator, TokenError};
pub use user::{NewStaffUser, StaffUser};
