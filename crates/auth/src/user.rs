//! Staff user accounts.

use serde::Serialize;

use stockroom_core::{DomainResult, FieldErrors, UserId};

use crate::{Principal, Role, hash_password, verify_password};

/// A stored staff account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StaffUser {
    pub id: UserId,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
}

impl StaffUser {
    pub fn check_password(&self, password: &str) -> bool {
        verify_password(password, &self.password_hash)
    }

    pub fn principal(&self) -> Principal {
        Principal::new(self.id, self.username.clone(), self.role)
    }
}

/// Account creation request. The password is hashed on `into_user`.
#[derive(Debug, Clone)]
pub struct NewStaffUser {
    pub username: String,
    pub password: String,
    pub role: Role,
}

impl NewStaffUser {
    pub fn new(username: impl Into<String>, password: impl Into<String>, role: Role) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            role,
        }
    }

    pub fn validated(self) -> DomainResult<Self> {
        let mut errors = FieldErrors::new();
        let username = self.username.trim().to_string();
        if username.is_empty() {
            errors.add("username", "this field may not be blank");
        }
        if self.password.is_empty() {
            errors.add("password", "this field may not be blank");
        }
        errors.into_result()?;
        Ok(Self { username, ..self })
    }

    /// Hash the password and build the stored account.
    pub fn into_user(self, id: UserId) -> DomainResult<StaffUser> {
        Ok(StaffUser {
            id,
            password_hash: hash_password(&self.password)?,
            username: self.username,
            role: self.role,
        })
    }
}
