//! Consistent JSON error responses.
//!
//! Every error body is `{"error": code, "message": text}`, plus `"fields"`
//! for per-field validation messages.

use axum::extract::rejection::{FormRejection, JsonRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use stockroom_auth::AuthzError;
use stockroom_core::{DomainError, FieldErrors};
use stockroom_infra::StoreError;
use stockroom_inventory::LedgerError;

pub fn json_error(status: StatusCode, code: &'static str, message: impl Into<String>) -> Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

pub fn field_errors(fields: &FieldErrors) -> Response {
    (
        StatusCode::BAD_REQUEST,
        axum::Json(json!({
            "error": "validation_error",
            "message": fields.to_string(),
            "fields": fields,
        })),
    )
        .into_response()
}

pub fn unauthenticated() -> Response {
    json_error(StatusCode::UNAUTHORIZED, "unauthenticated", "authentication required")
}

pub fn not_found() -> Response {
    json_error(StatusCode::NOT_FOUND, "not_found", "not found")
}

pub fn internal(context: &str, err: impl core::fmt::Display) -> Response {
    tracing::error!(error = %err, "{context} failed");
    json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", "internal server error")
}

pub fn authz_error_to_response(err: AuthzError) -> Response {
    json_error(StatusCode::FORBIDDEN, "forbidden", err.to_string())
}

pub fn domain_error_to_response(err: DomainError) -> Response {
    match err {
        DomainError::InvalidFields(fields) => field_errors(&fields),
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        DomainError::InvariantViolation(msg) => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "invariant_violation", msg)
        }
    }
}

pub fn ledger_error_to_response(err: LedgerError) -> Response {
    match err {
        LedgerError::InsufficientStock { .. } => {
            json_error(StatusCode::CONFLICT, "insufficient_stock", err.to_string())
        }
        LedgerError::InvalidQuantity(_) => domain_error_to_response(err.into()),
        LedgerError::Overflow => json_error(StatusCode::UNPROCESSABLE_ENTITY, "stock_overflow", err.to_string()),
    }
}

pub fn store_error_to_response(err: StoreError) -> Response {
    match err {
        StoreError::NotFound => not_found(),
        StoreError::Domain(e) => domain_error_to_response(e),
        StoreError::Ledger(e) => ledger_error_to_response(e),
        StoreError::Conflict(msg) => json_error(StatusCode::CONFLICT, "conflict", msg),
        e @ StoreError::Backend { .. } => internal("store operation", e),
    }
}

type PathError = serde_path_to_error::Error<serde_json::Error>;

/// A body that parsed as JSON but did not fit the payload is a field error.
pub fn json_rejection(rejection: JsonRejection) -> Response {
    if let JsonRejection::JsonDataError(ref data) = rejection {
        if let Some(err) = path_error(data) {
            return field_errors(&data_error_fields(err));
        }
        let mut fields = FieldErrors::new();
        fields.add(NON_FIELD_ERRORS, rejection.body_text());
        return field_errors(&fields);
    }
    json_error(rejection.status(), "invalid_body", rejection.body_text())
}

const NON_FIELD_ERRORS: &str = "non_field_errors";

fn path_error<'a>(rejection: &'a (dyn std::error::Error + 'static)) -> Option<&'a PathError> {
    let mut source = rejection.source();
    while let Some(err) = source {
        if let Some(found) = err.downcast_ref::<PathError>() {
            return Some(found);
        }
        source = err.source();
    }
    None
}

fn data_error_fields(err: &PathError) -> FieldErrors {
    let mut fields = FieldErrors::new();
    let message = err.inner().to_string();
    let message = message.split(" at line ").next().unwrap_or_default();

    if let Some(name) = message.strip_prefix("missing field ") {
        let name = name.trim_matches('`');
        let field = match err.path().to_string().as_str() {
            "." => name.to_owned(),
            parent => format!("{parent}.{name}"),
        };
        fields.add(field, "this field is required");
        return fields;
    }

    let field = match err.path().to_string() {
        root if root == "." => NON_FIELD_ERRORS.to_owned(),
        path => path,
    };
    fields.add(field, message);
    fields
}

pub fn form_rejection(rejection: FormRejection) -> Response {
    json_error(rejection.status(), "invalid_body", rejection.body_text())
}

/// Body for panics caught by the outermost layer.
pub fn panic_response(err: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(panic = detail, "request handler panicked");
    json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", "internal server error")
}
