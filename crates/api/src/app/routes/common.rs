use axum::extract::rejection::JsonRejection;
use axum::response::Response;
use axum::Json;

use stockroom_core::DomainResult;

use crate::app::errors;

/// Unwrap a JSON body, turning a rejection into a 400 response.
pub fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, Response> {
    body.map(|Json(v)| v).map_err(errors::json_rejection)
}

/// Turn a validation result into a 400 response on failure.
pub fn valid<T>(result: DomainResult<T>) -> Result<T, Response> {
    result.map_err(errors::domain_error_to_response)
}
