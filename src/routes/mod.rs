use actix_web::HttpResponse;
use serde_json::json;

use crate::services::ServiceError;

pub mod products;
pub mod stores;

/// Map a service failure to its HTTP status and JSON error body. Repository
/// details are logged, never leaked to the caller.
pub(crate) fn error_response(err: &ServiceError) -> HttpResponse {
    match err {
        ServiceError::NotFound => HttpResponse::NotFound().json(json!({
            "error": "not_found",
            "message": err.to_string(),
        })),
        ServiceError::Conflict(message) => HttpResponse::Conflict().json(json!({
            "error": "conflict",
            "message": message,
        })),
        ServiceError::BadRequest(message) => HttpResponse::BadRequest().json(json!({
            "error": "bad_request",
            "message": message,
        })),
        ServiceError::Validation(message) => HttpResponse::BadRequest().json(json!({
            "error": "validation",
            "message": message,
        })),
        ServiceError::Repository(repo_err) => {
            log::error!("repository failure: {repo_err}");
            HttpResponse::InternalServerError().json(json!({
                "error": "internal",
                "message": "internal server error",
            }))
        }
    }
}
