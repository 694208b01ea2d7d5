//! Stub user endpoints logging through the request-scoped logger.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use bytes::Bytes;
use uuid::Uuid;
use vigil_core::{attr, mask_email};

use crate::error::{ApiError, AppError};
use crate::middleware::RequestScope;
use crate::state::AppState;
use crate::users::{CreateUserRequest, User};

/// `POST /api/v1/users`
pub async fn create_user(
    scope: RequestScope,
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let log = scope.logger();

    let request: CreateUserRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            log.warn("invalid_request_body", [attr("error", e.to_string())]);
            return Err(scope.fail(AppError::bad_request("Invalid request body", "body")));
        }
    };

    log.info(
        "creating_user",
        [
            attr("email", mask_email(&request.email)),
            attr("username", &request.username),
            attr("full_name", &request.full_name),
        ],
    );

    if let Err(err) = request.validate() {
        log.warn(
            "user_validation_failed",
            [attr("error", err.to_string()), attr("email", mask_email(&request.email))],
        );
        return Err(scope.fail(err));
    }

    let email = mask_email(&request.email);
    let username = request.username.clone();
    let user = match state.users().create(request) {
        Ok(user) => user,
        Err(err @ AppError::Conflict(_)) => {
            log.warn("user_already_exists", [attr("email", email), attr("username", username)]);
            return Err(scope.fail(err));
        }
        Err(err) => {
            log.with_error(&err).error("user_creation_failed", [attr("email", email)]);
            return Err(scope.fail(err));
        }
    };

    log.with_user(&user.id.to_string(), &user.email)
        .info("user_created_successfully", [attr("username", &user.username)]);

    Ok((StatusCode::CREATED, Json(user)))
}

/// `GET /api/v1/users/{id}`
pub async fn get_user(
    scope: RequestScope,
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<User>, ApiError> {
    let log = scope.logger();

    let id = match Uuid::parse_str(&user_id) {
        Ok(id) => id,
        Err(e) => {
            log.warn("invalid_user_id", [attr("user_id", &user_id), attr("error", e.to_string())]);
            return Err(scope.fail(AppError::bad_request("Invalid user ID format", "userId")));
        }
    };

    log.debug("fetching_user_by_id", [attr("user_id", &user_id)]);

    let Some(user) = state.users().get(&id) else {
        log.info("user_not_found", [attr("user_id", &user_id)]);
        return Err(scope.fail(AppError::not_found("user", user_id)));
    };

    log.info(
        "user_accessed",
        [attr("user_id", &user_id), attr("action", "view_user_details")],
    );

    Ok(Json(user))
}

/// Fallback for unknown routes.
pub async fn not_found(scope: RequestScope) -> ApiError {
    let path = scope.path().to_string();
    scope.fail(AppError::not_found("route", path))
}
