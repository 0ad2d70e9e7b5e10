use anyhow::anyhow;
use axum::{extract::rejection::JsonRejection, http::StatusCode, Json};
use serde_json::Value;
use tracing::debug;

use crate::errors::AppError;
use crate::users::validation::{validate_user_input, UserInput};
use crate::validation::ValidationFailure;

/// POST /users
///
/// Echoes the validated user back with defaults applied. A body without a
/// JSON content type is treated as absent; unparseable JSON fails validation
/// at the root path.
pub async fn handle_create_user(
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<UserInput>), AppError> {
    let body = match payload {
        Ok(Json(body)) => Some(body),
        Err(JsonRejection::MissingJsonContentType(_)) => None,
        Err(JsonRejection::JsonSyntaxError(e)) => {
            return Err(ValidationFailure::single("", e.body_text()).into())
        }
        Err(JsonRejection::JsonDataError(e)) => {
            return Err(ValidationFailure::single("", e.body_text()).into())
        }
        Err(e) => return Err(anyhow!("failed to read request body: {}", e.body_text()).into()),
    };

    let user = validate_user_input(body.as_ref())?;
    debug!("Validated user '{}'", user.name);

    Ok((StatusCode::CREATED, Json(user)))
}
