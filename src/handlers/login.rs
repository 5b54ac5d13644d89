//! Login endpoint: checks the configured credential pair and issues a token.
//!
//! Deliberately exempt from authorization, and deliberately vague on failure:
//! a missing body, an unknown user and a wrong password all produce the same
//! generic 400 so callers cannot enumerate users.

use crate::error::ApiError;
use crate::models::{TokenBody, UserModel};
use crate::state::AppState;
use axum::{extract::State, Json};

pub async fn login(
    State(state): State<AppState>,
    body: Option<Json<UserModel>>,
) -> Result<Json<TokenBody>, ApiError> {
    let Some(Json(user)) = body else {
        return Err(ApiError::InvalidLogin);
    };
    if !state.admin.matches(&user.username, &user.password) {
        return Err(ApiError::InvalidLogin);
    }
    let token = state.tokens.issue(&user.username)?;
    Ok(Json(TokenBody { token }))
}
