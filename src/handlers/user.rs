use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::database::models::{LoginInput, SignupInput, TokenOutput, UserOutput};
use crate::middleware::{ApiResponse, ApiResult, BearerToken};
use crate::state::AppState;

/// POST /user/signup - create an account and receive a token
pub async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<SignupInput>, JsonRejection>,
) -> ApiResult<TokenOutput> {
    let Json(input) = payload?;
    let token = state.users.signup(input).await?;
    Ok(ApiResponse::created(TokenOutput { token }))
}

/// POST /user/login - exchange email and password for a token
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginInput>, JsonRejection>,
) -> ApiResult<TokenOutput> {
    let Json(input) = payload?;
    let token = state.users.login(input).await?;
    Ok(ApiResponse::success(TokenOutput { token }))
}

/// GET /user/profile - the authenticated user
pub async fn profile(
    State(state): State<AppState>,
    token: BearerToken,
) -> ApiResult<UserOutput> {
    let user = state.users.get_profile(token.as_str()).await?;
    Ok(ApiResponse::success(user))
}
