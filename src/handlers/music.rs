use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde_json::Value;

use crate::database::models::{Genre, Music, MusicInput, MusicOutput};
use crate::middleware::{ApiResponse, ApiResult, BearerToken};
use crate::state::AppState;

/// POST /music
pub async fn add_music(
    State(state): State<AppState>,
    token: BearerToken,
    payload: Result<Json<MusicInput>, JsonRejection>,
) -> ApiResult<MusicOutput> {
    let Json(input) = payload?;
    let music = state.musics.add_music(token.as_str(), input).await?;
    Ok(ApiResponse::created(MusicOutput { music }))
}

/// GET /music/:id
pub async fn get_music_by_id(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<String>,
) -> ApiResult<Music> {
    let music = state.musics.get_music_by_id(token.as_str(), &id).await?;
    Ok(ApiResponse::success(music))
}

/// GET /music
pub async fn get_all_musics(
    State(state): State<AppState>,
    token: BearerToken,
) -> ApiResult<Vec<Music>> {
    let musics = state.musics.get_all_musics(token.as_str()).await?;
    Ok(ApiResponse::success(musics))
}

/// GET /music/genres - public
pub async fn get_all_genres(State(state): State<AppState>) -> ApiResult<Vec<Genre>> {
    let genres = state.musics.get_all_genres().await?;
    Ok(ApiResponse::success(genres))
}

/// DELETE /music/:id - owner or admin
pub async fn delete_music(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    state.musics.delete_music(&id, token.as_str()).await?;
    Ok(ApiResponse::message("Music deleted"))
}
