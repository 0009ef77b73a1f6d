use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde_json::Value;

use crate::database::models::{Playlist, PlaylistInput, PlaylistMusicInput, PlaylistOutput};
use crate::middleware::{ApiResponse, ApiResult, BearerToken};
use crate::state::AppState;

/// POST /playlist/create
pub async fn create_playlist(
    State(state): State<AppState>,
    token: BearerToken,
    payload: Result<Json<PlaylistInput>, JsonRejection>,
) -> ApiResult<PlaylistOutput> {
    let Json(input) = payload?;
    let playlist = state.playlists.create_playlist(token.as_str(), input).await?;
    Ok(ApiResponse::created(PlaylistOutput { playlist }))
}

/// GET /playlist - playlists of the authenticated user
pub async fn get_user_playlists(
    State(state): State<AppState>,
    token: BearerToken,
) -> ApiResult<Vec<Playlist>> {
    let playlists = state.playlists.get_user_playlists(token.as_str()).await?;
    Ok(ApiResponse::success(playlists))
}

/// POST /playlist/:id/music
pub async fn add_music_to_playlist(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<String>,
    payload: Result<Json<PlaylistMusicInput>, JsonRejection>,
) -> ApiResult<PlaylistOutput> {
    let Json(input) = payload?;
    let playlist = state
        .playlists
        .add_music_to_playlist(token.as_str(), &id, input)
        .await?;
    Ok(ApiResponse::success(PlaylistOutput { playlist }))
}

/// DELETE /playlist/:id
pub async fn delete_playlist(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    state.playlists.delete_playlist(token.as_str(), &id).await?;
    Ok(ApiResponse::message("Playlist deleted"))
}
