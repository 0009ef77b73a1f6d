use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::{ApiConfig, SecurityConfig};
use crate::handlers;
use crate::state::AppState;

pub fn app(state: AppState, api: &ApiConfig, security: &SecurityConfig) -> Router {
    let mut router = Router::new()
        // Public
        .route("/", get(handlers::system::root))
        .route("/health", get(handlers::system::health))
        .merge(user_routes())
        .merge(music_routes())
        .merge(playlist_routes())
        .layer(DefaultBodyLimit::max(api.max_request_size_bytes))
        .with_state(state);

    if security.enable_cors {
        router = router.layer(cors_layer(&security.cors_origins));
    }
    if api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }
    router
}

fn user_routes() -> Router<AppState> {
    use handlers::user;

    Router::new()
        .route("/user/signup", post(user::signup))
        .route("/user/login", post(user::login))
        .route("/user/profile", get(user::profile))
}

fn music_routes() -> Router<AppState> {
    use handlers::music;

    Router::new()
        .route("/music", post(music::add_music).get(music::get_all_musics))
        .route("/music/genres", get(music::get_all_genres))
        .route(
            "/music/:id",
            get(music::get_music_by_id).delete(music::delete_music),
        )
}

fn playlist_routes() -> Router<AppState> {
    use handlers::playlist;

    Router::new()
        .route("/playlist", get(playlist::get_user_playlists))
        .route("/playlist/create", post(playlist::create_playlist))
        .route("/playlist/:id", delete(playlist::delete_playlist))
        .route("/playlist/:id/music", post(playlist::add_music_to_playlist))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}
