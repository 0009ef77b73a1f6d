use std::sync::Arc;

use crate::auth::Authenticator;
use crate::business::{MusicBusiness, PlaylistBusiness, UserBusiness};
use crate::database::Database;
use crate::services::{HashManager, IdGenerator};

/// Services wired once at startup and shared by every request
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<UserBusiness>,
    pub musics: Arc<MusicBusiness>,
    pub playlists: Arc<PlaylistBusiness>,
    pub database: Arc<dyn Database>,
}

impl AppState {
    pub fn from_database<D>(database: Arc<D>, authenticator: Arc<Authenticator>) -> Self
    where
        D: Database + 'static,
    {
        let id_generator = Arc::new(IdGenerator::new());
        let hash_manager = Arc::new(HashManager::new());

        let users = UserBusiness::new(
            id_generator.clone(),
            authenticator.clone(),
            hash_manager,
            database.clone(),
        );
        let musics = MusicBusiness::new(
            id_generator.clone(),
            authenticator.clone(),
            database.clone(),
            database.clone(),
        );
        let playlists = PlaylistBusiness::new(
            id_generator,
            authenticator,
            database.clone(),
            database.clone(),
        );

        Self {
            users: Arc::new(users),
            musics: Arc::new(musics),
            playlists: Arc::new(playlists),
            database,
        }
    }
}
