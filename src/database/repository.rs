use async_trait::async_trait;

use crate::database::manager::DatabaseError;
use crate::database::models::{Genre, Music, Playlist, User};

#[async_trait]
pub trait UserDatabase: Send + Sync {
    /// Fails with `Conflict` when the email is already registered
    async fn create_user(&self, user: &User) -> Result<(), DatabaseError>;

    async fn get_user_by_id(&self, id: &str) -> Result<Option<User>, DatabaseError>;

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError>;
}

#[async_trait]
pub trait MusicDatabase: Send + Sync {
    async fn create_music(&self, music: &Music) -> Result<(), DatabaseError>;

    async fn get_music_by_id(&self, id: &str) -> Result<Option<Music>, DatabaseError>;

    /// All tracks, oldest first
    async fn get_all_musics(&self) -> Result<Vec<Music>, DatabaseError>;

    /// Returns false if no track had this id. Also detaches the track from every playlist.
    async fn delete_music(&self, id: &str) -> Result<bool, DatabaseError>;
}

#[async_trait]
pub trait GenreDatabase: Send + Sync {
    async fn get_all_genres(&self) -> Result<Vec<Genre>, DatabaseError>;
}

#[async_trait]
pub trait PlaylistDatabase: Send + Sync {
    async fn create_playlist(&self, playlist: &Playlist) -> Result<(), DatabaseError>;

    async fn get_playlist_by_id(&self, id: &str) -> Result<Option<Playlist>, DatabaseError>;

    async fn get_playlists_by_user(&self, user_id: &str) -> Result<Vec<Playlist>, DatabaseError>;

    /// Fails with `Conflict` when the track is already in the playlist
    async fn add_music_to_playlist(
        &self,
        playlist_id: &str,
        music_id: &str,
    ) -> Result<(), DatabaseError>;

    async fn delete_playlist(&self, id: &str) -> Result<bool, DatabaseError>;
}

/// A complete storage backend
#[async_trait]
pub trait Database: UserDatabase + MusicDatabase + GenreDatabase + PlaylistDatabase {
    async fn health_check(&self) -> Result<(), DatabaseError>;
}
