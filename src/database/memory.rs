use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::database::manager::DatabaseError;
use crate::database::models::{Genre, Music, Playlist, User, DEFAULT_GENRES};
use crate::database::repository::{
    Database, GenreDatabase, MusicDatabase, PlaylistDatabase, UserDatabase,
};
use crate::services::IdGenerator;

#[derive(Default)]
struct Tables {
    users: HashMap<String, User>,
    musics: Vec<Music>,
    genres: Vec<Genre>,
    playlists: Vec<Playlist>,
}

/// In-process store with the same constraints as the Postgres schema
pub struct MemoryDatabase {
    tables: RwLock<Tables>,
}

impl MemoryDatabase {
    /// Empty store with the default genres seeded
    pub fn new() -> Self {
        let id_generator = IdGenerator::new();
        let genres = DEFAULT_GENRES
            .iter()
            .map(|name| Genre {
                id: id_generator.generate(),
                name: name.to_string(),
            })
            .collect();

        Self {
            tables: RwLock::new(Tables {
                genres,
                ..Default::default()
            }),
        }
    }
}

impl Default for MemoryDatabase {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserDatabase for MemoryDatabase {
    async fn create_user(&self, user: &User) -> Result<(), DatabaseError> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.email == user.email) {
            return Err(DatabaseError::Conflict("Email already registered".to_string()));
        }
        tables.users.insert(user.id.clone(), user.clone());
        Ok(())
    }

    async fn get_user_by_id(&self, id: &str) -> Result<Option<User>, DatabaseError> {
        Ok(self.tables.read().await.users.get(id).cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }
}

#[async_trait]
impl MusicDatabase for MemoryDatabase {
    async fn create_music(&self, music: &Music) -> Result<(), DatabaseError> {
        self.tables.write().await.musics.push(music.clone());
        Ok(())
    }

    async fn get_music_by_id(&self, id: &str) -> Result<Option<Music>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.musics.iter().find(|m| m.id == id).cloned())
    }

    async fn get_all_musics(&self) -> Result<Vec<Music>, DatabaseError> {
        Ok(self.tables.read().await.musics.clone())
    }

    async fn delete_music(&self, id: &str) -> Result<bool, DatabaseError> {
        let mut tables = self.tables.write().await;
        let before = tables.musics.len();
        tables.musics.retain(|m| m.id != id);
        if tables.musics.len() == before {
            return Ok(false);
        }
        for playlist in tables.playlists.iter_mut() {
            playlist.musics.retain(|music_id| music_id != id);
        }
        Ok(true)
    }
}

#[async_trait]
impl GenreDatabase for MemoryDatabase {
    async fn get_all_genres(&self) -> Result<Vec<Genre>, DatabaseError> {
        Ok(self.tables.read().await.genres.clone())
    }
}

#[async_trait]
impl PlaylistDatabase for MemoryDatabase {
    async fn create_playlist(&self, playlist: &Playlist) -> Result<(), DatabaseError> {
        self.tables.write().await.playlists.push(playlist.clone());
        Ok(())
    }

    async fn get_playlist_by_id(&self, id: &str) -> Result<Option<Playlist>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.playlists.iter().find(|p| p.id == id).cloned())
    }

    async fn get_playlists_by_user(&self, user_id: &str) -> Result<Vec<Playlist>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables
            .playlists
            .iter()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn add_music_to_playlist(
        &self,
        playlist_id: &str,
        music_id: &str,
    ) -> Result<(), DatabaseError> {
        let mut tables = self.tables.write().await;
        if !tables.musics.iter().any(|m| m.id == music_id) {
            return Err(DatabaseError::NotFound("Music not found".to_string()));
        }
        let playlist = tables
            .playlists
            .iter_mut()
            .find(|p| p.id == playlist_id)
            .ok_or_else(|| DatabaseError::NotFound("Playlist not found".to_string()))?;

        if playlist.musics.iter().any(|id| id == music_id) {
            return Err(DatabaseError::Conflict(
                "Music is already in this playlist".to_string(),
            ));
        }
        playlist.musics.push(music_id.to_string());
        Ok(())
    }

    async fn delete_playlist(&self, id: &str) -> Result<bool, DatabaseError> {
        let mut tables = self.tables.write().await;
        let before = tables.playlists.len();
        tables.playlists.retain(|p| p.id != id);
        Ok(tables.playlists.len() != before)
    }
}

#[async_trait]
impl Database for MemoryDatabase {
    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}
