use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;

use crate::auth::Authenticator;
use crate::business::{ensure_owner_or_admin, optional_text, RequiredFields};
use crate::database::models::{Genre, Music, MusicInput};
use crate::database::{GenreDatabase, MusicDatabase};
use crate::error::ApiError;
use crate::services::IdGenerator;

pub struct MusicBusiness {
    id_generator: Arc<IdGenerator>,
    authenticator: Arc<Authenticator>,
    music_database: Arc<dyn MusicDatabase>,
    genre_database: Arc<dyn GenreDatabase>,
}

impl MusicBusiness {
    pub fn new(
        id_generator: Arc<IdGenerator>,
        authenticator: Arc<Authenticator>,
        music_database: Arc<dyn MusicDatabase>,
        genre_database: Arc<dyn GenreDatabase>,
    ) -> Self {
        Self {
            id_generator,
            authenticator,
            music_database,
            genre_database,
        }
    }

    pub async fn add_music(&self, token: &str, input: MusicInput) -> Result<Music, ApiError> {
        let mut required = RequiredFields::new();
        let title = required.take("title", &input.title).to_string();
        let author = required.take("author", &input.author).to_string();
        let file = required.take("file", &input.file).to_string();
        required.finish()?;

        let auth = self.authenticator.get_token_data(token)?;
        let genres = self.resolve_genres(&input.genres).await?;

        let music = Music {
            id: self.id_generator.generate(),
            title,
            author,
            file,
            genres,
            album: optional_text(input.album),
            added_by: auth.id,
            created_at: Utc::now(),
        };
        self.music_database.create_music(&music).await?;
        tracing::info!("Music {} added by {}", music.id, music.added_by);

        Ok(music)
    }

    pub async fn get_music_by_id(&self, token: &str, id: &str) -> Result<Music, ApiError> {
        self.authenticator.get_token_data(token)?;
        self.music_database
            .get_music_by_id(id)
            .await?
            .ok_or_else(|| ApiError::not_found("Music not found"))
    }

    pub async fn get_all_musics(&self, token: &str) -> Result<Vec<Music>, ApiError> {
        self.authenticator.get_token_data(token)?;
        Ok(self.music_database.get_all_musics().await?)
    }

    /// Public genre listing, no token required
    pub async fn get_all_genres(&self) -> Result<Vec<Genre>, ApiError> {
        Ok(self.genre_database.get_all_genres().await?)
    }

    /// Only the user who added the track, or an admin, may delete it
    pub async fn delete_music(&self, id: &str, token: &str) -> Result<(), ApiError> {
        let auth = self.authenticator.get_token_data(token)?;
        let music = self
            .music_database
            .get_music_by_id(id)
            .await?
            .ok_or_else(|| ApiError::not_found("Music not found"))?;

        ensure_owner_or_admin(&auth, &music.added_by, "music")?;

        if !self.music_database.delete_music(id).await? {
            return Err(ApiError::not_found("Music not found"));
        }
        tracing::info!("Music {} deleted by {} ({})", id, auth.id, auth.role);
        Ok(())
    }

    /// Match requested genres case-insensitively against the catalogue, keeping canonical names
    async fn resolve_genres(&self, requested: &[String]) -> Result<Vec<String>, ApiError> {
        if requested.is_empty() {
            return Ok(Vec::new());
        }

        let known: HashMap<String, String> = self
            .genre_database
            .get_all_genres()
            .await?
            .into_iter()
            .map(|genre| (genre.name.to_lowercase(), genre.name))
            .collect();

        let mut resolved: Vec<String> = Vec::with_capacity(requested.len());
        let mut unknown = Vec::new();
        for name in requested {
            match known.get(&name.trim().to_lowercase()) {
                Some(canonical) if !resolved.contains(canonical) => resolved.push(canonical.clone()),
                Some(_) => {}
                None => unknown.push(name.trim().to_string()),
            }
        }

        if !unknown.is_empty() {
            let mut field_errors = HashMap::new();
            field_errors.insert(
                "genres".to_string(),
                format!("Unknown genre(s): {}", unknown.join(", ")),
            );
            return Err(ApiError::validation_error("Invalid genres", Some(field_errors)));
        }
        Ok(resolved)
    }
}
