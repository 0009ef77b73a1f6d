use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::database::manager::DatabaseError;
use crate::database::models::{Genre, Music, Playlist, User, UserRole};
use crate::database::repository::{
    Database, GenreDatabase, MusicDatabase, PlaylistDatabase, UserDatabase,
};

const PLAYLIST_COLUMNS: &str = "p.id, p.title, p.subtitle, p.image, p.user_id, p.created_at,
         ARRAY(SELECT pm.music_id FROM playlist_musics pm
               WHERE pm.playlist_id = p.id ORDER BY pm.added_at, pm.music_id) AS musics";

#[derive(FromRow)]
struct UserRow {
    id: String,
    name: String,
    email: String,
    nickname: String,
    password: String,
    role: String,
}

impl TryFrom<UserRow> for User {
    type Error = DatabaseError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role: UserRole = row
            .role
            .parse()
            .map_err(|_| DatabaseError::Query(format!("user {} has invalid role {}", row.id, row.role)))?;

        Ok(User {
            id: row.id,
            name: row.name,
            email: row.email,
            nickname: row.nickname,
            password: row.password,
            role,
        })
    }
}

#[derive(FromRow)]
struct MusicRow {
    id: String,
    title: String,
    author: String,
    file: String,
    genres: Vec<String>,
    album: Option<String>,
    added_by: String,
    created_at: DateTime<Utc>,
}

impl From<MusicRow> for Music {
    fn from(row: MusicRow) -> Self {
        Music {
            id: row.id,
            title: row.title,
            author: row.author,
            file: row.file,
            genres: row.genres,
            album: row.album,
            added_by: row.added_by,
            created_at: row.created_at,
        }
    }
}

#[derive(FromRow)]
struct GenreRow {
    id: String,
    name: String,
}

#[derive(FromRow)]
struct PlaylistRow {
    id: String,
    title: String,
    subtitle: Option<String>,
    image: Option<String>,
    user_id: String,
    created_at: DateTime<Utc>,
    musics: Vec<String>,
}

impl From<PlaylistRow> for Playlist {
    fn from(row: PlaylistRow) -> Self {
        Playlist {
            id: row.id,
            title: row.title,
            subtitle: row.subtitle,
            image: row.image,
            user_id: row.user_id,
            musics: row.musics,
            created_at: row.created_at,
        }
    }
}

/// Postgres-backed store over a shared pool
pub struct PgDatabase {
    pool: PgPool,
}

impl PgDatabase {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDatabase for PgDatabase {
    async fn create_user(&self, user: &User) -> Result<(), DatabaseError> {
        sqlx::query(
            "INSERT INTO users (id, name, email, nickname, password, role)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(&user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.nickname)
        .bind(&user.password)
        .bind(user.role.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| DatabaseError::from_sqlx(e, "Email already registered"))?;
        Ok(())
    }

    async fn get_user_by_id(&self, id: &str) -> Result<Option<User>, DatabaseError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, name, email, nickname, password, role FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, name, email, nickname, password, role FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }
}

#[async_trait]
impl MusicDatabase for PgDatabase {
    async fn create_music(&self, music: &Music) -> Result<(), DatabaseError> {
        sqlx::query(
            "INSERT INTO musics (id, title, author, file, genres, album, added_by, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(&music.id)
        .bind(&music.title)
        .bind(&music.author)
        .bind(&music.file)
        .bind(&music.genres)
        .bind(&music.album)
        .bind(&music.added_by)
        .bind(music.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_music_by_id(&self, id: &str) -> Result<Option<Music>, DatabaseError> {
        let row = sqlx::query_as::<_, MusicRow>(
            "SELECT id, title, author, file, genres, album, added_by, created_at
             FROM musics WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Music::from))
    }

    async fn get_all_musics(&self) -> Result<Vec<Music>, DatabaseError> {
        let rows = sqlx::query_as::<_, MusicRow>(
            "SELECT id, title, author, file, genres, album, added_by, created_at
             FROM musics ORDER BY created_at, id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Music::from).collect())
    }

    async fn delete_music(&self, id: &str) -> Result<bool, DatabaseError> {
        // playlist_musics rows go with it via ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM musics WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl GenreDatabase for PgDatabase {
    async fn get_all_genres(&self) -> Result<Vec<Genre>, DatabaseError> {
        let rows = sqlx::query_as::<_, GenreRow>("SELECT id, name FROM genres ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| Genre {
                id: row.id,
                name: row.name,
            })
            .collect())
    }
}

#[async_trait]
impl PlaylistDatabase for PgDatabase {
    async fn create_playlist(&self, playlist: &Playlist) -> Result<(), DatabaseError> {
        sqlx::query(
            "INSERT INTO playlists (id, title, subtitle, image, user_id, created_at)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(&playlist.id)
        .bind(&playlist.title)
        .bind(&playlist.subtitle)
        .bind(&playlist.image)
        .bind(&playlist.user_id)
        .bind(playlist.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_playlist_by_id(&self, id: &str) -> Result<Option<Playlist>, DatabaseError> {
        let sql = format!("SELECT {} FROM playlists p WHERE p.id = $1", PLAYLIST_COLUMNS);
        let row = sqlx::query_as::<_, PlaylistRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Playlist::from))
    }

    async fn get_playlists_by_user(&self, user_id: &str) -> Result<Vec<Playlist>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM playlists p WHERE p.user_id = $1 ORDER BY p.created_at, p.id",
            PLAYLIST_COLUMNS
        );
        let rows = sqlx::query_as::<_, PlaylistRow>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Playlist::from).collect())
    }

    async fn add_music_to_playlist(
        &self,
        playlist_id: &str,
        music_id: &str,
    ) -> Result<(), DatabaseError> {
        sqlx::query("INSERT INTO playlist_musics (playlist_id, music_id) VALUES ($1, $2)")
            .bind(playlist_id)
            .bind(music_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.is_foreign_key_violation() {
                        return DatabaseError::NotFound("Playlist or music not found".to_string());
                    }
                }
                DatabaseError::from_sqlx(e, "Music is already in this playlist")
            })?;
        Ok(())
    }

    async fn delete_playlist(&self, id: &str) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM playlists WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl Database for PgDatabase {
    async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
