use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub image: Option<String>,
    pub user_id: String,
    /// Music ids in the order they were added
    pub musics: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PlaylistInput {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PlaylistMusicInput {
    pub music_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PlaylistOutput {
    pub playlist: Playlist,
}
