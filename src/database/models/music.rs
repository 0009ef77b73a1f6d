use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Music {
    pub id: String,
    pub title: String,
    pub author: String,
    pub file: String,
    pub genres: Vec<String>,
    pub album: Option<String>,
    /// Id of the user who added the track
    pub added_by: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MusicInput {
    pub title: Option<String>,
    pub author: Option<String>,
    pub file: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    pub album: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MusicOutput {
    pub music: Music,
}
