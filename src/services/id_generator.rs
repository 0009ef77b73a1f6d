use uuid::Uuid;

/// Produces identifiers for new users, tracks, playlists and genres
#[derive(Debug, Clone, Copy, Default)]
pub struct IdGenerator;

impl IdGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Random v4 UUID, hyphenated lowercase
    pub fn generate(&self) -> String {
        Uuid::new_v4().to_string()
    }
}
