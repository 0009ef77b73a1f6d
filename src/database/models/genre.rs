use serde::{Deserialize, Serialize};

/// Genres seeded into every store. Keep in sync with `migrations/0001_init.sql`.
pub const DEFAULT_GENRES: &[&str] = &[
    "Axé",
    "Blues",
    "Country",
    "Electronic",
    "Forró",
    "Funk",
    "Gospel",
    "Hip Hop",
    "Jazz",
    "MPB",
    "Pop",
    "Reggae",
    "Rock",
    "Samba",
    "Sertanejo",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    pub id: String,
    pub name: String,
}
