pub mod genre;
pub mod music;
pub mod playlist;
pub mod user;

pub use genre::{Genre, DEFAULT_GENRES};
pub use music::{Music, MusicInput, MusicOutput};
pub use playlist::{Playlist, PlaylistInput, PlaylistMusicInput, PlaylistOutput};
pub use user::{string_to_user_role, LoginInput, SignupInput, TokenOutput, User, UserOutput, UserRole};
