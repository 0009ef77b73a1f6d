use chrono::Utc;
use std::sync::Arc;

use crate::auth::Authenticator;
use crate::business::{ensure_owner_or_admin, optional_text, RequiredFields};
use crate::database::models::{Playlist, PlaylistInput, PlaylistMusicInput};
use crate::database::{MusicDatabase, PlaylistDatabase};
use crate::error::ApiError;
use crate::services::IdGenerator;

pub struct PlaylistBusiness {
    id_generator: Arc<IdGenerator>,
    authenticator: Arc<Authenticator>,
    playlist_database: Arc<dyn PlaylistDatabase>,
    music_database: Arc<dyn MusicDatabase>,
}

impl PlaylistBusiness {
    pub fn new(
        id_generator: Arc<IdGenerator>,
        authenticator: Arc<Authenticator>,
        playlist_database: Arc<dyn PlaylistDatabase>,
        music_database: Arc<dyn MusicDatabase>,
    ) -> Self {
        Self {
            id_generator,
            authenticator,
            playlist_database,
            music_database,
        }
    }

    pub async fn create_playlist(
        &self,
        token: &str,
        input: PlaylistInput,
    ) -> Result<Playlist, ApiError> {
        let mut required = RequiredFields::new();
        let title = required.take("title", &input.title).to_string();
        required.finish()?;

        let auth = self.authenticator.get_token_data(token)?;

        let playlist = Playlist {
            id: self.id_generator.generate(),
            title,
            subtitle: optional_text(input.subtitle),
            image: optional_text(input.image),
            user_id: auth.id,
            musics: Vec::new(),
            created_at: Utc::now(),
        };
        self.playlist_database.create_playlist(&playlist).await?;
        tracing::info!("Playlist {} created by {}", playlist.id, playlist.user_id);

        Ok(playlist)
    }

    /// Playlists owned by the caller
    pub async fn get_user_playlists(&self, token: &str) -> Result<Vec<Playlist>, ApiError> {
        let auth = self.authenticator.get_token_data(token)?;
        Ok(self.playlist_database.get_playlists_by_user(&auth.id).await?)
    }

    pub async fn add_music_to_playlist(
        &self,
        token: &str,
        playlist_id: &str,
        input: PlaylistMusicInput,
    ) -> Result<Playlist, ApiError> {
        let mut required = RequiredFields::new();
        let music_id = required.take("music_id", &input.music_id);
        required.finish()?;

        let auth = self.authenticator.get_token_data(token)?;
        let playlist = self.find_playlist(playlist_id).await?;
        ensure_owner_or_admin(&auth, &playlist.user_id, "playlist")?;

        if self.music_database.get_music_by_id(music_id).await?.is_none() {
            return Err(ApiError::not_found("Music not found"));
        }
        self.playlist_database
            .add_music_to_playlist(playlist_id, music_id)
            .await?;

        self.find_playlist(playlist_id).await
    }

    pub async fn delete_playlist(&self, token: &str, playlist_id: &str) -> Result<(), ApiError> {
        let auth = self.authenticator.get_token_data(token)?;
        let playlist = self.find_playlist(playlist_id).await?;
        ensure_owner_or_admin(&auth, &playlist.user_id, "playlist")?;

        if !self.playlist_database.delete_playlist(playlist_id).await? {
            return Err(ApiError::not_found("Playlist not found"));
        }
        tracing::info!("Playlist {} deleted by {} ({})", playlist_id, auth.id, auth.role);
        Ok(())
    }

    async fn find_playlist(&self, playlist_id: &str) -> Result<Playlist, ApiError> {
        self.playlist_database
            .get_playlist_by_id(playlist_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Playlist not found"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::{MusicInput, UserRole};
    use crate::testing::TestContext;

    fn playlist_input(title: &str) -> PlaylistInput {
        PlaylistInput {
            title: Some(title.to_string()),
            subtitle: Some("Weekend".to_string()),
            image: Some("   ".to_string()),
        }
    }

    async fn add_song(ctx: &TestContext, token: &str) -> String {
        ctx.state
            .musics
            .add_music(
                token,
                MusicInput {
                    title: Some("Song".to_string()),
                    author: Some("Artist".to_string()),
                    file: Some("url".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .id
    }

    fn track(music_id: &str) -> PlaylistMusicInput {
        PlaylistMusicInput {
            music_id: Some(music_id.to_string()),
        }
    }

    #[tokio::test]
    async fn created_playlist_belongs_to_caller() {
        let ctx = TestContext::new();
        let (token, user_id) = ctx.signup_as(UserRole::Subscriber).await;

        let playlist = ctx
            .state
            .playlists
            .create_playlist(&token, playlist_input("Mix"))
            .await
            .unwrap();

        assert_eq!(playlist.user_id, user_id);
        assert_eq!(playlist.subtitle.as_deref(), Some("Weekend"));
        assert_eq!(playlist.image, None);
        assert!(playlist.musics.is_empty());
    }

    #[tokio::test]
    async fn create_validates_title_first() {
        let ctx = TestContext::new();
        let err = ctx
            .state
            .playlists
            .create_playlist("", PlaylistInput::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::ValidationError { .. }));
    }

    #[tokio::test]
    async fn user_sees_only_own_playlists() {
        let ctx = TestContext::new();
        let (alice, _) = ctx.signup_as(UserRole::Normal).await;
        let (bob, _) = ctx.signup_as(UserRole::Normal).await;

        ctx.state.playlists.create_playlist(&alice, playlist_input("A1")).await.unwrap();
        ctx.state.playlists.create_playlist(&alice, playlist_input("A2")).await.unwrap();
        ctx.state.playlists.create_playlist(&bob, playlist_input("B1")).await.unwrap();

        let titles: Vec<String> = ctx
            .state
            .playlists
            .get_user_playlists(&alice)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, vec!["A1".to_string(), "A2".to_string()]);

        assert!(matches!(
            ctx.state.playlists.get_user_playlists("").await,
            Err(ApiError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn owner_adds_tracks_in_order() {
        let ctx = TestContext::new();
        let (token, _) = ctx.signup_as(UserRole::Normal).await;
        let first = add_song(&ctx, &token).await;
        let second = add_song(&ctx, &token).await;
        let playlist = ctx
            .state
            .playlists
            .create_playlist(&token, playlist_input("Mix"))
            .await
            .unwrap();

        ctx.state
            .playlists
            .add_music_to_playlist(&token, &playlist.id, track(&first))
            .await
            .unwrap();
        let updated = ctx
            .state
            .playlists
            .add_music_to_playlist(&token, &playlist.id, track(&second))
            .await
            .unwrap();
        assert_eq!(updated.musics, vec![first.clone(), second]);

        let err = ctx
            .state
            .playlists
            .add_music_to_playlist(&token, &playlist.id, track(&first))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Conflict(_)));
    }

    #[tokio::test]
    async fn adding_unknown_music_is_not_found() {
        let ctx = TestContext::new();
        let (token, _) = ctx.signup_as(UserRole::Normal).await;
        let playlist = ctx
            .state
            .playlists
            .create_playlist(&token, playlist_input("Mix"))
            .await
            .unwrap();

        let err = ctx
            .state
            .playlists
            .add_music_to_playlist(&token, &playlist.id, track("missing"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));

        let err = ctx
            .state
            .playlists
            .add_music_to_playlist(&token, "missing", track("missing"))
            .await
            .unwrap_err();
        assert_eq!(err.message(), "Playlist not found");
    }

    #[tokio::test]
    async fn strangers_cannot_modify_playlist() {
        let ctx = TestContext::new();
        let (owner, _) = ctx.signup_as(UserRole::Normal).await;
        let (stranger, _) = ctx.signup_as(UserRole::Subscriber).await;
        let music_id = add_song(&ctx, &owner).await;
        let playlist = ctx
            .state
            .playlists
            .create_playlist(&owner, playlist_input("Mix"))
            .await
            .unwrap();

        assert!(matches!(
            ctx.state
                .playlists
                .add_music_to_playlist(&stranger, &playlist.id, track(&music_id))
                .await,
            Err(ApiError::Forbidden(_))
        ));
        assert!(matches!(
            ctx.state.playlists.delete_playlist(&stranger, &playlist.id).await,
            Err(ApiError::Forbidden(_))
        ));
    }

    #[tokio::test]
    async fn owner_and_admin_can_delete_playlist() {
        let ctx = TestContext::new();
        let (owner, _) = ctx.signup_as(UserRole::Normal).await;
        let (admin, _) = ctx.signup_as(UserRole::Admin).await;

        let mine = ctx
            .state
            .playlists
            .create_playlist(&owner, playlist_input("Mine"))
            .await
            .unwrap();
        let theirs = ctx
            .state
            .playlists
            .create_playlist(&owner, playlist_input("Theirs"))
            .await
            .unwrap();

        ctx.state.playlists.delete_playlist(&owner, &mine.id).await.unwrap();
        ctx.state.playlists.delete_playlist(&admin, &theirs.id).await.unwrap();

        assert!(ctx
            .state
            .playlists
            .get_user_playlists(&owner)
            .await
            .unwrap()
            .is_empty());
        assert!(matches!(
            ctx.state.playlists.delete_playlist(&owner, &mine.id).await,
            Err(ApiError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn deleted_music_leaves_playlists() {
        let ctx = TestContext::new();
        let (token, _) = ctx.signup_as(UserRole::Normal).await;
        let music_id = add_song(&ctx, &token).await;
        let playlist = ctx
            .state
            .playlists
            .create_playlist(&token, playlist_input("Mix"))
            .await
            .unwrap();
        ctx.state
            .playlists
            .add_music_to_playlist(&token, &playlist.id, track(&music_id))
            .await
            .unwrap();

        ctx.state.musics.delete_music(&music_id, &token).await.unwrap();

        let playlists = ctx.state.playlists.get_user_playlists(&token).await.unwrap();
        assert!(playlists[0].musics.is_empty());
    }
}
