use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::catalog::{REQUEST_TIMEOUT, SourceCatalog, SourcePlaylist};
use crate::error::TransferError;
use crate::spotify::api_types;

const TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const API_URL: &str = "https://api.spotify.com/v1";

/// Reads public playlists with an app-only (client credentials) token.
pub struct Client {
    client: reqwest::Client,
    client_id: String,
    client_secret: String,
}

impl Client {
    pub fn new(client_id: String, client_secret: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            client_id,
            client_secret,
        })
    }

    async fn access_token(&self) -> Result<String> {
        let response: api_types::TokenResponse = self
            .client
            .post(TOKEN_URL)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .header(
                reqwest::header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            )
            .body("grant_type=client_credentials")
            .send()
            .await?
            .error_for_status()
            .context("Spotify rejected the client credentials")?
            .json()
            .await?;
        Ok(response.access_token)
    }

    async fn get_json<T: DeserializeOwned>(&self, token: &str, url: &str) -> Result<T> {
        Ok(self
            .client
            .get(url)
            .bearer_auth(token)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }

    /// The playlist with every page of its tracks merged into the first one
    pub async fn get_playlist(&self, playlist_id: &str) -> Result<api_types::Playlist> {
        let token = self.access_token().await?;
        let mut playlist: api_types::Playlist = self
            .get_json(&token, &format!("{API_URL}/playlists/{playlist_id}"))
            .await
            .with_context(|| format!("Failed to fetch playlist {playlist_id}"))?;

        while let Some(next) = playlist.tracks.next.take() {
            let page: api_types::Paging<api_types::PlaylistTrack> = self
                .get_json(&token, &next)
                .await
                .with_context(|| format!("Failed to fetch tracks page {next}"))?;
            playlist.tracks.items.extend(page.items);
            playlist.tracks.next = page.next;
        }

        Ok(playlist)
    }
}

#[async_trait]
impl SourceCatalog for Client {
    async fn fetch_playlist(&self, url: &str) -> Result<SourcePlaylist, TransferError> {
        let playlist_id = super::parse_playlist_id(url)
            .ok_or_else(|| TransferError::InvalidInput(format!("not a playlist URL: {url}")))?;
        tracing::debug!(%playlist_id, "fetching Spotify playlist");
        let playlist = self
            .get_playlist(&playlist_id)
            .await
            .map_err(TransferError::Source)?;
        playlist.try_into().map_err(TransferError::Source)
    }
}
