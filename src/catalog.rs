use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;

use crate::error::TransferError;
use crate::normalize;

/// Limit on a single catalog HTTP request, connect to last byte
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// A source track reduced to what the matching engine needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub name: String,
    pub artist: String,
}

impl Track {
    pub fn new(name: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            artist: artist.into(),
        }
    }

    pub fn signature(&self) -> String {
        normalize::signature(&self.name, &self.artist)
    }

    /// Raw search query, deliberately not normalized
    pub fn search_query(&self) -> String {
        format!("{} {}", self.name, self.artist)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceTrack {
    pub name: String,
    /// First credited artist
    pub artist: String,
    pub album: String,
    pub image: Option<String>,
    /// e.g. `spotify:track:...`
    pub external_uri: String,
}

impl SourceTrack {
    pub fn to_track(&self) -> Track {
        Track::new(&self.name, &self.artist)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourcePlaylist {
    pub title: String,
    pub description: Option<String>,
    pub cover_image: Option<String>,
    pub tracks: Vec<SourceTrack>,
    /// Track count reported by the catalog, which may include unavailable entries
    pub total_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationItem {
    pub external_id: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationPlaylist {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemsPage {
    pub items: Vec<DestinationItem>,
    pub next_page_token: Option<String>,
}

/// Supplies the destination catalog's bearer token.
#[cfg_attr(test, mockall::automock)]
pub trait CredentialProvider: Send + Sync {
    fn current_bearer_token(&self) -> Result<String, TransferError>;
}

/// A bearer token handed in by the user, e.g. from `--access-token` or the environment.
#[derive(Debug, Clone)]
pub struct StaticToken(Option<String>);

impl StaticToken {
    pub fn new(token: Option<String>) -> Self {
        Self(token)
    }
}

impl CredentialProvider for StaticToken {
    fn current_bearer_token(&self) -> Result<String, TransferError> {
        match self.0.as_deref().map(str::trim) {
            Some(token) if !token.is_empty() => Ok(token.to_owned()),
            _ => Err(TransferError::Unauthenticated),
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SourceCatalog: Send + Sync {
    /// Fails with [`TransferError::InvalidInput`] without any request when the URL does not
    /// point at a playlist.
    async fn fetch_playlist(&self, url: &str) -> Result<SourcePlaylist, TransferError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DestinationCatalog: Send + Sync {
    async fn find_playlist_by_title(&self, title: &str) -> Result<Option<DestinationPlaylist>>;

    async fn create_playlist(&self, title: &str, description: &str) -> Result<DestinationPlaylist>;

    /// One page of a playlist's items, `page_token` being the previous page's continuation token
    async fn list_items(&self, playlist_id: &str, page_token: Option<String>) -> Result<ItemsPage>;

    /// Identifier of the top search result, if any
    async fn search_one(&self, query: &str) -> Result<Option<String>>;

    async fn add_item(&self, playlist_id: &str, item_id: &str) -> Result<()>;
}
