use anyhow::{Result, bail};
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::catalog::{
    CredentialProvider, DestinationCatalog, DestinationPlaylist, ItemsPage, REQUEST_TIMEOUT,
};
use crate::youtube::api_types;

const API_URL: &str = "https://www.googleapis.com/youtube/v3";
const PAGE_SIZE: u32 = 50;

/// YouTube Data API v3 client acting on the signed-in user's playlists.
pub struct Client {
    client: reqwest::Client,
    credentials: Box<dyn CredentialProvider>,
}

impl Client {
    pub fn new(credentials: Box<dyn CredentialProvider>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            credentials,
        })
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response> {
        let token = self.credentials.current_bearer_token()?;
        let response = request.bearer_auth(token).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("YouTube API returned {status}: {body}");
        }
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        Ok(self.send(self.client.get(url)).await?.json().await?)
    }

    async fn post_json<B: Serialize + Sync>(&self, url: &str, body: &B) -> Result<reqwest::Response> {
        self.send(self.client.post(url).json(body)).await
    }
}

fn playlists_url(page_token: Option<&str>) -> String {
    let mut url = format!("{API_URL}/playlists?part=snippet&mine=true&maxResults={PAGE_SIZE}");
    if let Some(token) = page_token {
        url.push_str(&format!("&pageToken={}", urlencoding::encode(token)));
    }
    url
}

fn playlist_items_url(playlist_id: &str, page_token: Option<&str>) -> String {
    let mut url = format!(
        "{API_URL}/playlistItems?part=snippet&playlistId={}&maxResults={PAGE_SIZE}",
        urlencoding::encode(playlist_id),
    );
    if let Some(token) = page_token {
        url.push_str(&format!("&pageToken={}", urlencoding::encode(token)));
    }
    url
}

fn search_url(query: &str) -> String {
    format!(
        "{API_URL}/search?part=id&maxResults=1&type=video&q={}",
        urlencoding::encode(query),
    )
}

#[async_trait]
impl DestinationCatalog for Client {
    async fn find_playlist_by_title(&self, title: &str) -> Result<Option<DestinationPlaylist>> {
        let mut page_token: Option<String> = None;
        loop {
            let response: api_types::PlaylistListResponse = self
                .get_json(&playlists_url(page_token.as_deref()))
                .await?;
            if let Some(playlist) = response
                .items
                .into_iter()
                .find(|playlist| playlist.snippet.title == title)
            {
                return Ok(Some(playlist.into()));
            }
            match response.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => return Ok(None),
            }
        }
    }

    async fn create_playlist(&self, title: &str, description: &str) -> Result<DestinationPlaylist> {
        let body = api_types::NewPlaylist {
            snippet: api_types::NewPlaylistSnippet { title, description },
            status: api_types::PlaylistStatus {
                privacy_status: "private",
            },
        };
        let playlist: api_types::Playlist = self
            .post_json(&format!("{API_URL}/playlists?part=snippet,status"), &body)
            .await?
            .json()
            .await?;
        Ok(playlist.into())
    }

    async fn list_items(&self, playlist_id: &str, page_token: Option<String>) -> Result<ItemsPage> {
        let response: api_types::PlaylistItemListResponse = self
            .get_json(&playlist_items_url(playlist_id, page_token.as_deref()))
            .await?;
        Ok(response.into())
    }

    async fn search_one(&self, query: &str) -> Result<Option<String>> {
        let response: api_types::SearchListResponse = self.get_json(&search_url(query)).await?;
        Ok(response.first_video_id())
    }

    async fn add_item(&self, playlist_id: &str, item_id: &str) -> Result<()> {
        let body = api_types::NewPlaylistItem {
            snippet: api_types::NewPlaylistItemSnippet {
                playlist_id,
                resource_id: api_types::NewResourceId {
                    kind: "youtube#video",
                    video_id: item_id,
                },
            },
        };
        self.post_json(&format!("{API_URL}/playlistItems?part=snippet"), &body)
            .await?;
        Ok(())
    }
}
