use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistListResponse {
    #[serde(default)]
    pub(in crate::youtube) items: Vec<Playlist>,
    pub(in crate::youtube) next_page_token: Option<String>,
}

#[derive(Deserialize)]
pub struct Playlist {
    pub(in crate::youtube) id: String,
    pub(in crate::youtube) snippet: PlaylistSnippet,
}

#[derive(Deserialize)]
pub struct PlaylistSnippet {
    pub(in crate::youtube) title: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItemListResponse {
    #[serde(default)]
    pub(in crate::youtube) items: Vec<PlaylistItem>,
    pub(in crate::youtube) next_page_token: Option<String>,
}

#[derive(Deserialize)]
pub struct PlaylistItem {
    pub(in crate::youtube) snippet: PlaylistItemSnippet,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItemSnippet {
    pub(in crate::youtube) title: String,
    pub(in crate::youtube) resource_id: ResourceId,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceId {
    /// Missing for entries that are not videos
    #[serde(default)]
    pub(in crate::youtube) video_id: Option<String>,
}

#[derive(Deserialize)]
pub struct SearchListResponse {
    #[serde(default)]
    pub(in crate::youtube) items: Vec<SearchResult>,
}

#[derive(Deserialize)]
pub struct SearchResult {
    pub(in crate::youtube) id: SearchResultId,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultId {
    #[serde(default)]
    pub(in crate::youtube) video_id: Option<String>,
}

#[derive(Serialize)]
pub struct NewPlaylist<'a> {
    pub(in crate::youtube) snippet: NewPlaylistSnippet<'a>,
    pub(in crate::youtube) status: PlaylistStatus<'a>,
}

#[derive(Serialize)]
pub struct NewPlaylistSnippet<'a> {
    pub(in crate::youtube) title: &'a str,
    pub(in crate::youtube) description: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistStatus<'a> {
    pub(in crate::youtube) privacy_status: &'a str,
}

#[derive(Serialize)]
pub struct NewPlaylistItem<'a> {
    pub(in crate::youtube) snippet: NewPlaylistItemSnippet<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPlaylistItemSnippet<'a> {
    pub(in crate::youtube) playlist_id: &'a str,
    pub(in crate::youtube) resource_id: NewResourceId<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewResourceId<'a> {
    pub(in crate::youtube) kind: &'a str,
    pub(in crate::youtube) video_id: &'a str,
}
