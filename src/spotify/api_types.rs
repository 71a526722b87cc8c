use serde::Deserialize;

#[derive(Deserialize)]
pub struct TokenResponse {
    pub(in crate::spotify) access_token: String,
}

#[derive(Deserialize)]
pub struct Playlist {
    pub(in crate::spotify) name: String,
    #[serde(default)]
    pub(in crate::spotify) description: Option<String>,
    /// `null` for playlists without artwork
    #[serde(default)]
    pub(in crate::spotify) images: Option<Vec<Image>>,
    pub(in crate::spotify) tracks: Paging<PlaylistTrack>,
}

#[derive(Deserialize)]
pub struct Paging<T> {
    pub(in crate::spotify) items: Vec<T>,
    /// Absolute URL of the next page
    pub(in crate::spotify) next: Option<String>,
    pub(in crate::spotify) total: u32,
}

#[derive(Deserialize)]
pub struct PlaylistTrack {
    /// `null` when the track is no longer available
    pub(in crate::spotify) track: Option<Track>,
}

#[derive(Deserialize)]
pub struct Track {
    pub(in crate::spotify) name: String,
    pub(in crate::spotify) artists: Vec<Artist>,
    pub(in crate::spotify) album: Album,
    pub(in crate::spotify) uri: String,
}

#[derive(Deserialize)]
pub struct Artist {
    pub(in crate::spotify) name: String,
}

#[derive(Deserialize)]
pub struct Album {
    pub(in crate::spotify) name: String,
    #[serde(default)]
    pub(in crate::spotify) images: Vec<Image>,
}

#[derive(Deserialize)]
pub struct Image {
    pub(in crate::spotify) url: String,
}
