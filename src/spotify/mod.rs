mod api_types;
mod client;
mod playlist;

pub use client::Client;

/// Extracts the playlist ID from a link such as
/// `https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M?si=...`
pub fn parse_playlist_id(url: &str) -> Option<String> {
    let url = url::Url::parse(url.trim()).ok()?;
    let mut segments = url.path_segments()?;
    segments.find(|segment| *segment == "playlist")?;
    let id = segments.next()?;
    validate_playlist_id(id).then(|| id.to_owned())
}

/// Spotify IDs are base62
pub fn validate_playlist_id(id: &str) -> bool {
    !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric())
}
