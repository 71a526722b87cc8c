use anyhow::{Context, Result};

use crate::catalog::{SourcePlaylist, SourceTrack};
use crate::spotify::api_types;

impl TryFrom<api_types::Playlist> for SourcePlaylist {
    type Error = anyhow::Error;

    fn try_from(value: api_types::Playlist) -> Result<Self, Self::Error> {
        let tracks = value
            .tracks
            .items
            .into_iter()
            .filter_map(|item| item.track)
            .map(SourceTrack::try_from)
            .collect::<Result<Vec<_>>>()?;

        Ok(SourcePlaylist {
            title: value.name,
            description: value.description.filter(|d| !d.is_empty()),
            cover_image: value
                .images
                .and_then(|images| images.into_iter().next())
                .map(|image| image.url),
            tracks,
            total_count: value.tracks.total,
        })
    }
}

impl TryFrom<api_types::Track> for SourceTrack {
    type Error = anyhow::Error;

    fn try_from(value: api_types::Track) -> Result<Self, Self::Error> {
        let artist = value
            .artists
            .into_iter()
            .next()
            .with_context(|| format!("track {:?} has no artists", value.name))?;

        Ok(SourceTrack {
            name: value.name,
            artist: artist.name,
            album: value.album.name,
            image: value.album.images.into_iter().next().map(|image| image.url),
            external_uri: value.uri,
        })
    }
}
