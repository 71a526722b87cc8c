mod api_types;
mod client;

pub use client::Client;

use crate::catalog::{DestinationItem, DestinationPlaylist, ItemsPage};

impl From<api_types::Playlist> for DestinationPlaylist {
    fn from(value: api_types::Playlist) -> Self {
        DestinationPlaylist {
            id: value.id,
            title: value.snippet.title,
        }
    }
}

impl From<api_types::PlaylistItemListResponse> for ItemsPage {
    fn from(value: api_types::PlaylistItemListResponse) -> Self {
        ItemsPage {
            items: value
                .items
                .into_iter()
                .filter_map(|item| {
                    let external_id = item.snippet.resource_id.video_id?;
                    Some(DestinationItem {
                        external_id,
                        title: item.snippet.title,
                    })
                })
                .collect(),
            next_page_token: value.next_page_token,
        }
    }
}

impl api_types::SearchListResponse {
    fn first_video_id(self) -> Option<String> {
        self.items
            .into_iter()
            .find_map(|result| result.id.video_id)
    }
}
