use std::collections::HashSet;

use crate::catalog::{DestinationItem, Track};
use crate::normalize::normalize;

/// Run-local view of the destination playlist.
///
/// Seeded from the playlist's existing items and extended with every item added during the
/// run, so later tracks see what earlier tracks inserted. It never shrinks.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    entries: Vec<Entry>,
    ids: HashSet<String>,
}

#[derive(Debug, Clone)]
struct Entry {
    item: DestinationItem,
    normalized_title: String,
}

/// Normalized forms of a track, computed once per lookup.
struct TrackKeys {
    name: String,
    artist: String,
    signature: String,
}

impl TrackKeys {
    fn new(track: &Track) -> Self {
        Self {
            name: normalize(&track.name),
            artist: normalize(&track.artist),
            signature: track.signature(),
        }
    }

    /// Loose on purpose: generic or very short titles can match unrelated tracks, and an
    /// item whose title normalizes to nothing is contained in every signature.
    fn matches(&self, title: &str) -> bool {
        title == self.name
            || (title.contains(&self.name) && title.contains(&self.artist))
            || title.contains(&self.signature)
            || self.signature.contains(title)
    }
}

impl Snapshot {
    pub fn new(items: impl IntoIterator<Item = DestinationItem>) -> Self {
        let mut snapshot = Self::default();
        for item in items {
            snapshot.push(item);
        }
        snapshot
    }

    /// First item, in snapshot order, that the track is considered to already be.
    pub fn find_match(&self, track: &Track) -> Option<&DestinationItem> {
        let keys = TrackKeys::new(track);
        self.entries
            .iter()
            .find(|entry| keys.matches(&entry.normalized_title))
            .map(|entry| &entry.item)
    }

    pub fn contains_id(&self, external_id: &str) -> bool {
        self.ids.contains(external_id)
    }

    pub fn push(&mut self, item: DestinationItem) {
        self.ids.insert(item.external_id.clone());
        self.entries.push(Entry {
            normalized_title: normalize(&item.title),
            item,
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
