use chrono::Utc;

use crate::cache::{CacheRecord, CacheStore};
use crate::catalog::{DestinationCatalog, Track};

/// How a track that was not found locally got (or did not get) a destination identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Served from the cache, no search was issued
    Cached(String),
    /// Returned by a search and written to the cache
    Found(String),
    /// The search came back empty
    NotFound,
    /// The search request itself failed
    Failed(String),
}

impl Resolution {
    #[cfg(test)]
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Cached(id) | Self::Found(id) => Some(id),
            Self::NotFound | Self::Failed(_) => None,
        }
    }

    /// Whether resolving cost an external search call
    pub fn searched(&self) -> bool {
        !matches!(self, Self::Cached(_))
    }
}

/// Turns a local-match miss into a cache hit or a search result.
pub struct Resolver<'a> {
    cache: &'a dyn CacheStore,
    destination: &'a dyn DestinationCatalog,
}

impl<'a> Resolver<'a> {
    pub fn new(cache: &'a dyn CacheStore, destination: &'a dyn DestinationCatalog) -> Self {
        Self { cache, destination }
    }

    /// Cached identifier for a signature. Read errors count as a miss.
    pub async fn cached(&self, signature: &str) -> Option<String> {
        match self.cache.lookup(signature).await {
            Ok(id) => id,
            Err(err) => {
                tracing::warn!(signature, "cache lookup failed, treating as miss: {err:#}");
                None
            }
        }
    }

    pub async fn resolve(&self, track: &Track) -> Resolution {
        let signature = track.signature();
        if let Some(id) = self.cached(&signature).await {
            tracing::debug!(track = %track.name, id = %id, "cache hit");
            return Resolution::Cached(id);
        }

        let query = track.search_query();
        let id = match self.destination.search_one(&query).await {
            Ok(Some(id)) => id,
            Ok(None) => {
                tracing::info!(%query, "no search result");
                return Resolution::NotFound;
            }
            Err(err) => {
                tracing::warn!(%query, "search failed: {err:#}");
                return Resolution::Failed(format!("{err:#}"));
            }
        };

        let record = CacheRecord {
            signature,
            resolved_id: id.clone(),
            title: Some(track.name.clone()),
            created_at: Utc::now(),
        };
        if let Err(err) = self.cache.store(record).await {
            tracing::warn!(track = %track.name, "failed to cache resolved id: {err:#}");
        }
        Resolution::Found(id)
    }
}
