/// Base map tiles
///
/// Tiles are downloaded once and kept in an LRU cache, so panning back
/// over an area is free. A failed tile stays failed until it is evicted.
use iced::widget::image::Handle;
use log::warn;
use lru::LruCache;
use std::fmt;
use std::num::NonZeroUsize;
use std::time::Duration;

use crate::error::LoadError;
use crate::map::tiles::TileCoords;

/// Default tile server
pub const OSM_TILE_URL: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";

/// Credit required by the OpenStreetMap tile policy
pub const ATTRIBUTION: &str = "© OpenStreetMap contributors";

const CAPACITY: usize = 512;
const TIMEOUT: Duration = Duration::from_secs(10);
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub enum TileSlot {
    Pending,
    Ready(Handle),
    Failed,
}

pub struct TileCache {
    slots: LruCache<TileCoords, TileSlot>,
    client: reqwest::Client,
    template: String,
}

impl TileCache {
    /// Cache for tiles served from `template` (`{z}/{x}/{y}` placeholders)
    pub fn new(template: impl Into<String>) -> Self {
        // Tile servers reject anonymous clients
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(TIMEOUT)
            .build()
            .unwrap_or_else(|err| {
                warn!("⚠️  Tile client setup failed ({}), using defaults", err);
                reqwest::Client::new()
            });

        Self {
            slots: LruCache::new(NonZeroUsize::new(CAPACITY).unwrap_or(NonZeroUsize::MIN)),
            client,
            template: template.into(),
        }
    }

    /// Reserve a slot for `coords`. Returns the URL to fetch when the tile
    /// is new; known tiles are only marked as recently used.
    pub fn request(&mut self, coords: TileCoords) -> Option<String> {
        if self.slots.get(&coords).is_some() {
            return None;
        }
        self.slots.put(coords, TileSlot::Pending);
        Some(coords.url(&self.template))
    }

    /// Record the outcome of a fetch
    pub fn finish(&mut self, coords: TileCoords, result: Result<Handle, LoadError>) {
        let slot = match result {
            Ok(handle) => TileSlot::Ready(handle),
            Err(err) => {
                warn!("⚠️  Tile {}/{}/{} unavailable: {}", coords.z, coords.x, coords.y, err);
                TileSlot::Failed
            }
        };
        self.slots.put(coords, slot);
    }

    /// Slot for drawing; leaves recency untouched
    pub fn get(&self, coords: TileCoords) -> Option<&TileSlot> {
        self.slots.peek(&coords)
    }

    pub fn client(&self) -> reqwest::Client {
        self.client.clone()
    }
}

// Implement Debug without listing every tile
impl fmt::Debug for TileCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TileCache")
            .field("tiles", &self.slots.len())
            .field("template", &self.template)
            .finish()
    }
}

/// Download one tile. The PNG is decoded by the renderer when first drawn.
pub async fn fetch_tile(client: reqwest::Client, url: String) -> Result<Handle, LoadError> {
    let response = client.get(&url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(LoadError::Http(status.as_u16()));
    }
    Ok(Handle::from_bytes(response.bytes().await?.to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TILE: TileCoords = TileCoords { x: 987, y: 1583, z: 12 };

    #[test]
    fn test_requests_each_tile_once() {
        let mut cache = TileCache::new(OSM_TILE_URL);
        assert_eq!(
            cache.request(TILE).as_deref(),
            Some("https://tile.openstreetmap.org/12/987/1583.png")
        );
        assert_eq!(cache.request(TILE), None);
        assert!(matches!(cache.get(TILE), Some(TileSlot::Pending)));
    }

    #[test]
    fn test_failed_tiles_are_not_retried() {
        let mut cache = TileCache::new("http://tiles.local/{z}/{x}/{y}.png");
        cache.request(TILE);
        cache.finish(TILE, Err(LoadError::Http(503)));

        assert!(matches!(cache.get(TILE), Some(TileSlot::Failed)));
        assert_eq!(cache.request(TILE), None);
    }

    #[test]
    fn test_finished_tile_is_ready() {
        let mut cache = TileCache::new(OSM_TILE_URL);
        cache.request(TILE);
        cache.finish(TILE, Ok(Handle::from_bytes(vec![0u8; 4])));
        assert!(matches!(cache.get(TILE), Some(TileSlot::Ready(_))));
        assert!(cache.get(TileCoords { x: 0, y: 0, z: 0 }).is_none());
    }
}
