/// Photo download, decoding and caching
///
/// Photos are fetched once per URL and kept as decoded RGBA handles for the
/// rest of the session. URLs without a server-side thumbnail are scaled
/// down locally.
use iced::widget::image::Handle;
use image::{imageops::FilterType, RgbaImage};
use log::warn;
use std::collections::HashMap;
use tokio::task;

use super::dataset::{read_bytes, DataSource};
use crate::error::LoadError;

/// Width of list thumbnails
pub const THUMBNAIL_WIDTH: u32 = 400;

/// Download and decode a photo, shrinking it to `max_width` if given
pub async fn fetch_image(url: String, max_width: Option<u32>) -> Result<Handle, LoadError> {
    let bytes = read_bytes(&DataSource::parse(&url)).await?;

    // Spawn blocking because decoding is CPU-bound
    let rgba = task::spawn_blocking(move || decode(&bytes, max_width)).await??;
    let (width, height) = rgba.dimensions();
    Ok(Handle::from_rgba(width, height, rgba.into_raw()))
}

/// Decode any supported format to RGBA
fn decode(bytes: &[u8], max_width: Option<u32>) -> Result<RgbaImage, LoadError> {
    let img = image::load_from_memory(bytes).map_err(|e| LoadError::Decode(e.to_string()))?;

    let img = match max_width {
        Some(max) if img.width() > max => {
            let height = (img.height() as f64 * max as f64 / img.width() as f64).round().max(1.0);
            img.resize_exact(max, height as u32, FilterType::Lanczos3)
        }
        _ => img,
    };

    Ok(img.to_rgba8())
}

#[derive(Debug, Clone)]
pub enum ImageSlot {
    Pending,
    Ready(Handle),
    Failed,
}

/// Decoded photos keyed by URL
#[derive(Debug, Default)]
pub struct ImageCache {
    slots: HashMap<String, ImageSlot>,
}

impl ImageCache {
    /// Reserve a slot for `url`. Returns true when the caller should fetch it.
    pub fn request(&mut self, url: &str) -> bool {
        if url.is_empty() || self.slots.contains_key(url) {
            return false;
        }
        self.slots.insert(url.to_string(), ImageSlot::Pending);
        true
    }

    /// Record the outcome of a fetch
    pub fn finish(&mut self, url: String, result: Result<Handle, LoadError>) {
        let slot = match result {
            Ok(handle) => ImageSlot::Ready(handle),
            Err(err) => {
                warn!("⚠️  Could not load {}: {}", url, err);
                ImageSlot::Failed
            }
        };
        self.slots.insert(url, slot);
    }

    pub fn get(&self, url: &str) -> Option<&ImageSlot> {
        self.slots.get(url)
    }
}
