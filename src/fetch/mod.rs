/// Network and disk access
///
/// This module handles:
/// - Fetching and parsing the photo dataset (dataset.rs)
/// - Downloading, decoding and caching photos (photo.rs)
/// - Downloading and caching base map tiles (tiles.rs)
///
/// Both run as iced tasks on the tokio executor; parsing and decoding
/// move to blocking threads.

pub mod dataset;
pub mod photo;
pub mod tiles;

pub use dataset::{load_dataset, DataSource};
pub use photo::{fetch_image, ImageCache};
pub use tiles::{fetch_tile, TileCache};
