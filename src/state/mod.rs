/// State management module
///
/// This module handles all application state, including:
/// - Raw record normalization (data.rs)
/// - The loaded dataset (library.rs)
/// - Location clustering (cluster.rs)
/// - The year range filter (filter.rs)
/// - Marker, side panel and modal controllers (markers.rs, panel.rs, modal.rs)
/// - The single owner tying them together (app.rs)

pub mod app;
pub mod cluster;
pub mod data;
pub mod filter;
pub mod library;
pub mod markers;
pub mod modal;
pub mod panel;

pub use app::AppState;
