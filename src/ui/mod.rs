/// User interface widgets
///
/// - `map_canvas.rs` - map canvas (base map tiles, markers, pan/zoom/click)
/// - `filter.rs` - year range sliders and fill track
/// - `panel.rs` - side panel (welcome, about, location list)
/// - `modal.rs` - full-size photo overlay

pub mod filter;
pub mod map_canvas;
pub mod modal;
pub mod panel;
