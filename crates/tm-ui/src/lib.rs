//! User interface for the map layer visualization plugin
//!
//! This crate provides the egui-based render surface: the interactive map
//! panel that implements the widget seam, the layer-toggle checkbox
//! panel, and the column-picker that produces the host's `{field: {index}}`
//! mapping.

pub mod colour;
pub mod column_picker;
pub mod geometry;
pub mod layer_panel;
pub mod map_panel;

// Re-export commonly used types
pub use colour::parse_colour;
pub use column_picker::column_picker;
pub use layer_panel::layer_panel;
pub use map_panel::MapPanel;
