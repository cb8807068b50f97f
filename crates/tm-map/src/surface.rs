//! The map widget seam
//!
//! The reconciler treats the widget as an opaque sink with three
//! capabilities. Everything else about the map (pan, zoom, tiles,
//! drawing) is the widget's own business.

use crate::layer::{LayerHandle, LayerId};

/// Operations a map widget exposes to the reconciler and the layer
/// control panel.
pub trait MapSurface {
    /// Attach a layer to the map.
    fn add_layer(&mut self, layer: &LayerHandle);

    /// Detach a layer from the map. The layer object stays alive and may
    /// be re-attached later.
    fn remove_layer(&mut self, layer: &LayerHandle);

    /// Show or hide an attached layer without detaching it. Driven by the
    /// user's layer-toggle checkboxes, not by reconciliation.
    fn set_visible(&mut self, layer: LayerId, visible: bool);
}
