//! Map widget model for the layer visualization plugin
//!
//! This crate defines the native layer objects the reconciler constructs,
//! the [`MapSurface`] seam the reconciler drives, viewport extents with
//! `{bbox}` template substitution, and background loading for remote
//! vector sources. It never draws anything itself; rendering belongs to
//! the widget implementation.

pub mod fetch;
pub mod layer;
pub mod style;
pub mod surface;
pub mod viewport;

// Re-export commonly used types
pub use fetch::{decode_features, FeatureClient, FeatureLoader, FetchError, HttpFeatureClient};
pub use layer::{
    ImageLayer, LayerBody, LayerHandle, LayerId, NativeLayer, SourceKind, VectorLayer, VectorSource,
};
pub use style::{LayerStyle, DEFAULT_COLOUR, DEFAULT_STYLE};
pub use surface::MapSurface;
pub use viewport::{substitute_bbox, Extent};
