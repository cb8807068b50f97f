//! Native layer objects
//!
//! A native layer is constructed exactly once per layer identity and then
//! kept for the whole session; disabling a layer detaches it from the map
//! but never tears the object down. Construction is where the expensive
//! work happens (parsing inline features, configuring sources), attach and
//! detach are cheap.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use geojson::Feature;
use parking_lot::{RwLock, RwLockReadGuard};

use crate::style::LayerStyle;

/// Unique identifier for a constructed native layer.
pub type LayerId = uuid::Uuid;

/// Shared handle to a constructed layer.
///
/// The registry and the map surface hold the same allocation, which is
/// what makes identity stability observable: a layer disabled and later
/// re-enabled comes back as the same object.
pub type LayerHandle = Arc<NativeLayer>;

/// A constructed, reusable map layer.
#[derive(Debug)]
pub struct NativeLayer {
    id: LayerId,
    name: String,
    body: LayerBody,
}

impl NativeLayer {
    pub fn new(name: String, body: LayerBody) -> Self {
        Self {
            id: LayerId::new_v4(),
            name,
            body,
        }
    }

    pub fn id(&self) -> LayerId {
        self.id
    }

    /// Display name, also the remote layer identifier for image layers.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn body(&self) -> &LayerBody {
        &self.body
    }

    /// The vector payload, when this is a vector layer.
    pub fn as_vector(&self) -> Option<&VectorLayer> {
        match &self.body {
            LayerBody::Vector(vector) => Some(vector),
            LayerBody::Image(_) => None,
        }
    }
}

/// The two shapes of native layer this widget model knows.
#[derive(Debug)]
pub enum LayerBody {
    /// Tiled-image layer backed by a remote map-image service.
    Image(ImageLayer),
    /// Vector layer backed by an inline or remote feature source.
    Vector(VectorLayer),
}

/// Rendering ratio requested from the image service.
pub const IMAGE_RATIO: f64 = 1.0;

/// Server-type convention the image service speaks. Not user-overridable.
pub const IMAGE_SERVER_TYPE: &str = "geoserver";

/// Tiled-image layer bound to a remote map-image source.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageLayer {
    /// Service endpoint.
    pub endpoint: String,
    /// Remote layer identifier requested from the service.
    pub remote_layer: String,
    /// Rendering ratio, fixed for this deployment.
    pub ratio: f64,
    /// Server-type convention, fixed for this deployment.
    pub server_type: &'static str,
}

impl ImageLayer {
    pub fn new(endpoint: String, remote_layer: String) -> Self {
        Self {
            endpoint,
            remote_layer,
            ratio: IMAGE_RATIO,
            server_type: IMAGE_SERVER_TYPE,
        }
    }
}

/// Vector layer: a feature source plus fixed styling.
#[derive(Debug)]
pub struct VectorLayer {
    pub source: VectorSource,
    pub style: LayerStyle,
}

/// Where a vector source's features come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceKind {
    /// Features parsed from inline content at construction; never fetched.
    Inline,
    /// Static endpoint fetched once in full, regardless of viewport.
    Remote { url: String },
    /// URL template re-fetched per viewport with `{bbox}` substituted.
    BboxTemplate { template: String },
}

/// Feature source with interior mutability so background fetches can fill
/// it in while the widget keeps drawing whatever is currently loaded.
#[derive(Debug)]
pub struct VectorSource {
    kind: SourceKind,
    features: RwLock<Vec<Feature>>,
    loaded: AtomicBool,
}

impl VectorSource {
    /// In-memory source over features parsed from inline content.
    pub fn inline(features: Vec<Feature>) -> Self {
        Self {
            kind: SourceKind::Inline,
            features: RwLock::new(features),
            loaded: AtomicBool::new(true),
        }
    }

    /// Fetch-once source over a static remote endpoint.
    pub fn remote(url: String) -> Self {
        Self {
            kind: SourceKind::Remote { url },
            features: RwLock::new(Vec::new()),
            loaded: AtomicBool::new(false),
        }
    }

    /// Viewport-driven source over a `{bbox}` URL template.
    pub fn bbox_template(template: String) -> Self {
        Self {
            kind: SourceKind::BboxTemplate { template },
            features: RwLock::new(Vec::new()),
            loaded: AtomicBool::new(false),
        }
    }

    pub fn kind(&self) -> &SourceKind {
        &self.kind
    }

    /// Currently loaded features.
    pub fn features(&self) -> RwLockReadGuard<'_, Vec<Feature>> {
        self.features.read()
    }

    /// Replace the loaded feature set wholesale.
    pub fn replace_features(&self, features: Vec<Feature>) {
        *self.features.write() = features;
        self.loaded.store(true, Ordering::Release);
    }

    /// Whether at least one load has completed (inline sources count as
    /// loaded from construction).
    pub fn is_loaded(&self) -> bool {
        self.loaded.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_feature() -> Feature {
        Feature {
            bbox: None,
            geometry: Some(geojson::Geometry::new(geojson::Value::LineString(vec![
                vec![0.0, 0.0],
                vec![1.0, 1.0],
            ]))),
            id: None,
            properties: None,
            foreign_members: None,
        }
    }

    #[test]
    fn test_inline_source_is_loaded_from_construction() {
        let source = VectorSource::inline(vec![line_feature()]);
        assert!(source.is_loaded());
        assert_eq!(source.features().len(), 1);
        assert_eq!(source.kind(), &SourceKind::Inline);
    }

    #[test]
    fn test_remote_source_loads_on_replace() {
        let source = VectorSource::remote("https://example.com/data.json".into());
        assert!(!source.is_loaded());
        assert!(source.features().is_empty());

        source.replace_features(vec![line_feature()]);
        assert!(source.is_loaded());
        assert_eq!(source.features().len(), 1);
    }

    #[test]
    fn test_image_layer_fixed_conventions() {
        let image = ImageLayer::new("https://maps.example/wms".into(), "roads".into());
        assert_eq!(image.ratio, 1.0);
        assert_eq!(image.server_type, "geoserver");
    }
}
