//! Layer construction: one strategy per layer kind
//!
//! Construction is the expensive step that happens once per identity.
//! The raw kind tag is parsed into the closed [`LayerKind`] set first, so
//! the strategy dispatch underneath is exhaustive.

use std::sync::Arc;

use geojson::{Feature, GeoJson};
use serde_json::Value;
use tm_map::{
    ImageLayer, LayerBody, LayerHandle, LayerStyle, NativeLayer, VectorLayer, VectorSource,
    DEFAULT_STYLE,
};

use crate::error::LayerError;
use crate::spec::{LayerKind, LayerSpec};

/// Deployment-wide choice of how remote vector sources load. Fixed per
/// deployment, never inferred per layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VectorFetchStrategy {
    /// Fetch the whole feature set once from a static endpoint.
    #[default]
    All,
    /// Treat the URL as a template and re-fetch per viewport, with
    /// `{bbox}` substituted by the current extent.
    Bbox,
}

/// Construction options fixed for the deployment.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildOptions {
    pub vector_fetch: VectorFetchStrategy,
}

/// Materialize the native layer for `spec`.
pub fn build_layer(spec: &LayerSpec, options: &BuildOptions) -> Result<LayerHandle, LayerError> {
    let kind = LayerKind::parse(&spec.kind).ok_or_else(|| LayerError::UnsupportedKind {
        name: spec.name.clone(),
        kind: spec.kind.clone(),
    })?;

    let body = match kind {
        LayerKind::Raster => build_raster(spec),
        LayerKind::Vector => build_vector(spec, options),
    };
    Ok(Arc::new(NativeLayer::new(spec.name.clone(), body)))
}

/// Tiled-image layer: the url is the service endpoint and the layer name
/// is the remote layer identifier; ratio and server type are fixed.
fn build_raster(spec: &LayerSpec) -> LayerBody {
    LayerBody::Image(ImageLayer::new(spec.url.clone(), spec.name.clone()))
}

fn build_vector(spec: &LayerSpec, options: &BuildOptions) -> LayerBody {
    let source = match parse_inline_features(&spec.url) {
        Some(features) => {
            tracing::debug!(layer = %spec.name, count = features.len(), "inline vector source");
            VectorSource::inline(features)
        }
        // Not inline content, so the value is a remote locator; which
        // remote mode applies is the deployment's choice.
        None => match options.vector_fetch {
            VectorFetchStrategy::All => VectorSource::remote(spec.url.clone()),
            VectorFetchStrategy::Bbox => VectorSource::bbox_template(spec.url.clone()),
        },
    };

    let style = match spec.colour.as_deref().filter(|c| !c.is_empty()) {
        Some(colour) => LayerStyle {
            colour: colour.to_string(),
            label_property: spec.feature_property.clone(),
        },
        None if spec.feature_property.is_none() => DEFAULT_STYLE.clone(),
        None => LayerStyle {
            label_property: spec.feature_property.clone(),
            ..DEFAULT_STYLE.clone()
        },
    };

    LayerBody::Vector(VectorLayer { source, style })
}

/// Interpret `url` as inline feature content.
///
/// A JSON array is a feature per element and a single JSON object is one
/// feature. Anything else, including text that is not JSON at all, means
/// the value is a remote locator rather than inline content; that is the
/// expected signal to switch interpretation modes, not a fault.
fn parse_inline_features(url: &str) -> Option<Vec<Feature>> {
    let value: Value = serde_json::from_str(url).ok()?;
    match value {
        Value::Array(items) => {
            let mut features = Vec::with_capacity(items.len());
            for item in items {
                features.push(feature_from_value(item)?);
            }
            Some(features)
        }
        object @ Value::Object(_) => Some(vec![feature_from_value(object)?]),
        _ => None,
    }
}

fn feature_from_value(value: Value) -> Option<Feature> {
    match GeoJson::from_json_value(value) {
        Ok(GeoJson::Feature(feature)) => Some(feature),
        _ => None,
    }
}
