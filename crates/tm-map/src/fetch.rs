//! Background loading for remote vector sources
//!
//! Reconciliation only configures a source and returns; actually fetching
//! features happens here, off the render path, triggered by the widget
//! when a remote layer is attached or the viewport changes. There is no
//! cancellation: a disabled layer's in-flight fetch simply lands in its
//! feature store and stays undrawn until the layer is re-enabled.

use std::sync::Arc;

use async_trait::async_trait;
use geojson::{Feature, GeoJson};
use thiserror::Error;

use crate::layer::LayerHandle;

/// Failures while loading a remote feature document.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("feature decode failed: {0}")]
    Decode(String),
}

/// Transport seam for remote feature documents.
#[async_trait]
pub trait FeatureClient: Send + Sync {
    /// Fetch the raw body at `url`.
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// HTTP transport used by the application.
#[derive(Debug, Default)]
pub struct HttpFeatureClient {
    client: reqwest::Client,
}

impl HttpFeatureClient {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FeatureClient for HttpFeatureClient {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let body = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(body)
    }
}

/// Decode a fetched body into features.
///
/// A FeatureCollection contributes all its features, a bare Feature
/// contributes itself, and a bare Geometry becomes one feature with no
/// properties.
pub fn decode_features(body: &str) -> Result<Vec<Feature>, FetchError> {
    match body.parse::<GeoJson>() {
        Ok(GeoJson::FeatureCollection(collection)) => Ok(collection.features),
        Ok(GeoJson::Feature(feature)) => Ok(vec![feature]),
        Ok(GeoJson::Geometry(geometry)) => Ok(vec![Feature {
            bbox: None,
            geometry: Some(geometry),
            id: None,
            properties: None,
            foreign_members: None,
        }]),
        Err(e) => Err(FetchError::Decode(e.to_string())),
    }
}

/// Fetch `url` and replace `layer`'s feature set with the result.
///
/// Returns the number of features loaded. Non-vector layers load nothing.
pub async fn load_into(
    client: &dyn FeatureClient,
    layer: &LayerHandle,
    url: &str,
) -> Result<usize, FetchError> {
    let Some(vector) = layer.as_vector() else {
        return Ok(0);
    };
    let body = client.fetch(url).await?;
    let features = decode_features(&body)?;
    let count = features.len();
    vector.source.replace_features(features);
    Ok(count)
}

/// Spawns feature loads onto the host's runtime.
#[derive(Clone)]
pub struct FeatureLoader {
    runtime: tokio::runtime::Handle,
    client: Arc<dyn FeatureClient>,
}

impl FeatureLoader {
    pub fn new(runtime: tokio::runtime::Handle, client: Arc<dyn FeatureClient>) -> Self {
        Self { runtime, client }
    }

    /// Start a background load of `url` into `layer`. Failures are logged
    /// and leave the currently loaded features in place.
    pub fn spawn_load(&self, layer: LayerHandle, url: String) {
        let client = self.client.clone();
        self.runtime.spawn(async move {
            match load_into(client.as_ref(), &layer, &url).await {
                Ok(count) => {
                    tracing::debug!(layer = %layer.name(), count, "features loaded");
                }
                Err(e) => {
                    tracing::warn!(layer = %layer.name(), "feature fetch failed: {}", e);
                }
            }
        });
    }
}
