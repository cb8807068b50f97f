//! Per-layer failures raised while materializing specs

use thiserror::Error;

/// A failure scoped to one layer spec.
///
/// These never abort a batch: the reconciler collects them, keeps going,
/// and the plugin reports them aggregated on the render surface.
#[derive(Debug, Error)]
pub enum LayerError {
    /// The row's kind tag is outside the supported set.
    #[error("Layer type not recognised: {kind:?} (layer {name:?})")]
    UnsupportedKind { name: String, kind: String },
}
