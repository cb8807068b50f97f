//! Layer reconciliation engine
//!
//! The heart of the plugin: projecting tabular rows into desired layer
//! specs, diffing those against the layers already materialized on the
//! map, and performing minimal attach/detach work while keeping every
//! constructed layer alive for the rest of the session.

pub mod build;
pub mod error;
pub mod plugin;
pub mod project;
pub mod reconcile;
pub mod registry;
pub mod spec;

// Re-export commonly used types
pub use build::{build_layer, BuildOptions, VectorFetchStrategy};
pub use error::LayerError;
pub use plugin::MapLayerPlugin;
pub use project::{project, LayerColumns};
pub use reconcile::{reconcile, ReconcileReport};
pub use registry::{LayerRegistry, LayerState};
pub use spec::{LayerIdentity, LayerKind, LayerSpec};
