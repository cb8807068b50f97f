//! Core foundations for the map layer visualization plugin
//!
//! This crate provides the mapping-agnostic building blocks: the tabular
//! snapshot handed over by the host on each render call, column-index
//! configuration and resolution, and the persisted map view state.

pub mod columns;
pub mod error;
pub mod table;
pub mod view_state;

// Re-export commonly used types
pub use columns::{resolve_column, ColumnBinding, ColumnConfig, ColumnIndex, Requirement};
pub use error::ConfigError;
pub use table::TableData;
pub use view_state::{MapViewState, MemoryStore, ViewStateStore, VIEW_STATE_KEY};
