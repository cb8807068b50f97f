//! Error types for host-supplied configuration

use thiserror::Error;

/// Errors arising from the host-supplied configuration.
///
/// These indicate an incomplete setup rather than bad data, so they must
/// reach the user as a visible message on the render surface.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required column mapping is absent from the host config.
    #[error("Please set {0} in Settings")]
    MissingColumn(String),
}
