//! Host-facing plugin entry point
//!
//! The host calls [`MapLayerPlugin::render`] with a fresh table snapshot
//! on every result refresh. There is no return value; the plugin answers
//! through side effects on its registry and the map surface, plus a
//! user-visible message when something needs attention. Re-running the
//! next render is the only retry mechanism.

use tm_core::columns::ColumnConfig;
use tm_core::table::TableData;
use tm_map::MapSurface;

use crate::build::BuildOptions;
use crate::project::{project, LayerColumns};
use crate::reconcile::reconcile;
use crate::registry::LayerRegistry;
use crate::spec::LayerSpec;

/// The notebook visualization plugin core.
pub struct MapLayerPlugin {
    config: ColumnConfig,
    registry: LayerRegistry,
    options: BuildOptions,
    last_error: Option<String>,
}

impl MapLayerPlugin {
    pub fn new(options: BuildOptions) -> Self {
        Self {
            config: ColumnConfig::new(),
            registry: LayerRegistry::new(),
            options,
            last_error: None,
        }
    }

    /// Replace the column configuration. The host's column-selector UI
    /// emits a whole new mapping whenever the user changes a field.
    pub fn set_config(&mut self, config: ColumnConfig) {
        self.config = config;
    }

    pub fn config(&self) -> &ColumnConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut ColumnConfig {
        &mut self.config
    }

    /// Every layer identity materialized this session.
    pub fn registry(&self) -> &LayerRegistry {
        &self.registry
    }

    /// Message to show on the render surface, when the last render hit
    /// configuration or per-layer errors.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Render one table snapshot onto `surface`.
    pub fn render(&mut self, table: &TableData, surface: &mut dyn MapSurface) {
        self.last_error = None;

        let columns = match LayerColumns::resolve(&self.config) {
            Ok(columns) => columns,
            Err(e) => {
                // Incomplete setup, not bad data: the user has to see this.
                tracing::warn!("configuration incomplete: {}", e);
                self.last_error = Some(e.to_string());
                return;
            }
        };

        let specs: Vec<LayerSpec> = project(table, &columns).collect();
        let report = reconcile(&specs, &mut self.registry, surface, &self.options);
        tracing::info!(
            rows = table.num_rows(),
            specs = specs.len(),
            built = report.built,
            attached = report.attached,
            detached = report.detached,
            "render reconciled"
        );

        if !report.errors.is_empty() {
            let lines: Vec<String> = report.errors.iter().map(|e| e.to_string()).collect();
            self.last_error = Some(lines.join("\n"));
        }
    }
}
