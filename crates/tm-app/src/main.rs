//! Demo host for the map layer visualization plugin
//!
//! Stands in for the notebook runtime: it owns the table snapshot and
//! hands it to the plugin on every refresh, wires the column picker to
//! the plugin's configuration, and persists the map view between runs.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use eframe::egui;
use tracing::info;

use tm_core::{MapViewState, TableData, ViewStateStore};
use tm_layers::{project::fields, BuildOptions, MapLayerPlugin};
use tm_map::{FeatureLoader, HttpFeatureClient};
use tm_ui::{column_picker, layer_panel, MapPanel};

mod loader;
mod sample;

/// Field list for the column picker; `true` marks required fields.
const FIELDS: &[(&str, bool)] = &[
    (fields::URL, true),
    (fields::NAME, false),
    (fields::TYPE, true),
    (fields::COLOUR, false),
    (fields::FEATURE_PROPERTY, false),
];

/// Read-only adapter over eframe storage for view-state restore.
struct StorageReader<'a>(&'a dyn eframe::Storage);

impl ViewStateStore for StorageReader<'_> {
    fn get(&self, key: &str) -> Option<String> {
        self.0.get_string(key)
    }

    fn set(&mut self, _key: &str, _value: String) {}
}

/// Writable adapter over eframe storage for view-state persistence.
struct StorageWriter<'a>(&'a mut dyn eframe::Storage);

impl ViewStateStore for StorageWriter<'_> {
    fn get(&self, key: &str) -> Option<String> {
        self.0.get_string(key)
    }

    fn set(&mut self, key: &str, value: String) {
        self.0.set_string(key, value);
    }
}

struct HostApp {
    table: TableData,
    plugin: MapLayerPlugin,
    panel: MapPanel,
    needs_render: bool,
    csv_path: Option<PathBuf>,

    /// Keeps background feature fetches alive for the app's lifetime.
    _runtime: tokio::runtime::Runtime,
}

impl HostApp {
    fn new(
        cc: &eframe::CreationContext<'_>,
        runtime: tokio::runtime::Runtime,
        csv_path: Option<PathBuf>,
    ) -> Self {
        let view = match cc.storage {
            Some(storage) => MapViewState::restore(&StorageReader(storage)),
            None => MapViewState::default(),
        };

        let loader = FeatureLoader::new(
            runtime.handle().clone(),
            Arc::new(HttpFeatureClient::new()),
        );
        let panel = MapPanel::new(view).with_loader(loader);

        let table = Self::load_table(csv_path.as_deref());
        let mut plugin = MapLayerPlugin::new(BuildOptions::default());
        plugin.set_config(sample::default_config());

        Self {
            table,
            plugin,
            panel,
            needs_render: true,
            csv_path,
            _runtime: runtime,
        }
    }

    fn load_table(csv_path: Option<&std::path::Path>) -> TableData {
        match csv_path {
            Some(path) => match loader::table_from_csv(path) {
                Ok(table) => {
                    info!(rows = table.num_rows(), "loaded layer table from {}", path.display());
                    table
                }
                Err(e) => {
                    tracing::error!("failed to load {}: {}", path.display(), e);
                    sample::layer_table()
                }
            },
            None => sample::layer_table(),
        }
    }

    fn side_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Layers");
        layer_panel(ui, &mut self.panel);
        ui.separator();

        ui.heading("Columns");
        if column_picker(ui, self.plugin.config_mut(), FIELDS, &self.table.columns) {
            self.needs_render = true;
        }
        ui.separator();

        if ui.button("Refresh result").clicked() {
            // Simulates the notebook pushing the same result again.
            self.needs_render = true;
        }
        if ui.button("Reload table").clicked() {
            self.table = Self::load_table(self.csv_path.as_deref());
            self.needs_render = true;
        }
    }
}

impl eframe::App for HostApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.needs_render {
            self.needs_render = false;
            self.plugin.render(&self.table, &mut self.panel);
        }

        egui::SidePanel::left("controls")
            .default_width(240.0)
            .show(ctx, |ui| self.side_panel(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(error) = self.plugin.last_error() {
                ui.colored_label(egui::Color32::from_rgb(200, 60, 60), error);
            }
            self.panel.ui(ui);
        });

        if self.panel.take_view_changed() {
            ctx.request_repaint();
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.panel.view().persist(&mut StorageWriter(storage));
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let csv_path = std::env::args().nth(1).map(PathBuf::from);
    let runtime = tokio::runtime::Runtime::new()?;

    info!("Starting tabmap demo host");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 750.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "tabmap",
        options,
        Box::new(move |cc| Box::new(HostApp::new(cc, runtime, csv_path))),
    )
    .map_err(|e| anyhow::anyhow!("failed to run app: {}", e))?;

    Ok(())
}
