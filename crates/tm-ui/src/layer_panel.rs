//! Layer-toggle checkbox panel
//!
//! One checkbox and label per currently attached layer, regenerated every
//! frame. Toggling a box drives `set_visible` on the surface; it never
//! detaches the layer, so the reconciler's registry is unaffected.

use egui::Ui;
use tm_map::MapSurface;

use crate::map_panel::MapPanel;

pub fn layer_panel(ui: &mut Ui, panel: &mut MapPanel) {
    let layers = panel.layers();
    if layers.is_empty() {
        ui.weak("No layers on the map");
        return;
    }

    for (id, name, visible) in layers {
        let mut checked = visible;
        if ui.checkbox(&mut checked, name).changed() {
            panel.set_visible(id, checked);
        }
    }
}
