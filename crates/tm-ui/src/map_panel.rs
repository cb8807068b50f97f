//! Interactive map panel
//!
//! An egui widget implementing the map widget seam. Attached vector
//! layers are drawn as stroked paths with optional text labels; image
//! layers are listed by name in a corner tag (this surface draws no
//! remote service imagery). Pan and zoom mutate the view state, which the
//! host persists, and drive re-fetching for bbox-templated sources.

use egui::{Align2, Color32, FontId, Pos2, Rect, Rounding, Sense, Shape, Stroke, Ui};
use tm_core::view_state::MapViewState;
use tm_map::{
    substitute_bbox, Extent, FeatureLoader, LayerBody, LayerHandle, LayerId, MapSurface,
    SourceKind, VectorLayer,
};

use crate::colour::parse_colour;
use crate::geometry::{label_anchor, stroke_paths};

/// Hover radius for feature tooltips, in pixels.
const HOVER_RADIUS: f32 = 16.0;

struct AttachedLayer {
    handle: LayerHandle,
    visible: bool,
}

/// The render surface: holds the attached layer set and the current view.
pub struct MapPanel {
    view: MapViewState,
    attached: Vec<AttachedLayer>,
    loader: Option<FeatureLoader>,
    last_extent: Option<Extent>,
    view_changed: bool,
}

impl MapPanel {
    /// Create a panel starting at `view` (normally restored from storage).
    pub fn new(view: MapViewState) -> Self {
        Self {
            view,
            attached: Vec::new(),
            loader: None,
            last_extent: None,
            view_changed: false,
        }
    }

    /// Attach a feature loader so remote sources actually load.
    pub fn with_loader(mut self, loader: FeatureLoader) -> Self {
        self.loader = Some(loader);
        self
    }

    pub fn view(&self) -> MapViewState {
        self.view
    }

    /// True once per view change; the host persists the state when set.
    pub fn take_view_changed(&mut self) -> bool {
        std::mem::take(&mut self.view_changed)
    }

    /// Snapshot of attached layers for the toggle panel.
    pub fn layers(&self) -> Vec<(LayerId, String, bool)> {
        self.attached
            .iter()
            .map(|a| (a.handle.id(), a.handle.name().to_string(), a.visible))
            .collect()
    }

    fn extent_for(&self, rect: Rect) -> Extent {
        let half_width = 180.0 / 2f64.powf(self.view.zoom);
        let aspect = (rect.height() / rect.width().max(1.0)) as f64;
        let half_height = half_width * aspect;
        Extent::new(
            self.view.center[0] - half_width,
            self.view.center[1] - half_height,
            self.view.center[0] + half_width,
            self.view.center[1] + half_height,
        )
    }

    fn current_extent(&self) -> Extent {
        self.last_extent
            .unwrap_or_else(|| self.extent_for(Rect::from_min_size(Pos2::ZERO, egui::vec2(1.0, 1.0))))
    }

    fn to_screen(extent: &Extent, rect: Rect, point: [f64; 2]) -> Pos2 {
        let x = (point[0] - extent.min_x) / extent.width();
        let y = (point[1] - extent.min_y) / extent.height();
        Pos2::new(
            rect.left() + x as f32 * rect.width(),
            rect.bottom() - y as f32 * rect.height(),
        )
    }

    /// Kick off whatever loading the layer's source needs right now.
    fn request_load(&self, layer: &LayerHandle) {
        let Some(loader) = &self.loader else {
            return;
        };
        let Some(vector) = layer.as_vector() else {
            return;
        };
        match vector.source.kind() {
            SourceKind::Inline => {}
            SourceKind::Remote { url } => {
                if !vector.source.is_loaded() {
                    loader.spawn_load(layer.clone(), url.clone());
                }
            }
            SourceKind::BboxTemplate { template } => {
                let url = substitute_bbox(template, &self.current_extent());
                loader.spawn_load(layer.clone(), url);
            }
        }
    }

    /// Re-fetch every visible bbox-templated layer for the new extent.
    fn refresh_bbox_layers(&self, extent: &Extent) {
        let Some(loader) = &self.loader else {
            return;
        };
        for attached in self.attached.iter().filter(|a| a.visible) {
            if let Some(vector) = attached.handle.as_vector() {
                if let SourceKind::BboxTemplate { template } = vector.source.kind() {
                    loader.spawn_load(attached.handle.clone(), substitute_bbox(template, extent));
                }
            }
        }
    }

    /// Draw the panel and handle pan/zoom and tooltips.
    pub fn ui(&mut self, ui: &mut Ui) {
        let rect = ui.available_rect_before_wrap();
        let response = ui.allocate_rect(rect, Sense::click_and_drag());
        let mut extent = self.extent_for(rect);

        self.draw_base_map(ui, rect, &extent);

        let mut hover_targets: Vec<(Pos2, String)> = Vec::new();
        let mut image_names: Vec<String> = Vec::new();
        for attached in self.attached.iter().filter(|a| a.visible) {
            match attached.handle.body() {
                LayerBody::Image(image) => {
                    image_names.push(format!(
                        "{} ({})",
                        attached.handle.name(),
                        image.endpoint
                    ));
                }
                LayerBody::Vector(vector) => {
                    draw_vector_layer(
                        ui,
                        rect,
                        &extent,
                        attached.handle.name(),
                        vector,
                        &mut hover_targets,
                    );
                }
            }
        }
        self.draw_image_tags(ui, rect, &image_names);

        // Pan
        if response.dragged() {
            let delta = response.drag_delta();
            if delta != egui::Vec2::ZERO {
                let units_x = extent.width() / rect.width().max(1.0) as f64;
                let units_y = extent.height() / rect.height().max(1.0) as f64;
                self.view.center[0] -= delta.x as f64 * units_x;
                self.view.center[1] += delta.y as f64 * units_y;
                self.view_changed = true;
            }
        }

        // Zoom
        if response.hovered() {
            let scroll = ui.input(|i| i.scroll_delta.y);
            if scroll != 0.0 {
                self.view.zoom =
                    (self.view.zoom + scroll as f64 / 200.0).clamp(0.0, 18.0);
                self.view_changed = true;
            }
        }

        if self.view_changed {
            extent = self.extent_for(rect);
            self.refresh_bbox_layers(&extent);
        }
        self.last_extent = Some(extent);

        // Tooltip over the nearest feature vertex
        if let Some(hover) = response.hover_pos() {
            let nearest = hover_targets
                .iter()
                .map(|(pos, text)| ((*pos - hover).length(), text))
                .filter(|(distance, _)| *distance < HOVER_RADIUS)
                .min_by(|a, b| a.0.total_cmp(&b.0));
            if let Some((_, text)) = nearest {
                response.on_hover_text(text.clone());
            }
        }
    }

    fn draw_base_map(&self, ui: &Ui, rect: Rect, extent: &Extent) {
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, Rounding::ZERO, Color32::from_rgb(230, 240, 250));

        let grid_stroke = Stroke::new(0.5, Color32::from_gray(200));
        for lat in (-90..=90).step_by(30) {
            let start = Self::to_screen(extent, rect, [extent.min_x, lat as f64]);
            let end = Self::to_screen(extent, rect, [extent.max_x, lat as f64]);
            painter.line_segment([start, end], grid_stroke);
        }
        for lon in (-180..=180).step_by(30) {
            let start = Self::to_screen(extent, rect, [lon as f64, extent.min_y]);
            let end = Self::to_screen(extent, rect, [lon as f64, extent.max_y]);
            painter.line_segment([start, end], grid_stroke);
        }
    }

    fn draw_image_tags(&self, ui: &Ui, rect: Rect, names: &[String]) {
        let painter = ui.painter_at(rect);
        for (i, name) in names.iter().enumerate() {
            painter.text(
                rect.left_top() + egui::vec2(6.0, 6.0 + 14.0 * i as f32),
                Align2::LEFT_TOP,
                name,
                FontId::proportional(11.0),
                Color32::from_gray(90),
            );
        }
    }
}

fn draw_vector_layer(
    ui: &Ui,
    rect: Rect,
    extent: &Extent,
    layer_name: &str,
    vector: &VectorLayer,
    hover_targets: &mut Vec<(Pos2, String)>,
) {
    let painter = ui.painter_at(rect);
    let colour = parse_colour(&vector.style.colour).unwrap_or(Color32::from_rgb(0, 0, 255));
    let stroke = Stroke::new(2.0, colour);

    for feature in vector.source.features().iter() {
        let Some(geometry) = &feature.geometry else {
            continue;
        };

        let mut paths = Vec::new();
        stroke_paths(&geometry.value, &mut paths);

        let label = vector.style.label_property.as_deref().and_then(|key| {
            feature
                .properties
                .as_ref()
                .and_then(|props| props.get(key))
                .and_then(|value| value.as_str())
                .map(str::to_string)
        });

        for path in &paths {
            let points: Vec<Pos2> = path
                .iter()
                .map(|p| MapPanel::to_screen(extent, rect, *p))
                .collect();
            match points.as_slice() {
                [] => {}
                [point] => painter.circle_filled(*point, 3.0, colour),
                _ => {
                    painter.add(Shape::line(points.clone(), stroke));
                }
            }
            if let Some(first) = points.first() {
                let tooltip = match &label {
                    Some(label) => format!("{layer_name}: {label}"),
                    None => layer_name.to_string(),
                };
                hover_targets.push((*first, tooltip));
            }
        }

        // Text label anchored at the feature's first vertex, same colour
        // for stroke and fill.
        if let Some(label) = label {
            if let Some(anchor) = label_anchor(&geometry.value) {
                painter.text(
                    MapPanel::to_screen(extent, rect, anchor) + egui::vec2(4.0, -4.0),
                    Align2::LEFT_BOTTOM,
                    label,
                    FontId::proportional(11.0),
                    colour,
                );
            }
        }
    }
}

impl MapSurface for MapPanel {
    fn add_layer(&mut self, layer: &LayerHandle) {
        if self.attached.iter().any(|a| a.handle.id() == layer.id()) {
            return;
        }
        tracing::debug!(layer = %layer.name(), "layer attached");
        self.request_load(layer);
        self.attached.push(AttachedLayer {
            handle: layer.clone(),
            visible: true,
        });
    }

    fn remove_layer(&mut self, layer: &LayerHandle) {
        tracing::debug!(layer = %layer.name(), "layer detached");
        self.attached.retain(|a| a.handle.id() != layer.id());
    }

    fn set_visible(&mut self, layer: LayerId, visible: bool) {
        let Some(index) = self.attached.iter().position(|a| a.handle.id() == layer) else {
            return;
        };
        self.attached[index].visible = visible;
        if visible {
            let handle = self.attached[index].handle.clone();
            self.request_load(&handle);
        }
    }
}
