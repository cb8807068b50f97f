//! Vector layer styling

use once_cell::sync::Lazy;

/// Fixed default stroke colour applied when a row leaves `colour` blank.
pub const DEFAULT_COLOUR: &str = "rgba(0, 0, 255, 1.0)";

/// Stroke and label styling for a vector layer.
///
/// Styling is fixed at construction time: a later spec with the same layer
/// identity but a different colour or label property does not restyle the
/// existing layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerStyle {
    /// CSS-style colour string used for strokes, and for both stroke and
    /// fill of text labels.
    pub colour: String,

    /// Feature property whose string value is drawn as a text label,
    /// when present on a feature.
    pub label_property: Option<String>,
}

/// Shared default style; layers whose rows leave `colour` blank all use
/// this one configuration.
pub static DEFAULT_STYLE: Lazy<LayerStyle> = Lazy::new(|| LayerStyle {
    colour: DEFAULT_COLOUR.to_string(),
    label_property: None,
});

impl Default for LayerStyle {
    fn default() -> Self {
        DEFAULT_STYLE.clone()
    }
}
