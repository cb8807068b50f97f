//! Built-in sample table
//!
//! A small layer table the demo renders when no CSV is given, covering
//! the interesting projection paths: inline features, a remote source, a
//! raster layer, and a sparse placeholder row that the filter drops.

use serde_json::{json, Value};
use tm_core::columns::ColumnConfig;
use tm_core::TableData;
use tm_layers::project::fields;

pub fn layer_table() -> TableData {
    let equator = json!({
        "type": "Feature",
        "geometry": {
            "type": "LineString",
            "coordinates": [[-160.0, 0.0], [0.0, 0.0], [160.0, 0.0]]
        },
        "properties": {"name": "equator"}
    })
    .to_string();

    let capitals = json!([
        {
            "type": "Feature",
            "geometry": {"type": "Point", "coordinates": [2.35, 48.85]},
            "properties": {"name": "Paris"}
        },
        {
            "type": "Feature",
            "geometry": {"type": "Point", "coordinates": [151.21, -33.87]},
            "properties": {"name": "Sydney"}
        }
    ])
    .to_string();

    TableData::new(
        vec![
            "url".into(),
            "name".into(),
            "type".into(),
            "colour".into(),
            "featureProperty".into(),
        ],
        vec![
            row(&equator, "Equator", "vector", "", ""),
            row(&capitals, "Capitals", "vector", "rgba(200, 30, 30, 1.0)", "name"),
            row(
                "https://example.com/coastlines.json",
                "Coastlines",
                "vector",
                "rgba(30, 120, 30, 1.0)",
                "",
            ),
            row("https://maps.example/wms", "Topography", "raster", "", ""),
            // Placeholder row with no url; the projector drops it.
            row("", "Pending layer", "vector", "", ""),
        ],
    )
}

fn row(url: &str, name: &str, kind: &str, colour: &str, label: &str) -> Vec<Value> {
    vec![
        json!(url),
        json!(name),
        json!(kind),
        json!(colour),
        json!(label),
    ]
}

/// Column config matching [`layer_table`]'s column order.
pub fn default_config() -> ColumnConfig {
    let mut config = ColumnConfig::new();
    config.bind(fields::URL, 0);
    config.bind(fields::NAME, 1);
    config.bind(fields::TYPE, 2);
    config.bind(fields::COLOUR, 3);
    config.bind(fields::FEATURE_PROPERTY, 4);
    config
}
