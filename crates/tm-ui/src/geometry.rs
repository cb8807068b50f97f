//! Flattening GeoJSON geometries into drawable paths

/// Append stroke paths for `value`, as sequences of `[x, y]` map
/// coordinates. Points become single-vertex paths the panel draws as
/// markers; polygon rings are closed paths.
pub fn stroke_paths(value: &geojson::Value, out: &mut Vec<Vec<[f64; 2]>>) {
    use geojson::Value::*;
    match value {
        Point(position) => {
            if let Some(c) = coord(position) {
                out.push(vec![c]);
            }
        }
        MultiPoint(positions) => {
            for position in positions {
                if let Some(c) = coord(position) {
                    out.push(vec![c]);
                }
            }
        }
        LineString(positions) => push_path(positions, out),
        MultiLineString(lines) => {
            for positions in lines {
                push_path(positions, out);
            }
        }
        Polygon(rings) => {
            for ring in rings {
                push_path(ring, out);
            }
        }
        MultiPolygon(polygons) => {
            for rings in polygons {
                for ring in rings {
                    push_path(ring, out);
                }
            }
        }
        GeometryCollection(geometries) => {
            for geometry in geometries {
                stroke_paths(&geometry.value, out);
            }
        }
    }
}

/// Anchor for a feature's text label: the first vertex of its geometry.
pub fn label_anchor(value: &geojson::Value) -> Option<[f64; 2]> {
    let mut paths = Vec::new();
    stroke_paths(value, &mut paths);
    paths.first().and_then(|path| path.first().copied())
}

fn push_path(positions: &[Vec<f64>], out: &mut Vec<Vec<[f64; 2]>>) {
    let path: Vec<[f64; 2]> = positions.iter().filter_map(|p| coord(p)).collect();
    if !path.is_empty() {
        out.push(path);
    }
}

fn coord(position: &[f64]) -> Option<[f64; 2]> {
    match position {
        [x, y, ..] => Some([*x, *y]),
        _ => None,
    }
}
