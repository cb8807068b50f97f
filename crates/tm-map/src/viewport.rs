//! Viewport extents and `{bbox}` template substitution

/// Rectangular viewport extent in map coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Extent {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Comma-joined `minx,miny,maxx,maxy` form used in bbox URL templates.
    pub fn to_bbox_string(&self) -> String {
        format!("{},{},{},{}", self.min_x, self.min_y, self.max_x, self.max_y)
    }
}

/// Substitute every `{bbox}` placeholder in a URL template with the
/// extent, matching the placeholder case-insensitively.
pub fn substitute_bbox(template: &str, extent: &Extent) -> String {
    const PLACEHOLDER: &str = "{bbox}";
    let bbox = extent.to_bbox_string();
    let mut out = String::with_capacity(template.len() + bbox.len());
    let mut rest = template;
    while let Some(pos) = find_ignore_ascii_case(rest, PLACEHOLDER) {
        out.push_str(&rest[..pos]);
        out.push_str(&bbox);
        rest = &rest[pos + PLACEHOLDER.len()..];
    }
    out.push_str(rest);
    out
}

fn find_ignore_ascii_case(haystack: &str, needle: &str) -> Option<usize> {
    haystack
        .as_bytes()
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bbox_string_order() {
        let extent = Extent::new(-10.0, -5.0, 10.0, 5.0);
        assert_eq!(extent.to_bbox_string(), "-10,-5,10,5");
    }

    #[test]
    fn test_substitute_bbox_is_case_insensitive() {
        let extent = Extent::new(0.0, 1.0, 2.0, 3.0);
        assert_eq!(
            substitute_bbox("https://a/wfs?bbox={BBOX}", &extent),
            "https://a/wfs?bbox=0,1,2,3"
        );
        assert_eq!(
            substitute_bbox("https://a/wfs?bbox={bbox}&x={BbOx}", &extent),
            "https://a/wfs?bbox=0,1,2,3&x=0,1,2,3"
        );
    }

    #[test]
    fn test_substitute_bbox_without_placeholder_is_identity() {
        let extent = Extent::new(0.0, 0.0, 1.0, 1.0);
        assert_eq!(
            substitute_bbox("https://a/all.json", &extent),
            "https://a/all.json"
        );
    }
}
