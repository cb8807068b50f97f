//! Declarative layer descriptions projected from table rows

/// One desired map layer, as described by a single table row.
///
/// Specs are ephemeral: the projector recomputes the whole sequence on
/// every render call. Identity is the `(name, url, kind)` triple; a later
/// spec with an equal identity but different `colour` or
/// `feature_property` refers to the same layer and does not restyle it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerSpec {
    /// Display and identity name.
    pub name: String,

    /// Remote resource locator, a `{bbox}` URL template, or inline
    /// serialized feature content.
    pub url: String,

    /// Raw kind tag off the row. Enum validity is checked at construction
    /// time, not here; projection passes unknown tags through.
    pub kind: String,

    /// Stroke colour; absent or empty falls back to the default blue.
    pub colour: Option<String>,

    /// Feature property drawn as a text label, when set.
    pub feature_property: Option<String>,
}

impl LayerSpec {
    /// Identity triple used for reconciliation.
    pub fn identity(&self) -> LayerIdentity<'_> {
        LayerIdentity {
            name: &self.name,
            url: &self.url,
            kind: &self.kind,
        }
    }
}

/// Borrowed identity triple of a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerIdentity<'a> {
    pub name: &'a str,
    pub url: &'a str,
    pub kind: &'a str,
}

/// The closed set of layer kinds this plugin can build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    Raster,
    Vector,
}

impl LayerKind {
    /// Parse a raw row tag. Anything outside the closed set yields `None`
    /// and becomes an unsupported-kind error at construction.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "raster" => Some(LayerKind::Raster),
            "vector" => Some(LayerKind::Vector),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(name: &str, url: &str, kind: &str) -> LayerSpec {
        LayerSpec {
            name: name.into(),
            url: url.into(),
            kind: kind.into(),
            colour: None,
            feature_property: None,
        }
    }

    #[test]
    fn test_identity_ignores_style_fields() {
        let mut a = spec("roads", "https://x/roads.json", "vector");
        let mut b = a.clone();
        a.colour = Some("rgba(255, 0, 0, 1.0)".into());
        b.feature_property = Some("ref".into());
        assert_eq!(a.identity(), b.identity());
    }

    #[test]
    fn test_identity_differs_on_any_triple_part() {
        let base = spec("roads", "https://x/roads.json", "vector");
        assert_ne!(
            base.identity(),
            spec("rivers", "https://x/roads.json", "vector").identity()
        );
        assert_ne!(
            base.identity(),
            spec("roads", "https://x/rivers.json", "vector").identity()
        );
        assert_ne!(
            base.identity(),
            spec("roads", "https://x/roads.json", "raster").identity()
        );
    }

    #[test]
    fn test_kind_parse_closed_set() {
        assert_eq!(LayerKind::parse("raster"), Some(LayerKind::Raster));
        assert_eq!(LayerKind::parse("vector"), Some(LayerKind::Vector));
        assert_eq!(LayerKind::parse("bogus"), None);
        assert_eq!(LayerKind::parse("Vector"), None);
        assert_eq!(LayerKind::parse(""), None);
    }
}
