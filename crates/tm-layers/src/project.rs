//! Row projection: tabular rows into desired layer specs

use serde_json::Value;
use tm_core::columns::{resolve_column, ColumnConfig, ColumnIndex, Requirement};
use tm_core::error::ConfigError;
use tm_core::table::TableData;

use crate::spec::LayerSpec;

/// Field names understood by the projector, as the host config spells them.
pub mod fields {
    pub const URL: &str = "url";
    pub const NAME: &str = "name";
    pub const TYPE: &str = "type";
    pub const COLOUR: &str = "colour";
    pub const FEATURE_PROPERTY: &str = "featureProperty";
}

/// Resolved column positions for the layer fields.
#[derive(Debug, Clone, Copy)]
pub struct LayerColumns {
    pub url: ColumnIndex,
    pub name: ColumnIndex,
    pub kind: ColumnIndex,
    pub colour: ColumnIndex,
    pub feature_property: ColumnIndex,
}

impl LayerColumns {
    /// Resolve against the host config. `url` and `type` must be bound;
    /// the rest may stay unset.
    pub fn resolve(config: &ColumnConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            url: resolve_column(config, fields::URL, Requirement::Required)?,
            name: resolve_column(config, fields::NAME, Requirement::Optional)?,
            kind: resolve_column(config, fields::TYPE, Requirement::Required)?,
            colour: resolve_column(config, fields::COLOUR, Requirement::Optional)?,
            feature_property: resolve_column(
                config,
                fields::FEATURE_PROPERTY,
                Requirement::Optional,
            )?,
        })
    }
}

/// Project the current table snapshot into the desired layer sequence.
///
/// Rows whose `url` or `type` cell is missing, non-string, or empty are
/// dropped without notice; when the `name` column is bound its cell must
/// at least be a string. Output order follows the table, nothing is
/// deduplicated here, and the iterator recomputes from the snapshot every
/// time it is walked.
pub fn project<'a>(
    table: &'a TableData,
    columns: &'a LayerColumns,
) -> impl Iterator<Item = LayerSpec> + 'a {
    table
        .rows
        .iter()
        .filter_map(move |row| project_row(row, columns))
}

fn project_row(row: &[Value], columns: &LayerColumns) -> Option<LayerSpec> {
    let url = nonempty_str(columns.url, row)?;
    let kind = nonempty_str(columns.kind, row)?;
    // With no name column bound, the url doubles as the display name;
    // the identity triple stays stable across renders either way.
    let name = if columns.name.is_bound() {
        columns.name.str_of(row)?
    } else {
        url
    };

    Some(LayerSpec {
        name: name.to_string(),
        url: url.to_string(),
        kind: kind.to_string(),
        colour: nonempty_str(columns.colour, row).map(str::to_string),
        feature_property: nonempty_str(columns.feature_property, row).map(str::to_string),
    })
}

fn nonempty_str<'a>(index: ColumnIndex, row: &'a [Value]) -> Option<&'a str> {
    index.str_of(row).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn table(rows: Vec<Vec<Value>>) -> TableData {
        TableData::new(vec!["url".into(), "name".into(), "type".into()], rows)
    }

    fn url_name_type() -> ColumnConfig {
        let mut config = ColumnConfig::new();
        config.bind(fields::URL, 0);
        config.bind(fields::NAME, 1);
        config.bind(fields::TYPE, 2);
        config
    }

    #[test]
    fn test_filtering_keeps_only_well_formed_rows() {
        let table = table(vec![
            vec![json!("u1"), json!("n1"), json!("vector")],
            vec![json!(""), json!("n2"), json!("vector")],
            vec![json!("u3"), json!("n3"), json!("bogus")],
        ]);
        let columns = LayerColumns::resolve(&url_name_type()).unwrap();
        let specs: Vec<LayerSpec> = project(&table, &columns).collect();

        // The empty-url row is dropped; the bogus-kind row passes through
        // untouched because projection never checks enum validity.
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[0].name, "n1");
        assert_eq!(specs[0].url, "u1");
        assert_eq!(specs[0].kind, "vector");
        assert_eq!(specs[1].kind, "bogus");
    }

    #[test]
    fn test_non_string_cells_drop_the_row() {
        let table = table(vec![
            vec![json!(42), json!("n1"), json!("vector")],
            vec![json!("u2"), json!(7), json!("vector")],
            vec![json!("u3"), json!("n3"), json!(null)],
        ]);
        let columns = LayerColumns::resolve(&url_name_type()).unwrap();
        assert_eq!(project(&table, &columns).count(), 0);
    }

    #[test]
    fn test_bound_name_may_be_empty_string() {
        let table = table(vec![vec![json!("u1"), json!(""), json!("vector")]]);
        let columns = LayerColumns::resolve(&url_name_type()).unwrap();
        let specs: Vec<LayerSpec> = project(&table, &columns).collect();
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].name, "");
    }

    #[test]
    fn test_unbound_name_falls_back_to_url() {
        let mut config = ColumnConfig::new();
        config.bind(fields::URL, 0);
        config.bind(fields::TYPE, 2);
        let columns = LayerColumns::resolve(&config).unwrap();

        let table = table(vec![vec![json!("u1"), json!("ignored"), json!("vector")]]);
        let specs: Vec<LayerSpec> = project(&table, &columns).collect();
        assert_eq!(specs[0].name, "u1");
    }

    #[test]
    fn test_optional_style_columns() {
        let mut config = url_name_type();
        config.bind(fields::COLOUR, 3);
        config.bind(fields::FEATURE_PROPERTY, 4);
        let columns = LayerColumns::resolve(&config).unwrap();

        let table = TableData::new(
            Vec::new(),
            vec![
                vec![
                    json!("u1"),
                    json!("n1"),
                    json!("vector"),
                    json!("rgba(255, 0, 0, 1.0)"),
                    json!("ref"),
                ],
                vec![json!("u2"), json!("n2"), json!("vector"), json!("")],
            ],
        );
        let specs: Vec<LayerSpec> = project(&table, &columns).collect();

        assert_eq!(specs[0].colour.as_deref(), Some("rgba(255, 0, 0, 1.0)"));
        assert_eq!(specs[0].feature_property.as_deref(), Some("ref"));
        // Empty colour cell reads as unset, as does the missing label cell.
        assert_eq!(specs[1].colour, None);
        assert_eq!(specs[1].feature_property, None);
    }

    #[test]
    fn test_missing_required_column_fails_resolution() {
        let mut config = ColumnConfig::new();
        config.bind(fields::NAME, 1);
        config.bind(fields::TYPE, 2);
        let err = LayerColumns::resolve(&config).unwrap_err();
        assert_eq!(err.to_string(), "Please set url in Settings");
    }

    #[test]
    fn test_projection_preserves_order_and_duplicates() {
        let table = table(vec![
            vec![json!("u1"), json!("n1"), json!("vector")],
            vec![json!("u1"), json!("n1"), json!("vector")],
        ]);
        let columns = LayerColumns::resolve(&url_name_type()).unwrap();
        let specs: Vec<LayerSpec> = project(&table, &columns).collect();
        // Deduplication is the reconciler's job, not the projector's.
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[0], specs[1]);
    }

    #[test]
    fn test_projection_is_restartable() {
        let table = table(vec![vec![json!("u1"), json!("n1"), json!("vector")]]);
        let columns = LayerColumns::resolve(&url_name_type()).unwrap();
        assert_eq!(project(&table, &columns).count(), 1);
        assert_eq!(project(&table, &columns).count(), 1);
    }
}
