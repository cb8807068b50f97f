//! Column-picker UI
//!
//! Combo boxes binding each layer field to a table column, producing the
//! `{field: {index}}` mapping the projector consumes. The field list is
//! supplied by the caller so this widget stays ignorant of what the
//! fields mean.

use egui::Ui;
use tm_core::columns::ColumnConfig;

/// Draw one combo box per `(field, required)` pair.
///
/// Returns true when any binding changed, which is the host's cue to
/// re-render.
pub fn column_picker(
    ui: &mut Ui,
    config: &mut ColumnConfig,
    fields: &[(&str, bool)],
    columns: &[String],
) -> bool {
    let mut changed = false;

    for &(field, required) in fields {
        let current = config.get(field).map(|binding| binding.index);
        let label = if required {
            format!("{field} *")
        } else {
            field.to_string()
        };

        ui.horizontal(|ui| {
            ui.label(label);
            egui::ComboBox::from_id_source(field)
                .selected_text(selected_text(current, columns))
                .show_ui(ui, |ui| {
                    let mut selection = current;
                    ui.selectable_value(&mut selection, None, "(unset)");
                    for (index, column) in columns.iter().enumerate() {
                        ui.selectable_value(&mut selection, Some(index), column);
                    }
                    if selection != current {
                        match selection {
                            Some(index) => config.bind(field, index),
                            None => config.unbind(field),
                        }
                        changed = true;
                    }
                });
        });
    }

    changed
}

fn selected_text(current: Option<usize>, columns: &[String]) -> String {
    match current {
        Some(index) => columns
            .get(index)
            .cloned()
            .unwrap_or_else(|| format!("column {index}")),
        None => "(unset)".to_string(),
    }
}
