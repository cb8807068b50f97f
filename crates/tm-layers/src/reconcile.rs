//! The layer reconciliation engine
//!
//! Diffs the projected specs against the registry and mutates the live
//! layer set with minimal churn. Additions run before removals so a
//! one-for-one replacement never leaves the map visibly empty within a
//! single call. Entries are never removed from the registry; a layer no
//! longer desired is detached and kept for later reuse.

use tm_map::MapSurface;

use crate::build::{build_layer, BuildOptions};
use crate::error::LayerError;
use crate::registry::{LayerRegistry, LayerState};
use crate::spec::LayerSpec;

/// Outcome of one reconciliation call.
#[derive(Debug, Default)]
pub struct ReconcileReport {
    /// Specs newly materialized this call.
    pub built: usize,
    /// Layers attached to the map this call.
    pub attached: usize,
    /// Layers detached from the map this call.
    pub detached: usize,
    /// Per-spec failures; the batch keeps going past each one.
    pub errors: Vec<LayerError>,
}

/// Reconcile the desired `specs` against `registry`, driving `surface`.
///
/// Runs to completion synchronously; the host serializes render calls so
/// the registry is never touched concurrently.
pub fn reconcile(
    specs: &[LayerSpec],
    registry: &mut LayerRegistry,
    surface: &mut dyn MapSurface,
    options: &BuildOptions,
) -> ReconcileReport {
    let mut report = ReconcileReport::default();

    // Pass 1: materialize and enable everything the batch asks for, in
    // input order. Lazily constructs a native layer the first time an
    // identity is seen; thereafter only toggles enablement.
    for spec in specs {
        let index = match registry.position(spec.identity()) {
            Some(index) => index,
            None => match build_layer(spec, options) {
                Ok(handle) => {
                    tracing::debug!(layer = %spec.name, kind = %spec.kind, "materialized layer");
                    report.built += 1;
                    registry.push(LayerState::new(spec, handle))
                }
                Err(e) => {
                    tracing::warn!("skipping layer: {}", e);
                    report.errors.push(e);
                    continue;
                }
            },
        };

        let entry = registry.state_mut(index);
        if !entry.is_enabled() {
            surface.add_layer(entry.handle());
            entry.set_enabled(true);
            report.attached += 1;
        }
    }

    // Pass 2: disable whatever the batch no longer wants, in registry
    // order. The constructed layer stays in the registry.
    for entry in registry.iter_mut() {
        let wanted = specs.iter().any(|spec| spec.identity() == entry.identity());
        if !wanted && entry.is_enabled() {
            surface.remove_layer(entry.handle());
            entry.set_enabled(false);
            report.detached += 1;
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use tm_map::{LayerHandle, LayerId};

    /// Records every surface operation so tests can assert on churn.
    #[derive(Default)]
    struct RecordingSurface {
        ops: Vec<Op>,
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Op {
        Add(LayerId),
        Remove(LayerId),
        SetVisible(LayerId, bool),
    }

    impl MapSurface for RecordingSurface {
        fn add_layer(&mut self, layer: &LayerHandle) {
            self.ops.push(Op::Add(layer.id()));
        }

        fn remove_layer(&mut self, layer: &LayerHandle) {
            self.ops.push(Op::Remove(layer.id()));
        }

        fn set_visible(&mut self, layer: LayerId, visible: bool) {
            self.ops.push(Op::SetVisible(layer, visible));
        }
    }

    fn vector(name: &str) -> LayerSpec {
        LayerSpec {
            name: name.into(),
            url: format!("https://example.com/{name}.json"),
            kind: "vector".into(),
            colour: None,
            feature_property: None,
        }
    }

    fn run(
        specs: &[LayerSpec],
        registry: &mut LayerRegistry,
        surface: &mut RecordingSurface,
    ) -> ReconcileReport {
        reconcile(specs, registry, surface, &BuildOptions::default())
    }

    #[test]
    fn test_first_render_attaches_everything() {
        let mut registry = LayerRegistry::new();
        let mut surface = RecordingSurface::default();
        let specs = vec![vector("a"), vector("b")];

        let report = run(&specs, &mut registry, &mut surface);

        assert_eq!(report.built, 2);
        assert_eq!(report.attached, 2);
        assert_eq!(report.detached, 0);
        assert!(report.errors.is_empty());
        assert_eq!(registry.len(), 2);
        assert!(registry.iter().all(|e| e.is_enabled()));
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let mut registry = LayerRegistry::new();
        let mut surface = RecordingSurface::default();
        let specs = vec![vector("a"), vector("b")];

        run(&specs, &mut registry, &mut surface);
        let ops_after_first = surface.ops.len();
        let report = run(&specs, &mut registry, &mut surface);

        // Second call with an identical batch: no new construction, no
        // surface operations, no duplicate registry entries.
        assert_eq!(report.built, 0);
        assert_eq!(report.attached, 0);
        assert_eq!(report.detached, 0);
        assert_eq!(surface.ops.len(), ops_after_first);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_minimal_churn_on_partial_overlap() {
        let mut registry = LayerRegistry::new();
        let mut surface = RecordingSurface::default();
        run(&[vector("a"), vector("b")], &mut registry, &mut surface);

        let a_id = registry.find(vector("a").identity()).unwrap().handle().id();
        surface.ops.clear();

        let report = run(&[vector("b"), vector("c")], &mut registry, &mut surface);

        // A detached, B untouched, C constructed and attached.
        let c_id = registry.find(vector("c").identity()).unwrap().handle().id();
        assert_eq!(surface.ops, vec![Op::Add(c_id), Op::Remove(a_id)]);
        assert_eq!(report.built, 1);
        assert_eq!(report.attached, 1);
        assert_eq!(report.detached, 1);

        assert!(!registry.find(vector("a").identity()).unwrap().is_enabled());
        assert!(registry.find(vector("b").identity()).unwrap().is_enabled());
    }

    #[test]
    fn test_disabled_identity_reuses_the_same_native_layer() {
        let mut registry = LayerRegistry::new();
        let mut surface = RecordingSurface::default();

        run(&[vector("a")], &mut registry, &mut surface);
        let original = registry.find(vector("a").identity()).unwrap().handle().clone();

        run(&[], &mut registry, &mut surface);
        assert!(!registry.find(vector("a").identity()).unwrap().is_enabled());
        assert_eq!(registry.len(), 1);

        let report = run(&[vector("a")], &mut registry, &mut surface);
        let revived = registry.find(vector("a").identity()).unwrap().handle();

        // Same object, not a reconstruction.
        assert!(std::sync::Arc::ptr_eq(&original, revived));
        assert_eq!(report.built, 0);
        assert_eq!(report.attached, 1);
    }

    #[test]
    fn test_duplicate_specs_in_one_batch_materialize_once() {
        let mut registry = LayerRegistry::new();
        let mut surface = RecordingSurface::default();

        let report = run(&[vector("a"), vector("a")], &mut registry, &mut surface);

        assert_eq!(report.built, 1);
        assert_eq!(report.attached, 1);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_unsupported_kind_is_collected_and_batch_continues() {
        let mut registry = LayerRegistry::new();
        let mut surface = RecordingSurface::default();

        let mut bogus = vector("n3");
        bogus.kind = "bogus".into();
        let specs = vec![vector("a"), bogus, vector("b")];

        let report = run(&specs, &mut registry, &mut surface);

        // The bad spec is reported, the rest of the batch still lands.
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.built, 2);
        assert_eq!(report.attached, 2);
        assert_eq!(registry.len(), 2);
        assert!(report.errors[0]
            .to_string()
            .contains("Layer type not recognised"));
    }

    #[test]
    fn test_failed_spec_is_retried_next_render() {
        let mut registry = LayerRegistry::new();
        let mut surface = RecordingSurface::default();

        let mut bogus = vector("a");
        bogus.kind = "bogus".into();
        run(&[bogus], &mut registry, &mut surface);
        assert!(registry.is_empty());

        // Nothing was cached for the failed identity, so a corrected row
        // on the next refresh materializes normally.
        let report = run(&[vector("a")], &mut registry, &mut surface);
        assert_eq!(report.built, 1);
        assert_eq!(report.errors.len(), 0);
    }

    #[test]
    fn test_additions_precede_removals() {
        let mut registry = LayerRegistry::new();
        let mut surface = RecordingSurface::default();
        run(&[vector("old")], &mut registry, &mut surface);
        surface.ops.clear();

        run(&[vector("new")], &mut registry, &mut surface);

        let new_id = registry.find(vector("new").identity()).unwrap().handle().id();
        let old_id = registry.find(vector("old").identity()).unwrap().handle().id();
        assert_eq!(surface.ops, vec![Op::Add(new_id), Op::Remove(old_id)]);
    }
}
