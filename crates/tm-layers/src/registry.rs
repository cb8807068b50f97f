//! The authoritative record of layers materialized this session

use tm_map::LayerHandle;

use crate::spec::{LayerIdentity, LayerSpec};

/// One materialized layer and its attachment state.
///
/// Created the first time its identity shows up in a render call, never
/// destroyed within a session. Disabling detaches the native layer from
/// the map but keeps it constructed for cheap re-attachment.
#[derive(Debug)]
pub struct LayerState {
    name: String,
    url: String,
    kind: String,
    handle: LayerHandle,
    enabled: bool,
}

impl LayerState {
    pub(crate) fn new(spec: &LayerSpec, handle: LayerHandle) -> Self {
        Self {
            name: spec.name.clone(),
            url: spec.url.clone(),
            kind: spec.kind.clone(),
            handle,
            enabled: false,
        }
    }

    /// Identity triple, immutable once created.
    pub fn identity(&self) -> LayerIdentity<'_> {
        LayerIdentity {
            name: &self.name,
            url: &self.url,
            kind: &self.kind,
        }
    }

    /// The native layer, constructed exactly once for this identity.
    pub fn handle(&self) -> &LayerHandle {
        &self.handle
    }

    /// Whether the native layer is currently attached to the map.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub(crate) fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

/// Append-only registry of every layer identity seen this session.
///
/// Lookups are linear scans; the registry grows with the distinct
/// identities seen in a session, not with the current batch size.
#[derive(Debug, Default)]
pub struct LayerRegistry {
    entries: Vec<LayerState>,
}

impl LayerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &LayerState> {
        self.entries.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut LayerState> {
        self.entries.iter_mut()
    }

    /// Position of the entry with `identity`, if it was ever materialized.
    pub fn position(&self, identity: LayerIdentity<'_>) -> Option<usize> {
        self.entries.iter().position(|e| e.identity() == identity)
    }

    pub fn find(&self, identity: LayerIdentity<'_>) -> Option<&LayerState> {
        self.entries.iter().find(|e| e.identity() == identity)
    }

    pub(crate) fn state_mut(&mut self, index: usize) -> &mut LayerState {
        &mut self.entries[index]
    }

    /// Append a new entry, returning its position.
    pub(crate) fn push(&mut self, state: LayerState) -> usize {
        self.entries.push(state);
        self.entries.len() - 1
    }
}
