use crate::entity::{Entity, EntityId};
use crate::model::FleetModel;

/// Single-entity selection, resolved against the live model on every read.
///
/// Only the id is stored. `current` re-resolves it per call, so position and
/// telemetry updates to a selected asset are always visible; there is no
/// cached entity snapshot to go stale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    id: Option<EntityId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects `id` if it exists in `model`; returns whether it did.
    ///
    /// A stale id is a caller bug. The previous selection is left in place
    /// rather than silently cleared, which keeps the mistake visible.
    pub fn select(&mut self, id: &EntityId, model: &FleetModel) -> bool {
        if model.contains(id) {
            self.id = Some(id.clone());
            true
        } else {
            false
        }
    }

    /// Explicit deselection (the inspector's close action).
    pub fn clear(&mut self) {
        self.id = None;
    }

    pub fn id(&self) -> Option<&EntityId> {
        self.id.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_none()
    }

    /// The selected entity, looked up in the live model.
    pub fn current<'m>(&self, model: &'m FleetModel) -> Option<&'m Entity> {
        self.id.as_ref().and_then(|id| model.get(id))
    }

    /// Drops the selection if a model refresh removed the entity.
    ///
    /// Returns `true` if the selection was cleared.
    pub fn reconcile(&mut self, model: &FleetModel) -> bool {
        match &self.id {
            Some(id) if !model.contains(id) => {
                self.id = None;
                true
            }
            _ => false,
        }
    }
}
