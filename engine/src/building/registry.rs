//! Construction Registry
//!
//! Owns every committed construction and enforces that no two share a span.
//! Callers are expected to grid-snap before placing; comparison is exact.
//!
//! The registry is injected into its consumers. [`SharedRegistry`] wraps it in a
//! single mutex region for hosts that place from more than one task.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use glam::Vec3;
use log::debug;

use super::construction::{Construction, ConstructionId, ConstructionKind};
use crate::error::GameplayError;

/// Committed constructions, in placement order.
#[derive(Debug, Clone, Default)]
pub struct ConstructionRegistry {
    constructions: Vec<Construction>,
    next_id: u64,
}

impl ConstructionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out a fresh construction identity.
    pub fn allocate_id(&mut self) -> ConstructionId {
        self.next_id += 1;
        ConstructionId(self.next_id)
    }

    /// True when no live construction occupies exactly this span.
    pub fn is_slot_free(&self, start: Vec3, end: Vec3) -> bool {
        !self.constructions.iter().any(|c| c.same_span(start, end))
    }

    /// Register `construction` unless its span is taken.
    ///
    /// Returns `false` without touching the registry when the slot is occupied.
    pub fn try_place(&mut self, construction: Construction) -> bool {
        if !self.is_slot_free(construction.start_point, construction.end_point) {
            debug!(
                "[Registry] Rejected {} {}: span occupied",
                construction.kind.name(),
                construction.id
            );
            return false;
        }
        debug!(
            "[Registry] Placed {} {} at {}",
            construction.kind.name(),
            construction.id,
            construction.start_point
        );
        self.constructions.push(construction);
        true
    }

    /// `Result` flavour of [`Self::try_place`].
    pub fn place(&mut self, construction: Construction) -> Result<ConstructionId, GameplayError> {
        let id = construction.id;
        if self.try_place(construction) {
            Ok(id)
        } else {
            Err(GameplayError::SlotOccupied {
                start: construction.start_point,
                end: construction.end_point,
            })
        }
    }

    /// Allocate an id and place a point-anchored construction in one step.
    ///
    /// The id is only consumed when the placement succeeds.
    pub fn place_at(
        &mut self,
        kind: ConstructionKind,
        point: Vec3,
        yaw_degrees: f32,
    ) -> Option<ConstructionId> {
        if !self.is_slot_free(point, point) {
            return None;
        }
        let id = self.allocate_id();
        self.try_place(Construction::at_point(id, kind, point, yaw_degrees))
            .then_some(id)
    }

    /// Remove every entry carrying `id`. Returns how many were removed.
    pub fn remove(&mut self, id: ConstructionId) -> usize {
        let before = self.constructions.len();
        self.constructions.retain(|c| c.id != id);
        before - self.constructions.len()
    }

    pub fn find(&self, id: ConstructionId) -> Option<&Construction> {
        self.constructions.iter().find(|c| c.id == id)
    }

    /// Construction plus the anchor used to position its edit affordance.
    pub fn find_with_anchor(&self, id: ConstructionId) -> Option<(Construction, Vec3)> {
        self.find(id).map(|c| (*c, c.anchor()))
    }

    pub fn len(&self) -> usize {
        self.constructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constructions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Construction> {
        self.constructions.iter()
    }

    pub fn clear(&mut self) {
        self.constructions.clear();
    }
}

/// Registry handle shared between the simulation and other tasks.
#[derive(Debug, Clone, Default)]
pub struct SharedRegistry {
    inner: Arc<Mutex<ConstructionRegistry>>,
}

impl SharedRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_registry(registry: ConstructionRegistry) -> Self {
        Self {
            inner: Arc::new(Mutex::new(registry)),
        }
    }

    /// Enter the mutual-exclusion region.
    ///
    /// A poisoned lock is recovered: every registry operation leaves the
    /// list consistent before it can panic.
    pub fn lock(&self) -> MutexGuard<'_, ConstructionRegistry> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn try_place(&self, construction: Construction) -> bool {
        self.lock().try_place(construction)
    }

    pub fn place_at(
        &self,
        kind: ConstructionKind,
        point: Vec3,
        yaw_degrees: f32,
    ) -> Option<ConstructionId> {
        self.lock().place_at(kind, point, yaw_degrees)
    }

    pub fn remove(&self, id: ConstructionId) -> usize {
        self.lock().remove(id)
    }

    pub fn find(&self, id: ConstructionId) -> Option<Construction> {
        self.lock().find(id).copied()
    }

    pub fn find_with_anchor(&self, id: ConstructionId) -> Option<(Construction, Vec3)> {
        self.lock().find_with_anchor(id)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Copy of the current contents.
    pub fn snapshot(&self) -> Vec<Construction> {
        self.lock().iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wall(reg: &mut ConstructionRegistry, start: Vec3, end: Vec3) -> Construction {
        let id = reg.allocate_id();
        Construction::new(id, ConstructionKind::Wall, start, end)
    }

    #[test]
    fn test_duplicate_span_rejected() {
        let mut reg = ConstructionRegistry::new();
        let a = wall(&mut reg, Vec3::ZERO, Vec3::X);
        let b = wall(&mut reg, Vec3::ZERO, Vec3::X);

        assert!(reg.try_place(a));
        assert!(!reg.try_place(b));
        assert_eq!(reg.len(), 1);
        assert!(reg.find(b.id).is_none());
    }

    #[test]
    fn test_reversed_span_is_distinct() {
        let mut reg = ConstructionRegistry::new();
        let a = wall(&mut reg, Vec3::ZERO, Vec3::X);
        let b = wall(&mut reg, Vec3::X, Vec3::ZERO);
        assert!(reg.try_place(a));
        assert!(reg.try_place(b));
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn test_no_tolerance_on_span() {
        let mut reg = ConstructionRegistry::new();
        let a = wall(&mut reg, Vec3::ZERO, Vec3::X);
        let b = wall(&mut reg, Vec3::new(1e-6, 0.0, 0.0), Vec3::X);
        assert!(reg.try_place(a));
        assert!(reg.try_place(b));
    }

    #[test]
    fn test_place_reports_slot_occupied() {
        let mut reg = ConstructionRegistry::new();
        let a = wall(&mut reg, Vec3::ZERO, Vec3::Y);
        let b = wall(&mut reg, Vec3::ZERO, Vec3::Y);
        assert_eq!(reg.place(a).unwrap(), a.id);
        assert!(matches!(
            reg.place(b),
            Err(GameplayError::SlotOccupied { .. })
        ));
    }

    #[test]
    fn test_remove_drops_all_duplicates_of_id() {
        let mut reg = ConstructionRegistry::new();
        let a = wall(&mut reg, Vec3::ZERO, Vec3::X);
        let mut dup = a;
        dup.end_point = Vec3::Z;
        assert!(reg.try_place(a));
        assert!(reg.try_place(dup));

        assert_eq!(reg.remove(a.id), 2);
        assert!(reg.is_empty());
        assert_eq!(reg.remove(a.id), 0);
    }

    #[test]
    fn test_place_at_only_consumes_id_on_success() {
        let mut reg = ConstructionRegistry::new();
        let p = Vec3::new(5.715, 0.0, 5.715);
        let first = reg.place_at(ConstructionKind::Floor, p, 0.0);
        assert_eq!(first, Some(ConstructionId(1)));
        assert_eq!(reg.place_at(ConstructionKind::Floor, p, 0.0), None);
        assert_eq!(reg.allocate_id(), ConstructionId(2));
    }

    #[test]
    fn test_find_with_anchor() {
        let mut reg = ConstructionRegistry::new();
        let c = wall(&mut reg, Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 10.0));
        reg.try_place(c);
        let (found, anchor) = reg.find_with_anchor(c.id).unwrap();
        assert_eq!(found.id, c.id);
        assert!((anchor - Vec3::new(0.0, 0.0, 5.0)).length() < 1e-5);
        assert!(reg.find_with_anchor(ConstructionId(999)).is_none());
    }

    #[test]
    fn test_shared_registry_is_shared() {
        let shared = SharedRegistry::new();
        let other = shared.clone();
        assert!(shared.place_at(ConstructionKind::Wall, Vec3::ONE, 90.0).is_some());
        assert_eq!(other.len(), 1);
        assert!(other.place_at(ConstructionKind::Wall, Vec3::ONE, 90.0).is_none());
    }
}
