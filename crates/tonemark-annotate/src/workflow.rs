//! Step workflow: which region is paintable, and when the user may
//! advance or submit.
//!
//! The three regions form a fixed forward sequence hair → skin → hand.
//! Advancing past a region requires at least one brush application in
//! it; hand is terminal. Resetting any region moves the active step
//! back to the earliest unpainted region, so clearing hair while skin
//! is painted re-activates hair.
//!
//! The submission gate is deliberately asymmetric: hair and skin are
//! required, hand is optional and never blocks submission.

use crate::store::RegionMaskStore;
use crate::types::Region;

/// Errors from workflow actions. These reject the action and leave all
/// state unchanged.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum WorkflowError {
    /// The active region must be painted before advancing past it.
    #[error("select {0} first")]
    RegionUnpainted(Region),
}

/// The step-progression state machine.
///
/// Holds only the active region; paint counts live in the
/// [`RegionMaskStore`] and are consulted at each transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Workflow {
    active: Region,
}

impl Default for Workflow {
    fn default() -> Self {
        Self::new()
    }
}

impl Workflow {
    /// Start at the first step (hair). Called for every new image.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            active: Region::Hair,
        }
    }

    /// The region currently accepting paint.
    #[must_use]
    pub const fn active(&self) -> Region {
        self.active
    }

    /// Jump back to the first step. Used when a new image replaces the
    /// current one.
    pub const fn restart(&mut self) {
        self.active = Region::Hair;
    }

    /// Move to the next region, if the active one has been painted.
    ///
    /// At the terminal region (hand) this is a no-op that reports the
    /// unchanged active region.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::RegionUnpainted`] naming the active
    /// region when it has no brush applications yet; the active region
    /// does not change.
    pub fn advance(&mut self, store: &RegionMaskStore) -> Result<Region, WorkflowError> {
        let Some(next) = self.active.next() else {
            return Ok(self.active);
        };
        if store.is_empty(self.active) {
            return Err(WorkflowError::RegionUnpainted(self.active));
        }
        self.active = next;
        Ok(self.active)
    }

    /// Recompute the active region after a mask reset: the earliest
    /// region (in priority order) whose paint count is zero, or hand
    /// when all three are painted.
    ///
    /// Resetting a later region while an earlier one stays painted can
    /// still move the active step backward, because the earliest empty
    /// region wins.
    pub fn recompute_after_reset(&mut self, store: &RegionMaskStore) {
        self.active = Region::ALL
            .into_iter()
            .find(|r| store.is_empty(*r))
            .unwrap_or(Region::Hand);
    }

    /// Whether submission for analysis is allowed: hair and skin both
    /// painted. Hand never factors in.
    #[must_use]
    pub const fn can_submit(store: &RegionMaskStore) -> bool {
        !store.is_empty(Region::Hair) && !store.is_empty(Region::Skin)
    }
}
