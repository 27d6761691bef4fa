//! Core trait definitions for schedule management
//!
//! These traits split read access to a schedule view from the mutating
//! operations, so the presentation layer can render any view while only
//! editable sessions expose the mutations.

use crate::core::conflict::find_conflict;
use crate::core::data::{CoursePlacement, Schedule, ScheduleStats, Slot};
use crate::core::mutator::{DropOutcome, NewPlacement, PlacementEdit};
use crate::utils::error::{AppResult, ScheduleError};
use async_trait::async_trait;

/// Result of an add or edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    Applied(CoursePlacement),
    /// Slot conflict; nothing changed
    Rejected(ScheduleError),
}

impl MutationOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, MutationOutcome::Applied(_))
    }
}

/// Read access to one schedule view
pub trait ScheduleQuery {
    fn schedule(&self) -> &Schedule;

    fn find_placement(&self, id: &str) -> Option<&CoursePlacement> {
        self.schedule().find(id)
    }

    /// Placement that would block `moving` (or a new course) at `slot`
    fn check_slot(&self, moving: Option<&str>, slot: Slot) -> Option<&CoursePlacement> {
        find_conflict(&self.schedule().placements, moving, slot)
    }

    fn stats(&self) -> ScheduleStats {
        self.schedule().stats()
    }
}

/// Create, update and delete operations on one schedule view
#[async_trait]
pub trait ScheduleCrud: ScheduleQuery {
    /// Drag-and-drop of a placement onto another cell
    async fn drop_placement(&mut self, id: &str, target: Slot) -> AppResult<DropOutcome>;

    async fn add_placement(&mut self, new: NewPlacement) -> AppResult<MutationOutcome>;

    async fn edit_placement(&mut self, id: &str, edit: PlacementEdit) -> AppResult<MutationOutcome>;

    async fn delete_placement(&mut self, id: &str) -> AppResult<CoursePlacement>;
}
