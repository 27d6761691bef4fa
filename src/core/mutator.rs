//! Placement mutations guarded by the conflict checker
//!
//! Every mutation either applies completely or leaves the schedule untouched.

use crate::core::conflict::find_conflict;
use crate::core::data::{ColorTag, CoursePlacement, Schedule, Slot, TimeSlot, Weekday};
use crate::utils::error::ScheduleError;

/// Field changes submitted by the edit form; `None` keeps the current value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlacementEdit {
    pub subject: Option<String>,
    pub secondary_label: Option<String>,
    pub room: Option<String>,
    pub day: Option<Weekday>,
    pub start_time: Option<TimeSlot>,
    pub end_time: Option<TimeSlot>,
    pub color: Option<ColorTag>,
}

impl PlacementEdit {
    pub fn is_empty(&self) -> bool {
        *self == PlacementEdit::default()
    }

    fn apply_to(self, placement: &mut CoursePlacement) {
        if let Some(subject) = self.subject {
            placement.subject = subject;
        }
        if let Some(label) = self.secondary_label {
            placement.secondary_label = label;
        }
        if let Some(room) = self.room {
            placement.room = room;
        }
        if let Some(day) = self.day {
            placement.day = day;
        }
        if let Some(start) = self.start_time {
            placement.start_time = start;
        }
        if let Some(end) = self.end_time {
            placement.end_time = end;
        }
        if let Some(color) = self.color {
            placement.color = color;
        }
    }
}

/// Fields of the add-course form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPlacement {
    pub subject: String,
    pub secondary_label: String,
    pub room: String,
    pub day: Weekday,
    pub start_time: TimeSlot,
    pub end_time: TimeSlot,
}

impl NewPlacement {
    fn into_placement(self) -> CoursePlacement {
        CoursePlacement::new(
            self.subject.trim().to_string(),
            self.secondary_label.trim().to_string(),
            self.room.trim().to_string(),
            self.day,
            self.start_time,
            self.end_time,
        )
    }
}

fn validate_fields(placement: &CoursePlacement) -> Result<(), ScheduleError> {
    for (name, value) in [
        ("subject", &placement.subject),
        ("secondary label", &placement.secondary_label),
        ("room", &placement.room),
    ] {
        if value.trim().is_empty() {
            return Err(ScheduleError::Validation(format!("{} cannot be empty", name)));
        }
    }

    if placement.end_time <= placement.start_time {
        return Err(ScheduleError::Validation(format!(
            "end time {} must be after start time {}",
            placement.end_time, placement.start_time
        )));
    }

    Ok(())
}

impl Schedule {
    fn ensure_free(&self, moving: Option<&str>, slot: Slot) -> Result<(), ScheduleError> {
        match find_conflict(&self.placements, moving, slot) {
            Some(occupant) => Err(ScheduleError::SlotConflict {
                slot,
                occupant: occupant.subject.clone(),
            }),
            None => Ok(()),
        }
    }

    fn replace_at(&mut self, index: usize, placement: CoursePlacement) -> &CoursePlacement {
        self.placements[index] = placement;
        &self.placements[index]
    }

    /// Drag-and-drop move to `target`, keeping the course duration.
    ///
    /// The end is clamped at the last hour; a drop that leaves no time
    /// before it is rejected.
    pub fn move_placement(&mut self, id: &str, target: Slot) -> Result<&CoursePlacement, ScheduleError> {
        let index = self
            .position(id)
            .ok_or_else(|| ScheduleError::NotFound(id.to_string()))?;
        self.ensure_free(Some(id), target)?;

        let mut moved = self.placements[index].clone();
        let delta = target.start.hour() as i16 - moved.start_time.hour() as i16;
        moved.day = target.day;
        moved.start_time = target.start;
        moved.end_time = moved.end_time.shifted(delta);
        if moved.end_time <= moved.start_time {
            return Err(ScheduleError::Validation(format!(
                "a course cannot start at {}, it would end at {}",
                moved.start_time,
                TimeSlot::last()
            )));
        }

        Ok(self.replace_at(index, moved))
    }

    /// Edit-form save; any field may change
    pub fn edit_placement(&mut self, id: &str, edit: PlacementEdit) -> Result<&CoursePlacement, ScheduleError> {
        let index = self
            .position(id)
            .ok_or_else(|| ScheduleError::NotFound(id.to_string()))?;

        let mut edited = self.placements[index].clone();
        edit.apply_to(&mut edited);
        validate_fields(&edited)?;
        self.ensure_free(Some(id), edited.slot())?;

        Ok(self.replace_at(index, edited))
    }

    /// Add-course form; the new placement gets a fresh id and the default color
    pub fn add_placement(&mut self, new: NewPlacement) -> Result<&CoursePlacement, ScheduleError> {
        let placement = new.into_placement();
        validate_fields(&placement)?;
        self.ensure_free(None, placement.slot())?;

        self.placements.push(placement);
        Ok(&self.placements[self.placements.len() - 1])
    }

    /// Delete never consults the checker
    pub fn remove_placement(&mut self, id: &str) -> Result<CoursePlacement, ScheduleError> {
        let index = self
            .position(id)
            .ok_or_else(|| ScheduleError::NotFound(id.to_string()))?;
        Ok(self.placements.remove(index))
    }
}

/// A drag in flight: the REJECTED-PENDING state of a placement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragGesture {
    placement_id: String,
    origin: Slot,
}

/// How a drop resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    Placed { from: Slot, to: Slot },
    /// Dropped back on its own cell
    Unchanged(Slot),
    /// Rejected; the card snaps back to `origin` immediately
    Reverted { origin: Slot, reason: ScheduleError },
}

impl DragGesture {
    pub fn begin(schedule: &Schedule, id: &str) -> Result<Self, ScheduleError> {
        let placement = schedule
            .find(id)
            .ok_or_else(|| ScheduleError::NotFound(id.to_string()))?;
        Ok(Self {
            placement_id: placement.id.clone(),
            origin: placement.slot(),
        })
    }

    pub fn placement_id(&self) -> &str {
        &self.placement_id
    }

    pub fn origin(&self) -> Slot {
        self.origin
    }

    pub fn drop_on(self, schedule: &mut Schedule, target: Slot) -> DropOutcome {
        if target == self.origin {
            return DropOutcome::Unchanged(self.origin);
        }

        match schedule.move_placement(&self.placement_id, target) {
            Ok(_) => DropOutcome::Placed {
                from: self.origin,
                to: target,
            },
            Err(reason) => DropOutcome::Reverted {
                origin: self.origin,
                reason,
            },
        }
    }
}
