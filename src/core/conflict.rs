//! Slot conflict detection
//!
//! Pure predicates over a placement list. `moving` is the id of the placement
//! being relocated or edited; it never conflicts with itself. Adds pass `None`.

use crate::core::data::{CoursePlacement, Slot};
use std::collections::HashMap;

/// First placement other than `moving` that already occupies `slot`
pub fn find_conflict<'a>(
    placements: &'a [CoursePlacement],
    moving: Option<&str>,
    slot: Slot,
) -> Option<&'a CoursePlacement> {
    placements
        .iter()
        .find(|p| Some(p.id.as_str()) != moving && p.slot() == slot)
}

/// Whether placing `moving` (or a new placement) at `slot` would collide
pub fn has_conflict(placements: &[CoursePlacement], moving: Option<&str>, slot: Slot) -> bool {
    find_conflict(placements, moving, slot).is_some()
}

/// Slots held by more than one placement, in grid order.
///
/// The mutator never produces these; they can only come from bad fixture data.
pub fn duplicate_slots(placements: &[CoursePlacement]) -> Vec<Slot> {
    let mut counts: HashMap<Slot, usize> = HashMap::new();
    for placement in placements {
        *counts.entry(placement.slot()).or_insert(0) += 1;
    }

    let mut duplicates: Vec<Slot> = counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(slot, _)| slot)
        .collect();
    duplicates.sort();
    duplicates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::{TimeSlot, Weekday};

    fn at(id: &str, day: Weekday, hour: u8) -> CoursePlacement {
        let start = TimeSlot::from_hour(hour).unwrap();
        let mut placement = CoursePlacement::new(
            format!("Course {}", id),
            "Prof. Martin".to_string(),
            "B205".to_string(),
            day,
            start,
            start.shifted(2),
        );
        placement.id = id.to_string();
        placement
    }

    fn slot(day: Weekday, hour: u8) -> Slot {
        Slot::new(day, TimeSlot::from_hour(hour).unwrap())
    }

    #[test]
    fn test_occupied_slot_conflicts() {
        let placements = vec![at("1", Weekday::Monday, 8), at("2", Weekday::Tuesday, 8)];

        let hit = find_conflict(&placements, Some("2"), slot(Weekday::Monday, 8));
        assert_eq!(hit.map(|p| p.id.as_str()), Some("1"));
        assert!(has_conflict(&placements, None, slot(Weekday::Tuesday, 8)));
    }

    #[test]
    fn test_free_slot_and_self_do_not_conflict() {
        let placements = vec![at("1", Weekday::Monday, 8), at("2", Weekday::Tuesday, 8)];

        assert!(!has_conflict(&placements, Some("2"), slot(Weekday::Wednesday, 9)));
        assert!(!has_conflict(&placements, Some("2"), slot(Weekday::Tuesday, 8)));
        // same day, different hour
        assert!(!has_conflict(&placements, None, slot(Weekday::Monday, 9)));
        assert!(!has_conflict(&[], None, slot(Weekday::Monday, 8)));
    }

    #[test]
    fn test_checker_is_idempotent() {
        let placements = vec![at("1", Weekday::Monday, 8), at("2", Weekday::Tuesday, 8)];
        let target = slot(Weekday::Monday, 8);

        let first = has_conflict(&placements, Some("2"), target);
        let second = has_conflict(&placements, Some("2"), target);
        assert_eq!(first, second);
        assert_eq!(placements.len(), 2);
    }

    #[test]
    fn test_existing_duplicate_still_blocks_and_is_reported() {
        let placements = vec![
            at("1", Weekday::Thursday, 13),
            at("2", Weekday::Thursday, 13),
            at("3", Weekday::Friday, 10),
        ];

        assert!(has_conflict(&placements, Some("3"), slot(Weekday::Thursday, 13)));
        // excluding one of the duplicates still finds the other
        assert!(has_conflict(&placements, Some("1"), slot(Weekday::Thursday, 13)));
        assert_eq!(duplicate_slots(&placements), vec![slot(Weekday::Thursday, 13)]);
        assert!(duplicate_slots(&placements[1..]).is_empty());
    }
}
