use std::collections::HashMap;
use std::sync::Mutex;

use crate::model::constants::MEETING_ROOM_THRESHOLD;
use crate::model::{RoomState, Subject};

/// Cached verdict for one (subject, room) pairing.
#[derive(Clone, Copy)]
struct CacheEntry {
    should_reject: bool,
}

/// Optimization filter consulted by a professor before broadcasting a CFP,
/// so rooms that obviously cannot host a subject are never contacted.
/// Consulted synchronously from the negotiation FSM, hence a plain `Mutex`
/// rather than an async lock.
pub struct RoomQuickRejectFilter {
    cache: Mutex<HashMap<(String, String), CacheEntry>>,
}

impl Default for RoomQuickRejectFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl RoomQuickRejectFilter {
    pub fn new() -> Self {
        Self { cache: Mutex::new(HashMap::new()) }
    }

    pub fn can_quick_reject(&self, subject: &Subject, room: &RoomState) -> bool {
        self.can_quick_reject_raw(subject, &room.code, &room.campus, room.capacity)
    }

    pub fn can_quick_reject_raw(&self, subject: &Subject, room_id: &str, room_campus: &str, room_capacity: u32) -> bool {
        let key = (subject.code.clone(), room_id.to_string());
        let mut cache = self.cache.lock().expect("quick-reject cache poisoned");
        if let Some(entry) = cache.get(&key) {
            return entry.should_reject;
        }
        let should_reject = quick_reject_raw(subject, room_campus, room_capacity);
        cache.insert(key, CacheEntry { should_reject });
        should_reject
    }
}

/// Pure quick-reject rule, verbatim from the source filter: campus mismatch
/// always rejects; otherwise a meeting-room-sized subject must land in a
/// meeting-room-sized room (and vice versa), with the meeting-room case
/// using a looser 80%-occupancy floor and the regular case requiring the
/// room to simply fit the enrollment.
pub fn quick_reject(subject: &Subject, room: &RoomState) -> bool {
    quick_reject_raw(subject, &room.campus, room.capacity)
}

/// Same rule as [`quick_reject`] but against raw `(campus, capacity)` pairs,
/// for shortlisting rooms straight from Directory properties before a
/// `RoomState` handle is available.
pub fn quick_reject_raw(subject: &Subject, room_campus: &str, room_capacity: u32) -> bool {
    if room_campus != subject.campus {
        return true;
    }

    let subject_needs_meeting_room = subject.enrollment < MEETING_ROOM_THRESHOLD;
    let is_meeting_room = room_capacity < MEETING_ROOM_THRESHOLD;

    if subject_needs_meeting_room != is_meeting_room {
        return true;
    }

    if is_meeting_room {
        let threshold = (subject.enrollment as f64 * 0.8).ceil() as u32;
        room_capacity < threshold
    } else {
        room_capacity < subject.enrollment
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Activity;

    fn subject(campus: &str, enrollment: u32) -> Subject {
        Subject { code: "CC101".into(), name: "Intro".into(), campus: campus.into(), enrollment, level: 1, activity: Activity::Teoria, hours_required: 4 }
    }

    #[test]
    fn rejects_on_campus_mismatch() {
        let s = subject("north", 30);
        let r = RoomState::new("R1", "south", 40);
        assert!(quick_reject(&s, &r));
    }

    #[test]
    fn rejects_meeting_room_mismatch() {
        let small = subject("north", 8);
        let big_room = RoomState::new("R1", "north", 40);
        assert!(quick_reject(&small, &big_room));

        let big = subject("north", 30);
        let meeting_room = RoomState::new("R2", "north", 8);
        assert!(quick_reject(&big, &meeting_room));
    }

    #[test]
    fn accepts_good_meeting_room_fit() {
        let s = subject("north", 8);
        let r = RoomState::new("R1", "north", 9);
        assert!(!quick_reject(&s, &r));
    }

    #[test]
    fn rejects_undersized_meeting_room() {
        let s = subject("north", 8);
        let r = RoomState::new("R1", "north", 6);
        assert!(quick_reject(&s, &r));
    }

    #[test]
    fn accepts_regular_room_that_fits() {
        let s = subject("north", 30);
        let r = RoomState::new("R1", "north", 30);
        assert!(!quick_reject(&s, &r));
    }

    #[test]
    fn cache_is_consulted_on_second_call() {
        let filter = RoomQuickRejectFilter::new();
        let s = subject("north", 30);
        let r = RoomState::new("R1", "south", 40);
        assert!(filter.can_quick_reject(&s, &r));
        assert!(filter.can_quick_reject(&s, &r));
    }
}
