use serde::{Deserialize, Serialize};

use super::activity::Activity;

/// A course section a professor must place into the weekly grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    pub code: String,
    pub name: String,
    /// Campus the subject is normally taught on; compared against a room's
    /// actual campus to detect cross-campus transitions.
    pub campus: String,
    pub enrollment: u32,
    /// Academic level (year). Odd levels prefer morning blocks, even prefer
    /// afternoon, per the time-slot preference rule.
    pub level: u8,
    pub activity: Activity,
    /// Total weekly blocks this subject still needs placed.
    pub hours_required: u32,
}

impl Subject {
    pub fn needs_meeting_room(&self) -> bool {
        self.enrollment < super::constants::MEETING_ROOM_THRESHOLD
    }
}
