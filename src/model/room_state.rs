use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::constants::MEETING_ROOM_THRESHOLD;
use super::day::{Block, Day};

/// A room agent's view of its own weekly occupancy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomState {
    pub code: String,
    pub campus: String,
    pub capacity: u32,
    #[serde(default)]
    occupied: HashMap<Day, HashSet<Block>>,
}

impl RoomState {
    pub fn new(code: impl Into<String>, campus: impl Into<String>, capacity: u32) -> Self {
        Self { code: code.into(), campus: campus.into(), capacity, occupied: HashMap::new() }
    }

    pub fn is_meeting_room(&self) -> bool {
        self.capacity < MEETING_ROOM_THRESHOLD
    }

    pub fn is_free(&self, day: Day, block: Block) -> bool {
        !self.occupied.get(&day).map(|blocks| blocks.contains(&block)).unwrap_or(false)
    }

    /// Reserves a slot. Returns `false` without mutating state if the slot
    /// was already taken, so callers can treat it as an atomic compare-and-set.
    pub fn reserve(&mut self, day: Day, block: Block) -> bool {
        let entry = self.occupied.entry(day).or_default();
        entry.insert(block)
    }

    pub fn release(&mut self, day: Day, block: Block) {
        if let Some(entry) = self.occupied.get_mut(&day) {
            entry.remove(&block);
        }
    }

    pub fn occupied_blocks(&self, day: Day) -> Vec<Block> {
        let mut blocks: Vec<Block> = self.occupied.get(&day).into_iter().flatten().copied().collect();
        blocks.sort_unstable();
        blocks
    }
}
