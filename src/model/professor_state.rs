use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::activity::{Activity, ContractType};
use super::day::{Block, Day};

/// Campus a professor's already-placed block sits on, looked up by the
/// continuity/campus-transition rules without re-querying the room.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockInfo {
    pub campus: String,
    pub block: Block,
}

/// One confirmed placement, kept for the professor's own history and for
/// the final report persisted by the schedule store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignationRecord {
    pub subject_code: String,
    pub subject_name: String,
    pub room_code: String,
    pub day: Day,
    pub block: Block,
    pub satisfaction: u8,
    pub instance_key: String,
    pub activity: Activity,
}

/// A professor agent's working state across one negotiation run. `order`
/// sequences professors through the turn controller; `instance_key`
/// disambiguates parallel sections of the same subject code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfessorState {
    pub name: String,
    pub preferred_campus: String,
    pub order: u32,
    pub contract: ContractType,
    #[serde(default)]
    pub assignments: Vec<AssignationRecord>,
    /// Blocks already placed this day for this professor, independent of
    /// instance key; feeds continuity/gap/campus-transition evaluation.
    #[serde(default)]
    pub blocks_by_day: HashMap<Day, Vec<BlockInfo>>,
    /// Blocks already placed this day for one (subject, instance) pair;
    /// feeds the per-day-per-instance block cap.
    #[serde(default)]
    pub blocks_by_day_instance: HashMap<(Day, String), Vec<Block>>,
}

impl ProfessorState {
    pub fn new(name: impl Into<String>, preferred_campus: impl Into<String>, order: u32, contract: ContractType) -> Self {
        Self {
            name: name.into(),
            preferred_campus: preferred_campus.into(),
            order,
            contract,
            assignments: Vec::new(),
            blocks_by_day: HashMap::new(),
            blocks_by_day_instance: HashMap::new(),
        }
    }

    pub fn record_assignment(&mut self, record: AssignationRecord, room_campus: String) {
        self.blocks_by_day.entry(record.day).or_default().push(BlockInfo { campus: room_campus, block: record.block });
        self.blocks_by_day_instance.entry((record.day, record.instance_key.clone())).or_default().push(record.block);
        self.assignments.push(record);
    }

    pub fn blocks_on(&self, day: Day) -> &[BlockInfo] {
        self.blocks_by_day.get(&day).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn instance_blocks_on(&self, day: Day, instance_key: &str) -> usize {
        self.blocks_by_day_instance.get(&(day, instance_key.to_string())).map(|v| v.len()).unwrap_or(0)
    }
}
