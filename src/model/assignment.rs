use serde::{Deserialize, Serialize};

use super::day::{Block, Day};

/// A room's offer against one CFP block, before evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Proposal {
    pub room_code: String,
    pub campus: String,
    pub capacity: u32,
    pub day: Day,
    pub block: Block,
}

/// The evaluator's verdict on a `Proposal`. `score` is only meaningful when
/// `valid` is true; invalid proposals are discarded before ranking.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EvaluatedProposal {
    pub valid: bool,
    pub score: i64,
    pub satisfaction: u8,
}

/// A fully confirmed placement, the unit both schedule stores persist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    pub subject_code: String,
    pub subject_name: String,
    pub professor: String,
    pub room_code: String,
    pub day: Day,
    pub block: Block,
    pub satisfaction: u8,
    pub enrollment: u32,
}
