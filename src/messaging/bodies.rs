use serde::{Deserialize, Serialize};

use crate::model::{Assignment, Day, Proposal, Subject};

/// Call for proposals: "who can host this subject's remaining blocks".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CfpBody {
    pub subject: Subject,
    pub instance_key: String,
}

/// A room's offered slots, after its own capacity/campus self-check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProposeBody {
    pub proposals: Vec<Proposal>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefuseBody {
    pub reason: String,
}

/// One slot a professor is asking a room to commit to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentRequest {
    pub subject_code: String,
    pub subject_name: String,
    pub professor: String,
    pub day: Day,
    pub block: crate::model::Block,
    pub satisfaction: u8,
    pub enrollment: u32,
}

/// Batch commit request sent to the winning room(s).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcceptProposalBody {
    pub requests: Vec<AssignmentRequest>,
}

/// Batch commit confirmation sent back to the requesting professor; only
/// the subset the room actually managed to commit (partial commits are
/// possible under concurrent contention).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InformBody {
    pub confirmed: Vec<Assignment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelBody {
    pub reason: String,
}

/// Turn-controller handoff: "it is now professor `next_order`'s turn".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartBody {
    pub next_order: u32,
}
