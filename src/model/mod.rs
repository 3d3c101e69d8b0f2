pub mod activity;
pub mod assignment;
pub mod constants;
pub mod day;
pub mod professor_state;
pub mod room_state;
pub mod subject;

pub use activity::{Activity, ContractType};
pub use assignment::{Assignment, EvaluatedProposal, Proposal};
pub use day::{Block, Day};
pub use professor_state::{AssignationRecord, BlockInfo, ProfessorState};
pub use room_state::RoomState;
pub use subject::Subject;
