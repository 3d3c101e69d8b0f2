pub mod professor_fsm;
pub mod room_responder;
pub mod supervisor;

pub use professor_fsm::ProfessorFsm;
pub use room_responder::RoomResponder;
pub use supervisor::Supervisor;
