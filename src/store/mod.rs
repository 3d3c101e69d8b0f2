pub mod professor_store;
pub mod report;
pub mod room_store;
pub mod schedule_store;

pub use professor_store::{new_professor_store, ProfessorStore};
pub use report::{ProfessorAsignaturaReport, ProfessorReport, RoomAsignaturaReport, RoomReport};
pub use room_store::{new_room_store, RoomStore};
pub use schedule_store::ScheduleStore;
