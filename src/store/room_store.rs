use super::report::RoomReport;
use super::schedule_store::ScheduleStore;

/// Persists `Horarios_salas.json`: an array of each room's confirmed-
/// booking report, upserted by room code.
pub type RoomStore = ScheduleStore<RoomReport>;

pub fn new_room_store(output_dir: impl Into<std::path::PathBuf>) -> RoomStore {
    let mut path = output_dir.into();
    path.push("Horarios_salas.json");
    ScheduleStore::new(path)
}
