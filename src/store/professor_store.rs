use super::report::ProfessorReport;
use super::schedule_store::ScheduleStore;

/// Persists `Horarios_asignados.json`: an array of each professor's
/// confirmed-block report, upserted by professor name.
pub type ProfessorStore = ScheduleStore<ProfessorReport>;

pub fn new_professor_store(output_dir: impl Into<std::path::PathBuf>) -> ProfessorStore {
    let mut path = output_dir.into();
    path.push("Horarios_asignados.json");
    ScheduleStore::new(path)
}
