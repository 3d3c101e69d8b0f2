use std::collections::HashMap;
use std::sync::Arc;

use actix::prelude::*;
use tokio::sync::Notify;

use crate::actors::{ProfessorFsm, RoomResponder, Supervisor};
use crate::directory::{Directory, DirectoryJanitor};
use crate::model::{ProfessorState, RoomState, Subject};
use crate::quick_reject::RoomQuickRejectFilter;
use crate::store::{new_professor_store, new_room_store, ProfessorStore, RoomStore};

/// One room to seed into a run, plus the directory id it registers under.
pub struct RoomSpec {
    pub id: String,
    pub room: RoomState,
}

/// One professor to seed into a run: its starting state and subject load.
pub struct ProfessorSpec {
    pub id: String,
    pub professor: ProfessorState,
    pub subjects: Vec<Subject>,
}

/// In-code fixture builder for one negotiation run. Plays the role JSON
/// scenario ingestion would play in a full deployment; deliberately not a
/// file-backed loader, since that ingestion pipeline is out of scope here.
pub struct Scenario {
    pub directory: Directory,
    pub professor_store: Arc<ProfessorStore>,
    pub room_store: Arc<RoomStore>,
    pub done: Arc<Notify>,
    pub supervisor: Addr<Supervisor>,
}

impl Scenario {
    pub fn spawn(output_dir: impl Into<std::path::PathBuf>, rooms: Vec<RoomSpec>, professors: Vec<ProfessorSpec>) -> Self {
        let output_dir = output_dir.into();
        let directory = Directory::new();
        let professor_store = Arc::new(new_professor_store(output_dir.clone()));
        let room_store = Arc::new(new_room_store(output_dir));
        let quick_reject = Arc::new(RoomQuickRejectFilter::new());
        let done = Arc::new(Notify::new());

        let supervisor = Supervisor::new(professor_store.clone(), room_store.clone(), directory.clone(), done.clone()).start();
        directory.register("supervisor", supervisor.clone().recipient(), "supervisor", HashMap::new(), None);
        DirectoryJanitor::new(directory.clone()).start();

        for spec in rooms {
            let campus = spec.room.campus.clone();
            let capacity = spec.room.capacity;
            let addr = RoomResponder::new(spec.id.clone(), spec.room, room_store.clone()).start();
            let mut properties = HashMap::new();
            properties.insert("campus".to_string(), campus);
            properties.insert("capacity".to_string(), capacity.to_string());
            directory.register(spec.id, addr.recipient(), "room", properties, None);
        }

        for spec in professors {
            ProfessorFsm::new(spec.id, spec.professor, spec.subjects, directory.clone(), professor_store.clone(), quick_reject.clone(), supervisor.clone().recipient()).start();
        }

        Self { directory, professor_store, room_store, done, supervisor }
    }
}
