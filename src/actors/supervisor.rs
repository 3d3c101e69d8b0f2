use std::sync::Arc;

use actix::prelude::*;
use tokio::sync::Notify;

use crate::directory::Directory;
use crate::messaging::{Envelope, Ontology, Payload};
use crate::store::{ProfessorStore, RoomStore};

/// Watches for the turn controller's final `Cancel` (ontology
/// `system-control`) and, on receipt, flushes both schedule stores'
/// final reports and signals run completion.
pub struct Supervisor {
    professor_store: Arc<ProfessorStore>,
    room_store: Arc<RoomStore>,
    directory: Directory,
    done: Arc<Notify>,
}

impl Supervisor {
    pub fn new(professor_store: Arc<ProfessorStore>, room_store: Arc<RoomStore>, directory: Directory, done: Arc<Notify>) -> Self {
        Self { professor_store, room_store, directory, done }
    }
}

impl Actor for Supervisor {
    type Context = Context<Self>;
}

impl Handler<Envelope> for Supervisor {
    type Result = ();

    fn handle(&mut self, msg: Envelope, ctx: &mut Self::Context) {
        if !matches!(msg.ontology, Ontology::SystemControl) || !matches!(msg.payload, Payload::Cancel(_)) {
            log::debug!("supervisor: ignoring {:?}", msg.performative);
            return;
        }

        log::info!("supervisor: negotiation run finished, generating final reports");
        let professor_store = self.professor_store.clone();
        let room_store = self.room_store.clone();
        let done = self.done.clone();
        ctx.spawn(actix::fut::wrap_future(async move {
            if let Err(err) = professor_store.generate_final_report().await {
                log::error!("supervisor: failed to write professor report: {}", err);
            }
            if let Err(err) = room_store.generate_final_report().await {
                log::error!("supervisor: failed to write room report: {}", err);
            }
            done.notify_one();
        }));
        self.directory.deregister("supervisor");
    }
}
