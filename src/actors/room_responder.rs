use std::sync::Arc;

use actix::prelude::*;

use crate::messaging::{Envelope, InformBody, Payload, Performative, ProposeBody, RefuseBody};
use crate::model::assignment::Assignment;
use crate::model::constants::MAX_BLOCK;
use crate::model::day::Day;
use crate::model::{Proposal, RoomState};
use crate::quick_reject::quick_reject;
use crate::store::{report::RoomReport, RoomStore};

/// One room's agent: answers CFPs with its free slots and commits batch
/// assignment requests atomically, one message at a time (actix guarantees
/// a handler runs to completion before the next message is dequeued, so no
/// extra locking is needed around `room`).
pub struct RoomResponder {
    pub id: String,
    room: RoomState,
    history: Vec<Assignment>,
    store: Arc<RoomStore>,
}

impl RoomResponder {
    pub fn new(id: impl Into<String>, room: RoomState, store: Arc<RoomStore>) -> Self {
        Self { id: id.into(), room, history: Vec::new(), store }
    }
}

impl Actor for RoomResponder {
    type Context = Context<Self>;
}

impl Handler<Envelope> for RoomResponder {
    type Result = ();

    fn handle(&mut self, msg: Envelope, ctx: &mut Self::Context) {
        match &msg.payload {
            Payload::Cfp(body) => {
                if quick_reject(&body.subject, &self.room) {
                    log::debug!("room {}: rejecting cfp for {}", self.id, body.subject.code);
                    let reply = msg.reply(Performative::Refuse, self.id.clone(), ctx.address().recipient(), Payload::Refuse(RefuseBody { reason: "capacity/campus mismatch".into() }));
                    msg.sender.do_send(reply);
                    return;
                }

                let mut proposals = Vec::new();
                for day in Day::ALL {
                    for block in 1..=MAX_BLOCK {
                        if self.room.is_free(day, block) {
                            proposals.push(Proposal { room_code: self.room.code.clone(), campus: self.room.campus.clone(), capacity: self.room.capacity, day, block });
                        }
                    }
                }

                log::debug!("room {}: proposing {} slots for {}", self.id, proposals.len(), body.subject.code);
                let reply = msg.reply(Performative::Propose, self.id.clone(), ctx.address().recipient(), Payload::Propose(ProposeBody { proposals }));
                msg.sender.do_send(reply);
            }
            Payload::AcceptProposal(body) => {
                let mut confirmed = Vec::new();
                for request in &body.requests {
                    if self.room.reserve(request.day, request.block) {
                        let assignment = Assignment {
                            subject_code: request.subject_code.clone(),
                            subject_name: request.subject_name.clone(),
                            professor: request.professor.clone(),
                            room_code: self.room.code.clone(),
                            day: request.day,
                            block: request.block,
                            satisfaction: request.satisfaction,
                            enrollment: request.enrollment,
                        };
                        self.history.push(assignment.clone());
                        confirmed.push(assignment);
                    } else {
                        log::warn!("room {}: slot {:?}/{} already taken, dropping request", self.id, request.day, request.block);
                    }
                }

                log::info!("room {}: committed {}/{} requested slots", self.id, confirmed.len(), body.requests.len());
                tracing::info!(
                    target: "timetabling_negotiation::negotiation",
                    room = %self.id,
                    requested = body.requests.len(),
                    committed = confirmed.len(),
                    "room commit"
                );
                let reply = msg.reply(Performative::Inform, self.id.clone(), ctx.address().recipient(), Payload::Inform(InformBody { confirmed }));
                msg.sender.do_send(reply);

                let report = RoomReport::new(self.room.code.clone(), self.room.campus.clone(), &self.history);
                let should_flush = self.store.upsert(self.room.code.clone(), report);
                if should_flush {
                    let store = self.store.clone();
                    ctx.spawn(actix::fut::wrap_future(async move { store.force_flush().await }));
                }
            }
            _ => {
                log::debug!("room {}: ignoring {:?}", self.id, msg.performative);
            }
        }
    }
}
