use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use actix::prelude::*;
use uuid::Uuid;

use crate::directory::Directory;
use crate::evaluator::ConstraintEvaluator;
use crate::messaging::{AcceptProposalBody, AssignmentRequest, CancelBody, CfpBody, Envelope, InformBody, Ontology, Payload, Performative, Protocol, StartBody};
use crate::model::assignment::Proposal;
use crate::model::constants::{BACKOFF_OFFSET, BASE_TIMEOUT, COMMIT_TIMEOUT, MAX_RETRIES, MIN_COLLECTION_WINDOW};
use crate::model::professor_state::AssignationRecord;
use crate::model::{Day, ProfessorState, Subject};
use crate::quick_reject::RoomQuickRejectFilter;
use crate::store::report::ProfessorReport;
use crate::store::ProfessorStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NegotiationState {
    WaitingForTurn,
    Setup,
    Collecting,
    Evaluating,
    Finished,
}

/// One professor's negotiation agent. Walks SETUP -> COLLECTING ->
/// EVALUATING for each remaining block of each subject, then FINISHED,
/// folding in the turn controller: an `order > 0` professor starts in
/// `WaitingForTurn` and only proceeds once handed a matching `Start`.
pub struct ProfessorFsm {
    id: String,
    directory: Directory,
    store: Arc<ProfessorStore>,
    quick_reject: Arc<RoomQuickRejectFilter>,
    supervisor: Recipient<Envelope>,
    professor: ProfessorState,
    subjects: VecDeque<Subject>,
    /// Total subjects this professor started with, the report's "Solicitudes" count.
    total_subjects: u32,
    state: NegotiationState,
    instance_key: String,
    retry: u32,
    conversation_id: Uuid,
    expected_rooms: HashSet<String>,
    responded_rooms: HashSet<String>,
    room_addresses: HashMap<String, Recipient<Envelope>>,
    proposals_by_room: HashMap<String, Vec<Proposal>>,
    /// Rooms an ACCEPT_PROPOSAL batch was sent to this round, awaiting INFORM.
    pending_rooms: HashSet<String>,
    pending_campus: HashMap<String, String>,
    confirmed_this_round: u32,
    collecting_timeout: Option<SpawnHandle>,
    commit_timeout: Option<SpawnHandle>,
}

impl ProfessorFsm {
    pub fn new(id: impl Into<String>, professor: ProfessorState, subjects: Vec<Subject>, directory: Directory, store: Arc<ProfessorStore>, quick_reject: Arc<RoomQuickRejectFilter>, supervisor: Recipient<Envelope>) -> Self {
        Self {
            id: id.into(),
            directory,
            store,
            quick_reject,
            supervisor,
            professor,
            total_subjects: subjects.len() as u32,
            subjects: subjects.into(),
            state: NegotiationState::WaitingForTurn,
            instance_key: String::new(),
            retry: 0,
            conversation_id: Uuid::new_v4(),
            expected_rooms: HashSet::new(),
            responded_rooms: HashSet::new(),
            room_addresses: HashMap::new(),
            proposals_by_room: HashMap::new(),
            pending_rooms: HashSet::new(),
            pending_campus: HashMap::new(),
            confirmed_this_round: 0,
            collecting_timeout: None,
            commit_timeout: None,
        }
    }

    fn envelope(&self, ctx: &Context<Self>, performative: Performative, ontology: Ontology, payload: Payload) -> Envelope {
        Envelope {
            performative,
            protocol: Protocol::ContractNet,
            ontology,
            conversation_id: self.conversation_id,
            correlation_id: Uuid::new_v4(),
            from: self.id.clone(),
            sender: ctx.address().recipient(),
            payload,
        }
    }

    fn run_setup(&mut self, ctx: &mut Context<Self>) {
        loop {
            match self.subjects.front() {
                Some(subject) if subject.hours_required == 0 => {
                    self.subjects.pop_front();
                }
                Some(_) => break,
                None => {
                    self.finish(ctx);
                    return;
                }
            }
        }

        let subject = self.subjects.front().cloned().expect("checked above");
        self.instance_key = format!("{}#0", subject.code);
        self.conversation_id = Uuid::new_v4();
        self.responded_rooms.clear();
        self.proposals_by_room.clear();
        self.room_addresses.clear();
        self.expected_rooms.clear();

        let candidates = self.directory.search("room", &HashMap::new());
        let shortlist: Vec<_> = candidates
            .into_iter()
            .filter(|entry| {
                let campus = entry.properties.get("campus").cloned().unwrap_or_default();
                let capacity: u32 = entry.properties.get("capacity").and_then(|s| s.parse().ok()).unwrap_or(0);
                !self.quick_reject.can_quick_reject_raw(&subject, &entry.id, &campus, capacity)
            })
            .collect();

        if shortlist.is_empty() {
            log::warn!("professor {}: no candidate rooms for {}, retrying round", self.id, subject.code);
            self.handle_round_failure(ctx);
            return;
        }

        for entry in &shortlist {
            self.expected_rooms.insert(entry.id.clone());
            self.room_addresses.insert(entry.id.clone(), entry.address.clone());
            let cfp = self.envelope(ctx, Performative::Cfp, Ontology::RoomNegotiation, Payload::Cfp(CfpBody { subject: subject.clone(), instance_key: self.instance_key.clone() }));
            entry.address.do_send(cfp);
        }

        log::info!("professor {}: broadcast cfp for {} to {} rooms", self.id, subject.code, shortlist.len());
        self.state = NegotiationState::Collecting;
        let window = (BASE_TIMEOUT + BACKOFF_OFFSET * 2u32.pow(self.retry)).max(MIN_COLLECTION_WINDOW);
        self.collecting_timeout = Some(ctx.run_later(window, |act, ctx| act.on_collecting_timeout(ctx)));
    }

    fn maybe_finish_collecting(&mut self, ctx: &mut Context<Self>) {
        if self.responded_rooms.len() >= self.expected_rooms.len() {
            if let Some(handle) = self.collecting_timeout.take() {
                ctx.cancel_future(handle);
            }
            self.evaluate_and_commit(ctx);
        }
    }

    fn on_collecting_timeout(&mut self, ctx: &mut Context<Self>) {
        if self.state == NegotiationState::Collecting {
            self.collecting_timeout = None;
            self.evaluate_and_commit(ctx);
        }
    }

    /// Sorts every valid proposal across all responding rooms, then walks
    /// the list greedily: a candidate is folded into the round's batch if
    /// its (day, block) cell is still free and the subject's still-unplaced
    /// block count has not been reached. Validity is re-checked against a
    /// `scratch` clone of the professor's state as picks accumulate, so
    /// later candidates in the same round see the day-cap/continuity/
    /// campus-transition effects of earlier ones. One `AcceptProposal` batch
    /// is sent per room that won at least one cell.
    fn evaluate_and_commit(&mut self, ctx: &mut Context<Self>) {
        self.state = NegotiationState::Evaluating;
        let subject = self.subjects.front().cloned().expect("setup always leaves a subject queued");
        let target = subject.hours_required;

        let mut candidates: Vec<(String, Proposal, i64)> = Vec::new();
        for (room_id, proposals) in &self.proposals_by_room {
            for proposal in proposals {
                let evaluated = ConstraintEvaluator::evaluate(proposal, &subject, &self.professor, &self.instance_key, target);
                if evaluated.valid {
                    candidates.push((room_id.clone(), proposal.clone(), evaluated.score));
                }
            }
        }

        if candidates.is_empty() {
            log::info!("professor {}: no valid proposal for {} this round", self.id, subject.code);
            self.handle_round_failure(ctx);
            return;
        }

        candidates.sort_by(|a, b| b.2.cmp(&a.2).then_with(|| a.1.room_code.cmp(&b.1.room_code)));

        let mut scratch = self.professor.clone();
        let mut chosen_slots: HashSet<(Day, u8)> = HashSet::new();
        let mut batch_by_room: HashMap<String, Vec<AssignmentRequest>> = HashMap::new();
        let mut campus_by_room: HashMap<String, String> = HashMap::new();
        let mut committed = 0u32;

        for (room_id, proposal, _) in &candidates {
            if committed >= target {
                break;
            }
            if chosen_slots.contains(&(proposal.day, proposal.block)) {
                continue;
            }
            let remaining = target - committed;
            let evaluated = ConstraintEvaluator::evaluate(proposal, &subject, &scratch, &self.instance_key, remaining);
            if !evaluated.valid {
                continue;
            }

            let record = AssignationRecord {
                subject_code: subject.code.clone(),
                subject_name: subject.name.clone(),
                room_code: proposal.room_code.clone(),
                day: proposal.day,
                block: proposal.block,
                satisfaction: evaluated.satisfaction,
                instance_key: self.instance_key.clone(),
                activity: subject.activity,
            };
            scratch.record_assignment(record, proposal.campus.clone());
            chosen_slots.insert((proposal.day, proposal.block));
            committed += 1;

            let request = AssignmentRequest {
                subject_code: subject.code.clone(),
                subject_name: subject.name.clone(),
                professor: self.professor.name.clone(),
                day: proposal.day,
                block: proposal.block,
                satisfaction: evaluated.satisfaction,
                enrollment: subject.enrollment,
            };
            batch_by_room.entry(room_id.clone()).or_default().push(request);
            campus_by_room.insert(room_id.clone(), proposal.campus.clone());
        }

        if batch_by_room.is_empty() {
            log::info!("professor {}: every candidate proposal for {} failed re-check this round", self.id, subject.code);
            self.handle_round_failure(ctx);
            return;
        }

        log::debug!("professor {}: committing {} block(s) of {} across {} room(s) this round", self.id, committed, subject.code, batch_by_room.len());
        self.pending_rooms = batch_by_room.keys().cloned().collect();
        self.pending_campus = campus_by_room;
        self.confirmed_this_round = 0;

        for (room_id, requests) in batch_by_room {
            let envelope = self.envelope(ctx, Performative::AcceptProposal, Ontology::RoomNegotiation, Payload::AcceptProposal(AcceptProposalBody { requests }));
            if let Some(address) = self.room_addresses.get(&room_id) {
                address.do_send(envelope);
            }
        }
        self.commit_timeout = Some(ctx.run_later(COMMIT_TIMEOUT, |act, ctx| act.on_commit_timeout(ctx)));
    }

    fn on_commit_timeout(&mut self, ctx: &mut Context<Self>) {
        if !self.pending_rooms.is_empty() {
            log::warn!("professor {}: commit timed out waiting for inform from {} room(s)", self.id, self.pending_rooms.len());
            self.pending_rooms.clear();
            self.pending_campus.clear();
            self.finish_round(ctx);
        }
    }

    fn on_inform(&mut self, from_room: String, body: InformBody, ctx: &mut Context<Self>) {
        self.pending_rooms.remove(&from_room);
        let room_campus = self.pending_campus.remove(&from_room).unwrap_or_default();

        for assignment in body.confirmed {
            let record = AssignationRecord {
                subject_code: assignment.subject_code,
                subject_name: assignment.subject_name,
                room_code: assignment.room_code,
                day: assignment.day,
                block: assignment.block,
                satisfaction: assignment.satisfaction,
                instance_key: self.instance_key.clone(),
                activity: self.subjects.front().map(|s| s.activity).unwrap_or(crate::model::Activity::Teoria),
            };
            self.professor.record_assignment(record, room_campus.clone());
            if let Some(subject) = self.subjects.front_mut() {
                subject.hours_required = subject.hours_required.saturating_sub(1);
            }
            self.confirmed_this_round += 1;
        }

        if self.pending_rooms.is_empty() {
            if let Some(handle) = self.commit_timeout.take() {
                ctx.cancel_future(handle);
            }
            self.finish_round(ctx);
        }
    }

    /// Called once every room this round's batch went to has either
    /// confirmed or the commit timeout fired. Persists whatever landed,
    /// then either continues (SETUP picks up the next subject or
    /// rebroadcasts CFPs for the remainder) or retries/abandons the subject.
    fn finish_round(&mut self, ctx: &mut Context<Self>) {
        if self.confirmed_this_round > 0 {
            self.retry = 0;

            let report = ProfessorReport::new(self.professor.name.clone(), &self.professor.assignments, self.total_subjects);
            let should_flush = self.store.upsert(self.professor.name.clone(), report);
            if should_flush {
                let store = self.store.clone();
                ctx.spawn(actix::fut::wrap_future(async move { store.force_flush().await }));
            }

            self.state = NegotiationState::Setup;
            self.run_setup(ctx);
        } else {
            log::warn!("professor {}: no room committed any proposal this round", self.id);
            self.handle_round_failure(ctx);
        }
    }

    fn handle_round_failure(&mut self, ctx: &mut Context<Self>) {
        self.retry += 1;
        if self.retry >= MAX_RETRIES {
            log::warn!("professor {}: abandoning {} after {} retries with no placement", self.id, self.subjects.front().map(|s| s.code.as_str()).unwrap_or("?"), self.retry);
            self.subjects.pop_front();
            self.retry = 0;
            self.state = NegotiationState::Setup;
            self.run_setup(ctx);
        } else {
            self.state = NegotiationState::Setup;
            let delay = BACKOFF_OFFSET * 2u32.pow(self.retry);
            ctx.run_later(delay, |act, ctx| act.run_setup(ctx));
        }
    }

    fn finish(&mut self, ctx: &mut Context<Self>) {
        self.state = NegotiationState::Finished;
        log::info!("professor {}: finished negotiation", self.id);
        tracing::info!(
            target: "timetabling_negotiation::negotiation",
            professor = %self.id,
            placed = self.professor.assignments.len(),
            "professor finished"
        );

        match self.directory.find_by_order("professor", self.professor.order + 1) {
            Some(next) => {
                let start = self.envelope(ctx, Performative::Request, Ontology::TurnControl, Payload::Start(StartBody { next_order: self.professor.order + 1 }));
                next.address.do_send(start);
            }
            None => {
                let mut cancel = self.envelope(ctx, Performative::Cancel, Ontology::SystemControl, Payload::Cancel(CancelBody { reason: "last professor finished".into() }));
                cancel.protocol = Protocol::SystemControl;
                self.supervisor.do_send(cancel);
            }
        }

        let store = self.store.clone();
        ctx.spawn(actix::fut::wrap_future(async move { store.force_flush().await }));
        self.directory.deregister(&self.id);
        ctx.stop();
    }
}

impl Actor for ProfessorFsm {
    type Context = Context<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        self.directory.register(self.id.clone(), ctx.address().recipient(), "professor", HashMap::new(), Some(self.professor.order));
        if self.professor.order == 0 {
            self.state = NegotiationState::Setup;
            self.run_setup(ctx);
        } else {
            self.state = NegotiationState::WaitingForTurn;
        }
    }
}

impl Handler<Envelope> for ProfessorFsm {
    type Result = ();

    fn handle(&mut self, msg: Envelope, ctx: &mut Self::Context) {
        match (&self.state, &msg.payload) {
            (NegotiationState::WaitingForTurn, Payload::Start(body)) if body.next_order == self.professor.order => {
                self.state = NegotiationState::Setup;
                self.run_setup(ctx);
            }
            (NegotiationState::Collecting, Payload::Propose(body)) if msg.conversation_id == self.conversation_id && self.expected_rooms.contains(&msg.from) => {
                self.proposals_by_room.insert(msg.from.clone(), body.proposals.clone());
                self.responded_rooms.insert(msg.from.clone());
                self.maybe_finish_collecting(ctx);
            }
            (NegotiationState::Collecting, Payload::Refuse(_)) if msg.conversation_id == self.conversation_id && self.expected_rooms.contains(&msg.from) => {
                self.responded_rooms.insert(msg.from.clone());
                self.maybe_finish_collecting(ctx);
            }
            (NegotiationState::Evaluating, Payload::Inform(body)) if self.pending_rooms.contains(&msg.from) && msg.conversation_id == self.conversation_id => {
                let from_room = msg.from.clone();
                let body = body.clone();
                self.on_inform(from_room, body, ctx);
            }
            _ => {
                log::debug!("professor {}: ignoring {:?} in state {:?}", self.id, msg.performative, self.state);
            }
        }
    }
}
