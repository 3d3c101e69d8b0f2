use std::sync::{Arc, Mutex};

use actix::prelude::*;
use uuid::Uuid;

use timetabling_negotiation::actors::RoomResponder;
use timetabling_negotiation::messaging::{AcceptProposalBody, AssignmentRequest, CfpBody, Envelope, Ontology, Payload, Performative, Protocol};
use timetabling_negotiation::model::{Activity, Day, RoomState, Subject};
use timetabling_negotiation::store::room_store::new_room_store;

/// Captures whatever `Envelope` it receives so tests can assert on replies
/// without standing up a full professor FSM.
struct Probe {
    received: Arc<Mutex<Vec<Envelope>>>,
}

impl Actor for Probe {
    type Context = Context<Self>;
}

impl Handler<Envelope> for Probe {
    type Result = ();
    fn handle(&mut self, msg: Envelope, _ctx: &mut Self::Context) {
        self.received.lock().expect("probe lock poisoned").push(msg);
    }
}

fn subject(campus: &str, enrollment: u32) -> Subject {
    Subject { code: "CC101".into(), name: "Algorithms".into(), campus: campus.into(), enrollment, level: 1, activity: Activity::Teoria, hours_required: 2 }
}

fn tempdir() -> std::path::PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("timetabling-room-responder-test-{}", Uuid::new_v4()));
    path
}

fn cfp_envelope(sender: Recipient<Envelope>, subject: Subject) -> Envelope {
    Envelope {
        performative: Performative::Cfp,
        protocol: Protocol::ContractNet,
        ontology: Ontology::RoomNegotiation,
        conversation_id: Uuid::new_v4(),
        correlation_id: Uuid::new_v4(),
        from: "prof-0".into(),
        sender,
        payload: Payload::Cfp(CfpBody { subject, instance_key: "CC101#0".into() }),
    }
}

#[actix_rt::test]
async fn cfp_on_matching_room_yields_propose_with_free_slots() {
    let store = Arc::new(new_room_store(tempdir()));
    let room_addr = RoomResponder::new("room-a", RoomState::new("KAU-101", "Kaufmann", 35), store).start();

    let received = Arc::new(Mutex::new(Vec::new()));
    let probe = Probe { received: received.clone() }.start();

    room_addr.do_send(cfp_envelope(probe.clone().recipient(), subject("Kaufmann", 30)));
    actix_rt::time::sleep(std::time::Duration::from_millis(20)).await;

    let replies = received.lock().expect("probe lock poisoned");
    assert_eq!(replies.len(), 1);
    match &replies[0].payload {
        Payload::Propose(body) => assert!(!body.proposals.is_empty()),
        other => panic!("expected Propose, got {:?}", other),
    }
}

#[actix_rt::test]
async fn cfp_on_undersized_room_is_quick_rejected() {
    let store = Arc::new(new_room_store(tempdir()));
    let room_addr = RoomResponder::new("room-a", RoomState::new("KAU-101", "Kaufmann", 10), store).start();

    let received = Arc::new(Mutex::new(Vec::new()));
    let probe = Probe { received: received.clone() }.start();

    room_addr.do_send(cfp_envelope(probe.clone().recipient(), subject("Kaufmann", 60)));
    actix_rt::time::sleep(std::time::Duration::from_millis(20)).await;

    let replies = received.lock().expect("probe lock poisoned");
    assert_eq!(replies.len(), 1);
    assert!(matches!(replies[0].payload, Payload::Refuse(_)));
}

#[actix_rt::test]
async fn accept_proposal_confirms_and_second_request_for_same_slot_is_dropped() {
    let store = Arc::new(new_room_store(tempdir()));
    let room_addr = RoomResponder::new("room-a", RoomState::new("KAU-101", "Kaufmann", 35), store).start();

    let received = Arc::new(Mutex::new(Vec::new()));
    let probe = Probe { received: received.clone() }.start();

    let request = AssignmentRequest { subject_code: "CC101".into(), subject_name: "Algorithms".into(), professor: "Ada Lovelace".into(), day: Day::Monday, block: 1, satisfaction: 9, enrollment: 30 };
    let accept = Envelope {
        performative: Performative::AcceptProposal,
        protocol: Protocol::ContractNet,
        ontology: Ontology::RoomNegotiation,
        conversation_id: Uuid::new_v4(),
        correlation_id: Uuid::new_v4(),
        from: "prof-0".into(),
        sender: probe.clone().recipient(),
        payload: Payload::AcceptProposal(AcceptProposalBody { requests: vec![request.clone()] }),
    };

    room_addr.do_send(accept.clone());
    room_addr.do_send(accept);
    actix_rt::time::sleep(std::time::Duration::from_millis(20)).await;

    let replies = received.lock().expect("probe lock poisoned");
    assert_eq!(replies.len(), 2);

    let confirmed_counts: Vec<usize> = replies
        .iter()
        .map(|env| match &env.payload {
            Payload::Inform(body) => body.confirmed.len(),
            other => panic!("expected Inform, got {:?}", other),
        })
        .collect();

    assert_eq!(confirmed_counts, vec![1, 0]);
}
