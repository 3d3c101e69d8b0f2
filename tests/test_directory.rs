use std::collections::HashMap;
use std::time::{Duration, Instant};

use actix::prelude::*;
use timetabling_negotiation::directory::Directory;
use timetabling_negotiation::messaging::Envelope;

struct Sink;
impl Actor for Sink {
    type Context = Context<Self>;
}
impl Handler<Envelope> for Sink {
    type Result = ();
    fn handle(&mut self, _msg: Envelope, _ctx: &mut Self::Context) {}
}

#[actix_rt::test]
async fn register_then_search_finds_matching_service() {
    let directory = Directory::new();
    let addr = Sink.start();

    let mut props = HashMap::new();
    props.insert("campus".to_string(), "Kaufmann".to_string());
    directory.register("room-1", addr.recipient(), "room", props, None);

    let mut required = HashMap::new();
    required.insert("campus".to_string(), "Kaufmann".to_string());
    let found = directory.search("room", &required);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, "room-1");

    let mut wrong = HashMap::new();
    wrong.insert("campus".to_string(), "Playa Brava".to_string());
    assert!(directory.search("room", &wrong).is_empty());
}

#[actix_rt::test]
async fn deregister_removes_entry() {
    let directory = Directory::new();
    let addr = Sink.start();
    directory.register("room-1", addr.recipient(), "room", HashMap::new(), None);
    assert_eq!(directory.len(), 1);
    directory.deregister("room-1");
    assert!(directory.is_empty());
}

#[actix_rt::test]
async fn heartbeat_resets_ttl_eviction() {
    let directory = Directory::new();
    let addr = Sink.start();
    directory.register("room-1", addr.recipient(), "room", HashMap::new(), None);

    let far_future = Instant::now() + Duration::from_secs(10_000);
    let evicted = directory.evict_expired(far_future);
    assert_eq!(evicted, vec!["room-1".to_string()]);
    assert!(directory.is_empty());
}

#[actix_rt::test]
async fn find_by_order_matches_only_that_order() {
    let directory = Directory::new();
    let addr = Sink.start();
    directory.register("prof-0", addr.clone().recipient(), "professor", HashMap::new(), Some(0));
    directory.register("prof-1", addr.recipient(), "professor", HashMap::new(), Some(1));

    let found = directory.find_by_order("professor", 1).expect("professor 1 registered");
    assert_eq!(found.id, "prof-1");
    assert!(directory.find_by_order("professor", 2).is_none());
}
