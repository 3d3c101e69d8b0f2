use clap::Parser;
use rand::Rng;
use timetabling_negotiation::config::Config;
use timetabling_negotiation::logger;
use timetabling_negotiation::model::{Activity, ContractType, ProfessorState, RoomState, Subject};
use timetabling_negotiation::scenario::{ProfessorSpec, RoomSpec, Scenario};

/// Picks a plausible enrollment for the demo subject, mirroring how the
/// original scenario generator samples class sizes rather than hardcoding
/// one fixture value.
fn demo_enrollment() -> u32 {
    rand::rng().random_range(25..=40)
}

#[actix_rt::main]
async fn main() {
    logger::init();
    let config = Config::parse();
    log::info!("starting demo negotiation run, output_dir={}", config.output_dir);

    let rooms = vec![
        RoomSpec { id: "room-a".into(), room: RoomState::new("KAU-101", "Kaufmann", 35) },
        RoomSpec { id: "room-b".into(), room: RoomState::new("KAU-102", "Kaufmann", 8) },
    ];

    let professors = vec![ProfessorSpec {
        id: "prof-0".into(),
        professor: ProfessorState::new("Ada Lovelace", "Kaufmann", 0, ContractType::FullTime),
        subjects: vec![Subject { code: "CC101".into(), name: "Algorithms".into(), campus: "Kaufmann".into(), enrollment: demo_enrollment(), level: 1, activity: Activity::Teoria, hours_required: 2 }],
    }];

    let scenario = Scenario::spawn(config.output_dir.clone(), rooms, professors);
    scenario.done.notified().await;
    log::info!("negotiation run complete, reports written to {}", config.output_dir);
}
