use std::time::Duration;

use timetabling_negotiation::model::{Activity, ContractType, ProfessorState, RoomState, Subject};
use timetabling_negotiation::scenario::{ProfessorSpec, RoomSpec, Scenario};

fn tempdir() -> std::path::PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("timetabling-e2e-test-{}", uuid::Uuid::new_v4()));
    path
}

/// Single professor, single two-hour subject, one fitting room: the
/// happy-path run should negotiate both blocks and the supervisor should
/// signal completion once the last professor finishes.
#[actix_rt::test]
async fn single_subject_negotiation_completes_and_writes_reports() {
    let output_dir = tempdir();

    let rooms = vec![
        RoomSpec { id: "room-a".into(), room: RoomState::new("KAU-101", "Kaufmann", 35) },
        RoomSpec { id: "room-b".into(), room: RoomState::new("KAU-102", "Kaufmann", 8) },
    ];

    let professors = vec![ProfessorSpec {
        id: "prof-0".into(),
        professor: ProfessorState::new("Ada Lovelace", "Kaufmann", 0, ContractType::FullTime),
        subjects: vec![Subject { code: "CC101".into(), name: "Algorithms".into(), campus: "Kaufmann".into(), enrollment: 30, level: 1, activity: Activity::Teoria, hours_required: 2 }],
    }];

    let scenario = Scenario::spawn(output_dir.clone(), rooms, professors);

    let outcome = actix_rt::time::timeout(Duration::from_secs(10), scenario.done.notified()).await;
    assert!(outcome.is_ok(), "negotiation run did not complete within timeout");

    // give the spawned report-writing future a moment to finish after notify
    actix_rt::time::sleep(Duration::from_millis(50)).await;

    let professor_report = output_dir.join("Horarios_asignados.json");
    let room_report = output_dir.join("Horarios_salas.json");
    assert!(professor_report.exists(), "expected professor report at {:?}", professor_report);
    assert!(room_report.exists(), "expected room report at {:?}", room_report);

    let professor_json = std::fs::read_to_string(&professor_report).expect("read professor report");
    let parsed: Vec<serde_json::Value> = serde_json::from_str(&professor_json).expect("valid json");
    let ada = parsed.iter().find(|entry| entry["Nombre"] == "Ada Lovelace").expect("Ada Lovelace should have a schedule entry");
    let asignaturas = ada["Asignaturas"].as_array().expect("Asignaturas should be an array");
    assert_eq!(asignaturas.len(), 2, "both hours of CC101 should have been negotiated");
    assert_eq!(ada["AsignaturasCompletadas"], 2);
}
