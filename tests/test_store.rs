use timetabling_negotiation::model::{Assignment, Day};
use timetabling_negotiation::store::report::RoomReport;
use timetabling_negotiation::store::room_store::new_room_store;

fn assignment(room_code: &str, block: u8) -> Assignment {
    Assignment { subject_code: "CC101".into(), subject_name: "Algorithms".into(), professor: "Ada Lovelace".into(), room_code: room_code.into(), day: Day::Monday, block, satisfaction: 8, enrollment: 30 }
}

fn report(code: &str, block: u8) -> RoomReport {
    RoomReport::new(code, "Kaufmann", &[assignment(code, block)])
}

#[actix_rt::test]
async fn upsert_below_threshold_does_not_request_flush() {
    let dir = tempdir();
    let store = new_room_store(dir.path());
    let requested = store.upsert("KAU-101", report("KAU-101", 1));
    assert!(!requested);
    assert_eq!(store.snapshot_all().len(), 1);
}

#[actix_rt::test]
async fn generate_final_report_reflects_all_committed_keys_even_after_flush_threshold() {
    let dir = tempdir();
    let store = new_room_store(dir.path());

    // Drive past the flush threshold so the pending counter resets to zero,
    // then upsert one more key. The committed snapshot must still include
    // every key written so far, proving the final report does not depend on
    // the (now-reset) pending counter the way the ported bug would have.
    let mut saw_flush_request = false;
    for i in 0..50 {
        let room_code = format!("ROOM-{i}");
        if store.upsert(room_code.clone(), report(&room_code, 1)) {
            saw_flush_request = true;
        }
    }
    assert!(saw_flush_request, "expected at least one flush request while driving 50 upserts");

    store.upsert("KAU-999", report("KAU-999", 3));

    store.generate_final_report().await.expect("final report should write successfully");

    let path = dir.path().join("Horarios_salas.json");
    let contents = std::fs::read_to_string(&path).expect("report file should exist");
    let parsed: Vec<serde_json::Value> = serde_json::from_str(&contents).expect("valid json");

    assert!(parsed.iter().any(|entry| entry["Codigo"] == "KAU-999"));
    assert_eq!(parsed.len(), 51);
}

#[actix_rt::test]
async fn force_flush_writes_current_snapshot_to_disk() {
    let dir = tempdir();
    let store = new_room_store(dir.path());
    store.upsert("KAU-101", report("KAU-101", 1));
    store.force_flush().await;

    let path = dir.path().join("Horarios_salas.json");
    let contents = std::fs::read_to_string(&path).expect("flush should have written the file");
    let parsed: Vec<serde_json::Value> = serde_json::from_str(&contents).expect("valid json");
    assert_eq!(parsed.len(), 1);
}

fn tempdir() -> tempfile_like::TempDir {
    tempfile_like::TempDir::new()
}

/// Minimal self-contained temp-directory helper so the test suite does not
/// need to pull in an extra dependency just for this.
mod tempfile_like {
    use std::path::{Path, PathBuf};

    pub struct TempDir(PathBuf);

    impl TempDir {
        pub fn new() -> Self {
            let mut path = std::env::temp_dir();
            let unique = format!("timetabling-store-test-{}-{}", std::process::id(), ADDR.fetch_add(1, std::sync::atomic::Ordering::Relaxed));
            path.push(unique);
            std::fs::create_dir_all(&path).expect("create temp dir");
            Self(path)
        }

        pub fn path(&self) -> &Path {
            &self.0
        }
    }

    static ADDR: std::sync::atomic::AtomicUsize = std::sync::atomic::AtomicUsize::new(0);

    impl Drop for TempDir {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.0);
        }
    }
}
