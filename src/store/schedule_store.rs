use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Mutex, RwLock};
use std::time::Duration;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::constants::STORE_FLUSH_THRESHOLD;

const FLUSH_RETRY_ATTEMPTS: u32 = 3;
const FLUSH_RETRY_BASE_DELAY_MS: u64 = 100;

/// Buffered, write-coalescing schedule persistence, generic over the key
/// (professor name or room code) and the per-key snapshot type.
///
/// `committed` always reflects the full current state and is what both
/// `force_flush` and `generate_final_report` serialize; a separate
/// `pending_since_flush` counter only gates *when* a flush happens. The two
/// are deliberately decoupled so a final report can never under-report
/// entries a threshold-triggered flush already wrote out and cleared.
pub struct ScheduleStore<V> {
    committed: RwLock<HashMap<String, V>>,
    pending_since_flush: Mutex<usize>,
    flush_lock: Mutex<()>,
    path: PathBuf,
}

impl<V> ScheduleStore<V>
where
    V: Clone + Serialize + Send + Sync + 'static,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { committed: RwLock::new(HashMap::new()), pending_since_flush: Mutex::new(0), flush_lock: Mutex::new(()), path: path.into() }
    }

    /// Replaces the snapshot for `key` and bumps the flush counter. Returns
    /// `true` if the write threshold was reached and a flush should be
    /// scheduled by the caller.
    pub fn upsert(&self, key: impl Into<String>, snapshot: V) -> bool {
        {
            let mut committed = self.committed.write().expect("store lock poisoned");
            committed.insert(key.into(), snapshot);
        }
        let mut pending = self.pending_since_flush.lock().expect("store lock poisoned");
        *pending += 1;
        if *pending >= STORE_FLUSH_THRESHOLD {
            *pending = 0;
            true
        } else {
            false
        }
    }

    pub fn snapshot_all(&self) -> HashMap<String, V> {
        self.committed.read().expect("store lock poisoned").clone()
    }

    /// Writes the full committed state to disk, retrying with linear
    /// backoff on I/O failure. A persistent failure is logged and does not
    /// propagate: the in-memory `committed` map remains authoritative.
    pub async fn force_flush(&self) {
        let _writer = self.flush_lock.lock().expect("store lock poisoned");
        let data = self.snapshot_all();
        for attempt in 1..=FLUSH_RETRY_ATTEMPTS {
            match self.write_to_disk(&data) {
                Ok(()) => {
                    log::info!("schedule store: flushed {} entries to {}", data.len(), self.path.display());
                    return;
                }
                Err(err) => {
                    log::warn!("schedule store: flush attempt {} failed: {}", attempt, err);
                    if attempt < FLUSH_RETRY_ATTEMPTS {
                        tokio::time::sleep(Duration::from_millis(FLUSH_RETRY_BASE_DELAY_MS * attempt as u64)).await;
                    }
                }
            }
        }
        log::error!("schedule store: giving up on flush to {} after {} attempts", self.path.display(), FLUSH_RETRY_ATTEMPTS);
    }

    /// Final report generation: always serializes the full committed state,
    /// never the pending-since-last-flush count.
    pub async fn generate_final_report(&self) -> Result<()> {
        let data = self.snapshot_all();
        self.write_to_disk(&data)
    }

    /// Serializes as a JSON array of records, matching the persisted file
    /// shapes: the map key (professor name / room code) only orders the
    /// buffer, it is never part of the on-disk format.
    fn write_to_disk(&self, data: &HashMap<String, V>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(Error::IoError)?;
        }
        let file = std::fs::File::create(&self.path).map_err(Error::IoError)?;
        let records: Vec<&V> = data.values().collect();
        serde_json::to_writer_pretty(file, &records).map_err(Error::DeserializationError)
    }
}
