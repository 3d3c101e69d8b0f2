mod entry;
mod janitor;

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};
use std::time::Instant;

use actix::Recipient;

pub use entry::DirectoryEntry;
pub use janitor::DirectoryJanitor;

use crate::messaging::Envelope;
use crate::model::constants::DIRECTORY_TTL;

struct Inner {
    agents: HashMap<String, DirectoryEntry>,
    by_service: HashMap<String, HashSet<String>>,
}

/// Shared service registry every agent registers with on startup and
/// queries to find negotiation partners. Registration is exclusive-write,
/// multi-reader, per the concurrency model: one `RwLock` guards both the
/// entry map and its secondary service-type index so they never drift
/// apart under concurrent register/deregister calls.
#[derive(Clone)]
pub struct Directory {
    inner: Arc<RwLock<Inner>>,
}

impl Default for Directory {
    fn default() -> Self {
        Self::new()
    }
}

impl Directory {
    pub fn new() -> Self {
        Self { inner: Arc::new(RwLock::new(Inner { agents: HashMap::new(), by_service: HashMap::new() })) }
    }

    pub fn register(&self, id: impl Into<String>, address: Recipient<Envelope>, service_type: impl Into<String>, properties: HashMap<String, String>, order: Option<u32>) {
        let id = id.into();
        let service_type = service_type.into();
        let mut inner = self.inner.write().expect("directory lock poisoned");
        inner.by_service.entry(service_type.clone()).or_default().insert(id.clone());
        inner.agents.insert(id.clone(), DirectoryEntry { id, address, service_type, properties, order, last_heartbeat: Instant::now() });
        log::debug!("directory: registered {} entries now", inner.agents.len());
    }

    pub fn deregister(&self, id: &str) {
        let mut inner = self.inner.write().expect("directory lock poisoned");
        if let Some(entry) = inner.agents.remove(id) {
            if let Some(set) = inner.by_service.get_mut(&entry.service_type) {
                set.remove(id);
            }
            log::info!("directory: deregistered {}", id);
        }
    }

    pub fn heartbeat(&self, id: &str) -> bool {
        let mut inner = self.inner.write().expect("directory lock poisoned");
        match inner.agents.get_mut(id) {
            Some(entry) => {
                entry.last_heartbeat = Instant::now();
                true
            }
            None => false,
        }
    }

    pub fn search(&self, service_type: &str, required: &HashMap<String, String>) -> Vec<DirectoryEntry> {
        let inner = self.inner.read().expect("directory lock poisoned");
        let Some(candidates) = inner.by_service.get(service_type) else {
            return Vec::new();
        };
        candidates
            .iter()
            .filter_map(|id| inner.agents.get(id))
            .filter(|entry| entry.matches(service_type, required))
            .cloned()
            .collect()
    }

    pub fn find_by_order(&self, service_type: &str, order: u32) -> Option<DirectoryEntry> {
        let inner = self.inner.read().expect("directory lock poisoned");
        inner.by_service.get(service_type)?.iter().filter_map(|id| inner.agents.get(id)).find(|e| e.order == Some(order)).cloned()
    }

    /// Evicts entries whose last heartbeat is older than `DIRECTORY_TTL` as
    /// of `now`. Exposed directly (rather than only via the janitor actor)
    /// so tests can drive eviction deterministically.
    pub fn evict_expired(&self, now: Instant) -> Vec<String> {
        let mut inner = self.inner.write().expect("directory lock poisoned");
        let expired: Vec<String> = inner
            .agents
            .values()
            .filter(|entry| now.duration_since(entry.last_heartbeat) > DIRECTORY_TTL)
            .map(|entry| entry.id.clone())
            .collect();
        for id in &expired {
            if let Some(entry) = inner.agents.remove(id) {
                if let Some(set) = inner.by_service.get_mut(&entry.service_type) {
                    set.remove(id);
                }
            }
        }
        if !expired.is_empty() {
            log::warn!("directory: evicted {} stale entries", expired.len());
        }
        expired
    }

    pub fn len(&self) -> usize {
        self.inner.read().expect("directory lock poisoned").agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
