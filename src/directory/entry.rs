use std::collections::HashMap;
use std::time::Instant;

use actix::Recipient;

use crate::messaging::Envelope;

/// Registered address of an agent plus the metadata other agents search on.
#[derive(Clone)]
pub struct DirectoryEntry {
    pub id: String,
    pub address: Recipient<Envelope>,
    pub service_type: String,
    pub properties: HashMap<String, String>,
    pub order: Option<u32>,
    pub(super) last_heartbeat: Instant,
}

impl DirectoryEntry {
    pub fn matches(&self, service_type: &str, required: &HashMap<String, String>) -> bool {
        if self.service_type != service_type {
            return false;
        }
        required.iter().all(|(k, v)| self.properties.get(k).map(|actual| actual == v).unwrap_or(false))
    }
}
