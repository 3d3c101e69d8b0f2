use actix::prelude::*;

use super::Directory;
use crate::model::constants::DIRECTORY_TTL;

/// Periodically sweeps the Directory for stale registrations. A thin actor
/// wrapper around `Directory::evict_expired` so production runs get a
/// background sweep while tests can call the sweep directly.
pub struct DirectoryJanitor {
    directory: Directory,
}

impl DirectoryJanitor {
    pub fn new(directory: Directory) -> Self {
        Self { directory }
    }
}

impl Actor for DirectoryJanitor {
    type Context = Context<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        ctx.run_interval(DIRECTORY_TTL / 2, |act, _ctx| {
            act.directory.evict_expired(std::time::Instant::now());
        });
    }
}
