use std::time::Duration;

/// Enrollment below which a subject is considered meeting-room sized.
pub const MEETING_ROOM_THRESHOLD: u32 = 10;
/// Last usable block in a teaching day (blocks are 1-indexed).
pub const MAX_BLOCK: u8 = 9;
/// Number of teaching days per week.
pub const DAYS: u8 = 5;
/// Negotiation rounds a professor will retry a subject before giving up on it.
pub const MAX_RETRIES: u32 = 3;
/// Base collection-window timeout before any backoff is applied.
pub const BASE_TIMEOUT: Duration = Duration::from_secs(5);
/// Per-retry exponential backoff unit: `BASE_TIMEOUT + 2^retry * BACKOFF_OFFSET`.
pub const BACKOFF_OFFSET: Duration = Duration::from_secs(1);
/// Floor under the computed collection window, regardless of retry count.
pub const MIN_COLLECTION_WINDOW: Duration = Duration::from_millis(500);
/// How long a professor waits for INFORM after sending ACCEPT_PROPOSAL.
pub const COMMIT_TIMEOUT: Duration = Duration::from_secs(1);
/// Directory entry time-to-live before it is evicted by the janitor.
pub const DIRECTORY_TTL: Duration = Duration::from_secs(300);
/// Pending-update count at which a schedule store flushes to disk.
pub const STORE_FLUSH_THRESHOLD: usize = 20;
