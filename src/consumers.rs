//! How the document store interprets the testing tunables.
//!
//! Every function reads its tunables through the session on each call; none
//! of them keep a copy between operations.

use super::*;

#[derive(ThisError, Clone, Debug, PartialEq, Eq)]
pub enum ConsumerError {
    #[error("cannot execute {operation} in a read-only transaction: the server is in recovery")]
    ReadOnlyRecovery { operation: String },
}

impl ConsumerError {
    pub fn read_only_recovery<T: ToString>(operation: T) -> Self {
        Self::ReadOnlyRecovery {
            operation: operation.to_string(),
        }
    }
}

pub type ConsumerResult<T> = Result<T, ConsumerError>;

/// Refuse a read-write operation while recovery is being simulated.
pub fn ensure_writes_allowed(session: &GucSession, operation: &str) -> ConsumerResult<()> {
    if session.get(&SIMULATE_RECOVERY_STATE) {
        debug!(
            "session {}: refusing {} under simulated recovery",
            session.id(),
            operation
        );
        return Err(ConsumerError::read_only_recovery(operation));
    }
    Ok(())
}

/// The normal source of identifiers, standing in for a catalog sequence.
#[derive(Debug)]
pub struct IdSequence {
    next: AtomicI64,
}

impl IdSequence {
    pub fn new(start: i64) -> Self {
        Self {
            next: AtomicI64::new(start),
        }
    }

    pub fn next_value(&self) -> i64 {
        self.next.fetch_add(1, Ordering::AcqRel)
    }

    pub fn peek(&self) -> i64 {
        self.next.load(Ordering::Acquire)
    }
}

impl Default for IdSequence {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Allocate a collection id, honoring the session's id override.
pub fn allocate_collection_id(session: &GucSession, sequence: &IdSequence) -> GucResult<i64> {
    allocate_id(
        session,
        &NEXT_COLLECTION_ID,
        NEXT_COLLECTION_ID_UNSET,
        sequence,
    )
}

/// Allocate a collection index id, honoring the session's index id override.
pub fn allocate_collection_index_id(
    session: &GucSession,
    sequence: &IdSequence,
) -> GucResult<i64> {
    allocate_id(
        session,
        &NEXT_COLLECTION_INDEX_ID,
        NEXT_COLLECTION_INDEX_ID_UNSET,
        sequence,
    )
}

// An override hands out its own value and then advances by one, so the next
// allocation in the session continues from there. The advance goes through
// the tunable's bounds: once the override can no longer advance, allocation
// fails rather than hand out the same id twice.
fn allocate_id(
    session: &GucSession,
    setting: &GucSetting<i32>,
    unset: i32,
    sequence: &IdSequence,
) -> GucResult<i64> {
    let next = session.get(setting);
    if next == unset {
        return Ok(sequence.next_value());
    }
    let Some(following) = next.checked_add(1) else {
        return Err(override_exhausted(session, setting, next));
    };
    session.set(setting, following)?;
    Ok(next as i64)
}

fn override_exhausted(session: &GucSession, setting: &GucSetting<i32>, next: i32) -> GucError {
    let Some(name) = setting.name() else {
        return GucError::unrecognized_parameter("<unbound>");
    };
    let (min, max) = match session.registry().lookup(&name).map(|def| def.bounds()) {
        Ok(GucBounds::Int { min, max, .. }) => (min, max),
        _ => (i32::MIN, i32::MAX),
    };
    GucError::out_of_range(name, next as i64 + 1, min, max)
}

/// Hash a unique index key, unless the session forces a fixed keyhash.
pub fn unique_index_keyhash(session: &GucSession, key: &[u8]) -> i64 {
    let forced = session.get(&DEFAULT_UNIQUE_INDEX_KEYHASH_OVERRIDE_SETTING);
    if forced != DEFAULT_UNIQUE_INDEX_KEYHASH_OVERRIDE {
        return forced as i64;
    }
    let digest = blake3::hash(key);
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest.as_bytes()[..8]);
    i64::from_le_bytes(prefix)
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct IndexTermLimits {
    pub truncation_enabled: bool,
    pub limit: usize,
}

/// Resolve whether index terms are truncated, and at what size.
///
/// `truncation_enabled` and `default_limit` are what the index would use on
/// its own; the session may force truncation on and may override the limit.
pub fn index_term_limits(
    session: &GucSession,
    truncation_enabled: bool,
    default_limit: usize,
) -> IndexTermLimits {
    let forced = session.get(&FORCE_INDEX_TERM_TRUNCATION);
    let limit_override = session.get(&INDEX_TERM_LIMIT_OVERRIDE);
    let limit = if limit_override == DEFAULT_INDEX_TERM_LIMIT_OVERRIDE {
        default_limit
    } else {
        limit_override as usize
    };
    IndexTermLimits {
        truncation_enabled: truncation_enabled || forced,
        limit,
    }
}

/// Whether a worker's cursor page can take another document.
///
/// An empty page always takes one document so that a cursor makes progress
/// even when a single document exceeds the page size.
pub fn worker_page_has_room(
    session: &GucSession,
    page_bytes: usize,
    next_document_bytes: usize,
) -> bool {
    if page_bytes == 0 {
        return true;
    }
    let max = session.get(&MAX_WORKER_CURSOR_SIZE) as usize;
    page_bytes.saturating_add(next_document_bytes) <= max
}
