// Centralized Protocol Constants

// Entry shape
// ===========

/// Numbers every entry must carry, and the size of a drawn number set.
pub const REQUIRED_COUNT: usize = 6;

/// Smallest number a player may pick.
pub const MIN_NUMBER: u8 = 1;

/// Largest number a player may pick. Drawn numbers are mapped into the same range.
pub const MAX_NUMBER: u8 = 100;

// Account capacity
// ================

/// Maximum entries a round can hold before `enter` is refused.
/// Must match the `max_len` attributes on `Round`.
pub const MAX_ENTRIES: usize = 64;

/// Entries a single player may hold in one round cycle.
pub const MAX_ENTRIES_PER_PLAYER: usize = 8;

/// Maximum randomness requests the broker keeps track of (outstanding + recently settled).
/// Must match the `max_len` attribute on `RandomnessBroker`.
pub const MAX_TRACKED_REQUESTS: usize = 8;

/// Upper bound on entropy words accepted in a single fulfillment.
pub const MAX_ENTROPY_WORDS: usize = 16;

// Time Logic Constants
// ====================

/// Seconds an outstanding randomness request may stay unanswered before anyone
/// can cancel it and return the round to `Live`.
///
/// 3600 s = 1 hour. Oracle fulfillments normally land within a few slots.
pub const STALE_REQUEST_TIMEOUT_SEC: i64 = 3_600;

// Centralized Protocol Defaults
// =============================

/// Initial version for account structures.
pub const INITIAL_VERSION: u16 = 1;

/// First round id handed out by a fresh lottery.
pub const INITIAL_ROUND_ID: u64 = 1;

/// First randomness request id handed out by a fresh broker.
pub const INITIAL_REQUEST_ID: u64 = 1;
