use anchor_lang::prelude::*;

/// Emitted when an operator opens a new round
#[event]
pub struct RoundStarted {
    pub round_id: u64,
    pub fee_wei: u64,
    pub duration_sec: i64,
    pub until_won: bool,
    pub ends_at: i64,
    /// Pot carried in from an earlier round
    pub pot_wei: u64,
}

/// Emitted for every accepted entry
#[event]
pub struct EntryAccepted {
    pub round_id: u64,
    pub player: Pubkey,
    pub numbers: [u8; 6],
    pub fee_paid: u64,
    /// Position of the entry in arrival order
    pub entry_index: u32,
    pub pot_wei: u64,
}

/// Emitted when a round stops taking entries and a draw is requested
#[event]
pub struct RoundClosedForDraw {
    pub round_id: u64,
    pub request_id: u64,
    pub seed: [u8; 32],
    pub entry_count: u32,
}

#[event]
pub struct WinningNumbersRevealed {
    pub round_id: u64,
    pub request_id: u64,
    pub numbers: [u8; 6],
}

#[event]
pub struct RoundFinished {
    pub round_id: u64,
    pub winner_count: u32,
    pub pot_wei: u64,
    /// Non-zero only when the round finished without winners
    pub carried_wei: u64,
}

#[event]
pub struct RoundReopened {
    pub round_id: u64,
    pub cycle: u32,
    pub ends_at: i64,
    pub pot_wei: u64,
}

#[event]
pub struct StaleRequestCancelled {
    pub round_id: u64,
    pub request_id: u64,
    pub requested_at: i64,
}

#[event]
pub struct PayoutClaimed {
    pub round_id: u64,
    pub player: Pubkey,
    pub amount: u64,
}
