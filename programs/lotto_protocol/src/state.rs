use anchor_lang::prelude::*;

use crate::errors::LottoError;

#[account]
#[derive(InitSpace)]
pub struct Lottery {
    pub admin: Pubkey,
    pub bump: u8,

    // oracle pubkey allowed to fulfill draws via ed25519 introspection
    pub oracle_pubkey: Pubkey,

    // System-owned PDA vault (holds every pot, no data)
    pub vault: Pubkey,
    pub vault_bump: u8,

    pub paused: bool,

    /// When set, a round configured with `until_won == false` finishes without
    /// winners instead of reopening. See `manager::no_winner_outcome`.
    pub finish_unwon_rounds: bool,

    pub next_round_id: u64,
    pub current_round_id: u64,
    pub round_in_progress: bool,

    /// Pot left behind by a round that finished without winners; seeds the next start.
    pub carried_pot_wei: u64,

    pub version: u16,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub enum RoundState {
    /// Closed for entries, waiting on the oracle.
    Staged,
    /// Accepting entries until `ends_at`.
    Live,
    /// Resolved; winners and payouts are fixed.
    Finished,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub struct Entry {
    pub player: Pubkey,
    // NOTE: length must match REQUIRED_COUNT
    pub numbers: [u8; 6],
    pub fee_paid: u64,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub struct Payout {
    pub player: Pubkey,
    pub amount: u64,
    pub claimed: bool,
}

#[account]
#[derive(InitSpace)]
pub struct Round {
    pub round_id: u64,
    pub bump: u8,
    pub state: RoundState,

    // configuration, fixed for the lifetime of the round
    pub fee_wei: u64,
    pub duration_sec: i64,
    pub until_won: bool,

    pub started_at: i64,
    pub ends_at: i64,
    pub closed_at: i64,
    pub finished_at: i64,

    /// Times the round reopened after a draw without winners.
    pub cycle: u32,

    pub pot_wei: u64,

    // NOTE: max_len must match MAX_ENTRIES
    #[max_len(64)]
    pub entries: Vec<Entry>,

    pub drawn_numbers: Option<[u8; 6]>,
    pub outstanding_request_id: Option<u64>,

    #[max_len(64)]
    pub winners: Vec<Pubkey>,

    #[max_len(64)]
    pub payouts: Vec<Payout>,
}

impl Round {
    pub fn is_open_at(&self, now: i64) -> bool {
        self.state == RoundState::Live && now < self.ends_at
    }

    /// Players behind the winning entries, in entry order. Only meaningful once finished.
    pub fn finished_winners(&self) -> Result<&[Pubkey]> {
        require!(self.state == RoundState::Finished, LottoError::NotFinished);
        Ok(&self.winners)
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub struct RandomnessRequest {
    pub request_id: u64,
    pub round_id: u64,
    /// Pre-seed the oracle must sign over together with its entropy.
    pub seed: [u8; 32],
    pub requested_at: i64,
    pub fulfilled: bool,
}

#[account]
#[derive(InitSpace)]
pub struct RandomnessBroker {
    pub bump: u8,
    pub next_request_id: u64,

    /// Outstanding and recently settled requests, oldest first.
    /// NOTE: max_len must match MAX_TRACKED_REQUESTS
    #[max_len(8)]
    pub requests: Vec<RandomnessRequest>,

    pub fulfilled_count: u64,
    pub version: u16,
}
