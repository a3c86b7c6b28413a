use anchor_lang::prelude::*;

pub mod broker;
pub mod client;
pub mod constants;
pub mod contexts;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod manager;
pub mod selector;
pub mod state;
pub mod utils;
pub mod validator;

pub use constants::*;
pub use contexts::*;
pub use errors::*;
pub use events::*;
pub use instructions::*;
pub use state::*;
pub use utils::*;

#[cfg(not(feature = "no-entrypoint"))]
use solana_security_txt::security_txt;

#[cfg(not(feature = "no-entrypoint"))]
security_txt! {
    // Required fields
    name: "Lotto Protocol",
    project_url: "https://github.com/lotto-protocol/lotto-protocol",
    contacts: "link:https://github.com/lotto-protocol/lotto-protocol/issues",
    policy: "https://github.com/lotto-protocol/lotto-protocol/blob/main/SECURITY.md",

    // Optional fields
    preferred_languages: "en",
    source_code: "https://github.com/lotto-protocol/lotto-protocol"
}

declare_id!("6CHJ3K4SVTxDdbUDDzxbpCdNrF1oHpbDj6LJhqvZbmKW");

#[program]
pub mod lotto_protocol {
    use super::*;
    use crate::instructions::{admin, lifecycle, oracle, play, upkeep};

    pub fn initialize_lottery(ctx: Context<InitializeLottery>, oracle_pubkey: Pubkey) -> Result<()> {
        admin::initialize_lottery(ctx, oracle_pubkey)
    }

    pub fn set_oracle_pubkey(ctx: Context<SetOraclePubkey>, oracle_pubkey: Pubkey) -> Result<()> {
        admin::set_oracle_pubkey(ctx, oracle_pubkey)
    }

    pub fn set_pause(ctx: Context<SetPause>, paused: bool) -> Result<()> {
        admin::set_pause(ctx, paused)
    }

    pub fn set_no_winner_policy(
        ctx: Context<SetNoWinnerPolicy>,
        finish_unwon_rounds: bool,
    ) -> Result<()> {
        admin::set_no_winner_policy(ctx, finish_unwon_rounds)
    }

    // round lifecycle
    pub fn start_round(
        ctx: Context<StartRound>,
        duration_sec: i64,
        fee_wei: u64,
        until_won: bool,
    ) -> Result<()> {
        admin::start_round(ctx, duration_sec, fee_wei, until_won)
    }

    pub fn enter(ctx: Context<Enter>, numbers: Vec<u8>, payment: u64) -> Result<()> {
        play::enter(ctx, numbers, payment)
    }

    pub fn check_upkeep(ctx: Context<CheckUpkeep>) -> Result<bool> {
        upkeep::check_upkeep(ctx)
    }

    pub fn request_draw(ctx: Context<RequestDraw>) -> Result<()> {
        upkeep::request_draw(ctx)
    }

    pub fn fulfill_randomness(
        ctx: Context<FulfillRandomness>,
        request_id: u64,
        entropy: Vec<u64>,
    ) -> Result<()> {
        oracle::fulfill_randomness(ctx, request_id, entropy)
    }

    #[cfg(feature = "mock-oracle")]
    pub fn fulfill_randomness_mock(
        ctx: Context<FulfillRandomnessMock>,
        request_id: u64,
        entropy: Vec<u64>,
    ) -> Result<()> {
        oracle::fulfill_randomness_mock(ctx, request_id, entropy)
    }

    pub fn recover_stale_request(ctx: Context<RecoverStaleRequest>) -> Result<()> {
        lifecycle::recover_stale_request(ctx)
    }

    pub fn claim_payout(ctx: Context<ClaimPayout>, round_id: u64) -> Result<()> {
        lifecycle::claim_payout(ctx, round_id)
    }
}
