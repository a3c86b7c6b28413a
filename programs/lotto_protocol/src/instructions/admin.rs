use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::LottoError;
use crate::manager::{self, RoundConfig};
use crate::{InitializeLottery, SetNoWinnerPolicy, SetOraclePubkey, SetPause, StartRound};

pub fn initialize_lottery(ctx: Context<InitializeLottery>, oracle_pubkey: Pubkey) -> Result<()> {
    let lottery = &mut ctx.accounts.lottery;
    lottery.admin = ctx.accounts.admin.key();
    lottery.bump = ctx.bumps.lottery;

    // Pubkey::default() means "no oracle yet"; fulfillments fail with OracleNotSet
    lottery.oracle_pubkey = oracle_pubkey;

    lottery.vault = ctx.accounts.vault.key();
    lottery.vault_bump = ctx.bumps.vault;

    lottery.paused = false;
    lottery.finish_unwon_rounds = false;

    lottery.next_round_id = INITIAL_ROUND_ID;
    lottery.current_round_id = 0;
    lottery.round_in_progress = false;
    lottery.carried_pot_wei = 0;

    lottery.version = INITIAL_VERSION;

    let broker = &mut ctx.accounts.broker;
    broker.bump = ctx.bumps.broker;
    broker.next_request_id = INITIAL_REQUEST_ID;
    broker.requests = Vec::new();
    broker.fulfilled_count = 0;
    broker.version = INITIAL_VERSION;

    msg!("lottery initialized, admin {}", lottery.admin);
    Ok(())
}

pub fn set_oracle_pubkey(ctx: Context<SetOraclePubkey>, oracle_pubkey: Pubkey) -> Result<()> {
    let lottery = &mut ctx.accounts.lottery;
    require_keys_eq!(lottery.admin, ctx.accounts.admin.key(), LottoError::Unauthorized);

    lottery.oracle_pubkey = oracle_pubkey;
    Ok(())
}

pub fn set_pause(ctx: Context<SetPause>, paused: bool) -> Result<()> {
    let lottery = &mut ctx.accounts.lottery;
    require_keys_eq!(lottery.admin, ctx.accounts.admin.key(), LottoError::Unauthorized);
    lottery.paused = paused;
    Ok(())
}

pub fn set_no_winner_policy(ctx: Context<SetNoWinnerPolicy>, finish_unwon_rounds: bool) -> Result<()> {
    let lottery = &mut ctx.accounts.lottery;
    require_keys_eq!(lottery.admin, ctx.accounts.admin.key(), LottoError::Unauthorized);
    lottery.finish_unwon_rounds = finish_unwon_rounds;
    Ok(())
}

pub fn start_round(
    ctx: Context<StartRound>,
    duration_sec: i64,
    fee_wei: u64,
    until_won: bool,
) -> Result<()> {
    let lottery = &mut ctx.accounts.lottery;
    require_keys_eq!(lottery.admin, ctx.accounts.admin.key(), LottoError::Unauthorized);

    let now = Clock::get()?.unix_timestamp;
    let config = RoundConfig {
        duration_sec,
        fee_wei,
        until_won,
    };

    manager::start_round(lottery, &mut ctx.accounts.round, ctx.bumps.round, config, now)?;
    Ok(())
}
