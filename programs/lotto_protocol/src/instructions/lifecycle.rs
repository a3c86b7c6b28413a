use anchor_lang::prelude::*;
use anchor_lang::solana_program::{program::invoke_signed, system_instruction};

use crate::events::PayoutClaimed;
use crate::{errors::LottoError, manager, ClaimPayout, RecoverStaleRequest, VAULT_SEED};

/// Anyone may unstick a round whose randomness request went unanswered past the timeout.
pub fn recover_stale_request(ctx: Context<RecoverStaleRequest>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    manager::recover_stale_request(&mut ctx.accounts.round, &mut ctx.accounts.broker, now)?;
    Ok(())
}

pub fn claim_payout(ctx: Context<ClaimPayout>, round_id: u64) -> Result<()> {
    let round = &mut ctx.accounts.round;
    require!(round.round_id == round_id, LottoError::RoundMismatch);

    let winner = ctx.accounts.winner.key();
    let amount = manager::claim_payout(round, &winner)?;

    let vault_lamports = ctx.accounts.vault.to_account_info().lamports();
    require!(vault_lamports >= amount, LottoError::InsufficientVaultFunds);

    if amount > 0 {
        let ix = system_instruction::transfer(&ctx.accounts.vault.key(), &winner, amount);
        let signer_seeds: &[&[u8]] = &[VAULT_SEED, &[ctx.accounts.lottery.vault_bump]];

        invoke_signed(
            &ix,
            &[
                ctx.accounts.vault.to_account_info(),
                ctx.accounts.winner.to_account_info(),
                ctx.accounts.system_program.to_account_info(),
            ],
            &[signer_seeds],
        )?;
    }

    msg!("round {} paid {} to {}", round_id, amount, winner);
    emit!(PayoutClaimed {
        round_id,
        player: winner,
        amount,
    });

    Ok(())
}
