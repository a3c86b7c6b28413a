use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Transfer};

use crate::{manager, Enter};

/// Player submits a number set and moves `payment` lamports into the vault.
pub fn enter(ctx: Context<Enter>, numbers: Vec<u8>, payment: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let player = ctx.accounts.player.key();

    manager::enter(
        &ctx.accounts.lottery,
        &mut ctx.accounts.round,
        player,
        &numbers,
        payment,
        now,
    )?;

    if payment > 0 {
        system_program::transfer(
            CpiContext::new(
                ctx.accounts.system_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.player.to_account_info(),
                    to: ctx.accounts.vault.to_account_info(),
                },
            ),
            payment,
        )?;
    }

    Ok(())
}
