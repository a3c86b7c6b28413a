use anchor_lang::prelude::*;

use crate::{manager, CheckUpkeep, RequestDraw};

/// Read-only readiness probe for the automation service; the answer is returned as return data.
pub fn check_upkeep(ctx: Context<CheckUpkeep>) -> Result<bool> {
    let now = Clock::get()?.unix_timestamp;
    Ok(manager::check_upkeep(ctx.accounts.round.as_deref(), now))
}

pub fn request_draw(ctx: Context<RequestDraw>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    manager::request_draw(
        &ctx.accounts.lottery,
        &mut ctx.accounts.round,
        &mut ctx.accounts.broker,
        now,
    )?;

    Ok(())
}
