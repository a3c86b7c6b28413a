use anchor_lang::prelude::*;
use anchor_lang::solana_program::sysvar::instructions::{
    load_current_index_checked, load_instruction_at_checked,
};

use crate::{
    errors::LottoError,
    manager,
    utils::{assert_oracle_attestation, expected_fulfillment_msg},
    FulfillRandomness,
};

#[cfg(feature = "mock-oracle")]
use crate::FulfillRandomnessMock;

// Tx layout must be: [ ed25519_verify(oracle, fulfillment msg), fulfill_randomness ]
pub fn fulfill_randomness(
    ctx: Context<FulfillRandomness>,
    request_id: u64,
    entropy: Vec<u64>,
) -> Result<()> {
    let lottery = &ctx.accounts.lottery;
    require!(lottery.oracle_pubkey != Pubkey::default(), LottoError::OracleNotSet);

    let request = ctx.accounts.broker.outstanding(request_id)?;

    // --- ed25519 introspection ---
    let ix_sys = ctx.accounts.instructions.to_account_info();
    let current_ix = load_current_index_checked(&ix_sys)? as usize;
    require!(current_ix >= 1, LottoError::MissingOrInvalidEd25519Ix);

    let ed_ix = load_instruction_at_checked(current_ix - 1, &ix_sys)
        .map_err(|_| error!(LottoError::MissingOrInvalidEd25519Ix))?;

    let expected = expected_fulfillment_msg(
        ctx.program_id,
        request.request_id,
        request.round_id,
        &request.seed,
        &entropy,
    );
    assert_oracle_attestation(&ed_ix, &lottery.oracle_pubkey, expected.as_slice())?;

    let now = Clock::get()?.unix_timestamp;
    let resolution = manager::resolve(
        &mut ctx.accounts.lottery,
        &mut ctx.accounts.round,
        &mut ctx.accounts.broker,
        request_id,
        &entropy,
        now,
    )?;

    msg!("request {} resolved: {:?}", request_id, resolution);
    Ok(())
}

/// Admin stands in for the oracle. Local testing only.
#[cfg(feature = "mock-oracle")]
pub fn fulfill_randomness_mock(
    ctx: Context<FulfillRandomnessMock>,
    request_id: u64,
    entropy: Vec<u64>,
) -> Result<()> {
    require_keys_eq!(
        ctx.accounts.lottery.admin,
        ctx.accounts.admin.key(),
        LottoError::Unauthorized
    );

    let now = Clock::get()?.unix_timestamp;
    manager::resolve(
        &mut ctx.accounts.lottery,
        &mut ctx.accounts.round,
        &mut ctx.accounts.broker,
        request_id,
        &entropy,
        now,
    )?;

    Ok(())
}
