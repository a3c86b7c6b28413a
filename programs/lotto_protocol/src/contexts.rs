// programs/lotto_protocol/src/contexts.rs

use anchor_lang::prelude::*;

use crate::state::{Lottery, RandomnessBroker, Round};

#[derive(Accounts)]
pub struct InitializeLottery<'info> {
    #[account(
        init,
        payer = admin,
        space = 8 + Lottery::INIT_SPACE,
        seeds = [crate::LOTTERY_SEED],
        bump
    )]
    pub lottery: Account<'info, Lottery>,

    #[account(
        init,
        payer = admin,
        space = 8 + RandomnessBroker::INIT_SPACE,
        seeds = [crate::BROKER_SEED],
        bump
    )]
    pub broker: Account<'info, RandomnessBroker>,

    /// CHECK: system-owned vault PDA, holds lamports, no data
    #[account(
        init,
        payer = admin,
        space = 0,
        owner = anchor_lang::solana_program::system_program::ID,
        seeds = [crate::VAULT_SEED],
        bump
    )]
    pub vault: UncheckedAccount<'info>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct SetOraclePubkey<'info> {
    #[account(
        mut,
        seeds = [crate::LOTTERY_SEED],
        bump = lottery.bump
    )]
    pub lottery: Account<'info, Lottery>,

    pub admin: Signer<'info>,
}

#[derive(Accounts)]
pub struct SetPause<'info> {
    #[account(
        mut,
        seeds = [crate::LOTTERY_SEED],
        bump = lottery.bump
    )]
    pub lottery: Account<'info, Lottery>,

    pub admin: Signer<'info>,
}

#[derive(Accounts)]
pub struct SetNoWinnerPolicy<'info> {
    #[account(
        mut,
        seeds = [crate::LOTTERY_SEED],
        bump = lottery.bump
    )]
    pub lottery: Account<'info, Lottery>,

    pub admin: Signer<'info>,
}

#[derive(Accounts)]
pub struct StartRound<'info> {
    #[account(
        mut,
        seeds = [crate::LOTTERY_SEED],
        bump = lottery.bump
    )]
    pub lottery: Account<'info, Lottery>,

    #[account(
        init,
        payer = admin,
        space = 8 + Round::INIT_SPACE,
        seeds = [crate::ROUND_SEED, lottery.next_round_id.to_le_bytes().as_ref()],
        bump
    )]
    pub round: Account<'info, Round>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct Enter<'info> {
    #[account(
        seeds = [crate::LOTTERY_SEED],
        bump = lottery.bump
    )]
    pub lottery: Account<'info, Lottery>,

    #[account(
        mut,
        seeds = [crate::ROUND_SEED, lottery.current_round_id.to_le_bytes().as_ref()],
        bump = round.bump
    )]
    pub round: Account<'info, Round>,

    /// CHECK: System-owned PDA used only as a lamport vault. Address is enforced by seeds/bump.
    #[account(
        mut,
        seeds = [crate::VAULT_SEED],
        bump = lottery.vault_bump,
        address = lottery.vault
    )]
    pub vault: UncheckedAccount<'info>,

    #[account(mut)]
    pub player: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct CheckUpkeep<'info> {
    #[account(
        seeds = [crate::LOTTERY_SEED],
        bump = lottery.bump
    )]
    pub lottery: Account<'info, Lottery>,

    /// Absent until the first round has been started.
    #[account(
        seeds = [crate::ROUND_SEED, lottery.current_round_id.to_le_bytes().as_ref()],
        bump = round.bump
    )]
    pub round: Option<Account<'info, Round>>,
}

#[derive(Accounts)]
pub struct RequestDraw<'info> {
    #[account(
        seeds = [crate::LOTTERY_SEED],
        bump = lottery.bump
    )]
    pub lottery: Account<'info, Lottery>,

    #[account(
        mut,
        seeds = [crate::ROUND_SEED, lottery.current_round_id.to_le_bytes().as_ref()],
        bump = round.bump
    )]
    pub round: Account<'info, Round>,

    #[account(
        mut,
        seeds = [crate::BROKER_SEED],
        bump = broker.bump
    )]
    pub broker: Account<'info, RandomnessBroker>,

    /// Automation caller; any signer may trigger a due draw.
    pub caller: Signer<'info>,
}

#[derive(Accounts)]
pub struct FulfillRandomness<'info> {
    #[account(
        mut,
        seeds = [crate::LOTTERY_SEED],
        bump = lottery.bump
    )]
    pub lottery: Account<'info, Lottery>,

    #[account(
        mut,
        seeds = [crate::ROUND_SEED, lottery.current_round_id.to_le_bytes().as_ref()],
        bump = round.bump
    )]
    pub round: Account<'info, Round>,

    #[account(
        mut,
        seeds = [crate::BROKER_SEED],
        bump = broker.bump
    )]
    pub broker: Account<'info, RandomnessBroker>,

    /// Relayer submitting the oracle's attested entropy.
    pub relayer: Signer<'info>,

    /// CHECK: instruction sysvar (for ed25519 introspection). Address enforced.
    #[account(address = anchor_lang::solana_program::sysvar::instructions::ID)]
    pub instructions: UncheckedAccount<'info>,
}

#[derive(Accounts)]
pub struct FulfillRandomnessMock<'info> {
    #[account(
        mut,
        seeds = [crate::LOTTERY_SEED],
        bump = lottery.bump
    )]
    pub lottery: Account<'info, Lottery>,

    #[account(
        mut,
        seeds = [crate::ROUND_SEED, lottery.current_round_id.to_le_bytes().as_ref()],
        bump = round.bump
    )]
    pub round: Account<'info, Round>,

    #[account(
        mut,
        seeds = [crate::BROKER_SEED],
        bump = broker.bump
    )]
    pub broker: Account<'info, RandomnessBroker>,

    pub admin: Signer<'info>,
}

#[derive(Accounts)]
pub struct RecoverStaleRequest<'info> {
    #[account(
        seeds = [crate::LOTTERY_SEED],
        bump = lottery.bump
    )]
    pub lottery: Account<'info, Lottery>,

    #[account(
        mut,
        seeds = [crate::ROUND_SEED, lottery.current_round_id.to_le_bytes().as_ref()],
        bump = round.bump
    )]
    pub round: Account<'info, Round>,

    #[account(
        mut,
        seeds = [crate::BROKER_SEED],
        bump = broker.bump
    )]
    pub broker: Account<'info, RandomnessBroker>,

    pub caller: Signer<'info>,
}

#[derive(Accounts)]
#[instruction(round_id: u64)]
pub struct ClaimPayout<'info> {
    #[account(
        seeds = [crate::LOTTERY_SEED],
        bump = lottery.bump
    )]
    pub lottery: Account<'info, Lottery>,

    #[account(
        mut,
        seeds = [crate::ROUND_SEED, round_id.to_le_bytes().as_ref()],
        bump = round.bump
    )]
    pub round: Account<'info, Round>,

    /// CHECK: System-owned PDA used only as a lamport vault. Address is enforced by seeds/bump.
    #[account(
        mut,
        seeds = [crate::VAULT_SEED],
        bump = lottery.vault_bump,
        address = lottery.vault
    )]
    pub vault: UncheckedAccount<'info>,

    #[account(mut)]
    pub winner: Signer<'info>,

    pub system_program: Program<'info, System>,
}
