use anchor_lang::prelude::*;

use crate::constants::{MAX_ENTRIES, MAX_ENTRIES_PER_PLAYER, STALE_REQUEST_TIMEOUT_SEC};
use crate::errors::LottoError;
use crate::events::{
    EntryAccepted, RoundClosedForDraw, RoundFinished, RoundReopened, RoundStarted,
    StaleRequestCancelled, WinningNumbersRevealed,
};
use crate::selector::{compute_payouts, derive_winning_numbers, match_entries};
use crate::state::{Entry, Lottery, RandomnessBroker, RandomnessRequest, Round, RoundState};
use crate::validator::validate_numbers;

/// Parameters an operator picks when starting a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundConfig {
    pub duration_sec: i64,
    pub fee_wei: u64,
    pub until_won: bool,
}

/// What a draw without winners does to the round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoWinnerOutcome {
    /// Back to `Live` with a fresh deadline; pot stays in the round.
    Reopen,
    /// `Finished` with no winners; pot moves to the lottery carry for the next start.
    Finish,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    Won { winner_count: u32 },
    Reopened { cycle: u32 },
    FinishedUnwon { carried_wei: u64 },
}

/// Single decision point for draws that produce no winner.
///
/// Rounds with `until_won` always reopen. Rounds without it reopen as well unless
/// the operator enabled `finish_unwon_rounds` on the lottery.
pub fn no_winner_outcome(until_won: bool, finish_unwon_rounds: bool) -> NoWinnerOutcome {
    if !until_won && finish_unwon_rounds {
        NoWinnerOutcome::Finish
    } else {
        NoWinnerOutcome::Reopen
    }
}

pub fn start_round(
    lottery: &mut Lottery,
    round: &mut Round,
    bump: u8,
    config: RoundConfig,
    now: i64,
) -> Result<u64> {
    require!(!lottery.paused, LottoError::Paused);
    require!(!lottery.round_in_progress, LottoError::RoundInProgress);
    require!(config.duration_sec > 0, LottoError::InvalidConfig);

    let ends_at = now
        .checked_add(config.duration_sec)
        .ok_or(LottoError::InvalidConfig)?;
    let round_id = lottery.next_round_id;
    let next_round_id = round_id.checked_add(1).ok_or(LottoError::MathOverflow)?;
    let pot_wei = lottery.carried_pot_wei;

    round.round_id = round_id;
    round.bump = bump;
    round.state = RoundState::Live;

    round.fee_wei = config.fee_wei;
    round.duration_sec = config.duration_sec;
    round.until_won = config.until_won;

    round.started_at = now;
    round.ends_at = ends_at;
    round.closed_at = 0;
    round.finished_at = 0;
    round.cycle = 0;

    round.pot_wei = pot_wei;
    round.entries.clear();
    round.drawn_numbers = None;
    round.outstanding_request_id = None;
    round.winners.clear();
    round.payouts.clear();

    lottery.carried_pot_wei = 0;
    lottery.current_round_id = round_id;
    lottery.next_round_id = next_round_id;
    lottery.round_in_progress = true;

    msg!("round {} live until {} (fee {}, pot {})", round_id, ends_at, config.fee_wei, pot_wei);
    emit!(RoundStarted {
        round_id,
        fee_wei: config.fee_wei,
        duration_sec: config.duration_sec,
        until_won: config.until_won,
        ends_at,
        pot_wei,
    });

    Ok(round_id)
}

pub fn enter(
    lottery: &Lottery,
    round: &mut Round,
    player: Pubkey,
    numbers: &[u8],
    payment: u64,
    now: i64,
) -> Result<()> {
    require!(!lottery.paused, LottoError::Paused);
    require!(round.is_open_at(now), LottoError::RoundNotLive);

    let numbers = validate_numbers(numbers)?;
    require!(payment >= round.fee_wei, LottoError::FeeTooLow);
    require!(round.entries.len() < MAX_ENTRIES, LottoError::RoundFull);
    let held = round.entries.iter().filter(|e| e.player == player).count();
    require!(held < MAX_ENTRIES_PER_PLAYER, LottoError::PlayerEntryLimit);

    let pot_wei = round
        .pot_wei
        .checked_add(payment)
        .ok_or(LottoError::MathOverflow)?;

    let entry_index = round.entries.len() as u32;
    round.entries.push(Entry {
        player,
        numbers,
        fee_paid: payment,
    });
    round.pot_wei = pot_wei;

    emit!(EntryAccepted {
        round_id: round.round_id,
        player,
        numbers,
        fee_paid: payment,
        entry_index,
        pot_wei,
    });

    Ok(())
}

/// Readiness: the round is live and its deadline has passed.
pub fn upkeep_needed(round: &Round, now: i64) -> bool {
    round.state == RoundState::Live && now >= round.ends_at
}

/// Readiness for the automation probe, which may run before any round exists.
pub fn check_upkeep(round: Option<&Round>, now: i64) -> bool {
    round.is_some_and(|r| upkeep_needed(r, now))
}

pub fn request_draw(
    lottery: &Lottery,
    round: &mut Round,
    broker: &mut RandomnessBroker,
    now: i64,
) -> Result<RandomnessRequest> {
    require!(!lottery.paused, LottoError::Paused);
    require!(upkeep_needed(round, now), LottoError::UpkeepNotNeeded);
    require!(
        round.outstanding_request_id.is_none(),
        LottoError::DuplicateRequest
    );

    let request = broker.request(round.round_id, now)?;

    round.state = RoundState::Staged;
    round.outstanding_request_id = Some(request.request_id);
    round.closed_at = now;

    msg!(
        "round {} closed for draw, request {} ({} entries)",
        round.round_id,
        request.request_id,
        round.entries.len()
    );
    emit!(RoundClosedForDraw {
        round_id: round.round_id,
        request_id: request.request_id,
        seed: request.seed,
        entry_count: round.entries.len() as u32,
    });

    Ok(request)
}

/// Settles the round's outstanding request with oracle entropy.
///
/// Nothing is written unless the request, the entropy and the payout split all check out.
pub fn resolve(
    lottery: &mut Lottery,
    round: &mut Round,
    broker: &mut RandomnessBroker,
    request_id: u64,
    entropy: &[u64],
    now: i64,
) -> Result<Resolution> {
    let request = broker.outstanding(request_id)?;
    require!(request.round_id == round.round_id, LottoError::RoundMismatch);
    require!(
        round.state == RoundState::Staged && round.outstanding_request_id == Some(request_id),
        LottoError::UnknownRequest
    );

    let numbers = derive_winning_numbers(entropy)?;
    let winners = match_entries(&round.entries, &numbers);
    let payouts = compute_payouts(&winners, round.pot_wei)?;

    let outcome = no_winner_outcome(round.until_won, lottery.finish_unwon_rounds);
    let carried_wei = if winners.is_empty() && outcome == NoWinnerOutcome::Finish {
        Some(
            lottery
                .carried_pot_wei
                .checked_add(round.pot_wei)
                .ok_or(LottoError::MathOverflow)?,
        )
    } else {
        None
    };
    let reopen_ends_at = now
        .checked_add(round.duration_sec)
        .ok_or(LottoError::MathOverflow)?;

    broker.mark_fulfilled(request_id)?;
    round.outstanding_request_id = None;
    round.drawn_numbers = Some(numbers);

    emit!(WinningNumbersRevealed {
        round_id: round.round_id,
        request_id,
        numbers,
    });

    if !winners.is_empty() {
        let winner_count = winners.len() as u32;
        round.winners = winners.iter().map(|e| e.player).collect();
        round.payouts = payouts;
        let pot_wei = round.pot_wei;
        finish(lottery, round, now, pot_wei, 0);

        msg!("round {} won by {} entries", round.round_id, winner_count);
        return Ok(Resolution::Won { winner_count });
    }

    match carried_wei {
        Some(carried) => {
            let moved = round.pot_wei;
            lottery.carried_pot_wei = carried;
            round.pot_wei = 0;
            finish(lottery, round, now, moved, moved);

            msg!("round {} finished without winners, {} carried", round.round_id, moved);
            Ok(Resolution::FinishedUnwon { carried_wei: moved })
        }
        None => {
            round.state = RoundState::Live;
            round.ends_at = reopen_ends_at;
            round.entries.clear();
            round.cycle = round.cycle.saturating_add(1);

            msg!("round {} reopened (cycle {})", round.round_id, round.cycle);
            emit!(RoundReopened {
                round_id: round.round_id,
                cycle: round.cycle,
                ends_at: round.ends_at,
                pot_wei: round.pot_wei,
            });
            Ok(Resolution::Reopened { cycle: round.cycle })
        }
    }
}

fn finish(lottery: &mut Lottery, round: &mut Round, now: i64, pot_wei: u64, carried_wei: u64) {
    round.state = RoundState::Finished;
    round.finished_at = now;
    lottery.round_in_progress = false;

    emit!(RoundFinished {
        round_id: round.round_id,
        winner_count: round.winners.len() as u32,
        pot_wei,
        carried_wei,
    });
}

/// Cancels an outstanding request the oracle never answered and puts the round
/// back to `Live`. Entries and pot stay; the deadline has already passed, so the
/// round is immediately ready for a new draw.
pub fn recover_stale_request(
    round: &mut Round,
    broker: &mut RandomnessBroker,
    now: i64,
) -> Result<RandomnessRequest> {
    require!(round.state == RoundState::Staged, LottoError::UnknownRequest);
    let request_id = round
        .outstanding_request_id
        .ok_or(LottoError::UnknownRequest)?;

    let request = broker.outstanding(request_id)?;
    require!(
        now >= request.requested_at.saturating_add(STALE_REQUEST_TIMEOUT_SEC),
        LottoError::RecoveryTooEarly
    );

    broker.cancel(request_id)?;
    round.outstanding_request_id = None;
    round.state = RoundState::Live;

    msg!("round {} request {} cancelled as stale", round.round_id, request_id);
    emit!(StaleRequestCancelled {
        round_id: round.round_id,
        request_id,
        requested_at: request.requested_at,
    });

    Ok(request)
}

/// Marks the player's payout as claimed and returns the amount owed.
pub fn claim_payout(round: &mut Round, player: &Pubkey) -> Result<u64> {
    require!(round.state == RoundState::Finished, LottoError::NotFinished);

    let payout = round
        .payouts
        .iter_mut()
        .find(|p| p.player == *player)
        .ok_or(LottoError::NotWinner)?;
    require!(!payout.claimed, LottoError::AlreadyClaimed);

    payout.claimed = true;
    Ok(payout.amount)
}
