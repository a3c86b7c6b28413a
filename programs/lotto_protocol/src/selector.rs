use anchor_lang::prelude::*;

use crate::constants::{MAX_ENTROPY_WORDS, MAX_NUMBER, MIN_NUMBER, REQUIRED_COUNT};
use crate::errors::LottoError;
use crate::state::{Entry, Payout};

/// Maps the first `REQUIRED_COUNT` entropy words into `[MIN_NUMBER, MAX_NUMBER]`.
pub fn derive_winning_numbers(entropy: &[u64]) -> Result<[u8; REQUIRED_COUNT]> {
    require!(
        (REQUIRED_COUNT..=MAX_ENTROPY_WORDS).contains(&entropy.len()),
        LottoError::InvalidEntropy
    );

    let span = u64::from(MAX_NUMBER - MIN_NUMBER) + 1;
    let mut numbers = [0u8; REQUIRED_COUNT];
    for (slot, word) in numbers.iter_mut().zip(entropy) {
        // word % span < 100, fits in u8
        *slot = MIN_NUMBER + (word % span) as u8;
    }
    Ok(numbers)
}

fn sorted(numbers: &[u8; REQUIRED_COUNT]) -> [u8; REQUIRED_COUNT] {
    let mut out = *numbers;
    out.sort_unstable();
    out
}

/// Entries whose numbers equal the winning numbers as a multiset, in entry order.
pub fn match_entries(entries: &[Entry], winning: &[u8; REQUIRED_COUNT]) -> Vec<Entry> {
    let target = sorted(winning);
    entries
        .iter()
        .filter(|e| sorted(&e.numbers) == target)
        .copied()
        .collect()
}

/// Splits `pot_wei` evenly across winning entries.
///
/// The division remainder goes to the first winning entry. Amounts are then
/// folded per player, keeping the order in which players first appear.
pub fn compute_payouts(winners: &[Entry], pot_wei: u64) -> Result<Vec<Payout>> {
    if winners.is_empty() {
        return Ok(Vec::new());
    }

    let count = winners.len() as u64;
    let share = pot_wei / count;
    let remainder = pot_wei % count;

    let mut payouts: Vec<Payout> = Vec::with_capacity(winners.len());
    for (i, entry) in winners.iter().enumerate() {
        let amount = if i == 0 {
            share.checked_add(remainder).ok_or(LottoError::MathOverflow)?
        } else {
            share
        };

        match payouts.iter_mut().find(|p| p.player == entry.player) {
            Some(existing) => {
                existing.amount = existing
                    .amount
                    .checked_add(amount)
                    .ok_or(LottoError::MathOverflow)?;
            }
            None => payouts.push(Payout {
                player: entry.player,
                amount,
                claimed: false,
            }),
        }
    }

    Ok(payouts)
}
