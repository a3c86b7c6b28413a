use anchor_lang::prelude::*;

use crate::constants::{MAX_NUMBER, MIN_NUMBER, REQUIRED_COUNT};
use crate::errors::LottoError;

/// Checks the shape of a submitted number set. Payment is checked by the round manager.
pub fn validate_numbers(numbers: &[u8]) -> Result<[u8; REQUIRED_COUNT]> {
    let picked: [u8; REQUIRED_COUNT] = numbers
        .try_into()
        .map_err(|_| error!(LottoError::TooFewOrMany))?;

    require!(
        picked.iter().all(|n| (MIN_NUMBER..=MAX_NUMBER).contains(n)),
        LottoError::OutOfRange
    );

    Ok(picked)
}
