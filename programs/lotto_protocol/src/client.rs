//! Off-chain helpers: PDA derivation, instruction builders and account decoding.
//!
//! Builders only assemble the program instruction. `fulfill_randomness` must be
//! preceded in the same transaction by an ed25519 verification instruction signed
//! by the oracle over [`fulfillment_message`].

use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::Instruction;
use anchor_lang::solana_program::sysvar;
use anchor_lang::{AccountDeserialize, InstructionData, ToAccountMetas};

use crate::state::Round;
use crate::utils::{expected_fulfillment_msg, BROKER_SEED, LOTTERY_SEED, ROUND_SEED, VAULT_SEED};

pub fn lottery_address() -> (Pubkey, u8) {
    Pubkey::find_program_address(&[LOTTERY_SEED], &crate::ID)
}

pub fn round_address(round_id: u64) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[ROUND_SEED, round_id.to_le_bytes().as_ref()], &crate::ID)
}

pub fn broker_address() -> (Pubkey, u8) {
    Pubkey::find_program_address(&[BROKER_SEED], &crate::ID)
}

pub fn vault_address() -> (Pubkey, u8) {
    Pubkey::find_program_address(&[VAULT_SEED], &crate::ID)
}

fn build(accounts: impl ToAccountMetas, data: impl InstructionData) -> Instruction {
    Instruction {
        program_id: crate::ID,
        accounts: accounts.to_account_metas(None),
        data: data.data(),
    }
}

// -----------------
// Admin
// -----------------
pub fn initialize_lottery(admin: Pubkey, oracle_pubkey: Pubkey) -> Instruction {
    build(
        crate::accounts::InitializeLottery {
            lottery: lottery_address().0,
            broker: broker_address().0,
            vault: vault_address().0,
            admin,
            system_program: anchor_lang::system_program::ID,
        },
        crate::instruction::InitializeLottery { oracle_pubkey },
    )
}

pub fn set_oracle_pubkey(admin: Pubkey, oracle_pubkey: Pubkey) -> Instruction {
    build(
        crate::accounts::SetOraclePubkey {
            lottery: lottery_address().0,
            admin,
        },
        crate::instruction::SetOraclePubkey { oracle_pubkey },
    )
}

pub fn set_pause(admin: Pubkey, paused: bool) -> Instruction {
    build(
        crate::accounts::SetPause {
            lottery: lottery_address().0,
            admin,
        },
        crate::instruction::SetPause { paused },
    )
}

pub fn set_no_winner_policy(admin: Pubkey, finish_unwon_rounds: bool) -> Instruction {
    build(
        crate::accounts::SetNoWinnerPolicy {
            lottery: lottery_address().0,
            admin,
        },
        crate::instruction::SetNoWinnerPolicy { finish_unwon_rounds },
    )
}

/// `next_round_id` is read from the Lottery account; the new round lives at its PDA.
pub fn start_round(
    admin: Pubkey,
    next_round_id: u64,
    duration_sec: i64,
    fee_wei: u64,
    until_won: bool,
) -> Instruction {
    build(
        crate::accounts::StartRound {
            lottery: lottery_address().0,
            round: round_address(next_round_id).0,
            admin,
            system_program: anchor_lang::system_program::ID,
        },
        crate::instruction::StartRound {
            duration_sec,
            fee_wei,
            until_won,
        },
    )
}

// -----------------
// Players
// -----------------
pub fn enter(player: Pubkey, round_id: u64, numbers: Vec<u8>, payment: u64) -> Instruction {
    build(
        crate::accounts::Enter {
            lottery: lottery_address().0,
            round: round_address(round_id).0,
            vault: vault_address().0,
            player,
            system_program: anchor_lang::system_program::ID,
        },
        crate::instruction::Enter { numbers, payment },
    )
}

pub fn claim_payout(winner: Pubkey, round_id: u64) -> Instruction {
    build(
        crate::accounts::ClaimPayout {
            lottery: lottery_address().0,
            round: round_address(round_id).0,
            vault: vault_address().0,
            winner,
            system_program: anchor_lang::system_program::ID,
        },
        crate::instruction::ClaimPayout { round_id },
    )
}

// -----------------
// Automation
// -----------------
/// `current_round_id` of 0 means no round has been started; the round account is then omitted.
pub fn check_upkeep(current_round_id: u64) -> Instruction {
    build(
        crate::accounts::CheckUpkeep {
            lottery: lottery_address().0,
            round: (current_round_id != 0).then(|| round_address(current_round_id).0),
        },
        crate::instruction::CheckUpkeep {},
    )
}

pub fn request_draw(caller: Pubkey, round_id: u64) -> Instruction {
    build(
        crate::accounts::RequestDraw {
            lottery: lottery_address().0,
            round: round_address(round_id).0,
            broker: broker_address().0,
            caller,
        },
        crate::instruction::RequestDraw {},
    )
}

pub fn recover_stale_request(caller: Pubkey, round_id: u64) -> Instruction {
    build(
        crate::accounts::RecoverStaleRequest {
            lottery: lottery_address().0,
            round: round_address(round_id).0,
            broker: broker_address().0,
            caller,
        },
        crate::instruction::RecoverStaleRequest {},
    )
}

// -----------------
// Oracle
// -----------------

/// Bytes the oracle signs for a fulfillment of `request_id`.
pub fn fulfillment_message(request_id: u64, round_id: u64, seed: &[u8; 32], entropy: &[u64]) -> Vec<u8> {
    expected_fulfillment_msg(&crate::ID, request_id, round_id, seed, entropy)
}

pub fn fulfill_randomness(
    relayer: Pubkey,
    round_id: u64,
    request_id: u64,
    entropy: Vec<u64>,
) -> Instruction {
    build(
        crate::accounts::FulfillRandomness {
            lottery: lottery_address().0,
            round: round_address(round_id).0,
            broker: broker_address().0,
            relayer,
            instructions: sysvar::instructions::ID,
        },
        crate::instruction::FulfillRandomness { request_id, entropy },
    )
}

#[cfg(feature = "mock-oracle")]
pub fn fulfill_randomness_mock(
    admin: Pubkey,
    round_id: u64,
    request_id: u64,
    entropy: Vec<u64>,
) -> Instruction {
    build(
        crate::accounts::FulfillRandomnessMock {
            lottery: lottery_address().0,
            round: round_address(round_id).0,
            broker: broker_address().0,
            admin,
        },
        crate::instruction::FulfillRandomnessMock { request_id, entropy },
    )
}

// -----------------
// Reads
// -----------------
pub fn decode_round(data: &[u8]) -> Result<Round> {
    let mut slice = data;
    Round::try_deserialize(&mut slice)
}

/// Winners of a finished round, decoded from raw Round account data.
pub fn winners(data: &[u8]) -> Result<Vec<Pubkey>> {
    let round = decode_round(data)?;
    Ok(round.finished_winners()?.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::LottoError;
    use crate::state::RoundState;
    use anchor_lang::AccountSerialize;

    fn round_in(state: RoundState, winners: Vec<Pubkey>) -> Round {
        Round {
            round_id: 3,
            bump: 254,
            state,
            fee_wei: 10,
            duration_sec: 60,
            until_won: true,
            started_at: 100,
            ends_at: 160,
            closed_at: 0,
            finished_at: 0,
            cycle: 0,
            pot_wei: 0,
            entries: vec![],
            drawn_numbers: None,
            outstanding_request_id: None,
            winners,
            payouts: vec![],
        }
    }

    fn account_bytes(round: &Round) -> Vec<u8> {
        let mut buf = Vec::new();
        round.try_serialize(&mut buf).unwrap();
        buf
    }

    #[test]
    fn round_addresses_differ_per_round_id() {
        assert_eq!(round_address(1), round_address(1));
        assert_ne!(round_address(1).0, round_address(2).0);
        assert_ne!(lottery_address().0, vault_address().0);
        assert_ne!(broker_address().0, vault_address().0);
    }

    #[test]
    fn enter_targets_round_pda_and_carries_arguments() {
        let player = Pubkey::new_unique();
        let ix = enter(player, 7, vec![1, 2, 3, 4, 5, 6], 1_000);

        assert_eq!(ix.program_id, crate::ID);
        assert_eq!(ix.accounts[1].pubkey, round_address(7).0);
        assert!(ix.accounts[1].is_writable);

        let player_meta = ix.accounts.iter().find(|m| m.pubkey == player).unwrap();
        assert!(player_meta.is_signer);
        assert!(player_meta.is_writable);

        let args = crate::instruction::Enter::try_from_slice(&ix.data[8..]).unwrap();
        assert_eq!(args.numbers, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(args.payment, 1_000);
    }

    #[test]
    fn check_upkeep_before_first_round_omits_round_account() {
        let ix = check_upkeep(0);
        assert_eq!(ix.accounts.len(), 2);
        assert_eq!(ix.accounts[1].pubkey, crate::ID);

        let ix = check_upkeep(4);
        assert_eq!(ix.accounts[1].pubkey, round_address(4).0);
    }

    #[test]
    fn fulfill_randomness_passes_instructions_sysvar() {
        let ix = fulfill_randomness(Pubkey::new_unique(), 2, 9, vec![0; 6]);
        assert!(ix
            .accounts
            .iter()
            .any(|m| m.pubkey == sysvar::instructions::ID && !m.is_writable));
    }

    #[test]
    fn fulfillment_message_is_bound_to_this_program() {
        let seed = [5u8; 32];
        let entropy = [1u64, 2, 3, 4, 5, 6];
        let msg = fulfillment_message(9, 2, &seed, &entropy);

        assert_eq!(msg, expected_fulfillment_msg(&crate::ID, 9, 2, &seed, &entropy));
        assert_ne!(msg, fulfillment_message(10, 2, &seed, &entropy));
    }

    #[test]
    fn winners_decoded_once_finished() {
        let alice = Pubkey::new_unique();
        let bytes = account_bytes(&round_in(RoundState::Finished, vec![alice]));

        assert_eq!(decode_round(&bytes).unwrap().round_id, 3);
        assert_eq!(winners(&bytes).unwrap(), vec![alice]);
    }

    #[test]
    fn winners_before_resolution_is_not_finished() {
        let bytes = account_bytes(&round_in(RoundState::Live, vec![]));
        assert_eq!(winners(&bytes).unwrap_err(), error!(LottoError::NotFinished));
    }

    #[test]
    fn decode_round_rejects_foreign_accounts() {
        assert!(decode_round(&[0u8; 16]).is_err());
    }
}
