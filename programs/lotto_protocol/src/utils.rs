use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::Instruction;
use solana_sha256_hasher::hashv;

use crate::errors::LottoError;

// Ed25519SigVerify111111111111111111111111111
pub fn ed25519_program_id() -> Pubkey {
    Pubkey::new_from_array([
        3, 125, 70, 214, 124, 147, 251, 190, 18, 249, 66, 143, 131, 141, 64, 255,
        5, 112, 116, 73, 39, 244, 138, 100, 252, 202, 112, 68, 128, 0, 0, 0,
    ])
}

// -----------------
// Seeds
// -----------------
pub const LOTTERY_SEED: &[u8] = b"lottery_v1";
pub const ROUND_SEED: &[u8] = b"round_v1";
pub const VAULT_SEED: &[u8] = b"vault_v1";
pub const BROKER_SEED: &[u8] = b"broker_v1";

pub const FULFILL_DOMAIN: &[u8] = b"lotto-protocol:fulfill_v1";

// -------------------------
// Request seed
// -------------------------
pub fn request_seed(round_id: u64, request_id: u64, requested_at: i64) -> [u8; 32] {
    hashv(&[
        b"request".as_ref(),
        round_id.to_le_bytes().as_ref(),
        request_id.to_le_bytes().as_ref(),
        requested_at.to_le_bytes().as_ref(),
    ])
    .to_bytes()
}

// -------------------------
// Expected oracle fulfillment msg
// -------------------------
pub fn expected_fulfillment_msg(
    program_id: &Pubkey,
    request_id: u64,
    round_id: u64,
    seed: &[u8; 32],
    entropy: &[u64],
) -> Vec<u8> {
    let mut out = Vec::with_capacity(FULFILL_DOMAIN.len() + 32 + 8 + 8 + 32 + 8 * entropy.len());
    out.extend_from_slice(FULFILL_DOMAIN);
    out.extend_from_slice(program_id.as_ref());
    out.extend_from_slice(&request_id.to_le_bytes());
    out.extend_from_slice(&round_id.to_le_bytes());
    out.extend_from_slice(seed);
    for word in entropy {
        out.extend_from_slice(&word.to_le_bytes());
    }
    out
}

// -------------------------
// ed25519 attestation
// -------------------------

/// Signer and message carried by a single-signature ed25519 verify instruction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedMessage {
    pub signer: Pubkey,
    pub message: Vec<u8>,
}

/// `instruction_index` value meaning "this instruction's own data".
const SELF_INDEX: u16 = u16::MAX;

/// The offsets table starts after `num_signatures: u8` and one padding byte.
const OFFSETS_AT: usize = 2;

fn read_u16(data: &[u8], at: usize) -> Result<u16> {
    data.get(at..at + 2)
        .map(|b| u16::from_le_bytes([b[0], b[1]]))
        .ok_or_else(|| error!(LottoError::MissingOrInvalidEd25519Ix))
}

fn read_span(data: &[u8], offset: u16, len: usize) -> Result<&[u8]> {
    let start = usize::from(offset);
    data.get(start..start + len)
        .ok_or_else(|| error!(LottoError::MissingOrInvalidEd25519Ix))
}

/// Reads the signer and message out of `ix`.
///
/// Only one signature is accepted, and its signature, key and message must all
/// live inside `ix` itself, otherwise the verified bytes could differ from the
/// ones read here.
pub fn read_signed_message(ix: &Instruction) -> Result<SignedMessage> {
    require_keys_eq!(
        ix.program_id,
        ed25519_program_id(),
        LottoError::MissingOrInvalidEd25519Ix
    );

    let data = ix.data.as_slice();
    require!(data.first() == Some(&1), LottoError::MissingOrInvalidEd25519Ix);

    // signature_offset, signature_ix, pubkey_offset, pubkey_ix, msg_offset, msg_size, msg_ix
    let mut table = [0u16; 7];
    for (i, field) in table.iter_mut().enumerate() {
        *field = read_u16(data, OFFSETS_AT + 2 * i)?;
    }
    let [_, signature_ix, pubkey_offset, pubkey_ix, msg_offset, msg_size, msg_ix] = table;

    require!(
        [signature_ix, pubkey_ix, msg_ix].iter().all(|i| *i == SELF_INDEX),
        LottoError::MissingOrInvalidEd25519Ix
    );

    let signer = Pubkey::try_from(read_span(data, pubkey_offset, 32)?)
        .map_err(|_| error!(LottoError::MissingOrInvalidEd25519Ix))?;
    let message = read_span(data, msg_offset, usize::from(msg_size))?.to_vec();

    Ok(SignedMessage { signer, message })
}

/// Checks that `ix` is a self-contained ed25519 verification by `oracle` over `expected_msg`.
/// A signature from anyone but the oracle is `Unauthorized`.
pub fn assert_oracle_attestation(
    ix: &Instruction,
    oracle: &Pubkey,
    expected_msg: &[u8],
) -> Result<()> {
    let signed = read_signed_message(ix)?;

    require_keys_eq!(signed.signer, *oracle, LottoError::Unauthorized);
    require!(
        signed.message == expected_msg,
        LottoError::Ed25519MessageMismatch
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Verify instruction for one signature; `msg_ix` picks where the message is said to live.
    /// The signature bytes stay zeroed since only the runtime checks them.
    fn verify_ix(signer: &Pubkey, msg: &[u8], msg_ix: u16) -> Instruction {
        let pubkey_offset = (OFFSETS_AT + 14) as u16;
        let signature_offset = pubkey_offset + 32;
        let msg_offset = signature_offset + 64;

        let mut data = vec![1u8, 0];
        for field in [
            signature_offset,
            SELF_INDEX,
            pubkey_offset,
            SELF_INDEX,
            msg_offset,
            msg.len() as u16,
            msg_ix,
        ] {
            data.extend_from_slice(&field.to_le_bytes());
        }
        data.extend_from_slice(signer.as_ref());
        data.extend_from_slice(&[0u8; 64]);
        data.extend_from_slice(msg);

        Instruction {
            program_id: ed25519_program_id(),
            accounts: vec![],
            data,
        }
    }

    #[test]
    fn reads_self_contained_verify_instruction() {
        let oracle = Pubkey::new_unique();
        let signed = read_signed_message(&verify_ix(&oracle, b"entropy", SELF_INDEX)).unwrap();

        assert_eq!(signed.signer, oracle);
        assert_eq!(signed.message, b"entropy".to_vec());
    }

    #[test]
    fn message_in_another_instruction_is_rejected() {
        let ix = verify_ix(&Pubkey::new_unique(), b"evil-msg", 0);
        assert_eq!(
            read_signed_message(&ix).unwrap_err(),
            error!(LottoError::MissingOrInvalidEd25519Ix)
        );
    }

    #[test]
    fn foreign_program_or_truncated_data_is_rejected() {
        let mut ix = verify_ix(&Pubkey::new_unique(), b"m", SELF_INDEX);
        ix.program_id = Pubkey::new_unique();
        assert!(read_signed_message(&ix).is_err());

        let truncated = Instruction {
            program_id: ed25519_program_id(),
            accounts: vec![],
            data: vec![1, 0, 0],
        };
        assert!(read_signed_message(&truncated).is_err());

        // message span runs past the end of the data
        let mut short = verify_ix(&Pubkey::new_unique(), b"entropy", SELF_INDEX);
        short.data.truncate(short.data.len() - 1);
        assert!(read_signed_message(&short).is_err());
    }

    #[test]
    fn attestation_from_another_signer_is_unauthorized() {
        let oracle = Pubkey::new_unique();
        let impostor = Pubkey::new_unique();
        let seed = request_seed(1, 1, 0);
        let msg = expected_fulfillment_msg(&crate::ID, 1, 1, &seed, &[1, 2, 3, 4, 5, 6]);

        let ix = verify_ix(&impostor, &msg, SELF_INDEX);
        assert_eq!(
            assert_oracle_attestation(&ix, &oracle, &msg).unwrap_err(),
            error!(LottoError::Unauthorized)
        );

        let signed = verify_ix(&oracle, &msg, SELF_INDEX);
        assert!(assert_oracle_attestation(&signed, &oracle, &msg).is_ok());
    }

    #[test]
    fn attestation_over_different_entropy_is_rejected() {
        let oracle = Pubkey::new_unique();
        let seed = request_seed(1, 1, 0);
        let signed_msg = expected_fulfillment_msg(&crate::ID, 1, 1, &seed, &[1, 2, 3, 4, 5, 6]);
        let submitted = expected_fulfillment_msg(&crate::ID, 1, 1, &seed, &[1, 2, 3, 4, 5, 7]);

        let ix = verify_ix(&oracle, &signed_msg, SELF_INDEX);
        assert_eq!(
            assert_oracle_attestation(&ix, &oracle, &submitted).unwrap_err(),
            error!(LottoError::Ed25519MessageMismatch)
        );
    }

    #[test]
    fn request_seed_binds_every_input() {
        let base = request_seed(1, 1, 100);
        assert_eq!(base, request_seed(1, 1, 100));
        assert_ne!(base, request_seed(2, 1, 100));
        assert_ne!(base, request_seed(1, 2, 100));
        assert_ne!(base, request_seed(1, 1, 101));
    }

    #[test]
    fn fulfillment_msg_layout() {
        let seed = [9u8; 32];
        let msg = expected_fulfillment_msg(&crate::ID, 3, 4, &seed, &[5, 6]);

        assert!(msg.starts_with(FULFILL_DOMAIN));
        assert_eq!(msg.len(), FULFILL_DOMAIN.len() + 32 + 8 + 8 + 32 + 16);
        let tail = &msg[msg.len() - 16..];
        assert_eq!(&tail[..8], &5u64.to_le_bytes());
        assert_eq!(&tail[8..], &6u64.to_le_bytes());
    }
}
