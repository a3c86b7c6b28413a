use anchor_lang::prelude::*;

#[error_code]
pub enum LottoError {
    #[msg("Unauthorized")]
    Unauthorized,
    #[msg("Protocol paused")]
    Paused,
    #[msg("Invalid round configuration")]
    InvalidConfig,

    // -----------------
    // Entry validation
    // -----------------
    #[msg("Entry must contain exactly 6 numbers")]
    TooFewOrMany,
    #[msg("Entry numbers must be between 1 and 100")]
    OutOfRange,
    #[msg("Payment is below the round fee")]
    FeeTooLow,
    #[msg("Round has no room for more entries")]
    RoundFull,
    #[msg("Player holds the maximum number of entries for this round")]
    PlayerEntryLimit,

    // -----------------
    // Round lifecycle
    // -----------------
    #[msg("Round is not live")]
    RoundNotLive,
    #[msg("Upkeep not needed")]
    UpkeepNotNeeded,
    #[msg("Another round is still in progress")]
    RoundInProgress,
    #[msg("Round not finished")]
    NotFinished,
    #[msg("Round does not match the request")]
    RoundMismatch,

    // -----------------
    // Randomness broker
    // -----------------
    #[msg("Round already has an outstanding randomness request")]
    DuplicateRequest,
    #[msg("Unknown or already fulfilled randomness request")]
    UnknownRequest,
    #[msg("Randomness broker is full")]
    BrokerFull,
    #[msg("Invalid entropy")]
    InvalidEntropy,
    #[msg("Randomness request is not stale yet")]
    RecoveryTooEarly,

    // -----------------
    // Oracle attestation
    // -----------------
    #[msg("Oracle pubkey not set")]
    OracleNotSet,
    #[msg("Missing or invalid ed25519 verify instruction")]
    MissingOrInvalidEd25519Ix,
    #[msg("Ed25519 message mismatch")]
    Ed25519MessageMismatch,

    // -----------------
    // Payouts
    // -----------------
    #[msg("Not a winner")]
    NotWinner,
    #[msg("Already claimed")]
    AlreadyClaimed,
    #[msg("Insufficient vault funds")]
    InsufficientVaultFunds,

    #[msg("Math overflow")]
    MathOverflow,
}
