use std::{error::Error as StdError, fmt};

use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

// Raised by the record codec when bytes do not match a fixed layout
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("expected {expected} bytes, found {found}")]
    Length { expected: usize, found: usize },

    #[error("expected record tag {expected}, found {found}")]
    Tag { expected: u64, found: u64 },

    #[error("vote value {0} is out of range")]
    VoteValue(u64),

    #[error("unknown instruction discriminator {0}")]
    Discriminator(u8),

    // Stored fields that must agree with the address the record was read from
    #[error("stored {field} {found} does not match derived {expected}")]
    IdentityMismatch {
        field: &'static str,
        expected: Pubkey,
        found: Pubkey,
    },

    #[error("stored bump {found} does not match derived bump {expected}")]
    BumpMismatch { expected: u8, found: u8 },
}

// Which aggregate counter a delta was applied to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Counter {
    Upvote,
    Downvote,
}

impl fmt::Display for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Counter::Upvote => f.write_str("upvote"),
            Counter::Downvote => f.write_str("downvote"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ReputationError {
    // Address derivation errors
    #[error("no bump seed in 0..=255 yields a program address for these seeds")]
    DerivationExhausted,

    #[error("seeds exceed runtime limits (at most 15 seeds of at most 32 bytes)")]
    InvalidSeeds,

    // Record errors
    #[error("record layout mismatch: {0}")]
    LayoutMismatch(#[from] LayoutError),

    #[error("corrupt record at {address}: {source}")]
    CorruptRecord {
        address: Pubkey,
        #[source]
        source: LayoutError,
    },

    #[error("account {address} is owned by {owner}, expected {expected}")]
    WrongOwner {
        address: Pubkey,
        owner: Pubkey,
        expected: Pubkey,
    },

    // Aggregate consistency errors
    #[error("{counter} counter at {current} cannot absorb a delta of {delta}")]
    NegativeAggregate {
        counter: Counter,
        current: u64,
        delta: i8,
    },

    #[error("{counter} counter overflowed")]
    AggregateOverflow { counter: Counter },

    // Account source errors, surfaced as-is
    #[error("account source failure: {0}")]
    Source(#[source] Box<dyn StdError + Send + Sync + 'static>),
}

impl ReputationError {
    pub fn from_source<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        ReputationError::Source(Box::new(error))
    }
}

pub type Result<T> = std::result::Result<T, ReputationError>;

// A single scan match that failed to decode. The scan keeps going.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("undecodable vote record at {address}: {source}")]
pub struct ScanError {
    pub address: Pubkey,
    #[source]
    pub source: LayoutError,
}

// Custom error codes returned by the program when it rejects an instruction.
// Codes follow declaration order in the program's error enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[repr(u32)]
pub enum LedgerRejection {
    #[error("This account is already initialized")]
    AlreadyInitialized = 0,

    #[error("Data type mismatch")]
    DataTypeMismatch = 1,

    #[error("Wrong account owner")]
    WrongOwner = 2,

    #[error("Account is uninitialized")]
    Uninitialized = 3,

    #[error("Already voted")]
    AlreadyVoted = 4,

    #[error("No vote exists")]
    NoVoteExists = 5,

    #[error("A valid stake account is necessary to be allowed to vote")]
    MissingStakeAccount = 6,

    #[error("The provided stake account is not valid for this voter")]
    InvalidStakeAccount = 7,

    #[error("You cannot vote for yourself")]
    CannotVoteForYourself = 8,
}

impl LedgerRejection {
    pub fn from_code(code: u32) -> Option<Self> {
        let rejection = match code {
            0 => LedgerRejection::AlreadyInitialized,
            1 => LedgerRejection::DataTypeMismatch,
            2 => LedgerRejection::WrongOwner,
            3 => LedgerRejection::Uninitialized,
            4 => LedgerRejection::AlreadyVoted,
            5 => LedgerRejection::NoVoteExists,
            6 => LedgerRejection::MissingStakeAccount,
            7 => LedgerRejection::InvalidStakeAccount,
            8 => LedgerRejection::CannotVoteForYourself,
            _ => return None,
        };
        Some(rejection)
    }

    pub fn code(self) -> u32 {
        self as u32
    }
}
