use std::{error::Error as StdError, time::SystemTimeError};

use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

use crate::report::ReportSubject;

#[derive(Debug, Error)]
pub enum GateError {
    // Challenge errors
    #[error("a challenge for {identity} is still pending")]
    ChallengePending { identity: Pubkey },

    #[error("no live challenge for {identity}")]
    ChallengeNotFound { identity: Pubkey },

    #[error("signature does not verify for {identity}")]
    InvalidSignature { identity: Pubkey },

    // Report errors
    #[error("{reporter} already reported {subject}")]
    AlreadyReported {
        subject: ReportSubject,
        reporter: Pubkey,
    },

    #[error("details do not describe {subject}")]
    MismatchedDetails { subject: ReportSubject },

    #[error("system clock is before the unix epoch")]
    Clock(#[source] SystemTimeError),

    // Backing store failures, surfaced as-is
    #[error("store failure: {0}")]
    Store(#[source] Box<dyn StdError + Send + Sync + 'static>),
}

impl GateError {
    pub fn from_store<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        GateError::Store(Box::new(error))
    }
}

pub type Result<T> = std::result::Result<T, GateError>;
