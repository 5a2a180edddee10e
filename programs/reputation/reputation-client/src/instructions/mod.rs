pub mod vote;

pub use vote::*;

use crate::{constants::VOTE_DISCRIMINATOR, errors::LayoutError};

// First byte of every instruction's data
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReputationInstruction {
    Vote = VOTE_DISCRIMINATOR,
}

impl TryFrom<&u8> for ReputationInstruction {
    type Error = LayoutError;

    fn try_from(value: &u8) -> Result<Self, Self::Error> {
        match *value {
            VOTE_DISCRIMINATOR => Ok(ReputationInstruction::Vote),
            other => Err(LayoutError::Discriminator(other)),
        }
    }
}
