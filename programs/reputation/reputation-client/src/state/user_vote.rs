use solana_sdk::pubkey::Pubkey;

use super::{check_len, check_tag, read_identity, read_u64, Tag};
use crate::{
    address::{self, DerivedAddress},
    constants::{IDENTITY_LEN, TAG_LEN, VOTE_VALUE_LEN},
    errors::{LayoutError, Result},
    vote::VoteValue,
};

// One voter's current standing vote on one votee.
//
// Layout (little-endian, no padding):
//   [tag: u64][value: u64][votee: 32][voter: 32]
//
// Both identities are stored even though they seed the address, so scans can
// filter on either one with a memcmp at a fixed offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserVoteRecord {
    pub value: VoteValue,
    pub votee: Pubkey,
    pub voter: Pubkey,
}

impl UserVoteRecord {
    pub const TAG: Tag = Tag::UserVote;

    pub const VALUE_OFFSET: usize = TAG_LEN;
    pub const VOTEE_OFFSET: usize = Self::VALUE_OFFSET + VOTE_VALUE_LEN;
    pub const VOTER_OFFSET: usize = Self::VOTEE_OFFSET + IDENTITY_LEN;
    pub const LEN: usize = Self::VOTER_OFFSET + IDENTITY_LEN;

    pub fn new(votee: Pubkey, voter: Pubkey, value: VoteValue) -> Self {
        Self {
            value,
            votee,
            voter,
        }
    }

    // What a missing vote account stands for
    pub fn absent(votee: Pubkey, voter: Pubkey) -> Self {
        Self::new(votee, voter, VoteValue::NoVote)
    }

    pub fn find_address(
        program_id: &Pubkey,
        votee: &Pubkey,
        voter: &Pubkey,
    ) -> Result<DerivedAddress> {
        address::user_vote_address(program_id, votee, voter)
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(Self::LEN);
        data.extend_from_slice(&Self::TAG.to_le_bytes());
        data.extend_from_slice(&u64::from(self.value).to_le_bytes());
        data.extend_from_slice(self.votee.as_ref());
        data.extend_from_slice(self.voter.as_ref());
        data
    }

    pub fn decode(bytes: &[u8]) -> std::result::Result<Self, LayoutError> {
        check_len(bytes, Self::LEN)?;
        check_tag(bytes, Self::TAG)?;

        Ok(Self {
            value: VoteValue::try_from(read_u64(bytes, Self::VALUE_OFFSET))?,
            votee: read_identity(bytes, Self::VOTEE_OFFSET),
            voter: read_identity(bytes, Self::VOTER_OFFSET),
        })
    }
}
