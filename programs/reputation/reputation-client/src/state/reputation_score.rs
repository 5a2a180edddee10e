use solana_sdk::pubkey::Pubkey;

use super::{check_len, check_tag, read_u64, Tag};
use crate::{
    address::{self, DerivedAddress},
    constants::{BUMP_LEN, COUNTER_LEN, TAG_LEN},
    errors::{Counter, LayoutError, ReputationError, Result},
    vote::VoteDelta,
};

// Materialized aggregate of every standing vote on one votee.
//
// Layout (little-endian, no padding):
//   [tag: u64][bump: u8][upvote: u64][downvote: u64]
//
// The vote records are the source of truth; this account is only advanced by
// deltas that exactly offset what the voter's previous vote contributed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReputationScoreRecord {
    // Bump found while deriving this account's address
    pub bump: u8,
    pub upvote: u64,
    pub downvote: u64,
}

impl ReputationScoreRecord {
    pub const TAG: Tag = Tag::ReputationScore;

    pub const BUMP_OFFSET: usize = TAG_LEN;
    pub const UPVOTE_OFFSET: usize = Self::BUMP_OFFSET + BUMP_LEN;
    pub const DOWNVOTE_OFFSET: usize = Self::UPVOTE_OFFSET + COUNTER_LEN;
    pub const LEN: usize = Self::DOWNVOTE_OFFSET + COUNTER_LEN;

    pub fn new(bump: u8) -> Self {
        Self {
            bump,
            upvote: 0,
            downvote: 0,
        }
    }

    pub fn find_address(program_id: &Pubkey, votee: &Pubkey) -> Result<DerivedAddress> {
        address::reputation_score_address(program_id, votee)
    }

    // Widened so that neither counter can overflow the difference
    pub fn score(&self) -> i128 {
        i128::from(self.upvote) - i128::from(self.downvote)
    }

    // Applies both counters or neither
    pub fn apply(&mut self, delta: VoteDelta) -> Result<()> {
        let upvote = shift(Counter::Upvote, self.upvote, delta.upvote)?;
        let downvote = shift(Counter::Downvote, self.downvote, delta.downvote)?;
        self.upvote = upvote;
        self.downvote = downvote;
        Ok(())
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(Self::LEN);
        data.extend_from_slice(&Self::TAG.to_le_bytes());
        data.push(self.bump);
        data.extend_from_slice(&self.upvote.to_le_bytes());
        data.extend_from_slice(&self.downvote.to_le_bytes());
        data
    }

    pub fn decode(bytes: &[u8]) -> std::result::Result<Self, LayoutError> {
        check_len(bytes, Self::LEN)?;
        check_tag(bytes, Self::TAG)?;

        Ok(Self {
            bump: bytes[Self::BUMP_OFFSET],
            upvote: read_u64(bytes, Self::UPVOTE_OFFSET),
            downvote: read_u64(bytes, Self::DOWNVOTE_OFFSET),
        })
    }
}

fn shift(counter: Counter, current: u64, delta: i8) -> Result<u64> {
    let magnitude = u64::from(delta.unsigned_abs());
    if delta >= 0 {
        current
            .checked_add(magnitude)
            .ok_or(ReputationError::AggregateOverflow { counter })
    } else {
        current
            .checked_sub(magnitude)
            .ok_or(ReputationError::NegativeAggregate {
                counter,
                current,
                delta,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vote::{delta, VoteValue::*};

    #[test]
    fn layout_is_25_bytes() {
        assert_eq!(ReputationScoreRecord::LEN, 25);
        assert_eq!(ReputationScoreRecord::new(254).encode().len(), 25);
    }

    #[test]
    fn encode_places_fields_little_endian() {
        let record = ReputationScoreRecord {
            bump: 0xfe,
            upvote: 0x0102,
            downvote: u64::MAX,
        };
        let data = record.encode();
        assert_eq!(&data[..8], &1u64.to_le_bytes());
        assert_eq!(data[8], 0xfe);
        assert_eq!(&data[9..17], &0x0102u64.to_le_bytes());
        assert_eq!(&data[17..25], &[0xff; 8]);
        assert_eq!(ReputationScoreRecord::decode(&data), Ok(record));
    }

    #[test]
    fn decode_rejects_wrong_length_and_tag() {
        let data = ReputationScoreRecord::new(1).encode();
        assert_eq!(
            ReputationScoreRecord::decode(&data[..24]),
            Err(LayoutError::Length {
                expected: 25,
                found: 24
            })
        );

        let mut retagged = data.clone();
        retagged[..8].copy_from_slice(&Tag::UserVote.to_le_bytes());
        assert_eq!(
            ReputationScoreRecord::decode(&retagged),
            Err(LayoutError::Tag {
                expected: 1,
                found: 2
            })
        );
    }

    #[test]
    fn score_survives_counters_beyond_i64() {
        let record = ReputationScoreRecord {
            bump: 0,
            upvote: 0,
            downvote: u64::MAX,
        };
        assert_eq!(record.score(), -i128::from(u64::MAX));
    }

    #[test]
    fn negative_aggregate_is_reported_and_state_kept() {
        let mut record = ReputationScoreRecord {
            bump: 0,
            upvote: 3,
            downvote: 0,
        };
        let err = record.apply(delta(Downvote, Upvote)).unwrap_err();
        assert!(matches!(
            err,
            ReputationError::NegativeAggregate {
                counter: Counter::Downvote,
                current: 0,
                delta: -1
            }
        ));
        assert_eq!(record.upvote, 3);
        assert_eq!(record.downvote, 0);
    }

    #[test]
    fn overflow_is_reported() {
        let mut record = ReputationScoreRecord {
            bump: 0,
            upvote: u64::MAX,
            downvote: 0,
        };
        assert!(matches!(
            record.apply(delta(NoVote, Upvote)),
            Err(ReputationError::AggregateOverflow {
                counter: Counter::Upvote
            })
        ));
    }

    #[test]
    fn transition_then_reverse_restores_aggregate() {
        for prior in [NoVote, Downvote, Upvote] {
            for requested in [NoVote, Downvote, Upvote] {
                let mut record = ReputationScoreRecord {
                    bump: 9,
                    upvote: 5,
                    downvote: 5,
                };
                let before = record;
                record.apply(delta(prior, requested)).unwrap();
                record.apply(delta(requested, prior)).unwrap();
                assert_eq!(record, before, "{:?} <-> {:?}", prior, requested);
            }
        }
    }
}
