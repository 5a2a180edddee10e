use crate::errors::LayoutError;

// A voter's standing vote on a votee. Exactly one value holds at a time.
// NoVote is a stored state (a reverted vote), not the absence of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u64)]
pub enum VoteValue {
    #[default]
    NoVote = 0,
    Downvote = 1,
    Upvote = 2,
}

impl VoteValue {
    pub const ALL: [VoteValue; 3] = [VoteValue::NoVote, VoteValue::Downvote, VoteValue::Upvote];

    // Contribution of a single standing vote to (upvotes, downvotes)
    fn weight(self) -> (i8, i8) {
        match self {
            VoteValue::NoVote => (0, 0),
            VoteValue::Downvote => (0, 1),
            VoteValue::Upvote => (1, 0),
        }
    }

    pub fn is_cast(self) -> bool {
        self != VoteValue::NoVote
    }
}

impl TryFrom<u64> for VoteValue {
    type Error = LayoutError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(VoteValue::NoVote),
            1 => Ok(VoteValue::Downvote),
            2 => Ok(VoteValue::Upvote),
            other => Err(LayoutError::VoteValue(other)),
        }
    }
}

impl From<VoteValue> for u64 {
    fn from(value: VoteValue) -> Self {
        value as u64
    }
}

impl From<VoteValue> for u8 {
    fn from(value: VoteValue) -> Self {
        value as u8
    }
}

/// Change to apply to a votee's aggregate counters when one voter moves from
/// `prior` to `requested`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VoteDelta {
    pub upvote: i8,
    pub downvote: i8,
}

impl VoteDelta {
    pub const NONE: VoteDelta = VoteDelta { upvote: 0, downvote: 0 };

    pub fn is_noop(&self) -> bool {
        *self == Self::NONE
    }

    // Effect on the signed score (upvotes - downvotes)
    pub fn score_change(&self) -> i64 {
        i64::from(self.upvote) - i64::from(self.downvote)
    }

    pub fn inverse(&self) -> VoteDelta {
        VoteDelta {
            upvote: -self.upvote,
            downvote: -self.downvote,
        }
    }
}

// Removing the prior vote's contribution and adding the requested one covers
// every row of the transition table, including undo (X -> NoVote) and the
// identity (X -> X).
//
// | prior -> requested  | up | down |
// |---------------------|----|------|
// | NoVote -> Upvote    | +1 |  0   |
// | NoVote -> Downvote  |  0 | +1   |
// | Upvote -> NoVote    | -1 |  0   |
// | Downvote -> NoVote  |  0 | -1   |
// | Upvote -> Downvote  | -1 | +1   |
// | Downvote -> Upvote  | +1 | -1   |
// | X -> X              |  0 |  0   |
pub fn delta(prior: VoteValue, requested: VoteValue) -> VoteDelta {
    let (prior_up, prior_down) = prior.weight();
    let (next_up, next_down) = requested.weight();
    VoteDelta {
        upvote: next_up - prior_up,
        downvote: next_down - prior_down,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use VoteValue::*;

    #[test]
    fn delta_matches_transition_table() {
        let table = [
            (NoVote, Upvote, 1, 0),
            (NoVote, Downvote, 0, 1),
            (Upvote, NoVote, -1, 0),
            (Downvote, NoVote, 0, -1),
            (Upvote, Downvote, -1, 1),
            (Downvote, Upvote, 1, -1),
            (NoVote, NoVote, 0, 0),
            (Upvote, Upvote, 0, 0),
            (Downvote, Downvote, 0, 0),
        ];

        for (prior, requested, up, down) in table {
            assert_eq!(
                delta(prior, requested),
                VoteDelta { upvote: up, downvote: down },
                "{:?} -> {:?}",
                prior,
                requested
            );
        }
    }

    #[test]
    fn same_value_is_a_noop() {
        for value in VoteValue::ALL {
            assert!(delta(value, value).is_noop());
        }
    }

    #[test]
    fn reverse_transition_is_the_inverse() {
        for prior in VoteValue::ALL {
            for requested in VoteValue::ALL {
                assert_eq!(delta(requested, prior), delta(prior, requested).inverse());
            }
        }
    }

    #[test]
    fn score_change_follows_direction() {
        assert_eq!(delta(NoVote, Upvote).score_change(), 1);
        assert_eq!(delta(Upvote, Downvote).score_change(), -2);
        assert_eq!(delta(Downvote, NoVote).score_change(), 1);
    }

    #[test]
    fn raw_values_outside_range_are_rejected() {
        assert_eq!(VoteValue::try_from(2), Ok(Upvote));
        assert_eq!(VoteValue::try_from(3), Err(LayoutError::VoteValue(3)));
        assert_eq!(u64::from(Downvote), 1);
    }
}
