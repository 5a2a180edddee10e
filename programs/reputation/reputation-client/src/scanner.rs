// Relational views over unindexed vote records
//
// There is no index on-chain. "Who voted on X" and "whom did Y vote on" are
// answered by scanning every program account with two filters:
//   1. data size == UserVoteRecord::LEN, which drops score records cheaply
//   2. memcmp of the identity at its fixed offset inside the vote layout
// Matches come back in whatever order the node returns them.

use log::{debug, warn};
use solana_sdk::pubkey::Pubkey;

use crate::{
    config::{ClientConfig, ListingPolicy},
    errors::{ReputationError, Result, ScanError},
    source::{AccountSource, ScanFilter},
    state::UserVoteRecord,
};

// Which identity column of the vote layout a scan keys on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteColumn {
    Votee,
    Voter,
}

impl VoteColumn {
    pub const fn offset(self) -> usize {
        match self {
            VoteColumn::Votee => UserVoteRecord::VOTEE_OFFSET,
            VoteColumn::Voter => UserVoteRecord::VOTER_OFFSET,
        }
    }
}

pub fn vote_filters(column: VoteColumn, identity: &Pubkey) -> Vec<ScanFilter> {
    vec![
        ScanFilter::DataSize(UserVoteRecord::LEN),
        ScanFilter::memcmp(column.offset(), identity.to_bytes().to_vec()),
    ]
}

pub struct LedgerScanner<S> {
    source: S,
    program_id: Pubkey,
    listing: ListingPolicy,
}

impl<S: AccountSource> LedgerScanner<S> {
    pub fn new(source: S, config: &ClientConfig) -> Self {
        Self {
            source,
            program_id: config.program_id,
            listing: config.listing,
        }
    }

    pub fn listing(&self) -> ListingPolicy {
        self.listing
    }

    // Every vote cast on `votee`
    pub fn voters_of(&self, votee: &Pubkey) -> Result<VoteScan> {
        self.scan(VoteColumn::Votee, votee)
    }

    // Every vote cast by `voter`
    pub fn votees_of(&self, voter: &Pubkey) -> Result<VoteScan> {
        self.scan(VoteColumn::Voter, voter)
    }

    // Each call re-issues the scan against the source
    fn scan(&self, column: VoteColumn, identity: &Pubkey) -> Result<VoteScan> {
        let filters = vote_filters(column, identity);
        let matches = self
            .source
            .scan(&self.program_id, &filters)
            .map_err(ReputationError::from_source)?;

        debug!(
            "{:?} scan for {} returned {} account(s)",
            column,
            identity,
            matches.len()
        );

        Ok(VoteScan {
            matches: matches.into_iter(),
            listing: self.listing,
            skipped: 0,
            failed: 0,
        })
    }
}

/// Lazily decoded scan result.
///
/// Yields one item per listed record. A record that fails to decode is yielded
/// as an `Err` carrying its address and the scan moves on, so one bad account
/// never hides the rest.
pub struct VoteScan {
    matches: std::vec::IntoIter<(Pubkey, Vec<u8>)>,
    listing: ListingPolicy,
    skipped: usize,
    failed: usize,
}

impl VoteScan {
    // Records withheld by the listing policy so far
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    // Records that failed to decode so far
    pub fn failed(&self) -> usize {
        self.failed
    }

    // Matches not yet visited
    pub fn remaining(&self) -> usize {
        self.matches.len()
    }

    // Drains the scan into decoded records and per-record failures
    pub fn split(self) -> (Vec<UserVoteRecord>, Vec<ScanError>) {
        let mut records = Vec::new();
        let mut failures = Vec::new();
        for item in self {
            match item {
                Ok(record) => records.push(record),
                Err(failure) => failures.push(failure),
            }
        }
        (records, failures)
    }
}

impl Iterator for VoteScan {
    type Item = std::result::Result<UserVoteRecord, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (address, data) = self.matches.next()?;

            match UserVoteRecord::decode(&data) {
                Ok(record) if self.listing.includes(record.value) => return Some(Ok(record)),
                Ok(_) => self.skipped += 1,
                Err(source) => {
                    warn!("skipping undecodable vote record {}: {}", address, source);
                    self.failed += 1;
                    return Some(Err(ScanError { address, source }));
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.matches.len()))
    }
}
