use std::sync::Arc;

use log::debug;
use solana_sdk::pubkey::Pubkey;

use crate::{
    address::AddressCache,
    config::ClientConfig,
    errors::{LayoutError, ReputationError, Result},
    source::AccountSource,
    state::{is_blank, ReputationScoreRecord, UserVoteRecord},
    vote::VoteValue,
};

/// Point reads of score and vote records.
///
/// A record that was never created reads as its zero state: a votee nobody
/// voted on has score 0, a voter who never voted holds `NoVote`. Anything
/// present but undecodable is a hard `CorruptRecord` error.
pub struct LedgerReader<S> {
    source: S,
    program_id: Pubkey,
    cache: Arc<AddressCache>,
}

impl<S: AccountSource> LedgerReader<S> {
    pub fn new(source: S, config: &ClientConfig) -> Self {
        Self {
            source,
            program_id: config.program_id,
            cache: Arc::new(AddressCache::new()),
        }
    }

    // Share derivations with other readers and builders
    pub fn with_cache(mut self, cache: Arc<AddressCache>) -> Self {
        self.cache = cache;
        self
    }

    pub fn program_id(&self) -> &Pubkey {
        &self.program_id
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn score(&self, votee: &Pubkey) -> Result<i128> {
        Ok(self.score_record(votee)?.score())
    }

    pub fn score_record(&self, votee: &Pubkey) -> Result<ReputationScoreRecord> {
        let derived = self
            .cache
            .reputation_score_address(&self.program_id, votee)?;

        let Some(data) = self.load(&derived.address, ReputationScoreRecord::LEN)? else {
            return Ok(ReputationScoreRecord::new(derived.bump));
        };

        let corrupt = |source: LayoutError| ReputationError::CorruptRecord {
            address: derived.address,
            source,
        };
        let record = ReputationScoreRecord::decode(&data).map_err(corrupt)?;

        if record.bump != derived.bump {
            return Err(corrupt(LayoutError::BumpMismatch {
                expected: derived.bump,
                found: record.bump,
            }));
        }

        Ok(record)
    }

    pub fn vote(&self, votee: &Pubkey, voter: &Pubkey) -> Result<VoteValue> {
        Ok(self.vote_record(votee, voter)?.value)
    }

    pub fn vote_record(&self, votee: &Pubkey, voter: &Pubkey) -> Result<UserVoteRecord> {
        let derived = self
            .cache
            .user_vote_address(&self.program_id, votee, voter)?;

        let Some(data) = self.load(&derived.address, UserVoteRecord::LEN)? else {
            return Ok(UserVoteRecord::absent(*votee, *voter));
        };

        let corrupt = |source: LayoutError| ReputationError::CorruptRecord {
            address: derived.address,
            source,
        };
        let record = UserVoteRecord::decode(&data).map_err(corrupt)?;

        // The address commits to both identities, so the stored copies must agree
        for (field, expected, found) in [
            ("votee", votee, &record.votee),
            ("voter", voter, &record.voter),
        ] {
            if expected != found {
                return Err(corrupt(LayoutError::IdentityMismatch {
                    field,
                    expected: *expected,
                    found: *found,
                }));
            }
        }

        Ok(record)
    }

    // Raw bytes of an initialized, program-owned account of width `len`
    fn load(&self, address: &Pubkey, len: usize) -> Result<Option<Vec<u8>>> {
        let account = self
            .source
            .get_account(address)
            .map_err(ReputationError::from_source)?;

        let Some(account) = account else {
            debug!("no account at {}", address);
            return Ok(None);
        };

        // Allocated but never written
        if is_blank(&account.data, len) {
            debug!("blank account at {}", address);
            return Ok(None);
        }

        if account.owner != self.program_id {
            return Err(ReputationError::WrongOwner {
                address: *address,
                owner: account.owner,
                expected: self.program_id,
            });
        }

        Ok(Some(account.data))
    }
}
