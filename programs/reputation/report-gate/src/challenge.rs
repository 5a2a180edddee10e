// Single-use sign-in challenges
//
// One challenge per identity at a time. A challenge is readable until it
// expires or is consumed, whichever comes first.

use std::{collections::HashMap, convert::Infallible, sync::RwLock};

use solana_sdk::pubkey::Pubkey;
use uuid::Uuid;

use crate::constants::CHALLENGE_PREAMBLE;

pub fn challenge_message(identity: &Pubkey, nonce: &Uuid) -> String {
    format!(
        "{} ({}) by signing the below:\n{}",
        CHALLENGE_PREAMBLE, identity, nonce
    )
}

pub trait ChallengeStore {
    type Error: std::error::Error + Send + Sync + 'static;

    // The live challenge for `identity`, if any
    fn get(&self, identity: &Pubkey, now: u64) -> Result<Option<String>, Self::Error>;

    fn put(
        &self,
        identity: &Pubkey,
        message: String,
        ttl_secs: u64,
        now: u64,
    ) -> Result<(), Self::Error>;

    // Deletes the challenge only if it is still live and still `message`.
    // Returns whether this call removed it, so two racing redemptions of the
    // same challenge cannot both succeed.
    fn consume(&self, identity: &Pubkey, message: &str, now: u64) -> Result<bool, Self::Error>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    message: String,
    expires_at: u64,
}

impl Entry {
    fn is_live(&self, now: u64) -> bool {
        now < self.expires_at
    }
}

/// In-memory challenge store with expiry.
///
/// Expired entries are dropped lazily when touched.
#[derive(Debug, Default)]
pub struct MemoryChallengeStore {
    entries: RwLock<HashMap<Pubkey, Entry>>,
}

impl MemoryChallengeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ChallengeStore for MemoryChallengeStore {
    type Error = Infallible;

    fn get(&self, identity: &Pubkey, now: u64) -> Result<Option<String>, Self::Error> {
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        match entries.get(identity) {
            Some(entry) if entry.is_live(now) => Ok(Some(entry.message.clone())),
            Some(_) => {
                entries.remove(identity);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    fn put(
        &self,
        identity: &Pubkey,
        message: String,
        ttl_secs: u64,
        now: u64,
    ) -> Result<(), Self::Error> {
        self.entries
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(
                *identity,
                Entry {
                    message,
                    expires_at: now.saturating_add(ttl_secs),
                },
            );
        Ok(())
    }

    fn consume(&self, identity: &Pubkey, message: &str, now: u64) -> Result<bool, Self::Error> {
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let redeemable = entries
            .get(identity)
            .is_some_and(|entry| entry.is_live(now) && entry.message == message);
        if redeemable {
            entries.remove(identity);
        }
        Ok(redeemable)
    }
}
