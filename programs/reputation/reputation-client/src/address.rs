// Program-derived address search
//
// A derived address is sha256(seeds || [bump] || program_id || "ProgramDerivedAddress")
// that does NOT land on the ed25519 curve, so no private key can sign for it.
// Bumps are tried from 255 down to 0 and the first valid one wins. The on-chain
// program searches in the same order, so both sides agree on the canonical bump.

use std::{collections::HashMap, sync::RwLock};

use log::debug;
use solana_sdk::pubkey::Pubkey;

use crate::{
    constants::{MAX_SEEDS, MAX_SEED_LEN},
    errors::{ReputationError, Result},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DerivedAddress {
    pub address: Pubkey,
    pub bump: u8,
}

pub fn derive(seeds: &[&[u8]], program_id: &Pubkey) -> Result<DerivedAddress> {
    // One slot is reserved for the bump seed
    if seeds.len() >= MAX_SEEDS || seeds.iter().any(|seed| seed.len() > MAX_SEED_LEN) {
        return Err(ReputationError::InvalidSeeds);
    }

    for bump in (0..=u8::MAX).rev() {
        let bump_seed = [bump];
        let mut candidate: Vec<&[u8]> = Vec::with_capacity(seeds.len() + 1);
        candidate.extend_from_slice(seeds);
        candidate.push(&bump_seed);

        // Seeds were validated above, so a failure here means the
        // candidate hashed onto the curve. Try the next bump.
        if let Ok(address) = Pubkey::create_program_address(&candidate, program_id) {
            return Ok(DerivedAddress { address, bump });
        }
    }

    Err(ReputationError::DerivationExhausted)
}

// Seeds: [votee]
pub fn reputation_score_address(program_id: &Pubkey, votee: &Pubkey) -> Result<DerivedAddress> {
    derive(&[votee.as_ref()], program_id)
}

// Seeds: [votee, voter]. Order matters, votee first.
pub fn user_vote_address(
    program_id: &Pubkey,
    votee: &Pubkey,
    voter: &Pubkey,
) -> Result<DerivedAddress> {
    derive(&[votee.as_ref(), voter.as_ref()], program_id)
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    program_id: Pubkey,
    seeds: Vec<Vec<u8>>,
}

/// Read-through memo of derived addresses.
///
/// Derivation is pure, so entries never go stale. The cache is `Sync` and can
/// sit behind an `Arc` shared by readers, scanners and instruction builders.
#[derive(Debug, Default)]
pub struct AddressCache {
    entries: RwLock<HashMap<CacheKey, DerivedAddress>>,
}

impl AddressCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn derive(&self, seeds: &[&[u8]], program_id: &Pubkey) -> Result<DerivedAddress> {
        let key = CacheKey {
            program_id: *program_id,
            seeds: seeds.iter().map(|seed| seed.to_vec()).collect(),
        };

        // A poisoned lock only means another thread panicked mid-insert;
        // the map itself is still a valid memo.
        if let Some(hit) = self
            .entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(&key)
        {
            return Ok(*hit);
        }

        let derived = derive(seeds, program_id)?;
        debug!(
            "derived {} (bump {}) for {} seed(s)",
            derived.address,
            derived.bump,
            seeds.len()
        );

        self.entries
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(key, derived);

        Ok(derived)
    }

    pub fn reputation_score_address(
        &self,
        program_id: &Pubkey,
        votee: &Pubkey,
    ) -> Result<DerivedAddress> {
        self.derive(&[votee.as_ref()], program_id)
    }

    pub fn user_vote_address(
        &self,
        program_id: &Pubkey,
        votee: &Pubkey,
        voter: &Pubkey,
    ) -> Result<DerivedAddress> {
        self.derive(&[votee.as_ref(), voter.as_ref()], program_id)
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
