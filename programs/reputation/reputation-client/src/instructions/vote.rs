use std::sync::Arc;

use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
};
use solana_system_interface::program::ID as SYSTEM_PROGRAM_ID;

use super::ReputationInstruction;
use crate::{
    address::{AddressCache, DerivedAddress},
    config::ClientConfig,
    constants::IDENTITY_LEN,
    errors::{LayoutError, Result},
    vote::VoteValue,
};

// Vote instruction data, after the discriminator byte:
//   [user_key: 32][vote_value: u8]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteParams {
    // The votee
    pub user_key: Pubkey,
    pub vote_value: VoteValue,
}

impl VoteParams {
    pub const LEN: usize = IDENTITY_LEN + 1;

    pub fn pack(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(1 + Self::LEN);
        data.push(ReputationInstruction::Vote as u8);
        data.extend_from_slice(self.user_key.as_ref());
        data.push(u8::from(self.vote_value));
        data
    }

    // Inverse of `pack`, discriminator included
    pub fn unpack(instruction_data: &[u8]) -> std::result::Result<Self, LayoutError> {
        let (discriminator, data) = instruction_data.split_first().ok_or(LayoutError::Length {
            expected: 1 + Self::LEN,
            found: 0,
        })?;

        match ReputationInstruction::try_from(discriminator)? {
            ReputationInstruction::Vote => {}
        }

        if data.len() != Self::LEN {
            return Err(LayoutError::Length {
                expected: 1 + Self::LEN,
                found: instruction_data.len(),
            });
        }

        let mut user_key = [0u8; IDENTITY_LEN];
        user_key.copy_from_slice(&data[..IDENTITY_LEN]);

        Ok(Self {
            user_key: Pubkey::new_from_array(user_key),
            vote_value: VoteValue::try_from(u64::from(data[IDENTITY_LEN]))?,
        })
    }
}

// Account order expected by the program:
//
// | Index | Writable | Signer | Description                          |
// |-------|----------|--------|--------------------------------------|
// | 0     | no       | no     | System program                       |
// | 1     | yes      | yes    | Voter, also pays for new accounts    |
// | 2     | yes      | no     | Votee's reputation score PDA         |
// | 3     | yes      | no     | Voter's vote PDA for this votee      |
// | 4..   | no       | no     | Voter's stake accounts               |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteAccounts {
    pub voter: Pubkey,
    pub reputation_score: Pubkey,
    pub user_vote: Pubkey,
    pub stake_accounts: Vec<Pubkey>,
}

impl VoteAccounts {
    pub fn to_account_metas(&self) -> Vec<AccountMeta> {
        let mut metas = Vec::with_capacity(4 + self.stake_accounts.len());
        metas.push(AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false));
        metas.push(AccountMeta::new(self.voter, true));
        metas.push(AccountMeta::new(self.reputation_score, false));
        metas.push(AccountMeta::new(self.user_vote, false));
        metas.extend(
            self.stake_accounts
                .iter()
                .map(|stake| AccountMeta::new_readonly(*stake, false)),
        );
        metas
    }
}

/// A vote ready to be signed and submitted.
///
/// On execution the program reads the voter's prior vote, applies the same
/// delta table as [`crate::vote::delta`] to the score account and stores the
/// new vote, atomically. Nothing here has touched the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteIntent {
    pub instruction: Instruction,
    pub params: VoteParams,
    pub reputation_score: DerivedAddress,
    pub user_vote: DerivedAddress,
}

impl VoteIntent {
    pub fn into_instruction(self) -> Instruction {
        self.instruction
    }
}

pub struct VoteIntentBuilder {
    program_id: Pubkey,
    cache: Arc<AddressCache>,
}

impl VoteIntentBuilder {
    pub fn new(program_id: Pubkey) -> Self {
        Self {
            program_id,
            cache: Arc::new(AddressCache::new()),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.program_id)
    }

    pub fn with_cache(mut self, cache: Arc<AddressCache>) -> Self {
        self.cache = cache;
        self
    }

    // Fails only if an address cannot be derived
    pub fn build(&self, votee: &Pubkey, voter: &Pubkey, value: VoteValue) -> Result<VoteIntent> {
        self.build_with_stake(votee, voter, value, &[])
    }

    // Stake accounts are chosen by the caller; the program decides whether
    // they qualify the voter
    pub fn build_with_stake(
        &self,
        votee: &Pubkey,
        voter: &Pubkey,
        value: VoteValue,
        stake_accounts: &[Pubkey],
    ) -> Result<VoteIntent> {
        let reputation_score = self
            .cache
            .reputation_score_address(&self.program_id, votee)?;
        let user_vote = self
            .cache
            .user_vote_address(&self.program_id, votee, voter)?;

        let params = VoteParams {
            user_key: *votee,
            vote_value: value,
        };

        let accounts = VoteAccounts {
            voter: *voter,
            reputation_score: reputation_score.address,
            user_vote: user_vote.address,
            stake_accounts: stake_accounts.to_vec(),
        };

        let instruction = Instruction {
            program_id: self.program_id,
            accounts: accounts.to_account_metas(),
            data: params.pack(),
        };

        Ok(VoteIntent {
            instruction,
            params,
            reputation_score,
            user_vote,
        })
    }
}
