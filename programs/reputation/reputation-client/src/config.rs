use solana_sdk::pubkey::Pubkey;

use crate::constants::{DEVNET_PROGRAM_ID, MAINNET_PROGRAM_ID};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cluster {
    #[default]
    Mainnet,
    Devnet,
    // A local validator or any other deployment of the program
    Custom(Pubkey),
}

impl Cluster {
    pub fn program_id(&self) -> Pubkey {
        match self {
            Cluster::Mainnet => MAINNET_PROGRAM_ID,
            Cluster::Devnet => DEVNET_PROGRAM_ID,
            Cluster::Custom(program_id) => *program_id,
        }
    }
}

// Whether relational listings include votes that were reverted to NoVote.
// The record stays on-chain after an undo, so both views are available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListingPolicy {
    // Only voters currently holding an up- or downvote
    #[default]
    ActiveVotes,
    // Every stored vote record, NoVote included
    AllRecords,
}

impl ListingPolicy {
    pub fn includes(&self, value: crate::vote::VoteValue) -> bool {
        match self {
            ListingPolicy::ActiveVotes => value.is_cast(),
            ListingPolicy::AllRecords => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientConfig {
    pub program_id: Pubkey,
    pub listing: ListingPolicy,
}

impl ClientConfig {
    pub fn for_cluster(cluster: Cluster) -> Self {
        Self {
            program_id: cluster.program_id(),
            listing: ListingPolicy::default(),
        }
    }

    pub fn with_listing(mut self, listing: ListingPolicy) -> Self {
        self.listing = listing;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::for_cluster(Cluster::default())
    }
}
