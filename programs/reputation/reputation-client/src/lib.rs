// Client library for the on-chain reputation program.
//
// Everything here runs off-chain: deriving record addresses, decoding the
// fixed-layout records, answering relational queries by scanning program
// accounts and building the vote instruction. Signing and submitting
// transactions is left to the caller.

pub mod address;
pub mod config;
pub mod constants;
pub mod errors;
pub mod instructions;
pub mod reader;
pub mod scanner;
pub mod source;
pub mod state;
pub mod vote;

pub use address::{AddressCache, DerivedAddress};
pub use config::{ClientConfig, Cluster, ListingPolicy};
pub use errors::{LedgerRejection, ReputationError, Result};
pub use instructions::{VoteIntent, VoteIntentBuilder};
pub use reader::LedgerReader;
pub use scanner::{LedgerScanner, VoteScan};
pub use source::{AccountSource, MemoryLedger, ScanFilter, StoredAccount};
pub use state::{ReputationScoreRecord, UserVoteRecord};
pub use vote::{VoteDelta, VoteValue};
