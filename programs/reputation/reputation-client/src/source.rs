// External account storage
//
// The ledger is only ever read through this trait. One call is one round trip:
// either the whole account is visible or none of it is. Implementations do not
// retry; transport failures come back as their own error type.

use std::{collections::BTreeMap, convert::Infallible, sync::RwLock};

use solana_sdk::pubkey::Pubkey;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAccount {
    pub owner: Pubkey,
    pub data: Vec<u8>,
}

// Predicates a scan applies to every account owned by the program.
// All filters of one scan must match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanFilter {
    DataSize(usize),
    Memcmp { offset: usize, bytes: Vec<u8> },
}

impl ScanFilter {
    pub fn memcmp(offset: usize, bytes: impl Into<Vec<u8>>) -> Self {
        ScanFilter::Memcmp {
            offset,
            bytes: bytes.into(),
        }
    }

    pub fn matches(&self, data: &[u8]) -> bool {
        match self {
            ScanFilter::DataSize(size) => data.len() == *size,
            ScanFilter::Memcmp { offset, bytes } => offset
                .checked_add(bytes.len())
                .and_then(|end| data.get(*offset..end))
                .is_some_and(|window| window == bytes.as_slice()),
        }
    }
}

pub trait AccountSource {
    type Error: std::error::Error + Send + Sync + 'static;

    // None when no account exists at the address
    fn get_account(&self, address: &Pubkey) -> Result<Option<StoredAccount>, Self::Error>;

    // Every account owned by `program_id` matching all filters, in no
    // particular order
    fn scan(
        &self,
        program_id: &Pubkey,
        filters: &[ScanFilter],
    ) -> Result<Vec<(Pubkey, Vec<u8>)>, Self::Error>;
}

impl<S: AccountSource + ?Sized> AccountSource for &S {
    type Error = S::Error;

    fn get_account(&self, address: &Pubkey) -> Result<Option<StoredAccount>, Self::Error> {
        (**self).get_account(address)
    }

    fn scan(
        &self,
        program_id: &Pubkey,
        filters: &[ScanFilter],
    ) -> Result<Vec<(Pubkey, Vec<u8>)>, Self::Error> {
        (**self).scan(program_id, filters)
    }
}

/// In-memory account store.
///
/// Stands in for the RPC node in tests and offline tooling. Writes are whole
/// accounts, so readers never observe a partially written record.
#[derive(Debug, Default)]
pub struct MemoryLedger {
    accounts: RwLock<BTreeMap<Pubkey, StoredAccount>>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, address: Pubkey, owner: Pubkey, data: Vec<u8>) {
        self.accounts
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(address, StoredAccount { owner, data });
    }

    pub fn remove(&self, address: &Pubkey) -> Option<StoredAccount> {
        self.accounts
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(address)
    }

    pub fn len(&self) -> usize {
        self.accounts
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AccountSource for MemoryLedger {
    type Error = Infallible;

    fn get_account(&self, address: &Pubkey) -> Result<Option<StoredAccount>, Self::Error> {
        Ok(self
            .accounts
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(address)
            .cloned())
    }

    fn scan(
        &self,
        program_id: &Pubkey,
        filters: &[ScanFilter],
    ) -> Result<Vec<(Pubkey, Vec<u8>)>, Self::Error> {
        let accounts = self
            .accounts
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        Ok(accounts
            .iter()
            .filter(|(_, account)| account.owner == *program_id)
            .filter(|(_, account)| filters.iter().all(|filter| filter.matches(&account.data)))
            .map(|(address, account)| (*address, account.data.clone()))
            .collect())
    }
}
