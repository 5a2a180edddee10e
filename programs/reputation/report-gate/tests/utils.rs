// Test utilities for the report gate

#![allow(dead_code)]

use ed25519_dalek::{Signer, SigningKey};
use rand::rngs::OsRng;
use report_gate::{GateConfig, MemoryChallengeStore, MemoryReportStore, ReportGate};
use solana_sdk::pubkey::Pubkey;

pub type MemoryGate = ReportGate<MemoryChallengeStore, MemoryReportStore>;

// Arbitrary fixed clock start, in unix seconds
pub const T0: u64 = 1_700_000_000;

pub fn setup_gate() -> MemoryGate {
    ReportGate::new(
        MemoryChallengeStore::new(),
        MemoryReportStore::new(),
        GateConfig::default(),
    )
}

pub struct Wallet {
    pub key: SigningKey,
    pub identity: Pubkey,
}

impl Wallet {
    pub fn new() -> Self {
        let key = SigningKey::generate(&mut OsRng);
        let identity = Pubkey::new_from_array(key.verifying_key().to_bytes());
        Self { key, identity }
    }

    // Hex signature over the challenge text, as a wallet adapter returns it
    pub fn sign_hex(&self, message: &str) -> String {
        hex::encode(self.key.sign(message.as_bytes()).to_bytes())
    }
}
