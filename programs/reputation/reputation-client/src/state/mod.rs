pub mod reputation_score;
pub mod user_vote;

pub use reputation_score::*;
pub use user_vote::*;

use solana_sdk::pubkey::Pubkey;

use crate::{
    constants::{IDENTITY_LEN, TAG_LEN},
    errors::LayoutError,
};

// Record kind discriminant stored in the first 8 bytes of every account
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u64)]
pub enum Tag {
    Uninitialized = 0,
    ReputationScore = 1,
    UserVote = 2,
}

impl Tag {
    pub const fn value(self) -> u64 {
        self as u64
    }

    pub const fn to_le_bytes(self) -> [u8; TAG_LEN] {
        (self as u64).to_le_bytes()
    }
}

// Allocated accounts start zeroed, so an empty buffer or an all-zero buffer
// of exactly the record width carries the Uninitialized tag and no data.
// Readers treat it like a missing account. Any other length is left to the
// decoder to reject.
pub fn is_blank(bytes: &[u8], len: usize) -> bool {
    bytes.is_empty() || (bytes.len() == len && bytes.iter().all(|byte| *byte == 0))
}

fn check_len(bytes: &[u8], expected: usize) -> Result<(), LayoutError> {
    if bytes.len() != expected {
        return Err(LayoutError::Length {
            expected,
            found: bytes.len(),
        });
    }
    Ok(())
}

fn check_tag(bytes: &[u8], expected: Tag) -> Result<(), LayoutError> {
    let found = read_u64(bytes, 0);
    if found != expected.value() {
        return Err(LayoutError::Tag {
            expected: expected.value(),
            found,
        });
    }
    Ok(())
}

// Callers check the buffer length before reading fields
fn read_u64(bytes: &[u8], offset: usize) -> u64 {
    let mut raw = [0u8; 8];
    raw.copy_from_slice(&bytes[offset..offset + 8]);
    u64::from_le_bytes(raw)
}

fn read_identity(bytes: &[u8], offset: usize) -> Pubkey {
    let mut raw = [0u8; IDENTITY_LEN];
    raw.copy_from_slice(&bytes[offset..offset + IDENTITY_LEN]);
    Pubkey::new_from_array(raw)
}
