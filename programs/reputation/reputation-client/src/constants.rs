use solana_sdk::{pubkey, pubkey::Pubkey};

// Deployed program addresses
pub const MAINNET_PROGRAM_ID: Pubkey = pubkey!("4X9mF1yUx2ez6ifYCmr2aYJnX5DkKAxbu5QD93s7gooG");

// Devnet deployment may lag behind mainnet
pub const DEVNET_PROGRAM_ID: Pubkey = pubkey!("HVFVK2UComnzuLfDbPukyt86LGi51iLQUL3aGBEVqLni");

// PDA derivation limits enforced by the runtime.
// The bump byte is appended as the last seed, so callers get one seed less.
pub const MAX_SEEDS: usize = 16;
pub const MAX_SEED_LEN: usize = 32;

// Field widths of the on-chain records
pub const TAG_LEN: usize = 8;
pub const BUMP_LEN: usize = 1;
pub const COUNTER_LEN: usize = 8;
pub const VOTE_VALUE_LEN: usize = 8;
pub const IDENTITY_LEN: usize = 32;

// Instruction discriminators (must match the program's instruction enum)
pub const VOTE_DISCRIMINATOR: u8 = 0;
