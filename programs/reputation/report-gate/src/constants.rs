// How long an issued challenge stays redeemable, in seconds
pub const CHALLENGE_TTL_SECS: u64 = 2 * 60;

// Challenge text shown to the wallet before signing. The identity and a fresh
// nonce are appended by `challenge_message`.
pub const CHALLENGE_PREAMBLE: &str = "Authenticate wallet";

// Detached ed25519 signatures arrive hex encoded
pub const SIGNATURE_LEN: usize = 64;
