use crate::constants::CHALLENGE_TTL_SECS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateConfig {
    pub challenge_ttl_secs: u64,
}

impl GateConfig {
    pub fn with_challenge_ttl(mut self, secs: u64) -> Self {
        self.challenge_ttl_secs = secs;
        self
    }
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            challenge_ttl_secs: CHALLENGE_TTL_SECS,
        }
    }
}
