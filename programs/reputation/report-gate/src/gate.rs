// Report intake gated by a signed challenge
//
// Flow per identity:
//   1. issue_challenge hands out a message with a fresh nonce
//   2. the wallet signs it off-line
//   3. submit verifies the detached signature, consumes the challenge and
//      records the report unless this reporter already filed one on the subject
//
// The challenge is consumed before the duplicate check, so a duplicate still
// costs the reporter a fresh challenge.

use std::time::{SystemTime, UNIX_EPOCH};

use ed25519_dalek::{Signature, Verifier, VerifyingKey};
use log::{info, warn};
use solana_sdk::pubkey::Pubkey;
use uuid::Uuid;

use crate::{
    challenge::{challenge_message, ChallengeStore},
    config::GateConfig,
    constants::SIGNATURE_LEN,
    errors::{GateError, Result},
    report::{Report, ReportDetails, ReportStore, ReportSubject},
};

// Current unix time in seconds, for callers without their own clock.
// A clock set before the epoch is an error rather than time zero, which would
// make every stored challenge look live.
pub fn unix_now() -> Result<u64> {
    let elapsed = SystemTime::now().duration_since(UNIX_EPOCH).map_err(|err| {
        warn!("system clock is {:?} before the unix epoch", err.duration());
        GateError::Clock(err)
    })?;
    Ok(elapsed.as_secs())
}

pub struct ReportGate<C, R> {
    challenges: C,
    reports: R,
    config: GateConfig,
}

impl<C: ChallengeStore, R: ReportStore> ReportGate<C, R> {
    pub fn new(challenges: C, reports: R, config: GateConfig) -> Self {
        Self {
            challenges,
            reports,
            config,
        }
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    pub fn challenges(&self) -> &C {
        &self.challenges
    }

    pub fn reports(&self) -> &R {
        &self.reports
    }

    pub fn issue_challenge(&self, identity: &Pubkey, now: u64) -> Result<String> {
        let pending = self
            .challenges
            .get(identity, now)
            .map_err(GateError::from_store)?;
        if pending.is_some() {
            return Err(GateError::ChallengePending {
                identity: *identity,
            });
        }

        let message = challenge_message(identity, &Uuid::new_v4());
        self.challenges
            .put(identity, message.clone(), self.config.challenge_ttl_secs, now)
            .map_err(GateError::from_store)?;

        info!(
            "issued challenge for {} (ttl {}s)",
            identity, self.config.challenge_ttl_secs
        );
        Ok(message)
    }

    pub fn submit(
        &self,
        identity: &Pubkey,
        signature_hex: &str,
        subject: ReportSubject,
        details: Option<ReportDetails>,
        now: u64,
    ) -> Result<Report> {
        let result = self.try_submit(identity, signature_hex, subject, details, now);
        match &result {
            Ok(report) => info!("accepted report on {} from {}", report.subject, identity),
            Err(err) => warn!("rejected report from {}: {}", identity, err),
        }
        result
    }

    fn try_submit(
        &self,
        identity: &Pubkey,
        signature_hex: &str,
        subject: ReportSubject,
        details: Option<ReportDetails>,
        now: u64,
    ) -> Result<Report> {
        if details.is_some_and(|details| !details.fits(&subject)) {
            return Err(GateError::MismatchedDetails { subject });
        }

        let message = self
            .challenges
            .get(identity, now)
            .map_err(GateError::from_store)?
            .ok_or(GateError::ChallengeNotFound {
                identity: *identity,
            })?;

        // A bad signature leaves the challenge in place for another attempt
        if !verify_detached(identity, &message, signature_hex) {
            return Err(GateError::InvalidSignature {
                identity: *identity,
            });
        }

        let consumed = self
            .challenges
            .consume(identity, &message, now)
            .map_err(GateError::from_store)?;
        if !consumed {
            return Err(GateError::ChallengeNotFound {
                identity: *identity,
            });
        }

        let report = Report {
            subject,
            reporter: *identity,
            details,
            reported_at: now,
        };

        // Check and insert in one step, so two redemptions racing on the
        // same subject cannot both land
        let inserted = self
            .reports
            .insert_if_absent(report.clone())
            .map_err(GateError::from_store)?;
        if !inserted {
            return Err(GateError::AlreadyReported {
                subject: report.subject,
                reporter: *identity,
            });
        }

        Ok(report)
    }
}

// Hex-encoded detached ed25519 signature by `identity` over `message`
pub fn verify_detached(identity: &Pubkey, message: &str, signature_hex: &str) -> bool {
    let Ok(raw) = hex::decode(signature_hex) else {
        return false;
    };
    let Ok(raw) = <[u8; SIGNATURE_LEN]>::try_from(raw.as_slice()) else {
        return false;
    };
    let Ok(key) = VerifyingKey::from_bytes(&identity.to_bytes()) else {
        return false;
    };

    key.verify(message.as_bytes(), &Signature::from_bytes(&raw))
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ed25519_dalek::{Signer, SigningKey};

    fn signing_key() -> SigningKey {
        SigningKey::from_bytes(&[9u8; 32])
    }

    fn identity_of(key: &SigningKey) -> Pubkey {
        Pubkey::new_from_array(key.verifying_key().to_bytes())
    }

    #[test]
    fn verify_detached_accepts_only_the_signed_message() {
        let key = signing_key();
        let identity = identity_of(&key);
        let signature = hex::encode(key.sign(b"hello").to_bytes());

        assert!(verify_detached(&identity, "hello", &signature));
        assert!(!verify_detached(&identity, "hello!", &signature));
        assert!(!verify_detached(&identity, "hello", "zz"));
        assert!(!verify_detached(&identity, "hello", &signature[..64]));
    }

    #[test]
    fn unix_now_is_after_2020() {
        assert!(unix_now().unwrap() > 1_577_836_800);
    }
}
