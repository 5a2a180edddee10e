// Off-chain intake for abuse reports about transactions and keys.
//
// A reporter proves control of their wallet by signing a one-time challenge;
// each reporter may file at most one report per subject. Transport and the
// lookup of transaction or key details are left to the caller.

pub mod challenge;
pub mod config;
pub mod constants;
pub mod errors;
pub mod gate;
pub mod report;

pub use challenge::{ChallengeStore, MemoryChallengeStore};
pub use config::GateConfig;
pub use errors::{GateError, Result};
pub use gate::{unix_now, verify_detached, ReportGate};
pub use report::{
    KeyDetails, MemoryReportStore, Report, ReportDetails, ReportStore, ReportSubject,
    TransactionDetails,
};
