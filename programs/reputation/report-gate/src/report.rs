use std::{convert::Infallible, fmt, sync::RwLock};

use solana_sdk::pubkey::Pubkey;

// What a report is about
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ReportSubject {
    // Base58 transaction signature, taken as given
    Transaction(String),
    Key(Pubkey),
}

impl fmt::Display for ReportSubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportSubject::Transaction(signature) => write!(f, "transaction {}", signature),
            ReportSubject::Key(key) => write!(f, "key {}", key),
        }
    }
}

// Looked up by the caller from a confirmed transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionDetails {
    pub slot: u64,
    pub block_time: Option<i64>,
    pub successful: bool,
    // Whether the reporter signed or appears in the transaction's accounts
    pub reporter_involved: bool,
}

// None of these exist for a key with no account
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyDetails {
    pub owner: Option<Pubkey>,
    pub executable: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportDetails {
    Transaction(TransactionDetails),
    Key(KeyDetails),
}

impl ReportDetails {
    // Details must describe the same kind of subject they are filed with
    pub fn fits(&self, subject: &ReportSubject) -> bool {
        matches!(
            (self, subject),
            (ReportDetails::Transaction(_), ReportSubject::Transaction(_))
                | (ReportDetails::Key(_), ReportSubject::Key(_))
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub subject: ReportSubject,
    pub reporter: Pubkey,
    pub details: Option<ReportDetails>,
    // Unix seconds
    pub reported_at: u64,
}

pub trait ReportStore {
    type Error: std::error::Error + Send + Sync + 'static;

    fn contains(&self, subject: &ReportSubject, reporter: &Pubkey) -> Result<bool, Self::Error>;

    // Stores `report` unless its reporter already filed on the same subject.
    // Returns whether it was stored. The check and the write are one step.
    fn insert_if_absent(&self, report: Report) -> Result<bool, Self::Error>;
}

/// Append-only in-memory report log.
#[derive(Debug, Default)]
pub struct MemoryReportStore {
    reports: RwLock<Vec<Report>>,
}

impl MemoryReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> Vec<Report> {
        self.reports
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    // Reports filed about `subject`, by anyone
    pub fn reports_on(&self, subject: &ReportSubject) -> Vec<Report> {
        self.reports
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .filter(|report| report.subject == *subject)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.reports
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ReportStore for MemoryReportStore {
    type Error = Infallible;

    fn contains(&self, subject: &ReportSubject, reporter: &Pubkey) -> Result<bool, Self::Error> {
        Ok(self
            .reports
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .any(|report| report.subject == *subject && report.reporter == *reporter))
    }

    fn insert_if_absent(&self, report: Report) -> Result<bool, Self::Error> {
        let mut reports = self
            .reports
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let filed = reports.iter().any(|existing| {
            existing.subject == report.subject && existing.reporter == report.reporter
        });
        if !filed {
            reports.push(report);
        }
        Ok(!filed)
    }
}
