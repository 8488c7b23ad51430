//! Monthly OCR call budget.
//!
//! Each month gets its own counter under `gcv_quota_YYYYMM`, so a new month
//! starts from zero without any reset step. A failed OCR call hands its unit
//! back through `rollback`.

use std::collections::HashMap;

use chrono::{Datelike, Local, NaiveDate};

use crate::error::OverlayError;

pub const DEFAULT_MONTHLY_LIMIT: u32 = 1000;

/// Counter storage, keyed by month.
pub trait QuotaStore {
    fn get(&self, key: &str) -> Option<u32>;
    fn set(&mut self, key: &str, count: u32);
}

#[derive(Debug, Clone, Default)]
pub struct MemoryQuotaStore {
    counts: HashMap<String, u32>,
}

impl QuotaStore for MemoryQuotaStore {
    fn get(&self, key: &str) -> Option<u32> {
        self.counts.get(key).copied()
    }

    fn set(&mut self, key: &str, count: u32) {
        self.counts.insert(key.to_owned(), count);
    }
}

pub fn month_key(date: NaiveDate) -> String {
    format!("gcv_quota_{:04}{:02}", date.year(), date.month())
}

/// Proof of one consumed unit; pass it to `rollback` if the call fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotaTicket {
    pub key: String,
    /// Count after this unit was taken.
    pub count: u32,
}

#[derive(Debug)]
pub struct QuotaLedger<S = MemoryQuotaStore> {
    store: S,
    limit: u32,
}

impl QuotaLedger<MemoryQuotaStore> {
    pub fn in_memory(limit: u32) -> Self {
        Self::new(MemoryQuotaStore::default(), limit)
    }
}

impl<S: QuotaStore> QuotaLedger<S> {
    pub fn new(store: S, limit: u32) -> Self {
        Self { store, limit }
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn used_on(&self, date: NaiveDate) -> u32 {
        self.store.get(&month_key(date)).unwrap_or(0)
    }

    /// Take one unit from the current month.
    pub fn try_consume(&mut self) -> Result<QuotaTicket, OverlayError> {
        self.try_consume_on(Local::now().date_naive())
    }

    pub fn try_consume_on(&mut self, date: NaiveDate) -> Result<QuotaTicket, OverlayError> {
        let key = month_key(date);
        let used = self.store.get(&key).unwrap_or(0);
        if used >= self.limit {
            tracing::warn!(%key, used, limit = self.limit, "OCR quota exhausted");
            return Err(OverlayError::QuotaExhausted {
                used,
                limit: self.limit,
            });
        }
        let count = used + 1;
        self.store.set(&key, count);
        tracing::debug!(%key, count, "OCR quota consumed");
        Ok(QuotaTicket { key, count })
    }

    /// Return a unit taken by `ticket`. Never goes below zero.
    pub fn rollback(&mut self, ticket: QuotaTicket) {
        let current = self.store.get(&ticket.key).unwrap_or(1);
        let count = current.saturating_sub(1);
        self.store.set(&ticket.key, count);
        tracing::debug!(key = %ticket.key, count, "OCR quota rolled back");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn key_is_zero_padded() {
        assert_eq!(month_key(day(2025, 3, 9)), "gcv_quota_202503");
        assert_eq!(month_key(day(2025, 12, 31)), "gcv_quota_202512");
    }

    #[test]
    fn consumes_until_limit() {
        let mut ledger = QuotaLedger::in_memory(2);
        let today = day(2025, 10, 17);
        assert_eq!(ledger.try_consume_on(today).unwrap().count, 1);
        assert_eq!(ledger.try_consume_on(today).unwrap().count, 2);
        let err = ledger.try_consume_on(today).unwrap_err();
        assert!(matches!(err, OverlayError::QuotaExhausted { used: 2, limit: 2 }));
        assert_eq!(ledger.used_on(today), 2);
    }

    #[test]
    fn new_month_starts_fresh() {
        let mut ledger = QuotaLedger::in_memory(1);
        ledger.try_consume_on(day(2025, 10, 31)).unwrap();
        assert!(ledger.try_consume_on(day(2025, 10, 31)).is_err());
        assert!(ledger.try_consume_on(day(2025, 11, 1)).is_ok());
    }

    #[test]
    fn rollback_returns_unit() {
        let mut ledger = QuotaLedger::in_memory(1);
        let today = day(2025, 10, 17);
        let ticket = ledger.try_consume_on(today).unwrap();
        ledger.rollback(ticket);
        assert_eq!(ledger.used_on(today), 0);
        assert!(ledger.try_consume_on(today).is_ok());
    }

    #[test]
    fn rollback_never_negative() {
        let mut ledger = QuotaLedger::in_memory(5);
        ledger.rollback(QuotaTicket {
            key: "gcv_quota_202501".into(),
            count: 1,
        });
        assert_eq!(ledger.store().get("gcv_quota_202501"), Some(0));
    }
}
