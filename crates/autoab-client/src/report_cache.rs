//! Cache for generated clinical reports, keyed by antibody and disease.
//!
//! Report generation is expensive, so a finished report is kept for a fixed
//! time-to-live. Expired entries are evicted when they are next looked up.

use std::collections::HashMap;
use std::sync::Mutex;

use autoab_common::{AutoabError, Result};
use autoab_config::ReportsConfig;
use chrono::{DateTime, Duration, Utc};
use tracing::debug;

pub trait ReportStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn put(&self, key: &str, report: String);
    fn invalidate(&self, key: &str);
}

/// Cache key for one antibody, optionally narrowed to a disease.
pub fn report_key(antibody: &str, disease: Option<&str>) -> String {
    let antibody = antibody.trim().to_lowercase();
    match disease.map(str::trim).filter(|d| !d.is_empty()) {
        Some(d) => format!("{antibody}::{}", d.to_lowercase()),
        None    => antibody,
    }
}

#[derive(Debug)]
struct CachedReport {
    stored_at: DateTime<Utc>,
    body: String,
}

#[derive(Debug)]
pub struct TtlReportCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, CachedReport>>,
}

impl TtlReportCache {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, entries: Mutex::new(HashMap::new()) }
    }

    /// Fails when `ttl_hours` does not fit a `chrono` duration.
    pub fn from_config(cfg: &ReportsConfig) -> Result<Self> {
        let ttl = i64::try_from(cfg.ttl_hours)
            .ok()
            .and_then(Duration::try_hours)
            .ok_or_else(|| {
                AutoabError::Config(format!("reports.ttl_hours out of range: {}", cfg.ttl_hours))
            })?;
        Ok(Self::new(ttl))
    }

    pub fn get_at(&self, key: &str, now: DateTime<Utc>) -> Option<String> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let expired = match entries.get(key) {
            Some(cached) if now - cached.stored_at < self.ttl => return Some(cached.body.clone()),
            Some(_) => true,
            None => false,
        };
        if expired {
            debug!(key, "Evicting expired report");
            entries.remove(key);
        }
        None
    }

    pub fn put_at(&self, key: &str, report: String, now: DateTime<Utc>) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), CachedReport { stored_at: now, body: report });
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ReportStore for TtlReportCache {
    fn get(&self, key: &str) -> Option<String> {
        self.get_at(key, Utc::now())
    }

    fn put(&self, key: &str, report: String) {
        self.put_at(key, report, Utc::now());
    }

    fn invalidate(&self, key: &str) {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).remove(key);
    }
}
