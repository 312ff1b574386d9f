use std::collections::VecDeque;
use std::fmt;

use chrono::{DateTime, Utc};

use crate::core::error::{AppError, Result};
use crate::shared::validation::ACTION_KEY_REGEX;

/// Tag identifying a rate-limited operation, e.g. `open_booster`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActionKey(String);

impl ActionKey {
    /// Parse and validate a key coming from outside the crate
    pub fn parse(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if !ACTION_KEY_REGEX.is_match(&value) {
            return Err(AppError::Validation(format!(
                "Invalid action key '{}': expected lowercase snake case",
                value
            )));
        }
        Ok(Self(value))
    }

    /// Build a key from a compile-time literal declared in `policies`
    pub fn from_static(value: &'static str) -> Self {
        Self(value.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ledger key: one record per (user, action)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LedgerKey {
    pub user_id: String,
    pub action: ActionKey,
}

impl LedgerKey {
    pub fn new(user_id: impl Into<String>, action: ActionKey) -> Self {
        Self {
            user_id: user_id.into(),
            action,
        }
    }
}

/// Recent call instants for one (user, action), oldest first.
///
/// Timestamps never decrease in insertion order; `push` clamps an instant
/// that lies before the latest one.
#[derive(Debug, Clone)]
pub struct ActionRecord {
    key: LedgerKey,
    timestamps: VecDeque<DateTime<Utc>>,
    retired: bool,
}

impl ActionRecord {
    pub fn new(key: LedgerKey) -> Self {
        Self {
            key,
            timestamps: VecDeque::new(),
            retired: false,
        }
    }

    pub fn key(&self) -> &LedgerKey {
        &self.key
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn timestamps(&self) -> impl Iterator<Item = &DateTime<Utc>> {
        self.timestamps.iter()
    }

    pub fn latest(&self) -> Option<DateTime<Utc>> {
        self.timestamps.back().copied()
    }

    /// Number of calls strictly after `cutoff`
    pub fn count_since(&self, cutoff: DateTime<Utc>) -> usize {
        self.timestamps
            .iter()
            .rev()
            .take_while(|t| **t > cutoff)
            .count()
    }

    /// The `n`-th oldest call strictly after `cutoff` (0-based)
    pub fn nth_since(&self, cutoff: DateTime<Utc>, n: usize) -> Option<DateTime<Utc>> {
        let first_inside = self.timestamps.len() - self.count_since(cutoff);
        self.timestamps.get(first_inside + n).copied()
    }

    /// Drop calls at or before `cutoff`, always keeping the latest one so the
    /// minimum-delay rule survives long idle periods. Returns how many were dropped.
    pub fn prune_before(&mut self, cutoff: DateTime<Utc>) -> usize {
        let mut dropped = 0;
        while self.timestamps.len() > 1 {
            match self.timestamps.front() {
                Some(oldest) if *oldest <= cutoff => {
                    self.timestamps.pop_front();
                    dropped += 1;
                }
                _ => break,
            }
        }
        dropped
    }

    /// Append a call instant and return the instant actually stored
    pub fn push(&mut self, at: DateTime<Utc>) -> DateTime<Utc> {
        let at = match self.latest() {
            Some(latest) if at < latest => latest,
            _ => at,
        };
        self.timestamps.push_back(at);
        at
    }

    pub(crate) fn retire(&mut self) {
        self.retired = true;
    }

    pub(crate) fn is_retired(&self) -> bool {
        self.retired
    }
}
