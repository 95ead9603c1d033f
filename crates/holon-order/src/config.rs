//! Spacing policy for order keys
//!
//! The policy is passed to every planning call instead of living in a global,
//! so callers with different spacing needs can share the crate.

use serde::{Deserialize, Serialize};

use crate::error::{OrderError, Result};

/// Default distance synthesized for new keys and tail extension
pub const DEFAULT_GAP: i64 = 10_000;

/// Default threshold below which two adjacent keys collide
pub const DEFAULT_MINIMUM_GAP: i64 = 5;

/// Spacing configuration for planning inserts and moves
///
/// Deserializes with either field omitted, so it can be embedded in a host
/// application's own configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderConfig {
    /// Room left above the last record, and the per-record spacing used when a
    /// collision window is extended past the tail
    pub gap: i64,
    /// Adjacent keys closer than this are treated as a collision
    pub minimum_gap: i64,
}

impl OrderConfig {
    pub fn new(gap: i64, minimum_gap: i64) -> Self {
        Self { gap, minimum_gap }
    }

    pub fn with_gap(mut self, gap: i64) -> Self {
        self.gap = gap;
        self
    }

    pub fn with_minimum_gap(mut self, minimum_gap: i64) -> Self {
        self.minimum_gap = minimum_gap;
        self
    }

    /// Check the policy can actually make room for insertions
    pub fn validate(&self) -> Result<()> {
        if self.gap < 1 {
            return Err(OrderError::InvalidConfig(format!(
                "gap must be at least 1, got {}",
                self.gap
            )));
        }
        if self.minimum_gap < 0 {
            return Err(OrderError::InvalidConfig(format!(
                "minimum_gap must not be negative, got {}",
                self.minimum_gap
            )));
        }
        Ok(())
    }
}

impl Default for OrderConfig {
    fn default() -> Self {
        Self::new(DEFAULT_GAP, DEFAULT_MINIMUM_GAP)
    }
}
