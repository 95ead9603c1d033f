//! Spacing rebalancer
//!
//! Scans a sorted snapshot for adjacent keys that are too close together and
//! spreads keys evenly over the smallest run of records that restores room,
//! instead of renumbering the whole collection.
//!
//! A scan works on a copy of the keys and records into the change map only
//! the ids whose key ends up different from the one they started with.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::changes::ChangeMap;
use crate::config::OrderConfig;
use crate::error::{OrderError, Result};
use crate::keys::key_between;
use crate::record::Ordered;

/// Compute the key changes that restore spacing in `records`
///
/// `records` must be sorted ascending by order and already contain the
/// inserted or moved record. Changes are added to `changes`. When a key ends
/// up back on its starting value, the entry this call added for it is dropped
/// again; an entry the caller put in `changes` beforehand is restored to the
/// caller's value instead.
///
/// A pair of neighbours collides when their distance is at most
/// `config.minimum_gap`. Each collision grows a window `[i, k]` over the run of
/// neighbours closer than `minimum_gap` and spaces the window's keys evenly:
///
/// - at the head, the first key is pulled down (halved, then placed midway to
///   its neighbour) to make room below the second record
/// - a window reaching the last record is stretched by `gap` per record, so the
///   tail keeps room for appends
/// - a collision in the final pair only pushes the last key up by `gap`
///
/// Spreading never widens an interior window beyond the span between its end
/// keys, so a window that stops short of the tail can stay tighter than
/// `minimum_gap`. Only windows reaching the head or the tail get extra room.
/// Collisions outside the scanned windows are left for later calls.
pub fn rebalance<R: Ordered>(
    records: &[R],
    changes: &mut ChangeMap<R::Id>,
    config: &OrderConfig,
) -> Result<()> {
    config.validate()?;

    let seeded = records
        .iter()
        .filter_map(|record| {
            changes
                .get(record.id())
                .map(|order| (record.id().clone(), order))
        })
        .collect();
    let mut spacing = Spacing {
        records,
        working: records.iter().map(|record| record.order()).collect(),
        seeded,
        changes,
    };
    let before = spacing.changes.len();
    spacing.run(config)?;

    debug!(
        "[rebalance] {} records scanned, {} key changes recorded",
        records.len(),
        spacing.changes.len().saturating_sub(before)
    );
    Ok(())
}

struct Spacing<'a, R: Ordered> {
    records: &'a [R],
    working: Vec<i64>,
    /// Entries the caller recorded before this scan
    seeded: HashMap<R::Id, i64>,
    changes: &'a mut ChangeMap<R::Id>,
}

impl<R: Ordered> Spacing<'_, R> {
    fn run(&mut self, config: &OrderConfig) -> Result<()> {
        let len = self.working.len();
        let mut i = 0;

        while i + 1 < len {
            if self.distance(i)? > config.minimum_gap {
                i += 1;
                continue;
            }

            if i == 0 {
                let halved = self.working[0].div_euclid(2);
                let head = key_between(Some(halved), Some(self.working[1]), config.gap)?;
                self.assign(0, head);
            }

            if i == len - 2 {
                let tail = checked(self.working[len - 1].checked_add(config.gap))?;
                self.assign(len - 1, tail);
                i += 1;
                continue;
            }

            let mut k = i + 1;
            while k < len - 1 && self.distance(k - 1)? < config.minimum_gap {
                k += 1;
            }

            self.spread(i, k, config.gap)?;
            i = k;
        }

        if len >= 2 && self.working[0] == 0 {
            let head = self.working[1].div_euclid(2);
            self.assign(0, head);
        }

        Ok(())
    }

    /// Distance between the keys at `i` and `i + 1`
    fn distance(&self, i: usize) -> Result<i64> {
        checked(self.working[i + 1].checked_sub(self.working[i]))
    }

    /// Space the keys of window `[i, k]` evenly from its lower key
    fn spread(&mut self, i: usize, k: usize, gap: i64) -> Result<()> {
        let width = checked(i64::try_from(k - i).ok())?;
        let lower = self.working[i];
        let mut upper = self.working[k];
        if k == self.working.len() - 1 {
            upper = checked(gap.checked_mul(width).and_then(|room| upper.checked_add(room)))?;
        }

        let step = checked(upper.checked_sub(lower))?.div_euclid(width);
        trace!(
            "[rebalance] window {}..={} spans {}..{}, step {}",
            i,
            k,
            lower,
            upper,
            step
        );

        for (offset, j) in (i..=k).enumerate() {
            let order = checked(
                step.checked_mul(offset as i64)
                    .and_then(|rise| lower.checked_add(rise)),
            )?;
            self.assign(j, order);
        }
        Ok(())
    }

    fn assign(&mut self, index: usize, order: i64) {
        self.working[index] = order;

        let record = &self.records[index];
        if order == record.order() {
            match self.seeded.get(record.id()) {
                Some(&seeded) => {
                    self.changes.insert(record.id().clone(), seeded);
                }
                None => {
                    self.changes.remove(record.id());
                }
            }
        } else {
            self.changes.insert(record.id().clone(), order);
        }
    }
}

fn checked(value: Option<i64>) -> Result<i64> {
    value.ok_or(OrderError::ArithmeticOverflow)
}
