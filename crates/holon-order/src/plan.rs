//! Insert and move planning
//!
//! A plan is computed from a caller-supplied snapshot and never touches it.
//! The caller persists `changes` and hands `records` to the next call.

use tracing::{debug, warn};

use crate::apply::apply_changes;
use crate::changes::ChangeMap;
use crate::config::OrderConfig;
use crate::error::{OrderError, Result};
use crate::keys::midpoint_key;
use crate::rebalance::rebalance;
use crate::record::{validate_records, Ordered};

/// Outcome of planning an insertion
#[derive(Debug, Clone, PartialEq)]
pub struct InsertPlan<R: Ordered> {
    /// Keys that differ from their value before the call
    ///
    /// The inserted record only appears here when rebalancing moved it off its
    /// freshly computed key.
    pub changes: ChangeMap<R::Id>,
    /// New snapshot, sorted ascending by order
    pub records: Vec<R>,
    /// The inserted record carrying its final key
    pub inserted: R,
}

/// Outcome of planning a move
#[derive(Debug, Clone, PartialEq)]
pub struct MovePlan<R: Ordered> {
    /// Changed keys, always including the moved record unless the move is a no-op
    pub changes: ChangeMap<R::Id>,
    /// New snapshot, sorted ascending by order
    pub records: Vec<R>,
}

impl<R: Ordered> MovePlan<R> {
    /// True when nothing has to be persisted
    pub fn is_noop(&self) -> bool {
        self.changes.is_empty()
    }
}

/// Plan inserting `record` at `index` of `records`
///
/// `index` defaults to `records.len()` (append). The record gets the midpoint
/// key between its new neighbours; if that leaves it closer than
/// `config.minimum_gap` to either of them, the snapshot is rebalanced.
///
/// # Errors
/// - `DuplicateId` / `Unsorted` / `NegativeOrder` for an invalid snapshot, or
///   when `record`'s id is already present
/// - `IndexOutOfBounds` when `index > records.len()`
/// - `ArithmeticOverflow` when the keys run past the range of `i64`
pub fn plan_insert<R: Ordered>(
    records: &[R],
    record: R,
    index: Option<usize>,
    config: &OrderConfig,
) -> Result<InsertPlan<R>> {
    config.validate()?;
    validate_records(records)?;
    if records.iter().any(|existing| existing.id() == record.id()) {
        return Err(OrderError::duplicate_id(record.id()));
    }

    let index = index.unwrap_or(records.len());
    if index > records.len() {
        return Err(OrderError::IndexOutOfBounds {
            index,
            len: records.len(),
        });
    }

    insert_at(records, record, index, config).map_err(|err| {
        if err == OrderError::ArithmeticOverflow {
            warn!("[plan_insert] order keys exhausted inserting at {}", index);
        }
        err
    })
}

/// Plan moving the record at `from` so it ends up at position `to`
///
/// `to` is a position in the snapshot with the moved record taken out, so
/// `to == records.len() - 1` moves it to the end. Moving a record onto its
/// own position is a no-op with no changes.
///
/// The moved record's final key is always part of `changes`, even when no
/// rebalancing was needed.
pub fn plan_move<R: Ordered>(
    records: &[R],
    from: usize,
    to: usize,
    config: &OrderConfig,
) -> Result<MovePlan<R>> {
    if from == to {
        debug!("[plan_move] {} -> {} is a no-op", from, to);
        return Ok(MovePlan {
            changes: ChangeMap::new(),
            records: records.to_vec(),
        });
    }

    config.validate()?;
    validate_records(records)?;
    let len = records.len();
    for index in [from, to] {
        if index >= len {
            return Err(OrderError::IndexOutOfBounds { index, len });
        }
    }

    let mut remaining = records.to_vec();
    let moved = remaining.remove(from);

    let InsertPlan {
        mut changes,
        records,
        inserted,
    } = insert_at(&remaining, moved, to, config).map_err(|err| {
        if err == OrderError::ArithmeticOverflow {
            warn!("[plan_move] order keys exhausted moving {} -> {}", from, to);
        }
        err
    })?;

    changes.insert(inserted.id().clone(), inserted.order());
    debug!(
        "[plan_move] {} -> {}: {} key changes",
        from,
        to,
        changes.len()
    );

    Ok(MovePlan { changes, records })
}

/// Insert into an already validated snapshot
fn insert_at<R: Ordered>(
    records: &[R],
    mut record: R,
    index: usize,
    config: &OrderConfig,
) -> Result<InsertPlan<R>> {
    let order = midpoint_key(index, records, config.gap)?;

    // collisions are judged against the neighbours before insertion
    let upper_collision = index > 0
        && order.saturating_sub(records[index - 1].order()) < config.minimum_gap;
    let lower_collision = records
        .get(index)
        .is_some_and(|next| next.order().saturating_sub(order) < config.minimum_gap);

    debug!(
        "[plan_insert] index {} gets key {} (upper collision: {}, lower collision: {})",
        index, order, upper_collision, lower_collision
    );

    record.set_order(order);
    let mut working = Vec::with_capacity(records.len() + 1);
    working.extend_from_slice(records);
    working.insert(index, record.clone());

    if !upper_collision && !lower_collision {
        return Ok(InsertPlan {
            changes: ChangeMap::new(),
            records: working,
            inserted: record,
        });
    }

    let mut changes = ChangeMap::new();
    rebalance(&working, &mut changes, config)?;
    if let Some(order) = changes.get(record.id()) {
        record.set_order(order);
    }

    Ok(InsertPlan {
        records: apply_changes(&working, &changes),
        changes,
        inserted: record,
    })
}
