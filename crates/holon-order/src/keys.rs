//! Order key generation
//!
//! New keys are placed halfway between their neighbours. With no upper
//! neighbour the key is placed `gap` above the lower one, so appends leave
//! room for later insertions.

use crate::error::{OrderError, Result};
use crate::record::Ordered;

/// Compute a key for a record inserted at `index` of `records`
///
/// `records` must be sorted ascending by order. The lower neighbour is
/// `records[index - 1]` (or 0 at the head), the upper one `records[index]`.
/// When the neighbours are adjacent integers the result equals one of them;
/// detecting that is left to the collision checks of the planners.
pub fn midpoint_key<R: Ordered>(index: usize, records: &[R], gap: i64) -> Result<i64> {
    let prev = index
        .checked_sub(1)
        .and_then(|i| records.get(i))
        .map(|record| record.order());
    let next = records.get(index).map(|record| record.order());

    key_between(prev, next, gap)
}

/// Midpoint between two optional neighbouring keys
///
/// A missing lower neighbour counts as 0; a missing upper one as `prev + 2 * gap`.
pub(crate) fn key_between(prev: Option<i64>, next: Option<i64>, gap: i64) -> Result<i64> {
    let prev = prev.unwrap_or(0);
    let next = match next {
        Some(next) => next,
        None => gap
            .checked_mul(2)
            .and_then(|room| prev.checked_add(room))
            .ok_or(OrderError::ArithmeticOverflow)?,
    };

    let sum = prev
        .checked_add(next)
        .ok_or(OrderError::ArithmeticOverflow)?;
    Ok(sum.div_euclid(2))
}

/// Generate `count` evenly spaced keys `gap, 2 * gap, ...`
///
/// Used to seed a collection that has no keys yet.
pub fn spaced_keys(count: usize, gap: i64) -> Result<Vec<i64>> {
    (1..=count)
        .map(|n| {
            i64::try_from(n)
                .ok()
                .and_then(|n| n.checked_mul(gap))
                .ok_or(OrderError::ArithmeticOverflow)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::OrderedRecord;

    fn records(orders: &[i64]) -> Vec<OrderedRecord<usize>> {
        orders
            .iter()
            .enumerate()
            .map(|(id, order)| OrderedRecord { id, order: *order })
            .collect()
    }

    #[test]
    fn test_midpoint_into_empty() {
        assert_eq!(midpoint_key::<OrderedRecord>(0, &[], 10_000).unwrap(), 10_000);
    }

    #[test]
    fn test_midpoint_at_beginning() {
        let recs = records(&[10_000, 20_000]);
        assert_eq!(midpoint_key(0, &recs, 10_000).unwrap(), 5_000);
    }

    #[test]
    fn test_midpoint_at_end() {
        let recs = records(&[10_000, 20_000]);
        assert_eq!(midpoint_key(2, &recs, 10_000).unwrap(), 30_000);
        assert_eq!(midpoint_key(2, &recs, 50).unwrap(), 20_050);
    }

    #[test]
    fn test_midpoint_between() {
        let recs = records(&[1, 2, 5]);
        assert_eq!(midpoint_key(2, &recs, 10_000).unwrap(), 3);
    }

    #[test]
    fn test_midpoint_of_adjacent_keys_collides() {
        let recs = records(&[1, 2]);
        assert_eq!(midpoint_key(1, &recs, 10_000).unwrap(), 1);
        assert_eq!(midpoint_key(0, &recs, 10_000).unwrap(), 0);
    }

    #[test]
    fn test_midpoint_in_front_of_zero_key_collides() {
        let recs = records(&[0, 10]);
        assert_eq!(midpoint_key(0, &recs, 10_000).unwrap(), 0);
    }

    #[test]
    fn test_midpoint_floors_odd_sum() {
        let recs = records(&[3, 10]);
        assert_eq!(midpoint_key(1, &recs, 10_000).unwrap(), 6);
    }

    #[test]
    fn test_midpoint_overflow() {
        let recs = records(&[i64::MAX - 1]);
        assert_eq!(
            midpoint_key(1, &recs, 10_000),
            Err(OrderError::ArithmeticOverflow)
        );
    }

    #[test]
    fn test_spaced_keys() {
        assert_eq!(spaced_keys(4, 100).unwrap(), vec![100, 200, 300, 400]);
        assert!(spaced_keys(0, 100).unwrap().is_empty());
        assert_eq!(
            spaced_keys(3, i64::MAX / 2),
            Err(OrderError::ArithmeticOverflow)
        );
    }
}
