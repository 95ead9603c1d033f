//! Records carrying a sparse integer order key
//!
//! Planners work on any type implementing [`Ordered`], so a persistence layer
//! can hand over its own row type. [`OrderedRecord`] is the plain `{ id, order }`
//! shape for callers that don't have one.

use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::error::{OrderError, Result};

/// Entities that are kept in a total order by an integer key
pub trait Ordered: Clone {
    /// Identifier, unique within a collection and stable across operations
    type Id: Clone + Eq + Hash + Debug;

    fn id(&self) -> &Self::Id;
    fn order(&self) -> i64;
    fn set_order(&mut self, order: i64);
}

/// A record identified by `id` and positioned by `order`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderedRecord<Id = String> {
    pub id: Id,
    pub order: i64,
}

impl<Id> OrderedRecord<Id> {
    pub fn new(id: impl Into<Id>, order: i64) -> Self {
        Self {
            id: id.into(),
            order,
        }
    }
}

impl<Id> Ordered for OrderedRecord<Id>
where
    Id: Clone + Eq + Hash + Debug,
{
    type Id = Id;

    fn id(&self) -> &Id {
        &self.id
    }

    fn order(&self) -> i64 {
        self.order
    }

    fn set_order(&mut self, order: i64) {
        self.order = order;
    }
}

/// Check a snapshot is sorted ascending by order and has no repeated ids
///
/// Keys must not be negative: the head of a collection is bounded by 0, so a
/// key below it leaves no room to insert in front.
pub fn validate_records<R: Ordered>(records: &[R]) -> Result<()> {
    let mut seen = HashSet::with_capacity(records.len());

    for (index, record) in records.iter().enumerate() {
        if !seen.insert(record.id()) {
            return Err(OrderError::duplicate_id(record.id()));
        }
        if record.order() < 0 {
            return Err(OrderError::NegativeOrder {
                index,
                order: record.order(),
            });
        }
        if index > 0 {
            let previous = records[index - 1].order();
            if record.order() < previous {
                return Err(OrderError::Unsorted {
                    index,
                    previous,
                    order: record.order(),
                });
            }
        }
    }

    Ok(())
}
