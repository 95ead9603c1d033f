//! Sparse integer order keys for persisted collections
//!
//! Records are kept in a total order by an integer `order` key with large gaps
//! between neighbours. Inserting or moving a record picks a key between its
//! new neighbours; only when neighbours get too close is a small window of
//! records re-spaced. The result of every planning call is:
//! - a new sorted snapshot to pass into the next call
//! - a [`ChangeMap`] with just the keys that have to be written back
//!
//! Large change sets can be written in bounded transactions with
//! [`ChangeMap::into_batches`] or [`BatchExt::batches`].
//!
//! All operations are pure computations over caller-owned snapshots.

pub mod apply;
pub mod batch;
pub mod changes;
pub mod config;
pub mod error;
pub mod keys;
pub mod plan;
pub mod rebalance;
pub mod record;

pub use apply::apply_changes;
pub use batch::{batches, BatchExt, Batches};
pub use changes::ChangeMap;
pub use config::{OrderConfig, DEFAULT_GAP, DEFAULT_MINIMUM_GAP};
pub use error::{OrderError, Result};
pub use keys::{midpoint_key, spaced_keys};
pub use plan::{plan_insert, plan_move, InsertPlan, MovePlan};
pub use rebalance::rebalance;
pub use record::{validate_records, Ordered, OrderedRecord};
