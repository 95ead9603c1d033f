use thiserror::Error;

/// Errors raised while planning an insert or move
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    #[error("Duplicate record id: {id}")]
    DuplicateId { id: String },

    #[error("Records not sorted by order: position {index} has order {order} below {previous}")]
    Unsorted {
        index: usize,
        previous: i64,
        order: i64,
    },

    #[error("Negative order {order} at position {index}")]
    NegativeOrder { index: usize, order: i64 },

    #[error("Index {index} out of bounds for {len} records")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Order key arithmetic overflowed")]
    ArithmeticOverflow,
}

impl OrderError {
    /// True for errors caused by the caller's input rather than by the keys running out of room.
    ///
    /// These are never retried internally; the caller has to supply valid input.
    pub fn is_invalid_input(&self) -> bool {
        !matches!(self, OrderError::ArithmeticOverflow)
    }

    pub(crate) fn duplicate_id(id: &impl std::fmt::Debug) -> Self {
        OrderError::DuplicateId {
            id: format!("{:?}", id),
        }
    }
}

pub type Result<T> = std::result::Result<T, OrderError>;
