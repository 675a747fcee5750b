//! Engine error types.

use crate::{OrderId, Quantity};

/// Errors produced by the order book.
///
/// `NonPositivePrice` and `ZeroQuantity` are validation failures at order
/// construction; the book is never touched. `InvalidFill` guards the
/// matching engine itself: a fill larger than an order's remaining
/// quantity means a bug in the crossing loop, and the error propagates
/// out of the submitting call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("fill of {requested} exceeds remaining quantity {remaining} on order {id}")]
    InvalidFill {
        id: OrderId,
        requested: Quantity,
        remaining: Quantity,
    },

    #[error("price must be positive, got {0}")]
    NonPositivePrice(i32),

    #[error("quantity must be positive")]
    ZeroQuantity,
}
