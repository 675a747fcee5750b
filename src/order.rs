//! Order representation and the cancel-and-replace request

use crate::{EngineError, OrderId, Price, Quantity, Side, TimeInForce};

/// An order resting in (or being submitted to) the book.
///
/// Immutable after construction except for fills, which only decrease
/// `remaining_quantity`. The initial quantity never changes.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Order {
    /// Unique identifier, chosen by the caller
    pub id: OrderId,
    /// Buy or sell
    pub side: Side,
    /// GTC or FOK
    pub time_in_force: TimeInForce,
    /// Limit price (max for buy, min for sell)
    pub price: Price,
    /// Original order size
    pub initial_quantity: Quantity,
    /// Unfilled portion
    pub remaining_quantity: Quantity,
}

impl Order {
    /// Create a new order.
    ///
    /// Returns [`EngineError::NonPositivePrice`] or
    /// [`EngineError::ZeroQuantity`] when the arguments are out of range;
    /// the caller is rejected at the boundary and the book never sees the
    /// order.
    pub fn new(
        id: OrderId,
        side: Side,
        time_in_force: TimeInForce,
        price: Price,
        quantity: Quantity,
    ) -> Result<Self, EngineError> {
        if price.0 <= 0 {
            return Err(EngineError::NonPositivePrice(price.0));
        }
        if quantity == 0 {
            return Err(EngineError::ZeroQuantity);
        }
        Ok(Self {
            id,
            side,
            time_in_force,
            price,
            initial_quantity: quantity,
            remaining_quantity: quantity,
        })
    }

    /// Quantity executed so far.
    #[inline]
    pub fn filled_quantity(&self) -> Quantity {
        self.initial_quantity - self.remaining_quantity
    }

    /// Returns true once the order is fully executed.
    #[inline]
    pub fn is_filled(&self) -> bool {
        self.remaining_quantity == 0
    }

    /// Execute a partial or complete fill against this order.
    ///
    /// Returns [`EngineError::InvalidFill`] if `quantity` exceeds the
    /// remaining quantity; that indicates a matching-engine bug, not a
    /// caller mistake.
    pub fn fill(&mut self, quantity: Quantity) -> Result<(), EngineError> {
        if quantity > self.remaining_quantity {
            return Err(EngineError::InvalidFill {
                id: self.id,
                requested: quantity,
                remaining: self.remaining_quantity,
            });
        }
        self.remaining_quantity -= quantity;
        Ok(())
    }
}

/// Cancel-and-replace request for an existing order.
///
/// Carries the full order shape the CSV format supplies. The engine
/// ignores `time_in_force` here and preserves the duration of the order
/// being replaced; side, price, and quantity all take effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrderModify {
    /// Order to replace
    pub id: OrderId,
    /// New side
    pub side: Side,
    /// Ignored; the existing order's duration wins
    pub time_in_force: TimeInForce,
    /// New price
    pub price: Price,
    /// New quantity
    pub quantity: Quantity,
}

impl OrderModify {
    pub fn new(
        id: OrderId,
        side: Side,
        time_in_force: TimeInForce,
        price: Price,
        quantity: Quantity,
    ) -> Self {
        Self {
            id,
            side,
            time_in_force,
            price,
            quantity,
        }
    }

    /// Build the replacement order, carrying over the duration of the
    /// order being replaced. Validation applies as in [`Order::new`].
    pub fn to_order(self, time_in_force: TimeInForce) -> Result<Order, EngineError> {
        Order::new(self.id, self.side, time_in_force, self.price, self.quantity)
    }
}
