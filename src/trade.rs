//! Trade representation

use std::fmt;

use crate::{OrderId, Price, Quantity};

/// Execution details for one side of a matched trade.
///
/// The price is the participating order's own limit price. Because both
/// participants report their own resting price, a single trade can carry
/// different bid and ask prices; downstream consumers rely on per-side
/// reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TradeInfo {
    /// Order that participated in the trade
    pub order_id: OrderId,
    /// That order's limit price
    pub price: Price,
    /// Executed quantity
    pub quantity: Quantity,
}

/// A completed trade between a bid and an ask.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trade {
    /// Buyer side execution details
    pub bid: TradeInfo,
    /// Seller side execution details
    pub ask: TradeInfo,
}

impl Trade {
    /// Executed quantity; equal on both sides.
    #[inline]
    pub fn quantity(&self) -> Quantity {
        self.bid.quantity
    }
}

impl fmt::Display for Trade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "bid {} @ {} x {} / ask {} @ {} x {}",
            self.bid.order_id,
            self.bid.price,
            self.bid.quantity,
            self.ask.order_id,
            self.ask.price,
            self.ask.quantity
        )
    }
}
