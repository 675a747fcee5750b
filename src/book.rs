//! OrderBook: both sides of the book plus the central order index.
//!
//! This is the core data structure that combines:
//! - Bids (buy orders) sorted high → low
//! - Asks (sell orders) sorted low → high
//! - Central order index for O(1) lookup, cancel, and modify by OrderId

use log::debug;
use rustc_hash::FxHashMap;

use crate::{
    Cursor, EngineError, Order, OrderId, OrderModify, Price, PriceLevels, Quantity, Side, Trade,
};

/// Entry in the order index: the order record plus the cursor locating
/// it in its price level's queue.
#[derive(Clone, Debug)]
pub(crate) struct OrderEntry {
    pub(crate) order: Order,
    pub(crate) cursor: Cursor,
}

/// The complete order book for a single instrument.
///
/// Maintains both sides plus an index of all live orders. Every indexed
/// order sits in exactly one level of exactly one ladder with remaining
/// quantity > 0; filled and cancelled orders are removed immediately.
#[derive(Clone, Debug)]
pub struct OrderBook {
    /// Buy orders, best = highest price
    pub(crate) bids: PriceLevels,
    /// Sell orders, best = lowest price
    pub(crate) asks: PriceLevels,
    /// Live orders indexed by ID
    pub(crate) orders: FxHashMap<OrderId, OrderEntry>,
}

impl OrderBook {
    /// Create a new empty order book.
    pub fn new() -> Self {
        Self {
            bids: PriceLevels::new(Side::Buy),
            asks: PriceLevels::new(Side::Sell),
            orders: FxHashMap::default(),
        }
    }

    // === Command surface ===

    /// Submit an order and run matching.
    ///
    /// Returns the trades the submission generated (possibly none).
    /// A duplicate id, or an FOK whose price cannot trade against the
    /// current top of book, is rejected with empty trades and no book
    /// change. [`EngineError::InvalidFill`] propagates from the matching
    /// engine; it is a structural bug guard, never hit on correct paths.
    pub fn submit(&mut self, order: Order) -> Result<Vec<Trade>, EngineError> {
        debug!(
            "submit order {} {} {} {} x {}",
            order.id, order.side, order.time_in_force, order.price, order.remaining_quantity
        );

        if self.orders.contains_key(&order.id) {
            debug!("order {} already live, rejecting", order.id);
            return Ok(Vec::new());
        }

        // Top-of-book feasibility check for FOK. Necessary but not
        // sufficient: a partially fillable FOK passes here and its
        // residual is swept up after matching.
        if !order.time_in_force.can_rest() && !self.can_match(order.side, order.price) {
            debug!("FOK order {} cannot trade, rejecting", order.id);
            return Ok(Vec::new());
        }

        let (id, side, price, remaining) =
            (order.id, order.side, order.price, order.remaining_quantity);
        let cursor = self.side_mut(side).insert_order(price, id, remaining);
        self.orders.insert(id, OrderEntry { order, cursor });

        self.match_orders()
    }

    /// Cancel an order by id.
    ///
    /// Returns the remaining quantity that was cancelled, or `None` if
    /// the id is unknown (a silent no-op, not an error).
    pub fn cancel(&mut self, order_id: OrderId) -> Option<Quantity> {
        let entry = self.orders.remove(&order_id)?;
        let side = entry.order.side;
        let price = entry.order.price;
        let remaining = entry.order.remaining_quantity;

        debug!("cancel order {} ({} remaining)", order_id, remaining);
        self.side_mut(side).remove_order(price, entry.cursor, remaining);
        Some(remaining)
    }

    /// Replace an existing order, keeping its duration.
    ///
    /// The existing order is cancelled and a fresh order with the same
    /// id is submitted carrying the request's side, price, and quantity
    /// but the *original* order's time-in-force. Time priority is
    /// forfeit: the replacement joins the back of its new level.
    ///
    /// Returns the trades of the re-submission; empty (book unchanged)
    /// when the id is unknown. Validation failures on the replacement
    /// leave the existing order untouched.
    pub fn modify(&mut self, modify: OrderModify) -> Result<Vec<Trade>, EngineError> {
        let Some(entry) = self.orders.get(&modify.id) else {
            debug!("modify for unknown order {}, ignoring", modify.id);
            return Ok(Vec::new());
        };

        // Validate the replacement before destroying the original.
        let replacement = modify.to_order(entry.order.time_in_force)?;

        self.cancel(modify.id);
        self.submit(replacement)
    }

    // === Queries ===

    /// Number of live orders across both ladders.
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    /// Returns true if no orders are resting.
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Returns true if an order with this id is live.
    pub fn contains_order(&self, order_id: OrderId) -> bool {
        self.orders.contains_key(&order_id)
    }

    /// Get a live order by id.
    pub fn get_order(&self, order_id: OrderId) -> Option<&Order> {
        self.orders.get(&order_id).map(|e| &e.order)
    }

    /// Get the best bid price (highest buy price).
    pub fn best_bid(&self) -> Option<Price> {
        self.bids.best_price()
    }

    /// Get the best ask price (lowest sell price).
    pub fn best_ask(&self) -> Option<Price> {
        self.asks.best_price()
    }

    /// Get the bids side (buy orders).
    pub fn bids(&self) -> &PriceLevels {
        &self.bids
    }

    /// Get the asks side (sell orders).
    pub fn asks(&self) -> &PriceLevels {
        &self.asks
    }

    /// Get the ladder for an order's own side.
    pub(crate) fn side_mut(&mut self, side: Side) -> &mut PriceLevels {
        match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        }
    }
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new()
    }
}
