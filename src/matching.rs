//! Matching engine: the crossing algorithm.
//!
//! Matching implements price-time priority:
//! 1. Better prices match first (higher bids, lower asks)
//! 2. At the same price, earlier orders match first (FIFO)
//! 3. Each trade side executes at its own resting order's limit price
//!
//! The loop works on the ladders directly rather than special-casing the
//! newly submitted order, so a single call drains every possible cross.

use log::{debug, trace};

use crate::{EngineError, OrderBook, OrderId, Price, Quantity, Side, Trade, TradeInfo};

impl OrderBook {
    /// Check whether an order at this side and price could trade against
    /// the current top of the opposing ladder.
    ///
    /// - Buy matches iff the ask ladder is non-empty and `price >= best_ask`
    /// - Sell matches iff the bid ladder is non-empty and `price <= best_bid`
    pub fn can_match(&self, side: Side, price: Price) -> bool {
        match side {
            Side::Buy => self.asks.best_price().is_some_and(|best| price >= best),
            Side::Sell => self.bids.best_price().is_some_and(|best| price <= best),
        }
    }

    /// Drain all possible crosses, then sweep unfilled FOK residuals.
    ///
    /// Runs until the best bid no longer reaches the best ask or one
    /// side is empty. Returns the trades in execution order.
    pub(crate) fn match_orders(&mut self) -> Result<Vec<Trade>, EngineError> {
        let mut trades = Vec::new();

        loop {
            let (Some(bid_price), Some(ask_price)) = (self.bids.best_price(), self.asks.best_price())
            else {
                break;
            };
            if bid_price < ask_price {
                break; // no crossing
            }

            self.match_level_pair(bid_price, ask_price, &mut trades)?;
        }

        self.cancel_fok_residuals();

        if !trades.is_empty() {
            debug!("matching produced {} trade(s)", trades.len());
        }
        Ok(trades)
    }

    /// Match the front orders of one crossed level pair until either
    /// level is exhausted.
    fn match_level_pair(
        &mut self,
        bid_price: Price,
        ask_price: Price,
        trades: &mut Vec<Trade>,
    ) -> Result<(), EngineError> {
        loop {
            let Some(bid_id) = self.bids.get_level(bid_price).and_then(|l| l.front()) else {
                break;
            };
            let Some(ask_id) = self.asks.get_level(ask_price).and_then(|l| l.front()) else {
                break;
            };

            let (Some(bid_entry), Some(ask_entry)) =
                (self.orders.get(&bid_id), self.orders.get(&ask_id))
            else {
                // A ladder id always resolves in the index; disagreement
                // is the same structural failure the fill guard reports.
                return Err(EngineError::InvalidFill {
                    id: if self.orders.contains_key(&bid_id) { ask_id } else { bid_id },
                    requested: 0,
                    remaining: 0,
                });
            };

            let quantity = bid_entry
                .order
                .remaining_quantity
                .min(ask_entry.order.remaining_quantity);
            let bid_limit = bid_entry.order.price;
            let ask_limit = ask_entry.order.price;

            let bid_filled = self.fill_indexed(bid_id, quantity)?;
            let ask_filled = self.fill_indexed(ask_id, quantity)?;

            trace!(
                "trade: bid {} @ {} vs ask {} @ {}, qty {}",
                bid_id,
                bid_limit,
                ask_id,
                ask_limit,
                quantity
            );
            trades.push(Trade {
                bid: TradeInfo {
                    order_id: bid_id,
                    price: bid_limit,
                    quantity,
                },
                ask: TradeInfo {
                    order_id: ask_id,
                    price: ask_limit,
                    quantity,
                },
            });

            if bid_filled {
                if let Some(level) = self.bids.get_level_mut(bid_price) {
                    level.pop_front(quantity);
                }
                self.orders.remove(&bid_id);
            } else if let Some(level) = self.bids.get_level_mut(bid_price) {
                level.decrease_quantity(quantity);
            }

            if ask_filled {
                if let Some(level) = self.asks.get_level_mut(ask_price) {
                    level.pop_front(quantity);
                }
                self.orders.remove(&ask_id);
            } else if let Some(level) = self.asks.get_level_mut(ask_price) {
                level.decrease_quantity(quantity);
            }

            // Drop exhausted levels eagerly; clearing either side of the
            // pair ends matching at these prices.
            let mut level_cleared = false;
            if self.bids.get_level(bid_price).is_some_and(|l| l.is_empty()) {
                self.bids.remove_level(bid_price);
                level_cleared = true;
            }
            if self.asks.get_level(ask_price).is_some_and(|l| l.is_empty()) {
                self.asks.remove_level(ask_price);
                level_cleared = true;
            }
            if level_cleared {
                break;
            }
        }
        Ok(())
    }

    /// Apply a fill to an indexed order, reporting whether it is now
    /// fully filled.
    fn fill_indexed(&mut self, id: OrderId, quantity: Quantity) -> Result<bool, EngineError> {
        let Some(entry) = self.orders.get_mut(&id) else {
            return Err(EngineError::InvalidFill {
                id,
                requested: quantity,
                remaining: 0,
            });
        };
        entry.order.fill(quantity)?;
        Ok(entry.order.is_filled())
    }

    /// Cancel every FOK order still resting after matching.
    ///
    /// The admission pre-check only inspects the top of book, so an FOK
    /// can partially fill and leave a residual on the ladder. Ids are
    /// collected first and cancelled after the scan, so ladder iteration
    /// is never invalidated mid-walk. Every indexed order has remaining
    /// quantity > 0, which makes "indexed FOK" exactly "FOK with
    /// residual".
    fn cancel_fok_residuals(&mut self) {
        let residuals: Vec<OrderId> = self
            .orders
            .values()
            .filter(|e| !e.order.time_in_force.can_rest())
            .map(|e| e.order.id)
            .collect();

        for id in residuals {
            debug!("cancelling unfilled FOK residual {}", id);
            self.cancel(id);
        }
    }
}
