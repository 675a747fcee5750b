//! PriceLevels: one side of the order book (bids or asks).
//!
//! Maintains a sorted ladder of price levels with a cached best price
//! for O(1) top-of-book queries.

use std::collections::BTreeMap;

use crate::{Cursor, Level, OrderId, Price, Quantity, Side};

/// One side of the order book (all bids or all asks).
///
/// - **Bids**: best = highest price, iterated high → low
/// - **Asks**: best = lowest price, iterated low → high
///
/// The `BTreeMap` provides O(log n) insert/remove with sorted iteration.
/// Empty levels are removed eagerly; a stored level always holds at
/// least one order.
#[derive(Clone, Debug)]
pub struct PriceLevels {
    /// Price levels, sorted by price
    levels: BTreeMap<Price, Level>,
    /// Cached best price for O(1) access
    best_price: Option<Price>,
    /// Which side this represents (determines "best" direction)
    side: Side,
}

impl PriceLevels {
    /// Create a new empty ladder for the given side.
    pub fn new(side: Side) -> Self {
        Self {
            levels: BTreeMap::new(),
            best_price: None,
            side,
        }
    }

    /// Returns true if there are no orders on this side.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Returns the number of distinct price levels.
    #[inline]
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Returns the best price (highest for bids, lowest for asks).
    #[inline]
    pub fn best_price(&self) -> Option<Price> {
        self.best_price
    }

    /// Returns a reference to the level at the given price, if it exists.
    pub fn get_level(&self, price: Price) -> Option<&Level> {
        self.levels.get(&price)
    }

    /// Returns a mutable reference to the level at the given price, if it exists.
    pub fn get_level_mut(&mut self, price: Price) -> Option<&mut Level> {
        self.levels.get_mut(&price)
    }

    /// Append an order at the back of the level keyed by `price`,
    /// creating the level on demand.
    ///
    /// Returns the cursor identifying the order's queue position.
    pub fn insert_order(&mut self, price: Price, order_id: OrderId, quantity: Quantity) -> Cursor {
        let is_new = !self.levels.contains_key(&price);
        if is_new {
            self.update_best_price_after_insert(price);
        }
        self.levels
            .entry(price)
            .or_insert_with(|| Level::new(price))
            .push_back(order_id, quantity)
    }

    /// Remove the order behind `cursor` from the level at `price`.
    ///
    /// Removes the level entirely if it becomes empty. Returns the
    /// removed order's id, or `None` if the level or entry is gone.
    pub fn remove_order(
        &mut self,
        price: Price,
        cursor: Cursor,
        quantity: Quantity,
    ) -> Option<OrderId> {
        let level = self.levels.get_mut(&price)?;
        let removed = level.remove(cursor, quantity)?;
        if level.is_empty() {
            self.remove_level(price);
        }
        Some(removed)
    }

    /// Remove a price level entirely, updating the cached best price.
    pub fn remove_level(&mut self, price: Price) {
        if self.levels.remove(&price).is_some() && self.best_price == Some(price) {
            self.recompute_best_price();
        }
    }

    /// Returns an iterator over levels from best to worst price.
    ///
    /// - Bids: highest to lowest
    /// - Asks: lowest to highest
    pub fn iter_best_to_worst(&self) -> impl Iterator<Item = (&Price, &Level)> {
        BestToWorstIter {
            inner: if self.side == Side::Buy {
                IterDirection::Reverse(self.levels.iter().rev())
            } else {
                IterDirection::Forward(self.levels.iter())
            },
        }
    }

    /// Returns the total remaining quantity across all levels.
    pub fn total_quantity(&self) -> u64 {
        self.levels.values().map(|l| l.total_quantity()).sum()
    }

    /// Returns the total number of orders across all levels.
    pub fn order_count(&self) -> usize {
        self.levels.values().map(|l| l.order_count()).sum()
    }

    // === Private helpers ===

    /// Recompute best price from scratch (O(1) for BTreeMap).
    fn recompute_best_price(&mut self) {
        self.best_price = match self.side {
            Side::Buy => self.levels.keys().next_back().copied(),
            Side::Sell => self.levels.keys().next().copied(),
        };
    }

    /// Update best price after inserting a new level.
    fn update_best_price_after_insert(&mut self, new_price: Price) {
        match self.best_price {
            None => {
                self.best_price = Some(new_price);
            }
            Some(current_best) => {
                let is_better = match self.side {
                    Side::Buy => new_price > current_best,
                    Side::Sell => new_price < current_best,
                };
                if is_better {
                    self.best_price = Some(new_price);
                }
            }
        }
    }
}

/// Direction wrapper for the iterator.
enum IterDirection<F, R> {
    Forward(F),
    Reverse(R),
}

type BTreeIter<'a> = std::collections::btree_map::Iter<'a, Price, Level>;

/// Iterator that yields levels from best to worst price.
struct BestToWorstIter<'a> {
    inner: IterDirection<BTreeIter<'a>, std::iter::Rev<BTreeIter<'a>>>,
}

impl<'a> Iterator for BestToWorstIter<'a> {
    type Item = (&'a Price, &'a Level);

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            IterDirection::Forward(iter) => iter.next(),
            IterDirection::Reverse(iter) => iter.next(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // === Bid side tests (best = highest) ===

    #[test]
    fn new_bids_is_empty() {
        let bids = PriceLevels::new(Side::Buy);

        assert!(bids.is_empty());
        assert_eq!(bids.level_count(), 0);
        assert_eq!(bids.best_price(), None);
    }

    #[test]
    fn bids_best_is_highest() {
        let mut bids = PriceLevels::new(Side::Buy);

        bids.insert_order(Price(100), OrderId(1), 100);
        assert_eq!(bids.best_price(), Some(Price(100)));

        bids.insert_order(Price(99), OrderId(2), 100);
        assert_eq!(bids.best_price(), Some(Price(100))); // Still 100

        bids.insert_order(Price(101), OrderId(3), 100);
        assert_eq!(bids.best_price(), Some(Price(101))); // Now 101
    }

    #[test]
    fn bids_remove_best_updates_cache() {
        let mut bids = PriceLevels::new(Side::Buy);
        bids.insert_order(Price(100), OrderId(1), 100);
        bids.insert_order(Price(99), OrderId(2), 100);
        bids.insert_order(Price(101), OrderId(3), 100);

        assert_eq!(bids.best_price(), Some(Price(101)));

        bids.remove_level(Price(101));
        assert_eq!(bids.best_price(), Some(Price(100)));

        bids.remove_level(Price(100));
        assert_eq!(bids.best_price(), Some(Price(99)));

        bids.remove_level(Price(99));
        assert_eq!(bids.best_price(), None);
    }

    // === Ask side tests (best = lowest) ===

    #[test]
    fn asks_best_is_lowest() {
        let mut asks = PriceLevels::new(Side::Sell);

        asks.insert_order(Price(100), OrderId(1), 100);
        assert_eq!(asks.best_price(), Some(Price(100)));

        asks.insert_order(Price(101), OrderId(2), 100);
        assert_eq!(asks.best_price(), Some(Price(100))); // Still 100

        asks.insert_order(Price(99), OrderId(3), 100);
        assert_eq!(asks.best_price(), Some(Price(99))); // Now 99
    }

    #[test]
    fn asks_remove_best_updates_cache() {
        let mut asks = PriceLevels::new(Side::Sell);
        asks.insert_order(Price(100), OrderId(1), 100);
        asks.insert_order(Price(101), OrderId(2), 100);
        asks.insert_order(Price(99), OrderId(3), 100);

        assert_eq!(asks.best_price(), Some(Price(99)));

        asks.remove_level(Price(99));
        assert_eq!(asks.best_price(), Some(Price(100)));
    }

    // === Order operations ===

    #[test]
    fn insert_multiple_orders_same_price() {
        let mut bids = PriceLevels::new(Side::Buy);

        bids.insert_order(Price(100), OrderId(1), 100);
        bids.insert_order(Price(100), OrderId(2), 200);
        bids.insert_order(Price(100), OrderId(3), 150);

        assert_eq!(bids.level_count(), 1);
        let level = bids.get_level(Price(100)).unwrap();
        assert_eq!(level.order_count(), 3);
        assert_eq!(level.total_quantity(), 450);
        assert_eq!(level.front(), Some(OrderId(1)));
    }

    #[test]
    fn remove_order_removes_empty_level() {
        let mut bids = PriceLevels::new(Side::Buy);
        let c1 = bids.insert_order(Price(100), OrderId(1), 100);
        bids.insert_order(Price(99), OrderId(2), 200);

        assert_eq!(bids.level_count(), 2);

        assert_eq!(bids.remove_order(Price(100), c1, 100), Some(OrderId(1)));
        assert_eq!(bids.level_count(), 1);
        assert_eq!(bids.best_price(), Some(Price(99)));
        assert!(bids.get_level(Price(100)).is_none());
    }

    #[test]
    fn remove_order_keeps_nonempty_level() {
        let mut bids = PriceLevels::new(Side::Buy);
        let c1 = bids.insert_order(Price(100), OrderId(1), 100);
        bids.insert_order(Price(100), OrderId(2), 200);

        assert_eq!(bids.remove_order(Price(100), c1, 100), Some(OrderId(1)));
        assert_eq!(bids.level_count(), 1);

        let level = bids.get_level(Price(100)).unwrap();
        assert_eq!(level.order_count(), 1);
        assert_eq!(level.total_quantity(), 200);
        assert_eq!(level.front(), Some(OrderId(2)));
    }

    #[test]
    fn remove_order_from_missing_level() {
        let mut bids = PriceLevels::new(Side::Buy);
        let c1 = bids.insert_order(Price(100), OrderId(1), 100);

        assert_eq!(bids.remove_order(Price(999), c1, 100), None);
        assert_eq!(bids.level_count(), 1);
    }

    // === Iteration ===

    #[test]
    fn iter_bids_best_to_worst() {
        let mut bids = PriceLevels::new(Side::Buy);
        bids.insert_order(Price(99), OrderId(1), 100);
        bids.insert_order(Price(101), OrderId(2), 100);
        bids.insert_order(Price(100), OrderId(3), 100);

        let prices: Vec<_> = bids.iter_best_to_worst().map(|(p, _)| *p).collect();
        assert_eq!(prices, vec![Price(101), Price(100), Price(99)]);
    }

    #[test]
    fn iter_asks_best_to_worst() {
        let mut asks = PriceLevels::new(Side::Sell);
        asks.insert_order(Price(99), OrderId(1), 100);
        asks.insert_order(Price(101), OrderId(2), 100);
        asks.insert_order(Price(100), OrderId(3), 100);

        let prices: Vec<_> = asks.iter_best_to_worst().map(|(p, _)| *p).collect();
        assert_eq!(prices, vec![Price(99), Price(100), Price(101)]);
    }

    // === Quantity queries ===

    #[test]
    fn total_quantity() {
        let mut bids = PriceLevels::new(Side::Buy);
        bids.insert_order(Price(100), OrderId(1), 100);
        bids.insert_order(Price(100), OrderId(2), 200);
        bids.insert_order(Price(99), OrderId(3), 150);

        assert_eq!(bids.total_quantity(), 450);
        assert_eq!(bids.order_count(), 3);
    }
}
