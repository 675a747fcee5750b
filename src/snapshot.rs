//! Aggregated book snapshots for market data.

use crate::{OrderBook, Price, PriceLevels};

/// A value-copy view of the book at a point in time.
///
/// Snapshots own their buffers; later mutation of the book does not
/// affect a snapshot already taken.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BookSnapshot {
    /// Bid levels, highest price first
    pub bids: Vec<LevelSnapshot>,
    /// Ask levels, lowest price first
    pub asks: Vec<LevelSnapshot>,
}

impl BookSnapshot {
    /// Returns the best bid price, if any.
    pub fn best_bid(&self) -> Option<Price> {
        self.bids.first().map(|l| l.price)
    }

    /// Returns the best ask price, if any.
    pub fn best_ask(&self) -> Option<Price> {
        self.asks.first().map(|l| l.price)
    }

    /// Returns the spread (best ask - best bid), if both sides exist.
    pub fn spread(&self) -> Option<i64> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some(i64::from(ask.0) - i64::from(bid.0)),
            _ => None,
        }
    }

    /// Returns total bid quantity across all levels.
    pub fn total_bid_quantity(&self) -> u64 {
        self.bids.iter().map(|l| l.quantity).sum()
    }

    /// Returns total ask quantity across all levels.
    pub fn total_ask_quantity(&self) -> u64 {
        self.asks.iter().map(|l| l.quantity).sum()
    }
}

/// One aggregated price level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelSnapshot {
    /// Price at this level
    pub price: Price,
    /// Sum of remaining quantities at this level
    pub quantity: u64,
    /// Number of orders at this level
    pub order_count: usize,
}

impl OrderBook {
    /// Take a snapshot of the top N levels on each side.
    pub fn depth(&self, levels: usize) -> BookSnapshot {
        fn snapshot_levels(levels: &PriceLevels, depth: usize) -> Vec<LevelSnapshot> {
            levels
                .iter_best_to_worst()
                .take(depth)
                .map(|(_, level)| LevelSnapshot {
                    price: level.price(),
                    quantity: level.total_quantity(),
                    order_count: level.order_count(),
                })
                .collect()
        }

        BookSnapshot {
            bids: snapshot_levels(self.bids(), levels),
            asks: snapshot_levels(self.asks(), levels),
        }
    }

    /// Take a full snapshot of all levels.
    pub fn snapshot(&self) -> BookSnapshot {
        self.depth(usize::MAX)
    }
}
