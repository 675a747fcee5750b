//! # matchbook
//!
//! A deterministic single-instrument limit order book with price-time
//! priority matching.
//!
//! ## Features
//!
//! - **Order durations**: GTC (good-til-cancelled) and FOK (fill-or-kill)
//! - **Price-time priority**: best price first, FIFO within a price level
//! - **Partial fills** for resting GTC orders
//! - **O(1) cancel/modify** through a cursor-indexed order table
//! - **Aggregated snapshots** for market data
//! - **Fixed-point prices**: integer smallest-currency-units, no floats
//!
//! ## Quick Start
//!
//! ```
//! use matchbook::{Order, OrderBook, OrderId, Price, Side, TimeInForce};
//!
//! let mut book = OrderBook::new();
//!
//! // Rest some asks (sell orders)
//! book.submit(Order::new(OrderId(1), Side::Sell, TimeInForce::GTC, Price(101), 100).unwrap())
//!     .unwrap();
//! book.submit(Order::new(OrderId(2), Side::Sell, TimeInForce::GTC, Price(102), 200).unwrap())
//!     .unwrap();
//!
//! // A bid that crosses the best ask trades immediately
//! let trades = book
//!     .submit(Order::new(OrderId(3), Side::Buy, TimeInForce::GTC, Price(101), 50).unwrap())
//!     .unwrap();
//!
//! assert_eq!(trades.len(), 1);
//! assert_eq!(trades[0].quantity(), 50);
//! assert_eq!(trades[0].ask.price, Price(101));
//! assert_eq!(book.order_count(), 2); // both asks still resting, bid fully filled
//! ```
//!
//! ## Trade reporting
//!
//! Each trade carries one record per participant, and each record holds
//! that participant's *own* limit price. A resting bid at 105 hit by a
//! sell limited at 100 reports 105 on the bid side and 100 on the ask
//! side.
//!
//! ## Fill-or-kill
//!
//! An FOK order is admitted only if its price can trade against the
//! current top of book; after matching, any unfilled residual is
//! cancelled, so an FOK is never left resting:
//!
//! ```
//! use matchbook::{Order, OrderBook, OrderId, Price, Side, TimeInForce};
//!
//! let mut book = OrderBook::new();
//! book.submit(Order::new(OrderId(1), Side::Sell, TimeInForce::GTC, Price(100), 4).unwrap())
//!     .unwrap();
//!
//! let trades = book
//!     .submit(Order::new(OrderId(2), Side::Buy, TimeInForce::FOK, Price(100), 10).unwrap())
//!     .unwrap();
//!
//! assert_eq!(trades.len(), 1); // the partial fill is emitted...
//! assert!(book.is_empty());    // ...and the residual of 6 is cancelled
//! ```
//!
//! ## Batch files
//!
//! The [`batch`] module runs CSV command files against a book:
//!
//! ```text
//! CREATE,1,BUY,GTC,100,10
//! MODIFY,1,BUY,GTC,99,20
//! CANCEL,1
//! ```

pub mod batch;
mod book;
mod error;
mod level;
mod matching;
mod order;
mod price_levels;
mod side;
mod snapshot;
mod tif;
mod trade;
mod types;

// Re-export public API
pub use book::OrderBook;
pub use error::EngineError;
pub use level::{Cursor, Level, LevelIter};
pub use order::{Order, OrderModify};
pub use price_levels::PriceLevels;
pub use side::Side;
pub use snapshot::{BookSnapshot, LevelSnapshot};
pub use tif::TimeInForce;
pub use trade::{Trade, TradeInfo};
pub use types::{OrderId, Price, Quantity};
