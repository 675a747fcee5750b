//! Core types: Price, Quantity, OrderId

use std::fmt;

/// Limit price in the smallest currency unit (e.g., cents).
///
/// Prices are fixed-point integers to avoid floating-point errors in
/// matching decisions. The engine only accepts strictly positive prices;
/// validation happens at order construction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Price(pub i32);

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Quantity of shares/units for a single order. Always positive for a
/// live order; remaining quantity reaches zero only at the instant an
/// order is removed from the book.
pub type Quantity = u32;

/// Unique order identifier, assigned by the caller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrderId(pub u64);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
