//! Time-in-force: controls how long an order may stay on the book

use std::fmt;
use std::str::FromStr;

/// Time-in-force determines how long an order remains active once
/// immediate matching is done.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TimeInForce {
    /// Good-til-cancelled: rests on book until filled or explicitly
    /// cancelled. Allows partial fills; remainder stays on book.
    #[default]
    GTC,

    /// Fill-or-kill: must trade immediately; any residual left after
    /// matching is cancelled before the submitting call returns.
    FOK,
}

impl TimeInForce {
    /// Returns true if this TIF allows the order to rest on the book.
    #[inline]
    pub fn can_rest(self) -> bool {
        matches!(self, TimeInForce::GTC)
    }
}

impl fmt::Display for TimeInForce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeInForce::GTC => write!(f, "GTC"),
            TimeInForce::FOK => write!(f, "FOK"),
        }
    }
}

impl FromStr for TimeInForce {
    type Err = ();

    /// Accepts the wire tokens `GTC` and `FOK`, nothing else.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GTC" => Ok(TimeInForce::GTC),
            "FOK" => Ok(TimeInForce::FOK),
            _ => Err(()),
        }
    }
}
