//! Which half of the book an order lives in.

use std::fmt;
use std::str::FromStr;

/// Buy orders rest in the bid ladder, sell orders in the ask ladder.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Buy,
    Sell,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Side::Buy => "BUY",
            Side::Sell => "SELL",
        })
    }
}

impl FromStr for Side {
    type Err = ();

    /// Accepts the wire tokens `BUY` and `SELL`, nothing else.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BUY" => Ok(Side::Buy),
            "SELL" => Ok(Side::Sell),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_wire_tokens() {
        assert_eq!(Side::Buy.to_string(), "BUY");
        assert_eq!(Side::Sell.to_string(), "SELL");
    }

    #[test]
    fn parses_wire_tokens() {
        assert_eq!("BUY".parse(), Ok(Side::Buy));
        assert_eq!("SELL".parse(), Ok(Side::Sell));
    }

    #[test]
    fn rejects_anything_else() {
        assert_eq!("buy".parse::<Side>(), Err(()));
        assert_eq!("B".parse::<Side>(), Err(()));
        assert_eq!("".parse::<Side>(), Err(()));
    }

    #[test]
    fn display_round_trips_through_parse() {
        for side in [Side::Buy, Side::Sell] {
            assert_eq!(side.to_string().parse(), Ok(side));
        }
    }
}
