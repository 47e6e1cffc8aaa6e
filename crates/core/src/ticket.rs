//! Ticket catalog domain types: ticket kind and typed price.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Sale state of a ticket tier; drives both the card style and whether the
/// tier can be put into a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketType {
    /// On sale now.
    Active,
    /// Announced, not yet on sale.
    Upcoming,
    /// Supporter tier, on sale.
    Support,
    /// Sold only at the gate.
    Onsite,
    /// Sale has ended.
    Past,
}

impl TicketType {
    pub const ALL: [TicketType; 5] = [
        Self::Active,
        Self::Upcoming,
        Self::Support,
        Self::Onsite,
        Self::Past,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Upcoming => "upcoming",
            Self::Support => "support",
            Self::Onsite => "onsite",
            Self::Past => "past",
        }
    }

    /// Whether tickets of this type can be bought online.
    pub fn is_purchasable(self) -> bool {
        matches!(self, Self::Active | Self::Support)
    }
}

impl fmt::Display for TicketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TicketType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("Unknown ticket type '{s}'")))
    }
}

impl TryFrom<String> for TicketType {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Price in whole currency units (the catalog has no minor units).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(pub i64);

impl Price {
    pub const ZERO: Price = Price(0);

    /// Derive an amount from a display string by keeping only its digits.
    ///
    /// `"350 Kč"` is 350 and `"1 500 Kč"` is 1500. Text without digits
    /// (`"Zdarma"`) is 0. Digit runs beyond `i64` saturate.
    pub fn parse_display(display: &str) -> Price {
        let amount = display
            .chars()
            .filter_map(|c| c.to_digit(10))
            .fold(0i64, |acc, d| acc.saturating_mul(10).saturating_add(i64::from(d)));
        Price(amount)
    }

    pub fn amount(self) -> i64 {
        self.0
    }

    pub fn times(self, quantity: u32) -> Price {
        Price(self.0.saturating_mul(i64::from(quantity)))
    }
}

impl std::ops::Add for Price {
    type Output = Price;

    fn add(self, rhs: Price) -> Price {
        Price(self.0.saturating_add(rhs.0))
    }
}

impl std::iter::Sum for Price {
    fn sum<I: Iterator<Item = Price>>(iter: I) -> Price {
        iter.fold(Price::ZERO, |acc, p| acc + p)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prices_parse_to_digits() {
        assert_eq!(Price::parse_display("350 Kč"), Price(350));
        assert_eq!(Price::parse_display("1 500 Kč"), Price(1500));
        assert_eq!(Price::parse_display("0 Kč"), Price(0));
    }

    #[test]
    fn non_numeric_price_is_zero() {
        assert_eq!(Price::parse_display("Zdarma"), Price::ZERO);
        assert_eq!(Price::parse_display(""), Price::ZERO);
    }

    #[test]
    fn huge_digit_runs_saturate() {
        assert_eq!(
            Price::parse_display("99999999999999999999999"),
            Price(i64::MAX)
        );
    }

    #[test]
    fn only_active_and_support_are_purchasable() {
        let purchasable: Vec<_> = TicketType::ALL
            .into_iter()
            .filter(|t| t.is_purchasable())
            .collect();
        assert_eq!(purchasable, vec![TicketType::Active, TicketType::Support]);
    }

    #[test]
    fn ticket_type_parses() {
        assert_eq!("onsite".parse::<TicketType>().unwrap(), TicketType::Onsite);
        assert!("vip".parse::<TicketType>().is_err());
    }
}
