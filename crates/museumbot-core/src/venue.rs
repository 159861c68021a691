//! Venue value types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier of a venue in the directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VenueId(pub String);

impl fmt::Display for VenueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A monetary amount in US cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Price(i64);

impl Price {
    /// Creates a price from a number of cents.
    #[must_use]
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Creates a price from whole dollars.
    #[must_use]
    pub const fn from_dollars(dollars: i64) -> Self {
        Self(dollars * 100)
    }

    /// Returns the amount in cents.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Returns the price of `count` units at this unit price, saturating at
    /// the `i64` bounds.
    #[must_use]
    pub fn times(self, count: u8) -> Self {
        Self(self.0.saturating_mul(i64::from(count)))
    }
}

/// Renders `$20` for whole dollars and `$20.50` otherwise.
impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let (dollars, cents) = (abs / 100, abs % 100);
        if cents == 0 {
            write!(f, "{sign}${dollars}")
        } else {
            write!(f, "{sign}${dollars}.{cents:02}")
        }
    }
}

/// A bookable venue as listed by the venue directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Venue {
    /// Directory identifier.
    pub id: VenueId,
    /// Display name.
    pub name: String,
    /// Price of a single ticket.
    pub ticket_price: Price,
}

impl Venue {
    /// Creates a venue.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, ticket_price: Price) -> Self {
        Self {
            id: VenueId(id.into()),
            name: name.into(),
            ticket_price,
        }
    }
}
