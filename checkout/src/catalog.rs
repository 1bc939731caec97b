//! Static sales configuration: the ticket catalog, currency, gateway key,
//! and loader settling delay.
//!
//! Everything here is fixed at build time; there is no runtime override
//! surface.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// The closed set of ticket types sold on the page.
///
/// Being an enum, identifier uniqueness and default validity hold by
/// construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketTypeId {
    /// Regular admission
    #[default]
    Regular,
    /// VIP pass
    Vip,
}

impl TicketTypeId {
    /// Wire identifier, matching the catalog entry.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Regular => "regular",
            Self::Vip => "vip",
        }
    }
}

impl fmt::Display for TicketTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One sellable ticket type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TicketEntry {
    /// Catalog identifier
    pub id: TicketTypeId,
    /// Display label
    pub label: &'static str,
    /// Unit price in major currency units
    pub unit_price: u64,
}

/// The catalog, in presentation order.
pub const CATALOG: [TicketEntry; 2] = [
    TicketEntry {
        id: TicketTypeId::Regular,
        label: "Regular Ticket",
        unit_price: 50,
    },
    TicketEntry {
        id: TicketTypeId::Vip,
        label: "VIP Pass",
        unit_price: 150,
    },
];

/// Fixed three-letter currency code for every attempt.
pub const CURRENCY: &str = "GHS";

/// Public identifying key handed to the payment widget.
pub const PUBLIC_KEY: &str = "pk_test_0000000000000000000000000000000000000000";

/// Wait after the script's load-complete signal before treating the gateway
/// surface as callable.
pub const SETTLE_DELAY: Duration = Duration::from_millis(200);

/// Unit price for a ticket type, in major units.
///
/// Falls back to 0 for an unmatched identifier; unreachable for the closed
/// enum, but the price path must never have an error case.
#[must_use]
pub fn unit_price(id: TicketTypeId) -> u64 {
    CATALOG
        .iter()
        .find(|entry| entry.id == id)
        .map_or(0, |entry| entry.unit_price)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_identifiers_are_unique() {
        for (i, a) in CATALOG.iter().enumerate() {
            for b in &CATALOG[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn default_ticket_type_is_in_the_catalog() {
        assert!(CATALOG.iter().any(|e| e.id == TicketTypeId::default()));
    }

    #[test]
    fn unit_prices_match_the_published_catalog() {
        assert_eq!(unit_price(TicketTypeId::Regular), 50);
        assert_eq!(unit_price(TicketTypeId::Vip), 150);
    }
}
