//! Price computation.
//!
//! Pure functions from a ticket selection and a raw quantity input to an
//! amount in minor currency units. No side effects, no error path: malformed
//! input coerces to a zero quantity, which the form guard separately refuses
//! to submit.

use crate::catalog::{self, TicketTypeId};

/// Minor units per major unit of the configured currency.
pub const MINOR_UNITS_PER_MAJOR: u64 = 100;

/// Coerce a raw quantity input to a usable count.
///
/// Trimmed base-10 parse; empty, non-numeric, or negative input yields 0.
/// A zero quantity feeds the display price but blocks payment initiation.
#[must_use]
pub fn parse_quantity(raw: &str) -> u64 {
    raw.trim().parse::<u64>().unwrap_or(0)
}

/// Total for a selection, in minor currency units.
///
/// `unit price × quantity × 100`, saturating. Unmatched ticket identifiers
/// price at 0 (see [`catalog::unit_price`]).
#[must_use]
pub fn total_minor(id: TicketTypeId, raw_quantity: &str) -> u64 {
    catalog::unit_price(id)
        .saturating_mul(parse_quantity(raw_quantity))
        .saturating_mul(MINOR_UNITS_PER_MAJOR)
}

/// Format a minor-unit amount in major units with two decimal places.
///
/// Presentation only; all gateway amounts stay in minor units.
#[must_use]
pub fn display_total(minor: u64) -> String {
    format!(
        "{}.{:02}",
        minor / MINOR_UNITS_PER_MAJOR,
        minor % MINOR_UNITS_PER_MAJOR
    )
}
