//! Buyer details and the submit guard.
//!
//! The form holds exactly what the buyer typed — the quantity stays a raw
//! string so display and validation see the same input the buyer sees.

use crate::catalog::TicketTypeId;
use crate::pricing;
use serde::{Deserialize, Serialize};

/// A single-field replacement for the booking form.
///
/// Each variant replaces exactly one field and leaves every other field
/// untouched. The ticket type has its own setter on [`BookingForm`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormField {
    /// Buyer's full name
    Name(String),
    /// Buyer's email address
    Email(String),
    /// Raw quantity input, as typed
    Quantity(String),
}

/// Mutable buyer details for the current session.
///
/// Created with defaults at session start, retained across a closed and
/// reopened modal, and discarded only when the buyer leaves the success
/// page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingForm {
    /// Buyer's full name
    pub name: String,
    /// Buyer's email address
    pub email: String,
    /// Raw quantity input, as typed
    pub quantity: String,
    /// Selected ticket type
    pub ticket_type: TicketTypeId,
}

impl Default for BookingForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            quantity: "1".to_string(),
            ticket_type: TicketTypeId::default(),
        }
    }
}

impl BookingForm {
    /// Replace one field, preserving all others.
    pub fn apply(&mut self, field: FormField) {
        match field {
            FormField::Name(name) => self.name = name,
            FormField::Email(email) => self.email = email,
            FormField::Quantity(quantity) => self.quantity = quantity,
        }
    }

    /// Select a ticket type. No other field is touched.
    pub const fn select_ticket(&mut self, ticket_type: TicketTypeId) {
        self.ticket_type = ticket_type;
    }

    /// Whether payment may be initiated from these details.
    ///
    /// Name and email must be non-empty (email format is deliberately not
    /// checked) and the quantity must parse to at least 1. This predicate is
    /// the single source of truth for both the submit control's enabled
    /// state and the payment-initiation guard.
    #[must_use]
    pub fn is_submittable(&self) -> bool {
        !self.name.is_empty()
            && !self.email.is_empty()
            && pricing::parse_quantity(&self.quantity) >= 1
    }
}
