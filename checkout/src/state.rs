//! Page-level checkout state.
//!
//! The original flow tracked overlapping booleans (loading, modal visible,
//! current page); here the page is a single [`CheckoutPhase`] enum, so
//! invalid combinations — a success page with the modal still open, payment
//! in flight on the landing page — are unrepresentable.

use crate::catalog::{self, TicketTypeId};
use crate::form::BookingForm;
use crate::pricing;
use boxoffice_core::environment::Clock;
use std::fmt;

/// Readiness of the externally provisioned payment capability.
///
/// Owned by the checkout reducer (single writer), observable by anyone.
/// Transitions only move forward for the lifetime of the session:
/// `NotRequested → Loading [→ Ready]`. A load that never signals leaves the
/// state in `Loading` indefinitely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GatewayReadiness {
    /// Script load not yet begun
    #[default]
    NotRequested,
    /// Script load in flight (possibly forever)
    Loading,
    /// Gateway surface is callable
    Ready,
}

impl GatewayReadiness {
    /// Whether payment may be initiated against the gateway.
    #[must_use]
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }
}

/// Ephemeral value describing one payment invocation.
///
/// Carried only inside [`CheckoutPhase::PaymentInProgress`]; dropped when
/// the attempt resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentAttempt {
    /// Unique per-attempt reference, derived from the clock's millisecond
    /// timestamp
    pub reference: String,
    /// Amount to collect, in minor currency units
    pub amount_minor: u64,
    /// Fixed currency code
    pub currency: &'static str,
}

impl PaymentAttempt {
    /// Synthesize a fresh attempt for the current selection.
    #[must_use]
    pub fn new(clock: &dyn Clock, ticket_type: TicketTypeId, raw_quantity: &str) -> Self {
        Self {
            reference: clock.now().timestamp_millis().to_string(),
            amount_minor: pricing::total_minor(ticket_type, raw_quantity),
            currency: catalog::CURRENCY,
        }
    }
}

/// The page-level state machine position. Exactly one phase is active.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CheckoutPhase {
    /// Landing page, no overlay
    #[default]
    Landing,
    /// Booking modal open, collecting buyer details
    ModalOpen,
    /// Payment widget in control; resolution arrives via callback
    PaymentInProgress {
        /// The attempt handed to the gateway
        attempt: PaymentAttempt,
    },
    /// Payment collected
    Success {
        /// Gateway-assigned transaction reference
        reference: String,
    },
}

/// User-visible, non-fatal rejection raised by the submit guards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutNotice {
    /// Buyer details incomplete or quantity invalid
    MissingDetails,
    /// Gateway script not ready yet
    ServiceLoading,
}

impl fmt::Display for CheckoutNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingDetails => f.write_str("Please fill in all required fields."),
            Self::ServiceLoading => {
                f.write_str("Payment service is still loading. Please try again in a moment.")
            },
        }
    }
}

/// Everything the view needs to render the checkout flow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutState {
    /// Current page-level phase
    pub phase: CheckoutPhase,
    /// Buyer details being collected
    pub form: BookingForm,
    /// Payment capability readiness
    pub gateway: GatewayReadiness,
    /// Pending rejection message, if any
    pub notice: Option<CheckoutNotice>,
}

impl CheckoutState {
    /// Whether the submit control should be enabled.
    ///
    /// Folds the form predicate together with gateway readiness and the
    /// not-already-in-progress rule — the same conditions the reducer's
    /// submit guard checks, so control state and guard can never diverge.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        matches!(self.phase, CheckoutPhase::ModalOpen)
            && self.gateway.is_ready()
            && self.form.is_submittable()
    }

    /// Display price for the current selection, in major units.
    #[must_use]
    pub fn display_total(&self) -> String {
        pricing::display_total(pricing::total_minor(
            self.form.ticket_type,
            &self.form.quantity,
        ))
    }
}
