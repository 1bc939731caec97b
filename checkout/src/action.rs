//! Every input that can move the checkout state machine.

use crate::catalog::TicketTypeId;
use crate::form::FormField;
use serde::{Deserialize, Serialize};

/// Checkout actions: user intents, loader lifecycle signals, and gateway
/// callbacks, unified so every input passes through the same reducer guards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CheckoutAction {
    /// Command: begin the page session. Starts the gateway script load;
    /// dispatched exactly once, further sends are no-ops.
    StartSession,

    /// Event: the gateway client library signalled load-complete.
    ScriptLoaded,

    /// Event: the settling delay elapsed; the gateway surface is callable.
    GatewayReady,

    /// Command: open the booking modal from the landing page.
    OpenBooking,

    /// Command: close the booking modal. Buyer details are retained.
    CloseBooking,

    /// Command: replace one buyer field.
    FieldChanged {
        /// The field being replaced, with its new value
        field: FormField,
    },

    /// Command: choose a ticket type.
    TicketSelected {
        /// The selected catalog entry
        ticket_type: TicketTypeId,
    },

    /// Command: attempt payment with the current details.
    SubmitPayment,

    /// Event: the gateway completed collection.
    PaymentSucceeded {
        /// Gateway-assigned transaction reference
        reference: String,
    },

    /// Event: the buyer closed the payment widget without completing.
    PaymentCancelled,

    /// Command: leave the success page. Buyer details are discarded.
    ReturnToLanding,
}
