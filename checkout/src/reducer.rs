//! The checkout orchestrator.
//!
//! One reducer drives both halves of the flow: the gateway loader lifecycle
//! (readiness is single-writer state here, never ambient) and the page-level
//! booking state machine. Every transition is a guarded `(phase, action)`
//! arm; anything that falls through is a deliberate no-op, which is what
//! makes duplicate submits and late gateway callbacks harmless.

use crate::action::CheckoutAction;
use crate::catalog::{self, SETTLE_DELAY};
use crate::environment::SessionEnvironment;
use crate::state::{CheckoutNotice, CheckoutPhase, CheckoutState, GatewayReadiness, PaymentAttempt};
use boxoffice_core::effect::{Effect, Effects};
use boxoffice_core::gateway::{GatewayConfig, PaymentOutcome};
use boxoffice_core::reducer::Reducer;
use boxoffice_core::smallvec;

/// Reducer for the single-page checkout flow.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckoutReducer;

impl CheckoutReducer {
    /// Create a new checkout reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for CheckoutReducer {
    type State = CheckoutState;
    type Action = CheckoutAction;
    type Environment = SessionEnvironment;

    #[allow(clippy::too_many_lines)] // one arm per transition of the page state machine
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> Effects<Self::Action> {
        match (state.phase.clone(), action) {
            //
            // ===== Gateway loader lifecycle =====
            //
            // Readiness moves strictly forward; each arm is guarded on the
            // current readiness so duplicate or out-of-order signals fall
            // through to the no-op arm.
            (_, CheckoutAction::StartSession)
                if state.gateway == GatewayReadiness::NotRequested =>
            {
                state.gateway = GatewayReadiness::Loading;
                tracing::info!("gateway script load started");

                let load = env.script().loaded();
                smallvec![Effect::future(async move {
                    load.await;
                    Some(CheckoutAction::ScriptLoaded)
                })]
            },

            (_, CheckoutAction::ScriptLoaded) if state.gateway == GatewayReadiness::Loading => {
                // The script can report "loaded" slightly before its API
                // surface is callable; readiness waits out the settling
                // delay.
                tracing::debug!(settle = ?SETTLE_DELAY, "gateway script loaded, settling");
                smallvec![Effect::delay(SETTLE_DELAY, CheckoutAction::GatewayReady)]
            },

            (_, CheckoutAction::GatewayReady) if state.gateway == GatewayReadiness::Loading => {
                state.gateway = GatewayReadiness::Ready;
                tracing::info!("payment gateway ready");
                smallvec![]
            },

            //
            // ===== Booking modal =====
            //
            (CheckoutPhase::Landing, CheckoutAction::OpenBooking) => {
                state.phase = CheckoutPhase::ModalOpen;
                state.notice = None;
                smallvec![]
            },

            (CheckoutPhase::ModalOpen, CheckoutAction::CloseBooking) => {
                // Buyer details survive a closed modal.
                state.phase = CheckoutPhase::Landing;
                state.notice = None;
                smallvec![]
            },

            (CheckoutPhase::ModalOpen, CheckoutAction::FieldChanged { field }) => {
                state.form.apply(field);
                state.notice = None;
                smallvec![]
            },

            (CheckoutPhase::ModalOpen, CheckoutAction::TicketSelected { ticket_type }) => {
                state.form.select_ticket(ticket_type);
                state.notice = None;
                smallvec![]
            },

            //
            // ===== Payment initiation =====
            //
            (CheckoutPhase::ModalOpen, CheckoutAction::SubmitPayment) => {
                if !state.form.is_submittable() {
                    tracing::warn!("submit rejected: buyer details incomplete");
                    state.notice = Some(CheckoutNotice::MissingDetails);
                    return smallvec![];
                }

                if !state.gateway.is_ready() {
                    tracing::warn!(readiness = ?state.gateway, "submit rejected: gateway not ready");
                    state.notice = Some(CheckoutNotice::ServiceLoading);
                    return smallvec![];
                }

                let attempt = PaymentAttempt::new(
                    env.clock(),
                    state.form.ticket_type,
                    &state.form.quantity,
                );
                let config = GatewayConfig {
                    public_key: catalog::PUBLIC_KEY.to_string(),
                    email: state.form.email.clone(),
                    amount_minor: attempt.amount_minor,
                    reference: attempt.reference.clone(),
                    currency: attempt.currency.to_string(),
                };

                tracing::info!(
                    reference = %attempt.reference,
                    amount_minor = attempt.amount_minor,
                    ticket_type = %state.form.ticket_type,
                    "payment attempt started"
                );

                state.notice = None;
                state.phase = CheckoutPhase::PaymentInProgress { attempt };

                // Exactly one gateway invocation per attempt; the widget's
                // two callbacks collapse into one future resolved once.
                let collect = env.gateway().collect(config);
                smallvec![Effect::future(async move {
                    Some(match collect.await {
                        PaymentOutcome::Success { reference } => {
                            CheckoutAction::PaymentSucceeded { reference }
                        },
                        PaymentOutcome::Cancelled => CheckoutAction::PaymentCancelled,
                    })
                })]
            },

            // A second submit while the widget is up must not reach the
            // gateway.
            (CheckoutPhase::PaymentInProgress { .. }, CheckoutAction::SubmitPayment) => {
                tracing::debug!("submit ignored: payment already in progress");
                smallvec![]
            },

            //
            // ===== Payment resolution =====
            //
            (
                CheckoutPhase::PaymentInProgress { attempt },
                CheckoutAction::PaymentSucceeded { reference },
            ) => {
                tracing::info!(
                    attempt = %attempt.reference,
                    gateway_reference = %reference,
                    "payment succeeded"
                );
                state.phase = CheckoutPhase::Success { reference };
                state.notice = None;
                smallvec![]
            },

            (CheckoutPhase::PaymentInProgress { attempt }, CheckoutAction::PaymentCancelled) => {
                // Expected, non-error: back to the modal with details intact.
                tracing::info!(attempt = %attempt.reference, "payment cancelled by buyer");
                state.phase = CheckoutPhase::ModalOpen;
                smallvec![]
            },

            //
            // ===== Success page =====
            //
            (CheckoutPhase::Success { .. }, CheckoutAction::ReturnToLanding) => {
                state.phase = CheckoutPhase::Landing;
                state.form = crate::form::BookingForm::default();
                state.notice = None;
                smallvec![]
            },

            // Everything else — late callbacks after resolution, duplicate
            // loader signals, intents outside their phase — has no effect.
            (phase, action) => {
                tracing::trace!(?phase, ?action, "action ignored in current phase");
                smallvec![]
            },
        }
    }
}
