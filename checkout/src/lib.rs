//! Booking-and-payment orchestration for a single-page ticket checkout.
//!
//! This crate is the control-flow core behind a promotional landing page
//! that sells event tickets: it collects buyer details, prices the
//! selection, and hands off to an externally hosted payment widget, then
//! reflects the outcome back into the page state. Rendering is someone
//! else's job — a view layer draws whatever [`CheckoutState`] exposes.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐  OpenBooking / FieldChanged / SubmitPayment
//! │   Buyer     │ ─────────────────────────────────┐
//! └─────────────┘                                  ▼
//! ┌─────────────┐  ScriptLoaded            ┌───────────────┐
//! │ Script tag  │ ───────────────────────► │CheckoutReducer│ ─► CheckoutState
//! └─────────────┘                          └───────┬───────┘
//! ┌─────────────┐  PaymentSucceeded /              │ Effect::Future
//! │   Payment   │  PaymentCancelled                │ (collect attempt)
//! │   widget    │ ◄────────────────────────────────┘
//! └─────────────┘
//! ```
//!
//! The page is a single state machine:
//!
//! ```text
//! Landing ──OpenBooking──► ModalOpen ──SubmitPayment*──► PaymentInProgress
//!    ▲                       ▲   ▲                            │      │
//!    │                       │   └────────PaymentCancelled────┘      │
//!    │                       └CloseBooking                 PaymentSucceeded
//!    │                                                               │
//!    └───────────────ReturnToLanding─────────── Success ◄────────────┘
//!
//! * guarded: details submittable AND gateway ready AND not in progress
//! ```
//!
//! Gateway readiness is its own monotonic signal (`NotRequested → Loading →
//! Ready`), owned by the reducer and advanced by the script's load-complete
//! event plus a fixed settling delay. Payment attempts that arrive before
//! `Ready` are rejected with a user-visible notice and never reach the
//! gateway.
//!
//! # Example
//!
//! ```no_run
//! use boxoffice_checkout::{
//!     CheckoutAction, CheckoutReducer, CheckoutState, SessionEnvironment,
//!     gateway::{SimulatedGateway, SimulatedScript},
//! };
//! use boxoffice_core::environment::SystemClock;
//! use boxoffice_runtime::Store;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), boxoffice_runtime::StoreError> {
//! let env = SessionEnvironment::new(
//!     Arc::new(SystemClock::new()),
//!     Arc::new(SimulatedGateway::default()),
//!     Arc::new(SimulatedScript::default()),
//! );
//! let store = Store::new(CheckoutState::default(), CheckoutReducer::new(), env);
//!
//! store.send(CheckoutAction::StartSession).await?;
//! store.send(CheckoutAction::OpenBooking).await?;
//! # Ok(())
//! # }
//! ```

pub mod action;
pub mod catalog;
pub mod environment;
pub mod form;
pub mod gateway;
pub mod pricing;
pub mod reducer;
pub mod state;

pub use action::CheckoutAction;
pub use catalog::{CATALOG, CURRENCY, SETTLE_DELAY, TicketEntry, TicketTypeId};
pub use environment::SessionEnvironment;
pub use form::{BookingForm, FormField};
pub use reducer::CheckoutReducer;
pub use state::{CheckoutNotice, CheckoutPhase, CheckoutState, GatewayReadiness, PaymentAttempt};
