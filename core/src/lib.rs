//! # Boxoffice Core
//!
//! Core traits and types for the boxoffice checkout architecture.
//!
//! The checkout flow is modeled as a single state machine driven through a
//! unidirectional loop:
//!
//! - **State**: the page-level checkout state (phase, form, gateway readiness)
//! - **Action**: every input that can move the machine — user intents,
//!   script-load signals, payment callbacks
//! - **Reducer**: pure function `(State, Action, Environment) → Effects`
//! - **Effect**: a *description* of a side effect (await the gateway, wait a
//!   settling delay), executed by the runtime, never by the reducer
//! - **Environment**: injected dependencies behind traits (clock, payment
//!   gateway, script loader)
//!
//! Keeping effects as values is what makes the payment integration testable:
//! a reducer that *returns* "invoke the gateway with this config" can be
//! asserted on without any gateway running.
//!
//! ## Example
//!
//! ```ignore
//! use boxoffice_core::{effect::Effects, reducer::Reducer, smallvec};
//!
//! impl Reducer for CheckoutReducer {
//!     type State = CheckoutState;
//!     type Action = CheckoutAction;
//!     type Environment = SessionEnvironment;
//!
//!     fn reduce(
//!         &self,
//!         state: &mut CheckoutState,
//!         action: CheckoutAction,
//!         env: &SessionEnvironment,
//!     ) -> Effects<CheckoutAction> {
//!         // guards and transitions here
//!         smallvec![]
//!     }
//! }
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use serde::{Deserialize, Serialize};
pub use smallvec::{SmallVec, smallvec};

/// The core trait for business logic.
///
/// Reducers are pure functions: `(State, Action, Environment) → Effects`.
/// They are deterministic, synchronous, and never perform I/O themselves —
/// anything asynchronous is returned as an [`effect::Effect`] description.
pub mod reducer {
    use super::effect::Effects;

    /// Business logic for one feature.
    ///
    /// # Type Parameters
    ///
    /// - `State`: the domain state this reducer operates on
    /// - `Action`: the action type this reducer processes
    /// - `Environment`: the injected dependencies this reducer reads
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effect descriptions.
        ///
        /// Guards live here: an action that is not valid for the current
        /// state must leave the state untouched and return no effects.
        /// The runtime serializes calls, so `state` is never observed
        /// mid-transition.
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> Effects<Self::Action>;
    }
}

/// Side-effect descriptions returned by reducers.
///
/// Effects are values, not execution. The runtime's store interprets them,
/// runs the asynchronous work, and feeds any produced action back into the
/// reducer — the only path by which the outside world (script loads, payment
/// callbacks) re-enters the state machine.
pub mod effect {
    use smallvec::SmallVec;
    use std::future::Future;
    use std::pin::Pin;
    use std::time::Duration;

    /// The effect vector returned by a reducer.
    ///
    /// Most transitions produce zero or one effect; four slots keep the
    /// common cases off the heap.
    pub type Effects<Action> = SmallVec<[Effect<Action>; 4]>;

    /// A single side effect to be executed by the runtime.
    ///
    /// # Type Parameters
    ///
    /// - `Action`: the action type that effects can produce (feedback loop)
    #[allow(missing_docs)]
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Arbitrary async computation.
        ///
        /// Returns `Option<Action>` — if `Some`, the action is fed back into
        /// the reducer. A future that never resolves models an external
        /// resource that stalls forever (the loader contract permits this).
        Future(Pin<Box<dyn Future<Output = Option<Action>> + Send>>),

        /// Dispatch an action after a fixed delay.
        ///
        /// Used for the gateway settling delay between the script's
        /// load-complete signal and readiness.
        Delay {
            /// How long to wait
            duration: Duration,
            /// Action to dispatch after the delay
            action: Box<Action>,
        },
    }

    // Manual Debug implementation since Future doesn't implement Debug
    impl<Action> std::fmt::Debug for Effect<Action>
    where
        Action: std::fmt::Debug,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
                Effect::Delay { duration, action } => f
                    .debug_struct("Effect::Delay")
                    .field("duration", duration)
                    .field("action", action)
                    .finish(),
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Wrap an async computation as an effect.
        pub fn future<F>(fut: F) -> Effect<Action>
        where
            F: Future<Output = Option<Action>> + Send + 'static,
        {
            Effect::Future(Box::pin(fut))
        }

        /// Dispatch `action` after `duration`.
        pub fn delay(duration: Duration, action: Action) -> Effect<Action> {
            Effect::Delay {
                duration,
                action: Box::new(action),
            }
        }
    }
}

/// Contract with the externally hosted payment capability.
///
/// The checkout core never speaks the gateway's wire protocol. It hands the
/// gateway one configuration per attempt and expects exactly one outcome
/// back; everything between those two points is opaque. The same applies to
/// the client-library load signal: one subscription, one (possible)
/// completion.
pub mod gateway {
    use serde::{Deserialize, Serialize};
    use std::future::Future;
    use std::pin::Pin;

    /// Everything the payment widget needs for one collection attempt.
    ///
    /// Mirrors the third-party `setup` call: identifying key, buyer email,
    /// amount in minor units, a per-attempt unique reference, and the fixed
    /// currency code.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct GatewayConfig {
        /// Public identifying key for the merchant
        pub public_key: String,
        /// Buyer email address
        pub email: String,
        /// Amount to collect, in the currency's smallest unit
        pub amount_minor: u64,
        /// Unique transaction reference for this attempt
        pub reference: String,
        /// Three-letter currency code
        pub currency: String,
    }

    /// Terminal result of one collection attempt.
    ///
    /// The widget either completes with the gateway's reference or is closed
    /// by the buyer without completing. There is no third outcome.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub enum PaymentOutcome {
        /// Payment collected; carries the gateway's transaction reference
        Success {
            /// Gateway-assigned transaction reference
            reference: String,
        },
        /// Buyer closed the widget without completing
        Cancelled,
    }

    impl PaymentOutcome {
        /// Map a raw success callback payload to an outcome.
        ///
        /// A success signal without a reference is not trusted as a payment:
        /// it is treated as a cancellation rather than a silent success.
        #[must_use]
        pub fn from_callback(reference: Option<String>) -> Self {
            match reference {
                Some(reference) => Self::Success { reference },
                None => Self::Cancelled,
            }
        }
    }

    /// The interactive payment widget, reduced to its orchestration surface.
    ///
    /// `collect` corresponds to `setup(config)` followed by opening the
    /// widget; the returned future resolves when the widget's lifecycle ends.
    /// Implementations must resolve it at most once.
    pub trait PaymentGateway: Send + Sync {
        /// Run one interactive collection attempt to its outcome.
        fn collect(
            &self,
            config: GatewayConfig,
        ) -> Pin<Box<dyn Future<Output = PaymentOutcome> + Send>>;
    }

    /// The asynchronously provisioned gateway client library.
    ///
    /// The returned future resolves when the library signals load-complete.
    /// It may never resolve (blocked script, network failure) — callers must
    /// treat "not yet loaded" as the permanent default.
    pub trait ScriptLoader: Send + Sync {
        /// Resolves once the external client library has loaded.
        fn loaded(&self) -> Pin<Box<dyn Future<Output = ()> + Send>>;
    }
}

/// Dependency-injection traits for everything outside the state machine.
///
/// All external capabilities are abstracted behind traits and injected via
/// the reducer's `Environment` parameter. Production wires the real
/// implementations; tests wire deterministic doubles.
pub mod environment {
    use chrono::{DateTime, Utc};

    /// Abstracts time so transition logic stays deterministic under test.
    ///
    /// Payment attempt references are derived from this clock, which is why
    /// it is injected rather than read ambiently.
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Production clock backed by the system time.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl SystemClock {
        /// Create a new system clock.
        #[must_use]
        pub const fn new() -> Self {
            Self
        }
    }

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }
}
