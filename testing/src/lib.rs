//! # Boxoffice Testing
//!
//! Deterministic test doubles for the boxoffice checkout architecture.
//!
//! This crate provides:
//! - [`mocks::FixedClock`]: frozen time, so payment references are stable
//! - [`mocks::ManualScript`]: a gateway-script load signal that fires when
//!   the test says so — or never, for the stalled-load scenario
//! - [`mocks::ScriptedGateway`]: a payment gateway spy that records every
//!   invocation and replays scripted outcomes
//!
//! ## Example
//!
//! ```ignore
//! use boxoffice_testing::{test_clock, mocks::{ManualScript, ScriptedGateway}};
//!
//! let script = Arc::new(ManualScript::new());
//! let gateway = Arc::new(ScriptedGateway::new());
//! gateway.script(PaymentOutcome::Success { reference: "R1".into() });
//!
//! // ... build the environment, open the store, then:
//! script.fire(); // the script "loads"
//! ```

use chrono::{DateTime, Utc};
use boxoffice_core::environment::Clock;

/// Mock implementations of the environment traits.
pub mod mocks {
    use super::{Clock, DateTime, Utc};
    use boxoffice_core::gateway::{GatewayConfig, PaymentGateway, PaymentOutcome, ScriptLoader};
    use std::collections::VecDeque;
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::{Arc, Mutex, PoisonError};
    use tokio::sync::watch;

    /// Fixed clock for deterministic tests.
    ///
    /// Always returns the same time, making attempt references reproducible.
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time.
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC).
    ///
    /// # Panics
    ///
    /// Panics if the hardcoded timestamp fails to parse, which cannot happen
    /// in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }

    /// A script-load signal under test control.
    ///
    /// [`ScriptLoader::loaded`] resolves once [`ManualScript::fire`] has been
    /// called; until then every subscriber stays pending. A test that never
    /// fires it reproduces the blocked-script scenario, where readiness must
    /// stay `Loading` forever.
    #[derive(Debug)]
    pub struct ManualScript {
        tx: watch::Sender<bool>,
    }

    impl ManualScript {
        /// Create a signal that has not fired.
        #[must_use]
        pub fn new() -> Self {
            let (tx, _rx) = watch::channel(false);
            Self { tx }
        }

        /// Deliver the load-complete signal. Idempotent.
        pub fn fire(&self) {
            let _ = self.tx.send(true);
        }
    }

    impl Default for ManualScript {
        fn default() -> Self {
            Self::new()
        }
    }

    impl ScriptLoader for ManualScript {
        fn loaded(&self) -> Pin<Box<dyn Future<Output = ()> + Send>> {
            let mut rx = self.tx.subscribe();
            Box::pin(async move {
                if rx.wait_for(|loaded| *loaded).await.is_err() {
                    // Sender dropped without firing: the script never loaded.
                    std::future::pending::<()>().await;
                }
            })
        }
    }

    /// Payment gateway spy with scripted outcomes.
    ///
    /// Every `collect` call records its [`GatewayConfig`] — tests assert on
    /// the invocation count to prove the not-ready and already-in-progress
    /// guards never reach the gateway. Outcomes are replayed in FIFO order;
    /// when nothing is scripted the attempt stays pending, so a test can
    /// drive the callback actions itself while the flow sits in
    /// payment-in-progress.
    #[derive(Debug, Default)]
    pub struct ScriptedGateway {
        invocations: Mutex<Vec<GatewayConfig>>,
        outcomes: Mutex<VecDeque<PaymentOutcome>>,
    }

    impl ScriptedGateway {
        /// Create a gateway with no scripted outcomes (attempts stay
        /// pending).
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Create an Arc-wrapped instance for sharing with the environment.
        #[must_use]
        pub fn shared() -> Arc<Self> {
            Arc::new(Self::new())
        }

        /// Queue the outcome for the next collection attempt.
        pub fn script(&self, outcome: PaymentOutcome) {
            self.outcomes
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push_back(outcome);
        }

        /// Number of times `collect` was invoked.
        #[must_use]
        pub fn invocation_count(&self) -> usize {
            self.invocations
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .len()
        }

        /// All recorded invocation configs, in order.
        #[must_use]
        pub fn invocations(&self) -> Vec<GatewayConfig> {
            self.invocations
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        }
    }

    impl PaymentGateway for ScriptedGateway {
        fn collect(
            &self,
            config: GatewayConfig,
        ) -> Pin<Box<dyn Future<Output = PaymentOutcome> + Send>> {
            tracing::debug!(reference = %config.reference, amount = config.amount_minor, "scripted gateway invoked");
            self.invocations
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(config);

            let outcome = self
                .outcomes
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .pop_front();

            Box::pin(async move {
                match outcome {
                    Some(outcome) => outcome,
                    None => std::future::pending().await,
                }
            })
        }
    }
}

// Re-export commonly used items
pub use mocks::{FixedClock, ManualScript, ScriptedGateway, test_clock};

#[cfg(test)]
mod tests {
    use super::*;
    use boxoffice_core::gateway::{GatewayConfig, PaymentGateway, PaymentOutcome};
    use std::time::Duration;

    fn config(reference: &str) -> GatewayConfig {
        GatewayConfig {
            public_key: "pk_test_x".to_string(),
            email: "buyer@example.com".to_string(),
            amount_minor: 5000,
            reference: reference.to_string(),
            currency: "GHS".to_string(),
        }
    }

    #[test]
    fn fixed_clock_is_frozen() {
        let clock = test_clock();
        use boxoffice_core::environment::Clock;
        assert_eq!(clock.now(), clock.now());
    }

    #[tokio::test]
    async fn scripted_gateway_records_invocations_and_replays_outcomes() {
        let gateway = ScriptedGateway::new();
        gateway.script(PaymentOutcome::Success {
            reference: "R1".to_string(),
        });

        let outcome = gateway.collect(config("ref-1")).await;
        assert_eq!(
            outcome,
            PaymentOutcome::Success {
                reference: "R1".to_string()
            }
        );
        assert_eq!(gateway.invocation_count(), 1);
        assert_eq!(gateway.invocations()[0].reference, "ref-1");
    }

    #[tokio::test]
    async fn unscripted_attempt_stays_pending() {
        let gateway = ScriptedGateway::new();
        let pending = gateway.collect(config("ref-1"));

        let result = tokio::time::timeout(Duration::from_millis(50), pending).await;
        assert!(result.is_err(), "unscripted collect must not resolve");
        assert_eq!(gateway.invocation_count(), 1);
    }

    #[tokio::test]
    async fn manual_script_resolves_only_after_fire() {
        use boxoffice_core::gateway::ScriptLoader;

        let script = ManualScript::new();
        let waiting = script.loaded();

        let result = tokio::time::timeout(Duration::from_millis(50), waiting).await;
        assert!(result.is_err(), "signal must stay pending before fire");

        script.fire();
        let result = tokio::time::timeout(Duration::from_millis(50), script.loaded()).await;
        assert!(result.is_ok(), "signal must resolve after fire");
    }
}
