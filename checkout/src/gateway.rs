//! Simulated payment collaborators for development and demos.
//!
//! The orchestration core only ever sees the [`PaymentGateway`] and
//! [`ScriptLoader`] traits; these implementations stand in for the hosted
//! widget and its script tag when there is no browser around. Deterministic
//! test doubles live in `boxoffice-testing` instead.

pub use boxoffice_core::gateway::{GatewayConfig, PaymentGateway, PaymentOutcome, ScriptLoader};

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

/// A script tag that "loads" after a short fixed delay.
#[derive(Debug, Clone)]
pub struct SimulatedScript {
    delay: Duration,
}

impl SimulatedScript {
    /// Create a script that signals load-complete after `delay`.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for SimulatedScript {
    fn default() -> Self {
        Self::new(Duration::from_millis(50))
    }
}

impl ScriptLoader for SimulatedScript {
    fn loaded(&self) -> Pin<Box<dyn Future<Output = ()> + Send>> {
        let delay = self.delay;
        Box::pin(async move {
            tokio::time::sleep(delay).await;
            tracing::info!("simulated gateway script loaded");
        })
    }
}

/// A payment widget that approves every attempt after a short delay.
///
/// Returns a transaction reference derived from the attempt's own reference,
/// the way the hosted widget echoes a reference back in its success
/// callback.
#[derive(Debug, Clone)]
pub struct SimulatedGateway {
    approval_delay: Duration,
}

impl SimulatedGateway {
    /// Create a gateway that approves after `approval_delay`.
    #[must_use]
    pub const fn new(approval_delay: Duration) -> Self {
        Self { approval_delay }
    }
}

impl Default for SimulatedGateway {
    fn default() -> Self {
        Self::new(Duration::from_millis(100))
    }
}

impl PaymentGateway for SimulatedGateway {
    fn collect(
        &self,
        config: GatewayConfig,
    ) -> Pin<Box<dyn Future<Output = PaymentOutcome> + Send>> {
        let delay = self.approval_delay;
        Box::pin(async move {
            tokio::time::sleep(delay).await;

            let reference = format!("sim_txn_{}", config.reference);
            tracing::info!(
                amount_minor = config.amount_minor,
                currency = %config.currency,
                reference = %reference,
                "simulated payment approved"
            );

            PaymentOutcome::Success { reference }
        })
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn config() -> GatewayConfig {
        GatewayConfig {
            public_key: crate::catalog::PUBLIC_KEY.to_string(),
            email: "ama@example.com".to_string(),
            amount_minor: 30_000,
            reference: "1735689600000".to_string(),
            currency: crate::catalog::CURRENCY.to_string(),
        }
    }

    #[tokio::test]
    async fn simulated_gateway_approves_with_derived_reference() {
        let gateway = SimulatedGateway::new(Duration::from_millis(1));
        let outcome = gateway.collect(config()).await;

        match outcome {
            PaymentOutcome::Success { reference } => {
                assert_eq!(reference, "sim_txn_1735689600000");
            },
            PaymentOutcome::Cancelled => panic!("simulated gateway must approve"),
        }
    }

    #[tokio::test]
    async fn simulated_script_signals_load() {
        let script = SimulatedScript::new(Duration::from_millis(1));
        script.loaded().await;
    }
}
