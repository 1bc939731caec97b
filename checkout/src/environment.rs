//! Injected dependencies for the checkout reducer.

use boxoffice_core::environment::Clock;
use boxoffice_core::gateway::{PaymentGateway, ScriptLoader};
use std::sync::Arc;

/// Dependencies for one page session.
///
/// Production wires `SystemClock` plus the real gateway bindings; tests wire
/// `FixedClock`, a manual load signal, and a scripted gateway spy. Cloning is
/// cheap — all capabilities are shared.
#[derive(Clone)]
pub struct SessionEnvironment {
    clock: Arc<dyn Clock>,
    gateway: Arc<dyn PaymentGateway>,
    script: Arc<dyn ScriptLoader>,
}

impl SessionEnvironment {
    /// Assemble an environment from its capabilities.
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock>,
        gateway: Arc<dyn PaymentGateway>,
        script: Arc<dyn ScriptLoader>,
    ) -> Self {
        Self {
            clock,
            gateway,
            script,
        }
    }

    /// Clock used for attempt references.
    #[must_use]
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// The payment widget.
    #[must_use]
    pub fn gateway(&self) -> &dyn PaymentGateway {
        self.gateway.as_ref()
    }

    /// The client-library load signal.
    #[must_use]
    pub fn script(&self) -> &dyn ScriptLoader {
        self.script.as_ref()
    }
}

impl std::fmt::Debug for SessionEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionEnvironment").finish_non_exhaustive()
    }
}
