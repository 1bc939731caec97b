//! Checkout demo binary.
//!
//! Drives a full booking flow against simulated collaborators: script load,
//! settling delay, form entry, payment, success page, and teardown.

use boxoffice_checkout::{
    CheckoutAction, CheckoutPhase, CheckoutReducer, CheckoutState, FormField, SessionEnvironment,
    TicketTypeId,
    gateway::{SimulatedGateway, SimulatedScript},
};
use boxoffice_core::environment::SystemClock;
use boxoffice_runtime::Store;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "boxoffice_checkout=debug,boxoffice_runtime=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== Boxoffice Checkout Demo ===\n");

    let env = SessionEnvironment::new(
        Arc::new(SystemClock::new()),
        Arc::new(SimulatedGateway::default()),
        Arc::new(SimulatedScript::default()),
    );
    let store = Store::new(CheckoutState::default(), CheckoutReducer::new(), env);

    // Session start kicks off the gateway script load; wait for readiness.
    println!(">>> Starting session (loading payment script)");
    store
        .send_and_wait_for(
            CheckoutAction::StartSession,
            |a| matches!(a, CheckoutAction::GatewayReady),
            Duration::from_secs(5),
        )
        .await?;
    let readiness = store.state(|s| s.gateway).await;
    println!("Gateway readiness: {readiness:?}");

    // Open the booking modal and fill in the buyer details.
    println!("\n>>> Opening booking modal");
    store.send(CheckoutAction::OpenBooking).await?;

    println!(">>> Entering buyer details (VIP x 2)");
    for field in [
        FormField::Name("Ama Boateng".to_string()),
        FormField::Email("ama@example.com".to_string()),
        FormField::Quantity("2".to_string()),
    ] {
        store.send(CheckoutAction::FieldChanged { field }).await?;
    }
    store
        .send(CheckoutAction::TicketSelected {
            ticket_type: TicketTypeId::Vip,
        })
        .await?;

    let total = store.state(CheckoutState::display_total).await;
    println!("Total: GHS {total}");

    // Pay and wait for the widget to resolve.
    println!("\n>>> Submitting payment");
    let resolution = store
        .send_and_wait_for(
            CheckoutAction::SubmitPayment,
            |a| {
                matches!(
                    a,
                    CheckoutAction::PaymentSucceeded { .. } | CheckoutAction::PaymentCancelled
                )
            },
            Duration::from_secs(5),
        )
        .await?;
    println!("Resolution: {resolution:?}");

    let phase = store.state(|s| s.phase.clone()).await;
    match &phase {
        CheckoutPhase::Success { reference } => {
            println!("Booked! Gateway reference: {reference}");
        },
        other => println!("Unexpected phase: {other:?}"),
    }

    // Back to the landing page; the form resets for the next buyer.
    println!("\n>>> Returning to landing page");
    store.send(CheckoutAction::ReturnToLanding).await?;
    let phase = store.state(|s| s.phase.clone()).await;
    println!("Final phase: {phase:?}");

    store.shutdown(Duration::from_secs(5)).await?;
    println!("\nSession closed.");

    Ok(())
}
