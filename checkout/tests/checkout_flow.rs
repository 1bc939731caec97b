//! End-to-end checkout scenarios against the store, with a scripted gateway
//! spy and a manually fired script-load signal.

#![allow(clippy::expect_used, clippy::panic, clippy::unwrap_used)]

use boxoffice_checkout::{
    CheckoutAction, CheckoutNotice, CheckoutPhase, CheckoutReducer, CheckoutState, FormField,
    GatewayReadiness, SessionEnvironment, TicketTypeId,
};
use boxoffice_core::environment::Clock;
use boxoffice_core::gateway::{PaymentGateway, PaymentOutcome, ScriptLoader};
use boxoffice_runtime::Store;
use boxoffice_testing::mocks::{ManualScript, ScriptedGateway, test_clock};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio_test::assert_ok;

type CheckoutStore = Store<CheckoutState, CheckoutAction, SessionEnvironment, CheckoutReducer>;

struct Session {
    store: CheckoutStore,
    gateway: Arc<ScriptedGateway>,
    script: Arc<ManualScript>,
}

fn session() -> Session {
    let gateway = ScriptedGateway::shared();
    let script = Arc::new(ManualScript::new());

    let gateway_dep: Arc<dyn PaymentGateway> = gateway.clone();
    let script_dep: Arc<dyn ScriptLoader> = script.clone();
    let env = SessionEnvironment::new(Arc::new(test_clock()), gateway_dep, script_dep);

    Session {
        store: Store::new(CheckoutState::default(), CheckoutReducer::new(), env),
        gateway,
        script,
    }
}

async fn recv_until<F>(rx: &mut broadcast::Receiver<CheckoutAction>, predicate: F) -> CheckoutAction
where
    F: Fn(&CheckoutAction) -> bool,
{
    loop {
        let action = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("timed out waiting for action")
            .expect("action broadcast closed");
        if predicate(&action) {
            return action;
        }
    }
}

/// Start the session, fire the script load, and wait for readiness.
async fn ready_session() -> Session {
    let session = session();
    let mut rx = session.store.subscribe_actions();

    session
        .store
        .send(CheckoutAction::StartSession)
        .await
        .expect("send failed");
    session.script.fire();
    recv_until(&mut rx, |a| matches!(a, CheckoutAction::GatewayReady)).await;

    session
}

async fn fill_buyer_details(store: &CheckoutStore) {
    for field in [
        FormField::Name("Ama Boateng".to_string()),
        FormField::Email("ama@example.com".to_string()),
    ] {
        store
            .send(CheckoutAction::FieldChanged { field })
            .await
            .expect("send failed");
    }
}

#[tokio::test]
async fn readiness_is_observed_in_order() {
    let session = session();
    let mut rx = session.store.subscribe_actions();

    assert_eq!(
        session.store.state(|s| s.gateway).await,
        GatewayReadiness::NotRequested
    );

    session.store.send(CheckoutAction::StartSession).await.expect("send failed");
    assert_eq!(
        session.store.state(|s| s.gateway).await,
        GatewayReadiness::Loading
    );

    session.script.fire();

    recv_until(&mut rx, |a| matches!(a, CheckoutAction::ScriptLoaded)).await;
    // Load signalled but not settled: still loading.
    assert_eq!(
        session.store.state(|s| s.gateway).await,
        GatewayReadiness::Loading
    );

    recv_until(&mut rx, |a| matches!(a, CheckoutAction::GatewayReady)).await;
    assert_eq!(
        session.store.state(|s| s.gateway).await,
        GatewayReadiness::Ready
    );
}

#[tokio::test]
async fn scenario_a_vip_booking_succeeds() {
    let session = ready_session().await;
    let store = &session.store;

    store.send(CheckoutAction::OpenBooking).await.expect("send failed");
    fill_buyer_details(store).await;
    store
        .send(CheckoutAction::TicketSelected {
            ticket_type: TicketTypeId::Vip,
        })
        .await
        .expect("send failed");
    store
        .send(CheckoutAction::FieldChanged {
            field: FormField::Quantity("2".to_string()),
        })
        .await
        .expect("send failed");

    assert_eq!(store.state(CheckoutState::display_total).await, "300.00");

    session.gateway.script(PaymentOutcome::Success {
        reference: "R1".to_string(),
    });
    let resolution = store
        .send_and_wait_for(
            CheckoutAction::SubmitPayment,
            |a| matches!(a, CheckoutAction::PaymentSucceeded { .. }),
            Duration::from_secs(5),
        )
        .await
        .expect("payment did not resolve");
    assert_eq!(
        resolution,
        CheckoutAction::PaymentSucceeded {
            reference: "R1".to_string()
        }
    );

    assert_eq!(
        store.state(|s| s.phase.clone()).await,
        CheckoutPhase::Success {
            reference: "R1".to_string()
        }
    );

    // Exactly one invocation, with the amount in minor units and the fixed
    // currency.
    assert_eq!(session.gateway.invocation_count(), 1);
    let config = &session.gateway.invocations()[0];
    assert_eq!(config.amount_minor, 30_000);
    assert_eq!(config.currency, "GHS");
    assert_eq!(config.email, "ama@example.com");
    assert_eq!(
        config.reference,
        test_clock().now().timestamp_millis().to_string()
    );
}

#[tokio::test]
async fn scenario_b_zero_quantity_blocks_payment() {
    let session = ready_session().await;
    let store = &session.store;

    store.send(CheckoutAction::OpenBooking).await.expect("send failed");
    fill_buyer_details(store).await;
    store
        .send(CheckoutAction::FieldChanged {
            field: FormField::Quantity("0".to_string()),
        })
        .await
        .expect("send failed");

    assert_eq!(store.state(CheckoutState::display_total).await, "0.00");

    store.send(CheckoutAction::SubmitPayment).await.expect("send failed");

    assert_eq!(
        store.state(|s| s.phase.clone()).await,
        CheckoutPhase::ModalOpen
    );
    let notice = store.state(|s| s.notice).await.expect("notice expected");
    assert_eq!(notice, CheckoutNotice::MissingDetails);
    assert_eq!(notice.to_string(), "Please fill in all required fields.");
    assert_eq!(session.gateway.invocation_count(), 0);
}

#[tokio::test]
async fn scenario_c_stalled_script_blocks_payment_forever() {
    // The load signal never fires.
    let session = session();
    let store = &session.store;

    store.send(CheckoutAction::StartSession).await.expect("send failed");
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(
        store.state(|s| s.gateway).await,
        GatewayReadiness::Loading
    );

    store.send(CheckoutAction::OpenBooking).await.expect("send failed");
    fill_buyer_details(store).await;

    for _ in 0..3 {
        store.send(CheckoutAction::SubmitPayment).await.expect("send failed");
        let notice = store.state(|s| s.notice).await.expect("notice expected");
        assert_eq!(notice, CheckoutNotice::ServiceLoading);
        assert_eq!(
            notice.to_string(),
            "Payment service is still loading. Please try again in a moment."
        );
    }

    assert_eq!(session.gateway.invocation_count(), 0);
    assert_eq!(
        store.state(|s| s.gateway).await,
        GatewayReadiness::Loading
    );
    assert_eq!(
        store.state(|s| s.phase.clone()).await,
        CheckoutPhase::ModalOpen
    );
}

#[tokio::test]
async fn scenario_d_cancellation_returns_to_modal_with_details_intact() {
    let session = ready_session().await;
    let store = &session.store;

    store.send(CheckoutAction::OpenBooking).await.expect("send failed");
    fill_buyer_details(store).await;

    // Nothing scripted: the widget stays up until we cancel it.
    store.send(CheckoutAction::SubmitPayment).await.expect("send failed");
    assert!(matches!(
        store.state(|s| s.phase.clone()).await,
        CheckoutPhase::PaymentInProgress { .. }
    ));

    let form_before = store.state(|s| s.form.clone()).await;

    store.send(CheckoutAction::PaymentCancelled).await.expect("send failed");
    assert_eq!(
        store.state(|s| s.phase.clone()).await,
        CheckoutPhase::ModalOpen
    );
    assert_eq!(store.state(|s| s.form.clone()).await, form_before);
    assert_eq!(session.gateway.invocation_count(), 1);

    // A late success from the abandoned attempt must not resurrect it.
    store
        .send(CheckoutAction::PaymentSucceeded {
            reference: "R-late".to_string(),
        })
        .await
        .expect("send failed");
    assert_eq!(
        store.state(|s| s.phase.clone()).await,
        CheckoutPhase::ModalOpen
    );
}

#[tokio::test]
async fn rapid_double_submit_invokes_the_gateway_once() {
    let session = ready_session().await;
    let store = &session.store;

    store.send(CheckoutAction::OpenBooking).await.expect("send failed");
    fill_buyer_details(store).await;

    store.send(CheckoutAction::SubmitPayment).await.expect("send failed");
    store.send(CheckoutAction::SubmitPayment).await.expect("send failed");

    assert_eq!(session.gateway.invocation_count(), 1);
}

#[tokio::test]
async fn buyer_details_survive_modal_close_and_reset_after_success() {
    let session = ready_session().await;
    let store = &session.store;

    store.send(CheckoutAction::OpenBooking).await.expect("send failed");
    fill_buyer_details(store).await;

    // Close and reopen: everything typed is still there.
    store.send(CheckoutAction::CloseBooking).await.expect("send failed");
    store.send(CheckoutAction::OpenBooking).await.expect("send failed");
    assert_eq!(store.state(|s| s.form.name.clone()).await, "Ama Boateng");

    session.gateway.script(PaymentOutcome::Success {
        reference: "R2".to_string(),
    });
    store
        .send_and_wait_for(
            CheckoutAction::SubmitPayment,
            |a| matches!(a, CheckoutAction::PaymentSucceeded { .. }),
            Duration::from_secs(5),
        )
        .await
        .expect("payment did not resolve");

    // Leaving the success page starts the next buyer with a fresh form.
    store.send(CheckoutAction::ReturnToLanding).await.expect("send failed");
    assert_eq!(
        store.state(|s| s.phase.clone()).await,
        CheckoutPhase::Landing
    );
    assert_eq!(store.state(|s| s.form.name.clone()).await, "");
    assert_eq!(store.state(|s| s.form.quantity.clone()).await, "1");
}

#[tokio::test]
async fn teardown_drains_pending_effect_tasks() {
    let session = ready_session().await;

    tokio_test::assert_ok!(session.store.shutdown(Duration::from_secs(5)).await);
    let result = session.store.send(CheckoutAction::OpenBooking).await;
    assert!(result.is_err(), "store must reject actions after shutdown");
}
