mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use buddy_core::{Dispatcher, InlineDispatcher};
use buddy_interaction::{NearbySearch, UserSearch};
use common::{ScriptedTransport, client, logged_in, profile_record};
use tokio::sync::mpsc;

#[tokio::test]
async fn test_callback_receives_result_and_state_once() {
    let transport = ScriptedTransport::new();
    transport.reply_text("Pong");
    let (tx, mut rx) = mpsc::unbounded_channel();

    client(&transport)
        .ping()
        .on_complete("ping-1", move |value, status| {
            tx.send((value, status)).expect("Receiver should be alive");
        })
        .expect("Should start the call")
        .await
        .expect("Callback task should finish");

    let (value, status) = rx.recv().await.expect("Callback should fire");
    assert_eq!(value.flatten().as_deref(), Some("Pong"));
    assert_eq!(status.state, "ping-1");
    assert!(status.is_ok());
    // The sender was consumed with the callback, so nothing else can arrive.
    assert!(rx.recv().await.is_none());
    assert_eq!(transport.call_count(), 1);
}

#[tokio::test]
async fn test_callback_reports_service_fault_in_status() {
    let transport = ScriptedTransport::new();
    transport.reply_code("InvalidApplicationCredentials");
    let (tx, mut rx) = mpsc::unbounded_channel();

    client(&transport)
        .service_version()
        .on_complete(17_u32, move |value, status| {
            tx.send((value, status)).expect("Receiver should be alive");
        })
        .unwrap()
        .await
        .unwrap();

    let (value, status) = rx.recv().await.unwrap();
    assert!(value.is_none());
    assert_eq!(status.state, 17);
    let error = status.error.expect("Should carry the fault");
    assert!(error.is_service_code("InvalidApplicationCredentials"));
}

#[tokio::test]
async fn test_validation_fault_is_synchronous_on_callback_surface() {
    let transport = ScriptedTransport::new();
    let user = logged_in(&transport, "ada").await;
    let invoked = Arc::new(AtomicUsize::new(0));

    let counter = invoked.clone();
    let err = user
        .get_user_by_id(-5)
        .on_complete((), move |_, _| {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .expect_err("Negative id should be rejected before dispatch");

    assert_eq!(err.argument_name(), Some("userId"));
    tokio::task::yield_now().await;
    assert_eq!(invoked.load(Ordering::SeqCst), 0);
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn test_out_of_range_latitude_never_reaches_transport() {
    let transport = ScriptedTransport::new();
    let user = logged_in(&transport, "ada").await;

    let search = UserSearch::near(NearbySearch::around(95.0, 10.0));
    let err = user
        .find_users(&search)
        .await
        .expect_err("Latitude 95 is out of range");

    assert!(err.is_validation());
    assert_eq!(err.argument_name(), Some("latitude"));
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn test_find_users_sends_filters_and_measures_distance() {
    let transport = ScriptedTransport::new();
    let user = logged_in(&transport, "ada").await;
    transport.reply_records(vec![profile_record(5, "grace")]);

    let search = UserSearch::near(NearbySearch::around(47.6062, -122.3321).limit(5));
    let found = user.find_users(&search).await.expect("Should search");

    assert_eq!(found.len(), 1);
    let distance = found[0].distance.expect("Should have a distance");
    assert!(distance.meters < 1.0);

    let call = &transport.calls()[0];
    assert_eq!(call.method, "UserAccount_Profile_Search");
    assert_eq!(call.params.get("RecordLimit"), Some("5"));
    assert_eq!(call.params.get("SearchDistance"), Some("40075000"));
    assert_eq!(call.params.get("StatusID"), Some("-1"));
    assert_eq!(call.params.get("UserToken"), Some("UT-token-1"));
}

#[tokio::test]
async fn test_dispatcher_runs_continuation() {
    struct Counting(AtomicUsize);

    impl Dispatcher for Counting {
        fn dispatch(&self, job: Box<dyn FnOnce() + Send + 'static>) {
            self.0.fetch_add(1, Ordering::SeqCst);
            InlineDispatcher.dispatch(job);
        }
    }

    let transport = ScriptedTransport::new();
    transport.reply_text("1.0.4");
    let dispatcher = Arc::new(Counting(AtomicUsize::new(0)));
    let (tx, mut rx) = mpsc::unbounded_channel();

    client(&transport)
        .service_version()
        .on_complete_via(dispatcher.clone(), (), move |value, _| {
            tx.send(value.flatten()).expect("Receiver should be alive");
        })
        .unwrap()
        .await
        .unwrap();

    assert_eq!(rx.recv().await.unwrap().as_deref(), Some("1.0.4"));
    assert_eq!(dispatcher.0.load(Ordering::SeqCst), 1);
}
