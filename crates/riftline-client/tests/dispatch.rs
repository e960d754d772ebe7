use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use riftline_client::{Client, Dispatcher, EventHandler, Subscription};
use riftline_model::{
    Event, EventKind, EventPayload, HeartbeatEvent, PlayerEvent, PlayerRef, SchemaError,
};
use serde_json::json;

fn heartbeat(seq: u64) -> Event {
    Event {
        kind: EventKind::Heartbeat,
        ts: 0,
        payload: EventPayload::Heartbeat(HeartbeatEvent { seq }),
    }
}

fn kill(summoner: &str) -> Event {
    Event {
        kind: EventKind::Kill,
        ts: 0,
        payload: EventPayload::Player(PlayerEvent {
            player: PlayerRef {
                summoner_name: summoner.to_string(),
                team: "order".to_string(),
                slot: 0,
            },
        }),
    }
}

#[test]
fn handlers_fire_in_subscription_order() {
    let dispatcher = Dispatcher::new();
    let order = Arc::new(Mutex::new(Vec::new()));

    for label in ["h1", "h2", "h3"] {
        let order = Arc::clone(&order);
        let _handle = dispatcher.subscribe(EventKind::Kill, move |_event| {
            order.lock().expect("order mutex").push(label);
        });
    }

    dispatcher.emit(&kill("Ashe"));
    assert_eq!(*order.lock().expect("order mutex"), vec!["h1", "h2", "h3"]);
}

#[test]
fn closing_one_subscription_leaves_the_other_registration_live() {
    let dispatcher = Dispatcher::new();
    let calls = Arc::new(AtomicUsize::new(0));

    let handler: EventHandler = {
        let calls = Arc::clone(&calls);
        Arc::new(move |_event: &Event| {
            calls.fetch_add(1, Ordering::SeqCst);
        })
    };

    let first = dispatcher.subscribe_handler(EventKind::Kill, Arc::clone(&handler));
    let _second = dispatcher.subscribe_handler(EventKind::Kill, handler);

    first.close();
    dispatcher.emit(&kill("Ashe"));

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(dispatcher.registered_kinds(), vec![EventKind::Kill]);
}

#[test]
fn subscription_close_is_idempotent() {
    let dispatcher = Dispatcher::new();
    let calls = Arc::new(AtomicUsize::new(0));

    let handle = {
        let calls = Arc::clone(&calls);
        dispatcher.subscribe(EventKind::Heartbeat, move |_event| {
            calls.fetch_add(1, Ordering::SeqCst);
        })
    };

    handle.close();
    handle.close();
    dispatcher.emit(&heartbeat(1));

    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(dispatcher.registered_kinds().is_empty());
}

#[test]
fn subscribers_only_see_their_kind() {
    let client = Client::default();
    let calls = Arc::new(AtomicUsize::new(0));

    let _handle = {
        let calls = Arc::clone(&calls);
        client.subscribe(EventKind::Kill, move |event| {
            assert_eq!(event.kind, EventKind::Kill);
            calls.fetch_add(1, Ordering::SeqCst);
        })
    };

    client.emit(&kill("Ashe"));
    client.emit(&heartbeat(1));

    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn raw_gold_envelope_reaches_a_gold_subscriber() {
    let client = Client::default();
    let seen = Arc::new(Mutex::new(None));

    let _handle = {
        let seen = Arc::clone(&seen);
        client.subscribe(EventKind::GoldDelta, move |event| {
            *seen.lock().expect("seen mutex") = Some(event.clone());
        })
    };

    let event = client
        .emit_raw(&json!({
            "kind": "goldDelta",
            "ts": 1000,
            "payload": {
                "payloadKind": "playerGold",
                "player": {"summonerName": "Ashe", "team": "order", "slot": 1},
                "delta": 50,
                "total": 650,
            },
        }))
        .expect("valid envelope");

    let seen = seen.lock().expect("seen mutex").clone().expect("dispatched");
    assert_eq!(seen, event);
    assert_eq!(seen.kind, EventKind::GoldDelta);
    match seen.payload {
        EventPayload::PlayerGold(body) => {
            assert_eq!(body.delta, 50);
            assert_eq!(body.total, 650);
        }
        other => panic!("unexpected payload {other:?}"),
    }
}

#[test]
fn invalid_raw_input_dispatches_nothing() {
    let client = Client::default();
    let calls = Arc::new(AtomicUsize::new(0));

    let _handle = {
        let calls = Arc::clone(&calls);
        client.subscribe(EventKind::Heartbeat, move |_event| {
            calls.fetch_add(1, Ordering::SeqCst);
        })
    };

    let err = client
        .emit_raw(&json!({
            "kind": "heartbeat",
            "ts": 0,
            "payload": {"payloadKind": "bogus", "seq": 0},
        }))
        .expect_err("unknown payload kind");

    assert_eq!(
        err,
        SchemaError::UnknownPayloadKind {
            value: "bogus".to_string()
        }
    );
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn close_is_idempotent_and_resets_the_registry() {
    let client = Client::default();
    let _kill = client.subscribe(EventKind::Kill, |_event| {});
    let _phase = client.subscribe(EventKind::PhaseChange, |_event| {});
    assert_eq!(
        client.registered_kinds(),
        vec![EventKind::Kill, EventKind::PhaseChange]
    );

    client.close();
    client.close();
    assert!(client.registered_kinds().is_empty());

    // Close is a reset, not a kill-switch: the client stays usable.
    let calls = Arc::new(AtomicUsize::new(0));
    let _handle = {
        let calls = Arc::clone(&calls);
        client.subscribe(EventKind::Heartbeat, move |_event| {
            calls.fetch_add(1, Ordering::SeqCst);
        })
    };
    client.emit(&heartbeat(2));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn handler_unsubscribing_itself_still_fires_for_the_current_emit() {
    let dispatcher = Dispatcher::new();
    let calls = Arc::new(AtomicUsize::new(0));
    let slot: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));

    let handle = {
        let calls = Arc::clone(&calls);
        let slot = Arc::clone(&slot);
        dispatcher.subscribe(EventKind::Heartbeat, move |_event| {
            calls.fetch_add(1, Ordering::SeqCst);
            if let Some(subscription) = slot.lock().expect("slot mutex").take() {
                subscription.close();
            }
        })
    };
    *slot.lock().expect("slot mutex") = Some(handle);

    dispatcher.emit(&heartbeat(1));
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    dispatcher.emit(&heartbeat(2));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(dispatcher.registered_kinds().is_empty());
}

#[test]
fn handler_subscribing_mid_emit_only_affects_future_emits() {
    let dispatcher = Dispatcher::new();
    let late_calls = Arc::new(AtomicUsize::new(0));

    let _handle = {
        let inner = dispatcher.clone();
        let late_calls = Arc::clone(&late_calls);
        dispatcher.subscribe(EventKind::Heartbeat, move |_event| {
            let late_calls = Arc::clone(&late_calls);
            // Dropping the handle does not unsubscribe; the registration
            // stays live for the rest of the test.
            let _ = inner.subscribe(EventKind::Heartbeat, move |_event| {
                late_calls.fetch_add(1, Ordering::SeqCst);
            });
        })
    };

    dispatcher.emit(&heartbeat(1));
    assert_eq!(late_calls.load(Ordering::SeqCst), 0);

    dispatcher.emit(&heartbeat(2));
    assert_eq!(late_calls.load(Ordering::SeqCst), 1);
}

#[test]
fn registered_kinds_reports_live_handlers_only() {
    let dispatcher = Dispatcher::new();
    assert!(dispatcher.registered_kinds().is_empty());

    let kill_handle = dispatcher.subscribe(EventKind::Kill, |_event| {});
    let _gold_handle = dispatcher.subscribe(EventKind::GoldDelta, |_event| {});
    assert_eq!(
        dispatcher.registered_kinds(),
        vec![EventKind::Kill, EventKind::GoldDelta]
    );

    kill_handle.close();
    assert_eq!(dispatcher.registered_kinds(), vec![EventKind::GoldDelta]);

    // Reads never materialize entries.
    dispatcher.emit(&heartbeat(1));
    assert_eq!(dispatcher.registered_kinds(), vec![EventKind::GoldDelta]);
}

#[test]
fn panicking_handler_aborts_delivery_but_not_the_dispatcher() {
    let dispatcher = Dispatcher::new();
    let later_calls = Arc::new(AtomicUsize::new(0));

    let _first = dispatcher.subscribe(EventKind::Heartbeat, |_event| {
        panic!("handler failure");
    });
    let _second = {
        let later_calls = Arc::clone(&later_calls);
        dispatcher.subscribe(EventKind::Heartbeat, move |_event| {
            later_calls.fetch_add(1, Ordering::SeqCst);
        })
    };

    // Failures are not isolated: the panic unwinds out of emit and later
    // handlers in the snapshot never run.
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        dispatcher.emit(&heartbeat(1));
    }));
    assert!(result.is_err());
    assert_eq!(later_calls.load(Ordering::SeqCst), 0);

    // The registry itself survives.
    assert_eq!(dispatcher.registered_kinds(), vec![EventKind::Heartbeat]);
}

#[test]
fn dispatch_works_across_threads() {
    let dispatcher = Dispatcher::new();
    let calls = Arc::new(AtomicUsize::new(0));

    let _handle = {
        let calls = Arc::clone(&calls);
        dispatcher.subscribe(EventKind::Heartbeat, move |_event| {
            calls.fetch_add(1, Ordering::SeqCst);
        })
    };

    let workers: Vec<_> = (0..4)
        .map(|seq| {
            let dispatcher = dispatcher.clone();
            thread::spawn(move || dispatcher.emit(&heartbeat(seq)))
        })
        .collect();
    for worker in workers {
        worker.join().expect("worker thread panicked");
    }

    assert_eq!(calls.load(Ordering::SeqCst), 4);
}
