use rattendlog::core::watch::{RequestTokens, Subscription};
use rattendlog::errors::AppError;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

const WAIT: Duration = Duration::from_secs(5);

#[test]
fn test_first_snapshot_is_delivered_immediately() {
    let sub = Subscription::spawn(Duration::from_secs(60), || Ok(vec![1, 2, 3]));

    let snap = sub.recv_timeout(WAIT).expect("first snapshot");
    assert_eq!(snap.seq, 1);
    assert_eq!(snap.data, vec![1, 2, 3]);

    sub.cancel();
}

#[test]
fn test_only_changes_are_delivered() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();

    // value changes every third poll: 0,0,0,1,1,1,2,...
    let sub = Subscription::spawn(Duration::from_millis(5), move || {
        Ok(counter.fetch_add(1, Ordering::SeqCst) / 3)
    });

    let a = sub.recv_timeout(WAIT).expect("snapshot");
    let b = sub.recv_timeout(WAIT).expect("snapshot");
    let c = sub.recv_timeout(WAIT).expect("snapshot");

    assert_eq!((a.data, b.data, c.data), (0, 1, 2));
    assert_eq!((a.seq, b.seq, c.seq), (1, 2, 3));
    assert!(calls.load(Ordering::SeqCst) >= 7);
}

#[test]
fn test_load_errors_keep_the_stream_alive() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();

    let sub = Subscription::spawn(Duration::from_millis(5), move || {
        let n = counter.fetch_add(1, Ordering::SeqCst);
        if n < 2 {
            Err(AppError::fetch("logs", "offline"))
        } else {
            Ok("online".to_string())
        }
    });

    let snap = sub.recv_timeout(WAIT).expect("snapshot after recovery");
    assert_eq!(snap.data, "online");
    assert_eq!(snap.seq, 1);
}

#[test]
fn test_cancel_ends_the_stream() {
    let sub = Subscription::spawn(Duration::from_millis(5), || Ok(42u32));
    assert!(sub.recv_timeout(WAIT).is_some());

    let rx = sub.receiver().clone();
    sub.cancel();

    // the poller is gone: nothing but disconnection is left
    assert!(rx.recv_timeout(Duration::from_millis(200)).is_err());
}

#[test]
fn test_last_request_wins() {
    let tokens = RequestTokens::new();

    let slow = tokens.issue();
    let fresh = tokens.issue();

    // the fresh answer lands first, then the stale one
    assert_eq!(tokens.accept(fresh, "fresh"), Some("fresh"));
    assert_eq!(tokens.accept(slow, "stale"), None);

    assert!(tokens.is_current(fresh));
    assert!(!tokens.is_current(slow));
}

#[test]
fn test_tokens_are_shared_between_clones() {
    let tokens = RequestTokens::new();
    let worker_view = tokens.clone();

    let first = tokens.issue();
    assert!(worker_view.is_current(first));

    let _second = worker_view.issue();
    assert!(!tokens.is_current(first));
}
