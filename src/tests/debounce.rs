use super::Debouncer;
use std::time::{Duration, Instant};

#[test]
fn test_only_last_value_in_burst_fires() {
    let mut debouncer = Debouncer::new(Duration::from_millis(300));
    let t0 = Instant::now();

    debouncer.schedule("a", t0);
    debouncer.schedule("ab", t0 + Duration::from_millis(100));
    debouncer.schedule("abc", t0 + Duration::from_millis(200));

    assert_eq!(debouncer.poll(t0 + Duration::from_millis(300)), None);
    assert_eq!(debouncer.poll(t0 + Duration::from_millis(499)), None);
    assert_eq!(debouncer.poll(t0 + Duration::from_millis(500)), Some("abc"));
    assert_eq!(debouncer.poll(t0 + Duration::from_millis(900)), None);
}

#[test]
fn test_cancel_drops_pending() {
    let mut debouncer = Debouncer::new(Duration::from_millis(300));
    let t0 = Instant::now();

    debouncer.schedule(1, t0);
    assert!(debouncer.is_pending());
    assert_eq!(debouncer.deadline(), Some(t0 + Duration::from_millis(300)));

    debouncer.cancel();
    assert!(!debouncer.is_pending());
    assert_eq!(debouncer.poll(t0 + Duration::from_secs(1)), None);
}
