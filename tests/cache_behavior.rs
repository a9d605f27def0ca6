//! Integration tests for the response cache through the public API

use std::cell::Cell;
use std::time::Duration;

use chrono::{Duration as ChronoDuration, TimeZone, Utc};
use weatherdash::cache::{cache_key, CacheConfig, ManualClock, RequestKind, TimeBoxedCache};

fn paris_cache() -> (TimeBoxedCache<String, ManualClock>, ManualClock) {
    let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 7, 15, 0, 0, 0).unwrap());
    let cache = TimeBoxedCache::with_clock(
        CacheConfig::with_window(Duration::from_secs(600)),
        clock.clone(),
    );
    (cache, clock)
}

#[test]
fn test_window_scenario_with_normalized_keys() {
    let (mut cache, clock) = paris_cache();
    let calls = Cell::new(0);
    let fetch_a = || -> Result<String, String> {
        calls.set(calls.get() + 1);
        Ok(format!("report #{}", calls.get()))
    };

    let first = cache
        .get_or_fetch(&cache_key(RequestKind::Current, "Paris"), fetch_a)
        .unwrap();

    clock.advance(ChronoDuration::seconds(300));
    let second = cache
        .get_or_fetch(&cache_key(RequestKind::Current, " PARIS "), fetch_a)
        .unwrap();
    assert_eq!(first, second);
    assert_eq!(calls.get(), 1);

    clock.advance(ChronoDuration::seconds(301));
    let third = cache
        .get_or_fetch(&cache_key(RequestKind::Current, "paris"), fetch_a)
        .unwrap();
    assert_eq!(third, "report #2");
    assert_eq!(calls.get(), 2);
}

#[test]
fn test_failure_then_recovery() {
    let (mut cache, clock) = paris_cache();
    let key = cache_key(RequestKind::Forecast, "Oslo");

    let err = cache
        .get_or_fetch(&key, || Err::<String, _>("timeout".to_string()))
        .unwrap_err();
    assert_eq!(err, "timeout");
    assert!(cache.peek(&key).is_none());

    let ok = cache
        .get_or_fetch(&key, || Ok::<_, String>("sunny".to_string()))
        .unwrap();
    assert_eq!(ok, "sunny");

    clock.advance(ChronoDuration::minutes(15));
    let err = cache
        .get_or_fetch(&key, || Err::<String, _>("offline".to_string()))
        .unwrap_err();
    assert_eq!(err, "offline");

    let stale = cache.peek(&key).expect("Stale entry should remain readable");
    assert!(stale.is_expired);
    assert_eq!(stale.data, "sunny");
}
