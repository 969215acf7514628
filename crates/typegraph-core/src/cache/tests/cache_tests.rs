use crate::cache::Cache;
use crate::cache::CacheConfigurationError;
use rayon::prelude::*;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Barrier;
use std::time::Duration;

#[test]
fn zero_capacity_is_rejected() {
    let result = Cache::<String>::new(0);
    assert!(matches!(result, Err(CacheConfigurationError::ZeroCapacity)));
}

#[test]
fn least_recently_used_entry_is_evicted() {
    let cache = Cache::<u32>::new(2).expect("valid capacity");
    cache.get_or_create("a", || 1);
    cache.get_or_create("b", || 2);
    cache.get_or_create("c", || 3);

    assert_eq!(cache.len(), 2);
    assert!(!cache.contains_key("a"));
    assert_eq!(cache.try_get("b"), Some(2));
    assert_eq!(cache.try_get("c"), Some(3));
}

#[test]
fn reads_refresh_recency() {
    let cache = Cache::<u32>::new(2).expect("valid capacity");
    cache.get_or_create("a", || 1);
    cache.get_or_create("b", || 2);

    assert_eq!(cache.try_get("a"), Some(1));
    cache.get_or_create("c", || 3);

    assert!(cache.contains_key("a"));
    assert!(!cache.contains_key("b"));
}

#[test]
fn cache_hits_refresh_recency() {
    let cache = Cache::<u32>::new(2).expect("valid capacity");
    cache.get_or_create("a", || 1);
    cache.get_or_create("b", || 2);

    assert_eq!(cache.get_or_create("a", || panic!("factory should not run")), 1);
    cache.get_or_create("c", || 3);

    assert!(cache.contains_key("a"));
    assert!(!cache.contains_key("b"));
    assert!(cache.contains_key("c"));
}

#[test]
fn cached_values_skip_the_factory() {
    let cache = Cache::<u32>::new(4).expect("valid capacity");
    assert_eq!(cache.get_or_create("a", || 1), 1);
    assert_eq!(cache.get_or_create("a", || panic!("factory should not run")), 1);
}

#[test]
fn try_add_only_adds_absent_keys() {
    let cache = Cache::<u32>::new(4).expect("valid capacity");

    assert!(cache.try_add("a", 1));
    assert!(!cache.try_add("a", 2));
    assert_eq!(cache.try_get("a"), Some(1));
    assert_eq!(cache.try_get("missing"), None);
}

#[test]
fn failed_creation_leaves_key_absent() {
    let cache = Cache::<u32, String>::new(4).expect("valid capacity");

    let result = cache.try_get_or_create("a", || Err("boom".to_string()));
    assert_eq!(result, Err("boom".to_string()));
    assert!(!cache.contains_key("a"));
    assert!(cache.is_empty());

    let result = cache.try_get_or_create("a", || Ok(7));
    assert_eq!(result, Ok(7));
    assert_eq!(cache.try_get("a"), Some(7));
}

#[test]
fn panicking_factory_releases_the_key() {
    let cache = Cache::<u32>::new(4).expect("valid capacity");

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        cache.get_or_create("a", || panic!("factory failed"))
    }));
    assert!(result.is_err());
    assert!(!cache.contains_key("a"));

    assert_eq!(cache.get_or_create("a", || 3), 3);
}

#[test]
fn concurrent_callers_share_one_creation() {
    const THREADS: usize = 16;
    let cache = Cache::<usize>::new(8).expect("valid capacity");
    let factory_calls = AtomicUsize::new(0);
    let barrier = Barrier::new(THREADS);

    let (cache, factory_calls, barrier) = (&cache, &factory_calls, &barrier);
    let results = std::thread::scope(|scope| {
        let handles = (0..THREADS).map(|_| scope.spawn(move || {
            barrier.wait();
            cache.get_or_create("shared", || {
                factory_calls.fetch_add(1, Ordering::SeqCst);
                std::thread::sleep(Duration::from_millis(50));
                42
            })
        })).collect::<Vec<_>>();

        handles.into_iter()
            .map(|handle| handle.join().expect("thread panicked"))
            .collect::<Vec<_>>()
    });

    assert_eq!(results, vec![42; THREADS]);
    assert_eq!(factory_calls.load(Ordering::SeqCst), 1);
    assert_eq!(cache.len(), 1);
}

#[test]
fn waiters_receive_the_creators_error() {
    let cache = Cache::<u32, String>::new(4).expect("valid capacity");
    let creation_started = Barrier::new(2);

    let (creator_result, waiter_result) = std::thread::scope(|scope| {
        let creator = scope.spawn(|| {
            cache.try_get_or_create("a", || {
                creation_started.wait();
                std::thread::sleep(Duration::from_millis(200));
                Err("boom".to_string())
            })
        });
        let waiter = scope.spawn(|| {
            creation_started.wait();
            cache.try_get_or_create("a", || Ok(1))
        });
        (
            creator.join().expect("creator panicked"),
            waiter.join().expect("waiter panicked"),
        )
    });

    assert_eq!(creator_result, Err("boom".to_string()));
    assert_eq!(waiter_result, Err("boom".to_string()));
    assert!(!cache.contains_key("a"));
}

#[test]
fn parallel_callers_create_each_key_once() {
    let cache = Cache::<String>::new(16).expect("valid capacity");
    let factory_calls = AtomicUsize::new(0);

    let values = (0..256usize).into_par_iter().map(|idx| {
        let key = format!("key{}", idx % 4);
        cache.get_or_create(&key, || {
            factory_calls.fetch_add(1, Ordering::SeqCst);
            key.to_uppercase()
        })
    }).collect::<Vec<_>>();

    assert_eq!(factory_calls.load(Ordering::SeqCst), 4);
    assert_eq!(cache.len(), 4);
    for (idx, value) in values.iter().enumerate() {
        assert_eq!(value, &format!("KEY{}", idx % 4));
    }
}

#[test]
fn clear_drops_every_entry() {
    let cache = Cache::<u32>::new(4).expect("valid capacity");
    cache.get_or_create("a", || 1);
    cache.get_or_create("b", || 2);

    cache.clear();

    assert!(cache.is_empty());
    assert_eq!(cache.capacity(), 4);
    assert_eq!(cache.try_get("a"), None);
}
