#![no_main]

use assockit::policy::lru::LruCache;
use assockit::traits::LruCacheTrait;
use libfuzzer_sys::fuzz_target;

// Fuzz LruCache under arbitrary limits, ratios and reconfiguration
//
// The cache must never hold more than `limit` entries, and its internal
// index and recency list must always agree.
fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let limit = (data[0] % 16) as usize;
    let ratio = f64::from(data[1]) / 255.0;
    let mut cache: LruCache<u8, u8> = LruCache::with_ratio(limit, ratio);

    for pair in data[2..].chunks(2) {
        if pair.len() < 2 {
            break;
        }
        let key = pair[1] % 24;
        match pair[0] % 7 {
            0 | 1 => {
                cache.set(key, pair[1]);
            }
            2 => {
                let before = cache.contains_key(&key);
                assert_eq!(cache.get(&key).is_some(), before);
                if before {
                    assert_eq!(cache.recency_rank(&key), Some(0));
                }
            }
            3 => {
                cache.peek(&key);
            }
            4 => {
                cache.remove(&key);
            }
            5 => {
                cache.set_limit((pair[1] % 16) as usize);
            }
            _ => {
                cache.set_ratio(f64::from(pair[1]) / 200.0);
            }
        }

        assert!(cache.len() <= cache.limit());
        assert!(cache.check_invariants().is_ok());
    }
});
