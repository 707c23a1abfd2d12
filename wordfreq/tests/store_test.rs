// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::thread;

use googletest::prelude::*;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use wordfreq::error::ErrorKind;
use wordfreq::store::CountingStore;
use wordfreq::store::StoreConfig;

fn new_store(retention_threshold: u64) -> CountingStore {
    CountingStore::new(&StoreConfig::default().with_retention_threshold(retention_threshold))
}

fn insert_times(store: &CountingStore, word: &str, times: u64) {
    for _ in 0..times {
        store.insert(word).unwrap();
    }
}

fn random_word(rng: &mut StdRng) -> String {
    const ALPHABET: &[u8] = b"abc";
    let len = rng.random_range(1..=4);
    (0..len)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Brute force lookup with the same tie-break as the store.
fn expected_most_frequent(counts: &HashMap<String, u64>, prefix: &str) -> Option<String> {
    counts
        .iter()
        .filter(|(word, _)| word.starts_with(prefix))
        .max_by(|(wa, ca), (wb, cb)| ca.cmp(cb).then_with(|| wb.cmp(wa)))
        .map(|(word, _)| word.clone())
}

#[test]
fn test_scenario_prefix_lookup() {
    let store = new_store(1);
    insert_times(&store, "apple", 2);
    insert_times(&store, "appetite", 3);
    insert_times(&store, "banana", 1);
    assert_eq!(store.find_most_frequent_by_prefix("app").unwrap(), "appetite");
}

#[test]
fn test_scenario_rejected_word() {
    let store = new_store(1);
    let err = store.insert("bad").unwrap_err();
    assert_that!(err.kind(), eq(ErrorKind::Rejected));
    assert!(store.is_empty());
}

#[test]
fn test_scenario_prefix_not_found() {
    let store = new_store(1);
    store.insert("apple").unwrap();
    let err = store.find_most_frequent_by_prefix("xyz").unwrap_err();
    assert_that!(err.kind(), eq(ErrorKind::NotFound));
    assert_eq!(err.context_value("prefix"), Some("xyz"));
}

#[test]
fn test_scenario_sweep() {
    let store = new_store(3);
    insert_times(&store, "apple", 3);
    insert_times(&store, "banana", 3);
    insert_times(&store, "cherry", 10);
    store.sweep();
    let words: Vec<String> = store
        .snapshot()
        .iter()
        .map(|row| row.word().to_string())
        .collect();
    assert_eq!(words, ["cherry"]);
}

#[test]
fn test_scenario_concurrent_inserts() {
    let store = new_store(1);
    thread::scope(|s| {
        for _ in 0..100 {
            s.spawn(|| store.insert("concurrent").unwrap());
        }
    });
    assert_that!(store.count("concurrent"), some(eq(100)));
}

#[test]
fn test_monotonic_counting() {
    let store = new_store(1);
    for n in 1..=50u64 {
        assert_that!(store.insert("steady").unwrap(), eq(n));
    }
    assert_that!(store.count("steady"), some(eq(50)));
}

#[test]
fn test_every_reject_list_word_is_excluded() {
    let config = StoreConfig::default().with_reject_list(["bad", "words", "example", "nope"]);
    let store = CountingStore::new(&config);
    store.insert("good").unwrap();
    for word in config.reject_list() {
        for _ in 0..3 {
            let err = store.insert(word).unwrap_err();
            assert_that!(err.kind(), eq(ErrorKind::Rejected));
        }
        assert_eq!(store.count(word), None);
    }
    assert_that!(store.len(), eq(1));
    assert_that!(store.count("good"), some(eq(1)));
}

#[test]
fn test_prefix_lookup_matches_brute_force() {
    let mut rng = StdRng::seed_from_u64(7);
    let store = new_store(1);
    let mut counts: HashMap<String, u64> = HashMap::new();
    for _ in 0..500 {
        let word = random_word(&mut rng);
        store.insert(&word).unwrap();
        *counts.entry(word).or_insert(0) += 1;
    }

    for _ in 0..200 {
        let prefix = random_word(&mut rng);
        match expected_most_frequent(&counts, &prefix) {
            Some(expected) => {
                let found = store.find_most_frequent_by_prefix(&prefix).unwrap();
                assert_eq!(found, expected, "prefix {prefix:?}");
                assert!(found.starts_with(&prefix));
                let best = counts[&found];
                assert!(
                    counts
                        .iter()
                        .filter(|(word, _)| word.starts_with(&prefix))
                        .all(|(_, &count)| count <= best)
                );
            }
            None => {
                let err = store.find_most_frequent_by_prefix(&prefix).unwrap_err();
                assert_that!(err.kind(), eq(ErrorKind::NotFound));
            }
        }
    }
}

#[test]
fn test_sweep_keeps_exactly_entries_above_threshold() {
    let mut rng = StdRng::seed_from_u64(11);
    for threshold in 0..5u64 {
        let store = new_store(threshold);
        let mut counts: HashMap<String, u64> = HashMap::new();
        for _ in 0..300 {
            let word = random_word(&mut rng);
            store.insert(&word).unwrap();
            *counts.entry(word).or_insert(0) += 1;
        }

        let removed = store.sweep();
        let expected_removed = counts.values().filter(|&&count| count <= threshold).count();
        assert_that!(removed, eq(expected_removed));

        for (word, &count) in &counts {
            if count > threshold {
                assert_eq!(store.count(word), Some(count), "word {word:?}");
            } else {
                assert_eq!(store.count(word), None, "word {word:?}");
            }
        }
        for row in store.snapshot() {
            assert!(row.count() > threshold);
        }

        let after_first = store.snapshot();
        assert_that!(store.sweep(), eq(0));
        assert_eq!(store.snapshot(), after_first);
    }
}

#[test]
fn test_concurrent_inserts_across_words() {
    let store = new_store(1);
    let words = ["alpha", "beta", "gamma", "delta"];
    thread::scope(|s| {
        for i in 0..8 {
            let store = &store;
            s.spawn(move || {
                for j in 0..250 {
                    store.insert(words[(i + j) % words.len()]).unwrap();
                }
            });
        }
    });
    for word in words {
        assert_that!(store.count(word), some(eq(500)));
    }
}

#[test]
fn test_lookups_never_observe_partial_updates() {
    let store = new_store(1);
    store.insert("concurrent").unwrap();
    let done = AtomicBool::new(false);
    let store = &store;
    let done = &done;

    thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(move || {
                let mut last = 0;
                while !done.load(Ordering::Acquire) {
                    let found = store.find_most_frequent_by_prefix("con").unwrap();
                    assert_eq!(found, "concurrent");
                    let count = store.count("concurrent").unwrap();
                    assert!(count >= 1);
                    assert!(count >= last, "count went backwards: {last} -> {count}");
                    last = count;
                }
            });
        }

        let writers: Vec<_> = (0..4)
            .map(|_| {
                s.spawn(move || {
                    for _ in 0..100 {
                        store.insert("concurrent").unwrap();
                        // threshold is 1, so the entry always survives
                        store.sweep();
                    }
                })
            })
            .collect();
        for writer in writers {
            writer.join().unwrap();
        }
        done.store(true, Ordering::Release);
    });

    assert_that!(store.count("concurrent"), some(eq(401)));
}
