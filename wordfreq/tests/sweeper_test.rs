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

use std::sync::Arc;
use std::time::Duration;

use googletest::prelude::*;
use wordfreq::store::CountingStore;
use wordfreq::store::StoreConfig;
use wordfreq::store::Sweeper;
use wordfreq::store::SweeperState;

const INTERVAL: Duration = Duration::from_millis(100);

fn seeded_store() -> Arc<CountingStore> {
    let store = CountingStore::new(&StoreConfig::default().with_retention_threshold(3));
    for (word, times) in [("apple", 3), ("banana", 3), ("cherry", 10)] {
        for _ in 0..times {
            store.insert(word).unwrap();
        }
    }
    Arc::new(store)
}

#[tokio::test(start_paused = true)]
async fn test_sweeps_on_interval() {
    let store = seeded_store();
    let sweeper = Sweeper::start(Arc::clone(&store), INTERVAL);
    assert_that!(sweeper.state(), eq(SweeperState::Idle));

    // nothing happens before the first interval elapses
    tokio::time::sleep(INTERVAL / 2).await;
    assert_that!(sweeper.sweeps(), eq(0));
    assert_that!(store.len(), eq(3));

    tokio::time::sleep(INTERVAL).await;
    assert_that!(sweeper.sweeps(), eq(1));
    assert_that!(store.count("apple"), none());
    assert_that!(store.count("banana"), none());
    assert_that!(store.count("cherry"), some(eq(10)));

    tokio::time::sleep(INTERVAL * 3).await;
    assert_that!(sweeper.sweeps(), eq(4));
    assert_that!(sweeper.state(), eq(SweeperState::Idle));

    sweeper.stop().await;
}

#[tokio::test(start_paused = true)]
async fn test_no_sweep_after_stop() {
    let store = seeded_store();
    let sweeper = Sweeper::start(Arc::clone(&store), INTERVAL);
    sweeper.stop().await;

    tokio::time::sleep(INTERVAL * 10).await;
    assert_that!(store.count("apple"), some(eq(3)));
    assert_that!(store.len(), eq(3));
}

#[tokio::test(start_paused = true)]
async fn test_cancel_reaches_stopped() {
    let store = seeded_store();
    let sweeper = Sweeper::start(Arc::clone(&store), INTERVAL);
    sweeper.cancel();

    tokio::time::sleep(INTERVAL * 5).await;
    assert_that!(sweeper.state(), eq(SweeperState::Stopped));
    assert_that!(sweeper.sweeps(), eq(0));
    assert_that!(store.len(), eq(3));
}

#[tokio::test(start_paused = true)]
async fn test_drop_cancels() {
    let store = seeded_store();
    drop(Sweeper::start(Arc::clone(&store), INTERVAL));

    tokio::time::sleep(INTERVAL * 5).await;
    assert_that!(store.len(), eq(3));
    // the task has released its handle on the store
    assert_that!(Arc::strong_count(&store), eq(1));
}

#[tokio::test(start_paused = true)]
async fn test_inserts_between_sweeps() {
    let store = seeded_store();
    let sweeper = Sweeper::start(Arc::clone(&store), INTERVAL);

    tokio::time::sleep(INTERVAL + INTERVAL / 2).await;
    assert_that!(store.len(), eq(1));

    for _ in 0..2 {
        store.insert("apple").unwrap();
    }
    assert_that!(store.count("apple"), some(eq(2)));

    tokio::time::sleep(INTERVAL).await;
    assert_that!(store.count("apple"), none());
    assert_that!(store.count("cherry"), some(eq(10)));

    sweeper.stop().await;
}

#[test]
#[should_panic(expected = "sweep interval must be positive")]
fn test_zero_interval_panics() {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .unwrap();
    let store = seeded_store();
    runtime.block_on(async move {
        let _sweeper = Sweeper::start(store, Duration::ZERO);
    });
}
