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

//! Concurrent word frequency store.
//!
//! # Overview
//!
//! [`CountingStore`] maps lowercase words to the number of times they have been
//! inserted, and answers which stored word with a given prefix has the highest
//! count. Memory is bounded by a periodic sweep that drops every entry whose
//! count is at or below the configured retention threshold, so long running
//! counts are approximate by construction: a word that falls below the threshold
//! between two sweeps starts again from one.
//!
//! A fixed reject list is checked on every insert; rejected words never appear
//! in the store.
//!
//! # Concurrency
//!
//! Inserts and sweeps take exclusive access to the map; lookups take shared
//! access and may run in parallel with each other. A lookup that starts after an
//! insert has returned always observes that insert.
//!
//! [`Sweeper`] runs [`CountingStore::sweep`] on a timer in a background tokio
//! task. It is started and stopped explicitly by whoever owns the store, so tests
//! can call [`CountingStore::sweep`] directly instead.
//!
//! # Examples
//!
//! ```
//! # use wordfreq::store::CountingStore;
//! # use wordfreq::store::StoreConfig;
//! let store = CountingStore::new(&StoreConfig::default().with_retention_threshold(1));
//! store.insert("apple").unwrap();
//! store.insert("apple").unwrap();
//! store.insert("appetite").unwrap();
//! assert_eq!(store.find_most_frequent_by_prefix("app").unwrap(), "apple");
//!
//! assert_eq!(store.sweep(), 1);
//! assert_eq!(store.count("appetite"), None);
//! assert_eq!(store.count("apple"), Some(2));
//! ```

mod config;
mod counting_store;
mod sweeper;
mod word_store;

pub use self::config::DEFAULT_REJECT_LIST;
pub use self::config::StoreConfig;
pub use self::counting_store::CountingStore;
pub use self::counting_store::WordCount;
pub use self::sweeper::Sweeper;
pub use self::sweeper::SweeperState;
pub use self::word_store::WordStore;
