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
use std::collections::HashSet;

use parking_lot::RwLock;

use crate::error::Error;
use crate::error::Result;
use crate::store::StoreConfig;
use crate::store::WordStore;

/// A stored word together with the number of times it has been inserted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WordCount {
    word: String,
    count: u64,
}

impl WordCount {
    /// Returns the word.
    pub fn word(&self) -> &str {
        &self.word
    }

    /// Returns the count. Always at least one.
    pub fn count(&self) -> u64 {
        self.count
    }
}

/// Thread-safe mapping from word to occurrence count.
///
/// See [`crate::store`] for an overview.
#[derive(Debug)]
pub struct CountingStore {
    entries: RwLock<HashMap<String, u64>>,
    retention_threshold: u64,
    reject_list: HashSet<String>,
}

impl CountingStore {
    /// Creates an empty store.
    ///
    /// Reject list entries are lowercased so they match normalized input.
    pub fn new(config: &StoreConfig) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            retention_threshold: config.retention_threshold(),
            reject_list: config
                .reject_list()
                .iter()
                .map(|word| word.to_lowercase())
                .collect(),
        }
    }

    /// Replaces the reject list. Entries are lowercased.
    ///
    /// Words already stored are kept even if they are now rejected.
    pub fn with_reject_list<I, W>(mut self, reject_list: I) -> Self
    where
        I: IntoIterator<Item = W>,
        W: AsRef<str>,
    {
        self.reject_list = reject_list
            .into_iter()
            .map(|word| word.as_ref().to_lowercase())
            .collect();
        self
    }

    /// Increments the count of `word`, creating the entry with a count of one
    /// if it does not exist, and returns the new count.
    ///
    /// `word` must already be lowercased; the store does not normalize it.
    ///
    /// Fails with [`ErrorKind::Rejected`](crate::error::ErrorKind::Rejected)
    /// if the word is on the reject list, in which case nothing is modified.
    pub fn insert(&self, word: &str) -> Result<u64> {
        debug_assert!(!word.is_empty(), "word must not be empty");
        if self.is_rejected(word) {
            tracing::warn!(word, "rejected forbidden word");
            return Err(Error::rejected(word));
        }

        let count = {
            let mut entries = self.entries.write();
            match entries.get_mut(word) {
                Some(count) => {
                    *count = count.saturating_add(1);
                    *count
                }
                None => {
                    entries.insert(word.to_string(), 1);
                    1
                }
            }
        };
        tracing::info!(word, count, "word inserted");
        Ok(count)
    }

    /// Returns the stored word with the highest count among those starting with
    /// `prefix`.
    ///
    /// When several matching words share the highest count, the
    /// lexicographically smallest one is returned. An empty prefix matches
    /// every word.
    ///
    /// Fails with [`ErrorKind::NotFound`](crate::error::ErrorKind::NotFound) if
    /// no stored word starts with `prefix`.
    pub fn find_most_frequent_by_prefix(&self, prefix: &str) -> Result<String> {
        let found = {
            let entries = self.entries.read();
            let mut best: Option<(&str, u64)> = None;
            for (word, &count) in entries.iter() {
                if !word.starts_with(prefix) {
                    continue;
                }
                let replace = match best {
                    None => true,
                    Some((best_word, best_count)) => {
                        count > best_count || (count == best_count && word.as_str() < best_word)
                    }
                };
                if replace {
                    best = Some((word.as_str(), count));
                }
            }
            best.map(|(word, _)| word.to_string())
        };

        match found {
            Some(word) => {
                tracing::debug!(
                    prefix,
                    word = word.as_str(),
                    "found most frequent word for prefix"
                );
                Ok(word)
            }
            None => {
                tracing::debug!(prefix, "no word found for prefix");
                Err(Error::not_found(prefix))
            }
        }
    }

    /// Removes every entry whose count is at or below the retention threshold
    /// and returns how many were removed.
    ///
    /// Holds exclusive access for one pass over the entries. Running it again
    /// without intervening inserts removes nothing.
    pub fn sweep(&self) -> usize {
        let threshold = self.retention_threshold;
        let (removed, remaining) = {
            let mut entries = self.entries.write();
            let before = entries.len();
            entries.retain(|_, count| *count > threshold);
            let remaining = entries.len();
            // release the slack left behind by a large sweep
            if entries.capacity() > remaining.saturating_mul(4).max(64) {
                entries.shrink_to_fit();
            }
            (before - remaining, remaining)
        };
        tracing::info!(removed, remaining, threshold, "sweep finished");
        removed
    }

    /// Returns the count of `word`, or `None` if it is not stored.
    pub fn count(&self, word: &str) -> Option<u64> {
        self.entries.read().get(word).copied()
    }

    /// Returns the number of stored words.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if no word is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Returns the retention threshold this store was created with.
    pub fn retention_threshold(&self) -> u64 {
        self.retention_threshold
    }

    /// Returns true if `word` is on the reject list.
    pub fn is_rejected(&self, word: &str) -> bool {
        self.reject_list.contains(word)
    }

    /// Returns a copy of all entries, ordered by descending count and then by
    /// word.
    pub fn snapshot(&self) -> Vec<WordCount> {
        let mut rows: Vec<WordCount> = {
            let entries = self.entries.read();
            entries
                .iter()
                .map(|(word, &count)| WordCount {
                    word: word.clone(),
                    count,
                })
                .collect()
        };
        rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));
        rows
    }
}

impl WordStore for CountingStore {
    fn insert(&self, word: &str) -> Result<u64> {
        CountingStore::insert(self, word)
    }

    fn find_most_frequent_by_prefix(&self, prefix: &str) -> Result<String> {
        CountingStore::find_most_frequent_by_prefix(self, prefix)
    }
}
