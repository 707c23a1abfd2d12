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

//! Case folding front of a [`WordStore`].

use crate::error::Result;
use crate::store::WordStore;

/// Lowercases client input and delegates to a [`WordStore`].
///
/// `Apple`, `APPLE` and `apple` are counted as the same word.
#[derive(Debug)]
pub struct FrequencyService<S> {
    store: S,
}

impl<S: WordStore> FrequencyService<S> {
    /// Creates a service on top of `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Records one occurrence of `raw` and returns its new count.
    pub fn add_word(&self, raw: &str) -> Result<u64> {
        let word = raw.to_lowercase();
        self.store.insert(&word)
    }

    /// Returns the most frequent stored word starting with `raw`.
    pub fn get_most_frequent_by_prefix(&self, raw: &str) -> Result<String> {
        let prefix = raw.to_lowercase();
        self.store.find_most_frequent_by_prefix(&prefix)
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }
}
