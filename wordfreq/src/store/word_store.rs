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

use crate::error::Result;

/// Anything that can count words and answer prefix queries.
///
/// [`FrequencyService`](crate::service::FrequencyService) depends on this trait
/// rather than on [`CountingStore`](super::CountingStore), so the storage
/// behind it can be swapped without touching the service or the transport.
pub trait WordStore {
    /// Increments the count of `word` and returns the new count.
    fn insert(&self, word: &str) -> Result<u64>;

    /// Returns the stored word with the highest count among those starting
    /// with `prefix`.
    fn find_most_frequent_by_prefix(&self, prefix: &str) -> Result<String>;
}

impl<S: WordStore + ?Sized> WordStore for Arc<S> {
    fn insert(&self, word: &str) -> Result<u64> {
        (**self).insert(word)
    }

    fn find_most_frequent_by_prefix(&self, prefix: &str) -> Result<String> {
        (**self).find_most_frequent_by_prefix(prefix)
    }
}
