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

use std::time::Duration;

/// Words that may never be inserted unless a different list is configured.
pub const DEFAULT_REJECT_LIST: [&str; 3] = ["bad", "words", "example"];

const DEFAULT_RETENTION_THRESHOLD: u64 = 1;
const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(30);

/// Construction time configuration of a [`CountingStore`](super::CountingStore)
/// and its [`Sweeper`](super::Sweeper).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    retention_threshold: u64,
    sweep_interval: Duration,
    reject_list: Vec<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            retention_threshold: DEFAULT_RETENTION_THRESHOLD,
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
            reject_list: DEFAULT_REJECT_LIST.iter().map(|w| w.to_string()).collect(),
        }
    }
}

impl StoreConfig {
    /// Sets the inclusive count at or below which a sweep removes an entry.
    pub fn with_retention_threshold(mut self, retention_threshold: u64) -> Self {
        self.retention_threshold = retention_threshold;
        self
    }

    /// Sets the period between two background sweeps.
    pub fn with_sweep_interval(mut self, sweep_interval: Duration) -> Self {
        self.sweep_interval = sweep_interval;
        self
    }

    /// Replaces the reject list.
    pub fn with_reject_list<I, W>(mut self, reject_list: I) -> Self
    where
        I: IntoIterator<Item = W>,
        W: Into<String>,
    {
        self.reject_list = reject_list.into_iter().map(Into::into).collect();
        self
    }

    /// Returns the retention threshold.
    pub fn retention_threshold(&self) -> u64 {
        self.retention_threshold
    }

    /// Returns the sweep interval.
    pub fn sweep_interval(&self) -> Duration {
        self.sweep_interval
    }

    /// Returns the reject list.
    pub fn reject_list(&self) -> &[String] {
        &self.reject_list
    }
}
