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

//! Command line and environment configuration of `wordfreq-server`.

use std::net::SocketAddr;
use std::time::Duration;

use clap::Parser;

use crate::store::DEFAULT_REJECT_LIST;
use crate::store::StoreConfig;

/// Serve word frequency lookups over HTTP.
#[derive(Debug, Clone, Parser)]
#[command(name = "wordfreq-server", version, about, long_about = None)]
pub struct ServerConfig {
    /// Address to listen on.
    #[arg(long, env = "WORDFREQ_ADDR", default_value = "0.0.0.0:3001")]
    pub addr: SocketAddr,

    /// Seconds between two eviction sweeps.
    #[arg(
        long,
        env = "WORDFREQ_SWEEP_INTERVAL_SECS",
        default_value_t = 30,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub sweep_interval_secs: u64,

    /// Words with a count at or below this value are dropped by a sweep.
    #[arg(long, env = "WORDFREQ_RETENTION_THRESHOLD", default_value_t = 1)]
    pub retention_threshold: u64,

    /// Word that may never be stored. Repeat to reject several words.
    #[arg(long = "reject", value_name = "WORD", default_values = DEFAULT_REJECT_LIST)]
    pub reject_list: Vec<String>,

    /// Log filter used when RUST_LOG is not set.
    #[arg(long, env = "WORDFREQ_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl ServerConfig {
    /// Returns the store configuration described by these options.
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::default()
            .with_retention_threshold(self.retention_threshold)
            .with_sweep_interval(Duration::from_secs(self.sweep_interval_secs))
            .with_reject_list(self.reject_list.iter().cloned())
    }
}
