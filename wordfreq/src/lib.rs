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

//! Word frequency tracking with prefix lookup and threshold eviction.
//!
//! Clients submit words; [`store::CountingStore`] counts them and answers which
//! known word with a given prefix has been seen most often. A
//! [`store::Sweeper`] periodically discards low frequency words to bound
//! memory. [`service::FrequencyService`] case folds client input, and
//! [`transport`] exposes it over HTTP.

pub mod config;
pub mod error;
pub mod service;
pub mod store;
pub mod telemetry;
pub mod transport;
