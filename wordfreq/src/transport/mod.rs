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

//! Minimal HTTP/1.1 front end for a [`FrequencyService`](crate::service::FrequencyService).
//!
//! | Method | Path                      | Success           | Failure                         |
//! |--------|---------------------------|-------------------|---------------------------------|
//! | POST   | `/api/v0.1/words/{word}`  | 201, empty body   | 400 bad format or rejected word |
//! | GET    | `/api/v0.1/words/{prefix}`| 200, the word     | 400 bad format, 404 no match    |
//!
//! Each connection carries exactly one request and is closed after the
//! response is written.

mod request;
mod router;
mod server;

pub use self::request::Request;
pub use self::request::parse_request_head;
pub use self::router::Response;
pub use self::router::Router;
pub use self::router::WORDS_ROUTE;
pub use self::router::validate_word_format;
pub use self::server::Server;
