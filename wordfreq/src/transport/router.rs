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
use std::sync::LazyLock;

use http::Method;
use http::StatusCode;
use regex::Regex;

use crate::error::Error;
use crate::error::ErrorKind;
use crate::error::Result;
use crate::service::FrequencyService;
use crate::store::WordStore;
use crate::transport::Request;

/// Path prefix shared by both word routes.
pub const WORDS_ROUTE: &str = "/api/v0.1/words/";

const ERR_BAD_REQUEST: &str = "bad request";
const ERR_INVALID_INPUT: &str = "invalid format input received";
const ERR_WORD_NOT_RESOLVED: &str = "word not found";
const ERR_ROUTE_NOT_FOUND: &str = "not found";
const ERR_METHOD_NOT_ALLOWED: &str = "method not allowed";

static WORD_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z]+$").expect("valid regex"));

/// Checks that `word` consists of ASCII letters only.
pub fn validate_word_format(word: &str) -> Result<()> {
    if WORD_FORMAT.is_match(word) {
        Ok(())
    } else {
        Err(Error::invalid_input(ERR_INVALID_INPUT).with_context("input", word))
    }
}

/// Status code and plain text body of a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status: StatusCode,
    body: String,
}

impl Response {
    /// Creates a response.
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Maps a failed operation to its response.
    pub fn from_error(err: &Error) -> Self {
        match err.kind() {
            ErrorKind::InvalidInput => Self::new(StatusCode::BAD_REQUEST, err.message()),
            ErrorKind::Rejected => Self::new(StatusCode::BAD_REQUEST, ERR_BAD_REQUEST),
            ErrorKind::NotFound => Self::new(StatusCode::NOT_FOUND, ERR_WORD_NOT_RESOLVED),
            _ => Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal server error"),
        }
    }

    /// Returns the status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the body.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Renders the response as HTTP/1.1 bytes, closing the connection.
    pub fn to_bytes(&self) -> Vec<u8> {
        let head = format!(
            "HTTP/1.1 {} {}\r\ncontent-type: text/plain; charset=utf-8\r\ncontent-length: {}\r\nconnection: close\r\n\r\n",
            self.status.as_u16(),
            self.status.canonical_reason().unwrap_or_default(),
            self.body.len(),
        );
        let mut out = Vec::with_capacity(head.len() + self.body.len());
        out.extend_from_slice(head.as_bytes());
        out.extend_from_slice(self.body.as_bytes());
        out
    }
}

/// Dispatches requests to a [`FrequencyService`].
#[derive(Debug)]
pub struct Router<S> {
    service: Arc<FrequencyService<S>>,
}

impl<S> Clone for Router<S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
        }
    }
}

impl<S: WordStore> Router<S> {
    /// Creates a router for `service`.
    pub fn new(service: Arc<FrequencyService<S>>) -> Self {
        Self { service }
    }

    /// Handles one request.
    pub fn handle(&self, request: &Request) -> Response {
        let param = match request.path().strip_prefix(WORDS_ROUTE) {
            Some(param) if !param.is_empty() && !param.contains('/') => param,
            _ => return Response::new(StatusCode::NOT_FOUND, ERR_ROUTE_NOT_FOUND),
        };
        match *request.method() {
            Method::POST => self.add_word(param),
            Method::GET => self.frequent_word_by_prefix(param),
            _ => Response::new(StatusCode::METHOD_NOT_ALLOWED, ERR_METHOD_NOT_ALLOWED),
        }
    }

    fn add_word(&self, word: &str) -> Response {
        if let Err(err) = validate_word_format(word) {
            tracing::warn!(%err, "invalid word");
            return Response::from_error(&err);
        }
        match self.service.add_word(word) {
            Ok(_) => Response::new(StatusCode::CREATED, ""),
            Err(err) => {
                tracing::warn!(word, %err, "problem adding new word");
                Response::from_error(&err)
            }
        }
    }

    fn frequent_word_by_prefix(&self, prefix: &str) -> Response {
        if let Err(err) = validate_word_format(prefix) {
            tracing::warn!(%err, "invalid prefix");
            return Response::from_error(&err);
        }
        match self.service.get_most_frequent_by_prefix(prefix) {
            Ok(word) => Response::new(StatusCode::OK, word),
            Err(err) => {
                tracing::warn!(prefix, %err, "error retrieving word for prefix");
                Response::from_error(&err)
            }
        }
    }
}
