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

use http::Method;

use crate::error::Error;
use crate::error::Result;

/// The parts of a request line the router needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    method: Method,
    path: String,
}

impl Request {
    /// Creates a request from its method and path.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
        }
    }

    /// Returns the request method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the request path without the query string.
    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Parses the request line of an HTTP/1.x request head.
///
/// Header lines after the request line are ignored.
pub fn parse_request_head(head: &str) -> Result<Request> {
    let line = head.lines().next().unwrap_or_default();
    let mut parts = line.split(' ');
    let (Some(method), Some(target), Some(version), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(Error::invalid_input("malformed request line").with_context("line", line));
    };

    if !version.starts_with("HTTP/1.") {
        return Err(
            Error::invalid_input("unsupported http version").with_context("version", version)
        );
    }
    let method = Method::from_bytes(method.as_bytes()).map_err(|err| {
        Error::invalid_input("invalid request method")
            .with_context("method", method)
            .set_source(err)
    })?;
    if !target.starts_with('/') {
        return Err(Error::invalid_input("invalid request target").with_context("target", target));
    }
    let path = match target.split_once('?') {
        Some((path, _query)) => path,
        None => target,
    };
    Ok(Request::new(method, path))
}
