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

use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;

use http::StatusCode;
use tokio::io::AsyncRead;
use tokio::io::AsyncReadExt;
use tokio::io::AsyncWrite;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpListener;
use tokio::net::ToSocketAddrs;
use tokio::task::JoinSet;

use crate::error::Error;
use crate::error::ErrorKind;
use crate::error::Result;
use crate::store::WordStore;
use crate::transport::Response;
use crate::transport::Router;
use crate::transport::parse_request_head;

const MAX_HEAD_BYTES: usize = 8 * 1024;
const READ_CHUNK_BYTES: usize = 1024;
const READ_HEAD_TIMEOUT: Duration = Duration::from_secs(10);
const SHUTDOWN_GRACE_PERIOD: Duration = Duration::from_secs(10);

/// Accept loop serving a [`Router`] over TCP.
#[derive(Debug)]
pub struct Server<S> {
    listener: TcpListener,
    router: Router<S>,
}

impl<S> Server<S>
where
    S: WordStore + Send + Sync + 'static,
{
    /// Binds a listener on `addr`.
    pub async fn bind(addr: impl ToSocketAddrs, router: Router<S>) -> Result<Self> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|err| Error::unexpected("failed to bind listener").set_source(err))?;
        let server = Self { listener, router };
        let addr = server.local_addr()?;
        tracing::info!(%addr, "starting server");
        Ok(server)
    }

    /// Returns the address the listener is bound to.
    pub fn local_addr(&self) -> Result<SocketAddr> {
        self.listener
            .local_addr()
            .map_err(|err| Error::unexpected("failed to read local address").set_source(err))
    }

    /// Serves connections until `shutdown` completes.
    ///
    /// Once `shutdown` completes the listener is closed and connections already
    /// accepted get up to ten seconds to finish before they are aborted.
    pub async fn serve(self, shutdown: impl Future<Output = ()>) -> Result<()> {
        let Self { listener, router } = self;
        let mut connections = JoinSet::new();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                Some(joined) = connections.join_next(), if !connections.is_empty() => {
                    if let Err(err) = joined {
                        tracing::error!(%err, "connection task failed");
                    }
                }
                accepted = listener.accept() => match accepted {
                    Ok((stream, peer)) => {
                        let router = router.clone();
                        connections.spawn(async move {
                            if let Err(err) = handle_connection(stream, &router).await {
                                tracing::warn!(%peer, %err, "connection failed");
                            }
                        });
                    }
                    Err(err) => tracing::warn!(%err, "failed to accept connection"),
                },
            }
        }

        drop(listener);
        tracing::info!(in_flight = connections.len(), "draining connections");
        let drained = tokio::time::timeout(SHUTDOWN_GRACE_PERIOD, async {
            while let Some(joined) = connections.join_next().await {
                if let Err(err) = joined {
                    tracing::error!(%err, "connection task failed");
                }
            }
        })
        .await;
        if drained.is_err() {
            tracing::warn!(aborted = connections.len(), "shutdown grace period elapsed");
            connections.abort_all();
        }
        tracing::info!("server gracefully closed");
        Ok(())
    }
}

async fn handle_connection<S, T>(mut stream: T, router: &Router<S>) -> Result<()>
where
    S: WordStore,
    T: AsyncRead + AsyncWrite + Unpin,
{
    let response = match tokio::time::timeout(READ_HEAD_TIMEOUT, read_head(&mut stream)).await {
        Err(_) => {
            tracing::warn!(timeout = ?READ_HEAD_TIMEOUT, "timed out reading request head");
            Response::new(StatusCode::REQUEST_TIMEOUT, "request timeout")
        }
        Ok(Ok(head)) => match parse_request_head(&head) {
            Ok(request) => router.handle(&request),
            Err(err) => {
                tracing::warn!(%err, "bad request");
                Response::from_error(&err)
            }
        },
        Ok(Err(err)) if err.kind() == ErrorKind::InvalidInput => {
            tracing::warn!(%err, "bad request");
            Response::from_error(&err)
        }
        Ok(Err(err)) => return Err(err),
    };

    stream
        .write_all(&response.to_bytes())
        .await
        .map_err(|err| Error::unexpected("failed to write response").set_source(err))?;
    stream
        .shutdown()
        .await
        .map_err(|err| Error::unexpected("failed to close connection").set_source(err))
}

/// Reads up to and excluding the blank line that ends the request head.
async fn read_head<R: AsyncRead + Unpin>(stream: &mut R) -> Result<String> {
    let mut buf = Vec::with_capacity(READ_CHUNK_BYTES);
    let mut chunk = [0u8; READ_CHUNK_BYTES];
    loop {
        if let Some(end) = find_head_end(&buf) {
            buf.truncate(end);
            break;
        }
        if buf.len() > MAX_HEAD_BYTES {
            return Err(Error::invalid_input("request head too large"));
        }
        let n = stream
            .read(&mut chunk)
            .await
            .map_err(|err| Error::unexpected("failed to read request").set_source(err))?;
        if n == 0 {
            return Err(Error::unexpected("connection closed before end of request head"));
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    String::from_utf8(buf)
        .map_err(|err| Error::invalid_input("request head is not valid utf-8").set_source(err))
}

fn find_head_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|window| window == b"\r\n\r\n")
}
