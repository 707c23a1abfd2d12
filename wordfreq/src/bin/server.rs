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
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use wordfreq::config::ServerConfig;
use wordfreq::error::Result;
use wordfreq::service::FrequencyService;
use wordfreq::store::CountingStore;
use wordfreq::store::Sweeper;
use wordfreq::telemetry;
use wordfreq::transport::Router;
use wordfreq::transport::Server;

#[tokio::main]
async fn main() -> ExitCode {
    let config = ServerConfig::parse();
    if let Err(err) = telemetry::init(&config.log_level) {
        eprintln!("{err}");
        return ExitCode::FAILURE;
    }

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "server failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: ServerConfig) -> Result<()> {
    let store_config = config.store_config();
    let store = Arc::new(CountingStore::new(&store_config));
    let sweeper = Sweeper::start(Arc::clone(&store), store_config.sweep_interval());

    let service = Arc::new(FrequencyService::new(Arc::clone(&store)));
    let shutdown = shutdown_signal();
    let result = match Server::bind(config.addr, Router::new(service)).await {
        Ok(server) => server.serve(shutdown).await,
        Err(err) => Err(err),
    };

    sweeper.stop().await;
    result
}

/// Completes on Ctrl-C or, on unix, SIGTERM.
///
/// The SIGTERM handler is installed before this returns so a signal sent
/// right after startup is not lost.
fn shutdown_signal() -> impl Future<Output = ()> {
    #[cfg(unix)]
    let terminate = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate());

    async move {
        let interrupt = async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::error!(%err, "failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
        };

        #[cfg(unix)]
        let terminate = async {
            match terminate {
                Ok(mut stream) => {
                    stream.recv().await;
                }
                Err(err) => {
                    tracing::error!(%err, "failed to listen for SIGTERM");
                    std::future::pending::<()>().await;
                }
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = interrupt => tracing::info!("interrupt received, shutting down"),
            _ = terminate => tracing::info!("terminate signal received, shutting down"),
        }
    }
}
