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
use std::sync::atomic::AtomicU8;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::store::CountingStore;

const IDLE: u8 = 0;
const SWEEPING: u8 = 1;
const STOPPED: u8 = 2;

/// Lifecycle of a [`Sweeper`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweeperState {
    /// Waiting for the next tick.
    Idle,
    /// Running [`CountingStore::sweep`].
    Sweeping,
    /// Cancelled. No further sweeps happen.
    Stopped,
}

#[derive(Debug, Default)]
struct Progress {
    state: AtomicU8,
    sweeps: AtomicU64,
}

impl Progress {
    fn set(&self, state: u8) {
        self.state.store(state, Ordering::Release);
    }
}

/// Background task that sweeps a [`CountingStore`] at a fixed interval.
///
/// The first sweep happens one interval after [`Sweeper::start`]. If a sweep
/// overruns the interval the next tick is delayed rather than fired in a burst.
///
/// Dropping a `Sweeper` cancels it without waiting for the task to finish; use
/// [`Sweeper::stop`] to wait.
#[derive(Debug)]
pub struct Sweeper {
    shutdown: watch::Sender<bool>,
    progress: Arc<Progress>,
    task: Option<JoinHandle<()>>,
}

impl Sweeper {
    /// Spawns the sweep loop on the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime or if `interval` is zero.
    pub fn start(store: Arc<CountingStore>, interval: Duration) -> Self {
        assert!(!interval.is_zero(), "sweep interval must be positive");
        let (shutdown, cancelled) = watch::channel(false);
        let progress = Arc::new(Progress::default());
        let task = tokio::spawn(run(store, interval, cancelled, Arc::clone(&progress)));
        tracing::info!(?interval, "sweeper started");
        Self {
            shutdown,
            progress,
            task: Some(task),
        }
    }

    /// Returns the current state.
    pub fn state(&self) -> SweeperState {
        match self.progress.state.load(Ordering::Acquire) {
            IDLE => SweeperState::Idle,
            SWEEPING => SweeperState::Sweeping,
            _ => SweeperState::Stopped,
        }
    }

    /// Returns the number of completed sweeps.
    pub fn sweeps(&self) -> u64 {
        self.progress.sweeps.load(Ordering::Acquire)
    }

    /// Requests cancellation without waiting for the task.
    ///
    /// A sweep already in progress runs to completion; no sweep starts after
    /// the loop observes the request.
    pub fn cancel(&self) {
        self.shutdown.send_replace(true);
    }

    /// Cancels the sweeper and waits for its task to finish.
    pub async fn stop(mut self) {
        self.cancel();
        if let Some(task) = self.task.take() {
            if let Err(err) = task.await {
                tracing::error!(%err, "sweeper task failed");
            }
        }
    }
}

impl Drop for Sweeper {
    fn drop(&mut self) {
        self.cancel();
    }
}

async fn run(
    store: Arc<CountingStore>,
    period: Duration,
    mut cancelled: watch::Receiver<bool>,
    progress: Arc<Progress>,
) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // the first tick completes immediately
    ticker.tick().await;

    loop {
        tokio::select! {
            biased;
            changed = cancelled.changed() => {
                // an error means the handle is gone, which also stops the loop
                if changed.is_err() || *cancelled.borrow() {
                    break;
                }
            }
            _ = ticker.tick() => {
                progress.set(SWEEPING);
                let removed = store.sweep();
                progress.sweeps.fetch_add(1, Ordering::AcqRel);
                progress.set(IDLE);
                tracing::debug!(removed, "sweeper tick");
            }
        }
    }

    progress.set(STOPPED);
    tracing::info!("sweeper stopped");
}
