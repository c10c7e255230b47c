// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Poll scheduling for the Keenetic Exporter
//!
//! One independent loop per metric family. Loops never retry: the first
//! failed poll ends its loop and is reported through [`PollLoops::wait`],
//! after which the process is expected to exit and be restarted.

mod poll_task;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::keenetic::{KeeneticClient, SystemQuery, TrafficQuery};
use crate::metrics::MetricsRegistry;

use poll_task::run_poll_loop;

/// Handles of the running poll loops
pub struct PollLoops {
    system: JoinHandle<Result<()>>,
    traffic: JoinHandle<Result<()>>,
}

impl PollLoops {
    /// Waits for both loops to stop
    ///
    /// Returns as soon as either loop fails, with that loop's error; after a
    /// clean shutdown returns once both have stopped.
    pub async fn wait(mut self) -> Result<()> {
        let (first, system_done) = tokio::select! {
            res = &mut self.system => (res, true),
            res = &mut self.traffic => (res, false),
        };
        first??;
        let remaining = if system_done { self.traffic } else { self.system };
        remaining.await??;
        Ok(())
    }

    /// Like [`PollLoops::wait`], also failing fast on `other`
    ///
    /// `other` is typically the HTTP server: whichever side fails first ends
    /// the wait with its error. On success both sides are awaited.
    pub async fn wait_alongside<F>(self, other: F) -> Result<()>
    where
        F: Future<Output = Result<()>>,
    {
        let loops = self.wait();
        tokio::pin!(loops);
        tokio::pin!(other);
        tokio::select! {
            res = &mut loops => {
                res?;
                other.await
            }
            res = &mut other => {
                res?;
                loops.await
            }
        }
    }
}

/// Starts the system snapshot and traffic poll loops
pub fn start_poll_loops(
    client: Arc<KeeneticClient>,
    config: &Config,
    metrics: MetricsRegistry,
    shutdown_rx: watch::Receiver<bool>,
) -> PollLoops {
    let devices = Arc::new(config.devices.clone());
    let system = {
        let client = client.clone();
        let registry = metrics.clone();
        tokio::spawn(run_poll_loop(
            "system",
            Duration::from_secs(config.system_interval_secs),
            metrics.clone(),
            shutdown_rx.clone(),
            move || {
                let client = client.clone();
                let registry = registry.clone();
                let devices = devices.clone();
                async move {
                    let snapshot = client.execute(&SystemQuery).await?;
                    registry.update_system(&snapshot, &devices).await;
                    Ok::<(), AppError>(())
                }
            },
        ))
    };

    let query = Arc::new(TrafficQuery::new(
        config.interfaces.clone(),
        config.devices.clone(),
    ));
    let traffic = {
        let registry = metrics.clone();
        tokio::spawn(run_poll_loop(
            "traffic",
            Duration::from_secs(config.traffic_interval_secs),
            metrics,
            shutdown_rx,
            move || {
                let client = client.clone();
                let registry = registry.clone();
                let query = query.clone();
                async move {
                    let stat = client.execute(query.as_ref()).await?;
                    tracing::trace!(
                        "Traffic poll: {} interfaces, {} devices",
                        stat.show.interface.stat.len(),
                        stat.show.ip.hotspot.chart.bar.len()
                    );
                    registry.update_traffic(&stat);
                    Ok::<(), AppError>(())
                }
            },
        ))
    };

    PollLoops { system, traffic }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending_loops() -> PollLoops {
        PollLoops {
            system: tokio::spawn(std::future::pending::<Result<()>>()),
            traffic: tokio::spawn(std::future::pending::<Result<()>>()),
        }
    }

    #[tokio::test]
    async fn test_server_failure_ends_wait() {
        let failing_server = async { Err(AppError::Metrics("listener closed".to_string())) };
        let result = tokio::time::timeout(
            Duration::from_secs(1),
            pending_loops().wait_alongside(failing_server),
        )
        .await
        .expect("wait should return once the server fails");
        assert!(matches!(result, Err(AppError::Metrics(_))));
    }

    #[tokio::test]
    async fn test_loop_failure_ends_wait_while_server_runs() {
        let loops = PollLoops {
            system: tokio::spawn(async { Err(AppError::AuthRejected) }),
            traffic: tokio::spawn(std::future::pending::<Result<()>>()),
        };
        let result = tokio::time::timeout(
            Duration::from_secs(1),
            loops.wait_alongside(std::future::pending::<Result<()>>()),
        )
        .await
        .expect("wait should return once a loop fails");
        assert!(matches!(result, Err(AppError::AuthRejected)));
    }

    #[tokio::test]
    async fn test_clean_stop_waits_for_both_sides() {
        let loops = PollLoops {
            system: tokio::spawn(async { Ok(()) }),
            traffic: tokio::spawn(async { Ok(()) }),
        };
        assert!(loops.wait_alongside(async { Ok(()) }).await.is_ok());
    }
}
