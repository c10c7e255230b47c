// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Fixed-interval poll loop shared by every metric family

use std::future::Future;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;

use crate::error::Result;
use crate::metrics::{MetricsRegistry, QueryLabels};

/// Runs `tick` every `period` until shutdown or the first failure
///
/// A tick that overruns the period causes the missed ticks to be skipped,
/// never queued. The first error is recorded and returned; the loop does not
/// retry.
pub(super) async fn run_poll_loop<F, Fut>(
    query: &'static str,
    period: Duration,
    metrics: MetricsRegistry,
    mut shutdown_rx: watch::Receiver<bool>,
    mut tick: F,
) -> Result<()>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<()>>,
{
    let labels = QueryLabels::new(query);
    metrics.initialize_query_metrics(&labels);

    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    tracing::info!("Starting {} poll loop every {:?}", query, period);

    loop {
        tokio::select! {
            _ = ticker.tick() => {},
            changed = shutdown_rx.changed() => {
                if changed.is_err() || *shutdown_rx.borrow() {
                    tracing::info!("Stopping {} poll loop", query);
                    return Ok(());
                }
                continue;
            }
        }

        let start = std::time::Instant::now();
        match tick().await {
            Ok(()) => {
                let duration = start.elapsed().as_secs_f64();
                metrics.record_poll_success(&labels);
                metrics.record_poll_duration(&labels, duration);
                tracing::debug!("Polled {} in {:.3}s", query, duration);
            }
            Err(e) => {
                let duration = start.elapsed().as_secs_f64();
                metrics.record_poll_error(&labels);
                metrics.record_poll_duration(&labels, duration);
                tracing::error!("Failed to poll {} after {:.3}s: {}", query, duration, e);
                tracing::trace!("Error details for {}: {:?}", query, e);
                return Err(e);
            }
        }
    }
}
