//! Background auto-publishing.
//!
//! A scheduler task wakes every `interval`, asks the queue which items are
//! due and hands their ids to a small pool of workers over a bounded
//! channel. Ids already queued or being published are not handed out
//! again. A failing item is logged and left for the next pass; it never
//! stops the others.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashSet;
use jiff::Timestamp;
use serde::Serialize;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::QueueError;
use crate::queue::ApprovalQueue;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoPublishConfig {
    pub interval: Duration,
    /// Publish `approved` items immediately, not only due `scheduled` ones.
    pub include_approved: bool,
    pub workers: usize,
    pub channel_capacity: usize,
}

impl Default for AutoPublishConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(30),
            include_approved: true,
            workers: 2,
            channel_capacity: 64,
        }
    }
}

/// Outcome of one sequential pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SweepReport {
    pub published: Vec<Uuid>,
    /// Listed as due but no longer eligible once locked.
    pub skipped: Vec<Uuid>,
    pub failed: Vec<(Uuid, String)>,
}

/// Publish everything due at `now`, one item at a time.
pub async fn sweep_once(
    queue: &ApprovalQueue,
    now: Timestamp,
    include_approved: bool,
) -> Result<SweepReport, QueueError> {
    let mut report = SweepReport::default();
    for id in queue.due(now, include_approved).await? {
        match queue.publish_if_due(id, now, include_approved).await {
            Ok(Some(_)) => report.published.push(id),
            Ok(None) => report.skipped.push(id),
            Err(e) => {
                warn!(item_id = %id, error = %e, "auto-publish failed");
                report.failed.push((id, e.to_string()));
            }
        }
    }
    if !report.published.is_empty() || !report.failed.is_empty() {
        info!(
            published = report.published.len(),
            skipped = report.skipped.len(),
            failed = report.failed.len(),
            "sweep finished"
        );
    }
    Ok(report)
}

/// Start the scheduler and its workers. The returned handle completes once
/// `cancel` fires and every worker has finished its current item.
pub fn spawn(
    queue: Arc<ApprovalQueue>,
    config: AutoPublishConfig,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let (tx, rx) = mpsc::channel::<Uuid>(config.channel_capacity.max(1));
        let rx = Arc::new(Mutex::new(rx));
        let in_flight: Arc<DashSet<Uuid>> = Arc::new(DashSet::new());

        let workers: Vec<JoinHandle<()>> = (0..config.workers.max(1))
            .map(|worker| {
                tokio::spawn(run_worker(
                    worker,
                    Arc::clone(&queue),
                    Arc::clone(&rx),
                    Arc::clone(&in_flight),
                    config.include_approved,
                    cancel.clone(),
                ))
            })
            .collect();

        info!(
            interval_secs = config.interval.as_secs(),
            workers = workers.len(),
            include_approved = config.include_approved,
            "auto-publisher started"
        );

        let mut ticker = tokio::time::interval(config.interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {
                    enqueue_due(&queue, &tx, &in_flight, config.include_approved).await;
                }
            }
        }

        drop(tx);
        for handle in workers {
            if let Err(e) = handle.await {
                warn!(error = %e, "auto-publish worker panicked");
            }
        }
        info!("auto-publisher stopped");
    })
}

async fn enqueue_due(
    queue: &ApprovalQueue,
    tx: &mpsc::Sender<Uuid>,
    in_flight: &DashSet<Uuid>,
    include_approved: bool,
) {
    let due = match queue.due(Timestamp::now(), include_approved).await {
        Ok(due) => due,
        Err(e) => {
            warn!(error = %e, "failed to list due items");
            return;
        }
    };

    for id in due {
        if !in_flight.insert(id) {
            continue;
        }
        if let Err(e) = tx.try_send(id) {
            // Full: picked up again next tick.
            in_flight.remove(&id);
            debug!(item_id = %id, error = %e, "publish channel busy");
        }
    }
}

async fn run_worker(
    worker: usize,
    queue: Arc<ApprovalQueue>,
    rx: Arc<Mutex<mpsc::Receiver<Uuid>>>,
    in_flight: Arc<DashSet<Uuid>>,
    include_approved: bool,
    cancel: CancellationToken,
) {
    loop {
        let next = tokio::select! {
            _ = cancel.cancelled() => None,
            id = async { rx.lock().await.recv().await } => id,
        };
        let Some(id) = next else { break };

        match queue
            .publish_if_due(id, Timestamp::now(), include_approved)
            .await
        {
            Ok(Some(item)) => info!(
                worker,
                item_id = %id,
                url = item.published_url().unwrap_or_default(),
                "auto-published"
            ),
            Ok(None) => debug!(worker, item_id = %id, "no longer due"),
            Err(e) => warn!(worker, item_id = %id, error = %e, "auto-publish failed"),
        }
        in_flight.remove(&id);
    }
}
