//! Fixed-period scheduler
//!
//! Drives the [`Reconciler`] on a fixed wall-clock period, forever. One
//! cycle runs to completion per tick; the cycle body lives outside the
//! `select!` arms, so a second cycle can never start while one is in
//! flight. With [`MissedTickBehavior::Delay`], a cycle that outlasts its
//! period slips the schedule instead of overlapping it.
//!
//! There is no cancellation mid-cycle: shutdown is observed between cycles
//! only. A hung network call therefore stalls the loop until the transport
//! times out; acceptable for best-effort monitoring.

use crate::reconciler::{ReconcileOutcome, Reconciler};
use crate::Result;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

/// Fixed-period cooperative scheduler
pub struct Scheduler {
    /// Wall-clock period between cycle starts
    period: Duration,
}

impl Scheduler {
    /// Create a scheduler with the given period
    pub fn new(period: Duration) -> Self {
        Self { period }
    }

    /// Run the reconciliation loop until a shutdown signal
    ///
    /// The first cycle runs immediately; subsequent cycles run one period
    /// apart. Runs until SIGINT (ctrl-c).
    pub async fn run(&self, reconciler: &Reconciler) -> Result<()> {
        info!(period_secs = self.period.as_secs(), "starting reconciliation loop");

        let mut ticker = tokio::time::interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                _ = tokio::signal::ctrl_c() => {
                    info!("shutdown signal received");
                    break;
                }
            }

            let outcome = reconciler.run_cycle().await;
            debug!(?outcome, "cycle complete");
        }

        Ok(())
    }

    /// Run the reconciliation loop with a controlled shutdown signal
    ///
    /// **TESTING ONLY**: contract tests need deterministic shutdown.
    /// Production code should use [`Scheduler::run`], which shuts down on
    /// SIGINT. Shutdown is only observed between cycles; an in-flight cycle
    /// always runs to completion first.
    pub async fn run_with_shutdown(
        &self,
        reconciler: &Reconciler,
        mut shutdown_rx: tokio::sync::oneshot::Receiver<()>,
    ) -> Result<Vec<ReconcileOutcome>> {
        let mut ticker = tokio::time::interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut outcomes = Vec::new();

        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                _ = &mut shutdown_rx => {
                    info!("shutdown signal received");
                    break;
                }
            }

            let outcome = reconciler.run_cycle().await;
            debug!(?outcome, "cycle complete");
            outcomes.push(outcome);
        }

        Ok(outcomes)
    }
}
