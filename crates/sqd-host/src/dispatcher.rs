//! Serial event dispatch.
//!
//! # Invariants
//!
//! - Exactly one task owns the [`Reconciler`]; messages are applied one at a
//!   time in channel order, so the engine needs no locking.
//! - No handler awaits: computations are spawned, never joined here.
//! - The tick source only enqueues; a closed channel stops it.

use std::time::Duration;

use sqd_reconcile::{ReconcileEvent, Reconciler, RecomputeOutcome, Solver, StateSampler};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::{CommandOutcome, CommandRouter, Presenter, ViewSummary};

#[derive(Debug)]
pub enum HostMessage {
    Event(ReconcileEvent),
    /// Raw chat command line.
    Command(String),
    /// Acknowledged once every earlier message has been applied.
    Barrier(oneshot::Sender<()>),
    Shutdown,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub events: usize,
    pub recomputes: usize,
    pub commands_handled: usize,
    pub commands_ignored: usize,
    /// View transitions in order, starting from the first poll.
    pub views: Vec<ViewSummary>,
}

pub struct Dispatcher<S, V: Solver> {
    reconciler: Reconciler<S, V>,
    presenter: Presenter,
    router: CommandRouter,
    report: DispatchReport,
}

impl<S: StateSampler, V: Solver> Dispatcher<S, V> {
    pub fn new(reconciler: Reconciler<S, V>, presenter: Presenter) -> Self {
        Self {
            reconciler,
            presenter,
            router: CommandRouter::new(),
            report: DispatchReport::default(),
        }
    }

    /// Apply one message. Returns `false` on shutdown.
    pub fn handle_message(&mut self, msg: HostMessage) -> bool {
        match msg {
            HostMessage::Event(event) => {
                self.report.events += 1;
                if let Some(outcome) = self.reconciler.handle(event) {
                    self.report.recomputes += 1;
                    log_outcome(event, &outcome);
                }
            }
            HostMessage::Command(line) => match self.router.route(&line, &mut self.presenter) {
                CommandOutcome::Toggled { open } => {
                    self.report.commands_handled += 1;
                    info!(open, "result window toggled");
                }
                CommandOutcome::NotHandled => self.report.commands_ignored += 1,
            },
            HostMessage::Barrier(ack) => {
                let _ = ack.send(());
                return true;
            }
            HostMessage::Shutdown => {
                info!(events = self.report.events, "dispatcher shutting down");
                return false;
            }
        }
        self.observe_view();
        true
    }

    /// Record the current view if it differs from the last one recorded.
    pub fn observe_view(&mut self) -> ViewSummary {
        let summary = self.presenter.poll(&self.reconciler).summary();
        if self.report.views.last() != Some(&summary) {
            info!(view = summary.label, mission_id = ?summary.mission_id, "view changed");
            self.report.views.push(summary);
        }
        summary
    }

    /// Drain `rx` until `Shutdown` or until every sender is gone.
    pub async fn run(mut self, mut rx: mpsc::Receiver<HostMessage>) -> Self {
        while let Some(msg) = rx.recv().await {
            if !self.handle_message(msg) {
                break;
            }
        }
        self
    }

    pub fn reconciler(&self) -> &Reconciler<S, V> {
        &self.reconciler
    }

    pub fn presenter(&self) -> &Presenter {
        &self.presenter
    }

    pub fn report(&self) -> &DispatchReport {
        &self.report
    }
}

fn log_outcome(event: ReconcileEvent, outcome: &RecomputeOutcome) {
    match outcome {
        RecomputeOutcome::Started(fp) => info!(?event, fingerprint = %fp, "recompute started work"),
        other => debug!(?event, outcome = ?other, "recompute"),
    }
}

pub fn spawn_dispatcher<S, V>(
    dispatcher: Dispatcher<S, V>,
    rx: mpsc::Receiver<HostMessage>,
) -> JoinHandle<Dispatcher<S, V>>
where
    S: StateSampler + Send + 'static,
    V: Solver,
{
    tokio::spawn(dispatcher.run(rx))
}

/// Enqueue a `Tick` every `interval`. The first tick fires immediately.
pub fn spawn_tick_source(tx: mpsc::Sender<HostMessage>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            if tx.send(HostMessage::Event(ReconcileEvent::Tick)).await.is_err() {
                debug!("dispatcher gone; tick source stopping");
                break;
            }
        }
    })
}
