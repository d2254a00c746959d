use std::sync::Arc;
use std::time::Duration;

use sqd_catalog::Catalog;
use sqd_model::MAX_MEMBERS;
use sqd_reconcile::{Reconciler, Solver, StateSampler};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use crate::{
    spawn_dispatcher, spawn_tick_source, Dispatcher, HostMessage, Presenter, Script, ScriptError,
    ScriptedSampler, SharedReadings,
};

#[derive(Clone, Debug)]
pub struct SessionOptions {
    /// `None` disables the interval tick source; only scripted ticks arrive.
    pub tick_interval: Option<Duration>,
    pub max_members: usize,
    /// How long to wait for the live computation after the script ends.
    pub settle_timeout: Duration,
    pub window_open: bool,
    pub channel_capacity: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            tick_interval: None,
            max_members: MAX_MEMBERS,
            settle_timeout: Duration::from_secs(5),
            window_open: false,
            channel_capacity: 256,
        }
    }
}

/// Replay `script` frame by frame. Each frame's messages are fully applied
/// by the dispatcher before the next frame's readings are written.
pub async fn play_script(
    script: &Script,
    readings: &SharedReadings,
    tx: &mpsc::Sender<HostMessage>,
) -> Result<usize, ScriptError> {
    for (index, frame) in script.frames.iter().enumerate() {
        readings.apply(frame);

        for event in &frame.events {
            send(tx, HostMessage::Event((*event).into())).await?;
        }
        for command in &frame.commands {
            send(tx, HostMessage::Command(command.clone())).await?;
        }

        let (ack_tx, ack_rx) = oneshot::channel();
        send(tx, HostMessage::Barrier(ack_tx)).await?;
        ack_rx.await.map_err(|_| ScriptError::DispatcherClosed)?;
        debug!(frame = index, events = frame.events.len(), "frame applied");

        if frame.wait_ms > 0 {
            tokio::time::sleep(Duration::from_millis(frame.wait_ms)).await;
        }
    }
    Ok(script.frames.len())
}

async fn send(tx: &mpsc::Sender<HostMessage>, msg: HostMessage) -> Result<(), ScriptError> {
    tx.send(msg).await.map_err(|_| ScriptError::DispatcherClosed)
}

/// Wait until the tracked computation (if any) is done. Returns `false` on timeout.
pub async fn settle<S: StateSampler, V: Solver>(
    dispatcher: &Dispatcher<S, V>,
    timeout: Duration,
) -> bool {
    let Some(handle) = dispatcher
        .reconciler()
        .current_result()
        .map(|r| r.handle.clone())
    else {
        return true;
    };
    let deadline = tokio::time::Instant::now() + timeout;
    while !handle.is_done() {
        if tokio::time::Instant::now() >= deadline {
            warn!(?timeout, "computation still pending after settle timeout");
            return false;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    true
}

/// Run a full replay: dispatcher task, optional tick source, script player.
/// Returns the stopped dispatcher once outstanding work has settled.
pub async fn run_scripted_session<V: Solver>(
    catalog: Catalog,
    solver: Arc<V>,
    script: &Script,
    options: &SessionOptions,
) -> Result<Dispatcher<ScriptedSampler, V>, ScriptError> {
    let readings = SharedReadings::new();
    let reconciler = Reconciler::new(
        catalog,
        readings.sampler(options.max_members),
        solver,
        tokio::runtime::Handle::current(),
    );
    let (tx, rx) = mpsc::channel(options.channel_capacity.max(1));
    let dispatcher = spawn_dispatcher(
        Dispatcher::new(reconciler, Presenter::new(options.window_open)),
        rx,
    );
    let ticks = options
        .tick_interval
        .map(|interval| spawn_tick_source(tx.clone(), interval));

    info!(frames = script.frames.len(), "script replay starting");
    let played = play_script(script, &readings, &tx).await;

    if let Some(ticks) = ticks {
        ticks.abort();
    }
    let _ = tx.send(HostMessage::Shutdown).await;
    drop(tx);

    let mut dispatcher = dispatcher.await.map_err(|_| ScriptError::DispatcherClosed)?;
    let frames = played?;

    let settled = settle(&dispatcher, options.settle_timeout).await;
    dispatcher.observe_view();
    info!(frames, settled, "script replay finished");
    Ok(dispatcher)
}
