//! The input task: reads crossterm's `EventStream`, normalizes each event and
//! forwards it to the runtime channel until told to stop.

use crate::{log_paste, translate_event};
use core_events::{Event, INPUT_COUNTERS, InputEvent};
use crossterm::event::{Event as CEvent, EventStream};
use std::io;
use tokio::sync::{mpsc::Sender, watch};
use tokio::task::JoinHandle;
use tokio_stream::{Stream, StreamExt};
use tracing::{Instrument, info, trace, warn};

/// Handle used by the runtime to stop the input task.
#[derive(Clone, Debug)]
pub struct AsyncInputShutdown {
    stop: watch::Sender<bool>,
}

impl AsyncInputShutdown {
    fn pair() -> (Self, StopListener) {
        let (stop, rx) = watch::channel(false);
        (Self { stop }, StopListener { rx })
    }

    pub fn signal(&self) {
        self.stop.send_replace(true);
    }
}

struct StopListener {
    rx: watch::Receiver<bool>,
}

impl StopListener {
    /// Resolves once a stop was requested. A dropped handle never resolves.
    async fn stopped(&mut self) {
        if self.rx.wait_for(|stop| *stop).await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

pub(crate) fn spawn_async_event_task(sender: Sender<Event>) -> (JoinHandle<()>, AsyncInputShutdown) {
    let (shutdown, listener) = AsyncInputShutdown::pair();
    let span = tracing::debug_span!(target: "input.thread", "input_task");
    let handle = tokio::spawn(
        async move {
            pump(EventStream::new(), sender, listener).await;
        }
        .instrument(span),
    );
    (handle, shutdown)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum StopReason {
    Signal,
    ChannelClosed,
    StreamEnded,
    StreamError(io::ErrorKind),
}

impl StopReason {
    fn label(self) -> &'static str {
        match self {
            StopReason::Signal => "signal",
            StopReason::ChannelClosed => "channel_closed",
            StopReason::StreamEnded => "stream_ended",
            StopReason::StreamError(_) => "stream_error",
        }
    }
}

/// Forward `stream` into `sender` until the stream ends, fails, the channel
/// closes or a stop is signalled.
async fn pump<S>(mut stream: S, sender: Sender<Event>, mut stop: StopListener) -> StopReason
where
    S: Stream<Item = io::Result<CEvent>> + Unpin,
{
    info!(target: "input.thread", "input_task_started");
    INPUT_COUNTERS.record_start();
    let reason = loop {
        let next = tokio::select! {
            biased;
            _ = stop.stopped() => break StopReason::Signal,
            next = stream.next() => next,
        };
        let raw = match next {
            None => break StopReason::StreamEnded,
            Some(Err(e)) => break StopReason::StreamError(e.kind()),
            Some(Ok(raw)) => raw,
        };
        let Some(input) = translate_event(raw) else {
            continue;
        };
        note(&input);
        if sender.send(Event::Input(input)).await.is_err() {
            INPUT_COUNTERS.record_send_failure();
            break StopReason::ChannelClosed;
        }
    };
    INPUT_COUNTERS.record_stop();
    if let StopReason::StreamError(kind) = reason {
        warn!(target: "input.thread", ?kind, "input_stream_error");
    }
    info!(target: "input.thread", reason = reason.label(), "input_task_stopped");
    reason
}

fn note(input: &InputEvent) {
    match input {
        InputEvent::Key(key) => {
            INPUT_COUNTERS.record_key();
            trace!(target: "input.event", code = ?key.code, mods = ?key.mods, "key");
        }
        InputEvent::Paste(data) => {
            INPUT_COUNTERS.record_paste(data.len());
            log_paste(data);
        }
        other => trace!(target: "input.event", event = ?other, "input"),
    }
}
