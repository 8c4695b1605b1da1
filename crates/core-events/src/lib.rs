//! Event vocabulary and producers for Quill.
//!
//! Terminal input and the notice tick are the only producers. Both push into
//! one bounded mpsc channel drained by the runtime loop, which is the only
//! place handlers run.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::mpsc::Sender;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Capacity of the runtime channel. Producers wait on a full channel; input is
/// never dropped.
pub const EVENT_CHANNEL_CAP: usize = 1024;

/// Everything the runtime loop reacts to.
#[derive(Debug, Clone)]
pub enum Event {
    Input(InputEvent),
    /// Periodic tick; expires status notices.
    Tick,
}

/// Terminal input after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyEvent),
    /// New terminal size (columns, rows).
    Resize(u16, u16),
    /// Bracketed paste from the terminal emulator. Distinct from clipboard paste.
    Paste(String),
    FocusGained,
    /// Undo checkpoint trigger.
    FocusLost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

impl KeyEvent {
    pub fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }

    pub fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::empty())
    }

    pub fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CTRL)
    }

    pub fn alt(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::ALT)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Esc,
    Backspace,
    Delete,
    Tab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    F(u8),
}

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct KeyModifiers: u8 {
        const CTRL  = 1;
        const ALT   = 1 << 1;
        const SHIFT = 1 << 2;
    }
}

/// Input service counters (relaxed; read by tests and the shutdown log).
#[derive(Debug, Default)]
pub struct InputCounters {
    keys: AtomicU64,
    paste_bytes: AtomicU64,
    send_failures: AtomicU64,
    starts: AtomicU64,
    stops: AtomicU64,
}

impl InputCounters {
    pub const fn new() -> Self {
        Self {
            keys: AtomicU64::new(0),
            paste_bytes: AtomicU64::new(0),
            send_failures: AtomicU64::new(0),
            starts: AtomicU64::new(0),
            stops: AtomicU64::new(0),
        }
    }

    pub fn record_key(&self) {
        self.keys.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_paste(&self, bytes: usize) {
        self.paste_bytes.fetch_add(bytes as u64, Ordering::Relaxed);
    }

    pub fn record_send_failure(&self) {
        self.send_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_start(&self) {
        self.starts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_stop(&self) {
        self.stops.fetch_add(1, Ordering::Relaxed);
    }

    pub fn keys(&self) -> u64 {
        self.keys.load(Ordering::Relaxed)
    }

    pub fn paste_bytes(&self) -> u64 {
        self.paste_bytes.load(Ordering::Relaxed)
    }

    pub fn send_failures(&self) -> u64 {
        self.send_failures.load(Ordering::Relaxed)
    }

    pub fn starts(&self) -> u64 {
        self.starts.load(Ordering::Relaxed)
    }

    pub fn stops(&self) -> u64 {
        self.stops.load(Ordering::Relaxed)
    }
}

pub static INPUT_COUNTERS: InputCounters = InputCounters::new();

/// A background producer. `spawn` starts one task that feeds the channel and
/// returns once the channel is closed.
pub trait AsyncEventSource: Send + 'static {
    /// Stable identifier used in logs.
    fn name(&self) -> &'static str;
    fn spawn(self: Box<Self>, tx: Sender<Event>) -> JoinHandle<()>;
}

/// Sources started together at startup.
#[derive(Default)]
pub struct EventSourceRegistry {
    pending: Vec<Box<dyn AsyncEventSource>>,
}

impl EventSourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<S: AsyncEventSource>(&mut self, src: S) {
        self.pending.push(Box::new(src));
    }

    /// Start every registered source with its own sender clone. Sources stop
    /// once the runtime drops its sender and receiver.
    pub fn spawn_all(&mut self, tx: &Sender<Event>) -> Vec<JoinHandle<()>> {
        self.pending
            .drain(..)
            .map(|src| {
                tracing::info!(target: "runtime.events", source = src.name(), "source_spawned");
                src.spawn(tx.clone())
            })
            .collect()
    }
}

/// Emits `Event::Tick` every `interval`, starting one interval after spawn.
pub struct TickEventSource {
    interval: Duration,
}

impl TickEventSource {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl AsyncEventSource for TickEventSource {
    fn name(&self) -> &'static str {
        "tick"
    }

    fn spawn(self: Box<Self>, tx: Sender<Event>) -> JoinHandle<()> {
        let period = self.interval;
        tokio::spawn(async move {
            let start = tokio::time::Instant::now() + period;
            let mut ticks = tokio::time::interval_at(start, period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticks.tick().await;
                if tx.send(Event::Tick).await.is_err() {
                    break;
                }
            }
        })
    }
}
