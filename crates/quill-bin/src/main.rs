//! Quill entrypoint.
use anyhow::Result;
use clap::Parser;
use core_actions::io_ops::load_into;
use core_actions::{Clipboard, MemoryClipboard, SystemClipboard, dispatch, translate_input};
use core_config::{Config, load_from};
use core_events::{EVENT_CHANNEL_CAP, Event, EventSourceRegistry, InputEvent, TickEventSource};
use core_model::EditorModel;
use core_render::RenderEngine;
use core_state::{EditorError, EditorState};
use core_terminal::{CrosstermBackend, TerminalBackend, TerminalGuard};
use core_text::Document;
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Once;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info, trace, warn};
use tracing_appender::non_blocking::WorkerGuard;

const LOG_FILE: &str = "quill.log";

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "quill", version, about = "Quill text editor")]
struct Args {
    /// File to open at startup. A path that does not exist yet is created on first save.
    pub path: Option<PathBuf>,
    /// Configuration file path (overrides discovery of `quill.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
}

struct AppStartup {
    log_guard: Option<WorkerGuard>,
}

impl AppStartup {
    fn new() -> Self {
        Self { log_guard: None }
    }

    fn configure_logging(&mut self) -> Result<()> {
        let log_dir = Path::new(".");
        let log_path = log_dir.join(LOG_FILE);
        if log_path.exists() {
            let _ = std::fs::remove_file(&log_path);
        }

        let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
        let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
        if tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(nb_writer)
            .try_init()
            .is_ok()
        {
            self.log_guard = Some(guard);
        }
        Ok(())
    }

    fn install_panic_hook() {
        static HOOK: Once = Once::new();
        HOOK.call_once(|| {
            let default_panic = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                tracing::error!(target: "runtime.panic", ?info, "panic");
                default_panic(info);
            }));
        });
    }
}

/// Build the editor model from config and open the startup file, if any.
fn build_model(path: Option<&Path>, config: &Config) -> EditorModel {
    let mut state = EditorState::with_undo_capacity(Document::new(), config.undo_capacity());
    state.notice_ttl = config.notice_ttl();
    state.style = config.initial_style();
    if let Some(path) = path {
        open_startup_file(&mut state, path);
    }
    EditorModel::new(state)
}

fn open_startup_file(state: &mut EditorState, path: &Path) {
    match load_into(state, path) {
        Ok(()) => {}
        Err(EditorError::FileNotFound(_)) => {
            info!(target: "io", file = %path.display(), "startup_path_new_file");
            state.file_name = Some(path.to_path_buf());
            let msg = format!("New file {}", state.display_name());
            state.notify(msg);
        }
        Err(e) => state.report_error(&e),
    }
}

fn select_clipboard() -> Box<dyn Clipboard> {
    let mut system = SystemClipboard::new();
    if system.probe() {
        Box::new(system)
    } else {
        warn!(target: "clipboard", "system_clipboard_unavailable_using_memory");
        Box::new(MemoryClipboard::new())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShutdownReason {
    ActionQuit,
    ChannelClosed,
}

impl ShutdownReason {
    fn as_str(&self) -> &'static str {
        match self {
            ShutdownReason::ActionQuit => "action_quit",
            ShutdownReason::ChannelClosed => "channel_closed",
        }
    }
}

impl fmt::Display for ShutdownReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn log_shutdown_stage(reason: ShutdownReason, stage: &'static str) {
    info!(
        target: "runtime.shutdown",
        reason = reason.as_str(),
        stage = stage,
        "shutdown_stage"
    );
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoopControl {
    Continue { dirty: bool },
    Break { reason: ShutdownReason },
}

/// Owns everything the event loop touches. Generic over the terminal backend
/// and the output sink so the loop can run against a recording backend.
struct EditorRuntime<'a, B: TerminalBackend, W: Write> {
    model: EditorModel,
    clipboard: Box<dyn Clipboard>,
    render_engine: RenderEngine,
    out: W,
    title: Option<String>,
    terminal: TerminalGuard<'a, B>,
}

impl<'a, B: TerminalBackend, W: Write> EditorRuntime<'a, B, W> {
    fn new(
        model: EditorModel,
        clipboard: Box<dyn Clipboard>,
        terminal: TerminalGuard<'a, B>,
        out: W,
    ) -> Self {
        Self {
            model,
            clipboard,
            render_engine: RenderEngine::new(),
            out,
            title: None,
            terminal,
        }
    }

    /// Size the layout from the terminal and draw the first frame.
    fn start(&mut self) -> Result<()> {
        let (w, h) = self.terminal.backend().size()?;
        self.model.resize(w, h);
        self.model.auto_scroll();
        self.render();
        Ok(())
    }

    async fn run(&mut self, rx: &mut mpsc::Receiver<Event>) -> ShutdownReason {
        debug!(target: "runtime", "event_loop_started");
        while let Some(event) = rx.recv().await {
            match self.handle_event(&event) {
                LoopControl::Break { reason } => return reason,
                LoopControl::Continue { dirty: true } => self.render(),
                LoopControl::Continue { dirty: false } => {}
            }
        }
        ShutdownReason::ChannelClosed
    }

    fn handle_event(&mut self, event: &Event) -> LoopControl {
        match event {
            Event::Input(input) => self.handle_input(input),
            Event::Tick => LoopControl::Continue {
                dirty: self.model.state_mut().tick_ephemeral(),
            },
        }
    }

    fn handle_input(&mut self, input: &InputEvent) -> LoopControl {
        if let InputEvent::Resize(w, h) = input {
            trace!(target: "runtime", width = w, height = h, "resize");
            self.model.resize(*w, *h);
            self.model.auto_scroll();
            self.render_engine.invalidate();
            return LoopControl::Continue { dirty: true };
        }
        let Some(action) = translate_input(self.model.ui_context(), self.model.menu_bar(), input)
        else {
            return LoopControl::Continue { dirty: false };
        };
        let result = dispatch(action, &mut self.model, self.clipboard.as_mut());
        if result.quit {
            info!(target: "runtime", "quit_requested");
            return LoopControl::Break {
                reason: ShutdownReason::ActionQuit,
            };
        }
        LoopControl::Continue {
            dirty: result.dirty,
        }
    }

    /// Draw the current model and refresh the window title when it changed.
    /// Failures are logged; a lost frame is repaired by the next one.
    fn render(&mut self) {
        if let Err(e) = self.render_engine.render(&self.model, &mut self.out) {
            error!(target: "render", error = %e, "render_failed");
            self.render_engine.invalidate();
        }
        let title = self.model.window_title();
        if self.title.as_deref() != Some(title.as_str()) {
            if let Err(e) = self.terminal.backend().set_title(&title) {
                warn!(target: "terminal", error = %e, "set_title_failed");
            }
            self.title = Some(title);
        }
    }
}

/// Producers feeding the event channel, stopped together at shutdown.
struct BackgroundTasks {
    tx: Option<mpsc::Sender<Event>>,
    source_handles: Vec<tokio::task::JoinHandle<()>>,
    input_task: Option<tokio::task::JoinHandle<()>>,
    input_shutdown: Option<core_input::AsyncInputShutdown>,
}

impl BackgroundTasks {
    async fn shutdown(mut self, reason: ShutdownReason) {
        log_shutdown_stage(reason, "begin");
        if let Some(tx) = self.tx.take() {
            trace!(target: "runtime.shutdown", reason = reason.as_str(), "dropping_runtime_sender");
            drop(tx);
        }

        while let Some(handle) = self.source_handles.pop() {
            match tokio::time::timeout(Duration::from_millis(200), handle).await {
                Ok(Ok(_)) => trace!(target: "runtime.shutdown", "event_source_task_stopped"),
                Ok(Err(err)) if err.is_cancelled() => {
                    trace!(target: "runtime.shutdown", "event_source_task_cancelled")
                }
                Ok(Err(err)) => error!(target: "runtime.shutdown", ?err, "event_source_task_error"),
                Err(_) => warn!(target: "runtime.shutdown", "event_source_task_timeout"),
            }
        }

        if let Some(shutdown) = self.input_shutdown.take() {
            shutdown.signal();
        }
        if let Some(handle) = self.input_task.take() {
            match handle.await {
                Ok(_) => trace!(target: "runtime.shutdown", "input_task_joined"),
                Err(err) if err.is_cancelled() => {
                    trace!(target: "runtime.shutdown", "input_task_cancelled")
                }
                Err(err) => error!(target: "runtime.shutdown", ?err, "input_task_join_failed"),
            }
        }
        log_shutdown_stage(reason, "complete");
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut startup = AppStartup::new();
    startup.configure_logging()?;
    AppStartup::install_panic_hook();
    info!(target: "runtime", "startup");

    let config = load_from(args.config.clone())?;
    let model = build_model(args.path.as_deref(), &config);
    let document = model.state().display_name();
    let config_path = config.source.as_ref().map(|p| p.display().to_string());
    info!(
        target: "runtime.startup",
        document = document.as_str(),
        config = config_path.as_deref(),
        undo_capacity = config.undo_capacity(),
        "bootstrap_complete"
    );
    let clipboard = select_clipboard();

    let mut backend = CrosstermBackend::new();
    let terminal = TerminalGuard::enter(&mut backend)?;

    let (tx, mut rx) = mpsc::channel::<Event>(EVENT_CHANNEL_CAP);
    let (input_task, input_shutdown) = core_input::spawn_async_input(tx.clone());
    let mut registry = EventSourceRegistry::new();
    registry.register(TickEventSource::new(config.tick_interval()));
    let source_handles = registry.spawn_all(&tx);
    let tasks = BackgroundTasks {
        tx: Some(tx),
        source_handles,
        input_task: Some(input_task),
        input_shutdown: Some(input_shutdown),
    };

    let mut runtime = EditorRuntime::new(model, clipboard, terminal, std::io::stdout());
    let reason = match runtime.start() {
        Ok(()) => runtime.run(&mut rx).await,
        Err(e) => {
            error!(target: "runtime", error = %e, "startup_render_failed");
            ShutdownReason::ChannelClosed
        }
    };
    rx.close();
    tasks.shutdown(reason).await;
    drop(runtime);
    info!(target: "runtime", "shutdown");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_events::{KeyCode, KeyEvent};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Recorded {
        titles: Vec<String>,
        left: bool,
    }

    struct RecordingBackend {
        log: Rc<RefCell<Recorded>>,
        size: (u16, u16),
    }

    impl TerminalBackend for RecordingBackend {
        fn enter(&mut self) -> Result<()> {
            Ok(())
        }
        fn leave(&mut self) -> Result<()> {
            self.log.borrow_mut().left = true;
            Ok(())
        }
        fn set_title(&mut self, title: &str) -> Result<()> {
            self.log.borrow_mut().titles.push(title.to_string());
            Ok(())
        }
        fn size(&self) -> Result<(u16, u16)> {
            Ok(self.size)
        }
    }

    fn backend() -> (RecordingBackend, Rc<RefCell<Recorded>>) {
        let log = Rc::new(RefCell::new(Recorded::default()));
        (
            RecordingBackend {
                log: log.clone(),
                size: (60, 12),
            },
            log,
        )
    }

    fn key(c: char) -> Event {
        Event::Input(InputEvent::Key(KeyEvent::plain(KeyCode::Char(c))))
    }

    fn ctrl(c: char) -> Event {
        Event::Input(InputEvent::Key(KeyEvent::ctrl(c)))
    }

    fn runtime<'a>(
        backend: &'a mut RecordingBackend,
    ) -> EditorRuntime<'a, RecordingBackend, Vec<u8>> {
        let model = build_model(None, &Config::default());
        let terminal = TerminalGuard::enter(backend).unwrap();
        let mut rt = EditorRuntime::new(model, Box::new(MemoryClipboard::new()), terminal, Vec::new());
        rt.start().unwrap();
        rt
    }

    #[test]
    fn start_sizes_layout_and_sets_title() {
        let (mut b, log) = backend();
        let rt = runtime(&mut b);
        assert_eq!(rt.model.layout.width, 60);
        assert_eq!(rt.model.layout.height, 12);
        assert!(!rt.out.is_empty());
        assert_eq!(log.borrow().titles, vec!["Untitled - Quill".to_string()]);
    }

    #[test]
    fn typing_marks_title_modified_once() {
        let (mut b, log) = backend();
        let mut rt = runtime(&mut b);
        for c in "hi".chars() {
            assert_eq!(rt.handle_event(&key(c)), LoopControl::Continue { dirty: true });
            rt.render();
        }
        assert_eq!(rt.model.state().document().text(), "hi");
        assert_eq!(
            log.borrow().titles,
            vec!["Untitled - Quill".to_string(), "Untitled* - Quill".to_string()]
        );
    }

    #[test]
    fn unsaved_exit_needs_confirmation() {
        let (mut b, _log) = backend();
        let mut rt = runtime(&mut b);
        rt.handle_event(&key('x'));
        assert!(matches!(rt.handle_event(&ctrl('e')), LoopControl::Continue { .. }));
        assert_eq!(
            rt.handle_event(&ctrl('e')),
            LoopControl::Break {
                reason: ShutdownReason::ActionQuit
            }
        );
    }

    #[test]
    fn resize_updates_layout() {
        let (mut b, _log) = backend();
        let mut rt = runtime(&mut b);
        let ev = Event::Input(InputEvent::Resize(100, 30));
        assert_eq!(rt.handle_event(&ev), LoopControl::Continue { dirty: true });
        assert_eq!(rt.model.layout.width, 100);
        assert_eq!(rt.model.layout.text.height, 28);
    }

    #[test]
    fn ignored_input_is_clean() {
        let (mut b, _log) = backend();
        let mut rt = runtime(&mut b);
        let ev = Event::Input(InputEvent::FocusGained);
        assert_eq!(rt.handle_event(&ev), LoopControl::Continue { dirty: false });
    }

    #[test]
    fn dropping_runtime_restores_terminal() {
        let (mut b, log) = backend();
        {
            let _rt = runtime(&mut b);
        }
        assert!(log.borrow().left);
    }

    #[tokio::test]
    async fn loop_stops_on_quit_or_closed_channel() {
        let (mut b, _log) = backend();
        let mut rt = runtime(&mut b);
        let (tx, mut rx) = mpsc::channel(8);
        tx.send(key('a')).await.unwrap();
        tx.send(Event::Tick).await.unwrap();
        drop(tx);
        assert_eq!(rt.run(&mut rx).await, ShutdownReason::ChannelClosed);
        assert_eq!(rt.model.state().document().text(), "a");

        let (tx, mut rx) = mpsc::channel(8);
        tx.send(ctrl('e')).await.unwrap();
        tx.send(ctrl('e')).await.unwrap();
        tx.send(key('b')).await.unwrap();
        assert_eq!(rt.run(&mut rx).await, ShutdownReason::ActionQuit);
        assert_eq!(rt.model.state().document().text(), "a");
    }

    #[test]
    fn startup_path_is_opened() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "one\ntwo\n").unwrap();
        let model = build_model(Some(&path), &Config::default());
        assert_eq!(model.state().document().text(), "one\ntwo\n");
        assert_eq!(model.state().display_name(), "notes.txt");
        assert!(!model.state().modified);
    }

    #[test]
    fn missing_startup_path_becomes_new_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fresh.txt");
        let model = build_model(Some(&path), &Config::default());
        assert_eq!(model.state().document().text(), "");
        assert_eq!(model.state().file_name.as_deref(), Some(path.as_path()));
        let notice = model.state().ephemeral_status.as_ref().unwrap();
        assert_eq!(notice.text, "New file fresh.txt");
    }

    #[test]
    fn unreadable_startup_path_leaves_untitled_document() {
        let dir = tempfile::tempdir().unwrap();
        let model = build_model(Some(dir.path()), &Config::default());
        assert_eq!(model.state().display_name(), "Untitled");
        assert!(model.state().ephemeral_status.is_some());
    }

    #[test]
    fn shutdown_reason_labels_are_stable() {
        assert_eq!(ShutdownReason::ActionQuit.as_str(), "action_quit");
        assert_eq!(ShutdownReason::ChannelClosed.to_string(), "channel_closed");
    }
}
