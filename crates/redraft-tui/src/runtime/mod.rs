//! TUI runtime: owns the terminal, runs the event loop, executes effects.
//!
//! All side effects happen here. Async handlers send their results to the
//! inbox, which is drained once per loop iteration.

mod handlers;
mod inbox;

use std::future::Future;
use std::io::Stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use inbox::{UiEventReceiver, UiEventSender};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use redraft_core::api::ProxyClient;
use redraft_core::config::Config;
use tokio::sync::mpsc;

use crate::effects::UiEffect;
use crate::events::{ControlEvent, UiEvent};
use crate::state::AppState;
use crate::{render, terminal, update};

/// Frame cadence while anything is pending (~60fps).
pub const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Poll duration when idle.
pub const IDLE_POLL_DURATION: Duration = Duration::from_millis(100);

/// Full-screen TUI runtime.
///
/// The terminal is restored on drop, on panic, and on quit.
pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub state: AppState,
    client: ProxyClient,
    inbox_tx: UiEventSender,
    inbox_rx: UiEventReceiver,
    last_tick: Instant,
    last_terminal_event: Instant,
}

impl TuiRuntime {
    /// # Errors
    /// Returns an error if the proxy URL is invalid or the terminal cannot be
    /// set up.
    pub fn new(config: &Config) -> Result<Self> {
        let client = ProxyClient::from_config(config)?;

        // Hook first so a panic during setup still restores the terminal.
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
        let now = Instant::now();
        Ok(Self {
            terminal,
            state: AppState::new(config),
            client,
            inbox_tx,
            inbox_rx,
            last_tick: now,
            last_terminal_event: now,
        })
    }

    /// Runs the main event loop until quit.
    ///
    /// # Errors
    /// Returns an error if terminal I/O fails.
    pub fn run(&mut self) -> Result<()> {
        terminal::enable_input_features()?;
        tracing::info!(proxy = %self.client.base_url(), "tui started");

        self.dispatch_event(UiEvent::Control(ControlEvent::RefreshUsage));
        let result = self.event_loop();

        let _ = terminal::disable_input_features();
        result
    }

    fn event_loop(&mut self) -> Result<()> {
        let mut dirty = true;

        while !self.state.tui.should_quit {
            let mut events = self.collect_events()?;

            // Frame goes first so every reducer step sees the current clock.
            events.insert(0, UiEvent::Frame { now: Instant::now() });

            for event in events {
                if matches!(&event, UiEvent::Terminal(_)) {
                    self.last_terminal_event = Instant::now();
                    dirty = true;
                }
                if matches!(&event, UiEvent::Tick { .. }) {
                    dirty = true;
                }
                let effects = update::update(&mut self.state, event);
                self.execute_effects(effects);
            }

            if dirty {
                self.terminal.draw(|frame| {
                    render::render(&self.state, frame);
                })?;
                dirty = false;
            }
        }

        tracing::info!("tui stopped");
        Ok(())
    }

    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        let recent_terminal_activity = self.last_terminal_event.elapsed() < IDLE_POLL_DURATION;
        let tick_interval = if self.state.tui.needs_fast_tick() || recent_terminal_activity {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        let mut poll_duration = if events.is_empty() {
            tick_interval.saturating_sub(self.last_tick.elapsed())
        } else {
            Duration::ZERO
        };
        // Never sleep past a debounce deadline.
        if let Some(deadline) = self.state.tui.debounce.next_deadline() {
            poll_duration = poll_duration.min(deadline.saturating_duration_since(Instant::now()));
        }

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= tick_interval
            || self
                .state
                .tui
                .debounce
                .next_deadline()
                .is_some_and(|deadline| Instant::now() >= deadline)
        {
            let now = Instant::now();
            events.push(UiEvent::Tick { now });
            self.last_tick = now;
        }

        Ok(events)
    }

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    fn dispatch_event(&mut self, event: UiEvent) {
        let effects = update::update(&mut self.state, event);
        self.execute_effects(effects);
    }

    /// Spawns a handler and sends its event to the inbox when it completes.
    fn spawn_effect<F, Fut>(&self, f: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = UiEvent> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(f().await);
        });
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.tui.should_quit = true;
            }
            UiEffect::Rephrase { id, request } => {
                let client = self.client.clone();
                self.spawn_effect(move || handlers::rephrase(client, id, request));
            }
            UiEffect::Translate { id, request } => {
                let client = self.client.clone();
                self.spawn_effect(move || handlers::translate(client, id, request));
            }
            UiEffect::FetchUsage { id } => {
                let client = self.client.clone();
                self.spawn_effect(move || handlers::usage(client, id));
            }
            UiEffect::CopyToClipboard { text } => {
                self.spawn_effect(move || handlers::copy_to_clipboard(text));
            }
        }
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
