//! Runtime: terminal ownership, the event loop, and effect execution.
//!
//! Everything side-effectful lives on this side of the boundary. The
//! reducer in `update` only describes work as `UiEffect`s; this module
//! turns them into spawned tasks whose single result event comes back
//! through one shared inbox channel, so the loop reads from exactly two
//! sources: crossterm and the inbox.
//!
//! Layout:
//! - `mod.rs`: `TuiRuntime`, the loop, effect dispatch
//! - `inbox.rs`: the result channel
//! - `handlers.rs`: the async bodies behind each effect

mod handlers;
mod inbox;

use std::future::Future;
use std::io::Stdout;

use anyhow::{Context, Result};
use crossterm::event;
use etude_core::config::Config;
use etude_core::interrupt;
use inbox::{UiEventReceiver, UiEventSender};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::{AppState, LaunchOptions};
use crate::{render, terminal, update};

/// Tick cadence while a transition or run is live (~60fps).
pub const FRAME_DURATION: std::time::Duration = std::time::Duration::from_millis(16);

/// Tick cadence when nothing is animating. One-second countdown
/// granularity needs nothing faster.
pub const IDLE_POLL_DURATION: std::time::Duration = std::time::Duration::from_millis(100);

/// Owns the terminal, the state, and the loop.
///
/// The terminal is restored on drop, on panic, and on Ctrl+C.
pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Split state: chrome in `tui`, live practice in `session`.
    pub state: AppState,
    /// Cloned into every spawned handler.
    inbox_tx: UiEventSender,
    /// Drained once per loop iteration.
    inbox_rx: UiEventReceiver,
    /// When the last `Tick` was emitted.
    last_tick: std::time::Instant,
    /// When the last terminal event arrived; keeps polling fast while the
    /// user is typing.
    last_terminal_event: std::time::Instant,
}

impl TuiRuntime {
    /// Creates the runtime and enters the alternate screen.
    pub fn new(config: Config, launch: &LaunchOptions) -> Result<Self> {
        // Hooks must be in place before raw mode is on
        terminal::install_panic_hook();
        interrupt::set_restore_hook(|| {
            let _ = terminal::restore_terminal();
        });

        // A flag left over from an earlier run would quit instantly
        interrupt::reset();

        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        let state = AppState::new(config, launch);
        let (inbox_tx, inbox_rx) = inbox::channel();

        let now = std::time::Instant::now();
        Ok(Self {
            terminal,
            state,
            inbox_tx,
            inbox_rx,
            last_tick: now,
            last_terminal_event: now,
        })
    }

    /// Runs init effects, then the loop, until quit.
    pub fn run(&mut self) -> Result<()> {
        let effects = update::init(&mut self.state);
        self.execute_effects(effects);

        self.event_loop()
    }

    fn event_loop(&mut self) -> Result<()> {
        // Dirty so the first iteration draws
        let mut dirty = true;

        while !self.state.tui.should_quit {
            // In raw mode Ctrl+C arrives as a key event; the signal path
            // only fires while the terminal is handed off to the editor.
            if interrupt::is_interrupted() {
                self.state.tui.should_quit = true;
                break;
            }

            let mut events = self.collect_events()?;

            // Frame goes first so layout is current before keys are handled
            let size = self.terminal.size()?;
            events.insert(
                0,
                UiEvent::Frame {
                    width: size.width,
                    height: size.height,
                },
            );

            for event in events {
                if matches!(&event, UiEvent::Terminal(_)) {
                    self.last_terminal_event = std::time::Instant::now();
                }

                // Batch renders to tick cadence: keys mutate state but the
                // draw waits for the next Tick.
                let marks_dirty = matches!(&event, UiEvent::Tick { .. });

                let effects = update::update(&mut self.state, event);
                if marks_dirty {
                    dirty = true;
                }
                self.execute_effects(effects);
            }

            if dirty {
                self.terminal.draw(|frame| {
                    render::render(&self.state, frame);
                })?;

                dirty = false;
            }
        }

        Ok(())
    }

    // ========================================================================
    // Event Collection
    // ========================================================================

    /// Gathers inbox results, terminal input, and a `Tick` when due.
    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        // Fast cadence while anything is visibly moving: a transition, a
        // session starting, a test run in flight, or the user typing.
        let recent_terminal_activity = self.last_terminal_event.elapsed() < IDLE_POLL_DURATION;
        let needs_fast_poll = self.state.tui.transition.is_some()
            || self.state.tui.pending_session.is_some()
            || self.state.session.as_ref().is_some_and(|s| s.run_in_flight)
            || recent_terminal_activity;

        let tick_interval = if needs_fast_poll {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        // Handler results, in completion order
        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        let time_until_tick = tick_interval.saturating_sub(self.last_tick.elapsed());

        // With events already in hand, poll without blocking; otherwise
        // sleep in poll until the next tick is due. Input wakes the poll
        // early either way.
        let poll_duration = if events.is_empty() {
            time_until_tick
        } else {
            std::time::Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            // Take whatever else is buffered without waiting
            while event::poll(std::time::Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        // An early wake from input skips the Tick; the next iteration
        // re-checks.
        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick {
                now: std::time::Instant::now(),
            });
            self.last_tick = std::time::Instant::now();
        }

        Ok(events)
    }

    // ========================================================================
    // Effect Dispatch
    // ========================================================================

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    /// Feeds an event straight through the reducer, bypassing the inbox.
    fn dispatch_event(&mut self, event: UiEvent) {
        let effects = update::update(&mut self.state, event);
        if !effects.is_empty() {
            self.execute_effects(effects);
        }
    }

    /// Spawns a handler future and posts its one result to the inbox.
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

            UiEffect::LoadProblems => {
                self.spawn_effect(handlers::load_problems);
            }
            UiEffect::LoadStats => {
                self.spawn_effect(handlers::load_stats);
            }

            UiEffect::StartSession {
                session,
                language,
                starter,
            } => {
                self.spawn_effect(move || handlers::session_start(session, language, starter));
            }
            UiEffect::ScheduleTick { session } => {
                self.spawn_effect(move || handlers::schedule_tick(session));
            }
            UiEffect::RunTests {
                session,
                language,
                code,
                cases,
            } => {
                self.spawn_effect(move || handlers::run_tests(session, language, code, cases));
            }
            UiEffect::RecordAttempt { record } => {
                self.spawn_effect(move || handlers::record_attempt(record));
            }

            // Editor hand-off (inline - the loop yields the terminal until
            // the editor exits, then the result re-enters via the reducer)
            UiEffect::OpenEditor {
                session,
                editor,
                path,
            } => {
                let event = self.run_editor(session, &editor, &path);
                self.dispatch_event(event);
            }
        }
    }

    /// Suspends the TUI, runs the editor to completion, and resumes.
    ///
    /// Runs on the loop thread on purpose: the editor owns the terminal, so
    /// there is nothing useful to render until it exits.
    fn run_editor(
        &mut self,
        session: crate::features::session::SessionId,
        editor: &str,
        path: &std::path::Path,
    ) -> UiEvent {
        if let Err(e) = terminal::suspend_terminal() {
            return UiEvent::EditorFailed {
                session,
                error: format!("Failed to suspend terminal: {e:#}"),
            };
        }

        let outcome = etude_core::editor::edit_file(editor, path);

        let resumed = terminal::resume_terminal(&mut self.terminal);

        match (outcome, resumed) {
            (Ok(code), Ok(())) => UiEvent::EditorClosed { session, code },
            (Ok(_), Err(e)) => UiEvent::EditorFailed {
                session,
                error: format!("Failed to resume terminal: {e:#}"),
            },
            (Err(e), _) => UiEvent::EditorFailed {
                session,
                error: format!("{e:#}"),
            },
        }
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
