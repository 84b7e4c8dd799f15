//! Application lifecycle management.
//!
//! This module contains the core lifecycle methods for the `App`:
//! - `new()` - Creates a new application instance
//! - `start()` - Mounts the app and launches the first bootstrap attempt
//! - `run()` - Main event loop

use std::sync::Arc;
use std::time::{Duration, Instant};

use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use tokio::sync::mpsc;

use crate::domain::AccountIndex;
use crate::theme::Theme;
use crate::tui::Tui;
use crate::ui;

use super::{App, AppConfig, Readiness, ReadinessGate, SetupLauncher, UiState};

// ============================================================================
// Lifecycle Methods
// ============================================================================

impl App {
    /// Creates an unmounted app. Nothing runs until [`App::start`].
    #[must_use]
    pub fn new(config: AppConfig, launcher: Arc<dyn SetupLauncher>) -> Self {
        let (message_tx, message_rx) = mpsc::unbounded_channel();
        let theme = Theme::new(config.theme);

        Self {
            gate: ReadinessGate::new(),
            selection: None,
            ui: UiState::new(),
            config,
            theme,
            exit: false,
            animation_tick: 0,
            initial_account: AccountIndex::FIRST,
            persist_config: false,
            message_tx,
            message_rx,
            launcher,
            bootstrap: None,
        }
    }

    /// Account selected when the dashboard opens.
    #[must_use]
    pub fn with_initial_account(mut self, account: AccountIndex) -> Self {
        self.initial_account = account;
        self
    }

    /// Write config changes (such as the theme) back to disk.
    #[must_use]
    pub fn with_persistence(mut self, persist: bool) -> Self {
        self.persist_config = persist;
        self
    }

    /// Mounts the app, launching the first bootstrap attempt.
    ///
    /// Calling it again while an attempt exists is a no-op.
    pub fn start(&mut self) {
        if self.bootstrap.is_none() && matches!(self.gate.phase(), Readiness::Uninitialized) {
            self.launch();
        }
    }

    /// Unmounts the app, cancelling any pending bootstrap work.
    pub fn shutdown(&mut self) {
        if let Some(generation) = self.running_attempt() {
            tracing::info!(generation, "shutting down with bootstrap in flight");
        }
        self.bootstrap = None;
    }

    /// Generation of the attempt currently running, if any.
    #[must_use]
    pub fn running_attempt(&self) -> Option<u64> {
        self.bootstrap
            .as_ref()
            .filter(|task| !task.is_finished())
            .map(super::bootstrap::BootstrapTask::generation)
    }

    pub(super) fn launch(&mut self) {
        let generation = self.gate.generation();
        tracing::info!(generation, rpc_url = %self.config.rpc_url, "launching bootstrap");
        // Replacing the previous task cancels it.
        self.bootstrap = Some(self.launcher.launch(generation, self.message_tx.clone()));
    }

    /// Advances timers: the spinner frame and the toast countdown.
    pub fn tick(&mut self) {
        self.animation_tick = self.animation_tick.wrapping_add(1);
        self.ui.tick_toast();
    }

    /// Runs the main application loop.
    ///
    /// # Errors
    /// Returns an error if the terminal operations fail.
    pub fn run(&mut self, terminal: &mut Tui) -> Result<()> {
        self.start();

        let tick_rate = Duration::from_millis(100);
        let mut last_tick = Instant::now();

        terminal.draw(|frame| ui::render(self, frame))?;

        while !self.exit {
            self.process_messages();

            let timeout = tick_rate
                .checked_sub(last_tick.elapsed())
                .unwrap_or(Duration::from_secs(0));

            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key)
                        if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) =>
                    {
                        self.handle_key_event(key);
                    }
                    Event::Resize(_, _) => {
                        terminal.draw(|frame| ui::render(self, frame))?;
                    }
                    _ => {}
                }
            }

            if last_tick.elapsed() >= tick_rate {
                self.tick();
                terminal.draw(|frame| ui::render(self, frame))?;
                last_tick = Instant::now();
            }
        }

        self.shutdown();
        Ok(())
    }
}
