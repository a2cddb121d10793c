//! Dashboard runtimes: the only place side effects happen.
//!
//! The reducer returns effects; a runtime executes them. Slow work runs on
//! tokio tasks whose results come back as events through an unbounded
//! channel, drained once per loop iteration.
//!
//! - `mod.rs`: the terminal runtime (`TuiRuntime`)
//! - `headless.rs`: scripted runtime without a terminal (`HeadlessRuntime`)
//! - `handlers/`: async effect handlers shared by both

mod handlers;
pub mod headless;

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use rdash_core::auth::AdminAuthority;
use rdash_core::config::Config;
use rdash_core::review::MockReviewClient;
use rdash_core::seed::MockData;
use rdash_core::stats::StatsSnapshot;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio_util::sync::CancellationToken;

use crate::common::{TaskCompleted, TaskKind, TaskStarted, clipboard};
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::terminal::TerminalSession;
use crate::{render, update};

/// Tick interval while a task runs, a toast shows, or keys arrive (~60fps).
pub const ACTIVE_TICK: Duration = Duration::from_millis(16);

/// Tick interval when nothing moves.
pub const IDLE_TICK: Duration = Duration::from_millis(100);

/// Decides when the next tick is due.
struct Pacing {
    last_tick: Instant,
    last_input: Instant,
}

impl Pacing {
    fn new() -> Self {
        let now = Instant::now();
        Self {
            last_tick: now,
            last_input: now,
        }
    }

    fn interval(&self, busy: bool) -> Duration {
        if busy || self.last_input.elapsed() < IDLE_TICK {
            ACTIVE_TICK
        } else {
            IDLE_TICK
        }
    }

    fn until_tick(&self, interval: Duration) -> Duration {
        interval.saturating_sub(self.last_tick.elapsed())
    }

    fn take_tick(&mut self, interval: Duration) -> bool {
        let due = self.last_tick.elapsed() >= interval;
        if due {
            self.last_tick = Instant::now();
        }
        due
    }
}

/// Full-screen dashboard runtime.
pub struct TuiRuntime {
    terminal: TerminalSession,
    pub state: AppState,
    authority: Arc<AdminAuthority>,
    client: Arc<MockReviewClient>,
    events_tx: UnboundedSender<UiEvent>,
    events_rx: UnboundedReceiver<UiEvent>,
    pacing: Pacing,
}

impl TuiRuntime {
    /// Builds the state and takes over the terminal.
    ///
    /// # Errors
    /// Returns an error if the seed data is inconsistent or the terminal
    /// cannot be set up.
    pub fn new(
        config: Config,
        data: MockData,
        stats: StatsSnapshot,
        client: MockReviewClient,
    ) -> Result<Self> {
        let authority = Arc::new(AdminAuthority::from_config(&config));
        let state = AppState::new(config, data, stats).context("Failed to load mock data")?;
        let terminal = TerminalSession::enter().context("Failed to setup terminal")?;
        let (events_tx, events_rx) = unbounded_channel();

        Ok(Self {
            terminal,
            state,
            authority,
            client: Arc::new(client),
            events_tx,
            events_rx,
            pacing: Pacing::new(),
        })
    }

    /// Runs until the user quits, then hands the terminal back.
    ///
    /// # Errors
    /// Returns the first terminal I/O error.
    pub fn run(&mut self) -> Result<()> {
        let outcome = self.event_loop();
        outcome.and(self.terminal.restore())
    }

    fn event_loop(&mut self) -> Result<()> {
        let mut needs_draw = true;

        while !self.state.tui.should_quit {
            for event in self.next_batch()? {
                // Input is folded in right away but only drawn on the next tick.
                needs_draw |= matches!(event, UiEvent::Tick);
                for effect in update::update(&mut self.state, event) {
                    self.execute(effect);
                }
            }

            if needs_draw {
                self.terminal
                    .draw(|frame| render::render(&self.state, frame))?;
                needs_draw = false;
            }
        }
        Ok(())
    }

    /// Gathers everything that happened since the last call: the frame size,
    /// finished tasks, key presses and, when due, a tick.
    fn next_batch(&mut self) -> Result<Vec<UiEvent>> {
        let size = self.terminal.size()?;
        let mut batch = vec![UiEvent::Frame {
            width: size.width,
            height: size.height,
        }];

        let busy = self.state.tui.tasks.is_any_running() || self.state.tui.toast.is_some();
        let interval = self.pacing.interval(busy);

        while let Ok(event) = self.events_rx.try_recv() {
            batch.push(event);
        }

        let mut wait = if batch.len() > 1 {
            Duration::ZERO
        } else {
            self.pacing.until_tick(interval)
        };
        while event::poll(wait)? {
            batch.push(UiEvent::Terminal(event::read()?));
            self.pacing.last_input = Instant::now();
            wait = Duration::ZERO;
        }

        if self.pacing.take_tick(interval) {
            batch.push(UiEvent::Tick);
        }
        Ok(batch)
    }

    /// Runs `job` on tokio and reports its event as a `TaskCompleted`.
    ///
    /// The reducer already tracks `started`; the runtime only delivers the
    /// result.
    fn spawn<F, Fut>(&self, kind: TaskKind, started: TaskStarted, job: F)
    where
        F: FnOnce(Option<CancellationToken>) -> Fut + Send + 'static,
        Fut: Future<Output = UiEvent> + Send + 'static,
    {
        let tx = self.events_tx.clone();
        let TaskStarted { id, cancel } = started;
        tokio::spawn(async move {
            let result = Box::new(job(cancel).await);
            let _ = tx.send(UiEvent::TaskCompleted {
                kind,
                completed: TaskCompleted { id, result },
            });
        });
    }

    fn execute(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => self.state.tui.should_quit = true,
            UiEffect::VerifyAdmin {
                task: Some(started),
                password,
            } => {
                let authority = Arc::clone(&self.authority);
                self.spawn(TaskKind::AdminLogin, started, move |_| async move {
                    handlers::verify_admin(&authority, &password).await
                });
            }
            UiEffect::StartReview {
                task: Some(started),
                request,
            } => {
                let client = Arc::clone(&self.client);
                self.spawn(TaskKind::Review, started, move |cancel| async move {
                    let cancel = cancel.unwrap_or_default();
                    handlers::run_review(&client, &request, &cancel).await
                });
            }
            UiEffect::CancelTask {
                token: Some(token), ..
            } => token.cancel(),
            UiEffect::CopyToClipboard { text } => {
                let _ = self
                    .events_tx
                    .send(UiEvent::ClipboardCopied(clipboard::copy(&text)));
            }
            other => {
                tracing::debug!(effect = ?other, "effect has nothing to run");
            }
        }
    }
}
