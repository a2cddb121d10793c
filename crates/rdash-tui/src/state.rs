//! Application state composition.
//!
//! ```text
//! AppState
//! ├── tui: TuiState
//! │   ├── dashboard: DashboardState (shared store, written by `reduce`)
//! │   ├── panels: Panels            (per-tab view state and repositories)
//! │   ├── task_seq: TaskSeq         (async task id generator)
//! │   ├── tasks: Tasks              (task lifecycle state)
//! │   └── toast: Option<Toast>      (status line message)
//! └── overlay: Option<Overlay>      (modal overlays)
//! ```
//!
//! State is split between `TuiState` and `Option<Overlay>` so overlay
//! handlers can get `&mut self` while the reducer still holds `&mut TuiState`.

use std::time::{Duration, Instant};

use rdash_core::config::Config;
use rdash_core::seed::MockData;
use rdash_core::stats::StatsSnapshot;
use rdash_core::store::StoreResult;

use crate::common::{TaskSeq, Tasks};
use crate::dashboard::DashboardState;
use crate::features::{PanelContext, Panels};
use crate::overlays::Overlay;

/// How long a toast stays in the status line.
pub const TOAST_DURATION: Duration = Duration::from_secs(3);

/// Combined application state.
pub struct AppState {
    pub tui: TuiState,
    pub overlay: Option<Overlay>,
}

impl AppState {
    /// # Errors
    /// Returns an error if the seed data contains duplicate keys.
    pub fn new(config: Config, data: MockData, stats: StatsSnapshot) -> StoreResult<Self> {
        Ok(Self {
            tui: TuiState::new(config, data, stats)?,
            overlay: None,
        })
    }
}

/// Short-lived status line message.
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub is_error: bool,
    pub shown_at: Instant,
}

impl Toast {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: false,
            shown_at: Instant::now(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            is_error: true,
            ..Self::info(message)
        }
    }

    pub fn is_expired(&self) -> bool {
        self.shown_at.elapsed() >= TOAST_DURATION
    }
}

/// Dashboard state apart from overlays.
pub struct TuiState {
    pub should_quit: bool,
    pub config: Config,
    pub dashboard: DashboardState,
    pub panels: Panels,
    pub task_seq: TaskSeq,
    pub tasks: Tasks,
    pub toast: Option<Toast>,
    /// Advances on every tick; drives spinners.
    pub spinner_frame: usize,
    /// Last known terminal size.
    pub viewport: (u16, u16),
}

impl TuiState {
    /// # Errors
    /// Returns an error if the seed data contains duplicate keys.
    pub fn new(config: Config, data: MockData, stats: StatsSnapshot) -> StoreResult<Self> {
        let panels = Panels::new(&config, data, stats)?;
        Ok(Self {
            should_quit: false,
            config,
            dashboard: DashboardState::default(),
            panels,
            task_seq: TaskSeq::default(),
            tasks: Tasks::default(),
            toast: None,
            spinner_frame: 0,
            viewport: (0, 0),
        })
    }

    pub fn panel_context(&self) -> PanelContext<'_> {
        PanelContext {
            dashboard: &self.dashboard,
            tasks: &self.tasks,
            spinner_frame: self.spinner_frame,
        }
    }
}
