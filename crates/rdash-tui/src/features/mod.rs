//! Dashboard panels.
//!
//! Each panel owns its local view state (focus, filters, page) and, where it
//! lists data, a `MemoryRepository`. Panels read the shared store through
//! [`PanelContext`] and change it only by returning actions.

pub mod guide;
pub mod my_projects;
pub mod projects;
pub mod prompt_test;
pub mod request_form;
pub mod requests;
pub mod statistics;
pub mod tokens;

use chrono::{DateTime, Utc};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use rdash_core::config::Config;
use rdash_core::request::RequestForm;
use rdash_core::seed::MockData;
use rdash_core::stats::StatsSnapshot;
use rdash_core::status::ProjectStatus;
use rdash_core::store::{Page, Repository, StoreResult};

use crate::common::Tasks;
use crate::dashboard::{Action, DashboardState};
use crate::effects::UiEffect;
use crate::mutations::StateMutation;
use crate::overlays::OverlayRequest;
use crate::tabs::Tab;

/// Read-only view handed to panel key handlers and renderers.
pub struct PanelContext<'a> {
    pub dashboard: &'a DashboardState,
    pub tasks: &'a Tasks,
    pub spinner_frame: usize,
}

/// What a panel asks for after handling a key.
#[derive(Debug, Default)]
pub struct PanelUpdate {
    pub actions: Vec<Action>,
    pub effects: Vec<UiEffect>,
    pub overlay: Option<OverlayRequest>,
}

impl PanelUpdate {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn action(action: Action) -> Self {
        Self::actions(vec![action])
    }

    pub fn actions(actions: Vec<Action>) -> Self {
        Self {
            actions,
            ..Self::default()
        }
    }

    pub fn open(request: OverlayRequest) -> Self {
        Self {
            overlay: Some(request),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_effects(mut self, effects: Vec<UiEffect>) -> Self {
        self.effects = effects;
        self
    }
}

/// All panels of the dashboard.
#[derive(Debug)]
pub struct Panels {
    pub request_form: request_form::RequestFormPanel,
    pub prompt_test: prompt_test::PromptTestPanel,
    pub my_projects: my_projects::MyProjectsPanel,
    pub guide: guide::GuidePanel,
    pub requests: requests::RequestsPanel,
    pub projects: projects::ProjectsPanel,
    pub statistics: statistics::StatisticsPanel,
    pub tokens: tokens::TokensPanel,
}

impl Panels {
    /// # Errors
    /// Returns an error if a seed dataset contains duplicate keys.
    pub fn new(config: &Config, data: MockData, stats: StatsSnapshot) -> StoreResult<Self> {
        Ok(Self {
            request_form: request_form::RequestFormPanel::default(),
            prompt_test: prompt_test::PromptTestPanel::default(),
            my_projects: my_projects::MyProjectsPanel::new(data.my_projects)?,
            guide: guide::GuidePanel::default(),
            requests: requests::RequestsPanel::new(data.requests, config.pages.requests)?,
            projects: projects::ProjectsPanel::new(data.projects, config.pages.projects)?,
            statistics: statistics::StatisticsPanel::new(stats),
            tokens: tokens::TokensPanel::new(data.tokens, config.pages.tokens)?,
        })
    }

    pub fn handle_key(&mut self, tab: Tab, ctx: &PanelContext<'_>, key: KeyEvent) -> PanelUpdate {
        match tab {
            Tab::RequestForm => self.request_form.handle_key(ctx, key),
            Tab::PromptTest => self.prompt_test.handle_key(ctx, key),
            Tab::MyProjects => self.my_projects.handle_key(key),
            Tab::Guide => self.guide.handle_key(key),
            Tab::RequestManagement => self.requests.handle_key(key, Utc::now()),
            Tab::ProjectManagement => self.projects.handle_key(key, Utc::now()),
            Tab::Statistics => self.statistics.handle_key(key),
            Tab::TokenManagement => self.tokens.handle_key(ctx, key, Utc::now()),
        }
    }

    pub fn render(&self, tab: Tab, ctx: &PanelContext<'_>, frame: &mut Frame, area: Rect) {
        match tab {
            Tab::RequestForm => self.request_form.render(ctx, frame, area),
            Tab::PromptTest => self.prompt_test.render(ctx, frame, area),
            Tab::MyProjects => self.my_projects.render(frame, area),
            Tab::Guide => self.guide.render(frame, area),
            Tab::RequestManagement => self.requests.render(frame, area),
            Tab::ProjectManagement => self.projects.render(frame, area),
            Tab::Statistics => self.statistics.render(frame, area),
            Tab::TokenManagement => self.tokens.render(ctx, frame, area),
        }
    }

    /// Records a submitted onboarding request as a waiting project, both in
    /// the admin request list and in the user's own projects.
    ///
    /// Returns the new project id, or `None` if the draft was invalid.
    pub fn record_submission(&mut self, form: &RequestForm, now: DateTime<Utc>) -> Option<String> {
        let id = format!("req-{}", self.requests.repo.len() + 1);
        let project = match form.to_project(id.clone(), now) {
            Ok(project) => project,
            Err(errors) => {
                tracing::warn!(errors = errors.len(), "submitted request is incomplete");
                return None;
            }
        };
        if let Err(err) = self.requests.repo.insert(project.clone()) {
            tracing::warn!(%err, "could not add submission to requests");
            return None;
        }
        if let Err(err) = self.my_projects.repo.insert(project) {
            tracing::warn!(%err, "could not add submission to my projects");
        }
        tracing::info!(id = %id, "onboarding request recorded");
        Some(id)
    }

    pub fn apply_mutation(&mut self, mutation: StateMutation, now: DateTime<Utc>) {
        match mutation {
            StateMutation::DeleteToken { project_id } => self.tokens.delete(&project_id),
            StateMutation::CancelProject { id } => self.my_projects.cancel(&id, now),
            StateMutation::RejectRequest { id, reason } => self.requests.reject(&id, &reason, now),
        }
    }
}

/// Next element of `order` after `current`, wrapping in either direction.
pub(crate) fn cycle<T: Copy + PartialEq>(order: &[T], current: T, forward: bool) -> T {
    let Some(idx) = order.iter().position(|item| *item == current) else {
        return order.first().copied().unwrap_or(current);
    };
    let len = order.len();
    let next = if forward { (idx + 1) % len } else { (idx + len - 1) % len };
    order[next]
}

/// Steps through "all" (`None`) followed by each option.
pub(crate) fn cycle_filter<T: Copy + PartialEq>(
    options: &[T],
    current: Option<T>,
    forward: bool,
) -> Option<T> {
    let mut all: Vec<Option<T>> = vec![None];
    all.extend(options.iter().copied().map(Some));
    cycle(&all, current, forward)
}

pub(crate) fn filter_label<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "All".to_string(), |v| v.to_string())
}

pub(crate) fn status_style(status: ProjectStatus) -> Style {
    let color = match status {
        ProjectStatus::Waiting => Color::Yellow,
        ProjectStatus::Accepted | ProjectStatus::Enabled => Color::Green,
        ProjectStatus::Working => Color::Blue,
        ProjectStatus::Inactive | ProjectStatus::Cancelled => Color::DarkGray,
        ProjectStatus::Denied => Color::Red,
    };
    Style::default().fg(color)
}

/// `Page 2 / 3 (14 items)`, with arrows when more pages exist.
pub(crate) fn page_footer<T>(page: &Page<T>) -> Line<'static> {
    let dim = Style::default().fg(Color::DarkGray);
    let prev = if page.has_prev() { "◀ " } else { "  " };
    let next = if page.has_next() { " ▶" } else { "  " };
    Line::from(vec![
        Span::styled(prev, dim),
        Span::raw(format!(
            "Page {} ({} items)",
            page.position_label(),
            page.total_items
        )),
        Span::styled(next, dim),
    ])
}

/// Selection and page position inside a paginated list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ListCursor {
    pub page: usize,
    pub selected: usize,
}

impl Default for ListCursor {
    fn default() -> Self {
        Self {
            page: 1,
            selected: 0,
        }
    }
}

impl ListCursor {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Handles row and page navigation. Returns `true` if the key was used.
    pub fn navigate(&mut self, key: KeyEvent, rows: usize, total_pages: usize) -> bool {
        match key.code {
            KeyCode::Up => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down => {
                if self.selected + 1 < rows {
                    self.selected += 1;
                }
            }
            KeyCode::PageDown => {
                if self.page < total_pages {
                    self.page += 1;
                    self.selected = 0;
                }
            }
            KeyCode::PageUp => {
                if self.page > 1 {
                    self.page -= 1;
                    self.selected = 0;
                }
            }
            _ => return false,
        }
        true
    }

    /// Brings the cursor back inside a page after the data changed.
    pub fn sync<T>(&mut self, page: &Page<T>) {
        self.page = page.page;
        self.selected = self.selected.min(page.items.len().saturating_sub(1));
    }
}
