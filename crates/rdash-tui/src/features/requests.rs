//! Admin review of onboarding requests.

use chrono::{DateTime, Utc};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use rdash_core::project::Project;
use rdash_core::status::ProjectStatus;
use rdash_core::store::{
    MemoryRepository, Page, PageRequest, ProjectQuery, Repository, StoreResult, TeamSizeBucket,
};

use super::{ListCursor, PanelUpdate, cycle, cycle_filter, filter_label, page_footer, status_style};
use crate::common::{edit_line, field_line, truncate_with_ellipsis};
use crate::overlays::OverlayRequest;
use crate::overlays::render_utils::{InputHint, hints_line};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestsFocus {
    #[default]
    Name,
    Status,
    TeamSize,
    List,
}

const FOCUS_ORDER: [RequestsFocus; 4] = [
    RequestsFocus::Name,
    RequestsFocus::Status,
    RequestsFocus::TeamSize,
    RequestsFocus::List,
];

#[derive(Debug)]
pub struct RequestsPanel {
    pub repo: MemoryRepository<Project>,
    pub query: ProjectQuery,
    pub focus: RequestsFocus,
    per_page: usize,
    cursor: ListCursor,
}

impl RequestsPanel {
    /// # Errors
    /// Returns an error on duplicate request ids.
    pub fn new(requests: Vec<Project>, per_page: usize) -> StoreResult<Self> {
        Ok(Self {
            repo: MemoryRepository::from_records(requests)?,
            query: ProjectQuery::default(),
            focus: RequestsFocus::default(),
            per_page,
            cursor: ListCursor::default(),
        })
    }

    pub fn page(&self) -> Page<Project> {
        self.repo
            .list(&self.query, PageRequest::new(self.cursor.page, self.per_page))
    }

    fn is_waiting(&self, id: &str) -> bool {
        self.repo
            .get(id)
            .is_some_and(|p| p.status == ProjectStatus::Waiting)
    }

    /// Accepts a waiting request.
    pub fn approve(&mut self, id: &str, now: DateTime<Utc>) {
        if !self.is_waiting(id) {
            return;
        }
        if let Err(err) = self
            .repo
            .modify(id, |p| p.set_status(ProjectStatus::Accepted, now))
        {
            tracing::warn!(%err, "approve failed");
            return;
        }
        tracing::info!(id, "request approved");
        self.resync();
    }

    /// Denies a waiting request. An empty reason is stored as none.
    pub fn reject(&mut self, id: &str, reason: &str, now: DateTime<Utc>) {
        if !self.is_waiting(id) {
            return;
        }
        let reason = reason.trim();
        let reason = (!reason.is_empty()).then(|| reason.to_string());
        if let Err(err) = self.repo.modify(id, |p| {
            p.set_status(ProjectStatus::Denied, now);
            p.reject_reason = reason;
        }) {
            tracing::warn!(%err, "reject failed");
            return;
        }
        tracing::info!(id, "request denied");
        self.resync();
    }

    fn resync(&mut self) {
        let page = self.page();
        self.cursor.sync(&page);
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: DateTime<Utc>) -> PanelUpdate {
        match key.code {
            KeyCode::Tab => {
                self.focus = cycle(&FOCUS_ORDER, self.focus, true);
                return PanelUpdate::none();
            }
            KeyCode::BackTab => {
                self.focus = cycle(&FOCUS_ORDER, self.focus, false);
                return PanelUpdate::none();
            }
            _ => {}
        }

        let forward = match key.code {
            KeyCode::Right | KeyCode::Char(' ') => Some(true),
            KeyCode::Left => Some(false),
            _ => None,
        };

        match self.focus {
            RequestsFocus::Name => {
                if let Some(name) = edit_line(&self.query.name, key) {
                    self.query.name = name;
                    self.cursor.reset();
                }
            }
            RequestsFocus::Status => {
                if let Some(forward) = forward {
                    self.query.status =
                        cycle_filter(&ProjectStatus::REQUEST, self.query.status, forward);
                    self.cursor.reset();
                }
            }
            RequestsFocus::TeamSize => {
                if let Some(forward) = forward {
                    self.query.team_size =
                        cycle_filter(&TeamSizeBucket::ALL, self.query.team_size, forward);
                    self.cursor.reset();
                }
            }
            RequestsFocus::List => {
                let page = self.page();
                if self.cursor.navigate(key, page.items.len(), page.total_pages) {
                    return PanelUpdate::none();
                }
                let Some(request) = page.items.get(self.cursor.selected) else {
                    return PanelUpdate::none();
                };
                let waiting = request.status == ProjectStatus::Waiting;
                match key.code {
                    KeyCode::Enter => {
                        return PanelUpdate::open(OverlayRequest::ProjectDetail(request.clone()));
                    }
                    KeyCode::Char('a') if waiting => self.approve(&request.id, now),
                    KeyCode::Char('r') if waiting => {
                        return PanelUpdate::open(OverlayRequest::RejectReason {
                            id: request.id.clone(),
                            name: request.name.clone(),
                        });
                    }
                    _ => {}
                }
            }
        }
        PanelUpdate::none()
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Request Management ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [filters, table_area, footer] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .areas(inner);

        let status = filter_label(self.query.status);
        let team = filter_label(self.query.team_size);
        frame.render_widget(
            Paragraph::new(vec![
                field_line(
                    "Project name",
                    &self.query.name,
                    "search by name",
                    self.focus == RequestsFocus::Name,
                ),
                field_line("Status", &status, "", self.focus == RequestsFocus::Status),
                field_line("Team size", &team, "", self.focus == RequestsFocus::TeamSize),
            ]),
            filters,
        );

        let page = self.page();
        let width = table_area.width.saturating_sub(50) as usize;
        let rows = page.items.iter().enumerate().map(|(i, p)| {
            let style = if self.focus == RequestsFocus::List && i == self.cursor.selected {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(p.name.clone()),
                Cell::from(truncate_with_ellipsis(&p.repository_url, width.max(10))),
                Cell::from(Span::styled(p.status.label(), status_style(p.status))),
                Cell::from(p.team_size.to_string()),
                Cell::from(format!("{}m", p.expected_duration_months)),
                Cell::from(p.created_at.format("%Y-%m-%d").to_string()),
            ])
            .style(style)
        });
        let table = Table::new(
            rows,
            [
                Constraint::Length(14),
                Constraint::Fill(1),
                Constraint::Length(10),
                Constraint::Length(5),
                Constraint::Length(5),
                Constraint::Length(11),
            ],
        )
        .header(
            Row::new(["Project", "Repository", "Status", "Team", "Term", "Requested"])
                .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        );
        frame.render_widget(table, table_area);

        let hints = [
            InputHint::new("Tab", "focus"),
            InputHint::new("a", "approve"),
            InputHint::new("r", "reject"),
            InputHint::new("Enter", "details"),
            InputHint::new("PgUp/PgDn", "page"),
        ];
        frame.render_widget(
            Paragraph::new(vec![page_footer(&page), hints_line(&hints, Color::Cyan)]),
            footer,
        );
    }
}
