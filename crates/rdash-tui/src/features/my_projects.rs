//! The signed-in user's projects.

use chrono::{DateTime, Utc};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use rdash_core::project::Project;
use rdash_core::status::ProjectStatus;
use rdash_core::store::{MemoryRepository, Page, PageRequest, ProjectQuery, Repository, StoreResult};

use super::{ListCursor, PanelUpdate, cycle, cycle_filter, filter_label, page_footer, status_style};
use crate::common::{edit_line, field_line};
use crate::overlays::OverlayRequest;
use crate::overlays::render_utils::{InputHint, hints_line};

const PAGE_SIZE: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MyProjectsFocus {
    #[default]
    Search,
    Status,
    List,
}

const FOCUS_ORDER: [MyProjectsFocus; 3] = [
    MyProjectsFocus::Search,
    MyProjectsFocus::Status,
    MyProjectsFocus::List,
];

#[derive(Debug)]
pub struct MyProjectsPanel {
    pub repo: MemoryRepository<Project>,
    pub query: ProjectQuery,
    pub focus: MyProjectsFocus,
    cursor: ListCursor,
}

impl MyProjectsPanel {
    /// # Errors
    /// Returns an error on duplicate project ids.
    pub fn new(projects: Vec<Project>) -> StoreResult<Self> {
        Ok(Self {
            repo: MemoryRepository::from_records(projects)?,
            query: ProjectQuery::default(),
            focus: MyProjectsFocus::default(),
            cursor: ListCursor::default(),
        })
    }

    pub fn page(&self) -> Page<Project> {
        self.repo
            .list(&self.query, PageRequest::new(self.cursor.page, PAGE_SIZE))
    }

    pub fn selected(&self) -> Option<Project> {
        self.page().items.get(self.cursor.selected).cloned()
    }

    /// Withdraws a project that has not started onboarding yet.
    pub fn cancel(&mut self, id: &str, now: DateTime<Utc>) {
        let cancellable = self.repo.get(id).is_some_and(|p| p.status.is_cancellable());
        if !cancellable {
            tracing::warn!(id, "project cannot be cancelled in its current status");
            return;
        }
        match self
            .repo
            .modify(id, |p| p.set_status(ProjectStatus::Cancelled, now))
        {
            Ok(_) => tracing::info!(id, "project cancelled"),
            Err(err) => tracing::warn!(%err, "cancel failed"),
        }
        let page = self.page();
        self.cursor.sync(&page);
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> PanelUpdate {
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

        match self.focus {
            MyProjectsFocus::Search => {
                if let Some(name) = edit_line(&self.query.name, key) {
                    self.query.name = name;
                    self.cursor.reset();
                }
            }
            MyProjectsFocus::Status => {
                let forward = match key.code {
                    KeyCode::Right | KeyCode::Char(' ') => true,
                    KeyCode::Left => false,
                    _ => return PanelUpdate::none(),
                };
                self.query.status = cycle_filter(&ProjectStatus::ALL, self.query.status, forward);
                self.cursor.reset();
            }
            MyProjectsFocus::List => {
                let page = self.page();
                if self.cursor.navigate(key, page.items.len(), page.total_pages) {
                    return PanelUpdate::none();
                }
                let Some(project) = page.items.get(self.cursor.selected) else {
                    return PanelUpdate::none();
                };
                match key.code {
                    KeyCode::Enter => {
                        return PanelUpdate::open(OverlayRequest::ProjectDetail(project.clone()));
                    }
                    KeyCode::Char('c') if project.status.is_cancellable() => {
                        return PanelUpdate::open(OverlayRequest::ConfirmCancelProject {
                            id: project.id.clone(),
                            name: project.name.clone(),
                        });
                    }
                    _ => {}
                }
            }
        }
        PanelUpdate::none()
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title(" My Projects ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [filters, table_area, footer] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .areas(inner);

        let status = filter_label(self.query.status);
        frame.render_widget(
            Paragraph::new(vec![
                field_line(
                    "Search",
                    &self.query.name,
                    "project name",
                    self.focus == MyProjectsFocus::Search,
                ),
                field_line(
                    "Status",
                    &status,
                    "",
                    self.focus == MyProjectsFocus::Status,
                ),
            ]),
            filters,
        );

        let page = self.page();
        let rows = page.items.iter().enumerate().map(|(i, p)| {
            let style = if self.focus == MyProjectsFocus::List && i == self.cursor.selected {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(p.name.clone()),
                Cell::from(Span::styled(p.status.label(), status_style(p.status))),
                Cell::from(format!("{} months", p.expected_duration_months)),
                Cell::from(p.team_size.to_string()),
                Cell::from(p.updated_at.format("%Y-%m-%d").to_string()),
            ])
            .style(style)
        });
        let table = Table::new(
            rows,
            [
                Constraint::Fill(2),
                Constraint::Length(12),
                Constraint::Length(10),
                Constraint::Length(5),
                Constraint::Length(11),
            ],
        )
        .header(
            Row::new(["Project", "Status", "Duration", "Team", "Updated"])
                .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        );
        if page.items.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    "No projects match the filters.",
                    Style::default().fg(Color::DarkGray),
                )),
                table_area,
            );
        } else {
            frame.render_widget(table, table_area);
        }

        let hints = [
            InputHint::new("Tab", "focus"),
            InputHint::new("Enter", "details"),
            InputHint::new("c", "cancel"),
            InputHint::new("PgUp/PgDn", "page"),
        ];
        frame.render_widget(
            Paragraph::new(vec![page_footer(&page), hints_line(&hints, Color::Cyan)]),
            footer,
        );
    }
}

/// Detail lines for one project, shared with the detail overlay.
pub fn detail_lines(project: &Project) -> Vec<Line<'static>> {
    let label = |text: &str| Span::styled(format!("{text:<18}"), Style::default().fg(Color::Gray));
    let mut lines = vec![
        Line::from(vec![label("Status"), Span::styled(project.status.label(), status_style(project.status))]),
        Line::from(vec![label("Repository"), Span::raw(project.repository_url.clone())]),
        Line::from(vec![label("Description"), Span::raw(project.description.clone())]),
        Line::from(vec![label("Purpose"), Span::raw(project.purpose.clone())]),
        Line::from(vec![
            label("Duration"),
            Span::raw(format!("{} months", project.expected_duration_months)),
        ]),
        Line::from(vec![label("Team size"), Span::raw(project.team_size.to_string())]),
        Line::from(vec![
            label("Requested"),
            Span::raw(project.created_at.format("%Y-%m-%d").to_string()),
        ]),
        Line::from(vec![
            label("Last update"),
            Span::raw(project.updated_at.format("%Y-%m-%d").to_string()),
        ]),
    ];
    if let Some(reason) = &project.reject_reason {
        lines.push(Line::from(vec![
            label("Reason"),
            Span::styled(reason.clone(), Style::default().fg(Color::Red)),
        ]));
    }
    lines
}
