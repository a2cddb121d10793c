//! Admin overview of projects using the review system.

use chrono::{DateTime, Utc};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use rdash_core::project::Project;
use rdash_core::status::ProjectStatus;
use rdash_core::store::{MemoryRepository, Page, PageRequest, ProjectQuery, Repository, StoreResult};

use super::{ListCursor, PanelUpdate, cycle, cycle_filter, filter_label, page_footer, status_style};
use crate::common::{edit_line, field_line};
use crate::overlays::OverlayRequest;
use crate::overlays::render_utils::{InputHint, hints_line};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectsFocus {
    #[default]
    Name,
    Status,
    List,
}

const FOCUS_ORDER: [ProjectsFocus; 3] = [ProjectsFocus::Name, ProjectsFocus::Status, ProjectsFocus::List];

#[derive(Debug)]
pub struct ProjectsPanel {
    pub repo: MemoryRepository<Project>,
    pub query: ProjectQuery,
    pub focus: ProjectsFocus,
    per_page: usize,
    cursor: ListCursor,
}

impl ProjectsPanel {
    /// # Errors
    /// Returns an error on duplicate project ids.
    pub fn new(projects: Vec<Project>, per_page: usize) -> StoreResult<Self> {
        Ok(Self {
            repo: MemoryRepository::from_records(projects)?,
            query: ProjectQuery::default(),
            focus: ProjectsFocus::default(),
            per_page,
            cursor: ListCursor::default(),
        })
    }

    pub fn page(&self) -> Page<Project> {
        self.repo
            .list(&self.query, PageRequest::new(self.cursor.page, self.per_page))
    }

    /// Switches a project to `status`. Re-applying the current status is a no-op.
    pub fn set_status(&mut self, id: &str, status: ProjectStatus, now: DateTime<Utc>) {
        if self.repo.get(id).is_none_or(|p| p.status == status) {
            return;
        }
        match self.repo.modify(id, |p| p.set_status(status, now)) {
            Ok(_) => tracing::info!(id, status = status.as_str(), "project status changed"),
            Err(err) => tracing::warn!(%err, "status change failed"),
        }
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

        match self.focus {
            ProjectsFocus::Name => {
                if let Some(name) = edit_line(&self.query.name, key) {
                    self.query.name = name;
                    self.cursor.reset();
                }
            }
            ProjectsFocus::Status => {
                let forward = match key.code {
                    KeyCode::Right | KeyCode::Char(' ') => true,
                    KeyCode::Left => false,
                    _ => return PanelUpdate::none(),
                };
                self.query.status = cycle_filter(&ProjectStatus::MANAGED, self.query.status, forward);
                self.cursor.reset();
            }
            ProjectsFocus::List => {
                let page = self.page();
                if self.cursor.navigate(key, page.items.len(), page.total_pages) {
                    return PanelUpdate::none();
                }
                let Some(project) = page.items.get(self.cursor.selected) else {
                    return PanelUpdate::none();
                };
                let target = match key.code {
                    KeyCode::Enter => {
                        return PanelUpdate::open(OverlayRequest::ProjectDetail(project.clone()));
                    }
                    KeyCode::Char('e') => ProjectStatus::Enabled,
                    KeyCode::Char('d') => ProjectStatus::Inactive,
                    KeyCode::Char('w') => ProjectStatus::Waiting,
                    _ => return PanelUpdate::none(),
                };
                self.set_status(&project.id, target, now);
            }
        }
        PanelUpdate::none()
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Project Management ");
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
                    "Project name",
                    &self.query.name,
                    "search by name",
                    self.focus == ProjectsFocus::Name,
                ),
                field_line("Status", &status, "", self.focus == ProjectsFocus::Status),
            ]),
            filters,
        );

        let page = self.page();
        let rows = page.items.iter().enumerate().map(|(i, p)| {
            let style = if self.focus == ProjectsFocus::List && i == self.cursor.selected {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            let last_activity = p
                .last_activity
                .map_or_else(|| "-".to_string(), |t| t.format("%Y-%m-%d %H:%M").to_string());
            Row::new(vec![
                Cell::from(p.name.clone()),
                Cell::from(Span::styled(p.status.label(), status_style(p.status))),
                Cell::from(p.usage_count.to_string()),
                Cell::from(p.team_size.to_string()),
                Cell::from(p.created_at.format("%Y-%m-%d").to_string()),
                Cell::from(last_activity),
            ])
            .style(style)
        });
        let table = Table::new(
            rows,
            [
                Constraint::Fill(1),
                Constraint::Length(10),
                Constraint::Length(7),
                Constraint::Length(5),
                Constraint::Length(11),
                Constraint::Length(17),
            ],
        )
        .header(
            Row::new(["Project", "Status", "Usage", "Team", "Started", "Last activity"])
                .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        );
        frame.render_widget(table, table_area);

        let hints = [
            InputHint::new("e", "activate"),
            InputHint::new("d", "deactivate"),
            InputHint::new("w", "mark waiting"),
            InputHint::new("Enter", "details"),
            InputHint::new("PgUp/PgDn", "page"),
        ];
        frame.render_widget(
            Paragraph::new(vec![page_footer(&page), hints_line(&hints, Color::Cyan)]),
            footer,
        );
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;
    use rdash_core::seed;

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn panel() -> ProjectsPanel {
        let mut rng = seed::rng_from(Some(9));
        ProjectsPanel::new(seed::managed_projects(&mut rng, Utc::now()), 5).unwrap()
    }

    #[test]
    fn test_status_keys_on_selected_row() {
        let mut panel = panel();
        panel.focus = ProjectsFocus::List;
        let id = panel.page().items[0].id.clone();
        let now = Utc::now();

        panel.handle_key(key(KeyCode::Char('d')), now);
        assert_eq!(panel.repo.get(&id).unwrap().status, ProjectStatus::Inactive);
        panel.handle_key(key(KeyCode::Char('e')), now);
        assert_eq!(panel.repo.get(&id).unwrap().status, ProjectStatus::Enabled);
        panel.handle_key(key(KeyCode::Char('w')), now);
        assert_eq!(panel.repo.get(&id).unwrap().status, ProjectStatus::Waiting);
        assert_eq!(panel.repo.get(&id).unwrap().updated_at, now);
    }

    #[test]
    fn test_last_page_holds_remainder() {
        let mut panel = panel();
        panel.focus = ProjectsFocus::List;
        for _ in 0..10 {
            panel.handle_key(key(KeyCode::PageDown), Utc::now());
        }
        let page = panel.page();
        assert_eq!(page.page, 4);
        assert_eq!(page.items.len(), 5);
        assert!(!page.has_next());
    }
}
