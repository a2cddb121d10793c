//! Admin management of per-project review tokens.
//!
//! The list, filters and paging are local to the panel. The side editor is
//! driven by the shared store (`show_side_panel`, `editing_token`,
//! `token_form`) so it survives tab switches.

use chrono::{DateTime, Utc};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap};
use rdash_core::store::{MemoryRepository, Page, PageRequest, Repository, StoreResult, TokenQuery};
use rdash_core::token::{Token, TokenDraft, TokenDraftPatch, ValidationStatus};

use super::{ListCursor, PanelContext, PanelUpdate, cycle, cycle_filter, filter_label, page_footer};
use crate::common::{edit_line, field_line, mask_secret};
use crate::dashboard::Action;
use crate::overlays::OverlayRequest;
use crate::overlays::render_utils::{InputHint, hints_line};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokensFocus {
    #[default]
    ProjectId,
    Email,
    Status,
    List,
}

const FOCUS_ORDER: [TokensFocus; 4] = [
    TokensFocus::ProjectId,
    TokensFocus::Email,
    TokensFocus::Status,
    TokensFocus::List,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenField {
    #[default]
    ProjectId,
    Token,
    Email,
}

const FIELD_ORDER: [TokenField; 3] = [TokenField::ProjectId, TokenField::Token, TokenField::Email];

#[derive(Debug)]
pub struct TokensPanel {
    pub repo: MemoryRepository<Token>,
    pub query: TokenQuery,
    pub focus: TokensFocus,
    pub field: TokenField,
    /// Save failure shown in the editor.
    pub form_error: Option<String>,
    per_page: usize,
    cursor: ListCursor,
}

fn clear_form() -> Action {
    Action::UpdateForm(TokenDraftPatch {
        project_id: Some(String::new()),
        token: Some(String::new()),
        email: Some(String::new()),
    })
}

fn fill_form(draft: TokenDraft) -> Action {
    Action::UpdateForm(TokenDraftPatch {
        project_id: Some(draft.project_id),
        token: Some(draft.token),
        email: Some(draft.email),
    })
}

impl TokensPanel {
    /// # Errors
    /// Returns an error on duplicate project ids.
    pub fn new(tokens: Vec<Token>, per_page: usize) -> StoreResult<Self> {
        Ok(Self {
            repo: MemoryRepository::from_records(tokens)?,
            query: TokenQuery::default(),
            focus: TokensFocus::default(),
            field: TokenField::default(),
            form_error: None,
            per_page,
            cursor: ListCursor::default(),
        })
    }

    pub fn page(&self) -> Page<Token> {
        self.repo
            .list(&self.query, PageRequest::new(self.cursor.page, self.per_page))
    }

    pub fn delete(&mut self, project_id: &str) {
        match self.repo.remove(project_id) {
            Ok(_) => tracing::info!(project_id, "token deleted"),
            Err(err) => tracing::warn!(%err, "token delete failed"),
        }
        let page = self.page();
        self.cursor.sync(&page);
    }

    /// Creates or updates a token from the editor draft.
    ///
    /// # Errors
    /// Returns a message for invalid drafts and duplicate project ids.
    pub fn save(
        &mut self,
        editing: Option<&Token>,
        draft: &TokenDraft,
        now: DateTime<Utc>,
    ) -> Result<(), String> {
        draft.validate().map_err(|err| err.to_string())?;
        if let Some(existing) = editing {
            self.repo
                .modify(&existing.project_id, |t| t.apply_edit(draft, now))
                .map_err(|err| err.to_string())?;
            tracing::info!(project_id = %existing.project_id, "token updated");
        } else {
            let token = Token::create(draft.clone(), now);
            let project_id = token.project_id.clone();
            self.repo.insert(token).map_err(|err| err.to_string())?;
            tracing::info!(%project_id, "token created");
        }
        let page = self.page();
        self.cursor.sync(&page);
        Ok(())
    }

    fn open_editor(&mut self, ctx: &PanelContext<'_>, token: Option<Token>) -> PanelUpdate {
        self.form_error = None;
        self.field = if token.is_some() {
            TokenField::Token
        } else {
            TokenField::ProjectId
        };
        let form = token.as_ref().map_or_else(clear_form, |t| fill_form(TokenDraft::from(t)));
        let mut actions = vec![Action::SetEditingToken(token), form];
        if !ctx.dashboard.show_side_panel {
            actions.push(Action::ToggleSidePanel);
        }
        PanelUpdate::actions(actions)
    }

    fn close_editor(&mut self) -> Vec<Action> {
        self.form_error = None;
        vec![
            Action::ToggleSidePanel,
            Action::SetEditingToken(None),
            clear_form(),
        ]
    }

    pub fn handle_key(&mut self, ctx: &PanelContext<'_>, key: KeyEvent, now: DateTime<Utc>) -> PanelUpdate {
        if ctx.dashboard.show_side_panel {
            return self.handle_editor_key(ctx, key, now);
        }

        match key.code {
            KeyCode::Tab => {
                self.focus = cycle(&FOCUS_ORDER, self.focus, true);
                return PanelUpdate::none();
            }
            KeyCode::BackTab => {
                self.focus = cycle(&FOCUS_ORDER, self.focus, false);
                return PanelUpdate::none();
            }
            KeyCode::Char('n') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return self.open_editor(ctx, None);
            }
            _ => {}
        }

        match self.focus {
            TokensFocus::ProjectId => {
                if let Some(v) = edit_line(&self.query.project_id, key) {
                    self.query.project_id = v;
                    self.cursor.reset();
                }
            }
            TokensFocus::Email => {
                if let Some(v) = edit_line(&self.query.email, key) {
                    self.query.email = v;
                    self.cursor.reset();
                }
            }
            TokensFocus::Status => {
                let forward = match key.code {
                    KeyCode::Right | KeyCode::Char(' ') => true,
                    KeyCode::Left => false,
                    _ => return PanelUpdate::none(),
                };
                self.query.status = cycle_filter(&ValidationStatus::ALL, self.query.status, forward);
                self.cursor.reset();
            }
            TokensFocus::List => {
                let page = self.page();
                if self.cursor.navigate(key, page.items.len(), page.total_pages) {
                    return PanelUpdate::none();
                }
                if key.code == KeyCode::Char('n') {
                    return self.open_editor(ctx, None);
                }
                let Some(token) = page.items.get(self.cursor.selected) else {
                    return PanelUpdate::none();
                };
                match key.code {
                    KeyCode::Char('e') | KeyCode::Enter => {
                        return self.open_editor(ctx, Some(token.clone()));
                    }
                    KeyCode::Char('d') | KeyCode::Delete => {
                        return PanelUpdate::open(OverlayRequest::ConfirmDeleteToken {
                            project_id: token.project_id.clone(),
                        });
                    }
                    _ => {}
                }
            }
        }
        PanelUpdate::none()
    }

    fn handle_editor_key(&mut self, ctx: &PanelContext<'_>, key: KeyEvent, now: DateTime<Utc>) -> PanelUpdate {
        let dashboard = ctx.dashboard;
        let editing = dashboard.editing_token.as_ref();
        // The project id identifies an existing token and stays fixed.
        let fields: &[TokenField] = if editing.is_some() {
            &FIELD_ORDER[1..]
        } else {
            &FIELD_ORDER
        };

        match key.code {
            KeyCode::Esc => PanelUpdate::actions(self.close_editor()),
            KeyCode::Tab | KeyCode::Down => {
                self.field = cycle(fields, self.field, true);
                PanelUpdate::none()
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.field = cycle(fields, self.field, false);
                PanelUpdate::none()
            }
            KeyCode::Enter => match self.save(editing, &dashboard.token_form, now) {
                Ok(()) => PanelUpdate::actions(self.close_editor()),
                Err(message) => {
                    self.form_error = Some(message);
                    PanelUpdate::none()
                }
            },
            _ => {
                let form = &dashboard.token_form;
                let (current, wrap): (&str, fn(String) -> TokenDraftPatch) = match self.field {
                    TokenField::ProjectId if editing.is_some() => return PanelUpdate::none(),
                    TokenField::ProjectId => (form.project_id.as_str(), |v| TokenDraftPatch {
                        project_id: Some(v),
                        ..TokenDraftPatch::default()
                    }),
                    TokenField::Token => (form.token.as_str(), |v| TokenDraftPatch {
                        token: Some(v),
                        ..TokenDraftPatch::default()
                    }),
                    TokenField::Email => (form.email.as_str(), |v| TokenDraftPatch {
                        email: Some(v),
                        ..TokenDraftPatch::default()
                    }),
                };
                edit_line(current, key).map_or_else(PanelUpdate::none, |v| {
                    self.form_error = None;
                    PanelUpdate::action(Action::UpdateForm(wrap(v)))
                })
            }
        }
    }

    pub fn render(&self, ctx: &PanelContext<'_>, frame: &mut Frame, area: Rect) {
        let dashboard = ctx.dashboard;
        let (list_area, side_area) = if dashboard.show_side_panel {
            let [list, side] =
                Layout::horizontal([Constraint::Fill(3), Constraint::Fill(2)]).areas(area);
            (list, Some(side))
        } else {
            (area, None)
        };
        self.render_list(frame, list_area);
        if let Some(side) = side_area {
            self.render_editor(ctx, frame, side);
        }
    }

    fn render_list(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Token Management ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [filters, table_area, footer] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .areas(inner);

        let status = filter_label(self.query.status);
        frame.render_widget(
            Paragraph::new(vec![
                field_line(
                    "Project ID",
                    &self.query.project_id,
                    "filter",
                    self.focus == TokensFocus::ProjectId,
                ),
                field_line("Email", &self.query.email, "filter", self.focus == TokensFocus::Email),
                field_line("Status", &status, "", self.focus == TokensFocus::Status),
            ]),
            filters,
        );

        let page = self.page();
        let rows = page.items.iter().enumerate().map(|(i, t)| {
            let style = if self.focus == TokensFocus::List && i == self.cursor.selected {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            let status_color = match t.validation_status {
                ValidationStatus::Valid => Color::Green,
                ValidationStatus::Invalid => Color::Red,
                ValidationStatus::Pending => Color::Yellow,
            };
            Row::new(vec![
                Cell::from(t.project_id.clone()),
                Cell::from(mask_secret(&t.token)),
                Cell::from(t.email.clone()),
                Cell::from(Span::styled(
                    t.validation_status.label(),
                    Style::default().fg(status_color),
                )),
                Cell::from(t.last_validation_date.format("%Y-%m-%d").to_string()),
            ])
            .style(style)
        });
        frame.render_widget(
            Table::new(
                rows,
                [
                    Constraint::Length(12),
                    Constraint::Length(12),
                    Constraint::Fill(1),
                    Constraint::Length(9),
                    Constraint::Length(11),
                ],
            )
            .header(
                Row::new(["Project", "Token", "Email", "Status", "Validated"])
                    .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            ),
            table_area,
        );

        let hints = [
            InputHint::new("n", "new"),
            InputHint::new("e", "edit"),
            InputHint::new("d", "delete"),
            InputHint::new("PgUp/PgDn", "page"),
        ];
        frame.render_widget(
            Paragraph::new(vec![page_footer(&page), hints_line(&hints, Color::Cyan)]),
            footer,
        );
    }

    fn render_editor(&self, ctx: &PanelContext<'_>, frame: &mut Frame, area: Rect) {
        let dashboard = ctx.dashboard;
        let title = if dashboard.editing_token.is_some() {
            " Edit token "
        } else {
            " New token "
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta))
            .title(title);
        let inner = block.inner(area);
        frame.render_widget(Clear, area);
        frame.render_widget(block, area);

        let form = &dashboard.token_form;
        let token_shown = if self.field == TokenField::Token {
            form.token.clone()
        } else {
            mask_secret(&form.token)
        };
        let mut lines = vec![
            field_line(
                "Project ID",
                &form.project_id,
                "project-1",
                self.field == TokenField::ProjectId,
            ),
            field_line("Token", &token_shown, "secret", self.field == TokenField::Token),
            field_line(
                "Email",
                &form.email,
                "dev@company.com",
                self.field == TokenField::Email,
            ),
            Line::default(),
        ];
        if let Some(error) = &self.form_error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
            lines.push(Line::default());
        }
        let hints = [
            InputHint::new("Enter", "save"),
            InputHint::new("Tab", "next"),
            InputHint::new("Esc", "close"),
        ];
        lines.push(hints_line(&hints, Color::Magenta));
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
    }
}
