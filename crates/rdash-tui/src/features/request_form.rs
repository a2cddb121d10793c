//! Onboarding request form.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use rdash_core::request::{DURATION_OPTIONS, FieldError, FormField, RequestFormPatch, next_duration};

use super::{PanelContext, PanelUpdate, cycle};
use crate::common::{edit_line, field_line};
use crate::dashboard::Action;
use crate::overlays::render_utils::{InputHint, hints_line};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormFocus {
    Field(FormField),
    Submit,
}

const FOCUS_ORDER: [FormFocus; 7] = [
    FormFocus::Field(FormField::ProjectName),
    FormFocus::Field(FormField::RepositoryUrl),
    FormFocus::Field(FormField::Description),
    FormFocus::Field(FormField::Purpose),
    FormFocus::Field(FormField::ExpectedDuration),
    FormFocus::Field(FormField::TeamSize),
    FormFocus::Submit,
];

#[derive(Debug)]
pub struct RequestFormPanel {
    pub focus: FormFocus,
    /// Errors from the last submit attempt.
    pub errors: Vec<FieldError>,
}

impl Default for RequestFormPanel {
    fn default() -> Self {
        Self {
            focus: FOCUS_ORDER[0],
            errors: Vec::new(),
        }
    }
}

fn patch_for(field: FormField, value: String) -> RequestFormPatch {
    let mut patch = RequestFormPatch::default();
    let slot = match field {
        FormField::ProjectName => &mut patch.project_name,
        FormField::RepositoryUrl => &mut patch.repository_url,
        FormField::Description => &mut patch.description,
        FormField::Purpose => &mut patch.purpose,
        FormField::ExpectedDuration => &mut patch.expected_duration,
        FormField::TeamSize => &mut patch.team_size,
    };
    *slot = Some(value);
    patch
}

fn previous_duration(current: &str) -> &'static str {
    // Two steps forward over three options is one step back.
    next_duration(next_duration(current))
}

impl RequestFormPanel {
    pub fn error_for(&self, field: FormField) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field() == field)
    }

    pub fn handle_key(&mut self, ctx: &PanelContext<'_>, key: KeyEvent) -> PanelUpdate {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.focus = cycle(&FOCUS_ORDER, self.focus, true);
                return PanelUpdate::none();
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = cycle(&FOCUS_ORDER, self.focus, false);
                return PanelUpdate::none();
            }
            KeyCode::Char('s') if ctrl => return self.submit(ctx),
            KeyCode::Enter => {
                if self.focus == FormFocus::Submit {
                    return self.submit(ctx);
                }
                self.focus = cycle(&FOCUS_ORDER, self.focus, true);
                return PanelUpdate::none();
            }
            _ => {}
        }

        let FormFocus::Field(field) = self.focus else {
            return PanelUpdate::none();
        };
        let form = &ctx.dashboard.request_form;

        let value = if field == FormField::ExpectedDuration {
            let duration = match key.code {
                KeyCode::Right | KeyCode::Char(' ') => next_duration(&form.expected_duration),
                KeyCode::Left => previous_duration(&form.expected_duration),
                _ => return PanelUpdate::none(),
            };
            duration.to_string()
        } else {
            let Some(value) = edit_line(form.get(field), key) else {
                return PanelUpdate::none();
            };
            if field == FormField::TeamSize && !value.chars().all(|c| c.is_ascii_digit()) {
                return PanelUpdate::none();
            }
            value
        };

        self.errors.retain(|e| e.field() != field);
        PanelUpdate::action(Action::UpdateRequestForm(patch_for(field, value)))
    }

    fn submit(&mut self, ctx: &PanelContext<'_>) -> PanelUpdate {
        self.errors = ctx.dashboard.request_form.validate();
        if let Some(first) = self.errors.first() {
            self.focus = FormFocus::Field(first.field());
            return PanelUpdate::none();
        }
        self.focus = FOCUS_ORDER[0];
        PanelUpdate::action(Action::SubmitRequestForm)
    }

    pub fn render(&self, ctx: &PanelContext<'_>, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Onboarding Request ")
            .border_style(Style::default().fg(Color::Blue));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [intro, body, footer] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(inner);

        frame.render_widget(
            Paragraph::new(
                "Request access to the AI code review system for your project. \
                 An administrator reviews every request.",
            )
            .style(Style::default().fg(Color::Gray))
            .wrap(Wrap { trim: true }),
            intro,
        );

        let form = &ctx.dashboard.request_form;
        let mut lines = Vec::new();
        for field in FormField::ALL {
            let focused = self.focus == FormFocus::Field(field);
            if field == FormField::ExpectedDuration {
                lines.push(duration_line(&form.expected_duration, focused));
            } else {
                lines.push(field_line(
                    field.label(),
                    form.get(field),
                    field.placeholder(),
                    focused,
                ));
            }
            if let Some(err) = self.error_for(field) {
                lines.push(Line::from(Span::styled(
                    format!("    {err}"),
                    Style::default().fg(Color::Red),
                )));
            }
            lines.push(Line::default());
        }

        let submit_style = if self.focus == FormFocus::Submit {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan)
        };
        lines.push(Line::from(Span::styled("  [ Submit request ]  ", submit_style)));

        frame.render_widget(Paragraph::new(lines), body);

        let hints = [
            InputHint::new("Tab", "next field"),
            InputHint::new("←/→", "duration"),
            InputHint::new("Ctrl+S", "submit"),
        ];
        frame.render_widget(Paragraph::new(hints_line(&hints, Color::Cyan)), footer);
    }
}

fn duration_line(current: &str, focused: bool) -> Line<'static> {
    let label_style = if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    let mut spans = vec![
        Span::styled(if focused { "> " } else { "  " }, label_style),
        Span::styled(format!("{}: ", FormField::ExpectedDuration.label()), label_style),
    ];
    for option in DURATION_OPTIONS {
        let style = if option == current {
            Style::default().fg(Color::Black).bg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!(" {option} months "), style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}
