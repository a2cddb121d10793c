//! AI review playground: pull request URL plus an optional custom prompt.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use rdash_core::review::ReviewRequest;

use super::{PanelContext, PanelUpdate};
use crate::common::{TaskKind, edit_line, edit_multiline};
use crate::dashboard::Action;
use crate::effects::UiEffect;
use crate::overlays::render_utils::{InputHint, hints_line};

const SPINNER: [&str; 4] = ["◐", "◓", "◑", "◒"];

/// Example prompt shown by the reference toggle.
pub const REFERENCE_PROMPT: &str = "\
Review this pull request as a senior engineer.
- Point out bugs, race conditions and unhandled errors first.
- Flag security issues such as injection or leaked secrets.
- Suggest clearer names and smaller functions where it helps readability.
- Keep each comment short and reference the file and line.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromptFocus {
    #[default]
    PullRequestUrl,
    Prompt,
}

#[derive(Debug, Default)]
pub struct PromptTestPanel {
    pub focus: PromptFocus,
}

impl PromptTestPanel {
    pub fn handle_key(&mut self, ctx: &PanelContext<'_>, key: KeyEvent) -> PanelUpdate {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let dashboard = ctx.dashboard;
        match key.code {
            KeyCode::Tab | KeyCode::BackTab => {
                self.focus = match self.focus {
                    PromptFocus::PullRequestUrl => PromptFocus::Prompt,
                    PromptFocus::Prompt => PromptFocus::PullRequestUrl,
                };
                PanelUpdate::none()
            }
            KeyCode::F(5) => self.submit(ctx),
            KeyCode::Char('s') if ctrl => self.submit(ctx),
            KeyCode::Char('r') if ctrl => PanelUpdate::actions(vec![
                Action::SetPrompt(String::new()),
                Action::SetPullRequestUrl(String::new()),
            ]),
            KeyCode::Char('t') if ctrl => PanelUpdate::action(Action::ToggleReference),
            KeyCode::Char('y') if ctrl => {
                let text = if dashboard.prompt.is_empty() {
                    REFERENCE_PROMPT.to_string()
                } else {
                    dashboard.prompt.clone()
                };
                PanelUpdate::none().with_effects(vec![UiEffect::CopyToClipboard { text }])
            }
            KeyCode::Enter if self.focus == PromptFocus::PullRequestUrl => {
                self.focus = PromptFocus::Prompt;
                PanelUpdate::none()
            }
            _ => match self.focus {
                PromptFocus::PullRequestUrl => edit_line(&dashboard.pull_request_url, key)
                    .map_or_else(PanelUpdate::none, |v| {
                        PanelUpdate::action(Action::SetPullRequestUrl(v))
                    }),
                PromptFocus::Prompt => edit_multiline(&dashboard.prompt, key)
                    .map_or_else(PanelUpdate::none, |v| PanelUpdate::action(Action::SetPrompt(v))),
            },
        }
    }

    /// Clears the previous outcome and starts a review, unless one is running.
    fn submit(&self, ctx: &PanelContext<'_>) -> PanelUpdate {
        if ctx.tasks.state(TaskKind::Review).is_running() {
            return PanelUpdate::none();
        }
        let request = ReviewRequest {
            pull_request_url: ctx.dashboard.pull_request_url.trim().to_string(),
            prompt: ctx.dashboard.prompt.clone(),
        };
        PanelUpdate::actions(vec![
            Action::SetError(String::new()),
            Action::SetReviewResult(String::new()),
        ])
        .with_effects(vec![UiEffect::StartReview {
            task: None,
            request,
        }])
    }

    pub fn render(&self, ctx: &PanelContext<'_>, frame: &mut Frame, area: Rect) {
        let dashboard = ctx.dashboard;
        let reference_height = if dashboard.show_reference { 7 } else { 0 };
        let [url_area, prompt_area, reference_area, outcome_area, footer] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(7),
            Constraint::Length(reference_height),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .areas(area);

        let focused = |f: PromptFocus| {
            if self.focus == f {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::DarkGray)
            }
        };

        let url_text = if dashboard.pull_request_url.is_empty()
            && self.focus != PromptFocus::PullRequestUrl
        {
            Span::styled(
                "https://github.com/owner/repo/pull/123",
                Style::default().fg(Color::DarkGray),
            )
        } else {
            Span::raw(dashboard.pull_request_url.as_str())
        };
        let mut url_line = vec![url_text];
        if self.focus == PromptFocus::PullRequestUrl {
            url_line.push(Span::raw("█"));
        }
        frame.render_widget(
            Paragraph::new(Line::from(url_line)).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Pull Request URL ")
                    .border_style(focused(PromptFocus::PullRequestUrl)),
            ),
            url_area,
        );

        let mut prompt_text = dashboard.prompt.clone();
        if self.focus == PromptFocus::Prompt {
            prompt_text.push('█');
        }
        frame.render_widget(
            Paragraph::new(prompt_text).wrap(Wrap { trim: false }).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Custom prompt (optional) ")
                    .border_style(focused(PromptFocus::Prompt)),
            ),
            prompt_area,
        );

        if dashboard.show_reference {
            frame.render_widget(
                Paragraph::new(REFERENCE_PROMPT)
                    .style(Style::default().fg(Color::Gray))
                    .wrap(Wrap { trim: false })
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .title(" Reference prompt ")
                            .border_style(Style::default().fg(Color::Magenta)),
                    ),
                reference_area,
            );
        }

        let outcome = if ctx.tasks.state(TaskKind::Review).is_running() {
            let spinner = SPINNER[ctx.spinner_frame % SPINNER.len()];
            Paragraph::new(Line::from(vec![
                Span::styled(spinner, Style::default().fg(Color::Cyan)),
                Span::raw(" Reviewing…"),
            ]))
        } else if !dashboard.error.is_empty() {
            Paragraph::new(Span::styled(
                dashboard.error.as_str(),
                Style::default().fg(Color::Red),
            ))
        } else if !dashboard.review_result.is_empty() {
            Paragraph::new(dashboard.review_result.as_str())
        } else {
            Paragraph::new(Span::styled(
                "Submit a pull request to see the review here.",
                Style::default().fg(Color::DarkGray),
            ))
        };
        frame.render_widget(
            outcome.wrap(Wrap { trim: false }).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled(
                        " Review result ",
                        Style::default().add_modifier(Modifier::BOLD),
                    )),
            ),
            outcome_area,
        );

        let hints = [
            InputHint::new("Ctrl+S", "request review"),
            InputHint::new("Ctrl+R", "reset"),
            InputHint::new("Ctrl+T", "reference"),
            InputHint::new("Ctrl+Y", "copy prompt"),
        ];
        frame.render_widget(Paragraph::new(hints_line(&hints, Color::Cyan)), footer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{TaskId, TaskStarted, Tasks};
    use crate::dashboard::DashboardState;

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_submit_clears_outcome_and_starts_review() {
        let dashboard = DashboardState {
            pull_request_url: " https://github.com/o/r/pull/7 ".into(),
            prompt: "focus on errors".into(),
            ..DashboardState::default()
        };
        let tasks = Tasks::default();
        let ctx = PanelContext {
            dashboard: &dashboard,
            tasks: &tasks,
            spinner_frame: 0,
        };
        let update = PromptTestPanel::default().handle_key(&ctx, ctrl('s'));
        assert_eq!(
            update.actions,
            vec![
                Action::SetError(String::new()),
                Action::SetReviewResult(String::new())
            ]
        );
        match update.effects.as_slice() {
            [UiEffect::StartReview { task: None, request }] => {
                assert_eq!(request.pull_request_url, "https://github.com/o/r/pull/7");
                assert_eq!(request.prompt, "focus on errors");
            }
            other => panic!("unexpected effects {other:?}"),
        }
    }

    #[test]
    fn test_no_second_review_while_running() {
        let dashboard = DashboardState::default();
        let mut tasks = Tasks::default();
        tasks.state_mut(TaskKind::Review).on_started(&TaskStarted {
            id: TaskId(1),
            cancel: None,
        });
        let ctx = PanelContext {
            dashboard: &dashboard,
            tasks: &tasks,
            spinner_frame: 0,
        };
        let update = PromptTestPanel::default().handle_key(&ctx, KeyEvent::from(KeyCode::F(5)));
        assert!(update.actions.is_empty());
        assert!(update.effects.is_empty());
    }

    #[test]
    fn test_prompt_field_accepts_newlines() {
        let dashboard = DashboardState {
            prompt: "line".into(),
            ..DashboardState::default()
        };
        let tasks = Tasks::default();
        let ctx = PanelContext {
            dashboard: &dashboard,
            tasks: &tasks,
            spinner_frame: 0,
        };
        let mut panel = PromptTestPanel {
            focus: PromptFocus::Prompt,
        };
        let update = panel.handle_key(&ctx, KeyEvent::from(KeyCode::Enter));
        assert_eq!(update.actions, vec![Action::SetPrompt("line\n".into())]);
    }

    #[test]
    fn test_copy_falls_back_to_reference() {
        let dashboard = DashboardState::default();
        let tasks = Tasks::default();
        let ctx = PanelContext {
            dashboard: &dashboard,
            tasks: &tasks,
            spinner_frame: 0,
        };
        let update = PromptTestPanel::default().handle_key(&ctx, ctrl('y'));
        assert!(matches!(
            update.effects.as_slice(),
            [UiEffect::CopyToClipboard { text }] if text == REFERENCE_PROMPT
        ));
    }
}
