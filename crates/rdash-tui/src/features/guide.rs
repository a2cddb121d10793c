//! Static usage guide.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use super::PanelUpdate;

pub struct GuideStep {
    pub title: &'static str,
    pub description: &'static str,
    pub details: [&'static str; 3],
}

pub const GUIDE_STEPS: [GuideStep; 4] = [
    GuideStep {
        title: "1. Submit a request",
        description: "Fill in the onboarding request with the basics of your project.",
        details: [
            "Enter the project name and repository URL.",
            "Describe the project and how the team will use code review.",
            "Pick the expected duration and team size.",
        ],
    },
    GuideStep {
        title: "2. Wait for approval",
        description: "An administrator reviews the request.",
        details: [
            "Every request goes through an admin review.",
            "The decision shows up on the My Projects tab.",
            "Denied requests list a reason; fix the request and submit it again.",
        ],
    },
    GuideStep {
        title: "3. Use the system",
        description: "Once accepted, the review system is available to your project.",
        details: [
            "Try AI reviews on the Prompt Test tab.",
            "Enter a pull request URL to request a real review.",
            "Review comments are posted on the pull request.",
        ],
    },
    GuideStep {
        title: "4. Manage your project",
        description: "Track your projects on the My Projects tab.",
        details: [
            "Check the current status of each project.",
            "Cancel a project that has not started onboarding.",
            "See usage statistics per project.",
        ],
    },
];

#[derive(Debug, Default)]
pub struct GuidePanel {
    pub scroll: u16,
}

impl GuidePanel {
    pub fn handle_key(&mut self, key: KeyEvent) -> PanelUpdate {
        match key.code {
            KeyCode::Up => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::Down => self.scroll = self.scroll.saturating_add(1),
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(10),
            KeyCode::PageDown => self.scroll = self.scroll.saturating_add(10),
            KeyCode::Home => self.scroll = 0,
            _ => {}
        }
        PanelUpdate::none()
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let mut lines = Vec::new();
        for step in &GUIDE_STEPS {
            lines.push(Line::from(Span::styled(
                step.title,
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(Span::styled(
                step.description,
                Style::default().fg(Color::Gray),
            )));
            for detail in step.details {
                lines.push(Line::from(vec![
                    Span::styled("  ✓ ", Style::default().fg(Color::Green)),
                    Span::raw(detail),
                ]));
            }
            lines.push(Line::default());
        }
        lines.push(Line::from(Span::styled(
            "Questions? Contact the code review team.",
            Style::default().fg(Color::DarkGray),
        )));

        frame.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .scroll((self.scroll, 0))
                .block(Block::default().borders(Borders::ALL).title(" Guide ")),
            area,
        );
    }
}
