//! Read-only usage statistics, grouped into sections.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{BarChart, Block, Borders, Cell, Paragraph, Row, Sparkline, Table, Tabs};
use rdash_core::stats::{LANGUAGES, NamedCount, StatsSnapshot};

use super::{PanelUpdate, cycle};
use crate::overlays::render_utils::{InputHint, hints_line};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatsSection {
    #[default]
    Overview,
    Usage,
    Projects,
    Languages,
    Reviewers,
}

impl StatsSection {
    pub const ALL: [StatsSection; 5] = [
        StatsSection::Overview,
        StatsSection::Usage,
        StatsSection::Projects,
        StatsSection::Languages,
        StatsSection::Reviewers,
    ];

    pub fn title(self) -> &'static str {
        match self {
            StatsSection::Overview => "Overview",
            StatsSection::Usage => "Usage",
            StatsSection::Projects => "Projects",
            StatsSection::Languages => "Languages",
            StatsSection::Reviewers => "Reviewers",
        }
    }
}

#[derive(Debug)]
pub struct StatisticsPanel {
    pub snapshot: StatsSnapshot,
    pub section: StatsSection,
}

impl StatisticsPanel {
    pub fn new(snapshot: StatsSnapshot) -> Self {
        Self {
            snapshot,
            section: StatsSection::default(),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> PanelUpdate {
        match key.code {
            KeyCode::Right | KeyCode::Tab => {
                self.section = cycle(&StatsSection::ALL, self.section, true);
            }
            KeyCode::Left | KeyCode::BackTab => {
                self.section = cycle(&StatsSection::ALL, self.section, false);
            }
            _ => {}
        }
        PanelUpdate::none()
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title(" Statistics ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [tabs_area, body, footer] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(inner);

        let selected = StatsSection::ALL
            .iter()
            .position(|s| *s == self.section)
            .unwrap_or(0);
        frame.render_widget(
            Tabs::new(StatsSection::ALL.iter().map(|s| s.title()))
                .select(selected)
                .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            tabs_area,
        );

        match self.section {
            StatsSection::Overview => self.render_overview(frame, body),
            StatsSection::Usage => self.render_usage(frame, body),
            StatsSection::Projects => self.render_projects(frame, body),
            StatsSection::Languages => self.render_languages(frame, body),
            StatsSection::Reviewers => self.render_reviewers(frame, body),
        }

        let hints = [InputHint::new("←/→", "section")];
        frame.render_widget(Paragraph::new(hints_line(&hints, Color::Cyan)), footer);
    }

    fn render_overview(&self, frame: &mut Frame, area: Rect) {
        let s = &self.snapshot;
        let [cards, metrics] =
            Layout::vertical([Constraint::Length(4), Constraint::Min(0)]).areas(area);
        let [a, b, c] = Layout::horizontal([Constraint::Fill(1); 3]).areas(cards);
        for (rect, title, value) in [
            (a, "Total reviews", s.total_reviews),
            (b, "Projects", s.total_projects),
            (c, "Active users", s.active_users),
        ] {
            frame.render_widget(summary_card(title, value), rect);
        }

        let rows = s.metrics.iter().map(|m| {
            Row::new(vec![
                Cell::from(m.name.clone()),
                Cell::from(Span::styled(
                    m.value.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
            ])
        });
        frame.render_widget(
            Table::new(
                rows,
                [Constraint::Fill(1), Constraint::Length(12)],
            )
            .block(Block::default().borders(Borders::TOP).title(" Review metrics ")),
            metrics,
        );
    }

    fn render_usage(&self, frame: &mut Frame, area: Rect) {
        let s = &self.snapshot;
        let [daily, monthly, hourly] = Layout::vertical([
            Constraint::Length(5),
            Constraint::Length(8),
            Constraint::Min(6),
        ])
        .areas(area);

        let first = s.daily.first().map_or("", |d| d.date.as_str());
        let last = s.daily.last().map_or("", |d| d.date.as_str());
        let daily_reviews: Vec<u64> = s.daily.iter().map(|d| u64::from(d.reviews)).collect();
        frame.render_widget(
            Sparkline::default()
                .block(
                    Block::default()
                        .borders(Borders::TOP)
                        .title(format!(" Daily reviews {first} to {last} ")),
                )
                .style(Style::default().fg(Color::Blue))
                .data(daily_reviews),
            daily,
        );

        let rows = s.monthly_trend.iter().map(|m| {
            Row::new(vec![
                Cell::from(m.month.clone()),
                Cell::from(m.reviews.to_string()),
                Cell::from(m.users.to_string()),
            ])
        });
        frame.render_widget(
            Table::new(rows, [Constraint::Length(10), Constraint::Length(10), Constraint::Length(8)])
                .header(header_row(["Month", "Reviews", "Users"]))
                .block(Block::default().borders(Borders::TOP).title(" Monthly trend ")),
            monthly,
        );

        let labels: Vec<String> = s.hourly.iter().map(|h| format!("{:02}", h.hour)).collect();
        let data: Vec<(&str, u64)> = labels
            .iter()
            .zip(&s.hourly)
            .map(|(label, h)| (label.as_str(), u64::from(h.reviews)))
            .collect();
        frame.render_widget(
            BarChart::default()
                .block(Block::default().borders(Borders::TOP).title(" Reviews by hour "))
                .data(data.as_slice())
                .bar_width(2)
                .bar_gap(1)
                .bar_style(Style::default().fg(Color::Blue)),
            hourly,
        );
    }

    fn render_projects(&self, frame: &mut Frame, area: Rect) {
        let s = &self.snapshot;
        let [status, top] =
            Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)]).areas(area);
        frame.render_widget(
            Paragraph::new(share_lines(&s.project_status)).block(
                Block::default()
                    .borders(Borders::RIGHT)
                    .title(" Project status "),
            ),
            status,
        );
        frame.render_widget(named_bar_chart(" Top projects ", &s.top_projects), top);
    }

    fn render_languages(&self, frame: &mut Frame, area: Rect) {
        let s = &self.snapshot;
        let [shares, trend] =
            Layout::vertical([Constraint::Length(8), Constraint::Min(0)]).areas(area);
        let [languages, sizes] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).areas(shares);
        frame.render_widget(
            Paragraph::new(share_lines(&s.languages))
                .block(Block::default().borders(Borders::TOP).title(" Languages ")),
            languages,
        );
        frame.render_widget(
            Paragraph::new(share_lines(&s.review_sizes))
                .block(Block::default().borders(Borders::TOP).title(" Review sizes ")),
            sizes,
        );

        let mut header = vec!["Month"];
        header.extend(LANGUAGES);
        let rows = s.language_trend.iter().map(|t| {
            let mut cells = vec![Cell::from(t.month.clone())];
            cells.extend(t.counts.iter().map(|c| Cell::from(c.to_string())));
            Row::new(cells)
        });
        let mut widths = vec![Constraint::Length(10)];
        widths.extend([Constraint::Length(11); LANGUAGES.len()]);
        frame.render_widget(
            Table::new(rows, widths)
                .header(header_row(header))
                .block(Block::default().borders(Borders::TOP).title(" Reviews per language ")),
            trend,
        );
    }

    fn render_reviewers(&self, frame: &mut Frame, area: Rect) {
        let rows = self.snapshot.reviewers.iter().enumerate().map(|(rank, r)| {
            Row::new(vec![
                Cell::from(format!("{}", rank + 1)),
                Cell::from(r.name.clone()),
                Cell::from(r.reviews.to_string()),
                Cell::from(r.comments.to_string()),
                Cell::from(r.approvals.to_string()),
            ])
        });
        frame.render_widget(
            Table::new(
                rows,
                [
                    Constraint::Length(3),
                    Constraint::Fill(1),
                    Constraint::Length(9),
                    Constraint::Length(10),
                    Constraint::Length(10),
                ],
            )
            .header(header_row(["#", "Reviewer", "Reviews", "Comments", "Approvals"])),
            area,
        );
    }
}

fn header_row<'a>(cells: impl IntoIterator<Item = &'a str>) -> Row<'a> {
    Row::new(cells.into_iter().map(Cell::from))
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
}

fn summary_card(title: &str, value: u32) -> Paragraph<'static> {
    Paragraph::new(vec![
        Line::from(Span::styled(
            title.to_string(),
            Style::default().fg(Color::Gray),
        )),
        Line::from(Span::styled(
            value.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ])
    .block(Block::default().borders(Borders::ALL))
}

/// `name  42 (35%)` per entry.
fn share_lines(counts: &[NamedCount]) -> Vec<Line<'static>> {
    let total: u32 = counts.iter().map(|c| c.value).sum();
    counts
        .iter()
        .map(|c| {
            let pct = if total == 0 { 0 } else { c.value * 100 / total };
            Line::from(vec![
                Span::raw(format!("{:<12}", c.name)),
                Span::styled(
                    format!("{:>5}", c.value),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!(" ({pct}%)"), Style::default().fg(Color::DarkGray)),
            ])
        })
        .collect()
}

fn named_bar_chart<'a>(title: &'a str, counts: &'a [NamedCount]) -> BarChart<'a> {
    let data: Vec<(&str, u64)> = counts
        .iter()
        .map(|c| (c.name.as_str(), u64::from(c.value)))
        .collect();
    BarChart::default()
        .block(Block::default().title(title))
        .data(data.as_slice())
        .bar_width(9)
        .bar_gap(2)
        .bar_style(Style::default().fg(Color::Blue))
        .value_style(Style::default().fg(Color::Black).bg(Color::Blue))
}
