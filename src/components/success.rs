// ABOUTME: Confirmation view shown once the registration has been accepted

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::AppState;
use crate::wizard::WizardPhase;

const GOLD: Color = Color::Rgb(255, 215, 0);
const SELECTION_GREEN: Color = Color::Rgb(100, 200, 100);
const DARK_BG: Color = Color::Rgb(25, 25, 35);
const PANEL_BG: Color = Color::Rgb(30, 30, 40);
const SOFT_WHITE: Color = Color::Rgb(220, 220, 230);
const MUTED_GRAY: Color = Color::Rgb(120, 120, 140);
const CORNFLOWER_BLUE: Color = Color::Rgb(100, 149, 237);

pub struct SuccessComponent;

impl SuccessComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        frame.render_widget(Clear, area);
        frame.render_widget(Block::default().style(Style::default().bg(DARK_BG)), area);

        let card = centered(area, 70, 18);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(SELECTION_GREEN))
            .style(Style::default().bg(PANEL_BG));
        let inner = block.inner(card);
        frame.render_widget(block, card);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([Constraint::Min(10), Constraint::Length(1)])
            .split(inner);

        let mut lines = vec![
            Line::from(Span::styled(
                "✓ Registration Completed Successfully!",
                Style::default().fg(SELECTION_GREEN).add_modifier(Modifier::BOLD),
            )),
            Line::default(),
        ];

        if let WizardPhase::Submitted(summary) = state.services.wizard.phase() {
            lines.push(Line::from(Span::styled(
                summary.message.clone(),
                Style::default().fg(SOFT_WHITE),
            )));
            if let Some(receipt) = &summary.receipt {
                lines.push(Line::from(vec![
                    Span::styled("Reference: ", Style::default().fg(MUTED_GRAY)),
                    Span::styled(receipt.id.clone(), Style::default().fg(GOLD)),
                ]));
            }
            if let Some(data) = &summary.data {
                lines.push(Line::from(vec![
                    Span::styled("Registered: ", Style::default().fg(MUTED_GRAY)),
                    Span::styled(
                        format!("{} {} <{}>", data.first_name, data.last_name, data.email),
                        Style::default().fg(SOFT_WHITE),
                    ),
                ]));
            }
        }

        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "What's next?",
            Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
        )));
        for item in [
            "• Check your email for confirmation",
            "• Your account will be activated within 24 hours",
            "• You can update preferences anytime",
        ] {
            lines.push(Line::from(Span::styled(item, Style::default().fg(SOFT_WHITE))));
        }

        frame.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            rows[0],
        );

        let hints = Line::from(vec![
            Span::styled("Enter", Style::default().fg(CORNFLOWER_BLUE).add_modifier(Modifier::BOLD)),
            Span::styled(" Fill out another form  ", Style::default().fg(MUTED_GRAY)),
            Span::styled("d", Style::default().fg(CORNFLOWER_BLUE).add_modifier(Modifier::BOLD)),
            Span::styled(" Dialogs  ", Style::default().fg(MUTED_GRAY)),
            Span::styled("q", Style::default().fg(CORNFLOWER_BLUE).add_modifier(Modifier::BOLD)),
            Span::styled(" Quit", Style::default().fg(MUTED_GRAY)),
        ]);
        frame.render_widget(Paragraph::new(hints).alignment(Alignment::Center), rows[1]);
    }
}

impl Default for SuccessComponent {
    fn default() -> Self {
        Self::new()
    }
}

/// Rectangle of at most `width` x `height` centered in `area`
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
