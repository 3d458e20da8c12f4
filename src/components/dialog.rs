// ABOUTME: Dialog overlay: draws every active dialog as a stacked centered box,
// the most recent one on top with its buttons highlighted

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::success::centered;
use crate::app::{AppState, DialogButton};
use crate::dialog::{DialogEntry, DialogKind};

const GOLD: Color = Color::Rgb(255, 215, 0);
const SELECTION_GREEN: Color = Color::Rgb(100, 200, 100);
const PANEL_BG: Color = Color::Rgb(30, 30, 40);
const SOFT_WHITE: Color = Color::Rgb(220, 220, 230);
const MUTED_GRAY: Color = Color::Rgb(120, 120, 140);
const CORNFLOWER_BLUE: Color = Color::Rgb(100, 149, 237);
const ERROR_RED: Color = Color::Rgb(220, 80, 80);
const WARNING_YELLOW: Color = Color::Rgb(220, 180, 80);

const DIALOG_WIDTH: u16 = 60;
const STACK_OFFSET: u16 = 2;

pub struct DialogOverlayComponent;

impl DialogOverlayComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let dialogs = state.services.dialogs.dialogs();
        let Some(last) = dialogs.len().checked_sub(1) else {
            return;
        };

        for (idx, dialog) in dialogs.iter().enumerate() {
            // Older dialogs peek out above and to the left of newer ones
            let depth = u16::try_from(last - idx).unwrap_or(u16::MAX);
            let offset = depth.saturating_mul(STACK_OFFSET);
            let base = centered(area, DIALOG_WIDTH, Self::height_for(dialog));
            let rect = Rect {
                x: base.x.saturating_sub(offset).max(area.x),
                y: base.y.saturating_sub(offset).max(area.y),
                ..base
            };

            let focused = idx == last;
            self.render_dialog(frame, rect, dialog, focused.then_some(state.dialog_button));
        }
    }

    fn height_for(dialog: &DialogEntry) -> u16 {
        let body_lines = dialog.message.iter().chain(dialog.content.iter())
            .map(|text| text.lines().count().max(1) + 1)
            .sum::<usize>();
        u16::try_from(body_lines + 5).unwrap_or(u16::MAX).clamp(7, 20)
    }

    fn accent(kind: DialogKind) -> Color {
        match kind {
            DialogKind::Success => SELECTION_GREEN,
            DialogKind::Error => ERROR_RED,
            DialogKind::Warning => WARNING_YELLOW,
            DialogKind::Info => CORNFLOWER_BLUE,
            DialogKind::Confirm => GOLD,
        }
    }

    fn render_dialog(
        &self,
        frame: &mut Frame,
        area: Rect,
        dialog: &DialogEntry,
        selected: Option<DialogButton>,
    ) {
        frame.render_widget(Clear, area);

        let accent = Self::accent(dialog.kind);
        let border_style = if selected.is_some() {
            Style::default().fg(accent)
        } else {
            Style::default().fg(MUTED_GRAY)
        };
        let block = Block::default()
            .title(Span::styled(
                format!(" {} {} ", dialog.icon, dialog.title),
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .style(Style::default().bg(PANEL_BG));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),    // Message and content
                Constraint::Length(2), // Buttons
            ])
            .split(inner);

        let mut lines = Vec::new();
        if let Some(message) = &dialog.message {
            lines.push(Line::from(Span::styled(message.clone(), Style::default().fg(SOFT_WHITE))));
        }
        if let Some(content) = &dialog.content {
            if !lines.is_empty() {
                lines.push(Line::default());
            }
            lines.extend(
                content
                    .lines()
                    .map(|line| Line::from(Span::styled(line.to_string(), Style::default().fg(MUTED_GRAY)))),
            );
        }
        frame.render_widget(
            Paragraph::new(lines).wrap(Wrap { trim: false }),
            chunks[0],
        );

        frame.render_widget(
            Paragraph::new(self.buttons(dialog, selected, accent)).alignment(Alignment::Center),
            chunks[1],
        );
    }

    fn buttons(
        &self,
        dialog: &DialogEntry,
        selected: Option<DialogButton>,
        accent: Color,
    ) -> Line<'static> {
        if dialog.busy {
            return Line::from(Span::styled(
                "⏳ Working…",
                Style::default().fg(WARNING_YELLOW),
            ));
        }

        let style_for = |button: DialogButton| {
            if selected == Some(button) {
                Style::default().fg(Color::Black).bg(accent).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(SOFT_WHITE)
            }
        };

        let mut spans = Vec::new();
        if dialog.show_cancel {
            spans.push(Span::styled(
                format!(" {} ", dialog.cancel_text),
                style_for(DialogButton::Cancel),
            ));
            spans.push(Span::raw("    "));
        }
        spans.push(Span::styled(
            format!(" {} ", dialog.confirm_text),
            style_for(DialogButton::Confirm),
        ));
        if dialog.persistent {
            spans.push(Span::styled("   (Esc disabled)", Style::default().fg(MUTED_GRAY)));
        }
        Line::from(spans)
    }
}

impl Default for DialogOverlayComponent {
    fn default() -> Self {
        Self::new()
    }
}
