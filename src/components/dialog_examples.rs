// ABOUTME: Showcase list of dialog variants that can be triggered from the TUI

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::app::{AppState, DialogExample};

const CORNFLOWER_BLUE: Color = Color::Rgb(100, 149, 237);
const GOLD: Color = Color::Rgb(255, 215, 0);
const SELECTION_GREEN: Color = Color::Rgb(100, 200, 100);
const DARK_BG: Color = Color::Rgb(25, 25, 35);
const PANEL_BG: Color = Color::Rgb(30, 30, 40);
const SOFT_WHITE: Color = Color::Rgb(220, 220, 230);
const MUTED_GRAY: Color = Color::Rgb(120, 120, 140);
const SUBDUED_BORDER: Color = Color::Rgb(60, 60, 80);
const WARNING_YELLOW: Color = Color::Rgb(220, 180, 80);

pub struct DialogExamplesComponent;

impl DialogExamplesComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        frame.render_widget(Clear, area);
        frame.render_widget(Block::default().style(Style::default().bg(DARK_BG)), area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(8),    // Example list
                Constraint::Length(4), // Description
                Constraint::Length(3), // Last result
                Constraint::Length(1), // Hints
            ])
            .split(area);

        self.render_list(frame, chunks[0], state);
        self.render_description(frame, chunks[1], state);
        self.render_result(frame, chunks[2], state);

        let hints = Line::from(vec![
            Span::styled("↑↓/jk", Style::default().fg(CORNFLOWER_BLUE).add_modifier(Modifier::BOLD)),
            Span::styled(" Select  ", Style::default().fg(MUTED_GRAY)),
            Span::styled("Enter", Style::default().fg(CORNFLOWER_BLUE).add_modifier(Modifier::BOLD)),
            Span::styled(" Open  ", Style::default().fg(MUTED_GRAY)),
            Span::styled("Esc", Style::default().fg(CORNFLOWER_BLUE).add_modifier(Modifier::BOLD)),
            Span::styled(" Back  ", Style::default().fg(MUTED_GRAY)),
            Span::styled("q", Style::default().fg(CORNFLOWER_BLUE).add_modifier(Modifier::BOLD)),
            Span::styled(" Quit", Style::default().fg(MUTED_GRAY)),
        ]);
        frame.render_widget(Paragraph::new(hints), chunks[3]);
    }

    fn render_list(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let items: Vec<ListItem> = DialogExample::all()
            .iter()
            .map(|example| {
                let mut spans = vec![Span::styled(
                    example.label(),
                    Style::default().fg(SOFT_WHITE),
                )];
                if example.is_loading() && state.example_loading {
                    spans.push(Span::styled("  ⏳ loading…", Style::default().fg(WARNING_YELLOW)));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .title(Span::styled(
                        " 💬 Dialog Examples ",
                        Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
                    ))
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(CORNFLOWER_BLUE))
                    .style(Style::default().bg(PANEL_BG)),
            )
            .highlight_style(
                Style::default()
                    .fg(SELECTION_GREEN)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");

        let mut list_state = ListState::default();
        list_state.select(Some(state.selected_example));
        frame.render_stateful_widget(list, area, &mut list_state);
    }

    fn render_description(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let description = DialogExample::all()
            .get(state.selected_example)
            .map(|example| example.description())
            .unwrap_or_default();

        let paragraph = Paragraph::new(Span::styled(description, Style::default().fg(SOFT_WHITE)))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(SUBDUED_BORDER))
                    .style(Style::default().bg(PANEL_BG)),
            )
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn render_result(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let line = match &state.last_example_result {
            Some(result) => Line::from(vec![
                Span::styled("Last result: ", Style::default().fg(MUTED_GRAY)),
                Span::styled(result.clone(), Style::default().fg(GOLD)),
            ]),
            None => Line::from(Span::styled(
                "No dialog answered yet",
                Style::default().fg(MUTED_GRAY),
            )),
        };
        frame.render_widget(
            Paragraph::new(line).block(Block::default().borders(Borders::TOP).border_style(Style::default().fg(SUBDUED_BORDER))),
            area,
        );
    }
}

impl Default for DialogExamplesComponent {
    fn default() -> Self {
        Self::new()
    }
}
