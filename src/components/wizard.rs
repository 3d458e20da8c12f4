// ABOUTME: Registration wizard view: step progress header, field list with inline errors,
// general error banner and key hints

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Gauge, Paragraph, Wrap},
    Frame,
};

use crate::app::AppState;
use crate::models::{FieldKind, FormField, FormStep, GENERAL_ERROR_KEY};

const CORNFLOWER_BLUE: Color = Color::Rgb(100, 149, 237);
const GOLD: Color = Color::Rgb(255, 215, 0);
const SELECTION_GREEN: Color = Color::Rgb(100, 200, 100);
const DARK_BG: Color = Color::Rgb(25, 25, 35);
const PANEL_BG: Color = Color::Rgb(30, 30, 40);
const SOFT_WHITE: Color = Color::Rgb(220, 220, 230);
const MUTED_GRAY: Color = Color::Rgb(120, 120, 140);
const SUBDUED_BORDER: Color = Color::Rgb(60, 60, 80);
const ERROR_RED: Color = Color::Rgb(220, 80, 80);
const WARNING_YELLOW: Color = Color::Rgb(220, 180, 80);

pub struct WizardComponent;

impl WizardComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        frame.render_widget(Clear, area);
        frame.render_widget(Block::default().style(Style::default().bg(DARK_BG)), area);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(6), // Header with progress
                Constraint::Min(8),    // Fields
                Constraint::Length(3), // Banner
                Constraint::Length(3), // Key hints
            ])
            .split(area);

        self.render_header(frame, layout[0], state);
        self.render_fields(frame, layout[1], state);
        self.render_banner(frame, layout[2], state);
        self.render_hints(frame, layout[3], state);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(CORNFLOWER_BLUE))
            .style(Style::default().bg(PANEL_BG));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Length(1), // Step dots
                Constraint::Length(1), // Step X of N
                Constraint::Length(1), // Gauge
            ])
            .split(inner);

        let title = Paragraph::new(Line::from(vec![
            Span::styled("📝 ", Style::default()),
            Span::styled(
                "Create your account",
                Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
            ),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(title, rows[0]);

        frame.render_widget(
            Paragraph::new(self.step_dots(state)).alignment(Alignment::Center),
            rows[1],
        );

        let wizard = &state.services.wizard;
        let mut counter = vec![Span::styled(
            format!(
                "Step {} of {}",
                wizard.current_step().number(),
                FormStep::total()
            ),
            Style::default().fg(SOFT_WHITE),
        )];
        if state.config.ui.show_progress_percent {
            counter.push(Span::styled(
                format!("  ·  {:.0}% Complete", wizard.progress()),
                Style::default().fg(MUTED_GRAY),
            ));
        }
        frame.render_widget(
            Paragraph::new(Line::from(counter)).alignment(Alignment::Center),
            rows[2],
        );

        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(SELECTION_GREEN).bg(SUBDUED_BORDER))
            .ratio((wizard.progress() / 100.0).clamp(0.0, 1.0))
            .label("");
        frame.render_widget(gauge, rows[3]);
    }

    /// Completed steps are green, the current one gold, unreachable ones gray
    fn step_dots(&self, state: &AppState) -> Line<'static> {
        let wizard = &state.services.wizard;
        let steps = FormStep::all();
        let mut spans = Vec::with_capacity(steps.len() * 4);

        for (idx, step) in steps.iter().enumerate() {
            let current = *step == wizard.current_step();
            let (icon, style) = if wizard.is_step_completed(*step) {
                ("●", Style::default().fg(SELECTION_GREEN))
            } else if current {
                ("◉", Style::default().fg(GOLD).add_modifier(Modifier::BOLD))
            } else {
                ("○", Style::default().fg(MUTED_GRAY))
            };

            spans.push(Span::styled(icon, style));
            spans.push(Span::raw(" "));
            spans.push(Span::styled(
                format!("F{} {}", step.number(), step.title()),
                if current {
                    Style::default().fg(SOFT_WHITE)
                } else {
                    Style::default().fg(MUTED_GRAY)
                },
            ));
            if idx < steps.len() - 1 {
                spans.push(Span::styled(" → ", Style::default().fg(SUBDUED_BORDER)));
            }
        }
        Line::from(spans)
    }

    fn render_fields(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let step = state.current_step();
        let block = Block::default()
            .title(Line::from(vec![
                Span::styled(format!(" {} ", step.title()), Style::default().fg(GOLD)),
                Span::styled(format!("– {} ", step.description()), Style::default().fg(MUTED_GRAY)),
            ]))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(SUBDUED_BORDER))
            .style(Style::default().bg(PANEL_BG));

        let mut lines = Vec::new();
        for (idx, field) in state.current_fields().iter().enumerate() {
            let focused = idx == state.focused_field;
            lines.push(self.field_line(*field, focused, state));

            if let Some(error) = state.services.wizard.errors().get(field.key()) {
                lines.push(Line::from(Span::styled(
                    format!("      ✗ {error}"),
                    Style::default().fg(ERROR_RED),
                )));
            }
        }

        let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }

    fn field_line(&self, field: FormField, focused: bool, state: &AppState) -> Line<'static> {
        let data = state.services.wizard.form_data();
        let marker = if focused { "▶ " } else { "  " };
        let label_style = if focused {
            Style::default().fg(GOLD).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(SOFT_WHITE)
        };

        let value = match field.kind() {
            FieldKind::Text => {
                let mut text = data.text(field);
                if focused {
                    text.push('▏');
                }
                Span::styled(text, Style::default().fg(SOFT_WHITE))
            }
            FieldKind::Toggle => {
                let (icon, color) = if data.flag(field) {
                    ("[x]", SELECTION_GREEN)
                } else {
                    ("[ ]", MUTED_GRAY)
                };
                Span::styled(icon, Style::default().fg(color))
            }
        };

        Line::from(vec![
            Span::styled(format!("  {marker}"), Style::default().fg(GOLD)),
            Span::styled(format!("{:<34}", field.label()), label_style),
            value,
        ])
    }

    fn render_banner(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let wizard = &state.services.wizard;
        let line = if wizard.is_submitting() {
            Line::from(Span::styled(
                "⏳ Submitting…",
                Style::default().fg(WARNING_YELLOW).add_modifier(Modifier::BOLD),
            ))
        } else if let Some(message) = wizard.errors().get(GENERAL_ERROR_KEY) {
            Line::from(vec![
                Span::styled("⚠ ", Style::default().fg(ERROR_RED)),
                Span::styled(message.clone(), Style::default().fg(ERROR_RED)),
                Span::styled("  (Enter to retry)", Style::default().fg(MUTED_GRAY)),
            ])
        } else {
            Line::default()
        };

        let banner = Paragraph::new(line)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::NONE))
            .wrap(Wrap { trim: true });
        frame.render_widget(banner, area);
    }

    fn render_hints(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let wizard = &state.services.wizard;
        let next_label = if wizard.is_last_step() { "Submit" } else { "Next" };

        let mut spans = vec![
            hint("Tab/↑↓", "Field"),
            hint("Enter", next_label),
        ];
        if wizard.can_go_previous() {
            spans.push(hint("Ctrl+P", "Back"));
        }
        spans.push(hint("F1-F3", "Jump"));
        spans.push(hint("Ctrl+R", "Reset"));
        spans.push(hint("Ctrl+D", "Dialogs"));
        spans.push(hint("Ctrl+C", "Quit"));

        let block = Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(SUBDUED_BORDER));
        frame.render_widget(
            Paragraph::new(Line::from(spans.concat()))
                .alignment(Alignment::Center)
                .block(block),
            area,
        );
    }
}

fn hint(key: &'static str, action: &'static str) -> Vec<Span<'static>> {
    vec![
        Span::styled(key, Style::default().fg(CORNFLOWER_BLUE).add_modifier(Modifier::BOLD)),
        Span::styled(format!(" {action}  "), Style::default().fg(MUTED_GRAY)),
    ]
}

impl Default for WizardComponent {
    fn default() -> Self {
        Self::new()
    }
}
