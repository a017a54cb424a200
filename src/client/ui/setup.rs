//! Setup screen: question bank, mode and count.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph};

use crate::client::state::ClientApp;
use crate::protocol::{MAX_QUESTION_COUNT, MIN_QUESTION_COUNT};

/// Render the setup screen.
pub fn render(frame: &mut Frame, area: Rect, app: &ClientApp) {
    let chunks = Layout::vertical([
        Constraint::Length(3), // Title
        Constraint::Min(6),    // Categories
        Constraint::Length(5), // Options
        Constraint::Length(2), // Controls
    ])
    .margin(1)
    .split(area);

    render_title(frame, chunks[0], &app.api_base);
    render_categories(frame, chunks[1], app);
    render_options(frame, chunks[2], app);
    render_controls(frame, chunks[3]);
}

fn render_title(frame: &mut Frame, area: Rect, api_base: &str) {
    let content = vec![
        Line::from(Span::styled(
            "QUESTION BANK",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(Span::styled(api_base, Style::default().fg(Color::DarkGray))),
    ];
    frame.render_widget(Paragraph::new(content).alignment(Alignment::Center), area);
}

fn render_categories(frame: &mut Frame, area: Rect, app: &ClientApp) {
    let form = &app.form;

    let lines: Vec<Line> = if form.categories.is_empty() {
        vec![Line::from(Span::styled(
            "No question banks loaded. Press [L] to retry.",
            Style::default().fg(Color::Yellow),
        ))]
    } else {
        form.categories
            .iter()
            .enumerate()
            .map(|(i, category)| {
                let is_selected = i == form.selected;
                let style = if is_selected {
                    Style::default().fg(Color::Yellow).bold()
                } else {
                    Style::default().fg(Color::White)
                };
                let size = category
                    .count
                    .map(|n| format!(" ({} questions)", n))
                    .unwrap_or_default();

                Line::from(vec![
                    Span::styled(if is_selected { "> " } else { "  " }, style),
                    Span::styled(category.name.as_str(), style),
                    Span::styled(size, Style::default().fg(Color::DarkGray)),
                ])
            })
            .collect()
    };

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Question bank ")
            .title_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn render_options(frame: &mut Frame, area: Rect, app: &ClientApp) {
    let form = &app.form;
    let label = Style::default().fg(Color::Gray);
    let value = Style::default().fg(Color::White).bold();

    let count = if form.sequential {
        Span::styled("all (sequential)", Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(format!("{}_", form.count_input), value)
    };

    let lines = vec![
        Line::from(vec![
            Span::styled("Mode:      ", label),
            Span::styled(if form.sequential { "sequential" } else { "random" }, value),
        ]),
        Line::from(vec![
            Span::styled("Questions: ", label),
            count,
            Span::styled(
                format!("  ({}-{})", MIN_QUESTION_COUNT, MAX_QUESTION_COUNT),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Line::from(vec![
            Span::styled("Shuffle:   ", label),
            Span::styled(if form.shuffle { "on" } else { "off" }, value),
        ]),
    ];

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new(
        "j/k bank  ·  0-9 count  ·  m mode  ·  s shuffle  ·  Enter start  ·  l reload  ·  q quit",
    )
    .alignment(Alignment::Center)
    .fg(Color::DarkGray);

    frame.render_widget(widget, area);
}
