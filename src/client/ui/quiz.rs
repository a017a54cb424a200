//! Quiz screen for the client.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Gauge, Padding, Paragraph, Wrap};

use crate::client::state::QuizView;
use crate::models::{Question, QuestionKind};
use crate::session::{Feedback, NavState, OptionMark, Session};

/// Render the quiz screen.
pub fn render(frame: &mut Frame, area: Rect, view: &QuizView) {
    let session = &view.session;
    let question = session.current_question();

    let chunks = Layout::vertical([
        Constraint::Length(1), // Header
        Constraint::Length(1), // Progress
        Constraint::Length(1), // Stats
        Constraint::Min(5),    // Question text
        Constraint::Length(session.mapping().len() as u16 + 2), // Options
        Constraint::Length(6), // Result
        Constraint::Length(6), // Navigator
        Constraint::Length(1), // Controls
    ])
    .margin(1)
    .split(area);

    render_header(frame, chunks[0], session, question);
    render_progress(frame, chunks[1], session);
    render_stats(frame, chunks[2], session, view.pending);
    render_question_text(frame, chunks[3], question);
    render_options(frame, chunks[4], view);
    render_result(frame, chunks[5], session.feedback());
    render_navigator(frame, chunks[6], session);
    render_controls(frame, chunks[7], view);
}

fn render_header(frame: &mut Frame, area: Rect, session: &Session, question: &Question) {
    let badge_color = match question.kind {
        QuestionKind::Single => Color::Blue,
        QuestionKind::Multiple => Color::Magenta,
    };

    let mut spans = vec![
        Span::styled(
            format!(" {} ", question.kind.label()),
            Style::default().fg(Color::Black).bg(badge_color).bold(),
        ),
        Span::raw("  "),
        Span::styled(question.code.as_str(), Style::default().fg(Color::Yellow)),
    ];
    if !question.chapter.is_empty() {
        spans.push(Span::styled(
            format!("  Chapter: {}", question.chapter),
            Style::default().fg(Color::Gray),
        ));
    }
    spans.push(Span::styled(
        format!("  {}/{}", session.current_index() + 1, session.len()),
        Style::default().fg(Color::DarkGray),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_progress(frame: &mut Frame, area: Rect, session: &Session) {
    let stats = session.stats();
    let widget = Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::DarkGray))
        .percent(stats.progress.min(100) as u16)
        .label(format!("{}%", stats.progress));

    frame.render_widget(widget, area);
}

fn render_stats(frame: &mut Frame, area: Rect, session: &Session, pending: bool) {
    let stats = session.stats();
    let accuracy_color = match stats.accuracy {
        90..=100 => Color::Green,
        70..=89 => Color::Cyan,
        50..=69 => Color::Yellow,
        _ => Color::Red,
    };

    let mut spans = vec![
        Span::styled(
            format!(
                "Total {}  ·  Current {}  ·  Correct {}  ·  Accuracy ",
                stats.total, stats.current, stats.correct
            ),
            Style::default().fg(Color::Gray),
        ),
        Span::styled(
            format!("{}%", stats.accuracy),
            Style::default().fg(accuracy_color).bold(),
        ),
    ];
    if pending {
        spans.push(Span::styled(
            "  ·  checking...",
            Style::default().fg(Color::Yellow),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_question_text(frame: &mut Frame, area: Rect, question: &Question) {
    let mut lines = vec![Line::from(Span::styled(
        question.text.as_str(),
        Style::default().fg(Color::White).bold(),
    ))];
    if let Some(image) = &question.image {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("[image: {}]", image),
            Style::default().fg(Color::DarkGray).italic(),
        )));
    }

    let widget = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .padding(Padding::horizontal(1)),
    );

    frame.render_widget(widget, area);
}

fn render_options(frame: &mut Frame, area: Rect, view: &QuizView) {
    let session = &view.session;
    let selected = session.current_display_answer();
    let feedback = session.feedback();
    let multiple = session.current_question().kind == QuestionKind::Multiple;

    let lines: Vec<Line> = session
        .mapping()
        .options()
        .iter()
        .enumerate()
        .map(|(row, option)| {
            let is_cursor = row == view.cursor;
            let is_selected = selected.contains(option.display);
            let mark = feedback
                .map(|f| f.mark(option.display))
                .unwrap_or(OptionMark::Neutral);

            let style = match mark {
                OptionMark::Correct => Style::default().fg(Color::Green).bold(),
                OptionMark::Incorrect => Style::default().fg(Color::Red).bold(),
                OptionMark::Neutral if is_selected => Style::default().fg(Color::Cyan).bold(),
                OptionMark::Neutral => Style::default().fg(Color::Gray),
            };
            let check = match (multiple, is_selected) {
                (true, true) => "[x] ",
                (true, false) => "[ ] ",
                (false, true) => "(*) ",
                (false, false) => "( ) ",
            };

            Line::from(vec![
                Span::styled(if is_cursor { "> " } else { "  " }, style),
                Span::styled(check, style),
                Span::styled(format!("{}. ", option.display), style),
                Span::styled(option.text.as_str(), style),
            ])
        })
        .collect();

    let title = if multiple {
        " Options (select all that apply) "
    } else {
        " Options "
    };
    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(title)
            .title_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(1)),
    );

    frame.render_widget(widget, area);
}

fn render_result(frame: &mut Frame, area: Rect, feedback: Option<&Feedback>) {
    let Some(feedback) = feedback else {
        return;
    };

    let (status, color) = if feedback.correct {
        ("Correct!", Color::Green)
    } else {
        ("Incorrect", Color::Red)
    };
    let your_answer = if feedback.user_answer.is_empty() {
        "none".to_string()
    } else {
        feedback.user_answer.to_string()
    };

    let mut lines = vec![
        Line::from(Span::styled(status, Style::default().fg(color).bold())),
        Line::from(vec![
            Span::styled("Your answer:    ", Style::default().fg(Color::Gray)),
            Span::styled(your_answer, Style::default().fg(Color::White)),
        ]),
        Line::from(vec![
            Span::styled("Correct answer: ", Style::default().fg(Color::Gray)),
            Span::styled(
                feedback.correct_answer.to_string(),
                Style::default().fg(Color::Green),
            ),
        ]),
    ];
    if let Some(explanation) = &feedback.explanation {
        lines.push(Line::from(Span::styled(
            explanation.as_str(),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let widget = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(" Result ")
            .title_style(Style::default().fg(color))
            .padding(Padding::horizontal(1)),
    );

    frame.render_widget(widget, area);
}

fn render_navigator(frame: &mut Frame, area: Rect, session: &Session) {
    let pager = session.pager();

    let spans: Vec<Span> = session
        .page_items()
        .into_iter()
        .map(|item| {
            let style = match item.state {
                NavState::Current => Style::default().fg(Color::Black).bg(Color::Cyan).bold(),
                NavState::Answered => Style::default().fg(Color::Green),
                NavState::Incorrect => Style::default().fg(Color::Red),
                NavState::Unanswered => Style::default().fg(Color::DarkGray),
            };
            Span::styled(format!("{:>3} ", item.index + 1), style)
        })
        .collect();

    let widget = Paragraph::new(Line::from(spans))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(format!(" Questions · page {}/{} ", pager.page(), pager.total_pages()))
                .title_style(Style::default().fg(Color::Cyan)),
        );

    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, view: &QuizView) {
    let session = &view.session;
    let select = match session.current_question().kind {
        QuestionKind::Single => "Space/A-D choose",
        QuestionKind::Multiple => "Space/A-D toggle",
    };
    let hints = [
        ("j/k move", true),
        (select, true),
        ("s submit", view.can_submit()),
        ("h prev", session.has_previous()),
        ("l next", session.has_next()),
        ("[/] page", session.pager().total_pages() > 1),
        ("g go to page", true),
        ("r setup", true),
        ("q quit", true),
    ];

    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (i, (hint, enabled)) in hints.into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ·  ", Style::default().fg(Color::DarkGray)));
        }
        let style = if enabled {
            Style::default().fg(Color::Gray)
        } else {
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)
        };
        spans.push(Span::styled(hint, style));
    }

    let widget = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);

    frame.render_widget(widget, area);
}
