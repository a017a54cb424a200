//! Terminal client event loop.
//!
//! All state lives in one [`ClientApp`] owned by the loop. Requests run as
//! spawned tasks and report back over a channel, which the loop drains
//! between input polls, so state is only ever mutated from here.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use log::{debug, info};
use tokio::sync::mpsc;

use crate::api::QuizApi;
use crate::config::ClientConfig;
use crate::error::QuizError;
use crate::models::Letter;
use crate::terminal::Tui;

use super::state::{ClientApp, ClientState, Request, Response};
use super::ui;

const INPUT_POLL: Duration = Duration::from_millis(50);

/// Run the quiz client until the user quits.
pub async fn run(config: ClientConfig) -> Result<(), QuizError> {
    config.validate()?;
    info!("starting client against {}", config.api_base);

    let api = QuizApi::new(config.api_base.clone());
    let mut app = ClientApp::new(&config);
    let (tx, mut rx) = mpsc::unbounded_channel::<Response>();

    dispatch(&api, &tx, Request::LoadCategories);

    let mut tui = Tui::enter()?;
    let result = run_tui(&mut tui, &mut app, &api, &tx, &mut rx).await;
    tui.exit()?;
    result
}

async fn run_tui(
    tui: &mut Tui,
    app: &mut ClientApp,
    api: &QuizApi,
    tx: &mpsc::UnboundedSender<Response>,
    rx: &mut mpsc::UnboundedReceiver<Response>,
) -> Result<(), QuizError> {
    loop {
        while let Ok(response) = rx.try_recv() {
            app.handle_response(response);
        }

        if app.should_quit {
            break;
        }

        tui.draw(|frame| ui::render(frame, app))?;

        if event::poll(INPUT_POLL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                if let Some(request) = handle_input(app, key.code) {
                    dispatch(api, tx, request);
                }
            }
        } else {
            tokio::task::yield_now().await;
        }
    }

    Ok(())
}

/// Runs `request` in the background and posts the outcome to `tx`.
fn dispatch(api: &QuizApi, tx: &mpsc::UnboundedSender<Response>, request: Request) {
    debug!("dispatching {:?}", request);
    let api = api.clone();
    let tx = tx.clone();

    tokio::spawn(async move {
        let response = match request {
            Request::LoadCategories => Response::Categories(api.categories().await),
            Request::FetchQuestions {
                generation,
                setup,
                shuffle,
            } => {
                let result = api.questions(&setup).await;
                Response::Questions {
                    generation,
                    setup,
                    shuffle,
                    result,
                }
            }
            Request::CheckAnswer(submission) => {
                let result = api.check_answer(&submission.request).await;
                Response::Verdict { submission, result }
            }
        };
        // the receiver is gone only when the client is shutting down
        let _ = tx.send(response);
    });
}

/// Handle keyboard input, returning network work to start.
fn handle_input(app: &mut ClientApp, key: KeyCode) -> Option<Request> {
    if app.notice.is_some() {
        app.dismiss_notice();
        return None;
    }

    match &app.state {
        ClientState::Loading { .. } => {
            if matches!(key, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc) {
                app.should_quit = true;
            }
            None
        }
        ClientState::Setup => handle_setup_input(app, key),
        ClientState::Quiz(_) => handle_quiz_input(app, key),
    }
}

fn handle_setup_input(app: &mut ClientApp, key: KeyCode) -> Option<Request> {
    match key {
        KeyCode::Up | KeyCode::Char('k') => app.select_previous_category(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next_category(),
        KeyCode::Char(c) if c.is_ascii_digit() => app.count_input_push(c),
        KeyCode::Backspace => app.count_input_pop(),
        KeyCode::Char('m') | KeyCode::Char('M') => app.toggle_sequential(),
        KeyCode::Char('s') | KeyCode::Char('S') => app.toggle_shuffle(),
        KeyCode::Char('l') | KeyCode::Char('L') => return Some(app.reload_categories()),
        KeyCode::Enter => return app.start_quiz(),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => app.should_quit = true,
        _ => {}
    }
    None
}

fn handle_quiz_input(app: &mut ClientApp, key: KeyCode) -> Option<Request> {
    match key {
        KeyCode::Up | KeyCode::Char('k') => app.cursor_up(),
        KeyCode::Down | KeyCode::Char('j') => app.cursor_down(),
        KeyCode::Enter | KeyCode::Char(' ') => app.select_at_cursor(),
        KeyCode::Char(c) if Letter::from_char(c).is_some() => {
            if let Some(letter) = Letter::from_char(c) {
                app.select_letter(letter);
            }
        }
        KeyCode::Char('s') | KeyCode::Char('S') => return app.submit(),
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('p') => app.previous_question(),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('n') => app.next_question(),
        KeyCode::Char('[') => app.previous_page(),
        KeyCode::Char(']') => app.next_page(),
        KeyCode::Char('g') => app.jump_to_page_start(),
        KeyCode::Char('r') | KeyCode::Char('R') => app.back_to_setup(),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => app.should_quit = true,
        _ => {}
    }
    None
}
