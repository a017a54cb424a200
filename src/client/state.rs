//! Client state management.

use log::{info, warn};

use crate::config::ClientConfig;
use crate::error::QuizError;
use crate::models::{Letter, Question};
use crate::protocol::{CategoryInfo, QuizSetup, Verdict};
use crate::session::{Session, Submission};

/// Network work requested by a state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    LoadCategories,
    FetchQuestions {
        generation: u64,
        setup: QuizSetup,
        shuffle: bool,
    },
    CheckAnswer(Submission),
}

/// Completed network work, fed back into the state.
#[derive(Debug)]
pub enum Response {
    Categories(Result<Vec<CategoryInfo>, QuizError>),
    Questions {
        generation: u64,
        setup: QuizSetup,
        shuffle: bool,
        result: Result<Vec<Question>, QuizError>,
    },
    Verdict {
        submission: Submission,
        result: Result<Verdict, QuizError>,
    },
}

/// Choices made on the setup screen. Kept across quizzes.
#[derive(Debug, Clone, Default)]
pub struct SetupForm {
    pub categories: Vec<CategoryInfo>,
    pub selected: usize,
    pub count_input: String,
    pub sequential: bool,
    pub shuffle: bool,
}

impl SetupForm {
    fn from_config(config: &ClientConfig) -> Self {
        Self {
            categories: Vec::new(),
            selected: 0,
            count_input: config.count.to_string(),
            sequential: config.sequential,
            shuffle: config.shuffle,
        }
    }

    pub fn selected_category(&self) -> Option<&CategoryInfo> {
        self.categories.get(self.selected)
    }

    /// Builds the quiz setup, rejecting it before any request is made.
    pub fn to_setup(&self) -> Result<QuizSetup, QuizError> {
        let category = self
            .selected_category()
            .map(|c| c.name.clone())
            .ok_or_else(|| QuizError::InvalidConfiguration("select a question bank first".into()))?;

        let setup = if self.sequential {
            QuizSetup::sequential(category)
        } else {
            let count = self.count_input.trim().parse::<usize>().map_err(|_| {
                QuizError::InvalidConfiguration(format!(
                    "question count {:?} is not a number",
                    self.count_input
                ))
            })?;
            QuizSetup::random(category, count)
        };
        setup.validate()?;
        Ok(setup)
    }
}

/// A running quiz plus its view state.
pub struct QuizView {
    pub session: Session,
    /// Highlighted row in the option list.
    pub cursor: usize,
    /// An answer check is in flight.
    pub pending: bool,
}

impl QuizView {
    fn new(session: Session) -> Self {
        Self {
            session,
            cursor: 0,
            pending: false,
        }
    }

    /// Display letter under the cursor.
    pub fn cursor_letter(&self) -> Option<Letter> {
        self.session
            .mapping()
            .options()
            .get(self.cursor)
            .map(|o| o.display)
    }

    /// Whether `s` would send a check right now.
    pub fn can_submit(&self) -> bool {
        !self.pending && !self.session.current_display_answer().is_empty()
    }
}

/// Current screen of the client.
pub enum ClientState {
    /// Waiting for the server.
    Loading { message: String },
    /// Choosing bank, mode and count.
    Setup,
    /// Answering questions.
    Quiz(QuizView),
}

/// Client application state.
pub struct ClientApp {
    pub state: ClientState,
    pub form: SetupForm,
    pub api_base: String,
    /// Blocking message; any key dismisses it.
    pub notice: Option<String>,
    pub should_quit: bool,
    preferred_category: Option<String>,
    generation: u64,
}

impl ClientApp {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            state: ClientState::Loading {
                message: format!("Loading question banks from {}...", config.api_base),
            },
            form: SetupForm::from_config(config),
            api_base: config.api_base.clone(),
            notice: None,
            should_quit: false,
            preferred_category: config.category.clone(),
            generation: 0,
        }
    }

    pub fn show_notice(&mut self, message: impl Into<String>) {
        self.notice = Some(message.into());
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn reload_categories(&mut self) -> Request {
        self.state = ClientState::Loading {
            message: format!("Loading question banks from {}...", self.api_base),
        };
        Request::LoadCategories
    }

    /// Applies a finished network call.
    pub fn handle_response(&mut self, response: Response) {
        match response {
            Response::Categories(result) => self.categories_loaded(result),
            Response::Questions {
                generation,
                setup,
                shuffle,
                result,
            } => self.questions_loaded(generation, setup, shuffle, result),
            Response::Verdict { submission, result } => self.verdict_received(&submission, result),
        }
    }

    fn categories_loaded(&mut self, result: Result<Vec<CategoryInfo>, QuizError>) {
        self.state = ClientState::Setup;
        match result {
            Ok(categories) => {
                info!("loaded {} question banks", categories.len());
                let preferred = self
                    .preferred_category
                    .as_deref()
                    .and_then(|name| categories.iter().position(|c| c.name == name));
                self.form.selected = preferred.unwrap_or(0);
                self.form.categories = categories;
            }
            Err(err) => {
                warn!("loading categories failed: {}", err);
                self.show_notice(format!(
                    "{}\n\nMake sure the quiz server is running, then press [L] to retry.",
                    err
                ));
            }
        }
    }

    pub fn select_next_category(&mut self) {
        if !self.form.categories.is_empty() {
            self.form.selected = (self.form.selected + 1) % self.form.categories.len();
        }
    }

    pub fn select_previous_category(&mut self) {
        let len = self.form.categories.len();
        if len > 0 {
            self.form.selected = (self.form.selected + len - 1) % len;
        }
    }

    pub fn count_input_push(&mut self, c: char) {
        if c.is_ascii_digit() && self.form.count_input.len() < 3 {
            self.form.count_input.push(c);
        }
    }

    pub fn count_input_pop(&mut self) {
        self.form.count_input.pop();
    }

    pub fn toggle_sequential(&mut self) {
        self.form.sequential = !self.form.sequential;
    }

    pub fn toggle_shuffle(&mut self) {
        self.form.shuffle = !self.form.shuffle;
    }

    /// Starts a quiz from the setup form.
    pub fn start_quiz(&mut self) -> Option<Request> {
        let setup = match self.form.to_setup() {
            Ok(setup) => setup,
            Err(err) => {
                self.show_notice(err.to_string());
                return None;
            }
        };

        self.generation += 1;
        self.state = ClientState::Loading {
            message: format!("Loading questions from {}...", setup.category),
        };
        Some(Request::FetchQuestions {
            generation: self.generation,
            setup,
            shuffle: self.form.shuffle,
        })
    }

    fn questions_loaded(
        &mut self,
        generation: u64,
        setup: QuizSetup,
        shuffle: bool,
        result: Result<Vec<Question>, QuizError>,
    ) {
        if generation != self.generation {
            warn!("discarding question batch of superseded request {}", generation);
            return;
        }

        match result.and_then(|questions| Session::start(setup, questions, shuffle)) {
            Ok(session) => self.state = ClientState::Quiz(QuizView::new(session)),
            Err(err) => {
                warn!("starting quiz failed: {}", err);
                self.state = ClientState::Setup;
                self.show_notice(failure_notice("Failed to load questions", &err));
            }
        }
    }

    /// Leaves the running quiz for the setup screen.
    pub fn back_to_setup(&mut self) {
        self.generation += 1;
        self.state = ClientState::Setup;
    }

    pub fn quiz(&self) -> Option<&QuizView> {
        match &self.state {
            ClientState::Quiz(view) => Some(view),
            _ => None,
        }
    }

    fn quiz_mut(&mut self) -> Option<&mut QuizView> {
        match &mut self.state {
            ClientState::Quiz(view) => Some(view),
            _ => None,
        }
    }

    pub fn cursor_down(&mut self) {
        if let Some(view) = self.quiz_mut() {
            let len = view.session.mapping().len();
            if len > 0 {
                view.cursor = (view.cursor + 1) % len;
            }
        }
    }

    pub fn cursor_up(&mut self) {
        if let Some(view) = self.quiz_mut() {
            let len = view.session.mapping().len();
            if len > 0 {
                view.cursor = (view.cursor + len - 1) % len;
            }
        }
    }

    /// Selects the option under the cursor.
    pub fn select_at_cursor(&mut self) {
        if let Some(view) = self.quiz_mut() {
            if let Some(letter) = view.cursor_letter() {
                view.session.record_selection(letter);
            }
        }
    }

    /// Selects an option by its displayed letter and moves the cursor there.
    pub fn select_letter(&mut self, letter: Letter) {
        if let Some(view) = self.quiz_mut() {
            let row = view
                .session
                .mapping()
                .options()
                .iter()
                .position(|o| o.display == letter);
            if let Some(row) = row {
                view.cursor = row;
                view.session.record_selection(letter);
            }
        }
    }

    /// Runs `f` on the session and resets the cursor if the question changed.
    fn navigate(&mut self, f: impl FnOnce(&mut Session)) {
        if let Some(view) = self.quiz_mut() {
            let before = view.session.current_index();
            f(&mut view.session);
            if view.session.current_index() != before {
                view.cursor = 0;
            }
        }
    }

    pub fn previous_question(&mut self) {
        self.navigate(Session::previous);
    }

    pub fn next_question(&mut self) {
        self.navigate(Session::next);
    }

    pub fn jump_to(&mut self, index: usize) {
        self.navigate(|session| session.jump_to(index));
    }

    pub fn previous_page(&mut self) {
        self.navigate(Session::previous_page);
    }

    pub fn next_page(&mut self) {
        self.navigate(Session::next_page);
    }

    /// Jumps to the first question of the visible navigator page.
    pub fn jump_to_page_start(&mut self) {
        self.navigate(|session| {
            let start = session.pager().range().start;
            session.jump_to(start);
        });
    }

    /// Submits the current answer unless a check is already in flight.
    pub fn submit(&mut self) -> Option<Request> {
        let view = self.quiz_mut()?;
        if view.pending {
            return None;
        }

        match view.session.prepare_submission() {
            Ok(submission) => {
                view.pending = true;
                Some(Request::CheckAnswer(submission))
            }
            Err(err) => {
                self.show_notice(err.to_string());
                None
            }
        }
    }

    fn verdict_received(&mut self, submission: &Submission, result: Result<Verdict, QuizError>) {
        let Some(view) = self.quiz_mut() else {
            return;
        };
        if view.session.id() != submission.session_id {
            return;
        }
        view.pending = false;

        match result {
            Ok(verdict) => {
                if view.session.apply_verdict(submission, verdict).is_none() {
                    warn!(
                        "verdict for question {} arrived after navigation",
                        submission.question_index + 1
                    );
                }
            }
            Err(err) => {
                warn!("submitting answer failed: {}", err);
                self.show_notice(failure_notice("Submitting the answer failed", &err));
            }
        }
    }
}

/// Notice text for a failed request. Server messages are shown unchanged.
fn failure_notice(action: &str, err: &QuizError) -> String {
    match err {
        QuizError::ServerReported(message) => message.clone(),
        other => format!("{}: {}", action, other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{OptionTexts, QuestionKind};

    fn categories() -> Vec<CategoryInfo> {
        ["A bank", "networking"]
            .into_iter()
            .map(|name| CategoryInfo {
                name: name.to_string(),
                count: Some(3),
            })
            .collect()
    }

    fn question(id: &str) -> Question {
        Question {
            id: id.to_string(),
            kind: QuestionKind::Single,
            text: "q".to_string(),
            chapter: String::new(),
            code: String::new(),
            options: [(Letter::A, "x".to_string()), (Letter::B, "y".to_string())]
                .into_iter()
                .collect::<OptionTexts>(),
            image: None,
            answered: false,
        }
    }

    fn ready_app() -> ClientApp {
        let config = ClientConfig {
            category: Some("networking".to_string()),
            ..ClientConfig::default()
        };
        let mut app = ClientApp::new(&config);
        app.handle_response(Response::Categories(Ok(categories())));
        app
    }

    fn started_app() -> ClientApp {
        let mut app = ready_app();
        let Some(Request::FetchQuestions {
            generation,
            setup,
            shuffle,
        }) = app.start_quiz()
        else {
            panic!("expected a question request");
        };
        app.handle_response(Response::Questions {
            generation,
            setup,
            shuffle,
            result: Ok(vec![question("1"), question("2")]),
        });
        app
    }

    #[test]
    fn test_preferred_category_selected() {
        let app = ready_app();
        assert!(matches!(app.state, ClientState::Setup));
        assert_eq!(app.form.selected_category().unwrap().name, "networking");
    }

    #[test]
    fn test_start_rejects_bad_count() {
        let mut app = ready_app();
        app.form.count_input = "0".to_string();
        assert!(app.start_quiz().is_none());
        assert!(app.notice.is_some());
        assert!(matches!(app.state, ClientState::Setup));

        app.dismiss_notice();
        app.form.count_input.clear();
        app.count_input_push('x');
        assert_eq!(app.form.count_input, "");
        assert!(app.start_quiz().is_none());
    }

    #[test]
    fn test_start_without_categories() {
        let mut app = ClientApp::new(&ClientConfig::default());
        app.handle_response(Response::Categories(Ok(Vec::new())));
        assert!(app.start_quiz().is_none());
        assert!(app.notice.is_some());
    }

    #[test]
    fn test_superseded_batch_ignored() {
        let mut app = ready_app();
        let Some(Request::FetchQuestions { setup, shuffle, .. }) = app.start_quiz() else {
            panic!("expected a question request");
        };
        app.back_to_setup();
        app.handle_response(Response::Questions {
            generation: 1,
            setup,
            shuffle,
            result: Ok(vec![question("1")]),
        });
        assert!(matches!(app.state, ClientState::Setup));
    }

    #[test]
    fn test_submit_flow() {
        let mut app = started_app();
        assert!(app.submit().is_none());
        assert!(app.notice.take().is_some());

        app.cursor_down();
        app.select_at_cursor();
        let Some(Request::CheckAnswer(submission)) = app.submit() else {
            panic!("expected an answer check");
        };
        assert_eq!(submission.request.answer.to_string(), "B");
        assert!(app.submit().is_none());

        app.handle_response(Response::Verdict {
            submission,
            result: Ok(Verdict {
                correct: true,
                correct_answer: "B".to_string(),
                user_answer: "B".to_string(),
                explanation: None,
            }),
        });
        let view = app.quiz().unwrap();
        assert!(!view.pending);
        assert_eq!(view.session.correct_count(), 1);
        assert!(view.session.feedback().unwrap().correct);
    }

    #[test]
    fn test_server_error_shown_verbatim() {
        let mut app = ready_app();
        let Some(Request::FetchQuestions {
            generation,
            setup,
            shuffle,
        }) = app.start_quiz()
        else {
            panic!("expected a question request");
        };
        app.handle_response(Response::Questions {
            generation,
            setup,
            shuffle,
            result: Err(QuizError::ServerReported("Category not found".to_string())),
        });
        assert!(matches!(app.state, ClientState::Setup));
        assert_eq!(app.notice.as_deref(), Some("Category not found"));
    }

    #[test]
    fn test_check_failure_notice() {
        let mut app = started_app();
        app.select_letter(Letter::A);
        let Some(Request::CheckAnswer(submission)) = app.submit() else {
            panic!("expected an answer check");
        };
        app.handle_response(Response::Verdict {
            submission: submission.clone(),
            result: Err(QuizError::ServerReported("Question not found".to_string())),
        });
        assert_eq!(app.notice.take().as_deref(), Some("Question not found"));
        assert!(!app.quiz().unwrap().pending);

        app.handle_response(Response::Verdict {
            submission,
            result: Err(QuizError::NoQuestions),
        });
        let notice = app.notice.unwrap();
        assert!(notice.starts_with("Submitting the answer failed: "));
    }

    #[test]
    fn test_can_submit_needs_answer_and_idle() {
        let mut app = started_app();
        assert!(!app.quiz().unwrap().can_submit());

        app.select_letter(Letter::B);
        assert!(app.quiz().unwrap().can_submit());

        assert!(app.submit().is_some());
        assert!(!app.quiz().unwrap().can_submit());
    }

    #[test]
    fn test_navigation_resets_cursor() {
        let mut app = started_app();
        app.cursor_down();
        app.next_question();
        assert_eq!(app.quiz().unwrap().cursor, 0);
        assert_eq!(app.quiz().unwrap().session.current_index(), 1);

        app.select_letter(Letter::B);
        assert_eq!(app.quiz().unwrap().cursor, 1);
        app.previous_question();
        app.jump_to_page_start();
        assert_eq!(app.quiz().unwrap().session.current_index(), 0);
    }
}
