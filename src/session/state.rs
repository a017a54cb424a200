//! Quiz session state.
//!
//! A [`Session`] owns the loaded questions, the user's answers, the grading
//! tally and the navigator page. It never touches the network: submitting is
//! split into [`Session::prepare_submission`], which builds the request, and
//! [`Session::apply_verdict`], which folds the server's answer back in.

use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use uuid::Uuid;

use crate::error::QuizError;
use crate::models::{AnswerSet, Letter, Question, QuestionKind};
use crate::protocol::{CheckAnswerRequest, QuizSetup, Verdict};

use super::mapping::DisplayMapping;
use super::pagination::{NavItem, NavState, Pager};

/// Highlight of one displayed option after grading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionMark {
    Correct,
    Incorrect,
    Neutral,
}

/// Grading result, translated to the letters currently on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub correct: bool,
    pub correct_answer: AnswerSet,
    pub user_answer: AnswerSet,
    pub explanation: Option<String>,
}

impl Feedback {
    pub fn mark(&self, display: Letter) -> OptionMark {
        if self.correct_answer.contains(display) {
            OptionMark::Correct
        } else if self.user_answer.contains(display) {
            OptionMark::Incorrect
        } else {
            OptionMark::Neutral
        }
    }
}

/// A pending answer check, tagged with where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub session_id: Uuid,
    pub question_index: usize,
    pub request: CheckAnswerRequest,
}

/// Summary figures for the stats bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub total: usize,
    pub current: usize,
    pub correct: usize,
    pub accuracy: u32,
    pub progress: u32,
}

/// One quiz run.
pub struct Session {
    id: Uuid,
    setup: QuizSetup,
    questions: Vec<Question>,
    /// Canonical letters, one entry per question.
    answers: Vec<AnswerSet>,
    current: usize,
    correct_count: usize,
    shuffle: bool,
    rng: StdRng,
    mapping: DisplayMapping,
    feedback: Option<Feedback>,
    pager: Pager,
}

impl Session {
    /// Starts a session over a freshly fetched batch.
    pub fn start(
        setup: QuizSetup,
        questions: Vec<Question>,
        shuffle: bool,
    ) -> Result<Self, QuizError> {
        Self::start_with_rng(setup, questions, shuffle, StdRng::from_rng(&mut rand::rng()))
    }

    /// Like [`Session::start`] with a caller-provided random source.
    pub fn start_with_rng(
        setup: QuizSetup,
        questions: Vec<Question>,
        shuffle: bool,
        rng: StdRng,
    ) -> Result<Self, QuizError> {
        setup.validate()?;
        if questions.is_empty() {
            return Err(QuizError::NoQuestions);
        }

        let mut session = Self {
            id: Uuid::new_v4(),
            setup,
            answers: vec![AnswerSet::empty(); questions.len()],
            pager: Pager::new(questions.len()),
            questions,
            current: 0,
            correct_count: 0,
            shuffle,
            rng,
            mapping: DisplayMapping::default(),
            feedback: None,
        };
        session.present_current();

        info!(
            "session {} started: {} questions from {:?}",
            session.id,
            session.questions.len(),
            session.setup.category
        );
        Ok(session)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_question(&self) -> &Question {
        &self.questions[self.current]
    }

    /// Display order of the current question's options.
    pub fn mapping(&self) -> &DisplayMapping {
        &self.mapping
    }

    /// Stored answer of a question, in canonical letters.
    pub fn answer(&self, index: usize) -> Option<AnswerSet> {
        self.answers.get(index).copied()
    }

    /// Current answer as the user sees it.
    pub fn current_display_answer(&self) -> AnswerSet {
        self.mapping.to_display(self.answers[self.current])
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn correct_count(&self) -> usize {
        self.correct_count
    }

    /// Number of questions with a non-empty answer.
    pub fn answered_count(&self) -> usize {
        self.answers.iter().filter(|a| !a.is_empty()).count()
    }

    /// Correct answers as a rounded percentage of attempted questions.
    pub fn accuracy(&self) -> u32 {
        let attempted = self.answered_count();
        if attempted == 0 {
            return 0;
        }
        let ratio = self.correct_count as f64 / attempted as f64;
        ((ratio * 100.0).round() as u32).min(100)
    }

    pub fn stats(&self) -> Stats {
        let progress = ((self.current + 1) as f64 / self.questions.len() as f64 * 100.0).round();
        Stats {
            total: self.questions.len(),
            current: self.current + 1,
            correct: self.correct_count,
            accuracy: self.accuracy(),
            progress: progress as u32,
        }
    }

    /// Records a click on a displayed option.
    ///
    /// Single-choice questions take the letter as the whole answer,
    /// multiple-choice questions toggle it.
    pub fn record_selection(&mut self, display: Letter) {
        let Some(canonical) = self.mapping.canonical_of(display) else {
            return;
        };

        let answer = &mut self.answers[self.current];
        match self.questions[self.current].kind {
            QuestionKind::Single => *answer = AnswerSet::single(canonical),
            QuestionKind::Multiple => answer.toggle(canonical),
        }
    }

    /// Makes `index` the current question. Out-of-range indices and the
    /// current index are ignored. Answers are kept as they are.
    pub fn go_to(&mut self, index: usize) {
        if index >= self.questions.len() || index == self.current {
            return;
        }
        self.current = index;
        self.pager.show_index(index);
        self.present_current();
    }

    pub fn previous(&mut self) {
        if self.current > 0 {
            self.go_to(self.current - 1);
        }
    }

    pub fn next(&mut self) {
        self.go_to(self.current + 1);
    }

    pub fn has_previous(&self) -> bool {
        self.current > 0
    }

    pub fn has_next(&self) -> bool {
        self.current + 1 < self.questions.len()
    }

    /// Builds the answer check for the current question.
    pub fn prepare_submission(&self) -> Result<Submission, QuizError> {
        let answer = self.answers[self.current];
        if answer.is_empty() {
            return Err(QuizError::NoSelection);
        }

        let question = &self.questions[self.current];
        Ok(Submission {
            session_id: self.id,
            question_index: self.current,
            request: CheckAnswerRequest {
                category: self.setup.category.clone(),
                question_id: question.id.clone(),
                answer,
            },
        })
    }

    /// Applies the server's verdict for `submission`.
    ///
    /// Returns `None` when the submission belongs to another session or the
    /// user has since moved to another question; nothing is changed then.
    /// Answer letters the server sends that cannot be parsed only lose their
    /// highlight; the grade itself is always counted.
    pub fn apply_verdict(
        &mut self,
        submission: &Submission,
        verdict: Verdict,
    ) -> Option<&Feedback> {
        if submission.session_id != self.id || submission.question_index != self.current {
            debug!(
                "discarding stale verdict for question {} of session {}",
                submission.question_index, submission.session_id
            );
            return None;
        }

        let question = &mut self.questions[self.current];
        if verdict.correct && !question.answered {
            question.answered = true;
            self.correct_count += 1;
        }
        info!(
            "question {} graded {}",
            question.id,
            if verdict.correct { "correct" } else { "incorrect" }
        );

        let correct_answer = lenient_answer(&verdict.correct_answer);
        let user_answer = if verdict.user_answer.trim().is_empty() {
            submission.request.answer
        } else {
            lenient_answer(&verdict.user_answer)
        };

        self.feedback = Some(Feedback {
            correct: verdict.correct,
            correct_answer: self.mapping.to_display(correct_answer),
            user_answer: self.mapping.to_display(user_answer),
            explanation: verdict.explanation.filter(|e| !e.trim().is_empty()),
        });
        self.feedback.as_ref()
    }

    /// Navigator page currently shown.
    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    /// Shows the page holding `index` and makes it current.
    pub fn jump_to(&mut self, index: usize) {
        if index >= self.questions.len() {
            return;
        }
        self.pager.show_index(index);
        self.go_to(index);
    }

    pub fn previous_page(&mut self) {
        self.pager.previous_page();
    }

    pub fn next_page(&mut self) {
        self.pager.next_page();
    }

    /// Navigator entries of the visible page.
    pub fn page_items(&self) -> Vec<NavItem> {
        self.pager
            .range()
            .map(|index| NavItem {
                index,
                state: self.nav_state(index),
            })
            .collect()
    }

    fn nav_state(&self, index: usize) -> NavState {
        if index == self.current {
            NavState::Current
        } else if self.answers[index].is_empty() {
            NavState::Unanswered
        } else if self.questions[index].answered {
            NavState::Answered
        } else {
            NavState::Incorrect
        }
    }

    fn present_current(&mut self) {
        let question = &self.questions[self.current];
        self.mapping = if self.shuffle {
            DisplayMapping::shuffled(question, &mut self.rng)
        } else {
            DisplayMapping::identity(question)
        };
        self.feedback = None;
    }
}

fn lenient_answer(letters: &str) -> AnswerSet {
    letters.parse::<AnswerSet>().unwrap_or_else(|err| {
        warn!("server sent unusable answer letters: {}", err);
        AnswerSet::empty()
    })
}
