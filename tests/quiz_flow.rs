use quiz_bank::QuizError;
use quiz_bank::models::{Letter, OptionTexts, Question, QuestionKind};
use quiz_bank::protocol::{QuizSetup, Verdict};
use quiz_bank::session::{NavState, Session};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn question(id: &str, kind: QuestionKind, options: &[(Letter, &str)]) -> Question {
    Question {
        id: id.to_string(),
        kind,
        text: format!("Question {}", id),
        chapter: "1".to_string(),
        code: format!("NET-{}", id),
        options: options
            .iter()
            .map(|(l, t)| (*l, t.to_string()))
            .collect::<OptionTexts>(),
        image: None,
        answered: false,
    }
}

fn xyz(id: &str) -> Question {
    question(
        id,
        QuestionKind::Single,
        &[(Letter::A, "x"), (Letter::B, "y"), (Letter::C, "z")],
    )
}

fn verdict(correct: bool, correct_answer: &str, user_answer: &str) -> Verdict {
    Verdict {
        correct,
        correct_answer: correct_answer.to_string(),
        user_answer: user_answer.to_string(),
        explanation: Some(format!("The correct answer is {}", correct_answer)),
    }
}

#[test]
fn test_single_question_without_shuffle() {
    let mut session = Session::start(QuizSetup::random("networking", 1), vec![xyz("1")], false)
        .unwrap();

    session.record_selection(Letter::B);
    let submission = session.prepare_submission().unwrap();
    assert_eq!(submission.request.answer.to_string(), "B");
    assert_eq!(submission.request.category, "networking");
    assert_eq!(submission.request.question_id, "1");

    let feedback = session
        .apply_verdict(&submission, verdict(true, "B", "B"))
        .unwrap();
    assert!(feedback.correct);

    assert_eq!(session.accuracy(), 100);
    assert!(session.current_question().answered);
}

#[test]
fn test_shuffled_selection_is_translated() {
    let mut session = (0..200)
        .map(|seed| {
            Session::start_with_rng(
                QuizSetup::random("networking", 1),
                vec![xyz("1")],
                true,
                StdRng::seed_from_u64(seed),
            )
            .unwrap()
        })
        .find(|s| s.mapping().display_of(Letter::B) == Some(Letter::A))
        .expect("some seed shows B under A");

    session.record_selection(Letter::A);
    let submission = session.prepare_submission().unwrap();
    assert_eq!(submission.request.answer.to_string(), "B");

    let feedback = session
        .apply_verdict(&submission, verdict(true, "B", "B"))
        .unwrap()
        .clone();
    assert_eq!(feedback.correct_answer.to_string(), "A");
    assert_eq!(feedback.user_answer.to_string(), "A");
    assert_eq!(session.current_display_answer().to_string(), "A");
}

#[test]
fn test_revisit_keeps_answer_and_does_not_double_count() {
    let mut session = Session::start(
        QuizSetup::random("networking", 2),
        vec![xyz("1"), xyz("2")],
        false,
    )
    .unwrap();

    session.record_selection(Letter::B);
    let submission = session.prepare_submission().unwrap();
    session
        .apply_verdict(&submission, verdict(true, "B", "B"))
        .unwrap();

    session.go_to(1);
    session.go_to(0);
    assert_eq!(session.current_display_answer().to_string(), "B");
    assert!(session.current_question().answered);
    assert!(session.feedback().is_none());

    let submission = session.prepare_submission().unwrap();
    assert!(
        session
            .apply_verdict(&submission, verdict(true, "B", "B"))
            .is_some()
    );
    assert_eq!(session.correct_count(), 1);
}

#[test]
fn test_reshuffle_on_revisit_keeps_selected_options() {
    let q = question(
        "1",
        QuestionKind::Multiple,
        &[
            (Letter::A, "red"),
            (Letter::B, "green"),
            (Letter::C, "blue"),
            (Letter::D, "black"),
        ],
    );
    let mut session = Session::start_with_rng(
        QuizSetup::sequential("colours"),
        vec![q, xyz("2")],
        true,
        StdRng::seed_from_u64(3),
    )
    .unwrap();

    let green = session.mapping().display_of(Letter::B).unwrap();
    let black = session.mapping().display_of(Letter::D).unwrap();
    session.record_selection(black);
    session.record_selection(green);
    let stored = session.answer(0).unwrap();
    assert_eq!(stored.to_string(), "BD");

    for _ in 0..10 {
        session.next();
        session.previous();
        assert_eq!(session.answer(0), Some(stored));

        let mut shown: Vec<&str> = session
            .mapping()
            .options()
            .iter()
            .filter(|o| session.current_display_answer().contains(o.display))
            .map(|o| o.text.as_str())
            .collect();
        shown.sort();
        assert_eq!(shown, vec!["black", "green"]);
    }
}

#[test]
fn test_jump_switches_pages() {
    let questions: Vec<Question> = (0..120).map(|i| xyz(&i.to_string())).collect();
    let mut session = Session::start(QuizSetup::sequential("networking"), questions, false)
        .unwrap();

    session.jump_to(119);
    assert_eq!(session.pager().page(), 3);
    assert_eq!(session.current_index(), 119);
    let items = session.page_items();
    assert_eq!(items.len(), 20);
    assert_eq!(items.last().unwrap().state, NavState::Current);

    session.jump_to(0);
    assert_eq!(session.pager().page(), 1);
    assert_eq!(session.page_items().len(), 50);

    session.jump_to(120);
    assert_eq!(session.current_index(), 0);

    session.previous_page();
    assert_eq!(session.pager().page(), 1);
}

#[test]
fn test_accuracy_stays_in_bounds() {
    let mut session = Session::start(
        QuizSetup::random("networking", 2),
        vec![
            question("1", QuestionKind::Multiple, &[(Letter::A, "x"), (Letter::B, "y")]),
            xyz("2"),
        ],
        false,
    )
    .unwrap();
    assert_eq!(session.accuracy(), 0);

    session.record_selection(Letter::A);
    let submission = session.prepare_submission().unwrap();
    session
        .apply_verdict(&submission, verdict(true, "A", "A"))
        .unwrap();
    assert_eq!(session.accuracy(), 100);

    // clearing a graded multi-select answer must not push accuracy past 100
    session.record_selection(Letter::A);
    assert!(session.current_display_answer().is_empty());
    assert!(session.accuracy() <= 100);

    assert!(matches!(
        session.prepare_submission(),
        Err(QuizError::NoSelection)
    ));
}

#[test]
fn test_garbled_correct_answer_still_counts() {
    let mut session = Session::start(QuizSetup::random("networking", 1), vec![xyz("1")], false)
        .unwrap();

    session.record_selection(Letter::B);
    let submission = session.prepare_submission().unwrap();
    let feedback = session
        .apply_verdict(&submission, verdict(true, "B.", "B"))
        .unwrap()
        .clone();

    assert!(feedback.correct);
    assert!(feedback.correct_answer.is_empty());
    assert_eq!(feedback.user_answer.to_string(), "B");
    assert_eq!(session.correct_count(), 1);
    assert!(session.current_question().answered);
    assert_eq!(session.accuracy(), 100);
}
