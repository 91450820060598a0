// tests/board_tests.rs

use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use async_trait::async_trait;
use quizboard::{
    board::QuizBoard,
    error::AppError,
    models::{
        attempt::AttemptDraft,
        question::{QuestionDraft, QuestionType},
        quiz::QuizDraft,
    },
    store::{
        Collection, KeyValueStore, MemoryStore, SqliteStore, load_collection,
        repository::ChangeEvent,
    },
};

/// Store that can be switched to reject all writes, or only writes of the
/// users collection.
#[derive(Default)]
struct FlakyStore {
    inner: MemoryStore,
    fail_writes: AtomicBool,
    fail_user_writes: AtomicBool,
}

#[async_trait]
impl KeyValueStore for FlakyStore {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: String) -> Result<(), AppError> {
        if self.fail_writes.load(Ordering::SeqCst)
            || (key == Collection::Users.key() && self.fail_user_writes.load(Ordering::SeqCst))
        {
            return Err(AppError::InternalServerError("disk full".to_string()));
        }
        self.inner.set(key, value).await
    }
}

async fn seeded_board() -> QuizBoard {
    let mut board = QuizBoard::open(Arc::new(MemoryStore::new())).await.unwrap();
    board.seed_if_empty().await.unwrap();
    board
}

fn math_answers(correct_text: &str) -> HashMap<String, Vec<String>> {
    HashMap::from([
        ("1".to_string(), vec!["42".to_string()]),
        ("2".to_string(), vec!["17".to_string()]),
        ("3".to_string(), vec![correct_text.to_string()]),
    ])
}

fn quiz_draft(title: &str) -> QuizDraft {
    QuizDraft {
        title: title.to_string(),
        description: "Ownership and borrowing".to_string(),
        tags: vec!["rust".to_string()],
        questions: vec![
            QuestionDraft {
                id: None,
                question_type: QuestionType::Single,
                prompt: "Which keyword makes a binding mutable?".to_string(),
                options: Some(vec!["mut".to_string(), "var".to_string()]),
                correct_answers: vec!["mut".to_string()],
                points: 4,
            },
            QuestionDraft {
                id: None,
                question_type: QuestionType::Text,
                prompt: "Name the trait behind `?` conversions".to_string(),
                options: None,
                correct_answers: vec!["From".to_string()],
                points: 6,
            },
        ],
    }
}

#[tokio::test]
async fn seeding_fills_empty_collections_once() {
    let mut board = QuizBoard::open(Arc::new(MemoryStore::new())).await.unwrap();

    let first = board.seed_if_empty().await.unwrap();
    assert!(first.quizzes_seeded && first.users_seeded);
    let quizzes = board.quizzes().to_vec();

    let second = board.seed_if_empty().await.unwrap();
    assert!(!second.quizzes_seeded && !second.users_seeded);
    assert_eq!(board.quizzes(), quizzes.as_slice());
    assert_eq!(board.users().len(), 5);
}

#[tokio::test]
async fn seeding_leaves_existing_quizzes_alone() {
    let mut board = QuizBoard::open(Arc::new(MemoryStore::new())).await.unwrap();
    board.seed_if_empty().await.unwrap();
    board.select_user("1").unwrap();
    let created = board.add_quiz(quiz_draft("Rust"), "Anna Ivanova").await.unwrap();

    board.seed_if_empty().await.unwrap();

    assert_eq!(board.quizzes().len(), 4);
    assert_eq!(board.quizzes().last().unwrap().id, created.id);
}

#[tokio::test]
async fn leaderboard_of_seed_users_is_ordered_by_points() {
    let board = seeded_board().await;
    let points: Vec<u64> = board
        .leaderboard()
        .entries
        .iter()
        .map(|e| e.user.total_points)
        .collect();

    assert_eq!(points, vec![203, 167, 145, 98, 76]);
    assert_eq!(board.leaderboard().summary.top_points, 203);
}

#[tokio::test]
async fn add_quiz_computes_total_points() {
    let mut board = seeded_board().await;
    let quiz = board.add_quiz(quiz_draft("Rust"), "Anna Ivanova").await.unwrap();

    assert_eq!(quiz.total_points, 10);
    assert_eq!(quiz.created_by, "Anna Ivanova");
    assert_eq!(board.find_quiz(&quiz.id), Some(&quiz));
}

#[tokio::test]
async fn add_quiz_rejects_empty_draft_without_changes() {
    let mut board = seeded_board().await;
    let before = board.quizzes().len();

    let mut draft = quiz_draft("  ");
    let err = board.add_quiz(draft.clone(), "Anna").await.unwrap_err();
    assert!(matches!(err, AppError::EmptyQuizSubmission(_)));

    draft.title = "Rust".to_string();
    draft.questions.clear();
    let err = board.add_quiz(draft, "Anna").await.unwrap_err();
    assert!(matches!(err, AppError::EmptyQuizSubmission(_)));

    assert_eq!(board.quizzes().len(), before);
}

#[tokio::test]
async fn add_attempt_requires_current_user() {
    let mut board = seeded_board().await;

    let err = board
        .add_attempt(AttemptDraft {
            quiz_id: "3".to_string(),
            answers: math_answers("100"),
            time_spent: 30,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NoActiveUser));
    assert!(board.attempts().is_empty());
    assert_eq!(board.users()[0].quizzes_completed, 6);
}

#[tokio::test]
async fn add_attempt_unknown_quiz_is_not_found() {
    let mut board = seeded_board().await;
    board.select_user("1").unwrap();

    let err = board
        .add_attempt(AttemptDraft {
            quiz_id: "missing".to_string(),
            answers: HashMap::new(),
            time_spent: 0,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
    assert!(board.attempts().is_empty());
}

#[tokio::test]
async fn add_attempt_scores_and_updates_user() {
    let mut board = seeded_board().await;
    board.select_user("1").unwrap();

    let attempt = board
        .add_attempt(AttemptDraft {
            quiz_id: "3".to_string(),
            answers: math_answers("  One Hundred "),
            time_spent: 75,
        })
        .await
        .unwrap();

    assert_eq!(attempt.score, 40);
    assert_eq!(attempt.total_points, 40);
    assert_eq!(attempt.user_id, "1");
    assert_eq!(attempt.time_spent, 75);

    let anna = board.current_user().unwrap();
    assert_eq!(anna.total_points, 185);
    assert_eq!(anna.quizzes_completed, 7);
    // round(185 / 7)
    assert_eq!(anna.average_score, 26);

    assert_eq!(board.attempts_for_user("1").len(), 1);
    let entry = board
        .leaderboard()
        .entries
        .into_iter()
        .find(|e| e.user.id == "1")
        .unwrap();
    assert_eq!(entry.recent_average, 100);
    assert_eq!(entry.best_score, 100.0);
}

#[tokio::test]
async fn select_unknown_user_is_not_found() {
    let mut board = seeded_board().await;
    assert!(matches!(board.select_user("nobody"), Err(AppError::NotFound(_))));
    assert!(board.current_user().is_none());
}

#[tokio::test]
async fn failed_write_leaves_cache_unchanged() {
    let store = Arc::new(FlakyStore::default());
    let mut board = QuizBoard::open(store.clone()).await.unwrap();
    board.seed_if_empty().await.unwrap();

    store.fail_writes.store(true, Ordering::SeqCst);
    let err = board.add_quiz(quiz_draft("Rust"), "Anna").await.unwrap_err();

    assert!(matches!(err, AppError::InternalServerError(_)));
    assert_eq!(board.quizzes().len(), 3);
}

#[tokio::test]
async fn failed_stats_write_withdraws_attempt() {
    let store = Arc::new(FlakyStore::default());
    let mut board = QuizBoard::open(store.clone()).await.unwrap();
    board.seed_if_empty().await.unwrap();
    board.select_user("1").unwrap();

    store.fail_user_writes.store(true, Ordering::SeqCst);
    let err = board
        .add_attempt(AttemptDraft {
            quiz_id: "3".to_string(),
            answers: math_answers("100"),
            time_spent: 10,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::InternalServerError(_)));
    assert!(board.attempts().is_empty());
    assert_eq!(board.current_user().unwrap().quizzes_completed, 6);

    // The store agrees with the cache
    let reopened = QuizBoard::open(store.clone()).await.unwrap();
    assert!(reopened.attempts().is_empty());
    assert_eq!(reopened.find_user("1").unwrap().quizzes_completed, 6);

    // Once writes work again the same run can be recorded
    store.fail_user_writes.store(false, Ordering::SeqCst);
    board
        .add_attempt(AttemptDraft {
            quiz_id: "3".to_string(),
            answers: math_answers("100"),
            time_spent: 10,
        })
        .await
        .unwrap();
    assert_eq!(board.attempts().len(), 1);
    assert_eq!(board.current_user().unwrap().quizzes_completed, 7);
}

#[tokio::test]
async fn subscribers_are_notified() {
    let mut board = seeded_board().await;
    let mut events = board.subscribe();

    board.select_user("2").unwrap();
    board
        .add_attempt(AttemptDraft {
            quiz_id: "2".to_string(),
            answers: HashMap::new(),
            time_spent: 5,
        })
        .await
        .unwrap();

    assert_eq!(events.recv().await.unwrap(), ChangeEvent::CurrentUser(Some("2".to_string())));
    assert_eq!(events.recv().await.unwrap(), ChangeEvent::Collection(Collection::Attempts));
    assert_eq!(events.recv().await.unwrap(), ChangeEvent::Collection(Collection::Users));
}

#[tokio::test]
async fn sqlite_store_persists_collections() {
    let store = Arc::new(SqliteStore::connect("sqlite::memory:").await.unwrap());

    let mut board = QuizBoard::open(store.clone()).await.unwrap();
    board.seed_if_empty().await.unwrap();
    board.select_user("5").unwrap();
    board
        .add_attempt(AttemptDraft {
            quiz_id: "1".to_string(),
            answers: HashMap::from([("3".to_string(), vec!["document object model".to_string()])]),
            time_spent: 12,
        })
        .await
        .unwrap();

    let users: Vec<quizboard::models::user::User> =
        load_collection(store.as_ref(), Collection::Users).await.unwrap();
    let elena = users.iter().find(|u| u.id == "5").unwrap();
    assert_eq!(elena.total_points, 208);
    assert_eq!(elena.quizzes_completed, 10);

    // A fresh board over the same store sees the same state and does not reseed.
    let mut reopened = QuizBoard::open(store).await.unwrap();
    let outcome = reopened.seed_if_empty().await.unwrap();
    assert!(!outcome.quizzes_seeded && !outcome.users_seeded);
    assert_eq!(reopened.attempts().len(), 1);
    assert_eq!(reopened.attempts()[0].score, 5);
    assert!(reopened.current_user().is_none());
}
