// src/session.rs

use serde::Serialize;

use crate::{
    error::AppError,
    models::{
        attempt::{AnswerSheet, AttemptDraft},
        question::{PublicQuestion, Question, QuestionType},
        quiz::Quiz,
    },
    utils::timer::{ElapsedTimer, format_elapsed},
};

/// One quiz being taken. Answers live only here until `finish`; dropping the
/// session discards them and stops its clock.
#[derive(Debug)]
pub struct QuizSession {
    quiz: Quiz,
    position: usize,
    answers: AnswerSheet,
    timer: ElapsedTimer,
}

/// Snapshot of a run for the quiz-taking screen.
#[derive(Debug, Serialize)]
pub struct SessionProgress {
    pub quiz_id: String,
    pub quiz_title: String,
    pub position: usize,
    pub total_questions: usize,
    pub question: Option<PublicQuestion>,
    pub answers: AnswerSheet,
    pub answered_count: usize,
    pub elapsed_secs: u64,
    pub elapsed: String,
}

impl QuizSession {
    /// Shows the first question and starts the clock.
    pub fn start(quiz: Quiz) -> Self {
        Self {
            quiz,
            position: 0,
            answers: AnswerSheet::new(),
            timer: ElapsedTimer::start(),
        }
    }

    /// Reopens a run that was finished but could not be recorded. The clock
    /// continues from the time already spent.
    pub fn resume(quiz: Quiz, position: usize, draft: AttemptDraft) -> Self {
        let position = position.min(quiz.questions.len().saturating_sub(1));
        Self {
            quiz,
            position,
            answers: draft.answers,
            timer: ElapsedTimer::start_at(draft.time_spent),
        }
    }

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.quiz.questions.get(self.position)
    }

    pub fn go_to(&mut self, index: usize) -> Result<&Question, AppError> {
        if index >= self.quiz.questions.len() {
            return Err(AppError::BadRequest(format!(
                "Question index {} is out of range (quiz has {})",
                index,
                self.quiz.questions.len()
            )));
        }
        self.position = index;
        Ok(&self.quiz.questions[index])
    }

    /// Moves forward; stays put on the last question.
    pub fn next(&mut self) -> bool {
        if self.position + 1 < self.quiz.questions.len() {
            self.position += 1;
            true
        } else {
            false
        }
    }

    /// Moves back; stays put on the first question.
    pub fn previous(&mut self) -> bool {
        if self.position > 0 {
            self.position -= 1;
            true
        } else {
            false
        }
    }

    /// Records an answer. Multiple-choice answers toggle; single-choice and
    /// text answers replace whatever was there.
    pub fn choose(&mut self, question_id: &str, answer: &str) -> Result<(), AppError> {
        let question_type = self
            .quiz
            .question(question_id)
            .map(|q| q.question_type)
            .ok_or_else(|| AppError::NotFound(format!("Question '{}' not found", question_id)))?;

        let entry = self.answers.entry(question_id.to_string()).or_default();
        match question_type {
            QuestionType::Multiple => {
                if let Some(pos) = entry.iter().position(|a| a == answer) {
                    entry.remove(pos);
                } else {
                    entry.push(answer.to_string());
                }
            }
            QuestionType::Single | QuestionType::Text => {
                *entry = vec![answer.to_string()];
            }
        }
        Ok(())
    }

    pub fn answers(&self) -> &AnswerSheet {
        &self.answers
    }

    pub fn answered_count(&self) -> usize {
        self.answers.values().filter(|v| !v.is_empty()).count()
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.timer.elapsed_secs()
    }

    /// Clears answers, returns to the first question and restarts the clock.
    pub fn restart(&mut self) {
        self.position = 0;
        self.answers.clear();
        self.timer = ElapsedTimer::start();
    }

    pub fn progress(&self) -> SessionProgress {
        let elapsed_secs = self.elapsed_secs();
        SessionProgress {
            quiz_id: self.quiz.id.clone(),
            quiz_title: self.quiz.title.clone(),
            position: self.position,
            total_questions: self.quiz.questions.len(),
            question: self.current_question().map(PublicQuestion::from),
            answers: self.answers.clone(),
            answered_count: self.answered_count(),
            elapsed_secs,
            elapsed: format_elapsed(elapsed_secs),
        }
    }

    /// Stops the clock and hands the run over for scoring.
    pub fn finish(mut self) -> AttemptDraft {
        let time_spent = self.timer.stop();
        AttemptDraft {
            quiz_id: self.quiz.id,
            answers: self.answers,
            time_spent,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::seed::sample_quizzes;
    use chrono::Utc;

    fn js_quiz() -> Quiz {
        sample_quizzes(Utc::now()).remove(0)
    }

    #[tokio::test]
    async fn test_multiple_choice_toggles() {
        let mut session = QuizSession::start(js_quiz());
        session.choose("2", "String").unwrap();
        session.choose("2", "Number").unwrap();
        session.choose("2", "String").unwrap();

        assert_eq!(session.answers()["2"], vec!["Number"]);
    }

    #[tokio::test]
    async fn test_single_choice_replaces() {
        let mut session = QuizSession::start(js_quiz());
        session.choose("1", "v x = 5;").unwrap();
        session.choose("1", "var x = 5;").unwrap();

        assert_eq!(session.answers()["1"], vec!["var x = 5;"]);
        assert_eq!(session.answered_count(), 1);
    }

    #[tokio::test]
    async fn test_unknown_question_rejected() {
        let mut session = QuizSession::start(js_quiz());
        let err = session.choose("99", "x").unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert!(session.answers().is_empty());
    }

    #[tokio::test]
    async fn test_navigation_is_clamped() {
        let mut session = QuizSession::start(js_quiz());
        assert!(!session.previous());
        assert!(session.next());
        assert!(session.next());
        assert!(!session.next());
        assert_eq!(session.position(), 2);

        assert!(session.go_to(3).is_err());
        assert_eq!(session.go_to(0).unwrap().id, "1");
    }

    #[tokio::test]
    async fn test_restart_clears_answers() {
        let mut session = QuizSession::start(js_quiz());
        session.choose("3", "dom").unwrap();
        session.next();
        session.restart();

        assert_eq!(session.position(), 0);
        assert_eq!(session.answered_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_finish_carries_elapsed_time() {
        let mut session = QuizSession::start(js_quiz());
        session.choose("3", "Document Object Model").unwrap();
        tokio::time::advance(Duration::from_secs(42)).await;

        let draft = session.finish();
        assert_eq!(draft.quiz_id, "1");
        assert_eq!(draft.time_spent, 42);
        assert_eq!(draft.answers["3"], vec!["Document Object Model"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_resume_keeps_answers_and_time() {
        let mut session = QuizSession::start(js_quiz());
        session.choose("1", "var x = 5;").unwrap();
        session.go_to(2).unwrap();
        tokio::time::advance(Duration::from_secs(30)).await;

        let quiz = session.quiz().clone();
        let position = session.position();
        let draft = session.finish();

        let resumed = QuizSession::resume(quiz, position, draft);
        assert_eq!(resumed.position(), 2);
        assert_eq!(resumed.elapsed_secs(), 30);
        assert_eq!(resumed.answers()["1"], vec!["var x = 5;"]);
    }

    #[tokio::test]
    async fn test_progress_hides_answer_key() {
        let session = QuizSession::start(js_quiz());
        let progress = serde_json::to_value(session.progress()).unwrap();
        assert_eq!(progress["total_questions"], 3);
        assert!(progress["question"].get("correct_answers").is_none());
        assert_eq!(progress["elapsed"], "0:00");
    }
}
