// src/services/scoring.rs

use std::collections::HashSet;

use serde::Serialize;

use crate::{
    config::PASSING_PERCENTAGE,
    models::{
        attempt::AnswerSheet,
        question::{Question, QuestionType},
        quiz::Quiz,
    },
};

/// Outcome of grading one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Grade {
    pub score: u32,
    pub correct_count: usize,
    pub total_questions: usize,
}

/// Points earned by `answers` on `quiz`. Always within `0..=quiz.total_points`.
pub fn score(quiz: &Quiz, answers: &AnswerSheet) -> u32 {
    grade(quiz, answers).score
}

/// Grades every question of the quiz against the submitted answers.
///
/// * Text questions: the first submission, trimmed and lower-cased, must equal
///   one of the accepted answers normalized the same way.
/// * Choice questions: the submitted set must equal the answer key exactly.
///   No partial credit.
/// * Unanswered questions earn nothing.
pub fn grade(quiz: &Quiz, answers: &AnswerSheet) -> Grade {
    let mut score: u32 = 0;
    let mut correct_count = 0;

    for question in &quiz.questions {
        let submitted = answers.get(&question.id).map(Vec::as_slice).unwrap_or(&[]);
        if is_correct(question, submitted) {
            score = score.saturating_add(question.points);
            correct_count += 1;
        }
    }

    Grade {
        score,
        correct_count,
        total_questions: quiz.questions.len(),
    }
}

/// Whether a single question is answered correctly.
pub fn is_correct(question: &Question, submitted: &[String]) -> bool {
    match question.question_type {
        QuestionType::Text => {
            let given = submitted.first().map(|s| normalize(s)).unwrap_or_default();
            question
                .correct_answers
                .iter()
                .any(|accepted| normalize(accepted) == given)
        }
        QuestionType::Single | QuestionType::Multiple => {
            let given: HashSet<&str> = submitted.iter().map(String::as_str).collect();
            let expected: HashSet<&str> = question.correct_answers.iter().map(String::as_str).collect();
            given == expected
        }
    }
}

fn normalize(answer: &str) -> String {
    answer.trim().to_lowercase()
}

/// `score / total * 100`, or 0 for a quiz worth nothing.
pub fn percentage(score: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    f64::from(score) / f64::from(total) * 100.0
}

pub fn rounded_percentage(score: u32, total: u32) -> u32 {
    percentage(score, total).round() as u32
}

/// A run passes when its rounded percentage reaches the pass mark.
pub fn passed(score: u32, total: u32) -> bool {
    rounded_percentage(score, total) >= PASSING_PERCENTAGE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::quiz::total_points;
    use chrono::Utc;

    fn question(id: &str, question_type: QuestionType, options: Option<&[&str]>, correct: &[&str], points: u32) -> Question {
        Question {
            id: id.to_string(),
            question_type,
            prompt: format!("Question {}", id),
            options: options.map(|o| o.iter().map(|s| s.to_string()).collect()),
            correct_answers: correct.iter().map(|s| s.to_string()).collect(),
            points,
        }
    }

    fn quiz(questions: Vec<Question>) -> Quiz {
        Quiz {
            id: "quiz".to_string(),
            title: "Sample".to_string(),
            description: String::new(),
            tags: vec![],
            total_points: total_points(&questions).unwrap(),
            questions,
            created_at: Utc::now(),
            created_by: "test".to_string(),
        }
    }

    fn sample_quiz() -> Quiz {
        quiz(vec![
            question("1", QuestionType::Single, Some(&["A", "B", "C", "D"]), &["B"], 10),
            question("2", QuestionType::Multiple, Some(&["String", "Number", "Boolean", "Float"]), &["String", "Number", "Boolean"], 15),
            question("3", QuestionType::Text, None, &["100", "сто"], 5),
        ])
    }

    fn answers(pairs: &[(&str, &[&str])]) -> AnswerSheet {
        pairs
            .iter()
            .map(|(id, vals)| (id.to_string(), vals.iter().map(|s| s.to_string()).collect()))
            .collect()
    }

    #[test]
    fn test_no_answers_scores_zero() {
        let grade = grade(&sample_quiz(), &AnswerSheet::new());
        assert_eq!(grade.score, 0);
        assert_eq!(grade.correct_count, 0);
        assert_eq!(grade.total_questions, 3);
    }

    #[test]
    fn test_fully_correct_scores_total() {
        let quiz = sample_quiz();
        let sheet = answers(&[
            ("1", &["B"]),
            ("2", &["Boolean", "String", "Number"]),
            ("3", &["100"]),
        ]);
        assert_eq!(score(&quiz, &sheet), quiz.total_points);
    }

    #[test]
    fn test_single_requires_exact_set() {
        let quiz = sample_quiz();
        assert_eq!(score(&quiz, &answers(&[("1", &["B"])])), 10);
        assert_eq!(score(&quiz, &answers(&[("1", &["B", "C"])])), 0);
    }

    #[test]
    fn test_multiple_gives_no_partial_credit() {
        let quiz = sample_quiz();
        assert_eq!(score(&quiz, &answers(&[("2", &["String", "Number"])])), 0);
        assert_eq!(score(&quiz, &answers(&[("2", &["String", "Number", "Boolean", "Float"])])), 0);
    }

    #[test]
    fn test_text_is_trimmed_and_case_insensitive() {
        let quiz = sample_quiz();
        assert_eq!(score(&quiz, &answers(&[("3", &["  100 "])])), 5);
        assert_eq!(score(&quiz, &answers(&[("3", &["СТО"])])), 5);
        assert_eq!(score(&quiz, &answers(&[("3", &["99"])])), 0);
    }

    #[test]
    fn test_text_uses_first_submission_only() {
        let quiz = sample_quiz();
        assert_eq!(score(&quiz, &answers(&[("3", &["99", "100"])])), 0);
        assert_eq!(score(&quiz, &answers(&[("3", &["100", "99"])])), 5);
    }

    #[test]
    fn test_text_empty_submission_does_not_match() {
        let quiz = sample_quiz();
        assert_eq!(score(&quiz, &answers(&[("3", &[])])), 0);
    }

    #[test]
    fn test_unknown_question_ids_ignored() {
        let quiz = sample_quiz();
        assert_eq!(score(&quiz, &answers(&[("42", &["B"]), ("1", &["B"])])), 10);
    }

    #[test]
    fn test_percentage_and_pass_mark() {
        assert_eq!(percentage(15, 30), 50.0);
        assert_eq!(percentage(5, 0), 0.0);
        assert_eq!(rounded_percentage(2, 3), 67);
        assert!(passed(18, 30));
        assert!(!passed(17, 30));
    }
}
