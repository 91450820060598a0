// src/models/question.rs

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{config::MAX_QUESTION_POINTS, error::AppError};

/// How a question is answered and scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    /// Exactly one option is correct.
    Single,
    /// Any non-empty subset of the options may be correct.
    Multiple,
    /// Free-text answer compared against a list of accepted literals.
    Text,
}

/// A scored question, embedded in its quiz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,

    /// Mapped from `type` since it is a reserved keyword in Rust.
    #[serde(rename = "type")]
    pub question_type: QuestionType,

    pub prompt: String,

    /// Choices shown to the taker. Absent for text questions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,

    /// The answer key, treated as a set.
    pub correct_answers: Vec<String>,

    pub points: u32,
}

/// DTO for sending a question to the quiz taker (excludes the answer key).
#[derive(Debug, Clone, Serialize)]
pub struct PublicQuestion {
    pub id: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    pub points: u32,
}

impl From<&Question> for PublicQuestion {
    fn from(q: &Question) -> Self {
        Self {
            id: q.id.clone(),
            question_type: q.question_type,
            prompt: q.prompt.clone(),
            options: q.options.clone(),
            points: q.points,
        }
    }
}

/// DTO for a question inside a quiz being created.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct QuestionDraft {
    /// Caller-chosen id; a fresh one is assigned when omitted.
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    #[validate(length(max = 1000))]
    pub prompt: String,
    #[serde(default)]
    pub options: Option<Vec<String>>,
    #[serde(default)]
    pub correct_answers: Vec<String>,
    #[validate(range(min = 1, max = 10000, message = "Points must be between 1 and 10000."))]
    pub points: u32,
}

impl QuestionDraft {
    /// A draft with a blank prompt is an unfinished form row and is dropped.
    pub fn is_usable(&self) -> bool {
        !self.prompt.trim().is_empty()
    }

    /// Checks the answer-key invariants for the question type and builds the question.
    pub fn into_question(self, id: String) -> Result<Question, AppError> {
        let prompt = self.prompt.trim().to_string();
        let correct_answers = dedup_trimmed(self.correct_answers);

        if self.points == 0 || self.points > MAX_QUESTION_POINTS {
            return Err(AppError::InvalidQuestion(format!(
                "question '{}' must be worth between 1 and {} points",
                prompt, MAX_QUESTION_POINTS
            )));
        }

        let options = match self.question_type {
            QuestionType::Text => {
                if correct_answers.is_empty() {
                    return Err(AppError::InvalidQuestion(format!(
                        "text question '{}' needs at least one accepted answer",
                        prompt
                    )));
                }
                None
            }
            QuestionType::Single | QuestionType::Multiple => {
                let options = dedup_trimmed(self.options.unwrap_or_default());
                validate_options(&options)
                    .map_err(|e| AppError::InvalidQuestion(format!("question '{}': {}", prompt, e.code)))?;

                if self.question_type == QuestionType::Single && correct_answers.len() != 1 {
                    return Err(AppError::InvalidQuestion(format!(
                        "single-choice question '{}' must have exactly one correct answer",
                        prompt
                    )));
                }
                if correct_answers.is_empty() {
                    return Err(AppError::InvalidQuestion(format!(
                        "multiple-choice question '{}' needs at least one correct answer",
                        prompt
                    )));
                }
                if let Some(stray) = correct_answers.iter().find(|a| !options.contains(a)) {
                    return Err(AppError::InvalidQuestion(format!(
                        "correct answer '{}' is not one of the options of '{}'",
                        stray, prompt
                    )));
                }
                Some(options)
            }
        };

        Ok(Question {
            id,
            question_type: self.question_type,
            prompt,
            options,
            correct_answers,
            points: self.points,
        })
    }
}

fn validate_options(options: &[String]) -> Result<(), validator::ValidationError> {
    if options.is_empty() {
        return Err(validator::ValidationError::new("options_cannot_be_empty"));
    }
    for opt in options {
        if opt.chars().count() > 500 {
            return Err(validator::ValidationError::new("option_too_long"));
        }
    }
    Ok(())
}

/// Trims entries, drops blanks and repeats, keeps first-seen order.
pub(crate) fn dedup_trimmed(values: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && seen.insert(v.clone()))
        .collect()
}
