// src/models/quiz.rs

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    error::AppError,
    models::question::{PublicQuestion, Question, QuestionDraft, dedup_trimmed},
};

/// A named collection of scored questions.
/// Immutable once created; `total_points` is fixed at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quiz {
    pub id: String,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub questions: Vec<Question>,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
    pub total_points: u32,
}

impl Quiz {
    pub fn question(&self, question_id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == question_id)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Sum of the question points, the only way `total_points` is derived.
/// `None` when the sum does not fit in a `u32`.
pub fn total_points(questions: &[Question]) -> Option<u32> {
    questions.iter().try_fold(0u32, |acc, q| acc.checked_add(q.points))
}

/// DTO for sending a quiz to the taker. The answer keys stay on the server.
#[derive(Debug, Clone, Serialize)]
pub struct PublicQuiz {
    pub id: String,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub questions: Vec<PublicQuestion>,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
    pub total_points: u32,
}

impl From<&Quiz> for PublicQuiz {
    fn from(quiz: &Quiz) -> Self {
        Self {
            id: quiz.id.clone(),
            title: quiz.title.clone(),
            description: quiz.description.clone(),
            tags: quiz.tags.clone(),
            questions: quiz.questions.iter().map(PublicQuestion::from).collect(),
            created_at: quiz.created_at,
            created_by: quiz.created_by.clone(),
            total_points: quiz.total_points,
        }
    }
}

/// Catalog card: what the quiz list shows without loading questions.
#[derive(Debug, Clone, Serialize)]
pub struct QuizSummary {
    pub id: String,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub question_count: usize,
    pub total_points: u32,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
}

impl From<&Quiz> for QuizSummary {
    fn from(quiz: &Quiz) -> Self {
        Self {
            id: quiz.id.clone(),
            title: quiz.title.clone(),
            description: quiz.description.clone(),
            tags: quiz.tags.clone(),
            question_count: quiz.questions.len(),
            total_points: quiz.total_points,
            created_at: quiz.created_at,
            created_by: quiz.created_by.clone(),
        }
    }
}

/// DTO for creating a new quiz.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct QuizDraft {
    #[validate(length(max = 200))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub description: String,
    #[serde(default)]
    #[validate(custom(function = validate_tags))]
    pub tags: Vec<String>,
    #[validate(length(max = 200), nested)]
    pub questions: Vec<QuestionDraft>,
}

fn validate_tags(tags: &[String]) -> Result<(), validator::ValidationError> {
    for tag in tags {
        if tag.chars().count() > 50 {
            return Err(validator::ValidationError::new("tag_too_long"));
        }
    }
    Ok(())
}

impl QuizDraft {
    /// Builds the quiz: drops blank question rows, checks every answer key,
    /// assigns ids and computes `total_points`.
    ///
    /// Fails with `EmptyQuizSubmission` on a blank title or when no usable
    /// question remains.
    pub fn into_quiz(self, created_by: &str, created_at: DateTime<Utc>) -> Result<Quiz, AppError> {
        self.validate()?;

        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(AppError::EmptyQuizSubmission("Quiz title is blank".to_string()));
        }

        let drafts: Vec<QuestionDraft> = self.questions.into_iter().filter(|q| q.is_usable()).collect();
        if drafts.is_empty() {
            return Err(AppError::EmptyQuizSubmission(
                "Quiz has no usable questions".to_string(),
            ));
        }

        let mut seen_ids = HashSet::new();
        let mut questions = Vec::with_capacity(drafts.len());
        for draft in drafts {
            let id = match draft.id.as_deref().map(str::trim) {
                Some(id) if !id.is_empty() => id.to_string(),
                _ => uuid::Uuid::new_v4().to_string(),
            };
            if !seen_ids.insert(id.clone()) {
                return Err(AppError::InvalidQuestion(format!("duplicate question id '{}'", id)));
            }
            questions.push(draft.into_question(id)?);
        }

        let total_points = total_points(&questions)
            .ok_or_else(|| AppError::InvalidQuestion("quiz is worth too many points".to_string()))?;

        Ok(Quiz {
            id: uuid::Uuid::new_v4().to_string(),
            title,
            description: self.description.trim().to_string(),
            tags: dedup_trimmed(self.tags),
            total_points,
            questions,
            created_at,
            created_by: created_by.to_string(),
        })
    }
}
