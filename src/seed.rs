// src/seed.rs

//! Example data provisioned into empty collections on first run.

use chrono::{DateTime, Utc};

use crate::models::{
    question::{Question, QuestionType},
    quiz::Quiz,
    user::User,
};

const SEED_AUTHOR: &str = "System";

fn question(
    id: &str,
    question_type: QuestionType,
    prompt: &str,
    options: &[&str],
    correct: &[&str],
    points: u32,
) -> Question {
    Question {
        id: id.to_string(),
        question_type,
        prompt: prompt.to_string(),
        options: if question_type == QuestionType::Text {
            None
        } else {
            Some(options.iter().map(|s| s.to_string()).collect())
        },
        correct_answers: correct.iter().map(|s| s.to_string()).collect(),
        points,
    }
}

fn quiz(id: &str, title: &str, description: &str, tags: &[&str], questions: Vec<Question>, now: DateTime<Utc>) -> Quiz {
    Quiz {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        tags: tags.iter().map(|s| s.to_string()).collect(),
        total_points: questions.iter().map(|q| q.points).sum(),
        questions,
        created_at: now,
        created_by: SEED_AUTHOR.to_string(),
    }
}

/// Three quizzes covering single, multiple and text questions.
pub fn sample_quizzes(now: DateTime<Utc>) -> Vec<Quiz> {
    vec![
        quiz(
            "1",
            "JavaScript Basics",
            "Check your knowledge of JavaScript fundamentals",
            &["javascript", "programming", "beginner"],
            vec![
                question(
                    "1",
                    QuestionType::Single,
                    "How do you declare a variable in JavaScript?",
                    &["var x = 5;", "variable x = 5;", "v x = 5;", "declare x = 5;"],
                    &["var x = 5;"],
                    10,
                ),
                question(
                    "2",
                    QuestionType::Multiple,
                    "Which of these are JavaScript data types?",
                    &["String", "Number", "Boolean", "Float"],
                    &["String", "Number", "Boolean"],
                    15,
                ),
                question(
                    "3",
                    QuestionType::Text,
                    "What does the abbreviation \"DOM\" stand for?",
                    &[],
                    &["Document Object Model"],
                    5,
                ),
            ],
            now,
        ),
        quiz(
            "2",
            "React Basics",
            "Learn the basics of building apps with React",
            &["react", "frontend", "intermediate"],
            vec![
                question(
                    "1",
                    QuestionType::Single,
                    "What is JSX?",
                    &["JavaScript XML", "Java Syntax Extension", "JSON XML", "JavaScript Extension"],
                    &["JavaScript XML"],
                    10,
                ),
                question(
                    "2",
                    QuestionType::Multiple,
                    "Which of these are React hooks?",
                    &["useState", "useEffect", "useCallback", "useClass"],
                    &["useState", "useEffect", "useCallback"],
                    15,
                ),
            ],
            now,
        ),
        quiz(
            "3",
            "Grade 5 Math",
            "A math test for fifth-grade students",
            &["math", "school", "grade5"],
            vec![
                question("1", QuestionType::Single, "What is 15 + 27?", &["42", "41", "43", "40"], &["42"], 10),
                question("2", QuestionType::Single, "Which number is prime?", &["15", "21", "17", "25"], &["17"], 15),
                question(
                    "3",
                    QuestionType::Text,
                    "How many centimeters are in one meter?",
                    &[],
                    &["100", "one hundred"],
                    15,
                ),
            ],
            now,
        ),
    ]
}

/// Five users with pre-set statistics.
pub fn sample_users() -> Vec<User> {
    [
        ("1", "Anna Ivanova", 145, 6, 85),
        ("2", "Petr Sidorov", 98, 4, 78),
        ("3", "Maria Petrova", 167, 7, 89),
        ("4", "Alexey Kozlov", 76, 3, 72),
        ("5", "Elena Smirnova", 203, 9, 92),
    ]
    .into_iter()
    .map(|(id, name, total_points, quizzes_completed, average_score)| User {
        id: id.to_string(),
        name: name.to_string(),
        total_points,
        quizzes_completed,
        average_score,
    })
    .collect()
}
