// src/models/question.rs

use serde::{Deserialize, Serialize};

/// Kind of answer a question expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
    MultipleChoice,
    YesNo,
    FillInTheBlank,
}

/// A question from the static bank. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Unique among the bank.
    pub id: i64,

    /// The prompt text.
    pub question: String,

    /// Serialized as `type` since `type` is a reserved keyword in Rust.
    #[serde(rename = "type")]
    pub question_type: QuestionType,

    /// Ordered options, present only for multiple-choice questions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,

    /// The canonical correct answer.
    pub answer: String,
}

/// DTO for sending a question to the client (excludes the answer).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicQuestion {
    pub id: i64,
    pub question: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

impl From<&Question> for PublicQuestion {
    fn from(q: &Question) -> Self {
        PublicQuestion {
            id: q.id,
            question: q.question.clone(),
            question_type: q.question_type,
            options: q.options.clone(),
        }
    }
}
