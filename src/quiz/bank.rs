// src/quiz/bank.rs

use std::{collections::HashSet, fmt, fs, path::Path};

use crate::models::question::{Question, QuestionType};

use super::scorer::normalize_answer;

#[derive(Debug)]
pub enum BankError {
    Io(String),
    Parse(String),
    Invalid(String),
}

impl fmt::Display for BankError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BankError::Io(msg) => write!(f, "failed to read question bank: {}", msg),
            BankError::Parse(msg) => write!(f, "failed to parse question bank: {}", msg),
            BankError::Invalid(msg) => write!(f, "invalid question bank: {}", msg),
        }
    }
}

impl std::error::Error for BankError {}

/// The full static set of questions, validated once at load time.
#[derive(Debug, Clone, Default)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    pub fn new(questions: Vec<Question>) -> Result<Self, BankError> {
        validate(&questions)?;
        Ok(Self { questions })
    }

    /// Loads a JSON array of questions from disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, BankError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .map_err(|e| BankError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, BankError> {
        let questions: Vec<Question> =
            serde_json::from_str(raw).map_err(|e| BankError::Parse(e.to_string()))?;
        Self::new(questions)
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
}

fn validate(questions: &[Question]) -> Result<(), BankError> {
    let mut seen = HashSet::new();

    for q in questions {
        if !seen.insert(q.id) {
            return Err(BankError::Invalid(format!("duplicate question id {}", q.id)));
        }
        if q.question.trim().is_empty() {
            return Err(BankError::Invalid(format!("question {} has no prompt", q.id)));
        }
        if q.answer.trim().is_empty() {
            return Err(BankError::Invalid(format!("question {} has no answer", q.id)));
        }

        match (q.question_type, &q.options) {
            (QuestionType::MultipleChoice, Some(options)) if !options.is_empty() => {
                let answer = normalize_answer(&q.answer);
                if !options.iter().any(|o| normalize_answer(o) == answer) {
                    return Err(BankError::Invalid(format!(
                        "question {} answer is not one of its options",
                        q.id
                    )));
                }
            }
            (QuestionType::MultipleChoice, _) => {
                return Err(BankError::Invalid(format!(
                    "multiple-choice question {} has no options",
                    q.id
                )));
            }
            (_, Some(_)) => {
                return Err(BankError::Invalid(format!(
                    "question {} has options but is not multiple-choice",
                    q.id
                )));
            }
            (_, None) => {}
        }
    }

    Ok(())
}
