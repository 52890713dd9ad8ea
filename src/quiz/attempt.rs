// src/quiz/attempt.rs

use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};

use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    error::AppError,
    models::{
        participant::Identity,
        question::{PublicQuestion, Question, QuestionType},
    },
};

use super::scorer::{QuizResult, calculate_score, normalize_answer};

/// Where an attempt stands after its latest answer.
#[derive(Debug, Clone, Serialize)]
pub struct Progress {
    pub answered: usize,
    pub total: usize,
    /// `None` once every question has an answer.
    pub current_question: Option<PublicQuestion>,
}

/// One participant's single pass through a drawn question set.
///
/// Questions are answered strictly in order. The answer map only grows, so
/// the number of answers is also the index of the current question.
#[derive(Debug, Clone)]
pub struct Attempt {
    identity: Identity,
    questions: Vec<Question>,
    answers: HashMap<i64, String>,
    started_at: Instant,
}

impl Attempt {
    pub fn new(identity: Identity, questions: Vec<Question>) -> Self {
        Self {
            identity,
            questions,
            answers: HashMap::new(),
            started_at: Instant::now(),
        }
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.answers.len())
    }

    pub fn is_complete(&self) -> bool {
        self.answers.len() == self.questions.len()
    }

    pub fn progress(&self) -> Progress {
        Progress {
            answered: self.answers.len(),
            total: self.questions.len(),
            current_question: self.current_question().map(PublicQuestion::from),
        }
    }

    /// Records `answer` for the current question and advances.
    pub fn submit_answer(&mut self, answer: &str) -> Result<Progress, AppError> {
        let question = self.current_question().ok_or_else(|| {
            AppError::InvalidInput("All questions have already been answered.".to_string())
        })?;

        if answer.trim().is_empty() {
            return Err(AppError::InvalidInput("Answer must not be blank.".to_string()));
        }

        if question.question_type == QuestionType::MultipleChoice {
            let normalized = normalize_answer(answer);
            let is_option = question
                .options
                .iter()
                .flatten()
                .any(|o| normalize_answer(o) == normalized);
            if !is_option {
                return Err(AppError::InvalidInput(
                    "Answer must be one of the listed options.".to_string(),
                ));
            }
        }

        let id = question.id;
        self.answers.insert(id, answer.to_string());
        Ok(self.progress())
    }

    /// Scores the attempt. Only valid once every question is answered.
    pub fn finish(&self) -> Result<QuizResult, AppError> {
        if !self.is_complete() {
            return Err(AppError::InvalidInput(format!(
                "Attempt is not complete: {} of {} questions answered.",
                self.answers.len(),
                self.questions.len()
            )));
        }
        Ok(calculate_score(&self.questions, &self.answers))
    }

    fn is_expired(&self, ttl: Duration) -> bool {
        self.started_at.elapsed() > ttl
    }
}

/// In-progress attempts keyed by a random id.
#[derive(Debug, Clone)]
pub struct AttemptRegistry {
    attempts: Arc<RwLock<HashMap<Uuid, Attempt>>>,
    ttl: Duration,
}

impl AttemptRegistry {
    pub fn new(ttl: Duration) -> Self {
        Self {
            attempts: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Stores a new attempt, dropping any that outlived the TTL.
    pub async fn start(&self, attempt: Attempt) -> Uuid {
        let id = Uuid::new_v4();
        let mut attempts = self.attempts.write().await;

        let before = attempts.len();
        attempts.retain(|_, a| !a.is_expired(self.ttl));
        let pruned = before - attempts.len();
        if pruned > 0 {
            tracing::debug!("Pruned {} expired attempts", pruned);
        }

        attempts.insert(id, attempt);
        id
    }

    pub async fn progress(&self, id: Uuid) -> Result<Progress, AppError> {
        let attempts = self.attempts.read().await;
        attempts
            .get(&id)
            .filter(|a| !a.is_expired(self.ttl))
            .map(Attempt::progress)
            .ok_or_else(attempt_not_found)
    }

    pub async fn submit_answer(&self, id: Uuid, answer: &str) -> Result<Progress, AppError> {
        let mut attempts = self.attempts.write().await;
        let attempt = attempts
            .get_mut(&id)
            .filter(|a| !a.is_expired(self.ttl))
            .ok_or_else(attempt_not_found)?;
        attempt.submit_answer(answer)
    }

    /// Removes and returns a completed attempt so exactly one caller records it.
    /// Incomplete attempts stay in place.
    pub async fn take_completed(&self, id: Uuid) -> Result<Attempt, AppError> {
        let mut attempts = self.attempts.write().await;
        let complete = attempts
            .get(&id)
            .map(Attempt::is_complete)
            .ok_or_else(attempt_not_found)?;
        if !complete {
            return Err(AppError::InvalidInput("Attempt is not complete yet.".to_string()));
        }
        attempts.remove(&id).ok_or_else(attempt_not_found)
    }

    /// Puts back an attempt whose result could not be stored, so it can be retried.
    pub async fn restore(&self, id: Uuid, attempt: Attempt) {
        self.attempts.write().await.insert(id, attempt);
    }

    pub async fn len(&self) -> usize {
        self.attempts.read().await.len()
    }
}

fn attempt_not_found() -> AppError {
    AppError::NotFound("Attempt not found or expired.".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::participant::FullName;

    fn identity() -> Identity {
        Identity::Email {
            name: FullName {
                first_name: "Ana".to_string(),
                last_name: "Pérez".to_string(),
            },
            email: "ana@example.com".to_string(),
        }
    }

    fn questions() -> Vec<Question> {
        vec![
            Question {
                id: 10,
                question: "Pick B".to_string(),
                question_type: QuestionType::MultipleChoice,
                options: Some(vec!["A".to_string(), "B".to_string()]),
                answer: "B".to_string(),
            },
            Question {
                id: 20,
                question: "Capital of France".to_string(),
                question_type: QuestionType::FillInTheBlank,
                options: None,
                answer: "Paris".to_string(),
            },
        ]
    }

    #[test]
    fn answers_advance_in_order_and_score_at_the_end() {
        let mut attempt = Attempt::new(identity(), questions());
        assert_eq!(attempt.current_question().map(|q| q.id), Some(10));

        let progress = attempt.submit_answer("b").unwrap();
        assert_eq!(progress.answered, 1);
        assert_eq!(progress.current_question.map(|q| q.id), Some(20));
        assert!(attempt.finish().is_err());

        let progress = attempt.submit_answer("London").unwrap();
        assert_eq!(progress.answered, 2);
        assert!(progress.current_question.is_none());

        let result = attempt.finish().unwrap();
        assert_eq!(result.score, 1);
        assert_eq!(result.total, 2);
        assert_eq!(result.percentage, 50.0);
    }

    #[test]
    fn rejects_blank_and_out_of_option_answers() {
        let mut attempt = Attempt::new(identity(), questions());

        assert!(matches!(attempt.submit_answer("   "), Err(AppError::InvalidInput(_))));
        assert!(matches!(attempt.submit_answer("C"), Err(AppError::InvalidInput(_))));
        assert_eq!(attempt.progress().answered, 0);
    }

    #[test]
    fn rejects_answers_past_the_end() {
        let mut attempt = Attempt::new(identity(), questions());
        attempt.submit_answer("A").unwrap();
        attempt.submit_answer("Paris").unwrap();

        assert!(matches!(attempt.submit_answer("Paris"), Err(AppError::InvalidInput(_))));
        assert_eq!(attempt.finish().unwrap().score, 1);
    }

    #[tokio::test]
    async fn registry_hands_out_a_completed_attempt_once() {
        let registry = AttemptRegistry::new(Duration::from_secs(60));
        let id = registry.start(Attempt::new(identity(), questions())).await;

        assert!(matches!(registry.take_completed(id).await, Err(AppError::InvalidInput(_))));

        registry.submit_answer(id, "B").await.unwrap();
        registry.submit_answer(id, "paris").await.unwrap();

        let attempt = registry.take_completed(id).await.unwrap();
        assert_eq!(attempt.finish().unwrap().score, 2);
        assert!(matches!(registry.take_completed(id).await, Err(AppError::NotFound(_))));

        registry.restore(id, attempt).await;
        assert!(registry.take_completed(id).await.is_ok());
    }

    #[tokio::test]
    async fn expired_attempts_are_not_found_and_get_pruned() {
        let registry = AttemptRegistry::new(Duration::ZERO);
        let id = registry.start(Attempt::new(identity(), questions())).await;
        tokio::time::sleep(Duration::from_millis(5)).await;

        assert!(matches!(registry.progress(id).await, Err(AppError::NotFound(_))));

        registry.start(Attempt::new(identity(), questions())).await;
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn unknown_attempt_is_not_found() {
        let registry = AttemptRegistry::new(Duration::from_secs(60));
        let err = registry.submit_answer(Uuid::new_v4(), "x").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
