// src/quiz/scorer.rs

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::question::Question;

/// Shown in place of an answer the participant never gave.
pub const BLANK_ANSWER_LABEL: &str = "(blank)";

/// Correctness of a single question within a result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionOutcome {
    pub question_id: i64,
    pub question: String,
    /// Empty when no answer was submitted.
    pub user_answer: String,
    pub correct_answer: String,
    pub is_correct: bool,
}

impl QuestionOutcome {
    pub fn display_answer(&self) -> &str {
        if self.user_answer.trim().is_empty() {
            BLANK_ANSWER_LABEL
        } else {
            &self.user_answer
        }
    }
}

/// Scored attempt. `total` always equals the number of questions scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizResult {
    pub score: usize,
    pub total: usize,
    /// Unrounded; formatting belongs to the presentation layer.
    pub percentage: f64,
    pub results: Vec<QuestionOutcome>,
}

/// Trimmed, lower-cased form used for comparison.
pub fn normalize_answer(answer: &str) -> String {
    answer.trim().to_lowercase()
}

pub fn is_correct(submitted: &str, canonical: &str) -> bool {
    normalize_answer(submitted) == normalize_answer(canonical)
}

/// `score / total * 100`, or 0.0 for an empty question set.
pub fn percentage(score: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (score as f64 / total as f64) * 100.0
}

/// Scores `answers` (keyed by question id) against `questions`.
///
/// Outcomes follow the order of `questions`. A question with no entry in
/// `answers` is recorded with a blank answer and never counts as correct;
/// answers for ids outside `questions` are ignored.
pub fn calculate_score(questions: &[Question], answers: &HashMap<i64, String>) -> QuizResult {
    let results: Vec<QuestionOutcome> = questions
        .iter()
        .map(|q| {
            let user_answer = answers.get(&q.id);
            QuestionOutcome {
                question_id: q.id,
                question: q.question.clone(),
                user_answer: user_answer.cloned().unwrap_or_default(),
                correct_answer: q.answer.clone(),
                is_correct: user_answer.is_some_and(|a| is_correct(a, &q.answer)),
            }
        })
        .collect();

    let score = results.iter().filter(|r| r.is_correct).count();
    let total = questions.len();

    QuizResult {
        score,
        total,
        percentage: percentage(score, total),
        results,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::QuestionType;

    fn question(id: i64, answer: &str) -> Question {
        Question {
            id,
            question: format!("Question {}", id),
            question_type: QuestionType::FillInTheBlank,
            options: None,
            answer: answer.to_string(),
        }
    }

    #[test]
    fn matching_ignores_case_and_surrounding_whitespace() {
        let questions = vec![question(1, "Paris")];
        let answers = HashMap::from([(1, "  paris  ".to_string())]);

        let result = calculate_score(&questions, &answers);
        assert!(result.results[0].is_correct);
        assert_eq!(result.score, 1);
        assert_eq!(result.percentage, 100.0);
    }

    #[test]
    fn inner_whitespace_still_matters() {
        assert!(!is_correct("new  york", "New York"));
        assert!(is_correct("NEW YORK ", " new york"));
    }

    #[test]
    fn missing_answer_is_recorded_blank_and_wrong() {
        let questions = vec![question(1, "x")];

        let result = calculate_score(&questions, &HashMap::new());
        assert_eq!(result.score, 0);
        assert_eq!(result.total, 1);
        assert_eq!(result.results.len(), 1);
        assert_eq!(result.results[0].user_answer, "");
        assert_eq!(result.results[0].display_answer(), BLANK_ANSWER_LABEL);
        assert!(!result.results[0].is_correct);
    }

    #[test]
    fn blank_canonical_answer_is_not_matched_by_absence() {
        let questions = vec![question(1, "")];

        let result = calculate_score(&questions, &HashMap::new());
        assert_eq!(result.score, 0);
    }

    #[test]
    fn empty_question_set_scores_zero_percent() {
        let result = calculate_score(&[], &HashMap::from([(1, "a".to_string())]));
        assert_eq!(result.total, 0);
        assert_eq!(result.score, 0);
        assert_eq!(result.percentage, 0.0);
        assert!(!result.percentage.is_nan());
    }

    #[test]
    fn outcomes_follow_question_order_and_ignore_foreign_answers() {
        let questions = vec![question(7, "a"), question(3, "b"), question(5, "c")];
        let answers = HashMap::from([
            (3, "B".to_string()),
            (5, "wrong".to_string()),
            (99, "a".to_string()),
        ]);

        let result = calculate_score(&questions, &answers);
        let ids: Vec<i64> = result.results.iter().map(|r| r.question_id).collect();
        assert_eq!(ids, vec![7, 3, 5]);
        assert_eq!(result.score, 1);
        assert_eq!(result.total, 3);
        assert_eq!(result.results[1].correct_answer, "b");
    }

    #[test]
    fn score_bounds_hold_for_mixed_answers() {
        let questions: Vec<Question> = (1..=30)
            .map(|i| question(i, &format!("answer {}", i)))
            .collect();
        let answers: HashMap<i64, String> = (1..=30)
            .map(|i| {
                let a = if i <= 27 { format!("ANSWER {}", i) } else { "nope".to_string() };
                (i, a)
            })
            .collect();

        let result = calculate_score(&questions, &answers);
        assert_eq!(result.score, 27);
        assert_eq!(result.total, 30);
        assert!((result.percentage - 90.0).abs() < 1e-9);
        assert!(result.score <= result.total);
    }
}
