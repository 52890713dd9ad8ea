// src/quiz/selector.rs

use rand::{Rng, seq::SliceRandom};

use crate::models::question::Question;

/// Draws `min(count, bank.len())` distinct questions in uniformly random order.
///
/// Uses a partial Fisher-Yates shuffle, so every ordered subset of that size
/// is equally likely. An empty bank or a zero count yields an empty draw.
pub fn select_questions<R: Rng + ?Sized>(
    bank: &[Question],
    count: usize,
    rng: &mut R,
) -> Vec<Question> {
    let amount = count.min(bank.len());
    if amount == 0 {
        return Vec::new();
    }

    let mut pool: Vec<&Question> = bank.iter().collect();
    let (drawn, _) = pool.partial_shuffle(rng, amount);
    drawn.iter().map(|q| (*q).clone()).collect()
}

/// `select_questions` with the thread-local RNG.
pub fn random_questions(bank: &[Question], count: usize) -> Vec<Question> {
    select_questions(bank, count, &mut rand::thread_rng())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::QuestionType;
    use rand::{SeedableRng, rngs::StdRng};
    use std::collections::HashSet;

    fn bank(size: i64) -> Vec<Question> {
        (1..=size)
            .map(|id| Question {
                id,
                question: format!("Question {}", id),
                question_type: QuestionType::YesNo,
                options: None,
                answer: "yes".to_string(),
            })
            .collect()
    }

    fn ids(questions: &[Question]) -> Vec<i64> {
        questions.iter().map(|q| q.id).collect()
    }

    #[test]
    fn draws_requested_count_without_repeats() {
        let bank = bank(50);
        let mut rng = StdRng::seed_from_u64(7);

        let drawn = select_questions(&bank, 30, &mut rng);
        assert_eq!(drawn.len(), 30);

        let unique: HashSet<i64> = ids(&drawn).into_iter().collect();
        assert_eq!(unique.len(), 30);
        assert!(drawn.iter().all(|q| bank.contains(q)));
    }

    #[test]
    fn caps_at_bank_size_and_returns_a_permutation() {
        let bank = bank(5);
        let mut rng = StdRng::seed_from_u64(11);

        let drawn = select_questions(&bank, 30, &mut rng);
        assert_eq!(drawn.len(), 5);

        let mut sorted = ids(&drawn);
        sorted.sort();
        assert_eq!(sorted, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn empty_inputs_yield_empty_draws() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(select_questions(&[], 10, &mut rng).is_empty());
        assert!(select_questions(&bank(10), 0, &mut rng).is_empty());
    }

    #[test]
    fn length_matches_min_for_all_small_sizes() {
        let mut rng = StdRng::seed_from_u64(3);
        for size in 0..8 {
            let bank = bank(size);
            for count in 0..10 {
                let drawn = select_questions(&bank, count, &mut rng);
                assert_eq!(drawn.len(), count.min(size as usize));
            }
        }
    }

    #[test]
    fn first_position_is_roughly_uniform() {
        // A comparator-sort shuffle heavily favors the input order here.
        let bank = bank(4);
        let mut rng = StdRng::seed_from_u64(42);
        let mut hits = [0usize; 4];

        for _ in 0..8000 {
            let drawn = select_questions(&bank, 4, &mut rng);
            hits[(drawn[0].id - 1) as usize] += 1;
        }

        for count in hits {
            assert!((1700..=2300).contains(&count), "skewed distribution: {:?}", hits);
        }
    }

    #[test]
    fn thread_rng_variant_respects_bounds() {
        let drawn = random_questions(&bank(12), 30);
        assert_eq!(drawn.len(), 12);
    }
}
