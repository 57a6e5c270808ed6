//! Quiz question bank, selection, and scored sessions.
//!
//! `select_questions` filters the bank by topic and difficulty, then draws
//! `count` questions without replacement. The RNG is passed in so callers
//! can seed it for reproducible quizzes.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// A multiple-choice question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub topic: String,
    pub difficulty: Difficulty,
    pub prompt: String,
    pub choices: Vec<String>,
    pub answer_index: usize,
    #[serde(default)]
    pub explanation: Option<String>,
}

/// Selection criteria. `None` means any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizFilter {
    pub topic: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub count: usize,
}

impl Default for QuizFilter {
    fn default() -> Self {
        Self {
            topic: None,
            difficulty: None,
            count: 10,
        }
    }
}

impl QuizFilter {
    fn matches(&self, q: &Question) -> bool {
        self.topic
            .as_deref()
            .map_or(true, |t| q.topic.eq_ignore_ascii_case(t))
            && self.difficulty.map_or(true, |d| q.difficulty == d)
    }
}

/// Parse a question bank, dropping questions whose answer index is out of range.
pub fn parse_bank(json: &str) -> Result<Vec<Question>, serde_json::Error> {
    let bank: Vec<Question> = serde_json::from_str(json)?;
    Ok(bank
        .into_iter()
        .filter(|q| q.answer_index < q.choices.len())
        .collect())
}

/// Topics present in the bank, sorted, without repeats.
pub fn topics(bank: &[Question]) -> Vec<&str> {
    let mut topics: Vec<&str> = bank.iter().map(|q| q.topic.as_str()).collect();
    topics.sort_unstable();
    topics.dedup();
    topics
}

/// Draw up to `filter.count` matching questions in random order.
pub fn select_questions<R: Rng + ?Sized>(
    bank: &[Question],
    filter: &QuizFilter,
    rng: &mut R,
) -> Vec<Question> {
    let mut pool: Vec<&Question> = bank.iter().filter(|q| filter.matches(q)).collect();
    pool.shuffle(rng);
    pool.into_iter().take(filter.count).cloned().collect()
}

/// Review line for one answered question.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerReview {
    pub question_id: String,
    pub chosen: Option<usize>,
    pub correct: bool,
}

/// An in-progress quiz.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizSession {
    questions: Vec<Question>,
    answers: Vec<Option<usize>>,
    current: usize,
}

impl QuizSession {
    pub fn new(questions: Vec<Question>) -> Self {
        let answers = vec![None; questions.len()];
        Self {
            questions,
            answers,
            current: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn current(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn is_finished(&self) -> bool {
        self.current >= self.questions.len()
    }

    /// Answer the current question and move on. Returns whether the answer
    /// was correct, or `None` if the quiz is over or the choice doesn't exist.
    pub fn answer(&mut self, choice: usize) -> Option<bool> {
        let question = self.questions.get(self.current)?;
        if choice >= question.choices.len() {
            return None;
        }
        let correct = choice == question.answer_index;
        self.answers[self.current] = Some(choice);
        self.current += 1;
        Some(correct)
    }

    /// Skip the current question without answering.
    pub fn skip(&mut self) {
        if !self.is_finished() {
            self.current += 1;
        }
    }

    /// Number of correct answers so far.
    pub fn score(&self) -> usize {
        self.questions
            .iter()
            .zip(&self.answers)
            .filter(|(q, a)| **a == Some(q.answer_index))
            .count()
    }

    /// Score as a percentage of all questions (0 for an empty quiz).
    pub fn percent(&self) -> f32 {
        if self.questions.is_empty() {
            return 0.0;
        }
        self.score() as f32 * 100.0 / self.questions.len() as f32
    }

    pub fn review(&self) -> Vec<AnswerReview> {
        self.questions
            .iter()
            .zip(&self.answers)
            .map(|(q, a)| AnswerReview {
                question_id: q.id.clone(),
                chosen: *a,
                correct: *a == Some(q.answer_index),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn q(id: &str, topic: &str, difficulty: Difficulty) -> Question {
        Question {
            id: id.into(),
            topic: topic.into(),
            difficulty,
            prompt: format!("{id}?"),
            choices: vec!["a".into(), "b".into(), "c".into()],
            answer_index: 1,
            explanation: None,
        }
    }

    fn bank() -> Vec<Question> {
        vec![
            q("c1", "cells", Difficulty::Easy),
            q("c2", "cells", Difficulty::Medium),
            q("c3", "cells", Difficulty::Hard),
            q("e1", "ecology", Difficulty::Easy),
            q("e2", "ecology", Difficulty::Easy),
            q("e3", "ecology", Difficulty::Hard),
        ]
    }

    #[test]
    fn test_filter_by_topic_and_difficulty() {
        let mut rng = StdRng::seed_from_u64(42);
        let filter = QuizFilter {
            topic: Some("Ecology".into()),
            difficulty: Some(Difficulty::Easy),
            count: 10,
        };
        let picked = select_questions(&bank(), &filter, &mut rng);
        assert_eq!(picked.len(), 2);
        assert!(picked.iter().all(|q| q.topic == "ecology" && q.difficulty == Difficulty::Easy));
    }

    #[test]
    fn test_count_limits_and_no_repeats() {
        let mut rng = StdRng::seed_from_u64(7);
        let filter = QuizFilter {
            count: 4,
            ..Default::default()
        };
        let picked = select_questions(&bank(), &filter, &mut rng);
        assert_eq!(picked.len(), 4);
        let mut ids: Vec<_> = picked.iter().map(|q| q.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 4);
    }

    #[test]
    fn test_same_seed_same_quiz() {
        let filter = QuizFilter {
            count: 3,
            ..Default::default()
        };
        let a = select_questions(&bank(), &filter, &mut StdRng::seed_from_u64(1));
        let b = select_questions(&bank(), &filter, &mut StdRng::seed_from_u64(1));
        assert_eq!(a, b);
    }

    #[test]
    fn test_session_scoring() {
        let mut session = QuizSession::new(bank().into_iter().take(3).collect());
        assert_eq!(session.answer(1), Some(true));
        assert_eq!(session.answer(0), Some(false));
        assert_eq!(session.answer(9), None); // no such choice, stay put
        session.skip();
        assert!(session.is_finished());
        assert_eq!(session.answer(1), None);
        assert_eq!(session.score(), 1);
        let review = session.review();
        assert_eq!(review[1].chosen, Some(0));
        assert!(!review[1].correct);
        assert_eq!(review[2].chosen, None);
    }

    #[test]
    fn test_parse_bank_drops_bad_answers() {
        let json = r#"[
            {"id":"ok","topic":"cells","difficulty":"easy","prompt":"?","choices":["x","y"],"answerIndex":0},
            {"id":"bad","topic":"cells","difficulty":"hard","prompt":"?","choices":["x"],"answerIndex":3}
        ]"#;
        let bank = parse_bank(json).unwrap();
        assert_eq!(bank.len(), 1);
        assert_eq!(topics(&bank), vec!["cells"]);
    }
}
