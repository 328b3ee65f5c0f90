//! Trivia question bank
//!
//! Loaded once at startup from a bundled JSON array and drawn without
//! replacement. An exhausted pool is the quiz-complete signal, not an
//! error; a malformed bundle is terminal for the session.

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single trivia record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub question: String,
    /// Choices in display order
    pub options: Vec<String>,
    /// The correct choice; compared against submissions by equality
    pub answer: String,
    pub explanation: String,
}

/// Why a question bundle was rejected at load.
#[derive(Debug, Error)]
pub enum BankError {
    #[error("malformed question bundle: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("question bundle is empty")]
    Empty,
    #[error("question {index} lists an answer that is not among its options")]
    AnswerNotInOptions { index: usize },
}

/// The remaining question pool for one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionBank {
    remaining: Vec<Question>,
}

impl QuestionBank {
    /// Parse and validate a JSON array of questions.
    pub fn from_json(json: &str) -> Result<Self, BankError> {
        let remaining: Vec<Question> = serde_json::from_str(json)?;
        if remaining.is_empty() {
            return Err(BankError::Empty);
        }
        for (index, question) in remaining.iter().enumerate() {
            if !question.options.contains(&question.answer) {
                return Err(BankError::AnswerNotInOptions { index });
            }
        }
        log::info!("Loaded {} questions", remaining.len());
        Ok(Self { remaining })
    }

    /// The bank bundled with the crate.
    pub fn bundled() -> Result<Self, BankError> {
        Self::from_json(include_str!("../assets/questions.json"))
    }

    pub fn len(&self) -> usize {
        self.remaining.len()
    }

    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }

    /// Draw one question uniformly at random, removing it from the pool.
    pub fn draw(&mut self, rng: &mut Pcg32) -> Option<Question> {
        if self.remaining.is_empty() {
            return None;
        }
        let index = rng.random_range(0..self.remaining.len());
        Some(self.remaining.remove(index))
    }
}
