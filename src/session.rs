//! Session composition root
//!
//! Owns the board, the economy, the question pool and the countdown, and is
//! the single mutation point the host drives. Board-landing and
//! countdown-expiry events are applied to the economy inside the call that
//! produced them, so no two balance mutations ever interleave.
//!
//! The host calls [`Session::frame`] once per animation frame and
//! [`Session::second`] once per countdown tick; everything else is a
//! discrete player command.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::board::{self, BoardState, Landing};
use crate::economy::{ActionError, AnswerOutcome, Economy, Outcome};
use crate::questions::{Question, QuestionBank};
use crate::rules::Rules;

/// A question currently on the clock.
#[derive(Debug, Clone)]
pub struct PendingQuestion {
    pub question: Question,
    /// Whole seconds left on the countdown
    pub remaining_secs: u32,
}

/// How the open question resolved, reported back to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Correct { reward: i64 },
    Incorrect { explanation: String },
    TimedOut { explanation: String },
}

/// One full game session.
#[derive(Debug, Clone)]
pub struct Session {
    seed: u64,
    rng: Pcg32,
    board: BoardState,
    economy: Economy,
    bank: QuestionBank,
    pending: Option<PendingQuestion>,
}

impl Session {
    pub fn new(seed: u64, rules: Rules, bank: QuestionBank) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let board = BoardState::new(&mut rng);
        let economy = Economy::new(rules);
        log::info!(
            "Session start: seed={seed}, {} questions, {} chips",
            bank.len(),
            economy.chips()
        );
        Self {
            seed,
            rng,
            board,
            economy,
            bank,
            pending: None,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Board read surface for the renderer.
    pub fn board(&self) -> &BoardState {
        &self.board
    }

    /// Economy read surface for the renderer.
    pub fn economy(&self) -> &Economy {
        &self.economy
    }

    pub fn chips(&self) -> i64 {
        self.economy.chips()
    }

    pub fn outcome(&self) -> Outcome {
        self.economy.outcome()
    }

    /// Cost of the next question at the current escalation.
    pub fn question_cost(&self) -> i64 {
        self.economy.question_cost()
    }

    pub fn questions_remaining(&self) -> usize {
        self.bank.len()
    }

    pub fn pending_question(&self) -> Option<&PendingQuestion> {
        self.pending.as_ref()
    }

    /// Advance the board one step and apply any landing to the economy
    /// before returning.
    pub fn frame(&mut self) -> Option<Landing> {
        let landing = board::step(&mut self.board);
        if let Some(landing) = landing {
            log::info!("Ball landed in slot {} for {:+}", landing.slot, landing.score);
            self.economy.ball_landed(landing.score);
        }
        landing
    }

    /// Advance the countdown one second. Expiry resolves the open question
    /// as a timeout inside this call.
    pub fn second(&mut self) -> Option<Resolution> {
        if self.outcome() != Outcome::InProgress {
            return None;
        }
        let pending = self.pending.as_mut()?;
        pending.remaining_secs = pending.remaining_secs.saturating_sub(1);
        if pending.remaining_secs > 0 {
            return None;
        }
        match self.resolve(AnswerOutcome::TimedOut) {
            Ok(resolution) => Some(resolution),
            Err(err) => {
                log::warn!("Timeout resolution rejected: {err}");
                None
            }
        }
    }

    /// Launch a ball. Rejected while one is in flight or unaffordable.
    pub fn request_drop(&mut self) -> Result<(), ActionError> {
        if self.board.ball_in_flight() {
            return Err(ActionError::BallInFlight);
        }
        self.economy.pay_drop()?;
        self.board.launch(&mut self.rng);
        log::debug!("Drop launched, balance {}", self.economy.chips());
        Ok(())
    }

    /// Buy a question at the current escalated cost and start its
    /// countdown. On an exhausted pool this is the quiz-complete path.
    pub fn request_question(&mut self) -> Result<(), ActionError> {
        if self.pending.is_some() {
            return Err(ActionError::QuestionOpen);
        }
        if self.bank.is_empty() {
            // Playing the pool dry is the quiz-mode win, not an error
            self.economy.quiz_complete();
            return Ok(());
        }
        self.economy.open_question()?;
        // Non-empty was checked above, so the draw always yields
        if let Some(question) = self.bank.draw(&mut self.rng) {
            log::debug!("Question opened, {} left in pool", self.bank.len());
            self.pending = Some(PendingQuestion {
                question,
                remaining_secs: self.economy.rules().question_time_secs,
            });
        }
        Ok(())
    }

    /// Answer the open question. Stops the countdown and settles chips.
    pub fn submit_answer(&mut self, choice: &str) -> Result<Resolution, ActionError> {
        if self.outcome() != Outcome::InProgress {
            return Err(ActionError::GameOver);
        }
        let Some(pending) = self.pending.as_ref() else {
            return Err(ActionError::NoQuestionOpen);
        };
        let answer = if choice == pending.question.answer {
            AnswerOutcome::Correct {
                remaining_secs: pending.remaining_secs,
            }
        } else {
            AnswerOutcome::Incorrect
        };
        self.resolve(answer)
    }

    pub fn activate_wager(&mut self) -> Result<(), ActionError> {
        self.economy.activate_wager()
    }

    pub fn cancel_wager(&mut self) -> Result<(), ActionError> {
        self.economy.cancel_wager()
    }

    /// Arm the single-use bumper strip.
    pub fn activate_bumper(&mut self) -> Result<(), ActionError> {
        if self.board.bumper_armed {
            return Err(ActionError::BumperArmed);
        }
        self.economy.pay_bumper()?;
        self.board.arm_bumper();
        Ok(())
    }

    /// Settle the open question; callers guarantee one is open.
    fn resolve(&mut self, answer: AnswerOutcome) -> Result<Resolution, ActionError> {
        let reward = self.economy.resolve_question(answer)?;
        let explanation = self
            .pending
            .take()
            .map(|p| p.question.explanation)
            .unwrap_or_default();
        match answer {
            AnswerOutcome::Correct { .. } => {
                log::info!("Correct answer, {reward:+} chips");
                Ok(Resolution::Correct { reward })
            }
            AnswerOutcome::Incorrect => {
                log::info!("Wrong answer, next question costs {}", self.question_cost());
                Ok(Resolution::Incorrect { explanation })
            }
            AnswerOutcome::TimedOut => {
                log::info!("Question timed out, next costs {}", self.question_cost());
                Ok(Resolution::TimedOut { explanation })
            }
        }
    }
}
