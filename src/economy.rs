//! Chip economy and game state machine
//!
//! Owns the chip balance and every rule that mutates it: drop and question
//! costs, the wager multiplier, the single-use bumper fee, the escalating
//! miss penalty, and the bailout/win/loss termination rules. Board landings
//! and question resolutions arrive as calls from the session; the economy
//! never reaches back into the simulator.
//!
//! Every rejected command is a non-mutating `Err` so the host can show the
//! action as unavailable. Only bailout exhaustion is terminal.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::rules::{GameMode, Rules};

/// Why a command was rejected. Rejections never mutate state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("not enough chips")]
    InsufficientChips,
    #[error("a ball is already in flight")]
    BallInFlight,
    #[error("a question is already open")]
    QuestionOpen,
    #[error("no question is open")]
    NoQuestionOpen,
    #[error("a wager is already active")]
    WagerActive,
    #[error("no wager is active")]
    NoWagerActive,
    #[error("the bumper is already armed")]
    BumperArmed,
    #[error("the game is over")]
    GameOver,
}

/// Terminal result of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    InProgress,
    Won(WinReason),
    Lost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WinReason {
    /// Balance reached the chip target (custom mode)
    TargetReached,
    /// The question pool was played to exhaustion (quiz mode)
    QuizComplete,
}

/// How an open question resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// Correct, with whole seconds left on the countdown
    Correct { remaining_secs: u32 },
    Incorrect,
    TimedOut,
}

/// The economy state machine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Economy {
    rules: Rules,
    chips: i64,
    outcome: Outcome,
    wager_active: bool,
    question_open: bool,
    consecutive_misses: u32,
    bailouts_used: u32,
}

impl Economy {
    pub fn new(rules: Rules) -> Self {
        let mut economy = Self {
            chips: rules.starting_chips,
            rules,
            outcome: Outcome::InProgress,
            wager_active: false,
            question_open: false,
            consecutive_misses: 0,
            bailouts_used: 0,
        };
        // A starting balance at or above the target wins on the spot
        economy.check_termination();
        economy
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn chips(&self) -> i64 {
        self.chips
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn wager_active(&self) -> bool {
        self.wager_active
    }

    pub fn question_open(&self) -> bool {
        self.question_open
    }

    pub fn consecutive_misses(&self) -> u32 {
        self.consecutive_misses
    }

    pub fn bailouts_used(&self) -> u32 {
        self.bailouts_used
    }

    /// Cost of the next question: base cost plus the escalating penalty for
    /// each consecutive miss.
    pub fn question_cost(&self) -> i64 {
        self.rules.question_base_cost + self.consecutive_misses as i64 * self.rules.miss_penalty
    }

    fn ensure_active(&self) -> Result<(), ActionError> {
        match self.outcome {
            Outcome::InProgress => Ok(()),
            _ => Err(ActionError::GameOver),
        }
    }

    /// Pay for one ball drop. The session launches the ball on success.
    pub fn pay_drop(&mut self) -> Result<(), ActionError> {
        self.ensure_active()?;
        if self.chips < self.rules.drop_cost {
            return Err(ActionError::InsufficientChips);
        }
        self.chips -= self.rules.drop_cost;
        self.check_termination();
        Ok(())
    }

    /// Apply a landing score. The score may be negative; the balance is
    /// allowed to dip below zero here and is corrected by the termination
    /// check that follows.
    pub fn ball_landed(&mut self, score: i64) {
        if self.ensure_active().is_err() {
            return;
        }
        self.chips += score;
        log::debug!("Landing worth {score:+} chips, balance now {}", self.chips);
        self.check_termination();
    }

    /// Arm the reward multiplier for the next question. The flat fee is
    /// refunded only by [`Economy::cancel_wager`].
    pub fn activate_wager(&mut self) -> Result<(), ActionError> {
        self.ensure_active()?;
        if self.question_open {
            return Err(ActionError::QuestionOpen);
        }
        if self.wager_active {
            return Err(ActionError::WagerActive);
        }
        if self.chips < self.rules.wager_cost {
            return Err(ActionError::InsufficientChips);
        }
        self.chips -= self.rules.wager_cost;
        self.wager_active = true;
        self.check_termination();
        Ok(())
    }

    /// Stand down an armed wager and refund its fee.
    pub fn cancel_wager(&mut self) -> Result<(), ActionError> {
        self.ensure_active()?;
        if self.question_open {
            return Err(ActionError::QuestionOpen);
        }
        if !self.wager_active {
            return Err(ActionError::NoWagerActive);
        }
        self.chips += self.rules.wager_cost;
        self.wager_active = false;
        self.check_termination();
        Ok(())
    }

    /// Pay the bumper fee. The session arms the board strip on success and
    /// rejects the command if the strip is already armed.
    pub fn pay_bumper(&mut self) -> Result<(), ActionError> {
        self.ensure_active()?;
        if self.chips < self.rules.bumper_cost {
            return Err(ActionError::InsufficientChips);
        }
        self.chips -= self.rules.bumper_cost;
        self.check_termination();
        Ok(())
    }

    /// Pay for a question at the current escalated cost and mark one open.
    /// The session draws from the pool and starts the countdown.
    pub fn open_question(&mut self) -> Result<(), ActionError> {
        self.ensure_active()?;
        if self.question_open {
            return Err(ActionError::QuestionOpen);
        }
        let cost = self.question_cost();
        if self.chips < cost {
            return Err(ActionError::InsufficientChips);
        }
        self.chips -= cost;
        self.question_open = true;
        self.check_termination();
        Ok(())
    }

    /// Resolve the open question. Returns the reward applied (zero on a
    /// miss). The wager is spent by any resolution; the miss counter resets
    /// on a correct answer and grows otherwise.
    pub fn resolve_question(&mut self, answer: AnswerOutcome) -> Result<i64, ActionError> {
        self.ensure_active()?;
        if !self.question_open {
            return Err(ActionError::NoQuestionOpen);
        }
        self.question_open = false;

        let reward = match answer {
            AnswerOutcome::Correct { remaining_secs } => {
                self.consecutive_misses = 0;
                let multiplier = if self.wager_active {
                    self.rules.wager_multiplier
                } else {
                    1
                };
                let reward = (self.rules.correct_reward + time_bonus(remaining_secs)) * multiplier;
                self.chips += reward;
                reward
            }
            AnswerOutcome::Incorrect | AnswerOutcome::TimedOut => {
                self.consecutive_misses += 1;
                0
            }
        };
        self.wager_active = false;

        self.check_termination();
        Ok(reward)
    }

    /// Quiz-mode win: the pool has been played dry.
    pub fn quiz_complete(&mut self) {
        if self.outcome == Outcome::InProgress && self.rules.mode == GameMode::QuizRun {
            log::info!("Question pool exhausted, quiz complete");
            self.outcome = Outcome::Won(WinReason::QuizComplete);
        }
    }

    /// Re-evaluate the termination predicates. Invoked after every
    /// balance-affecting event; safe to call at any time.
    pub fn check_termination(&mut self) {
        if self.outcome != Outcome::InProgress {
            return;
        }

        if let GameMode::ChipTarget { target } = self.rules.mode
            && self.chips >= target
        {
            log::info!("Chip target {target} reached with {} chips", self.chips);
            self.outcome = Outcome::Won(WinReason::TargetReached);
            return;
        }

        if self.chips <= 0 || self.chips < self.cheapest_action_cost() {
            self.bail_out_or_lose();
        }
    }

    /// The cheapest move still on the table. Below this, the player is
    /// stuck and a bailout (or the loss) triggers.
    fn cheapest_action_cost(&self) -> i64 {
        self.rules
            .drop_cost
            .min(self.question_cost())
            .min(self.rules.wager_cost)
            .min(self.rules.bumper_cost)
    }

    fn bail_out_or_lose(&mut self) {
        if self.bailouts_used + 1 < self.rules.max_bailouts {
            self.bailouts_used += 1;
            self.chips = self.rules.bailout_floor;
            log::info!(
                "Bailout {}/{}: balance reset to {}",
                self.bailouts_used,
                self.rules.max_bailouts,
                self.chips
            );
        } else {
            log::info!("Bailouts exhausted with {} chips, game lost", self.chips);
            self.outcome = Outcome::Lost;
        }
    }
}

/// Bonus for answering with time to spare; a small penalty for answering
/// at the last moment.
fn time_bonus(remaining_secs: u32) -> i64 {
    if remaining_secs > 10 {
        10
    } else if remaining_secs > 0 && remaining_secs <= 5 {
        -5
    } else {
        0
    }
}
