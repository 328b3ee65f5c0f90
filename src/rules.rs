//! Data-driven balance knobs
//!
//! Every cost, reward and threshold the economy consults lives here, so a
//! host can tune a variant without touching the state machine.

use serde::{Deserialize, Serialize};

/// Which termination rules a run plays under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// Win by reaching a chip target
    ChipTarget { target: i64 },
    /// Win by playing the question pool to exhaustion
    QuizRun,
}

/// Balance knobs for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rules {
    pub starting_chips: i64,
    /// Cost of launching one ball
    pub drop_cost: i64,
    /// Cost of the first question
    pub question_base_cost: i64,
    /// Added to the question cost per consecutive wrong answer
    pub miss_penalty: i64,
    /// Flat fee to arm the wager; refunded on cancellation
    pub wager_cost: i64,
    /// Reward multiplier while a wager is armed
    pub wager_multiplier: i64,
    /// Flat fee to arm the single-use bumper
    pub bumper_cost: i64,
    /// Base reward for a correct answer, before time bonus and wager
    pub correct_reward: i64,
    /// Countdown per question, whole seconds
    pub question_time_secs: u32,
    /// Balance granted by a bailout
    pub bailout_floor: i64,
    /// Bailout budget; the floor is granted `max_bailouts - 1` times and
    /// the next qualifying event after that loses the run
    pub max_bailouts: u32,
    pub mode: GameMode,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            starting_chips: 100,
            drop_cost: 2,
            question_base_cost: 10,
            miss_penalty: 8,
            wager_cost: 5,
            wager_multiplier: 2,
            bumper_cost: 5,
            correct_reward: 20,
            question_time_secs: 15,
            bailout_floor: 25,
            max_bailouts: 3,
            mode: GameMode::ChipTarget { target: 300 },
        }
    }
}
