//! Ball and board state

use glam::Vec2;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::layout::BoardLayout;
use crate::consts::*;

/// The ball in flight. Exists only between launch and landing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    /// Ball at the drop point, centered at the top of the board.
    pub fn at_drop_point(board_width: f32) -> Self {
        Self {
            pos: Vec2::new(board_width / 2.0, BALL_SPAWN_Y),
            vel: Vec2::new(0.0, BALL_LAUNCH_VY),
            radius: BALL_RADIUS,
        }
    }
}

/// Terminal event of a drop: the ball crossed the landing boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Landing {
    pub slot: usize,
    pub score: i64,
}

/// Full board state for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardState {
    pub layout: BoardLayout,
    /// At most one ball is ever in flight
    pub ball: Option<Ball>,
    /// Single-use rebound strip at the bottom edge
    pub bumper_armed: bool,
}

impl BoardState {
    pub fn new(rng: &mut Pcg32) -> Self {
        Self {
            layout: BoardLayout::generate(BOARD_WIDTH, BOARD_HEIGHT, rng),
            ball: None,
            bumper_armed: false,
        }
    }

    /// Whether a drop is currently in progress.
    pub fn ball_in_flight(&self) -> bool {
        self.ball.is_some()
    }

    /// Launch a ball. Rejected while one is already in flight.
    ///
    /// Every drop plays on a fresh arrangement: the slot scores are
    /// reshuffled and the obstacle set regenerated before the ball appears.
    pub fn launch(&mut self, rng: &mut Pcg32) -> bool {
        if self.ball.is_some() {
            return false;
        }
        self.layout.shuffle_slots(rng);
        self.layout.regenerate_obstacles(rng);
        self.ball = Some(Ball::at_drop_point(self.layout.width));
        true
    }

    /// Arm the bumper strip. Consumed by the next contact.
    pub fn arm_bumper(&mut self) {
        self.bumper_armed = true;
    }
}
