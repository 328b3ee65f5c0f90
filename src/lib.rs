//! Chipfall - a Plinko-style chip drop board with a trivia quiz bolted on
//!
//! Core modules:
//! - `board`: Deterministic drop simulation (pegs, moving obstacles, ball, slots)
//! - `economy`: Chip balance and the win/loss state machine
//! - `questions`: Bundled trivia bank, drawn without replacement
//! - `rules`: Data-driven balance knobs
//! - `session`: Composition root driven by an external scheduler
//!
//! The crate is the simulation core only. Rendering, input wiring and the
//! animation loop belong to the host: it calls [`Session::frame`] once per
//! animation frame, [`Session::second`] once per countdown tick, and the
//! command methods in response to player input.

pub mod board;
pub mod economy;
pub mod questions;
pub mod rules;
pub mod session;

pub use economy::{ActionError, Economy, Outcome, WinReason};
pub use questions::{BankError, Question, QuestionBank};
pub use rules::{GameMode, Rules};
pub use session::{PendingQuestion, Resolution, Session};

/// Board and physics constants
pub mod consts {
    /// Board extent in simulation units
    pub const BOARD_WIDTH: f32 = 420.0;
    pub const BOARD_HEIGHT: f32 = 560.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 8.0;
    pub const BALL_SPAWN_Y: f32 = 20.0;
    /// Initial downward velocity at launch (units/step)
    pub const BALL_LAUNCH_VY: f32 = 2.0;

    /// Constant downward acceleration (units/step²)
    pub const GRAVITY: f32 = 0.1;
    /// Horizontal damping applied when bouncing off a side wall
    pub const WALL_DAMPING: f32 = 0.8;

    /// Peg grid
    pub const PEG_RADIUS: f32 = 5.0;
    pub const PEG_ROWS: usize = 6;
    pub const PEG_COL_SPACING: f32 = 50.0;
    pub const PEG_ROW_SPACING: f32 = 60.0;
    pub const PEG_TOP_MARGIN: f32 = 80.0;
    pub const PEG_SIDE_MARGIN: f32 = 50.0;
    /// Per-peg positional jitter on both axes, so drops never settle into a
    /// perfectly periodic bounce pattern
    pub const PEG_JITTER: f32 = 1.5;
    /// Speed of the directional kick a peg gives the ball (units/step)
    pub const PEG_KICK_SPEED: f32 = 2.6;

    /// Moving obstacle generation ranges
    pub const OBSTACLE_MIN_COUNT: usize = 1;
    pub const OBSTACLE_MAX_COUNT: usize = 3;
    pub const OBSTACLE_MIN_WIDTH: f32 = 50.0;
    pub const OBSTACLE_MAX_WIDTH: f32 = 100.0;
    pub const OBSTACLE_THICKNESS: f32 = 12.0;
    pub const OBSTACLE_MIN_Y: f32 = 100.0;
    pub const OBSTACLE_MAX_Y: f32 = 300.0;
    pub const OBSTACLE_MIN_SPEED: f32 = 0.5;
    pub const OBSTACLE_MAX_SPEED: f32 = 1.5;
    /// Vertical damping when the ball bounces off an obstacle
    pub const OBSTACLE_DAMPING: f32 = 0.6;

    /// Single-use bumper strip at the bottom edge
    pub const BUMPER_Y: f32 = BOARD_HEIGHT - 10.0;
    pub const BUMPER_DAMPING: f32 = 0.9;

    /// Slot scores, left to right. Every live arrangement is a permutation
    /// of this multiset.
    pub const SLOT_SCORES: [i64; 7] = [90, 25, -10, 40, -10, 25, 90];
}
