//! Board layout generation
//!
//! Pegs, moving obstacles and slot scores all come from the session RNG, so
//! a seed reproduces every layout in a run. Pegs are generated once per
//! board; obstacles and the slot arrangement are refreshed on every drop.

use glam::Vec2;
use rand::Rng;
use rand::seq::SliceRandom;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// A static peg. Immutable for the lifetime of a drop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Peg {
    pub pos: Vec2,
    pub radius: f32,
}

/// A moving obstacle bar, patrolling between the side bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Horizontal velocity (units/step, sign is direction)
    pub vel: f32,
}

impl Obstacle {
    /// Advance one step, reversing direction at either horizontal bound.
    pub fn advance(&mut self, board_width: f32) {
        self.pos.x += self.vel;
        if self.pos.x <= 0.0 {
            self.pos.x = 0.0;
            self.vel = self.vel.abs();
        } else if self.pos.x + self.width >= board_width {
            self.pos.x = board_width - self.width;
            self.vel = -self.vel.abs();
        }
    }

    /// Axis-aligned overlap test against a ball's bounding box.
    pub fn overlaps_ball(&self, center: Vec2, radius: f32) -> bool {
        center.x + radius > self.pos.x
            && center.x - radius < self.pos.x + self.width
            && center.y + radius > self.pos.y
            && center.y - radius < self.pos.y + self.height
    }
}

/// The generated layout for one board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardLayout {
    pub width: f32,
    pub height: f32,
    pub pegs: Vec<Peg>,
    pub obstacles: Vec<Obstacle>,
    /// Score per landing slot, left to right
    pub slot_scores: Vec<i64>,
}

impl BoardLayout {
    /// Generate a fresh layout: jittered peg grid, randomized obstacles,
    /// slot scores in their base arrangement.
    pub fn generate(width: f32, height: f32, rng: &mut Pcg32) -> Self {
        Self {
            width,
            height,
            pegs: generate_pegs(width, rng),
            obstacles: generate_obstacles(width, rng),
            slot_scores: SLOT_SCORES.to_vec(),
        }
    }

    /// Width of one landing slot
    pub fn slot_width(&self) -> f32 {
        self.width / self.slot_scores.len() as f32
    }

    /// Slot index for a landing x position. Clamped into range, so a
    /// floating-point overshoot past either edge falls back to an edge slot.
    pub fn slot_index(&self, x: f32) -> usize {
        let idx = (x / self.slot_width()).floor() as i64;
        idx.clamp(0, self.slot_scores.len() as i64 - 1) as usize
    }

    /// Rearrange the slot scores in place. Same multiset, new order.
    pub fn shuffle_slots(&mut self, rng: &mut Pcg32) {
        self.slot_scores.shuffle(rng);
    }

    /// Replace the obstacle set with a freshly randomized one.
    pub fn regenerate_obstacles(&mut self, rng: &mut Pcg32) {
        self.obstacles = generate_obstacles(self.width, rng);
    }
}

/// Rows of pegs spanning the board width, odd rows offset by half a column,
/// each peg nudged by a small jitter on both axes.
fn generate_pegs(width: f32, rng: &mut Pcg32) -> Vec<Peg> {
    let mut pegs = Vec::new();
    for row in 0..PEG_ROWS {
        let y = PEG_TOP_MARGIN + row as f32 * PEG_ROW_SPACING;
        let offset = if row % 2 == 1 { PEG_COL_SPACING / 2.0 } else { 0.0 };
        let mut x = PEG_SIDE_MARGIN + offset;
        while x <= width - PEG_SIDE_MARGIN {
            let jx = rng.random_range(-PEG_JITTER..=PEG_JITTER);
            let jy = rng.random_range(-PEG_JITTER..=PEG_JITTER);
            pegs.push(Peg {
                pos: Vec2::new(x + jx, y + jy),
                radius: PEG_RADIUS,
            });
            x += PEG_COL_SPACING;
        }
    }
    pegs
}

fn generate_obstacles(width: f32, rng: &mut Pcg32) -> Vec<Obstacle> {
    let count = rng.random_range(OBSTACLE_MIN_COUNT..=OBSTACLE_MAX_COUNT);
    (0..count)
        .map(|_| {
            let w = rng.random_range(OBSTACLE_MIN_WIDTH..=OBSTACLE_MAX_WIDTH);
            let x = rng.random_range(0.0..=(width - w));
            let y = rng.random_range(OBSTACLE_MIN_Y..=OBSTACLE_MAX_Y);
            let speed = rng.random_range(OBSTACLE_MIN_SPEED..=OBSTACLE_MAX_SPEED);
            let dir = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
            Obstacle {
                pos: Vec2::new(x, y),
                width: w,
                height: OBSTACLE_THICKNESS,
                vel: speed * dir,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;

    #[test]
    fn test_layout_determinism() {
        let mut rng1 = Pcg32::seed_from_u64(42);
        let mut rng2 = Pcg32::seed_from_u64(42);
        let a = BoardLayout::generate(BOARD_WIDTH, BOARD_HEIGHT, &mut rng1);
        let b = BoardLayout::generate(BOARD_WIDTH, BOARD_HEIGHT, &mut rng2);
        assert_eq!(a, b);
    }

    #[test]
    fn test_peg_grid_stays_within_jitter() {
        let mut rng = Pcg32::seed_from_u64(7);
        let layout = BoardLayout::generate(BOARD_WIDTH, BOARD_HEIGHT, &mut rng);
        assert!(!layout.pegs.is_empty());

        let max_y = PEG_TOP_MARGIN + (PEG_ROWS as f32 - 1.0) * PEG_ROW_SPACING + PEG_JITTER;
        for peg in &layout.pegs {
            assert!(peg.pos.y >= PEG_TOP_MARGIN - PEG_JITTER);
            assert!(peg.pos.y <= max_y);
            assert!(peg.pos.x >= PEG_SIDE_MARGIN - PEG_JITTER);
            assert!(peg.pos.x <= BOARD_WIDTH - PEG_SIDE_MARGIN + PEG_COL_SPACING / 2.0 + PEG_JITTER);
            assert_eq!(peg.radius, PEG_RADIUS);
        }
    }

    #[test]
    fn test_obstacle_parameters_in_range() {
        for seed in 0..32 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let layout = BoardLayout::generate(BOARD_WIDTH, BOARD_HEIGHT, &mut rng);
            let n = layout.obstacles.len();
            assert!((OBSTACLE_MIN_COUNT..=OBSTACLE_MAX_COUNT).contains(&n));
            for ob in &layout.obstacles {
                assert!(ob.width >= OBSTACLE_MIN_WIDTH && ob.width <= OBSTACLE_MAX_WIDTH);
                assert!(ob.pos.y >= OBSTACLE_MIN_Y && ob.pos.y <= OBSTACLE_MAX_Y);
                assert!(ob.pos.x >= 0.0 && ob.pos.x + ob.width <= BOARD_WIDTH);
                let speed = ob.vel.abs();
                assert!(speed >= OBSTACLE_MIN_SPEED && speed <= OBSTACLE_MAX_SPEED);
            }
        }
    }

    #[test]
    fn test_shuffle_is_a_permutation() {
        let mut rng = Pcg32::seed_from_u64(99);
        let mut layout = BoardLayout::generate(BOARD_WIDTH, BOARD_HEIGHT, &mut rng);
        let mut base = layout.slot_scores.clone();
        for _ in 0..20 {
            layout.shuffle_slots(&mut rng);
            let mut shuffled = layout.slot_scores.clone();
            base.sort_unstable();
            shuffled.sort_unstable();
            assert_eq!(base, shuffled);
        }
    }

    #[test]
    fn test_obstacle_bounces_at_bounds() {
        let mut ob = Obstacle {
            pos: Vec2::new(1.0, 150.0),
            width: 60.0,
            height: OBSTACLE_THICKNESS,
            vel: -1.5,
        };
        ob.advance(BOARD_WIDTH);
        assert_eq!(ob.pos.x, 0.0);
        assert!(ob.vel > 0.0);

        ob.pos.x = BOARD_WIDTH - ob.width - 0.5;
        ob.vel = 1.5;
        ob.advance(BOARD_WIDTH);
        assert_eq!(ob.pos.x, BOARD_WIDTH - ob.width);
        assert!(ob.vel < 0.0);
    }

    proptest! {
        #[test]
        fn prop_slot_index_always_in_range(x in -5000.0f32..5000.0) {
            let mut rng = Pcg32::seed_from_u64(0);
            let layout = BoardLayout::generate(BOARD_WIDTH, BOARD_HEIGHT, &mut rng);
            let idx = layout.slot_index(x);
            prop_assert!(idx < layout.slot_scores.len());
        }

        #[test]
        fn prop_slot_index_matches_bin_math(slot in 0usize..7) {
            let mut rng = Pcg32::seed_from_u64(0);
            let layout = BoardLayout::generate(BOARD_WIDTH, BOARD_HEIGHT, &mut rng);
            // Landing in the middle of a bin maps back to that bin
            let x = (slot as f32 + 0.5) * layout.slot_width();
            prop_assert_eq!(layout.slot_index(x), slot);
        }
    }
}
