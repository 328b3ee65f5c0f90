//! Deterministic board simulation
//!
//! All drop physics lives here. This module must stay pure and deterministic:
//! - One discrete step per invocation, no wall-clock time
//! - Seeded RNG only
//! - No rendering or host dependencies

pub mod layout;
pub mod state;
pub mod step;

pub use layout::{BoardLayout, Obstacle, Peg};
pub use state::{Ball, BoardState, Landing};
pub use step::step;
