//! The in-memory sequence model and view parameters.
//!
//! Everything here is plain data plus pure-ish transformations (random
//! generation threads an explicit [`rand::Rng`] so tests stay
//! deterministic). Nothing in this module knows about the GPU.

mod base;
mod sequence;
mod view_state;

pub use base::Base;
pub use sequence::{BasePair, PairId, Sequence, FLASH_WINDOW};
pub use view_state::{
    ViewState, MAX_LENGTH, MIN_LENGTH, SPIN_SPEED_MAX, TWIST_MAX, TWIST_MIN,
};
