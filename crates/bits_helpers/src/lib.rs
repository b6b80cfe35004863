mod bit;
pub use bit::*;

pub mod floating_score;
pub mod input;
