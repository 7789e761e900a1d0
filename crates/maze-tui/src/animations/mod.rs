pub mod sweep;

pub use sweep::{HintTrail, SolveSweep};
