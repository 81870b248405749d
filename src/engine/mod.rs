//! Race Engine Module
//!
//! Builds race profiles (weights and odds) and resolves races to a winner.
//! Everything here is synchronous and free of I/O.

pub mod horse;
pub mod race;
pub mod simulation;

pub use horse::Horse;
pub use race::{build_race, compute_decimal_odds, generate_weights, RaceProfile, RaceSeed};
pub use simulation::{run_race, run_race_with, RaceFrame, RaceOutcome, RaceRenderer, RaceStatus, Simulator};
