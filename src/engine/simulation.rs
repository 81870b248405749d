//! Simulation - Tick-by-tick race resolution
//!
//! Advances every horse with weighted randomness until one reaches the
//! finish line. Drawing is delegated to a [`RaceRenderer`].

use std::thread;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::engine::horse::Horse;
use crate::engine::race::RaceProfile;

/// Pause between animation frames when not in fast mode
pub const TICK_DELAY: Duration = Duration::from_millis(100);

/// Race status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RaceStatus {
    Running,
    Finished,
}

/// What the presentation layer sees on each tick
#[derive(Debug, Clone, Copy)]
pub struct RaceFrame<'a> {
    pub positions: &'a [u32],
    /// Player's pick (1-based)
    pub chosen: usize,
    /// Set only on the final frame
    pub winner: Option<usize>,
    pub distance: u32,
    pub tick: u32,
}

/// Render callback invoked synchronously once per tick and once at the finish
pub trait RaceRenderer {
    fn render(&mut self, frame: &RaceFrame<'_>);
}

impl<F> RaceRenderer for F
where
    F: FnMut(&RaceFrame<'_>),
{
    fn render(&mut self, frame: &RaceFrame<'_>) {
        self(frame)
    }
}

/// Final state of a resolved race
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RaceOutcome {
    pub positions: Vec<u32>,
    /// 1-based winning horse
    pub winner: usize,
    pub ticks: u32,
}

/// Live race state, owned by the simulator for one race
#[derive(Debug, Clone)]
pub struct Race {
    horses: Vec<Horse>,
    positions: Vec<u32>,
    distance: u32,
    status: RaceStatus,
    winner: Option<usize>,
    ticks: u32,
}

impl Race {
    /// Set up a race from its profile.
    ///
    /// Panics if the profile has no horses.
    pub fn new(profile: &RaceProfile) -> Self {
        assert!(profile.horse_count() > 0, "a race needs at least one horse");
        Self {
            horses: Horse::field(profile.weights()),
            positions: vec![0; profile.horse_count()],
            distance: profile.distance(),
            status: RaceStatus::Running,
            winner: None,
            ticks: 0,
        }
    }

    pub fn status(&self) -> RaceStatus {
        self.status
    }

    pub fn positions(&self) -> &[u32] {
        &self.positions
    }

    pub fn winner(&self) -> Option<usize> {
        self.winner
    }

    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    /// Lowest-numbered horse at the maximum position, once it has crossed
    pub fn leader(&self) -> Option<usize> {
        let best = *self.positions.iter().max()?;
        if best < self.distance {
            return None;
        }
        self.positions.iter().position(|p| *p == best).map(|i| i + 1)
    }

    /// Move to `Finished` if someone has crossed the line
    pub fn check_finish(&mut self) -> Option<usize> {
        if self.status == RaceStatus::Running {
            if let Some(winner) = self.leader() {
                self.status = RaceStatus::Finished;
                self.winner = Some(winner);
            }
        }
        self.winner
    }

    /// Advance all horses one tick
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.status == RaceStatus::Finished {
            return;
        }
        for (horse, position) in self.horses.iter().zip(self.positions.iter_mut()) {
            *position += horse.step(rng);
        }
        self.ticks += 1;
    }

    pub fn frame(&self, chosen: usize) -> RaceFrame<'_> {
        RaceFrame {
            positions: &self.positions,
            chosen,
            winner: self.winner,
            distance: self.distance,
            tick: self.ticks,
        }
    }
}

/// Runs races to completion, pacing frames unless in fast mode
#[derive(Debug, Clone)]
pub struct Simulator {
    fast: bool,
    tick_delay: Duration,
}

impl Simulator {
    pub fn new(fast: bool) -> Self {
        Self {
            fast,
            tick_delay: TICK_DELAY,
        }
    }

    /// Override the pause between frames
    pub fn with_tick_delay(mut self, tick_delay: Duration) -> Self {
        self.tick_delay = tick_delay;
        self
    }

    /// Run one race to its finish
    pub fn run<R, V>(
        &self,
        profile: &RaceProfile,
        chosen: usize,
        renderer: &mut V,
        rng: &mut R,
    ) -> RaceOutcome
    where
        R: Rng + ?Sized,
        V: RaceRenderer + ?Sized,
    {
        let mut race = Race::new(profile);

        let winner = loop {
            renderer.render(&race.frame(chosen));
            if let Some(winner) = race.check_finish() {
                break winner;
            }
            if !self.fast {
                thread::sleep(self.tick_delay);
            }
            race.advance(rng);
        };

        renderer.render(&race.frame(chosen));
        log::info!("Horse {} won after {} ticks", winner, race.ticks);

        RaceOutcome {
            winner,
            ticks: race.ticks,
            positions: race.positions,
        }
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new(false)
    }
}

/// Run a race with an entropy-seeded generator and return the 1-based winner
pub fn run_race<V>(profile: &RaceProfile, chosen: usize, renderer: &mut V, fast: bool) -> usize
where
    V: RaceRenderer + ?Sized,
{
    run_race_with(profile, chosen, renderer, fast, &mut StdRng::from_entropy()).winner
}

/// Run a race with a caller-supplied generator
pub fn run_race_with<V, R>(
    profile: &RaceProfile,
    chosen: usize,
    renderer: &mut V,
    fast: bool,
    rng: &mut R,
) -> RaceOutcome
where
    V: RaceRenderer + ?Sized,
    R: Rng + ?Sized,
{
    Simulator::new(fast).run(profile, chosen, renderer, rng)
}
