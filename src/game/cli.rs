//! Cli - Command-line flags
//!
//! Flags override the persisted settings for this run and are saved back.

use clap::Parser;

use crate::engine::RaceSeed;
use crate::game::config::{Settings, MIN_HORSES};

/// Terminal horse-racing betting game
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Skip the race animation delay
    #[arg(long, conflicts_with = "no_fast")]
    pub fast: bool,

    /// Animate races at normal speed
    #[arg(long)]
    pub no_fast: bool,

    /// Number of horses per race (at least 2)
    #[arg(long, value_name = "N")]
    pub horses: Option<usize>,

    /// Fix the race weights; an integer or any text
    #[arg(long, value_name = "SEED")]
    pub seed: Option<String>,

    /// Type-to-filter menus
    #[arg(long)]
    pub fuzzy: bool,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Layer the flags over persisted settings
    pub fn apply(&self, settings: &mut Settings) {
        if self.fast {
            settings.fast = true;
        }
        if self.no_fast {
            settings.fast = false;
        }
        match self.horses {
            Some(horses) if horses >= MIN_HORSES => settings.horses = horses,
            Some(horses) => log::warn!("Ignoring --horses {}, need at least {}", horses, MIN_HORSES),
            None => {}
        }
        if let Some(seed) = &self.seed {
            settings.seed = seed.parse::<RaceSeed>().ok();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("hipodromo").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn no_flags_change_nothing() {
        let mut settings = Settings::default();
        parse(&[]).apply(&mut settings);
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn fast_flags_toggle() {
        let mut settings = Settings::default();
        parse(&["--fast"]).apply(&mut settings);
        assert!(settings.fast);
        parse(&["--no-fast"]).apply(&mut settings);
        assert!(!settings.fast);
    }

    #[test]
    fn fast_and_no_fast_conflict() {
        assert!(Cli::try_parse_from(["hipodromo", "--fast", "--no-fast"]).is_err());
    }

    #[test]
    fn too_few_horses_are_ignored() {
        let mut settings = Settings::default();
        parse(&["--horses", "1"]).apply(&mut settings);
        assert_eq!(settings.horses, Settings::default().horses);
        parse(&["--horses", "8"]).apply(&mut settings);
        assert_eq!(settings.horses, 8);
    }

    #[test]
    fn seed_accepts_numbers_and_text() {
        let mut settings = Settings::default();
        parse(&["--seed", "42"]).apply(&mut settings);
        assert_eq!(settings.seed, Some(RaceSeed::Number(42)));
        parse(&["--seed", "derby-day"]).apply(&mut settings);
        assert_eq!(settings.seed, Some(RaceSeed::from("derby-day")));
    }
}
