//! Menu - Interactive main menu and betting rounds
//!
//! Owns the wallet and settings for a session and saves them after every
//! change to the balance.

use anyhow::Context;
use colored::Colorize;
use dialoguer::{FuzzySelect, Input, Select};

use crate::engine::{build_race, run_race};
use crate::game::betting::Wallet;
use crate::game::config::{ConfigStore, Settings};
use crate::game::render::{self, clear_screen, format_odds, horse_name, TerminalRenderer};

/// Main menu entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    Play,
    ShowBalance,
    ToggleFast,
    Exit,
}

impl MenuChoice {
    const ALL: [MenuChoice; 4] = [
        MenuChoice::Play,
        MenuChoice::ShowBalance,
        MenuChoice::ToggleFast,
        MenuChoice::Exit,
    ];

    fn label(&self) -> &'static str {
        match self {
            MenuChoice::Play => "Play",
            MenuChoice::ShowBalance => "Show balance",
            MenuChoice::ToggleFast => "Toggle fast mode",
            MenuChoice::Exit => "Exit",
        }
    }
}

/// One interactive session
pub struct Menu {
    store: ConfigStore,
    settings: Settings,
    wallet: Wallet,
    fuzzy: bool,
}

impl Menu {
    pub fn new(store: ConfigStore, settings: Settings, fuzzy: bool) -> Self {
        let wallet = settings.wallet();
        Self {
            store,
            settings,
            wallet,
            fuzzy,
        }
    }

    /// Loop until the player exits
    pub fn run(&mut self) -> anyhow::Result<()> {
        loop {
            clear_screen();
            println!("{}", render::title());
            let labels = MenuChoice::ALL.map(|c| c.label().to_string());
            let choice = self
                .select("Main menu", &labels)?
                .map(|i| MenuChoice::ALL[i])
                .unwrap_or(MenuChoice::Exit);

            match choice {
                MenuChoice::Play => self.play()?,
                MenuChoice::ShowBalance => self.show_balance()?,
                MenuChoice::ToggleFast => self.toggle_fast()?,
                MenuChoice::Exit => {
                    self.persist();
                    println!("{}", "Thanks for playing!".bright_blue());
                    log::info!("Session ended with balance ${}", self.wallet.balance());
                    return Ok(());
                }
            }
        }
    }

    /// Betting rounds until the player backs out or goes broke
    fn play(&mut self) -> anyhow::Result<()> {
        loop {
            if self.wallet.is_broke() {
                self.pause("You ran out of money. Press enter to leave the track...")?;
                return Ok(());
            }

            let horses = self.settings.horses;
            let profile = build_race(horses, self.settings.seed.as_ref());

            clear_screen();
            println!("{}", render::title());
            println!("{}\n", format_odds(&profile));

            let mut items = profile
                .odds()
                .iter()
                .enumerate()
                .map(|(i, odds)| format!("{} @ {:.2}", horse_name(i + 1), odds))
                .collect::<Vec<_>>();
            items.push("Back".to_string());

            let horse = match self.select(&format!("Which horse do you bet on (1-{})", horses), &items)? {
                Some(i) if i < horses => i + 1,
                _ => {
                    self.persist();
                    return Ok(());
                }
            };

            let stake = self.ask_stake()?;
            let bet = self.wallet.place(horse, stake, horses)?;
            self.persist();

            let mut renderer = TerminalRenderer::new(std::io::stdout(), profile.icon());
            let winner = run_race(&profile, horse, &mut renderer, self.settings.fast);

            let settlement = self.wallet.settle(bet, winner, profile.odds());
            self.persist();
            println!("\n{}", settlement);

            if self.wallet.is_broke() {
                self.pause("You ran out of money. Press enter to leave the track...")?;
                return Ok(());
            }
            self.pause("Press enter to keep playing...")?;
        }
    }

    fn ask_stake(&self) -> anyhow::Result<u64> {
        let balance = self.wallet.balance();
        Input::<u64>::new()
            .with_prompt(format!("You have ${}, how much do you want to bet?", balance))
            .validate_with(move |stake: &u64| -> Result<(), String> {
                match *stake {
                    0 => Err("Enter a number >= 1".to_string()),
                    s if s > balance => Err(format!("Enter a number <= {}", balance)),
                    _ => Ok(()),
                }
            })
            .interact()
            .context("reading stake")
    }

    fn show_balance(&self) -> anyhow::Result<()> {
        println!(
            "{}",
            format!("Your total money is: ${}", self.wallet.balance()).bright_blue()
        );
        self.pause("Press enter to continue...")
    }

    fn toggle_fast(&mut self) -> anyhow::Result<()> {
        self.settings.fast = !self.settings.fast;
        self.persist();
        let message = if self.settings.fast {
            "Fast mode on"
        } else {
            "Fast mode off"
        };
        println!("{}", message.bright_blue());
        self.pause("Press enter to continue...")
    }

    /// Pick from a list; `None` when the player cancels
    fn select(&self, prompt: &str, items: &[String]) -> anyhow::Result<Option<usize>> {
        let picked = if self.fuzzy {
            FuzzySelect::new()
                .with_prompt(prompt)
                .items(items)
                .default(0)
                .interact_opt()
        } else {
            Select::new()
                .with_prompt(prompt)
                .items(items)
                .default(0)
                .interact_opt()
        };
        picked.context("reading menu selection")
    }

    fn pause(&self, prompt: &str) -> anyhow::Result<()> {
        Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .report(false)
            .interact()
            .context("waiting for enter")?;
        Ok(())
    }

    fn persist(&mut self) {
        self.settings.record(&self.wallet);
        self.store.save_or_warn(&self.settings);
    }
}
