//! Betting - Wallet, wagers and payouts
//!
//! The race engine only reports a winner; this is where money moves.

use std::fmt;

use colored::Colorize;

/// Balance a new player starts with
pub const STARTING_BALANCE: u64 = 5000;

/// Odds used when a horse has no price on record
const FALLBACK_ODDS: f64 = 2.0;

/// A placed wager. The stake has already left the wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bet {
    /// 1-based horse number
    pub horse: usize,
    pub stake: u64,
}

/// Why a wager was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BetError {
    NoSuchHorse { horse: usize, horse_count: usize },
    ZeroStake,
    InsufficientFunds { stake: u64, balance: u64 },
}

impl fmt::Display for BetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BetError::NoSuchHorse { horse, horse_count } => {
                write!(f, "horse {} is not in a field of {}", horse, horse_count)
            }
            BetError::ZeroStake => write!(f, "stake must be at least 1"),
            BetError::InsufficientFunds { stake, balance } => {
                write!(f, "stake {} exceeds balance {}", stake, balance)
            }
        }
    }
}

impl std::error::Error for BetError {}

/// Result of settling a bet against a race winner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    Won { bet: Bet, payout: u64, balance: u64 },
    Lost { bet: Bet, balance: u64 },
}

impl Settlement {
    pub fn balance(&self) -> u64 {
        match self {
            Settlement::Won { balance, .. } | Settlement::Lost { balance, .. } => *balance,
        }
    }

    pub fn is_win(&self) -> bool {
        matches!(self, Settlement::Won { .. })
    }
}

impl fmt::Display for Settlement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Settlement::Won { payout, balance, .. } => write!(
                f,
                "{}",
                format!("You win ${}.\nYour total money is: ${}", payout, balance).bright_green()
            ),
            Settlement::Lost { bet, balance } => write!(
                f,
                "{}",
                format!("You lost ${}.\nYour total money is: ${}.", bet.stake, balance).bright_red()
            ),
        }
    }
}

/// The player's money
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wallet {
    balance: u64,
}

impl Wallet {
    pub fn new(balance: u64) -> Self {
        Self { balance }
    }

    pub fn balance(&self) -> u64 {
        self.balance
    }

    pub fn is_broke(&self) -> bool {
        self.balance == 0
    }

    /// Take a stake out of the wallet for a horse in a field of `horse_count`
    pub fn place(&mut self, horse: usize, stake: u64, horse_count: usize) -> Result<Bet, BetError> {
        if horse == 0 || horse > horse_count {
            return Err(BetError::NoSuchHorse { horse, horse_count });
        }
        if stake == 0 {
            return Err(BetError::ZeroStake);
        }
        if stake > self.balance {
            return Err(BetError::InsufficientFunds {
                stake,
                balance: self.balance,
            });
        }
        self.balance -= stake;
        log::info!("Bet ${} on horse {}, balance now ${}", stake, horse, self.balance);
        Ok(Bet { horse, stake })
    }

    /// Pay out `stake * odds`, halves rounded to even, if the bet's horse won
    pub fn settle(&mut self, bet: Bet, winner: usize, odds: &[f64]) -> Settlement {
        if bet.horse != winner {
            log::info!("Horse {} lost to horse {}", bet.horse, winner);
            return Settlement::Lost {
                bet,
                balance: self.balance,
            };
        }
        let price = bet
            .horse
            .checked_sub(1)
            .and_then(|i| odds.get(i).copied())
            .unwrap_or(FALLBACK_ODDS);
        let payout = (bet.stake as f64 * price).round_ties_even() as u64;
        self.balance += payout;
        log::info!("Horse {} won at {:.2}, paid ${}", bet.horse, price, payout);
        Settlement::Won {
            bet,
            payout,
            balance: self.balance,
        }
    }
}

impl Default for Wallet {
    fn default() -> Self {
        Self::new(STARTING_BALANCE)
    }
}
