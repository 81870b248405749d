//! Game Module
//!
//! The betting, configuration and terminal layers that drive the race engine.

pub mod betting;
pub mod cli;
pub mod config;
pub mod menu;
pub mod render;

pub use betting::{Bet, BetError, Settlement, Wallet};
pub use cli::Cli;
pub use config::{ConfigStore, Settings};
pub use menu::Menu;
pub use render::TerminalRenderer;
