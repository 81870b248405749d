//! Render - Terminal drawing for races and odds
//!
//! Layout is built as plain strings so it can be checked without a terminal.

use std::io::Write;

use colored::Colorize;

use crate::engine::{RaceFrame, RaceProfile, RaceRenderer};

pub const TITLE: &str = "Hippodrome v0.3";

const CLEAR_SCREEN: &str = "\x1B[2J\x1B[1;1H";
/// Room for the name column and borders beyond the finish line
const TRACK_MARGIN: usize = 15;
const NAME_WIDTH: usize = 14;

/// Wipe stdout and home the cursor
pub fn clear_screen() {
    let mut out = std::io::stdout();
    let _ = write!(out, "{}", CLEAR_SCREEN).and_then(|_| out.flush());
}

pub fn horse_name(number: usize) -> String {
    format!("Horse {}", number)
}

pub fn title() -> String {
    format!("{}\n", TITLE).bright_blue().to_string()
}

fn border(distance: u32) -> String {
    format!("+{}+", "-".repeat(distance as usize + TRACK_MARGIN))
}

/// Draw one frame of the track
pub fn format_frame(frame: &RaceFrame<'_>, icon: &str) -> String {
    let mut lines = Vec::with_capacity(frame.positions.len() + 4);
    lines.push(title());
    lines.push(border(frame.distance));

    for (i, position) in frame.positions.iter().enumerate() {
        let number = i + 1;
        let name = if number == frame.chosen {
            format!("{:<width$}", format!(">>{}<<", horse_name(number)), width = NAME_WIDTH)
                .yellow()
                .bold()
                .to_string()
        } else {
            format!("{:<width$}", horse_name(number), width = NAME_WIDTH)
        };
        let finish = if *position >= frame.distance { "|" } else { "" };
        let suffix = match frame.winner {
            Some(winner) if winner == number => " Winner!".bright_green().to_string(),
            _ => String::new(),
        };
        lines.push(format!(
            "| {} {}{}{}{}",
            name,
            " ".repeat(*position as usize),
            icon,
            finish,
            suffix
        ));
    }

    lines.push(border(frame.distance));
    if let Some(winner) = frame.winner {
        lines.push(format!("{} won the race!", horse_name(winner)));
    }
    lines.join("\n")
}

/// Odds table shown before a bet
pub fn format_odds(profile: &RaceProfile) -> String {
    let mut lines = vec!["Odds (decimal):".to_string()];
    for (i, odds) in profile.odds().iter().enumerate() {
        lines.push(format!("  {:>2}) {:<10} @ {:.2}", i + 1, horse_name(i + 1), odds));
    }
    lines.join("\n")
}

/// Draws race frames to a writer, usually stdout
pub struct TerminalRenderer<W: Write> {
    out: W,
    icon: String,
    clear: bool,
    failed: bool,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, icon: impl Into<String>) -> Self {
        Self {
            out,
            icon: icon.into(),
            clear: true,
            failed: false,
        }
    }

    /// Keep earlier frames on screen
    pub fn without_clearing(mut self) -> Self {
        self.clear = false;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn draw(&mut self, frame: &RaceFrame<'_>) -> std::io::Result<()> {
        if self.clear {
            write!(self.out, "{}", CLEAR_SCREEN)?;
        }
        writeln!(self.out, "{}", format_frame(frame, &self.icon))?;
        self.out.flush()
    }
}

impl<W: Write> RaceRenderer for TerminalRenderer<W> {
    fn render(&mut self, frame: &RaceFrame<'_>) {
        if let Err(err) = self.draw(frame) {
            if !self.failed {
                log::warn!("Could not draw race frame: {}", err);
                self.failed = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::race::HORSE_ICON;

    fn frame<'a>(positions: &'a [u32], chosen: usize, winner: Option<usize>) -> RaceFrame<'a> {
        RaceFrame {
            positions,
            chosen,
            winner,
            distance: 10,
            tick: 0,
        }
    }

    #[test]
    fn rows_place_horse_by_position() {
        let text = format_frame(&frame(&[0, 3], 2, None), "H");
        assert!(text.lines().any(|l| l == "| Horse 1        H"));
        assert!(text.contains(">>Horse 2<<"));
        assert!(text.contains("   H"));
        assert!(!text.contains("won the race"));
    }

    #[test]
    fn borders_span_track() {
        let text = format_frame(&frame(&[0, 0], 1, None), "H");
        let border = format!("+{}+", "-".repeat(25));
        assert_eq!(text.lines().filter(|l| *l == border).count(), 2);
    }

    #[test]
    fn finish_bar_and_winner() {
        let text = format_frame(&frame(&[10, 4], 2, Some(1)), HORSE_ICON);
        let row = text.lines().find(|l| l.starts_with("| Horse 1")).unwrap();
        assert!(row.contains(&format!("{}|", HORSE_ICON)));
        assert!(row.contains("Winner!"));
        assert!(text.ends_with("Horse 1 won the race!"));
    }

    #[test]
    fn odds_table_lists_every_horse() {
        let profile = RaceProfile::from_weights(vec![1.0, 1.0, 1.0]);
        let text = format_odds(&profile);
        assert_eq!(text.lines().count(), 4);
        assert!(text.contains("Horse 3"));
        assert!(text.contains("@ 2.70"));
    }

    #[test]
    fn renderer_writes_frames() {
        let mut renderer = TerminalRenderer::new(Vec::new(), "H").without_clearing();
        renderer.render(&frame(&[1, 2], 1, None));
        renderer.render(&frame(&[10, 2], 1, Some(1)));
        let out = String::from_utf8(renderer.into_inner()).unwrap();
        assert!(!out.contains(CLEAR_SCREEN));
        assert!(out.contains("Horse 1 won the race!"));
    }
}
