use std::fmt::Write as _;
use std::time::Duration;

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
};

use crate::game::{PlayerState, TargetWord, MAX_PLAYERS};

/// Finishing place, one style per place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    First,
    Second,
    Third,
    Fourth,
}

impl Placement {
    pub fn from_rank(rank: usize) -> Option<Placement> {
        match rank {
            1 => Some(Placement::First),
            2 => Some(Placement::Second),
            3 => Some(Placement::Third),
            4 => Some(Placement::Fourth),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Placement::First => "1st place",
            Placement::Second => "2nd place",
            Placement::Third => "3rd place",
            Placement::Fourth => "4th place",
        }
    }

    /// 256-color palette index: gold, silver, bronze, dark red.
    pub fn color_index(self) -> u8 {
        match self {
            Placement::First => 11,
            Placement::Second => 250,
            Placement::Third => 208,
            Placement::Fourth => 124,
        }
    }
}

/// One player's line in the standings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    Finished {
        player: usize,
        placement: Option<Placement>,
        elapsed: Duration,
    },
    Racing {
        player: usize,
        /// Letters confirmed so far.
        typed: String,
        /// The letter being keyed now.
        next: char,
        /// Pending dots and dashes.
        symbols: String,
        mistakes: u32,
    },
}

/// Render-ready view of a race. Building it has no side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Standings {
    pub target: String,
    pub clock: Duration,
    pub rows: Vec<Row>,
}

impl Standings {
    pub fn project(
        players: &[PlayerState; MAX_PLAYERS],
        target: &TargetWord,
        clock: Duration,
    ) -> Standings {
        let rows = players
            .iter()
            .enumerate()
            .map(|(index, state)| project_row(index + 1, state, target))
            .collect();
        Standings {
            target: target.to_string(),
            clock,
            rows,
        }
    }

    /// `mm:ss.ss` race clock.
    pub fn clock_label(&self) -> String {
        format_clock(self.clock)
    }

    /// Player rows for the terminal UI.
    pub fn rows_text(&self) -> Text<'static> {
        let lines: Vec<Line<'static>> = self
            .rows
            .iter()
            .map(|row| row_line(row, &self.target))
            .collect();
        Text::from(lines)
    }

    /// Full-screen ANSI rendering: boxed, centered target and clock, then one
    /// row per player. `width` is the display width in columns.
    pub fn to_ansi(&self, width: usize) -> String {
        let clock = self.clock_label();
        // The box grows rather than let the banner text spill past its edges.
        let inner = width
            .saturating_sub(2)
            .max(self.target.chars().count())
            .max(clock.len());
        let rule = "-".repeat(inner);
        let mut out = String::new();

        out.push_str("\x1b[2J\x1b[H");
        let _ = writeln!(out, "+{rule}+");
        let _ = writeln!(out, "|{}|", " ".repeat(inner));
        let _ = writeln!(out, "|{}|", center(&self.target, inner));
        let _ = writeln!(out, "|{}|", center(&clock, inner));
        let _ = writeln!(out, "|{}|", " ".repeat(inner));
        let _ = writeln!(out, "+{rule}+");

        for row in &self.rows {
            match row {
                Row::Finished {
                    player,
                    placement,
                    elapsed,
                } => {
                    let place = match placement {
                        Some(p) => format!("\x1b[38;5;{}m{}\x1b[39m", p.color_index(), p.label()),
                        None => String::new(),
                    };
                    let _ = writeln!(
                        out,
                        "Player {player}: \x1b[32m{}\x1b[39m\x1b[24m\t{place} ({:.2}s)",
                        self.target,
                        elapsed.as_secs_f64()
                    );
                }
                Row::Racing {
                    player,
                    typed,
                    next,
                    symbols,
                    mistakes,
                } => {
                    let _ = write!(out, "Player {player}: {typed}\x1b[41m{next}\x1b[49m\t{symbols}");
                    if *mistakes > 0 {
                        let _ = write!(out, "\t({mistakes} mistakes)");
                    }
                    out.push('\n');
                }
            }
        }
        out
    }
}

fn project_row(player: usize, state: &PlayerState, target: &TargetWord) -> Row {
    let next = target.letter(state.confirmed());
    match (state.finish(), next) {
        (Some(finish), _) => Row::Finished {
            player,
            placement: Placement::from_rank(finish.rank),
            elapsed: finish.elapsed,
        },
        (None, Some(next)) => Row::Racing {
            player,
            typed: target.prefix(state.confirmed()).to_string(),
            next,
            symbols: state.pending().notation(),
            mistakes: state.mistakes(),
        },
        // Word complete but no finish recorded; show it as done, unplaced.
        (None, None) => Row::Finished {
            player,
            placement: None,
            elapsed: Duration::ZERO,
        },
    }
}

fn row_line(row: &Row, target: &str) -> Line<'static> {
    match row {
        Row::Finished {
            player,
            placement,
            elapsed,
        } => {
            let mut spans = vec![
                Span::raw(format!("Player {player}: ")),
                Span::styled(target.to_string(), Style::default().fg(Color::Green)),
                Span::raw("  "),
            ];
            if let Some(p) = placement {
                spans.push(Span::styled(
                    p.label(),
                    Style::default()
                        .fg(Color::Indexed(p.color_index()))
                        .add_modifier(Modifier::BOLD),
                ));
            }
            spans.push(Span::raw(format!(" ({:.2}s)", elapsed.as_secs_f64())));
            Line::from(spans)
        }
        Row::Racing {
            player,
            typed,
            next,
            symbols,
            mistakes,
        } => {
            let mut spans = vec![
                Span::raw(format!("Player {player}: ")),
                Span::styled(typed.clone(), Style::default().fg(Color::Green)),
                Span::styled(next.to_string(), Style::default().bg(Color::Red)),
                Span::raw("  "),
                Span::styled(symbols.clone(), Style::default().fg(Color::Cyan)),
            ];
            if *mistakes > 0 {
                spans.push(Span::styled(
                    format!("  ({mistakes} mistakes)"),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            Line::from(spans)
        }
    }
}

fn format_clock(clock: Duration) -> String {
    let total = clock.as_secs_f64();
    let mins = (total / 60.0).floor();
    let secs = total - mins * 60.0;
    format!("{:02}:{:05.2}", mins as u64, secs)
}

fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    let left = (width + len) / 2;
    let right = width.saturating_sub(left);
    format!("{text:>left$}{:right$}", "")
}
