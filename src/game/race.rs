use std::time::{Duration, Instant};

use super::line::LineReader;
use super::player::{Finish, Outcome, PlayerState, MAX_PLAYERS};
use super::protocol::{Rejected, Update};
use super::target::TargetWord;

/// What one reported line did to the race.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    /// Zero-length line; not a protocol line at all.
    Empty,
    /// Not a valid update line. Nothing changed.
    Ignored(Rejected),
    /// The symbol reached the player's decoder.
    Applied { slot: usize, outcome: Outcome },
    /// The symbol completed the word for this player.
    Finished { slot: usize, finish: Finish },
}

impl LineOutcome {
    /// Every reported line refreshes the standings, valid or not.
    pub fn refreshes_view(&self) -> bool {
        !matches!(self, LineOutcome::Empty)
    }
}

/// One race session: the target, the four players, the clock and the next
/// rank to hand out.
#[derive(Debug, Clone)]
pub struct Race {
    target: TargetWord,
    players: [PlayerState; MAX_PLAYERS],
    started_at: Option<Instant>,
    next_rank: usize,
}

impl Race {
    pub fn new(target: TargetWord) -> Self {
        Race {
            target,
            players: Default::default(),
            started_at: None,
            next_rank: 1,
        }
    }

    /// A fresh session for the same target.
    pub fn restart(&mut self) {
        *self = Race::new(self.target.clone());
    }

    pub fn target(&self) -> &TargetWord {
        &self.target
    }

    pub fn players(&self) -> &[PlayerState; MAX_PLAYERS] {
        &self.players
    }

    pub fn player(&self, slot: usize) -> Option<&PlayerState> {
        self.players.get(slot)
    }

    pub fn started_at(&self) -> Option<Instant> {
        self.started_at
    }

    /// Time since the first valid line, or zero before it.
    pub fn elapsed(&self, now: Instant) -> Duration {
        self.started_at
            .map(|start| now.saturating_duration_since(start))
            .unwrap_or_default()
    }

    /// True once every slot has finished.
    pub fn is_complete(&self) -> bool {
        self.players.iter().all(|p| p.is_finished(&self.target))
    }

    /// Handle one line reported by the reader, at time `now`.
    pub fn on_line(&mut self, line: &[u8], now: Instant) -> LineOutcome {
        if line.is_empty() {
            return LineOutcome::Empty;
        }

        let update = match Update::parse(line) {
            Ok(update) => update,
            Err(reason) => {
                log::trace!(
                    "Ignoring line {:?}: {:?}",
                    String::from_utf8_lossy(line),
                    reason
                );
                return LineOutcome::Ignored(reason);
            }
        };

        let started_at = *self.started_at.get_or_insert_with(|| {
            log::info!("Race clock started");
            now
        });

        let Some(player) = self.players.get_mut(update.slot) else {
            return LineOutcome::Ignored(Rejected::SlotRange(update.slot));
        };
        let outcome = player.add_symbol(update.symbol, &self.target);
        log::debug!(
            "Player {} sent {:?}: {:?} ({}/{} letters, {} mistakes)",
            update.slot + 1,
            update.symbol,
            outcome,
            player.confirmed(),
            self.target.len(),
            player.mistakes()
        );

        if outcome == Outcome::LetterConfirmed && player.is_finished(&self.target) {
            let finish = Finish {
                rank: self.next_rank,
                elapsed: now.saturating_duration_since(started_at),
            };
            if player.record_finish(&self.target, finish) {
                self.next_rank += 1;
                log::info!(
                    "Player {} finished in place {} after {:.2}s",
                    update.slot + 1,
                    finish.rank,
                    finish.elapsed.as_secs_f64()
                );
                return LineOutcome::Finished {
                    slot: update.slot,
                    finish,
                };
            }
        }

        LineOutcome::Applied {
            slot: update.slot,
            outcome,
        }
    }

    /// Feed one byte through `reader`; handle the line if it completed one.
    pub fn on_byte(&mut self, reader: &mut LineReader, byte: u8, now: Instant) -> Option<LineOutcome> {
        let len = reader.feed(byte)?;
        Some(self.on_line(reader.line(len), now))
    }
}
