use std::time::Duration;

use super::morse::{self, Code, Symbol, MAX_CODE_LEN};
use super::target::TargetWord;

/// Number of player slots on the wire (`U0`..`U3`).
pub const MAX_PLAYERS: usize = 4;

/// Result of feeding one symbol to a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Buffered, or ignored because the player already finished.
    NoOp,
    /// The pending symbols spelled the next expected letter.
    LetterConfirmed,
    /// Four symbols without the expected letter; buffer dropped.
    Mistake,
}

/// Symbols typed toward the current letter, kept packed as a `Code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SymbolBuffer {
    code: Code,
}

impl SymbolBuffer {
    /// Append a symbol. Returns false (and drops the symbol) when full.
    pub fn push(&mut self, symbol: Symbol) -> bool {
        if self.is_full() {
            return false;
        }
        self.code = self.code.push(symbol);
        true
    }

    pub fn clear(&mut self) {
        self.code = Code::EMPTY;
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.code.len() >= MAX_CODE_LEN
    }

    pub fn code(&self) -> Code {
        self.code
    }

    /// Dot/dash notation, e.g. `".-"`.
    pub fn notation(&self) -> String {
        self.code.symbols().map(Symbol::as_char).collect()
    }
}

/// Written once, when the player completes the word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Finish {
    /// 1-based completion order.
    pub rank: usize,
    pub elapsed: Duration,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerState {
    pending: SymbolBuffer,
    confirmed: usize,
    mistakes: u32,
    finish: Option<Finish>,
}

impl PlayerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Letters of the target confirmed so far.
    pub fn confirmed(&self) -> usize {
        self.confirmed
    }

    pub fn mistakes(&self) -> u32 {
        self.mistakes
    }

    pub fn pending(&self) -> &SymbolBuffer {
        &self.pending
    }

    pub fn finish(&self) -> Option<Finish> {
        self.finish
    }

    pub fn is_finished(&self, target: &TargetWord) -> bool {
        self.confirmed == target.len()
    }

    /// Feed one symbol, decoding against the next letter of `target`.
    ///
    /// Decoding is exact-length: after each symbol the whole pending buffer
    /// is looked up, so `..` confirms `I` before a third dot could make `S`.
    pub fn add_symbol(&mut self, symbol: Symbol, target: &TargetWord) -> Outcome {
        if self.is_finished(target) {
            return Outcome::NoOp;
        }

        self.pending.push(symbol);

        let expected = target.letter(self.confirmed);
        if expected.is_some() && morse::decode(self.pending.code()) == expected {
            self.pending.clear();
            self.confirmed += 1;
            return Outcome::LetterConfirmed;
        }

        if self.pending.is_full() {
            self.pending.clear();
            self.mistakes += 1;
            return Outcome::Mistake;
        }

        Outcome::NoOp
    }

    /// Record the finish. Ignored if already recorded or the word isn't done.
    pub(crate) fn record_finish(&mut self, target: &TargetWord, finish: Finish) -> bool {
        if self.finish.is_some() || !self.is_finished(target) {
            return false;
        }
        self.finish = Some(finish);
        true
    }
}
