//! Core race logic: line framing, Morse decoding, per-player state and the
//! race coordinator that ranks finishers.

mod line;
mod morse;
mod player;
mod protocol;
mod race;
mod target;

pub use line::{LineReader, LINE_CAPACITY};
pub use morse::{decode, Code, Symbol, MAX_CODE_LEN};
pub use player::{Finish, Outcome, PlayerState, SymbolBuffer, MAX_PLAYERS};
pub use protocol::{Rejected, Update};
pub use race::{LineOutcome, Race};
pub use target::{TargetWord, MAX_TARGET_LEN};
