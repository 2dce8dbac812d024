use super::morse::Symbol;
use super::player::MAX_PLAYERS;

/// Marker byte of an update line.
const UPDATE_MARKER: u8 = b'U';
const SEPARATOR: u8 = b':';

/// A parsed `U<slot>:<S|L>` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Update {
    pub slot: usize,
    pub symbol: Symbol,
}

/// Why a line was not an update. Callers drop these silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejected {
    Length(usize),
    Marker,
    Slot,
    SlotRange(usize),
    Separator,
    Symbol,
}

impl Update {
    pub fn parse(line: &[u8]) -> Result<Update, Rejected> {
        let &[marker, slot, separator, symbol] = line else {
            return Err(Rejected::Length(line.len()));
        };
        if marker != UPDATE_MARKER {
            return Err(Rejected::Marker);
        }
        if !slot.is_ascii_digit() {
            return Err(Rejected::Slot);
        }
        let slot = (slot - b'0') as usize;
        if slot >= MAX_PLAYERS {
            return Err(Rejected::SlotRange(slot));
        }
        if separator != SEPARATOR {
            return Err(Rejected::Separator);
        }
        let symbol = Symbol::from_wire(symbol).ok_or(Rejected::Symbol)?;
        Ok(Update { slot, symbol })
    }

    /// Wire form, without the terminator.
    pub fn encode(&self) -> [u8; 4] {
        let symbol = match self.symbol {
            Symbol::Dot => b'S',
            Symbol::Dash => b'L',
        };
        [UPDATE_MARKER, b'0' + self.slot as u8, SEPARATOR, symbol]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert_eq!(
            Update::parse(b"U0:S"),
            Ok(Update { slot: 0, symbol: Symbol::Dot })
        );
        assert_eq!(
            Update::parse(b"U3:L"),
            Ok(Update { slot: 3, symbol: Symbol::Dash })
        );
    }

    #[test]
    fn test_slot_out_of_range() {
        assert_eq!(Update::parse(b"U4:S"), Err(Rejected::SlotRange(4)));
        assert_eq!(Update::parse(b"U9:L"), Err(Rejected::SlotRange(9)));
    }

    #[test]
    fn test_malformed() {
        assert_eq!(Update::parse(b""), Err(Rejected::Length(0)));
        assert_eq!(Update::parse(b"U0:SS"), Err(Rejected::Length(5)));
        assert_eq!(Update::parse(b"Q5:S"), Err(Rejected::Marker));
        assert_eq!(Update::parse(b"Ux:S"), Err(Rejected::Slot));
        assert_eq!(Update::parse(b"U1;S"), Err(Rejected::Separator));
        assert_eq!(Update::parse(b"U1:."), Err(Rejected::Symbol));
        assert_eq!(Update::parse(b"u1:S"), Err(Rejected::Marker));
    }

    #[test]
    fn test_encode() {
        let update = Update { slot: 2, symbol: Symbol::Dash };
        assert_eq!(&update.encode(), b"U2:L");
        assert_eq!(Update::parse(&update.encode()), Ok(update));
    }
}
