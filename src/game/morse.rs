/// Longest code the pending buffer can hold. Every letter fits; digits don't.
pub const MAX_CODE_LEN: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    Dot,
    Dash,
}

impl Symbol {
    /// Parse a protocol literal: `S` (short) or `L` (long).
    pub fn from_wire(byte: u8) -> Option<Symbol> {
        match byte {
            b'S' => Some(Symbol::Dot),
            b'L' => Some(Symbol::Dash),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Symbol::Dot => '.',
            Symbol::Dash => '-',
        }
    }
}

/// A Morse code packed as (length, bits). Bit `i` is set when symbol `i` is a
/// dash, so `.-` and `-.` differ in bits and `.` and `..` differ in length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Code {
    len: u8,
    bits: u8,
}

impl Code {
    pub const EMPTY: Code = Code { len: 0, bits: 0 };

    /// Build a code from dot/dash notation. Panics on anything else, which in
    /// a const context is a compile error.
    pub const fn parse(notation: &str) -> Code {
        let bytes = notation.as_bytes();
        assert!(bytes.len() <= 8, "code too long");
        let mut bits = 0u8;
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'.' => {}
                b'-' => bits |= 1 << i,
                _ => panic!("code must be dots and dashes"),
            }
            i += 1;
        }
        Code {
            len: bytes.len() as u8,
            bits,
        }
    }

    #[cfg(test)]
    pub(crate) fn from_symbols(symbols: &[Symbol]) -> Code {
        let mut code = Code::EMPTY;
        for &symbol in symbols {
            code = code.push(symbol);
        }
        code
    }

    pub fn push(self, symbol: Symbol) -> Code {
        let bits = match symbol {
            Symbol::Dot => self.bits,
            Symbol::Dash => self.bits | (1 << self.len),
        };
        Code {
            len: self.len + 1,
            bits,
        }
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn symbols(&self) -> impl Iterator<Item = Symbol> + '_ {
        (0..self.len).map(|i| {
            if self.bits & (1 << i) != 0 {
                Symbol::Dash
            } else {
                Symbol::Dot
            }
        })
    }
}

const LETTERS: [(char, Code); 26] = [
    ('A', Code::parse(".-")),
    ('B', Code::parse("-...")),
    ('C', Code::parse("-.-.")),
    ('D', Code::parse("-..")),
    ('E', Code::parse(".")),
    ('F', Code::parse("..-.")),
    ('G', Code::parse("--.")),
    ('H', Code::parse("....")),
    ('I', Code::parse("..")),
    ('J', Code::parse(".---")),
    ('K', Code::parse("-.-")),
    ('L', Code::parse(".-..")),
    ('M', Code::parse("--")),
    ('N', Code::parse("-.")),
    ('O', Code::parse("---")),
    ('P', Code::parse(".--.")),
    ('Q', Code::parse("--.-")),
    ('R', Code::parse(".-.")),
    ('S', Code::parse("...")),
    ('T', Code::parse("-")),
    ('U', Code::parse("..-")),
    ('V', Code::parse("...-")),
    ('W', Code::parse(".--")),
    ('X', Code::parse("-..-")),
    ('Y', Code::parse("-.--")),
    ('Z', Code::parse("--..")),
];

// Defined for completeness; five symbols never fit the pending buffer.
const DIGITS: [(char, Code); 10] = [
    ('0', Code::parse("-----")),
    ('1', Code::parse(".----")),
    ('2', Code::parse("..---")),
    ('3', Code::parse("...--")),
    ('4', Code::parse("....-")),
    ('5', Code::parse(".....")),
    ('6', Code::parse("-....")),
    ('7', Code::parse("--...")),
    ('8', Code::parse("---..")),
    ('9', Code::parse("----.")),
];

/// Letter lookup indexed by `[len][bits]`; 0 marks an unassigned code.
const DECODE: [[u8; 1 << MAX_CODE_LEN]; MAX_CODE_LEN + 1] = build_decode_table();

const fn build_decode_table() -> [[u8; 1 << MAX_CODE_LEN]; MAX_CODE_LEN + 1] {
    let mut table = [[0u8; 1 << MAX_CODE_LEN]; MAX_CODE_LEN + 1];
    let mut i = 0;
    while i < LETTERS.len() {
        let (letter, code) = LETTERS[i];
        assert!(table[code.len as usize][code.bits as usize] == 0, "duplicate code");
        table[code.len as usize][code.bits as usize] = letter as u8;
        i += 1;
    }
    table
}

// Digits must never be reachable from the pending buffer.
const _: () = {
    let mut i = 0;
    while i < DIGITS.len() {
        assert!(DIGITS[i].1.len as usize > MAX_CODE_LEN, "digit code fits the buffer");
        i += 1;
    }
};

/// Decode an exact code to its letter. A code is only ever compared with
/// codes of the same length, so `..` is `I` even though `...` is `S`.
pub fn decode(code: Code) -> Option<char> {
    let row = DECODE.get(code.len())?;
    match row.get(code.bits as usize) {
        Some(&0) | None => None,
        Some(&letter) => Some(letter as char),
    }
}

/// The code for a letter or digit, case-insensitive.
#[cfg(test)]
pub(crate) fn encode(ch: char) -> Option<Code> {
    let ch = ch.to_ascii_uppercase();
    LETTERS
        .iter()
        .chain(DIGITS.iter())
        .find(|(c, _)| *c == ch)
        .map(|&(_, code)| code)
}
