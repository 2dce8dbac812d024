/// Line buffer size. A reported line holds at most `LINE_CAPACITY - 1` bytes.
pub const LINE_CAPACITY: usize = 32;

/// Accumulates bytes into `\n`-terminated lines of bounded length.
///
/// Overlong lines keep writing (wrapping around the buffer) until their
/// terminator arrives and are then dropped as a whole.
#[derive(Debug, Clone)]
pub struct LineReader {
    buffer: [u8; LINE_CAPACITY],
    cursor: usize,
    overflowed: bool,
}

impl LineReader {
    pub fn new() -> Self {
        LineReader {
            buffer: [0; LINE_CAPACITY],
            cursor: 0,
            overflowed: false,
        }
    }

    /// Feed one byte. Returns the length of the line it completed, if any.
    pub fn feed(&mut self, byte: u8) -> Option<usize> {
        match byte {
            b'\r' => None,
            b'\n' => {
                let len = self.cursor;
                let overflowed = self.overflowed;
                self.cursor = 0;
                self.overflowed = false;
                if overflowed {
                    None
                } else {
                    Some(len)
                }
            }
            _ => {
                self.buffer[self.cursor % LINE_CAPACITY] = byte;
                if self.cursor >= LINE_CAPACITY - 1 {
                    self.overflowed = true;
                }
                // Saturate rather than wrap so an endless line can't clear
                // the overflow condition.
                self.cursor = self.cursor.saturating_add(1);
                None
            }
        }
    }

    /// The most recent line. Only meaningful right after `feed` reported it.
    pub fn line(&self, len: usize) -> &[u8] {
        &self.buffer[..len.min(LINE_CAPACITY)]
    }

    /// Bytes written to the line in progress.
    #[cfg(test)]
    fn pending_len(&self) -> usize {
        self.cursor
    }

    #[cfg(test)]
    fn is_overflowed(&self) -> bool {
        self.overflowed
    }
}

impl Default for LineReader {
    fn default() -> Self {
        Self::new()
    }
}
