use std::collections::VecDeque;
use std::path::Path;

use super::ByteSource;
use crate::error::TransportError;

/// Plays back a fixed byte sequence, then reports the transport closed.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    bytes: VecDeque<u8>,
    name: String,
}

impl ScriptedSource {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        let bytes: Vec<u8> = bytes.into();
        ScriptedSource {
            bytes: VecDeque::from(bytes),
            name: "script".to_string(),
        }
    }

    /// Replay a captured session from disk.
    pub fn from_file(path: &Path) -> Result<Self, TransportError> {
        let bytes = std::fs::read(path).map_err(|source| TransportError::ReplayRead {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Replaying {} bytes from {}", bytes.len(), path.display());
        Ok(ScriptedSource {
            bytes: bytes.into(),
            name: format!("replay {}", path.display()),
        })
    }

    /// Queue more bytes after the current script.
    #[cfg(test)]
    fn push(&mut self, bytes: &[u8]) {
        self.bytes.extend(bytes);
    }

    #[cfg(test)]
    fn remaining(&self) -> usize {
        self.bytes.len()
    }
}

impl ByteSource for ScriptedSource {
    fn receive(&mut self) -> Result<Option<u8>, TransportError> {
        self.bytes.pop_front().map(Some).ok_or(TransportError::Closed)
    }

    fn describe(&self) -> String {
        self.name.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_plays_bytes_then_closes() {
        let mut source = ScriptedSource::new(b"U0".to_vec());
        assert_eq!(source.receive().unwrap(), Some(b'U'));
        assert_eq!(source.receive().unwrap(), Some(b'0'));
        assert!(matches!(source.receive(), Err(TransportError::Closed)));
    }

    #[test]
    fn test_push_extends_script() {
        let mut source = ScriptedSource::default();
        source.push(b"\n");
        assert_eq!(source.remaining(), 1);
        assert_eq!(source.receive().unwrap(), Some(b'\n'));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.log");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(b"U1:S\r\n").unwrap();

        let source = ScriptedSource::from_file(&path).unwrap();
        assert_eq!(source.remaining(), 6);
        assert!(source.describe().starts_with("replay "));
    }

    #[test]
    fn test_from_missing_file() {
        let err = ScriptedSource::from_file(Path::new("no_such_session.log")).unwrap_err();
        assert!(matches!(err, TransportError::ReplayRead { .. }));
    }
}
