use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread::{self, JoinHandle};

use super::ByteSource;
use crate::error::TransportError;

/// Messages from the reader thread to the UI.
#[derive(Debug)]
pub enum TransportEvent {
    Byte(u8),
    /// The source ended or failed; no more bytes follow.
    Stopped(TransportError),
}

/// Owns the reader thread. Dropping it without `stop` leaves the thread to
/// end on its own once the receiver is gone.
pub struct ReaderHandle {
    quit: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl ReaderHandle {
    /// Ask the thread to stop and wait for it.
    pub fn stop(mut self) {
        self.quit.store(true, Ordering::Relaxed);
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                log::warn!("Transport reader thread panicked");
            }
        }
    }
}

/// Read `source` on a background thread, forwarding each byte in order.
pub fn spawn_reader<S>(mut source: S) -> (ReaderHandle, mpsc::Receiver<TransportEvent>)
where
    S: ByteSource + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    let quit = Arc::new(AtomicBool::new(false));
    let quit_clone = quit.clone();

    let thread = thread::spawn(move || {
        let name = source.describe();
        log::debug!("Reader started on {name}");
        while !quit_clone.load(Ordering::Relaxed) {
            let event = match source.receive() {
                Ok(Some(byte)) => TransportEvent::Byte(byte),
                Ok(None) => continue,
                Err(e) => {
                    match &e {
                        TransportError::Closed => log::info!("{name} closed"),
                        other => log::warn!("Reading {name} failed: {other}"),
                    }
                    let _ = tx.send(TransportEvent::Stopped(e));
                    break;
                }
            };
            if tx.send(event).is_err() {
                break;
            }
        }
        log::debug!("Reader on {name} exiting");
    });

    (
        ReaderHandle {
            quit,
            thread: Some(thread),
        },
        rx,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::ScriptedSource;

    #[test]
    fn test_forwards_bytes_in_order_then_stops() {
        let (handle, rx) = spawn_reader(ScriptedSource::new(b"U0:S\nU1:L\n".to_vec()));
        let mut bytes = Vec::new();
        let stop = loop {
            match rx.recv().unwrap() {
                TransportEvent::Byte(b) => bytes.push(b),
                TransportEvent::Stopped(e) => break e,
            }
        };
        assert_eq!(bytes, b"U0:S\nU1:L\n");
        assert!(matches!(stop, TransportError::Closed));
        handle.stop();
    }

    /// Never has data; only stops when asked.
    struct Silent;

    impl ByteSource for Silent {
        fn receive(&mut self) -> Result<Option<u8>, TransportError> {
            thread::sleep(std::time::Duration::from_millis(1));
            Ok(None)
        }

        fn describe(&self) -> String {
            "silent".to_string()
        }
    }

    #[test]
    fn test_stop_ends_idle_reader() {
        let (handle, rx) = spawn_reader(Silent);
        handle.stop();
        assert!(rx.recv().is_err());
    }
}
