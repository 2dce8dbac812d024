use std::io::{self, Write};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};

use super::standings::{Placement, Standings};
use crate::game::{LineOutcome, LineReader, Race};
use crate::transport::TransportEvent;

pub struct App {
    race: Race,
    lines: LineReader,
    events: mpsc::Receiver<TransportEvent>,
    source: String,
    frame_interval: Duration,
    message: Option<String>,
    transport_open: bool,
    should_quit: bool,
}

impl App {
    pub fn new(
        race: Race,
        events: mpsc::Receiver<TransportEvent>,
        source: String,
        frame_interval: Duration,
    ) -> Self {
        App {
            race,
            lines: LineReader::new(),
            events,
            source,
            frame_interval,
            message: None,
            transport_open: true,
            should_quit: false,
        }
    }

    pub fn race(&self) -> &Race {
        &self.race
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn is_transport_open(&self) -> bool {
        self.transport_open
    }

    pub fn standings(&self, now: Instant) -> Standings {
        Standings::project(self.race.players(), self.race.target(), self.race.elapsed(now))
    }

    /// Process every event already queued, in arrival order. Returns whether
    /// the standings should be redrawn.
    pub fn pump(&mut self, now: Instant) -> bool {
        let mut refresh = false;
        loop {
            match self.events.try_recv() {
                Ok(event) => refresh |= self.handle_transport_event(event, now),
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    refresh |= self.reader_gone();
                    break;
                }
            }
        }
        refresh
    }

    fn handle_transport_event(&mut self, event: TransportEvent, now: Instant) -> bool {
        match event {
            TransportEvent::Byte(byte) => match self.race.on_byte(&mut self.lines, byte, now) {
                Some(outcome) => {
                    self.note_outcome(outcome);
                    outcome.refreshes_view()
                }
                None => false,
            },
            TransportEvent::Stopped(err) => {
                self.transport_open = false;
                self.message = Some(format!("{}: {err}", self.source));
                true
            }
        }
    }

    /// The reader thread exited without reporting why. Returns whether this
    /// changed anything on screen.
    fn reader_gone(&mut self) -> bool {
        if !self.transport_open {
            return false;
        }
        log::warn!("{}: reader stopped without a reason", self.source);
        self.transport_open = false;
        self.message = Some(format!("{}: reader stopped", self.source));
        true
    }

    fn note_outcome(&mut self, outcome: LineOutcome) {
        if let LineOutcome::Finished { slot, finish } = outcome {
            let place = Placement::from_rank(finish.rank)
                .map(Placement::label)
                .unwrap_or("finished");
            self.message = Some(if self.race.is_complete() {
                "Race complete! Press 'r' for a rematch.".to_string()
            } else {
                format!("Player {} takes {place}!", slot + 1)
            });
        }
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()>
    where
        B::Error: Into<io::Error>,
    {
        loop {
            self.pump(Instant::now());

            let standings = self.standings(Instant::now());
            terminal
                .draw(|f| super::race_view::render(f, &standings, &self.source, &self.message))
                .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    /// Print the ANSI standings to `out` on every refresh until the transport
    /// stops.
    pub fn run_headless(&mut self, out: &mut impl Write, width: usize) -> io::Result<()> {
        write!(out, "{}", self.standings(Instant::now()).to_ansi(width))?;
        out.flush()?;

        while self.transport_open {
            let refresh = match self.events.recv_timeout(self.frame_interval) {
                Ok(event) => {
                    let now = Instant::now();
                    let first = self.handle_transport_event(event, now);
                    self.pump(now) | first
                }
                Err(RecvTimeoutError::Timeout) => false,
                Err(RecvTimeoutError::Disconnected) => self.reader_gone(),
            };
            if refresh {
                write!(out, "{}", self.standings(Instant::now()).to_ansi(width))?;
                out.flush()?;
            }
        }
        if let Some(message) = &self.message {
            log::info!("{message}");
        }
        Ok(())
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(self.frame_interval)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Handle key press
    fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('r') | KeyCode::Char('R') => self.restart(),
            _ => {}
        }
    }

    /// Start a fresh race for the same target.
    pub fn restart(&mut self) {
        self.race.restart();
        log::info!("Race restarted");
        self.message = Some("New race started!".to_string());
    }
}
