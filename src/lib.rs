//! # Morse Race
//!
//! A multiplayer typing race over a serial line. Up to four players key Morse
//! dots and dashes, sent as `U<slot>:<S|L>` lines; each player's symbols are
//! decoded against a shared target word and finishers are ranked in the order
//! they complete it.
//!
//! ## Modules
//!
//! - [`game`] — Core logic: line framing, Morse table, player state, race coordinator
//! - [`transport`] — Byte sources (serial port, replay) and the reader thread
//! - [`ui`] — Standings projection, terminal UI and headless ANSI output
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod config;
pub mod error;
pub mod game;
pub mod transport;
pub mod ui;
