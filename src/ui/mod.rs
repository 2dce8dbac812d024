//! Presentation: the standings projection, a ratatui race view, and the
//! application loop that feeds transport bytes into the race.

mod app;
mod race_view;
pub mod standings;

pub use app::App;
pub use standings::{Placement, Row, Standings};
