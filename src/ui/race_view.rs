use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::standings::Standings;

pub fn render(frame: &mut Frame, standings: &Standings, source: &str, message: &Option<String>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Target + clock
            Constraint::Min(6),    // Standings
            Constraint::Length(3), // Message
            Constraint::Length(3), // Controls
        ])
        .split(frame.area());

    render_banner(frame, standings, source, chunks[0]);
    render_standings(frame, standings, chunks[1]);
    render_message(frame, message, chunks[2]);
    render_controls(frame, chunks[3]);
}

fn render_banner(frame: &mut Frame, standings: &Standings, source: &str, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            standings.target.clone(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            standings.clock_label(),
            Style::default().fg(Color::Cyan),
        )),
    ];

    let banner = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Morse Race")
            .title_bottom(Line::from(source.to_string()).right_aligned()),
    );

    frame.render_widget(banner, area);
}

fn render_standings(frame: &mut Frame, standings: &Standings, area: Rect) {
    let widget = Paragraph::new(standings.rows_text())
        .block(Block::default().borders(Borders::ALL).title("Standings"));
    frame.render_widget(widget, area);
}

fn render_message(frame: &mut Frame, message: &Option<String>, area: Rect) {
    let text = message.as_deref().unwrap_or("");
    let msg_widget = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let controls = Paragraph::new(Line::from("R: Restart race  |  Q: Quit"))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Controls"));

    frame.render_widget(controls, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Race, TargetWord};
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::Duration;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let area = buffer.area;
        let mut out = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_renders_target_clock_and_players() {
        let race = Race::new(TargetWord::normalize("paris").unwrap());
        let standings = Standings::project(race.players(), race.target(), Duration::from_secs(7));
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();

        terminal
            .draw(|f| render(f, &standings, "script", &Some("hello".to_string())))
            .unwrap();

        let screen = buffer_text(&terminal);
        assert!(screen.contains("PARIS"));
        assert!(screen.contains("00:07.00"));
        assert!(screen.contains("Player 1: P"));
        assert!(screen.contains("Player 4: P"));
        assert!(screen.contains("hello"));
    }
}
