use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use morse_race::config::AppConfig;
use morse_race::game::{Race, TargetWord};
use morse_race::transport::{self, ByteSource, ScriptedSource, SerialSource};
use morse_race::ui::App;

/// Race up to four Morse keyers to spell a word.
#[derive(Parser)]
#[command(name = "morse-race", about = "Multiplayer Morse-code typing race")]
struct Cli {
    /// Target text; letters are uppercased, everything else dropped
    #[arg(required_unless_present = "list_ports")]
    text: Option<String>,

    /// Serial port (overrides config)
    port: Option<String>,

    /// Baud rate (overrides config)
    baud: Option<u32>,

    /// Path to TOML configuration file
    #[arg(long, default_value = "morse-race.toml")]
    config: PathBuf,

    /// Print standings to stdout instead of running the terminal UI
    #[arg(long)]
    headless: bool,

    /// Read protocol bytes from a file instead of a serial port
    #[arg(long, value_name = "PATH")]
    replay: Option<PathBuf>,

    /// Display width for headless output (defaults to terminal width)
    #[arg(long, value_name = "COLS")]
    width: Option<u16>,

    /// List available serial ports and exit
    #[arg(long)]
    list_ports: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.list_ports {
        for port in transport::list_ports()? {
            println!("{port}");
        }
        return Ok(());
    }

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(port) = cli.port {
        config.serial.port = port;
    }
    if let Some(baud) = cli.baud {
        config.serial.baud_rate = baud;
    }
    if let Some(width) = cli.width {
        config.display.width = Some(width);
    }
    config.validate().context("validating command-line overrides")?;

    let text = cli.text.unwrap_or_default();
    let target = TargetWord::normalize(&text)?;
    log::info!("Target word: {target}");

    let source: Box<dyn ByteSource + Send> = match &cli.replay {
        Some(path) => Box::new(ScriptedSource::from_file(path)?),
        None => Box::new(SerialSource::open(&config.serial)?),
    };
    let source_name = source.describe();
    if cli.headless {
        println!("Using {source_name}");
    }

    let (reader, events) = transport::spawn_reader(source);
    let mut app = App::new(
        Race::new(target),
        events,
        source_name,
        config.display.frame_interval(),
    );

    let res = if cli.headless {
        let width = match config.display.width {
            Some(width) => width,
            None => crossterm::terminal::size().map(|(cols, _)| cols).unwrap_or(80),
        };
        app.run_headless(&mut io::stdout().lock(), width as usize)
            .context("writing standings")
    } else {
        run_tui(&mut app)
    };

    reader.stop();
    res
}

fn run_tui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode().context("enabling raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("creating terminal")?;

    let res = app.run(&mut terminal);

    // Restore terminal — always runs, even on error
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res.context("running terminal UI")
}
