//! mazetui - Explore a dark procedural maze in the terminal.
//!
//! Only the cells around the player are lit, and they fade shortly after
//! the player moves on. Each level gets a procedurally synthesized
//! soundscape that grows darker as the levels get harder.
//!
//! # Usage
//!
//! ```bash
//! cargo run                       # Start at level 1 with a random maze
//! cargo run -- --level 4 --seed 7 # Reproducible maze on level 4
//! cargo run -- --export-sounds out/
//! ```
//!
//! Press `?` for help with keyboard shortcuts.

use mazetui::app::App;
use mazetui::audio::SoundBank;
use mazetui::config::{clamp_level, default_records_path, GameConfig};
use mazetui::maze::WallPolicy;
use mazetui::tier::Tier;
use mazetui::ui;

use anyhow::{bail, Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Command-line options for the application.
struct CliOptions {
    config: GameConfig,
    /// Write every tier's sounds to this directory and exit.
    export_sounds: Option<PathBuf>,
}

impl CliOptions {
    /// Parses command-line arguments.
    ///
    /// Supports:
    /// - `--level <n>` or `-l <n>`: Starting level (1-10)
    /// - `--seed <n>` or `-s <n>`: Fixed maze seed
    /// - `--mute`: Do not open an audio device
    /// - `--safe-walls`: Never let extra walls cut off the exit
    /// - `--records <path>`: Best-time file location
    /// - `--export-sounds <dir>`: Render all sounds to WAV files and exit
    /// - `--help` or `-h`: Print help and exit
    fn parse() -> Result<Self> {
        let args: Vec<String> = std::env::args().collect();
        let mut config = GameConfig::default();
        let mut export_sounds = None;
        let mut i = 1;

        fn value<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str> {
            match args.get(i) {
                Some(v) => Ok(v.as_str()),
                None => bail!("{} requires an argument", flag),
            }
        }

        while i < args.len() {
            match args[i].as_str() {
                flag @ ("--level" | "-l") => {
                    i += 1;
                    let level: u32 = value(&args, i, flag)?
                        .parse()
                        .context("--level expects a number")?;
                    config.start_level = clamp_level(level);
                }
                flag @ ("--seed" | "-s") => {
                    i += 1;
                    let seed: u64 = value(&args, i, flag)?
                        .parse()
                        .context("--seed expects a non-negative integer")?;
                    config.fixed_seed = Some(seed);
                }
                "--mute" => config.muted = true,
                "--safe-walls" => config.wall_policy = WallPolicy::KeepExitReachable,
                flag @ "--records" => {
                    i += 1;
                    config.records_path = PathBuf::from(value(&args, i, flag)?);
                }
                flag @ "--export-sounds" => {
                    i += 1;
                    export_sounds = Some(PathBuf::from(value(&args, i, flag)?));
                }
                "--help" | "-h" => {
                    print_help(args.first().map(String::as_str).unwrap_or("mazetui"));
                    std::process::exit(0);
                }
                other => {
                    eprintln!("Unknown option: {}", other);
                    eprintln!("Use --help for usage information");
                    std::process::exit(1);
                }
            }
            i += 1;
        }

        Ok(Self {
            config,
            export_sounds,
        })
    }
}

fn print_help(program: &str) {
    eprintln!("mazetui - Dark maze explorer for the terminal");
    eprintln!();
    eprintln!("Usage: {} [OPTIONS]", program);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -l, --level N          Start on level N (1-10)");
    eprintln!("  -s, --seed N           Use a fixed maze seed");
    eprintln!("      --mute             Run without sound");
    eprintln!("      --safe-walls       Keep the exit reachable on harder levels");
    eprintln!(
        "      --records PATH     Best-time file (default: {})",
        default_records_path().display()
    );
    eprintln!("      --export-sounds DIR  Write every tier's sounds as WAV and exit");
    eprintln!("  -h, --help             Print this help message");
}

/// Renders each tier's sound bank into `dir`.
fn export_sounds(dir: &Path, seed: u64) -> Result<()> {
    for tier in Tier::ALL {
        let bank = SoundBank::synthesize(tier, tier.sound_seed(seed))
            .with_context(|| format!("Failed to synthesize {}", tier))?;
        for path in bank.persist(dir)? {
            eprintln!("Wrote {}", path.display());
        }
    }
    Ok(())
}

/// Main entry point.
fn main() -> Result<()> {
    // Parse CLI options first (before any terminal setup)
    let cli = CliOptions::parse()?;

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Some(dir) = &cli.export_sounds {
        return export_sounds(dir, cli.config.fixed_seed.unwrap_or(0));
    }

    let mut terminal = setup_terminal().context("Failed to setup terminal")?;
    let mut app = App::new(cli.config);

    let result = run_app(&mut terminal, &mut app);

    app.shutdown();
    restore_terminal(&mut terminal).context("Failed to restore terminal")?;

    result
}

/// Sets up the terminal for TUI rendering.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restores the terminal to its original state.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Main application loop.
fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        app.update();

        terminal.draw(|frame| ui::render(frame, app))?;

        // Short timeout so glow fade and the pinger keep animating
        if event::poll(Duration::from_millis(16))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if app.show_help {
                    handle_help_key(app, key.code);
                    continue;
                }
                if handle_key(app, key.code, key.modifiers)? {
                    return Ok(());
                }
            }
        }
    }
}

/// Handles keys while the help overlay is open.
fn handle_help_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char('?') | KeyCode::Esc => app.toggle_help(),
        KeyCode::Up | KeyCode::Char('k') => {
            app.help_scroll = app.help_scroll.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.help_scroll = app.help_scroll.saturating_add(1);
        }
        _ => {}
    }
}

/// Handles a key press during play.
///
/// # Returns
///
/// `true` if the application should quit
fn handle_key(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> Result<bool> {
    match code {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return Ok(true),
        KeyCode::Char('q') | KeyCode::Esc => return Ok(true),

        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => app.move_player(0, -1),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => app.move_player(0, 1),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => app.move_player(-1, 0),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => app.move_player(1, 0),

        KeyCode::Char('h') => app.hint(),
        KeyCode::Char('r') => app.regenerate(),
        KeyCode::Char('n') => app.next_level(),
        KeyCode::Char('m') => app.toggle_hud(),
        KeyCode::Char('x') => app.toggle_exit_marker(),
        KeyCode::Char('?') => app.toggle_help(),
        _ => {}
    }
    Ok(false)
}
