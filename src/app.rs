//! Application state and event handling.
//!
//! This module defines the main application state that coordinates
//! between the level session, the audio pipeline, and the TUI.

use crate::audio::{AudioEngine, SoundBank, SoundCategory, SynthesisWorker};
use crate::config::{GameConfig, LEVEL_CLEARED_SECS};
use crate::records::{RecordOutcome, RecordStore};
use crate::session::{LevelSession, LevelSummary, MoveOutcome};
use crate::tier::Tier;
use std::time::{Duration, Instant};

/// How long status messages stay in the HUD.
const STATUS_TIMEOUT: Duration = Duration::from_secs(3);

/// Source of game time in seconds.
pub type Clock = Box<dyn Fn() -> f64>;

/// Clock counting seconds from the moment it is created.
pub fn wall_clock() -> Clock {
    let epoch = Instant::now();
    Box::new(move || epoch.elapsed().as_secs_f64())
}

/// Shown between reaching the exit and loading the next level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelCleared {
    pub summary: LevelSummary,
    pub record: RecordOutcome,
    /// App time at which the next level loads.
    pub until: f64,
}

/// Main application state.
pub struct App {
    session: LevelSession,
    records: RecordStore,
    /// None when muted or when no output device could be opened.
    audio: Option<AudioEngine>,
    synth: SynthesisWorker,
    bank: Option<SoundBank>,
    /// Tier of the bank currently being rendered.
    pending_tier: Option<Tier>,
    clock: Clock,
    status_message: Option<(String, Instant)>,
    cleared: Option<LevelCleared>,
    /// Whether the side panel is drawn.
    pub hud_visible: bool,
    /// Debug aid: draw the exit cell.
    pub show_exit: bool,
    /// Whether the help overlay is visible.
    pub show_help: bool,
    /// Scroll offset for the help overlay.
    pub help_scroll: u16,
}

impl App {
    /// Creates the app, generating the first level and starting audio
    /// synthesis for its tier.
    pub fn new(config: GameConfig) -> Self {
        Self::with_clock(config, wall_clock())
    }

    /// Like [`App::new`], reading game time from `clock`.
    pub fn with_clock(config: GameConfig, clock: Clock) -> Self {
        let session = LevelSession::new(&config, clock());
        let records = RecordStore::open(&config.records_path);

        let audio = if config.muted {
            None
        } else {
            match AudioEngine::new() {
                Ok(engine) => Some(engine),
                Err(e) => {
                    tracing::warn!("{}; continuing without sound", e);
                    None
                }
            }
        };

        let mut app = Self {
            session,
            records,
            audio,
            synth: SynthesisWorker::spawn(),
            bank: None,
            pending_tier: None,
            clock,
            status_message: None,
            cleared: None,
            hud_visible: true,
            show_exit: false,
            show_help: false,
            help_scroll: 0,
        };
        if app.audio.is_none() && !config.muted {
            app.set_status("Audio disabled");
        }
        app.refresh_audio();
        app
    }

    /// Current game time in seconds.
    pub fn now(&self) -> f64 {
        (self.clock)()
    }

    pub fn session(&self) -> &LevelSession {
        &self.session
    }

    pub fn records(&self) -> &RecordStore {
        &self.records
    }

    pub fn level_cleared(&self) -> Option<&LevelCleared> {
        self.cleared.as_ref()
    }

    pub fn audio_enabled(&self) -> bool {
        self.audio.is_some()
    }

    /// Tier of the sounds currently loaded, if any.
    pub fn loaded_tier(&self) -> Option<Tier> {
        self.bank.as_ref().map(SoundBank::tier)
    }

    pub fn status(&self) -> Option<&str> {
        self.status_message.as_ref().map(|(msg, _)| msg.as_str())
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), Instant::now()));
    }

    /// Clears expired status messages.
    pub fn clear_expired_status(&mut self) {
        if let Some((_, time)) = &self.status_message {
            if time.elapsed() > STATUS_TIMEOUT {
                self.status_message = None;
            }
        }
    }

    /// Per-frame housekeeping: picks up finished audio and leaves the
    /// level-cleared screen once it has been shown long enough.
    pub fn update(&mut self) {
        self.clear_expired_status();

        if let Some(result) = self.synth.poll() {
            self.pending_tier = None;
            match result {
                Ok(bank) => self.install_bank(bank),
                Err(e) => tracing::error!("Sound synthesis failed: {}", e),
            }
        }

        let now = self.now();
        if self.cleared.is_some_and(|c| now >= c.until) {
            self.cleared = None;
            self.session.advance(now);
            self.set_status(format!("Level {}", self.session.level()));
            self.refresh_audio();
        }
    }

    /// Requests sounds for the session's tier unless they are already
    /// loaded or being rendered.
    fn refresh_audio(&mut self) {
        let tier = self.session.tier();
        if self.loaded_tier() == Some(tier) || self.pending_tier == Some(tier) {
            return;
        }
        let seed = tier.sound_seed(self.session.seed());
        let ticket = self.synth.request(tier, seed);
        self.pending_tier = Some(tier);
        tracing::debug!(ticket, %tier, "requested sound bank");
    }

    fn install_bank(&mut self, bank: SoundBank) {
        tracing::info!("Loaded sounds for {}", bank.tier());
        self.bank = Some(bank);
        self.play_sound(SoundCategory::Ambient);
    }

    /// Plays one sound from the loaded bank at its tier's gain.
    fn play_sound(&mut self, category: SoundCategory) {
        let (Some(engine), Some(bank)) = (self.audio.as_mut(), self.bank.as_ref()) else {
            return;
        };
        if let Err(e) = engine.play(bank.get(category), bank.tier().gain(category)) {
            tracing::warn!("{} playback failed: {}", category, e);
        }
    }

    /// Moves the player one cell. Ignored while the level-cleared screen
    /// is up.
    pub fn move_player(&mut self, dx: isize, dy: isize) {
        if self.cleared.is_some() {
            return;
        }
        let now = self.now();
        if self.session.try_move(dx, dy, now) == MoveOutcome::ExitReached {
            self.play_sound(SoundCategory::Exit);
            self.on_exit_found(now);
        }
    }

    fn on_exit_found(&mut self, now: f64) {
        let summary = self.session.summary(now);
        let record = self.records.submit(summary.level, summary.elapsed_secs);
        tracing::info!(
            level = summary.level,
            secs = summary.elapsed_secs,
            hints = summary.hints_used,
            new_record = record.new_record,
            "level cleared"
        );
        self.cleared = Some(LevelCleared {
            summary,
            record,
            until: now + LEVEL_CLEARED_SECS,
        });
    }

    /// Shows the arrow toward the exit and plays the hint chirp.
    pub fn hint(&mut self) {
        if self.cleared.is_some() {
            return;
        }
        self.session.trigger_hint(self.now());
        self.play_sound(SoundCategory::Hint);
    }

    /// Builds a fresh random maze for the current level.
    pub fn regenerate(&mut self) {
        if self.cleared.is_some() {
            return;
        }
        self.session.regenerate(self.now());
        self.set_status(format!("Regenerated (seed {})", self.session.seed()));
        self.refresh_audio();
    }

    /// Skips to the next level.
    pub fn next_level(&mut self) {
        if self.cleared.is_some() {
            return;
        }
        self.session.advance(self.now());
        self.set_status(format!("Level {}", self.session.level()));
        self.refresh_audio();
    }

    pub fn toggle_hud(&mut self) {
        self.hud_visible = !self.hud_visible;
    }

    pub fn toggle_exit_marker(&mut self) {
        self.show_exit = !self.show_exit;
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
        self.help_scroll = 0;
    }

    /// Stops all sound before the terminal is restored.
    pub fn shutdown(&mut self) {
        if let Some(engine) = self.audio.as_mut() {
            engine.stop_all();
        }
    }
}
