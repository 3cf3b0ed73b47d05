//! mazetui - A dark maze explorer with procedural sound.
//!
//! The library holds the game core: maze generation, the fading
//! visibility model, waveform synthesis and WAV encoding, and the level
//! session that ties them together. The `ui` module and the binary are a
//! thin terminal front end over it.

pub mod app;
pub mod audio;
pub mod config;
pub mod maze;
pub mod records;
pub mod session;
pub mod tier;
pub mod ui;
pub mod visibility;

// Re-export commonly used types
pub use app::App;
pub use audio::{
    synthesize_ambient, synthesize_exit_event, synthesize_hint_event, AudioError, SoundAsset,
    SoundBank, SoundCategory, SAMPLE_RATE,
};
pub use config::GameConfig;
pub use maze::{generate_maze, Cell, Grid, MazeError, Position, WallPolicy};
pub use session::{LevelSession, MoveOutcome};
pub use tier::Tier;
pub use visibility::VisibilityTracker;
