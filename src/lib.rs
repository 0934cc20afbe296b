//! Sky Angel - A browser arcade game
//!
//! Core modules:
//! - `sim`: Game simulation (clock, spawning, movement, collisions)
//! - `ranking`: Leaderboard ranking and pagination
//! - `score_client`: Score submission to the remote ranking service
//! - `session`: Game state plus submission/leaderboard UI state
//! - `renderer`: Read-only scene building for the DOM
//! - `platform`: Browser/native platform abstraction
//! - `tuning`: Data-driven game balance

pub mod platform;
pub mod ranking;
pub mod renderer;
pub mod score_client;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use ranking::{Leaderboard, RankedEntry};
pub use score_client::{ScoreEntry, SubmitError};
pub use session::Session;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (logical units, all positions live in this space)
    pub const PLAYFIELD_WIDTH: i32 = 1024;
    pub const PLAYFIELD_HEIGHT: i32 = 768;

    /// Airplane start position
    pub const AIRPLANE_START_X: i32 = 512;
    pub const AIRPLANE_START_Y: i32 = 300;
    /// Pixels moved per arrow key press
    pub const AIRPLANE_STEP: i32 = 10;

    /// Per-axis proximity that counts as a collision
    pub const COLLISION_DISTANCE: f32 = 30.0;

    /// Starting values for a fresh run
    pub const START_FUEL: i32 = 10;
    pub const START_DIFFICULTY: f32 = 1.0;

    /// How long the "Game Over!" banner stays up (ms)
    pub const GAME_OVER_BANNER_MS: f64 = 3000.0;

    /// Largest frame gap the host feeds into a single tick (ms)
    pub const MAX_FRAME_MS: f64 = 1000.0;

    /// Leaderboard rows per page
    pub const LEADERBOARD_PAGE_SIZE: usize = 5;
}
