//! Play session
//!
//! Wraps the simulation with the state the UI needs around it: the
//! "Game Over!" banner, the score submission guard and the leaderboard.

use crate::consts::GAME_OVER_BANNER_MS;
use crate::ranking::Leaderboard;
use crate::score_client::{ScoreEntry, SubmitError, Submission};
use crate::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
use crate::tuning::Tuning;

/// What the main button does right now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimaryAction {
    Start,
    Pause,
    Resume,
}

impl PrimaryAction {
    pub fn label(&self) -> &'static str {
        match self {
            PrimaryAction::Start => "Start Game",
            PrimaryAction::Pause => "Pause Game",
            PrimaryAction::Resume => "Resume Game",
        }
    }
}

/// A play session
#[derive(Debug, Clone)]
pub struct Session {
    pub state: GameState,
    pub submission: Submission,
    /// Set after a successful submission; `Some` means the ranking is visible
    pub leaderboard: Option<Leaderboard>,
    /// Entry sent by the last successful submission
    pub last_submitted: Option<ScoreEntry>,
    game_over_banner_ms: f64,
}

impl Session {
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            state: GameState::with_tuning(seed, tuning),
            submission: Submission::default(),
            leaderboard: None,
            last_submitted: None,
            game_over_banner_ms: 0.0,
        }
    }

    /// Advance the game and UI timers; returns the events produced
    pub fn tick(&mut self, input: &TickInput, dt_ms: f64) -> Vec<GameEvent> {
        self.game_over_banner_ms = (self.game_over_banner_ms - dt_ms).max(0.0);

        if input.start && !self.can_start() {
            // Button is disabled; a stray start must not skip the score form
            let mut input = input.clone();
            input.start = false;
            tick(&mut self.state, &input, dt_ms);
        } else {
            if input.start && self.state.is_game_over() {
                self.clear_results();
            }
            tick(&mut self.state, input, dt_ms);
        }

        let events = self.state.drain_events();
        if events.iter().any(|e| matches!(e, GameEvent::GameOver { .. })) {
            self.on_game_over();
        }
        events
    }

    fn on_game_over(&mut self) {
        self.game_over_banner_ms = GAME_OVER_BANNER_MS;
        self.submission.reset();
        self.leaderboard = None;
    }

    fn clear_results(&mut self) {
        self.submission.reset();
        self.leaderboard = None;
        self.last_submitted = None;
        self.game_over_banner_ms = 0.0;
    }

    /// "Game Over!" banner is up
    pub fn show_game_over_banner(&self) -> bool {
        self.state.is_game_over() && self.game_over_banner_ms > 0.0
    }

    pub fn ranking_visible(&self) -> bool {
        self.leaderboard.is_some()
    }

    pub fn primary_action(&self) -> PrimaryAction {
        match self.state.phase {
            GamePhase::Idle | GamePhase::GameOver => PrimaryAction::Start,
            GamePhase::Running => PrimaryAction::Pause,
            GamePhase::Paused => PrimaryAction::Resume,
        }
    }

    /// After a game over, starting again waits until a score submission has
    /// completed
    pub fn can_start(&self) -> bool {
        !self.state.is_game_over() || self.submission.has_completed()
    }

    /// Input for a click on the main button
    pub fn primary_input(&self) -> TickInput {
        match self.primary_action() {
            PrimaryAction::Start => TickInput {
                start: true,
                ..Default::default()
            },
            PrimaryAction::Pause | PrimaryAction::Resume => TickInput {
                toggle_pause: true,
                ..Default::default()
            },
        }
    }

    /// The name form is shown (game over, ranking not yet loaded)
    pub fn score_form_visible(&self) -> bool {
        self.state.is_game_over() && !self.ranking_visible()
    }

    /// The submit button is enabled
    pub fn can_submit(&self) -> bool {
        self.score_form_visible() && !self.submission.is_in_flight()
    }

    /// Claim the submission slot for this run's score
    pub fn begin_submission(&mut self, name: &str) -> Result<ScoreEntry, SubmitError> {
        if !self.score_form_visible() {
            return Err(SubmitError::NotFinished);
        }
        self.submission
            .begin(name, self.state.elapsed_seconds, self.state.stars_collected)
    }

    /// Record the outcome of a submission started with `begin_submission`.
    ///
    /// The leaderboard is only written on success; failures are logged and
    /// leave the form ready for another try.
    pub fn finish_submission(
        &mut self,
        sent: ScoreEntry,
        result: Result<Vec<ScoreEntry>, SubmitError>,
    ) {
        self.submission.finish();
        match result {
            Ok(entries) => {
                log::info!("Ranking received ({} entries)", entries.len());
                if self.state.is_game_over() {
                    self.leaderboard = Some(Leaderboard::new(entries));
                    self.last_submitted = Some(sent);
                }
            }
            Err(e) => log::error!("Error submitting score: {}", e),
        }
    }

    /// Leaderboard row of the player's submitted score
    pub fn player_rank(&self) -> Option<usize> {
        let sent = self.last_submitted.as_ref()?;
        self.leaderboard
            .as_ref()?
            .find(&sent.name, sent.stars, sent.time)
            .map(|e| e.rank)
    }
}
