//! Top-level game-mode state machine.
//!
//! ## States
//!
//! | Mode          | Advances by                         | Leaves to                 |
//! |---------------|-------------------------------------|---------------------------|
//! | `TitleScreen` | hold, then linear fade of the title | `Intro` (or `Running` on skip) |
//! | `Intro`       | crawl scroll offset                 | `Running` (crawl done or skip) |
//! | `Running`     | gameplay + countdown                | `GameOver` / `Win`        |
//! | `GameOver`    | -                                   | (restart, outside the machine) |
//! | `Win`         | -                                   | (restart, outside the machine) |
//!
//! [`GameMode`] doubles as a Bevy [`States`] type: the session is the source
//! of truth and the app mirrors it into `State<GameMode>` so `OnEnter`
//! systems can perform mode-entry side effects (cursor grab, music).

use std::time::Duration;

use crate::config::GameConfig;
use crate::score::{ScoreBoard, ScoreVerdict};
use bevy::prelude::*;

#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameMode {
    /// Title card; shown on startup.
    #[default]
    TitleScreen,
    /// Scrolling intro crawl.
    Intro,
    /// Active gameplay.
    Running,
    /// Planet lost.
    GameOver,
    /// Planet defended.
    Win,
}

impl GameMode {
    /// `GameOver` and `Win` are final for a session.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, GameMode::GameOver | GameMode::Win)
    }
}

/// Durations and distances the machine needs, extracted from [`GameConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeTimings {
    pub title_hold: Duration,
    pub title_fade: Duration,
    /// Pixels per second.
    pub crawl_speed: f32,
    /// Total height of the crawl text block in pixels.
    pub crawl_block_height: f32,
    pub viewport_height: f32,
}

impl ModeTimings {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            title_hold: config.title_hold(),
            title_fade: config.title_fade(),
            crawl_speed: config.crawl_speed,
            crawl_block_height: config.crawl_block_height(),
            viewport_height: config.viewport_height,
        }
    }

    /// Offset at which the whole crawl has left the top of the viewport.
    #[inline]
    pub fn crawl_end(&self) -> f32 {
        self.crawl_block_height + self.viewport_height
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameModeMachine {
    mode: GameMode,
    timings: ModeTimings,
    title_elapsed: Duration,
    crawl_offset: f32,
    /// Remaining time in the timed economy; `None` when untimed.
    countdown: Option<Duration>,
}

impl GameModeMachine {
    pub fn new(timings: ModeTimings, time_limit: Option<Duration>) -> Self {
        Self {
            mode: GameMode::TitleScreen,
            timings,
            title_elapsed: Duration::ZERO,
            crawl_offset: 0.0,
            countdown: time_limit,
        }
    }

    #[inline]
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    #[inline]
    pub fn timings(&self) -> &ModeTimings {
        &self.timings
    }

    #[inline]
    pub fn crawl_offset(&self) -> f32 {
        self.crawl_offset
    }

    #[inline]
    pub fn time_remaining(&self) -> Option<Duration> {
        self.countdown
    }

    /// Title opacity in `[0, 1]`: 1 during the hold, then a linear ramp to 0.
    pub fn title_alpha(&self) -> f32 {
        let hold = self.timings.title_hold;
        if self.title_elapsed < hold {
            return 1.0;
        }
        let fade = self.timings.title_fade.as_secs_f32();
        if fade <= 0.0 {
            return 0.0;
        }
        let fading = (self.title_elapsed - hold).as_secs_f32();
        (1.0 - fading / fade).clamp(0.0, 1.0)
    }

    fn enter(&mut self, mode: GameMode) -> Option<GameMode> {
        if mode == self.mode {
            return None;
        }
        self.mode = mode;
        Some(mode)
    }

    /// Advance the non-gameplay timers of the current mode.
    ///
    /// Returns the newly entered mode, if any.  `Running` and the terminal
    /// modes have nothing to advance here.
    pub fn advance(&mut self, dt: Duration) -> Option<GameMode> {
        match self.mode {
            GameMode::TitleScreen => {
                self.title_elapsed += dt;
                if self.title_elapsed >= self.timings.title_hold + self.timings.title_fade {
                    self.title_elapsed = Duration::ZERO;
                    return self.enter(GameMode::Intro);
                }
                None
            }
            GameMode::Intro => {
                self.crawl_offset += self.timings.crawl_speed * dt.as_secs_f32();
                if self.crawl_offset > self.timings.crawl_end() {
                    return self.enter(GameMode::Running);
                }
                None
            }
            GameMode::Running | GameMode::GameOver | GameMode::Win => None,
        }
    }

    /// Jump straight to `Running` from the title card or the intro crawl.
    pub fn skip(&mut self) -> Option<GameMode> {
        match self.mode {
            GameMode::TitleScreen | GameMode::Intro => self.enter(GameMode::Running),
            _ => None,
        }
    }

    /// Count the gameplay timer down; saturates at zero.
    pub fn tick_countdown(&mut self, dt: Duration) {
        if self.mode != GameMode::Running {
            return;
        }
        if let Some(remaining) = self.countdown.as_mut() {
            *remaining = remaining.saturating_sub(dt);
        }
    }

    /// Check the terminal conditions after this frame's scoring.
    pub fn evaluate(&mut self, score: &ScoreBoard) -> Option<GameMode> {
        if self.mode != GameMode::Running {
            return None;
        }
        let expired = self.countdown.is_some_and(|d| d.is_zero());
        match score.verdict(expired) {
            ScoreVerdict::Lost => self.enter(GameMode::GameOver),
            ScoreVerdict::Won => self.enter(GameMode::Win),
            ScoreVerdict::Undecided => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::TIME_LIMIT;

    const TICK: Duration = Duration::from_millis(16);

    fn machine() -> GameModeMachine {
        let config = GameConfig::default();
        GameModeMachine::new(
            ModeTimings::from_config(&config),
            config.scoring_policy().time_limit,
        )
    }

    fn running_machine() -> GameModeMachine {
        let mut m = machine();
        m.skip();
        m
    }

    #[test]
    fn starts_on_title_screen() {
        let m = machine();
        assert_eq!(m.mode(), GameMode::TitleScreen);
        assert_eq!(m.title_alpha(), 1.0);
    }

    #[test]
    fn title_holds_then_fades_linearly() {
        let mut m = machine();
        m.advance(Duration::from_millis(3_900));
        assert_eq!(m.title_alpha(), 1.0);

        m.advance(Duration::from_millis(850)); // 0.75 s into a 1.5 s fade
        assert!((m.title_alpha() - 0.5).abs() < 1e-4);
        assert_eq!(m.mode(), GameMode::TitleScreen);
    }

    #[test]
    fn title_fade_completion_enters_intro_and_resets() {
        let mut m = machine();
        assert_eq!(m.advance(Duration::from_millis(5_499)), None);
        assert_eq!(m.advance(Duration::from_millis(1)), Some(GameMode::Intro));
        assert_eq!(m.mode(), GameMode::Intro);
        assert_eq!(m.title_alpha(), 1.0);
    }

    #[test]
    fn title_never_jumps_to_running_on_its_own() {
        let mut m = machine();
        let mut seen = vec![m.mode()];
        // Title card plus the full crawl take under 60 s.
        for _ in 0..4_000 {
            if let Some(mode) = m.advance(TICK) {
                seen.push(mode);
            }
        }
        assert_eq!(seen[1], GameMode::Intro);
        assert_eq!(*seen.last().unwrap(), GameMode::Running);
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn intro_ends_after_crawl_leaves_viewport() {
        let mut m = machine();
        m.advance(Duration::from_millis(5_500));
        assert_eq!(m.mode(), GameMode::Intro);

        let end = m.timings().crawl_end();
        let secs_to_end = end / m.timings().crawl_speed;
        m.advance(Duration::from_secs_f32(secs_to_end - 0.5));
        assert_eq!(m.mode(), GameMode::Intro);
        assert!(m.crawl_offset() < end);

        m.advance(Duration::from_secs(1));
        assert_eq!(m.mode(), GameMode::Running);
    }

    #[test]
    fn skip_from_title_or_intro_only() {
        let mut m = machine();
        assert_eq!(m.skip(), Some(GameMode::Running));
        assert_eq!(m.skip(), None);

        let mut m = machine();
        m.advance(Duration::from_millis(5_500));
        assert_eq!(m.skip(), Some(GameMode::Running));
    }

    #[test]
    fn countdown_only_runs_while_running() {
        let mut m = machine();
        m.tick_countdown(Duration::from_secs(5));
        assert_eq!(m.time_remaining(), Some(TIME_LIMIT));

        m.skip();
        m.tick_countdown(Duration::from_secs(5));
        assert_eq!(m.time_remaining(), Some(TIME_LIMIT - Duration::from_secs(5)));
    }

    #[test]
    fn countdown_expiry_wins() {
        let config = GameConfig::default();
        let score = ScoreBoard::new(config.scoring_policy());
        let mut m = running_machine();

        let mut elapsed = Duration::ZERO;
        while elapsed < Duration::from_millis(61_000) {
            m.tick_countdown(TICK);
            elapsed += TICK;
            if elapsed < Duration::from_millis(61_000) {
                assert_eq!(m.evaluate(&score), None);
            }
        }

        assert_eq!(m.time_remaining(), Some(Duration::ZERO));
        assert_eq!(m.evaluate(&score), Some(GameMode::Win));
        assert!(m.mode().is_terminal());
    }

    #[test]
    fn depleted_health_ends_game() {
        let config = GameConfig::default();
        let mut score = ScoreBoard::new(config.scoring_policy());
        let mut m = running_machine();
        for _ in 0..20 {
            score.record_ground_impact();
        }
        assert_eq!(m.evaluate(&score), Some(GameMode::GameOver));
        assert_eq!(m.evaluate(&score), None);
        assert_eq!(m.mode(), GameMode::GameOver);
    }

    #[test]
    fn terminal_modes_do_not_advance() {
        let config = GameConfig::default();
        let mut score = ScoreBoard::new(config.scoring_policy());
        let mut m = running_machine();
        for _ in 0..20 {
            score.record_ground_impact();
        }
        m.evaluate(&score);

        assert_eq!(m.advance(Duration::from_secs(100)), None);
        assert_eq!(m.skip(), None);
        m.tick_countdown(Duration::from_secs(100));
        assert_eq!(m.time_remaining(), Some(TIME_LIMIT));
    }
}
