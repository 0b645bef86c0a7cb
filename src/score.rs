//! Score economy: intercept rewards, ground-impact penalties, thresholds.
//!
//! Two economies share one [`ScoreBoard`], selected by [`ScoringMode`]:
//!
//! | Mode           | Starts at | Loses when            | Wins when           |
//! |----------------|-----------|-----------------------|---------------------|
//! | `HealthTimer`  | 100       | health reaches 0      | countdown expires   |
//! | `PointsTarget` | 0         | a penalty goes below 0 | points reach target |

use std::time::Duration;

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringMode {
    /// Planetary health counts down from a start value under a hard timer.
    #[default]
    HealthTimer,
    /// Points count up toward a target with no timer.
    PointsTarget,
}

/// Parameters of the active economy, fixed for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringPolicy {
    pub mode: ScoringMode,
    /// Win threshold (`PointsTarget`) or starting health (`HealthTimer`).
    pub target: i32,
    pub initial_value: i32,
    pub intercept_value: i32,
    /// Subtracted on each ground impact.
    pub penalty: i32,
    /// Countdown length; `Some` only for `HealthTimer`.
    pub time_limit: Option<Duration>,
}

/// Verdict of a threshold check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreVerdict {
    Undecided,
    Lost,
    Won,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBoard {
    policy: ScoringPolicy,
    value: i32,
    /// Set when a penalty would have taken the value below zero.
    floor_breached: bool,
    intercepts: u32,
    impacts: u32,
}

impl ScoreBoard {
    pub fn new(policy: ScoringPolicy) -> Self {
        Self {
            policy,
            value: policy.initial_value.max(0),
            floor_breached: false,
            intercepts: 0,
            impacts: 0,
        }
    }

    #[inline]
    pub fn value(&self) -> i32 {
        self.value
    }

    #[inline]
    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    #[inline]
    pub fn floor_breached(&self) -> bool {
        self.floor_breached
    }

    #[inline]
    pub fn intercepts(&self) -> u32 {
        self.intercepts
    }

    #[inline]
    pub fn impacts(&self) -> u32 {
        self.impacts
    }

    /// Reward an intercepted meteor.  Both economies count up without a ceiling.
    pub fn record_intercept(&mut self) {
        self.intercepts += 1;
        self.value = self.value.saturating_add(self.policy.intercept_value);
    }

    /// Charge a ground impact.  The value is floored at zero.
    pub fn record_ground_impact(&mut self) {
        self.impacts += 1;
        let lowered = self.value.saturating_sub(self.policy.penalty);
        if lowered < 0 {
            self.floor_breached = true;
        }
        self.value = lowered.max(0);
    }

    /// Check the score thresholds.  `time_expired` only matters in the timed
    /// economy; losing takes precedence when both hold.
    pub fn verdict(&self, time_expired: bool) -> ScoreVerdict {
        match self.policy.mode {
            ScoringMode::HealthTimer => {
                if self.value <= 0 {
                    ScoreVerdict::Lost
                } else if time_expired {
                    ScoreVerdict::Won
                } else {
                    ScoreVerdict::Undecided
                }
            }
            ScoringMode::PointsTarget => {
                if self.floor_breached {
                    ScoreVerdict::Lost
                } else if self.value >= self.policy.target {
                    ScoreVerdict::Won
                } else {
                    ScoreVerdict::Undecided
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    fn health_board() -> ScoreBoard {
        ScoreBoard::new(GameConfig::default().scoring_policy())
    }

    fn points_board() -> ScoreBoard {
        ScoreBoard::new(
            GameConfig {
                scoring_mode: ScoringMode::PointsTarget,
                ..Default::default()
            }
            .scoring_policy(),
        )
    }

    #[test]
    fn three_impacts_cost_fifteen_health() {
        let mut board = health_board();
        assert_eq!(board.value(), 100);
        for _ in 0..3 {
            board.record_ground_impact();
        }
        assert_eq!(board.value(), 85);
        assert_eq!(board.verdict(false), ScoreVerdict::Undecided);
    }

    #[test]
    fn twenty_impacts_deplete_health() {
        let mut board = health_board();
        for _ in 0..20 {
            board.record_ground_impact();
        }
        assert_eq!(board.value(), 0);
        assert_eq!(board.verdict(false), ScoreVerdict::Lost);
    }

    #[test]
    fn health_never_goes_negative() {
        let mut board = health_board();
        for _ in 0..50 {
            board.record_ground_impact();
        }
        assert_eq!(board.value(), 0);
        assert_eq!(board.impacts(), 50);
    }

    #[test]
    fn intercept_at_full_health_still_restores() {
        let mut board = health_board();
        board.record_intercept();
        assert_eq!(board.value(), 110);

        let mut board = health_board();
        board.record_ground_impact();
        board.record_intercept();
        board.record_intercept();
        assert_eq!(board.value(), 115);
        assert_eq!(board.intercepts(), 2);
    }

    #[test]
    fn timer_expiry_wins_with_health_left() {
        let board = health_board();
        assert_eq!(board.verdict(true), ScoreVerdict::Won);
    }

    #[test]
    fn empty_health_loses_even_when_timer_expires() {
        let mut board = health_board();
        for _ in 0..20 {
            board.record_ground_impact();
        }
        assert_eq!(board.verdict(true), ScoreVerdict::Lost);
    }

    #[test]
    fn points_reach_target_to_win() {
        let mut board = points_board();
        for _ in 0..9 {
            board.record_intercept();
        }
        assert_eq!(board.verdict(false), ScoreVerdict::Undecided);
        board.record_intercept();
        assert_eq!(board.value(), 100);
        assert_eq!(board.verdict(false), ScoreVerdict::Won);
    }

    #[test]
    fn penalty_below_zero_loses_points_game() {
        let mut board = points_board();
        board.record_intercept();
        board.record_ground_impact();
        board.record_ground_impact();
        assert_eq!(board.value(), 0);
        assert_eq!(board.verdict(false), ScoreVerdict::Undecided);

        board.record_ground_impact();
        assert_eq!(board.value(), 0);
        assert!(board.floor_breached());
        assert_eq!(board.verdict(false), ScoreVerdict::Lost);
    }

    #[test]
    fn points_game_ignores_timer() {
        let board = points_board();
        assert_eq!(board.verdict(true), ScoreVerdict::Undecided);
    }
}
