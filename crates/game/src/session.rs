//! Run state (player lane, score, speed) and the aggregate that gets persisted.

use renderer::{LightingState, PostSettings};

use crate::lane::LANE_POSITIONS;

/// Lowest and highest selectable game speed.
pub const SPEED_RANGE: (f32, f32) = (1.5, 7.0);

const CENTER_LANE: usize = 3;

/// One run plus the best score across runs.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    /// Index into [`LANE_POSITIONS`].
    player_lane: usize,
    pub score: u32,
    pub high_score: u32,
    pub game_over: bool,
    /// Depth units per second.
    pub speed: f32,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            player_lane: CENTER_LANE,
            score: 0,
            high_score: 0,
            game_over: false,
            speed: SPEED_RANGE.0,
        }
    }
}

impl Session {
    /// Lateral position of the player, bit-identical to the matching entity lane.
    pub fn player_x(&self) -> f32 {
        LANE_POSITIONS[self.player_lane]
    }

    /// Move one quarter step left (`dir < 0`) or right (`dir > 0`), stopping at the edges.
    pub fn step(&mut self, dir: i32) {
        if dir < 0 && self.player_lane > 0 {
            self.player_lane -= 1;
        } else if dir > 0 && self.player_lane + 1 < LANE_POSITIONS.len() {
            self.player_lane += 1;
        }
    }

    /// Record the final score and stop the run.
    pub fn end_run(&mut self) {
        self.game_over = true;
        self.high_score = self.high_score.max(self.score);
        self.score = 0;
    }

    /// Start a new run. Lane, speed and high score carry over.
    pub fn reset_run(&mut self) {
        self.game_over = false;
        self.score = 0;
    }
}

/// Everything the persisted record covers, plus the live run.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramState {
    pub ui_enabled: bool,
    pub lights: LightingState,
    pub post: PostSettings,
    pub session: Session,
}

impl Default for ProgramState {
    fn default() -> Self {
        Self {
            ui_enabled: false,
            lights: LightingState::default(),
            post: PostSettings::default(),
            session: Session::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_centred_at_base_speed() {
        let s = Session::default();
        assert_eq!(s.player_x(), 0.0);
        assert_eq!(s.speed, 1.5);
        assert!(!s.game_over);
    }

    #[test]
    fn stepping_stops_at_the_edges() {
        let mut s = Session::default();
        for _ in 0..10 {
            s.step(-1);
        }
        assert_eq!(s.player_x(), -0.75);
        s.step(1);
        assert_eq!(s.player_x(), -0.5);
        for _ in 0..10 {
            s.step(1);
        }
        assert_eq!(s.player_x(), 0.75);
        s.step(0);
        assert_eq!(s.player_x(), 0.75);
    }

    #[test]
    fn steps_are_quarter_lanes() {
        let mut s = Session::default();
        s.step(1);
        assert_eq!(s.player_x(), 0.25);
        s.step(-1);
        s.step(-1);
        assert_eq!(s.player_x(), -0.25);
    }

    #[test]
    fn end_run_keeps_the_best_score() {
        let mut s = Session::default();
        s.score = 7;
        s.end_run();
        assert!(s.game_over);
        assert_eq!((s.score, s.high_score), (0, 7));
        s.reset_run();
        s.score = 3;
        s.end_run();
        assert_eq!(s.high_score, 7);
    }

    #[test]
    fn reset_keeps_lane_speed_and_best() {
        let mut s = Session::default();
        s.step(1);
        s.speed = 4.0;
        s.high_score = 9;
        s.score = 2;
        s.game_over = true;
        s.reset_run();
        assert_eq!(s.player_x(), 0.25);
        assert_eq!(s.speed, 4.0);
        assert_eq!(s.high_score, 9);
        assert_eq!(s.score, 0);
        assert!(!s.game_over);
    }

    #[test]
    fn program_defaults() {
        let p = ProgramState::default();
        assert!(!p.ui_enabled);
        assert!(p.post.bloom);
        assert_eq!(p.post.exposure, 1.0);
    }
}
