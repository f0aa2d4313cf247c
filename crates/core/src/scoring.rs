//! Scoring module - the scoring protocol and two rule sets
//!
//! The engine reports four events to a [`Scoring`] implementation: a new
//! piece, completed lines, a perfect clear and a soft drop. The scoring side
//! decides the score, the level and how fast pieces fall at each level; it
//! alone decides when the level changes.
//!
//! - [`ClassicScoring`]: the original Nintendo table and gravity curve.
//!   Reference: https://tetris.wiki/Scoring#Original_Nintendo_scoring_system
//! - [`ModernScoring`]: combo, back-to-back and perfect-clear bonuses on top
//!   of the classic line table, with a millisecond drop curve.

use std::time::Duration;

use crate::types::{
    B2B_DENOMINATOR, B2B_NUMERATOR, COMBO_BASE, DROP_INTERVALS_MS, DROP_INTERVAL_FLOOR_MS,
    FRAME_RATE_HZ, GRAVITY_CELLS_PER_FRAME, LINES_PER_LEVEL, LINE_SCORES, MAX_LEVEL,
    PERFECT_CLEAR_SCORES,
};

/// Scoring strategy observed by the engine
pub trait Scoring {
    /// A piece became current
    fn on_new_piece(&mut self);

    /// `lines` rows were completed at once (always >= 1).
    /// Returns true if the level changed as a result.
    fn on_completed_lines(&mut self, lines: u32) -> bool;

    /// The board became empty right after a clear
    fn on_perfect_clear(&mut self);

    /// The player requested a soft drop
    fn on_soft_drop(&mut self);

    fn score(&self) -> u32;

    fn level(&self) -> u32;

    fn completed_lines(&self) -> u32;

    /// Time between automatic drops at `level`, or at the current level when `None`
    fn drop_interval(&self, level: Option<u32>) -> Duration;
}

impl<S: Scoring + ?Sized> Scoring for Box<S> {
    fn on_new_piece(&mut self) {
        (**self).on_new_piece()
    }

    fn on_completed_lines(&mut self, lines: u32) -> bool {
        (**self).on_completed_lines(lines)
    }

    fn on_perfect_clear(&mut self) {
        (**self).on_perfect_clear()
    }

    fn on_soft_drop(&mut self) {
        (**self).on_soft_drop()
    }

    fn score(&self) -> u32 {
        (**self).score()
    }

    fn level(&self) -> u32 {
        (**self).level()
    }

    fn completed_lines(&self) -> u32 {
        (**self).completed_lines()
    }

    fn drop_interval(&self, level: Option<u32>) -> Duration {
        (**self).drop_interval(level)
    }
}

/// Calculate line clear score (Classic rules)
/// lines: number of lines cleared, counts above 4 score as 4
/// level: current level (1-based)
pub fn calculate_line_score(lines: u32, level: u32) -> u32 {
    let index = (lines as usize).min(LINE_SCORES.len() - 1);
    LINE_SCORES[index].saturating_mul(level)
}

/// Level for a total of completed lines (1-based, one level per 10 lines)
pub fn calculate_level(total_lines: u32) -> u32 {
    1 + total_lines / LINES_PER_LEVEL
}

/// Classic drop interval: one cell every `1 / (G * 60)` seconds
pub fn gravity_interval(level: u32) -> Duration {
    let level = level.clamp(1, MAX_LEVEL) as usize;
    let cells_per_second = GRAVITY_CELLS_PER_FRAME[level] * FRAME_RATE_HZ;
    let ms = (1000.0 / cells_per_second) as u64;
    Duration::from_millis(ms.max(1)) // Minimum 1ms, timers reject a zero period
}

/// Calculate combo bonus.
///
/// - `-1`: no combo chain
/// - `0`: first clear in chain (no bonus)
/// - `1+`: bonus applies as `combo_base * combo_index`
pub fn calculate_combo_bonus(combo_index: i32) -> u32 {
    if combo_index <= 0 {
        return 0;
    }
    COMBO_BASE * (combo_index as u32)
}

/// Apply the B2B multiplier (3/2) to a point value.
pub fn apply_b2b_multiplier(points: u32) -> u32 {
    points
        .saturating_mul(B2B_NUMERATOR)
        .saturating_div(B2B_DENOMINATOR)
}

/// Original Nintendo scoring
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassicScoring {
    score: u32,
    completed_lines: u32,
}

impl ClassicScoring {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scoring for ClassicScoring {
    fn on_new_piece(&mut self) {
        self.score += 1;
    }

    fn on_completed_lines(&mut self, lines: u32) -> bool {
        let level = self.level();
        self.score += calculate_line_score(lines, level);
        self.completed_lines += lines;
        level != self.level()
    }

    fn on_perfect_clear(&mut self) {}

    fn on_soft_drop(&mut self) {
        self.score += 1;
    }

    fn score(&self) -> u32 {
        self.score
    }

    fn level(&self) -> u32 {
        calculate_level(self.completed_lines)
    }

    fn completed_lines(&self) -> u32 {
        self.completed_lines
    }

    fn drop_interval(&self, level: Option<u32>) -> Duration {
        let level = level.unwrap_or(0).max(self.level());
        gravity_interval(level)
    }
}

/// Guideline-flavoured scoring: combos, back-to-back and perfect clears
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModernScoring {
    score: u32,
    completed_lines: u32,
    /// -1 when no chain is running
    combo: i32,
    /// Last clear was a 4-line clear
    back_to_back: bool,
    /// Size of the most recent clear, for the perfect-clear bonus
    last_clear: u32,
    /// The piece that just landed completed lines
    cleared_since_spawn: bool,
}

impl ModernScoring {
    pub fn new() -> Self {
        Self {
            score: 0,
            completed_lines: 0,
            combo: -1,
            back_to_back: false,
            last_clear: 0,
            cleared_since_spawn: false,
        }
    }

    pub fn combo(&self) -> i32 {
        self.combo
    }

    pub fn back_to_back(&self) -> bool {
        self.back_to_back
    }
}

impl Default for ModernScoring {
    fn default() -> Self {
        Self::new()
    }
}

impl Scoring for ModernScoring {
    fn on_new_piece(&mut self) {
        // A landing that cleared nothing breaks the chain.
        if !self.cleared_since_spawn {
            self.combo = -1;
        }
        self.cleared_since_spawn = false;
    }

    fn on_completed_lines(&mut self, lines: u32) -> bool {
        let level = self.level();
        let tetris = lines >= 4;

        let base = calculate_line_score(lines, level);
        let points = if tetris && self.back_to_back {
            apply_b2b_multiplier(base)
        } else {
            base
        };

        self.combo += 1;
        self.score = self
            .score
            .saturating_add(points)
            .saturating_add(calculate_combo_bonus(self.combo));
        self.back_to_back = tetris;
        self.last_clear = lines;
        self.cleared_since_spawn = true;
        self.completed_lines += lines;

        level != self.level()
    }

    fn on_perfect_clear(&mut self) {
        let index = (self.last_clear as usize).min(PERFECT_CLEAR_SCORES.len() - 1);
        let bonus = PERFECT_CLEAR_SCORES[index].saturating_mul(self.level());
        self.score = self.score.saturating_add(bonus);
    }

    fn on_soft_drop(&mut self) {
        self.score += 1;
    }

    fn score(&self) -> u32 {
        self.score
    }

    fn level(&self) -> u32 {
        calculate_level(self.completed_lines)
    }

    fn completed_lines(&self) -> u32 {
        self.completed_lines
    }

    fn drop_interval(&self, level: Option<u32>) -> Duration {
        let level = level.unwrap_or(0).max(self.level());
        let ms = DROP_INTERVALS_MS
            .get(level as usize - 1)
            .copied()
            .unwrap_or(DROP_INTERVAL_FLOOR_MS);
        Duration::from_millis(ms as u64)
    }
}

/// Selectable rule sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScoringRule {
    #[default]
    Classic,
    Modern,
}

impl ScoringRule {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(ScoringRule::Classic),
            "modern" => Some(ScoringRule::Modern),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScoringRule::Classic => "classic",
            ScoringRule::Modern => "modern",
        }
    }

    pub fn build(&self) -> Box<dyn Scoring> {
        match self {
            ScoringRule::Classic => Box::new(ClassicScoring::new()),
            ScoringRule::Modern => Box::new(ModernScoring::new()),
        }
    }
}
