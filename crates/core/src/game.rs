//! Game engine - board state, piece movement and the landing pipeline
//!
//! The engine owns the falling piece, the settled blocks and the walls and
//! floor around the playfield. It is driven entirely from outside: commands
//! and ticks arrive as [`Event`]s through [`Game::handle`], one at a time, and
//! every attempt is recorded in an append-only action history.
//!
//! Coordinates: x grows to the right, y grows downward. Row 0 is the top of
//! the playfield and pieces may extend above it (negative y).

use std::collections::BTreeMap;

use tracing::{debug, info, trace};

use crate::collision::collides;
use crate::error::{Error, Result};
use crate::piece::Piece;
use crate::scoring::Scoring;
use crate::supply::{PieceSource, PieceSupply};
use crate::timer::Timer;
use crate::types::{
    Action, Color, Command, Position, BOARD_HEIGHT, BOARD_WIDTH, DEFAULT_PREVIEW_DEPTH,
    MAX_BOARD_SIDE, MIN_BOARD_HEIGHT, MIN_BOARD_WIDTH,
};

/// Something delivered to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Command(Command),
    /// One gravity period elapsed
    Tick,
}

impl From<Command> for Event {
    fn from(command: Command) -> Self {
        Event::Command(command)
    }
}

/// Playfield dimensions and preview depth
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardConfig {
    pub width: i32,
    pub height: i32,
    pub preview_depth: usize,
}

impl BoardConfig {
    /// Check the dimensions; every piece must fit at the start position
    pub fn validate(&self) -> Result<()> {
        let sides_ok = (MIN_BOARD_WIDTH..=MAX_BOARD_SIDE).contains(&self.width)
            && (MIN_BOARD_HEIGHT..=MAX_BOARD_SIDE).contains(&self.height);
        if !sides_ok {
            return Err(Error::InvalidBoard {
                width: self.width,
                height: self.height,
            });
        }
        if self.preview_depth == 0 {
            return Err(Error::InvalidPreviewDepth);
        }
        Ok(())
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            preview_depth: DEFAULT_PREVIEW_DEPTH,
        }
    }
}

/// A settled cell of the stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Block {
    position: Position,
    color: Color,
}

impl Block {
    pub fn new(position: Position, color: Color) -> Self {
        Self { position, color }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn color(&self) -> Color {
        self.color
    }

    fn fall(&mut self) {
        self.position.y += 1;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shift {
    Left,
    Right,
}

/// The game engine
#[derive(Debug)]
pub struct Game<T, S, P> {
    timer: T,
    scoring: S,
    supply: PieceSupply<P>,
    current: Piece,
    settled: Vec<Block>,
    history: Vec<Action>,
    width: i32,
    height: i32,
    left_wall: Vec<Position>,
    right_wall: Vec<Position>,
    floor: Vec<Position>,
    over: bool,
}

impl<T: Timer, S: Scoring, P: PieceSource> Game<T, S, P> {
    /// Build a game and spawn its first piece.
    ///
    /// The timer is left untouched; send [`Command::Resume`] to start play.
    /// Boards narrower than [`MIN_BOARD_WIDTH`] or shorter than
    /// [`MIN_BOARD_HEIGHT`] are rejected, as is a zero preview depth.
    pub fn new(config: BoardConfig, timer: T, scoring: S, source: P) -> Result<Self> {
        config.validate()?;
        let mut supply = PieceSupply::new(source, config.preview_depth)?;
        let current = supply.take()?;

        let BoardConfig { width, height, .. } = config;
        let left_wall = (0..height).map(|y| Position::new(-1, y)).collect();
        let right_wall = (0..height).map(|y| Position::new(width, y)).collect();
        let floor = (-1..=width).map(|x| Position::new(x, height)).collect();

        let mut game = Self {
            timer,
            scoring,
            supply,
            current,
            settled: Vec::new(),
            history: Vec::new(),
            width,
            height,
            left_wall,
            right_wall,
            floor,
            over: false,
        };
        game.spawn_current();
        debug!(width, height, depth = config.preview_depth, "game created");
        Ok(game)
    }

    /// Process one event
    pub fn handle(&mut self, event: Event) -> Result<()> {
        match event {
            Event::Tick => self.tick(),
            Event::Command(command) => self.apply(command),
        }
    }

    /// Process a player command
    pub fn apply(&mut self, command: Command) -> Result<()> {
        trace!(%command, "command");
        match command {
            Command::Left => self.shift(Shift::Left),
            Command::Right => self.shift(Shift::Right),
            Command::Rotate => self.rotate(),
            Command::SoftDrop => return self.soft_drop(),
            Command::Pause => self.pause(),
            Command::Resume => self.resume(),
        }
        Ok(())
    }

    /// Advance gravity by one step
    pub fn tick(&mut self) -> Result<()> {
        self.step_down()
    }

    /// Add settled blocks directly, e.g. to set up a puzzle.
    ///
    /// Every block must lie inside the playfield; nothing is added otherwise.
    pub fn place_blocks(&mut self, blocks: impl IntoIterator<Item = Block>) -> Result<()> {
        let blocks: Vec<Block> = blocks.into_iter().collect();
        for block in &blocks {
            self.check_in_bounds(block.position)?;
        }
        self.settled.extend(blocks);
        Ok(())
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Where new pieces are anchored
    pub fn start_position(&self) -> Position {
        Position::new(self.width / 2, 0)
    }

    pub fn left_wall(&self) -> &[Position] {
        &self.left_wall
    }

    pub fn right_wall(&self) -> &[Position] {
        &self.right_wall
    }

    pub fn floor(&self) -> &[Position] {
        &self.floor
    }

    pub fn current(&self) -> &Piece {
        &self.current
    }

    pub fn settled_blocks(&self) -> &[Block] {
        &self.settled
    }

    /// Upcoming piece at `offset` (0 = the one spawned next)
    pub fn preview(&self, offset: usize) -> Result<&Piece> {
        self.supply.peek(offset)
    }

    /// All upcoming pieces, next first
    pub fn upcoming(&self) -> impl Iterator<Item = &Piece> {
        self.supply.iter()
    }

    pub fn preview_depth(&self) -> usize {
        self.supply.depth()
    }

    /// Every recorded action, oldest first
    pub fn history(&self) -> &[Action] {
        &self.history
    }

    pub fn last_action(&self) -> Action {
        self.history.last().copied().unwrap_or(Action::NoAction)
    }

    pub fn score(&self) -> u32 {
        self.scoring.score()
    }

    pub fn level(&self) -> u32 {
        self.scoring.level()
    }

    pub fn completed_lines(&self) -> u32 {
        self.scoring.completed_lines()
    }

    pub fn scoring(&self) -> &S {
        &self.scoring
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }

    pub fn is_over(&self) -> bool {
        self.over
    }

    /// True whenever the timer is not running, including before the first resume
    pub fn is_paused(&self) -> bool {
        !self.timer.is_started()
    }

    /// Rows where every column is occupied, top to bottom
    pub fn find_completed_rows(&self) -> Vec<i32> {
        let mut counts: BTreeMap<i32, i32> = BTreeMap::new();
        for block in &self.settled {
            *counts.entry(block.position.y).or_default() += 1;
        }
        counts
            .into_iter()
            .filter(|&(_, count)| count == self.width)
            .map(|(row, _)| row)
            .collect()
    }

    fn record(&mut self, action: Action) {
        trace!(?action, "action");
        self.history.push(action);
    }

    fn spawn_current(&mut self) {
        self.current.set_position(self.start_position());
        self.scoring.on_new_piece();
        trace!(piece = %self.current, "spawned");
    }

    fn hits_stack(&self, cells: &[Position]) -> bool {
        let stack: Vec<Position> = self.settled.iter().map(Block::position).collect();
        collides(&stack, cells)
    }

    /// Wall rows span `0..height`; above the top row the playfield edges still block
    fn hits_wall(&self, side: Shift, cells: &[Position]) -> bool {
        let (wall, outside) = match side {
            Shift::Left => (&self.left_wall, cells.iter().any(|c| c.y < 0 && c.x < 0)),
            Shift::Right => (
                &self.right_wall,
                cells.iter().any(|c| c.y < 0 && c.x >= self.width),
            ),
        };
        outside || collides(wall, cells)
    }

    fn shift(&mut self, direction: Shift) {
        let (attempt, success) = match direction {
            Shift::Left => (Action::TryLeft, Action::Left),
            Shift::Right => (Action::TryRight, Action::Right),
        };
        self.record(attempt);
        if self.over {
            return;
        }

        let mut moved = self.current.clone();
        match direction {
            Shift::Left => moved.move_left(),
            Shift::Right => moved.move_right(),
        }
        let cells = moved.absolute_blocks();

        let outcome = if self.hits_stack(&cells) {
            Action::CollisionStack
        } else if self.hits_wall(direction, &cells) {
            Action::CollisionWall
        } else {
            self.current = moved;
            success
        };
        self.record(outcome);
    }

    fn rotate(&mut self) {
        self.record(Action::TryRotate);
        if self.over {
            return;
        }

        let mut rotated = self.current.clone();
        rotated.rotate();
        let cells = rotated.absolute_blocks();

        let outcome = if self.hits_stack(&cells) {
            Action::CollisionStack
        } else if self.hits_wall(Shift::Left, &cells) || self.hits_wall(Shift::Right, &cells) {
            Action::CollisionWall
        } else if collides(&self.floor, &cells) {
            Action::CollisionFloor
        } else {
            self.current = rotated;
            Action::Rotate
        };
        self.record(outcome);
    }

    fn soft_drop(&mut self) -> Result<()> {
        self.record(Action::SoftDrop);
        if self.over {
            return Ok(());
        }
        self.scoring.on_soft_drop();
        self.step_down()
    }

    fn pause(&mut self) {
        self.timer.stop();
        debug!("paused");
    }

    fn resume(&mut self) {
        if self.over || self.timer.is_started() {
            return;
        }
        let interval = self.scoring.drop_interval(None);
        self.timer.start(interval);
        debug!(?interval, "resumed");
    }

    fn reached_top(&self) -> bool {
        self.current.position() == self.start_position()
            && self.hits_stack(&self.current.absolute_blocks())
    }

    fn step_down(&mut self) -> Result<()> {
        if self.over {
            return Ok(());
        }
        if self.reached_top() {
            self.over = true;
            self.timer.stop();
            self.record(Action::GameOver);
            info!(score = self.score(), lines = self.completed_lines(), "game over");
            return Ok(());
        }

        let mut moved = self.current.clone();
        moved.move_down();
        let cells = moved.absolute_blocks();

        if self.hits_stack(&cells) || collides(&self.floor, &cells) {
            self.land()?;
            self.clear_completed_rows();
            self.record(Action::Land);
        } else {
            self.current = moved;
            self.record(Action::Down);
        }
        Ok(())
    }

    fn check_in_bounds(&self, position: Position) -> Result<()> {
        if position.x < 0 || position.x >= self.width || position.y >= self.height {
            return Err(Error::OffGridBlock(position));
        }
        Ok(())
    }

    /// Turn the current piece into settled blocks and spawn the next one
    fn land(&mut self) -> Result<()> {
        let color = self.current.color();
        let blocks = self
            .current
            .absolute_blocks()
            .into_iter()
            .map(|position| {
                self.check_in_bounds(position)?;
                Ok(Block::new(position, color))
            })
            .collect::<Result<Vec<_>>>()?;
        // Take first so a failing source leaves the board untouched.
        let next = self.supply.take()?;
        debug!(piece = %self.current, "landed");

        self.settled.extend(blocks);
        self.current = next;
        self.spawn_current();
        Ok(())
    }

    fn clear_completed_rows(&mut self) {
        let rows = self.find_completed_rows();
        if rows.is_empty() {
            return;
        }
        debug!(?rows, "rows completed");

        if self.scoring.on_completed_lines(rows.len() as u32) {
            info!(level = self.scoring.level(), "level up");
            if self.timer.is_started() {
                self.timer.start(self.scoring.drop_interval(None));
            }
        }

        self.settled.retain(|block| !rows.contains(&block.position.y));
        if self.settled.is_empty() {
            debug!("perfect clear");
            self.scoring.on_perfect_clear();
            return;
        }

        // Rows are ascending, so each pass shifts what sits above the next gap.
        for &row in &rows {
            for block in self.settled.iter_mut().filter(|b| b.position.y < row) {
                block.fall();
            }
        }
    }
}
