//! Runtime - feeds the engine from one event channel.
//!
//! Three producers share a single `mpsc` channel:
//!
//! - the ticker task, which turns the [`ChannelTimer`] period into
//!   [`Event::Tick`]s
//! - the input thread, which blocks on crossterm and maps keys to commands
//! - terminal resizes, reported by the same input thread
//!
//! One consumer loop applies each event to the [`Game`] and redraws, so the
//! engine never sees two events at once.

use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self as term_event, Event as TermEvent};
use tokio::sync::{mpsc, watch};
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::config::GameConfig;
use crate::core::{Event, Game, PieceGenerator, PieceSource, Scoring, Timer};
use crate::input::{key_name, should_quit, KeyMap};
use crate::term::{Frame, GameView, TerminalRenderer};
use crate::types::Command;

const EVENT_QUEUE: usize = 64;
const INPUT_POLL: Duration = Duration::from_millis(100);
const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Everything the consumer loop reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopEvent {
    Engine(Event),
    Resize,
    Quit,
}

/// Timer whose state is published on a watch channel.
///
/// `None` means stopped. Every `start` publishes a change, even with an
/// unchanged period, so the ticker restarts its phase.
#[derive(Debug)]
pub struct ChannelTimer {
    period: watch::Sender<Option<Duration>>,
}

impl ChannelTimer {
    pub fn new() -> (Self, watch::Receiver<Option<Duration>>) {
        let (period, receiver) = watch::channel(None);
        (Self { period }, receiver)
    }
}

impl Timer for ChannelTimer {
    fn start(&mut self, interval: Duration) {
        self.period.send_replace(Some(interval));
    }

    fn stop(&mut self) {
        self.period.send_replace(None);
    }

    fn is_started(&self) -> bool {
        self.period.borrow().is_some()
    }
}

/// Emit a tick every published period until either channel closes
pub async fn run_ticker(
    mut period: watch::Receiver<Option<Duration>>,
    events: mpsc::Sender<LoopEvent>,
) {
    loop {
        let current = *period.borrow_and_update();
        let Some(every) = current else {
            if period.changed().await.is_err() {
                return;
            }
            continue;
        };

        let every = every.max(MIN_PERIOD);
        let mut ticks = time::interval_at(Instant::now() + every, every);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
        debug!(?every, "ticker armed");

        loop {
            tokio::select! {
                changed = period.changed() => {
                    if changed.is_err() {
                        return;
                    }
                    break;
                }
                _ = ticks.tick() => {
                    if events.send(LoopEvent::Engine(Event::Tick)).await.is_err() {
                        return;
                    }
                }
            }
        }
    }
}

/// Read terminal events on a dedicated thread until quit or the loop goes away
pub fn spawn_input_thread(
    keys: KeyMap,
    events: mpsc::Sender<LoopEvent>,
) -> Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("blockfall-input".to_string())
        .spawn(move || read_input(&keys, &events))
        .context("spawning input thread")
}

fn read_input(keys: &KeyMap, events: &mpsc::Sender<LoopEvent>) {
    while !events.is_closed() {
        let event = match term_event::poll(INPUT_POLL) {
            Ok(false) => continue,
            Ok(true) => term_event::read(),
            Err(err) => Err(err),
        };

        let message = match event {
            Ok(TermEvent::Key(key)) if should_quit(key) => LoopEvent::Quit,
            Ok(TermEvent::Key(key)) => match keys.command_for_event(key) {
                Some(command) => LoopEvent::Engine(Event::Command(command)),
                None => continue,
            },
            Ok(TermEvent::Resize(..)) => LoopEvent::Resize,
            Ok(_) => continue,
            Err(err) => {
                warn!(%err, "terminal input failed");
                LoopEvent::Quit
            }
        };

        let quit = message == LoopEvent::Quit;
        if events.blocking_send(message).is_err() || quit {
            return;
        }
    }
}

/// Where frames end up
pub trait Screen {
    fn draw(&mut self, frame: &Frame) -> Result<()>;

    /// Forget what is on screen so the next draw is complete
    fn invalidate(&mut self);
}

impl Screen for TerminalRenderer {
    fn draw(&mut self, frame: &Frame) -> Result<()> {
        TerminalRenderer::draw(self, frame)
    }

    fn invalidate(&mut self) {
        TerminalRenderer::invalidate(self)
    }
}

/// Final state of a finished session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub over: bool,
}

/// Apply events to the game until quit or every producer is gone
pub async fn run_loop<T, S, P, D>(
    game: &mut Game<T, S, P>,
    events: &mut mpsc::Receiver<LoopEvent>,
    view: &GameView,
    screen: &mut D,
) -> Result<Outcome>
where
    T: Timer,
    S: Scoring,
    P: PieceSource,
    D: Screen,
{
    let mut frame = view.render(game);
    screen.draw(&frame)?;

    while let Some(event) = events.recv().await {
        match event {
            LoopEvent::Quit => {
                debug!("quit requested");
                break;
            }
            LoopEvent::Resize => screen.invalidate(),
            LoopEvent::Engine(event) => {
                let was_over = game.is_over();
                game.handle(event)
                    .with_context(|| format!("engine failed on {event:?}"))?;
                if game.is_over() && !was_over {
                    info!(score = game.score(), "final score");
                }
            }
        }
        view.render_into(game, &mut frame);
        screen.draw(&frame)?;
    }

    Ok(Outcome {
        score: game.score(),
        lines: game.completed_lines(),
        level: game.level(),
        over: game.is_over(),
    })
}

/// Play one interactive session in the current terminal
pub fn run(config: &GameConfig) -> Result<Outcome> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("building tokio runtime")?;
    runtime.block_on(play(config))
}

async fn play(config: &GameConfig) -> Result<Outcome> {
    let keys = config.key_map()?;
    let seed = config.seed_or_clock();
    info!(seed, scoring = config.scoring.as_str(), "starting game");

    let (timer, period) = ChannelTimer::new();
    let mut game = Game::new(
        config.board(),
        timer,
        config.scoring.build(),
        PieceGenerator::new(seed),
    )
    .context("creating game")?;

    let resume_key = keys
        .key_for(Command::Resume)
        .map(key_name)
        .unwrap_or_default();
    let view = GameView::new(&resume_key);

    let (tx, mut rx) = mpsc::channel(EVENT_QUEUE);
    let ticker = tokio::spawn(run_ticker(period, tx.clone()));
    let _input = spawn_input_thread(keys, tx)?;

    let mut renderer = TerminalRenderer::new();
    renderer.enter()?;
    let result = run_loop(&mut game, &mut rx, &view, &mut renderer).await;

    // Always try to restore terminal state.
    let _ = renderer.exit();
    ticker.abort();
    // Closing the receiver lets the input thread notice and exit.
    drop(rx);
    result
}
