//! The Model-View-Update application loop: [`Model`], [`Driver`], [`Effect`],
//! [`App`].
//!
//! The loop owns the animation clock. When [`AppConfig::tick`] is set, a
//! [`Msg::Tick`] is delivered at that rate, which is what paces anything the
//! model wants to advance one step per frame.

use std::cell::Cell;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

use crate::grid::{Frame, Grid, compute_frame};
use crate::messages::Msg;

/// Longest time a single driver poll may block when no tick is due.
const IDLE_POLL: Duration = Duration::from_millis(50);

// ---------------------------------------------------------------------------
// Context (cancellation token)
// ---------------------------------------------------------------------------

/// Quit flag for one run of the loop. The loop and the driver share it by
/// reference on the same thread.
#[derive(Debug, Default)]
pub struct Context {
    done: Cell<bool>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.done.get()
    }

    #[inline]
    pub fn cancel(&self) {
        self.done.set(true);
    }
}

// ---------------------------------------------------------------------------
// Effect / Model / Driver
// ---------------------------------------------------------------------------

/// A side-effect returned by [`Model::update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Stop the application loop.
    End,
}

/// The application model.
pub trait Model {
    /// Process a message, optionally returning a side-effect.
    fn update(&mut self, msg: Msg) -> Option<Effect>;

    /// Render the current state into `grid`.
    fn draw(&self, grid: &mut Grid);
}

/// Back-end driver (e.g. a terminal).
pub trait Driver {
    /// Initialise the back-end.
    fn init(&mut self) -> Result<(), Box<dyn std::error::Error>>;

    /// Wait at most `timeout` for input and send every available message
    /// through `tx`. Must return promptly once `ctx.is_done()`.
    fn poll_msgs(
        &mut self,
        ctx: &Context,
        tx: &Sender<Msg>,
        timeout: Duration,
    ) -> Result<(), Box<dyn std::error::Error>>;

    /// Flush a computed frame to the screen.
    fn flush(&mut self, frame: Frame) -> Result<(), Box<dyn std::error::Error>>;

    /// Restore the back-end. Called exactly once, also on error paths.
    fn close(&mut self);
}

// ---------------------------------------------------------------------------
// AppConfig / App
// ---------------------------------------------------------------------------

/// Configuration for creating an [`App`].
pub struct AppConfig<M: Model, D: Driver> {
    pub model: M,
    pub driver: D,
    pub width: i32,
    pub height: i32,
    /// Interval between [`Msg::Tick`] messages; `None` disables ticking.
    pub tick: Option<Duration>,
}

/// The main application runner.
pub struct App<M: Model, D: Driver> {
    model: M,
    driver: D,
    width: i32,
    height: i32,
    tick: Option<Duration>,
}

impl<M: Model, D: Driver> App<M, D> {
    pub fn new(config: AppConfig<M, D>) -> Self {
        Self {
            model: config.model,
            driver: config.driver,
            width: config.width,
            height: config.height,
            tick: config.tick,
        }
    }

    /// The model, e.g. to inspect its final state after [`run`](Self::run).
    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Run the loop until the model returns [`Effect::End`].
    ///
    /// Each iteration drains queued messages through the model, redraws and
    /// flushes the diff if anything was processed, then polls the driver
    /// until the next tick is due.
    pub fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.driver.init()?;
        let result = self.event_loop();
        self.driver.close();
        result
    }

    fn event_loop(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        let ctx = Context::new();
        let (tx, rx): (Sender<Msg>, Receiver<Msg>) = mpsc::channel();
        tx.send(Msg::Init).ok();

        let mut prev_grid = Grid::new(0, 0);
        let mut next_tick = self.tick.map(|d| Instant::now() + d);

        loop {
            self.process_pending(&rx, &ctx, &mut prev_grid)?;
            if ctx.is_done() {
                return Ok(());
            }

            let timeout = match next_tick {
                Some(t) => t.saturating_duration_since(Instant::now()).min(IDLE_POLL),
                None => IDLE_POLL,
            };
            self.driver.poll_msgs(&ctx, &tx, timeout)?;

            if let (Some(due), Some(interval)) = (next_tick, self.tick) {
                let now = Instant::now();
                if now >= due {
                    tx.send(Msg::tick()).ok();
                    next_tick = Some(now + interval);
                }
            }
        }
    }

    /// Drain queued messages, update the model, draw, diff, and flush.
    fn process_pending(
        &mut self,
        rx: &Receiver<Msg>,
        ctx: &Context,
        prev_grid: &mut Grid,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut needs_draw = false;

        while let Ok(msg) = rx.try_recv() {
            if let Msg::Screen { .. } = msg {
                // Force a full repaint after the terminal was cleared.
                *prev_grid = Grid::new(0, 0);
            }
            needs_draw = true;
            if let Some(Effect::End) = self.model.update(msg) {
                ctx.cancel();
                return Ok(());
            }
        }

        if needs_draw {
            let mut curr_grid = Grid::new(self.width, self.height);
            self.model.draw(&mut curr_grid);
            let frame = compute_frame(prev_grid, &curr_grid);
            if !frame.cells.is_empty() {
                self.driver.flush(frame)?;
            }
            *prev_grid = curr_grid;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Cell;
    use crate::geom::Point;
    use crate::messages::Key;
    use std::collections::VecDeque;

    /// Replays scripted message batches, one batch per poll, then asks to
    /// quit.
    struct ScriptedDriver {
        batches: VecDeque<Vec<Msg>>,
        frames: Vec<Frame>,
        closed: bool,
        polls: usize,
    }

    impl ScriptedDriver {
        fn new(batches: Vec<Vec<Msg>>) -> Self {
            Self {
                batches: batches.into(),
                frames: Vec::new(),
                closed: false,
                polls: 0,
            }
        }
    }

    impl Driver for ScriptedDriver {
        fn init(&mut self) -> Result<(), Box<dyn std::error::Error>> {
            Ok(())
        }

        fn poll_msgs(
            &mut self,
            _ctx: &Context,
            tx: &Sender<Msg>,
            timeout: Duration,
        ) -> Result<(), Box<dyn std::error::Error>> {
            self.polls += 1;
            std::thread::sleep(timeout);
            let batch = self.batches.pop_front().unwrap_or_else(|| vec![Msg::Quit]);
            for msg in batch {
                tx.send(msg)?;
            }
            Ok(())
        }

        fn flush(&mut self, frame: Frame) -> Result<(), Box<dyn std::error::Error>> {
            self.frames.push(frame);
            Ok(())
        }

        fn close(&mut self) {
            self.closed = true;
        }
    }

    #[derive(Default)]
    struct Counter {
        inits: usize,
        keys: usize,
        ticks: usize,
    }

    impl Model for Counter {
        fn update(&mut self, msg: Msg) -> Option<Effect> {
            match msg {
                Msg::Init => self.inits += 1,
                Msg::KeyDown { .. } => self.keys += 1,
                Msg::Tick { .. } => self.ticks += 1,
                Msg::Quit => return Some(Effect::End),
                _ => {}
            }
            None
        }

        fn draw(&self, grid: &mut Grid) {
            let ch = char::from_digit((self.keys % 10) as u32, 10).unwrap_or('?');
            grid.set(Point::new(0, 0), Cell::default().with_char(ch));
        }
    }

    fn app(batches: Vec<Vec<Msg>>, tick: Option<Duration>) -> App<Counter, ScriptedDriver> {
        App::new(AppConfig {
            model: Counter::default(),
            driver: ScriptedDriver::new(batches),
            width: 2,
            height: 1,
            tick,
        })
    }

    #[test]
    fn run_processes_messages_until_quit() {
        let mut app = app(vec![vec![Msg::key(Key::Space), Msg::key(Key::Enter)]], None);
        app.run().unwrap();
        assert_eq!(app.model().inits, 1);
        assert_eq!(app.model().keys, 2);
        assert_eq!(app.model().ticks, 0);
        assert!(app.driver().closed);
    }

    #[test]
    fn only_changed_cells_are_flushed() {
        let mut app = app(vec![vec![Msg::key(Key::Space)], vec![Msg::Init]], None);
        app.run().unwrap();
        let frames = &app.driver().frames;
        // Init draws '0', the key draws '1', the second Init draws nothing new.
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].cells.len(), 2);
        assert_eq!(frames[1].cells.len(), 1);
        assert_eq!(frames[1].cells[0].cell.ch, '1');
    }

    #[test]
    fn ticks_are_delivered_at_the_configured_rate() {
        let batches = vec![Vec::new(); 5];
        let mut app = app(batches, Some(Duration::from_millis(1)));
        app.run().unwrap();
        assert!(app.model().ticks >= 1);
        assert!(app.model().ticks <= app.driver().polls);
    }

    #[test]
    fn context_cancel_is_seen_through_shared_refs() {
        let ctx = Context::new();
        let seen_by_driver = &ctx;
        assert!(!seen_by_driver.is_done());
        ctx.cancel();
        assert!(seen_by_driver.is_done());
    }
}
