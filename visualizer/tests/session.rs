//! Whole-app runs with a scripted driver instead of a terminal.

use std::collections::VecDeque;
use std::sync::mpsc::Sender;
use std::time::Duration;

use pathviz::{Visualizer, VizConfig};
use pathviz_core::{
    App, AppConfig, Context, Driver, Key, MouseAction, Msg, Point,
    grid::Frame,
};
use pathviz_search::Status;

struct ScriptedDriver {
    batches: VecDeque<Vec<Msg>>,
    frames: usize,
}

impl ScriptedDriver {
    fn new(batches: Vec<Vec<Msg>>) -> Self {
        Self {
            batches: batches.into(),
            frames: 0,
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
        std::thread::sleep(timeout);
        let batch = self.batches.pop_front().unwrap_or_else(|| vec![Msg::Quit]);
        for msg in batch {
            tx.send(msg)?;
        }
        Ok(())
    }

    fn flush(&mut self, _frame: Frame) -> Result<(), Box<dyn std::error::Error>> {
        self.frames += 1;
        Ok(())
    }

    fn close(&mut self) {}
}

fn run(config: VizConfig, mut script: Vec<Vec<Msg>>, idle_polls: usize) -> App<Visualizer, ScriptedDriver> {
    script.extend(std::iter::repeat_with(Vec::new).take(idle_polls));
    let model = Visualizer::new(&config).unwrap();
    let screen = model.screen_size();
    let mut app = App::new(AppConfig {
        model,
        driver: ScriptedDriver::new(script),
        width: screen.x,
        height: screen.y,
        tick: Some(Duration::from_millis(1)),
    });
    app.run().unwrap();
    app
}

#[test]
fn search_animates_to_success() {
    let config = VizConfig {
        size: 6,
        target: Point::new(5, 5),
        ..VizConfig::default()
    };
    let app = run(config, vec![vec![Msg::key(Key::Space)]], 40);
    let model = app.model();
    assert_eq!(model.engine().status(), Status::Succeeded);
    assert_eq!(model.engine().path_len(), 5);
    assert!(app.driver().frames > 1);
}

#[test]
fn walled_target_fails() {
    let config = VizConfig {
        size: 4,
        target: Point::new(3, 3),
        ..VizConfig::default()
    };
    let probe = Visualizer::new(&config).unwrap();
    let layout = *probe.layout();
    // Wall the three cells around the target in one stroke.
    let stroke = vec![
        Msg::mouse(MouseAction::Main, layout.to_screen(Point::new(2, 3))),
        Msg::mouse(MouseAction::Move, layout.to_screen(Point::new(2, 2))),
        Msg::mouse(MouseAction::Move, layout.to_screen(Point::new(3, 2))),
        Msg::mouse(MouseAction::Release, layout.to_screen(Point::new(3, 2))),
        Msg::key(Key::Enter),
    ];
    let app = run(config, vec![stroke], 40);
    let model = app.model();
    assert_eq!(model.board().walls(), 3);
    assert_eq!(model.engine().status(), Status::Failed);
    assert_eq!(model.engine().expansions(), 12);
    assert_eq!(model.engine().path_len(), 0);
}
