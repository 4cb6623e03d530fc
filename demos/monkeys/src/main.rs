//! Two monkeys taking turns throwing bananas at each other, headless

use std::cell::RefCell;
use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;

use clap::Parser;
use log::{debug, error, info};
use stagecraft_actors::{Banana, Monkey, Speech};
use stagecraft_core::{
    logging, ActorId, ActorView, Delay, Frame, Property, Renderer, Result, Stage, StageConfig,
    Value,
};
use stagecraft_tween::{interpolate, Easing};

/// Seconds between two throws
const TURN_SECONDS: f64 = 2.0;

/// Headless monkey duel
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Stage configuration in RON
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of frames to run
    #[arg(short, long, default_value_t = 600)]
    frames: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Whose turn it is and how many throws happened
struct Duel {
    monkeys: [ActorId; 2],
    turn: usize,
    throws: u32,
}

impl Duel {
    fn shooter(&self) -> ActorId {
        self.monkeys[self.turn]
    }

    fn next_turn(&mut self) -> ActorId {
        self.turn = (self.turn + 1) % self.monkeys.len();
        self.shooter()
    }
}

/// Logs what would be drawn instead of drawing it
#[derive(Default)]
struct LogRenderer {
    frame: Frame,
    drawn: usize,
}

impl Renderer for LogRenderer {
    fn begin_frame(&mut self, frame: Frame) {
        self.frame = frame;
    }

    fn draw(&mut self, actor: ActorView<'_>) {
        self.drawn += 1;
        let (x, y) = actor.position();
        debug!(
            "frame {}: {} {} at ({:.1}, {:.1}) rot {:.0} scale {:.2}",
            self.frame,
            actor.id(),
            actor.image().unwrap_or("-"),
            x,
            y,
            actor.rotation(),
            actor.scale().0
        );
    }
}

fn spawn_monkey(stage: &mut Stage, x: f64, y: f64) -> Result<ActorId> {
    let monkey = stage.spawn(Monkey::builder().at(x, y))?;
    stage.set(
        monkey,
        Property::Scale,
        interpolate(0.0, 0.4, 0.5).with_easing(Easing::QuadOut),
    )?;
    stage.compose::<Speech>(monkey, &[Value::from(1.5)])?;
    Ok(monkey)
}

/// Throw a banana from the current monkey and hand the turn over
fn throw(stage: &mut Stage, duel: Rc<RefCell<Duel>>) -> Result<()> {
    let (shooter, target, angle, force) = {
        let mut duel = duel.borrow_mut();
        duel.throws += 1;
        let shooter = duel.shooter();
        let angle = if duel.turn == 0 { 60.0 } else { 120.0 };
        let force = 3.0 + f64::from(duel.throws % 3);
        let target = duel.next_turn();
        (shooter, target, angle, force)
    };

    let x = stage.get(shooter, Property::X)?;
    let y = stage.get(shooter, Property::Y)?;
    let banana = stage.spawn(Banana::builder(x, y))?;
    stage.invoke(banana, "launch", &[Value::from(angle), Value::from(force)])?;
    stage.invoke(shooter, "shout", &[])?;
    info!(
        "{} throws {} at {} degrees with force {}",
        shooter, banana, angle, force
    );

    stage.invoke(target, "say", &[Value::from("Es mi turno!")])?;
    stage.after(Delay::seconds(TURN_SECONDS), move |stage| throw(stage, duel));
    Ok(())
}

/// Kill bananas that left the display
fn sweep_bananas(stage: &mut Stage) -> Result<usize> {
    let (width, height) = (stage.config().width as f64, stage.config().height as f64);
    let gone: Vec<ActorId> = stage
        .live_actors()
        .filter(|actor| actor.has_capability::<Banana>())
        .filter(|actor| {
            let (x, y) = actor.sprite().position();
            !(0.0..=width).contains(&x) || !(0.0..=height).contains(&y)
        })
        .map(|actor| actor.id())
        .collect();

    for &id in &gone {
        stage.kill(id)?;
        debug!("{} left the display", id);
    }
    Ok(gone.len())
}

fn run(args: Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => StageConfig::load(path)?,
        None => StageConfig::default(),
    };
    let mut stage = Stage::new(config);

    let (cx, cy) = stage.config().origin();
    let monkeys = [
        spawn_monkey(&mut stage, cx - 200.0, cy)?,
        spawn_monkey(&mut stage, cx + 200.0, cy)?,
    ];
    let duel = Rc::new(RefCell::new(Duel {
        monkeys,
        turn: 0,
        throws: 0,
    }));

    stage.invoke(monkeys[0], "say", &[Value::from("Es mi turno!")])?;
    stage.invoke(monkeys[1], "smile", &[])?;
    let first = duel.clone();
    stage.after(Delay::seconds(TURN_SECONDS), move |stage| throw(stage, first));

    let mut renderer = LogRenderer::default();
    let mut failures = 0;
    let mut swept = 0;
    for _ in 0..args.frames {
        let report = stage.tick();
        for failure in &report.failures {
            error!("frame {}: {:?} {}", report.frame, failure.actor, failure.error);
        }
        failures += report.failures.len();
        swept += sweep_bananas(&mut stage)?;
        stage.render(&mut renderer);
    }

    info!(
        "{} frames, {} throws, {} bananas out of bounds, {} draws, {} failures",
        args.frames,
        duel.borrow().throws,
        swept,
        renderer.drawn,
        failures
    );
    stage.shutdown();
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn duel(stage: &mut Stage) -> Rc<RefCell<Duel>> {
        let monkeys = [
            spawn_monkey(stage, 100.0, 240.0).unwrap(),
            spawn_monkey(stage, 540.0, 240.0).unwrap(),
        ];
        Rc::new(RefCell::new(Duel {
            monkeys,
            turn: 0,
            throws: 0,
        }))
    }

    #[test]
    fn test_throw_hands_turn_over() {
        let mut stage = Stage::new(StageConfig::default());
        let duel = duel(&mut stage);

        throw(&mut stage, duel.clone()).unwrap();
        assert_eq!(duel.borrow().turn, 1);
        assert_eq!(duel.borrow().throws, 1);

        // two monkeys, one banana, one speech bubble
        assert_eq!(stage.live_actors().count(), 4);
        assert_eq!(
            stage
                .live_actors()
                .filter(|a| a.has_capability::<Banana>())
                .count(),
            1
        );
    }

    #[test]
    fn test_sweep_kills_only_escaped_bananas() {
        let mut stage = Stage::new(StageConfig::default());
        let inside = stage.spawn(Banana::builder(10.0, 10.0)).unwrap();
        let outside = stage.spawn(Banana::builder(-5.0, 10.0)).unwrap();
        let monkey = stage.spawn(Monkey::builder().at(-100.0, -100.0)).unwrap();

        assert_eq!(sweep_bananas(&mut stage).unwrap(), 1);
        assert!(stage.is_live(inside));
        assert!(!stage.is_live(outside));
        assert!(stage.is_live(monkey));
    }
}
