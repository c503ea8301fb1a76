//! Bounces a ball around an offscreen Cairo surface and labels its position.
//!
//! Run with `RUST_LOG=debug cargo run --example bounce` to watch the frame loop.
//! Press Enter to pause or resume; any other line is sent as a key press.

use anyhow::Result;
use playit::{
    CairoHost, Circle, Config, Connector, DrawOptions, InputEvent, Label, Movable, Sketch,
    UuidSource, connect_with,
};
use std::io::BufRead;
use std::rc::Rc;
use std::thread;

const RADIUS: f64 = 12.0;
const SPEED: f64 = 4.0;

struct Bounce {
    ball: Circle,
    label: Label,
    dx: f64,
    dy: f64,
    width: f64,
    height: f64,
    paused: bool,
}

impl Bounce {
    fn new(connector: &mut Connector) -> Result<Self> {
        let (width, height) = {
            let surface = connector.surface();
            let surface = surface.borrow();
            (f64::from(surface.width()), f64::from(surface.height()))
        };
        let ball = Circle::new(
            connector,
            width / 2.0,
            height / 2.0,
            RADIUS,
            DrawOptions::new().fill_color("orange").border_color("black"),
        )?;
        let label = Label::new(
            connector,
            "",
            10.0,
            30.0,
            DrawOptions::new().font("16px Sans").fill_color("gray"),
        )?;
        Ok(Self {
            ball,
            label,
            dx: SPEED,
            dy: SPEED,
            width,
            height,
            paused: false,
        })
    }

    fn step(&mut self) -> Result<()> {
        let p = self.ball.position();
        if p.x + self.dx > self.width - RADIUS || p.x + self.dx < RADIUS {
            self.dx = -self.dx;
        }
        if p.y + self.dy > self.height - RADIUS || p.y + self.dy < RADIUS {
            self.dy = -self.dy;
        }

        match (self.dx > 0.0, self.dy > 0.0) {
            (true, true) => self.ball.southeast(SPEED)?,
            (true, false) => self.ball.northeast(SPEED)?,
            (false, true) => self.ball.southwest(SPEED)?,
            (false, false) => self.ball.northwest(SPEED)?,
        }

        let p = self.ball.position();
        self.label
            .update(&DrawOptions::new().text(format!("({:.0}, {:.0})", p.x, p.y)))?;
        Ok(())
    }
}

impl Sketch for Bounce {
    fn run(&mut self) -> Option<f64> {
        if !self.paused {
            if let Err(e) = self.step() {
                log::error!("Frame failed: {}", e);
            }
        }
        Some(1.0 / 30.0)
    }

    fn key_listener(&mut self, key: &str) -> Option<bool> {
        if key == " " {
            self.paused = !self.paused;
            log::info!("Paused: {}", self.paused);
            return Some(true);
        }
        None
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let config = Config::load()?;
    let host = CairoHost::new(640, 480);
    let mut setup_error = None;
    let connector = connect_with(
        |connector| match Bounce::new(connector) {
            Ok(bounce) => Some(bounce),
            Err(e) => {
                setup_error = Some(e);
                None
            }
        },
        host,
        config,
        Rc::new(UuidSource),
    )?;
    if let Some(e) = setup_error {
        return Err(e);
    }

    let input = connector.input_sender();
    thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            let key = if line.is_empty() { " ".to_string() } else { line };
            if input.send(InputEvent::KeyDown { key }).is_err() {
                break;
            }
        }
    });

    connector.run()
}
