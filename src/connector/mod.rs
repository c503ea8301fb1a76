//! Connector: owns the active surface, routes input and runs the frame loop.
//!
//! The loop is cooperative and single-threaded. Each iteration runs the
//! sketch's frame callback, waits for the delay it returned, waits for the
//! next refresh tick and starts over. There is no way to stop it once started.

mod scheduler;
#[cfg(test)]
mod tests;

pub use scheduler::{FrameScheduler, LoopPhase, RefreshClock, delay_from_seconds};

use crate::config::Config;
use crate::host::Host;
use crate::ids::{IdSource, UuidSource};
use crate::input::{EventOutcome, InputEvent};
use crate::surface::{Surface, SurfaceHandle};
use anyhow::{Context, Result};
use calloop::channel::{self, Channel, Sender};
use calloop::timer::{TimeoutAction, Timer};
use calloop::{EventLoop, LoopHandle, RegistrationToken};
use log::{debug, info};
use std::rc::Rc;
use std::time::{Duration, Instant};

/// User logic driven by the connector.
///
/// Both callbacks are optional: the defaults do nothing.
pub trait Sketch {
    /// Runs one frame. Returns the delay in seconds before the next one
    /// (`None` for no delay).
    fn run(&mut self) -> Option<f64> {
        None
    }

    /// Reacts to a key press. Returning `Some(true)` suppresses the platform's
    /// default handling of the key; anything else lets it proceed.
    fn key_listener(&mut self, _key: &str) -> Option<bool> {
        None
    }
}

impl Sketch for () {}

/// An absent sketch does nothing.
impl<S: Sketch> Sketch for Option<S> {
    fn run(&mut self) -> Option<f64> {
        self.as_mut().and_then(|sketch| sketch.run())
    }

    fn key_listener(&mut self, key: &str) -> Option<bool> {
        self.as_mut().and_then(|sketch| sketch.key_listener(key))
    }
}

/// Adapts a frame closure into a [`Sketch`] without a key listener.
pub struct FnSketch<F>(pub F);

impl<F> Sketch for FnSketch<F>
where
    F: FnMut() -> Option<f64>,
{
    fn run(&mut self) -> Option<f64> {
        (self.0)()
    }
}

/// Creates a connector with default configuration and UUID ids.
///
/// `factory` is called once with the new connector (shapes can be created on
/// it) and returns the sketch the loop will drive.
pub fn connect<S, F>(factory: F, host: impl Host + 'static) -> Result<Connector>
where
    S: Sketch + 'static,
    F: FnOnce(&mut Connector) -> S,
{
    connect_with(factory, host, Config::default(), Rc::new(UuidSource))
}

/// Creates a connector with explicit configuration and id source.
pub fn connect_with<S, F>(
    factory: F,
    host: impl Host + 'static,
    config: Config,
    ids: Rc<dyn IdSource>,
) -> Result<Connector>
where
    S: Sketch + 'static,
    F: FnOnce(&mut Connector) -> S,
{
    let mut host: Box<dyn Host> = Box::new(host);
    let surface = build_surface(host.as_mut(), &config, &ids)?;
    host.attach(surface.borrow().id());

    let clock = RefreshClock::new(config.scheduler.refresh_rate_hz);
    let (input_tx, input_rx) = channel::channel();
    let mut connector = Connector {
        host,
        surface,
        ids,
        config,
        sketch: Box::new(()),
        scheduler: FrameScheduler::new(),
        clock,
        input_tx,
        input_rx: Some(input_rx),
    };
    let sketch = factory(&mut connector);
    connector.sketch = Box::new(sketch);
    Ok(connector)
}

fn build_surface(
    host: &mut dyn Host,
    config: &Config,
    ids: &Rc<dyn IdSource>,
) -> Result<SurfaceHandle> {
    let id = ids.next_id();
    let (vw, vh) = host.viewport_size();
    let width = config.surface.width.unwrap_or(vw);
    let height = config.surface.height.unwrap_or(vh);
    let renderer = host
        .create_renderer(&id, width, height)
        .with_context(|| format!("Failed to create renderer for surface '{}'", id))?;
    debug!("Created surface '{}'", id);
    Ok(SurfaceHandle::new(Surface::new(
        id,
        renderer,
        Rc::clone(ids),
        config,
        (vw, vh),
    )))
}

/// Owner of the active surface and the frame loop.
pub struct Connector {
    host: Box<dyn Host>,
    surface: SurfaceHandle,
    ids: Rc<dyn IdSource>,
    config: Config,
    sketch: Box<dyn Sketch>,
    scheduler: FrameScheduler,
    clock: RefreshClock,
    input_tx: Sender<InputEvent>,
    input_rx: Option<Channel<InputEvent>>,
}

impl Connector {
    /// Handle to the active surface.
    pub fn surface(&self) -> SurfaceHandle {
        self.surface.clone()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn scheduler(&self) -> &FrameScheduler {
        &self.scheduler
    }

    /// Sender feeding platform events into the scheduled loop.
    ///
    /// Events sent here are routed through [`handle_event`](Self::handle_event)
    /// once the loop dispatches. The outcome is only logged; backends that need
    /// [`EventOutcome`] call `handle_event` directly.
    pub fn input_sender(&self) -> Sender<InputEvent> {
        self.input_tx.clone()
    }

    /// Builds a new surface on the same host. It is not attached until passed
    /// to [`set_surface`](Self::set_surface).
    pub fn create_surface(&mut self) -> Result<SurfaceHandle> {
        build_surface(self.host.as_mut(), &self.config, &self.ids)
    }

    /// Replaces the active surface: detaches the old one from the host,
    /// attaches the new one and returns the old handle.
    ///
    /// Shapes keep drawing into the surface they were created on.
    pub fn set_surface(&mut self, surface: SurfaceHandle) -> SurfaceHandle {
        let old_id = self.surface.borrow().id().to_string();
        let new_id = surface.borrow().id().to_string();
        self.host.detach(&old_id);
        self.host.attach(&new_id);
        info!("Replaced surface '{}' with '{}'", old_id, new_id);
        std::mem::replace(&mut self.surface, surface)
    }

    /// Routes a platform event. Pointer state is last-write-wins.
    pub fn handle_event(&mut self, event: InputEvent) -> EventOutcome {
        match event {
            InputEvent::PointerMove { x, y } => {
                self.surface.borrow_mut().set_pointer(x, y);
            }
            InputEvent::PointerDown { x, y } => {
                let mut surface = self.surface.borrow_mut();
                surface.set_pointer(x, y);
                surface.set_pointer_down(true);
            }
            InputEvent::PointerUp { x, y } => {
                let mut surface = self.surface.borrow_mut();
                surface.set_pointer(x, y);
                surface.set_pointer_down(false);
            }
            InputEvent::KeyDown { key } => {
                if self.sketch.key_listener(&key) == Some(true) {
                    debug!("Key '{}' default handling prevented", key);
                    return EventOutcome::DefaultPrevented;
                }
            }
            InputEvent::Resize { width, height } => {
                self.surface.borrow_mut().on_viewport_resize(width, height);
            }
        }
        EventOutcome::Default
    }

    /// Runs the frame callback once and enters the timed wait.
    ///
    /// Returns the delay before the refresh-aligned phase.
    pub fn run_frame(&mut self) -> Duration {
        let returned = self.sketch.run();
        let delay = self.scheduler.frame_completed(returned);
        debug!(
            "Frame {} done, next in {:?}",
            self.scheduler.frames(),
            delay
        );
        delay
    }

    /// Ends the timed wait; returns the refresh tick to wait for.
    pub fn timer_elapsed(&mut self, now: Instant) -> Option<Instant> {
        self.scheduler
            .timer_elapsed()
            .then(|| self.clock.next_tick_after(now))
    }

    /// Ends the refresh wait by running the next frame; returns its delay.
    pub fn refresh_fired(&mut self) -> Option<Duration> {
        if self.scheduler.refresh_fired() {
            Some(self.run_frame())
        } else {
            None
        }
    }

    fn on_timer(&mut self, now: Instant) -> TimeoutAction {
        match self.scheduler.phase() {
            LoopPhase::TimedWait { .. } => match self.timer_elapsed(now) {
                Some(tick) => TimeoutAction::ToInstant(tick),
                None => TimeoutAction::Drop,
            },
            LoopPhase::AwaitingRefresh => match self.refresh_fired() {
                Some(delay) => TimeoutAction::ToDuration(delay),
                None => TimeoutAction::Drop,
            },
            LoopPhase::Idle => TimeoutAction::Drop,
        }
    }

    /// Installs input delivery and the frame loop on `handle`, then runs the
    /// first frame.
    ///
    /// A single timer source alternates between the timed wait and the
    /// refresh-aligned trigger. Events from [`input_sender`](Self::input_sender)
    /// are routed by a channel source on the same loop.
    ///
    /// # Errors
    /// Fails if the connector was already scheduled or a source cannot be
    /// inserted.
    pub fn schedule<'l>(&mut self, handle: &LoopHandle<'l, Connector>) -> Result<RegistrationToken> {
        if self.scheduler.in_flight() {
            return Err(anyhow::anyhow!("Frame loop is already scheduled"));
        }
        let input = self
            .input_rx
            .take()
            .context("Input channel already installed on an event loop")?;
        handle
            .insert_source(input, |event, _, connector| {
                if let channel::Event::Msg(event) = event {
                    let outcome = connector.handle_event(event);
                    debug!("Queued input handled: {:?}", outcome);
                }
            })
            .map_err(|e| anyhow::anyhow!("Failed to install input channel: {}", e.error))?;

        let delay = self.run_frame();
        handle
            .insert_source(Timer::from_duration(delay), |_deadline, _, connector| {
                connector.on_timer(Instant::now())
            })
            .map_err(|e| anyhow::anyhow!("Failed to install frame timer: {}", e.error))
    }

    /// Runs the frame loop on a private event loop. Never returns unless the
    /// event loop fails.
    ///
    /// Take an [`input_sender`](Self::input_sender) first to feed events in.
    pub fn run(mut self) -> Result<()> {
        let mut event_loop: EventLoop<Connector> =
            EventLoop::try_new().context("Failed to create event loop")?;
        self.schedule(&event_loop.handle())?;
        info!("Frame loop started");
        event_loop
            .run(None, &mut self, |_| {})
            .context("Frame loop failed")?;
        Ok(())
    }
}
