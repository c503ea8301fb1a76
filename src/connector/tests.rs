use super::*;
use crate::draw::{DrawOptions, Point, RenderLog};
use crate::host::{HostEvent, RecordingHost};
use crate::ids::SequentialIds;
use crate::shape::{Circle, Movable};
use std::cell::{Cell, RefCell};

struct Counter {
    frames: Rc<Cell<u32>>,
    delay: Option<f64>,
    keys: Rc<RefCell<Vec<String>>>,
}

impl Sketch for Counter {
    fn run(&mut self) -> Option<f64> {
        self.frames.set(self.frames.get() + 1);
        self.delay
    }

    fn key_listener(&mut self, key: &str) -> Option<bool> {
        self.keys.borrow_mut().push(key.to_string());
        match key {
            "a" => Some(true),
            "b" => Some(false),
            _ => None,
        }
    }
}

fn connect_recording<S, F>(factory: F, config: Config) -> (Connector, RecordingHost)
where
    S: Sketch + 'static,
    F: FnOnce(&mut Connector) -> S,
{
    let host = RecordingHost::new(640, 480);
    let connector =
        connect_with(factory, host.clone(), config, Rc::new(SequentialIds::new("c"))).unwrap();
    (connector, host)
}

fn counter(delay: Option<f64>) -> (Rc<Cell<u32>>, impl FnOnce(&mut Connector) -> Counter) {
    let frames = Rc::new(Cell::new(0));
    let shared = Rc::clone(&frames);
    (frames, move |_: &mut Connector| Counter {
        frames: shared,
        delay,
        keys: Rc::default(),
    })
}

fn key_counter() -> (Rc<RefCell<Vec<String>>>, impl FnOnce(&mut Connector) -> Counter) {
    let keys: Rc<RefCell<Vec<String>>> = Rc::default();
    let shared = Rc::clone(&keys);
    (keys, move |_: &mut Connector| Counter {
        frames: Rc::default(),
        delay: Some(0.001),
        keys: shared,
    })
}

#[test]
fn connect_attaches_first_surface() {
    let (connector, host) = connect_recording(|_| (), Config::default());
    let surface = connector.surface();
    assert_eq!(surface.borrow().id(), "c-1");
    assert_eq!((surface.borrow().width(), surface.borrow().height()), (640, 480));
    assert_eq!(host.events(), vec![HostEvent::Attached("c-1".to_string())]);
    assert_eq!(connector.scheduler().phase(), LoopPhase::Idle);
}

#[test]
fn key_listener_controls_default_handling() {
    let (_frames, factory) = counter(None);
    let (mut connector, _host) = connect_recording(factory, Config::default());

    let pressed = |key: &str| InputEvent::KeyDown {
        key: key.to_string(),
    };
    assert_eq!(
        connector.handle_event(pressed("a")),
        EventOutcome::DefaultPrevented
    );
    assert_eq!(connector.handle_event(pressed("b")), EventOutcome::Default);
    assert_eq!(connector.handle_event(pressed("c")), EventOutcome::Default);
}

#[test]
fn explicit_false_from_listener_keeps_default() {
    let (keys, factory) = key_counter();
    let (mut connector, _host) = connect_recording(factory, Config::default());

    let outcome = connector.handle_event(InputEvent::KeyDown {
        key: "b".to_string(),
    });

    assert_eq!(outcome, EventOutcome::Default);
    assert_eq!(*keys.borrow(), vec!["b".to_string()]);
}

#[test]
fn sketch_without_listener_never_prevents() {
    let (mut connector, _host) = connect_recording(|_| (), Config::default());
    let outcome = connector.handle_event(InputEvent::KeyDown {
        key: "Enter".to_string(),
    });
    assert_eq!(outcome, EventOutcome::Default);
}

#[test]
fn pointer_state_is_last_write_wins() {
    let (mut connector, _host) = connect_recording(|_| (), Config::default());
    let surface = connector.surface();
    assert_eq!(surface.borrow().pointer(), None);

    connector.handle_event(InputEvent::PointerMove { x: 1.0, y: 2.0 });
    connector.handle_event(InputEvent::PointerMove { x: 3.0, y: 4.0 });
    assert_eq!(surface.borrow().pointer(), Some(Point::new(3.0, 4.0)));
    assert!(!surface.borrow().is_pointer_down());

    connector.handle_event(InputEvent::PointerDown { x: 5.0, y: 6.0 });
    assert!(surface.borrow().is_pointer_down());
    assert_eq!(surface.borrow().pointer(), Some(Point::new(5.0, 6.0)));

    connector.handle_event(InputEvent::PointerUp { x: 7.0, y: 8.0 });
    assert!(!surface.borrow().is_pointer_down());
    assert_eq!(surface.borrow().pointer(), Some(Point::new(7.0, 8.0)));
}

#[test]
fn resize_events_reach_the_surface() {
    let (mut connector, _host) = connect_recording(|_| (), Config::default());
    let outcome = connector.handle_event(InputEvent::Resize {
        width: 1024,
        height: 768,
    });
    assert_eq!(outcome, EventOutcome::Default);
    let surface = connector.surface();
    assert_eq!((surface.borrow().width(), surface.borrow().height()), (1024, 768));
}

#[test]
fn half_second_frame_waits_500ms() {
    let (frames, factory) = counter(Some(0.5));
    let (mut connector, _host) = connect_recording(factory, Config::default());

    let delay = connector.run_frame();

    assert_eq!(delay, Duration::from_millis(500));
    assert_eq!(frames.get(), 1);
    assert_eq!(
        connector.scheduler().phase(),
        LoopPhase::TimedWait {
            delay: Duration::from_millis(500)
        }
    );
}

#[test]
fn frame_cycle_runs_timer_then_refresh() {
    let (frames, factory) = counter(None);
    let (mut connector, _host) = connect_recording(factory, Config::default());

    // Nothing to do before the first frame
    assert_eq!(connector.refresh_fired(), None);
    assert_eq!(connector.timer_elapsed(Instant::now()), None);

    assert_eq!(connector.run_frame(), Duration::ZERO);
    // The refresh phase cannot start before the timed wait ends
    assert_eq!(connector.refresh_fired(), None);
    assert_eq!(frames.get(), 1);

    let now = Instant::now();
    let tick = connector.timer_elapsed(now).unwrap();
    assert!(tick > now);
    assert!(tick - now <= connector.clock.interval());
    assert_eq!(connector.scheduler().phase(), LoopPhase::AwaitingRefresh);

    assert_eq!(connector.refresh_fired(), Some(Duration::ZERO));
    assert_eq!(frames.get(), 2);
    assert_eq!(connector.scheduler().frames(), 2);
}

#[test]
fn frame_closure_drives_shapes() {
    let host = RecordingHost::new(200, 200);
    let mut connector = connect_with(
        |connector| {
            let mut circle =
                Circle::new(connector, 10.0, 10.0, 5.0, DrawOptions::new().fill_color("red"))
                    .unwrap();
            FnSketch(move || {
                circle.right(None).unwrap();
                Some(0.01)
            })
        },
        host.clone(),
        Config::default(),
        Rc::new(SequentialIds::new("c")),
    )
    .unwrap();
    let log: RenderLog = host.log("c-1").unwrap();
    assert_eq!(connector.surface().borrow().registry().ids(), vec!["c-2"]);

    log.take();
    connector.run_frame();
    connector.run_frame();

    assert_eq!(log.clear_count(), 2);
    let surface = connector.surface();
    let surface = surface.borrow();
    assert_eq!(surface.registry().len(), 1);
    assert_eq!(surface.registry().get("c-2").unwrap().origin(), Point::new(30.0, 10.0));
}

#[test]
fn set_surface_swaps_attachment() {
    let (mut connector, host) = connect_recording(|_| (), Config::default());
    let first = connector.surface();

    let second = connector.create_surface().unwrap();
    assert_eq!(second.borrow().id(), "c-2");
    let old = connector.set_surface(second.clone());

    assert!(old.ptr_eq(&first));
    assert!(connector.surface().ptr_eq(&second));
    assert_eq!(
        host.events(),
        vec![
            HostEvent::Attached("c-1".to_string()),
            HostEvent::Detached("c-1".to_string()),
            HostEvent::Attached("c-2".to_string()),
        ]
    );

    // Input now reaches the new surface only
    connector.handle_event(InputEvent::PointerMove { x: 9.0, y: 9.0 });
    assert_eq!(second.borrow().pointer(), Some(Point::new(9.0, 9.0)));
    assert_eq!(first.borrow().pointer(), None);
}

#[test]
fn configured_surface_size_is_used() {
    let config =
        Config::from_toml_str("[surface]\nwidth = 100\nheight = 50\nfill_screen = false\n").unwrap();
    let (mut connector, _host) = connect_recording(|_| (), config);
    connector.handle_event(InputEvent::Resize {
        width: 900,
        height: 900,
    });
    let surface = connector.surface();
    assert_eq!((surface.borrow().width(), surface.borrow().height()), (100, 50));
}

#[test]
fn event_loop_keeps_running_frames() {
    let config = Config::from_toml_str("[scheduler]\nrefresh_rate_hz = 1000.0\n").unwrap();
    let (frames, factory) = counter(Some(0.001));
    let (mut connector, _host) = connect_recording(factory, config);

    let mut event_loop: EventLoop<Connector> = EventLoop::try_new().unwrap();
    connector.schedule(&event_loop.handle()).unwrap();
    assert_eq!(frames.get(), 1);

    for _ in 0..500 {
        if frames.get() >= 3 {
            break;
        }
        event_loop
            .dispatch(Some(Duration::from_millis(10)), &mut connector)
            .unwrap();
    }

    assert!(frames.get() >= 3, "only {} frames ran", frames.get());
    assert!(connector.scheduler().in_flight());
}

#[test]
fn queued_input_reaches_listener_and_surface() {
    let config = Config::from_toml_str("[scheduler]\nrefresh_rate_hz = 1000.0\n").unwrap();
    let (keys, factory) = key_counter();
    let (mut connector, _host) = connect_recording(factory, config);
    let sender = connector.input_sender();

    let mut event_loop: EventLoop<Connector> = EventLoop::try_new().unwrap();
    connector.schedule(&event_loop.handle()).unwrap();

    sender
        .send(InputEvent::KeyDown {
            key: "a".to_string(),
        })
        .unwrap();
    sender
        .send(InputEvent::PointerMove { x: 12.0, y: 34.0 })
        .unwrap();

    let surface = connector.surface();
    for _ in 0..200 {
        if !keys.borrow().is_empty() && surface.borrow().pointer().is_some() {
            break;
        }
        event_loop
            .dispatch(Some(Duration::from_millis(10)), &mut connector)
            .unwrap();
    }

    assert_eq!(*keys.borrow(), vec!["a".to_string()]);
    assert_eq!(surface.borrow().pointer(), Some(Point::new(12.0, 34.0)));
}

#[test]
fn scheduling_twice_is_rejected() {
    let (frames, factory) = counter(None);
    let (mut connector, _host) = connect_recording(factory, Config::default());
    let event_loop: EventLoop<Connector> = EventLoop::try_new().unwrap();

    connector.schedule(&event_loop.handle()).unwrap();
    assert!(connector.schedule(&event_loop.handle()).is_err());
    assert_eq!(frames.get(), 1);
}
