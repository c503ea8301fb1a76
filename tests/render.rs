use playit::config::Config;
use playit::draw::CairoRenderer;
use playit::{
    CairoHost, Circle, Connector, DrawOptions, Label, Movable, Rectangle, SequentialIds,
    connect_with,
};
use std::cell::RefCell;
use std::rc::Rc;

const OPAQUE_RED: u32 = 0xFFFF_0000;
const OPAQUE_BLUE: u32 = 0xFF00_00FF;
const OPAQUE_WHITE: u32 = 0xFFFF_FFFF;

fn connect_cairo(width: u32, height: u32) -> (Connector, Rc<RefCell<CairoRenderer>>) {
    let host = CairoHost::new(width, height);
    let connector = connect_with(
        |_| (),
        host.clone(),
        Config::default(),
        Rc::new(SequentialIds::new("px")),
    )
    .unwrap();
    let renderer = host.attached_renderer().unwrap();
    (connector, renderer)
}

fn pixel(renderer: &Rc<RefCell<CairoRenderer>>, x: u32, y: u32) -> u32 {
    renderer.borrow().argb_at(x, y).unwrap()
}

fn surface_has_pixels(renderer: &Rc<RefCell<CairoRenderer>>) -> bool {
    renderer
        .borrow()
        .pixels()
        .map(|data| data.iter().any(|byte| *byte != 0))
        .unwrap_or(false)
}

#[test]
fn filled_rectangle_paints_and_removal_clears() {
    let (connector, renderer) = connect_cairo(100, 100);
    let rect = Rectangle::new(
        &connector,
        10.0,
        10.0,
        20.0,
        20.0,
        DrawOptions::new().fill_color("red"),
    )
    .unwrap();

    assert_eq!(pixel(&renderer, 20, 20), OPAQUE_RED);
    assert_eq!(pixel(&renderer, 60, 60), 0);

    rect.remove();
    assert_eq!(pixel(&renderer, 20, 20), 0);
}

#[test]
fn moving_a_circle_leaves_no_trail() {
    let (connector, renderer) = connect_cairo(100, 100);
    let mut circle = Circle::new(
        &connector,
        20.0,
        50.0,
        8.0,
        DrawOptions::new().fill_color("blue"),
    )
    .unwrap();
    assert_eq!(pixel(&renderer, 20, 50), OPAQUE_BLUE);

    circle.right(50.0).unwrap();

    assert_eq!(pixel(&renderer, 20, 50), 0);
    assert_eq!(pixel(&renderer, 70, 50), OPAQUE_BLUE);
}

#[test]
fn later_shapes_paint_over_earlier_ones() {
    let (connector, renderer) = connect_cairo(100, 100);
    let mut red = Rectangle::new(
        &connector,
        0.0,
        0.0,
        50.0,
        50.0,
        DrawOptions::new().fill_color("red"),
    )
    .unwrap();
    let _blue = Rectangle::new(
        &connector,
        20.0,
        20.0,
        50.0,
        50.0,
        DrawOptions::new().fill_color("blue"),
    )
    .unwrap();
    assert_eq!(pixel(&renderer, 35, 35), OPAQUE_BLUE);

    // Moving re-registers on top of the paint order
    red.move_to(1.0, 1.0).unwrap();
    assert_eq!(pixel(&renderer, 35, 35), OPAQUE_RED);
}

#[test]
fn background_survives_redraws() {
    let (connector, renderer) = connect_cairo(100, 100);
    connector.surface().borrow_mut().set_background_color("white");
    assert_eq!(pixel(&renderer, 90, 90), OPAQUE_WHITE);

    let circle = Circle::new(&connector, 50.0, 50.0, 5.0, DrawOptions::new()).unwrap();
    circle.remove();
    assert_eq!(pixel(&renderer, 90, 90), OPAQUE_WHITE);
}

#[test]
fn label_renders_text_pixels() {
    let (connector, renderer) = connect_cairo(200, 80);
    let _label = Label::new(
        &connector,
        "Hello",
        10.0,
        50.0,
        DrawOptions::new().fill_color("black"),
    )
    .unwrap();

    assert!(
        surface_has_pixels(&renderer),
        "label should render pixels"
    );
}

#[test]
fn resize_replays_into_new_buffer() {
    let (mut connector, renderer) = connect_cairo(50, 50);
    let _rect = Rectangle::new(
        &connector,
        100.0,
        100.0,
        10.0,
        10.0,
        DrawOptions::new().fill_color("red"),
    )
    .unwrap();
    assert_eq!(pixel(&renderer, 105, 105), 0);

    connector.handle_event(playit::InputEvent::Resize {
        width: 200,
        height: 200,
    });

    assert_eq!(renderer.borrow().width(), 200);
    assert_eq!(pixel(&renderer, 105, 105), OPAQUE_RED);
}
