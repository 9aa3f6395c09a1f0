// Copyright 2025 the Boxwood Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end behavior of the engine: pointer input in, box events and frames out.

use std::sync::Arc;

use boxwood::box_tree::{Bounds, NodeId, Position};
use boxwood::interaction::{BoxEvent, StateId};
use boxwood::pointer::{DragPhase, RawPointerKind};
use boxwood::render::Frame;
use boxwood::{Engine, EngineConfig, EngineError, PaintMode, RecordingSurface};
use parking_lot::Mutex;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn engine() -> (Engine<RecordingSurface>, RecordingSurface) {
    init_tracing();
    let surface = RecordingSurface::new();
    let engine = Engine::new(EngineConfig::default(), surface.clone()).unwrap();
    (engine, surface)
}

fn record(
    engine: &mut Engine<RecordingSurface>,
    node: NodeId,
    events: &[BoxEvent],
) -> Arc<Mutex<Vec<BoxEvent>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    for &event in events {
        let sink = seen.clone();
        engine.subscribe(node, event, move |_, ev| sink.lock().push(ev));
    }
    seen
}

/// Alpha of the absolute point `(x, y)` in `frame`, if the frame covers it.
fn alpha_at(frame: &Frame, x: i32, y: i32) -> Option<u8> {
    let fx = u32::try_from(x - frame.origin.x).ok()?;
    let fy = u32::try_from(y - frame.origin.y).ok()?;
    frame.pixel(fx, fy).map(|p| p[3])
}

#[test]
fn hover_enters_only_inside_the_box() {
    let (mut engine, _surface) = engine();
    let card = engine.create_node(10, 10, 100, 50, 0.0, "card");
    let seen = record(&mut engine, card, &[BoxEvent::In]);

    engine.dispatch_pointer_sample(RawPointerKind::Move, 5, 5);
    assert!(seen.lock().is_empty(), "(5, 5) is outside the card");
    assert_eq!(engine.state_of(card), Some(StateId::Normal));

    engine.dispatch_pointer_sample(RawPointerKind::Move, 15, 15);
    assert_eq!(*seen.lock(), [BoxEvent::In]);
    assert_eq!(engine.state_of(card), Some(StateId::Hover));
}

#[test]
fn topmost_sibling_takes_the_hover() {
    let (mut engine, _surface) = engine();
    let a = engine.create_node(0, 0, 100, 100, 0.0, "a");
    let b = engine.create_node(20, 20, 100, 100, 0.0, "b");
    let c = engine.create_node(40, 40, 100, 100, 0.0, "c");

    engine.dispatch_pointer_sample(RawPointerKind::Move, 50, 50);
    assert_eq!(engine.state_of(a), Some(StateId::Normal));
    assert_eq!(engine.state_of(b), Some(StateId::Normal));
    assert_eq!(engine.state_of(c), Some(StateId::Hover));
    assert_eq!(engine.pipeline().top_box(), Some(c));
}

#[test]
fn leaving_returns_to_normal_and_clears_the_border() {
    let (mut engine, _surface) = engine();
    let card = engine.create_node(10, 10, 100, 50, 0.0, "card");
    let seen = record(&mut engine, card, &[BoxEvent::In, BoxEvent::Out]);

    engine.dispatch_pointer_sample(RawPointerKind::Move, 15, 15);
    let overlay_root = engine.tree().overlay_root();
    assert_eq!(engine.tree().overlay().children_of(overlay_root).len(), 1);

    engine.dispatch_pointer_sample(RawPointerKind::Move, 700, 500);
    assert_eq!(*seen.lock(), [BoxEvent::In, BoxEvent::Out]);
    assert_eq!(engine.state_of(card), Some(StateId::Normal));
    assert!(engine.tree().overlay().children_of(overlay_root).is_empty());
}

#[test]
fn drag_moves_the_box_and_repaints() {
    let (mut engine, surface) = engine();
    let card = engine.create_node(10, 10, 100, 50, 0.0, "card");
    let seen = record(&mut engine, card, &[BoxEvent::MoveStart, BoxEvent::MoveEnd]);

    engine.dispatch_pointer_sample(RawPointerKind::Move, 15, 15);
    engine.dispatch_pointer_sample(RawPointerKind::Down, 20, 20);
    surface.clear();

    engine.dispatch_pointer_sample(RawPointerKind::Move, 60, 70);
    assert_eq!(engine.state_of(card), Some(StateId::Move));
    assert_eq!(engine.tree().absolute_position(card), Position::new(50, 60));
    assert_eq!(surface.len(), 1, "one sample paints one frame");

    // The frame covers both where the card was and where it is now.
    let frame = surface.last().unwrap();
    assert_eq!(alpha_at(&frame, 12, 12), Some(0));
    assert_eq!(alpha_at(&frame, 100, 100), Some(255));

    engine.dispatch_pointer_sample(RawPointerKind::Up, 60, 70);
    assert_eq!(*seen.lock(), [BoxEvent::MoveStart, BoxEvent::MoveEnd]);
    assert_eq!(engine.state_of(card), Some(StateId::Hover));
}

#[test]
fn press_and_release_without_moving_is_not_a_drag() {
    let (mut engine, _surface) = engine();
    let card = engine.create_node(10, 10, 100, 50, 0.0, "card");
    let seen = record(&mut engine, card, &[BoxEvent::MoveStart]);

    engine.dispatch_pointer_sample(RawPointerKind::Move, 15, 15);
    engine.dispatch_pointer_sample(RawPointerKind::Down, 20, 20);
    engine.dispatch_pointer_sample(RawPointerKind::Up, 20, 20);
    assert!(seen.lock().is_empty());
    assert_eq!(engine.tree().absolute_position(card), Position::new(10, 10));
}

#[test]
fn release_outside_the_root_ends_the_drag() {
    let (mut engine, _surface) = engine();
    let card = engine.create_node(10, 10, 100, 50, 0.0, "card");

    engine.dispatch_pointer_sample(RawPointerKind::Move, 15, 15);
    engine.dispatch_pointer_sample(RawPointerKind::Down, 20, 20);
    engine.dispatch_pointer_sample(RawPointerKind::Move, 30, 30);
    assert_eq!(engine.tree().absolute_position(card), Position::new(20, 20));

    // `x == 0` is on the root's edge, which hit testing excludes.
    engine.dispatch_pointer_sample(RawPointerKind::Up, 0, 30);
    assert_eq!(engine.pipeline().drag().phase(), DragPhase::None);

    engine.dispatch_pointer_sample(RawPointerKind::Move, 300, 300);
    assert_eq!(
        engine.tree().absolute_position(card),
        Position::new(20, 20),
        "the card no longer follows the pointer"
    );
}

#[test]
fn raw_event_names() {
    let (mut engine, _surface) = engine();
    let card = engine.create_node(10, 10, 100, 50, 0.0, "card");

    engine.dispatch_raw_event("wheel", 15, 15);
    assert_eq!(engine.state_of(card), Some(StateId::Normal));

    engine.dispatch_raw_event("mousemove", 15, 15);
    assert_eq!(engine.state_of(card), Some(StateId::Hover));
}

#[test]
fn outside_samples_are_ignored() {
    let (mut engine, surface) = engine();
    let card = engine.create_node(10, 10, 100, 50, 0.0, "card");
    surface.clear();

    engine.dispatch_pointer_sample(RawPointerKind::Move, -5, 900);
    assert_eq!(engine.state_of(card), Some(StateId::Normal));
    assert!(surface.is_empty());
}

#[test]
fn create_node_paints_it() {
    let (mut engine, surface) = engine();
    engine.create_node(10, 10, 100, 50, 0.0, "card");
    assert_eq!(surface.len(), 1);
    let frame = surface.last().unwrap();
    assert_eq!(alpha_at(&frame, 50, 30), Some(255));
}

#[test]
fn disabled_nodes_are_not_painted() {
    let (mut engine, surface) = engine();
    let card = engine.create_node(10, 10, 100, 50, 0.0, "card");

    engine.disable_node(card);
    assert!(!engine.tree().get(card).unwrap().is_used());
    let frame = surface.last().unwrap();
    assert_eq!(alpha_at(&frame, 50, 30), Some(0));

    engine.enable_node(card);
    let frame = surface.last().unwrap();
    assert_eq!(alpha_at(&frame, 50, 30), Some(255));
}

#[test]
fn disabled_nodes_take_no_hover() {
    let (mut engine, _surface) = engine();
    let card = engine.create_node(10, 10, 100, 50, 0.0, "card");
    let seen = record(&mut engine, card, &[BoxEvent::In]);

    engine.disable_node(card);
    engine.dispatch_pointer_sample(RawPointerKind::Move, 50, 30);
    assert!(seen.lock().is_empty());
    assert_eq!(engine.pipeline().top_box(), Some(engine.tree().content_root()));

    engine.enable_node(card);
    engine.dispatch_pointer_sample(RawPointerKind::Move, 51, 30);
    assert_eq!(*seen.lock(), [BoxEvent::In]);
}

#[test]
fn paint_outside_the_viewport_is_skipped() {
    let (mut engine, surface) = engine();
    surface.clear();
    engine.paint_rect(Bounds::new(900, 900, 10, 10));
    assert!(surface.is_empty());
}

#[test]
fn emit_drives_the_machine() {
    let (mut engine, _surface) = engine();
    let card = engine.create_node(10, 10, 100, 50, 0.0, "card");
    let seen = record(&mut engine, card, &[BoxEvent::In]);

    engine.emit(card, BoxEvent::In);
    assert_eq!(engine.state_of(card), Some(StateId::Hover));
    assert_eq!(*seen.lock(), [BoxEvent::In]);

    // No transition is defined for IN from Hover; subscribers still hear it.
    engine.emit(card, BoxEvent::In);
    assert_eq!(engine.state_of(card), Some(StateId::Hover));
    assert_eq!(seen.lock().len(), 2);
}

#[test]
fn unsubscribe_stops_callbacks() {
    let (mut engine, _surface) = engine();
    let card = engine.create_node(10, 10, 100, 50, 0.0, "card");
    let seen = Arc::new(Mutex::new(0_u32));
    let sink = seen.clone();
    let id = engine.subscribe(card, BoxEvent::In, move |_, _| *sink.lock() += 1);

    assert!(engine.unsubscribe(id));
    assert!(!engine.unsubscribe(id));
    engine.dispatch_pointer_sample(RawPointerKind::Move, 15, 15);
    assert_eq!(*seen.lock(), 0);
}

#[test]
fn zoom_scales_the_frame() {
    init_tracing();
    let surface = RecordingSurface::new();
    let config = EngineConfig::default().with_zoom(2.0);
    let mut engine = Engine::new(config, surface.clone()).unwrap();
    engine.paint_rect(Bounds::new(0, 0, 10, 5));
    // Transparent, but still presented.
    let frame = surface.last().unwrap();
    assert_eq!((frame.width, frame.height), (20, 10));
}

#[test]
fn high_zoom_skips_oversized_paints() {
    init_tracing();
    let surface = RecordingSurface::new();
    let config = EngineConfig::default().with_zoom(100.0);
    let mut engine = Engine::new(config, surface.clone()).unwrap();

    let card = engine.create_node(1, 1, 2, 2, 0.0, "card");
    let frame = surface.last().unwrap();
    assert_eq!(alpha_at(&frame, 200, 200), Some(255));

    // 800 x 600 units is 80000 x 60000 device pixels.
    surface.clear();
    engine.repaint_all();
    engine.create_node(0, 0, 700, 500, 0.0, "wide");
    assert!(surface.is_empty(), "oversized regions are not presented");

    engine.dispatch_pointer_sample(RawPointerKind::Move, 2, 2);
    assert_eq!(engine.state_of(card), Some(StateId::Normal));
    assert!(engine.pipeline().top_box().is_some());
}

#[test]
fn extreme_zoom_does_not_panic() {
    init_tracing();
    let surface = RecordingSurface::new();
    let config = EngineConfig::default().with_zoom(1e12);
    let mut engine = Engine::new(config, surface.clone()).unwrap();
    engine.create_node(10, 10, 100, 50, 0.0, "card");
    engine.repaint_all();
    assert!(surface.is_empty());
}

#[test]
fn resize_repaints_the_new_viewport() {
    let (mut engine, surface) = engine();
    engine.create_node(10, 10, 100, 50, 0.0, "card");
    engine.resize(300, 200);
    assert_eq!(engine.tree().size(), (300, 200));
    assert_eq!(engine.config().viewport_width, 300);
    let frame = surface.last().unwrap();
    assert_eq!((frame.width, frame.height), (300, 200));
}

#[test]
fn background_painting() {
    init_tracing();
    let surface = RecordingSurface::new();
    let config = EngineConfig::default().with_paint_mode(PaintMode::Background);
    let mut engine = Engine::new(config, surface.clone()).unwrap();

    let card = engine.create_node(10, 10, 100, 50, 0.0, "card");
    engine.dispatch_pointer_sample(RawPointerKind::Move, 15, 15);
    engine.flush();
    assert_eq!(surface.len(), 2, "node creation and the hover border");
    assert_eq!(engine.state_of(card), Some(StateId::Hover));

    engine.shutdown();
    engine.dispatch_pointer_sample(RawPointerKind::Move, 700, 500);
    engine.flush();
    assert_eq!(surface.len(), 2, "paints after shutdown are dropped");
    assert_eq!(engine.state_of(card), Some(StateId::Normal));
}

#[test]
fn invalid_config_is_rejected() {
    init_tracing();
    let config = EngineConfig::default().with_viewport(0, 100);
    let err = Engine::new(config, RecordingSurface::new()).unwrap_err();
    assert!(matches!(err, EngineError::InvalidConfig(_)));
}
