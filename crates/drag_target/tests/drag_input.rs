#![expect(
    clippy::missing_assert_message,
    clippy::tests_outside_test_module,
    reason = "integration tests, assert_eq output already shows both sides"
)]

use bevy::ecs::system::RunSystemOnce;
use bevy::prelude::*;
use bevy::window::WindowResolution;
use drag_target::config::GameConfig;
use drag_target::countdown::CountdownPhase;
use drag_target::engine::GameState;
use drag_target::gameplay::{DragState, SpawnRandom, handle_drag_input};
use drag_target::spawn::SpawnRng;

const SCREEN: Vec2 = Vec2::new(360.0, 640.0);

/// Puts the first object in the top-left corner.
struct Corner;

impl SpawnRng for Corner {
    fn index(&mut self, _len: usize) -> usize {
        0
    }

    fn unit(&mut self) -> f32 {
        0.0
    }
}

/// A session with the 60px object at the origin and the target at (130, 270).
fn pointer_world() -> World {
    let mut world = World::new();
    let game =
        GameState::new(GameConfig::default(), SCREEN, &mut Corner).expect("valid screen");
    world.insert_resource(game);
    world.insert_resource(SpawnRandom(fastrand::Rng::with_seed(7)));
    world.init_resource::<DragState>();
    world.init_resource::<ButtonInput<MouseButton>>();
    world.init_resource::<Touches>();
    world.spawn(Window {
        resolution: WindowResolution::new(SCREEN.x, SCREEN.y),
        ..default()
    });
    world
}

/// One frame of mouse input, `None` meaning the cursor left the window.
fn frame(
    world: &mut World,
    cursor: Option<Vec2>,
    buttons: impl FnOnce(&mut ButtonInput<MouseButton>),
) {
    {
        let mut input = world.resource_mut::<ButtonInput<MouseButton>>();
        input.clear();
        buttons(&mut input);
    }
    let mut windows = world.query::<&mut Window>();
    for mut window in windows.iter_mut(world) {
        window.set_cursor_position(cursor);
    }
    world
        .run_system_once(handle_drag_input)
        .expect("handle_drag_input runs");
}

fn press(input: &mut ButtonInput<MouseButton>) {
    input.press(MouseButton::Left);
}

fn hold(_input: &mut ButtonInput<MouseButton>) {}

fn release(input: &mut ButtonInput<MouseButton>) {
    input.release(MouseButton::Left);
}

fn origin(world: &World) -> Option<Vec2> {
    world.resource::<DragState>().pointer_origin
}

#[test]
fn dragging_onto_the_target_scores() {
    let mut world = pointer_world();

    frame(&mut world, Some(Vec2::new(30.0, 30.0)), press);
    assert_eq!(origin(&world), Some(Vec2::new(30.0, 30.0)));
    assert_eq!(
        world.resource::<GameState>().countdown_phase(),
        CountdownPhase::Running
    );

    frame(&mut world, Some(Vec2::new(100.0, 100.0)), hold);
    assert_eq!(
        world.resource::<GameState>().object_position(),
        Vec2::new(70.0, 70.0)
    );

    frame(&mut world, Some(Vec2::new(160.0, 300.0)), release);
    let game = world.resource::<GameState>();
    assert_eq!((game.score(), game.high_score()), (1, 1));
    assert_eq!(game.object_size(), 55.0);
    assert_eq!(origin(&world), None);

    let floating = world.query::<&Text2d>().iter(&world).count();
    assert_eq!(floating, 1);
}

#[test]
fn presses_outside_the_object_are_ignored() {
    let mut world = pointer_world();

    frame(&mut world, Some(Vec2::new(200.0, 400.0)), press);
    frame(&mut world, Some(Vec2::new(250.0, 450.0)), hold);
    frame(&mut world, Some(Vec2::new(250.0, 450.0)), release);

    let game = world.resource::<GameState>();
    assert_eq!(game.object_position(), Vec2::ZERO);
    assert_eq!(game.countdown_phase(), CountdownPhase::Idle);
    assert_eq!(origin(&world), None);
}

#[test]
fn releasing_outside_the_window_keeps_the_last_move() {
    let mut world = pointer_world();

    frame(&mut world, Some(Vec2::new(30.0, 30.0)), press);
    frame(&mut world, Some(Vec2::new(100.0, 100.0)), hold);
    frame(&mut world, None, release);

    assert_eq!(origin(&world), None);
    assert_eq!(
        world.resource::<GameState>().object_position(),
        Vec2::new(70.0, 70.0)
    );

    // The cursor coming back without a press moves nothing.
    frame(&mut world, Some(Vec2::new(150.0, 150.0)), hold);
    let game = world.resource::<GameState>();
    assert_eq!(game.object_position(), Vec2::new(70.0, 70.0));
    assert_eq!(game.score(), 0);
}

#[test]
fn a_tap_does_not_leave_a_drag_behind() {
    let mut world = pointer_world();

    frame(&mut world, Some(Vec2::new(30.0, 30.0)), |input| {
        input.press(MouseButton::Left);
        input.release(MouseButton::Left);
    });
    assert_eq!(origin(&world), None);
    assert_eq!(
        world.resource::<GameState>().countdown_phase(),
        CountdownPhase::Running
    );

    // A later press elsewhere must not drag the object from the old origin.
    frame(&mut world, Some(Vec2::new(300.0, 600.0)), press);
    frame(&mut world, Some(Vec2::new(200.0, 200.0)), hold);

    assert_eq!(origin(&world), None);
    assert_eq!(
        world.resource::<GameState>().object_position(),
        Vec2::ZERO
    );
}

#[test]
fn a_lost_release_drops_the_object_where_it_is() {
    let mut world = pointer_world();

    frame(&mut world, Some(Vec2::new(30.0, 30.0)), press);
    frame(&mut world, Some(Vec2::new(60.0, 90.0)), hold);
    // Focus lost: the button state is wiped without a release event.
    frame(&mut world, Some(Vec2::new(200.0, 200.0)), ButtonInput::reset_all);

    assert_eq!(origin(&world), None);
    let game = world.resource::<GameState>();
    assert_eq!(game.object_position(), Vec2::new(30.0, 60.0));
    assert_eq!(game.score(), 0);
}
