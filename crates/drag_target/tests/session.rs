#![expect(
    clippy::missing_assert_message,
    clippy::tests_outside_test_module,
    reason = "integration tests, assert_eq output already shows both sides"
)]

use core::time::Duration;

use bevy::ecs::system::RunSystemOnce;
use bevy::prelude::*;
use drag_target::config::{CLOUD_PALETTE, GameConfig, SQUARE_PALETTE, Variant};
use drag_target::countdown::CountdownPhase;
use drag_target::engine::{DropOutcome, GameState, Scored, overlaps};
use drag_target::gameplay::{sync_scene, tick_countdown};
use drag_target::parse_variant;
use drag_target::spawn::{Edge, Spawn, SpawnRng};
use drag_target::ui::HudUI;

const SCREEN: Vec2 = Vec2::new(360.0, 640.0);

/// Always the first edge, first palette entry and the start of the edge.
struct Corner;

impl SpawnRng for Corner {
    fn index(&mut self, _len: usize) -> usize {
        0
    }

    fn unit(&mut self) -> f32 {
        0.0
    }
}

fn drop_at(game: &mut GameState, at: Vec2, rng: &mut impl SpawnRng) -> DropOutcome {
    game.on_drag_start();
    game.on_drag_move(at - game.object_position());
    game.on_drag_end(rng)
}

#[expect(clippy::float_cmp, reason = "edge coordinates are computed exactly")]
fn on_edge(game: &GameState) -> bool {
    let position = game.object_position();
    let free = SCREEN - Vec2::splat(game.object_size());
    position.x == 0.0 || position.y == 0.0 || position.x == free.x || position.y == free.y
}

#[test]
fn random_session_keeps_invariants() {
    let mut rng = fastrand::Rng::with_seed(42);
    let mut game =
        GameState::new(GameConfig::default(), SCREEN, &mut rng).expect("valid screen");
    let mut previous_high = 0;
    let mut previous_size = game.object_size();

    for round in 0..200 {
        // Every third drop misses by landing in the top-left corner.
        let at = if round % 3 == 0 {
            Vec2::ZERO
        } else {
            game.target_bounds().min
        };
        let size_before = game.object_size();
        match drop_at(&mut game, at, &mut rng) {
            DropOutcome::Scored(_) => {
                assert!(game.object_size() <= previous_size);
                assert!(on_edge(&game), "{}", game.object_position());
            }
            DropOutcome::Missed { position } => {
                assert_eq!(position, at);
                assert_eq!(game.object_size(), size_before);
            }
        }
        assert!(game.high_score() >= previous_high);
        assert!(game.high_score() >= game.score());
        assert!(game.object_size() >= GameConfig::default().size.floor);
        previous_high = game.high_score();
        previous_size = game.object_size();
    }
}

#[test]
fn dropping_exactly_on_the_target_scores_once() {
    let mut game =
        GameState::new(GameConfig::default(), SCREEN, &mut Corner).expect("valid screen");
    let target = game.target_bounds();

    let outcome = drop_at(&mut game, target.min, &mut Corner);

    assert_eq!(
        outcome,
        DropOutcome::Scored(Scored {
            score: 1,
            high_score: 1,
            new_high_score: true,
            spawn: Spawn {
                edge: Edge::Top,
                position: Vec2::ZERO,
                swatch: SQUARE_PALETTE[0],
            },
        })
    );
    assert_eq!(game.object_size(), 55.0);
    assert_eq!(game.object_position(), Vec2::ZERO);
    assert!(!overlaps(game.object_bounds(), target));
}

#[test]
fn disjoint_drop_changes_nothing() {
    let mut game =
        GameState::new(GameConfig::default(), SCREEN, &mut Corner).expect("valid screen");
    let target = game.target_bounds();
    let left_of_target = Vec2::new(target.min.x - game.object_size() - 1.0, target.min.y);

    let outcome = drop_at(&mut game, left_of_target, &mut Corner);

    assert_eq!(
        outcome,
        DropOutcome::Missed {
            position: left_of_target
        }
    );
    assert_eq!((game.score(), game.high_score()), (0, 0));
    assert_eq!(game.object_size(), 60.0);
}

#[test]
fn cloud_variant_uses_its_own_sizes_and_palette() {
    let config = GameConfig::for_variant(parse_variant(Some("CLOUD"))).expect("cloud config");
    let mut game = GameState::new(config, SCREEN, &mut Corner).expect("valid screen");
    assert_eq!(game.object_size(), 120.0);
    assert_eq!(game.swatch(), CLOUD_PALETTE[0]);

    for _ in 0..20 {
        let at = game.target_bounds().min;
        drop_at(&mut game, at, &mut Corner);
    }
    assert_eq!(game.object_size(), 60.0);
    assert_eq!(parse_variant(Some("hexagon")), Variant::Square);
    assert_eq!(parse_variant(None), Variant::Square);
}

fn world_with(game: GameState, elapsed: Duration) -> World {
    let mut world = World::new();
    world.insert_resource(game);
    let mut time = Time::<()>::default();
    time.advance_by(elapsed);
    world.insert_resource(time);
    world
}

fn advance(world: &mut World, elapsed: Duration) {
    world.resource_mut::<Time>().advance_by(elapsed);
    world
        .run_system_once(tick_countdown)
        .expect("tick_countdown runs");
}

#[test]
fn countdown_system_follows_frame_time() {
    let mut world = world_with(
        GameState::new(GameConfig::default(), SCREEN, &mut Corner).expect("valid screen"),
        Duration::from_secs(3),
    );

    // Idle: nothing happens no matter how long the frame was.
    world
        .run_system_once(tick_countdown)
        .expect("tick_countdown runs");
    assert_eq!(world.resource::<GameState>().remaining_secs(), 10);

    {
        let mut game = world.resource_mut::<GameState>();
        let target = game.target_bounds().min;
        drop_at(&mut game, target, &mut Corner);
        drop_at(&mut game, target, &mut Corner);
        assert_eq!(game.score(), 2);
    }

    advance(&mut world, Duration::from_millis(1500));
    assert_eq!(world.resource::<GameState>().remaining_secs(), 9);

    advance(&mut world, Duration::from_millis(8600));
    let game = world.resource::<GameState>();
    assert_eq!(game.countdown_phase(), CountdownPhase::Idle);
    assert_eq!(game.remaining_secs(), 10);
    assert_eq!(game.score(), 0);
    assert_eq!(game.high_score(), 2);
}

#[test]
fn scene_sync_feeds_the_hud() {
    let mut game =
        GameState::new(GameConfig::default(), SCREEN, &mut Corner).expect("valid screen");
    let target = game.target_bounds().min;
    drop_at(&mut game, target, &mut Corner);

    let mut world = world_with(game, Duration::ZERO);
    world.insert_resource(HudUI::new("drag", 10));
    world.insert_resource(Assets::<ColorMaterial>::default());
    world
        .run_system_once(sync_scene)
        .expect("sync_scene runs");

    let hud = world.resource::<HudUI>();
    assert!(hud.is_dirty());
    assert_eq!(hud.score_text(), "Score: 1");
    assert_eq!(hud.high_score_text(), "High Score: 1");
    assert_eq!(hud.time_text(), "Time: 10s");
}
