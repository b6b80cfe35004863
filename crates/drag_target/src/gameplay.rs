use bevy::color::palettes::css::GREEN;
use bevy::prelude::*;
use bevy::window::WindowResized;
use bits_helpers::floating_score::spawn_floating_score;
use bits_helpers::input::{
    is_pointer_held, just_pressed_screen_position, just_released_screen_position,
    pressed_screen_position,
};

use crate::config::{TARGET_COLOR, Variant};
use crate::countdown::CountdownPhase;
use crate::engine::{DropOutcome, GameState};
use crate::ui::HudUI;

/// Source of randomness for respawns.
#[derive(Resource, Clone)]
pub struct SpawnRandom(pub fastrand::Rng);

impl Default for SpawnRandom {
    fn default() -> Self {
        Self(fastrand::Rng::new())
    }
}

/// Pointer position when the current drag began, screen space.
#[derive(Resource, Default)]
pub struct DragState {
    pub pointer_origin: Option<Vec2>,
}

#[derive(Component)]
pub struct Target;

#[derive(Component)]
pub struct Draggable {
    material: Handle<ColorMaterial>,
}

/// Screen-space top-left corner to world-space center of a box of `size`.
pub fn to_world(corner: Vec2, size: f32, screen: Vec2) -> Vec2 {
    let center = corner + Vec2::splat(size / 2.0);
    Vec2::new(center.x - screen.x / 2.0, screen.y / 2.0 - center.y)
}

// Cloud puffs in a unit box: (offset, radius)
const CLOUD_PUFFS: [(Vec2, f32); 4] = [
    (Vec2::new(-0.25, -0.1), 0.25),
    (Vec2::new(0.0, 0.08), 0.32),
    (Vec2::new(0.26, -0.08), 0.24),
    (Vec2::new(0.0, -0.2), 0.22),
];

pub fn setup(
    mut commands: Commands,
    game: Res<GameState>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    commands.spawn(Camera2d);

    let screen = game.screen();
    let target = game.target_bounds();
    commands.spawn((
        Sprite::from_color(TARGET_COLOR, target.size()),
        Transform::from_translation(to_world(target.min, target.width(), screen).extend(0.0)),
        Target,
    ));

    let material = materials.add(ColorMaterial::from(game.object_color()));
    let size = game.object_size();
    let transform = Transform::from_translation(
        to_world(game.object_position(), size, screen).extend(1.0),
    )
    .with_scale(Vec3::new(size, size, 1.0));

    match game.config().variant {
        Variant::Square => {
            commands.spawn((
                Mesh2d(meshes.add(Rectangle::new(1.0, 1.0))),
                MeshMaterial2d(material.clone()),
                transform,
                Draggable { material },
            ));
        }
        Variant::Cloud => {
            commands
                .spawn((
                    transform,
                    Visibility::default(),
                    Draggable {
                        material: material.clone(),
                    },
                ))
                .with_children(|parent| {
                    for (offset, radius) in CLOUD_PUFFS {
                        parent.spawn((
                            Mesh2d(meshes.add(Circle::new(radius))),
                            MeshMaterial2d(material.clone()),
                            Transform::from_translation(offset.extend(0.0)),
                        ));
                    }
                });
        }
    }
}

/// Ends the open drag and celebrates a score.
fn finish_drag(commands: &mut Commands, game: &mut GameState, rng: &mut SpawnRandom) {
    if matches!(game.on_drag_end(&mut rng.0), DropOutcome::Scored(_)) {
        let target = game.target_bounds();
        let above_target = to_world(target.min, target.width(), game.screen())
            + Vec2::new(0.0, target.height() / 2.0);
        spawn_floating_score(commands, above_target, "+1", GREEN);
    }
}

pub fn handle_drag_input(
    mut commands: Commands,
    mouse_input: Res<ButtonInput<MouseButton>>,
    touch_input: Res<Touches>,
    windows: Query<&Window>,
    mut drag_state: ResMut<DragState>,
    mut game: ResMut<GameState>,
    mut rng: ResMut<SpawnRandom>,
) {
    let released = just_released_screen_position(&mouse_input, &touch_input, &windows);

    if let Some(origin) = just_pressed_screen_position(&mouse_input, &touch_input, &windows) {
        // A release we never saw; close that drag where it stands.
        if drag_state.pointer_origin.take().is_some() {
            finish_drag(&mut commands, &mut game, &mut rng);
        }
        if !game.object_bounds().contains(origin) {
            return;
        }
        game.on_drag_start();

        // Pressed and released within one frame: a complete drag.
        match released {
            Some(released_at) => {
                if let Some(position) = released_at {
                    game.on_drag_move(position - origin);
                }
                finish_drag(&mut commands, &mut game, &mut rng);
            }
            None => drag_state.pointer_origin = Some(origin),
        }
        return;
    }

    let Some(origin) = drag_state.pointer_origin else {
        return;
    };

    if let Some(released_at) = released {
        if let Some(position) = released_at {
            game.on_drag_move(position - origin);
        }
        drag_state.pointer_origin = None;
        finish_drag(&mut commands, &mut game, &mut rng);
    } else if let Some(position) = pressed_screen_position(&mouse_input, &touch_input, &windows) {
        game.on_drag_move(position - origin);
    } else if !is_pointer_held(&mouse_input, &touch_input) {
        drag_state.pointer_origin = None;
        finish_drag(&mut commands, &mut game, &mut rng);
    }
}

pub fn tick_countdown(time: Res<Time>, mut game: ResMut<GameState>) {
    if game.countdown_phase() == CountdownPhase::Idle {
        return;
    }
    game.advance(time.delta());
}

pub fn track_window_size(mut resized: EventReader<WindowResized>, mut game: ResMut<GameState>) {
    if let Some(event) = resized.read().last() {
        if let Err(err) = game.set_screen(Vec2::new(event.width, event.height)) {
            debug!("Keeping the previous play area: {err}");
        }
    }
}

pub fn sync_scene(
    game: Res<GameState>,
    mut hud: ResMut<HudUI>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut target: Query<&mut Transform, (With<Target>, Without<Draggable>)>,
    mut draggable: Query<(&mut Transform, &Draggable), Without<Target>>,
) {
    if !game.is_changed() {
        return;
    }
    hud.update(game.score(), game.high_score(), game.remaining_secs());

    let screen = game.screen();
    let bounds = game.target_bounds();
    for mut transform in &mut target {
        transform.translation = to_world(bounds.min, bounds.width(), screen).extend(0.0);
    }

    let size = game.object_size();
    let center = to_world(game.object_position(), size, screen);
    for (mut transform, draggable) in &mut draggable {
        transform.translation = center.extend(1.0);
        transform.scale = Vec3::new(size, size, 1.0);
        if let Some(material) = materials.get_mut(&draggable.material) {
            material.color = game.object_color();
        }
    }
}

#[cfg(test)]
#[expect(
    clippy::missing_assert_message,
    reason = "assert_eq output already shows both sides"
)]
mod tests {
    use super::*;

    #[test]
    fn screen_corners_map_to_world_space() {
        let screen = Vec2::new(360.0, 640.0);
        assert_eq!(to_world(Vec2::ZERO, 60.0, screen), Vec2::new(-150.0, 290.0));
        assert_eq!(
            to_world(Vec2::new(300.0, 580.0), 60.0, screen),
            Vec2::new(150.0, -290.0)
        );
        assert_eq!(to_world(Vec2::new(130.0, 270.0), 100.0, screen), Vec2::ZERO);
    }
}
